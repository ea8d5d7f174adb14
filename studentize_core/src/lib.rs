//! `studentize_core` derives learner-facing editions of course material.
//! Course maintainers keep one document holding both exercises and answers;
//! this crate removes the answers and leaves a short "Practice Time!" note
//! where they used to be.
//!
//! ## Processing Pipeline
//!
//! ```text
//! tutorial_*.md / tutorial_*.ipynb
//!   → Discovery (file name globs, `_student` outputs skipped, sorted)
//!   → Classifier (pure line / cell pattern checks)
//!   → Filter (markdown region state machine or notebook cell scan)
//!   → Writer (`<stem>_student.<ext>` next to the source)
//! ```
//!
//! ## Modules
//!
//! - [`classify`]: Stateless pattern checks shared by both filters.
//! - [`markdown`]: The line filter for markdown lessons.
//! - [`notebook`]: The notebook model and the cell filter.
//! - [`project`]: Discovery, per-file processing and reporting.
//! - [`config`]: Configuration loading from `studentize.toml`.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::path::Path;
//!
//! use studentize_core::StudentizeConfig;
//! use studentize_core::project::GenerateOptions;
//! use studentize_core::project::generate;
//!
//! let root = Path::new(".");
//! let config = StudentizeConfig::load_or_default(root).unwrap();
//! let report = generate(root, &config, &GenerateOptions::default()).unwrap();
//!
//! for outcome in &report.outcomes {
//! 	println!("{} ({})", outcome.output.display(), outcome.removal);
//! }
//! ```
//!
//! The filters also work on in-memory content:
//!
//! ```rust
//! use studentize_core::markdown::strip_markdown_solutions;
//!
//! let student = strip_markdown_solutions("intro\n<details>\nanswer\n</details>\noutro");
//! assert_eq!(student, "intro\noutro");
//! ```

pub use config::*;
pub use error::*;

pub mod classify;
pub mod config;
#[allow(unused_assignments)]
mod error;
pub mod markdown;
pub mod notebook;
pub mod project;

#[cfg(test)]
mod __fixtures;
