use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use studentize_core::project::DocumentKind;

#[derive(Parser)]
#[command(
	author,
	version,
	about = "Generate student editions of lessons and notebooks with the solutions removed.",
	long_about = "studentize derives learner-facing copies of course material. Keep one \
	              source document with both exercises and answers; studentize writes a \
	              sibling `*_student` file where every solution section is replaced by a short \
	              practice note.\n\nQuick start:\n  studentize init      Create a sample \
	              studentize.toml\n  studentize list      Show which files would be \
	              processed\n  studentize generate  Write the student editions"
)]
pub struct StudentizeCli {
	#[command(subcommand)]
	pub command: Option<Commands>,

	/// Path to the directory holding the lesson files.
	#[arg(long, short, global = true)]
	pub path: Option<PathBuf>,

	/// Enable verbose output.
	#[arg(long, short, global = true, default_value_t = false)]
	pub verbose: bool,

	/// Disable colored output.
	#[arg(long, global = true, default_value_t = false)]
	pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
	/// Create a sample `studentize.toml` in the project directory.
	///
	/// If a config file already exists, this command is a no-op and exits
	/// successfully.
	Init,
	/// Write a student edition for every lesson file.
	///
	/// Discovers `tutorial_*.md` and `tutorial_*.ipynb` files (configurable
	/// in `studentize.toml`), removes their solution sections and writes
	/// `<name>_student.<ext>` next to each source. A file that fails is
	/// reported and the remaining files are still processed; the exit code
	/// is non-zero if any file failed.
	Generate {
		/// Compute the student editions and report what would change without
		/// writing any files.
		#[arg(long, default_value_t = false)]
		dry_run: bool,

		/// Delete existing student editions before generating new ones, so
		/// outputs of renamed or removed lessons do not linger.
		#[arg(long, default_value_t = false)]
		clean: bool,

		/// Only process one kind of document.
		#[arg(long, value_enum)]
		only: Option<KindFilter>,

		/// Output format for the report. Use `text` for human-readable
		/// output or `json` for programmatic consumption.
		#[arg(long, value_enum, default_value_t = OutputFormat::Text)]
		format: OutputFormat,
	},
	/// List the lesson files that would be processed and their outputs.
	List {
		/// Only list one kind of document.
		#[arg(long, value_enum)]
		only: Option<KindFilter>,
	},
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
	/// Human-readable text output with colors and formatting.
	Text,
	/// JSON output for programmatic consumption.
	Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KindFilter {
	/// Markdown lessons (`.md`).
	Markdown,
	/// Jupyter notebooks (`.ipynb`).
	Notebook,
}

impl From<KindFilter> for DocumentKind {
	fn from(value: KindFilter) -> Self {
		match value {
			KindFilter::Markdown => Self::Markdown,
			KindFilter::Notebook => Self::Notebook,
		}
	}
}
