use std::path::Path;
use std::path::PathBuf;

use globset::Glob;
use globset::GlobSet;
use globset::GlobSetBuilder;

use crate::StudentizeError;
use crate::StudentizeResult;
use crate::config::DiscoveryConfig;
use crate::config::StudentizeConfig;
use crate::markdown;
use crate::notebook;
use crate::notebook::CellStats;
use crate::notebook::NotebookFilter;

/// The two document formats that can be turned into student editions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DocumentKind {
	/// A markdown lesson (`.md`), filtered line by line.
	Markdown,
	/// A Jupyter notebook (`.ipynb`), filtered cell by cell.
	Notebook,
}

impl DocumentKind {
	/// Detect the kind from a file extension.
	pub fn from_path(path: &Path) -> Option<Self> {
		match path.extension().and_then(|ext| ext.to_str()) {
			Some("md") => Some(Self::Markdown),
			Some("ipynb") => Some(Self::Notebook),
			_ => None,
		}
	}

	pub fn extension(self) -> &'static str {
		match self {
			Self::Markdown => "md",
			Self::Notebook => "ipynb",
		}
	}
}

impl std::fmt::Display for DocumentKind {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Markdown => write!(f, "markdown"),
			Self::Notebook => write!(f, "notebook"),
		}
	}
}

/// A source document found during discovery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
	pub path: PathBuf,
	pub kind: DocumentKind,
}

/// How much a student edition shrank compared to its source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Removal {
	/// Difference in line count. Negative when the practice blocks added
	/// more lines than were removed.
	Lines(i64),
	/// Cells removed from a notebook.
	Cells(CellStats),
}

impl std::fmt::Display for Removal {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Lines(lines) if *lines < 0 => write!(f, "{} lines added", lines.unsigned_abs()),
			Self::Lines(lines) => write!(f, "{lines} lines removed"),
			Self::Cells(stats) => write!(f, "{} solution cells removed", stats.removed()),
		}
	}
}

/// A student edition that was produced (or would be, in a dry run).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileOutcome {
	pub source: PathBuf,
	pub output: PathBuf,
	pub kind: DocumentKind,
	pub removal: Removal,
	/// `false` when running with `dry_run`.
	pub written: bool,
}

/// A document that could not be processed.
#[derive(Debug)]
pub struct FileFailure {
	pub source: PathBuf,
	pub error: StudentizeError,
}

/// Options for [`generate`].
#[derive(Debug, Clone, Copy, Default)]
pub struct GenerateOptions {
	/// Compute every student edition without writing it.
	pub dry_run: bool,
	/// Delete existing student editions before generating new ones.
	pub clean: bool,
	/// Restrict processing to one document kind.
	pub only: Option<DocumentKind>,
}

/// Everything that happened during one [`generate`] run.
#[derive(Debug, Default)]
pub struct GenerateReport {
	/// Documents discovered, in processing order.
	pub documents: Vec<Document>,
	/// Stale student editions that were deleted before processing.
	pub cleaned: Vec<PathBuf>,
	pub outcomes: Vec<FileOutcome>,
	pub failures: Vec<FileFailure>,
}

impl GenerateReport {
	/// Returns true if every discovered document was processed.
	pub fn is_ok(&self) -> bool {
		self.failures.is_empty()
	}

	/// Number of discovered documents of `kind`.
	pub fn count(&self, kind: DocumentKind) -> usize {
		self.documents.iter().filter(|doc| doc.kind == kind).count()
	}
}

/// Turns source documents into student editions.
#[derive(Debug, Clone)]
pub struct Studentizer {
	suffix: String,
	notebook_filter: NotebookFilter,
}

impl Studentizer {
	pub fn new(config: &StudentizeConfig) -> StudentizeResult<Self> {
		Ok(Self {
			suffix: config.discovery.suffix.clone(),
			notebook_filter: NotebookFilter::new(&config.notebook)?,
		})
	}

	/// Where the student edition of `path` is written.
	pub fn output_path(&self, path: &Path) -> PathBuf {
		student_path(path, &self.suffix)
	}

	/// Read, filter and write one document. With `dry_run` the output is
	/// computed but not written.
	pub fn process(&self, document: &Document, dry_run: bool) -> StudentizeResult<FileOutcome> {
		let source = &document.path;
		let source_name = source.display().to_string();
		let content = std::fs::read_to_string(source).map_err(|e| {
			StudentizeError::ReadInput {
				path: source_name.clone(),
				source: e,
			}
		})?;

		let (student, removal) = match document.kind {
			DocumentKind::Markdown => {
				let student = markdown::strip_markdown_solutions(&content);
				let removed = line_delta(
					markdown::line_count(&content),
					markdown::line_count(&student),
				);
				(student, Removal::Lines(removed))
			}
			DocumentKind::Notebook => {
				let parsed = notebook::parse_notebook(&content, &source_name)?;
				let (stripped, stats) = self.notebook_filter.strip(parsed);
				let student = notebook::serialize_notebook(&stripped, &source_name)?;
				(student, Removal::Cells(stats))
			}
		};

		let output = self.output_path(source);
		if !dry_run {
			std::fs::write(&output, student).map_err(|e| {
				StudentizeError::WriteOutput {
					path: output.display().to_string(),
					source: e,
				}
			})?;
		}

		tracing::debug!(
			source = %source_name,
			output = %output.display(),
			%removal,
			dry_run,
			"processed document"
		);

		Ok(FileOutcome {
			source: source.clone(),
			output,
			kind: document.kind,
			removal,
			written: !dry_run,
		})
	}
}

/// Process a single document with the settings from `config`.
pub fn process_document(
	document: &Document,
	config: &StudentizeConfig,
	dry_run: bool,
) -> StudentizeResult<FileOutcome> {
	Studentizer::new(config)?.process(document, dry_run)
}

fn line_delta(before: usize, after: usize) -> i64 {
	i64::try_from(before).unwrap_or(i64::MAX) - i64::try_from(after).unwrap_or(i64::MAX)
}

/// Append `suffix` to the stem of `path`, keeping directory and extension.
///
/// `lessons/tutorial_1.md` becomes `lessons/tutorial_1_student.md`.
pub fn student_path(path: &Path, suffix: &str) -> PathBuf {
	let stem = path
		.file_stem()
		.map(|stem| stem.to_string_lossy().into_owned())
		.unwrap_or_default();
	let file_name = match path.extension() {
		Some(ext) => format!("{stem}{suffix}.{}", ext.to_string_lossy()),
		None => format!("{stem}{suffix}"),
	};
	path.with_file_name(file_name)
}

fn build_glob_set(patterns: &[String]) -> StudentizeResult<GlobSet> {
	let mut builder = GlobSetBuilder::new();
	for pattern in patterns {
		let glob = Glob::new(pattern).map_err(|e| {
			StudentizeError::InvalidPattern {
				pattern: pattern.clone(),
				reason: e.to_string(),
			}
		})?;
		builder.add(glob);
	}
	builder.build().map_err(|e| {
		StudentizeError::InvalidPattern {
			pattern: patterns.join(", "),
			reason: e.to_string(),
		}
	})
}

/// Find the source documents directly inside `root`.
///
/// A file qualifies when its name matches one of the discovery patterns, it
/// has an `md` or `ipynb` extension and its name does not contain the
/// student suffix. The result is sorted by path.
pub fn discover_documents(
	root: &Path,
	discovery: &DiscoveryConfig,
) -> StudentizeResult<Vec<Document>> {
	let patterns = build_glob_set(&discovery.patterns)?;
	let mut documents = Vec::new();

	for entry in std::fs::read_dir(root)? {
		let entry = entry?;
		let path = entry.path();
		if !path.is_file() {
			continue;
		}

		let Some(name) = path.file_name().and_then(|name| name.to_str()) else {
			continue;
		};
		if name.contains(discovery.suffix.as_str()) || !patterns.is_match(name) {
			continue;
		}

		if let Some(kind) = DocumentKind::from_path(&path) {
			documents.push(Document { path, kind });
		}
	}

	// Sort for deterministic ordering.
	documents.sort_by(|a, b| a.path.cmp(&b.path));
	Ok(documents)
}

/// Delete previously generated student editions in `root`.
///
/// Only files whose name ends in `<suffix>.md` or `<suffix>.ipynb` are
/// removed. Returns the deleted paths, sorted.
pub fn clean_student_outputs(
	root: &Path,
	discovery: &DiscoveryConfig,
	only: Option<DocumentKind>,
) -> StudentizeResult<Vec<PathBuf>> {
	let mut removed = Vec::new();

	for entry in std::fs::read_dir(root)? {
		let entry = entry?;
		let path = entry.path();
		if !path.is_file() {
			continue;
		}

		let Some(kind) = DocumentKind::from_path(&path) else {
			continue;
		};
		if only.is_some_and(|only| only != kind) {
			continue;
		}

		let is_student = path
			.file_name()
			.and_then(|name| name.to_str())
			.is_some_and(|name| {
				name.ends_with(&format!("{}.{}", discovery.suffix, kind.extension()))
			});
		if is_student {
			std::fs::remove_file(&path)?;
			tracing::debug!(path = %path.display(), "removed stale student edition");
			removed.push(path);
		}
	}

	removed.sort();
	Ok(removed)
}

/// Progress notifications emitted by [`generate_with`].
#[derive(Debug)]
pub enum GenerateEvent<'a> {
	/// Stale student editions were deleted.
	Cleaned(&'a [PathBuf]),
	/// Discovery finished; documents are processed in this order.
	Discovered(&'a [Document]),
	/// One document was processed.
	Processed {
		document: &'a Document,
		result: &'a StudentizeResult<FileOutcome>,
	},
}

/// Run the whole pipeline for the project at `root`.
pub fn generate(
	root: &Path,
	config: &StudentizeConfig,
	options: &GenerateOptions,
) -> StudentizeResult<GenerateReport> {
	generate_with(root, config, options, |_| {})
}

/// Like [`generate`], calling `on_event` as the run progresses so callers
/// can report each document as soon as it is done.
///
/// Errors on individual documents are collected in the report. Only failures
/// that prevent the run from starting (invalid patterns, unreadable
/// directory) are returned as `Err`.
pub fn generate_with<F>(
	root: &Path,
	config: &StudentizeConfig,
	options: &GenerateOptions,
	mut on_event: F,
) -> StudentizeResult<GenerateReport>
where
	F: FnMut(GenerateEvent<'_>),
{
	let studentizer = Studentizer::new(config)?;
	let mut report = GenerateReport::default();

	if options.clean && !options.dry_run {
		report.cleaned = clean_student_outputs(root, &config.discovery, options.only)?;
		on_event(GenerateEvent::Cleaned(&report.cleaned));
	}

	report.documents = discover_documents(root, &config.discovery)?
		.into_iter()
		.filter(|doc| options.only.is_none_or(|only| only == doc.kind))
		.collect();
	on_event(GenerateEvent::Discovered(&report.documents));

	for document in &report.documents {
		let result = studentizer.process(document, options.dry_run);
		on_event(GenerateEvent::Processed {
			document,
			result: &result,
		});

		match result {
			Ok(outcome) => report.outcomes.push(outcome),
			Err(error) => {
				tracing::warn!(source = %document.path.display(), %error, "failed to process document");
				report.failures.push(FileFailure {
					source: document.path.clone(),
					error,
				});
			}
		}
	}

	Ok(report)
}
