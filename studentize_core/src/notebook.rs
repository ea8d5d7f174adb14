use std::borrow::Cow;

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;
use serde::de::Error as _;
use serde_json::Map;
use serde_json::Value;

use crate::StudentizeError;
use crate::StudentizeResult;
use crate::classify;
use crate::classify::ExerciseMatcher;
use crate::config::NotebookConfig;

/// Source lines of the cell inserted where a solution section starts.
pub const PRACTICE_TIME_SOURCE: [&str; 4] = [
	"## Practice Time!\n",
	"\n",
	"**Great work!** Try to solve the exercises above on your own.\n",
	"When ready, check solutions in the original notebook or ask your instructor.",
];

/// A notebook document. Only `cells` is ever rewritten; everything else is
/// carried over as read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notebook {
	pub cells: Vec<Cell>,
	pub metadata: Value,
	pub nbformat: u64,
	pub nbformat_minor: u64,
	/// Any other top-level fields.
	#[serde(flatten)]
	pub extra: Map<String, Value>,
}

/// Cell source as stored on disk: either a list of lines or a single string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellSource {
	Lines(Vec<String>),
	Text(String),
}

impl CellSource {
	/// The full text of the cell.
	pub fn text(&self) -> Cow<'_, str> {
		match self {
			Self::Lines(lines) => Cow::Owned(lines.concat()),
			Self::Text(text) => Cow::Borrowed(text),
		}
	}
}

/// A markdown or code cell.
///
/// The cell keeps the field map it was read from, so a cell that survives
/// filtering is written back with the same keys in the same order.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentCell {
	source: CellSource,
	fields: Map<String, Value>,
}

impl ContentCell {
	fn from_fields(fields: Map<String, Value>) -> Result<Self, serde_json::Error> {
		let source = fields
			.get("source")
			.ok_or_else(|| serde_json::Error::missing_field("source"))?;
		let source = CellSource::deserialize(source)?;
		Ok(Self { source, fields })
	}

	fn with_lines(cell_type: &str, lines: Vec<String>) -> Self {
		let mut fields = Map::new();
		fields.insert("cell_type".to_string(), Value::from(cell_type));
		fields.insert("metadata".to_string(), Value::Object(Map::new()));
		fields.insert(
			"source".to_string(),
			Value::Array(lines.iter().cloned().map(Value::String).collect()),
		);
		Self {
			source: CellSource::Lines(lines),
			fields,
		}
	}

	/// The concatenated source text.
	pub fn content(&self) -> Cow<'_, str> {
		self.source.text()
	}

	/// A field as read from the notebook, e.g. `id` or `metadata`.
	pub fn field(&self, key: &str) -> Option<&Value> {
		self.fields.get(key)
	}
}

/// One notebook cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
	Markdown(ContentCell),
	Code(ContentCell),
	/// Any other `cell_type` (e.g. `raw`). Passed through untouched.
	Other(Map<String, Value>),
}

impl Cell {
	/// Concatenated source text. Cells of other kinds read their `source`
	/// field if it has a known shape and are empty otherwise.
	pub fn content(&self) -> Cow<'_, str> {
		match self {
			Self::Markdown(cell) | Self::Code(cell) => cell.content(),
			Self::Other(fields) => {
				fields
					.get("source")
					.and_then(|value| CellSource::deserialize(value).ok())
					.map_or(Cow::Borrowed(""), |source| Cow::Owned(source.text().into_owned()))
			}
		}
	}

	pub fn is_markdown(&self) -> bool {
		matches!(self, Self::Markdown(_))
	}

	/// A markdown cell with the given source lines and empty metadata.
	pub fn markdown<S: Into<String>>(lines: impl IntoIterator<Item = S>) -> Self {
		Self::Markdown(ContentCell::with_lines(
			"markdown",
			lines.into_iter().map(Into::into).collect(),
		))
	}

	#[cfg(test)]
	pub(crate) fn code<S: Into<String>>(lines: impl IntoIterator<Item = S>) -> Self {
		Self::Code(ContentCell::with_lines(
			"code",
			lines.into_iter().map(Into::into).collect(),
		))
	}

	/// The cell inserted in place of a solution section.
	pub fn practice_time() -> Self {
		Self::markdown(PRACTICE_TIME_SOURCE)
	}
}

impl<'de> Deserialize<'de> for Cell {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		let fields = Map::<String, Value>::deserialize(deserializer)?;
		let wrap: fn(ContentCell) -> Cell = match fields.get("cell_type").and_then(Value::as_str) {
			Some("markdown") => Cell::Markdown,
			Some("code") => Cell::Code,
			_ => return Ok(Cell::Other(fields)),
		};

		ContentCell::from_fields(fields)
			.map(wrap)
			.map_err(D::Error::custom)
	}
}

impl Serialize for Cell {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		match self {
			Self::Markdown(cell) | Self::Code(cell) => cell.fields.serialize(serializer),
			Self::Other(fields) => fields.serialize(serializer),
		}
	}
}

/// Parse notebook JSON. `path` is only used for error messages.
pub fn parse_notebook(content: &str, path: &str) -> StudentizeResult<Notebook> {
	serde_json::from_str(content).map_err(|e| {
		if e.is_data() {
			StudentizeError::MalformedNotebook {
				path: path.to_string(),
				reason: e.to_string(),
			}
		} else {
			StudentizeError::NotebookSyntax {
				path: path.to_string(),
				reason: e.to_string(),
			}
		}
	})
}

/// Serialize a notebook with one-space indentation and literal non-ASCII
/// characters. No trailing newline is written.
pub fn serialize_notebook(notebook: &Notebook, path: &str) -> StudentizeResult<String> {
	let to_error = |reason: String| {
		StudentizeError::Serialize {
			path: path.to_string(),
			reason,
		}
	};

	let mut buffer = Vec::new();
	let formatter = serde_json::ser::PrettyFormatter::with_indent(b" ");
	let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
	notebook
		.serialize(&mut serializer)
		.map_err(|e| to_error(e.to_string()))?;

	String::from_utf8(buffer).map_err(|e| to_error(e.to_string()))
}

/// Returns `true` if `cell` opens a solution section: a markdown cell
/// mentioning a `## Solution(s)` or `### Solution` heading, or a collapsible
/// tag.
pub fn is_solution_section(cell: &Cell) -> bool {
	match cell {
		Cell::Markdown(markdown) => classify::contains_solution_section_marker(&markdown.content()),
		Cell::Code(_) | Cell::Other(_) => false,
	}
}

/// Cell counts from one filtering pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CellStats {
	/// Cells in the source notebook.
	pub input: usize,
	/// Cells in the student notebook, practice cells included.
	pub output: usize,
	/// Source cells that were not carried over, including the cells that
	/// opened a section.
	pub dropped: usize,
	/// Number of practice cells inserted.
	pub region_starts: usize,
}

impl CellStats {
	/// Net number of cells removed, as reported to users.
	pub fn removed(&self) -> usize {
		self.input.saturating_sub(self.output)
	}
}

/// Removes solution cells from notebooks.
#[derive(Debug, Clone, Default)]
pub struct NotebookFilter {
	exercises: ExerciseMatcher,
}

impl NotebookFilter {
	pub fn new(config: &NotebookConfig) -> StudentizeResult<Self> {
		Ok(Self {
			exercises: ExerciseMatcher::new(&config.exercise_functions)?,
		})
	}

	/// Decide whether `cell` holds solution content.
	///
	/// Markdown cells are solutions when they carry any solution marker.
	/// Code cells are only considered inside an active region: a cell that
	/// defines an exercise function is a solution unless it still contains
	/// an exercise placeholder, and it needs either an explicit answer
	/// marker or to look like a finished implementation.
	pub fn is_solution_cell(&self, cell: &Cell, region_active: bool) -> bool {
		match cell {
			Cell::Markdown(markdown) => {
				let content = markdown.content();
				classify::contains_solution_section_marker(&content)
					|| classify::contains_details_tag(&content)
					|| classify::contains_solution_subheading(&content)
			}
			Cell::Code(code) if region_active => {
				let content = code.content();
				if classify::is_exercise_placeholder(&content) {
					return false;
				}
				self.exercises.defines_exercise(&content)
					&& (classify::has_answer_marker(&content) || classify::looks_complete(&content))
			}
			Cell::Code(_) | Cell::Other(_) => false,
		}
	}

	/// Drop solution cells and insert one practice cell per section start.
	pub fn filter_cells(&self, cells: Vec<Cell>) -> (Vec<Cell>, CellStats) {
		let input = cells.len();
		let mut output = Vec::with_capacity(input);
		let mut region_starts = 0;
		let mut region_active = false;

		for cell in cells {
			if is_solution_section(&cell) {
				tracing::trace!(index = output.len(), "solution section starts");
				output.push(Cell::practice_time());
				region_starts += 1;
				region_active = true;
				continue;
			}

			if region_active && closes_region(&cell) {
				region_active = false;
			}

			if self.is_solution_cell(&cell, region_active) {
				continue;
			}

			output.push(cell);
		}

		let stats = CellStats {
			input,
			output: output.len(),
			dropped: input + region_starts - output.len(),
			region_starts,
		};
		(output, stats)
	}

	/// Filter a notebook, keeping every field other than `cells`.
	pub fn strip(&self, notebook: Notebook) -> (Notebook, CellStats) {
		let Notebook {
			cells,
			metadata,
			nbformat,
			nbformat_minor,
			extra,
		} = notebook;
		let (cells, stats) = self.filter_cells(cells);
		let student = Notebook {
			cells,
			metadata,
			nbformat,
			nbformat_minor,
			extra,
		};
		(student, stats)
	}
}

/// A closing collapsible tag in any cell, or a markdown cell that starts with
/// a section heading not mentioning `Solution`.
fn closes_region(cell: &Cell) -> bool {
	let content = cell.content();
	content.contains(classify::DETAILS_CLOSE)
		|| (cell.is_markdown() && classify::is_section_heading(&content))
}
