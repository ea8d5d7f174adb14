//! Pure pattern checks shared by the markdown and notebook filters.
//!
//! Nothing in here keeps state. Headings and tags are recognized with
//! shallow patterns on raw text; no markdown is parsed.

use std::sync::LazyLock;

use regex::Regex;

use crate::StudentizeError;
use crate::StudentizeResult;

/// Opening tag of a collapsible block.
pub const DETAILS_OPEN: &str = "<details>";
/// Closing tag of a collapsible block.
pub const DETAILS_CLOSE: &str = "</details>";

static REGION_START_HEADING: LazyLock<Regex> =
	LazyLock::new(|| compile(r"(?i)^##\s+solutions?"));
static SECTION_HEADING: LazyLock<Regex> = LazyLock::new(|| compile(r"^##\s+[^#]"));
static SOLUTION_SUBHEADING: LazyLock<Regex> =
	LazyLock::new(|| compile(r"(?i)^###\s+solution\s+\d+"));
static ANY_SOLUTION_SUBHEADING: LazyLock<Regex> =
	LazyLock::new(|| compile(r"(?i)###\s+solution\s+\d+"));
static SOLUTION_SECTION_MARKER: LazyLock<Regex> =
	LazyLock::new(|| compile(r"(?i)##\s+solutions?|###\s+solution|</?details>"));

fn compile(pattern: &str) -> Regex {
	Regex::new(pattern).unwrap_or_else(|e| panic!("invalid built-in pattern `{pattern}`: {e}"))
}

/// The category of a single markdown line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
	/// `## Solution`, `## Solutions`, `## solutions for part 1`, ...
	RegionStartHeading,
	/// The line contains `<details>`.
	DetailsOpen,
	/// The line contains `</details>`.
	DetailsClose,
	/// A level-2 heading that does not mention `Solution`. Ends any open
	/// region.
	SectionHeading,
	/// `### Solution 3`. Always dropped.
	SolutionSubheading,
	PlainContent,
}

/// Classify one line. Earlier categories win when a line fits several.
pub fn classify_line(line: &str) -> LineKind {
	if is_region_start_heading(line) {
		LineKind::RegionStartHeading
	} else if line.contains(DETAILS_OPEN) {
		LineKind::DetailsOpen
	} else if line.contains(DETAILS_CLOSE) {
		LineKind::DetailsClose
	} else if is_section_heading(line) {
		LineKind::SectionHeading
	} else if is_solution_subheading(line) {
		LineKind::SolutionSubheading
	} else {
		LineKind::PlainContent
	}
}

/// Level-2 heading whose text starts with `Solution` or `Solutions`, ignoring
/// case.
pub fn is_region_start_heading(text: &str) -> bool {
	REGION_START_HEADING.is_match(text)
}

/// Level-2 heading (exactly two `#`) whose text does not contain the
/// case-sensitive word `Solution`.
pub fn is_section_heading(text: &str) -> bool {
	SECTION_HEADING.is_match(text) && !text.contains("Solution")
}

/// Level-3 `Solution <N>` heading at the start of `text`.
pub fn is_solution_subheading(text: &str) -> bool {
	SOLUTION_SUBHEADING.is_match(text)
}

/// Level-3 `Solution <N>` heading anywhere in `text`.
pub fn contains_solution_subheading(text: &str) -> bool {
	ANY_SOLUTION_SUBHEADING.is_match(text)
}

/// `text` contains an opening or closing collapsible tag.
pub fn contains_details_tag(text: &str) -> bool {
	text.contains(DETAILS_OPEN) || text.contains(DETAILS_CLOSE)
}

/// `text` contains anything that opens a solution section in a notebook: a
/// solution heading of level 2 or 3, or a collapsible tag.
pub fn contains_solution_section_marker(text: &str) -> bool {
	SOLUTION_SECTION_MARKER.is_match(text)
}

/// Code still waiting for the learner: a `# TODO` or `# Your solution`
/// comment.
pub fn is_exercise_placeholder(code: &str) -> bool {
	code.contains("# TODO") || code.contains("# Your solution")
}

/// Code explicitly labelled as an answer.
pub fn has_answer_marker(code: &str) -> bool {
	code.contains("# Solution") || code.contains("# Answer")
}

/// Code without a `pass` placeholder or any `TODO`, i.e. a finished
/// implementation.
pub fn looks_complete(code: &str) -> bool {
	!code.contains("pass") && !code.contains("TODO")
}

/// Recognizes definitions of known exercise functions (`def find_min`, ...).
#[derive(Debug, Clone)]
pub struct ExerciseMatcher {
	pattern: Option<Regex>,
}

impl ExerciseMatcher {
	/// Build a matcher for the given function names. With no names the
	/// matcher never matches.
	pub fn new<S: AsRef<str>>(names: &[S]) -> StudentizeResult<Self> {
		if names.is_empty() {
			return Ok(Self { pattern: None });
		}

		let alternatives = names
			.iter()
			.map(|name| regex::escape(name.as_ref()))
			.collect::<Vec<_>>()
			.join("|");
		let source = format!(r"def\s+(?:{alternatives})");
		let pattern = Regex::new(&source).map_err(|e| {
			StudentizeError::InvalidPattern {
				pattern: source.clone(),
				reason: e.to_string(),
			}
		})?;

		Ok(Self {
			pattern: Some(pattern),
		})
	}

	/// Returns `true` if `code` defines one of the exercise functions.
	pub fn defines_exercise(&self, code: &str) -> bool {
		self.pattern
			.as_ref()
			.is_some_and(|pattern| pattern.is_match(code))
	}
}

impl Default for ExerciseMatcher {
	fn default() -> Self {
		Self::new(&crate::config::DEFAULT_EXERCISE_FUNCTIONS[..])
			.unwrap_or(Self { pattern: None })
	}
}
