use crate::classify::LineKind;
use crate::classify::classify_line;

/// Lines emitted in place of a `## Solution` heading.
pub const PRACTICE_TIME_LINES: [&str; 12] = [
	"## Practice Time!",
	"",
	"**Great work!** You've reached the practice exercises.",
	"",
	"Try to solve the problems above on your own before checking solutions.",
	"When you're ready, you can:",
	"- Check the solutions in the original markdown file",
	"- Ask your instructor for help",
	"- Discuss with classmates",
	"",
	"Remember: The process of solving is more important than getting the answer immediately!",
	"",
];

/// Where the scan currently is relative to solution content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextRegion {
	/// Lines are emitted.
	#[default]
	Normal,
	/// After a `## Solution` heading. Lines are dropped until the next
	/// section heading.
	Solution,
	/// Between `<details>` and `</details>`. Lines are dropped.
	/// `inside_solution` records whether a heading region was already open,
	/// so the closing tag returns to it instead of to `Normal`.
	Collapsible { inside_solution: bool },
}

/// What to do with the line that produced a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineAction {
	/// Copy the line to the output.
	Emit,
	/// Drop the line.
	Skip,
	/// Drop the line and emit the practice block instead.
	Replace,
}

impl TextRegion {
	/// Returns `true` while solution content is being dropped.
	pub fn is_eliding(self) -> bool {
		!matches!(self, Self::Normal)
	}

	fn inside_solution(self) -> bool {
		match self {
			Self::Normal => false,
			Self::Solution => true,
			Self::Collapsible { inside_solution } => inside_solution,
		}
	}

	/// Compute the next state and the action for a line of the given kind.
	pub fn advance(self, kind: LineKind) -> (Self, LineAction) {
		match kind {
			LineKind::RegionStartHeading => {
				let next = match self {
					Self::Collapsible { .. } => {
						Self::Collapsible {
							inside_solution: true,
						}
					}
					Self::Normal | Self::Solution => Self::Solution,
				};
				(next, LineAction::Replace)
			}
			LineKind::DetailsOpen => {
				let next = match self {
					Self::Collapsible { .. } => self,
					Self::Normal | Self::Solution => {
						Self::Collapsible {
							inside_solution: self.inside_solution(),
						}
					}
				};
				(next, LineAction::Skip)
			}
			LineKind::DetailsClose => {
				let next = match self {
					Self::Collapsible {
						inside_solution: true,
					} => Self::Solution,
					Self::Collapsible {
						inside_solution: false,
					} => Self::Normal,
					Self::Normal | Self::Solution => self,
				};
				(next, LineAction::Skip)
			}
			LineKind::SectionHeading => (Self::Normal, LineAction::Emit),
			LineKind::SolutionSubheading => (self, LineAction::Skip),
			LineKind::PlainContent if self.is_eliding() => (self, LineAction::Skip),
			LineKind::PlainContent => (self, LineAction::Emit),
		}
	}
}

/// Filter a sequence of lines, dropping solution content.
///
/// Every `## Solution` heading is replaced by [`PRACTICE_TIME_LINES`] and
/// everything up to the next level-2 heading without `Solution` in its text
/// is dropped. Content wrapped in `<details>` tags is dropped without a
/// replacement. Stray `### Solution <N>` headings are always dropped.
pub fn filter_lines<S: AsRef<str>>(lines: &[S]) -> Vec<String> {
	let mut output = Vec::with_capacity(lines.len());
	let mut region = TextRegion::default();

	for line in lines {
		let line = line.as_ref();
		let (next, action) = region.advance(classify_line(line));

		match action {
			LineAction::Emit => output.push(line.to_string()),
			LineAction::Skip => {}
			LineAction::Replace => {
				tracing::trace!(heading = line, "solution region starts");
				output.extend(PRACTICE_TIME_LINES.iter().map(ToString::to_string));
			}
		}

		region = next;
	}

	output
}

/// Strip solutions from a whole markdown document.
///
/// The document is split on `\n` and joined back with `\n`, so a trailing
/// newline survives and `\r` stays attached to its line.
pub fn strip_markdown_solutions(content: &str) -> String {
	let lines: Vec<&str> = content.split('\n').collect();
	filter_lines(&lines).join("\n")
}

/// Number of lines in `content` as counted by the markdown filter.
pub fn line_count(content: &str) -> usize {
	content.split('\n').count()
}
