use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;

use crate::StudentizeError;
use crate::StudentizeResult;

/// Supported config file locations in discovery order (highest precedence
/// first).
pub const CONFIG_FILE_CANDIDATES: [&str; 3] = [
	"studentize.toml",
	".studentize.toml",
	".config/studentize.toml",
];

/// File name glob used when no `[discovery]` patterns are configured.
pub const DEFAULT_PATTERN: &str = "tutorial_*";

/// Marker appended to the stem of every generated file.
pub const DEFAULT_SUFFIX: &str = "_student";

/// Exercise functions whose complete definitions count as solutions inside a
/// solution region.
pub const DEFAULT_EXERCISE_FUNCTIONS: [&str; 7] = [
	"find_min",
	"sum_even",
	"reverse_list",
	"is_sorted",
	"is_anagram",
	"contains_duplicate",
	"max_profit",
];

/// Configuration loaded from a `studentize.toml` file.
///
/// ```toml
/// [discovery]
/// patterns = ["tutorial_*", "lesson_*"]
/// suffix = "_student"
///
/// [notebook]
/// exercise_functions = ["find_min", "sum_even"]
/// ```
///
/// Every field is optional. A missing file is equivalent to
/// [`StudentizeConfig::default()`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StudentizeConfig {
	/// Which files are picked up as source documents.
	#[serde(default)]
	pub discovery: DiscoveryConfig,
	/// Settings for the notebook cell filter.
	#[serde(default)]
	pub notebook: NotebookConfig,
}

/// Controls which files in the project directory are treated as sources.
#[derive(Debug, Clone, Deserialize)]
pub struct DiscoveryConfig {
	/// Globs matched against file names (not paths). A file must match at
	/// least one of them and carry an `md` or `ipynb` extension.
	#[serde(default = "default_patterns")]
	pub patterns: Vec<String>,
	/// Inserted between the stem and the extension of generated files. Files
	/// whose name already contains it are never treated as sources.
	#[serde(default = "default_suffix")]
	pub suffix: String,
}

impl Default for DiscoveryConfig {
	fn default() -> Self {
		Self {
			patterns: default_patterns(),
			suffix: default_suffix(),
		}
	}
}

/// Settings for the notebook cell filter.
#[derive(Debug, Clone, Deserialize)]
pub struct NotebookConfig {
	/// Function names that identify exercise code. An empty list turns off
	/// solution detection for code cells.
	#[serde(default = "default_exercise_functions")]
	pub exercise_functions: Vec<String>,
}

impl Default for NotebookConfig {
	fn default() -> Self {
		Self {
			exercise_functions: default_exercise_functions(),
		}
	}
}

fn default_patterns() -> Vec<String> {
	vec![DEFAULT_PATTERN.to_string()]
}

fn default_suffix() -> String {
	DEFAULT_SUFFIX.to_string()
}

fn default_exercise_functions() -> Vec<String> {
	DEFAULT_EXERCISE_FUNCTIONS
		.iter()
		.map(ToString::to_string)
		.collect()
}

impl StudentizeConfig {
	/// Resolve the config path from known discovery candidates.
	#[must_use]
	pub fn resolve_path(root: &Path) -> Option<PathBuf> {
		CONFIG_FILE_CANDIDATES
			.iter()
			.map(|candidate| root.join(candidate))
			.find(|path| path.is_file())
	}

	/// Load the config from the first discovered config file at `root`.
	/// Returns `None` if no config file exists.
	pub fn load(root: &Path) -> StudentizeResult<Option<StudentizeConfig>> {
		let Some(config_path) = Self::resolve_path(root) else {
			return Ok(None);
		};

		let content = std::fs::read_to_string(&config_path)?;
		let config = Self::parse(&content)?;

		tracing::debug!(path = %config_path.display(), "loaded config");

		Ok(Some(config))
	}

	/// Load the config at `root`, falling back to the defaults when no file
	/// is present.
	pub fn load_or_default(root: &Path) -> StudentizeResult<StudentizeConfig> {
		Ok(Self::load(root)?.unwrap_or_default())
	}

	/// Parse config from TOML text.
	pub fn parse(content: &str) -> StudentizeResult<StudentizeConfig> {
		let config: StudentizeConfig =
			toml::from_str(content).map_err(|e| StudentizeError::ConfigParse(e.to_string()))?;

		if config.discovery.suffix.is_empty() {
			return Err(StudentizeError::ConfigParse(
				"`discovery.suffix` must not be empty".to_string(),
			));
		}

		Ok(config)
	}
}

/// Commented sample written by `studentize init`.
pub const SAMPLE_CONFIG: &str = r#"# studentize configuration

# Which files in this directory are lesson sources. Patterns are globs
# matched against file names; only `.md` and `.ipynb` files are used.
# [discovery]
# patterns = ["tutorial_*"]
# suffix = "_student"

# Function names whose complete definitions are treated as solutions when
# they appear inside a notebook solution section.
# [notebook]
# exercise_functions = [
#   "find_min",
#   "sum_even",
#   "reverse_list",
#   "is_sorted",
#   "is_anagram",
#   "contains_duplicate",
#   "max_profit",
# ]
"#;
