use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum StudentizeError {
	#[error(transparent)]
	#[diagnostic(code(studentize::io_error))]
	Io(#[from] std::io::Error),

	#[error("failed to read `{path}`")]
	#[diagnostic(
		code(studentize::read_input),
		help("check that the file exists and is readable")
	)]
	ReadInput {
		path: String,
		#[source]
		source: std::io::Error,
	},

	#[error("`{path}` is not valid notebook JSON: {reason}")]
	#[diagnostic(code(studentize::notebook_syntax))]
	NotebookSyntax { path: String, reason: String },

	#[error("malformed notebook `{path}`: {reason}")]
	#[diagnostic(
		code(studentize::malformed_notebook),
		help(
			"a notebook needs top-level `cells`, `metadata`, `nbformat` and `nbformat_minor` \
			 fields, and every markdown or code cell needs a `source`"
		)
	)]
	MalformedNotebook { path: String, reason: String },

	#[error("failed to write `{path}`")]
	#[diagnostic(
		code(studentize::write_output),
		help("check permissions and free space in the output directory")
	)]
	WriteOutput {
		path: String,
		#[source]
		source: std::io::Error,
	},

	#[error("failed to serialize notebook `{path}`: {reason}")]
	#[diagnostic(code(studentize::serialize))]
	Serialize { path: String, reason: String },

	#[error("failed to parse config file: {0}")]
	#[diagnostic(
		code(studentize::config_parse),
		help("check that studentize.toml is valid TOML with [discovery] and/or [notebook] sections")
	)]
	ConfigParse(String),

	#[error("invalid discovery pattern `{pattern}`: {reason}")]
	#[diagnostic(
		code(studentize::invalid_pattern),
		help("patterns are globs matched against file names, e.g. `tutorial_*`")
	)]
	InvalidPattern { pattern: String, reason: String },
}

pub type StudentizeResult<T> = Result<T, StudentizeError>;
pub type AnyError = Box<dyn std::error::Error>;
pub type AnyEmptyResult = Result<(), AnyError>;
