use std::path::Path;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use owo_colors::OwoColorize;
use studentize_cli::Commands;
use studentize_cli::KindFilter;
use studentize_cli::OutputFormat;
use studentize_cli::StudentizeCli;
use studentize_core::SAMPLE_CONFIG;
use studentize_core::StudentizeConfig;
use studentize_core::project::DocumentKind;
use studentize_core::project::FileOutcome;
use studentize_core::project::GenerateEvent;
use studentize_core::project::GenerateOptions;
use studentize_core::project::GenerateReport;
use studentize_core::project::Removal;
use studentize_core::project::Studentizer;
use studentize_core::project::discover_documents;
use studentize_core::project::generate_with;
use tracing_subscriber::EnvFilter;

static USE_COLOR: std::sync::atomic::AtomicBool = std::sync::atomic::AtomicBool::new(true);

const LOG_ENV: &str = "STUDENTIZE_LOG";
const SEPARATOR_WIDTH: usize = 60;

fn color_enabled() -> bool {
	USE_COLOR.load(std::sync::atomic::Ordering::Relaxed)
}

/// Apply ANSI color codes only when color is enabled.
macro_rules! colored {
	($text:expr,red) => {
		if color_enabled() {
			format!("{}", $text.red())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,green) => {
		if color_enabled() {
			format!("{}", $text.green())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,yellow) => {
		if color_enabled() {
			format!("{}", $text.yellow())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,bold) => {
		if color_enabled() {
			format!("{}", $text.bold())
		} else {
			format!("{}", $text)
		}
	};
}

fn main() {
	let args = StudentizeCli::parse();

	// Respect NO_COLOR env var, --no-color flag and non-terminal output.
	let use_color = !args.no_color
		&& std::env::var_os("NO_COLOR").is_none()
		&& supports_color::on(supports_color::Stream::Stdout).is_some();
	if !use_color {
		USE_COLOR.store(false, std::sync::atomic::Ordering::Relaxed);
	}

	init_tracing(args.verbose);

	// Install miette's fancy handler for rich error diagnostics.
	miette::set_hook(Box::new(move |_| {
		Box::new(
			miette::MietteHandlerOpts::new()
				.color(use_color)
				.unicode(use_color)
				.build(),
		)
	}))
	.ok();

	let result = match &args.command {
		Some(Commands::Init) => run_init(&args).map(|()| true),
		Some(Commands::Generate {
			dry_run,
			clean,
			only,
			format,
		}) => {
			let options = GenerateOptions {
				dry_run: *dry_run,
				clean: *clean,
				only: only.map(DocumentKind::from),
			};
			run_generate(&args, &options, *format)
		}
		Some(Commands::List { only }) => run_list(&args, *only).map(|()| true),
		None => {
			eprintln!("No subcommand specified. Run `studentize --help` for usage.");
			process::exit(1);
		}
	};

	match result {
		Ok(true) => {}
		Ok(false) => process::exit(1),
		Err(e) => {
			// Try to render through miette for rich diagnostics with help text
			// and error codes.
			match e.downcast::<studentize_core::StudentizeError>() {
				Ok(err) => {
					let report: miette::Report = (*err).into();
					eprintln!("{report:?}");
				}
				Err(e) => {
					eprintln!("{} {e}", colored!("error:", red));
				}
			}
			process::exit(2);
		}
	}
}

/// Log to stderr. `STUDENTIZE_LOG` takes precedence over `--verbose`.
fn init_tracing(verbose: bool) {
	let fallback = if verbose { "debug" } else { "error" };
	let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(fallback));

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_target(false)
		.with_ansi(color_enabled())
		.try_init()
		.ok();
}

fn resolve_root(args: &StudentizeCli) -> PathBuf {
	args.path
		.clone()
		.unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
}

fn print_section(title: &str) {
	println!();
	println!("{}", colored!(title, bold));
}

fn print_field(label: &str, value: impl std::fmt::Display) {
	println!("{label:<16} {value}");
}

fn run_init(args: &StudentizeCli) -> Result<(), Box<dyn std::error::Error>> {
	let root = resolve_root(args);

	if let Some(existing) = StudentizeConfig::resolve_path(&root) {
		println!("Config file already exists: {}", existing.display());
		return Ok(());
	}

	let config_path = root.join("studentize.toml");
	std::fs::write(&config_path, SAMPLE_CONFIG)?;
	println!(
		"{} Created config file: {}",
		colored!("✓", green),
		config_path.display()
	);
	println!("\nNext steps:");
	println!("  1. Adjust the lesson patterns in studentize.toml");
	println!("  2. Run `studentize list` to see which files will be processed");
	println!("  3. Run `studentize generate` to write the student editions");

	Ok(())
}

fn run_list(args: &StudentizeCli, only: Option<KindFilter>) -> Result<(), Box<dyn std::error::Error>> {
	let root = resolve_root(args);
	let config_path = StudentizeConfig::resolve_path(&root);
	let config = StudentizeConfig::load_or_default(&root)?;
	let studentizer = Studentizer::new(&config)?;
	let only = only.map(DocumentKind::from);
	let documents: Vec<_> = discover_documents(&root, &config.discovery)?
		.into_iter()
		.filter(|doc| only.is_none_or(|only| only == doc.kind))
		.collect();

	print_field("Project root", root.display());
	print_field(
		"Config",
		config_path
			.as_deref()
			.map_or_else(|| "(defaults)".to_string(), |path| make_relative(path, &root)),
	);
	print_field("Patterns", config.discovery.patterns.join(", "));
	print_field("Suffix", &config.discovery.suffix);

	if documents.is_empty() {
		println!();
		println!("No lesson files found.");
		return Ok(());
	}

	for (kind, title) in [
		(DocumentKind::Markdown, "Markdown lessons:"),
		(DocumentKind::Notebook, "Notebooks:"),
	] {
		let mut entries = documents.iter().filter(|doc| doc.kind == kind).peekable();
		if entries.peek().is_none() {
			continue;
		}

		print_section(title);
		for document in entries {
			println!(
				"  {} → {}",
				make_relative(&document.path, &root),
				make_relative(&studentizer.output_path(&document.path), &root)
			);
		}
	}

	Ok(())
}

/// Returns `Ok(false)` when at least one document failed.
fn run_generate(
	args: &StudentizeCli,
	options: &GenerateOptions,
	format: OutputFormat,
) -> Result<bool, Box<dyn std::error::Error>> {
	let root = resolve_root(args);
	let config = StudentizeConfig::load_or_default(&root)?;
	tracing::debug!(root = %root.display(), ?options, "generating student editions");

	let report = match format {
		OutputFormat::Text => {
			generate_with(&root, &config, options, |event| print_event(&event, &root))?
		}
		OutputFormat::Json => generate_with(&root, &config, options, |_| {})?,
	};

	match format {
		OutputFormat::Text => print_summary(&report, &root, options.dry_run),
		OutputFormat::Json => print_json(&report, &root, options.dry_run),
	}

	Ok(report.is_ok())
}

fn print_event(event: &GenerateEvent<'_>, root: &Path) {
	match event {
		GenerateEvent::Cleaned(paths) => {
			for path in *paths {
				println!(
					"{} {}",
					colored!("Removed", yellow),
					make_relative(path, root)
				);
			}
			if !paths.is_empty() {
				println!();
			}
		}
		GenerateEvent::Discovered(documents) => {
			let markdown = documents
				.iter()
				.filter(|doc| doc.kind == DocumentKind::Markdown)
				.count();
			let notebooks = documents.len() - markdown;
			println!(
				"Found {markdown} markdown file(s) and {notebooks} notebook(s) to process"
			);
			println!();
		}
		GenerateEvent::Processed { document, result } => {
			let source = make_relative(&document.path, root);
			match result {
				Ok(outcome) => {
					let note = if outcome.written { "" } else { ", not written" };
					println!(
						"{} {source} → {} ({}{note})",
						colored!("✓", green),
						make_relative(&outcome.output, root),
						outcome.removal
					);
				}
				Err(error) => {
					println!("{} {source}: {error}", colored!("✗", red));
					eprintln!("{}", render_diagnostic(error));
				}
			}
		}
	}
}

fn render_diagnostic(error: &studentize_core::StudentizeError) -> String {
	let theme = if color_enabled() {
		miette::GraphicalTheme::unicode()
	} else {
		miette::GraphicalTheme::unicode_nocolor()
	};
	let handler = miette::GraphicalReportHandler::new_themed(theme);
	let mut rendered = String::new();
	if handler.render_report(&mut rendered, error).is_err() {
		return error.to_string();
	}
	rendered
}

fn print_summary(report: &GenerateReport, root: &Path, dry_run: bool) {
	println!();
	println!("{}", "=".repeat(SEPARATOR_WIDTH));

	let produced = report.outcomes.len();
	if report.documents.is_empty() {
		println!("No lesson files found.");
		return;
	}

	if report.is_ok() {
		let verb = if dry_run { "Would generate" } else { "Generated" };
		println!(
			"{} {verb} {produced} student edition(s)",
			colored!("✓", green)
		);
	} else {
		println!(
			"{} Generated {produced} of {} student edition(s); {} failed",
			colored!("✗", red),
			report.documents.len(),
			report.failures.len()
		);
	}

	if produced > 0 {
		println!();
		println!("{}", colored!("Student editions (no solutions):", bold));
		for outcome in &report.outcomes {
			println!("  - {}", make_relative(&outcome.output, root));
		}
	}
}

fn print_json(report: &GenerateReport, root: &Path, dry_run: bool) {
	let outputs: Vec<serde_json::Value> = report
		.outcomes
		.iter()
		.map(|outcome| outcome_to_json(outcome, root))
		.collect();
	let failures: Vec<serde_json::Value> = report
		.failures
		.iter()
		.map(|failure| {
			serde_json::json!({
				"source": make_relative(&failure.source, root),
				"error": failure.error.to_string(),
			})
		})
		.collect();
	let cleaned: Vec<String> = report
		.cleaned
		.iter()
		.map(|path| make_relative(path, root))
		.collect();

	let output = serde_json::json!({
		"ok": report.is_ok(),
		"dryRun": dry_run,
		"cleaned": cleaned,
		"outputs": outputs,
		"failures": failures,
	});
	println!("{output}");
}

fn outcome_to_json(outcome: &FileOutcome, root: &Path) -> serde_json::Value {
	let (unit, removed) = match outcome.removal {
		Removal::Lines(lines) => ("lines", lines),
		Removal::Cells(stats) => ("cells", i64::try_from(stats.removed()).unwrap_or(i64::MAX)),
	};

	serde_json::json!({
		"source": make_relative(&outcome.source, root),
		"output": make_relative(&outcome.output, root),
		"kind": outcome.kind.to_string(),
		"removed": removed,
		"unit": unit,
		"written": outcome.written,
	})
}

fn make_relative(path: &Path, root: &Path) -> String {
	path.strip_prefix(root)
		.unwrap_or(path)
		.display()
		.to_string()
}
