//! mta-dialogue CLI
//!
//! Section outlines and go-to-definition for Godot Dialogue Manager scripts.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use mta_dialogue_core::{
    find_definition, find_section, format_definition, format_output, outline_file, Definition,
    DialogueScanner, OutlineMap, OutputFormat, Position, ScanConfig,
};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Section outlines and go-to-definition for dialogue scripts
#[derive(Parser)]
#[command(name = "mta-dialogue")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Section outlines and go-to-definition for Godot Dialogue Manager scripts")]
#[command(long_about = r#"
mta-dialogue: Dialogue Script Navigation

Indexes the `~ section` blocks of .dialogue files and resolves the section
names used after `=>` to the line that defines them.

A reference resolves to the first section whose name matches exactly once
whitespace runs become `_` and case is ignored; failing that, to the first
section whose name starts with the reference, ignoring case.

Lines and characters are zero-based.

Output formats:
  - JSON (default) - Structured JSON for programmatic use
  - YAML - Human-readable YAML format
  - ANSI - Colorful terminal output
  - Summary - Plain text

Examples:
  mta-dialogue .                                  # Outline every script under .
  mta-dialogue --format ansi                      # Colorful terminal output
  mta-dialogue outline story/main.dialogue        # Single file outline
  mta-dialogue definition main.dialogue -l 2 -c 30  # Jump target under a cursor
  mta-dialogue resolve main.dialogue "shop talk"  # Resolve a section name
"#)]
pub struct Args {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to scan (default: current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormatArg::Json, global = true)]
    pub format: OutputFormatArg,

    /// Output file (default: stdout)
    #[arg(short, long, global = true)]
    pub output: Option<PathBuf>,

    /// Config file (default: mta-dialogue.toml in the scanned directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Dialogue file extensions (can be specified multiple times)
    #[arg(long = "ext", action = clap::ArgAction::Append, global = true)]
    pub extensions: Vec<String>,

    /// Ignore patterns (can be specified multiple times)
    #[arg(long, action = clap::ArgAction::Append, global = true)]
    pub ignore: Vec<String>,

    /// Leave untitled sections out of outlines
    #[arg(long, global = true)]
    pub no_untitled: bool,

    /// Number of threads for parallel processing (default: auto)
    #[arg(long, global = true)]
    pub threads: Option<usize>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Outline every dialogue file under a directory
    Scan {
        /// Path to scan
        #[arg(default_value = ".")]
        path: PathBuf,
    },

    /// Outline a single file
    Outline {
        /// Path to file
        path: PathBuf,
    },

    /// Find the section a `=>` reference under the cursor points to
    Definition {
        /// Path to file
        path: PathBuf,

        /// Line number (0-indexed)
        #[arg(short, long)]
        line: usize,

        /// Character offset (0-indexed)
        #[arg(short, long, default_value_t = 0)]
        character: usize,
    },

    /// Resolve a section name within a file
    Resolve {
        /// Path to file
        path: PathBuf,

        /// Section name to look up
        name: String,
    },
}

/// Output format argument
#[derive(ValueEnum, Clone, Debug)]
pub enum OutputFormatArg {
    Json,
    Yaml,
    Ansi,
    Summary,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Json => OutputFormat::Json,
            OutputFormatArg::Yaml => OutputFormat::Yaml,
            OutputFormatArg::Ansi => OutputFormat::Ansi,
            OutputFormatArg::Summary => OutputFormat::Summary,
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    setup_tracing(args.verbose);

    match &args.command {
        Some(Commands::Scan { path }) => run_scan(path, &args),
        Some(Commands::Outline { path }) => run_outline(path, &args),
        Some(Commands::Definition {
            path,
            line,
            character,
        }) => run_definition(path, Position::new(*line, *character), &args),
        Some(Commands::Resolve { path, name }) => run_resolve(path, name, &args),
        None => run_scan(&args.path, &args),
    }
}

/// Log to stderr; `--verbose` raises the default level and `RUST_LOG` overrides it
fn setup_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Build common configuration from args
///
/// Layering: defaults, then the config file, then command line flags.
fn build_config(root: &Path, args: &Args) -> Result<ScanConfig> {
    let mut config = ScanConfig::new(root.to_path_buf());

    config = match &args.config {
        Some(file) => config
            .load_file(file)
            .with_context(|| format!("Failed to load config {}", file.display()))?,
        None if root.is_dir() => config
            .load_default_file()
            .context("Failed to load mta-dialogue.toml")?,
        None => config,
    };

    if !args.extensions.is_empty() {
        config = config.with_extensions(args.extensions.clone());
    }
    if !args.ignore.is_empty() {
        let mut patterns = config.ignore_patterns.clone();
        patterns.extend(args.ignore.iter().cloned());
        config = config.with_ignore_patterns(patterns);
    }
    if args.no_untitled {
        config = config.with_include_untitled(false);
    }
    if let Some(threads) = args.threads {
        config = config.with_threads(threads);
    }

    tracing::debug!(
        root = %config.root.display(),
        extensions = ?config.extensions,
        threads = config.threads,
        "effective config"
    );
    Ok(config)
}

fn run_scan(path: &Path, args: &Args) -> Result<()> {
    if !path.is_dir() {
        if path.is_file() {
            return run_outline(path, args);
        }
        anyhow::bail!("Path does not exist: {}", path.display());
    }

    let config = build_config(path, args)?;

    // Show progress spinner
    let spinner = if args.verbose && atty::is(atty::Stream::Stderr) {
        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            pb.set_style(style);
        }
        pb.enable_steady_tick(Duration::from_millis(100));
        pb.set_message("Scanning dialogue files...");
        Some(pb)
    } else {
        None
    };

    let scanner = DialogueScanner::new(config).context("Failed to create scanner")?;
    let result = scanner.scan().context("Failed to scan directory")?;

    if let Some(ref pb) = spinner {
        pb.finish_with_message(format!(
            "Scanned {} files in {}ms",
            result.stats.total_files, result.metadata.scan_duration_ms
        ));
    }

    let output = format_output(&result, args.format.clone().into())?;
    write_output(&output, args.output.as_ref())
}

fn run_outline(path: &Path, args: &Args) -> Result<()> {
    let config = build_config(parent_dir(path), args)?;
    let outline = outline_file(path, &config)
        .with_context(|| format!("Failed to outline {}", path.display()))?;

    let format: OutputFormat = args.format.clone().into();
    let output = match format {
        OutputFormat::Json => serde_json::to_string_pretty(&outline)?,
        OutputFormat::Yaml => serde_yaml::to_string(&outline)?,
        OutputFormat::Ansi | OutputFormat::Summary => {
            format_output(&OutlineMap::single(outline), format)?
        }
    };

    write_output(&output, args.output.as_ref())
}

fn run_definition(path: &Path, position: Position, args: &Args) -> Result<()> {
    let config = build_config(parent_dir(path), args)?;
    let definition = find_definition(path, position, &config)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    report_definition(
        definition,
        &format!("No definition at {}:{}", position.line, position.character),
        args,
    )
}

fn run_resolve(path: &Path, name: &str, args: &Args) -> Result<()> {
    let config = build_config(parent_dir(path), args)?;
    let definition = find_section(path, name, &config)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    report_definition(definition, &format!("No section matches '{}'", name), args)
}

/// Write a definition, or a notice on stderr when there is none
fn report_definition(definition: Option<Definition>, miss: &str, args: &Args) -> Result<()> {
    match definition {
        Some(definition) => {
            let output = format_definition(&definition, args.format.clone().into())?;
            write_output(&output, args.output.as_ref())
        }
        None => {
            eprintln!("{}", miss.yellow());
            Ok(())
        }
    }
}

/// Directory whose config applies to a single file
fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

fn write_output(output: &str, path: Option<&PathBuf>) -> Result<()> {
    if let Some(path) = path {
        fs::write(path, output).context("Failed to write output file")?;
    } else {
        println!("{}", output);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_definition() {
        let args = Args::try_parse_from([
            "mta-dialogue",
            "definition",
            "main.dialogue",
            "--line",
            "2",
            "--character",
            "30",
            "--format",
            "summary",
        ])
        .unwrap();

        match args.command {
            Some(Commands::Definition {
                line, character, ..
            }) => {
                assert_eq!(line, 2);
                assert_eq!(character, 30);
            }
            _ => panic!("expected definition subcommand"),
        }
        assert!(matches!(args.format, OutputFormatArg::Summary));
    }

    #[test]
    fn test_args_default_scan() {
        let args = Args::try_parse_from(["mta-dialogue", "--no-untitled", "--ext", "dlg"]).unwrap();
        assert!(args.command.is_none());
        assert_eq!(args.path, PathBuf::from("."));
        assert!(args.no_untitled);
        assert_eq!(args.extensions, vec!["dlg"]);
    }

    #[test]
    fn test_parent_dir() {
        assert_eq!(parent_dir(Path::new("main.dialogue")), Path::new("."));
        assert_eq!(parent_dir(Path::new("story/main.dialogue")), Path::new("story"));
    }
}
