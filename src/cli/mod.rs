//! Command-line interface module

use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::converter::CommandConverter;
use crate::error::{MirrorError, MirrorErrorKind, MirrorResult};
use crate::mirror::config::{ConversionFailurePolicy, DirPolicy, MirrorConfig};
use crate::mirror::path_mapping::PathMapping;
use crate::mirror::setup::SetupStep;

/// Main CLI arguments
#[derive(Parser, Debug, Clone)]
#[command(name = "docmirror")]
#[command(about = "Mirror a source tree into a documentation tree, one markup file per script")]
#[command(version)]
#[command(long_about = None)]
pub struct Args {
    /// Source directory to walk
    #[arg(default_value = "src", env = "DOCMIRROR_SOURCE")]
    pub source: PathBuf,

    /// Documentation root to write into
    #[arg(short, long, default_value = "docs", env = "DOCMIRROR_OUTPUT")]
    pub output: PathBuf,

    /// Suffix of the files to convert
    #[arg(short, long, default_value = ".js")]
    pub extension: String,

    /// Suffix given to generated documentation files
    #[arg(long, default_value = ".md")]
    pub markup_extension: String,

    /// Program run on every source file; its standard output becomes the documentation
    #[arg(long, default_value = crate::converter::command::DEFAULT_CONVERTER, env = "DOCMIRROR_CONVERTER")]
    pub converter: String,

    /// Extra argument passed to the converter before the file path (repeatable)
    #[arg(long = "converter-arg", allow_hyphen_values = true)]
    pub converter_args: Vec<String>,

    /// How source directories are placed under the output root
    #[arg(long, value_enum, default_value_t = Mapping::Nested)]
    pub mapping: Mapping,

    /// Only create output directories that receive at least one file
    #[arg(long)]
    pub lazy_dirs: bool,

    /// What to do when the converter fails on a file
    #[arg(long, value_enum, default_value_t = FailureAction::Warn)]
    pub on_conversion_error: FailureAction,

    /// Visit files in name order instead of filesystem order
    #[arg(long)]
    pub sort: bool,

    /// Follow symbolic links in the source tree
    #[arg(long)]
    pub follow_links: bool,

    /// Install jsdoc-to-markdown with npm before converting
    #[arg(long)]
    pub install: bool,

    /// Print a summary of the run
    #[arg(long)]
    pub stats: bool,

    /// Print the run report as JSON
    #[arg(long)]
    pub json: bool,

    /// Show a progress spinner while converting
    #[arg(long)]
    pub progress: bool,

    /// Enable verbose logging
    #[arg(long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(long)]
    pub quiet: bool,
}

/// Path mapping options for CLI
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mapping {
    /// docs/<source dir name>/<relative path>
    Nested,
    /// docs/<relative path>
    Flattened,
}

impl From<Mapping> for PathMapping {
    fn from(mapping: Mapping) -> Self {
        match mapping {
            Mapping::Nested => PathMapping::Nested,
            Mapping::Flattened => PathMapping::Flattened,
        }
    }
}

/// Conversion failure handling for CLI
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureAction {
    Ignore,
    Warn,
    Abort,
}

impl From<FailureAction> for ConversionFailurePolicy {
    fn from(action: FailureAction) -> Self {
        match action {
            FailureAction::Ignore => ConversionFailurePolicy::Ignore,
            FailureAction::Warn => ConversionFailurePolicy::Warn,
            FailureAction::Abort => ConversionFailurePolicy::Abort,
        }
    }
}

/// CLI configuration
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub args: Args,
    pub mirror_config: MirrorConfig,
    pub converter: CommandConverter,
    pub setup: Option<SetupStep>,
}

impl CliConfig {
    /// Create CLI configuration from arguments
    pub fn from_args(args: Args) -> MirrorResult<Self> {
        if args.converter.trim().is_empty() {
            return Err(MirrorError::configuration("converter program must not be empty"));
        }

        let mirror_config = Self::create_mirror_config(&args);
        mirror_config.validate()?;

        let converter = CommandConverter::new(args.converter.trim()).with_args(args.converter_args.clone());
        let setup = args.install.then(SetupStep::default);

        Ok(Self {
            args,
            mirror_config,
            converter,
            setup,
        })
    }

    fn create_mirror_config(args: &Args) -> MirrorConfig {
        let dir_policy = if args.lazy_dirs {
            DirPolicy::Lazy
        } else {
            DirPolicy::Eager
        };

        MirrorConfig::new(&args.source, &args.output, &args.extension)
            .with_markup_extension(&args.markup_extension)
            .with_mapping(args.mapping.into())
            .with_dir_policy(dir_policy)
            .with_failure_policy(args.on_conversion_error.into())
            .with_sorted_entries(args.sort)
            .with_follow_links(args.follow_links)
    }

    /// Check if quiet mode is enabled
    pub fn is_quiet(&self) -> bool {
        self.args.quiet
    }

    /// Check if verbose mode is enabled
    pub fn is_verbose(&self) -> bool {
        self.args.verbose
    }

    /// Check if stats output is requested
    pub fn want_stats(&self) -> bool {
        self.args.stats
    }

    pub fn want_json(&self) -> bool {
        self.args.json
    }

    /// Progress spinner only makes sense on an interactive terminal
    pub fn want_progress(&self) -> bool {
        self.args.progress && !self.args.quiet && CliUtils::is_terminal()
    }
}

/// CLI utilities and helpers
pub struct CliUtils;

impl CliUtils {
    /// Format a duration in human-readable format
    pub fn format_duration(duration: Duration) -> String {
        let total_millis = duration.as_millis();

        if total_millis < 1000 {
            format!("{}ms", total_millis)
        } else if total_millis < 60_000 {
            format!("{:.1}s", total_millis as f64 / 1000.0)
        } else {
            let minutes = total_millis / 60_000;
            let seconds = (total_millis % 60_000) / 1000;
            format!("{}m {}s", minutes, seconds)
        }
    }

    /// Source path relative to its root, for display
    pub fn relative_display(path: &Path, root: &Path) -> String {
        path.strip_prefix(root).unwrap_or(path).display().to_string()
    }

    /// Create a spinner for file processing
    pub fn create_spinner() -> indicatif::ProgressBar {
        let pb = indicatif::ProgressBar::new_spinner();
        if let Ok(style) = indicatif::ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {pos} files {msg}")
        {
            pb.set_style(style);
        }
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    }

    /// Show a success message (if not in quiet mode)
    pub fn show_success(message: &str, quiet: bool) {
        if !quiet {
            println!("✓ {}", message);
        }
    }

    /// Show an error message
    pub fn show_error(message: &str) {
        eprintln!("✗ {}", message);
    }

    /// Show a warning message (if not in quiet mode)
    pub fn show_warning(message: &str, quiet: bool) {
        if !quiet {
            eprintln!("⚠ {}", message);
        }
    }

    /// Check if stdout is an interactive terminal
    pub fn is_terminal() -> bool {
        atty::is(atty::Stream::Stdout)
    }
}

/// Handle CLI errors with user-friendly messages
pub fn handle_error(error: &MirrorError) {
    CliUtils::show_error(&error.user_message());

    match error.kind() {
        MirrorErrorKind::Filesystem => {
            eprintln!("\nTip: Check that the output directory is writable; files converted so far were kept");
        }
        MirrorErrorKind::Conversion => {
            eprintln!("\nTip: Use --on-conversion-error warn to keep going past failing files");
        }
        MirrorErrorKind::Setup => {
            eprintln!("\nTip: Install the converter yourself and rerun without --install");
        }
        MirrorErrorKind::Traversal | MirrorErrorKind::Configuration => {}
    }

    eprintln!("\nTry 'docmirror --help' for usage information.");
}
