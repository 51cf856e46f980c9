use clap::Parser;
use std::path::PathBuf;

use anyhow::Result;

use docmirror::cli::{self, Args, CliConfig, CliUtils};
use docmirror::{ConversionFailurePolicy, DocMirror, MirrorEvent, MirrorReport, MirrorResult};

fn main() -> Result<()> {
    let args = Args::parse();

    // Set up logging
    init_tracing(args.verbose)?;

    let config = match CliConfig::from_args(args) {
        Ok(config) => config,
        Err(e) => {
            cli::handle_error(&e);
            std::process::exit(2);
        }
    };

    match run(&config) {
        Ok(report) => output_report(&config, &report),
        Err(e) => {
            cli::handle_error(&e);
            std::process::exit(1);
        }
    }
}

fn init_tracing(verbose: bool) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            // RUST_LOG wins over the --verbose default
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new(if verbose { "debug" } else { "warn" })
            }),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

fn run(config: &CliConfig) -> MirrorResult<MirrorReport> {
    if let Some(setup) = &config.setup {
        setup.run()?;
    }

    // Keep stdout clean for the JSON report
    let quiet = config.is_quiet() || config.want_json();
    let source_root: PathBuf = config.mirror_config.source_root.clone();
    let spinner = config.want_progress().then(CliUtils::create_spinner);
    let progress = spinner.clone();
    let warn_failures = config.mirror_config.on_conversion_failure != ConversionFailurePolicy::Ignore;

    let mirror = DocMirror::new(config.mirror_config.clone(), config.converter.clone()).with_observer(
        move |event| {
            let line = match event {
                MirrorEvent::Converted {
                    source,
                    destination,
                } => format!(
                    "{} -> {}",
                    CliUtils::relative_display(source, &source_root),
                    destination.display()
                ),
                MirrorEvent::ConversionFailed {
                    source, outcome, ..
                } => {
                    if !warn_failures {
                        return;
                    }
                    CliUtils::show_warning(
                        &format!(
                            "{}: converter {}",
                            CliUtils::relative_display(source, &source_root),
                            outcome.describe()
                        ),
                        quiet,
                    );
                    return;
                }
                MirrorEvent::DirectoryCreated { .. } => return,
            };

            match &progress {
                Some(pb) => {
                    pb.inc(1);
                    pb.set_message(line);
                }
                None => CliUtils::show_success(&line, quiet),
            }
        },
    );

    let result = mirror.run();
    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }
    result
}

fn output_report(config: &CliConfig, report: &MirrorReport) -> Result<()> {
    if config.want_json() {
        println!("{}", report.to_json()?);
        return Ok(());
    }

    if config.want_stats() && !config.is_quiet() {
        println!("\nMirror Statistics:");
        println!("{}", report.summary());
        for failed in &report.conversion_failures {
            println!("  failed: {}", failed.display());
        }
    }

    Ok(())
}
