//! symbol-layout: generates schematic symbols from package descriptors
//!
//! Reads package JSON files and writes one `<stem>.symbols.json` per package
//! with every requested symbol variant.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info, Level};
use tracing_subscriber::EnvFilter;

use symbol_layout::config;
use symbol_layout::output::{expand_sources, process_sources, OutputOptions};
use symbol_layout::render::Variant;

/// Generates schematic symbols from package descriptors.
///
/// Every source produces `<stem>.symbols.json` holding the functional,
/// multi unit, physical and socket symbols of the package.
#[derive(Parser, Debug)]
#[command(name = "symbol-layout")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Package descriptor files or glob patterns
    #[arg(value_name = "SOURCES", required = true)]
    sources: Vec<String>,

    /// Path to configuration file
    #[arg(short, long, value_name = "CONFIG_FILE")]
    config: Option<PathBuf>,

    /// Directory receiving the generated files (default: beside each source)
    #[arg(long, value_name = "DIR")]
    into: Option<PathBuf>,

    /// Variant to generate; repeat for several (overrides the configuration)
    #[arg(long = "variant", value_name = "NAME", value_parser = parse_variant)]
    variants: Vec<Variant>,

    /// Increase logging verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Decrease logging verbosity (only show errors)
    #[arg(short, long)]
    quiet: bool,
}

fn parse_variant(name: &str) -> Result<Variant, String> {
    Variant::from_name(name).ok_or_else(|| {
        let valid: Vec<&str> = Variant::ALL.iter().map(Variant::name).collect();
        format!("unknown variant '{name}', expected one of: {}", valid.join(", "))
    })
}

/// Determines the log level from CLI arguments.
#[allow(clippy::match_same_arms)] // Explicit "warn" arm for clarity
fn get_log_level(verbose: u8, quiet: bool, config_level: &str) -> Level {
    if quiet {
        return Level::ERROR;
    }

    match verbose {
        0 => match config_level.to_lowercase().as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::WARN, // Default to warn for unknown levels
        },
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Initialises the tracing subscriber for logging.
fn init_tracing(level: Level) {
    let filter = EnvFilter::from_default_env().add_directive(level.into());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Entry point for the symbol-layout tool.
fn main() -> ExitCode {
    let args = Args::parse();

    // Load configuration
    let config_path = args.config.as_deref();
    let cfg = match config::load_config(config_path) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            return ExitCode::FAILURE;
        }
    };

    // Initialise logging
    let log_level = get_log_level(args.verbose, args.quiet, &cfg.logging.level);
    init_tracing(log_level);

    let options = OutputOptions {
        variants: if args.variants.is_empty() {
            cfg.variants()
        } else {
            args.variants
        },
        metrics: cfg.metrics,
        directory: args.into.or(cfg.output.directory),
        pretty: cfg.output.pretty,
    };

    let sources = match expand_sources(args.sources.as_slice()) {
        Ok(sources) => sources,
        Err(e) => {
            error!(error = %e, "Invalid sources");
            return ExitCode::FAILURE;
        }
    };

    info!(
        sources = sources.len(),
        variants = ?options.variants,
        "Generating symbols"
    );

    let summary = process_sources(&sources, &options);
    for (source, e) in &summary.failed {
        error!(source = %source.display(), error = %e, "Source failed");
    }

    info!(
        written = summary.written.len(),
        skipped = summary.skipped.len(),
        failed = summary.failed.len(),
        "Done"
    );

    if summary.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
