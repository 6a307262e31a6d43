//! CLI command definitions, routing, and tracing setup.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, eyre};
use tracing::info;

use seqdoc_core::{AnnotateConfig, run_batch};
use seqdoc_metadata::CommandMetadataSource;
use seqdoc_shared::{AppConfig, config, init_config, load_config, load_config_from};

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// seqdoc — cross-reference OEIS sequences in generated API docs.
#[derive(Parser)]
#[command(
    name = "seqdoc",
    version,
    about = "Annotate generated documentation pages with the OEIS sequences they formalize.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Run the producer and annotate every module it reports.
    Run {
        /// Root of the generated documentation tree (overrides config).
        #[arg(long)]
        doc_root: Option<PathBuf>,

        /// Producer command printing the annotation index as JSON (overrides config).
        #[arg(long)]
        producer: Option<String>,

        /// Catalogue base URL (overrides config).
        #[arg(long)]
        base_url: Option<String>,

        /// Abort on the first per-module failure instead of continuing.
        #[arg(long)]
        fail_fast: bool,

        /// Path to a seqdoc.toml (defaults to ./seqdoc.toml if present).
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Write a seqdoc.toml with defaults to the working directory.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "seqdoc=info",
        1 => "seqdoc=debug",
        _ => "seqdoc=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt().with_env_filter(env_filter).with_target(false).init();
        }
        LogFormat::Json => {
            fmt().json().with_env_filter(env_filter).init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Run {
            doc_root,
            producer,
            base_url,
            fail_fast,
            config,
        } => {
            let mut app_config = match config {
                Some(path) => load_config_from(&path)?,
                None => load_config()?,
            };

            if let Some(root) = doc_root {
                app_config.docs.root = root.display().to_string();
            }
            if let Some(cmd) = producer {
                app_config.producer.command = cmd;
                app_config.producer.args = Vec::new();
            }
            if let Some(base) = base_url {
                app_config.catalogue.base_url = base;
            }
            if fail_fast {
                app_config.batch.fail_fast = true;
            }

            run_annotate(&app_config)
        }

        Command::Config { action } => match action {
            ConfigAction::Init => {
                let path = init_config(std::path::Path::new(config::CONFIG_FILE_NAME))?;
                println!("wrote {}", path.display());
                Ok(())
            }
            ConfigAction::Show => {
                let app_config = load_config()?;
                println!("{}", toml::to_string_pretty(&app_config)?);
                Ok(())
            }
        },
    }
}

/// Execute the batch and report the outcome.
fn run_annotate(app_config: &AppConfig) -> Result<()> {
    let source = CommandMetadataSource::new(
        app_config.producer.command.clone(),
        app_config.producer.args.clone(),
    );
    let annotate_config = AnnotateConfig::from(app_config);

    info!(
        doc_root = %annotate_config.doc_root.display(),
        producer = %app_config.producer.command,
        "starting annotation batch"
    );

    let result = run_batch(&source, &annotate_config)?;

    println!(
        "annotated {} module(s) in {:.1}s",
        result.patched.len(),
        result.elapsed.as_secs_f64()
    );

    if !result.is_success() {
        for failure in &result.failures {
            eprintln!("  {}: {}", failure.module, failure.error);
        }
        return Err(eyre!(
            "{} of {} module(s) failed",
            result.failures.len(),
            result.failures.len() + result.patched.len()
        ));
    }

    Ok(())
}
