//! er-blocking: blocking for entity resolution
//!
//! Groups entity profiles that share blocking keys so that only profiles in
//! the same block are compared by a downstream matcher.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use er_blocking::{
    blocking::BlockingMethodKind,
    cli,
    config::{self, AppConfig, ConfigPreset, ConfigurationSelection, OutputFormat, Validatable},
};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "er-blocking")]
#[command(version)]
#[command(about = "Blocking for entity resolution", long_about = None)]
#[command(after_help = "EXAMPLES:
    # Dirty ER with the default extended q-grams configuration
    er-blocking blocks people.json

    # Clean-clean ER, grid configuration 7, full block list
    er-blocking blocks d1.json --second d2.json --grid 7 -o json

    # Compare every grid configuration of q-grams blocking
    er-blocking sweep d1.json --second d2.json --method q-grams

    # Parameter metadata for automated sweep drivers
    er-blocking params --method extended-q-grams")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Worker threads for key computation (default: all cores)
    #[arg(long, global = true)]
    threads: Option<usize>,

    #[command(subcommand)]
    command: Commands,
}

// ============================================================================
// Command argument structs
// ============================================================================

/// Method selection shared by the block-building commands
#[derive(Args)]
struct MethodArgs {
    /// Blocking method
    #[arg(short, long, value_enum)]
    method: Option<BlockingMethodKind>,

    /// Start from a named preset (default, strict, permissive)
    #[arg(long)]
    preset: Option<String>,
}

/// Arguments for the `blocks` subcommand
#[derive(Parser)]
struct BlocksArgs {
    /// JSON file with the (first) profile collection
    profiles: PathBuf,

    /// JSON file with the second collection (clean-clean ER)
    #[arg(short, long)]
    second: Option<PathBuf>,

    #[command(flatten)]
    method: MethodArgs,

    /// Characters per q-gram
    #[arg(long)]
    q_gram_size: Option<usize>,

    /// Combination threshold in (0, 1]
    #[arg(long)]
    threshold: Option<f64>,

    /// Use grid configuration N instead of explicit parameters
    #[arg(long, value_name = "N", conflicts_with_all = ["random", "q_gram_size", "threshold"])]
    grid: Option<usize>,

    /// Use reproducible random configuration N instead of explicit parameters
    #[arg(long, value_name = "N", conflicts_with_all = ["q_gram_size", "threshold"])]
    random: Option<usize>,

    /// Output format
    #[arg(short, long, value_enum)]
    output: Option<OutputFormat>,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,
}

/// Arguments for the `sweep` subcommand
#[derive(Parser)]
struct SweepArgs {
    /// JSON file with the (first) profile collection
    profiles: PathBuf,

    /// JSON file with the second collection (clean-clean ER)
    #[arg(short, long)]
    second: Option<PathBuf>,

    /// Blocking method
    #[arg(short, long, value_enum)]
    method: Option<BlockingMethodKind>,

    /// Output format
    #[arg(short, long, value_enum)]
    output: Option<OutputFormat>,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Build blocks from one or two profile collections
    Blocks(BlocksArgs),

    /// Print a method's parameter descriptors as JSON
    Params {
        /// Blocking method
        #[arg(short, long, value_enum, default_value_t = BlockingMethodKind::default())]
        method: BlockingMethodKind,
    },

    /// Run every grid configuration of a method and compare the results
    Sweep(SweepArgs),

    /// Generate JSON Schema for the config file format
    Schema {
        /// Write schema to file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show, discover, or initialize configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Sub-subcommands for the `config` command
#[derive(Subcommand)]
enum ConfigAction {
    /// Print current effective configuration (merged from defaults + file)
    Show,
    /// Print the discovered config file
    Path,
    /// Generate an example .er-blocking.yaml in the current directory
    Init,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "warn"
    } else {
        "info"
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    match cli.command {
        Commands::Blocks(args) => {
            let config = blocks_config(cli.config.as_deref(), cli.threads, &args)?;
            init_thread_pool(&config)?;
            cli::run_blocks(&config, &args.profiles, args.second.as_deref())
        }

        Commands::Params { method } => cli::run_params(method),

        Commands::Sweep(args) => {
            let (mut config, loaded_from) = config::load_or_default(cli.config.as_deref());
            log_config_source(loaded_from.as_deref());
            if let Some(kind) = args.method {
                config.blocking.set_method(kind);
            }
            config.merge(
                &AppConfig::builder()
                    .threads(cli.threads)
                    .output_format(args.output.unwrap_or_default())
                    .output_file(args.output_file.clone())
                    .build(),
            );
            ensure_valid(&config)?;
            init_thread_pool(&config)?;
            cli::run_sweep(&config, &args.profiles, args.second.as_deref())
        }

        Commands::Schema { output } => {
            let schema = config::generate_json_schema()?;
            match output {
                Some(path) => {
                    std::fs::write(&path, &schema)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    eprintln!("Schema written to {}", path.display());
                }
                None => {
                    println!("{schema}");
                }
            }
            Ok(())
        }

        Commands::Config { action } => match action {
            ConfigAction::Show => {
                let (config, loaded_from) = config::load_or_default(cli.config.as_deref());
                if let Some(path) = &loaded_from {
                    eprintln!("# Loaded from: {}", path.display());
                } else {
                    eprintln!("# No config file found; showing defaults");
                }
                let yaml = serde_yaml::to_string(&config).context("failed to serialize config")?;
                print!("{yaml}");
                Ok(())
            }
            ConfigAction::Path => {
                match config::discover_config_file(cli.config.as_deref()) {
                    Some(path) => eprintln!("Active config file: {}", path.display()),
                    None => eprintln!("No config file found."),
                }
                Ok(())
            }
            ConfigAction::Init => {
                let target = std::env::current_dir()
                    .context("cannot determine current directory")?
                    .join(".er-blocking.yaml");
                if target.exists() {
                    anyhow::bail!(
                        "{} already exists. Remove it first to re-initialize.",
                        target.display()
                    );
                }
                std::fs::write(&target, config::generate_example_config())
                    .with_context(|| format!("failed to write {}", target.display()))?;
                eprintln!("Created {}", target.display());
                Ok(())
            }
        },
    }
}

/// Layer preset, config file and command-line flags for `blocks`.
fn blocks_config(
    config_path: Option<&Path>,
    threads: Option<usize>,
    args: &BlocksArgs,
) -> Result<AppConfig> {
    let (mut config, loaded_from) = config::load_or_default(config_path);
    log_config_source(loaded_from.as_deref());

    if let Some(name) = &args.method.preset {
        let preset = ConfigPreset::from_name(name).with_context(|| {
            format!(
                "unknown preset '{name}'. Valid options: {}",
                ConfigPreset::all()
                    .iter()
                    .map(ConfigPreset::name)
                    .collect::<Vec<_>>()
                    .join(", ")
            )
        })?;
        config.blocking = AppConfig::from_preset(preset).blocking;
    }
    if let Some(kind) = args.method.method {
        config.blocking.set_method(kind);
    }
    if args.q_gram_size.is_some() || args.threshold.is_some() {
        config.blocking.selection = ConfigurationSelection::Default;
    }

    let selection = match (args.grid, args.random) {
        (Some(iteration), _) => ConfigurationSelection::Grid { iteration },
        (None, Some(iteration)) => ConfigurationSelection::Random { iteration },
        (None, None) => ConfigurationSelection::Default,
    };
    config.merge(
        &AppConfig::builder()
            .q_gram_size(args.q_gram_size)
            .threshold(args.threshold)
            .selection(selection)
            .threads(threads)
            .output_format(args.output.unwrap_or_default())
            .output_file(args.output_file.clone())
            .build(),
    );

    ensure_valid(&config)?;
    Ok(config)
}

/// Report every configuration error before giving up.
fn ensure_valid(config: &AppConfig) -> Result<()> {
    let errors = config.validate();
    if !errors.is_empty() {
        for error in &errors {
            tracing::error!("{error}");
        }
        anyhow::bail!("invalid configuration ({} errors)", errors.len());
    }
    Ok(())
}

fn log_config_source(loaded_from: Option<&Path>) {
    if let Some(path) = loaded_from {
        tracing::debug!("Using config file {}", path.display());
    }
}

fn init_thread_pool(config: &AppConfig) -> Result<()> {
    if let Some(threads) = config.execution.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("failed to configure worker threads")?;
    }
    Ok(())
}
