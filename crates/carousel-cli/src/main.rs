use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use carousel_core::AppConfig;

mod commands;

#[derive(Parser)]
#[command(name = "carousel")]
#[command(author, version, about = "A terminal cover-flow carousel")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Use this config file instead of ~/.config/carousel/config.toml
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the interactive carousel
    Run {
        /// Wrap around at both ends
        #[arg(long = "loop")]
        loop_mode: bool,
        /// Number of cards
        #[arg(short = 'n', long)]
        count: Option<usize>,
    },
    /// Print the slot layout for a scripted sequence of scrolls
    Layout(commands::layout::LayoutArgs),
    /// Show the effective configuration
    Config {
        /// Write the default configuration if no file exists
        #[arg(long)]
        init: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.unwrap_or_else(AppConfig::config_path);
    let mut config = AppConfig::load_from(&config_path)
        .with_context(|| format!("Failed to load {}", config_path.display()))?;

    match cli.command.unwrap_or(Commands::Run {
        loop_mode: false,
        count: None,
    }) {
        Commands::Run { loop_mode, count } => {
            if loop_mode {
                config.carousel.loop_mode = true;
            }
            if let Some(count) = count {
                config.ui.item_count = count;
            }
            // The terminal is owned by the UI, so logs go to a file
            let _guard = init_file_logging(&config)?;
            commands::run::run(config, config_path)
        }
        Commands::Layout(args) => {
            init_stderr_logging(&config);
            commands::layout::run(&args, &config)
        }
        Commands::Config { init } => {
            init_stderr_logging(&config);
            commands::config::run(&config, &config_path, init)
        }
    }
}

fn env_filter(config: &AppConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.general.log_level))
}

fn init_stderr_logging(config: &AppConfig) {
    tracing_subscriber::registry()
        .with(env_filter(config))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
}

fn init_file_logging(config: &AppConfig) -> Result<tracing_appender::non_blocking::WorkerGuard> {
    let log_path = config.log_path();
    let log_dir = log_path
        .parent()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("Failed to create {}", log_dir.display()))?;
    let file_name = log_path
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_else(|| "carousel.log".into());

    let file_appender = tracing_appender::rolling::never(&log_dir, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(env_filter(config))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true),
        )
        .init();

    Ok(guard)
}
