use anyhow::Result;
use clap::{Parser, Subcommand};
use lumina_core::ColorScheme;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod config;
mod scale;

#[derive(Parser)]
#[command(name = "lumina", version, about = "Lumina appearance tooling")]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the px scale for a viewport size
    Scale {
        #[arg(long)]
        width: f32,
        #[arg(long)]
        height: f32,
        /// lumina.toml (or a directory containing one)
        #[arg(long)]
        config: Option<PathBuf>,
        /// Design pixel values to convert
        #[arg(
            long,
            value_delimiter = ',',
            default_values_t = vec![4.0, 8.0, 12.0, 16.0, 24.0, 32.0]
        )]
        values: Vec<f32>,
    },
    /// Manage lumina.toml
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Write a lumina.toml with default settings
    Init {
        #[arg(default_value = "lumina.toml")]
        path: PathBuf,
        /// Scheme used when nothing is stored (light or dark)
        #[arg(long, default_value = "dark")]
        scheme: ColorScheme,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Validate a lumina.toml
    Check {
        #[arg(default_value = ".")]
        path: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    match cli.command {
        Commands::Scale {
            width,
            height,
            config,
            values,
        } => {
            let scale_config = config::load_scale(config.as_deref())?;
            let report = scale::run(width, height, scale_config, &values);
            print!("{}", report);
        }
        Commands::Config { command } => match command {
            ConfigCommand::Init {
                path,
                scheme,
                force,
            } => config::init(&path, scheme, force)?,
            ConfigCommand::Check { path } => config::check(&path)?,
        },
    }

    Ok(())
}
