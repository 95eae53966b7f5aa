use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

mod commands;
mod report;

#[derive(Parser)]
#[command(
    name = "fitgrid",
    about = "fitgrid — best-fit service placement by cosine similarity",
    version,
    propagate_version = true,
)]
struct Cli {
    /// Log output format (logs go to stderr; filter with RUST_LOG)
    #[arg(long, value_enum, default_value_t = LogFormat::Text, global = true)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Place the services of an inventory file onto its servers
    Place {
        /// Path to the inventory TOML file
        #[arg(short, long, default_value = "inventory.toml")]
        inventory: PathBuf,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Run the bundled three-tier CPU/RAM example
    Demo {
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Write the bundled example as an inventory scaffold
    Init {
        #[arg(short, long, default_value = "inventory.toml")]
        path: PathBuf,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(clap::Args)]
struct OutputArgs {
    /// Report format
    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    format: Format,
    /// Include every candidate check and score in the report
    #[arg(long)]
    trace: bool,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Text,
    Json,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

fn init_tracing(format: LogFormat) -> anyhow::Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new("warn"))?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    match format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_format)?;

    match cli.command {
        Commands::Place { inventory, output } => {
            commands::place::run(&inventory, output.format, output.trace)
        }
        Commands::Demo { output } => commands::place::demo(output.format, output.trace),
        Commands::Init { path, force } => commands::init::run(&path, force),
    }
}
