//! `windtk`: rotor aerodynamics and blade vibration from the command line.

mod commands;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Wind turbine engineering toolbox.
#[derive(Parser)]
#[command(name = "windtk")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Wind turbine rotor aerodynamics and blade vibration", long_about = None)]
struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Blade element momentum analysis of a rotor
    Rotor(commands::rotor::RotorArgs),
    /// Natural bending frequencies of a rotating blade
    Modes(commands::modes::ModesArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = match cli.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Rotor(args) => commands::rotor::execute(&args),
        Commands::Modes(args) => commands::modes::execute(&args),
    }
}
