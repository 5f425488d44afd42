//! TransBack CLI
//!
//! Command-line interface for translation round trips and back-translation
//! highlighting

use clap::{Parser, Subcommand};
use transback_core::logging::{self, Profile};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "transback")]
#[command(about = "TransBack - Translation fidelity checks by round trip", long_about = None)]
struct Cli {
    /// Verbose logging to stderr
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Highlight an original text against its back-translation
    Diff(commands::diff::DiffArgs),
    /// Translate, back-translate and review a text file
    Translate(commands::translate::TranslateArgs),
    /// Replay a captured event stream through the presentation controller
    Replay(commands::replay::ReplayArgs),
}

#[tokio::main]
async fn main() {
    // a missing .env file is fine
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    logging::init(if cli.debug {
        Profile::Development
    } else {
        Profile::Quiet
    });

    let result = match cli.command {
        Commands::Diff(args) => commands::diff::execute(args),
        Commands::Translate(args) => commands::translate::execute(args).await,
        Commands::Replay(args) => commands::replay::execute(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
