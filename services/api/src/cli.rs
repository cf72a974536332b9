use crate::commands::{
    run_analyze, run_profiles, run_upgrades, run_validate, AnalyzeArgs, UpgradeArgs,
    ValidateArgs,
};
use crate::server;
use artifact_advisor::error::AppError;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "artifact-advisor",
    about = "Normalize artifact inventories and score them against character build profiles",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Check a portable export before importing it
    Validate(ValidateArgs),
    /// Score every artifact in an inventory file and summarize the collection
    Analyze(AnalyzeArgs),
    /// Show a character's current build and better pieces from the inventory
    Upgrades(UpgradeArgs),
    /// List the build profiles used for scoring
    Profiles,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Validate(args) => run_validate(args),
        Command::Analyze(args) => run_analyze(args),
        Command::Upgrades(args) => run_upgrades(args),
        Command::Profiles => run_profiles(),
    }
}
