use crate::demo::{run_compare, run_demo, CompareArgs, DemoArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use compare_offer::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "CompareOffer",
    about = "Store job offers and compare them with a weighted score",
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
    /// Rank offers from a JSON file of offer drafts
    Compare(CompareArgs),
    /// Rank a built-in sample portfolio, then again after moving the salary slider
    Demo(DemoArgs),
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
        Command::Compare(args) => run_compare(args),
        Command::Demo(args) => run_demo(args),
    }
}
