use crate::demo::{run_classify, run_demo, ClassifyArgs, DemoArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use fleetwatch::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Fleetwatch Monitoring Service",
    about = "Run the inspection-center monitoring service and its scoring demos from the command line",
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
    /// Classify a single geolocation sample against a center coordinate
    Classify(ClassifyArgs),
    /// Run a canned fleet snapshot through scoping, scoring, and ranking
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
        Command::Classify(args) => run_classify(args),
        Command::Demo(args) => run_demo(args),
    }
}
