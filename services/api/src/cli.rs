use crate::report::{run_analyze, run_sample, AnalyzeArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use red_flag_analyzer::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Red Flag Analyzer",
    about = "Screen loan applicants for hard, soft, and behavioral red flags",
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
    /// Evaluate an applicant record stored as JSON and print the flags
    Analyze(AnalyzeArgs),
    /// Print the prefilled sample applicant as JSON
    Sample,
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
        Command::Analyze(args) => run_analyze(args),
        Command::Sample => run_sample(),
    }
}
