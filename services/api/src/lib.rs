mod cli;
mod infra;
mod report;
mod routes;
mod server;

use red_flag_analyzer::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
