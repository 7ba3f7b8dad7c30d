mod cli;
mod demo;
mod infra;
mod routes;
mod server;

use vaccine_card::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
