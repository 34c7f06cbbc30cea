mod cli;
mod infra;
mod quote;
mod routes;
mod server;

use vehicle_finance::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
