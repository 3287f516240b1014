mod cli;
mod demo;
mod infra;
mod routes;
mod server;

use lifespan_estimator::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
