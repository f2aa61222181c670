mod cli;
mod infra;
mod routes;
mod server;
mod survey;

use template_advisor::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
