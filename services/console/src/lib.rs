mod cli;
mod infra;
mod views;

use recrutement::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
