mod cli;
mod demo;
mod infra;
mod report;

use portfolio_health::error::AppError;

pub fn run() -> Result<(), AppError> {
    cli::run()
}
