mod cli;
mod commands;

use kenya_admin::error::AppError;

pub fn run() -> Result<(), AppError> {
    cli::run()
}
