mod check;
mod cli;
mod preview;

use dupecheck::error::AppError;

pub fn run() -> Result<(), AppError> {
    cli::run()
}
