use thiserror::Error;

use datekit::date::InstantError;

#[derive(Error, Debug)]
pub enum CommandError {
    #[error("Invalid --now value '{value}': {source}")]
    InvalidNow {
        value: String,
        source: InstantError,
    },
}

pub type Result<T> = anyhow::Result<T>;
