use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Client not found: {0}")]
    ClientNotFound(String),

    #[error("Client already exists: {0}")]
    ClientAlreadyExists(String),

    #[error("Platform not found: {0}")]
    PlatformNotFound(String),

    #[error("Record not found: {0}")]
    RecordNotFound(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidDateRange { start: String, end: String },

    #[error("Storage error: {0}")]
    Storage(#[from] anyhow::Error),
}
