use thiserror::Error;

#[derive(Error, Debug)]
pub enum DonationError {
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Config error: {0}")]
    ConfigError(#[from] serde_json::Error),
    /// Unsubmittable amount or failed client-side validation.
    #[error("{0}")]
    UserInput(String),
    /// The payment SDK is missing or could not build its card widget.
    #[error("Payment SDK unavailable: {0}")]
    AdapterUnavailable(String),
    /// Card details rejected during tokenization.
    #[error("{0}")]
    Tokenization(String),
    /// The processing backend failed or reported a failure.
    #[error("Processing error: {0}")]
    Processing(String),
    #[error("Payment form not initialized")]
    NotInitialized,
}

pub type Result<T> = std::result::Result<T, DonationError>;
