use thiserror::Error;

#[derive(Error, Debug)]
pub enum CleanError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV read/write failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("Workbook read failed: {0}")]
    Workbook(#[from] calamine::Error),

    #[error("Unsupported input format: {0}")]
    UnsupportedFormat(String),

    #[error("Unknown marketplace: {0}")]
    UnknownMarketplace(String),

    #[error("Input contains no readable rows: {0}")]
    EmptyInput(String),
}

pub type Result<T> = std::result::Result<T, CleanError>;
