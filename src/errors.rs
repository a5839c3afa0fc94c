use thiserror::Error;

#[derive(Error, Debug)]
pub enum DebentureError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("HTTP request error: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Transport error: {0}")]
    TransportError(String),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Date parsing error: {0}")]
    DateError(#[from] chrono::ParseError),

    #[error("Data unavailable: {0}")]
    Unavailable(String),

    #[error("Data error: {0}")]
    DataError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl DebentureError {
    /// True for failures of the network round-trip itself (timeouts, refused
    /// connections, non-2xx answers).
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            DebentureError::RequestError(_) | DebentureError::TransportError(_)
        )
    }

    /// True for failures writing or reading local files.
    pub fn is_persistence(&self) -> bool {
        matches!(self, DebentureError::IoError(_) | DebentureError::CsvError(_))
    }
}

pub type Result<T> = std::result::Result<T, DebentureError>;

impl From<String> for DebentureError {
    fn from(s: String) -> Self {
        DebentureError::Unknown(s)
    }
}

impl From<&str> for DebentureError {
    fn from(s: &str) -> Self {
        DebentureError::Unknown(s.to_string())
    }
}
