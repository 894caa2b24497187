use thiserror::Error;

/// Errors that can occur while presigning a URL.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SigningError {
    /// Region, credentials or expiry are missing or out of range.
    ///
    /// Reported before any hashing takes place.
    #[error("configuration error: {0}")]
    Configuration(String),
    /// The bucket and region do not form a usable endpoint host.
    #[error("invalid endpoint host: {0}")]
    InvalidHost(String),
}
