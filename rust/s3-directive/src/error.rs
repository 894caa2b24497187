//! Error types for the directive parser.

use thiserror::Error;

/// Reasons a candidate directive is not a directive.
///
/// Callers should treat any of these as "leave the text alone" rather than
/// as a user-facing error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Expected a particular token or construct but found something else.
    #[error("expected {expected}, found {found}")]
    Expected { expected: String, found: String },
    /// The directive does not start with `s3://`.
    #[error("missing s3:// scheme")]
    MissingScheme,
    /// There is no `/` separating the bucket from the object key.
    #[error("missing object key after bucket")]
    MissingObjectKey,
    /// The bucket name is empty.
    #[error("empty bucket name")]
    EmptyBucket,
    /// The object key is empty.
    #[error("empty object key")]
    EmptyObjectKey,
}
