use s3_presign::SigningError;
use thiserror::Error;

/// Errors that turn a directive into an inline error element.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// The object URL could not be presigned.
    #[error(transparent)]
    Signing(#[from] SigningError),
}
