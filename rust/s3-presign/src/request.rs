use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::DEFAULT_EXPIRES;

/// An access key pair for SigV4 signing.
///
/// The secret never appears in `Debug` output.
#[derive(Clone, PartialEq, Eq, Default, Deserialize)]
pub struct Credentials {
    /// AWS Access Key ID
    access_key_id: String,
    /// AWS Secret Access Key
    secret_access_key: String,
}

impl Credentials {
    /// Create credentials from an access key id and secret.
    pub fn new(access_key_id: impl Into<String>, secret_access_key: impl Into<String>) -> Self {
        Self {
            access_key_id: access_key_id.into(),
            secret_access_key: secret_access_key.into(),
        }
    }

    /// Get the access key ID.
    pub fn access_key_id(&self) -> &str {
        &self.access_key_id
    }

    pub(crate) fn secret_access_key(&self) -> &str {
        &self.secret_access_key
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"<redacted>")
            .finish()
    }
}

/// Everything needed to presign a GET for one object.
///
/// The signing time is part of the request, so signing the same request twice
/// produces the same URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SigningRequest {
    /// Bucket name, used as the leftmost label of the endpoint host
    pub bucket: String,
    /// Object key, possibly containing `/` separators; not yet URL-encoded
    pub key: String,
    /// AWS region for the endpoint and signing scope (e.g. "us-east-1")
    pub region: String,
    /// Key pair used to derive the signing key
    pub credentials: Credentials,
    /// URL signature expiration in seconds
    pub expires: u64,
    /// Timestamp for signing
    pub time: DateTime<Utc>,
}

impl SigningRequest {
    /// Create a request signed at `time` with the default expiry.
    pub fn new(
        bucket: impl Into<String>,
        key: impl Into<String>,
        region: impl Into<String>,
        credentials: Credentials,
        time: DateTime<Utc>,
    ) -> Self {
        Self {
            bucket: bucket.into(),
            key: key.into(),
            region: region.into(),
            credentials,
            expires: DEFAULT_EXPIRES,
            time,
        }
    }

    /// Set the URL expiry in seconds.
    pub fn with_expires(mut self, expires: u64) -> Self {
        self.expires = expires;
        self
    }

    /// Endpoint host for the bucket: `{bucket}.s3.{region}.amazonaws.com`.
    pub fn host(&self) -> String {
        format!(
            "{}.{}.{}.{}",
            self.bucket,
            crate::SERVICE,
            self.region,
            crate::ENDPOINT_DOMAIN
        )
    }
}
