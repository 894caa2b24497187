//! Signing configuration supplied by the host.

use chrono::{DateTime, Utc};
use s3_presign::{Credentials, DEFAULT_EXPIRES, SigningRequest};
use serde::Deserialize;

/// Region used when none is configured.
pub const DEFAULT_REGION: &str = "us-east-1";

/// Region, credentials and URL lifetime used to presign every directive.
///
/// Deserializes from partial documents; missing fields take their defaults.
/// The secret key is redacted from `Debug` output.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// AWS region of the buckets (e.g. "us-east-1")
    pub region: String,
    /// AWS Access Key ID
    pub access_key_id: String,
    /// AWS Secret Access Key
    pub secret_access_key: String,
    /// Presigned URL lifetime in seconds; `0` means the default
    pub expires: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            region: DEFAULT_REGION.into(),
            access_key_id: String::new(),
            secret_access_key: String::new(),
            expires: DEFAULT_EXPIRES,
        }
    }
}

impl Config {
    pub fn new(
        region: impl Into<String>,
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
    ) -> Self {
        Self {
            region: region.into(),
            access_key_id: access_key_id.into(),
            secret_access_key: secret_access_key.into(),
            expires: DEFAULT_EXPIRES,
        }
    }

    pub fn with_expires(mut self, expires: u64) -> Self {
        self.expires = expires;
        self
    }

    /// Effective URL lifetime in seconds.
    pub fn expires(&self) -> u64 {
        if self.expires == 0 {
            DEFAULT_EXPIRES
        } else {
            self.expires
        }
    }

    pub fn credentials(&self) -> Credentials {
        Credentials::new(&self.access_key_id, &self.secret_access_key)
    }

    /// Build the request for presigning `key` in `bucket` at `time`.
    pub fn signing_request(&self, bucket: &str, key: &str, time: DateTime<Utc>) -> SigningRequest {
        SigningRequest::new(bucket, key, &self.region, self.credentials(), time)
            .with_expires(self.expires())
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("region", &self.region)
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"<redacted>")
            .field("expires", &self.expires)
            .finish()
    }
}
