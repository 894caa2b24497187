//! SigV4 query-string signing.

use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};
use url::Url;

use crate::encoding::{hex_encode, percent_encode, percent_encode_path};
use crate::{MAX_EXPIRES, SERVICE, SigningError, SigningRequest};

pub const ALGORITHM_IDENTIFIER: &str = "AWS4-HMAC-SHA256";
pub const KEY_TYPE_IDENTIFIER: &str = "aws4_request";
pub const UNSIGNED_PAYLOAD: &str = "UNSIGNED-PAYLOAD";
pub const HOST_HEADER: &str = "host";

pub const ALGORITHM_QUERY_PARAM: &str = "X-Amz-Algorithm";
pub const CREDENTIAL_QUERY_PARAM: &str = "X-Amz-Credential";
pub const AMZ_DATE_QUERY_PARAM: &str = "X-Amz-Date";
pub const EXPIRES_QUERY_PARAM: &str = "X-Amz-Expires";
pub const SIGNED_HEADERS_QUERY_PARAM: &str = "X-Amz-SignedHeaders";
pub const SIGNATURE_QUERY_PARAM: &str = "X-Amz-Signature";

/// A presigned GET URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PresignedUrl(String);

impl PresignedUrl {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// The hex-encoded signature carried in the query string.
    pub fn signature(&self) -> Option<&str> {
        self.0
            .rsplit_once(&format!("{SIGNATURE_QUERY_PARAM}="))
            .map(|(_, signature)| signature)
    }

    /// Parse into a [`Url`] for handing to an HTTP client.
    pub fn to_url(&self) -> Result<Url, url::ParseError> {
        Url::parse(&self.0)
    }
}

impl std::fmt::Display for PresignedUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for PresignedUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<PresignedUrl> for String {
    fn from(url: PresignedUrl) -> Self {
        url.0
    }
}

/// Presign a GET request for `request.key` in `request.bucket`.
///
/// The result depends only on the request, including its signing time.
/// Incomplete configuration is rejected before anything is hashed.
pub fn sign(request: &SigningRequest) -> Result<PresignedUrl, SigningError> {
    check_configuration(request)?;

    let host = request.host();
    check_host(request, &host)?;

    let timestamp = request.time.format("%Y%m%dT%H%M%SZ").to_string();
    let date = &timestamp[0..8];
    let scope = format!(
        "{}/{}/{}/{}",
        date, request.region, SERVICE, KEY_TYPE_IDENTIFIER
    );

    let canonical_uri = format!(
        "/{}",
        percent_encode_path(&request.key).trim_start_matches('/')
    );

    let mut query_params: Vec<(&str, String)> = vec![
        (ALGORITHM_QUERY_PARAM, ALGORITHM_IDENTIFIER.into()),
        (
            CREDENTIAL_QUERY_PARAM,
            format!("{}/{}", request.credentials.access_key_id(), scope),
        ),
        (AMZ_DATE_QUERY_PARAM, timestamp.clone()),
        (EXPIRES_QUERY_PARAM, request.expires.to_string()),
        (SIGNED_HEADERS_QUERY_PARAM, HOST_HEADER.into()),
    ];
    query_params.sort_by(|a, b| a.0.cmp(b.0));

    let canonical_query = canonical_query_string(&query_params);
    let canonical_request = canonical_request(&canonical_uri, &canonical_query, &host);

    let digest = Sha256::digest(canonical_request.as_bytes());
    let payload = format!(
        "{}\n{}\n{}\n{}",
        ALGORITHM_IDENTIFIER,
        timestamp,
        scope,
        hex_encode(&digest)
    );

    let key = SigningKey::derive(
        request.credentials.secret_access_key(),
        date,
        &request.region,
        SERVICE,
    );
    let signature = key.sign(payload.as_bytes());

    Ok(PresignedUrl(format!(
        "https://{host}{canonical_uri}?{canonical_query}&{SIGNATURE_QUERY_PARAM}={signature}"
    )))
}

fn check_configuration(request: &SigningRequest) -> Result<(), SigningError> {
    if request.region.is_empty() {
        return Err(SigningError::Configuration("region is not set".into()));
    }
    if request.credentials.access_key_id().is_empty() {
        return Err(SigningError::Configuration("access key id is not set".into()));
    }
    if request.credentials.secret_access_key().is_empty() {
        return Err(SigningError::Configuration("secret key is not set".into()));
    }
    if request.expires == 0 || request.expires > MAX_EXPIRES {
        return Err(SigningError::Configuration(format!(
            "expiry must be between 1 and {MAX_EXPIRES} seconds, got {}",
            request.expires
        )));
    }
    Ok(())
}

/// The host is used verbatim in the signature, so it must already be in the
/// form a URL parser would normalize it to.
fn check_host(request: &SigningRequest, host: &str) -> Result<(), SigningError> {
    if request.bucket.is_empty() {
        return Err(SigningError::InvalidHost("bucket is empty".into()));
    }
    let url = Url::parse(&format!("https://{host}/"))
        .map_err(|e| SigningError::InvalidHost(format!("{host}: {e}")))?;
    match url.host_str() {
        Some(parsed) if parsed == host => Ok(()),
        _ => Err(SigningError::InvalidHost(host.to_string())),
    }
}

fn canonical_query_string(params: &[(&str, String)]) -> String {
    params
        .iter()
        .map(|(k, v)| format!("{}={}", percent_encode(k), percent_encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

fn canonical_request(canonical_uri: &str, canonical_query: &str, host: &str) -> String {
    format!(
        "GET\n{}\n{}\n{}:{}\n\n{}\n{}",
        canonical_uri, canonical_query, HOST_HEADER, host, HOST_HEADER, UNSIGNED_PAYLOAD
    )
}

/// AWS SigV4 signing key.
struct SigningKey(Hmac<Sha256>);

impl SigningKey {
    /// Derive a signing key for the given date, region, and service.
    fn derive(secret_key: &str, date: &str, region: &str, service: &str) -> Self {
        Self(Hmac::new_from_slice(&derive_key_bytes(secret_key, date, region, service))
            .expect("HMAC can take key of any size"))
    }

    /// Sign a message with this key.
    fn sign(&self, message: &[u8]) -> Signature {
        let mut mac = self.0.clone();
        mac.update(message);
        Signature(mac.finalize().into_bytes().to_vec())
    }
}

fn derive_key_bytes(secret_key: &str, date: &str, region: &str, service: &str) -> Vec<u8> {
    let date_key = hmac_sha256(format!("AWS4{}", secret_key).as_bytes(), date.as_bytes());
    let region_key = hmac_sha256(&date_key, region.as_bytes());
    let service_key = hmac_sha256(&region_key, service.as_bytes());
    hmac_sha256(&service_key, KEY_TYPE_IDENTIFIER.as_bytes())
}

/// AWS SigV4 signature.
struct Signature(Vec<u8>);

impl std::fmt::Display for Signature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&hex_encode(&self.0))
    }
}

/// Compute HMAC-SHA256.
fn hmac_sha256(key: &[u8], data: &[u8]) -> Vec<u8> {
    let mut mac = Hmac::<Sha256>::new_from_slice(key).expect("HMAC can take key of any size");
    mac.update(data);
    mac.finalize().into_bytes().to_vec()
}
