//! Encodings used by SigV4 canonicalization.

const LOWER_HEX: &[u8; 16] = b"0123456789abcdef";
const UPPER_HEX: &[u8; 16] = b"0123456789ABCDEF";

/// Hex-encode bytes using lowercase digits.
pub(crate) fn hex_encode(bytes: &[u8]) -> String {
    let mut result = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        result.push(LOWER_HEX[(byte >> 4) as usize] as char);
        result.push(LOWER_HEX[(byte & 0x0f) as usize] as char);
    }
    result
}

/// Percent-encode a string, leaving only RFC 3986 unreserved characters.
///
/// Escapes use uppercase hex digits, as SigV4 requires.
pub(crate) fn percent_encode(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for byte in s.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                result.push(byte as char);
            }
            _ => {
                result.push('%');
                result.push(UPPER_HEX[(byte >> 4) as usize] as char);
                result.push(UPPER_HEX[(byte & 0x0f) as usize] as char);
            }
        }
    }
    result
}

/// Percent-encode an object key segment by segment, preserving `/`.
pub(crate) fn percent_encode_path(path: &str) -> String {
    path.split('/')
        .map(percent_encode)
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_hex_encodes_bytes() {
        assert_eq!(hex_encode(&[0x01, 0x02, 0x03, 0x0A, 0x0F, 0xff]), "0102030a0fff");
        assert_eq!(hex_encode(&[]), "");
    }

    #[test]
    fn it_percent_encodes_strings() {
        assert_eq!(percent_encode("abc123"), "abc123");
        assert_eq!(percent_encode("a b+c"), "a%20b%2Bc");
        assert_eq!(percent_encode("test/path"), "test%2Fpath");
        assert_eq!(percent_encode("-_.~"), "-_.~");
    }

    #[test]
    fn it_percent_encodes_multibyte_characters() {
        assert_eq!(percent_encode("é"), "%C3%A9");
    }

    #[test]
    fn it_preserves_slashes_in_paths() {
        assert_eq!(
            percent_encode_path("reports/Q1 summary (final).pdf"),
            "reports/Q1%20summary%20%28final%29.pdf"
        );
        assert_eq!(percent_encode_path("a//b/"), "a//b/");
    }
}
