//! Hex and base64 codecs backing the `%H`/`%V` placeholders (§4.2/§4.3).
//!
//! Kept as thin wrappers around the `hex`/`base64` crates rather than
//! hand-rolled loops.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;

/// `%H` emission: lowercase or uppercase hex, two characters per byte.
pub fn hex_encode(bytes: &[u8], uppercase: bool) -> String {
    if uppercase {
        hex::encode_upper(bytes)
    } else {
        hex::encode(bytes)
    }
}

/// `%H` conversion: decode a hex string (either case) into bytes.
pub fn hex_decode(s: &str) -> Option<Vec<u8>> {
    hex::decode(s).ok()
}

/// `%V` emission: standard base64 alphabet, `=` padding, no line breaks.
pub fn base64_encode(bytes: &[u8]) -> String {
    BASE64_STANDARD.encode(bytes)
}

/// `%V` conversion: standard base64 decode.
pub fn base64_decode(s: &str) -> Option<Vec<u8>> {
    BASE64_STANDARD.decode(s).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_round_trip() {
        let bytes = [0xDE, 0xAD, 0xBE, 0xEF];
        assert_eq!(hex_encode(&bytes, false), "deadbeef");
        assert_eq!(hex_encode(&bytes, true), "DEADBEEF");
        assert_eq!(hex_decode("DeAdBeEf").unwrap(), bytes);
    }

    #[test]
    fn base64_round_trip() {
        let bytes = b"hello world";
        let enc = base64_encode(bytes);
        assert_eq!(enc, "aGVsbG8gd29ybGQ=");
        assert_eq!(base64_decode(&enc).unwrap(), bytes);
    }

    #[test]
    fn hex_decode_rejects_odd_length() {
        assert!(hex_decode("abc").is_none());
    }
}
