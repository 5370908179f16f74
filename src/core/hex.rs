/*!
Hex transport for key material and signatures.

Both directions keep the padding quirks of the engine's reference bindings:
an odd number of bytes gains a trailing zero byte before formatting, and an
odd number of hex digits gains a trailing `'0'` digit before decoding. The
receiver cannot tell that a pad was added, so only even-length input
survives a round trip unchanged.
*/

use crate::core::error::{Error, Result};

/// Format bytes as upper-case hex, two digits per byte
pub fn bytes_to_hex(bytes: &[u8]) -> String {
    if bytes.len() % 2 == 1 {
        let mut padded = Vec::with_capacity(bytes.len() + 1);
        padded.extend_from_slice(bytes);
        padded.push(0);
        ::hex::encode_upper(padded)
    } else {
        ::hex::encode_upper(bytes)
    }
}

/// Decode hex, two digits per byte, in sequence
pub fn hex_to_bytes(hex: &str) -> Result<Vec<u8>> {
    let decoded = if hex.len() % 2 == 1 {
        let mut padded = String::with_capacity(hex.len() + 1);
        padded.push_str(hex);
        padded.push('0');
        ::hex::decode(padded)
    } else {
        ::hex::decode(hex)
    };
    decoded.map_err(|e| Error::InvalidHex(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_even_roundtrip() {
        let bytes = [0x00, 0x7f, 0xab, 0xff];
        let hex = bytes_to_hex(&bytes);
        assert_eq!(hex, "007FABFF");
        assert_eq!(hex_to_bytes(&hex).unwrap(), bytes);
    }

    #[test]
    fn test_odd_bytes_gain_zero_pad() {
        assert_eq!(bytes_to_hex(&[0x12, 0x34, 0x56]), "12345600");
        assert_eq!(hex_to_bytes("12345600").unwrap(), vec![0x12, 0x34, 0x56, 0x00]);
    }

    #[test]
    fn test_odd_hex_digits_padded_low() {
        assert_eq!(hex_to_bytes("ABC").unwrap(), vec![0xAB, 0xC0]);
    }

    #[test]
    fn test_lower_case_accepted() {
        assert_eq!(hex_to_bytes("deadbeef").unwrap(), vec![0xde, 0xad, 0xbe, 0xef]);
    }

    #[test]
    fn test_empty() {
        assert_eq!(bytes_to_hex(&[]), "");
        assert!(hex_to_bytes("").unwrap().is_empty());
    }

    #[test]
    fn test_invalid_digit() {
        assert!(matches!(hex_to_bytes("zz"), Err(Error::InvalidHex(_))));
    }
}
