//! bit/byte codec between the 80 bit position key and the 14 character
//! Position ID, no backgammon semantics in here

use crate::position::PositionError;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;

pub(crate) const KEY_LEN: usize = 80;
const BYTE_LEN: usize = 8;
const PACKED_LEN: usize = 10;

/// Encode a binary position key and return a Position ID.
///
/// The key is stored least-significant-bit first within each byte, matching
/// the GNU Backgammon byte layout.
pub fn encode(position_key: &str) -> Result<String, PositionError> {
    if !is_key(position_key) {
        return Err(PositionError::InvalidKey);
    }
    Ok(pack_key(position_key))
}

/// Decode a Position ID and return a binary position key.
///
/// Accepts the identifier with or without its two padding characters.
pub fn decode(position_id: &str) -> Result<String, PositionError> {
    let padded = format!("{}==", position_id.trim_end_matches('='));
    let packed = STANDARD
        .decode(padded)
        .map_err(|_| PositionError::InvalidIdentifier)?;
    if packed.len() != PACKED_LEN {
        return Err(PositionError::InvalidIdentifier);
    }
    let mut key = String::with_capacity(KEY_LEN);
    for byte in packed {
        for bit in 0..BYTE_LEN {
            key.push(if byte >> bit & 1 == 1 { '1' } else { '0' });
        }
    }
    Ok(key)
}

#[inline]
pub(crate) fn is_key(position_key: &str) -> bool {
    position_key.len() == KEY_LEN && position_key.bytes().all(|b| matches!(b, b'0' | b'1'))
}

/// callers must have checked `is_key` first
pub(crate) fn pack_key(position_key: &str) -> String {
    debug_assert!(is_key(position_key));
    let mut packed = [0u8; PACKED_LEN];
    for (i, chunk) in position_key.as_bytes().chunks(BYTE_LEN).enumerate() {
        let mut byte = 0u8;
        for (bit, &c) in chunk.iter().enumerate() {
            if c == b'1' {
                byte |= 1 << bit;
            }
        }
        packed[i] = byte;
    }
    let b64 = STANDARD.encode(packed);
    // 10 bytes always frame to 14 characters plus "=="
    b64[..b64.len() - 2].to_string()
}

#[cfg(test)]
mod test_codec {
    use super::*;

    const STARTING_KEY: &str =
        "00000111110011100000111110000000000011000000011111001110000011111000000000001100";
    const STARTING_ID: &str = "4HPwATDgc/ABMA";

    #[test]
    fn test_encode() {
        assert_eq!(encode(STARTING_KEY).unwrap(), STARTING_ID);
    }

    #[test]
    fn test_decode() {
        assert_eq!(decode(STARTING_ID).unwrap(), STARTING_KEY);
    }

    #[test]
    fn test_round_trip() {
        let keys: [&str; 4] = [
            STARTING_KEY,
            &"0".repeat(80),
            &"10".repeat(40),
            &format!("{}{}", "1".repeat(15), "0".repeat(65)),
        ];
        for key in keys {
            let id = encode(key).unwrap();
            assert_eq!(id.len(), 14);
            assert_eq!(decode(&id).unwrap(), *key);
            assert_eq!(encode(&decode(&id).unwrap()).unwrap(), id);
        }
    }

    #[test]
    fn test_decode_padded() {
        let padded = format!("{}==", STARTING_ID);
        assert_eq!(decode(&padded).unwrap(), STARTING_KEY);
    }

    #[test]
    fn test_bad_key_length() {
        assert_eq!(encode(&"0".repeat(79)), Err(PositionError::InvalidKey));
        assert_eq!(encode(&"0".repeat(81)), Err(PositionError::InvalidKey));
        assert_eq!(encode(""), Err(PositionError::InvalidKey));
    }

    #[test]
    fn test_bad_key_charset() {
        let mut key = "0".repeat(80);
        key.replace_range(40..41, "2");
        assert_eq!(encode(&key), Err(PositionError::InvalidKey));
    }

    #[test]
    fn test_bad_identifier() {
        // wrong decoded length
        assert_eq!(decode("AAAA"), Err(PositionError::InvalidIdentifier));
        // not base64 at all
        assert_eq!(decode("!!!!!!!!!!!!!!"), Err(PositionError::InvalidIdentifier));
    }
}
