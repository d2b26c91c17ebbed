//! Binary State Images
//!
//! Every generator snapshots to a fixed-size sequence of little-endian
//! 64-bit words. Restoring validates the exact byte length before any
//! word is decoded, so a rejected buffer never touches live state.

use thiserror::Error;

/// Errors raised when restoring a generator from a state image.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StateError {
    /// Buffer length differs from the family's fixed image size.
    #[error("{generator}: invalid state length (expected {expected} bytes, got {actual})")]
    InvalidLength {
        /// Generator family name.
        generator: &'static str,
        /// Required byte count.
        expected: usize,
        /// Byte count supplied.
        actual: usize,
    },

    /// Buffered-output cursor lies outside the generator's buffer.
    #[error("{generator}: invalid buffer cursor {counter} (limit {limit})")]
    InvalidCursor {
        /// Generator family name.
        generator: &'static str,
        /// Decoded cursor.
        counter: u64,
        /// Largest valid cursor.
        limit: usize,
    },

    /// A state word lies outside the generator's word domain.
    #[error("{generator}: state word {index} out of range ({value:#x})")]
    InvalidWord {
        /// Generator family name.
        generator: &'static str,
        /// Position of the offending word.
        index: usize,
        /// Decoded word.
        value: u64,
    },
}

/// Reject `data` unless it is exactly `expected` bytes long.
#[inline]
pub fn check_len(generator: &'static str, expected: usize, data: &[u8]) -> Result<(), StateError> {
    if data.len() == expected {
        Ok(())
    } else {
        tracing::warn!(generator, expected, actual = data.len(), "rejected state image");
        Err(StateError::InvalidLength {
            generator,
            expected,
            actual: data.len(),
        })
    }
}

/// Encode words as consecutive little-endian 8-byte groups.
pub fn encode_words(words: &[u64]) -> Vec<u8> {
    let mut buf = Vec::with_capacity(words.len() * 8);
    for word in words {
        buf.extend_from_slice(&word.to_le_bytes());
    }
    buf
}

/// Decode `N` little-endian words from the front of `data`.
///
/// Callers validate the length first; missing bytes decode as zero words.
pub fn decode_words<const N: usize>(data: &[u8]) -> [u64; N] {
    let mut words = [0u64; N];
    for (word, chunk) in words.iter_mut().zip(data.chunks_exact(8)) {
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(chunk);
        *word = u64::from_le_bytes(bytes);
    }
    words
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_is_little_endian() {
        let buf = encode_words(&[0x0102_0304_0506_0708, 1]);
        assert_eq!(buf.len(), 16);
        assert_eq!(&buf[..8], &[8, 7, 6, 5, 4, 3, 2, 1]);
        assert_eq!(&buf[8..], &[1, 0, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_decode_inverts_encode() {
        let words = [u64::MAX, 0, 42, 0x9e37_79b9_7f4a_7c15];
        let decoded: [u64; 4] = decode_words(&encode_words(&words));
        assert_eq!(decoded, words);
    }

    #[test]
    fn test_check_len() {
        assert!(check_len("test", 16, &[0u8; 16]).is_ok());

        let err = check_len("test", 16, &[0u8; 15]).unwrap_err();
        assert_eq!(
            err,
            StateError::InvalidLength {
                generator: "test",
                expected: 16,
                actual: 15
            }
        );
        assert_eq!(
            err.to_string(),
            "test: invalid state length (expected 16 bytes, got 15)"
        );
    }
}
