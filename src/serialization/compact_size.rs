//! Single-byte compact size encoding
//!
//! The legacy wire format prefixes every count and script length with a
//! compact size. Only the single-byte range is supported here:
//! - value <= 0xfc: one byte holding the value
//! - 0xfd, 0xfe, 0xff: markers for 2/4/8-byte encodings, rejected
//!
//! Rejection is a hard failure in both directions; values are never truncated.

use crate::constants::MAX_SINGLE_BYTE_SIZE;
use crate::error::{ConsensusError, Result};

/// Encode a count or length as a single-byte compact size
///
/// # Examples
///
/// ```
/// use p2pkh_consensus::serialization::compact_size::encode_compact_size;
///
/// assert_eq!(encode_compact_size(0).unwrap(), 0);
/// assert_eq!(encode_compact_size(0xfc).unwrap(), 0xfc);
/// assert!(encode_compact_size(0xfd).is_err());
/// ```
pub fn encode_compact_size(value: usize) -> Result<u8> {
    if value > MAX_SINGLE_BYTE_SIZE as usize {
        return Err(ConsensusError::UnsupportedSizeEncoding(value as u64));
    }
    Ok(value as u8)
}

/// Decode a single-byte compact size
///
/// Returns the decoded value; the caller advances its offset by one byte.
///
/// # Examples
///
/// ```
/// use p2pkh_consensus::serialization::compact_size::decode_compact_size;
///
/// assert_eq!(decode_compact_size(&[0x19]), Ok(0x19));
/// assert!(decode_compact_size(&[0xfd, 0x00, 0x01]).is_err());
/// assert!(decode_compact_size(&[]).is_err());
/// ```
pub fn decode_compact_size(data: &[u8]) -> Result<usize> {
    let first_byte = *data.first().ok_or(ConsensusError::TruncatedInput {
        needed: 1,
        remaining: 0,
    })?;

    if first_byte > MAX_SINGLE_BYTE_SIZE {
        return Err(ConsensusError::UnsupportedSizeEncoding(first_byte as u64));
    }
    Ok(first_byte as usize)
}
