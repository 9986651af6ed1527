//! Transaction wire format serialization/deserialization
//!
//! Legacy (pre-SegWit) layout, single-byte compact sizes only.

use super::compact_size::{decode_compact_size, encode_compact_size};
use crate::constants::HASH_SIZE;
use crate::error::{ConsensusError, Result};
use crate::types::*;
use std::borrow::Cow;

/// Borrow `len` bytes starting at `offset`, or report how many were missing
#[inline]
fn read_bytes(data: &[u8], offset: usize, len: usize) -> Result<&[u8]> {
    let remaining = data.len().saturating_sub(offset);
    if remaining < len {
        return Err(ConsensusError::TruncatedInput {
            needed: len,
            remaining,
        });
    }
    Ok(&data[offset..offset + len])
}

#[inline]
fn read_array<const N: usize>(data: &[u8], offset: usize) -> Result<[u8; N]> {
    let mut out = [0u8; N];
    out.copy_from_slice(read_bytes(data, offset, N)?);
    Ok(out)
}

/// Serialize a transaction to the legacy wire format
///
/// Format:
/// - Version (4 bytes, little-endian, signed)
/// - Input count (1 byte, <= 0xfc)
/// - For each input:
///   - Previous output hash (32 bytes, reverse of display order)
///   - Previous output index (4 bytes, little-endian)
///   - Script length (1 byte, <= 0xfc)
///   - Script bytes
///   - Sequence (4 bytes, little-endian)
/// - Output count (1 byte, <= 0xfc)
/// - For each output:
///   - Value (8 bytes, little-endian, signed)
///   - Script length (1 byte, <= 0xfc)
///   - Script bytes
/// - Lock time (4 bytes, little-endian)
///
/// # Errors
///
/// `UnsupportedSizeEncoding` if any count or script length needs more than one byte.
pub fn serialize_transaction(tx: &Transaction) -> Result<Vec<u8>> {
    let estimated_size = 4
        + 1
        + tx.inputs.iter().map(|i| 41 + i.script_sig.len()).sum::<usize>()
        + 1
        + tx.outputs.iter().map(|o| 9 + o.script_pubkey.len()).sum::<usize>()
        + 4;
    let mut result = Vec::with_capacity(estimated_size);

    result.extend_from_slice(&tx.version.to_le_bytes());

    result.push(encode_compact_size(tx.inputs.len())?);

    for input in &tx.inputs {
        result.extend(input.prevout.hash.iter().rev());
        result.extend_from_slice(&input.prevout.index.to_le_bytes());
        result.push(encode_compact_size(input.script_sig.len())?);
        result.extend_from_slice(&input.script_sig);
        result.extend_from_slice(&input.sequence.to_le_bytes());
    }

    result.push(encode_compact_size(tx.outputs.len())?);

    for output in &tx.outputs {
        result.extend_from_slice(&output.value.to_le_bytes());
        result.push(encode_compact_size(output.script_pubkey.len())?);
        result.extend_from_slice(&output.script_pubkey);
    }

    result.extend_from_slice(&tx.lock_time.to_le_bytes());

    Ok(result)
}

/// Deserialize a transaction from the legacy wire format
///
/// Bytes following the lock time are ignored.
///
/// # Errors
///
/// - `TruncatedInput` when a field runs past the end of `data`
/// - `UnsupportedSizeEncoding` when a count or script length prefix is above 0xfc
pub fn deserialize_transaction(data: &[u8]) -> Result<Transaction> {
    let mut offset = 0;

    let version = i32::from_le_bytes(read_array(data, offset)?);
    offset += 4;

    let input_count = decode_compact_size(read_bytes(data, offset, 1)?)?;
    offset += 1;

    let mut inputs = Vec::with_capacity(input_count);
    for _ in 0..input_count {
        let mut hash: Hash = read_array::<HASH_SIZE>(data, offset)?;
        hash.reverse();
        offset += HASH_SIZE;

        let index = u32::from_le_bytes(read_array(data, offset)?);
        offset += 4;

        let script_len = decode_compact_size(read_bytes(data, offset, 1)?)?;
        offset += 1;

        let script_sig = read_bytes(data, offset, script_len)?.to_vec();
        offset += script_len;

        let sequence = u32::from_le_bytes(read_array(data, offset)?);
        offset += 4;

        inputs.push(TransactionInput {
            prevout: OutPoint { hash, index },
            script_sig,
            sequence,
        });
    }

    let output_count = decode_compact_size(read_bytes(data, offset, 1)?)?;
    offset += 1;

    let mut outputs = Vec::with_capacity(output_count);
    for _ in 0..output_count {
        let value = i64::from_le_bytes(read_array(data, offset)?);
        offset += 8;

        let script_len = decode_compact_size(read_bytes(data, offset, 1)?)?;
        offset += 1;

        let script_pubkey = read_bytes(data, offset, script_len)?.to_vec();
        offset += script_len;

        outputs.push(TransactionOutput {
            value,
            script_pubkey,
        });
    }

    let lock_time = u32::from_le_bytes(read_array(data, offset)?);

    Ok(Transaction {
        version,
        inputs,
        outputs,
        lock_time,
    })
}

/// Deserialize a transaction given as a hex string
pub fn deserialize_transaction_hex(hex_str: &str) -> Result<Transaction> {
    let raw = hex::decode(hex_str.trim())
        .map_err(|e| ConsensusError::Serialization(Cow::Owned(format!("invalid hex: {e}"))))?;
    deserialize_transaction(&raw)
}
