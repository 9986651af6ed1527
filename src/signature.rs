//! Signature parsing and ECDSA verification for OP_CHECKSIG
//!
//! Signatures are read with a fixed-offset layout rather than a general DER
//! parser:
//!
//! ```text
//! [0] header  [1] total length  [2] r marker  [3] r length  r bytes
//! [..] s marker  [..] s length  s bytes  [last] sighash type
//! ```
//!
//! Only the lengths are honoured; the header and marker bytes are skipped.
//! Parsing is kept separate from verification so a strict DER parser can be
//! swapped in without touching the checker.

use crate::error::{ConsensusError, Result};
use crate::transaction_hash::SighashType;
use crate::types::Hash;
use secp256k1::{ecdsa::Signature, Message, PublicKey, Secp256k1, VerifyOnly};

thread_local! {
    static SECP256K1_CONTEXT: Secp256k1<VerifyOnly> = Secp256k1::verification_only();
}

/// Offset of the r-component length byte
const R_LENGTH_OFFSET: usize = 3;

/// Components extracted from a script signature
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EcdsaSignatureParts {
    /// Big-endian r, as encoded (may carry a leading zero)
    pub r: Vec<u8>,
    /// Big-endian s, as encoded (may carry a leading zero)
    pub s: Vec<u8>,
    pub sighash_type: SighashType,
}

impl EcdsaSignatureParts {
    /// 64-byte `r || s` form, or `None` if a component does not fit in 32 bytes
    pub fn to_compact(&self) -> Option<[u8; 64]> {
        let r = scalar_bytes(&self.r)?;
        let s = scalar_bytes(&self.s)?;
        let mut compact = [0u8; 64];
        compact[..32].copy_from_slice(&r);
        compact[32..].copy_from_slice(&s);
        Some(compact)
    }
}

/// Strip leading zeros and left-pad to 32 bytes
fn scalar_bytes(component: &[u8]) -> Option<[u8; 32]> {
    let first_nonzero = component
        .iter()
        .position(|&b| b != 0)
        .unwrap_or(component.len());
    let trimmed = &component[first_nonzero..];
    if trimmed.len() > 32 {
        return None;
    }
    let mut out = [0u8; 32];
    out[32 - trimmed.len()..].copy_from_slice(trimmed);
    Some(out)
}

#[inline]
fn byte_at(data: &[u8], offset: usize) -> Result<u8> {
    data.get(offset).copied().ok_or(ConsensusError::TruncatedInput {
        needed: offset + 1,
        remaining: data.len(),
    })
}

#[inline]
fn slice_at(data: &[u8], offset: usize, len: usize) -> Result<&[u8]> {
    data.get(offset..offset + len)
        .ok_or(ConsensusError::TruncatedInput {
            needed: offset + len,
            remaining: data.len(),
        })
}

/// Split a script signature into r, s and its sighash type
///
/// # Errors
///
/// - `TruncatedInput` if a length byte points past the end of the signature
/// - `UnsupportedSighashType` if the trailing byte is not SIGHASH_ALL
pub fn parse_signature(signature: &[u8]) -> Result<EcdsaSignatureParts> {
    let mut index = R_LENGTH_OFFSET;

    let r_length = byte_at(signature, index)? as usize;
    index += 1;
    let r = slice_at(signature, index, r_length)?.to_vec();
    // skip the s marker
    index += r_length + 1;

    let s_length = byte_at(signature, index)? as usize;
    index += 1;
    let s = slice_at(signature, index, s_length)?.to_vec();
    index += s_length;

    let sighash_type = SighashType::from_byte(byte_at(signature, index)?)?;

    Ok(EcdsaSignatureParts { r, s, sighash_type })
}

/// Verify an ECDSA signature over `sighash` with a SEC1-encoded public key
///
/// Returns `false` for unparseable keys, out-of-range components or a bad
/// signature. High-S signatures are accepted.
pub fn verify_ecdsa(pubkey_bytes: &[u8], parts: &EcdsaSignatureParts, sighash: &Hash) -> bool {
    let compact = match parts.to_compact() {
        Some(compact) => compact,
        None => return false,
    };

    #[cfg(feature = "k256")]
    {
        crate::signature_k256::verify_signature_k256(pubkey_bytes, &compact, sighash)
    }

    #[cfg(not(feature = "k256"))]
    {
        verify_signature_secp256k1(pubkey_bytes, &compact, sighash)
    }
}

#[cfg_attr(feature = "k256", allow(dead_code))]
fn verify_signature_secp256k1(pubkey_bytes: &[u8], compact: &[u8; 64], sighash: &Hash) -> bool {
    let pubkey = match PublicKey::from_slice(pubkey_bytes) {
        Ok(pk) => pk,
        Err(_) => return false,
    };

    let mut signature = match Signature::from_compact(compact) {
        Ok(sig) => sig,
        Err(_) => return false,
    };
    // libsecp256k1 only verifies low-S signatures
    signature.normalize_s();

    let message = match Message::from_digest_slice(sighash) {
        Ok(msg) => msg,
        Err(_) => return false,
    };

    SECP256K1_CONTEXT.with(|secp| secp.verify_ecdsa(&message, &signature, &pubkey).is_ok())
}
