//! Core transaction types for legacy script validation

use serde::{Deserialize, Serialize};

/// Hash type: 256-bit hash
pub type Hash = [u8; 32];

/// Byte string type
pub type ByteString = Vec<u8>;

/// Reference to an output of a previous transaction
///
/// `hash` is kept in display order, which is the byte-reverse of the wire order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OutPoint {
    pub hash: Hash,
    pub index: u32,
}

/// Transaction input
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionInput {
    pub prevout: OutPoint,
    /// Unlocking script
    pub script_sig: ByteString,
    pub sequence: u32,
}

/// Transaction output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionOutput {
    /// Amount in the smallest currency unit
    pub value: i64,
    /// Locking script
    pub script_pubkey: ByteString,
}

/// Legacy (non-witness) transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub version: i32,
    pub inputs: Vec<TransactionInput>,
    pub outputs: Vec<TransactionOutput>,
    pub lock_time: u32,
}

impl Transaction {
    /// Transaction id in display order: the reversed double hash of the wire encoding
    ///
    /// Fails only when the transaction cannot be encoded (see
    /// [`serialize_transaction`](crate::serialization::serialize_transaction)).
    pub fn txid(&self) -> crate::error::Result<Hash> {
        let bytes = crate::serialization::serialize_transaction(self)?;
        let mut id = crate::crypto::double_hash(&bytes);
        id.reverse();
        Ok(id)
    }
}
