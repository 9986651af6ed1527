//! # p2pkh-consensus
//!
//! Validation of a single legacy transaction input against the
//! pay-to-public-key-hash locking script of the output it spends.
//!
//! The crate is built from three tightly coupled pieces:
//! - a byte-exact codec for the legacy transaction wire format
//!   ([`serialization`])
//! - a minimal stack-based script interpreter ([`script`], [`stack`], [`opcodes`])
//! - legacy sighash construction and secp256k1 ECDSA verification
//!   ([`transaction_hash`], [`signature`])
//!
//! All functions are synchronous and side-effect free apart from `tracing`
//! events. Each validation owns its stack and its sighash transaction copy,
//! so independent inputs can be validated in parallel.
//!
//! ## Usage
//!
//! ```rust
//! use p2pkh_consensus::script::{execute_script, SignatureChecker};
//! use p2pkh_consensus::stack::Stack;
//!
//! struct NoSignatures;
//! impl SignatureChecker for NoSignatures {
//!     fn check_sig(&self, _: &[u8], _: &[u8]) -> p2pkh_consensus::error::Result<bool> {
//!         Ok(false)
//!     }
//! }
//!
//! let mut stack = Stack::with_limit(10);
//! execute_script(&[0x02, 0xaa, 0xbb], &mut stack, &NoSignatures).unwrap();
//! assert_eq!(stack.peek().unwrap(), &[0xaa, 0xbb]);
//! ```

pub mod address;
pub mod config;
pub mod constants;
pub mod crypto;
pub mod error;
pub mod opcodes;
pub mod script;
pub mod serialization;
pub mod signature;
#[cfg(feature = "k256")]
pub mod signature_k256;
pub mod stack;
pub mod transaction;
pub mod transaction_hash;
pub mod types;

pub use error::{ConsensusError, Result};
pub use types::*;

/// Validator facade
///
/// Convenience wrapper exposing the crate's operations as methods. All
/// methods delegate to the corresponding module functions.
#[derive(Debug, Clone, Default)]
pub struct P2pkhValidator {
    config: config::ConsensusConfig,
}

impl P2pkhValidator {
    /// Create a validator using the global configuration
    pub fn new() -> Self {
        Self::with_config(config::get_consensus_config())
    }

    pub fn with_config(config: config::ConsensusConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &config::ConsensusConfig {
        &self.config
    }

    /// Decode a legacy wire-format transaction
    pub fn decode_transaction(&self, raw: &[u8]) -> Result<Transaction> {
        serialization::deserialize_transaction(raw)
    }

    /// Encode a transaction to the legacy wire format
    pub fn encode_transaction(&self, tx: &Transaction) -> Result<Vec<u8>> {
        serialization::serialize_transaction(tx)
    }

    /// Validate input `input_index` of `tx_new` against the output of `tx_prev` it spends
    pub fn validate_input(
        &self,
        tx_new: &Transaction,
        tx_prev: &Transaction,
        input_index: usize,
    ) -> Result<()> {
        transaction::validate_input_with_config(tx_new, tx_prev, input_index, &self.config)
    }

    /// Decode both raw transactions, then validate one input
    pub fn validate_raw_input(&self, new_raw: &[u8], prev_raw: &[u8], input_index: usize) -> Result<()> {
        let tx_new = self.decode_transaction(new_raw)?;
        let tx_prev = self.decode_transaction(prev_raw)?;
        self.validate_input(&tx_new, &tx_prev, input_index)
    }

    /// Evaluate `script_sig || script_pubkey` with a caller-supplied signature checker
    pub fn verify_script<C: script::SignatureChecker + ?Sized>(
        &self,
        script_sig: &[u8],
        script_pubkey: &[u8],
        checker: &C,
    ) -> Result<()> {
        script::verify_script_with_config(script_sig, script_pubkey, checker, &self.config)
    }

    /// Legacy SIGHASH_ALL digest for one input
    pub fn sighash(&self, tx: &Transaction, input_index: usize, subscript: &[u8]) -> Result<Hash> {
        transaction_hash::calculate_transaction_sighash(
            tx,
            input_index,
            subscript,
            transaction_hash::SighashType::All,
        )
    }
}
