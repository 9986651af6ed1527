//! Transaction input validation
//!
//! Ties the codec, interpreter and verifier together: an input of a new
//! transaction is validated by running its unlocking script followed by the
//! locking script of the output it spends.

use crate::config::{get_consensus_config, ConsensusConfig};
use crate::error::{ConsensusError, Result};
use crate::script::{verify_script_with_config, SignatureChecker};
use crate::serialization::deserialize_transaction_hex;
use crate::signature::{parse_signature, verify_ecdsa};
use crate::transaction_hash::calculate_transaction_sighash;
use crate::types::*;
use tracing::{debug, warn};

/// OP_CHECKSIG verifier bound to one input of a transaction
#[derive(Debug, Clone, Copy)]
pub struct TransactionSignatureChecker<'a> {
    tx: &'a Transaction,
    input_index: usize,
    subscript: &'a [u8],
}

impl<'a> TransactionSignatureChecker<'a> {
    /// `subscript` is the locking script of the output being spent
    pub fn new(tx: &'a Transaction, input_index: usize, subscript: &'a [u8]) -> Self {
        Self {
            tx,
            input_index,
            subscript,
        }
    }
}

impl SignatureChecker for TransactionSignatureChecker<'_> {
    fn check_sig(&self, signature: &[u8], pubkey: &[u8]) -> Result<bool> {
        let parts = parse_signature(signature)?;
        let sighash =
            calculate_transaction_sighash(self.tx, self.input_index, self.subscript, parts.sighash_type)?;
        let valid = verify_ecdsa(pubkey, &parts, &sighash);
        debug!(input_index = self.input_index, valid, "OP_CHECKSIG");
        Ok(valid)
    }
}

/// Validate input `input_index` of `tx_new` against the output of `tx_prev` it spends
///
/// Uses the global configuration (see [`get_consensus_config`]).
pub fn validate_input(tx_new: &Transaction, tx_prev: &Transaction, input_index: usize) -> Result<()> {
    validate_input_with_config(tx_new, tx_prev, input_index, &get_consensus_config())
}

/// Validate one input with an explicit configuration
pub fn validate_input_with_config(
    tx_new: &Transaction,
    tx_prev: &Transaction,
    input_index: usize,
    config: &ConsensusConfig,
) -> Result<()> {
    let result = check_input_script(tx_new, tx_prev, input_index, config);
    if let Err(ref err) = result {
        if config.debug.log_rejections {
            warn!(input_index, error = %err, "input rejected");
        }
    }
    result
}

fn check_input_script(
    tx_new: &Transaction,
    tx_prev: &Transaction,
    input_index: usize,
    config: &ConsensusConfig,
) -> Result<()> {
    let input = tx_new
        .inputs
        .get(input_index)
        .ok_or(ConsensusError::InvalidInputIndex(input_index))?;

    if config.validation.check_prevout_txid && input.prevout.hash != tx_prev.txid()? {
        return Err(ConsensusError::PrevoutMismatch);
    }

    let spent_output = tx_prev
        .outputs
        .get(input.prevout.index as usize)
        .ok_or(ConsensusError::InvalidOutputIndex(input.prevout.index))?;

    let checker = TransactionSignatureChecker::new(tx_new, input_index, &spent_output.script_pubkey);
    verify_script_with_config(&input.script_sig, &spent_output.script_pubkey, &checker, config)?;

    debug!(input_index, "input validated");
    Ok(())
}

/// Decode both transactions from hex, then [`validate_input`]
pub fn validate_input_hex(new_tx_hex: &str, prev_tx_hex: &str, input_index: usize) -> Result<()> {
    let tx_new = deserialize_transaction_hex(new_tx_hex)?;
    let tx_prev = deserialize_transaction_hex(prev_tx_hex)?;
    validate_input(&tx_new, &tx_prev, input_index)
}
