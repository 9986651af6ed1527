//! Error types for legacy transaction validation

use std::borrow::Cow;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum ConsensusError {
    /// Count or length prefix outside the single-byte compact-size range
    #[error("Unsupported size encoding: {0:#x} exceeds single-byte compact size")]
    UnsupportedSizeEncoding(u64),

    #[error("Truncated input: needed {needed} bytes, {remaining} remaining")]
    TruncatedInput { needed: usize, remaining: usize },

    #[error("Stack underflow")]
    StackUnderflow,

    #[error("Stack overflow: capacity of {0} items exceeded")]
    StackOverflow(usize),

    #[error("Unsupported opcode: {0:#04x}")]
    UnsupportedOpcode(u8),

    #[error("Unsupported sighash type: {0:#04x} (only SIGHASH_ALL is supported)")]
    UnsupportedSighashType(u8),

    #[error("Script validation failed: {0}")]
    ScriptValidationFailed(Cow<'static, str>),

    #[error("Invalid input index: {0}")]
    InvalidInputIndex(usize),

    #[error("Invalid output index: {0}")]
    InvalidOutputIndex(u32),

    #[error("Previous output hash does not match the supplied transaction")]
    PrevoutMismatch,

    #[error("Invalid address: {0}")]
    InvalidAddress(Cow<'static, str>),

    #[error("Serialization error: {0}")]
    Serialization(Cow<'static, str>),
}

pub type Result<T> = std::result::Result<T, ConsensusError>;
