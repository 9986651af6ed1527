//! Script opcodes supported by the P2PKH interpreter
//!
//! Byte values follow Bitcoin Core `script/script.h`. Anything outside this
//! set is rejected with `UnsupportedOpcode`.

use crate::error::{ConsensusError, Result};

/// Smallest direct-push opcode: push the next byte
pub const OP_PUSHBYTES_1: u8 = 0x01;

/// Largest direct-push opcode: push the next 75 bytes
pub const OP_PUSHBYTES_75: u8 = 0x4b;

/// OP_DUP - Duplicate top stack item
pub const OP_DUP: u8 = 0x76;

/// OP_EQUALVERIFY - OP_EQUAL followed by OP_VERIFY
pub const OP_EQUALVERIFY: u8 = 0x88;

/// OP_HASH160 - RIPEMD160(SHA256(x))
pub const OP_HASH160: u8 = 0xa9;

/// OP_CHECKSIG - Verify an ECDSA signature over the transaction sighash
pub const OP_CHECKSIG: u8 = 0xac;

/// Decoded opcode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opcode {
    /// Push the next `n` script bytes (1..=75)
    PushBytes(u8),
    Dup,
    EqualVerify,
    Hash160,
    CheckSig,
}

impl Opcode {
    /// Decode a script byte
    pub fn from_byte(byte: u8) -> Result<Self> {
        match byte {
            OP_PUSHBYTES_1..=OP_PUSHBYTES_75 => Ok(Opcode::PushBytes(byte)),
            OP_DUP => Ok(Opcode::Dup),
            OP_EQUALVERIFY => Ok(Opcode::EqualVerify),
            OP_HASH160 => Ok(Opcode::Hash160),
            OP_CHECKSIG => Ok(Opcode::CheckSig),
            other => Err(ConsensusError::UnsupportedOpcode(other)),
        }
    }

    pub fn to_byte(self) -> u8 {
        match self {
            Opcode::PushBytes(n) => n,
            Opcode::Dup => OP_DUP,
            Opcode::EqualVerify => OP_EQUALVERIFY,
            Opcode::Hash160 => OP_HASH160,
            Opcode::CheckSig => OP_CHECKSIG,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Opcode::PushBytes(_) => "OP_PUSHBYTES",
            Opcode::Dup => "OP_DUP",
            Opcode::EqualVerify => "OP_EQUALVERIFY",
            Opcode::Hash160 => "OP_HASH160",
            Opcode::CheckSig => "OP_CHECKSIG",
        }
    }
}
