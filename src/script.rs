//! Script execution engine
//!
//! Single left-to-right pass over a script with an explicit instruction
//! pointer. The supported opcode set is the one needed for P2PKH:
//! direct pushes, OP_DUP, OP_EQUALVERIFY, OP_HASH160 and OP_CHECKSIG.
//! Signature checks are delegated through [`SignatureChecker`].

use crate::config::ConsensusConfig;
use crate::crypto::short_hash;
use crate::error::{ConsensusError, Result};
use crate::opcodes::Opcode;
use crate::stack::Stack;
use tracing::trace;

/// Verifier invoked by OP_CHECKSIG
pub trait SignatureChecker {
    /// Check `signature` (with trailing sighash byte) against `pubkey`
    ///
    /// `Ok(false)` means a well-formed but invalid signature; errors abort the script.
    fn check_sig(&self, signature: &[u8], pubkey: &[u8]) -> Result<bool>;
}

/// Run every opcode of `script` against `stack`
///
/// Does not apply the final stack check; see [`eval_script`].
pub fn execute_script<C: SignatureChecker + ?Sized>(
    script: &[u8],
    stack: &mut Stack,
    checker: &C,
) -> Result<()> {
    let mut pc = 0;

    while pc < script.len() {
        let opcode = Opcode::from_byte(script[pc])?;
        pc += 1;
        trace!(pc, opcode = opcode.name(), depth = stack.len(), "executing opcode");

        match opcode {
            Opcode::PushBytes(n) => {
                let n = n as usize;
                let data = script
                    .get(pc..pc + n)
                    .ok_or(ConsensusError::TruncatedInput {
                        needed: n,
                        remaining: script.len() - pc,
                    })?;
                stack.push(data.to_vec())?;
                pc += n;
            }
            Opcode::Dup => {
                let top = stack.peek()?.to_vec();
                stack.push(top)?;
            }
            Opcode::EqualVerify => {
                let a = stack.pop()?;
                let b = stack.pop()?;
                if a != b {
                    return Err(ConsensusError::ScriptValidationFailed(
                        "OP_EQUALVERIFY: stack items differ".into(),
                    ));
                }
            }
            Opcode::Hash160 => {
                let item = stack.pop()?;
                stack.push(short_hash(&item).to_vec())?;
            }
            Opcode::CheckSig => {
                let pubkey = stack.pop()?;
                let signature = stack.pop()?;
                let valid = checker.check_sig(&signature, &pubkey)?;
                stack.push(vec![valid as u8])?;
            }
        }
    }

    Ok(())
}

/// Final stack check
///
/// An empty stack passes. Otherwise the top item is popped and must be
/// non-empty with a non-zero first byte.
pub fn check_final_stack(stack: &mut Stack) -> Result<()> {
    if stack.is_empty() {
        return Ok(());
    }
    let top = stack.pop()?;
    match top.first() {
        Some(&b) if b != 0 => Ok(()),
        _ => Err(ConsensusError::ScriptValidationFailed(
            "final stack top is false".into(),
        )),
    }
}

/// Execute `script` and apply the final stack check
pub fn eval_script<C: SignatureChecker + ?Sized>(
    script: &[u8],
    stack: &mut Stack,
    checker: &C,
) -> Result<()> {
    execute_script(script, stack, checker)?;
    check_final_stack(stack)
}

/// Evaluate `script_sig || script_pubkey` on a fresh stack sized from the global config
pub fn verify_script<C: SignatureChecker + ?Sized>(
    script_sig: &[u8],
    script_pubkey: &[u8],
    checker: &C,
) -> Result<()> {
    let mut stack = Stack::new();
    verify_script_on_stack(script_sig, script_pubkey, &mut stack, checker)
}

/// Evaluate `script_sig || script_pubkey` with an explicit configuration
pub fn verify_script_with_config<C: SignatureChecker + ?Sized>(
    script_sig: &[u8],
    script_pubkey: &[u8],
    checker: &C,
    config: &ConsensusConfig,
) -> Result<()> {
    let mut stack = Stack::with_limit(config.script.max_stack_size);
    verify_script_on_stack(script_sig, script_pubkey, &mut stack, checker)
}

fn verify_script_on_stack<C: SignatureChecker + ?Sized>(
    script_sig: &[u8],
    script_pubkey: &[u8],
    stack: &mut Stack,
    checker: &C,
) -> Result<()> {
    let mut script = Vec::with_capacity(script_sig.len() + script_pubkey.len());
    script.extend_from_slice(script_sig);
    script.extend_from_slice(script_pubkey);
    eval_script(&script, stack, checker)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::MAX_STACK_SIZE;
    use crate::opcodes::*;

    /// Accepts or rejects every signature, recording nothing
    struct FixedChecker(bool);

    impl SignatureChecker for FixedChecker {
        fn check_sig(&self, _signature: &[u8], _pubkey: &[u8]) -> Result<bool> {
            Ok(self.0)
        }
    }

    /// Accepts only when the pubkey item equals the expected bytes
    struct PubkeyChecker(Vec<u8>);

    impl SignatureChecker for PubkeyChecker {
        fn check_sig(&self, _signature: &[u8], pubkey: &[u8]) -> Result<bool> {
            Ok(pubkey == self.0.as_slice())
        }
    }

    fn new_stack() -> Stack {
        Stack::with_limit(MAX_STACK_SIZE)
    }

    #[test]
    fn test_push_n() {
        let mut stack = new_stack();
        execute_script(&[0x02, 0xaa, 0xbb], &mut stack, &FixedChecker(true)).unwrap();
        assert_eq!(stack.len(), 1);
        assert_eq!(stack.peek().unwrap(), &[0xaa, 0xbb]);
    }

    #[test]
    fn test_push_75_bytes() {
        let mut script = vec![OP_PUSHBYTES_75];
        script.extend(std::iter::repeat(0x5a).take(75));
        let mut stack = new_stack();
        execute_script(&script, &mut stack, &FixedChecker(true)).unwrap();
        assert_eq!(stack.peek().unwrap().len(), 75);
    }

    #[test]
    fn test_push_truncated() {
        let mut stack = new_stack();
        assert_eq!(
            execute_script(&[0x03, 0xaa], &mut stack, &FixedChecker(true)),
            Err(ConsensusError::TruncatedInput {
                needed: 3,
                remaining: 1
            })
        );
    }

    #[test]
    fn test_op_dup() {
        let mut stack = new_stack();
        execute_script(&[0x01, 0x07, OP_DUP], &mut stack, &FixedChecker(true)).unwrap();
        assert_eq!(stack.len(), 2);
        assert_eq!(stack.pop().unwrap(), vec![0x07]);
        assert_eq!(stack.pop().unwrap(), vec![0x07]);
    }

    #[test]
    fn test_op_dup_empty_stack() {
        let mut stack = new_stack();
        assert_eq!(
            execute_script(&[OP_DUP], &mut stack, &FixedChecker(true)),
            Err(ConsensusError::StackUnderflow)
        );
    }

    #[test]
    fn test_op_equalverify_equal() {
        let mut stack = new_stack();
        stack.push(vec![0x09]).unwrap();
        execute_script(&[0x01, 0x05, 0x01, 0x05, OP_EQUALVERIFY], &mut stack, &FixedChecker(true))
            .unwrap();
        assert_eq!(stack.len(), 1);
        assert_eq!(stack.peek().unwrap(), &[0x09]);
    }

    #[test]
    fn test_op_equalverify_unequal() {
        let mut stack = new_stack();
        let result = execute_script(
            &[0x01, 0x05, 0x01, 0x06, OP_EQUALVERIFY],
            &mut stack,
            &FixedChecker(true),
        );
        assert!(matches!(
            result,
            Err(ConsensusError::ScriptValidationFailed(_))
        ));
    }

    #[test]
    fn test_op_equalverify_single_item() {
        let mut stack = new_stack();
        assert_eq!(
            execute_script(&[0x01, 0x05, OP_EQUALVERIFY], &mut stack, &FixedChecker(true)),
            Err(ConsensusError::StackUnderflow)
        );
    }

    #[test]
    fn test_op_hash160() {
        let mut stack = new_stack();
        execute_script(&[0x03, b'a', b'b', b'c', OP_HASH160], &mut stack, &FixedChecker(true))
            .unwrap();
        assert_eq!(
            hex::encode(stack.peek().unwrap()),
            "bb1be98c142444d7a56aa3981c3942a978e4dc33"
        );
    }

    #[test]
    fn test_op_checksig_pushes_result() {
        let script = [0x01, 0x30, 0x01, 0x04, OP_CHECKSIG];

        let mut stack = new_stack();
        execute_script(&script, &mut stack, &FixedChecker(true)).unwrap();
        assert_eq!(stack.pop().unwrap(), vec![1]);
        assert!(stack.is_empty());

        let mut stack = new_stack();
        execute_script(&script, &mut stack, &FixedChecker(false)).unwrap();
        assert_eq!(stack.pop().unwrap(), vec![0]);
    }

    #[test]
    fn test_op_checksig_pops_pubkey_first() {
        // signature pushed first, public key on top
        let script = [0x01, 0xaa, 0x01, 0xbb, OP_CHECKSIG];
        let mut stack = new_stack();
        execute_script(&script, &mut stack, &PubkeyChecker(vec![0xbb])).unwrap();
        assert_eq!(stack.pop().unwrap(), vec![1]);
    }

    #[test]
    fn test_op_checksig_error_aborts() {
        struct FailingChecker;
        impl SignatureChecker for FailingChecker {
            fn check_sig(&self, _: &[u8], _: &[u8]) -> Result<bool> {
                Err(ConsensusError::UnsupportedSighashType(0x03))
            }
        }
        let mut stack = new_stack();
        assert_eq!(
            execute_script(&[0x01, 0xaa, 0x01, 0xbb, OP_CHECKSIG], &mut stack, &FailingChecker),
            Err(ConsensusError::UnsupportedSighashType(0x03))
        );
    }

    #[test]
    fn test_unsupported_opcode() {
        let mut stack = new_stack();
        assert_eq!(
            execute_script(&[0xff], &mut stack, &FixedChecker(true)),
            Err(ConsensusError::UnsupportedOpcode(0xff))
        );

        let mut stack = new_stack();
        stack.push(vec![1]).unwrap();
        assert_eq!(
            eval_script(&[0x01, 0x01, 0xff], &mut stack, &FixedChecker(true)),
            Err(ConsensusError::UnsupportedOpcode(0xff))
        );
    }

    #[test]
    fn test_stack_overflow() {
        let script: Vec<u8> = std::iter::repeat([0x01, 0x01])
            .take(MAX_STACK_SIZE + 1)
            .flatten()
            .collect();
        let mut stack = new_stack();
        assert_eq!(
            execute_script(&script, &mut stack, &FixedChecker(true)),
            Err(ConsensusError::StackOverflow(MAX_STACK_SIZE))
        );
    }

    #[test]
    fn test_final_stack_empty_passes() {
        let mut stack = new_stack();
        assert!(eval_script(&[], &mut stack, &FixedChecker(true)).is_ok());
    }

    #[test]
    fn test_final_stack_checks_only_top() {
        let mut stack = new_stack();
        // bottom item is zero, top is non-zero
        assert!(eval_script(&[0x01, 0x00, 0x01, 0x01], &mut stack, &FixedChecker(true)).is_ok());
        assert_eq!(stack.len(), 1);
    }

    #[test]
    fn test_final_stack_zero_top_fails() {
        let mut stack = new_stack();
        assert!(matches!(
            eval_script(&[0x02, 0x00, 0x01], &mut stack, &FixedChecker(true)),
            Err(ConsensusError::ScriptValidationFailed(_))
        ));
    }

    #[test]
    fn test_final_stack_empty_item_fails() {
        let mut stack = new_stack();
        stack.push(vec![]).unwrap();
        assert!(matches!(
            check_final_stack(&mut stack),
            Err(ConsensusError::ScriptValidationFailed(_))
        ));
    }

    #[test]
    fn test_verify_script_concatenates() {
        let pubkey = vec![0x02; 33];
        let pubkey_hash = short_hash(&pubkey);

        let mut script_sig = vec![0x01, 0x30, 33];
        script_sig.extend_from_slice(&pubkey);

        let mut script_pubkey = vec![OP_DUP, OP_HASH160, 20];
        script_pubkey.extend_from_slice(&pubkey_hash);
        script_pubkey.extend_from_slice(&[OP_EQUALVERIFY, OP_CHECKSIG]);

        assert!(verify_script(&script_sig, &script_pubkey, &FixedChecker(true)).is_ok());
        assert!(matches!(
            verify_script(&script_sig, &script_pubkey, &FixedChecker(false)),
            Err(ConsensusError::ScriptValidationFailed(_))
        ));
    }

    #[test]
    fn test_verify_script_with_config_limit() {
        let mut config = ConsensusConfig::default();
        config.script.max_stack_size = 1;
        assert_eq!(
            verify_script_with_config(&[0x01, 0x01], &[0x01, 0x01], &FixedChecker(true), &config),
            Err(ConsensusError::StackOverflow(1))
        );
    }
}
