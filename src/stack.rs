//! Bounded script stack
//!
//! Working memory of the script interpreter. Backed by a growable `Vec` with
//! an explicit item limit; exceeding it is `StackOverflow`, popping or peeking
//! an empty stack is `StackUnderflow`.

use crate::config::get_consensus_config;
use crate::error::{ConsensusError, Result};
use crate::types::ByteString;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stack {
    items: Vec<ByteString>,
    limit: usize,
}

impl Stack {
    /// Create an empty stack using the configured item limit
    pub fn new() -> Self {
        Self::with_limit(get_consensus_config().script.max_stack_size)
    }

    /// Create an empty stack holding at most `limit` items
    pub fn with_limit(limit: usize) -> Self {
        Self {
            items: Vec::with_capacity(limit.min(32)),
            limit,
        }
    }

    pub fn push(&mut self, value: ByteString) -> Result<()> {
        if self.items.len() >= self.limit {
            return Err(ConsensusError::StackOverflow(self.limit));
        }
        self.items.push(value);
        Ok(())
    }

    pub fn pop(&mut self) -> Result<ByteString> {
        self.items.pop().ok_or(ConsensusError::StackUnderflow)
    }

    /// Borrow the top item without removing it
    pub fn peek(&self) -> Result<&[u8]> {
        self.items
            .last()
            .map(Vec::as_slice)
            .ok_or(ConsensusError::StackUnderflow)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Items from bottom to top
    pub fn iter(&self) -> impl Iterator<Item = &ByteString> {
        self.items.iter()
    }
}

impl Default for Stack {
    fn default() -> Self {
        Self::new()
    }
}
