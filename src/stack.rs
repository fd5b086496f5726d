//! Evaluation stack of byte vectors.
//!
//! The interpreter keeps two of these (main and alt). Offsets into the stack
//! are given from the top as negative numbers, so `top(-1)` is the top
//! element and `top(-2)` the one below it, matching how the opcode set is
//! usually described. Underflow is a typed error; depth limits are the
//! interpreter's job.

use alloc::vec;
use alloc::vec::Vec;

use crate::error::ScriptError;

/// LIFO stack of owned byte vectors.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Stack {
    items: Vec<Vec<u8>>,
}

impl Stack {
    /// An empty stack.
    pub fn new() -> Self {
        Stack { items: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn push(&mut self, item: Vec<u8>) {
        self.items.push(item);
    }

    /// Pushes the canonical boolean encoding: `[1]` for true, empty for false.
    pub fn push_bool(&mut self, value: bool) {
        self.items.push(if value { vec![1] } else { Vec::new() });
    }

    pub fn pop(&mut self) -> Result<Vec<u8>, ScriptError> {
        self.items.pop().ok_or(ScriptError::InvalidStackOperation)
    }

    /// The top element without removing it.
    pub fn last(&self) -> Result<&[u8], ScriptError> {
        self.items
            .last()
            .map(Vec::as_slice)
            .ok_or(ScriptError::InvalidStackOperation)
    }

    /// Element at negative offset `n` from the top (`-1` is the top).
    pub fn top(&self, n: isize) -> Result<&[u8], ScriptError> {
        let idx = self.index_from_top(n)?;
        Ok(self.items[idx].as_slice())
    }

    /// Removes and returns the element at negative offset `n`.
    pub fn remove(&mut self, n: isize) -> Result<Vec<u8>, ScriptError> {
        let idx = self.index_from_top(n)?;
        Ok(self.items.remove(idx))
    }

    /// Inserts `item` so that it ends up at negative offset `n`.
    pub fn insert(&mut self, n: isize, item: Vec<u8>) -> Result<(), ScriptError> {
        debug_assert!(n < 0);
        let depth = n.unsigned_abs();
        if depth == 0 || depth > self.items.len() + 1 {
            return Err(ScriptError::InvalidStackOperation);
        }
        let idx = self.items.len() + 1 - depth;
        self.items.insert(idx, item);
        Ok(())
    }

    /// Swaps the elements at negative offsets `a` and `b`.
    pub fn swap(&mut self, a: isize, b: isize) -> Result<(), ScriptError> {
        let ia = self.index_from_top(a)?;
        let ib = self.index_from_top(b)?;
        self.items.swap(ia, ib);
        Ok(())
    }

    /// The raw items, bottom first. Used by callers inspecting the final
    /// stack and by tests.
    pub fn items(&self) -> &[Vec<u8>] {
        &self.items
    }

    fn index_from_top(&self, n: isize) -> Result<usize, ScriptError> {
        debug_assert!(n < 0);
        let depth = n.unsigned_abs();
        if depth == 0 || depth > self.items.len() {
            return Err(ScriptError::InvalidStackOperation);
        }
        Ok(self.items.len() - depth)
    }
}

impl From<Vec<Vec<u8>>> for Stack {
    fn from(items: Vec<Vec<u8>>) -> Self {
        Stack { items }
    }
}
