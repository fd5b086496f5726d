//! Script container, opcode cursor, and builder.
//!
//! A [`Script`] is an immutable byte sequence. Decoding walks it one
//! operation at a time: an operation is an opcode byte plus, for pushes, a
//! length prefix and the pushed bytes. The decoder is strict about
//! truncation so that malformed scripts fail the same way everywhere.

use alloc::vec::Vec;

use crate::error::ScriptError;
use crate::interpreter::Hasher;
use crate::num::ScriptNum;
use crate::opcodes::*;

/// Hard cap on the byte length of an evaluated script.
pub const MAX_SCRIPT_SIZE: usize = 10_000;
/// Hard cap on the byte length of a single pushed element.
pub const MAX_SCRIPT_ELEMENT_SIZE: usize = 520;

/// An immutable script.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Script(Vec<u8>);

/// One decoded operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedOp<'a> {
    /// The opcode byte.
    pub opcode: u8,
    /// Bytes pushed by this operation; empty for non-push opcodes.
    pub data: &'a [u8],
    /// Offset of the next operation.
    pub next: usize,
}

impl Script {
    pub fn new() -> Self {
        Script(Vec::new())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Decodes the operation starting at byte offset `pos`.
    ///
    /// Truncated length prefixes and push bodies are `BadOpcode`; a push
    /// longer than [`MAX_SCRIPT_ELEMENT_SIZE`] is `PushSize`.
    pub fn decode_at(&self, pos: usize) -> Result<ParsedOp<'_>, ScriptError> {
        let bytes = &self.0;
        let opcode = *bytes.get(pos).ok_or(ScriptError::BadOpcode)?;

        if opcode > OP_PUSHDATA4 {
            return Ok(ParsedOp {
                opcode,
                data: &[],
                next: pos + 1,
            });
        }

        let (len, data_start) = match opcode {
            OP_PUSHDATA1 => {
                let &n = bytes.get(pos + 1).ok_or(ScriptError::BadOpcode)?;
                (n as usize, pos + 2)
            }
            OP_PUSHDATA2 => {
                let prefix = bytes.get(pos + 1..pos + 3).ok_or(ScriptError::BadOpcode)?;
                (u16::from_le_bytes([prefix[0], prefix[1]]) as usize, pos + 3)
            }
            OP_PUSHDATA4 => {
                let prefix = bytes.get(pos + 1..pos + 5).ok_or(ScriptError::BadOpcode)?;
                (
                    u32::from_le_bytes([prefix[0], prefix[1], prefix[2], prefix[3]]) as usize,
                    pos + 5,
                )
            }
            direct => (direct as usize, pos + 1),
        };

        if len > MAX_SCRIPT_ELEMENT_SIZE {
            return Err(ScriptError::PushSize);
        }
        let data = bytes
            .get(data_start..data_start + len)
            .ok_or(ScriptError::BadOpcode)?;
        Ok(ParsedOp {
            opcode,
            data,
            next: data_start + len,
        })
    }

    /// Iterator over decoded operations. Yields the decode error once and
    /// then stops.
    pub fn ops(&self) -> Ops<'_> {
        Ops {
            script: self,
            pos: 0,
            done: false,
        }
    }

    /// `HASH160 <20 bytes> EQUAL`, pay-to-script-hash.
    pub fn is_p2sh(&self) -> bool {
        self.0.len() == 23
            && self.0[0] == OP_HASH160
            && self.0[1] == 0x14
            && self.0[22] == OP_EQUAL
    }

    /// `OP_0 <32 bytes>`, pay-to-witness-script-hash.
    pub fn is_p2wsh(&self) -> bool {
        self.0.len() == 34 && self.0[0] == OP_0 && self.0[1] == 0x20
    }

    /// Decodes a witness program commitment: a version opcode (OP_0 or
    /// OP_1..OP_16) followed by a single direct push of the 2–40 byte
    /// program, with nothing after it.
    pub fn witness_program(&self) -> Option<(u8, &[u8])> {
        if self.0.len() < 4 || self.0.len() > 42 {
            return None;
        }
        let version_op = self.0[0];
        if version_op != OP_0 && !(OP_1..=OP_16).contains(&version_op) {
            return None;
        }
        if self.0[1] as usize != self.0.len() - 2 {
            return None;
        }
        Some((decode_op_n(version_op) as u8, &self.0[2..]))
    }

    /// True when every operation only pushes data (constant opcodes up to
    /// OP_16 count as pushes).
    pub fn is_push_only(&self) -> bool {
        for op in self.ops() {
            match op {
                Ok(op) if op.opcode <= OP_16 => {}
                _ => return false,
            }
        }
        true
    }

    /// True when the script decodes cleanly and contains no opcode above the
    /// defined range. Disabled opcodes still count as valid here; they fail
    /// at evaluation time.
    pub fn has_valid_ops(&self) -> bool {
        for op in self.ops() {
            match op {
                Ok(op) if op.opcode <= MAX_OPCODE => {}
                _ => return false,
            }
        }
        true
    }

    /// True for outputs that can never be spent: a leading OP_RETURN or a
    /// script over the evaluation size cap.
    pub fn is_unspendable(&self) -> bool {
        (!self.0.is_empty() && self.0[0] == OP_RETURN) || self.0.len() > MAX_SCRIPT_SIZE
    }

    /// Builds the pay-to-script-hash output committing to this script.
    ///
    /// A redeem script over [`MAX_SCRIPT_ELEMENT_SIZE`] could never be pushed
    /// by the spender, so it is rejected with `PushSize`.
    pub fn to_p2sh_script_pubkey(&self, hasher: &dyn Hasher) -> Result<Script, ScriptError> {
        if self.0.len() > MAX_SCRIPT_ELEMENT_SIZE {
            return Err(ScriptError::PushSize);
        }
        let hash = hasher.hash160(&self.0);
        Ok(Builder::new()
            .push_opcode(OP_HASH160)
            .push_data(&hash)
            .push_opcode(OP_EQUAL)
            .into_script())
    }

    /// Counts signature operations.
    ///
    /// CHECKSIG and CHECKSIGVERIFY count one each. CHECKMULTISIG and
    /// CHECKMULTISIGVERIFY count the preceding small-integer key count when
    /// `accurate` is set and one is present, and the 20-key maximum
    /// otherwise. Counting stops at the first undecodable operation.
    pub fn count_sig_ops(&self, accurate: bool) -> usize {
        let mut count = 0;
        let mut prev_opcode = OP_INVALIDOPCODE;
        for op in self.ops() {
            let Ok(op) = op else { break };
            match op.opcode {
                OP_CHECKSIG | OP_CHECKSIGVERIFY => count += 1,
                OP_CHECKMULTISIG | OP_CHECKMULTISIGVERIFY => {
                    if accurate && (OP_1..=OP_16).contains(&prev_opcode) {
                        count += decode_op_n(prev_opcode) as usize;
                    } else {
                        count += MAX_PUBKEYS_PER_MULTISIG;
                    }
                }
                _ => {}
            }
            prev_opcode = op.opcode;
        }
        count
    }

    /// Removes every whole operation whose encoded bytes equal `pattern`,
    /// returning the resulting script and the number of deletions.
    ///
    /// Matching happens on operation boundaries only, so the pattern must
    /// itself start with an opcode; in practice it is the push encoding of a
    /// signature being scrubbed from a signing subscript.
    pub fn find_and_delete(&self, pattern: &[u8]) -> (Script, usize) {
        if pattern.is_empty() {
            return (self.clone(), 0);
        }
        let mut out = Vec::with_capacity(self.0.len());
        let mut deleted = 0;
        let mut pos = 0;
        while pos < self.0.len() {
            let span = match self.decode_at(pos) {
                Ok(op) => &self.0[pos..op.next],
                // Keep undecodable tails byte-for-byte.
                Err(_) => {
                    out.extend_from_slice(&self.0[pos..]);
                    break;
                }
            };
            if span == pattern {
                deleted += 1;
            } else {
                out.extend_from_slice(span);
            }
            pos += span.len();
        }
        (Script(out), deleted)
    }
}

impl From<Vec<u8>> for Script {
    fn from(bytes: Vec<u8>) -> Self {
        Script(bytes)
    }
}

impl From<&[u8]> for Script {
    fn from(bytes: &[u8]) -> Self {
        Script(bytes.to_vec())
    }
}

/// Maximum number of public keys in a CHECKMULTISIG operation.
pub const MAX_PUBKEYS_PER_MULTISIG: usize = 20;

/// Decoded-operation iterator, created by [`Script::ops`].
pub struct Ops<'a> {
    script: &'a Script,
    pos: usize,
    done: bool,
}

impl<'a> Iterator for Ops<'a> {
    type Item = Result<ParsedOp<'a>, ScriptError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done || self.pos >= self.script.len() {
            return None;
        }
        match self.script.decode_at(self.pos) {
            Ok(op) => {
                self.pos = op.next;
                Some(Ok(op))
            }
            Err(err) => {
                self.done = true;
                Some(Err(err))
            }
        }
    }
}

/// Incremental script construction.
#[derive(Debug, Default)]
pub struct Builder(Vec<u8>);

impl Builder {
    pub fn new() -> Self {
        Builder(Vec::new())
    }

    pub fn push_opcode(mut self, opcode: u8) -> Self {
        self.0.push(opcode);
        self
    }

    /// Pushes an integer in its minimal form: constant opcodes for
    /// -1 and 0..=16, a canonical number push otherwise.
    pub fn push_int(self, value: i64) -> Self {
        match value {
            -1 => self.push_opcode(OP_1NEGATE),
            0..=16 => self.push_opcode(encode_op_n(value)),
            _ => {
                let bytes = ScriptNum::from(value).to_bytes();
                self.push_data(&bytes)
            }
        }
    }

    /// Pushes raw data using the shortest push encoding for its length.
    pub fn push_data(mut self, data: &[u8]) -> Self {
        match data.len() {
            n if n < OP_PUSHDATA1 as usize => self.0.push(n as u8),
            n if n <= 0xff => {
                self.0.push(OP_PUSHDATA1);
                self.0.push(n as u8);
            }
            n if n <= 0xffff => {
                self.0.push(OP_PUSHDATA2);
                self.0.extend_from_slice(&(n as u16).to_le_bytes());
            }
            n => {
                self.0.push(OP_PUSHDATA4);
                self.0.extend_from_slice(&(n as u32).to_le_bytes());
            }
        }
        self.0.extend_from_slice(data);
        self
    }

    /// Appends raw bytes without any push framing.
    pub fn append(mut self, bytes: &[u8]) -> Self {
        self.0.extend_from_slice(bytes);
        self
    }

    pub fn into_script(self) -> Script {
        Script(self.0)
    }
}

/// The push encoding of `data` as a standalone script fragment.
pub fn single_push(data: &[u8]) -> Vec<u8> {
    Builder::new().push_data(data).into_script().into_bytes()
}
