//! Script number codec.
//!
//! Numbers on the stack are little-endian byte vectors with the sign carried
//! in bit 0x80 of the most significant byte; the empty vector is zero.
//! Operands are capped at 4 bytes on input (5 for lock-time operands), but
//! arithmetic results may re-encode to 5 bytes, so the working type is `i64`.

use alloc::vec::Vec;
use core::fmt;
use core::ops::{Add, Neg, Sub};

use crate::error::ScriptError;

/// Byte cap for arithmetic operands.
pub const DEFAULT_MAX_LEN: usize = 4;
/// Byte cap for CHECKLOCKTIMEVERIFY / CHECKSEQUENCEVERIFY operands.
pub const LOCKTIME_MAX_LEN: usize = 5;

/// Failure decoding a script number from stack bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumError {
    /// The encoding is longer than the permitted byte cap.
    Overflow,
    /// The encoding carries redundant leading zero bytes.
    NonMinimal,
}

impl fmt::Display for NumError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumError::Overflow => f.write_str("script number overflow"),
            NumError::NonMinimal => f.write_str("non-minimally encoded script number"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for NumError {}

impl From<NumError> for ScriptError {
    fn from(err: NumError) -> Self {
        match err {
            NumError::Overflow => ScriptError::NumOverflow,
            NumError::NonMinimal => ScriptError::MinimalData,
        }
    }
}

/// A decoded script number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ScriptNum(i64);

impl ScriptNum {
    /// Decodes stack bytes, enforcing the byte cap and (optionally) minimal
    /// encoding.
    pub fn from_bytes(
        bytes: &[u8],
        require_minimal: bool,
        max_len: usize,
    ) -> Result<Self, NumError> {
        // An i64 holds at most 8 magnitude bytes; longer input overflows no
        // matter what cap the caller asked for.
        if bytes.len() > max_len.min(8) {
            return Err(NumError::Overflow);
        }
        if require_minimal && !is_minimally_encoded(bytes) {
            return Err(NumError::NonMinimal);
        }
        if bytes.is_empty() {
            return Ok(ScriptNum(0));
        }

        let mut value: i64 = 0;
        for (i, &byte) in bytes.iter().enumerate() {
            value |= i64::from(byte) << (8 * i);
        }

        // Sign bit lives in the top bit of the last byte.
        let last = bytes[bytes.len() - 1];
        if last & 0x80 != 0 {
            value &= !(0x80i64 << (8 * (bytes.len() - 1)));
            value = -value;
        }
        Ok(ScriptNum(value))
    }

    /// The canonical (minimal) stack encoding. Zero encodes as empty.
    pub fn to_bytes(self) -> Vec<u8> {
        let value = self.0;
        if value == 0 {
            return Vec::new();
        }

        let negative = value < 0;
        let mut magnitude = value.unsigned_abs();
        let mut out = Vec::with_capacity(9);
        while magnitude > 0 {
            out.push((magnitude & 0xff) as u8);
            magnitude >>= 8;
        }

        // If the top magnitude byte would collide with the sign bit, add a
        // dedicated sign byte.
        let last = *out.last().unwrap_or(&0);
        if last & 0x80 != 0 {
            out.push(if negative { 0x80 } else { 0x00 });
        } else if negative {
            let idx = out.len() - 1;
            out[idx] |= 0x80;
        }
        out
    }

    /// The decoded value.
    pub fn value(self) -> i64 {
        self.0
    }
}

impl From<i64> for ScriptNum {
    fn from(value: i64) -> Self {
        ScriptNum(value)
    }
}

impl Add for ScriptNum {
    type Output = ScriptNum;
    fn add(self, rhs: ScriptNum) -> ScriptNum {
        ScriptNum(self.0 + rhs.0)
    }
}

impl Sub for ScriptNum {
    type Output = ScriptNum;
    fn sub(self, rhs: ScriptNum) -> ScriptNum {
        ScriptNum(self.0 - rhs.0)
    }
}

impl Neg for ScriptNum {
    type Output = ScriptNum;
    fn neg(self) -> ScriptNum {
        ScriptNum(-self.0)
    }
}

/// Whether `bytes` is the shortest encoding of its value.
///
/// A trailing byte whose low seven bits are all zero contributes nothing
/// unless it carries the sign bit for a preceding byte that already uses
/// bit 0x80; this also rejects negative zero (`[0x80]`).
pub fn is_minimally_encoded(bytes: &[u8]) -> bool {
    match bytes.last() {
        None => true,
        Some(&last) if last & 0x7f != 0 => true,
        Some(_) => bytes.len() > 1 && bytes[bytes.len() - 2] & 0x80 != 0,
    }
}
