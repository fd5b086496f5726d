//! Stack-based script execution engine for UTXO spending conditions.
//!
//! The engine evaluates a [`Script`] against a [`Stack`] under a set of
//! `VERIFY_*` flags. Transaction context stays outside: signature and
//! lock-time checks go through the [`SignatureChecker`] collaborator, and
//! the hash opcodes through [`Hasher`]. Evaluation is deterministic,
//! allocates only through `alloc`, and reports every failure as a typed
//! [`ScriptError`].
//!
//! ```
//! use utxo_script::{
//!     Builder, Interpreter, NullSignatureChecker, SigVersion, Stack, StdHasher, VerifyFlags,
//!     VERIFY_NONE,
//! };
//!
//! let script = Builder::new()
//!     .push_int(2)
//!     .push_int(3)
//!     .push_opcode(utxo_script::opcodes::OP_ADD)
//!     .into_script();
//! let interpreter = Interpreter::new(
//!     VerifyFlags::from_bits(VERIFY_NONE).unwrap(),
//!     &NullSignatureChecker,
//!     &StdHasher,
//! );
//! let mut stack = Stack::new();
//! interpreter.eval(&mut stack, &script, SigVersion::Base).unwrap();
//! assert_eq!(stack.items(), &[vec![5]]);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod error;
mod interpreter;
mod num;
pub mod opcodes;
mod script;
mod stack;

pub use error::ScriptError;
pub use interpreter::{
    cast_to_bool, is_minimal_push, is_valid_pubkey_encoding, is_valid_signature_encoding, Hasher,
    Interpreter, NullSignatureChecker, SignatureChecker, SigVersion, StdHasher,
    MAX_OPS_PER_SCRIPT, MAX_STACK_SIZE, SIGHASH_ALL, SIGHASH_ANYONECANPAY, SIGHASH_NONE,
    SIGHASH_SINGLE,
};
pub use num::{is_minimally_encoded, NumError, ScriptNum, DEFAULT_MAX_LEN, LOCKTIME_MAX_LEN};
pub use script::{
    Builder, Ops, ParsedOp, Script, MAX_PUBKEYS_PER_MULTISIG, MAX_SCRIPT_ELEMENT_SIZE,
    MAX_SCRIPT_SIZE,
};
pub use stack::Stack;

/// No verification rules beyond the consensus evaluation itself.
pub const VERIFY_NONE: u32 = 0;
/// Evaluate pay-to-script-hash outputs by their redeem script.
pub const VERIFY_P2SH: u32 = 1 << 0;
/// Public keys must be strictly encoded, hash types defined.
pub const VERIFY_STRICTENC: u32 = 1 << 1;
/// Signatures must be strict DER.
pub const VERIFY_DERSIG: u32 = 1 << 2;
/// Signature S values must be in the lower half of the group order.
pub const VERIFY_LOW_S: u32 = 1 << 3;
/// The CHECKMULTISIG dummy element must be empty.
pub const VERIFY_NULLDUMMY: u32 = 1 << 4;
/// Signature scripts may contain only pushes.
pub const VERIFY_SIGPUSHONLY: u32 = 1 << 5;
/// Pushes and numbers must be minimally encoded.
pub const VERIFY_MINIMALDATA: u32 = 1 << 6;
/// Executing an upgradable NOP is an error.
pub const VERIFY_DISCOURAGE_UPGRADABLE_NOPS: u32 = 1 << 7;
/// Evaluation must leave exactly one stack element.
pub const VERIFY_CLEANSTACK: u32 = 1 << 8;
/// Enable OP_CHECKLOCKTIMEVERIFY.
pub const VERIFY_CHECKLOCKTIMEVERIFY: u32 = 1 << 9;
/// Enable OP_CHECKSEQUENCEVERIFY.
pub const VERIFY_CHECKSEQUENCEVERIFY: u32 = 1 << 10;
/// Verify witness programs.
pub const VERIFY_WITNESS: u32 = 1 << 11;
/// Unknown witness versions are an error.
pub const VERIFY_DISCOURAGE_UPGRADABLE_WITNESS_PROGRAM: u32 = 1 << 12;
/// OP_IF/OP_NOTIF arguments in witness scripts must be empty or `[1]`.
pub const VERIFY_MINIMALIF: u32 = 1 << 13;
/// A failed signature check must have consumed an empty signature.
pub const VERIFY_NULLFAIL: u32 = 1 << 14;
/// Witness-v0 public keys must be compressed.
pub const VERIFY_WITNESS_PUBKEYTYPE: u32 = 1 << 15;

/// Every flag this engine understands.
pub const SUPPORTED_FLAGS: u32 = VERIFY_P2SH
    | VERIFY_STRICTENC
    | VERIFY_DERSIG
    | VERIFY_LOW_S
    | VERIFY_NULLDUMMY
    | VERIFY_SIGPUSHONLY
    | VERIFY_MINIMALDATA
    | VERIFY_DISCOURAGE_UPGRADABLE_NOPS
    | VERIFY_CLEANSTACK
    | VERIFY_CHECKLOCKTIMEVERIFY
    | VERIFY_CHECKSEQUENCEVERIFY
    | VERIFY_WITNESS
    | VERIFY_DISCOURAGE_UPGRADABLE_WITNESS_PROGRAM
    | VERIFY_MINIMALIF
    | VERIFY_NULLFAIL
    | VERIFY_WITNESS_PUBKEYTYPE;

/// A validated set of `VERIFY_*` bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VerifyFlags(u32);

impl VerifyFlags {
    /// Wraps `bits`, rejecting any bit outside [`SUPPORTED_FLAGS`].
    pub fn from_bits(bits: u32) -> Result<Self, ScriptError> {
        if bits & !SUPPORTED_FLAGS != 0 {
            return Err(ScriptError::InvalidFlags);
        }
        Ok(VerifyFlags(bits))
    }

    pub fn bits(self) -> u32 {
        self.0
    }

    /// True when any of the bits in `flags` is set.
    pub fn has(self, flags: u32) -> bool {
        self.0 & flags != 0
    }
}
