//! The script execution state machine.
//!
//! [`Interpreter::eval`] runs one script against a stack under a set of
//! verification flags. Signature verification and transaction context live
//! behind the [`SignatureChecker`] seam; hashing behind [`Hasher`]. The
//! engine itself never touches a transaction or a curve.

use alloc::vec::Vec;

use crate::error::ScriptError;
use crate::num::{ScriptNum, DEFAULT_MAX_LEN, LOCKTIME_MAX_LEN};
use crate::opcodes::*;
use crate::script::{single_push, ParsedOp, Script, MAX_PUBKEYS_PER_MULTISIG, MAX_SCRIPT_SIZE};
use crate::stack::Stack;
use crate::{
    VerifyFlags, VERIFY_CHECKLOCKTIMEVERIFY, VERIFY_CHECKSEQUENCEVERIFY, VERIFY_CLEANSTACK,
    VERIFY_DERSIG, VERIFY_DISCOURAGE_UPGRADABLE_NOPS, VERIFY_LOW_S, VERIFY_MINIMALDATA,
    VERIFY_MINIMALIF, VERIFY_NULLDUMMY, VERIFY_NULLFAIL, VERIFY_STRICTENC,
    VERIFY_WITNESS_PUBKEYTYPE,
};

/// Sign-all hash type.
pub const SIGHASH_ALL: u8 = 0x01;
/// Sign-no-outputs hash type.
pub const SIGHASH_NONE: u8 = 0x02;
/// Sign-matching-output hash type.
pub const SIGHASH_SINGLE: u8 = 0x03;
/// Modifier: only the signing input is committed to.
pub const SIGHASH_ANYONECANPAY: u8 = 0x80;

/// Cap on combined main+alt stack depth.
pub const MAX_STACK_SIZE: usize = 1000;
/// Cap on executed non-push operations per script.
pub const MAX_OPS_PER_SCRIPT: usize = 201;

/// Half of the secp256k1 group order, big endian. Signatures with an S value
/// above this are malleable; the low-S rule rejects them on the DER bytes
/// alone.
const HALF_ORDER: [u8; 32] = [
    0x7f, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
    0xff, 0x5d, 0x57, 0x6e, 0x73, 0x57, 0xa4, 0x50, 0x1d, 0xdf, 0xe9, 0x2f, 0x46, 0x68, 0x1b,
    0x20, 0xa0,
];

/// Which signature-hashing scheme the surrounding validation is using.
/// Selects subscript construction behavior: only `Base` scrubs signatures
/// out of the subscript.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SigVersion {
    /// Legacy (pre-segwit) signature hashing.
    Base,
    /// BIP143 version-0 witness signature hashing.
    WitnessV0,
}

/// Transaction-side collaborator for signature and lock-time checks.
pub trait SignatureChecker {
    /// Verifies `sig` (DER plus hash-type byte) by `pubkey` over the
    /// signature hash of `subscript`.
    fn check_sig(&self, sig: &[u8], pubkey: &[u8], subscript: &Script, sig_version: SigVersion)
        -> bool;

    /// Whether the transaction satisfies an absolute lock time of
    /// `lock_time`.
    fn check_lock_time(&self, lock_time: i64) -> bool;

    /// Whether the spending input satisfies a relative lock time of
    /// `sequence`.
    fn check_sequence(&self, sequence: i64) -> bool;
}

/// A checker that refuses everything; for evaluating scripts with no
/// transaction context.
pub struct NullSignatureChecker;

impl SignatureChecker for NullSignatureChecker {
    fn check_sig(&self, _: &[u8], _: &[u8], _: &Script, _: SigVersion) -> bool {
        false
    }

    fn check_lock_time(&self, _: i64) -> bool {
        false
    }

    fn check_sequence(&self, _: i64) -> bool {
        false
    }
}

/// Digest collaborator backing the hash opcodes.
pub trait Hasher {
    fn ripemd160(&self, data: &[u8]) -> [u8; 20];
    fn sha1(&self, data: &[u8]) -> [u8; 20];
    fn sha256(&self, data: &[u8]) -> [u8; 32];
    /// RIPEMD160(SHA256(data)).
    fn hash160(&self, data: &[u8]) -> [u8; 20];
    /// SHA256(SHA256(data)).
    fn hash256(&self, data: &[u8]) -> [u8; 32];
}

/// [`Hasher`] over the standard digest implementations.
pub struct StdHasher;

impl Hasher for StdHasher {
    fn ripemd160(&self, data: &[u8]) -> [u8; 20] {
        use bitcoin_hashes::{ripemd160, Hash};
        ripemd160::Hash::hash(data).to_byte_array()
    }

    fn sha1(&self, data: &[u8]) -> [u8; 20] {
        use bitcoin_hashes::{sha1, Hash};
        sha1::Hash::hash(data).to_byte_array()
    }

    fn sha256(&self, data: &[u8]) -> [u8; 32] {
        use bitcoin_hashes::{sha256, Hash};
        sha256::Hash::hash(data).to_byte_array()
    }

    fn hash160(&self, data: &[u8]) -> [u8; 20] {
        use bitcoin_hashes::{hash160, Hash};
        hash160::Hash::hash(data).to_byte_array()
    }

    fn hash256(&self, data: &[u8]) -> [u8; 32] {
        use bitcoin_hashes::{sha256d, Hash};
        sha256d::Hash::hash(data).to_byte_array()
    }
}

/// Truthiness of a stack element: false is empty, all-zero, or negative
/// zero (any number of zero bytes under a lone 0x80).
pub fn cast_to_bool(data: &[u8]) -> bool {
    for (i, &byte) in data.iter().enumerate() {
        if byte != 0 {
            // Negative zero counts as false.
            return !(i == data.len() - 1 && byte == 0x80);
        }
    }
    false
}

/// Whether `opcode` is the shortest possible push of `data`.
pub fn is_minimal_push(opcode: u8, data: &[u8]) -> bool {
    if data.is_empty() {
        return opcode == OP_0;
    }
    if data.len() == 1 && (data[0] >= 1 && data[0] <= 16 || data[0] == 0x81) {
        // Could have used a constant opcode.
        return false;
    }
    if data.len() <= 75 {
        return opcode as usize == data.len();
    }
    if data.len() <= 255 {
        return opcode == OP_PUSHDATA1;
    }
    if data.len() <= 65535 {
        return opcode == OP_PUSHDATA2;
    }
    true
}

/// Per-evaluation execution state.
struct ExecCtx {
    cond: Vec<bool>,
    alt: Stack,
    op_count: usize,
    code_separator: usize,
}

/// Script evaluator. Cheap to construct; one instance can evaluate any
/// number of scripts.
pub struct Interpreter<'a> {
    flags: VerifyFlags,
    checker: &'a dyn SignatureChecker,
    hasher: &'a dyn Hasher,
}

impl<'a> Interpreter<'a> {
    pub fn new(
        flags: VerifyFlags,
        checker: &'a dyn SignatureChecker,
        hasher: &'a dyn Hasher,
    ) -> Self {
        Interpreter {
            flags,
            checker,
            hasher,
        }
    }

    /// Evaluates `script` against `stack`, including the final stack checks:
    /// the script must leave a truthy top element, and under CLEANSTACK
    /// exactly one element.
    pub fn eval(
        &self,
        stack: &mut Stack,
        script: &Script,
        sig_version: SigVersion,
    ) -> Result<(), ScriptError> {
        self.run(stack, script, sig_version)?;
        if stack.is_empty() {
            return Err(ScriptError::InvalidStackOperation);
        }
        if !cast_to_bool(stack.last()?) {
            return Err(ScriptError::EvalFalse);
        }
        if self.flags.has(VERIFY_CLEANSTACK) && stack.len() != 1 {
            return Err(ScriptError::CleanStack);
        }
        Ok(())
    }

    fn run(
        &self,
        stack: &mut Stack,
        script: &Script,
        sig_version: SigVersion,
    ) -> Result<(), ScriptError> {
        if script.len() > MAX_SCRIPT_SIZE {
            return Err(ScriptError::ScriptSize);
        }

        let mut ctx = ExecCtx {
            cond: Vec::new(),
            alt: Stack::new(),
            op_count: 0,
            code_separator: 0,
        };
        let require_minimal = self.flags.has(VERIFY_MINIMALDATA);

        let mut pos = 0;
        while pos < script.len() {
            let op = script.decode_at(pos)?;
            let executing = ctx.cond.iter().all(|&c| c);

            // Disabled and reserved-in-any-branch opcodes fail even when
            // their branch is not taken.
            if is_disabled(op.opcode) {
                return Err(ScriptError::DisabledOpcode);
            }
            if op.opcode == OP_VERIF || op.opcode == OP_VERNOTIF {
                return Err(ScriptError::BadOpcode);
            }
            if op.opcode > OP_16 {
                ctx.op_count += 1;
                if ctx.op_count > MAX_OPS_PER_SCRIPT {
                    return Err(ScriptError::OpCount);
                }
            }

            if op.opcode <= OP_PUSHDATA4 {
                if executing {
                    if require_minimal && !is_minimal_push(op.opcode, op.data) {
                        return Err(ScriptError::MinimalData);
                    }
                    stack.push(op.data.to_vec());
                }
            } else if executing || (OP_IF..=OP_ENDIF).contains(&op.opcode) {
                self.execute_opcode(&op, script, stack, &mut ctx, sig_version, executing)?;
            }

            if stack.len() + ctx.alt.len() > MAX_STACK_SIZE {
                return Err(ScriptError::StackSize);
            }
            pos = op.next;
        }

        if !ctx.cond.is_empty() {
            return Err(ScriptError::UnbalancedConditional);
        }
        Ok(())
    }

    fn execute_opcode(
        &self,
        op: &ParsedOp<'_>,
        script: &Script,
        stack: &mut Stack,
        ctx: &mut ExecCtx,
        sig_version: SigVersion,
        executing: bool,
    ) -> Result<(), ScriptError> {
        let require_minimal = self.flags.has(VERIFY_MINIMALDATA);

        match op.opcode {
            // Constants above the push range.
            OP_1NEGATE => stack.push(ScriptNum::from(-1).to_bytes()),
            OP_1..=OP_16 => stack.push(ScriptNum::from(decode_op_n(op.opcode)).to_bytes()),

            // Flow control.
            OP_NOP => {}
            OP_IF | OP_NOTIF => {
                let mut value = false;
                if executing {
                    let top = stack
                        .pop()
                        .map_err(|_| ScriptError::UnbalancedConditional)?;
                    if sig_version == SigVersion::WitnessV0
                        && self.flags.has(VERIFY_MINIMALIF)
                        && !(top.is_empty() || top == [1])
                    {
                        return Err(ScriptError::MinimalIf);
                    }
                    value = cast_to_bool(&top);
                    if op.opcode == OP_NOTIF {
                        value = !value;
                    }
                }
                ctx.cond.push(value);
            }
            OP_ELSE => {
                let last = ctx
                    .cond
                    .last_mut()
                    .ok_or(ScriptError::UnbalancedConditional)?;
                *last = !*last;
            }
            OP_ENDIF => {
                ctx.cond
                    .pop()
                    .ok_or(ScriptError::UnbalancedConditional)?;
            }
            OP_VERIFY => {
                let top = stack.pop()?;
                if !cast_to_bool(&top) {
                    return Err(ScriptError::Verify);
                }
            }
            OP_RETURN => return Err(ScriptError::OpReturn),

            // Reserved opcodes fail only when executed.
            OP_VER | OP_RESERVED | OP_RESERVED1 | OP_RESERVED2 => {
                return Err(ScriptError::BadOpcode)
            }

            // Alt stack.
            OP_TOALTSTACK => {
                let item = stack.pop()?;
                ctx.alt.push(item);
            }
            OP_FROMALTSTACK => {
                let item = ctx
                    .alt
                    .pop()
                    .map_err(|_| ScriptError::InvalidAltstackOperation)?;
                stack.push(item);
            }

            // Stack manipulation.
            OP_2DROP => {
                stack.pop()?;
                stack.pop()?;
            }
            OP_2DUP => {
                let a = stack.top(-2)?.to_vec();
                let b = stack.top(-1)?.to_vec();
                stack.push(a);
                stack.push(b);
            }
            OP_3DUP => {
                let a = stack.top(-3)?.to_vec();
                let b = stack.top(-2)?.to_vec();
                let c = stack.top(-1)?.to_vec();
                stack.push(a);
                stack.push(b);
                stack.push(c);
            }
            OP_2OVER => {
                let a = stack.top(-4)?.to_vec();
                let b = stack.top(-3)?.to_vec();
                stack.push(a);
                stack.push(b);
            }
            OP_2ROT => {
                let a = stack.remove(-6)?;
                let b = stack.remove(-5)?;
                stack.push(a);
                stack.push(b);
            }
            OP_2SWAP => {
                stack.swap(-4, -2)?;
                stack.swap(-3, -1)?;
            }
            OP_IFDUP => {
                let top = stack.top(-1)?.to_vec();
                if cast_to_bool(&top) {
                    stack.push(top);
                }
            }
            OP_DEPTH => stack.push(ScriptNum::from(stack.len() as i64).to_bytes()),
            OP_DROP => {
                stack.pop()?;
            }
            OP_DUP => {
                let top = stack.top(-1)?.to_vec();
                stack.push(top);
            }
            OP_NIP => {
                stack.remove(-2)?;
            }
            OP_OVER => {
                let item = stack.top(-2)?.to_vec();
                stack.push(item);
            }
            OP_PICK | OP_ROLL => {
                let n = self.pop_num(stack)?.value();
                if n < 0 || n as usize >= stack.len() {
                    return Err(ScriptError::InvalidStackOperation);
                }
                let offset = -(n as isize) - 1;
                let item = if op.opcode == OP_PICK {
                    stack.top(offset)?.to_vec()
                } else {
                    stack.remove(offset)?
                };
                stack.push(item);
            }
            OP_ROT => {
                let item = stack.remove(-3)?;
                stack.push(item);
            }
            OP_SWAP => stack.swap(-2, -1)?,
            OP_TUCK => {
                let top = stack.top(-1)?.to_vec();
                stack.insert(-3, top)?;
            }
            OP_SIZE => {
                let len = stack.top(-1)?.len();
                stack.push(ScriptNum::from(len as i64).to_bytes());
            }

            // Byte-string comparison.
            OP_EQUAL | OP_EQUALVERIFY => {
                let b = stack.pop()?;
                let a = stack.pop()?;
                let equal = a == b;
                if op.opcode == OP_EQUAL {
                    stack.push_bool(equal);
                } else if !equal {
                    return Err(ScriptError::EqualVerify);
                }
            }

            // Unary numeric.
            OP_1ADD | OP_1SUB | OP_NEGATE | OP_ABS | OP_NOT | OP_0NOTEQUAL => {
                let n = self.pop_num(stack)?;
                match op.opcode {
                    OP_1ADD => stack.push((n + ScriptNum::from(1)).to_bytes()),
                    OP_1SUB => stack.push((n - ScriptNum::from(1)).to_bytes()),
                    OP_NEGATE => stack.push((-n).to_bytes()),
                    OP_ABS => {
                        let abs = if n.value() < 0 { -n } else { n };
                        stack.push(abs.to_bytes());
                    }
                    OP_NOT => stack.push_bool(n.value() == 0),
                    _ => stack.push_bool(n.value() != 0),
                }
            }

            // Binary numeric.
            OP_ADD | OP_SUB | OP_BOOLAND | OP_BOOLOR | OP_NUMEQUAL | OP_NUMEQUALVERIFY
            | OP_NUMNOTEQUAL | OP_LESSTHAN | OP_GREATERTHAN | OP_LESSTHANOREQUAL
            | OP_GREATERTHANOREQUAL | OP_MIN | OP_MAX => {
                let b = self.pop_num(stack)?;
                let a = self.pop_num(stack)?;
                match op.opcode {
                    OP_ADD => stack.push((a + b).to_bytes()),
                    OP_SUB => stack.push((a - b).to_bytes()),
                    OP_BOOLAND => stack.push_bool(a.value() != 0 && b.value() != 0),
                    OP_BOOLOR => stack.push_bool(a.value() != 0 || b.value() != 0),
                    OP_NUMEQUAL => stack.push_bool(a == b),
                    OP_NUMEQUALVERIFY => {
                        if a != b {
                            return Err(ScriptError::NumEqualVerify);
                        }
                    }
                    OP_NUMNOTEQUAL => stack.push_bool(a != b),
                    OP_LESSTHAN => stack.push_bool(a < b),
                    OP_GREATERTHAN => stack.push_bool(a > b),
                    OP_LESSTHANOREQUAL => stack.push_bool(a <= b),
                    OP_GREATERTHANOREQUAL => stack.push_bool(a >= b),
                    OP_MIN => stack.push(core::cmp::min(a, b).to_bytes()),
                    _ => stack.push(core::cmp::max(a, b).to_bytes()),
                }
            }
            OP_WITHIN => {
                let max = self.pop_num(stack)?;
                let min = self.pop_num(stack)?;
                let x = self.pop_num(stack)?;
                stack.push_bool(min <= x && x < max);
            }

            // Hashing.
            OP_RIPEMD160 | OP_SHA1 | OP_SHA256 | OP_HASH160 | OP_HASH256 => {
                let data = stack.pop()?;
                let digest: Vec<u8> = match op.opcode {
                    OP_RIPEMD160 => self.hasher.ripemd160(&data).to_vec(),
                    OP_SHA1 => self.hasher.sha1(&data).to_vec(),
                    OP_SHA256 => self.hasher.sha256(&data).to_vec(),
                    OP_HASH160 => self.hasher.hash160(&data).to_vec(),
                    _ => self.hasher.hash256(&data).to_vec(),
                };
                stack.push(digest);
            }
            OP_CODESEPARATOR => ctx.code_separator = op.next,

            // Signature checks.
            OP_CHECKSIG | OP_CHECKSIGVERIFY => {
                let pubkey = stack.pop()?;
                let sig = stack.pop()?;
                let subscript = signing_subscript(
                    script,
                    ctx.code_separator,
                    core::slice::from_ref(&sig),
                    sig_version,
                );
                self.check_signature_encoding(&sig)?;
                self.check_pubkey_encoding(&pubkey, sig_version)?;
                let success = self
                    .checker
                    .check_sig(&sig, &pubkey, &subscript, sig_version);
                if !success && self.flags.has(VERIFY_NULLFAIL) && !sig.is_empty() {
                    return Err(ScriptError::SigNullFail);
                }
                if op.opcode == OP_CHECKSIG {
                    stack.push_bool(success);
                } else if !success {
                    return Err(ScriptError::CheckSigVerify);
                }
            }
            OP_CHECKMULTISIG | OP_CHECKMULTISIGVERIFY => {
                let key_count = self.pop_num(stack)?.value();
                if key_count < 0 || key_count as usize > MAX_PUBKEYS_PER_MULTISIG {
                    return Err(ScriptError::PubkeyCount);
                }
                ctx.op_count += key_count as usize;
                if ctx.op_count > MAX_OPS_PER_SCRIPT {
                    return Err(ScriptError::OpCount);
                }
                let mut keys = Vec::with_capacity(key_count as usize);
                for _ in 0..key_count {
                    keys.push(stack.pop()?);
                }

                let sig_count = self.pop_num(stack)?.value();
                if sig_count < 0 || sig_count > key_count {
                    return Err(ScriptError::SigCount);
                }
                let mut sigs = Vec::with_capacity(sig_count as usize);
                for _ in 0..sig_count {
                    sigs.push(stack.pop()?);
                }

                // The historical extra element. Unused, but its presence is
                // consensus; NULLDUMMY additionally pins it to empty.
                let dummy = stack.pop()?;
                if self.flags.has(VERIFY_NULLDUMMY) && !dummy.is_empty() {
                    return Err(ScriptError::SigNullDummy);
                }

                let subscript =
                    signing_subscript(script, ctx.code_separator, &sigs, sig_version);

                // Both vectors are top-of-stack first, so walking them
                // forward consumes signatures and keys in matching order.
                // A signature may skip keys but never go back, and once
                // more signatures remain than keys the operation cannot
                // succeed.
                let mut success = true;
                let mut sig_idx = 0;
                let mut key_idx = 0;
                while success && sig_idx < sigs.len() {
                    let sig = &sigs[sig_idx];
                    let key = &keys[key_idx];
                    self.check_signature_encoding(sig)?;
                    self.check_pubkey_encoding(key, sig_version)?;
                    if self.checker.check_sig(sig, key, &subscript, sig_version) {
                        sig_idx += 1;
                    }
                    key_idx += 1;
                    if sigs.len() - sig_idx > keys.len() - key_idx {
                        success = false;
                    }
                }

                if !success && self.flags.has(VERIFY_NULLFAIL) {
                    for sig in &sigs {
                        if !sig.is_empty() {
                            return Err(ScriptError::SigNullFail);
                        }
                    }
                }

                if op.opcode == OP_CHECKMULTISIG {
                    stack.push_bool(success);
                } else if !success {
                    return Err(ScriptError::CheckMultiSigVerify);
                }
            }

            // Lock-time extensions over the former NOP2/NOP3.
            OP_CHECKLOCKTIMEVERIFY => {
                if !self.flags.has(VERIFY_CHECKLOCKTIMEVERIFY) {
                    self.discourage_nop()?;
                } else {
                    let lock_time = ScriptNum::from_bytes(
                        stack.top(-1)?,
                        require_minimal,
                        LOCKTIME_MAX_LEN,
                    )?
                    .value();
                    if lock_time < 0 {
                        return Err(ScriptError::NegativeLockTime);
                    }
                    if !self.checker.check_lock_time(lock_time) {
                        return Err(ScriptError::UnsatisfiedLockTime);
                    }
                }
            }
            OP_CHECKSEQUENCEVERIFY => {
                if !self.flags.has(VERIFY_CHECKSEQUENCEVERIFY) {
                    self.discourage_nop()?;
                } else {
                    let sequence = ScriptNum::from_bytes(
                        stack.top(-1)?,
                        require_minimal,
                        LOCKTIME_MAX_LEN,
                    )?
                    .value();
                    if sequence < 0 {
                        return Err(ScriptError::NegativeLockTime);
                    }
                    if !self.checker.check_sequence(sequence) {
                        return Err(ScriptError::UnsatisfiedLockTime);
                    }
                }
            }
            OP_NOP1 | OP_NOP4..=OP_NOP10 => self.discourage_nop()?,

            _ => return Err(ScriptError::BadOpcode),
        }
        Ok(())
    }

    fn discourage_nop(&self) -> Result<(), ScriptError> {
        if self.flags.has(VERIFY_DISCOURAGE_UPGRADABLE_NOPS) {
            Err(ScriptError::DiscourageUpgradableNops)
        } else {
            Ok(())
        }
    }

    fn pop_num(&self, stack: &mut Stack) -> Result<ScriptNum, ScriptError> {
        let bytes = stack.pop()?;
        let num = ScriptNum::from_bytes(
            &bytes,
            self.flags.has(VERIFY_MINIMALDATA),
            DEFAULT_MAX_LEN,
        )?;
        Ok(num)
    }

    /// Flag-gated structural checks on a signature. An empty signature is
    /// structurally acceptable; it simply fails verification.
    fn check_signature_encoding(&self, sig: &[u8]) -> Result<(), ScriptError> {
        if sig.is_empty() {
            return Ok(());
        }
        if self
            .flags
            .has(VERIFY_DERSIG | VERIFY_LOW_S | VERIFY_STRICTENC)
            && !is_valid_signature_encoding(sig)
        {
            return Err(ScriptError::SigDer);
        }
        if self.flags.has(VERIFY_LOW_S) && !is_low_s(sig) {
            return Err(ScriptError::SigHighS);
        }
        if self.flags.has(VERIFY_STRICTENC) && !is_defined_hashtype(sig) {
            return Err(ScriptError::SigHashType);
        }
        Ok(())
    }

    fn check_pubkey_encoding(
        &self,
        pubkey: &[u8],
        sig_version: SigVersion,
    ) -> Result<(), ScriptError> {
        if self.flags.has(VERIFY_STRICTENC) && !is_valid_pubkey_encoding(pubkey) {
            return Err(ScriptError::PubkeyType);
        }
        if self.flags.has(VERIFY_WITNESS_PUBKEYTYPE)
            && sig_version == SigVersion::WitnessV0
            && !is_compressed_pubkey(pubkey)
        {
            return Err(ScriptError::WitnessPubkeyType);
        }
        Ok(())
    }
}

/// The subscript a signature commits to: the script bytes from the most
/// recent OP_CODESEPARATOR onward, with (for legacy hashing only) the push
/// encoding of each signature scrubbed out.
fn signing_subscript(
    script: &Script,
    code_separator: usize,
    sigs: &[Vec<u8>],
    sig_version: SigVersion,
) -> Script {
    let mut subscript = Script::from(&script.as_bytes()[code_separator..]);
    if sig_version == SigVersion::Base {
        for sig in sigs {
            let pattern = single_push(sig);
            subscript = subscript.find_and_delete(&pattern).0;
        }
    }
    subscript
}

/// Strict-DER layout check on `sig` (which carries a trailing hash-type
/// byte): 0x30, length, 0x02, R, 0x02, S, with no negative or padded
/// integers.
pub fn is_valid_signature_encoding(sig: &[u8]) -> bool {
    if sig.len() < 9 || sig.len() > 73 {
        return false;
    }
    if sig[0] != 0x30 {
        return false;
    }
    if sig[1] as usize != sig.len() - 3 {
        return false;
    }
    let len_r = sig[3] as usize;
    if 5 + len_r >= sig.len() {
        return false;
    }
    let len_s = sig[5 + len_r] as usize;
    if len_r + len_s + 7 != sig.len() {
        return false;
    }
    if sig[2] != 0x02 {
        return false;
    }
    if len_r == 0 {
        return false;
    }
    if sig[4] & 0x80 != 0 {
        return false;
    }
    if len_r > 1 && sig[4] == 0 && sig[5] & 0x80 == 0 {
        return false;
    }
    if sig[len_r + 4] != 0x02 {
        return false;
    }
    if len_s == 0 {
        return false;
    }
    if sig[len_r + 6] & 0x80 != 0 {
        return false;
    }
    if len_s > 1 && sig[len_r + 6] == 0 && sig[len_r + 7] & 0x80 == 0 {
        return false;
    }
    true
}

/// Low-S check on an already-DER-valid signature.
fn is_low_s(sig: &[u8]) -> bool {
    if !is_valid_signature_encoding(sig) {
        return false;
    }
    let len_r = sig[3] as usize;
    let len_s = sig[5 + len_r] as usize;
    let s = &sig[6 + len_r..6 + len_r + len_s];
    let s = match s.iter().position(|&b| b != 0) {
        Some(i) => &s[i..],
        None => return true,
    };
    if s.len() > 32 {
        return false;
    }
    let mut padded = [0u8; 32];
    padded[32 - s.len()..].copy_from_slice(s);
    padded <= HALF_ORDER
}

/// Whether the hash-type byte names a defined mode, ignoring the
/// anyone-can-pay bit.
fn is_defined_hashtype(sig: &[u8]) -> bool {
    match sig.last() {
        Some(&byte) => {
            let hash_type = byte & !SIGHASH_ANYONECANPAY;
            (SIGHASH_ALL..=SIGHASH_SINGLE).contains(&hash_type)
        }
        None => false,
    }
}

/// 33-byte compressed (0x02/0x03) or 65-byte uncompressed (0x04) key.
pub fn is_valid_pubkey_encoding(pubkey: &[u8]) -> bool {
    match pubkey.first() {
        Some(0x02) | Some(0x03) => pubkey.len() == 33,
        Some(0x04) => pubkey.len() == 65,
        _ => false,
    }
}

fn is_compressed_pubkey(pubkey: &[u8]) -> bool {
    pubkey.len() == 33 && matches!(pubkey[0], 0x02 | 0x03)
}
