//! Typed evaluation failures.
//!
//! Every way a script can fail maps to exactly one variant. The engine never
//! panics on adversarial input; all failure travels through these values.

use core::fmt;

/// Reason a script failed to evaluate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptError {
    /// The script ran to completion but left a falsy top element.
    EvalFalse,
    /// OP_RETURN was executed.
    OpReturn,

    /// Script exceeds the 10000-byte size cap.
    ScriptSize,
    /// A pushed element exceeds the 520-byte element cap.
    PushSize,
    /// More than 201 non-push operations were executed.
    OpCount,
    /// Combined main+alt stack depth exceeded 1000 elements.
    StackSize,
    /// CHECKMULTISIG signature count is negative or above the key count.
    SigCount,
    /// CHECKMULTISIG key count is negative or above 20.
    PubkeyCount,

    /// OP_VERIFY failed.
    Verify,
    /// OP_EQUALVERIFY failed.
    EqualVerify,
    /// OP_CHECKSIGVERIFY failed.
    CheckSigVerify,
    /// OP_CHECKMULTISIGVERIFY failed.
    CheckMultiSigVerify,
    /// OP_NUMEQUALVERIFY failed.
    NumEqualVerify,

    /// Unknown, reserved, or truncated opcode.
    BadOpcode,
    /// A disabled opcode is present in the script.
    DisabledOpcode,
    /// An operation needed more main-stack elements than were available.
    InvalidStackOperation,
    /// An operation needed more alt-stack elements than were available.
    InvalidAltstackOperation,
    /// OP_ELSE/OP_ENDIF without OP_IF, or an unterminated conditional.
    UnbalancedConditional,
    /// Numeric operand was too long to decode.
    NumOverflow,

    /// CHECKLOCKTIMEVERIFY operand was negative.
    NegativeLockTime,
    /// The lock-time or sequence condition was not satisfied.
    UnsatisfiedLockTime,

    /// Signature hash type is undefined.
    SigHashType,
    /// Signature is not strictly DER encoded.
    SigDer,
    /// A number or push was not minimally encoded.
    MinimalData,
    /// Signature script contains a non-push opcode.
    SigPushOnly,
    /// Signature S value is above the curve half order.
    SigHighS,
    /// CHECKMULTISIG dummy element was not empty.
    SigNullDummy,
    /// Public key is neither compressed nor uncompressed.
    PubkeyType,
    /// Stack held more than one element after evaluation.
    CleanStack,
    /// OP_IF/OP_NOTIF argument was not minimal.
    MinimalIf,
    /// A failed signature check consumed a non-empty signature.
    SigNullFail,

    /// An upgradable NOP was executed under the discouragement flag.
    DiscourageUpgradableNops,
    /// An upgradable witness version was seen under the discouragement flag.
    DiscourageUpgradableWitnessProgram,
    /// A witness-v0 public key was not compressed.
    WitnessPubkeyType,

    /// Verification flags contained unknown bits.
    InvalidFlags,
}

impl fmt::Display for ScriptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            ScriptError::EvalFalse => {
                "Script evaluated without error but finished with a false/empty top stack element"
            }
            ScriptError::OpReturn => "OP_RETURN was encountered",
            ScriptError::ScriptSize => "Script is too big",
            ScriptError::PushSize => "Push value size limit exceeded",
            ScriptError::OpCount => "Operation limit exceeded",
            ScriptError::StackSize => "Stack size limit exceeded",
            ScriptError::SigCount => "Signature count negative or greater than pubkey count",
            ScriptError::PubkeyCount => "Pubkey count negative or limit exceeded",
            ScriptError::Verify => "Script failed an OP_VERIFY operation",
            ScriptError::EqualVerify => "Script failed an OP_EQUALVERIFY operation",
            ScriptError::CheckSigVerify => "Script failed an OP_CHECKSIGVERIFY operation",
            ScriptError::CheckMultiSigVerify => {
                "Script failed an OP_CHECKMULTISIGVERIFY operation"
            }
            ScriptError::NumEqualVerify => "Script failed an OP_NUMEQUALVERIFY operation",
            ScriptError::BadOpcode => "Opcode missing or not understood",
            ScriptError::DisabledOpcode => "Attempted to use a disabled opcode",
            ScriptError::InvalidStackOperation => {
                "Operation not valid with the current stack size"
            }
            ScriptError::InvalidAltstackOperation => {
                "Operation not valid with the current altstack size"
            }
            ScriptError::UnbalancedConditional => "Invalid OP_IF construction",
            ScriptError::NumOverflow => "Script number overflow",
            ScriptError::NegativeLockTime => "Negative locktime",
            ScriptError::UnsatisfiedLockTime => "Locktime requirement not satisfied",
            ScriptError::SigHashType => "Signature hash type missing or not understood",
            ScriptError::SigDer => "Non-canonical DER signature",
            ScriptError::MinimalData => "Data push larger than necessary",
            ScriptError::SigPushOnly => "Only push operators allowed in signatures",
            ScriptError::SigHighS => "Non-canonical signature: S value is unnecessarily high",
            ScriptError::SigNullDummy => "Dummy CHECKMULTISIG argument must be zero",
            ScriptError::PubkeyType => "Public key is neither compressed or uncompressed",
            ScriptError::CleanStack => "Stack size must be exactly one after execution",
            ScriptError::MinimalIf => "OP_IF/NOTIF argument must be minimal",
            ScriptError::SigNullFail => {
                "Signature must be zero for failed CHECK(MULTI)SIG operation"
            }
            ScriptError::DiscourageUpgradableNops => "NOPx reserved for soft-fork upgrades",
            ScriptError::DiscourageUpgradableWitnessProgram => {
                "Witness version reserved for soft-fork upgrades"
            }
            ScriptError::WitnessPubkeyType => "Using non-compressed keys in segwit",
            ScriptError::InvalidFlags => "Invalid verification flags",
        };
        f.write_str(msg)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ScriptError {}
