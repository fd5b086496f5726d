//! Signature-operation and lock-time semantics with a scripted checker.

use utxo_script::opcodes::*;
use utxo_script::{
    Builder, Interpreter, Script, ScriptError, SignatureChecker, SigVersion, Stack, StdHasher,
    VerifyFlags, SIGHASH_ALL, VERIFY_CHECKLOCKTIMEVERIFY, VERIFY_CHECKSEQUENCEVERIFY,
    VERIFY_DERSIG, VERIFY_DISCOURAGE_UPGRADABLE_NOPS, VERIFY_LOW_S, VERIFY_NONE, VERIFY_NULLDUMMY,
    VERIFY_NULLFAIL, VERIFY_STRICTENC,
};

/// Accepts exactly the (signature, pubkey) pairs it was built with, plus a
/// fixed verdict for lock-time and sequence checks.
struct KeyedChecker {
    pairs: Vec<(Vec<u8>, Vec<u8>)>,
    lock_time_ok: bool,
    sequence_ok: bool,
}

impl KeyedChecker {
    fn new(pairs: &[(&[u8], &[u8])]) -> Self {
        KeyedChecker {
            pairs: pairs
                .iter()
                .map(|(s, k)| (s.to_vec(), k.to_vec()))
                .collect(),
            lock_time_ok: true,
            sequence_ok: true,
        }
    }
}

impl SignatureChecker for KeyedChecker {
    fn check_sig(&self, sig: &[u8], pubkey: &[u8], _: &Script, _: SigVersion) -> bool {
        self.pairs.iter().any(|(s, k)| s == sig && k == pubkey)
    }

    fn check_lock_time(&self, _: i64) -> bool {
        self.lock_time_ok
    }

    fn check_sequence(&self, _: i64) -> bool {
        self.sequence_ok
    }
}

/// Accepts a signature only when the subscript it is handed matches.
struct SubscriptChecker {
    expected: Vec<u8>,
}

impl SignatureChecker for SubscriptChecker {
    fn check_sig(&self, _: &[u8], _: &[u8], subscript: &Script, _: SigVersion) -> bool {
        subscript.as_bytes() == self.expected
    }

    fn check_lock_time(&self, _: i64) -> bool {
        false
    }

    fn check_sequence(&self, _: i64) -> bool {
        false
    }
}

fn eval(
    script: &Script,
    checker: &dyn SignatureChecker,
    flags: u32,
) -> Result<Stack, ScriptError> {
    let interpreter = Interpreter::new(
        VerifyFlags::from_bits(flags).expect("test flags"),
        checker,
        &StdHasher,
    );
    let mut stack = Stack::new();
    interpreter.eval(&mut stack, script, SigVersion::Base)?;
    Ok(stack)
}

// Structurally valid DER signatures so the encoding flags stay quiet.
fn der_sig(r: u8) -> Vec<u8> {
    vec![0x30, 0x06, 0x02, 0x01, r, 0x02, 0x01, 0x01, SIGHASH_ALL]
}

fn compressed_key(tag: u8) -> Vec<u8> {
    let mut key = vec![0x02];
    key.extend_from_slice(&[tag; 32]);
    key
}

#[test]
fn checksig_accept_and_reject() {
    let sig = der_sig(1);
    let key = compressed_key(0xaa);
    let checker = KeyedChecker::new(&[(&sig[..], &key[..])]);

    let script = Builder::new()
        .push_data(&sig)
        .push_data(&key)
        .push_opcode(OP_CHECKSIG)
        .into_script();
    assert!(eval(&script, &checker, VERIFY_NONE).is_ok());

    // Same script, a checker that knows nothing.
    let stranger = KeyedChecker::new(&[]);
    assert_eq!(
        eval(&script, &stranger, VERIFY_NONE).unwrap_err(),
        ScriptError::EvalFalse
    );
    assert_eq!(
        eval(&script, &stranger, VERIFY_NULLFAIL).unwrap_err(),
        ScriptError::SigNullFail
    );

    // An empty signature fails cleanly even under NULLFAIL.
    let script = Builder::new()
        .push_data(&[])
        .push_data(&key)
        .push_opcode(OP_CHECKSIG)
        .into_script();
    assert_eq!(
        eval(&script, &stranger, VERIFY_NULLFAIL).unwrap_err(),
        ScriptError::EvalFalse
    );
}

#[test]
fn checksigverify() {
    let sig = der_sig(1);
    let key = compressed_key(0xaa);
    let script = Builder::new()
        .push_data(&sig)
        .push_data(&key)
        .push_opcode(OP_CHECKSIGVERIFY)
        .push_int(1)
        .into_script();

    let checker = KeyedChecker::new(&[(&sig[..], &key[..])]);
    assert!(eval(&script, &checker, VERIFY_NONE).is_ok());
    assert_eq!(
        eval(&script, &KeyedChecker::new(&[]), VERIFY_NONE).unwrap_err(),
        ScriptError::CheckSigVerify
    );
}

fn multisig_script(sigs: &[&[u8]], keys: &[&[u8]], dummy: &[u8]) -> Script {
    let mut builder = Builder::new().push_data(dummy);
    for sig in sigs {
        builder = builder.push_data(sig);
    }
    builder = builder.push_int(sigs.len() as i64);
    for key in keys {
        builder = builder.push_data(key);
    }
    builder
        .push_int(keys.len() as i64)
        .push_opcode(OP_CHECKMULTISIG)
        .into_script()
}

#[test]
fn multisig_two_of_three() {
    let sig1 = der_sig(1);
    let sig3 = der_sig(3);
    let key1 = compressed_key(0x01);
    let key2 = compressed_key(0x02);
    let key3 = compressed_key(0x03);
    let checker = KeyedChecker::new(&[(&sig1[..], &key1[..]), (&sig3[..], &key3[..])]);

    // Signatures in key order succeed; a matched signature may skip keys.
    let script = multisig_script(
        &[&sig1[..], &sig3[..]],
        &[&key1[..], &key2[..], &key3[..]],
        &[],
    );
    assert!(eval(&script, &checker, VERIFY_NONE).is_ok());

    // Reversed signatures cannot match: order is binding.
    let script = multisig_script(
        &[&sig3[..], &sig1[..]],
        &[&key1[..], &key2[..], &key3[..]],
        &[],
    );
    assert_eq!(
        eval(&script, &checker, VERIFY_NONE).unwrap_err(),
        ScriptError::EvalFalse
    );
}

#[test]
fn multisig_counts_and_dummy() {
    let key = compressed_key(0x01);
    let checker = KeyedChecker::new(&[]);

    // Trivial 0-of-0 succeeds.
    let script = multisig_script(&[], &[], &[]);
    assert!(eval(&script, &checker, VERIFY_NONE).is_ok());

    // More signatures than keys.
    let sig = der_sig(1);
    let script = Builder::new()
        .push_data(&[])
        .push_data(&sig)
        .push_int(1)
        .push_int(0)
        .push_opcode(OP_CHECKMULTISIG)
        .into_script();
    assert_eq!(
        eval(&script, &checker, VERIFY_NONE).unwrap_err(),
        ScriptError::SigCount
    );

    // 21 keys is over the multisig cap.
    let keys: Vec<Vec<u8>> = (0..21u8).map(compressed_key).collect();
    let key_refs: Vec<&[u8]> = keys.iter().map(Vec::as_slice).collect();
    let script = multisig_script(&[], &key_refs, &[]);
    assert_eq!(
        eval(&script, &checker, VERIFY_NONE).unwrap_err(),
        ScriptError::PubkeyCount
    );

    // The dummy is free-form until NULLDUMMY pins it.
    let script = multisig_script(&[], &[&key[..]], &[0x01]);
    assert!(eval(&script, &checker, VERIFY_NONE).is_ok());
    assert_eq!(
        eval(&script, &checker, VERIFY_NULLDUMMY).unwrap_err(),
        ScriptError::SigNullDummy
    );
}

#[test]
fn multisig_nullfail() {
    let sig = der_sig(1);
    let key = compressed_key(0x01);
    let checker = KeyedChecker::new(&[]);

    let script = multisig_script(&[&sig[..]], &[&key[..]], &[]);
    assert_eq!(
        eval(&script, &checker, VERIFY_NONE).unwrap_err(),
        ScriptError::EvalFalse
    );
    assert_eq!(
        eval(&script, &checker, VERIFY_NULLFAIL).unwrap_err(),
        ScriptError::SigNullFail
    );

    // All-empty signatures fail without tripping NULLFAIL.
    let script = multisig_script(&[&[]], &[&key[..]], &[]);
    assert_eq!(
        eval(&script, &checker, VERIFY_NULLFAIL).unwrap_err(),
        ScriptError::EvalFalse
    );
}

#[test]
fn multisig_verify_variant() {
    let key = compressed_key(0x01);
    let script = Builder::new()
        .push_data(&[])
        .push_int(0)
        .push_data(&key)
        .push_int(1)
        .push_opcode(OP_CHECKMULTISIGVERIFY)
        .push_int(1)
        .into_script();
    // 0-of-1 trivially succeeds, VERIFY consumes the result.
    assert!(eval(&script, &KeyedChecker::new(&[]), VERIFY_NONE).is_ok());

    let sig = der_sig(1);
    let script = Builder::new()
        .push_data(&[])
        .push_data(&sig)
        .push_int(1)
        .push_data(&key)
        .push_int(1)
        .push_opcode(OP_CHECKMULTISIGVERIFY)
        .push_int(1)
        .into_script();
    assert_eq!(
        eval(&script, &KeyedChecker::new(&[]), VERIFY_NONE).unwrap_err(),
        ScriptError::CheckMultiSigVerify
    );
}

#[test]
fn encoding_flags() {
    let key = compressed_key(0xaa);

    // Garbage signature bytes only fail under an encoding flag.
    let garbage = vec![0x01, 0x02, 0x03];
    let script = Builder::new()
        .push_data(&garbage)
        .push_data(&key)
        .push_opcode(OP_CHECKSIG)
        .into_script();
    assert_eq!(
        eval(&script, &KeyedChecker::new(&[]), VERIFY_NONE).unwrap_err(),
        ScriptError::EvalFalse
    );
    assert_eq!(
        eval(&script, &KeyedChecker::new(&[]), VERIFY_DERSIG).unwrap_err(),
        ScriptError::SigDer
    );

    // Undefined hash type under STRICTENC.
    let mut sig = der_sig(1);
    *sig.last_mut().unwrap() = 0x00;
    let script = Builder::new()
        .push_data(&sig)
        .push_data(&key)
        .push_opcode(OP_CHECKSIG)
        .into_script();
    assert_eq!(
        eval(&script, &KeyedChecker::new(&[]), VERIFY_STRICTENC).unwrap_err(),
        ScriptError::SigHashType
    );

    // Malformed pubkey under STRICTENC.
    let sig = der_sig(1);
    let script = Builder::new()
        .push_data(&sig)
        .push_data(&[0x05; 33])
        .push_opcode(OP_CHECKSIG)
        .into_script();
    assert_eq!(
        eval(&script, &KeyedChecker::new(&[]), VERIFY_STRICTENC).unwrap_err(),
        ScriptError::PubkeyType
    );

    // S = 0x7fff...ff, just above the half order, under LOW_S.
    let mut s = [0xff; 32];
    s[0] = 0x7f;
    let mut high_s = vec![0x30, 0x25, 0x02, 0x01, 0x01, 0x02, 0x20];
    high_s.extend_from_slice(&s);
    high_s.push(SIGHASH_ALL);
    let script = Builder::new()
        .push_data(&high_s)
        .push_data(&key)
        .push_opcode(OP_CHECKSIG)
        .into_script();
    assert_eq!(
        eval(&script, &KeyedChecker::new(&[]), VERIFY_LOW_S).unwrap_err(),
        ScriptError::SigHighS
    );
}

#[test]
fn code_separator_scopes_subscript() {
    let sig = der_sig(1);
    let key = compressed_key(0xaa);
    let tail = Builder::new()
        .push_data(&key)
        .push_opcode(OP_CHECKSIG)
        .into_script();

    // The checker sees only the bytes after the separator, with the
    // signature push scrubbed out.
    let script = Builder::new()
        .push_int(1)
        .push_opcode(OP_DROP)
        .push_opcode(OP_CODESEPARATOR)
        .push_data(&sig)
        .append(tail.as_bytes())
        .into_script();
    let checker = SubscriptChecker {
        expected: tail.into_bytes(),
    };
    assert!(eval(&script, &checker, VERIFY_NONE).is_ok());
}

#[test]
fn lock_time_verify() {
    let script = Builder::new()
        .push_int(500_000)
        .push_opcode(OP_CHECKLOCKTIMEVERIFY)
        .push_opcode(OP_DROP)
        .push_int(1)
        .into_script();

    let mut checker = KeyedChecker::new(&[]);
    assert!(eval(&script, &checker, VERIFY_CHECKLOCKTIMEVERIFY).is_ok());

    checker.lock_time_ok = false;
    assert_eq!(
        eval(&script, &checker, VERIFY_CHECKLOCKTIMEVERIFY).unwrap_err(),
        ScriptError::UnsatisfiedLockTime
    );

    // Without the flag the opcode is a NOP, discouraged or not.
    assert!(eval(&script, &checker, VERIFY_NONE).is_ok());
    assert_eq!(
        eval(&script, &checker, VERIFY_DISCOURAGE_UPGRADABLE_NOPS).unwrap_err(),
        ScriptError::DiscourageUpgradableNops
    );

    // Negative operand.
    let script = Builder::new()
        .push_int(-1)
        .push_opcode(OP_CHECKLOCKTIMEVERIFY)
        .into_script();
    assert_eq!(
        eval(&script, &checker, VERIFY_CHECKLOCKTIMEVERIFY).unwrap_err(),
        ScriptError::NegativeLockTime
    );

    // Five-byte operands are allowed, six-byte ones overflow.
    let script = Builder::new()
        .push_data(&[0xff, 0xff, 0xff, 0xff, 0x00])
        .push_opcode(OP_CHECKLOCKTIMEVERIFY)
        .push_opcode(OP_DROP)
        .push_int(1)
        .into_script();
    let checker = KeyedChecker::new(&[]);
    assert!(eval(&script, &checker, VERIFY_CHECKLOCKTIMEVERIFY).is_ok());
    let script = Builder::new()
        .push_data(&[0xff, 0xff, 0xff, 0xff, 0xff, 0x00])
        .push_opcode(OP_CHECKLOCKTIMEVERIFY)
        .into_script();
    assert_eq!(
        eval(&script, &checker, VERIFY_CHECKLOCKTIMEVERIFY).unwrap_err(),
        ScriptError::NumOverflow
    );

    // The operand stays on the stack.
    let stack = eval(
        &Builder::new()
            .push_int(7)
            .push_opcode(OP_CHECKLOCKTIMEVERIFY)
            .into_script(),
        &checker,
        VERIFY_CHECKLOCKTIMEVERIFY,
    )
    .unwrap();
    assert_eq!(stack.items(), &[vec![7]]);
}

#[test]
fn sequence_verify() {
    let script = Builder::new()
        .push_int(0x10)
        .push_opcode(OP_CHECKSEQUENCEVERIFY)
        .push_opcode(OP_DROP)
        .push_int(1)
        .into_script();

    let mut checker = KeyedChecker::new(&[]);
    assert!(eval(&script, &checker, VERIFY_CHECKSEQUENCEVERIFY).is_ok());

    checker.sequence_ok = false;
    assert_eq!(
        eval(&script, &checker, VERIFY_CHECKSEQUENCEVERIFY).unwrap_err(),
        ScriptError::UnsatisfiedLockTime
    );
    assert!(eval(&script, &checker, VERIFY_NONE).is_ok());

    let script = Builder::new()
        .push_int(-1)
        .push_opcode(OP_CHECKSEQUENCEVERIFY)
        .into_script();
    assert_eq!(
        eval(&script, &checker, VERIFY_CHECKSEQUENCEVERIFY).unwrap_err(),
        ScriptError::NegativeLockTime
    );
}

#[test]
fn multisig_keys_feed_op_count() {
    // Eleven 20-key multisigs cost 11 * (1 + 20) ops, over the 201 cap.
    let keys: Vec<Vec<u8>> = (0..20u8).map(compressed_key).collect();
    let key_refs: Vec<&[u8]> = keys.iter().map(Vec::as_slice).collect();
    let mut builder = Builder::new();
    for _ in 0..11 {
        builder = builder.push_data(&[]).push_int(0);
        for key in &key_refs {
            builder = builder.push_data(key);
        }
        builder = builder
            .push_int(key_refs.len() as i64)
            .push_opcode(OP_CHECKMULTISIG)
            .push_opcode(OP_DROP);
    }
    let script = builder.push_int(1).into_script();
    assert_eq!(
        eval(&script, &KeyedChecker::new(&[]), VERIFY_NONE).unwrap_err(),
        ScriptError::OpCount
    );
}
