//! The script opcode byte table.
//!
//! Bytes `0x01..=0x4b` are direct pushes of that many bytes and have no named
//! constant. Everything else is listed here, including opcodes that are
//! disabled or reserved; the interpreter decides what each one means.

/// Push an empty byte vector (also called OP_FALSE).
pub const OP_0: u8 = 0x00;
/// The next byte holds the length of the data to push.
pub const OP_PUSHDATA1: u8 = 0x4c;
/// The next two bytes (little endian) hold the length of the data to push.
pub const OP_PUSHDATA2: u8 = 0x4d;
/// The next four bytes (little endian) hold the length of the data to push.
pub const OP_PUSHDATA4: u8 = 0x4e;
/// Push the number -1.
pub const OP_1NEGATE: u8 = 0x4f;
/// Reserved; fails the script when executed.
pub const OP_RESERVED: u8 = 0x50;
/// Push the number 1 (also called OP_TRUE).
pub const OP_1: u8 = 0x51;
pub const OP_2: u8 = 0x52;
pub const OP_3: u8 = 0x53;
pub const OP_4: u8 = 0x54;
pub const OP_5: u8 = 0x55;
pub const OP_6: u8 = 0x56;
pub const OP_7: u8 = 0x57;
pub const OP_8: u8 = 0x58;
pub const OP_9: u8 = 0x59;
pub const OP_10: u8 = 0x5a;
pub const OP_11: u8 = 0x5b;
pub const OP_12: u8 = 0x5c;
pub const OP_13: u8 = 0x5d;
pub const OP_14: u8 = 0x5e;
pub const OP_15: u8 = 0x5f;
pub const OP_16: u8 = 0x60;

/// Does nothing.
pub const OP_NOP: u8 = 0x61;
/// Reserved; fails the script when executed.
pub const OP_VER: u8 = 0x62;
/// Begin a conditional block, taken when the popped element is truthy.
pub const OP_IF: u8 = 0x63;
/// Begin a conditional block, taken when the popped element is falsy.
pub const OP_NOTIF: u8 = 0x64;
/// Reserved; fails the script even inside an unexecuted branch.
pub const OP_VERIF: u8 = 0x65;
/// Reserved; fails the script even inside an unexecuted branch.
pub const OP_VERNOTIF: u8 = 0x66;
/// Invert the innermost conditional branch.
pub const OP_ELSE: u8 = 0x67;
/// Close the innermost conditional block.
pub const OP_ENDIF: u8 = 0x68;
/// Fail unless the popped top element is truthy.
pub const OP_VERIFY: u8 = 0x69;
/// Unconditionally fail the script, marking the output unspendable.
pub const OP_RETURN: u8 = 0x6a;

pub const OP_TOALTSTACK: u8 = 0x6b;
pub const OP_FROMALTSTACK: u8 = 0x6c;
pub const OP_2DROP: u8 = 0x6d;
pub const OP_2DUP: u8 = 0x6e;
pub const OP_3DUP: u8 = 0x6f;
pub const OP_2OVER: u8 = 0x70;
pub const OP_2ROT: u8 = 0x71;
pub const OP_2SWAP: u8 = 0x72;
pub const OP_IFDUP: u8 = 0x73;
pub const OP_DEPTH: u8 = 0x74;
pub const OP_DROP: u8 = 0x75;
pub const OP_DUP: u8 = 0x76;
pub const OP_NIP: u8 = 0x77;
pub const OP_OVER: u8 = 0x78;
pub const OP_PICK: u8 = 0x79;
pub const OP_ROLL: u8 = 0x7a;
pub const OP_ROT: u8 = 0x7b;
pub const OP_SWAP: u8 = 0x7c;
pub const OP_TUCK: u8 = 0x7d;

/// Disabled splice opcode.
pub const OP_CAT: u8 = 0x7e;
/// Disabled splice opcode.
pub const OP_SUBSTR: u8 = 0x7f;
/// Disabled splice opcode.
pub const OP_LEFT: u8 = 0x80;
/// Disabled splice opcode.
pub const OP_RIGHT: u8 = 0x81;
/// Push the byte length of the top element.
pub const OP_SIZE: u8 = 0x82;

/// Disabled bitwise opcode.
pub const OP_INVERT: u8 = 0x83;
/// Disabled bitwise opcode.
pub const OP_AND: u8 = 0x84;
/// Disabled bitwise opcode.
pub const OP_OR: u8 = 0x85;
/// Disabled bitwise opcode.
pub const OP_XOR: u8 = 0x86;
pub const OP_EQUAL: u8 = 0x87;
pub const OP_EQUALVERIFY: u8 = 0x88;
/// Reserved; fails the script when executed.
pub const OP_RESERVED1: u8 = 0x89;
/// Reserved; fails the script when executed.
pub const OP_RESERVED2: u8 = 0x8a;

pub const OP_1ADD: u8 = 0x8b;
pub const OP_1SUB: u8 = 0x8c;
/// Disabled arithmetic opcode.
pub const OP_2MUL: u8 = 0x8d;
/// Disabled arithmetic opcode.
pub const OP_2DIV: u8 = 0x8e;
pub const OP_NEGATE: u8 = 0x8f;
pub const OP_ABS: u8 = 0x90;
pub const OP_NOT: u8 = 0x91;
pub const OP_0NOTEQUAL: u8 = 0x92;
pub const OP_ADD: u8 = 0x93;
pub const OP_SUB: u8 = 0x94;
/// Disabled arithmetic opcode.
pub const OP_MUL: u8 = 0x95;
/// Disabled arithmetic opcode.
pub const OP_DIV: u8 = 0x96;
/// Disabled arithmetic opcode.
pub const OP_MOD: u8 = 0x97;
/// Disabled arithmetic opcode.
pub const OP_LSHIFT: u8 = 0x98;
/// Disabled arithmetic opcode.
pub const OP_RSHIFT: u8 = 0x99;
pub const OP_BOOLAND: u8 = 0x9a;
pub const OP_BOOLOR: u8 = 0x9b;
pub const OP_NUMEQUAL: u8 = 0x9c;
pub const OP_NUMEQUALVERIFY: u8 = 0x9d;
pub const OP_NUMNOTEQUAL: u8 = 0x9e;
pub const OP_LESSTHAN: u8 = 0x9f;
pub const OP_GREATERTHAN: u8 = 0xa0;
pub const OP_LESSTHANOREQUAL: u8 = 0xa1;
pub const OP_GREATERTHANOREQUAL: u8 = 0xa2;
pub const OP_MIN: u8 = 0xa3;
pub const OP_MAX: u8 = 0xa4;
pub const OP_WITHIN: u8 = 0xa5;

pub const OP_RIPEMD160: u8 = 0xa6;
pub const OP_SHA1: u8 = 0xa7;
pub const OP_SHA256: u8 = 0xa8;
pub const OP_HASH160: u8 = 0xa9;
pub const OP_HASH256: u8 = 0xaa;
/// Marks the start of the subscript used for legacy signature checks.
pub const OP_CODESEPARATOR: u8 = 0xab;
pub const OP_CHECKSIG: u8 = 0xac;
pub const OP_CHECKSIGVERIFY: u8 = 0xad;
pub const OP_CHECKMULTISIG: u8 = 0xae;
pub const OP_CHECKMULTISIGVERIFY: u8 = 0xaf;

pub const OP_NOP1: u8 = 0xb0;
/// Absolute lock-time check (formerly OP_NOP2).
pub const OP_CHECKLOCKTIMEVERIFY: u8 = 0xb1;
/// Relative lock-time check (formerly OP_NOP3).
pub const OP_CHECKSEQUENCEVERIFY: u8 = 0xb2;
pub const OP_NOP4: u8 = 0xb3;
pub const OP_NOP5: u8 = 0xb4;
pub const OP_NOP6: u8 = 0xb5;
pub const OP_NOP7: u8 = 0xb6;
pub const OP_NOP8: u8 = 0xb7;
pub const OP_NOP9: u8 = 0xb8;
pub const OP_NOP10: u8 = 0xb9;

/// Highest defined opcode; everything above it is invalid.
pub const MAX_OPCODE: u8 = OP_NOP10;

/// Sentinel for "no opcode".
pub const OP_INVALIDOPCODE: u8 = 0xff;

/// Small integer pushed by a constant opcode: OP_0 -> 0, OP_1..OP_16 -> 1..16.
///
/// Callers must only pass one of those seventeen opcodes.
pub fn decode_op_n(opcode: u8) -> i64 {
    if opcode == OP_0 {
        return 0;
    }
    debug_assert!((OP_1..=OP_16).contains(&opcode));
    i64::from(opcode) - i64::from(OP_1 - 1)
}

/// Constant opcode pushing the small integer `n` (0..=16).
pub fn encode_op_n(n: i64) -> u8 {
    debug_assert!((0..=16).contains(&n));
    if n == 0 {
        OP_0
    } else {
        OP_1 - 1 + n as u8
    }
}

/// Opcodes removed from the protocol; their presence fails the script
/// unconditionally, even inside an unexecuted branch.
pub fn is_disabled(opcode: u8) -> bool {
    matches!(
        opcode,
        OP_CAT
            | OP_SUBSTR
            | OP_LEFT
            | OP_RIGHT
            | OP_INVERT
            | OP_AND
            | OP_OR
            | OP_XOR
            | OP_2MUL
            | OP_2DIV
            | OP_MUL
            | OP_DIV
            | OP_MOD
            | OP_LSHIFT
            | OP_RSHIFT
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_int_codec() {
        assert_eq!(decode_op_n(OP_0), 0);
        assert_eq!(decode_op_n(OP_1), 1);
        assert_eq!(decode_op_n(OP_16), 16);
        for n in 0..=16 {
            assert_eq!(decode_op_n(encode_op_n(n)), n);
        }
    }

    #[test]
    fn disabled_set() {
        let disabled = [
            OP_CAT, OP_SUBSTR, OP_LEFT, OP_RIGHT, OP_INVERT, OP_AND, OP_OR, OP_XOR, OP_2MUL,
            OP_2DIV, OP_MUL, OP_DIV, OP_MOD, OP_LSHIFT, OP_RSHIFT,
        ];
        for op in disabled {
            assert!(is_disabled(op), "0x{op:02x} should be disabled");
        }
        for op in [OP_SIZE, OP_EQUAL, OP_ADD, OP_SUB, OP_CHECKSIG, OP_NOP] {
            assert!(!is_disabled(op), "0x{op:02x} should be enabled");
        }
    }
}
