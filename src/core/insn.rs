//! Decoded instruction representation and bounds-checked decoding.
//!
//! [`decode`] is the only way raw bytes become instructions: it recognizes
//! the opcode, verifies that the full encoding lies within the buffer, and
//! rejects reserved opcodes. The string-literal scan is fused with its
//! bounds check, so a decoded [`Insn`] always has a well-defined length.

use crate::core::error::{Result, ValidatorError};
use crate::core::opcode::{OpClass, Opcode};

// ============================================================================
// Encoded operand sizes (wire layout, little-endian)
// ============================================================================

/// Encoded size of a return op.
pub const RETURN_OP_SIZE: usize = 1;
/// Encoded size of a binary op (comparators and reserved arithmetic).
pub const BINARY_OP_SIZE: usize = 1;
/// Encoded size of a unary op.
pub const UNARY_OP_SIZE: usize = 2;
/// Encoded size of a logical op.
pub const LOGICAL_OP_SIZE: usize = 3;
/// Encoded size of a cast op.
pub const CAST_OP_SIZE: usize = 2;
/// Encoded size of a load op header (opcode and destination register).
pub const LOAD_OP_HEADER_SIZE: usize = 2;
/// Encoded size of a field-reference payload.
pub const FIELD_REF_SIZE: usize = 2;
/// Encoded size of an integer literal payload.
pub const LITERAL_NUMERIC_SIZE: usize = 8;
/// Encoded size of a float literal payload.
pub const LITERAL_DOUBLE_SIZE: usize = 8;

/// A decoded filter instruction.
///
/// Variants mirror the encoding families; operand payloads are carried
/// decoded so downstream passes never touch raw bytes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Insn {
    /// Terminator.
    Return,
    /// Binary comparator over the named registers R0/R1.
    Compare {
        /// One of the 24 comparator opcodes.
        op: Opcode,
    },
    /// Unary op over `reg`.
    Unary {
        /// One of the 9 unary opcodes.
        op: Opcode,
        /// Operand register index, unchecked at decode time.
        reg: u8,
    },
    /// Short-circuit `and`/`or`.
    Logical {
        /// `Opcode::And` or `Opcode::Or`.
        op: Opcode,
        /// Absolute byte offset of the merge target.
        skip_offset: u16,
    },
    /// Typed load of an event field into `reg`.
    LoadFieldRef {
        /// One of the 4 typed field-ref opcodes.
        op: Opcode,
        /// Destination register index, unchecked at decode time.
        reg: u8,
        /// Field offset into the event payload.
        offset: u16,
    },
    /// Inline string literal load into `reg`.
    LoadString {
        /// Destination register index, unchecked at decode time.
        reg: u8,
        /// Byte length of the literal, NUL excluded.
        len: usize,
    },
    /// Inline integer literal load into `reg`.
    LoadS64 {
        /// Destination register index, unchecked at decode time.
        reg: u8,
        /// Literal value.
        value: i64,
    },
    /// Inline float literal load into `reg`.
    LoadDouble {
        /// Destination register index, unchecked at decode time.
        reg: u8,
        /// Literal value.
        value: f64,
    },
    /// Cast of `reg`.
    Cast {
        /// One of the 3 cast opcodes.
        op: Opcode,
        /// Operand register index, unchecked at decode time.
        reg: u8,
    },
}

impl Insn {
    /// The opcode this instruction was decoded from.
    pub fn opcode(&self) -> Opcode {
        match *self {
            Insn::Return => Opcode::Return,
            Insn::Compare { op }
            | Insn::Unary { op, .. }
            | Insn::Logical { op, .. }
            | Insn::LoadFieldRef { op, .. }
            | Insn::Cast { op, .. } => op,
            Insn::LoadString { .. } => Opcode::LoadString,
            Insn::LoadS64 { .. } => Opcode::LoadS64,
            Insn::LoadDouble { .. } => Opcode::LoadDouble,
        }
    }

    /// Encoded length in bytes. Always at least 1, so the walk makes
    /// progress on every instruction.
    pub fn len(&self) -> usize {
        match *self {
            Insn::Return => RETURN_OP_SIZE,
            Insn::Compare { .. } => BINARY_OP_SIZE,
            Insn::Unary { .. } => UNARY_OP_SIZE,
            Insn::Logical { .. } => LOGICAL_OP_SIZE,
            Insn::LoadFieldRef { .. } => LOAD_OP_HEADER_SIZE + FIELD_REF_SIZE,
            Insn::LoadString { len, .. } => LOAD_OP_HEADER_SIZE + len + 1,
            Insn::LoadS64 { .. } => LOAD_OP_HEADER_SIZE + LITERAL_NUMERIC_SIZE,
            Insn::LoadDouble { .. } => LOAD_OP_HEADER_SIZE + LITERAL_DOUBLE_SIZE,
            Insn::Cast { .. } => CAST_OP_SIZE,
        }
    }
}

/// Return the `need` bytes of the instruction starting at `pc`, or fail
/// with a bounds error naming the overflowing span.
fn span(buf: &[u8], pc: usize, need: usize) -> Result<&[u8]> {
    buf.get(pc..pc + need)
        .ok_or(ValidatorError::InsnOutOfBounds {
            pc,
            need,
            len: buf.len(),
        })
}

/// Decode the instruction at byte offset `pc`.
///
/// Checks that the complete encoding lies within `buf` and rejects unknown
/// and reserved opcodes. A `pc` at or past the end of the buffer reports
/// the walk as running off the end.
pub fn decode(buf: &[u8], pc: usize) -> Result<Insn> {
    let op_byte = match buf.get(pc) {
        Some(&b) => b,
        None => return Err(ValidatorError::UnexpectedEnd { pc }),
    };
    let op = match Opcode::from_u8(op_byte) {
        Some(op) => op,
        None => {
            return Err(ValidatorError::UnknownOpcode {
                pc,
                opcode: op_byte,
            })
        }
    };

    match op.class() {
        OpClass::Return => Ok(Insn::Return),

        OpClass::ReservedArith | OpClass::ReservedLoad => {
            Err(ValidatorError::UnsupportedOpcode { pc, opcode: op })
        }

        OpClass::Compare => Ok(Insn::Compare { op }),

        OpClass::Unary => {
            let bytes = span(buf, pc, UNARY_OP_SIZE)?;
            Ok(Insn::Unary { op, reg: bytes[1] })
        }

        OpClass::Logical => {
            let bytes = span(buf, pc, LOGICAL_OP_SIZE)?;
            Ok(Insn::Logical {
                op,
                skip_offset: u16::from_le_bytes([bytes[1], bytes[2]]),
            })
        }

        OpClass::LoadFieldRef => {
            let bytes = span(buf, pc, LOAD_OP_HEADER_SIZE + FIELD_REF_SIZE)?;
            Ok(Insn::LoadFieldRef {
                op,
                reg: bytes[1],
                offset: u16::from_le_bytes([bytes[2], bytes[3]]),
            })
        }

        OpClass::LoadString => {
            let header = span(buf, pc, LOAD_OP_HEADER_SIZE)?;
            let reg = header[1];
            let data = &buf[pc + LOAD_OP_HEADER_SIZE..];
            match data.iter().position(|&b| b == 0) {
                Some(len) => Ok(Insn::LoadString { reg, len }),
                None => Err(ValidatorError::UnterminatedString { pc }),
            }
        }

        OpClass::LoadS64 => {
            let bytes = span(buf, pc, LOAD_OP_HEADER_SIZE + LITERAL_NUMERIC_SIZE)?;
            let mut payload = [0u8; LITERAL_NUMERIC_SIZE];
            payload.copy_from_slice(&bytes[LOAD_OP_HEADER_SIZE..]);
            Ok(Insn::LoadS64 {
                reg: bytes[1],
                value: i64::from_le_bytes(payload),
            })
        }

        OpClass::LoadDouble => {
            let bytes = span(buf, pc, LOAD_OP_HEADER_SIZE + LITERAL_DOUBLE_SIZE)?;
            let mut payload = [0u8; LITERAL_DOUBLE_SIZE];
            payload.copy_from_slice(&bytes[LOAD_OP_HEADER_SIZE..]);
            Ok(Insn::LoadDouble {
                reg: bytes[1],
                value: f64::from_le_bytes(payload),
            })
        }

        OpClass::Cast => {
            let bytes = span(buf, pc, CAST_OP_SIZE)?;
            Ok(Insn::Cast { op, reg: bytes[1] })
        }
    }
}
