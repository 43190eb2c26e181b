// SPDX-License-Identifier: GPL-2.0

//! Error types for the filter bytecode validator

use core::fmt;

use crate::core::opcode::Opcode;

/// Result type alias for validator operations
pub type Result<T> = core::result::Result<T, ValidatorError>;

/// Errors that reject a filter bytecode program.
///
/// The first error encountered terminates validation and is surfaced
/// verbatim; there is no partial acceptance and no recovery.
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq)]
pub enum ValidatorError {
    UnknownOpcode { pc: usize, opcode: u8 },
    UnsupportedOpcode { pc: usize, opcode: Opcode },
    InsnOutOfBounds { pc: usize, need: usize, len: usize },
    UnterminatedString { pc: usize },
    UnexpectedEnd { pc: usize },
    ProgramTooLarge(usize),
    InvalidRegister { pc: usize, reg: u8 },
    UnknownRegType { pc: usize, reg: usize },
    TypeMismatch { pc: usize, opcode: Opcode },
    BackwardBranch { pc: usize, target: usize },
    ResidualMergePoints(usize),
    OutOfMemory,
}

/// The closed set of rejection kinds surfaced to embedders.
///
/// Several [`ValidatorError`] variants carry finer detail than the embedding
/// cares about; this classification is the stable contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Opcode byte outside the closed set.
    UnknownOpcode,
    /// Reserved opcode (arithmetic set, untyped field ref).
    UnsupportedOpcode,
    /// Instruction encoding extends past the end of the buffer. Also covers
    /// a missing string NUL, a walk that runs off the end without `return`,
    /// and a buffer too large for 16-bit branch targets.
    OutOfBounds,
    /// Register operand at or past the sentinel index.
    InvalidRegister,
    /// Operand types violate the opcode's admissibility, or an operand has
    /// no known type yet.
    TypeMismatch,
    /// Branch target not strictly forward.
    Loop,
    /// Merge points left unresolved after a successful walk.
    ResidualMergePoint,
    /// Scratch allocation failed.
    OutOfMemory,
}

impl fmt::Display for ValidatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidatorError::UnknownOpcode { pc, opcode } => {
                write!(f, "unknown bytecode op {} at offset {}", opcode, pc)
            }
            ValidatorError::UnsupportedOpcode { pc, opcode } => {
                write!(f, "unsupported bytecode op '{}' at offset {}", opcode.name(), pc)
            }
            ValidatorError::InsnOutOfBounds { pc, need, len } => write!(
                f,
                "instruction at offset {} overflows bytecode: needs {} bytes, {} total",
                pc, need, len
            ),
            ValidatorError::UnterminatedString { pc } => {
                write!(f, "string literal at offset {} is not NUL-terminated", pc)
            }
            ValidatorError::UnexpectedEnd { pc } => {
                write!(f, "bytecode ends at offset {} without return", pc)
            }
            ValidatorError::ProgramTooLarge(len) => {
                write!(f, "bytecode too large: {} bytes", len)
            }
            ValidatorError::InvalidRegister { pc, reg } => {
                write!(f, "invalid register {} at offset {}", reg, pc)
            }
            ValidatorError::UnknownRegType { pc, reg } => {
                write!(f, "register r{} has unknown type at offset {}", reg, pc)
            }
            ValidatorError::TypeMismatch { pc, opcode } => {
                write!(f, "type mismatch for '{}' operator at offset {}", opcode.name(), pc)
            }
            ValidatorError::BackwardBranch { pc, target } => write!(
                f,
                "loops are not allowed: branch at offset {} targets offset {}",
                pc, target
            ),
            ValidatorError::ResidualMergePoints(count) => {
                write!(f, "{} unexpected merge points after walk", count)
            }
            ValidatorError::OutOfMemory => write!(f, "out of memory"),
        }
    }
}

impl ValidatorError {
    /// Classify this error into the closed rejection-kind set.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ValidatorError::UnknownOpcode { .. } => ErrorKind::UnknownOpcode,
            ValidatorError::UnsupportedOpcode { .. } => ErrorKind::UnsupportedOpcode,
            ValidatorError::InsnOutOfBounds { .. }
            | ValidatorError::UnterminatedString { .. }
            | ValidatorError::UnexpectedEnd { .. }
            | ValidatorError::ProgramTooLarge(_) => ErrorKind::OutOfBounds,
            ValidatorError::InvalidRegister { .. } => ErrorKind::InvalidRegister,
            ValidatorError::UnknownRegType { .. } | ValidatorError::TypeMismatch { .. } => {
                ErrorKind::TypeMismatch
            }
            ValidatorError::BackwardBranch { .. } => ErrorKind::Loop,
            ValidatorError::ResidualMergePoints(_) => ErrorKind::ResidualMergePoint,
            ValidatorError::OutOfMemory => ErrorKind::OutOfMemory,
        }
    }

    /// Convert to the errno value the tracer daemon reports.
    ///
    /// Matches the original library convention:
    /// - ENOMEM (12): scratch allocation failed
    /// - EINVAL (22): everything else
    pub fn to_errno(&self) -> i32 {
        match self.kind() {
            ErrorKind::OutOfMemory => -12, // ENOMEM
            _ => -22,                      // EINVAL
        }
    }
}
