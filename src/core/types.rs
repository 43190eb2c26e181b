//! Register indices and validation limits.

/// Number of abstract registers tracked by the validator.
pub const NR_REG: usize = 2;

/// Left comparison operand; implicit result register of comparison and
/// unary opcodes.
pub const REG_R0: usize = 0;

/// Right comparison operand.
pub const REG_R1: usize = 1;

/// First invalid register index. Any register operand carried by an
/// instruction must be strictly below this sentinel.
pub const REG_INVALID: usize = NR_REG;

/// Maximum validatable bytecode length in bytes.
///
/// Branch targets are 16-bit absolute offsets, so no branch can reach an
/// instruction at or past this bound; longer buffers are rejected up front.
pub const MAX_BYTECODE_LEN: usize = 65536;
