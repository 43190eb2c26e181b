//! Per-instruction admissibility checking
//!
//! [`check_insn_context`] is the type predicate consulted once per incoming
//! control-flow edge: the driver calls it with the falling-through register
//! file and once more for every merge-point snapshot targeting the current
//! offset. It never mutates state; the transfer function runs only after
//! every incoming edge has passed.

use crate::core::error::{Result, ValidatorError};
use crate::core::insn::Insn;
use crate::core::opcode::Opcode;
use crate::core::types::{REG_R0, REG_R1};
use crate::state::reg_state::{RegFile, RegType, VReg};

/// Check that the operand registers of `insn` are admissible in `regs`.
///
/// `pc` is the byte offset of the instruction, used for error reporting and
/// for the forward-branch rule.
pub fn check_insn_context(insn: &Insn, regs: &RegFile, pc: usize) -> Result<()> {
    match *insn {
        Insn::Return => Ok(()),

        Insn::Compare { op } => check_compare(op, regs, pc),

        Insn::Unary { op, reg } => check_unary(op, reg, regs, pc),

        Insn::Logical { op, skip_offset } => check_logical(op, skip_offset, regs, pc),

        // Loads only constrain the destination register index; the loaded
        // type is whatever the opcode says it is.
        Insn::LoadFieldRef { reg, .. }
        | Insn::LoadString { reg, .. }
        | Insn::LoadS64 { reg, .. }
        | Insn::LoadDouble { reg, .. } => operand(regs, reg, pc).map(|_| ()),

        Insn::Cast { op, reg } => check_cast(op, reg, regs, pc),
    }
}

/// Resolve a register operand, rejecting indices at or past the sentinel.
fn operand(regs: &RegFile, reg: u8, pc: usize) -> Result<&VReg> {
    regs.read(reg as usize)
        .ok_or(ValidatorError::InvalidRegister { pc, reg })
}

fn check_compare(op: Opcode, regs: &RegFile, pc: usize) -> Result<()> {
    let (r0, r1) = (regs.r0(), regs.r1());

    if op.is_generic_compare() {
        // Both operands numeric, or both strings. Cross-type mixing is a
        // mismatch; an undefined operand is its own failure.
        return match r0.reg_type {
            RegType::Unknown => Err(ValidatorError::UnknownRegType { pc, reg: REG_R0 }),
            RegType::String => match r1.reg_type {
                RegType::Unknown => Err(ValidatorError::UnknownRegType { pc, reg: REG_R1 }),
                RegType::String => Ok(()),
                RegType::S64 | RegType::Double => {
                    Err(ValidatorError::TypeMismatch { pc, opcode: op })
                }
            },
            RegType::S64 | RegType::Double => match r1.reg_type {
                RegType::Unknown => Err(ValidatorError::UnknownRegType { pc, reg: REG_R1 }),
                RegType::String => Err(ValidatorError::TypeMismatch { pc, opcode: op }),
                RegType::S64 | RegType::Double => Ok(()),
            },
        };
    }

    if op.is_string_compare() {
        if r0.reg_type != RegType::String || r1.reg_type != RegType::String {
            return Err(ValidatorError::TypeMismatch { pc, opcode: op });
        }
        return Ok(());
    }

    if op.is_s64_compare() {
        if r0.reg_type != RegType::S64 || r1.reg_type != RegType::S64 {
            return Err(ValidatorError::TypeMismatch { pc, opcode: op });
        }
        return Ok(());
    }

    // Double comparator: both operands numeric, at least one double.
    if !r0.reg_type.is_numeric() || !r1.reg_type.is_numeric() {
        return Err(ValidatorError::TypeMismatch { pc, opcode: op });
    }
    if r0.reg_type != RegType::Double && r1.reg_type != RegType::Double {
        return Err(ValidatorError::TypeMismatch { pc, opcode: op });
    }
    Ok(())
}

fn check_unary(op: Opcode, reg: u8, regs: &RegFile, pc: usize) -> Result<()> {
    let vreg = operand(regs, reg, pc)?;

    if op.is_generic_unary() {
        return match vreg.reg_type {
            RegType::Unknown => Err(ValidatorError::UnknownRegType {
                pc,
                reg: reg as usize,
            }),
            RegType::String => Err(ValidatorError::TypeMismatch { pc, opcode: op }),
            RegType::S64 | RegType::Double => Ok(()),
        };
    }

    let required = if op.is_s64_unary() {
        RegType::S64
    } else {
        RegType::Double
    };
    if vreg.reg_type != required {
        return Err(ValidatorError::TypeMismatch { pc, opcode: op });
    }
    Ok(())
}

fn check_logical(op: Opcode, skip_offset: u16, regs: &RegFile, pc: usize) -> Result<()> {
    // The short-circuit condition is the s64 truth value in R0.
    if regs.r0().reg_type != RegType::S64 {
        return Err(ValidatorError::TypeMismatch { pc, opcode: op });
    }

    // Forward-only control flow: a target at or before the branch itself
    // would form a loop.
    let target = skip_offset as usize;
    if target <= pc {
        return Err(ValidatorError::BackwardBranch { pc, target });
    }
    Ok(())
}

fn check_cast(op: Opcode, reg: u8, regs: &RegFile, pc: usize) -> Result<()> {
    if op == Opcode::CastNop {
        return Ok(());
    }

    let vreg = operand(regs, reg, pc)?;
    match vreg.reg_type {
        RegType::Unknown => Err(ValidatorError::UnknownRegType {
            pc,
            reg: reg as usize,
        }),
        RegType::String => Err(ValidatorError::TypeMismatch { pc, opcode: op }),
        RegType::S64 | RegType::Double => {
            if op == Opcode::CastDoubleToS64 && vreg.reg_type != RegType::Double {
                return Err(ValidatorError::TypeMismatch { pc, opcode: op });
            }
            Ok(())
        }
    }
}
