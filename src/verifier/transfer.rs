//! Abstract transfer function
//!
//! After an instruction has passed the admissibility check for every
//! incoming edge, [`exec_insn`] applies its effect on the abstract register
//! file and yields the successor offset. Comparison and unary opcodes name
//! no destination in the encoding; their result lands in `R0` by
//! convention. The unary register field selects the operand that was type
//! checked, not where the result goes.

use crate::core::error::{Result, ValidatorError};
use crate::core::insn::Insn;
use crate::core::opcode::Opcode;
use crate::state::reg_state::{RegFile, RegType, VReg};
use crate::verifier::merge_points::MergePointTable;

/// Outcome of abstractly executing one instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Next {
    /// Fall through to the instruction at this byte offset.
    Continue(usize),
    /// `return` reached; the walk is complete.
    Stop,
}

/// Apply the effect of `insn` at offset `pc` on `regs` and compute the
/// successor offset.
///
/// Logical branches do not fork the walk: the taken edge is recorded as a
/// snapshot in `merge_points` under the skip target and the walk falls
/// through.
pub fn exec_insn(
    insn: &Insn,
    regs: &mut RegFile,
    merge_points: &mut MergePointTable,
    pc: usize,
) -> Result<Next> {
    let next_pc = pc + insn.len();

    match *insn {
        Insn::Return => return Ok(Next::Stop),

        Insn::Compare { op } => {
            let reg_type = if op.is_double_compare() {
                RegType::Double
            } else {
                RegType::S64
            };
            *regs.r0_mut() = VReg {
                reg_type,
                literal: false,
            };
        }

        Insn::Unary { op, .. } => {
            regs.r0_mut().reg_type = if op.is_double_unary() {
                RegType::Double
            } else {
                RegType::S64
            };
        }

        Insn::Logical { skip_offset, .. } => {
            merge_points.add(skip_offset as usize, regs.snapshot())?;
        }

        Insn::LoadFieldRef { op, reg, .. } => {
            let reg_type = match op {
                Opcode::LoadFieldRefS64 => RegType::S64,
                Opcode::LoadFieldRefDouble => RegType::Double,
                // String and sequence fields both read as strings.
                _ => RegType::String,
            };
            set_reg(regs, reg, reg_type, false, pc)?;
        }

        Insn::LoadString { reg, .. } => {
            set_reg(regs, reg, RegType::String, true, pc)?;
        }

        Insn::LoadS64 { reg, .. } => {
            set_reg(regs, reg, RegType::S64, true, pc)?;
        }

        Insn::LoadDouble { reg, .. } => {
            set_reg(regs, reg, RegType::Double, true, pc)?;
        }

        Insn::Cast { op, reg } => {
            if op != Opcode::CastNop {
                // The literal flag tracks the value's origin and survives
                // the cast.
                regs.read_mut(reg as usize)
                    .ok_or(ValidatorError::InvalidRegister { pc, reg })?
                    .reg_type = RegType::S64;
            }
        }
    }

    Ok(Next::Continue(next_pc))
}

fn set_reg(regs: &mut RegFile, reg: u8, reg_type: RegType, literal: bool, pc: usize) -> Result<()> {
    regs.set(reg as usize, reg_type, literal)
        .ok_or(ValidatorError::InvalidRegister { pc, reg })
}
