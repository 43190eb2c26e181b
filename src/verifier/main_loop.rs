//! Main validation walk
//!
//! The driver walks the buffer front to back exactly once. For each
//! instruction it:
//!
//! 1. bounds-checks and decodes the encoding at the current offset;
//! 2. drains the merge-point snapshots targeting that offset and checks
//!    the instruction against each of them;
//! 3. checks the instruction against the falling-through register file;
//! 4. runs the transfer function, which may record a new merge point and
//!    yields the next offset, or stops at `return`.
//!
//! A walk that runs off the end without `return` is rejected, as are
//! merge points left unresolved after a successful walk: those branches
//! referenced offsets the driver never decoded.

use crate::core::error::{Result, ValidatorError};
use crate::core::insn::{decode, Insn};
use crate::core::log::{log_error, log_insn, LogLevel, ValidatorLog};
use crate::core::types::MAX_BYTECODE_LEN;
use crate::check::context::check_insn_context;
use crate::state::reg_state::RegFile;
use crate::verifier::merge_points::MergePointTable;
use crate::verifier::transfer::{exec_insn, Next};

/// Single-use validator for one bytecode buffer.
///
/// All scratch state (register file, merge table, log buffer) lives inside
/// the validator and is released when it is dropped, on success and on
/// failure alike. Nothing survives across validations.
pub struct Validator<'a> {
    bytecode: &'a [u8],
    regs: RegFile,
    merge_points: MergePointTable,
    log: ValidatorLog,
}

impl<'a> Validator<'a> {
    /// Create a validator for `bytecode` with logging off.
    pub fn new(bytecode: &'a [u8]) -> Self {
        Self::with_log(bytecode, LogLevel::Off)
    }

    /// Create a validator that records a log at `level`.
    pub fn with_log(bytecode: &'a [u8], level: LogLevel) -> Self {
        Self {
            bytecode,
            regs: RegFile::new(),
            merge_points: MergePointTable::new(),
            log: ValidatorLog::new(level),
        }
    }

    /// The log recorded by [`Validator::validate`].
    pub fn log(&self) -> &ValidatorLog {
        &self.log
    }

    /// Run the validation walk.
    ///
    /// The first failure terminates the walk and is returned verbatim.
    pub fn validate(&mut self) -> Result<()> {
        let result = self.walk();
        if let Err(error) = &result {
            log_error(&mut self.log, error);
        }
        result
    }

    fn walk(&mut self) -> Result<()> {
        if self.bytecode.len() > MAX_BYTECODE_LEN {
            return Err(ValidatorError::ProgramTooLarge(self.bytecode.len()));
        }

        let mut pc = 0;
        loop {
            // Rejects the empty program and any walk that runs past the
            // last instruction without hitting a terminator.
            let insn = decode(self.bytecode, pc)?;
            log_insn(&mut self.log, &insn, pc, &self.regs);

            // Every incoming edge is checked on its own: first the states
            // branches would inject here, then the falling-through state.
            for snapshot in self.merge_points.drain(pc) {
                self.log.record(
                    LogLevel::Debug,
                    format_args!("merge point at offset {} validated", pc),
                );
                check_insn_context(&insn, &snapshot, pc)?;
            }
            check_insn_context(&insn, &self.regs, pc)?;

            if let Insn::Logical { skip_offset, .. } = insn {
                self.log.record(
                    LogLevel::Debug,
                    format_args!("merge point added for offset {}", skip_offset),
                );
            }

            match exec_insn(&insn, &mut self.regs, &mut self.merge_points, pc)? {
                Next::Stop => break,
                Next::Continue(next_pc) => pc = next_pc,
            }
        }

        if !self.merge_points.is_empty() {
            // Branches targeted offsets the walk never reached.
            return Err(ValidatorError::ResidualMergePoints(self.merge_points.len()));
        }
        Ok(())
    }
}

/// Validate a filter bytecode buffer.
///
/// This is the sole entry point for embedders: it accepts the raw bytes as
/// delivered by the session protocol (no framing, no signatures) and
/// returns `Ok(())` exactly when the program is safe to hand to the
/// interpreter.
pub fn validate_bytecode(bytecode: &[u8]) -> Result<()> {
    Validator::new(bytecode).validate()
}
