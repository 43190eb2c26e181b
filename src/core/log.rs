//! Verbose logging for the validator
//!
//! Validation runs at a trust boundary and must never print; this module
//! provides a bounded in-memory record of the walk that the embedding can
//! read back afterwards to understand why a filter was accepted or
//! rejected.
//!
//! The walk is a single forward pass, so the record is append-only:
//! nothing ever rewinds or clears it. Lines that would grow the record
//! past its cap are dropped and counted, so a hostile program cannot
//! inflate the log through sheer instruction count.

use core::fmt;
use core::fmt::Write;

use crate::core::error::ValidatorError;
use crate::core::insn::Insn;
use crate::state::reg_state::RegFile;
use crate::stdlib::String;

/// Log level for validator output
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum LogLevel {
    /// No logging
    #[default]
    Off = 0,
    /// Only rejections
    Error = 1,
    /// Rejections and merge-point traffic
    Debug = 2,
    /// Every instruction with the register state it sees
    Trace = 3,
}

/// Cap on the recorded log, in bytes.
pub const DEFAULT_LOG_CAPACITY: usize = 64 * 1024;

/// Bounded record of one validation walk.
///
/// The driver appends lines at the levels admitted by the configured
/// threshold; the embedding reads the record back once validation
/// returns. A line that does not fit under the cap is dropped whole and
/// counted, never stored partially.
#[derive(Debug, Clone)]
pub struct ValidatorLog {
    level: LogLevel,
    buffer: String,
    capacity: usize,
    dropped: usize,
}

impl ValidatorLog {
    /// Create a record with the default capacity.
    pub fn new(level: LogLevel) -> Self {
        Self::with_capacity(level, DEFAULT_LOG_CAPACITY)
    }

    /// Create a record capped at `capacity` bytes.
    pub fn with_capacity(level: LogLevel, capacity: usize) -> Self {
        Self {
            level,
            buffer: String::new(),
            capacity,
            dropped: 0,
        }
    }

    /// Whether lines at `level` are admitted.
    pub fn enabled(&self, level: LogLevel) -> bool {
        level != LogLevel::Off && level <= self.level
    }

    /// Append one line, if `level` is admitted and the line fits.
    ///
    /// Takes pre-built format arguments so that nothing is formatted, and
    /// nothing allocates, unless the line is admitted.
    pub fn record(&mut self, level: LogLevel, args: fmt::Arguments<'_>) {
        if !self.enabled(level) {
            return;
        }

        let mark = self.buffer.len();
        let _ = write!(self.buffer, "{}", args);
        if self.buffer.len() + 1 > self.capacity {
            self.buffer.truncate(mark);
            self.dropped += 1;
            return;
        }
        self.buffer.push('\n');
    }

    /// The recorded lines.
    pub fn contents(&self) -> &str {
        &self.buffer
    }

    /// Number of admitted lines dropped because the record was full.
    pub fn dropped(&self) -> usize {
        self.dropped
    }
}

/// Format the register file for logging: `r0=s64(lit) r1=string`
pub fn fmt_regs(regs: &RegFile) -> String {
    let mut s = String::new();

    for (i, reg) in regs.iter().enumerate() {
        if i > 0 {
            s.push(' ');
        }
        let _ = write!(s, "r{}={}", i, reg.reg_type.name());
        if reg.literal {
            s.push_str("(lit)");
        }
    }

    s
}

/// Format an instruction for logging
pub fn fmt_insn(insn: &Insn, pc: usize) -> String {
    let mut s = String::new();
    let _ = write!(s, "{}: {}", pc, insn.opcode().name());

    match *insn {
        Insn::Return | Insn::Compare { .. } => {}
        Insn::Unary { reg, .. } | Insn::Cast { reg, .. } => {
            let _ = write!(s, " r{}", reg);
        }
        Insn::Logical { skip_offset, .. } => {
            let _ = write!(s, " -> {}", skip_offset);
        }
        Insn::LoadFieldRef { reg, offset, .. } => {
            let _ = write!(s, " r{}, field+{}", reg, offset);
        }
        Insn::LoadString { reg, len } => {
            let _ = write!(s, " r{}, {} bytes", reg, len);
        }
        Insn::LoadS64 { reg, value } => {
            let _ = write!(s, " r{}, {}", reg, value);
        }
        Insn::LoadDouble { reg, value } => {
            let _ = write!(s, " r{}, {}", reg, value);
        }
    }

    s
}

/// Record the instruction about to be validated and the state it sees.
pub fn log_insn(log: &mut ValidatorLog, insn: &Insn, pc: usize, regs: &RegFile) {
    // The formatters build strings; skip them unless the line is admitted.
    if !log.enabled(LogLevel::Trace) {
        return;
    }

    log.record(
        LogLevel::Trace,
        format_args!("{} ; {}", fmt_insn(insn, pc), fmt_regs(regs)),
    );
}

/// Record the rejection that terminated the walk.
pub fn log_error(log: &mut ValidatorLog, error: &ValidatorError) {
    log.record(LogLevel::Error, format_args!("rejected: {}", error));
}
