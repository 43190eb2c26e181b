//! Core types and constants for the filter bytecode validator.
//!
//! This module contains the register-index and limit constants, the closed
//! opcode set, the decoded instruction representation with its bounds-checked
//! decoder, error definitions, and logging.

pub mod types;
pub mod opcode;
pub mod error;
pub mod log;
pub mod insn;

pub use types::*;
pub use opcode::*;
pub use error::*;
pub use log::*;
pub use insn::*;
