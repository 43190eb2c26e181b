//! # Filter Bytecode Validator
//!
//! A static validator for trace filter bytecode.
//!
//! Trace filters arrive as untrusted byte buffers from a remote session
//! controller and are later interpreted against event fields on the trace
//! fast path. Before a filter is allowed to run, this crate proves, in a
//! single forward pass over the buffer, that:
//!
//! - **Bounds**: every instruction's encoding lies entirely within the
//!   buffer, including the NUL terminator of inline string literals.
//! - **Types**: every instruction operates on registers whose semantic
//!   types are admissible for its opcode.
//! - **Acyclicity**: all short-circuit branches target strictly forward
//!   offsets, so the control-flow graph is a DAG and interpretation
//!   terminates.
//!
//! Any failure rejects the whole program; there is no partial acceptance.
//!
//! ## Quick Start
//!
//! ```rust
//! use filter_validator::core::opcode::Opcode;
//! use filter_validator::validate_bytecode;
//!
//! // load r0, 7; load r1, 7; r0 = (r0 == r1); return
//! let mut bytecode = vec![Opcode::LoadS64 as u8, 0];
//! bytecode.extend_from_slice(&7i64.to_le_bytes());
//! bytecode.extend_from_slice(&[Opcode::LoadS64 as u8, 1]);
//! bytecode.extend_from_slice(&7i64.to_le_bytes());
//! bytecode.push(Opcode::Eq as u8);
//! bytecode.push(Opcode::Return as u8);
//!
//! assert!(validate_bytecode(&bytecode).is_ok());
//!
//! // Truncated bytecode is always rejected, never silently accepted.
//! assert!(validate_bytecode(&bytecode[..4]).is_err());
//! ```
//!
//! ## Module Structure
//!
//! - [`core`]: opcodes, instruction decoding, error definitions, and logging
//! - [`state`]: abstract register file (semantic type tags, snapshots)
//! - [`check`]: per-opcode admissibility checking
//! - [`verifier`]: merge-point table, transfer function, and the driver
//!
//! ## no_std Support
//!
//! The validator supports `no_std` for embedding into constrained tracer
//! runtimes. Disable default features:
//!
//! ```toml
//! [dependencies]
//! filter-validator = { version = "0.1", default-features = false }
//! ```

// Conditional no_std support
#![cfg_attr(not(feature = "std"), no_std)]

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
// The validator itself is safe code; only the FFI surface opts back in.
#![deny(unsafe_code)]

// When no_std, use alloc crate for collections
#[cfg(not(feature = "std"))]
extern crate alloc;

// Re-export alloc types for internal use
#[cfg(not(feature = "std"))]
#[allow(unused_imports)]
pub(crate) mod stdlib {
    pub use alloc::collections::BTreeMap;
    pub use alloc::format;
    pub use alloc::string::{String, ToString};
    pub use alloc::vec;
    pub use alloc::vec::Vec;
}

#[cfg(feature = "std")]
#[allow(unused_imports)]
pub(crate) mod stdlib {
    pub use std::collections::BTreeMap;
    pub use std::format;
    pub use std::string::{String, ToString};
    pub use std::vec;
    pub use std::vec::Vec;
}

/// Core types, opcodes, instruction decoding, errors, and logging
pub mod core;

/// Abstract register state tracking
pub mod state;

/// Per-instruction admissibility checking
pub mod check;

/// Merge-point table, transfer function, and the validation driver
pub mod verifier;

/// C FFI bindings for tracer daemon integration
#[cfg(feature = "ffi")]
pub mod ffi;

// ============================================================================
// Prelude - commonly used re-exports
// ============================================================================

/// Commonly used types and functions
pub mod prelude {
    pub use crate::core::error::{ErrorKind, Result, ValidatorError};
    pub use crate::core::insn::Insn;
    pub use crate::core::opcode::Opcode;
    pub use crate::state::reg_state::{RegFile, RegType, VReg};
    pub use crate::verifier::{validate_bytecode, Validator};
}

// Re-export the entry point and error types at crate root for convenience
pub use crate::core::error::{ErrorKind, Result, ValidatorError};
pub use crate::verifier::validate_bytecode;
