//! Abstract state tracked during validation.

pub mod reg_state;

pub use reg_state::*;
