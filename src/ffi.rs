// SPDX-License-Identifier: GPL-2.0

//! C FFI bindings for tracer daemon integration
//!
//! The tracer daemon links the validator in as a library and calls it with
//! the raw buffer received from the session controller, before the filter
//! is attached to an event.
//!
//! ## Usage from C
//!
//! ```c
//! int ret = filter_validator_validate(bytecode, len);
//! if (ret)
//!         return ret;     /* -EINVAL or -ENOMEM */
//! ```
//!
//! ## Safety
//!
//! The caller must pass a pointer valid for reads of `len` bytes for the
//! duration of the call. The validator never writes through the pointer
//! and keeps no reference to it after returning.

#![allow(unsafe_code)]

use core::slice;

use crate::verifier::validate_bytecode;

/// Validate `len` bytes of filter bytecode at `data`.
///
/// Returns 0 when the program is valid, a negative errno otherwise:
/// -EINVAL for any rejected program (including a NULL `data`), -ENOMEM if
/// validation scratch could not be allocated.
#[no_mangle]
pub unsafe extern "C" fn filter_validator_validate(data: *const u8, len: usize) -> i32 {
    if data.is_null() {
        return -22; // EINVAL
    }

    let bytecode = slice::from_raw_parts(data, len);
    match validate_bytecode(bytecode) {
        Ok(()) => 0,
        Err(error) => error.to_errno(),
    }
}
