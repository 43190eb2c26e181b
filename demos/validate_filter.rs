//! Validate a sample filter and show the trace log.
//!
//! Run with: `cargo run --example validate_filter`

use filter_validator::core::log::LogLevel;
use filter_validator::core::opcode::Opcode;
use filter_validator::verifier::Validator;

fn sample_filter() -> Vec<u8> {
    // load r0, field@24; load r1, 1000; r0 = (r0 > r1); return
    let mut bytecode = vec![Opcode::LoadFieldRefS64 as u8, 0];
    bytecode.extend_from_slice(&24u16.to_le_bytes());
    bytecode.extend_from_slice(&[Opcode::LoadS64 as u8, 1]);
    bytecode.extend_from_slice(&1000i64.to_le_bytes());
    bytecode.push(Opcode::GtS64 as u8);
    bytecode.push(Opcode::Return as u8);
    bytecode
}

fn main() {
    let bytecode = sample_filter();
    let mut validator = Validator::with_log(&bytecode, LogLevel::Trace);
    match validator.validate() {
        Ok(()) => println!("filter accepted"),
        Err(error) => println!("filter rejected: {}", error),
    }
    println!("--- log ---\n{}", validator.log().contents());

    // Corrupt the comparator into a reserved arithmetic op.
    let mut corrupted = bytecode;
    let gt_offset = corrupted.len() - 2;
    corrupted[gt_offset] = Opcode::Mul as u8;
    let mut validator = Validator::with_log(&corrupted, LogLevel::Trace);
    match validator.validate() {
        Ok(()) => println!("corrupted filter accepted"),
        Err(error) => println!("corrupted filter rejected: {}", error),
    }
    println!("--- log ---\n{}", validator.log().contents());
}
