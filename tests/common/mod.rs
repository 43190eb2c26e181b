//! Bytecode emission helpers shared by the integration tests.
//!
//! Mirrors the wire layout the session controller emits: single-byte
//! opcodes, little-endian multi-byte operands, NUL-terminated strings.

#![allow(dead_code)]

use filter_validator::core::opcode::Opcode;

/// Growable bytecode buffer.
pub struct Bytecode {
    buf: Vec<u8>,
}

impl Bytecode {
    pub fn new() -> Self {
        Self { buf: Vec::new() }
    }

    /// Byte offset the next instruction will be emitted at.
    pub fn offset(&self) -> usize {
        self.buf.len()
    }

    pub fn bytes(&self) -> &[u8] {
        &self.buf
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    /// Append raw bytes, for deliberately malformed encodings.
    pub fn raw(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Emit a header-only op (comparators, reserved arithmetic).
    pub fn op(&mut self, op: Opcode) {
        self.buf.push(op as u8);
    }

    pub fn ret(&mut self) {
        self.buf.push(Opcode::Return as u8);
    }

    pub fn unary(&mut self, op: Opcode, reg: u8) {
        self.buf.push(op as u8);
        self.buf.push(reg);
    }

    pub fn logical(&mut self, op: Opcode, skip_offset: u16) {
        self.buf.push(op as u8);
        self.buf.extend_from_slice(&skip_offset.to_le_bytes());
    }

    pub fn cast(&mut self, op: Opcode, reg: u8) {
        self.buf.push(op as u8);
        self.buf.push(reg);
    }

    pub fn load_field_ref(&mut self, op: Opcode, reg: u8, offset: u16) {
        self.buf.push(op as u8);
        self.buf.push(reg);
        self.buf.extend_from_slice(&offset.to_le_bytes());
    }

    pub fn load_string(&mut self, reg: u8, value: &str) {
        self.buf.push(Opcode::LoadString as u8);
        self.buf.push(reg);
        self.buf.extend_from_slice(value.as_bytes());
        self.buf.push(0);
    }

    pub fn load_s64(&mut self, reg: u8, value: i64) {
        self.buf.push(Opcode::LoadS64 as u8);
        self.buf.push(reg);
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    pub fn load_double(&mut self, reg: u8, value: f64) {
        self.buf.push(Opcode::LoadDouble as u8);
        self.buf.push(reg);
        self.buf.extend_from_slice(&value.to_le_bytes());
    }
}
