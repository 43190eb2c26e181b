// SPDX-License-Identifier: GPL-2.0
//! Benchmarks for filter validation time

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use filter_validator::core::opcode::Opcode;
use filter_validator::validate_bytecode;

fn emit_load_s64(buf: &mut Vec<u8>, reg: u8, value: i64) {
    buf.push(Opcode::LoadS64 as u8);
    buf.push(reg);
    buf.extend_from_slice(&value.to_le_bytes());
}

fn emit_logical(buf: &mut Vec<u8>, op: Opcode, skip_offset: u16) {
    buf.push(op as u8);
    buf.extend_from_slice(&skip_offset.to_le_bytes());
}

/// A short-circuit conjunction of `clauses` comparisons, each branch
/// skipping to the next clause.
fn conjunction_filter(clauses: usize) -> Vec<u8> {
    let mut buf = Vec::new();
    for i in 0..clauses {
        emit_load_s64(&mut buf, 0, i as i64);
        emit_load_s64(&mut buf, 1, 7);
        buf.push(Opcode::EqS64 as u8);
        let next_clause = buf.len() + 3;
        emit_logical(&mut buf, Opcode::And, next_clause as u16);
    }
    buf.push(Opcode::Return as u8);
    buf
}

fn bench_validation(c: &mut Criterion) {
    let small = conjunction_filter(4);
    let large = conjunction_filter(512);

    c.bench_function("validate_small_filter", |b| {
        b.iter(|| validate_bytecode(black_box(&small)).unwrap())
    });

    c.bench_function("validate_large_filter", |b| {
        b.iter(|| validate_bytecode(black_box(&large)).unwrap())
    });
}

criterion_group!(benches, bench_validation);
criterion_main!(benches);
