//! Tests for filter_validator::check::context

use filter_validator::check::context::check_insn_context;
use filter_validator::core::insn::Insn;
use filter_validator::core::opcode::Opcode;
use filter_validator::state::reg_state::{RegFile, RegType};
use filter_validator::{ErrorKind, ValidatorError};

fn regs(r0: RegType, r1: RegType) -> RegFile {
    let mut file = RegFile::new();
    file.set(0, r0, false).unwrap();
    file.set(1, r1, false).unwrap();
    file
}

fn compare(op: Opcode) -> Insn {
    Insn::Compare { op }
}

#[test]
fn test_return_has_no_constraint() {
    let file = RegFile::new();
    assert!(check_insn_context(&Insn::Return, &file, 0).is_ok());
}

#[test]
fn test_generic_compare_numeric_pairs() {
    for (r0, r1) in [
        (RegType::S64, RegType::S64),
        (RegType::S64, RegType::Double),
        (RegType::Double, RegType::S64),
        (RegType::Double, RegType::Double),
    ] {
        assert!(check_insn_context(&compare(Opcode::Eq), &regs(r0, r1), 0).is_ok());
    }
}

#[test]
fn test_generic_compare_strings() {
    let file = regs(RegType::String, RegType::String);
    assert!(check_insn_context(&compare(Opcode::Ne), &file, 0).is_ok());
}

#[test]
fn test_generic_compare_cross_type_is_mismatch() {
    // String against numeric is a mismatch, not an unknown-type failure.
    let err = check_insn_context(&compare(Opcode::Eq), &regs(RegType::String, RegType::S64), 4)
        .unwrap_err();
    assert_eq!(
        err,
        ValidatorError::TypeMismatch {
            pc: 4,
            opcode: Opcode::Eq
        }
    );

    let err = check_insn_context(&compare(Opcode::Gt), &regs(RegType::Double, RegType::String), 4)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TypeMismatch);
}

#[test]
fn test_generic_compare_unknown_operand() {
    let err = check_insn_context(&compare(Opcode::Eq), &RegFile::new(), 0).unwrap_err();
    assert_eq!(err, ValidatorError::UnknownRegType { pc: 0, reg: 0 });

    let err = check_insn_context(&compare(Opcode::Eq), &regs(RegType::S64, RegType::Unknown), 0)
        .unwrap_err();
    assert_eq!(err, ValidatorError::UnknownRegType { pc: 0, reg: 1 });
}

#[test]
fn test_string_compare_requires_both_strings() {
    let insn = compare(Opcode::LeString);
    assert!(check_insn_context(&insn, &regs(RegType::String, RegType::String), 0).is_ok());

    for (r0, r1) in [
        (RegType::S64, RegType::String),
        (RegType::String, RegType::Double),
        (RegType::Unknown, RegType::String),
    ] {
        let err = check_insn_context(&insn, &regs(r0, r1), 0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TypeMismatch);
    }
}

#[test]
fn test_s64_compare_requires_both_s64() {
    let insn = compare(Opcode::GeS64);
    assert!(check_insn_context(&insn, &regs(RegType::S64, RegType::S64), 0).is_ok());

    let err =
        check_insn_context(&insn, &regs(RegType::S64, RegType::Double), 0).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TypeMismatch);
}

#[test]
fn test_double_compare_needs_one_double() {
    let insn = compare(Opcode::LtDouble);
    assert!(check_insn_context(&insn, &regs(RegType::Double, RegType::Double), 0).is_ok());
    assert!(check_insn_context(&insn, &regs(RegType::S64, RegType::Double), 0).is_ok());
    assert!(check_insn_context(&insn, &regs(RegType::Double, RegType::S64), 0).is_ok());

    // Both s64 would be silently imprecise; rejected.
    let err = check_insn_context(&insn, &regs(RegType::S64, RegType::S64), 0).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TypeMismatch);

    let err = check_insn_context(&insn, &regs(RegType::String, RegType::Double), 0).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TypeMismatch);
}

#[test]
fn test_generic_unary_operand_types() {
    let insn = Insn::Unary {
        op: Opcode::UnaryMinus,
        reg: 0,
    };
    assert!(check_insn_context(&insn, &regs(RegType::S64, RegType::Unknown), 0).is_ok());
    assert!(check_insn_context(&insn, &regs(RegType::Double, RegType::Unknown), 0).is_ok());

    let err =
        check_insn_context(&insn, &regs(RegType::String, RegType::Unknown), 0).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TypeMismatch);

    let err = check_insn_context(&insn, &RegFile::new(), 0).unwrap_err();
    assert_eq!(err, ValidatorError::UnknownRegType { pc: 0, reg: 0 });
}

#[test]
fn test_unary_checks_the_named_operand() {
    // The register field selects the operand, r1 here.
    let insn = Insn::Unary {
        op: Opcode::UnaryNot,
        reg: 1,
    };
    assert!(check_insn_context(&insn, &regs(RegType::Unknown, RegType::S64), 0).is_ok());
}

#[test]
fn test_typed_unary_variants() {
    let s64 = Insn::Unary {
        op: Opcode::UnaryPlusS64,
        reg: 0,
    };
    assert!(check_insn_context(&s64, &regs(RegType::S64, RegType::Unknown), 0).is_ok());
    let err = check_insn_context(&s64, &regs(RegType::Double, RegType::Unknown), 0).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TypeMismatch);

    let double = Insn::Unary {
        op: Opcode::UnaryNotDouble,
        reg: 0,
    };
    assert!(check_insn_context(&double, &regs(RegType::Double, RegType::Unknown), 0).is_ok());
    let err =
        check_insn_context(&double, &regs(RegType::S64, RegType::Unknown), 0).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TypeMismatch);
}

#[test]
fn test_register_index_sentinel() {
    for insn in [
        Insn::Unary {
            op: Opcode::UnaryMinus,
            reg: 2,
        },
        Insn::LoadS64 { reg: 2, value: 0 },
        Insn::LoadString { reg: 255, len: 1 },
        Insn::Cast {
            op: Opcode::CastToS64,
            reg: 2,
        },
    ] {
        let err = check_insn_context(&insn, &regs(RegType::S64, RegType::S64), 8).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidRegister);
    }
}

#[test]
fn test_loads_only_constrain_the_index() {
    let file = RegFile::new();
    assert!(check_insn_context(&Insn::LoadS64 { reg: 0, value: 1 }, &file, 0).is_ok());
    assert!(check_insn_context(&Insn::LoadString { reg: 1, len: 3 }, &file, 0).is_ok());
    assert!(check_insn_context(
        &Insn::LoadFieldRef {
            op: Opcode::LoadFieldRefDouble,
            reg: 1,
            offset: 64
        },
        &file,
        0
    )
    .is_ok());
}

#[test]
fn test_logical_requires_s64_condition() {
    let insn = Insn::Logical {
        op: Opcode::And,
        skip_offset: 40,
    };
    assert!(check_insn_context(&insn, &regs(RegType::S64, RegType::Unknown), 10).is_ok());

    for r0 in [RegType::Double, RegType::String, RegType::Unknown] {
        let err = check_insn_context(&insn, &regs(r0, RegType::Unknown), 10).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TypeMismatch);
    }
}

#[test]
fn test_logical_target_must_be_strictly_forward() {
    let file = regs(RegType::S64, RegType::Unknown);

    // Target equal to the branch offset is a self-loop.
    let insn = Insn::Logical {
        op: Opcode::And,
        skip_offset: 10,
    };
    let err = check_insn_context(&insn, &file, 10).unwrap_err();
    assert_eq!(err, ValidatorError::BackwardBranch { pc: 10, target: 10 });
    assert_eq!(err.kind(), ErrorKind::Loop);

    // Backward target.
    let insn = Insn::Logical {
        op: Opcode::Or,
        skip_offset: 3,
    };
    let err = check_insn_context(&insn, &file, 10).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Loop);

    // One byte forward is acyclic, even if it lands inside this
    // instruction's own encoding; the walk then never reaches it and the
    // residue check rejects the program instead.
    let insn = Insn::Logical {
        op: Opcode::Or,
        skip_offset: 11,
    };
    assert!(check_insn_context(&insn, &file, 10).is_ok());
}

#[test]
fn test_cast_to_s64_operand_types() {
    let insn = Insn::Cast {
        op: Opcode::CastToS64,
        reg: 0,
    };
    assert!(check_insn_context(&insn, &regs(RegType::S64, RegType::Unknown), 0).is_ok());
    assert!(check_insn_context(&insn, &regs(RegType::Double, RegType::Unknown), 0).is_ok());

    let err =
        check_insn_context(&insn, &regs(RegType::String, RegType::Unknown), 0).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TypeMismatch);

    let err = check_insn_context(&insn, &RegFile::new(), 0).unwrap_err();
    assert_eq!(err, ValidatorError::UnknownRegType { pc: 0, reg: 0 });
}

#[test]
fn test_cast_double_to_s64_requires_double() {
    let insn = Insn::Cast {
        op: Opcode::CastDoubleToS64,
        reg: 0,
    };
    assert!(check_insn_context(&insn, &regs(RegType::Double, RegType::Unknown), 0).is_ok());

    let err = check_insn_context(&insn, &regs(RegType::S64, RegType::Unknown), 0).unwrap_err();
    assert_eq!(
        err,
        ValidatorError::TypeMismatch {
            pc: 0,
            opcode: Opcode::CastDoubleToS64
        }
    );
}

#[test]
fn test_cast_nop_has_no_constraint() {
    // cast_nop constrains nothing, not even the register field.
    let insn = Insn::Cast {
        op: Opcode::CastNop,
        reg: 7,
    };
    assert!(check_insn_context(&insn, &RegFile::new(), 0).is_ok());
}
