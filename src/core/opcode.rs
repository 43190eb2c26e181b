//! The closed filter opcode set.
//!
//! Opcode discriminants match the wire encoding used by the session
//! controller; the validator never accepts a byte outside this set.
//! Reserved opcodes exist on the wire (the compiler may emit them in future
//! versions) but are rejected by the current validator.

/// Filter bytecode opcodes.
///
/// Discriminants are the single-byte wire values. Byte `0` and bytes past
/// [`Opcode::CastNop`] are unknown and have no variant.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Opcode {
    Return = 1,

    // binary arithmetic, reserved
    Mul = 2,
    Div = 3,
    Mod = 4,
    Plus = 5,
    Minus = 6,
    RShift = 7,
    LShift = 8,
    BinAnd = 9,
    BinOr = 10,
    BinXor = 11,

    // binary comparators, operands typed at validation time
    Eq = 12,
    Ne = 13,
    Gt = 14,
    Lt = 15,
    Ge = 16,
    Le = 17,

    // string binary comparators
    EqString = 18,
    NeString = 19,
    GtString = 20,
    LtString = 21,
    GeString = 22,
    LeString = 23,

    // s64 binary comparators
    EqS64 = 24,
    NeS64 = 25,
    GtS64 = 26,
    LtS64 = 27,
    GeS64 = 28,
    LeS64 = 29,

    // double binary comparators
    EqDouble = 30,
    NeDouble = 31,
    GtDouble = 32,
    LtDouble = 33,
    GeDouble = 34,
    LeDouble = 35,

    // unary
    UnaryPlus = 36,
    UnaryMinus = 37,
    UnaryNot = 38,
    UnaryPlusS64 = 39,
    UnaryMinusS64 = 40,
    UnaryNotS64 = 41,
    UnaryPlusDouble = 42,
    UnaryMinusDouble = 43,
    UnaryNotDouble = 44,

    // logical short-circuit branches
    And = 45,
    Or = 46,

    // loads; the untyped field ref is reserved
    LoadFieldRef = 47,
    LoadFieldRefString = 48,
    LoadFieldRefSequence = 49,
    LoadFieldRefS64 = 50,
    LoadFieldRefDouble = 51,
    LoadString = 52,
    LoadS64 = 53,
    LoadDouble = 54,

    // casts
    CastToS64 = 55,
    CastDoubleToS64 = 56,
    CastNop = 57,
}

/// Encoding families; each shares an operand layout and decoded length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpClass {
    /// Terminator, header only.
    Return,
    /// Reserved arithmetic, rejected before its operands are looked at.
    ReservedArith,
    /// Comparator, header only; operands are the named registers R0/R1.
    Compare,
    /// Unary op: header + operand register.
    Unary,
    /// Short-circuit branch: header + 16-bit absolute skip target.
    Logical,
    /// Reserved untyped field reference.
    ReservedLoad,
    /// Typed field-reference load: header + register + field offset.
    LoadFieldRef,
    /// Inline string literal: header + register + NUL-terminated bytes.
    LoadString,
    /// Inline integer literal: header + register + 8 payload bytes.
    LoadS64,
    /// Inline float literal: header + register + 8 payload bytes.
    LoadDouble,
    /// Cast: header + operand register.
    Cast,
}

impl Opcode {
    /// Decode a wire byte into an opcode, if it is in the closed set.
    pub fn from_u8(value: u8) -> Option<Opcode> {
        use Opcode::*;

        Some(match value {
            1 => Return,
            2 => Mul,
            3 => Div,
            4 => Mod,
            5 => Plus,
            6 => Minus,
            7 => RShift,
            8 => LShift,
            9 => BinAnd,
            10 => BinOr,
            11 => BinXor,
            12 => Eq,
            13 => Ne,
            14 => Gt,
            15 => Lt,
            16 => Ge,
            17 => Le,
            18 => EqString,
            19 => NeString,
            20 => GtString,
            21 => LtString,
            22 => GeString,
            23 => LeString,
            24 => EqS64,
            25 => NeS64,
            26 => GtS64,
            27 => LtS64,
            28 => GeS64,
            29 => LeS64,
            30 => EqDouble,
            31 => NeDouble,
            32 => GtDouble,
            33 => LtDouble,
            34 => GeDouble,
            35 => LeDouble,
            36 => UnaryPlus,
            37 => UnaryMinus,
            38 => UnaryNot,
            39 => UnaryPlusS64,
            40 => UnaryMinusS64,
            41 => UnaryNotS64,
            42 => UnaryPlusDouble,
            43 => UnaryMinusDouble,
            44 => UnaryNotDouble,
            45 => And,
            46 => Or,
            47 => LoadFieldRef,
            48 => LoadFieldRefString,
            49 => LoadFieldRefSequence,
            50 => LoadFieldRefS64,
            51 => LoadFieldRefDouble,
            52 => LoadString,
            53 => LoadS64,
            54 => LoadDouble,
            55 => CastToS64,
            56 => CastDoubleToS64,
            57 => CastNop,
            _ => return None,
        })
    }

    /// Encoding family of this opcode.
    pub fn class(self) -> OpClass {
        use Opcode::*;

        match self {
            Return => OpClass::Return,

            Mul | Div | Mod | Plus | Minus | RShift | LShift | BinAnd | BinOr | BinXor => {
                OpClass::ReservedArith
            }

            Eq | Ne | Gt | Lt | Ge | Le
            | EqString | NeString | GtString | LtString | GeString | LeString
            | EqS64 | NeS64 | GtS64 | LtS64 | GeS64 | LeS64
            | EqDouble | NeDouble | GtDouble | LtDouble | GeDouble | LeDouble => OpClass::Compare,

            UnaryPlus | UnaryMinus | UnaryNot
            | UnaryPlusS64 | UnaryMinusS64 | UnaryNotS64
            | UnaryPlusDouble | UnaryMinusDouble | UnaryNotDouble => OpClass::Unary,

            And | Or => OpClass::Logical,

            LoadFieldRef => OpClass::ReservedLoad,
            LoadFieldRefString | LoadFieldRefSequence | LoadFieldRefS64 | LoadFieldRefDouble => {
                OpClass::LoadFieldRef
            }
            LoadString => OpClass::LoadString,
            LoadS64 => OpClass::LoadS64,
            LoadDouble => OpClass::LoadDouble,

            CastToS64 | CastDoubleToS64 | CastNop => OpClass::Cast,
        }
    }

    /// Whether this opcode is reserved and always rejected.
    pub fn is_reserved(self) -> bool {
        matches!(self.class(), OpClass::ReservedArith | OpClass::ReservedLoad)
    }

    /// Generic comparator whose operand types are resolved at validation
    /// time.
    pub fn is_generic_compare(self) -> bool {
        use Opcode::*;
        matches!(self, Eq | Ne | Gt | Lt | Ge | Le)
    }

    /// String-specialized comparator.
    pub fn is_string_compare(self) -> bool {
        use Opcode::*;
        matches!(self, EqString | NeString | GtString | LtString | GeString | LeString)
    }

    /// Integer-specialized comparator.
    pub fn is_s64_compare(self) -> bool {
        use Opcode::*;
        matches!(self, EqS64 | NeS64 | GtS64 | LtS64 | GeS64 | LeS64)
    }

    /// Float-specialized comparator.
    pub fn is_double_compare(self) -> bool {
        use Opcode::*;
        matches!(self, EqDouble | NeDouble | GtDouble | LtDouble | GeDouble | LeDouble)
    }

    /// Generic unary op whose operand type is resolved at validation time.
    pub fn is_generic_unary(self) -> bool {
        use Opcode::*;
        matches!(self, UnaryPlus | UnaryMinus | UnaryNot)
    }

    /// Integer-specialized unary op.
    pub fn is_s64_unary(self) -> bool {
        use Opcode::*;
        matches!(self, UnaryPlusS64 | UnaryMinusS64 | UnaryNotS64)
    }

    /// Float-specialized unary op.
    pub fn is_double_unary(self) -> bool {
        use Opcode::*;
        matches!(self, UnaryPlusDouble | UnaryMinusDouble | UnaryNotDouble)
    }

    /// Mnemonic used in logs and error messages.
    pub fn name(self) -> &'static str {
        use Opcode::*;

        match self {
            Return => "return",
            Mul => "mul",
            Div => "div",
            Mod => "mod",
            Plus => "plus",
            Minus => "minus",
            RShift => "rshift",
            LShift => "lshift",
            BinAnd => "bin_and",
            BinOr => "bin_or",
            BinXor => "bin_xor",
            Eq => "eq",
            Ne => "ne",
            Gt => "gt",
            Lt => "lt",
            Ge => "ge",
            Le => "le",
            EqString => "eq_string",
            NeString => "ne_string",
            GtString => "gt_string",
            LtString => "lt_string",
            GeString => "ge_string",
            LeString => "le_string",
            EqS64 => "eq_s64",
            NeS64 => "ne_s64",
            GtS64 => "gt_s64",
            LtS64 => "lt_s64",
            GeS64 => "ge_s64",
            LeS64 => "le_s64",
            EqDouble => "eq_double",
            NeDouble => "ne_double",
            GtDouble => "gt_double",
            LtDouble => "lt_double",
            GeDouble => "ge_double",
            LeDouble => "le_double",
            UnaryPlus => "unary_plus",
            UnaryMinus => "unary_minus",
            UnaryNot => "unary_not",
            UnaryPlusS64 => "unary_plus_s64",
            UnaryMinusS64 => "unary_minus_s64",
            UnaryNotS64 => "unary_not_s64",
            UnaryPlusDouble => "unary_plus_double",
            UnaryMinusDouble => "unary_minus_double",
            UnaryNotDouble => "unary_not_double",
            And => "and",
            Or => "or",
            LoadFieldRef => "load_field_ref",
            LoadFieldRefString => "load_field_ref_string",
            LoadFieldRefSequence => "load_field_ref_sequence",
            LoadFieldRefS64 => "load_field_ref_s64",
            LoadFieldRefDouble => "load_field_ref_double",
            LoadString => "load_string",
            LoadS64 => "load_s64",
            LoadDouble => "load_double",
            CastToS64 => "cast_to_s64",
            CastDoubleToS64 => "cast_double_to_s64",
            CastNop => "cast_nop",
        }
    }
}
