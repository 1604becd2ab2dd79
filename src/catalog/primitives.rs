//! Primitive operations available to the enumerator.
//!
//! Each primitive is a static record bundling its evaluator, how it prints,
//! its cost weight and an optional rewrite rule used by the normalizer. The
//! rewrite rules themselves live in [`crate::semantics::normalize::rules`].
//!
//! Integer and bitwise primitives work on the 32-bit wrapping conversion of
//! their operands, so `5.7 | 0` is `5` and `2^32 + 1 & 3` is `1`.

use crate::ir::Expr;
use crate::semantics::normalize::rules;
use std::fmt;
use std::sync::Arc;

pub type UnaryFn = fn(f64) -> f64;
pub type BinaryFn = fn(f64, f64) -> f64;

/// Rewrite rule for a unary node, given its already normalized child
pub type UnaryRewrite = fn(&Arc<Expr>) -> Option<Arc<Expr>>;
/// Rewrite rule for a binary node, given its already normalized children
pub type BinaryRewrite = fn(&Arc<Expr>, &Arc<Expr>) -> Option<Arc<Expr>>;

/// How a primitive prints its operands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notation {
    /// `-a`, `~a`
    Prefix(&'static str),
    /// `(a + b)`
    Infix(&'static str),
    /// `abs(a)`, `max(a, b)`
    Call(&'static str),
}

/// A one-argument primitive
pub struct UnaryOp {
    pub name: &'static str,
    pub notation: Notation,
    pub eval: UnaryFn,
    pub cost: u32,
    pub rewrite: Option<UnaryRewrite>,
}

/// A two-argument primitive
pub struct BinaryOp {
    pub name: &'static str,
    pub notation: Notation,
    pub eval: BinaryFn,
    pub cost: u32,
    pub rewrite: Option<BinaryRewrite>,
}

impl UnaryOp {
    pub fn apply(&self, a: f64) -> f64 {
        (self.eval)(a)
    }
}

impl BinaryOp {
    pub fn apply(&self, a: f64, b: f64) -> f64 {
        (self.eval)(a, b)
    }
}

// Primitive names are unique, so they identify the operation.
impl PartialEq for UnaryOp {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl PartialEq for BinaryOp {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl fmt::Debug for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UnaryOp({})", self.name)
    }
}

impl fmt::Debug for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BinaryOp({})", self.name)
    }
}

/// Default cost of a one-argument function
const UNARY_COST: u32 = 2;
/// Default cost of a two-argument function
const BINARY_COST: u32 = 3;

// --- 32-bit integer conversions ---

/// Convert to a wrapping 32-bit signed integer (non-finite values become 0)
pub fn to_int32(value: f64) -> i32 {
    to_uint32(value) as i32
}

/// Convert to a wrapping 32-bit unsigned integer (non-finite values become 0)
pub fn to_uint32(value: f64) -> u32 {
    if !value.is_finite() {
        return 0;
    }
    value.trunc().rem_euclid(4_294_967_296.0) as u32
}

// --- Arithmetic ---

fn negate(a: f64) -> f64 {
    -a
}

fn add(a: f64, b: f64) -> f64 {
    a + b
}

fn sub(a: f64, b: f64) -> f64 {
    a - b
}

fn mul(a: f64, b: f64) -> f64 {
    a * b
}

fn div(a: f64, b: f64) -> f64 {
    a / b
}

fn rem(a: f64, b: f64) -> f64 {
    a % b
}

// --- Bitwise ---

fn bit_and(a: f64, b: f64) -> f64 {
    (to_int32(a) & to_int32(b)) as f64
}

fn bit_or(a: f64, b: f64) -> f64 {
    (to_int32(a) | to_int32(b)) as f64
}

fn bit_xor(a: f64, b: f64) -> f64 {
    (to_int32(a) ^ to_int32(b)) as f64
}

fn bit_not(a: f64) -> f64 {
    (!to_int32(a)) as f64
}

fn shl(a: f64, b: f64) -> f64 {
    to_int32(a).wrapping_shl(to_uint32(b) & 31) as f64
}

fn shr(a: f64, b: f64) -> f64 {
    to_int32(a).wrapping_shr(to_uint32(b) & 31) as f64
}

// --- Functions whose semantics differ from the f64 methods ---

fn clz32(a: f64) -> f64 {
    to_uint32(a).leading_zeros() as f64
}

/// Round half toward positive infinity
fn round(a: f64) -> f64 {
    if !a.is_finite() {
        return a;
    }
    let floor = a.floor();
    if a - floor >= 0.5 { floor + 1.0 } else { floor }
}

/// Sign that keeps zeros and NaN unchanged
fn sign(a: f64) -> f64 {
    if a.is_nan() || a == 0.0 {
        a
    } else if a > 0.0 {
        1.0
    } else {
        -1.0
    }
}

/// Maximum that propagates NaN
fn max(a: f64, b: f64) -> f64 {
    if a.is_nan() || b.is_nan() {
        f64::NAN
    } else {
        a.max(b)
    }
}

/// Minimum that propagates NaN
fn min(a: f64, b: f64) -> f64 {
    if a.is_nan() || b.is_nan() {
        f64::NAN
    } else {
        a.min(b)
    }
}

/// Power where a NaN exponent, or a base of magnitude 1 raised to an
/// infinite exponent, gives NaN
fn pow(base: f64, exponent: f64) -> f64 {
    if exponent.is_nan() || (base.abs() == 1.0 && exponent.is_infinite()) {
        f64::NAN
    } else {
        base.powf(exponent)
    }
}

// --- Operator primitives ---

pub static NEGATE: UnaryOp = UnaryOp {
    name: "negate",
    notation: Notation::Prefix("-"),
    eval: negate,
    cost: UNARY_COST,
    rewrite: Some(rules::negate),
};

pub static ADD: BinaryOp = BinaryOp {
    name: "add",
    notation: Notation::Infix("+"),
    eval: add,
    cost: 1,
    rewrite: Some(rules::add),
};

pub static SUB: BinaryOp = BinaryOp {
    name: "sub",
    notation: Notation::Infix("-"),
    eval: sub,
    cost: 1,
    rewrite: Some(rules::sub),
};

pub static MUL: BinaryOp = BinaryOp {
    name: "mul",
    notation: Notation::Infix("*"),
    eval: mul,
    cost: 2,
    rewrite: Some(rules::mul),
};

pub static DIV: BinaryOp = BinaryOp {
    name: "div",
    notation: Notation::Infix("/"),
    eval: div,
    cost: 2,
    rewrite: Some(rules::div),
};

pub static REM: BinaryOp = BinaryOp {
    name: "rem",
    notation: Notation::Infix("%"),
    eval: rem,
    cost: 3,
    rewrite: None,
};

pub static BIT_AND: BinaryOp = BinaryOp {
    name: "and",
    notation: Notation::Infix("&"),
    eval: bit_and,
    cost: 2,
    rewrite: None,
};

pub static BIT_NOT: UnaryOp = UnaryOp {
    name: "not",
    notation: Notation::Prefix("~"),
    eval: bit_not,
    cost: UNARY_COST,
    rewrite: None,
};

pub static BIT_OR: BinaryOp = BinaryOp {
    name: "or",
    notation: Notation::Infix("|"),
    eval: bit_or,
    cost: 2,
    rewrite: None,
};

pub static BIT_XOR: BinaryOp = BinaryOp {
    name: "xor",
    notation: Notation::Infix("^"),
    eval: bit_xor,
    cost: 2,
    rewrite: None,
};

pub static SHL: BinaryOp = BinaryOp {
    name: "shl",
    notation: Notation::Infix("<<"),
    eval: shl,
    cost: 2,
    rewrite: None,
};

pub static SHR: BinaryOp = BinaryOp {
    name: "shr",
    notation: Notation::Infix(">>"),
    eval: shr,
    cost: 2,
    rewrite: None,
};

// --- Function primitives ---

macro_rules! unary_fn {
    ($ident:ident, $name:literal, $eval:expr, $cost:expr) => {
        pub static $ident: UnaryOp = UnaryOp {
            name: $name,
            notation: Notation::Call($name),
            eval: $eval,
            cost: $cost,
            rewrite: None,
        };
    };
}

macro_rules! binary_fn {
    ($ident:ident, $name:literal, $eval:expr, $cost:expr) => {
        pub static $ident: BinaryOp = BinaryOp {
            name: $name,
            notation: Notation::Call($name),
            eval: $eval,
            cost: $cost,
            rewrite: None,
        };
    };
}

unary_fn!(ABS, "abs", f64::abs, UNARY_COST);
unary_fn!(ACOS, "acos", f64::acos, 4);
unary_fn!(ACOSH, "acosh", f64::acosh, 4);
unary_fn!(ASIN, "asin", f64::asin, 4);
unary_fn!(ASINH, "asinh", f64::asinh, 4);
unary_fn!(ATAN, "atan", f64::atan, 6);
unary_fn!(ATANH, "atanh", f64::atanh, 6);
unary_fn!(CBRT, "cbrt", f64::cbrt, UNARY_COST);
unary_fn!(CEIL, "ceil", f64::ceil, UNARY_COST);
unary_fn!(CLZ32, "clz32", clz32, UNARY_COST);
unary_fn!(COS, "cos", f64::cos, 4);
unary_fn!(COSH, "cosh", f64::cosh, 4);
unary_fn!(EXP, "exp", f64::exp, 3);
unary_fn!(FLOOR, "floor", f64::floor, UNARY_COST);
unary_fn!(LOG, "log", f64::ln, UNARY_COST);
unary_fn!(LOG10, "log10", f64::log10, UNARY_COST);
unary_fn!(LOG2, "log2", f64::log2, UNARY_COST);
unary_fn!(ROUND, "round", round, UNARY_COST);
unary_fn!(SIGN, "sign", sign, UNARY_COST);
unary_fn!(SIN, "sin", f64::sin, 4);
unary_fn!(SINH, "sinh", f64::sinh, 4);
unary_fn!(SQRT, "sqrt", f64::sqrt, 4);
unary_fn!(TAN, "tan", f64::tan, 5);
unary_fn!(TANH, "tanh", f64::tanh, 5);
unary_fn!(TRUNC, "trunc", f64::trunc, UNARY_COST);

binary_fn!(ATAN2, "atan2", f64::atan2, 4);
binary_fn!(HYPOT, "hypot", f64::hypot, 4);
binary_fn!(MAX, "max", max, 4);
binary_fn!(MIN, "min", min, 4);
binary_fn!(POW, "pow", pow, BINARY_COST);

/// Unary functions in catalog order
pub static UNARY_FUNCTIONS: [&UnaryOp; 25] = [
    &ABS, &ACOS, &ACOSH, &ASIN, &ASINH, &ATAN, &ATANH, &CBRT, &CEIL, &CLZ32, &COS, &COSH, &EXP,
    &FLOOR, &LOG, &LOG10, &LOG2, &ROUND, &SIGN, &SIN, &SINH, &SQRT, &TAN, &TANH, &TRUNC,
];

/// Binary functions in catalog order
pub static BINARY_FUNCTIONS: [&BinaryOp; 5] = [&ATAN2, &HYPOT, &MAX, &MIN, &POW];
