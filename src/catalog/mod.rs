//! Operator catalog: the ordered set of factories the enumerator draws from.
//!
//! A catalog always starts with one input factory per declared variable,
//! followed by the primitive menu of the selected [`CatalogPreset`]. The menu
//! is static; only the input set depends on the problem.

pub mod primitives;

use crate::ir::Expr;
use primitives::{
    ADD, BINARY_FUNCTIONS, BIT_AND, BIT_NOT, BIT_OR, BIT_XOR, BinaryOp, DIV, MUL, NEGATE, REM,
    SHL, SHR, SUB, UNARY_FUNCTIONS, UnaryOp,
};
use std::f64::consts;
use std::sync::Arc;

/// Number of children a factory's nodes take
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Nullary,
    Unary,
    Binary,
}

/// One entry of the catalog
#[derive(Debug, Clone)]
pub enum Factory {
    /// Produces the input node for variable `index`
    Input(usize),
    /// Produces a single constant leaf
    Constant {
        value: f64,
        label: Option<&'static str>,
        cost: u32,
    },
    Unary(&'static UnaryOp),
    Binary(&'static BinaryOp),
}

impl Factory {
    pub fn arity(&self) -> Arity {
        match self {
            Factory::Input(_) | Factory::Constant { .. } => Arity::Nullary,
            Factory::Unary(_) => Arity::Unary,
            Factory::Binary(_) => Arity::Binary,
        }
    }

    /// The single node of a nullary factory
    pub fn leaf(&self) -> Option<Arc<Expr>> {
        match self {
            Factory::Input(index) => Some(Expr::input(*index)),
            Factory::Constant { value, label, cost } => Some(Arc::new(Expr::Constant {
                value: *value,
                label: *label,
                cost: *cost,
            })),
            Factory::Unary(_) | Factory::Binary(_) => None,
        }
    }

    /// Short name for logs
    pub fn name(&self) -> String {
        match self {
            Factory::Input(index) => crate::ir::input_name(*index).to_string(),
            Factory::Constant {
                label: Some(label), ..
            } => label.to_string(),
            Factory::Constant { value, .. } => crate::ir::format_number(*value),
            Factory::Unary(op) => op.name.to_string(),
            Factory::Binary(op) => op.name.to_string(),
        }
    }
}

fn constant(value: f64) -> Factory {
    Factory::Constant {
        value,
        label: None,
        cost: 0,
    }
}

fn named(value: f64, label: &'static str) -> Factory {
    Factory::Constant {
        value,
        label: Some(label),
        cost: 1,
    }
}

/// Which primitive menu to offer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CatalogPreset {
    /// Small integer constants, arithmetic, bitwise ops, E, PI and the math functions
    #[default]
    Standard,
    /// Standard plus the constants 3..5 and the remaining named math constants
    Extended,
}

impl std::fmt::Display for CatalogPreset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogPreset::Standard => write!(f, "standard"),
            CatalogPreset::Extended => write!(f, "extended"),
        }
    }
}

impl std::str::FromStr for CatalogPreset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "standard" | "default" => Ok(CatalogPreset::Standard),
            "extended" | "full" => Ok(CatalogPreset::Extended),
            _ => Err(format!(
                "Unknown catalog: '{}'. Valid options: standard, extended",
                s
            )),
        }
    }
}

/// The ordered factories for one search
#[derive(Debug, Clone)]
pub struct Catalog {
    factories: Vec<Factory>,
    arity: usize,
}

impl Catalog {
    /// Standard catalog over `arity` input variables
    pub fn standard(arity: usize) -> Self {
        Self::with_preset(CatalogPreset::Standard, arity)
    }

    pub fn with_preset(preset: CatalogPreset, arity: usize) -> Self {
        let mut factories: Vec<Factory> = (0..arity).map(Factory::Input).collect();
        factories.extend(primitive_menu(preset));
        Self { factories, arity }
    }

    /// Build a catalog from explicit factories (inputs are not added)
    pub fn from_factories(factories: Vec<Factory>, arity: usize) -> Self {
        Self { factories, arity }
    }

    /// Number of input variables
    pub fn arity(&self) -> usize {
        self.arity
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Factory> {
        self.factories.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Factory> {
        self.factories.iter()
    }

    /// Count the factories of each arity: (nullary, unary, binary)
    pub fn arity_counts(&self) -> (usize, usize, usize) {
        self.factories
            .iter()
            .fold((0, 0, 0), |(n, u, b), f| match f.arity() {
                Arity::Nullary => (n + 1, u, b),
                Arity::Unary => (n, u + 1, b),
                Arity::Binary => (n, u, b + 1),
            })
    }
}

fn primitive_menu(preset: CatalogPreset) -> Vec<Factory> {
    let extended = preset == CatalogPreset::Extended;
    let mut menu = vec![constant(1.0), constant(2.0)];
    if extended {
        menu.extend([constant(3.0), constant(4.0), constant(5.0)]);
    }

    menu.extend([
        Factory::Unary(&NEGATE),
        Factory::Binary(&ADD),
        Factory::Binary(&SUB),
        Factory::Binary(&MUL),
        Factory::Binary(&DIV),
        Factory::Binary(&REM),
        Factory::Binary(&BIT_AND),
        Factory::Unary(&BIT_NOT),
        Factory::Binary(&BIT_OR),
        Factory::Binary(&BIT_XOR),
        Factory::Binary(&SHL),
        Factory::Binary(&SHR),
    ]);

    menu.push(named(consts::E, "E"));
    if extended {
        menu.extend([
            named(consts::LN_10, "LN10"),
            named(consts::LN_2, "LN2"),
            named(consts::LOG10_E, "LOG10E"),
            named(consts::LOG2_E, "LOG2E"),
        ]);
    }
    menu.push(named(consts::PI, "PI"));
    if extended {
        menu.extend([
            named(consts::FRAC_1_SQRT_2, "SQRT1_2"),
            named(consts::SQRT_2, "SQRT2"),
        ]);
    }

    menu.extend(UNARY_FUNCTIONS.iter().map(|&op| Factory::Unary(op)));
    menu.extend(BINARY_FUNCTIONS.iter().map(|&op| Factory::Binary(op)));
    menu
}
