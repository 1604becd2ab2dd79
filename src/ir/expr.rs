//! Expression trees for candidate functions

use crate::catalog::primitives::{BinaryOp, Notation, UnaryOp};
use crate::ir::types::{format_number, input_name};
use std::fmt;
use std::sync::Arc;

/// A node of an arithmetic syntax tree.
///
/// Trees are immutable. Subtrees are shared through `Arc`, so the enumerator
/// can hand the same child to many parents and the normalizer builds new trees
/// instead of editing old ones.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A fixed value, optionally printed under a name such as `PI`
    Constant {
        value: f64,
        label: Option<&'static str>,
        cost: u32,
    },
    /// A reference to the input variable with this position
    Input { index: usize },
    Unary {
        op: &'static UnaryOp,
        child: Arc<Expr>,
    },
    Binary {
        op: &'static BinaryOp,
        left: Arc<Expr>,
        right: Arc<Expr>,
    },
}

impl Expr {
    /// An unlabeled constant with the given intrinsic cost
    pub fn constant(value: f64, cost: u32) -> Arc<Self> {
        Arc::new(Expr::Constant {
            value,
            label: None,
            cost,
        })
    }

    pub fn named_constant(value: f64, label: &'static str, cost: u32) -> Arc<Self> {
        Arc::new(Expr::Constant {
            value,
            label: Some(label),
            cost,
        })
    }

    pub fn input(index: usize) -> Arc<Self> {
        Arc::new(Expr::Input { index })
    }

    pub fn unary(op: &'static UnaryOp, child: Arc<Expr>) -> Arc<Self> {
        Arc::new(Expr::Unary { op, child })
    }

    pub fn binary(op: &'static BinaryOp, left: Arc<Expr>, right: Arc<Expr>) -> Arc<Self> {
        Arc::new(Expr::Binary { op, left, right })
    }

    /// Returns true if this node is a constant
    pub fn is_constant(&self) -> bool {
        matches!(self, Expr::Constant { .. })
    }

    /// Returns the value if this node is a constant
    pub fn constant_value(&self) -> Option<f64> {
        match self {
            Expr::Constant { value, .. } => Some(*value),
            _ => None,
        }
    }

    /// Returns true if this node is a constant exactly equal to `expected`
    pub fn is_constant_equal(&self, expected: f64) -> bool {
        self.constant_value() == Some(expected)
    }

    /// Returns true if any node of the tree reads an input variable
    pub fn has_input(&self) -> bool {
        match self {
            Expr::Constant { .. } => false,
            Expr::Input { .. } => true,
            Expr::Unary { child, .. } => child.has_input(),
            Expr::Binary { left, right, .. } => left.has_input() || right.has_input(),
        }
    }

    /// Height of the tree; a single leaf has depth 1
    pub fn depth(&self) -> usize {
        match self {
            Expr::Constant { .. } | Expr::Input { .. } => 1,
            Expr::Unary { child, .. } => 1 + child.depth(),
            Expr::Binary { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }

    /// Source text of the body, fully parenthesized
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Constant {
                label: Some(label), ..
            } => write!(f, "{}", label),
            Expr::Constant { value, .. } => write!(f, "{}", format_number(*value)),
            Expr::Input { index } => write!(f, "{}", input_name(*index)),
            Expr::Unary { op, child } => match op.notation {
                Notation::Prefix(symbol) => write!(f, "{}{}", symbol, child),
                Notation::Infix(symbol) | Notation::Call(symbol) => {
                    write!(f, "{}({})", symbol, child)
                }
            },
            Expr::Binary { op, left, right } => match op.notation {
                Notation::Infix(symbol) => write!(f, "({} {} {})", left, symbol, right),
                Notation::Prefix(symbol) | Notation::Call(symbol) => {
                    write!(f, "{}({}, {})", symbol, left, right)
                }
            },
        }
    }
}

/// Render `expr` as a function literal over `arity` variables, e.g. `(a, b) -> a + b`
pub fn function_source(expr: &Expr, arity: usize) -> String {
    let params: Vec<String> = (0..arity).map(|i| input_name(i).to_string()).collect();
    let body = expr.render();
    format!("({}) -> {}", params.join(", "), strip_enclosing_parens(&body))
}

/// Remove one pair of parentheses when it encloses the whole string
pub fn strip_enclosing_parens(source: &str) -> &str {
    if !(source.starts_with('(') && source.ends_with(')')) {
        return source;
    }
    let mut depth = 0usize;
    for (i, c) in source.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth = depth.saturating_sub(1);
                // The opening paren closed before the end: `(a) + (b)` style
                if depth == 0 && i != source.len() - 1 {
                    return source;
                }
            }
            _ => {}
        }
    }
    &source[1..source.len() - 1]
}
