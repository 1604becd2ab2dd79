//! Cost model for expressions

use crate::ir::Expr;
use std::cmp::Ordering;

/// Intrinsic cost of a single node, excluding its children
pub fn node_cost(expr: &Expr) -> u32 {
    match expr {
        Expr::Constant { cost, .. } => *cost,
        Expr::Input { .. } => 1,
        Expr::Unary { op, .. } => op.cost,
        Expr::Binary { op, .. } => op.cost,
    }
}

/// Total cost of a tree: every node's intrinsic cost, summed
pub fn expr_cost(expr: &Expr) -> u32 {
    match expr {
        Expr::Constant { .. } | Expr::Input { .. } => node_cost(expr),
        Expr::Unary { child, .. } => node_cost(expr) + expr_cost(child),
        Expr::Binary { left, right, .. } => node_cost(expr) + expr_cost(left) + expr_cost(right),
    }
}

impl Expr {
    pub fn cost(&self) -> u32 {
        expr_cost(self)
    }
}

/// Ranking order for equivalent survivors: cost first, then source text
pub fn rank_order(a_cost: u32, a_text: &str, b_cost: u32, b_text: &str) -> Ordering {
    a_cost.cmp(&b_cost).then_with(|| a_text.cmp(b_text))
}
