//! Term-rewriting simplification of passing expressions.
//!
//! Normalization runs bottom-up. A node whose children all normalize to
//! constants collapses into a single constant costing the maximum of its
//! children's costs. Otherwise the
//! node's primitive may rewrite it; if no rule applies the node is rebuilt
//! from its normalized children.
//!
//! Every rule preserves the value for all bindings and never raises the cost.
//! Rule outputs are themselves normal, so normalizing twice is a no-op.

use crate::ir::Expr;
use crate::semantics::cost::expr_cost;
use std::sync::Arc;

/// Normalize an expression into its canonical, lower-cost form
pub fn normalize(expr: &Arc<Expr>) -> Arc<Expr> {
    match &**expr {
        Expr::Constant { .. } | Expr::Input { .. } => Arc::clone(expr),
        Expr::Unary { op, child } => {
            let child_norm = normalize(child);
            if let Some(value) = child_norm.constant_value() {
                return Expr::constant(op.apply(value), expr_cost(&child_norm));
            }
            if let Some(rewrite) = op.rewrite {
                if let Some(rewritten) = rewrite(&child_norm) {
                    return rewritten;
                }
            }
            if Arc::ptr_eq(&child_norm, child) {
                Arc::clone(expr)
            } else {
                Expr::unary(op, child_norm)
            }
        }
        Expr::Binary { op, left, right } => {
            let left_norm = normalize(left);
            let right_norm = normalize(right);
            if let (Some(a), Some(b)) = (left_norm.constant_value(), right_norm.constant_value()) {
                let cost = expr_cost(&left_norm).max(expr_cost(&right_norm));
                return Expr::constant(op.apply(a, b), cost);
            }
            if let Some(rewrite) = op.rewrite {
                if let Some(rewritten) = rewrite(&left_norm, &right_norm) {
                    return rewritten;
                }
            }
            if Arc::ptr_eq(&left_norm, left) && Arc::ptr_eq(&right_norm, right) {
                Arc::clone(expr)
            } else {
                Expr::binary(op, left_norm, right_norm)
            }
        }
    }
}

/// Rewrite rules referenced by the primitive table.
///
/// Rules receive children that are already normalized and never both
/// constant (that case is folded before a rule is consulted).
pub mod rules {
    use crate::catalog::primitives::{ADD, NEGATE, SUB};
    use crate::ir::Expr;
    use crate::semantics::cost::expr_cost;
    use std::sync::Arc;

    /// Negative constant, if `expr` is one
    fn negative_constant(expr: &Expr) -> Option<f64> {
        expr.constant_value().filter(|value| *value < 0.0)
    }

    /// `-(-x) → x`
    pub fn negate(child: &Arc<Expr>) -> Option<Arc<Expr>> {
        match &**child {
            Expr::Unary { op, child: inner } if **op == NEGATE => Some(Arc::clone(inner)),
            _ => None,
        }
    }

    /// `c + x` and `x + c` with `c < 0` become `x - (-c)`; `0 + x` and `x + 0`
    /// become `x`; a constant left operand moves to the right.
    pub fn add(a: &Arc<Expr>, b: &Arc<Expr>) -> Option<Arc<Expr>> {
        if let Some(value) = negative_constant(a) {
            let positive = Expr::constant(-value, expr_cost(a));
            return Some(Expr::binary(&SUB, Arc::clone(b), positive));
        }
        if let Some(value) = negative_constant(b) {
            let positive = Expr::constant(-value, expr_cost(b));
            return Some(Expr::binary(&SUB, Arc::clone(a), positive));
        }
        if a.is_constant_equal(0.0) {
            return Some(Arc::clone(b));
        }
        if b.is_constant_equal(0.0) {
            return Some(Arc::clone(a));
        }
        if a.is_constant() && !b.is_constant() {
            return Some(Expr::binary(&ADD, Arc::clone(b), Arc::clone(a)));
        }
        None
    }

    /// `x - 0 → x`
    pub fn sub(a: &Arc<Expr>, b: &Arc<Expr>) -> Option<Arc<Expr>> {
        b.is_constant_equal(0.0).then(|| Arc::clone(a))
    }

    /// `1 * x → x`, `x * 1 → x`
    pub fn mul(a: &Arc<Expr>, b: &Arc<Expr>) -> Option<Arc<Expr>> {
        if a.is_constant_equal(1.0) {
            Some(Arc::clone(b))
        } else if b.is_constant_equal(1.0) {
            Some(Arc::clone(a))
        } else {
            None
        }
    }

    /// `x / 1 → x`
    pub fn div(a: &Arc<Expr>, b: &Arc<Expr>) -> Option<Arc<Expr>> {
        b.is_constant_equal(1.0).then(|| Arc::clone(a))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::primitives::{ADD, DIV, MUL, NEGATE, SIN, SUB};
    use crate::catalog::{Catalog, Factory};
    use crate::ir::InputSlots;
    use crate::search::enumerate::Enumerator;
    use crate::semantics::concrete::evaluate;

    fn a() -> Arc<Expr> {
        Expr::input(0)
    }

    fn c(value: f64) -> Arc<Expr> {
        Expr::constant(value, 0)
    }

    fn same_value(x: f64, y: f64) -> bool {
        x == y || (x.is_nan() && y.is_nan())
    }

    #[test]
    fn test_constant_folding_uses_max_cost() {
        let pi = Expr::named_constant(std::f64::consts::PI, "PI", 1);
        let expr = Expr::binary(&MUL, pi, Expr::constant(2.0, 0));
        let norm = normalize(&expr);
        assert_eq!(norm.constant_value(), Some(std::f64::consts::PI * 2.0));
        assert_eq!(norm.cost(), 1);
        assert_eq!(expr.cost(), 3);
    }

    #[test]
    fn test_folding_after_children_normalize() {
        // sin(1 + 2) folds in two steps
        let expr = Expr::unary(&SIN, Expr::binary(&ADD, c(1.0), c(2.0)));
        let norm = normalize(&expr);
        assert_eq!(norm.constant_value(), Some(3.0f64.sin()));
        assert_eq!(norm.cost(), 0);
    }

    #[test]
    fn test_double_negation() {
        let expr = Expr::unary(&NEGATE, Expr::unary(&NEGATE, a()));
        assert_eq!(normalize(&expr).render(), "a");
    }

    #[test]
    fn test_negate_of_constant_folds() {
        let expr = Expr::unary(&NEGATE, c(2.0));
        assert_eq!(normalize(&expr).constant_value(), Some(-2.0));
    }

    #[test]
    fn test_add_negative_constant_becomes_sub() {
        let left = Expr::binary(&ADD, Expr::unary(&NEGATE, c(1.0)), a());
        assert_eq!(normalize(&left).render(), "(a - 1)");

        let right = Expr::binary(&ADD, a(), Expr::unary(&NEGATE, c(2.0)));
        assert_eq!(normalize(&right).render(), "(a - 2)");
    }

    #[test]
    fn test_additive_identity() {
        assert_eq!(normalize(&Expr::binary(&ADD, c(0.0), a())).render(), "a");
        assert_eq!(normalize(&Expr::binary(&ADD, a(), c(0.0))).render(), "a");
        // 1 - 1 folds to 0, then vanishes
        let zero = Expr::binary(&SUB, c(1.0), c(1.0));
        assert_eq!(normalize(&Expr::binary(&ADD, a(), zero)).render(), "a");
    }

    #[test]
    fn test_constant_moves_right_in_add() {
        let expr = Expr::binary(&ADD, c(2.0), a());
        assert_eq!(normalize(&expr).render(), "(a + 2)");
    }

    #[test]
    fn test_sub_zero() {
        assert_eq!(normalize(&Expr::binary(&SUB, a(), c(0.0))).render(), "a");
        // 0 - a is not touched
        assert_eq!(
            normalize(&Expr::binary(&SUB, c(0.0), a())).render(),
            "(0 - a)"
        );
    }

    #[test]
    fn test_multiplicative_identity() {
        assert_eq!(normalize(&Expr::binary(&MUL, c(1.0), a())).render(), "a");
        assert_eq!(normalize(&Expr::binary(&MUL, a(), c(1.0))).render(), "a");
        assert_eq!(normalize(&Expr::binary(&DIV, a(), c(1.0))).render(), "a");
        // 1 / a keeps its division
        assert_eq!(
            normalize(&Expr::binary(&DIV, c(1.0), a())).render(),
            "(1 / a)"
        );
    }

    #[test]
    fn test_untouched_tree_is_shared() {
        let expr = Expr::binary(&MUL, a(), Expr::input(1));
        let norm = normalize(&expr);
        assert!(Arc::ptr_eq(&expr, &norm));
    }

    /// Small catalog with the constants the rules look for
    fn rule_catalog() -> Catalog {
        Catalog::from_factories(
            vec![
                Factory::Input(0),
                Factory::Constant {
                    value: 0.0,
                    label: None,
                    cost: 0,
                },
                Factory::Constant {
                    value: 1.0,
                    label: None,
                    cost: 0,
                },
                Factory::Constant {
                    value: -1.0,
                    label: None,
                    cost: 0,
                },
                Factory::Unary(&NEGATE),
                Factory::Binary(&ADD),
                Factory::Binary(&SUB),
                Factory::Binary(&MUL),
                Factory::Binary(&DIV),
            ],
            1,
        )
    }

    #[test]
    fn test_normalization_properties_small_catalog() {
        let bindings = [-3.0, -1.0, -0.5, 0.0, 1.0, 2.0, 7.25, f64::INFINITY];
        let mut checked = 0;

        for expr in Enumerator::new(Arc::new(rule_catalog()), 3) {
            let norm = normalize(&expr);

            // Never increases cost
            assert!(
                norm.cost() <= expr.cost(),
                "{} became {}",
                expr.render(),
                norm.render()
            );

            // Idempotent
            assert_eq!(normalize(&norm).render(), norm.render());

            // Preserves value
            for &binding in &bindings {
                let inputs = InputSlots::from_values(&[binding]);
                let before = evaluate(&expr, &inputs);
                let after = evaluate(&norm, &inputs);
                assert!(
                    same_value(before, after),
                    "{} -> {} at a = {}: {} vs {}",
                    expr.render(),
                    norm.render(),
                    binding,
                    before,
                    after
                );
            }
            checked += 1;
        }
        assert!(checked > 1000);
    }

    #[test]
    fn test_normalization_properties_standard_catalog() {
        let bindings = [-2.0, 0.0, 0.5, 3.0];

        for expr in Enumerator::new(Arc::new(Catalog::standard(1)), 2) {
            let norm = normalize(&expr);
            assert!(norm.cost() <= expr.cost());
            assert_eq!(normalize(&norm).render(), norm.render());
            for &binding in &bindings {
                let inputs = InputSlots::from_values(&[binding]);
                assert!(same_value(
                    evaluate(&expr, &inputs),
                    evaluate(&norm, &inputs)
                ));
            }
        }
    }
}
