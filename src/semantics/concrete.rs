//! Concrete evaluation of expressions against input bindings

use crate::ir::{Case, Expr, InputSlots};

/// Evaluate an expression under the current input bindings.
///
/// Division by zero and out-of-domain arguments produce infinities or NaN,
/// which are ordinary values here.
pub fn evaluate(expr: &Expr, inputs: &InputSlots) -> f64 {
    match expr {
        Expr::Constant { value, .. } => *value,
        Expr::Input { index } => inputs.get(*index),
        Expr::Unary { op, child } => op.apply(evaluate(child, inputs)),
        Expr::Binary { op, left, right } => {
            op.apply(evaluate(left, inputs), evaluate(right, inputs))
        }
    }
}

/// Outcome of checking one candidate against the cases
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseCheck {
    /// Every case produced its expected output
    Pass,
    /// The case at this index was the first mismatch
    Fail { case_index: usize },
}

impl CaseCheck {
    pub fn passed(&self) -> bool {
        matches!(self, CaseCheck::Pass)
    }
}

/// Check `expr` against every case in order, stopping at the first mismatch.
///
/// Each case's tuple is written into `inputs` before evaluating. Comparison
/// is exact `==`, so a NaN result never matches.
pub fn check_cases(expr: &Expr, cases: &[Case], inputs: &mut InputSlots) -> CaseCheck {
    for (case_index, case) in cases.iter().enumerate() {
        inputs.bind(&case.inputs);
        if evaluate(expr, inputs) != case.output {
            return CaseCheck::Fail { case_index };
        }
    }
    CaseCheck::Pass
}
