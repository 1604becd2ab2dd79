//! Core value types shared by the expression model and the search loop

use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum number of free variables; each is named by a single lowercase letter
pub const MAX_INPUTS: usize = 26;

const LETTERS: &[u8; MAX_INPUTS] = b"abcdefghijklmnopqrstuvwxyz";

/// Get the display name of the input variable at `index` (`a`, `b`, ...)
pub fn input_name(index: usize) -> char {
    LETTERS.get(index).map(|&b| b as char).unwrap_or('?')
}

/// One example: an ordered tuple of input values and the expected output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Case {
    pub inputs: Vec<f64>,
    pub output: f64,
}

impl Case {
    pub fn new(inputs: Vec<f64>, output: f64) -> Self {
        Self { inputs, output }
    }

    /// Number of input values in this case
    pub fn arity(&self) -> usize {
        self.inputs.len()
    }
}

impl fmt::Display for Case {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inputs: Vec<_> = self.inputs.iter().map(|v| format_number(*v)).collect();
        write!(f, "({}) = {}", inputs.join(", "), format_number(self.output))
    }
}

/// Current bindings of the input variables, one slot per variable.
///
/// A session writes each case's tuple here before evaluating a candidate, so
/// every expression evaluated during that case check reads the same values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputSlots {
    values: Vec<f64>,
}

impl InputSlots {
    /// Create `arity` slots, all bound to zero
    pub fn new(arity: usize) -> Self {
        Self {
            values: vec![0.0; arity],
        }
    }

    /// Create slots already bound to `values`
    pub fn from_values(values: &[f64]) -> Self {
        Self {
            values: values.to_vec(),
        }
    }

    pub fn arity(&self) -> usize {
        self.values.len()
    }

    /// Overwrite the bindings with a case tuple. Extra values are ignored.
    pub fn bind(&mut self, values: &[f64]) {
        for (slot, value) in self.values.iter_mut().zip(values) {
            *slot = *value;
        }
    }

    /// Read the binding of variable `index` (NaN when out of range)
    pub fn get(&self, index: usize) -> f64 {
        self.values.get(index).copied().unwrap_or(f64::NAN)
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }
}

/// Render a number the way expressions print it: shortest round-trip decimal,
/// `NaN`, `Infinity` or `-Infinity`.
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() {
        if value > 0.0 {
            "Infinity".to_string()
        } else {
            "-Infinity".to_string()
        }
    } else if value == 0.0 {
        // -0 prints as 0
        "0".to_string()
    } else {
        format!("{}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_names() {
        assert_eq!(input_name(0), 'a');
        assert_eq!(input_name(1), 'b');
        assert_eq!(input_name(25), 'z');
        assert_eq!(input_name(26), '?');
    }

    #[test]
    fn test_slots_bind_and_get() {
        let mut slots = InputSlots::new(2);
        assert_eq!(slots.as_slice(), &[0.0, 0.0]);

        slots.bind(&[3.0, -4.5]);
        assert_eq!(slots.get(0), 3.0);
        assert_eq!(slots.get(1), -4.5);
        assert!(slots.get(2).is_nan());
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(3.0), "3");
        assert_eq!(format_number(-1.0), "-1");
        assert_eq!(format_number(0.25), "0.25");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(f64::NAN), "NaN");
        assert_eq!(format_number(f64::INFINITY), "Infinity");
        assert_eq!(format_number(f64::NEG_INFINITY), "-Infinity");
    }

    #[test]
    fn test_case_display() {
        let case = Case::new(vec![1.0, 2.0], 3.0);
        assert_eq!(case.to_string(), "(1, 2) = 3");
        assert_eq!(case.arity(), 2);
    }

    #[test]
    fn test_case_json() {
        let case: Case = serde_json::from_str(r#"{"inputs":[1,2.5],"output":-3}"#).unwrap();
        assert_eq!(case, Case::new(vec![1.0, 2.5], -3.0));
    }
}
