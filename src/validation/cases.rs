//! Loading and validating example cases

use crate::error::{CaseFileError, CaseParseError, ConfigError};
use crate::ir::{Case, MAX_INPUTS};
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// Check that a case set can drive a search and return its arity.
///
/// Fails on an empty set, on a case whose input count differs from the first
/// case's, and on more inputs than there are variable names.
pub fn validate_cases(cases: &[Case]) -> Result<usize, ConfigError> {
    let first = cases.first().ok_or(ConfigError::NoCases)?;
    let expected = first.arity();

    for (index, case) in cases.iter().enumerate() {
        if case.arity() != expected {
            return Err(ConfigError::ArityMismatch {
                index,
                expected,
                found: case.arity(),
            });
        }
    }

    if expected > MAX_INPUTS {
        return Err(ConfigError::TooManyInputs(expected));
    }
    Ok(expected)
}

fn parse_number(case: &str, value: &str) -> Result<f64, CaseParseError> {
    let trimmed = value.trim();
    let parsed = match trimmed {
        "NaN" => Ok(f64::NAN),
        "Infinity" => Ok(f64::INFINITY),
        "-Infinity" => Ok(f64::NEG_INFINITY),
        _ => trimmed.parse::<f64>(),
    };
    parsed.map_err(|_| CaseParseError::InvalidNumber {
        case: case.to_string(),
        value: trimmed.to_string(),
    })
}

/// Parse `1,2=3` (inputs, then the expected output). `=5` is a case with no inputs.
impl FromStr for Case {
    type Err = CaseParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (inputs, output) = s
            .rsplit_once('=')
            .ok_or_else(|| CaseParseError::MissingOutput(s.to_string()))?;

        let inputs = if inputs.trim().is_empty() {
            Vec::new()
        } else {
            inputs
                .split(',')
                .map(|value| parse_number(s, value))
                .collect::<Result<Vec<_>, _>>()?
        };
        let output = parse_number(s, output)?;

        Ok(Case::new(inputs, output))
    }
}

/// Read a JSON array of `{"inputs": [...], "output": n}` objects
pub fn load_cases(path: &Path) -> Result<Vec<Case>, CaseFileError> {
    let text = fs::read_to_string(path)?;
    let cases = serde_json::from_str(&text)?;
    Ok(cases)
}
