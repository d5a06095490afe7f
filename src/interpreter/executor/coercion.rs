//! Input coercion
//!
//! Converts a raw string supplied by the host into the declared type of
//! the target slot. This is the only place the engine raises a fault.

use super::errors::RuntimeError;
use super::types::{Val, VarType};

/// Parse `raw` according to `ty`
pub fn coerce_input(raw: &str, ty: VarType) -> Result<Val, RuntimeError> {
    match ty {
        VarType::Int => parse_int_prefix(raw)
            .map(Val::Num)
            .ok_or_else(|| RuntimeError::ExpectedInteger(raw.to_string())),
        VarType::Float => parse_float_prefix(raw)
            .map(Val::Num)
            .ok_or_else(|| RuntimeError::ExpectedFloat(raw.to_string())),
        VarType::Bool => match raw {
            "true" | "1" => Ok(Val::Bool(true)),
            "false" | "0" => Ok(Val::Bool(false)),
            _ => Err(RuntimeError::ExpectedBoolean(raw.to_string())),
        },
        VarType::Str => Ok(Val::Str(raw.to_string())),
    }
}

/// Optional sign followed by leading decimal digits; trailing text is ignored
fn parse_int_prefix(raw: &str) -> Option<f64> {
    let s = raw.trim_start();
    let (negative, rest) = split_sign(s);
    let digits: &str = &rest[..rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len())];
    if digits.is_empty() {
        return None;
    }
    let n: f64 = digits.parse().ok()?;
    Some(if negative { -n } else { n })
}

/// Longest leading decimal literal (with optional fraction and exponent)
fn parse_float_prefix(raw: &str) -> Option<f64> {
    let s = raw.trim_start();
    let (negative, rest) = split_sign(s);
    if rest.starts_with("Infinity") {
        return Some(if negative {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        });
    }

    let bytes = rest.as_bytes();
    let mut end = 0;
    let mut mantissa_digits = 0;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
        mantissa_digits += 1;
    }
    if end < bytes.len() && bytes[end] == b'.' {
        end += 1;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
            mantissa_digits += 1;
        }
    }
    if mantissa_digits == 0 {
        return None;
    }

    // Exponent only counts when digits follow it
    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && (bytes[exp_end] == b'+' || bytes[exp_end] == b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    let n: f64 = rest[..end].trim_end_matches('.').parse().ok()?;
    Some(if negative { -n } else { n })
}

fn split_sign(s: &str) -> (bool, &str) {
    if let Some(rest) = s.strip_prefix('-') {
        (true, rest)
    } else if let Some(rest) = s.strip_prefix('+') {
        (false, rest)
    } else {
        (false, s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_int_input() {
        assert_eq!(coerce_input("42", VarType::Int), Ok(Val::Num(42.0)));
        assert_eq!(coerce_input("  -7", VarType::Int), Ok(Val::Num(-7.0)));
        assert_eq!(coerce_input("3.9", VarType::Int), Ok(Val::Num(3.0)));
        assert_eq!(coerce_input("12abc", VarType::Int), Ok(Val::Num(12.0)));
        assert_eq!(
            coerce_input("abc", VarType::Int),
            Err(RuntimeError::ExpectedInteger("abc".to_string()))
        );
        assert!(coerce_input("", VarType::Int).is_err());
        assert!(coerce_input("-", VarType::Int).is_err());
    }

    #[test]
    fn test_float_input() {
        assert_eq!(coerce_input("2.5", VarType::Float), Ok(Val::Num(2.5)));
        assert_eq!(coerce_input(".5", VarType::Float), Ok(Val::Num(0.5)));
        assert_eq!(coerce_input("1e3x", VarType::Float), Ok(Val::Num(1000.0)));
        assert_eq!(coerce_input("4.", VarType::Float), Ok(Val::Num(4.0)));
        assert_eq!(coerce_input("7e", VarType::Float), Ok(Val::Num(7.0)));
        assert_eq!(
            coerce_input("-Infinity", VarType::Float),
            Ok(Val::Num(f64::NEG_INFINITY))
        );
        assert_eq!(
            coerce_input("x1", VarType::Float),
            Err(RuntimeError::ExpectedFloat("x1".to_string()))
        );
        assert!(coerce_input(".", VarType::Float).is_err());
    }

    #[test]
    fn test_bool_input() {
        assert_eq!(coerce_input("true", VarType::Bool), Ok(Val::Bool(true)));
        assert_eq!(coerce_input("1", VarType::Bool), Ok(Val::Bool(true)));
        assert_eq!(coerce_input("false", VarType::Bool), Ok(Val::Bool(false)));
        assert_eq!(coerce_input("0", VarType::Bool), Ok(Val::Bool(false)));
        assert_eq!(
            coerce_input("yes", VarType::Bool),
            Err(RuntimeError::ExpectedBoolean("yes".to_string()))
        );
        assert!(coerce_input("True", VarType::Bool).is_err());
    }

    #[test]
    fn test_string_input_is_verbatim() {
        assert_eq!(
            coerce_input("  hi there ", VarType::Str),
            Ok(Val::Str("  hi there ".to_string()))
        );
    }

    #[test]
    fn test_fault_messages() {
        let err = coerce_input("abc", VarType::Int).unwrap_err();
        assert_eq!(err.to_string(), "Invalid input: expected integer, got 'abc'");
        let err = coerce_input("maybe", VarType::Bool).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid input: expected boolean (true/false), got 'maybe'"
        );
    }
}
