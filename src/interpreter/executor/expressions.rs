//! Expression evaluation
//!
//! Expressions are evaluated straight from their source text. Resolution
//! order is: quoted literal, known variable, arithmetic chain, number,
//! keyword literal, and finally the text itself as a string. Nothing here
//! can fail; malformed input degrades to a fallback value.

use super::types::{Env, Val};
use tracing::trace;

/// Operator characters that mark an arithmetic chain
pub const ARITHMETIC_OPS: [char; 4] = ['+', '-', '*', '/'];

/// Evaluate an expression to a value
pub fn eval_expr(expr: &str, env: &Env) -> Val {
    let expr = expr.trim();

    if let Some(content) = string_literal(expr) {
        return Val::Str(content.to_string());
    }

    if let Some(slot) = env.get(expr) {
        return slot.value.clone();
    }

    if expr.contains(&ARITHMETIC_OPS[..]) {
        return eval_arithmetic(expr, env);
    }

    if let Some(n) = parse_number(expr) {
        return Val::Num(n);
    }

    match expr {
        "" | "null" => Val::Null,
        "true" => Val::Bool(true),
        "false" => Val::Bool(false),
        _ => Val::Str(expr.to_string()),
    }
}

/// Content of a `"..."` literal, if the whole expression is one
fn string_literal(expr: &str) -> Option<&str> {
    if expr.starts_with('"') && expr.ends_with('"') {
        if expr.len() >= 2 {
            Some(&expr[1..expr.len() - 1])
        } else {
            Some("")
        }
    } else {
        None
    }
}

/// Decimal number literal; must start with a digit or a dot
fn parse_number(expr: &str) -> Option<f64> {
    let first = expr.chars().next()?;
    if !(first.is_ascii_digit() || first == '.') {
        return None;
    }
    expr.parse::<f64>().ok()
}

/* ===================== Arithmetic ===================== */

/// Evaluate an operator chain strictly left to right
///
/// There is no precedence: `2 + 3 * 4` is `(2 + 3) * 4`.
pub fn eval_arithmetic(expr: &str, env: &Env) -> Val {
    let (operands, ops) = split_chain(expr);
    trace!(expr, ?ops, "arithmetic chain");

    let mut acc = eval_operand(operands[0], env);
    for (op, operand) in ops.iter().zip(&operands[1..]) {
        let rhs = eval_operand(operand, env);
        acc = match op {
            '+' => acc + rhs,
            '-' => acc - rhs,
            '*' => acc * rhs,
            _ => acc / rhs,
        };
    }

    Val::Num(acc)
}

/// Split an expression into operand texts and the operators between them
///
/// A `+` or `-` with no operand text before it is a sign and stays part of
/// the next operand. Operators inside double quotes are not split on.
/// There is always exactly one more operand than operators.
fn split_chain(expr: &str) -> (Vec<&str>, Vec<char>) {
    let mut operands = Vec::new();
    let mut ops = Vec::new();
    let mut start = 0;
    let mut in_quote = false;

    for (i, c) in expr.char_indices() {
        if c == '"' {
            in_quote = !in_quote;
            continue;
        }
        if in_quote || !ARITHMETIC_OPS.contains(&c) {
            continue;
        }

        let pending = &expr[start..i];
        let only_signs = pending
            .chars()
            .all(|p| p == '+' || p == '-' || p.is_whitespace());
        if (c == '+' || c == '-') && only_signs {
            continue;
        }

        operands.push(pending);
        ops.push(c);
        start = i + c.len_utf8();
    }
    operands.push(&expr[start..]);

    (operands, ops)
}

/// Evaluate one operand of a chain to a number, applying leading signs
fn eval_operand(text: &str, env: &Env) -> f64 {
    let text = text.trim();
    if let Some(rest) = text.strip_prefix('-') {
        -eval_operand(rest, env)
    } else if let Some(rest) = text.strip_prefix('+') {
        eval_operand(rest, env)
    } else {
        eval_expr(text, env).to_number()
    }
}
