//! Condition evaluation
//!
//! A condition is rewritten textually and then split on a single
//! comparison operator:
//! 1. `join`, `either`, `void` become `&&`, `||`, `!`
//! 2. Known variable names are replaced by their values as literals
//! 3. The first operator found from `>=, <=, ==, !=, >, <` splits the text
//!    and both sides are evaluated as expressions
//! 4. Without a comparison, the truthiness of the whole text is used
//!
//! Only one comparison is ever applied; the logical connectives are not
//! evaluated as a boolean tree.

use super::expressions::eval_expr;
use super::types::{Env, Val};
use std::cmp::Ordering;
use tracing::trace;

/// Comparison operators in the order they are searched for
pub const COMPARISON_OPS: [&str; 6] = [">=", "<=", "==", "!=", ">", "<"];

/// Evaluate a condition string to a boolean
pub fn evaluate_condition(condition: &str, env: &Env) -> bool {
    if condition.trim().is_empty() {
        return false;
    }

    let rewritten = substitute_variables(&replace_logical_keywords(condition), env);
    trace!(condition, %rewritten, "condition rewritten");

    for op in COMPARISON_OPS {
        if let Some(idx) = rewritten.find(op) {
            let left = eval_expr(&rewritten[..idx], env);
            let right = eval_expr(&rewritten[idx + op.len()..], env);
            return compare(op, &left, &right);
        }
    }

    eval_expr(&rewritten, env).is_truthy()
}

fn compare(op: &str, left: &Val, right: &Val) -> bool {
    match op {
        "==" => left.loose_eq(right),
        "!=" => !left.loose_eq(right),
        _ => match left.order(right) {
            Some(ordering) => match op {
                ">=" => ordering != Ordering::Less,
                "<=" => ordering != Ordering::Greater,
                ">" => ordering == Ordering::Greater,
                _ => ordering == Ordering::Less,
            },
            None => false,
        },
    }
}

/* ===================== Rewriting ===================== */

/// Replace the logical keywords (whole words only)
pub fn replace_logical_keywords(condition: &str) -> String {
    map_words(condition, |word| match word {
        "join" => Some("&&".to_string()),
        "either" => Some("||".to_string()),
        "void" => Some("!".to_string()),
        _ => None,
    })
}

/// Replace identifiers naming declared variables with their values
///
/// Unknown identifiers are left in place so they take part literally.
pub fn substitute_variables(condition: &str, env: &Env) -> String {
    map_words(condition, |word| {
        let starts_like_identifier = word
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
        if !starts_like_identifier {
            return None;
        }
        env.get(word).map(|slot| slot.value.to_literal())
    })
}

/// Rewrite every word (run of ASCII alphanumerics and `_`) outside double quotes
fn map_words<F>(text: &str, mut f: F) -> String
where
    F: FnMut(&str) -> Option<String>,
{
    let mut out = String::with_capacity(text.len());
    let mut chars = text.char_indices().peekable();
    let mut in_quote = false;

    while let Some((i, c)) = chars.next() {
        if c == '"' {
            in_quote = !in_quote;
            out.push(c);
            continue;
        }
        if in_quote || !is_word_char(c) {
            out.push(c);
            continue;
        }

        let mut end = i + c.len_utf8();
        while let Some(&(j, next)) = chars.peek() {
            if !is_word_char(next) {
                break;
            }
            end = j + next.len_utf8();
            chars.next();
        }

        let word = &text[i..end];
        match f(word) {
            Some(replacement) => out.push_str(&replacement),
            None => out.push_str(word),
        }
    }

    out
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}
