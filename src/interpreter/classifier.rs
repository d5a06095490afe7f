//! Line classifier
//!
//! Turns one line of the flat sequence into a tagged [`Stmt`]. Shapes are
//! recognised by literal prefix in a fixed order: conditional header,
//! loop header, declaration, input, output, assignment.

use super::collector::extract_condition;
use super::executor::types::{Declarator, Stmt, VarType};

pub const IF_KEYWORDS: [&str; 2] = ["if", "probe"];
pub const WHILE_KEYWORDS: [&str; 2] = ["while", "pulse"];
pub const DECLARE_KEYWORDS: [&str; 2] = ["var", "shard"];
pub const INPUT_KEYWORDS: [&str; 2] = ["input", "listen"];
pub const OUTPUT_KEYWORDS: [&str; 2] = ["output", "broadcast"];

/// Strip one trailing statement terminator
pub fn strip_terminator(line: &str) -> &str {
    line.strip_suffix(';').unwrap_or(line).trim()
}

/// Classify a single line
pub fn classify(line: &str) -> Stmt {
    let line = strip_terminator(line);

    // Headers match on the bare prefix, so `iffy = 1` is a conditional
    if IF_KEYWORDS.iter().any(|kw| line.starts_with(kw)) {
        return Stmt::If {
            test: extract_condition(line),
        };
    }
    if WHILE_KEYWORDS.iter().any(|kw| line.starts_with(kw)) {
        return Stmt::While {
            test: extract_condition(line),
        };
    }

    if let Some(rest) = keyword_rest(line, &DECLARE_KEYWORDS) {
        return classify_declaration(rest);
    }
    if let Some(rest) = keyword_rest(line, &INPUT_KEYWORDS) {
        return Stmt::Input {
            name: rest.trim().to_string(),
        };
    }
    if let Some(rest) = keyword_rest(line, &OUTPUT_KEYWORDS) {
        return Stmt::Output {
            expr: rest.trim().to_string(),
        };
    }

    if line.contains('=') && !line.contains("==") {
        let mut parts = line.split('=');
        let name = parts.next().unwrap_or_default().trim().to_string();
        let expr = parts.next().unwrap_or_default().trim().to_string();
        return Stmt::Assign { name, expr };
    }

    Stmt::Nop
}

/// Text after `<keyword> ` for the first keyword that matches
fn keyword_rest<'a>(line: &'a str, keywords: &[&str]) -> Option<&'a str> {
    keywords.iter().find_map(|kw| {
        line.strip_prefix(kw)
            .filter(|rest| rest.starts_with(char::is_whitespace))
    })
}

/// Characters a declaration body may contain; anything after the first
/// other character is ignored
fn is_declaration_char(c: char) -> bool {
    c.is_alphanumeric() || c.is_whitespace() || ",=+-*/().'\"_".contains(c)
}

/// `<type> name[, name = expr]...`
fn classify_declaration(rest: &str) -> Stmt {
    let rest = rest.trim_start();
    let type_end = rest
        .find(|c: char| !(c.is_alphanumeric() || c == '_'))
        .unwrap_or(rest.len());
    let (type_word, body) = rest.split_at(type_end);

    if type_word.is_empty() || !body.starts_with(char::is_whitespace) {
        return Stmt::Nop;
    }

    let body = body.trim_start();
    let body = &body[..body.find(|c: char| !is_declaration_char(c)).unwrap_or(body.len())];

    let decls = body
        .split(',')
        .map(str::trim)
        .filter_map(|part| {
            if part.contains('=') {
                let mut sides = part.split('=');
                let name = sides.next().unwrap_or_default().trim();
                let init = sides.next().unwrap_or_default().trim();
                (!name.is_empty()).then(|| Declarator {
                    name: name.to_string(),
                    init: Some(init.to_string()),
                })
            } else {
                (!part.is_empty()).then(|| Declarator {
                    name: part.to_string(),
                    init: None,
                })
            }
        })
        .collect::<Vec<_>>();

    if decls.is_empty() {
        return Stmt::Nop;
    }

    Stmt::Declare {
        ty: VarType::from_keyword(type_word),
        decls,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decl(name: &str, init: Option<&str>) -> Declarator {
        Declarator {
            name: name.to_string(),
            init: init.map(String::from),
        }
    }

    #[test]
    fn test_classify_declarations() {
        assert_eq!(
            classify("shard core x, y;"),
            Stmt::Declare {
                ty: VarType::Int,
                decls: vec![decl("x", None), decl("y", None)],
            }
        );
        assert_eq!(
            classify("var float sum = x + y"),
            Stmt::Declare {
                ty: VarType::Float,
                decls: vec![decl("sum", Some("x + y"))],
            }
        );
        assert_eq!(
            classify("shard glyph name = \"bob\", other"),
            Stmt::Declare {
                ty: VarType::Str,
                decls: vec![decl("name", Some("\"bob\"")), decl("other", None)],
            }
        );
    }

    #[test]
    fn test_unknown_type_word_declares_string() {
        assert_eq!(
            classify("var text t"),
            Stmt::Declare {
                ty: VarType::Str,
                decls: vec![decl("t", None)],
            }
        );
    }

    #[test]
    fn test_declaration_without_names_is_nop() {
        assert_eq!(classify("var int"), Stmt::Nop);
        assert_eq!(classify("shard core ;"), Stmt::Nop);
    }

    #[test]
    fn test_declaration_body_stops_at_foreign_char() {
        assert_eq!(
            classify("var bool ok = a > b"),
            Stmt::Declare {
                ty: VarType::Bool,
                decls: vec![decl("ok", Some("a"))],
            }
        );
    }

    #[test]
    fn test_classify_io() {
        assert_eq!(
            classify("listen x;"),
            Stmt::Input {
                name: "x".to_string()
            }
        );
        assert_eq!(
            classify("input   y"),
            Stmt::Input {
                name: "y".to_string()
            }
        );
        assert_eq!(
            classify("broadcast \"Hello\";"),
            Stmt::Output {
                expr: "\"Hello\"".to_string()
            }
        );
    }

    #[test]
    fn test_classify_headers() {
        assert_eq!(
            classify("probe (x > 0)"),
            Stmt::If {
                test: "x > 0".to_string()
            }
        );
        assert_eq!(
            classify("pulse (i <= n)"),
            Stmt::While {
                test: "i <= n".to_string()
            }
        );
        // Prefix match, not a keyword match
        assert_eq!(
            classify("iffy = 3;"),
            Stmt::If {
                test: String::new()
            }
        );
    }

    #[test]
    fn test_classify_assignment() {
        assert_eq!(
            classify("x = x + 1;"),
            Stmt::Assign {
                name: "x".to_string(),
                expr: "x + 1".to_string()
            }
        );
        assert_eq!(classify("x == 1"), Stmt::Nop);
    }

    #[test]
    fn test_classify_nop() {
        assert_eq!(classify("{"), Stmt::Nop);
        assert_eq!(classify("}"), Stmt::Nop);
        assert_eq!(classify("fallback"), Stmt::Nop);
        assert_eq!(classify("outputs"), Stmt::Nop);
    }

    #[test]
    fn test_strip_terminator() {
        assert_eq!(strip_terminator("output x;"), "output x");
        assert_eq!(strip_terminator("output x;;"), "output x;");
        assert_eq!(strip_terminator("output x"), "output x");
    }
}
