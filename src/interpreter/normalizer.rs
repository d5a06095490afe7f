//! Program normalizer
//!
//! Turns free-form program text into the flat line sequence the executor
//! walks: every brace on its own line, all lines trimmed, blanks dropped,
//! and the program-entry wrapper removed.

/// Keywords that introduce the program-entry wrapper
pub const ENTRY_KEYWORDS: [&str; 2] = ["main", "nexus"];

/// Normalize program text into a flat line sequence
///
/// Missing wrapper pieces are tolerated: a program without a header or
/// without a closing brace normalizes to whatever lines it has.
pub fn normalize(source: &str) -> Vec<String> {
    let exploded = source.replace('{', "\n{\n").replace('}', "\n}\n");
    let mut lines: Vec<String> = exploded
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect();

    strip_entry_wrapper(&mut lines);
    lines
}

fn is_entry_header(line: &str) -> bool {
    ENTRY_KEYWORDS.iter().any(|kw| {
        line == *kw
            || line
                .strip_prefix(kw)
                .is_some_and(|rest| rest.starts_with(char::is_whitespace))
    })
}

fn strip_entry_wrapper(lines: &mut Vec<String>) {
    if lines.first().is_some_and(|line| is_entry_header(line)) {
        lines.remove(0);
        if lines.first().is_some_and(|line| line == "{") {
            lines.remove(0);
        }
    }

    if lines.last().is_some_and(|line| line == "}") {
        lines.pop();
    }
}
