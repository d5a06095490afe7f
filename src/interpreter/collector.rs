//! Block collector
//!
//! Extracts the brace-delimited blocks controlled by a conditional or loop
//! header. Nested brace pairs are kept verbatim inside the collected block;
//! they are only resolved when that block itself is executed.

use tracing::debug;

/// Words that introduce the else-block of a conditional
pub const ELSE_KEYWORDS: [&str; 2] = ["fallback", "else"];

/// Blocks controlled by a conditional header
#[derive(Debug, Clone, PartialEq, Default)]
pub struct IfBlocks {
    pub then_block: Vec<String>,
    pub else_block: Vec<String>,
    /// Index of the first line after all collected blocks
    pub next: usize,
}

/// Block controlled by a loop header
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LoopBlock {
    pub block: Vec<String>,
    pub test: String,
    /// Index of the first line after the block
    pub next: usize,
}

/// Text strictly between the first `(` and the last `)` of a header
pub fn extract_condition(header: &str) -> String {
    match (header.find('('), header.rfind(')')) {
        (Some(open), Some(close)) if close > open => header[open + 1..close].trim().to_string(),
        _ => String::new(),
    }
}

/// Collect `{ then } [fallback { else }]` for the header at `start`
pub fn collect_if_else(lines: &[String], start: usize) -> IfBlocks {
    let Some(open) = find_open_brace(lines, start + 1) else {
        debug!(line = start, "conditional without a block");
        return IfBlocks {
            next: start + 1,
            ..Default::default()
        };
    };

    let (then_block, then_end) = collect_brace_block(lines, open);
    let mut next = then_end + 1;

    let mut else_block = Vec::new();
    if lines.get(next).is_some_and(|line| is_else_introducer(line)) {
        next += 1;
        if let Some(open) = find_open_brace(lines, next) {
            let (block, end) = collect_brace_block(lines, open);
            else_block = block;
            next = end + 1;
        }
    }

    debug!(
        line = start,
        then_len = then_block.len(),
        else_len = else_block.len(),
        next,
        "collected conditional blocks"
    );

    IfBlocks {
        then_block,
        else_block,
        next,
    }
}

/// Collect `{ body }` for the loop header at `start`
pub fn collect_loop(lines: &[String], start: usize) -> LoopBlock {
    let test = lines
        .get(start)
        .map(|header| extract_condition(header))
        .unwrap_or_default();

    let Some(open) = find_open_brace(lines, start + 1) else {
        debug!(line = start, "loop without a block");
        return LoopBlock {
            block: Vec::new(),
            test,
            next: start + 1,
        };
    };

    let (block, end) = collect_brace_block(lines, open);
    debug!(line = start, body_len = block.len(), next = end + 1, "collected loop block");

    LoopBlock {
        block,
        test,
        next: end + 1,
    }
}

/// Collect the lines inside the brace pair opening at `open`
///
/// Returns the block and the index of its closing brace. An unmatched
/// block runs to the end of the sequence.
pub fn collect_brace_block(lines: &[String], open: usize) -> (Vec<String>, usize) {
    let mut depth = 0usize;
    let mut block = Vec::new();

    for (i, line) in lines.iter().enumerate().skip(open) {
        match line.as_str() {
            "{" => {
                depth += 1;
                if depth > 1 {
                    block.push(line.clone());
                }
            }
            "}" => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return (block, i);
                }
                block.push(line.clone());
            }
            _ => block.push(line.clone()),
        }
    }

    (block, lines.len().saturating_sub(1))
}

fn find_open_brace(lines: &[String], from: usize) -> Option<usize> {
    (from..lines.len()).find(|&i| lines[i] == "{")
}

fn is_else_introducer(line: &str) -> bool {
    ELSE_KEYWORDS.iter().any(|kw| {
        line.strip_prefix(kw)
            .is_some_and(|rest| !rest.starts_with(|c: char| c.is_ascii_alphanumeric() || c == '_'))
    })
}
