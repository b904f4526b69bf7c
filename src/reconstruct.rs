//! Reassembles equations that OCR split across physical lines.
//!
//! This is a best-effort heuristic, not a parser. It can attach a bare
//! trailing number to the wrong pending left-hand side, and it flushes a
//! pending fragment as soon as a complete equation shows up, even when the
//! fragment was meant to continue. The precedence of the rules below is
//! deliberate and must not change:
//!
//! 1. a line of digits completes the pending fragment as its right-hand side;
//! 2. a line containing `=` first flushes the pending fragment, then is
//!    emitted as-is;
//! 3. anything else is appended to the pending fragment.

use tracing::trace;

fn is_bare_number(line: &str) -> bool {
    !line.is_empty() && line.chars().all(|c| c.is_ascii_digit())
}

/// Split `text` into trimmed, non-empty lines.
pub fn fragments(text: &str) -> Vec<&str> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
}

/// Merge fragmented lines into equation lines, preserving input order.
///
/// Never emits more lines than there are non-empty input lines.
pub fn reconstruct(text: &str) -> Vec<String> {
    let mut emitted = Vec::new();
    let mut pending = String::new();

    for line in fragments(text) {
        if is_bare_number(line) && !pending.is_empty() {
            trace!(lhs = %pending, rhs = line, "completing pending fragment");
            pending.push('=');
            pending.push_str(line);
            emitted.push(std::mem::take(&mut pending));
        } else if line.contains('=') {
            if !pending.is_empty() {
                trace!(fragment = %pending, "flushing fragment before equation");
                emitted.push(std::mem::take(&mut pending));
            }
            emitted.push(line.to_string());
        } else {
            pending.push_str(line);
        }
    }

    if !pending.is_empty() {
        emitted.push(pending);
    }
    emitted
}
