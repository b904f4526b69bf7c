//! Text normalization for OCR and hand-typed math.
//!
//! Canonicalizes look-alike Unicode operators to ASCII, strips spaces that
//! OCR injects inside tokens, and makes implicit multiplication explicit
//! (`2x` becomes `2*x`). Line breaks survive so that the reconstructor can
//! still see the original line structure.

use once_cell::sync::Lazy;
use regex::Regex;

// Any whitespace except a line feed. Carriage returns are handled before this
// runs.
static INLINE_WHITESPACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\S\n]+").expect("valid whitespace pattern"));

fn canonical_glyph(c: char) -> Option<&'static str> {
    let replacement = match c {
        '−' | '–' | '—' | '－' | '﹣' => "-",
        '×' | '·' | '⋅' | '∗' => "*",
        '÷' | '∕' => "/",
        '＝' => "=",
        '＋' => "+",
        '（' => "(",
        '）' => ")",
        '²' => "**2",
        '³' => "**3",
        _ => return None,
    };
    Some(replacement)
}

fn replace_glyphs(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match canonical_glyph(c) {
            Some(ascii) => out.push_str(ascii),
            None => out.push(c),
        }
    }
    out
}

fn needs_explicit_product(prev: char, next: char) -> bool {
    match prev {
        '0'..='9' => next.is_ascii_alphabetic() || next == '(',
        ')' => next.is_ascii_alphanumeric() || next == '(',
        _ => false,
    }
}

/// Insert `*` between adjacent factors in a single left-to-right scan.
///
/// Inserted operators are never examined again, so the result is a fixed
/// point: `insert_implicit_multiplication` applied twice equals applying it
/// once.
pub fn insert_implicit_multiplication(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + text.len() / 4);
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        out.push(c);
        if let Some(&next) = chars.peek() {
            if needs_explicit_product(c, next) {
                out.push('*');
            }
        }
    }
    out
}

/// Canonicalize raw OCR or user text into parser-ready form.
///
/// Never fails; text without anything to rewrite passes through unchanged
/// apart from whitespace removal.
pub fn normalize(raw: &str) -> String {
    let unified_breaks = raw.replace("\r\n", "\n").replace('\r', "\n");
    let glyphs = replace_glyphs(&unified_breaks);
    let compact = INLINE_WHITESPACE.replace_all(&glyphs, "");
    insert_implicit_multiplication(&compact)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replaces_unicode_operators() {
        assert_eq!(normalize("3 × 4 ÷ 2 − 1 ＝ x"), "3*4/2-1=x");
        assert_eq!(normalize("a – b — c"), "a-b-c");
    }

    #[test]
    fn expands_superscripts() {
        assert_eq!(normalize("x² + y³"), "x**2+y**3");
    }

    #[test]
    fn strips_spaces_inside_tokens() {
        assert_eq!(normalize("2 x + 3 = 7"), "2*x+3=7");
        assert_eq!(normalize("1 2x\t= 2 4"), "12*x=24");
    }

    #[test]
    fn keeps_line_breaks() {
        assert_eq!(normalize("2x + 3\r\n= 7\r8"), "2*x+3\n=7\n8");
    }

    #[test]
    fn inserts_implicit_multiplication() {
        assert_eq!(insert_implicit_multiplication("2x+3y"), "2*x+3*y");
        assert_eq!(insert_implicit_multiplication("2(x+1)(x-1)"), "2*(x+1)*(x-1)");
        assert_eq!(insert_implicit_multiplication("(x)2x"), "(x)*2*x");
    }

    #[test]
    fn superscript_followed_by_symbol_gets_product() {
        assert_eq!(normalize("3x²y"), "3*x**2*y");
    }

    #[test]
    fn insertion_is_not_duplicated() {
        let once = insert_implicit_multiplication("2x+4(y)z");
        assert_eq!(insert_implicit_multiplication(&once), once);
    }

    #[test]
    fn plain_text_passes_through() {
        assert_eq!(normalize("x=1"), "x=1");
        assert_eq!(normalize(""), "");
    }
}
