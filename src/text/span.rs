use crate::style::Style;

/// Contiguous run of text sharing one [`Style`], stored in normalized form
/// (every whitespace run collapsed to a single space).
///
/// A paragraph's logical text is the concatenation of its spans in order,
/// with no separator inserted; spans are expected to already carry the
/// spaces they need at their boundaries.
#[derive(Clone, Debug, PartialEq)]
pub struct TextSpan {
    pub style: Style,
    text: String,
}

impl TextSpan {
    /// Creates a span, normalizing the whitespace of `text`.
    pub fn new(text: impl AsRef<str>, style: Style) -> Self {
        Self {
            style,
            text: normalize_whitespace(text.as_ref()),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Collapses every run of whitespace to a single space.
///
/// Leading and trailing runs also collapse but are not stripped; the caller
/// decides whether boundary spaces are meaningful. Normalizing twice equals
/// normalizing once.
pub fn normalize_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_whitespace = false;
    for ch in text.chars() {
        if ch.is_whitespace() {
            if !in_whitespace {
                out.push(' ');
            }
            in_whitespace = true;
        } else {
            out.push(ch);
            in_whitespace = false;
        }
    }
    out
}
