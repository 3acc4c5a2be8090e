/// The core word-wrap engine and its output types.
pub mod layout;
/// Markup parsing into styled spans.
pub mod markup;
/// Normalized text runs.
pub mod span;

pub use layout::{
    LayoutLine, LayoutOptions, LinkRect, ParagraphLayout, PlacedWord, StyleMetrics,
    VerticalMetrics, wrap,
};
pub use markup::{MarkupError, parse_document, parse_spans};
pub use span::{TextSpan, normalize_whitespace};
