//! # Kumihan
//!
//! A styled paragraph layout and link hit-testing library for Rust.
//!
//! ## Overview
//!
//! `Kumihan` turns a sequence of styled text spans into word-wrapped lines
//! that fit a target width, renders them through a pluggable [`Painter`],
//! and dispatches pointer clicks on hyperlink words to registered listeners.
//! The central type is the [`Paragraph`], which owns its spans, its default
//! [`Style`], a lazily cached [`Texture`], and the link rectangles computed
//! by the last layout pass.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use kumihan::{FontSystem, Paragraph};
//!
//! // 1. Create a FontSystem and load fonts
//! let font_system = FontSystem::new();
//! font_system.load_system_fonts();
//!
//! // 2. Build a paragraph from markup
//! let mut paragraph = Paragraph::new();
//! paragraph
//!     .parse_markup(r#"<p>Visit the <a href="town-hall">town hall</a>!</p>"#)
//!     .expect("valid markup");
//!
//! // 3. Lay out at the available width, then draw and route events
//! // let size = font_system.resize(&mut paragraph, 320.0, 0.0);
//! // font_system.draw(&mut paragraph, &mut painter);
//! // paragraph.event(&event);
//! ```
//!
//! ## Features
//!
//! *   **Span-based layout**: greedy word wrapping over styled runs, with
//!     words allowed to cross span boundaries.
//! *   **Inline markup**: `<b>`, `<i>`, `<u>`, `<tt>`, `<span>`, `<a href>`,
//!     and `<li>` list items parsed into spans via `roxmltree`.
//! *   **Link hit-testing**: per-word rectangles rebuilt on every layout,
//!     with synchronous, ordered click notification.
//! *   **Font management**: fontdb-backed loading with lazily instantiated
//!     fontdue fonts and an LRU cache of rasterized glyphs.

pub mod component;
pub mod event;
pub mod font_library;
pub mod font_system;
pub mod glyph_key;
pub mod paragraph;
pub mod render;
pub mod style;
pub mod text;

// common re-exports
pub use component::{Component, DocumentElement};
pub use event::Event;
pub use font_library::FontLibrary;
pub use font_system::FontSystem;
pub use glyph_key::GlyphKey;
pub use paragraph::Paragraph;
pub use render::{Painter, Texture, TexturePainter};
pub use style::{Color, FontFamily, Style};
pub use text::{LayoutOptions, MarkupError, StyleMetrics, TextSpan};

// re-export dependencies
pub use euclid;
pub use fontdb;
pub use fontdue;
pub use parking_lot;
pub use roxmltree;
