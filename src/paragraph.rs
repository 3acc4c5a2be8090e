use std::fmt;

use euclid::default::{Point2D, Size2D};

use crate::component::{Component, DocumentElement};
use crate::event::Event;
use crate::font_library::FontLibrary;
use crate::render::{Painter, Texture, TexturePainter};
use crate::style::Style;
use crate::text::layout::{self, LayoutOptions, ParagraphLayout, StyleMetrics};
use crate::text::markup::{self, MarkupError};
use crate::text::span::TextSpan;

type LinkListener = Box<dyn FnMut(&Paragraph, &str)>;

/// A paragraph of (formatted) text.
///
/// The text is an ordered collection of [`TextSpan`]s, so different parts
/// of one paragraph can carry different font attributes, colors, and link
/// targets. Layout state is rebuilt by [`Paragraph::resize`]; before the
/// first resize (and after any text mutation) the paragraph is unlaid and
/// both [`Paragraph::draw`] and [`Paragraph::event`] are no-ops.
///
/// Click listeners run synchronously in subscription order. A listener
/// must not mutate the paragraph it was called for; defer mutation to
/// after delivery.
pub struct Paragraph {
    spans: Vec<TextSpan>,
    style: Style,
    options: LayoutOptions,
    layout: Option<ParagraphLayout>,
    /// Cached rendering, rebuilt lazily on draw after any mutation.
    texture: Option<Texture>,
    texture_stale: bool,
    link_listeners: Vec<LinkListener>,
}

impl Default for Paragraph {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Paragraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Paragraph")
            .field("spans", &self.spans)
            .field("style", &self.style)
            .field("laid_out", &self.layout.is_some())
            .field("listeners", &self.link_listeners.len())
            .finish()
    }
}

impl Paragraph {
    /// Creates an empty paragraph with the default style.
    pub fn new() -> Self {
        Self::with_style(Style::default())
    }

    /// Creates an empty paragraph with `style` as its default style.
    pub fn with_style(style: Style) -> Self {
        Self {
            spans: Vec::new(),
            style,
            options: LayoutOptions::default(),
            layout: None,
            texture: None,
            texture_stale: true,
            link_listeners: Vec::new(),
        }
    }

    /// The paragraph's current default style.
    ///
    /// Individual spans may override it; this is the style used for text
    /// set without an explicit one.
    pub fn style(&self) -> &Style {
        &self.style
    }

    pub fn options(&self) -> &LayoutOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: LayoutOptions) {
        self.options = options;
        self.invalidate();
    }

    pub fn spans(&self) -> &[TextSpan] {
        &self.spans
    }

    /// The logical text: all spans concatenated in order, no separator.
    pub fn text(&self) -> String {
        self.spans.iter().map(TextSpan::text).collect()
    }

    /// The layout produced by the last [`Paragraph::resize`], if any.
    pub fn layout(&self) -> Option<&ParagraphLayout> {
        self.layout.as_ref()
    }

    /// Replaces all content with one span in the paragraph's default style.
    pub fn set_text(&mut self, text: impl AsRef<str>) {
        let span = TextSpan::new(text, self.style.clone());
        self.replace_spans(vec![span]);
    }

    /// Replaces all content with one span in `style`, which also becomes
    /// the paragraph's new default style.
    pub fn set_text_styled(&mut self, text: impl AsRef<str>, style: Style) {
        self.style = style.clone();
        let span = TextSpan::new(text, style);
        self.replace_spans(vec![span]);
    }

    /// Parses markup using the paragraph's current style as the base.
    pub fn parse(&mut self, node: roxmltree::Node<'_, '_>) -> Result<(), MarkupError> {
        let inherited = self.style.clone();
        self.parse_with_style(node, &inherited)
    }

    /// Parses markup with an explicitly supplied base style, as used for
    /// nested content such as list items.
    pub fn parse_with_style(
        &mut self,
        node: roxmltree::Node<'_, '_>,
        inherited: &Style,
    ) -> Result<(), MarkupError> {
        let (style, spans) = markup::parse_spans(node, inherited, &self.options)?;
        self.style = style;
        self.replace_spans(spans);
        Ok(())
    }

    /// Parses a markup string; convenience over [`Paragraph::parse`].
    pub fn parse_markup(&mut self, source: &str) -> Result<(), MarkupError> {
        let (style, spans) = markup::parse_document(source, &self.style, &self.options)?;
        self.style = style;
        self.replace_spans(spans);
        Ok(())
    }

    /// Recomputes line wrapping against `width`.
    ///
    /// The returned height is what the content actually needs; the
    /// `height` argument is advisory and does not clip. Link rectangles
    /// are fully rebuilt as a side effect.
    pub fn resize(
        &mut self,
        metrics: &mut dyn StyleMetrics,
        width: f32,
        _height: f32,
    ) -> Size2D<f32> {
        let layout = layout::wrap(&self.spans, metrics, &self.options, width);
        let size = Size2D::new(width, layout.height);
        self.layout = Some(layout);
        self.texture_stale = true;
        size
    }

    /// Renders the current layout through `painter`.
    ///
    /// The paragraph keeps a cached texture of its rendering and blits it;
    /// the cache is rebuilt here when text or size changed since the last
    /// draw. Output is identical whether or not the cache was reused.
    pub fn draw(&mut self, fonts: &mut FontLibrary, painter: &mut dyn Painter) {
        let Some(layout) = &self.layout else {
            log::warn!("Draw called before resize; nothing to render.");
            return;
        };
        if layout.lines.is_empty() {
            return;
        }

        if self.texture_stale || self.texture.is_none() {
            let width = layout.max_line_width.max(layout.width).ceil().max(1.0) as usize;
            let height = layout.height.ceil().max(1.0) as usize;
            let mut texture = Texture::new(width, height);
            {
                let mut texture_painter = TexturePainter::new(&mut texture);
                for line in &layout.lines {
                    for word in &line.words {
                        texture_painter.draw_text(
                            fonts,
                            Point2D::new(word.x, line.baseline),
                            &word.text,
                            &self.spans[word.span].style,
                        );
                    }
                }
            }
            self.texture = Some(texture);
            self.texture_stale = false;
        }

        if let Some(texture) = &self.texture {
            painter.blit(texture, Point2D::zero());
        }
    }

    /// Routes a pointer event to the link rectangles of the last layout.
    ///
    /// A click inside a link rectangle notifies every listener with the
    /// originating span's text; the first rectangle in storage order wins
    /// if several match. Clicks elsewhere, non-click events, and events
    /// before the first resize are ignored.
    pub fn event(&mut self, event: &Event) {
        let Event::PointerClick { position } = event else {
            return;
        };
        let Some(layout) = &self.layout else {
            log::debug!("Event received before resize; ignoring.");
            return;
        };
        let Some(span_index) = layout.link_at(*position) else {
            return;
        };

        let text = self.spans[span_index].text().to_string();
        self.emit_link_clicked(&text);
    }

    /// Subscribes to link clicks. Listeners are invoked synchronously, in
    /// subscription order, with the paragraph and the clicked span's text.
    pub fn connect_link_clicked(&mut self, listener: impl FnMut(&Paragraph, &str) + 'static) {
        self.link_listeners.push(Box::new(listener));
    }

    fn emit_link_clicked(&mut self, text: &str) {
        // Listeners are detached during delivery so they can borrow the
        // paragraph. Ones connected mid-delivery miss the in-flight event
        // but keep their subscription order for the next one.
        let mut listeners = std::mem::take(&mut self.link_listeners);
        for listener in &mut listeners {
            listener(&*self, text);
        }
        let connected_during = std::mem::replace(&mut self.link_listeners, listeners);
        self.link_listeners.extend(connected_during);
    }

    fn replace_spans(&mut self, spans: Vec<TextSpan>) {
        self.spans = spans;
        self.invalidate();
    }

    fn invalidate(&mut self) {
        self.layout = None;
        self.texture = None;
        self.texture_stale = true;
    }
}

impl Component for Paragraph {
    fn resize(&mut self, metrics: &mut dyn StyleMetrics, width: f32, height: f32) -> Size2D<f32> {
        Self::resize(self, metrics, width, height)
    }

    fn draw(&mut self, fonts: &mut FontLibrary, painter: &mut dyn Painter) {
        Self::draw(self, fonts, painter)
    }

    fn event(&mut self, event: &Event) {
        Self::event(self, event)
    }
}

impl DocumentElement for Paragraph {
    fn parse(&mut self, node: roxmltree::Node<'_, '_>, style: &Style) -> Result<(), MarkupError> {
        self.parse_with_style(node, style)
    }

    fn text(&self) -> String {
        Self::text(self)
    }
}
