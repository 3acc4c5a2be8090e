//! Capability traits implemented by inline widgets.

use euclid::default::Size2D;

use crate::event::Event;
use crate::font_library::FontLibrary;
use crate::render::Painter;
use crate::style::Style;
use crate::text::layout::StyleMetrics;
use crate::text::markup::MarkupError;

/// Drawable, resizable UI element.
///
/// The parent framework calls `resize` before `draw`; implementations must
/// treat a draw or event without a preceding resize as a no-op rather than
/// an error.
pub trait Component {
    /// Recomputes layout against `width`, returning the size the component
    /// actually needs. `height` is advisory; components grow vertically as
    /// their content requires.
    fn resize(&mut self, metrics: &mut dyn StyleMetrics, width: f32, height: f32) -> Size2D<f32>;

    /// Renders the current layout through `painter`.
    fn draw(&mut self, fonts: &mut FontLibrary, painter: &mut dyn Painter);

    /// Handles an input event.
    fn event(&mut self, _event: &Event) {}
}

/// Inline document content node.
pub trait DocumentElement {
    /// Populates the element from a markup node, inheriting `style`.
    fn parse(&mut self, node: roxmltree::Node<'_, '_>, style: &Style) -> Result<(), MarkupError>;

    /// The element's logical text.
    fn text(&self) -> String;
}
