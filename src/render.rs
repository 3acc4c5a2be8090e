/// The drawing-surface abstraction and the software painter.
pub mod painter;
/// Owned RGBA surfaces used as render targets and caches.
pub mod texture;

pub use painter::{Painter, TexturePainter};
pub use texture::Texture;
