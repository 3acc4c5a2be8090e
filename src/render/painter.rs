use euclid::default::{Box2D, Point2D};

use crate::font_library::FontLibrary;
use crate::glyph_key::GlyphKey;
use crate::render::texture::Texture;
use crate::style::Style;

/// Drawing surface consumed by paragraph rendering.
///
/// `draw_text` positions are baseline origins: `position.y` is the text
/// baseline and glyphs extend above and below it. The font library is
/// passed per call rather than captured, so one painter can serve any
/// number of widgets sharing one library.
pub trait Painter {
    /// Draws `text` in `style` with its baseline origin at `position`.
    fn draw_text(
        &mut self,
        fonts: &mut FontLibrary,
        position: Point2D<f32>,
        text: &str,
        style: &Style,
    );

    /// Composites `texture` with its top-left corner at `position`.
    fn blit(&mut self, texture: &Texture, position: Point2D<f32>);
}

/// Software painter that rasterizes into an owned [`Texture`].
///
/// Glyph bitmaps come from the library's raster cache, so repeated draws
/// of the same text reuse coverage data across paragraphs.
pub struct TexturePainter<'a> {
    target: &'a mut Texture,
}

impl<'a> TexturePainter<'a> {
    pub fn new(target: &'a mut Texture) -> Self {
        Self { target }
    }
}

impl Painter for TexturePainter<'_> {
    fn draw_text(
        &mut self,
        fonts: &mut FontLibrary,
        position: Point2D<f32>,
        text: &str,
        style: &Style,
    ) {
        let Some((font_id, font)) = fonts.resolve(style) else {
            log::warn!("Skipping text run: no font for family {:?}", style.family);
            return;
        };

        let mut origin = 0.0f32;
        let mut previous: Option<(u16, f32)> = None;

        for ch in text.chars() {
            let index = font.lookup_glyph_index(ch);
            let metrics = font.metrics_indexed(index, style.size);
            if let Some((previous_index, previous_advance)) = previous {
                let kerning = font
                    .horizontal_kern_indexed(previous_index, index, style.size)
                    .unwrap_or(0.0);
                origin += previous_advance + kerning;
            }

            if metrics.width > 0
                && metrics.height > 0
                && let Some(glyph) = fonts.rasterized(GlyphKey::new(font_id, index, style.size))
            {
                // Glyph bitmaps hang from the baseline: the top-left corner
                // sits at -(ymin + height) relative to it.
                let x0 = position.x + origin + metrics.xmin as f32;
                let y0 = position.y - (metrics.ymin as f32 + metrics.height as f32);
                for row in 0..glyph.height {
                    for col in 0..glyph.width {
                        let coverage = glyph.data[row * glyph.width + col];
                        if coverage == 0 {
                            continue;
                        }
                        self.target.blend_pixel(
                            (x0 + col as f32).floor() as i32,
                            (y0 + row as f32).floor() as i32,
                            style.color,
                            coverage as f32 / 255.0,
                        );
                    }
                }
            }

            previous = Some((index, metrics.advance_width));
        }

        if style.underline {
            let width = match previous {
                Some((_, advance)) => origin + advance,
                None => return,
            };
            self.target.fill_rect(
                Box2D::new(
                    Point2D::new(position.x, position.y + 1.0),
                    Point2D::new(position.x + width, position.y + 2.0),
                ),
                style.color,
            );
        }
    }

    fn blit(&mut self, texture: &Texture, position: Point2D<f32>) {
        self.target.blit(texture, position);
    }
}
