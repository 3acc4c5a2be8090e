pub const SIZE_QUANTIZE: f32 = 256f32;

/// Cache key for a rasterized glyph.
///
/// The same glyph is not guaranteed to receive the same `GlyphKey` across
/// program runs because `fontdb` IDs are assigned at load time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GlyphKey {
    font_id: fontdb::ID,
    glyph_index: u16,
    size_q: u32, // font size * SIZE_QUANTIZE as u32
}

impl GlyphKey {
    pub fn new(font_id: fontdb::ID, glyph_index: u16, font_size: f32) -> Self {
        Self {
            font_id,
            glyph_index,
            size_q: (font_size * SIZE_QUANTIZE).round() as u32,
        }
    }

    pub fn font_id(&self) -> fontdb::ID {
        self.font_id
    }

    pub fn glyph_index(&self) -> u16 {
        self.glyph_index
    }

    pub fn font_size(&self) -> f32 {
        self.size_q as f32 / SIZE_QUANTIZE
    }
}
