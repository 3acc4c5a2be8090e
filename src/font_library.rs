use std::{collections::HashMap, path::PathBuf, sync::Arc};

use crate::glyph_key::GlyphKey;
use crate::style::{FontFamily, Style};
use crate::text::layout::{StyleMetrics, VerticalMetrics};

mod raster_cache;

pub use raster_cache::{DEFAULT_RASTER_CAPACITY, LruMap, RasterCache, RasterizedGlyph};

/// Face lookup key derived from a [`Style`]; size does not participate
/// because face selection is size-independent.
#[derive(Clone, PartialEq, Eq, Hash)]
struct FaceKey {
    family: FontFamily,
    bold: bool,
    italic: bool,
}

impl FaceKey {
    fn of(style: &Style) -> Self {
        Self {
            family: style.family.clone(),
            bold: style.bold,
            italic: style.italic,
        }
    }
}

/// Manages font loading, style resolution, and glyph rasterization.
///
/// This struct combines a database of available fonts (`fontdb`) with a
/// cache of loaded font instances (`fontdue`), a style-to-face resolution
/// cache, and an LRU cache of rasterized glyph bitmaps. Faces are resolved
/// by family, weight, and slant; the actual font data is loaded lazily the
/// first time a face is used.
pub struct FontLibrary {
    /// This is the font set that has been loaded by fontdb.
    font_db: fontdb::Database,
    /// This is the font that has been loaded by fontdue.
    /// Not all fonts in fontdb are necessarily loaded here.
    loaded_font: HashMap<fontdb::ID, Arc<fontdue::Font>, fxhash::FxBuildHasher>,
    /// Style-driven face resolution results, including misses.
    resolved: HashMap<FaceKey, Option<fontdb::ID>, fxhash::FxBuildHasher>,
    rasters: RasterCache,
}

impl Default for FontLibrary {
    fn default() -> Self {
        Self::new()
    }
}

impl FontLibrary {
    /// Creates a new empty font library.
    pub fn new() -> Self {
        Self {
            font_db: fontdb::Database::new(),
            loaded_font: HashMap::with_hasher(fxhash::FxBuildHasher::default()),
            resolved: HashMap::with_hasher(fxhash::FxBuildHasher::default()),
            rasters: RasterCache::new(DEFAULT_RASTER_CAPACITY),
        }
    }
}

/// Loading fonts into fontdb and setting up fontdb.
impl FontLibrary {
    /// Loads a font from binary data.
    pub fn load_font_binary(&mut self, data: impl Into<Vec<u8>>) {
        self.font_db.load_font_data(data.into());
        self.resolved.clear();
    }

    /// Loads a font from a file path.
    pub fn load_font_file(&mut self, path: PathBuf) -> Result<(), std::io::Error> {
        let result = self.font_db.load_font_file(path);
        self.resolved.clear();
        result
    }

    /// Loads all fonts from a directory.
    pub fn load_fonts_dir(&mut self, dir: PathBuf) {
        self.font_db.load_fonts_dir(dir);
        self.resolved.clear();
    }

    /// Loads the system fonts.
    pub fn load_system_fonts(&mut self) {
        self.font_db.load_system_fonts();
        self.resolved.clear();
    }

    /// Removes a face by ID.
    pub fn remove_face(&mut self, id: fontdb::ID) {
        self.font_db.remove_face(id);
        self.loaded_font.remove(&id);
        self.resolved.clear();
    }

    /// Checks if the library is empty.
    pub fn is_empty(&self) -> bool {
        self.font_db.is_empty()
    }

    /// Returns the number of loaded faces.
    pub fn len(&self) -> usize {
        self.font_db.len()
    }

    /// Sets the family name for the "serif" generic family.
    pub fn set_serif_family(&mut self, family: impl Into<String>) {
        self.font_db.set_serif_family(family);
        self.resolved.clear();
    }

    /// Sets the family name for the "sans-serif" generic family.
    pub fn set_sans_serif_family(&mut self, family: impl Into<String>) {
        self.font_db.set_sans_serif_family(family);
        self.resolved.clear();
    }

    /// Sets the family name for the "cursive" generic family.
    pub fn set_cursive_family(&mut self, family: impl Into<String>) {
        self.font_db.set_cursive_family(family);
        self.resolved.clear();
    }

    /// Sets the family name for the "fantasy" generic family.
    pub fn set_fantasy_family(&mut self, family: impl Into<String>) {
        self.font_db.set_fantasy_family(family);
        self.resolved.clear();
    }

    /// Sets the family name for the "monospace" generic family.
    pub fn set_monospace_family(&mut self, family: impl Into<String>) {
        self.font_db.set_monospace_family(family);
        self.resolved.clear();
    }

    /// Returns the name of a family.
    pub fn family_name<'a>(&'a self, family: &'a fontdb::Family<'_>) -> &'a str {
        self.font_db.family_name(family)
    }
}

/// Get `Font`
impl FontLibrary {
    /// Queries for a font matching the description.
    ///
    /// Returns the ID and the loaded font if found.
    pub fn query(&mut self, query: &fontdb::Query) -> Option<(fontdb::ID, Arc<fontdue::Font>)> {
        let id = self.font_db.query(query)?;
        self.font(id).map(|font| (id, font))
    }

    /// Retrieves a loaded font by ID, loading it if necessary.
    pub fn font(&mut self, id: fontdb::ID) -> Option<Arc<fontdue::Font>> {
        use std::collections::hash_map::Entry;

        match self.loaded_font.entry(id) {
            Entry::Occupied(entry) => Some(Arc::clone(entry.get())),
            Entry::Vacant(entry) => {
                let font_result = self.font_db.with_face_data(id, |data, index| {
                    fontdue::Font::from_bytes(
                        data,
                        fontdue::FontSettings {
                            collection_index: index,
                            scale: 40.0,
                            load_substitutions: true,
                        },
                    )
                })?;

                match font_result {
                    Ok(font) => {
                        let r: &mut Arc<fontdue::Font> = entry.insert(Arc::new(font));
                        Some(Arc::clone(r))
                    }
                    Err(e) => {
                        log::error!("Failed to load font (id: {:?}): {}", id, e);
                        None
                    }
                }
            }
        }
    }

    /// Resolves the face a style maps to, loading the font on first use.
    ///
    /// Lookup misses are cached too, so an unresolvable style only walks
    /// the database (and logs) once.
    pub fn resolve(&mut self, style: &Style) -> Option<(fontdb::ID, Arc<fontdue::Font>)> {
        let key = FaceKey::of(style);
        let id = match self.resolved.get(&key) {
            Some(cached) => *cached,
            None => {
                let families = [style.family.as_fontdb()];
                let query = fontdb::Query {
                    families: &families,
                    weight: if style.bold {
                        fontdb::Weight::BOLD
                    } else {
                        fontdb::Weight::NORMAL
                    },
                    stretch: fontdb::Stretch::Normal,
                    style: if style.italic {
                        fontdb::Style::Italic
                    } else {
                        fontdb::Style::Normal
                    },
                };
                let id = self.font_db.query(&query);
                if id.is_none() {
                    log::warn!("No font face matches family {:?}", style.family);
                }
                self.resolved.insert(key, id);
                id
            }
        }?;

        let font = self.font(id)?;
        Some((id, font))
    }

    /// Returns the coverage bitmap for a glyph, rasterizing on a cache miss.
    pub fn rasterized(&mut self, key: GlyphKey) -> Option<Arc<RasterizedGlyph>> {
        if let Some(hit) = self.rasters.get(&key) {
            return Some(hit);
        }

        let font = self.font(key.font_id())?;
        let (metrics, data) = font.rasterize_indexed(key.glyph_index(), key.font_size());
        let glyph = Arc::new(RasterizedGlyph {
            width: metrics.width,
            height: metrics.height,
            data,
        });
        self.rasters.insert(key, Arc::clone(&glyph));
        Some(glyph)
    }

    /// Drops all cached glyph bitmaps.
    pub fn clear_raster_cache(&mut self) {
        self.rasters.clear();
    }

    /// Returns an iterator over all available faces.
    pub fn faces(&self) -> impl Iterator<Item = &fontdb::FaceInfo> {
        self.font_db.faces()
    }

    /// Returns face info for an ID.
    pub fn face(&self, id: fontdb::ID) -> Option<&fontdb::FaceInfo> {
        self.font_db.face(id)
    }
}

impl StyleMetrics for FontLibrary {
    /// Kerning-aware width of `text` in `style`.
    ///
    /// The result covers both the pen advance and the ink extent of the
    /// last glyph, whichever reaches further, so a trailing space is as
    /// wide as its advance while an overhanging glyph is not clipped.
    fn text_width(&mut self, text: &str, style: &Style) -> f32 {
        let Some((_, font)) = self.resolve(style) else {
            return 0.0;
        };

        let mut origin = 0.0f32;
        let mut ink = 0.0f32;
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
            ink = ink.max(origin + metrics.xmin as f32 + metrics.width as f32);
            previous = Some((index, metrics.advance_width));
        }

        match previous {
            Some((_, advance)) => ink.max(origin + advance),
            None => 0.0,
        }
    }

    fn vertical_metrics(&mut self, style: &Style) -> VerticalMetrics {
        let Some((_, font)) = self.resolve(style) else {
            return VerticalMetrics::ZERO;
        };
        match font.horizontal_line_metrics(style.size) {
            Some(metrics) => VerticalMetrics {
                ascent: metrics.ascent,
                descent: metrics.descent,
                line_gap: metrics.line_gap,
            },
            None => VerticalMetrics::ZERO,
        }
    }
}
