use std::{path::PathBuf, sync::Arc};

use euclid::default::Size2D;
use parking_lot::Mutex;

use crate::{font_library::FontLibrary, paragraph::Paragraph, render::Painter};

/// High-level entry point for shared font access.
///
/// Wraps a [`FontLibrary`] in a `Mutex` so several widgets can measure and
/// draw from one set of fonts, which is the common arrangement in UI
/// frameworks.
///
/// The field is public to allow direct access to the underlying library
/// when necessary (e.g. for batching several operations under one lock).
pub struct FontSystem {
    /// The underlying font library.
    pub fonts: Mutex<FontLibrary>,
}

impl Default for FontSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl FontSystem {
    /// Creates a font system with an empty library.
    pub fn new() -> Self {
        Self {
            fonts: Mutex::new(FontLibrary::new()),
        }
    }

    /// Runs `f` with exclusive access to the library.
    pub fn with_fonts<R>(&self, f: impl FnOnce(&mut FontLibrary) -> R) -> R {
        f(&mut self.fonts.lock())
    }
}

/// font library initialization
impl FontSystem {
    /// Loads the system fonts into the library.
    pub fn load_system_fonts(&self) {
        self.fonts.lock().load_system_fonts();
    }

    /// Loads a font from binary data.
    pub fn load_font_binary(&self, data: impl Into<Vec<u8>>) {
        self.fonts.lock().load_font_binary(data);
    }

    /// Loads a font from a file path.
    pub fn load_font_file(&self, path: PathBuf) -> Result<(), std::io::Error> {
        self.fonts.lock().load_font_file(path)
    }

    /// Loads all fonts from a directory.
    pub fn load_fonts_dir(&self, dir: PathBuf) {
        self.fonts.lock().load_fonts_dir(dir)
    }

    /// Checks if the library is empty.
    pub fn is_empty(&self) -> bool {
        self.fonts.lock().is_empty()
    }

    /// Returns the number of loaded faces.
    pub fn len(&self) -> usize {
        self.fonts.lock().len()
    }

    /// Sets the family name for the "serif" generic family.
    pub fn set_serif_family(&self, family: impl Into<String>) {
        self.fonts.lock().set_serif_family(family);
    }

    /// Sets the family name for the "sans-serif" generic family.
    pub fn set_sans_serif_family(&self, family: impl Into<String>) {
        self.fonts.lock().set_sans_serif_family(family);
    }

    /// Sets the family name for the "monospace" generic family.
    pub fn set_monospace_family(&self, family: impl Into<String>) {
        self.fonts.lock().set_monospace_family(family);
    }
}

/// font querying
impl FontSystem {
    /// Queries for a font matching the description.
    pub fn query(&self, query: &fontdb::Query) -> Option<(fontdb::ID, Arc<fontdue::Font>)> {
        self.fonts.lock().query(query)
    }

    /// Retrieves a loaded font by ID.
    pub fn font(&self, id: fontdb::ID) -> Option<Arc<fontdue::Font>> {
        self.fonts.lock().font(id)
    }
}

/// paragraph helpers
impl FontSystem {
    /// Lays out a paragraph against `width`, returning its required size.
    pub fn resize(&self, paragraph: &mut Paragraph, width: f32, height: f32) -> Size2D<f32> {
        paragraph.resize(&mut *self.fonts.lock(), width, height)
    }

    /// Draws a paragraph through `painter` using this system's fonts.
    pub fn draw(&self, paragraph: &mut Paragraph, painter: &mut dyn Painter) {
        paragraph.draw(&mut self.fonts.lock(), painter);
    }
}
