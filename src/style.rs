/// Font family selector resolved against the font database.
///
/// The generic variants map to the corresponding `fontdb` generic families,
/// so their meaning can be adjusted with the family setters on
/// [`crate::FontLibrary`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum FontFamily {
    SansSerif,
    Serif,
    Monospace,
    Cursive,
    Fantasy,
    /// A concrete family name, e.g. `"DejaVu Sans"`.
    Named(String),
}

impl FontFamily {
    /// Parses a `face` attribute value. Generic names map to the generic
    /// variants, anything else is treated as a concrete family name.
    pub fn from_name(name: &str) -> Self {
        match name {
            "sans-serif" | "sans" => Self::SansSerif,
            "serif" => Self::Serif,
            "monospace" | "mono" => Self::Monospace,
            "cursive" => Self::Cursive,
            "fantasy" => Self::Fantasy,
            other => Self::Named(other.to_string()),
        }
    }

    pub(crate) fn as_fontdb(&self) -> fontdb::Family<'_> {
        match self {
            Self::SansSerif => fontdb::Family::SansSerif,
            Self::Serif => fontdb::Family::Serif,
            Self::Monospace => fontdb::Family::Monospace,
            Self::Cursive => fontdb::Family::Cursive,
            Self::Fantasy => fontdb::Family::Fantasy,
            Self::Named(name) => fontdb::Family::Name(name),
        }
    }
}

/// 8-bit RGBA color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parses `#rrggbb` or `#rrggbbaa`.
    pub fn from_hex(value: &str) -> Option<Self> {
        let hex = value.strip_prefix('#')?;
        let byte = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
        match hex.len() {
            6 => Some(Self::rgb(byte(0)?, byte(2)?, byte(4)?)),
            8 => Some(Self::rgba(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
            _ => None,
        }
    }
}

/// Visual attributes shared by every character of one text span.
///
/// Styles are value types: deriving a child style during markup parsing
/// clones the parent and overrides individual fields, so a span never
/// observes later changes to the style it was derived from.
#[derive(Clone, Debug, PartialEq)]
pub struct Style {
    pub family: FontFamily,
    /// Font size in pixels.
    pub size: f32,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub color: Color,
    /// Link target. A span with a target participates in hit-testing.
    pub href: Option<String>,
    /// Horizontal offset applied to lines starting with this style.
    pub indent: f32,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            family: FontFamily::SansSerif,
            size: 14.0,
            bold: false,
            italic: false,
            underline: false,
            color: Color::BLACK,
            href: None,
            indent: 0.0,
        }
    }
}

impl Style {
    pub fn is_link(&self) -> bool {
        self.href.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_from_hex() {
        assert_eq!(Color::from_hex("#000000"), Some(Color::BLACK));
        assert_eq!(Color::from_hex("#ff8000"), Some(Color::rgb(255, 128, 0)));
        assert_eq!(
            Color::from_hex("#ff800080"),
            Some(Color::rgba(255, 128, 0, 128))
        );
        assert_eq!(Color::from_hex("ff8000"), None);
        assert_eq!(Color::from_hex("#ff80"), None);
        assert_eq!(Color::from_hex("#gg0000"), None);
    }

    #[test]
    fn test_family_from_name() {
        assert_eq!(FontFamily::from_name("serif"), FontFamily::Serif);
        assert_eq!(FontFamily::from_name("mono"), FontFamily::Monospace);
        assert_eq!(
            FontFamily::from_name("DejaVu Sans"),
            FontFamily::Named("DejaVu Sans".to_string())
        );
    }
}
