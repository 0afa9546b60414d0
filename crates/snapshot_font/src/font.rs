use std::path::Path;
use std::sync::Arc;

use glam::Vec2;

use crate::error::FontError;
use crate::parser::FontParser;

/// Glyph reference returned by [`Font::default_glyph_for_char`].
///
/// Records which font in the fallback chain owns the glyph, so the same id
/// can be handed back to [`Font::glyph_metrics`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GlyphId {
    /// 0 for the font itself, `n` for its `n`-th fallback.
    pub source: u8,
    pub index: u16,
}

impl GlyphId {
    /// `.notdef` of the primary font; never has metrics.
    pub const INVALID: GlyphId = GlyphId {
        source: 0,
        index: 0,
    };

    pub fn is_valid(self) -> bool {
        self.index != 0
    }
}

/// Per-glyph placement, in pixels at the font's size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphMetrics {
    /// Width and height of the glyph's bounding box.
    pub size: Vec2,
    /// Offset from the pen position to the box's top-left corner
    /// (x to the right, y upward from the baseline).
    pub bitmap_offset: Vec2,
    /// Pen advance after drawing the glyph.
    pub advance: Vec2,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontMetrics {
    /// Baseline-to-baseline distance.
    pub line_advance_height: f32,
    pub ascender: f32,
    pub descender: f32,
}

/// A sized font face with optional fallbacks.
///
/// Metrics are scaled from font units to pixels by `size / unitsPerEm` and
/// rounded to whole pixels.
pub struct Font {
    name: String,
    size_in_pixels: u32,
    sdf_padding: u32,
    parser: FontParser,
    fallbacks: Vec<Arc<Font>>,
}

impl Font {
    /// Parses `data` as a TrueType/OpenType font.
    ///
    /// Failures are logged at error level before being returned.
    pub fn from_bytes(
        name: impl Into<String>,
        size_in_pixels: u32,
        sdf_padding: u32,
        data: impl Into<Vec<u8>>,
    ) -> Result<Self, FontError> {
        let name = name.into();
        let parser = FontParser::new(data.into()).map_err(|err| {
            log::error!("Could not read the font data for '{name}': {err}");
            err
        })?;
        log::debug!(
            "loaded font '{name}' at {size_in_pixels}px ({} units/em)",
            parser.head().units_per_em
        );
        Ok(Self {
            name,
            size_in_pixels,
            sdf_padding,
            parser,
            fallbacks: Vec::new(),
        })
    }

    pub fn from_file(
        name: impl Into<String>,
        size_in_pixels: u32,
        sdf_padding: u32,
        path: impl AsRef<Path>,
    ) -> Result<Self, FontError> {
        let path = path.as_ref();
        let data = std::fs::read(path).map_err(|source| {
            log::error!("Could not open font file {}: {source}", path.display());
            FontError::File {
                path: path.to_path_buf(),
                source,
            }
        })?;
        Self::from_bytes(name, size_in_pixels, sdf_padding, data)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn size_in_pixels(&self) -> u32 {
        self.size_in_pixels
    }

    pub fn sdf_padding(&self) -> u32 {
        self.sdf_padding
    }

    /// Consulted in insertion order for characters this font lacks.
    pub fn add_fallback_font(&mut self, font: Arc<Font>) {
        self.fallbacks.push(font);
    }

    fn scale(&self) -> f32 {
        self.size_in_pixels as f32 / self.parser.head().units_per_em as f32
    }

    fn px(&self, units: impl Into<f32>) -> f32 {
        (units.into() * self.scale()).round()
    }

    /// Glyph for `c`, searching the fallbacks when this font lacks it.
    /// Returns [`GlyphId::INVALID`] when nothing covers `c`.
    pub fn default_glyph_for_char(&self, c: char) -> GlyphId {
        let own = self.parser.glyph_index(c);
        if own != 0 {
            return GlyphId {
                source: 0,
                index: own,
            };
        }
        self.fallbacks
            .iter()
            .enumerate()
            .find_map(|(i, fallback)| {
                let index = fallback.parser.glyph_index(c);
                if index == 0 {
                    return None;
                }
                Some(GlyphId {
                    source: u8::try_from(i + 1).ok()?,
                    index,
                })
            })
            .unwrap_or(GlyphId::INVALID)
    }

    fn owner(&self, glyph: GlyphId) -> Option<&Font> {
        match glyph.source {
            0 => Some(self),
            n => self.fallbacks.get(n as usize - 1).map(Arc::as_ref),
        }
    }

    /// Metrics of `glyph`, `None` for invalid glyphs or outline-less fonts.
    pub fn glyph_metrics(&self, glyph: GlyphId) -> Option<GlyphMetrics> {
        if !glyph.is_valid() {
            return None;
        }
        let font = self.owner(glyph)?;
        let bbox = font.parser.glyph_box(glyph.index)?;
        let advance = font.parser.advance_width(glyph.index)?;
        Some(GlyphMetrics {
            size: Vec2::new(
                font.px((bbox.x_max as i32 - bbox.x_min as i32) as f32),
                font.px((bbox.y_max as i32 - bbox.y_min as i32) as f32),
            ),
            bitmap_offset: Vec2::new(font.px(bbox.x_min), font.px(bbox.y_max)),
            advance: Vec2::new(font.px(advance), 0.0),
        })
    }

    pub fn font_metrics(&self) -> FontMetrics {
        let hhea = self.parser.hhea();
        let ascender = hhea.ascender as f32 * self.scale();
        let descender = hhea.descender as f32 * self.scale();
        let gap = hhea.line_gap as f32 * self.scale();
        FontMetrics {
            line_advance_height: (ascender - descender + gap).round(),
            ascender,
            descender,
        }
    }

    /// Kerning between two characters, in pixels.
    ///
    /// Zero unless both characters come from the same font: this font when
    /// it covers both, otherwise the first fallback covering both.
    pub fn kerning(&self, left: char, right: char) -> Vec2 {
        let l = self.default_glyph_for_char(left);
        let r = self.default_glyph_for_char(right);
        if !l.is_valid() || !r.is_valid() || l.source != r.source {
            return Vec2::ZERO;
        }
        match self.owner(l) {
            Some(font) => Vec2::new(font.px(font.parser.kerning(l.index, r.index)), 0.0),
            None => Vec2::ZERO,
        }
    }
}

impl std::fmt::Debug for Font {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Font")
            .field("name", &self.name)
            .field("size_in_pixels", &self.size_in_pixels)
            .field("sdf_padding", &self.sdf_padding)
            .field("fallbacks", &self.fallbacks.len())
            .finish()
    }
}
