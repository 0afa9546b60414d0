//! Font metrics for the Snapshot viewer.
//!
//! [`Font`] wraps a TrueType/OpenType face at a fixed pixel size and answers
//! the questions text layout needs: which glyph draws a character, how big
//! it is, how far the pen moves and how pairs kern.  Rasterisation is out of
//! scope; only the tables that carry metrics are read.
//!
//! ```rust,ignore
//! use snapshot_font::Font;
//!
//! let font = Font::from_file("Roboto", 32, 4, "assets/fonts/Roboto-Regular.ttf")?;
//! let a = font.glyph_metrics(font.default_glyph_for_char('A'));
//! let line = font.font_metrics().line_advance_height;
//! ```

pub mod binary_reader;
mod error;
mod font;
pub mod parser;
pub mod tables;

#[cfg(test)]
mod test_font;

pub use error::FontError;
pub use font::{Font, FontMetrics, GlyphId, GlyphMetrics};
