//! Definitions of the TrueType/OpenType table structures the parser reads.

/// A directory entry in the font file's table directory.
#[derive(Debug, Clone)]
pub struct TableRecord {
    pub tag: [u8; 4],
    pub checksum: u32,
    pub offset: u32,
    pub length: u32,
}

impl TableRecord {
    pub fn tag_str(&self) -> String {
        String::from_utf8_lossy(&self.tag).into_owned()
    }
}

/// Fields of `head` the metrics need.
#[derive(Debug, Clone, Copy)]
pub struct HeadTable {
    pub units_per_em: u16,
    /// 0 = short (u16 / 2) loca offsets, 1 = long (u32).
    pub index_to_loc_format: i16,
}

/// Fields of `hhea` the metrics need.
#[derive(Debug, Clone, Copy)]
pub struct HheaTable {
    pub ascender: i16,
    pub descender: i16,
    pub line_gap: i16,
    pub number_of_h_metrics: u16,
}

/// Glyph bounding box from the `glyf` header, in font units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GlyphBox {
    pub x_min: i16,
    pub y_min: i16,
    pub x_max: i16,
    pub y_max: i16,
}

/// One contiguous character range of a cmap subtable.
#[derive(Debug, Clone)]
pub(crate) struct CmapSegment {
    pub start: u32,
    pub end: u32,
    pub mapping: SegmentMapping,
}

#[derive(Debug, Clone)]
pub(crate) enum SegmentMapping {
    /// glyph = (code + delta) mod 65536 (format 4, idRangeOffset == 0)
    Delta(i16),
    /// glyph ids listed per code, 0 meaning missing (format 4 glyphIdArray)
    Explicit { glyphs: Vec<u16>, delta: i16 },
    /// glyph = start_glyph + (code - start) (format 12)
    Sequential(u32),
}
