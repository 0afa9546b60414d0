//! TrueType/OpenType parsing: only what glyph and line metrics need.

use std::collections::HashMap;
use std::io::{self, Cursor, Read};
use std::ops::Range;

use crate::binary_reader::*;
use crate::error::FontError;
use crate::tables::*;

const SFNT_TRUETYPE: u32 = 0x0001_0000;
const SFNT_TRUE: u32 = u32::from_be_bytes(*b"true");
const SFNT_OTTO: u32 = u32::from_be_bytes(*b"OTTO");

pub struct FontParser {
    data: Vec<u8>,
    tables: HashMap<[u8; 4], TableRecord>,
    head: HeadTable,
    hhea: HheaTable,
    cmap: Vec<CmapSegment>,
    kerning: HashMap<(u16, u16), i16>,
}

impl FontParser {
    /// Parse raw font bytes.  The table directory, `head`, `hhea`, `hmtx`
    /// and `cmap` must be present; `glyf`/`loca` and `kern` are optional.
    pub fn new(data: Vec<u8>) -> Result<Self, FontError> {
        let tables = read_offset_and_directory(&data)?;

        let head = {
            let t = table_slice(&data, &tables, b"head", "head")?;
            let units_per_em = u16_at(t, 18)?;
            if units_per_em == 0 {
                return Err(FontError::ZeroUnitsPerEm);
            }
            HeadTable {
                units_per_em,
                index_to_loc_format: i16_at(t, 50)?,
            }
        };
        let hhea = {
            let t = table_slice(&data, &tables, b"hhea", "hhea")?;
            HheaTable {
                ascender: i16_at(t, 4)?,
                descender: i16_at(t, 6)?,
                line_gap: i16_at(t, 8)?,
                number_of_h_metrics: u16_at(t, 34)?,
            }
        };
        table_slice(&data, &tables, b"hmtx", "hmtx")?;
        let cmap = read_cmap(table_slice(&data, &tables, b"cmap", "cmap")?)?;
        let kerning = match tables.get(b"kern") {
            Some(_) => read_kern(table_slice(&data, &tables, b"kern", "kern")?)?,
            None => HashMap::new(),
        };

        Ok(Self {
            data,
            tables,
            head,
            hhea,
            cmap,
            kerning,
        })
    }

    pub fn head(&self) -> &HeadTable {
        &self.head
    }

    pub fn hhea(&self) -> &HheaTable {
        &self.hhea
    }

    /// Glyph index for `c`, 0 (`.notdef`) when the font lacks it.
    pub fn glyph_index(&self, c: char) -> u16 {
        let code = c as u32;
        let Some(seg) = self.cmap.iter().find(|s| s.start <= code && code <= s.end) else {
            return 0;
        };
        let offset = code - seg.start;
        match &seg.mapping {
            SegmentMapping::Delta(delta) => add_delta(code, *delta),
            SegmentMapping::Explicit { glyphs, delta } => match glyphs.get(offset as usize) {
                Some(0) | None => 0,
                Some(g) => add_delta(*g as u32, *delta),
            },
            SegmentMapping::Sequential(start_glyph) => start_glyph
                .checked_add(offset)
                .and_then(|g| u16::try_from(g).ok())
                .unwrap_or(0),
        }
    }

    /// Horizontal advance of `glyph` in font units.
    pub fn advance_width(&self, glyph: u16) -> Option<u16> {
        let hmtx = self.raw_table(b"hmtx")?;
        let count = self.hhea.number_of_h_metrics;
        if count == 0 {
            return None;
        }
        // glyphs past the last long metric reuse its advance
        let entry = glyph.min(count - 1) as usize;
        u16_at(hmtx, entry * 4).ok()
    }

    /// Byte range of `glyph` inside `glyf`, via `loca`.
    fn glyph_range(&self, glyph: u16) -> Option<Range<usize>> {
        let loca = self.raw_table(b"loca")?;
        let i = glyph as usize;
        let (start, end) = if self.head.index_to_loc_format == 0 {
            (
                u16_at(loca, i * 2).ok()? as usize * 2,
                u16_at(loca, i * 2 + 2).ok()? as usize * 2,
            )
        } else {
            (
                u32_at(loca, i * 4).ok()? as usize,
                u32_at(loca, i * 4 + 4).ok()? as usize,
            )
        };
        (start <= end).then_some(start..end)
    }

    /// Bounding box of `glyph`.  Empty outlines (spaces) give a zero box;
    /// `None` when the font has no outlines or the glyph does not exist.
    pub fn glyph_box(&self, glyph: u16) -> Option<GlyphBox> {
        let glyf = self.raw_table(b"glyf")?;
        let range = self.glyph_range(glyph)?;
        if range.is_empty() {
            return Some(GlyphBox::default());
        }
        let outline = glyf.get(range)?;
        Some(GlyphBox {
            x_min: i16_at(outline, 2).ok()?,
            y_min: i16_at(outline, 4).ok()?,
            x_max: i16_at(outline, 6).ok()?,
            y_max: i16_at(outline, 8).ok()?,
        })
    }

    /// Kerning adjustment between two glyphs, in font units.
    pub fn kerning(&self, left: u16, right: u16) -> i16 {
        self.kerning.get(&(left, right)).copied().unwrap_or(0)
    }

    fn raw_table(&self, tag: &[u8; 4]) -> Option<&[u8]> {
        let rec = self.tables.get(tag)?;
        let start = rec.offset as usize;
        self.data.get(start..start.checked_add(rec.length as usize)?)
    }
}

fn add_delta(code: u32, delta: i16) -> u16 {
    ((code as i32 + delta as i32).rem_euclid(65536)) as u16
}

fn read_offset_and_directory(data: &[u8]) -> Result<HashMap<[u8; 4], TableRecord>, FontError> {
    let mut cur = Cursor::new(data);
    // Offset table: scaler type, numTables, searchRange, entrySelector, rangeShift
    let scaler_type = read_u32_be(&mut cur)?;
    if !matches!(scaler_type, SFNT_TRUETYPE | SFNT_TRUE | SFNT_OTTO) {
        return Err(FontError::BadMagic(scaler_type));
    }
    let num_tables = read_u16_be(&mut cur)?;
    let _search_range = read_u16_be(&mut cur)?;
    let _entry_selector = read_u16_be(&mut cur)?;
    let _range_shift = read_u16_be(&mut cur)?;

    let mut tables = HashMap::with_capacity(num_tables as usize);
    for _ in 0..num_tables {
        let mut tag = [0u8; 4];
        cur.read_exact(&mut tag)?;
        let rec = TableRecord {
            tag,
            checksum: read_u32_be(&mut cur)?,
            offset: read_u32_be(&mut cur)?,
            length: read_u32_be(&mut cur)?,
        };
        let end = rec.offset as u64 + rec.length as u64;
        if end > data.len() as u64 {
            return Err(FontError::TableOutOfBounds { tag: rec.tag_str() });
        }
        tables.insert(tag, rec);
    }
    Ok(tables)
}

fn table_slice<'a>(
    data: &'a [u8],
    tables: &HashMap<[u8; 4], TableRecord>,
    tag: &[u8; 4],
    name: &'static str,
) -> Result<&'a [u8], FontError> {
    let rec = tables.get(tag).ok_or(FontError::MissingTable(name))?;
    let start = rec.offset as usize;
    // bounds were validated while reading the directory
    Ok(&data[start..start + rec.length as usize])
}

/// Picks a Unicode subtable, preferring format 12 over format 4.
fn read_cmap(cmap: &[u8]) -> Result<Vec<CmapSegment>, FontError> {
    let num_subtables = u16_at(cmap, 2)? as usize;
    let mut format4 = None;
    let mut format12 = None;
    for i in 0..num_subtables {
        let record = 4 + i * 8;
        let platform_id = u16_at(cmap, record)?;
        let encoding_id = u16_at(cmap, record + 2)?;
        let offset = u32_at(cmap, record + 4)? as usize;
        let unicode = platform_id == 0 || (platform_id == 3 && matches!(encoding_id, 1 | 10));
        if !unicode {
            continue;
        }
        match u16_at(cmap, offset)? {
            4 if format4.is_none() => format4 = Some(offset),
            12 if format12.is_none() => format12 = Some(offset),
            _ => {}
        }
    }
    match (format12, format4) {
        (Some(offset), _) => read_cmap_format12(cmap, offset),
        (None, Some(offset)) => read_cmap_format4(cmap, offset),
        (None, None) => Err(FontError::UnsupportedCmap),
    }
}

fn read_cmap_format4(cmap: &[u8], base: usize) -> Result<Vec<CmapSegment>, FontError> {
    let seg_count = u16_at(cmap, base + 6)? as usize / 2;
    let end_codes = base + 14;
    let start_codes = end_codes + seg_count * 2 + 2;
    let id_deltas = start_codes + seg_count * 2;
    let id_range_offsets = id_deltas + seg_count * 2;

    let mut segments = Vec::with_capacity(seg_count);
    for i in 0..seg_count {
        let end = u16_at(cmap, end_codes + i * 2)? as u32;
        let start = u16_at(cmap, start_codes + i * 2)? as u32;
        let delta = i16_at(cmap, id_deltas + i * 2)?;
        let range_offset_pos = id_range_offsets + i * 2;
        let range_offset = u16_at(cmap, range_offset_pos)? as usize;
        if start == 0xFFFF || start > end {
            continue;
        }
        let mapping = if range_offset == 0 {
            SegmentMapping::Delta(delta)
        } else {
            let first = range_offset_pos + range_offset;
            let glyphs = (0..=(end - start) as usize)
                .map(|k| u16_at(cmap, first + k * 2))
                .collect::<Result<Vec<_>, _>>()?;
            SegmentMapping::Explicit { glyphs, delta }
        };
        segments.push(CmapSegment { start, end, mapping });
    }
    Ok(segments)
}

fn read_cmap_format12(cmap: &[u8], base: usize) -> Result<Vec<CmapSegment>, FontError> {
    let num_groups = u32_at(cmap, base + 12)? as usize;
    let room = cmap.len().saturating_sub(base + 16) / 12;
    if num_groups > room {
        return Err(FontError::Truncated(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            format!("cmap declares {num_groups} groups, room for {room}"),
        )));
    }
    let mut segments = Vec::with_capacity(num_groups);
    for i in 0..num_groups {
        let group = base + 16 + i * 12;
        let start = u32_at(cmap, group)?;
        let end = u32_at(cmap, group + 4)?;
        if start > end {
            continue;
        }
        segments.push(CmapSegment {
            start,
            end,
            mapping: SegmentMapping::Sequential(u32_at(cmap, group + 8)?),
        });
    }
    Ok(segments)
}

/// Reads horizontal format-0 subtables of a version-0 `kern` table.
fn read_kern(kern: &[u8]) -> Result<HashMap<(u16, u16), i16>, FontError> {
    let mut pairs = HashMap::new();
    let version = u16_at(kern, 0)?;
    if version != 0 {
        log::debug!("kern table version {version} is not supported; ignoring kerning");
        return Ok(pairs);
    }
    let n_tables = u16_at(kern, 2)? as usize;
    let mut offset = 4;
    for _ in 0..n_tables {
        let length = u16_at(kern, offset + 2)? as usize;
        let coverage = u16_at(kern, offset + 4)?;
        let format = coverage >> 8;
        let horizontal = coverage & 0x1 != 0;
        if format == 0 && horizontal {
            let n_pairs = u16_at(kern, offset + 6)? as usize;
            for p in 0..n_pairs {
                let pair = offset + 14 + p * 6;
                pairs.insert(
                    (u16_at(kern, pair)?, u16_at(kern, pair + 2)?),
                    i16_at(kern, pair + 4)?,
                );
            }
        }
        if length == 0 {
            break;
        }
        offset += length;
    }
    Ok(pairs)
}
