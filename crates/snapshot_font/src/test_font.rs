//! In-memory TrueType fonts for tests.
//!
//! Glyph 0 is an empty `.notdef`; every added glyph gets the next index.
//! Characters outside the BMP switch the cmap to format 12.

pub(crate) struct TestGlyph {
    pub ch: char,
    /// x_min, y_min, x_max, y_max in font units; `None` for an empty outline.
    pub bbox: Option<(i16, i16, i16, i16)>,
    pub advance: u16,
}

pub(crate) struct TestFontBuilder {
    pub units_per_em: u16,
    pub ascender: i16,
    pub descender: i16,
    pub line_gap: i16,
    pub glyphs: Vec<TestGlyph>,
    pub kerning: Vec<(char, char, i16)>,
}

impl TestFontBuilder {
    pub fn new(units_per_em: u16) -> Self {
        Self {
            units_per_em,
            ascender: 0,
            descender: 0,
            line_gap: 0,
            glyphs: Vec::new(),
            kerning: Vec::new(),
        }
    }

    pub fn line(mut self, ascender: i16, descender: i16, line_gap: i16) -> Self {
        self.ascender = ascender;
        self.descender = descender;
        self.line_gap = line_gap;
        self
    }

    pub fn glyph(mut self, ch: char, bbox: (i16, i16, i16, i16), advance: u16) -> Self {
        self.glyphs.push(TestGlyph {
            ch,
            bbox: Some(bbox),
            advance,
        });
        self
    }

    pub fn blank(mut self, ch: char, advance: u16) -> Self {
        self.glyphs.push(TestGlyph {
            ch,
            bbox: None,
            advance,
        });
        self
    }

    pub fn kern(mut self, left: char, right: char, value: i16) -> Self {
        self.kerning.push((left, right, value));
        self
    }

    fn glyph_id(&self, ch: char) -> u16 {
        self.glyphs
            .iter()
            .position(|g| g.ch == ch)
            .map_or(0, |i| i as u16 + 1)
    }

    pub fn build(&self) -> Vec<u8> {
        let mut tables: Vec<([u8; 4], Vec<u8>)> = vec![
            (*b"cmap", self.cmap()),
            (*b"head", self.head()),
            (*b"hhea", self.hhea()),
            (*b"hmtx", self.hmtx()),
        ];
        let (glyf, loca) = self.glyf_and_loca();
        tables.push((*b"glyf", glyf));
        tables.push((*b"loca", loca));
        if !self.kerning.is_empty() {
            tables.push((*b"kern", self.kern_table()));
        }
        assemble(&tables)
    }

    fn head(&self) -> Vec<u8> {
        let mut head = vec![0u8; 54];
        head[18..20].copy_from_slice(&self.units_per_em.to_be_bytes());
        head[50..52].copy_from_slice(&1i16.to_be_bytes()); // long loca
        head
    }

    fn hhea(&self) -> Vec<u8> {
        let mut hhea = vec![0u8; 36];
        hhea[4..6].copy_from_slice(&self.ascender.to_be_bytes());
        hhea[6..8].copy_from_slice(&self.descender.to_be_bytes());
        hhea[8..10].copy_from_slice(&self.line_gap.to_be_bytes());
        let count = self.glyphs.len() as u16 + 1;
        hhea[34..36].copy_from_slice(&count.to_be_bytes());
        hhea
    }

    fn hmtx(&self) -> Vec<u8> {
        let mut hmtx = Vec::new();
        hmtx.extend(&0u16.to_be_bytes()); // .notdef advance
        hmtx.extend(&0i16.to_be_bytes());
        for g in &self.glyphs {
            hmtx.extend(&g.advance.to_be_bytes());
            hmtx.extend(&0i16.to_be_bytes()); // lsb
        }
        hmtx
    }

    fn glyf_and_loca(&self) -> (Vec<u8>, Vec<u8>) {
        let mut glyf = Vec::new();
        let mut loca = Vec::new();
        loca.extend(&0u32.to_be_bytes()); // .notdef is empty
        for g in &self.glyphs {
            if let Some((x0, y0, x1, y1)) = g.bbox {
                glyf.extend(&1i16.to_be_bytes()); // 1 contour
                for v in [x0, y0, x1, y1] {
                    glyf.extend(&v.to_be_bytes());
                }
                glyf.extend(&0u16.to_be_bytes()); // endPt
                glyf.extend(&0u16.to_be_bytes()); // instLen
                glyf.extend(&[0x37, 0, 0, 0]); // flag + padding
            }
            loca.extend(&(glyf.len() as u32).to_be_bytes());
        }
        (glyf, loca)
    }

    fn cmap(&self) -> Vec<u8> {
        let mut cmap = Vec::new();
        cmap.extend(&0u16.to_be_bytes()); // version
        cmap.extend(&1u16.to_be_bytes()); // numSubtables
        let wide = self.glyphs.iter().any(|g| g.ch as u32 > 0xFFFF);
        cmap.extend(&3u16.to_be_bytes()); // platform
        cmap.extend(&(if wide { 10u16 } else { 1 }).to_be_bytes());
        cmap.extend(&12u32.to_be_bytes()); // subtable right after this record

        let mut codes: Vec<(u32, u16)> = self
            .glyphs
            .iter()
            .enumerate()
            .map(|(i, g)| (g.ch as u32, i as u16 + 1))
            .collect();
        codes.sort();

        if wide {
            cmap.extend(&12u16.to_be_bytes());
            cmap.extend(&0u16.to_be_bytes());
            cmap.extend(&((16 + codes.len() * 12) as u32).to_be_bytes());
            cmap.extend(&0u32.to_be_bytes()); // language
            cmap.extend(&(codes.len() as u32).to_be_bytes());
            for (code, glyph) in &codes {
                cmap.extend(&code.to_be_bytes());
                cmap.extend(&code.to_be_bytes());
                cmap.extend(&(*glyph as u32).to_be_bytes());
            }
            return cmap;
        }

        // one segment per character plus the 0xFFFF terminator
        let seg_count = codes.len() as u16 + 1;
        let fmt_start = cmap.len();
        cmap.extend(&4u16.to_be_bytes());
        cmap.extend(&0u16.to_be_bytes()); // length placeholder
        cmap.extend(&0u16.to_be_bytes()); // language
        cmap.extend(&(seg_count * 2).to_be_bytes());
        cmap.extend(&[0u8; 6]); // searchRange, entrySelector, rangeShift
        for (code, _) in &codes {
            cmap.extend(&(*code as u16).to_be_bytes()); // endCodes
        }
        cmap.extend(&0xFFFFu16.to_be_bytes());
        cmap.extend(&0u16.to_be_bytes()); // reservedPad
        for (code, _) in &codes {
            cmap.extend(&(*code as u16).to_be_bytes()); // startCodes
        }
        cmap.extend(&0xFFFFu16.to_be_bytes());
        for (code, glyph) in &codes {
            let delta = (*glyph as i32 - *code as i32) as i16;
            cmap.extend(&delta.to_be_bytes()); // idDeltas
        }
        cmap.extend(&1i16.to_be_bytes());
        for _ in 0..seg_count {
            cmap.extend(&0u16.to_be_bytes()); // idRangeOffsets
        }
        let len = (cmap.len() - fmt_start) as u16;
        cmap[fmt_start + 2..fmt_start + 4].copy_from_slice(&len.to_be_bytes());
        cmap
    }

    fn kern_table(&self) -> Vec<u8> {
        let mut pairs: Vec<(u16, u16, i16)> = self
            .kerning
            .iter()
            .map(|(l, r, v)| (self.glyph_id(*l), self.glyph_id(*r), *v))
            .collect();
        pairs.sort();

        let mut kern = Vec::new();
        kern.extend(&0u16.to_be_bytes()); // version
        kern.extend(&1u16.to_be_bytes()); // nTables
        let length = 14 + pairs.len() * 6;
        kern.extend(&0u16.to_be_bytes()); // subtable version
        kern.extend(&(length as u16).to_be_bytes());
        kern.extend(&0x0001u16.to_be_bytes()); // format 0, horizontal
        kern.extend(&(pairs.len() as u16).to_be_bytes());
        kern.extend(&[0u8; 6]); // searchRange, entrySelector, rangeShift
        for (l, r, v) in pairs {
            kern.extend(&l.to_be_bytes());
            kern.extend(&r.to_be_bytes());
            kern.extend(&v.to_be_bytes());
        }
        kern
    }
}

fn assemble(tables: &[([u8; 4], Vec<u8>)]) -> Vec<u8> {
    let mut data = vec![0, 1, 0, 0]; // scaler type
    data.extend(&(tables.len() as u16).to_be_bytes());
    data.extend(&[0; 6]); // search info

    let mut offset = 12 + tables.len() * 16;
    for (tag, tbl) in tables {
        data.extend(tag);
        data.extend(&0u32.to_be_bytes()); // checksum
        data.extend(&(offset as u32).to_be_bytes());
        data.extend(&(tbl.len() as u32).to_be_bytes());
        offset += tbl.len();
    }
    for (_, tbl) in tables {
        data.extend(tbl);
    }
    data
}

/// Latin test font: 1000 units per em, a few letters, kerning on I/X and M/M.
pub(crate) fn latin() -> Vec<u8> {
    TestFontBuilder::new(1000)
        .line(800, -300, 100)
        .glyph('A', (25, 0, 625, 719), 625)
        .glyph('I', (50, 0, 150, 719), 200)
        .glyph('M', (50, 0, 750, 719), 800)
        .glyph('X', (10, 0, 610, 719), 625)
        .blank(' ', 250)
        .kern('I', 'X', -31)
        .kern('M', 'M', 31)
        .build()
}

/// Fallback test font covering katakana KA and an emoji.
pub(crate) fn cjk() -> Vec<u8> {
    TestFontBuilder::new(2048)
        .line(1800, -400, 0)
        .glyph('\u{30AB}', (128, -64, 1920, 1664), 2048)
        .glyph('\u{1F4A9}', (0, -256, 2048, 1792), 2048)
        .kern('\u{30AB}', '\u{30AB}', -128)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::FontParser;

    #[test]
    fn parser_reads_generated_font() {
        let parser = FontParser::new(latin()).expect("parser must succeed");
        assert_eq!(parser.head().units_per_em, 1000);
        assert_eq!(parser.glyph_index('A'), 1);
        assert_eq!(parser.glyph_index(' '), 5);
        assert_eq!(parser.glyph_index('Z'), 0);
        assert_eq!(parser.advance_width(3), Some(800));
        assert_eq!(parser.glyph_box(5), Some(Default::default()));
        assert_eq!(parser.kerning(2, 4), -31);
        assert_eq!(parser.kerning(4, 2), 0);
    }

    /// Byte offset of the first cmap subtable inside `data`.
    fn cmap_subtable(data: &[u8]) -> usize {
        let num_tables = u16::from_be_bytes([data[4], data[5]]) as usize;
        let record = (0..num_tables)
            .map(|i| 12 + i * 16)
            .find(|&r| &data[r..r + 4] == b"cmap")
            .expect("cmap record");
        let offset = u32::from_be_bytes(data[record + 8..record + 12].try_into().unwrap());
        offset as usize + 12
    }

    #[test]
    fn oversized_group_count_is_rejected() {
        let mut data = cjk();
        let sub = cmap_subtable(&data);
        data[sub + 12..sub + 16].copy_from_slice(&u32::MAX.to_be_bytes());
        assert!(matches!(
            FontParser::new(data),
            Err(crate::FontError::Truncated(_))
        ));
    }

    #[test]
    fn overflowing_start_glyph_maps_to_notdef() {
        let mut data = cjk();
        let group = cmap_subtable(&data) + 16;
        data[group..group + 4].copy_from_slice(&0x30ABu32.to_be_bytes());
        data[group + 4..group + 8].copy_from_slice(&0x30ACu32.to_be_bytes());
        data[group + 8..group + 12].copy_from_slice(&u32::MAX.to_be_bytes());
        let parser = FontParser::new(data).expect("parser must succeed");
        assert_eq!(parser.glyph_index('\u{30AC}'), 0);
        assert_eq!(parser.glyph_index('\u{30AB}'), 0);
    }

    #[test]
    fn format12_cmap_reaches_astral_plane() {
        let parser = FontParser::new(cjk()).expect("parser must succeed");
        assert_eq!(parser.glyph_index('\u{30AB}'), 1);
        assert_eq!(parser.glyph_index('\u{1F4A9}'), 2);
        assert_eq!(parser.glyph_index('A'), 0);
    }
}
