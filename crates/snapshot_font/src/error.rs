use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FontError {
    #[error("font data is truncated: {0}")]
    Truncated(#[from] std::io::Error),
    #[error("unrecognised sfnt version {0:#010x}")]
    BadMagic(u32),
    #[error("required table '{0}' is missing")]
    MissingTable(&'static str),
    #[error("table '{tag}' lies outside the font data")]
    TableOutOfBounds { tag: String },
    #[error("no supported cmap subtable (format 4 or 12)")]
    UnsupportedCmap,
    #[error("head table reports zero units per em")]
    ZeroUnitsPerEm,
    #[error("could not read font file {path}: {source}")]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
