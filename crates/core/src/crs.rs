//! Coordinate Reference System registry
//!
//! The set of projected systems a project file may select is a fixed,
//! compiled-in table: adding a zone is a data change, not a code change.

use serde::Serialize;
use std::fmt;

/// One supported projected coordinate system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CrsEntry {
    /// User-facing label, as shown in selection lists.
    label: &'static str,
    /// EPSG code of the projected system.
    epsg: u32,
    /// PROJ definition string consumed by the transformer.
    proj4: &'static str,
}

impl CrsEntry {
    /// User-facing label.
    pub fn label(&self) -> &'static str {
        self.label
    }

    /// EPSG code.
    pub fn epsg(&self) -> u32 {
        self.epsg
    }

    /// PROJ definition string.
    pub fn proj4(&self) -> &'static str {
        self.proj4
    }
}

impl fmt::Display for CrsEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (EPSG:{})", self.label, self.epsg)
    }
}

/// The supported coordinate systems.
///
/// ITRF2014 differs from a plain GRS80 UTM definition only at centimetre
/// level, far below the transform's stated tolerance.
pub const SUPPORTED: &[CrsEntry] = &[
    CrsEntry {
        label: "ETRS89 / UTM zone 32N",
        epsg: 25832,
        proj4: "+proj=utm +zone=32 +ellps=GRS80 +towgs84=0,0,0,0,0,0,0 +units=m +no_defs",
    },
    CrsEntry {
        label: "WGS 84 / UTM zone 32N",
        epsg: 32632,
        proj4: "+proj=utm +zone=32 +ellps=WGS84 +towgs84=0,0,0,0,0,0,0 +units=m +no_defs",
    },
    CrsEntry {
        label: "ETRS89 / UTM zone 33N",
        epsg: 25833,
        proj4: "+proj=utm +zone=33 +ellps=GRS80 +towgs84=0,0,0,0,0,0,0 +units=m +no_defs",
    },
    CrsEntry {
        label: "WGS 84 / UTM zone 33N",
        epsg: 32633,
        proj4: "+proj=utm +zone=33 +ellps=WGS84 +towgs84=0,0,0,0,0,0,0 +units=m +no_defs",
    },
    CrsEntry {
        label: "ITRF2014 / UTM zone 30N",
        epsg: 7927,
        proj4: "+proj=utm +zone=30 +ellps=GRS80 +towgs84=0,0,0,0,0,0,0 +units=m +no_defs",
    },
];

/// Resolve a coordinate-system identifier to its registry entry.
///
/// Accepts the full label (case-insensitive, surrounding whitespace ignored)
/// or an `epsg:NNNNN` identifier. Anything else is a configuration error;
/// no fuzzy matching.
pub fn lookup(id: &str) -> crate::Result<&'static CrsEntry> {
    let id = id.trim();

    if let Some(code) = id
        .strip_prefix("epsg:")
        .or_else(|| id.strip_prefix("EPSG:"))
        .and_then(|c| c.trim().parse::<u32>().ok())
    {
        return SUPPORTED
            .iter()
            .find(|e| e.epsg == code)
            .ok_or_else(|| crate::Error::UnknownCrs(id.to_string()));
    }

    SUPPORTED
        .iter()
        .find(|e| e.label.eq_ignore_ascii_case(id))
        .ok_or_else(|| crate::Error::UnknownCrs(id.to_string()))
}
