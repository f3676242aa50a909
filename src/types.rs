//! Shared enums for the console
//!
//! String-backed enums use strum so config files and CLI flags parse into
//! typed values instead of raw strings.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Compressed stream container accepted by the inflate pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum StreamFormat {
    /// Sniff the gzip magic bytes, fall back to zlib
    #[default]
    Auto,
    /// RFC 1952 gzip member (`.gz`, `.tar.gz`)
    Gzip,
    /// RFC 1950 zlib stream
    Zlib,
    /// RFC 1951 deflate data without any wrapper
    Raw,
}

/// Severity of a status bar message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumIter)]
pub enum StatusLevel {
    #[default]
    Normal,
    Error,
    Warning,
}

/// Screen position of a menu panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum MenuSlot {
    /// Left third of the screen (main menu)
    Primary,
    /// Middle third of the screen (sub-menus)
    Secondary,
}

impl MenuSlot {
    /// Column index of the panel, in thirds of the screen width
    pub fn column(self) -> u16 {
        match self {
            Self::Primary => 0,
            Self::Secondary => 1,
        }
    }
}
