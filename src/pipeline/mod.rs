//! Side-effecting pipelines triggered from the utility menu
//!
//! - `download` - blocking HTTP GET into a file with progress ticks
//! - `inflate` - chunked decompression of a deflate-family stream
//! - `progress` - transfer snapshots and the fixed-width meter

pub mod download;
pub mod inflate;
pub mod progress;

use strum::Display;
use thiserror::Error;

pub use download::Downloader;
pub use inflate::{InflateOptions, InflateSummary, inflate_file, inflate_stream};
pub use progress::{BAR_WIDTH, ProgressFrame, ProgressMeter, ProgressSink, TransferProgress};

/// Which side of a file operation failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum IoErrorKind {
    Open,
    Read,
    Write,
}

/// Why compressed data was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum FormatErrorKind {
    /// The stream asks for a preset dictionary we cannot supply
    #[strum(serialize = "preset dictionary required")]
    NeedDictionary,
    /// Invalid, truncated or empty compressed data
    #[strum(serialize = "corrupt or incomplete data")]
    CorruptData,
}

/// Failure of a download or decompression run
#[derive(Error, Debug)]
pub enum PipelineError {
    /// The server answered with a non-success status
    #[error("HTTP status {0}")]
    Network(u16),

    /// The transfer itself failed (DNS, connect, TLS, reset)
    #[error("transfer failed: {0}")]
    Transport(String),

    /// A local file could not be opened, read or written
    #[error("{kind} error: {source}")]
    Io {
        kind: IoErrorKind,
        #[source]
        source: std::io::Error,
    },

    /// The compressed input is not a valid stream
    #[error("format error: {0}")]
    Format(FormatErrorKind),

    /// Buffer allocation failed
    #[error("out of memory")]
    OutOfMemory,
}

/// Result type alias for pipeline runs
pub type PipelineResult<T> = std::result::Result<T, PipelineError>;

impl PipelineError {
    pub fn io(kind: IoErrorKind, source: std::io::Error) -> Self {
        Self::Io { kind, source }
    }

    /// Only resource exhaustion ends the console
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::OutOfMemory)
    }

    /// Short text for the status bar
    pub fn status_message(&self) -> String {
        match self {
            Self::Network(code) => format!("Error code: {}", code),
            Self::Transport(msg) => format!("Download failed: {}", msg),
            Self::Io { kind, source } => format!("File {} error: {}", kind, source),
            Self::Format(kind) => format!("Invalid archive: {}", kind),
            Self::OutOfMemory => "Out of memory".to_string(),
        }
    }
}
