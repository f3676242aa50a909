//! Silverline console library
//!
//! Menu navigation, the download/inflate pipeline and the terminal surfaces
//! behind the `silverline` binary.

pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod navigation;
pub mod pipeline;
pub mod theme;
pub mod types;
pub mod ui;

// Re-export main types for convenience
pub use app::{App, MAIN_MENU, MenuAction, MenuTable, UTILITY_MENU};
pub use config::ShellConfig;
pub use error::ShellError;
pub use input::Keymap;
pub use navigation::{Menu, MenuChoice, MenuInput, Step, run_menu};
pub use pipeline::{
    BAR_WIDTH, Downloader, InflateOptions, InflateSummary, PipelineError, ProgressFrame,
    ProgressMeter, ProgressSink, TransferProgress, inflate_file, inflate_stream,
};
pub use types::{MenuSlot, StatusLevel, StreamFormat};
pub use ui::{ScriptedSurface, StatusLine, Surface, TerminalGuard, TerminalSurface};
