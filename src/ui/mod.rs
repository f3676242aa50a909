//! User interface rendering module
//!
//! This module is organized into submodules:
//! - `menus` - bordered menu panels
//! - `status` - status bar and download progress panel
//! - `terminal` - crossterm-backed [`Surface`] with scoped terminal setup
//! - `scripted` - headless [`Surface`] that replays canned input
//!
//! Everything on screen is described by a [`ScreenModel`]; [`render_screen`]
//! draws a model into a ratatui frame and owns no state of its own.

mod menus;
pub mod scripted;
mod status;
pub mod terminal;

use ratatui::{
    Frame,
    layout::Rect,
    widgets::Block,
};
use tracing::warn;

use crate::error::{Result, ShellError};
use crate::navigation::{Menu, MenuInput};
use crate::pipeline::{ProgressFrame, ProgressMeter, ProgressSink, TransferProgress};
use crate::theme::Styles;
use crate::types::{MenuSlot, StatusLevel};

pub use scripted::ScriptedSurface;
pub use terminal::{TerminalGuard, TerminalSurface};

/// Rows kept free below the menu panels (status bar, progress panel)
const MENU_BOTTOM_MARGIN: u16 = 12;
const STATUS_HEIGHT: u16 = 4;
const PROGRESS_WIDTH: u16 = 44;
const PROGRESS_HEIGHT: u16 = 3;
/// Distance of the progress panel's top row from the bottom of the screen
const PROGRESS_OFFSET: u16 = 8;

/// A message for the status bar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub text: String,
    pub level: StatusLevel,
}

impl StatusLine {
    pub fn new(text: impl Into<String>, level: StatusLevel) -> Self {
        Self {
            text: text.into(),
            level,
        }
    }

    pub fn normal(text: impl Into<String>) -> Self {
        Self::new(text, StatusLevel::Normal)
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::new(text, StatusLevel::Error)
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self::new(text, StatusLevel::Warning)
    }
}

/// Rendering context passed to the navigation loop and the controller
///
/// Implementations own the screen; callers describe what changed and the
/// surface decides how to show it.
pub trait Surface {
    /// Show (or refresh) a menu panel
    fn draw_menu(&mut self, slot: MenuSlot, menu: &Menu) -> Result<()>;

    /// Blank a menu panel
    fn close_menu(&mut self, slot: MenuSlot) -> Result<()>;

    /// Replace the status bar text
    fn set_status(&mut self, status: StatusLine) -> Result<()>;

    /// Show a progress tick
    fn draw_progress(&mut self, frame: &ProgressFrame) -> Result<()>;

    /// Remove the progress panel
    fn clear_progress(&mut self) -> Result<()>;

    /// Block until the next classified key press
    fn read_input(&mut self) -> Result<MenuInput>;
}

/// Everything currently on screen
#[derive(Debug, Clone, Default)]
pub struct ScreenModel {
    pub menus: [Option<Menu>; 2],
    pub status: Option<StatusLine>,
    pub progress: Option<ProgressFrame>,
    /// Latched once a frame reports completion
    pub progress_done: bool,
}

impl ScreenModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn menu(&self, slot: MenuSlot) -> Option<&Menu> {
        self.menus[slot.column() as usize].as_ref()
    }

    pub fn show_menu(&mut self, slot: MenuSlot, menu: &Menu) {
        self.menus[slot.column() as usize] = Some(menu.clone());
    }

    pub fn close_menu(&mut self, slot: MenuSlot) {
        self.menus[slot.column() as usize] = None;
    }

    pub fn show_progress(&mut self, frame: &ProgressFrame) {
        self.progress_done |= frame.done;
        self.progress = Some(frame.clone());
    }

    pub fn clear_progress(&mut self) {
        self.progress = None;
        self.progress_done = false;
    }
}

/// Draw the whole screen from a model
pub fn render_screen(f: &mut Frame, model: &ScreenModel) {
    let area = f.area();
    f.render_widget(Block::default().style(Styles::background()), area);

    for slot in [MenuSlot::Primary, MenuSlot::Secondary] {
        if let Some(menu) = model.menu(slot) {
            menus::render_menu_panel(f, menu, menu_area(area, slot));
        }
    }
    if let Some(ref line) = model.status {
        status::render_status_bar(f, line, status_area(area));
    }
    if let Some(ref frame) = model.progress {
        status::render_progress_panel(f, frame, model.progress_done, progress_area(area));
    }
}

/// Panel for a menu slot: a third of the width, full height minus the bottom margin
pub fn menu_area(area: Rect, slot: MenuSlot) -> Rect {
    let width = area.width / 3;
    let rect = Rect {
        x: area.x + 1 + slot.column() * width,
        y: area.y + 1,
        width,
        height: area.height.saturating_sub(MENU_BOTTOM_MARGIN),
    };
    rect.intersection(area)
}

/// Status bar: full width, four rows, directly above the last screen row
pub fn status_area(area: Rect) -> Rect {
    let rect = Rect {
        x: area.x,
        y: area.y + area.height.saturating_sub(STATUS_HEIGHT + 1),
        width: area.width,
        height: STATUS_HEIGHT,
    };
    rect.intersection(area)
}

/// Progress panel: 44x3 at the left edge, directly above the status bar
pub fn progress_area(area: Rect) -> Rect {
    let rect = Rect {
        x: area.x,
        y: area.y + area.height.saturating_sub(PROGRESS_OFFSET),
        width: PROGRESS_WIDTH,
        height: PROGRESS_HEIGHT,
    };
    rect.intersection(area)
}

/// Adapts a [`Surface`] into a [`ProgressSink`] for one transfer
///
/// Draw errors cannot travel back through the transfer loop, so the first one
/// is kept and returned from [`ProgressPanel::finish`].
pub struct ProgressPanel<'a, S: Surface + ?Sized> {
    surface: &'a mut S,
    meter: ProgressMeter,
    error: Option<ShellError>,
}

impl<'a, S: Surface + ?Sized> ProgressPanel<'a, S> {
    pub fn new(surface: &'a mut S) -> Self {
        Self {
            surface,
            meter: ProgressMeter::new(),
            error: None,
        }
    }

    /// First draw error seen during the transfer, if any
    pub fn finish(self) -> Result<()> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl<S: Surface + ?Sized> ProgressSink for ProgressPanel<'_, S> {
    fn on_progress(&mut self, progress: TransferProgress) {
        let frame = self.meter.frame(progress);
        if let Err(e) = self.surface.draw_progress(&frame) {
            warn!("Progress redraw failed: {}", e);
            self.error.get_or_insert(e);
        }
    }
}
