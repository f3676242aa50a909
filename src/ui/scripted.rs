//! Headless surface that replays a fixed input script
//!
//! Used to drive the navigation loop and the controller without a terminal.
//! Every call is recorded so callers can assert on what would have been shown.

use std::collections::VecDeque;

use ratatui::{Terminal, backend::TestBackend};

use super::{ScreenModel, StatusLine, Surface, render_screen};
use crate::error::{Result, ShellError};
use crate::navigation::{Menu, MenuInput};
use crate::pipeline::ProgressFrame;
use crate::types::MenuSlot;

/// One recorded menu draw
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuDraw {
    pub slot: MenuSlot,
    pub title: String,
    pub highlighted: usize,
}

/// Surface backed by a queue of inputs
#[derive(Debug, Default)]
pub struct ScriptedSurface {
    inputs: VecDeque<MenuInput>,
    model: ScreenModel,
    menu_draws: Vec<MenuDraw>,
    closed: Vec<MenuSlot>,
    statuses: Vec<StatusLine>,
    progress: Vec<ProgressFrame>,
}

impl ScriptedSurface {
    pub fn new(inputs: impl IntoIterator<Item = MenuInput>) -> Self {
        Self {
            inputs: inputs.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Current screen contents
    pub fn model(&self) -> &ScreenModel {
        &self.model
    }

    pub fn menu_draws(&self) -> &[MenuDraw] {
        &self.menu_draws
    }

    pub fn closed_menus(&self) -> &[MenuSlot] {
        &self.closed
    }

    pub fn statuses(&self) -> &[StatusLine] {
        &self.statuses
    }

    pub fn progress_frames(&self) -> &[ProgressFrame] {
        &self.progress
    }

    /// Inputs not yet consumed
    pub fn remaining_inputs(&self) -> usize {
        self.inputs.len()
    }

    /// Render the current model into plain text rows
    pub fn snapshot(&self, width: u16, height: u16) -> Result<Vec<String>> {
        let mut terminal = Terminal::new(TestBackend::new(width, height))?;
        terminal.draw(|f| render_screen(f, &self.model))?;
        let buffer = terminal.backend().buffer();
        let cols = buffer.area.width as usize;
        Ok(buffer
            .content
            .chunks(cols)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect())
            .collect())
    }
}

impl Surface for ScriptedSurface {
    fn draw_menu(&mut self, slot: MenuSlot, menu: &Menu) -> Result<()> {
        self.menu_draws.push(MenuDraw {
            slot,
            title: menu.title().to_string(),
            highlighted: menu.highlighted(),
        });
        self.model.show_menu(slot, menu);
        Ok(())
    }

    fn close_menu(&mut self, slot: MenuSlot) -> Result<()> {
        self.closed.push(slot);
        self.model.close_menu(slot);
        Ok(())
    }

    fn set_status(&mut self, status: StatusLine) -> Result<()> {
        self.statuses.push(status.clone());
        self.model.status = Some(status);
        Ok(())
    }

    fn draw_progress(&mut self, frame: &ProgressFrame) -> Result<()> {
        self.progress.push(frame.clone());
        self.model.show_progress(frame);
        Ok(())
    }

    fn clear_progress(&mut self) -> Result<()> {
        self.model.clear_progress();
        Ok(())
    }

    fn read_input(&mut self) -> Result<MenuInput> {
        self.inputs
            .pop_front()
            .ok_or_else(|| ShellError::terminal("input script exhausted"))
    }
}
