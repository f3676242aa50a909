//! Crossterm-backed surface
//!
//! [`TerminalGuard`] owns raw mode and the alternate screen for its lifetime;
//! dropping it (or panicking while it is alive) restores the terminal.

use std::io::{Stdout, stdout};
use std::sync::Once;
use std::thread;

use crossterm::{
    cursor::{Hide, Show},
    event::{self, Event},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{debug, info};

use super::{ScreenModel, StatusLine, Surface, render_screen};
use crate::error::{Result, ShellError};
use crate::input::Keymap;
use crate::navigation::{Menu, MenuInput};
use crate::pipeline::ProgressFrame;
use crate::types::MenuSlot;

static PANIC_HOOK: Once = Once::new();

/// Scoped raw mode + alternate screen
pub struct TerminalGuard {
    _private: (),
}

impl TerminalGuard {
    /// Switch the terminal into full-screen mode
    pub fn enter() -> Result<Self> {
        enable_raw_mode()
            .map_err(|e| ShellError::terminal(format!("Failed to enable raw mode: {}", e)))?;
        if let Err(e) = execute!(stdout(), EnterAlternateScreen, Hide) {
            let _ = disable_raw_mode();
            return Err(ShellError::terminal(format!(
                "Failed to enter alternate screen: {}",
                e
            )));
        }
        PANIC_HOOK.call_once(|| {
            let previous = std::panic::take_hook();
            std::panic::set_hook(Box::new(move |info| {
                restore_terminal();
                previous(info);
            }));
        });
        debug!("Terminal switched to raw mode");
        Ok(Self { _private: () })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        restore_terminal();
        debug!("Terminal restored");
    }
}

/// Restore the terminal and exit on SIGINT, SIGTERM or SIGHUP.
///
/// Raw mode delivers Ctrl+C as a key press, so in practice this catches
/// signals sent by other processes. Call once at program start.
pub fn init_signal_handlers() -> Result<()> {
    use signal_hook::consts::signal::{SIGHUP, SIGINT, SIGTERM};
    use signal_hook::iterator::Signals;

    let mut signals = Signals::new([SIGINT, SIGTERM, SIGHUP])?;
    thread::spawn(move || {
        if let Some(sig) = signals.forever().next() {
            let name = match sig {
                SIGINT => "SIGINT",
                SIGTERM => "SIGTERM",
                SIGHUP => "SIGHUP",
                _ => "UNKNOWN",
            };
            info!("Received {}, restoring terminal", name);
            restore_terminal();
            std::process::exit(128 + sig);
        }
    });
    Ok(())
}

/// Ctrl+C while in raw mode: same exit as a delivered SIGINT
fn interrupt() -> ! {
    info!("Ctrl+C pressed, restoring terminal");
    restore_terminal();
    std::process::exit(128 + signal_hook::consts::signal::SIGINT);
}

/// Leave raw mode and the alternate screen; errors are ignored
pub fn restore_terminal() {
    let _ = disable_raw_mode();
    let _ = execute!(stdout(), LeaveAlternateScreen, Show);
}

/// Full-screen surface; keep a [`TerminalGuard`] alive while using it
pub struct TerminalSurface {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    model: ScreenModel,
    keymap: Keymap,
}

impl TerminalSurface {
    pub fn new(keymap: Keymap) -> Result<Self> {
        let backend = CrosstermBackend::new(stdout());
        let mut terminal = Terminal::new(backend)
            .map_err(|e| ShellError::terminal(format!("Failed to create terminal: {}", e)))?;
        terminal.clear()?;
        Ok(Self {
            terminal,
            model: ScreenModel::new(),
            keymap,
        })
    }

    fn redraw(&mut self) -> Result<()> {
        let model = &self.model;
        self.terminal.draw(|f| render_screen(f, model))?;
        Ok(())
    }
}

impl Surface for TerminalSurface {
    fn draw_menu(&mut self, slot: MenuSlot, menu: &Menu) -> Result<()> {
        self.model.show_menu(slot, menu);
        self.redraw()
    }

    fn close_menu(&mut self, slot: MenuSlot) -> Result<()> {
        self.model.close_menu(slot);
        self.redraw()
    }

    fn set_status(&mut self, status: StatusLine) -> Result<()> {
        self.model.status = Some(status);
        self.redraw()
    }

    fn draw_progress(&mut self, frame: &ProgressFrame) -> Result<()> {
        self.model.show_progress(frame);
        self.redraw()
    }

    fn clear_progress(&mut self) -> Result<()> {
        self.model.clear_progress();
        self.redraw()
    }

    fn read_input(&mut self) -> Result<MenuInput> {
        loop {
            match event::read()? {
                Event::Key(key) => {
                    if self.keymap.is_interrupt(&key) {
                        interrupt();
                    }
                    if let Some(input) = self.keymap.classify(key) {
                        return Ok(input);
                    }
                }
                Event::Resize(width, height) => {
                    debug!("Terminal resized to {}x{}", width, height);
                    self.redraw()?;
                }
                _ => {}
            }
        }
    }
}
