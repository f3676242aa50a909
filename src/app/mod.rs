//! Application module
//!
//! Contains the controller that walks the menu hierarchy and runs the
//! download and install pipelines.
//!
//! # Module Structure
//! - `state` - Menu tables (label → action)
//! - Main module - [`App`] and its dispatch loop

mod state;

pub use state::{MAIN_MENU, MenuAction, MenuEntry, MenuTable, UTILITY_MENU};

use tracing::{debug, error, info, warn};

use crate::config::ShellConfig;
use crate::error::{Result, ShellError};
use crate::input::Keymap;
use crate::navigation::run_menu;
use crate::pipeline::{Downloader, PipelineError, inflate_file};
use crate::types::MenuSlot;
use crate::ui::{ProgressPanel, StatusLine, Surface};

/// Console controller
///
/// Owns the rendering context and the session configuration. All work happens
/// on the calling thread; a running download blocks input until it finishes.
pub struct App<S: Surface> {
    surface: S,
    config: ShellConfig,
    downloader: Option<Downloader>,
    welcome: String,
}

impl<S: Surface> App<S> {
    /// Create a new application instance
    pub fn new(surface: S, config: ShellConfig) -> Self {
        info!("Creating new App instance");
        Self {
            surface,
            config,
            downloader: None,
            welcome: format!("WELCOME TO SILVERLINE - {}", Keymap::new().hint()),
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn config(&self) -> &ShellConfig {
        &self.config
    }

    /// Give the surface back, e.g. to inspect a scripted run
    pub fn into_surface(self) -> S {
        self.surface
    }

    /// Show the main menu and dispatch choices until Exit is confirmed
    pub fn run(&mut self) -> Result<()> {
        info!("Starting main menu loop");
        self.surface.set_status(StatusLine::normal(self.welcome.clone()))?;

        loop {
            let mut menu = MAIN_MENU.menu()?;
            let choice = run_menu(&mut menu, MenuSlot::Primary, &mut self.surface)?;
            let Some(entry) = MAIN_MENU.entry(choice) else {
                warn!("Main menu returned unknown choice {}", choice);
                continue;
            };
            debug!("Main menu: {}", entry.label);

            match entry.action {
                MenuAction::OpenUtility => self.utility_menu()?,
                MenuAction::Exit => break,
                MenuAction::Reserved => self.reserved(entry.label)?,
                other => warn!("Action {:?} has no meaning in the main menu", other),
            }
        }

        info!("Exit selected");
        Ok(())
    }

    /// Utility sub-menu: one choice, then back to the main menu
    fn utility_menu(&mut self) -> Result<()> {
        let mut menu = UTILITY_MENU.menu()?;
        let choice = run_menu(&mut menu, MenuSlot::Secondary, &mut self.surface)?;
        let action = UTILITY_MENU
            .entry(choice)
            .map(|e| e.action)
            .unwrap_or(MenuAction::Return);
        debug!("Utility menu: {:?}", action);

        match action {
            MenuAction::Download => self.download()?,
            MenuAction::Install => self.install()?,
            _ => {}
        }
        self.surface.close_menu(MenuSlot::Secondary)
    }

    fn reserved(&mut self, label: &str) -> Result<()> {
        debug!("{} is reserved", label);
        self.surface.set_status(StatusLine::warning(format!("{} is not available yet", label)))
    }

    fn download(&mut self) -> Result<()> {
        let url = self.config.download_url.clone();
        let dest = self.config.download_path.clone();
        self.surface.clear_progress()?;
        self.surface.set_status(StatusLine::normal(format!("Downloading {}...", url)))?;

        if self.downloader.is_none() {
            match Downloader::with_proxy(self.config.use_system_proxy) {
                Ok(downloader) => self.downloader = Some(downloader),
                Err(e) => return self.report_failure("Download", e),
            }
        }
        let Some(downloader) = self.downloader.as_ref() else {
            return Ok(());
        };

        let mut panel = ProgressPanel::new(&mut self.surface);
        let result = downloader.fetch(&url, &dest, &mut panel);
        panel.finish()?;

        match result {
            Ok(bytes) => {
                info!("Saved {} bytes to {:?}", bytes, dest);
                self.surface.set_status(StatusLine::normal(format!(
                    "Download complete: {} bytes saved to {}",
                    bytes,
                    dest.display()
                )))
            }
            Err(e) => self.report_failure("Download", e),
        }
    }

    fn install(&mut self) -> Result<()> {
        self.surface.set_status(StatusLine::normal("Decompressing..."))?;
        let result = inflate_file(
            &self.config.download_path,
            &self.config.extract_path,
            &self.config.inflate_options(),
        );

        match result {
            Ok(summary) => self.surface.set_status(StatusLine::normal(format!(
                "Install complete: {} bytes written to {}",
                summary.bytes_out,
                self.config.extract_path.display()
            ))),
            Err(e) => self.report_failure("Install", e),
        }
    }

    /// Post a pipeline failure to the status bar; only resource exhaustion
    /// propagates
    fn report_failure(&mut self, action: &str, err: PipelineError) -> Result<()> {
        error!("{} failed: {}", action, err);
        self.surface.set_status(StatusLine::error(err.status_message()))?;
        if err.is_fatal() {
            return Err(ShellError::fatal(format!("{} failed: {}", action, err)));
        }
        Ok(())
    }
}
