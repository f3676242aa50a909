//! Menu tables
//!
//! Each menu is a static table of label → action. Adding an entry is a data
//! change here; the controller only dispatches on [`MenuAction`].

use crate::error::Result;
use crate::navigation::{Menu, MenuChoice};

/// What confirming a menu entry does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuAction {
    /// Open the utility sub-menu
    OpenUtility,
    /// Entry shown but not implemented; confirming it changes nothing
    Reserved,
    /// Leave the console
    Exit,
    /// Fetch the configured archive
    Download,
    /// Decompress the downloaded archive
    Install,
    /// Close the sub-menu
    Return,
}

/// One row of a menu table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuEntry {
    pub label: &'static str,
    pub action: MenuAction,
}

/// A titled list of entries, in on-screen order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuTable {
    pub title: &'static str,
    pub entries: &'static [MenuEntry],
}

const fn entry(label: &'static str, action: MenuAction) -> MenuEntry {
    MenuEntry { label, action }
}

pub const MAIN_MENU: MenuTable = MenuTable {
    title: "Main Menu",
    entries: &[
        entry("Utility", MenuAction::OpenUtility),
        entry("Anti Virus", MenuAction::Reserved),
        entry("Back Up", MenuAction::Reserved),
        entry("Settings", MenuAction::Reserved),
        entry("Exit", MenuAction::Exit),
    ],
};

pub const UTILITY_MENU: MenuTable = MenuTable {
    title: "Utility Menu",
    entries: &[
        entry("Download", MenuAction::Download),
        entry("Install", MenuAction::Install),
        entry("Return", MenuAction::Return),
    ],
};

impl MenuTable {
    /// Fresh navigable menu with the first entry highlighted
    pub fn menu(&self) -> Result<Menu> {
        Menu::new(self.title, self.entries.iter().map(|e| e.label))
    }

    /// Entry for a confirmed choice
    pub fn entry(&self, choice: MenuChoice) -> Option<&MenuEntry> {
        choice
            .index()
            .checked_sub(1)
            .and_then(|i| self.entries.get(i))
    }
}
