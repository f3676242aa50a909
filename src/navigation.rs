//! Menu navigation state machine
//!
//! A [`Menu`] is an ordered list of labels with a 1-based highlighted index.
//! Inputs move the highlight cyclically or confirm it; confirmation ends the
//! interaction by returning a [`MenuChoice`], there is no terminal state object.

use std::fmt;

use tracing::debug;

use crate::error::{Result, ShellError};
use crate::types::{MenuSlot, StatusLevel};
use crate::ui::{StatusLine, Surface};

/// Status text shown when an unmapped key is pressed
pub const INVALID_INPUT_MESSAGE: &str = "Invalid character";

/// One keyboard event, already classified
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuInput {
    MoveUp,
    MoveDown,
    Confirm,
    /// Any key without a binding
    Other,
}

/// 1-based index of a confirmed menu entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MenuChoice(usize);

impl MenuChoice {
    /// The 1-based position
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for MenuChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Result of applying a single input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Highlight changed (or stayed put on a one-entry menu)
    Moved,
    /// Unmapped input; highlight unchanged
    Invalid,
    /// The user confirmed the highlighted entry
    Chosen(MenuChoice),
}

/// A titled, ordered list of selectable labels
///
/// # Invariants
///
/// - `labels` is never empty
/// - `highlighted` is always in `1..=labels.len()`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Menu {
    title: String,
    labels: Vec<String>,
    highlighted: usize,
}

impl Menu {
    /// Create a menu with the first entry highlighted
    pub fn new<I, S>(title: impl Into<String>, labels: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let title = title.into();
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        if labels.is_empty() {
            return Err(ShellError::validation(format!(
                "menu '{}' has no entries",
                title
            )));
        }
        Ok(Self {
            title,
            labels,
            highlighted: 1,
        })
    }

    /// Create a menu with a specific entry highlighted
    pub fn with_highlight<I, S>(
        title: impl Into<String>,
        labels: I,
        highlighted: usize,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut menu = Self::new(title, labels)?;
        if !(1..=menu.len()).contains(&highlighted) {
            return Err(ShellError::validation(format!(
                "highlight {} is outside 1..={}",
                highlighted,
                menu.len()
            )));
        }
        menu.highlighted = highlighted;
        Ok(menu)
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Always false; kept for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Currently highlighted 1-based index
    pub fn highlighted(&self) -> usize {
        self.highlighted
    }

    /// Label of a confirmed choice
    pub fn label(&self, choice: MenuChoice) -> Option<&str> {
        choice
            .index()
            .checked_sub(1)
            .and_then(|i| self.labels.get(i))
            .map(String::as_str)
    }

    /// Apply one input to the highlight
    pub fn apply(&mut self, input: MenuInput) -> Step {
        let n = self.labels.len();
        match input {
            MenuInput::MoveUp => {
                self.highlighted = if self.highlighted == 1 {
                    n
                } else {
                    self.highlighted - 1
                };
                Step::Moved
            }
            MenuInput::MoveDown => {
                self.highlighted = if self.highlighted == n {
                    1
                } else {
                    self.highlighted + 1
                };
                Step::Moved
            }
            MenuInput::Confirm => Step::Chosen(MenuChoice(self.highlighted)),
            MenuInput::Other => Step::Invalid,
        }
    }
}

/// Drive a menu until the user confirms an entry.
///
/// Draws once up front, then for every input: apply it, post the invalid-input
/// notice if needed, re-draw, and return on confirmation. The confirming input
/// is drawn before returning as well.
pub fn run_menu<S: Surface + ?Sized>(
    menu: &mut Menu,
    slot: MenuSlot,
    surface: &mut S,
) -> Result<MenuChoice> {
    surface.draw_menu(slot, menu)?;
    loop {
        let input = surface.read_input()?;
        let step = menu.apply(input);
        if step == Step::Invalid {
            debug!(menu = menu.title(), "unmapped input");
            surface.set_status(StatusLine::new(INVALID_INPUT_MESSAGE, StatusLevel::Error))?;
        }
        surface.draw_menu(slot, menu)?;
        if let Step::Chosen(choice) = step {
            debug!(menu = menu.title(), %choice, "menu choice confirmed");
            return Ok(choice);
        }
    }
}
