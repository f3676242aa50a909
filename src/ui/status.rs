//! Status bar and download progress panel

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use super::StatusLine;
use crate::pipeline::{BAR_WIDTH, ProgressFrame};
use crate::theme::Styles;

/// Render the status bar message inside a bordered strip
pub fn render_status_bar(f: &mut Frame, status: &StatusLine, area: Rect) {
    if area.is_empty() {
        return;
    }

    let text = Paragraph::new(Line::from(Span::styled(
        status.text.as_str(),
        Styles::status(status.level),
    )))
    .block(Block::default().borders(Borders::ALL))
    .style(Styles::background())
    .wrap(Wrap { trim: true });

    f.render_widget(Clear, area);
    f.render_widget(text, area);
}

/// Render the progress meter: summary in the top border, the bar inside,
/// `Done!` in the bottom border once the transfer completed
pub fn render_progress_panel(f: &mut Frame, frame: &ProgressFrame, done: bool, area: Rect) {
    if area.is_empty() {
        return;
    }

    let empty = BAR_WIDTH - frame.filled.min(BAR_WIDTH);
    let bar = Line::from(vec![
        Span::raw(" "),
        Span::styled(" ".repeat(frame.filled.min(BAR_WIDTH)), Styles::success()),
        Span::styled("-".repeat(empty), Styles::pending()),
        Span::raw(" "),
    ]);

    let mut block = Block::default()
        .borders(Borders::ALL)
        .title(frame.summary());
    if done {
        block = block.title_bottom(Line::from(Span::styled("Done!", Styles::success())));
    }

    let panel = Paragraph::new(bar).block(block).style(Styles::background());

    f.render_widget(Clear, area);
    f.render_widget(panel, area);
}
