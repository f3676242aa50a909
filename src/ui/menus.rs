//! Menu panel rendering

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::navigation::Menu;
use crate::theme::Styles;

/// Render a bordered menu panel: bold title, blank row, then one row per
/// entry with `>` marking the highlighted one
pub fn render_menu_panel(f: &mut Frame, menu: &Menu, area: Rect) {
    if area.is_empty() {
        return;
    }

    let mut lines = Vec::with_capacity(menu.len() + 2);
    lines.push(Line::from(Span::styled(
        format!(" {}", menu.title()),
        Styles::panel_title(),
    )));
    lines.push(Line::default());
    lines.extend(menu.labels().iter().enumerate().map(|(i, label)| {
        if i + 1 == menu.highlighted() {
            Line::from(vec![
                Span::raw(" "),
                Span::styled(format!(">{}", label), Styles::highlight()),
            ])
        } else {
            Line::from(format!("  {}", label))
        }
    }));

    let panel = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL))
        .style(Styles::panel());

    f.render_widget(Clear, area);
    f.render_widget(panel, area);
}
