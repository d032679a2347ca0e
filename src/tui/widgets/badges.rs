use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::engine::Achievement;
use crate::tui::theme;

pub fn render(frame: &mut Frame, area: Rect, badges: &[&Achievement]) {
    let block = Block::default()
        .title(Span::styled(" Badges ", theme::gold()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border())
        .style(theme::surface());

    let mut lines = vec![Line::from("")];
    if badges.is_empty() {
        lines.push(Line::from(Span::styled(
            "  No badges yet. Start praying to earn badges!",
            theme::dim(),
        )));
    }
    for badge in badges {
        lines.push(Line::from(vec![
            Span::styled("  ★ ", theme::gold()),
            Span::styled(format!("{:<16}", badge.label), theme::bold()),
            Span::styled(badge.description, theme::dim()),
        ]));
    }

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
