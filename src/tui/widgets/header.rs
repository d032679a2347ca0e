use chrono::NaiveDate;
use ratatui::{
    layout::{Alignment, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::tui::theme;

pub fn render(frame: &mut Frame, area: Rect, today: NaiveDate, hijri: Option<&str>, greeting: &str) {
    let title_line = Line::from(vec![
        Span::styled("  نماز  ", theme::gold().add_modifier(Modifier::BOLD)),
        Span::styled("namaz", theme::gold()),
    ]);

    let gregorian = today.format("%A, %b %d, %Y").to_string();
    let mut date_spans = Vec::new();
    if let Some(hijri) = hijri {
        date_spans.push(Span::styled(hijri.to_string(), theme::amber()));
        date_spans.push(Span::styled("  ·  ", theme::dim()));
    }
    date_spans.push(Span::styled(gregorian, theme::dim()));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::gold().add_modifier(Modifier::BOLD))
        .style(theme::base());

    let paragraph = Paragraph::new(vec![
        title_line,
        Line::from(Span::styled(greeting.to_string(), theme::bold())),
        Line::from(date_spans),
    ])
        .block(block)
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}
