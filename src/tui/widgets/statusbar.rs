use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::tui::theme;

pub fn render(frame: &mut Frame, area: Rect, message: Option<&str>) {
    if let Some(message) = message {
        let line = Line::from(Span::styled(message, theme::amber()));
        frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
        return;
    }

    let hints = [
        ("[j]", " jamaat  "),
        ("[a]", " alone  "),
        ("[m]", " missed  "),
        ("[x]", " clear  "),
        ("[n]", " note  "),
        ("[s]", " progress  "),
        ("[?]", " help  "),
        ("[Esc]", " quit"),
    ];

    let mut spans = Vec::new();
    for (key, label) in &hints {
        spans.push(Span::styled(*key, theme::gold()));
        spans.push(Span::styled(*label, theme::dim()));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)).alignment(Alignment::Center), area);
}
