use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
    Frame,
};

use crate::tui::theme;

/// Today's note. While editing, `editing` holds the draft being typed.
pub fn render(frame: &mut Frame, area: Rect, note: &str, editing: Option<&str>) {
    let block = Block::default()
        .title(Span::styled(" Note ", theme::gold()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(if editing.is_some() {
            theme::amber()
        } else {
            theme::border()
        })
        .style(theme::surface());

    let line = match editing {
        Some(draft) => Line::from(vec![
            Span::styled(format!(" {}", draft), theme::bold()),
            Span::styled("█", theme::amber()),
        ]),
        None if note.is_empty() => Line::from(Span::styled(" Press [n] to add a note", theme::dim())),
        None => Line::from(Span::styled(format!(" {}", note), theme::bold())),
    };

    let paragraph = Paragraph::new(line).block(block).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}
