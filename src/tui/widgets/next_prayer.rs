use ratatui::{
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::models::PrayerName;
use crate::prayer_times::TimeSource;
use crate::tui::theme;
use crate::utils::format::format_duration_secs;

pub fn render(frame: &mut Frame, area: Rect, next: (PrayerName, i64), source: TimeSource) {
    let block = Block::default()
        .title(Span::styled(" Next Prayer ", theme::gold()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border())
        .style(theme::surface());

    let (prayer, secs) = next;
    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("  {}", prayer.as_str().to_uppercase()),
            theme::gold().add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled("  in  ", theme::dim()),
            Span::styled(
                format_duration_secs(secs),
                theme::amber().add_modifier(Modifier::BOLD),
            ),
        ]),
    ];
    if source == TimeSource::Fallback {
        lines.push(Line::from(Span::styled("  (fallback times)", theme::red())));
    }

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
