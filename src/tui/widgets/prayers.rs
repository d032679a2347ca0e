use ratatui::{
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem},
    Frame,
};

use crate::models::{DailyRecord, PrayerName};
use crate::prayer_times::DayTimes;
use crate::tui::theme;

pub fn render(frame: &mut Frame, area: Rect, record: &DailyRecord, times: &DayTimes, focused_idx: usize) {
    let block = Block::default()
        .title(Span::styled(" Today's Prayers ", theme::gold()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::gold())
        .style(theme::surface());

    let items: Vec<ListItem> = PrayerName::ALL
        .iter()
        .enumerate()
        .map(|(i, prayer)| {
            let status = record.status(*prayer);
            let (icon, status_style) = theme::status(status);
            let label = status.map(|s| s.as_str()).unwrap_or("not marked");

            let name_style = if i == focused_idx {
                theme::gold().add_modifier(Modifier::BOLD)
            } else {
                theme::bold()
            };
            let cursor = if i == focused_idx { "▸ " } else { "  " };

            ListItem::new(Line::from(vec![
                Span::styled(cursor, theme::gold()),
                Span::styled(format!("{:<9}", prayer.as_str()), name_style),
                Span::styled(format!("{:<7}", times.get(*prayer).format("%H:%M")), theme::dim()),
                Span::styled(icon, status_style),
                Span::styled(format!("  {}", label), status_style),
            ]))
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}
