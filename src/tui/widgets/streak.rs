use ratatui::{
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::engine::GamificationProfile;
use crate::models::DailyProgress;
use crate::tui::theme;
use crate::utils::format::{plural_days, progress_bar};

/// Streak, level and the last seven days as dots.
pub fn render(frame: &mut Frame, area: Rect, profile: &GamificationProfile, week: &[DailyProgress]) {
    let block = Block::default()
        .title(Span::styled(" Progress ", theme::gold()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border())
        .style(theme::surface());

    let mut dots = vec![Span::styled("  ", theme::dim())];
    for day in week {
        let (dot, style) = match day.offered {
            5 => ("●", theme::mint().add_modifier(Modifier::BOLD)),
            3 | 4 => ("●", theme::amber()),
            1 | 2 => ("◑", theme::amber()),
            _ => ("○", theme::dim()),
        };
        dots.push(Span::styled(dot, style));
        dots.push(Span::styled(" ", theme::dim()));
    }

    let streak_line = Line::from(vec![
        Span::styled("  Streak  ", theme::dim()),
        Span::styled(
            plural_days(profile.current_streak),
            theme::green().add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  ·  best {}", profile.longest_streak),
            theme::dim(),
        ),
    ]);

    let level = &profile.level;
    let level_line = Line::from(vec![
        Span::styled(
            format!("  Level {}  ", level.number()),
            theme::gold().add_modifier(Modifier::BOLD),
        ),
        Span::styled(progress_bar(level.progress(profile.points), 12), theme::mint()),
        Span::styled(format!("  {} pts", profile.points), theme::dim()),
    ]);

    let next_line = if level.is_max() {
        Line::from(Span::styled("  Highest level reached", theme::mint()))
    } else {
        Line::from(Span::styled(
            format!(
                "  {} points to level {}",
                level.points_to_next.unwrap_or(0),
                level.number() + 1
            ),
            theme::dim(),
        ))
    };

    let text = vec![
        Line::from(""),
        streak_line,
        Line::from(dots),
        Line::from(""),
        level_line,
        next_line,
    ];
    frame.render_widget(Paragraph::new(text).block(block), area);
}
