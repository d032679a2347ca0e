use anyhow::Result;
use chrono::{Local, NaiveDate, NaiveTime, Timelike};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use log::{info, warn};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};
use std::time::Duration;

use crate::config::AppConfig;
use crate::engine::stats::{daily_progress, jamaat_count, prayer_stats};
use crate::engine::streak::streak_state;
use crate::engine::suggestions::{smart_suggestions, Suggestion, SUGGESTION_DAYS};
use crate::engine::{
    recent_achievements, Achievement, Clock, GamificationProfile, PrayerWindow, CHART_DAYS,
    YEAR_DAYS,
};
use crate::models::{AggregateStats, DailyProgress, DailyRecord, PrayerName, PrayerStatus, StreakState};
use crate::prayer_times::{upcoming_reminders, DayTimes, PrayerTimesProvider};
use crate::store::{RecordRepo, Store};
use crate::tui::events::{Event, EventHandler};
use crate::tui::theme;
use crate::tui::widgets::{badges, header, next_prayer, note, prayers, statusbar, streak};
use crate::utils::format::{day_bar, greeting, plural_days, progress_bar};
use crate::utils::hijri::hijri_string;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum View {
    Dashboard,
    Stats,
    Help,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputMode {
    Normal,
    NoteInput,
}

pub struct App {
    pub view: View,
    pub config: AppConfig,
    pub focus_idx: usize,
    pub should_quit: bool,
    pub input_mode: InputMode,
    pub input_buffer: String,
    /// Last failed action or fired reminder, shown in the status bar until
    /// the next key.
    pub message: Option<String>,
    /// Wall-clock time of the previous tick; reminders between it and now fire.
    pub last_check: NaiveTime,

    // Cached state (refreshed on tick/action)
    pub today: NaiveDate,
    pub hijri_str: Option<String>,
    pub record: DailyRecord,
    pub times: DayTimes,
    pub next_prayer: (PrayerName, i64),
    pub week: Vec<DailyProgress>,
    pub jamaat_this_week: u32,
    pub profile: GamificationProfile,
    pub recent_stats: AggregateStats,
    pub recent_streak: StreakState,
    pub recent_badges: Vec<&'static Achievement>,
    pub suggestions: Vec<Suggestion>,

    provider: PrayerTimesProvider,
}

impl App {
    pub fn new(store: &dyn Store, clock: &dyn Clock, config: AppConfig, now: NaiveTime) -> Result<Self> {
        let today = clock.today();
        let provider = PrayerTimesProvider::new(&config.location, &config.reminders.fallback_times);
        let times = provider.times_for(today);

        let mut app = App {
            view: View::Dashboard,
            hijri_str: hijri_string(today, config.location.hijri_offset),
            config,
            focus_idx: 0,
            should_quit: false,
            input_mode: InputMode::Normal,
            input_buffer: String::new(),
            message: None,
            last_check: now,
            today,
            record: DailyRecord::empty(today),
            next_prayer: provider.next_prayer(today, now),
            times,
            week: Vec::new(),
            jamaat_this_week: 0,
            profile: GamificationProfile::build(&[]),
            recent_stats: AggregateStats::default(),
            recent_streak: StreakState::default(),
            recent_badges: Vec::new(),
            suggestions: Vec::new(),
            provider,
        };
        app.load(store)?;
        Ok(app)
    }

    /// Re-read today's record and every derived view from the store.
    pub fn load(&mut self, store: &dyn Store) -> Result<()> {
        self.record = RecordRepo::load(store, self.today)?;

        let year = PrayerWindow::ending_at(store, self.today, YEAR_DAYS)?;
        self.profile = GamificationProfile::build(year.records());
        self.week = daily_progress(year.tail(CHART_DAYS as usize));
        self.jamaat_this_week = jamaat_count(year.tail(CHART_DAYS as usize));
        self.suggestions = smart_suggestions(year.tail(SUGGESTION_DAYS as usize));

        let recent = PrayerWindow::ending_at(store, self.today, self.config.progress.window_days)?;
        self.recent_stats = prayer_stats(recent.records());
        self.recent_streak = streak_state(recent.records());
        self.recent_badges = recent_achievements(recent.records());

        Ok(())
    }

    pub fn tick(&mut self, store: &dyn Store, clock: &dyn Clock, now: NaiveTime) {
        let today = clock.today();
        if today != self.today {
            self.today = today;
            self.last_check = NaiveTime::MIN;
            self.hijri_str = hijri_string(today, self.config.location.hijri_offset);
            self.times = self.provider.times_for(today);
            if let Err(e) = self.load(store) {
                warn!("refreshing dashboard failed: {:#}", e);
            }
        }
        self.next_prayer = self.provider.next_prayer(today, now);
        self.fire_reminders(now);
    }

    /// Announce every reminder whose moment fell since the previous tick.
    fn fire_reminders(&mut self, now: NaiveTime) {
        let since = self.last_check;
        self.last_check = now;
        if !self.config.reminders.enabled || now <= since {
            return;
        }
        let lead = self.config.reminders.lead_minutes;
        let due = upcoming_reminders(&self.times, since, lead)
            .into_iter()
            .rev()
            .find(|r| r.remind_at <= now);
        if let Some(reminder) = due {
            info!("reminder for {} at {}", reminder.prayer, reminder.remind_at);
            self.message = Some(format!(
                "{} will begin in {} minutes.",
                reminder.prayer, lead
            ));
        }
    }

    fn focused_prayer(&self) -> PrayerName {
        PrayerName::ALL[self.focus_idx.min(PrayerName::ALL.len() - 1)]
    }

    pub fn handle_key(&mut self, key: KeyEvent, store: &dyn Store) {
        // Ignore release/repeat events from some terminals
        if key.kind != KeyEventKind::Press {
            return;
        }
        self.message = None;
        match self.input_mode {
            InputMode::NoteInput => self.handle_note_input(key, store),
            InputMode::Normal => match self.view {
                View::Dashboard => self.handle_dashboard_key(key, store),
                View::Stats => self.handle_stats_key(key),
                View::Help => self.handle_help_key(key),
            },
        }
    }

    fn handle_dashboard_key(&mut self, key: KeyEvent, store: &dyn Store) {
        match key.code {
            KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Char('?') => {
                self.view = View::Help;
            }
            KeyCode::Char('s') => {
                self.view = View::Stats;
            }
            KeyCode::Up => {
                self.focus_idx = self.focus_idx.saturating_sub(1);
            }
            KeyCode::Down => {
                if self.focus_idx + 1 < PrayerName::ALL.len() {
                    self.focus_idx += 1;
                }
            }
            KeyCode::Char('j') => self.mark_focused(store, Some(PrayerStatus::Jamaat)),
            KeyCode::Char('a') => self.mark_focused(store, Some(PrayerStatus::Alone)),
            KeyCode::Char('m') => self.mark_focused(store, Some(PrayerStatus::Missed)),
            KeyCode::Char('x') => self.mark_focused(store, None),
            KeyCode::Enter => {
                let next = next_status(self.record.status(self.focused_prayer()));
                self.mark_focused(store, next);
            }
            KeyCode::Char('n') => {
                self.input_mode = InputMode::NoteInput;
                self.input_buffer = self.record.note.clone();
            }
            _ => {}
        }
    }

    fn handle_stats_key(&mut self, key: KeyEvent) {
        if matches!(key.code, KeyCode::Esc | KeyCode::Char('s')) {
            self.view = View::Dashboard;
        }
    }

    fn handle_help_key(&mut self, key: KeyEvent) {
        if matches!(key.code, KeyCode::Esc | KeyCode::Char('?')) {
            self.view = View::Dashboard;
        }
    }

    fn handle_note_input(&mut self, key: KeyEvent, store: &dyn Store) {
        match key.code {
            KeyCode::Esc => {
                self.input_mode = InputMode::Normal;
                self.input_buffer.clear();
            }
            KeyCode::Enter => {
                let text = self.input_buffer.trim().to_string();
                match RecordRepo::set_note(store, self.today, &text) {
                    Ok(record) => self.record = record,
                    Err(e) => self.message = Some(format!("Could not save note: {:#}", e)),
                }
                self.input_mode = InputMode::Normal;
                self.input_buffer.clear();
            }
            KeyCode::Backspace => {
                self.input_buffer.pop();
            }
            KeyCode::Char(c) => {
                self.input_buffer.push(c);
            }
            _ => {}
        }
    }

    fn mark_focused(&mut self, store: &dyn Store, status: Option<PrayerStatus>) {
        let prayer = self.focused_prayer();
        let result = RecordRepo::set_status(store, self.today, prayer, status)
            .and_then(|_| self.load(store));
        if let Err(e) = result {
            warn!("marking {} failed: {:#}", prayer, e);
            self.message = Some(format!("Could not update {}: {:#}", prayer, e));
        }
    }

    pub fn draw(&self, frame: &mut Frame) {
        match self.view {
            View::Dashboard => self.draw_dashboard(frame),
            View::Stats => self.draw_stats(frame),
            View::Help => {
                self.draw_dashboard(frame);
                self.draw_help_overlay(frame);
            }
        }
    }

    fn draw_dashboard(&self, frame: &mut Frame) {
        let area = frame.area();
        frame.render_widget(Block::default().style(theme::base()), area);

        let outer_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(5), // header
                Constraint::Min(0),    // body
                Constraint::Length(1), // status bar
            ])
            .split(area);

        let welcome = format!(
            "{}, {}!",
            greeting(self.last_check.hour()),
            self.config.profile.display_name()
        );
        header::render(frame, outer_chunks[0], self.today, self.hijri_str.as_deref(), &welcome);
        statusbar::render(frame, outer_chunks[2], self.message.as_deref());

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(outer_chunks[1]);

        let left_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(7), // prayers
                Constraint::Length(3), // note
                Constraint::Min(0),    // badges
            ])
            .split(columns[0]);

        prayers::render(frame, left_chunks[0], &self.record, &self.times, self.focus_idx);
        let editing = (self.input_mode == InputMode::NoteInput).then_some(self.input_buffer.as_str());
        note::render(frame, left_chunks[1], &self.record.note, editing);
        badges::render(frame, left_chunks[2], &self.profile.badges);

        let right_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(7), // next prayer
                Constraint::Length(8), // streak + level
                Constraint::Min(0),    // suggestion
            ])
            .split(columns[1]);

        next_prayer::render(frame, right_chunks[0], self.next_prayer, self.times.source);
        streak::render(frame, right_chunks[1], &self.profile, &self.week);
        self.draw_suggestions(frame, right_chunks[2]);
    }

    fn draw_suggestions(&self, frame: &mut Frame, area: Rect) {
        let goal = self.config.profile.weekly_goal;
        let mut lines = vec![
            Line::from(""),
            Line::from(vec![
                Span::styled("  Jamaat this week  ", theme::dim()),
                Span::styled(
                    format!("{} / {}  ", self.jamaat_this_week, goal),
                    theme::amber().add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    progress_bar(self.jamaat_this_week as f64 / goal.max(1) as f64, 10),
                    theme::mint(),
                ),
            ]),
        ];
        for suggestion in &self.suggestions {
            lines.push(Line::from(vec![
                Span::styled("  › ", theme::gold()),
                Span::styled(suggestion.message(), theme::bold()),
            ]));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("  {}", self.profile.encouragement()),
            theme::dim(),
        )));

        let block = Block::default()
            .title(Span::styled(" Suggestions ", theme::gold()))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border())
            .style(theme::surface());
        frame.render_widget(Paragraph::new(lines).block(block), area);
    }

    fn draw_stats(&self, frame: &mut Frame) {
        let area = frame.area();
        frame.render_widget(Block::default().style(theme::base()), area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(area);

        let title = Paragraph::new(Line::from(vec![
            Span::styled(
                format!("  Progress (last {})  ", plural_days(self.config.progress.window_days)),
                theme::gold().add_modifier(Modifier::BOLD),
            ),
            Span::styled("  [Esc] back", theme::dim()),
        ]));
        frame.render_widget(title, chunks[0]);

        let mut lines = vec![
            Line::from(""),
            Line::from(vec![
                Span::styled("  Streak (current):  ", theme::dim()),
                Span::styled(
                    plural_days(self.recent_streak.current),
                    theme::green().add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(vec![
                Span::styled("  Streak (best):     ", theme::dim()),
                Span::styled(plural_days(self.recent_streak.longest), theme::green()),
            ]),
            Line::from(vec![
                Span::styled("  Prayers offered:   ", theme::dim()),
                Span::styled(
                    format!("{} / {}", self.recent_stats.offered, self.recent_stats.total),
                    theme::amber(),
                ),
            ]),
            Line::from(""),
        ];

        for badge in &self.recent_badges {
            lines.push(Line::from(vec![
                Span::styled("  ★ ", theme::gold()),
                Span::styled(format!("{:<16}", badge.label), theme::bold()),
                Span::styled(badge.description, theme::dim()),
            ]));
        }
        if !self.recent_badges.is_empty() {
            lines.push(Line::from(""));
        }

        lines.push(Line::from(Span::styled(
            format!("  Last {}", plural_days(CHART_DAYS)),
            theme::gold(),
        )));
        lines.push(Line::from(""));

        for day in &self.week {
            let style = match day.offered {
                5 => theme::green(),
                0 => theme::dim(),
                _ => theme::amber(),
            };
            lines.push(Line::from(vec![
                Span::styled(format!("  {}  ", day_bar(day.offered)), style),
                Span::styled(
                    format!("{}  {}/{}", day.date.format("%a %d %b"), day.offered, day.total),
                    theme::dim(),
                ),
            ]));
        }

        frame.render_widget(Paragraph::new(lines), chunks[1]);
    }

    fn draw_help_overlay(&self, frame: &mut Frame) {
        let area = frame.area();
        let popup_area = Rect {
            x: area.width / 4,
            y: area.height / 4,
            width: area.width / 2,
            height: area.height / 2,
        };

        frame.render_widget(Clear, popup_area);

        let bindings = [
            ("[↑ ↓]", "Select prayer"),
            ("[j]", "Prayed in jamaat"),
            ("[a]", "Prayed alone"),
            ("[m]", "Missed"),
            ("[x]", "Clear mark"),
            ("[Enter]", "Cycle status"),
            ("[n]", "Edit today's note"),
            ("[s]", "Progress view"),
            ("[?]", "Toggle help"),
            ("[Esc]", "Quit"),
        ];

        let mut help_text = vec![
            Line::from(Span::styled(
                "  Keybindings",
                theme::gold().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
        ];
        for (key, action) in bindings {
            help_text.push(Line::from(vec![
                Span::styled(format!("  {:<10}", key), theme::gold()),
                Span::styled(action, theme::dim()),
            ]));
        }

        let block = Block::default()
            .title(Span::styled(" Help ", theme::gold()))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::gold())
            .style(theme::surface());

        frame.render_widget(Paragraph::new(help_text).block(block), popup_area);
    }
}

/// Unset → Jamaat → Alone → Missed → unset.
fn next_status(current: Option<PrayerStatus>) -> Option<PrayerStatus> {
    match current {
        None => Some(PrayerStatus::Jamaat),
        Some(PrayerStatus::Jamaat) => Some(PrayerStatus::Alone),
        Some(PrayerStatus::Alone) => Some(PrayerStatus::Missed),
        Some(PrayerStatus::Missed) => None,
    }
}

/// Run the TUI event loop.
pub fn run(store: &dyn Store, clock: &dyn Clock, config: AppConfig) -> Result<()> {
    let mut app = App::new(store, clock, config, Local::now().time())?;

    let mut terminal = ratatui::init();
    let events = EventHandler::new(Duration::from_millis(500));

    let result = loop {
        if let Err(e) = terminal.draw(|frame| app.draw(frame)) {
            break Err(e.into());
        }

        match events.next() {
            Ok(Event::Key(key)) => {
                app.handle_key(key, store);
                if app.should_quit {
                    break Ok(());
                }
            }
            Ok(Event::Resize) => {}
            Ok(Event::Tick) => app.tick(store, clock, Local::now().time()),
            Err(e) => break Err(e.into()),
        }
    };

    ratatui::restore();
    result
}
