use anyhow::{anyhow, bail, Context, Result};
use chrono::{Local, NaiveDate, Timelike};
use log::info;
use serde::Serialize;
use std::path::Path;
use std::str::FromStr;

use crate::config::settings::MAX_WEEKLY_GOAL;
use crate::config::AppConfig;
use crate::engine::achievements::{recent_achievements, Achievement};
use crate::engine::report::{Report, ReportPeriod};
use crate::engine::stats::{daily_progress, jamaat_count, prayer_stats};
use crate::engine::streak::streak_state;
use crate::engine::suggestions::{smart_suggestions, SUGGESTION_DAYS};
use crate::engine::{Clock, GamificationProfile, PrayerWindow, CHART_DAYS, YEAR_DAYS};
use crate::models::{AggregateStats, DailyProgress, DailyRecord, PrayerName, PrayerStatus, StreakState};
use crate::prayer_times::calculator::CALC_METHODS;
use crate::prayer_times::{upcoming_reminders, DayTimes, PrayerTimesProvider, Reminder, TimeSource};
use crate::store::{RecordRepo, Store};
use crate::utils::format::{day_bar, format_duration_secs, greeting, plural_days, progress_bar};
use crate::utils::hijri::hijri_string;

// ─── ANSI helpers ────────────────────────────────────────────────────────────

macro_rules! println_colored {
    ($color:expr, $($arg:tt)*) => {{
        print!("{}", $color);
        print!($($arg)*);
        println!("\x1b[0m");
    }};
}

const GREEN: &str = "\x1b[32m";
const AMBER: &str = "\x1b[33m";
const RED: &str = "\x1b[31m";
const DIM: &str = "\x1b[2m";
const BOLD: &str = "\x1b[1m";
const GOLD: &str = "\x1b[38;2;196;160;68m";

fn status_color(status: Option<PrayerStatus>) -> &'static str {
    match status {
        Some(PrayerStatus::Jamaat) => GREEN,
        Some(PrayerStatus::Alone) => GREEN,
        Some(PrayerStatus::Missed) => RED,
        None => DIM,
    }
}

/// Resolve an optional `YYYY-MM-DD` argument. Future days are rejected.
fn resolve_date(arg: Option<&str>, clock: &dyn Clock) -> Result<NaiveDate> {
    let today = clock.today();
    let Some(s) = arg else {
        return Ok(today);
    };
    let date = NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| anyhow!("Invalid date '{}'. Use YYYY-MM-DD", s))?;
    if date > today {
        bail!("{} is in the future", date);
    }
    Ok(date)
}

fn parse_prayer(s: &str) -> Result<PrayerName> {
    PrayerName::from_str(s)
        .map_err(|_| anyhow!("Unknown prayer '{}'. Use: {}", s, choices(PrayerName::ALL.iter().map(|p| p.as_str()))))
}

fn parse_status(s: &str) -> Result<PrayerStatus> {
    PrayerStatus::from_str(s)
        .map_err(|_| anyhow!("Unknown status '{}'. Use: {}", s, choices(PrayerStatus::ALL.iter().map(|p| p.as_str()))))
}

fn choices<'a>(names: impl Iterator<Item = &'a str>) -> String {
    names.map(str::to_lowercase).collect::<Vec<_>>().join(", ")
}

// ─── Logging a day ───────────────────────────────────────────────────────────

pub fn handle_mark(
    store: &dyn Store,
    clock: &dyn Clock,
    prayer: &str,
    status: &str,
    date: Option<&str>,
) -> Result<()> {
    let prayer = parse_prayer(prayer)?;
    let status = parse_status(status)?;
    let date = resolve_date(date, clock)?;

    let record = RecordRepo::set_status(store, date, prayer, Some(status))?;
    info!("marked {} {} on {}", prayer, status, date);

    println_colored!(
        status_color(Some(status)),
        "  {} {} marked as {}",
        if status.is_offered() { "✓" } else { "✗" },
        prayer,
        status
    );
    if record.all_offered() {
        println_colored!(GOLD, "  All five prayers offered on {}", date);
    }
    Ok(())
}

pub fn handle_clear(store: &dyn Store, clock: &dyn Clock, prayer: &str, date: Option<&str>) -> Result<()> {
    let prayer = parse_prayer(prayer)?;
    let date = resolve_date(date, clock)?;
    RecordRepo::set_status(store, date, prayer, None)?;
    println_colored!(DIM, "  ○ {} cleared for {}", prayer, date);
    Ok(())
}

pub fn handle_note(store: &dyn Store, clock: &dyn Clock, text: &str, date: Option<&str>) -> Result<()> {
    let date = resolve_date(date, clock)?;
    RecordRepo::set_note(store, date, text)?;
    if text.is_empty() {
        println_colored!(DIM, "  Note removed for {}", date);
    } else {
        println_colored!(GREEN, "  ✓ Note saved for {}", date);
    }
    Ok(())
}

// ─── History ─────────────────────────────────────────────────────────────────

pub fn handle_show(store: &dyn Store, clock: &dyn Clock, date: Option<&str>) -> Result<()> {
    let date = resolve_date(date, clock)?;
    let record = RecordRepo::load(store, date)?;
    print_day(&record);
    Ok(())
}

fn print_day(record: &DailyRecord) {
    println!();
    println_colored!(GOLD, "  {}", record.date.format("%A, %b %d, %Y"));
    println!();
    for prayer in PrayerName::ALL {
        let status = record.status(prayer);
        let label = status.map(|s| s.as_str()).unwrap_or("-");
        println_colored!(status_color(status), "  {:<10}  {}", prayer.as_str(), label);
    }
    println!();
    if record.note.is_empty() {
        println_colored!(DIM, "  No note for this day.");
    } else {
        println!("  Note: {}", record.note);
    }
    println!();
}

// ─── Progress ────────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct ProgressSummary {
    days: u32,
    stats: AggregateStats,
    streak: StreakState,
    achievements: Vec<&'static Achievement>,
    chart: Vec<DailyProgress>,
}

pub fn handle_stats(
    store: &dyn Store,
    clock: &dyn Clock,
    config: &AppConfig,
    days: Option<u32>,
    json: bool,
) -> Result<()> {
    let today = clock.today();
    let days = days.unwrap_or(config.progress.window_days);
    let window = PrayerWindow::ending_at(store, today, days)?;
    let chart_window = PrayerWindow::ending_at(store, today, CHART_DAYS)?;

    let summary = ProgressSummary {
        days,
        stats: prayer_stats(window.records()),
        streak: streak_state(window.records()),
        achievements: recent_achievements(window.records()),
        chart: daily_progress(chart_window.records()),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!();
    println_colored!(GOLD, "  Progress (last {})", plural_days(days));
    println!();
    println_colored!(BOLD, "  Current streak:  {}", plural_days(summary.streak.current));
    println!("  Longest streak:  {}", plural_days(summary.streak.longest));
    println!(
        "  Prayers offered: {} / {} ({:.0}%)",
        summary.stats.offered,
        summary.stats.total,
        summary.stats.completion_ratio() * 100.0
    );
    if summary.stats.missed() > 0 {
        println_colored!(RED, "  Missed:          {}", summary.stats.missed());
    }

    if !summary.achievements.is_empty() {
        println!();
        for a in &summary.achievements {
            println_colored!(AMBER, "  ★ {}  {}", a.label, a.description);
        }
    }

    println!();
    println_colored!(DIM, "  Last {} (prayers offered)", plural_days(CHART_DAYS));
    println!();
    for point in &summary.chart {
        let color = match point.offered {
            5 => GREEN,
            0 => DIM,
            _ => AMBER,
        };
        println_colored!(
            color,
            "  {}  {}  {}/{}",
            point.date.format("%m-%d"),
            day_bar(point.offered),
            point.offered,
            point.total
        );
    }
    println!();
    Ok(())
}

// ─── Gamification ────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct ProfileSummary {
    name: String,
    #[serde(flatten)]
    profile: GamificationProfile,
    jamaat_this_week: u32,
    weekly_goal: u32,
}

fn profile_summary(store: &dyn Store, clock: &dyn Clock, config: &AppConfig) -> Result<ProfileSummary> {
    let window = PrayerWindow::ending_at(store, clock.today(), YEAR_DAYS)?;
    Ok(ProfileSummary {
        name: config.profile.display_name().to_string(),
        profile: GamificationProfile::build(window.records()),
        jamaat_this_week: jamaat_count(window.tail(CHART_DAYS as usize)),
        weekly_goal: config.profile.weekly_goal,
    })
}

/// Apply `--name`/`--goal`. Returns whether anything changed.
fn update_profile(config: &mut AppConfig, name: Option<String>, goal: Option<u32>) -> Result<bool> {
    let mut changed = false;
    if let Some(name) = name {
        config.profile.name = name.trim().to_string();
        changed = true;
    }
    if let Some(goal) = goal {
        if goal == 0 || goal > MAX_WEEKLY_GOAL {
            bail!("Weekly goal must be between 1 and {}", MAX_WEEKLY_GOAL);
        }
        config.profile.weekly_goal = goal;
        changed = true;
    }
    Ok(changed)
}

pub fn handle_profile(
    store: &dyn Store,
    clock: &dyn Clock,
    config: &mut AppConfig,
    name: Option<String>,
    goal: Option<u32>,
    json: bool,
) -> Result<()> {
    if update_profile(config, name, goal)? {
        config.save().context("Saving profile")?;
        info!("profile updated");
    }
    let summary = profile_summary(store, clock, config)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    let profile = &summary.profile;
    println!();
    println_colored!(BOLD, "  {}, {}!", greeting(Local::now().hour()), summary.name);
    println!();
    println_colored!(
        AMBER,
        "  Jamaat this week: {} / {}  {}",
        summary.jamaat_this_week,
        summary.weekly_goal,
        progress_bar(summary.jamaat_this_week as f64 / summary.weekly_goal as f64, 15)
    );
    println!();
    println_colored!(GOLD, "  Level {}", profile.level.number());
    println!("  Points: {}", profile.points);
    match profile.level.points_to_next {
        Some(to_go) => {
            println_colored!(
                GREEN,
                "  {}  {} points to go",
                progress_bar(profile.level.progress(profile.points), 20),
                to_go
            );
        }
        None => println_colored!(GREEN, "  Highest level reached"),
    }

    println!();
    println_colored!(BOLD, "  Badges");
    if profile.badges.is_empty() {
        println_colored!(DIM, "  No badges yet. Start praying to earn badges!");
    } else {
        for badge in &profile.badges {
            println_colored!(AMBER, "  ★ {:<16} {}", badge.label, badge.description);
        }
    }

    println!();
    let color = if profile.current_streak > 0 { GREEN } else { DIM };
    println_colored!(color, "  {}", profile.encouragement());
    println!("  Longest streak: {}", plural_days(profile.longest_streak));
    println!();
    Ok(())
}

pub fn handle_suggest(store: &dyn Store, clock: &dyn Clock) -> Result<()> {
    let window = PrayerWindow::ending_at(store, clock.today(), SUGGESTION_DAYS)?;
    println!();
    println_colored!(GOLD, "  Smart Suggestions");
    println!();
    for suggestion in smart_suggestions(window.records()) {
        println!("  • {}", suggestion.message());
    }
    println!();
    Ok(())
}

// ─── Report ──────────────────────────────────────────────────────────────────

pub fn handle_report(
    store: &dyn Store,
    clock: &dyn Clock,
    period: &str,
    date: Option<&str>,
    save: Option<&Path>,
) -> Result<()> {
    let period = ReportPeriod::from_str(period)?;
    let date = resolve_date(date, clock)?;
    let report = Report::build(store, period, date)?;
    let text = report.render();

    match save {
        None => print!("{}", text),
        Some(dir) => {
            std::fs::create_dir_all(dir).with_context(|| format!("Creating {:?}", dir))?;
            let path = dir.join(report.file_name());
            std::fs::write(&path, text).with_context(|| format!("Writing {:?}", path))?;
            println_colored!(GREEN, "  ✓ Report saved to {}", path.display());
        }
    }
    Ok(())
}

// ─── Times ───────────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct TimesSummary<'a> {
    location: &'a str,
    date: NaiveDate,
    hijri: Option<String>,
    times: DayTimes,
    next_prayer: PrayerName,
    seconds_until_next: i64,
    reminders: Vec<Reminder>,
}

pub fn handle_times(config: &AppConfig, clock: &dyn Clock, json: bool) -> Result<()> {
    let today = clock.today();
    let now = Local::now().time();
    let provider = PrayerTimesProvider::new(&config.location, &config.reminders.fallback_times);
    let times = provider.times_for(today);

    if json {
        let (next_prayer, seconds_until_next) = provider.next_prayer(today, now);
        let reminders = if config.reminders.enabled {
            upcoming_reminders(&times, now, config.reminders.lead_minutes)
        } else {
            Vec::new()
        };
        let summary = TimesSummary {
            location: &config.location.name,
            date: today,
            hijri: hijri_string(today, config.location.hijri_offset),
            times,
            next_prayer,
            seconds_until_next,
            reminders,
        };
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!();
    println_colored!(GOLD, "  Prayer Times  {} ({})", config.location.name, today);
    if let Some(hijri) = hijri_string(today, config.location.hijri_offset) {
        println_colored!(AMBER, "  {}", hijri);
    }
    if times.source == TimeSource::Fallback {
        println_colored!(RED, "  Prayer times unavailable, showing your fallback times");
    }
    println!();

    let mut rows: Vec<(&str, chrono::NaiveTime)> = PrayerName::ALL
        .iter()
        .map(|p| (p.as_str(), times.get(*p)))
        .collect();
    if let Some(sunrise) = times.sunrise {
        rows.insert(1, ("Sunrise", sunrise));
    }
    for (name, time) in rows {
        let style = if time < now { DIM } else { BOLD };
        println_colored!(style, "  {:<10}  {}", name, time.format("%H:%M"));
    }

    let (next, secs) = provider.next_prayer(today, now);
    println!();
    println_colored!(AMBER, "  Next: {} in {}", next, format_duration_secs(secs));

    if config.reminders.enabled {
        let reminders = upcoming_reminders(&times, now, config.reminders.lead_minutes);
        if !reminders.is_empty() {
            println!();
            println_colored!(DIM, "  Reminders");
            for r in reminders {
                println!(
                    "  {:<10}  {} for {} (in {})",
                    r.prayer.as_str(),
                    r.remind_at.format("%H:%M"),
                    r.prayer_time.format("%H:%M"),
                    format_duration_secs(r.secs_until)
                );
            }
        }
    }
    println!();
    Ok(())
}

// ─── Location ────────────────────────────────────────────────────────────────

pub struct LocationUpdate {
    pub name: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub method: Option<String>,
    pub madhab: Option<String>,
    pub tz: Option<String>,
}

pub fn handle_location(config: &mut AppConfig, update: LocationUpdate) -> Result<()> {
    let location = &mut config.location;
    if let Some(name) = update.name {
        location.name = name;
    }
    if let Some(lat) = update.lat {
        if !(-90.0..=90.0).contains(&lat) {
            bail!("Latitude must be between -90 and 90");
        }
        location.latitude = lat;
    }
    if let Some(lng) = update.lng {
        if !(-180.0..=180.0).contains(&lng) {
            bail!("Longitude must be between -180 and 180");
        }
        location.longitude = lng;
    }
    if let Some(method) = update.method {
        if !CALC_METHODS.contains(&method.as_str()) {
            bail!("Unknown method '{}'. Use one of: {}", method, CALC_METHODS.join(", "));
        }
        location.calc_method = method;
    }
    if let Some(madhab) = update.madhab {
        if !matches!(madhab.as_str(), "Hanafi" | "Shafi" | "Shafi'i") {
            bail!("Unknown madhab '{}'. Use: Hanafi, Shafi", madhab);
        }
        location.madhab = madhab;
    }
    if let Some(tz) = update.tz {
        location.timezone_offset =
            parse_tz_offset(&tz).with_context(|| format!("Invalid UTC offset '{}'", tz))?;
    }

    config.save()?;
    let location = &config.location;
    println_colored!(
        GREEN,
        "  ✓ Location set to {} ({:.4}, {:.4}), {} / {}, UTC{}",
        location.name,
        location.latitude,
        location.longitude,
        location.calc_method,
        location.madhab,
        format_tz_offset(location.timezone_offset)
    );
    Ok(())
}

// ─── Data ────────────────────────────────────────────────────────────────────

pub fn handle_export(store: &dyn Store, output: Option<&Path>) -> Result<()> {
    let json = RecordRepo::export_all(store)?;
    match output {
        None => println!("{}", json),
        Some(path) => {
            std::fs::write(path, json).with_context(|| format!("Writing {:?}", path))?;
            println_colored!(GREEN, "  ✓ Data exported to {}", path.display());
        }
    }
    Ok(())
}

pub fn handle_import(store: &dyn Store, path: &Path) -> Result<()> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("Reading {:?}", path))?;
    let count = RecordRepo::import_all(store, &content)?;
    println_colored!(GREEN, "  ✓ Imported {} entries", count);
    Ok(())
}

pub fn handle_reset(store: &dyn Store, yes: bool) -> Result<()> {
    if !yes {
        println_colored!(AMBER, "  This deletes every logged prayer. Re-run with --yes to confirm.");
        return Ok(());
    }
    RecordRepo::reset(store)?;
    println_colored!(RED, "  All prayer data deleted");
    Ok(())
}

// ─── Helpers ─────────────────────────────────────────────────────────────────

/// Parse a UTC offset string into total minutes.
/// Accepts: "5:30", "+5:30", "-5:30", "5", "+5", "5.5"
fn parse_tz_offset(s: &str) -> Result<i32> {
    let s = s.trim_start_matches('+');
    let negative = s.starts_with('-');
    let s = s.trim_start_matches('-');
    let sign = if negative { -1 } else { 1 };

    let minutes = if let Some((hours, mins)) = s.split_once(':') {
        let hours: i32 = hours.parse()?;
        let mins: i32 = mins.parse()?;
        hours * 60 + mins
    } else if s.contains('.') {
        let hours: f64 = s.parse()?;
        (hours * 60.0).round() as i32
    } else {
        let hours: i32 = s.parse()?;
        hours * 60
    };

    if minutes > 14 * 60 {
        bail!("Offset out of range");
    }
    Ok(sign * minutes)
}

/// Format total minutes as "+H:MM" string
fn format_tz_offset(minutes: i32) -> String {
    let sign = if minutes < 0 { "-" } else { "+" };
    let abs = minutes.abs();
    let h = abs / 60;
    let m = abs % 60;
    if m == 0 {
        format!("{}{}", sign, h)
    } else {
        format!("{}{}:{:02}", sign, h, m)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::window::FixedClock;
    use crate::store::MemoryStore;

    fn clock() -> FixedClock {
        FixedClock(NaiveDate::from_ymd_opt(2026, 10, 16).unwrap())
    }

    #[test]
    fn tz_offsets_parse_in_every_accepted_form() {
        assert_eq!(parse_tz_offset("5").unwrap(), 300);
        assert_eq!(parse_tz_offset("+5:30").unwrap(), 330);
        assert_eq!(parse_tz_offset("-4").unwrap(), -240);
        assert_eq!(parse_tz_offset("5.75").unwrap(), 345);
        assert!(parse_tz_offset("abc").is_err());
        assert!(parse_tz_offset("20").is_err());
        assert_eq!(format_tz_offset(330), "+5:30");
        assert_eq!(format_tz_offset(-240), "-4");
    }

    #[test]
    fn dates_default_to_today_and_reject_the_future() {
        let clock = clock();
        assert_eq!(resolve_date(None, &clock).unwrap(), clock.today());
        assert_eq!(
            resolve_date(Some("2026-01-31"), &clock).unwrap(),
            NaiveDate::from_ymd_opt(2026, 1, 31).unwrap()
        );
        assert!(resolve_date(Some("2026-10-17"), &clock).is_err());
        assert!(resolve_date(Some("31/01/2026"), &clock).is_err());
    }

    #[test]
    fn mark_and_clear_edit_the_requested_day() {
        let store = MemoryStore::new();
        let clock = clock();

        handle_mark(&store, &clock, "zuhr", "jamaat", None).unwrap();
        handle_mark(&store, &clock, "fajr", "alone", Some("2026-10-15")).unwrap();
        handle_clear(&store, &clock, "dhuhr", None).unwrap();

        let today = RecordRepo::load(&store, clock.today()).unwrap();
        assert!(today.statuses.is_empty());
        let yesterday = RecordRepo::load(&store, NaiveDate::from_ymd_opt(2026, 10, 15).unwrap()).unwrap();
        assert_eq!(yesterday.status(PrayerName::Fajr), Some(PrayerStatus::Alone));

        assert!(handle_mark(&store, &clock, "witr", "jamaat", None).is_err());
        assert!(handle_mark(&store, &clock, "isha", "late", None).is_err());
    }

    #[test]
    fn reset_without_confirmation_keeps_data() {
        let store = MemoryStore::new();
        let clock = clock();
        handle_note(&store, &clock, "keep me", None).unwrap();
        handle_reset(&store, false).unwrap();
        assert_eq!(store.len(), 1);
        handle_reset(&store, true).unwrap();
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn profile_counts_only_jamaat_toward_the_weekly_goal() {
        let store = MemoryStore::new();
        let clock = clock();
        handle_mark(&store, &clock, "fajr", "jamaat", None).unwrap();
        handle_mark(&store, &clock, "dhuhr", "alone", None).unwrap();
        handle_mark(&store, &clock, "isha", "jamaat", Some("2026-10-10")).unwrap();
        handle_mark(&store, &clock, "asr", "jamaat", Some("2026-10-09")).unwrap();

        let summary = profile_summary(&store, &clock, &AppConfig::default()).unwrap();
        assert_eq!(summary.jamaat_this_week, 2);
        assert_eq!(summary.weekly_goal, 15);
        assert_eq!(summary.name, "User");
        assert_eq!(summary.profile.points, 40);
    }

    #[test]
    fn profile_updates_validate_the_goal() {
        let mut config = AppConfig::default();
        assert!(!update_profile(&mut config, None, None).unwrap());
        assert!(update_profile(&mut config, Some(" Bilal ".into()), Some(20)).unwrap());
        assert_eq!(config.profile.name, "Bilal");
        assert_eq!(config.profile.weekly_goal, 20);
        assert!(update_profile(&mut config, None, Some(36)).is_err());
        assert_eq!(config.profile.weekly_goal, 20);
    }

    #[test]
    fn unknown_names_list_the_accepted_choices() {
        let err = parse_status("late").unwrap_err().to_string();
        assert!(err.contains("jamaat, alone, missed"));
        let err = parse_prayer("witr").unwrap_err().to_string();
        assert!(err.contains("fajr, dhuhr, asr, maghrib, isha"));
    }
}
