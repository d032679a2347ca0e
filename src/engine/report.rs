use anyhow::{anyhow, Result};
use chrono::{Datelike, Months, NaiveDate};
use std::fmt;
use std::str::FromStr;

use crate::engine::stats::prayer_stats;
use crate::engine::window::PrayerWindow;
use crate::models::{AggregateStats, PrayerName};
use crate::store::Store;
use crate::utils::format::plural_days;

const QUOTES: &[&str] = &[
    "Indeed, prayer prohibits immorality and wrongdoing. (Quran 29:45)",
    "The key to Paradise is prayer. (Hadith)",
    "Verily, the prayer keeps one from the great sins and evil deeds. (Quran 29:45)",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportPeriod {
    Week,
    Month,
}

impl ReportPeriod {
    pub fn label(&self) -> &'static str {
        match self {
            ReportPeriod::Week => "Week",
            ReportPeriod::Month => "Month",
        }
    }

    /// First day and length of the period containing `date`. Weeks start on
    /// Sunday.
    pub fn range(&self, date: NaiveDate) -> (NaiveDate, u32) {
        match self {
            ReportPeriod::Week => {
                let offset = date.weekday().num_days_from_sunday() as i64;
                (date - chrono::Duration::days(offset), 7)
            }
            ReportPeriod::Month => {
                let start = date.with_day(1).unwrap_or(date);
                let days = start
                    .checked_add_months(Months::new(1))
                    .map(|next| (next - start).num_days() as u32)
                    .unwrap_or(31);
                (start, days)
            }
        }
    }
}

impl FromStr for ReportPeriod {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "week" | "weekly" => Ok(ReportPeriod::Week),
            "month" | "monthly" => Ok(ReportPeriod::Month),
            _ => Err(anyhow!("Unknown report period '{}'. Use: week, month", s)),
        }
    }
}

/// A printable summary of one week or month.
#[derive(Debug, Clone)]
pub struct Report {
    pub period: ReportPeriod,
    pub window: PrayerWindow,
    pub stats: AggregateStats,
}

impl Report {
    pub fn build(store: &dyn Store, period: ReportPeriod, date: NaiveDate) -> Result<Self> {
        let (start, days) = period.range(date);
        let window = PrayerWindow::starting_at(store, start, days)?;
        let stats = prayer_stats(window.records());
        Ok(Self {
            period,
            window,
            stats,
        })
    }

    pub fn file_name(&self) -> String {
        let start = self
            .window
            .first_date()
            .map(|d| d.to_string())
            .unwrap_or_default();
        format!(
            "namaz_report_{}_{}.txt",
            self.period.label().to_lowercase(),
            start
        )
    }

    fn quote(&self) -> &'static str {
        let seed = self.window.first_date().map(|d| d.ordinal()).unwrap_or(0) as usize;
        QUOTES[seed % QUOTES.len()]
    }

    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let first = self.window.first_date().map(|d| d.to_string()).unwrap_or_default();
        let last = self.window.last_date().map(|d| d.to_string()).unwrap_or_default();

        writeln!(f, "Namaz Activity Report ({})", self.period.label())?;
        writeln!(
            f,
            "From: {}  To: {}  ({})",
            first,
            last,
            plural_days(self.window.len() as u32)
        )?;
        writeln!(
            f,
            "Total Prayers Offered: {} / {}",
            self.stats.offered, self.stats.total
        )?;
        writeln!(f)?;

        write!(f, "{:<12}", "Date")?;
        for prayer in PrayerName::ALL {
            write!(f, "{:<9}", prayer.as_str())?;
        }
        writeln!(f, "Note")?;

        for day in self.window.records() {
            write!(f, "{:<12}", day.date.to_string())?;
            for prayer in PrayerName::ALL {
                let status = day.status(prayer).map(|s| s.as_str()).unwrap_or("-");
                write!(f, "{:<9}", status)?;
            }
            let note = if day.note.is_empty() { "-" } else { day.note.as_str() };
            writeln!(f, "{}", note)?;
        }

        writeln!(f)?;
        writeln!(f, "Quote: {}", self.quote())?;
        writeln!(f)?;
        writeln!(f, "Signature: ______________________")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PrayerStatus;
    use crate::store::{MemoryStore, RecordRepo};

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn weeks_start_on_sunday() {
        // 2026-10-16 is a Friday
        assert_eq!(ReportPeriod::Week.range(d(2026, 10, 16)), (d(2026, 10, 11), 7));
        assert_eq!(ReportPeriod::Week.range(d(2026, 10, 11)), (d(2026, 10, 11), 7));
    }

    #[test]
    fn months_cover_their_full_length() {
        assert_eq!(ReportPeriod::Month.range(d(2026, 2, 14)), (d(2026, 2, 1), 28));
        assert_eq!(ReportPeriod::Month.range(d(2028, 2, 29)), (d(2028, 2, 1), 29));
        assert_eq!(ReportPeriod::Month.range(d(2026, 12, 31)), (d(2026, 12, 1), 31));
    }

    #[test]
    fn period_parses_case_insensitively() {
        assert_eq!("Week".parse::<ReportPeriod>().unwrap(), ReportPeriod::Week);
        assert_eq!("monthly".parse::<ReportPeriod>().unwrap(), ReportPeriod::Month);
        assert!("year".parse::<ReportPeriod>().is_err());
    }

    #[test]
    fn report_lists_every_day_with_dashes_for_gaps() {
        let store = MemoryStore::new();
        RecordRepo::set_status(&store, d(2026, 10, 12), PrayerName::Fajr, Some(PrayerStatus::Jamaat))
            .unwrap();
        RecordRepo::set_status(&store, d(2026, 10, 12), PrayerName::Asr, Some(PrayerStatus::Missed))
            .unwrap();
        RecordRepo::set_note(&store, d(2026, 10, 12), "busy day").unwrap();

        let report = Report::build(&store, ReportPeriod::Week, d(2026, 10, 16)).unwrap();
        assert_eq!(report.window.len(), 7);
        assert_eq!(report.stats, AggregateStats { total: 2, offered: 1 });
        assert_eq!(report.file_name(), "namaz_report_week_2026-10-11.txt");

        let text = report.render();
        assert!(text.contains("From: 2026-10-11  To: 2026-10-17"));
        assert!(text.contains("Total Prayers Offered: 1 / 2"));
        let row = text.lines().find(|l| l.starts_with("2026-10-12")).unwrap();
        assert!(row.contains("Jamaat"));
        assert!(row.contains("Missed"));
        assert!(row.ends_with("busy day"));
        let empty_row = text.lines().find(|l| l.starts_with("2026-10-13")).unwrap();
        assert!(empty_row.trim_end().ends_with('-'));
        assert!(text.contains("Signature:"));
    }

    #[test]
    fn report_text_has_one_row_per_day_between_header_and_quote() {
        let store = MemoryStore::new();
        let report = Report::build(&store, ReportPeriod::Month, d(2026, 2, 10)).unwrap();
        let text = report.to_string();

        assert!(text.contains("(28 days)"));
        let rows = text.lines().filter(|l| l.starts_with("2026-02-")).count();
        assert_eq!(rows, 28);
        assert!(text.trim_end().ends_with("Signature: ______________________"));
    }
}
