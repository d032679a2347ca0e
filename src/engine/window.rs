use anyhow::{anyhow, Result};
use chrono::{Duration, Local, NaiveDate};

use crate::models::DailyRecord;
use crate::store::{RecordRepo, Store};

/// Source of "today".
pub trait Clock {
    fn today(&self) -> NaiveDate;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// A clock stuck on one date.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// Contiguous run of daily records, oldest first, with no gaps.
#[derive(Debug, Clone, PartialEq)]
pub struct PrayerWindow {
    records: Vec<DailyRecord>,
}

impl PrayerWindow {
    /// The `days` days ending at (and including) `end`.
    pub fn ending_at(store: &dyn Store, end: NaiveDate, days: u32) -> Result<Self> {
        if days == 0 {
            return Ok(Self { records: Vec::new() });
        }
        let start = end
            .checked_sub_signed(Duration::days(days as i64 - 1))
            .ok_or_else(|| anyhow!("window of {} days is out of range", days))?;
        Self::starting_at(store, start, days)
    }

    /// The `days` days beginning at `start`.
    pub fn starting_at(store: &dyn Store, start: NaiveDate, days: u32) -> Result<Self> {
        if days > 0 && start.checked_add_signed(Duration::days(days as i64 - 1)).is_none() {
            return Err(anyhow!("window of {} days is out of range", days));
        }
        let records = (0..days as i64)
            .map(|offset| RecordRepo::load(store, start + Duration::days(offset)))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { records })
    }

    pub fn records(&self) -> &[DailyRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.records.first().map(|r| r.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.records.last().map(|r| r.date)
    }

    /// The trailing `days` records.
    pub fn tail(&self, days: usize) -> &[DailyRecord] {
        let start = self.records.len().saturating_sub(days);
        &self.records[start..]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PrayerName, PrayerStatus};
    use crate::store::MemoryStore;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn window_has_exact_length_and_fills_gaps() {
        let store = MemoryStore::new();
        RecordRepo::set_status(&store, d(2026, 3, 1), PrayerName::Fajr, Some(PrayerStatus::Alone))
            .unwrap();

        let clock = FixedClock(d(2026, 3, 2));
        let window = PrayerWindow::ending_at(&store, clock.today(), 5).unwrap();

        assert_eq!(window.len(), 5);
        assert_eq!(window.first_date(), Some(d(2026, 2, 26)));
        assert_eq!(window.last_date(), Some(d(2026, 3, 2)));
        for pair in window.records().windows(2) {
            assert_eq!(pair[1].date, pair[0].date + Duration::days(1));
        }
        assert!(window.records()[3].is_logged());
        assert!(!window.records()[4].is_logged());
        assert_eq!(window.records()[4].note, "");
    }

    #[test]
    fn zero_day_window_is_empty() {
        let store = MemoryStore::new();
        let window = PrayerWindow::ending_at(&store, d(2026, 1, 1), 0).unwrap();
        assert!(window.is_empty());
        assert_eq!(window.tail(7).len(), 0);
    }

    #[test]
    fn window_past_the_calendar_range_is_an_error() {
        let store = MemoryStore::new();
        let err = PrayerWindow::ending_at(&store, d(2026, 10, 16), 200_000_000).unwrap_err();
        assert!(err.to_string().contains("out of range"));

        let err = PrayerWindow::starting_at(&store, NaiveDate::MAX, 2).unwrap_err();
        assert!(err.to_string().contains("out of range"));
    }

    #[test]
    fn tail_returns_newest_days() {
        let store = MemoryStore::new();
        let window = PrayerWindow::ending_at(&store, d(2026, 1, 10), 30).unwrap();
        let tail = window.tail(7);
        assert_eq!(tail.len(), 7);
        assert_eq!(tail[0].date, d(2026, 1, 4));
        assert_eq!(tail[6].date, d(2026, 1, 10));
    }
}
