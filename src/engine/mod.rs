//! Pure aggregation over windows of daily prayer records.
//!
//! Nothing in here writes to the store or reads the wall clock; callers pass
//! the reference date explicitly (see [`window::Clock`]).

pub mod achievements;
pub mod gamification;
pub mod report;
pub mod stats;
pub mod streak;
pub mod suggestions;
pub mod window;

pub use achievements::{recent_achievements, year_achievements, Achievement};
pub use gamification::GamificationProfile;
pub use window::{Clock, PrayerWindow, SystemClock};

/// Days covered by the gamification profile and the year badge catalog.
pub const YEAR_DAYS: u32 = 365;

/// Days covered by the progress chart.
pub const CHART_DAYS: u32 = 7;

#[cfg(test)]
pub(crate) mod testutil {
    use chrono::{Duration, NaiveDate};

    use crate::models::{DailyRecord, PrayerName, PrayerStatus};

    pub fn date(offset: i64) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 1).unwrap() + Duration::days(offset)
    }

    pub fn full_day(offset: i64) -> DailyRecord {
        let mut record = DailyRecord::empty(date(offset));
        for p in PrayerName::ALL {
            record.statuses.insert(p, PrayerStatus::Jamaat);
        }
        record
    }

    /// `pattern[i]` true means every prayer offered on day i, false means an
    /// untouched day.
    pub fn days(pattern: &[bool]) -> Vec<DailyRecord> {
        pattern
            .iter()
            .enumerate()
            .map(|(i, full)| {
                if *full {
                    full_day(i as i64)
                } else {
                    DailyRecord::empty(date(i as i64))
                }
            })
            .collect()
    }
}
