use serde::Serialize;

use crate::models::{DailyRecord, PrayerName, PrayerStatus};

/// Days looked at when building suggestions.
pub const SUGGESTION_DAYS: u32 = 14;

const FAJR_MISSED_DAYS: u32 = 3;
const ISHA_RUN_DAYS: u32 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Suggestion {
    FajrOftenMissed { days: u32 },
    IshaRun { days: u32 },
    KeepTracking,
}

impl Suggestion {
    pub fn message(&self) -> &'static str {
        match self {
            Suggestion::FajrOftenMissed { .. } => "You often miss Fajr, try sleeping by 11 PM.",
            Suggestion::IshaRun { .. } => "Isha offered 7 days in a row! Keep it up!",
            Suggestion::KeepTracking => "Keep tracking your prayers for more tips!",
        }
    }
}

/// Days on which Fajr was explicitly marked missed. Unset days don't count.
fn fajr_missed_days(records: &[DailyRecord]) -> u32 {
    records
        .iter()
        .filter(|d| d.status(PrayerName::Fajr) == Some(PrayerStatus::Missed))
        .count() as u32
}

/// Length of the most recent run of offered Isha, ignoring trailing days
/// on which it wasn't offered.
fn latest_isha_run(records: &[DailyRecord]) -> u32 {
    records
        .iter()
        .rev()
        .skip_while(|d| !d.is_offered(PrayerName::Isha))
        .take_while(|d| d.is_offered(PrayerName::Isha))
        .count() as u32
}

pub fn smart_suggestions(records: &[DailyRecord]) -> Vec<Suggestion> {
    let mut suggestions = Vec::new();

    let missed = fajr_missed_days(records);
    if missed >= FAJR_MISSED_DAYS {
        suggestions.push(Suggestion::FajrOftenMissed { days: missed });
    }

    let run = latest_isha_run(records);
    if run >= ISHA_RUN_DAYS {
        suggestions.push(Suggestion::IshaRun { days: run });
    }

    if suggestions.is_empty() {
        suggestions.push(Suggestion::KeepTracking);
    }
    suggestions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::testutil::{date, days};

    fn with(offset: i64, prayer: PrayerName, status: PrayerStatus) -> DailyRecord {
        let mut day = DailyRecord::empty(date(offset));
        day.statuses.insert(prayer, status);
        day
    }

    #[test]
    fn quiet_history_gets_the_default_tip() {
        assert_eq!(smart_suggestions(&days(&[false; 14])), vec![Suggestion::KeepTracking]);
    }

    #[test]
    fn three_missed_fajr_trigger_the_sleep_tip() {
        let mut records = days(&[false; 14]);
        for i in [2, 6, 11] {
            records[i] = with(i as i64, PrayerName::Fajr, PrayerStatus::Missed);
        }
        assert_eq!(
            smart_suggestions(&records),
            vec![Suggestion::FajrOftenMissed { days: 3 }]
        );

        records[6] = DailyRecord::empty(date(6));
        assert_eq!(smart_suggestions(&records), vec![Suggestion::KeepTracking]);
    }

    #[test]
    fn isha_run_may_end_before_today() {
        let mut records = days(&[false; 14]);
        for (i, slot) in records.iter_mut().enumerate().take(11).skip(4) {
            *slot = with(i as i64, PrayerName::Isha, PrayerStatus::Alone);
        }
        assert_eq!(
            smart_suggestions(&records),
            vec![Suggestion::IshaRun { days: 7 }]
        );
    }

    #[test]
    fn broken_isha_run_only_counts_the_latest_part() {
        let mut records = days(&[false; 14]);
        for i in 0..14 {
            if i != 9 {
                records[i] = with(i as i64, PrayerName::Isha, PrayerStatus::Jamaat);
            }
        }
        assert_eq!(latest_isha_run(&records), 4);
        assert_eq!(smart_suggestions(&records), vec![Suggestion::KeepTracking]);
    }
}
