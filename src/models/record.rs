use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::{PrayerName, PrayerStatus};

/// One calendar day of prayer activity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyRecord {
    pub date: NaiveDate,
    #[serde(default)]
    pub statuses: BTreeMap<PrayerName, PrayerStatus>,
    #[serde(default)]
    pub note: String,
}

impl DailyRecord {
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            statuses: BTreeMap::new(),
            note: String::new(),
        }
    }

    pub fn from_entry(date: NaiveDate, entry: DayEntry) -> Self {
        Self {
            date,
            statuses: entry.statuses,
            note: entry.note,
        }
    }

    pub fn status(&self, prayer: PrayerName) -> Option<PrayerStatus> {
        self.statuses.get(&prayer).copied()
    }

    /// An unset prayer counts the same as a missed one.
    pub fn is_offered(&self, prayer: PrayerName) -> bool {
        self.status(prayer).is_some_and(|s| s.is_offered())
    }

    /// Number of the five daily prayers offered on this day.
    pub fn offered_count(&self) -> u32 {
        PrayerName::ALL
            .iter()
            .filter(|p| self.is_offered(**p))
            .count() as u32
    }

    pub fn all_offered(&self) -> bool {
        PrayerName::ALL.iter().all(|p| self.is_offered(*p))
    }

    pub fn is_logged(&self) -> bool {
        !self.statuses.is_empty()
    }

    pub fn to_entry(&self) -> DayEntry {
        DayEntry {
            statuses: self.statuses.clone(),
            note: self.note.clone(),
        }
    }
}

/// The value stored under a `YYYY-MM-DD` key. The date lives in the key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DayEntry {
    #[serde(default)]
    pub statuses: BTreeMap<PrayerName, PrayerStatus>,
    #[serde(default)]
    pub note: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 1).unwrap()
    }

    #[test]
    fn unset_prayers_are_not_offered() {
        let mut record = DailyRecord::empty(day());
        record.statuses.insert(PrayerName::Fajr, PrayerStatus::Jamaat);
        record.statuses.insert(PrayerName::Asr, PrayerStatus::Missed);

        assert!(record.is_offered(PrayerName::Fajr));
        assert!(!record.is_offered(PrayerName::Asr));
        assert!(!record.is_offered(PrayerName::Isha));
        assert_eq!(record.offered_count(), 1);
        assert!(!record.all_offered());
        assert!(record.is_logged());
    }

    #[test]
    fn entry_decodes_with_missing_fields() {
        let entry: DayEntry = serde_json::from_str(r#"{"statuses":{"Isha":"Alone"}}"#).unwrap();
        assert_eq!(entry.note, "");
        assert_eq!(entry.statuses.get(&PrayerName::Isha), Some(&PrayerStatus::Alone));

        let empty: DayEntry = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, DayEntry::default());
    }
}
