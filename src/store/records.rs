use anyhow::{anyhow, Context, Result};
use chrono::NaiveDate;
use log::{debug, warn};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::models::{DailyRecord, DayEntry, PrayerName, PrayerStatus};
use crate::store::Store;

/// Keys holding settings rather than prayer data. Never exported.
pub const SETTINGS_KEYS: &[&str] = &[
    "darkMode",
    "notifications",
    "prayerTimes",
    "language",
    "profile",
    "sound",
    "accent",
];

pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub struct RecordRepo;

impl RecordRepo {
    /// Load one day. A missing or unreadable entry yields an empty record.
    pub fn load(store: &dyn Store, date: NaiveDate) -> Result<DailyRecord> {
        let key = date_key(date);
        let raw = store
            .get(&key)
            .with_context(|| format!("Reading record for {}", key))?;

        let Some(raw) = raw else {
            return Ok(DailyRecord::empty(date));
        };

        match serde_json::from_str::<DayEntry>(&raw) {
            Ok(entry) => Ok(DailyRecord::from_entry(date, entry)),
            Err(e) => {
                warn!("ignoring malformed record at {}: {}", key, e);
                Ok(DailyRecord::empty(date))
            }
        }
    }

    pub fn save(store: &dyn Store, record: &DailyRecord) -> Result<()> {
        let key = date_key(record.date);
        let value = serde_json::to_string(&record.to_entry()).context("Serializing record")?;
        store
            .set(&key, &value)
            .with_context(|| format!("Writing record for {}", key))?;
        debug!("saved {}: {}", key, value);
        Ok(())
    }

    /// Set or clear (`None`) a prayer's status and persist the day.
    pub fn set_status(
        store: &dyn Store,
        date: NaiveDate,
        prayer: PrayerName,
        status: Option<PrayerStatus>,
    ) -> Result<DailyRecord> {
        let mut record = Self::load(store, date)?;
        match status {
            Some(s) => {
                record.statuses.insert(prayer, s);
            }
            None => {
                record.statuses.remove(&prayer);
            }
        }
        Self::save(store, &record)?;
        Ok(record)
    }

    pub fn set_note(store: &dyn Store, date: NaiveDate, note: &str) -> Result<DailyRecord> {
        let mut record = Self::load(store, date)?;
        record.note = note.to_string();
        Self::save(store, &record)?;
        Ok(record)
    }

    /// Every non-settings key with its raw value, as pretty JSON.
    pub fn export_all(store: &dyn Store) -> Result<String> {
        let mut data = BTreeMap::new();
        for key in store.keys().context("Listing stored keys")? {
            if SETTINGS_KEYS.contains(&key.as_str()) {
                continue;
            }
            if let Some(value) = store.get(&key)? {
                data.insert(key, value);
            }
        }
        serde_json::to_string_pretty(&data).context("Serializing export")
    }

    /// Write back every key of an export verbatim. Returns the number of keys.
    ///
    /// The whole document is validated before anything is written, so a bad
    /// file leaves the store untouched.
    pub fn import_all(store: &dyn Store, json: &str) -> Result<usize> {
        let value: Value = serde_json::from_str(json).context("Parsing import file")?;
        let Value::Object(map) = value else {
            return Err(anyhow!("Import file must contain a JSON object"));
        };

        let entries: Vec<(String, String)> = map
            .into_iter()
            .map(|(key, value)| match value {
                Value::String(s) => (key, s),
                other => (key, other.to_string()),
            })
            .collect();

        for (key, value) in &entries {
            store
                .set(key, value)
                .with_context(|| format!("Importing key {}", key))?;
        }
        Ok(entries.len())
    }

    pub fn reset(store: &dyn Store) -> Result<()> {
        store.clear().context("Clearing stored data")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 4, day).unwrap()
    }

    #[test]
    fn missing_day_loads_as_empty_record() {
        let store = MemoryStore::new();
        let record = RecordRepo::load(&store, d(3)).unwrap();
        assert_eq!(record, DailyRecord::empty(d(3)));
    }

    #[test]
    fn malformed_value_loads_as_empty_record() {
        let store = MemoryStore::new();
        store.set("2026-04-03", "not json").unwrap();
        let record = RecordRepo::load(&store, d(3)).unwrap();
        assert!(!record.is_logged());
    }

    #[test]
    fn status_and_note_are_persisted_under_the_date_key() {
        let store = MemoryStore::new();
        RecordRepo::set_status(&store, d(5), PrayerName::Fajr, Some(PrayerStatus::Jamaat)).unwrap();
        RecordRepo::set_note(&store, d(5), "woke up early").unwrap();

        let raw = store.get("2026-04-05").unwrap().unwrap();
        let value: Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["statuses"]["Fajr"], "Jamaat");
        assert_eq!(value["note"], "woke up early");

        let cleared = RecordRepo::set_status(&store, d(5), PrayerName::Fajr, None).unwrap();
        assert!(cleared.statuses.is_empty());
        assert_eq!(cleared.note, "woke up early");
    }

    #[test]
    fn export_skips_settings_and_round_trips_into_empty_store() {
        let source = MemoryStore::new();
        RecordRepo::set_status(&source, d(1), PrayerName::Isha, Some(PrayerStatus::Alone)).unwrap();
        RecordRepo::set_status(&source, d(2), PrayerName::Asr, Some(PrayerStatus::Missed)).unwrap();
        RecordRepo::set_note(&source, d(2), "travelling").unwrap();
        source.set("darkMode", "true").unwrap();

        let exported = RecordRepo::export_all(&source).unwrap();
        assert!(!exported.contains("darkMode"));

        let target = MemoryStore::new();
        let written = RecordRepo::import_all(&target, &exported).unwrap();
        assert_eq!(written, 2);
        assert_eq!(target.len(), 2);

        for day in [d(1), d(2), d(3)] {
            assert_eq!(
                RecordRepo::load(&target, day).unwrap(),
                RecordRepo::load(&source, day).unwrap()
            );
        }
    }

    #[test]
    fn import_rejects_non_object_without_writing() {
        let store = MemoryStore::new();
        assert!(RecordRepo::import_all(&store, "[1, 2]").is_err());
        assert!(RecordRepo::import_all(&store, "{").is_err());
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn reset_removes_everything() {
        let store = MemoryStore::new();
        RecordRepo::set_note(&store, d(9), "x").unwrap();
        store.set("profile", "{}").unwrap();
        RecordRepo::reset(&store).unwrap();
        assert!(store.keys().unwrap().is_empty());
    }
}
