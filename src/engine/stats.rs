use crate::models::{AggregateStats, DailyProgress, DailyRecord, PrayerName, PrayerStatus};

/// Count the prayer entries present in `records`.
///
/// Only entries that were actually set contribute to `total`; an untouched
/// day adds nothing. Streaks and points treat unset prayers as not offered
/// instead.
pub fn prayer_stats(records: &[DailyRecord]) -> AggregateStats {
    let mut stats = AggregateStats::default();
    for day in records {
        for status in day.statuses.values() {
            stats.total += 1;
            if status.is_offered() {
                stats.offered += 1;
            }
        }
    }
    stats
}

/// Offered prayers per day out of the fixed five.
pub fn daily_progress(records: &[DailyRecord]) -> Vec<DailyProgress> {
    records
        .iter()
        .map(|day| DailyProgress {
            date: day.date,
            offered: day.offered_count(),
            total: PrayerName::ALL.len() as u32,
        })
        .collect()
}

/// Prayers offered in congregation. Praying alone doesn't count toward the
/// weekly goal.
pub fn jamaat_count(records: &[DailyRecord]) -> u32 {
    records
        .iter()
        .flat_map(|day| day.statuses.values())
        .filter(|status| **status == PrayerStatus::Jamaat)
        .count() as u32
}

/// Days with at least one prayer logged.
pub fn logged_days(records: &[DailyRecord]) -> u32 {
    records.iter().filter(|d| d.is_logged()).count() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::testutil::{date, days, full_day};

    #[test]
    fn empty_window_has_no_totals() {
        let records = days(&[false; 30]);
        assert_eq!(prayer_stats(&records), AggregateStats { total: 0, offered: 0 });
        assert_eq!(logged_days(&records), 0);
    }

    #[test]
    fn only_present_entries_are_counted() {
        let mut partial = DailyRecord::empty(date(1));
        partial.statuses.insert(PrayerName::Fajr, PrayerStatus::Alone);
        partial.statuses.insert(PrayerName::Asr, PrayerStatus::Missed);

        let records = vec![full_day(0), partial];
        let stats = prayer_stats(&records);

        assert_eq!(stats.total, 7);
        assert_eq!(stats.offered, 6);
        assert_eq!(stats.missed(), 1);
        assert_eq!(logged_days(&records), 2);
    }

    #[test]
    fn progress_uses_the_fixed_five() {
        let mut partial = DailyRecord::empty(date(1));
        partial.statuses.insert(PrayerName::Dhuhr, PrayerStatus::Jamaat);

        let progress = daily_progress(&[full_day(0), partial, DailyRecord::empty(date(2))]);
        let offered: Vec<u32> = progress.iter().map(|p| p.offered).collect();

        assert_eq!(offered, vec![5, 1, 0]);
        assert!(progress.iter().all(|p| p.total == 5));
    }

    #[test]
    fn repeated_evaluation_is_stable() {
        let records = days(&[true, false, true, true]);
        assert_eq!(prayer_stats(&records), prayer_stats(&records));
        assert_eq!(daily_progress(&records), daily_progress(&records));
    }

    #[test]
    fn jamaat_count_ignores_prayers_offered_alone() {
        let mut mixed = DailyRecord::empty(date(1));
        mixed.statuses.insert(PrayerName::Fajr, PrayerStatus::Alone);
        mixed.statuses.insert(PrayerName::Dhuhr, PrayerStatus::Jamaat);
        mixed.statuses.insert(PrayerName::Isha, PrayerStatus::Missed);

        assert_eq!(jamaat_count(&[full_day(0), mixed]), 6);
        assert_eq!(jamaat_count(&days(&[false; 7])), 0);
    }
}
