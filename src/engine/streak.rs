use crate::models::{DailyRecord, StreakState};

/// Consecutive fully offered days, counting back from the newest record.
pub fn current_streak(records: &[DailyRecord]) -> u32 {
    records
        .iter()
        .rev()
        .take_while(|day| day.all_offered())
        .count() as u32
}

/// Longest run of fully offered days anywhere in `records`.
pub fn longest_streak(records: &[DailyRecord]) -> u32 {
    let mut best = 0u32;
    let mut run = 0u32;
    for day in records {
        if day.all_offered() {
            run += 1;
            best = best.max(run);
        } else {
            run = 0;
        }
    }
    best
}

pub fn streak_state(records: &[DailyRecord]) -> StreakState {
    StreakState {
        current: current_streak(records),
        longest: longest_streak(records),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::testutil::{date, days, full_day};
    use crate::models::{PrayerName, PrayerStatus};

    #[test]
    fn empty_days_have_no_streak() {
        let records = days(&[false; 10]);
        assert_eq!(streak_state(&records), StreakState { current: 0, longest: 0 });
        assert_eq!(streak_state(&[]), StreakState::default());
    }

    #[test]
    fn fully_offered_window_streaks_its_whole_length() {
        let records = days(&[true; 12]);
        assert_eq!(current_streak(&records), 12);
        assert_eq!(longest_streak(&records), 12);
    }

    #[test]
    fn a_single_gap_caps_both_streaks() {
        let n = 10usize;
        for k in 0..n {
            let mut pattern = vec![true; n];
            pattern[k] = false;
            let records = days(&pattern);

            assert_eq!(current_streak(&records), (n - k - 1) as u32, "gap at {}", k);
            assert_eq!(
                longest_streak(&records),
                k.max(n - k - 1) as u32,
                "gap at {}",
                k
            );
        }
    }

    #[test]
    fn four_of_five_breaks_the_streak() {
        let mut almost = full_day(2);
        almost.statuses.insert(PrayerName::Isha, PrayerStatus::Missed);
        let mut unset = full_day(3);
        unset.statuses.remove(&PrayerName::Fajr);

        assert_eq!(current_streak(&[full_day(0), full_day(1), almost]), 0);
        assert_eq!(current_streak(&[full_day(1), unset]), 0);
    }

    #[test]
    fn alone_counts_like_jamaat() {
        let mut day = full_day(0);
        for p in PrayerName::ALL {
            day.statuses.insert(p, PrayerStatus::Alone);
        }
        let mut next = DailyRecord::empty(date(1));
        next.statuses = full_day(1).statuses;
        assert_eq!(current_streak(&[day, next]), 2);
    }

    #[test]
    fn longest_run_can_sit_in_the_middle() {
        let records = days(&[true, false, true, true, true, false, true]);
        assert_eq!(streak_state(&records), StreakState { current: 1, longest: 3 });
    }
}
