use serde::Serialize;

use crate::engine::stats::{logged_days, prayer_stats};
use crate::engine::streak::streak_state;
use crate::models::{AggregateStats, DailyRecord, StreakState};

/// What an achievement is measured against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Threshold {
    /// At least one day with any prayer logged.
    AnyLogged,
    CurrentStreak(u32),
    LongestStreak(u32),
    Offered(u32),
}

#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct Achievement {
    pub label: &'static str,
    pub description: &'static str,
    pub threshold: Threshold,
}

/// Badges earned from a short, recent window.
pub static RECENT_CATALOG: [Achievement; 4] = [
    Achievement {
        label: "7-Day Streak",
        description: "Offered all prayers for 7 days in a row!",
        threshold: Threshold::CurrentStreak(7),
    },
    Achievement {
        label: "30-Day Streak",
        description: "Offered all prayers for 30 days in a row!",
        threshold: Threshold::CurrentStreak(30),
    },
    Achievement {
        label: "100 Prayers",
        description: "Offered 100 prayers!",
        threshold: Threshold::Offered(100),
    },
    Achievement {
        label: "365 Prayers",
        description: "Offered 365 prayers!",
        threshold: Threshold::Offered(365),
    },
];

/// Badges earned over the whole year.
pub static YEAR_CATALOG: [Achievement; 6] = [
    Achievement {
        label: "First Step",
        description: "First prayer logged",
        threshold: Threshold::AnyLogged,
    },
    Achievement {
        label: "Streak Starter",
        description: "3-day streak",
        threshold: Threshold::LongestStreak(3),
    },
    Achievement {
        label: "Consistent",
        description: "7-day streak",
        threshold: Threshold::LongestStreak(7),
    },
    Achievement {
        label: "Dedicated",
        description: "30-day streak",
        threshold: Threshold::LongestStreak(30),
    },
    Achievement {
        label: "100 Prayers",
        description: "Offered 100 prayers!",
        threshold: Threshold::Offered(100),
    },
    Achievement {
        label: "365 Prayers",
        description: "Offered 365 prayers!",
        threshold: Threshold::Offered(365),
    },
];

/// Everything a threshold can be checked against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Metrics {
    pub stats: AggregateStats,
    pub streak: StreakState,
    pub logged_days: u32,
}

impl Metrics {
    pub fn of(records: &[DailyRecord]) -> Self {
        Self {
            stats: prayer_stats(records),
            streak: streak_state(records),
            logged_days: logged_days(records),
        }
    }
}

impl Threshold {
    pub fn is_met(&self, metrics: &Metrics) -> bool {
        match *self {
            Threshold::AnyLogged => metrics.logged_days > 0,
            Threshold::CurrentStreak(n) => metrics.streak.current >= n,
            Threshold::LongestStreak(n) => metrics.streak.longest >= n,
            Threshold::Offered(n) => metrics.stats.offered >= n,
        }
    }
}

/// Catalog entries whose threshold is met, in catalog order.
pub fn evaluate(catalog: &'static [Achievement], metrics: &Metrics) -> Vec<&'static Achievement> {
    catalog
        .iter()
        .filter(|a| a.threshold.is_met(metrics))
        .collect()
}

pub fn recent_achievements(records: &[DailyRecord]) -> Vec<&'static Achievement> {
    evaluate(&RECENT_CATALOG, &Metrics::of(records))
}

pub fn year_achievements(records: &[DailyRecord]) -> Vec<&'static Achievement> {
    evaluate(&YEAR_CATALOG, &Metrics::of(records))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::testutil::{date, days, full_day};
    use crate::models::{PrayerName, PrayerStatus};

    fn labels(badges: &[&Achievement]) -> Vec<&'static str> {
        badges.iter().map(|a| a.label).collect()
    }

    #[test]
    fn nothing_logged_earns_nothing() {
        let records = days(&[false; 365]);
        assert!(year_achievements(&records).is_empty());
        assert!(recent_achievements(&records[..30]).is_empty());
    }

    #[test]
    fn one_missed_prayer_still_counts_as_a_first_step() {
        let mut day = DailyRecord::empty(date(0));
        day.statuses.insert(PrayerName::Fajr, PrayerStatus::Missed);
        assert_eq!(labels(&year_achievements(&[day])), vec!["First Step"]);
    }

    #[test]
    fn hundred_prayers_needs_exactly_one_hundred() {
        let hundred = days(&[true; 20]);
        assert!(labels(&recent_achievements(&hundred)).contains(&"100 Prayers"));

        let mut ninety_nine = days(&[true; 20]);
        ninety_nine[0].statuses.remove(&PrayerName::Isha);
        assert_eq!(prayer_stats(&ninety_nine).offered, 99);
        assert!(!labels(&recent_achievements(&ninety_nine)).contains(&"100 Prayers"));
    }

    #[test]
    fn recent_catalog_uses_the_current_streak() {
        let mut pattern = vec![true; 10];
        pattern.push(false);
        let broken = days(&pattern);
        assert!(!labels(&recent_achievements(&broken)).contains(&"7-Day Streak"));

        let ongoing = days(&[true; 7]);
        assert_eq!(labels(&recent_achievements(&ongoing)), vec!["7-Day Streak"]);
    }

    #[test]
    fn year_catalog_uses_the_longest_streak_in_order() {
        let mut pattern = vec![true; 8];
        pattern.push(false);
        let records = days(&pattern);
        assert_eq!(
            labels(&year_achievements(&records)),
            vec!["First Step", "Streak Starter", "Consistent"]
        );
    }

    #[test]
    fn full_year_earns_every_year_badge() {
        let records: Vec<DailyRecord> = (0..365).map(full_day).collect();
        assert_eq!(year_achievements(&records).len(), YEAR_CATALOG.len());
        assert_eq!(year_achievements(&records), year_achievements(&records));
    }
}
