use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Counts over the prayer entries present in a set of records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateStats {
    pub total: u32,
    pub offered: u32,
}

impl AggregateStats {
    pub fn missed(&self) -> u32 {
        self.total - self.offered
    }

    pub fn completion_ratio(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.offered as f64 / self.total as f64
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakState {
    /// Run of fully offered days ending at the newest day.
    pub current: u32,
    pub longest: u32,
}

/// One bar of the progress chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyProgress {
    pub date: NaiveDate,
    pub offered: u32,
    pub total: u32,
}
