use serde::Serialize;

use crate::engine::achievements::{year_achievements, Achievement};
use crate::engine::streak::streak_state;
use crate::models::DailyRecord;

pub const POINTS_PER_PRAYER: u32 = 10;

/// Minimum points for each level, ascending. Index 0 is level 1.
pub const LEVEL_THRESHOLDS: [u32; 6] = [0, 100, 250, 500, 1000, 2000];

/// Ten points for every offered prayer among the daily five.
pub fn points(records: &[DailyRecord]) -> u32 {
    records
        .iter()
        .map(|day| day.offered_count() * POINTS_PER_PRAYER)
        .sum()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Level {
    /// Zero-based position in the ladder.
    pub index: usize,
    /// Points needed to reach the next level, `None` at the top.
    pub next_at: Option<u32>,
    pub points_to_next: Option<u32>,
}

impl Level {
    /// The highest level whose threshold is at or below `points`.
    pub fn for_points(points: u32) -> Self {
        let index = LEVEL_THRESHOLDS
            .partition_point(|threshold| *threshold <= points)
            .saturating_sub(1);
        let next_at = LEVEL_THRESHOLDS.get(index + 1).copied();
        Self {
            index,
            next_at,
            points_to_next: next_at.map(|next| next - points),
        }
    }

    /// One-based level for display.
    pub fn number(&self) -> usize {
        self.index + 1
    }

    pub fn is_max(&self) -> bool {
        self.next_at.is_none()
    }

    /// Fraction of the way from this level's threshold to the next.
    pub fn progress(&self, points: u32) -> f64 {
        match self.next_at {
            None => 1.0,
            Some(next) => {
                let floor = LEVEL_THRESHOLDS[self.index];
                (points - floor) as f64 / (next - floor) as f64
            }
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GamificationProfile {
    pub points: u32,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub badges: Vec<&'static Achievement>,
    pub level: Level,
}

impl GamificationProfile {
    /// Build the profile from a window, normally the last year.
    pub fn build(records: &[DailyRecord]) -> Self {
        let points = points(records);
        let streak = streak_state(records);
        Self {
            points,
            current_streak: streak.current,
            longest_streak: streak.longest,
            badges: year_achievements(records),
            level: Level::for_points(points),
        }
    }

    pub fn encouragement(&self) -> String {
        if self.current_streak > 0 {
            format!(
                "Keep it up! You have a {}-day streak. Don't break it!",
                self.current_streak
            )
        } else {
            "Start a streak by offering all prayers today!".to_string()
        }
    }
}
