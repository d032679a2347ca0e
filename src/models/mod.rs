pub mod prayer;
pub mod record;
pub mod stats;

pub use prayer::{PrayerName, PrayerStatus};
pub use record::{DailyRecord, DayEntry};
pub use stats::{AggregateStats, DailyProgress, StreakState};
