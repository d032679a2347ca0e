pub mod calculator;

pub use calculator::{upcoming_reminders, DayTimes, PrayerTimesProvider, Reminder, TimeSource};
