use anyhow::{bail, Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::models::PrayerName;

fn default_latitude() -> f64 {
    21.4225
}
fn default_longitude() -> f64 {
    39.8262
}
fn default_location_name() -> String {
    "Makkah".to_string()
}
fn default_calc_method() -> String {
    "NorthAmerica".to_string()
}
fn default_madhab() -> String {
    "Shafi".to_string()
}
fn default_timezone_offset() -> i32 {
    180
}
fn default_hijri_offset() -> i32 {
    0
}
fn default_lead_minutes() -> i64 {
    10
}
/// Longest progress window accepted from config or `--days`.
pub const MAX_WINDOW_DAYS: u32 = 36_500;

fn default_window_days() -> u32 {
    30
}
fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationConfig {
    #[serde(default = "default_location_name")]
    pub name: String,
    #[serde(default = "default_latitude")]
    pub latitude: f64,
    #[serde(default = "default_longitude")]
    pub longitude: f64,
    #[serde(default = "default_calc_method")]
    pub calc_method: String,
    #[serde(default = "default_madhab")]
    pub madhab: String,
    #[serde(default = "default_timezone_offset")]
    pub timezone_offset: i32, // minutes from UTC
    /// Days to add/subtract from the Hijri date for local moon sighting.
    #[serde(default = "default_hijri_offset")]
    pub hijri_offset: i32,
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            name: default_location_name(),
            latitude: default_latitude(),
            longitude: default_longitude(),
            calc_method: default_calc_method(),
            madhab: default_madhab(),
            timezone_offset: default_timezone_offset(),
            hijri_offset: default_hijri_offset(),
        }
    }
}

fn default_fajr() -> String {
    "05:00".to_string()
}
fn default_dhuhr() -> String {
    "13:00".to_string()
}
fn default_asr() -> String {
    "16:30".to_string()
}
fn default_maghrib() -> String {
    "19:00".to_string()
}
fn default_isha() -> String {
    "20:30".to_string()
}

/// Times (`HH:MM`) used when they cannot be calculated for the location.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FallbackTimes {
    #[serde(default = "default_fajr")]
    pub fajr: String,
    #[serde(default = "default_dhuhr")]
    pub dhuhr: String,
    #[serde(default = "default_asr")]
    pub asr: String,
    #[serde(default = "default_maghrib")]
    pub maghrib: String,
    #[serde(default = "default_isha")]
    pub isha: String,
}

impl FallbackTimes {
    pub fn get(&self, prayer: PrayerName) -> &str {
        match prayer {
            PrayerName::Fajr => &self.fajr,
            PrayerName::Dhuhr => &self.dhuhr,
            PrayerName::Asr => &self.asr,
            PrayerName::Maghrib => &self.maghrib,
            PrayerName::Isha => &self.isha,
        }
    }
}

impl Default for FallbackTimes {
    fn default() -> Self {
        Self {
            fajr: default_fajr(),
            dhuhr: default_dhuhr(),
            asr: default_asr(),
            maghrib: default_maghrib(),
            isha: default_isha(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReminderConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// How long before each prayer the reminder fires.
    #[serde(default = "default_lead_minutes")]
    pub lead_minutes: i64,
    #[serde(default)]
    pub fallback_times: FallbackTimes,
}

impl Default for ReminderConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            lead_minutes: default_lead_minutes(),
            fallback_times: FallbackTimes::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressConfig {
    /// Days covered by the progress view's stats, streak and badges.
    #[serde(default = "default_window_days")]
    pub window_days: u32,
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            window_days: default_window_days(),
        }
    }
}

/// Most Jamaat prayers possible in a week.
pub const MAX_WEEKLY_GOAL: u32 = 35;

fn default_weekly_goal() -> u32 {
    15
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileConfig {
    /// Shown in the greeting. Empty means "User".
    #[serde(default)]
    pub name: String,
    /// Jamaat prayers aimed for over the last seven days.
    #[serde(default = "default_weekly_goal")]
    pub weekly_goal: u32,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            weekly_goal: default_weekly_goal(),
        }
    }
}

impl ProfileConfig {
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            "User"
        } else {
            self.name.trim()
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub location: LocationConfig,
    #[serde(default)]
    pub reminders: ReminderConfig,
    #[serde(default)]
    pub progress: ProgressConfig,
    #[serde(default)]
    pub profile: ProfileConfig,
}

impl AppConfig {
    fn project_dirs() -> Result<ProjectDirs> {
        ProjectDirs::from("", "", "namaz").context("Could not determine project directories")
    }

    pub fn config_path() -> Result<PathBuf> {
        let dirs = Self::project_dirs()?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    pub fn data_dir() -> Result<PathBuf> {
        let dirs = Self::project_dirs()?;
        Ok(dirs.data_dir().to_path_buf())
    }

    pub fn db_path() -> Result<PathBuf> {
        Ok(Self::data_dir()?.join("namaz.db"))
    }

    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }
        let content =
            std::fs::read_to_string(&path).with_context(|| format!("Reading {:?}", path))?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).context("Parsing config.toml")?;
        let days = config.progress.window_days;
        if days == 0 || days > MAX_WINDOW_DAYS {
            bail!(
                "progress.window_days must be between 1 and {}, got {}",
                MAX_WINDOW_DAYS,
                days
            );
        }
        let goal = config.profile.weekly_goal;
        if goal == 0 || goal > MAX_WEEKLY_GOAL {
            bail!(
                "profile.weekly_goal must be between 1 and {}, got {}",
                MAX_WEEKLY_GOAL,
                goal
            );
        }
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self).context("Serializing config")?;
        std::fs::write(&path, content).with_context(|| format!("Writing {:?}", path))?;
        Ok(())
    }

    pub fn ensure_data_dir() -> Result<PathBuf> {
        let dir = Self::data_dir()?;
        std::fs::create_dir_all(&dir)?;
        Ok(dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config = AppConfig::from_toml("").unwrap();
        assert_eq!(config.location.name, "Makkah");
        assert_eq!(config.reminders.lead_minutes, 10);
        assert_eq!(config.reminders.fallback_times.get(PrayerName::Asr), "16:30");
        assert_eq!(config.progress.window_days, 30);
        assert_eq!(config.profile.weekly_goal, 15);
        assert_eq!(config.profile.display_name(), "User");
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        assert!(AppConfig::from_toml("[progress]\nwindow_days = 0").is_err());
        assert!(AppConfig::from_toml("[progress]\nwindow_days = 200000000").is_err());
        assert!(AppConfig::from_toml("[profile]\nweekly_goal = 36").is_err());

        let config = AppConfig::from_toml("[profile]\nname = \"Amina\"\nweekly_goal = 20").unwrap();
        assert_eq!(config.profile.weekly_goal, 20);
        assert_eq!(config.profile.display_name(), "Amina");
    }

    #[test]
    fn partial_sections_keep_remaining_defaults() {
        let config = AppConfig::from_toml(
            r#"
            [location]
            name = "Lahore"
            latitude = 31.5204

            [reminders.fallback_times]
            isha = "21:15"
            "#,
        )
        .unwrap();
        assert_eq!(config.location.name, "Lahore");
        assert_eq!(config.location.longitude, default_longitude());
        assert_eq!(config.reminders.fallback_times.isha, "21:15");
        assert_eq!(config.reminders.fallback_times.fajr, "05:00");
        assert!(config.reminders.enabled);
    }

    #[test]
    fn config_round_trips_through_toml() {
        let mut config = AppConfig::default();
        config.progress.window_days = 14;
        let text = toml::to_string_pretty(&config).unwrap();
        let back = AppConfig::from_toml(&text).unwrap();
        assert_eq!(back.progress.window_days, 14);
        assert_eq!(back.location.madhab, config.location.madhab);
    }
}
