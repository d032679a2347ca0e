use anyhow::{anyhow, Result};
use chrono::{Duration, FixedOffset, NaiveDate, NaiveTime};
use log::warn;
use salah::prelude::*;
use serde::Serialize;

use crate::config::settings::{FallbackTimes, LocationConfig};
use crate::models::PrayerName;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeSource {
    Calculated,
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayTimes {
    pub fajr: NaiveTime,
    pub sunrise: Option<NaiveTime>,
    pub dhuhr: NaiveTime,
    pub asr: NaiveTime,
    pub maghrib: NaiveTime,
    pub isha: NaiveTime,
    pub source: TimeSource,
}

impl DayTimes {
    pub fn get(&self, prayer: PrayerName) -> NaiveTime {
        match prayer {
            PrayerName::Fajr => self.fajr,
            PrayerName::Dhuhr => self.dhuhr,
            PrayerName::Asr => self.asr,
            PrayerName::Maghrib => self.maghrib,
            PrayerName::Isha => self.isha,
        }
    }

    pub fn from_fallback(fallback: &FallbackTimes) -> Self {
        let defaults = FallbackTimes::default();
        let time_of = |prayer: PrayerName| {
            parse_hm(fallback.get(prayer))
                .or_else(|| parse_hm(defaults.get(prayer)))
                .unwrap_or(NaiveTime::MIN)
        };
        Self {
            fajr: time_of(PrayerName::Fajr),
            sunrise: None,
            dhuhr: time_of(PrayerName::Dhuhr),
            asr: time_of(PrayerName::Asr),
            maghrib: time_of(PrayerName::Maghrib),
            isha: time_of(PrayerName::Isha),
            source: TimeSource::Fallback,
        }
    }
}

pub fn parse_hm(s: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(s.trim(), "%H:%M").ok()
}

/// A reminder that fires `lead` minutes before a prayer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reminder {
    pub prayer: PrayerName,
    pub prayer_time: NaiveTime,
    pub remind_at: NaiveTime,
    pub secs_until: i64,
}

pub struct PrayerCalculator {
    pub lat: f64,
    pub lng: f64,
    pub method_str: String,
    pub madhab_str: String,
    pub tz_offset_minutes: i32,
}

impl PrayerCalculator {
    pub fn new(location: &LocationConfig) -> Result<Self> {
        // Validate method + madhab early
        parse_method(&location.calc_method)?;
        parse_madhab(&location.madhab)?;
        Ok(Self {
            lat: location.latitude,
            lng: location.longitude,
            method_str: location.calc_method.clone(),
            madhab_str: location.madhab.clone(),
            tz_offset_minutes: location.timezone_offset,
        })
    }

    pub fn compute_times(&self, date: NaiveDate) -> Result<DayTimes> {
        let coords = Coordinates::new(self.lat, self.lng);
        let method = parse_method(&self.method_str)?;
        let madhab = parse_madhab(&self.madhab_str)?;
        let params = Configuration::with(method, madhab);

        let times = PrayerSchedule::new()
            .on(date)
            .for_location(coords)
            .with_configuration(params)
            .calculate()
            .map_err(|e| anyhow!("Prayer calculation failed: {}", e))?;

        let offset = FixedOffset::east_opt(self.tz_offset_minutes * 60)
            .ok_or_else(|| anyhow!("Invalid timezone offset: {}", self.tz_offset_minutes))?;

        let to_local = |utc: chrono::DateTime<chrono::Utc>| -> NaiveTime {
            utc.with_timezone(&offset).time()
        };

        Ok(DayTimes {
            fajr: to_local(times.time(Prayer::Fajr)),
            sunrise: Some(to_local(times.time(Prayer::Sunrise))),
            dhuhr: to_local(times.time(Prayer::Dhuhr)),
            asr: to_local(times.time(Prayer::Asr)),
            maghrib: to_local(times.time(Prayer::Maghrib)),
            isha: to_local(times.time(Prayer::Isha)),
            source: TimeSource::Calculated,
        })
    }
}

/// Prayer times for a location, falling back to fixed times when the
/// calculation cannot be done.
pub struct PrayerTimesProvider {
    calculator: Option<PrayerCalculator>,
    fallback: FallbackTimes,
}

impl PrayerTimesProvider {
    pub fn new(location: &LocationConfig, fallback: &FallbackTimes) -> Self {
        let calculator = match PrayerCalculator::new(location) {
            Ok(calc) => Some(calc),
            Err(e) => {
                warn!("prayer times unavailable for {}: {}", location.name, e);
                None
            }
        };
        Self {
            calculator,
            fallback: fallback.clone(),
        }
    }

    pub fn times_for(&self, date: NaiveDate) -> DayTimes {
        let Some(calc) = &self.calculator else {
            return DayTimes::from_fallback(&self.fallback);
        };
        match calc.compute_times(date) {
            Ok(times) => times,
            Err(e) => {
                warn!("using fallback prayer times for {}: {}", date, e);
                DayTimes::from_fallback(&self.fallback)
            }
        }
    }

    /// Returns (next prayer, seconds until it).
    pub fn next_prayer(&self, date: NaiveDate, now: NaiveTime) -> (PrayerName, i64) {
        let today = self.times_for(date);
        if let Some((prayer, secs)) = next_in_day(&today, now) {
            return (prayer, secs);
        }

        // All prayers passed, next is Fajr tomorrow
        let tomorrow = self.times_for(date.succ_opt().unwrap_or(date));
        let until_midnight = Duration::days(1) - (now - NaiveTime::MIN);
        let secs = until_midnight.num_seconds() + (tomorrow.fajr - NaiveTime::MIN).num_seconds();
        (PrayerName::Fajr, secs)
    }
}

fn next_in_day(times: &DayTimes, now: NaiveTime) -> Option<(PrayerName, i64)> {
    PrayerName::ALL
        .iter()
        .map(|p| (*p, times.get(*p)))
        .find(|(_, t)| *t > now)
        .map(|(p, t)| (p, (t - now).num_seconds()))
}

/// Reminders still to fire today, `lead_minutes` before each prayer.
pub fn upcoming_reminders(times: &DayTimes, now: NaiveTime, lead_minutes: i64) -> Vec<Reminder> {
    let lead = Duration::minutes(lead_minutes);
    PrayerName::ALL
        .iter()
        .filter_map(|prayer| {
            let prayer_time = times.get(*prayer);
            let secs_until = (prayer_time - now - lead).num_seconds();
            if secs_until <= 0 {
                return None;
            }
            Some(Reminder {
                prayer: *prayer,
                prayer_time,
                remind_at: prayer_time - lead,
                secs_until,
            })
        })
        .collect()
}

fn parse_method(s: &str) -> Result<Method> {
    match s {
        "MuslimWorldLeague" => Ok(Method::MuslimWorldLeague),
        "Egyptian" => Ok(Method::Egyptian),
        "Karachi" => Ok(Method::Karachi),
        "UmmAlQura" => Ok(Method::UmmAlQura),
        "Dubai" => Ok(Method::Dubai),
        "MoonsightingCommittee" => Ok(Method::MoonsightingCommittee),
        "NorthAmerica" => Ok(Method::NorthAmerica),
        "Kuwait" => Ok(Method::Kuwait),
        "Qatar" => Ok(Method::Qatar),
        "Singapore" => Ok(Method::Singapore),
        "Tehran" => Ok(Method::Tehran),
        "Turkey" => Ok(Method::Turkey),
        "Other" => Ok(Method::Other),
        _ => Err(anyhow!("Unknown calculation method: '{}'", s)),
    }
}

fn parse_madhab(s: &str) -> Result<Madhab> {
    match s {
        "Hanafi" => Ok(Madhab::Hanafi),
        "Shafi" | "Shafi'i" => Ok(Madhab::Shafi),
        _ => Err(anyhow!("Unknown madhab: '{}'", s)),
    }
}

pub const CALC_METHODS: &[&str] = &[
    "MuslimWorldLeague",
    "Egyptian",
    "Karachi",
    "UmmAlQura",
    "Dubai",
    "MoonsightingCommittee",
    "NorthAmerica",
    "Kuwait",
    "Qatar",
    "Singapore",
    "Tehran",
    "Turkey",
    "Other",
];
