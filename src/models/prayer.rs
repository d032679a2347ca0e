use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The five daily prayers, in the order they fall during the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PrayerName {
    Fajr,
    Dhuhr,
    Asr,
    Maghrib,
    Isha,
}

impl PrayerName {
    pub const ALL: [PrayerName; 5] = [
        PrayerName::Fajr,
        PrayerName::Dhuhr,
        PrayerName::Asr,
        PrayerName::Maghrib,
        PrayerName::Isha,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PrayerName::Fajr => "Fajr",
            PrayerName::Dhuhr => "Dhuhr",
            PrayerName::Asr => "Asr",
            PrayerName::Maghrib => "Maghrib",
            PrayerName::Isha => "Isha",
        }
    }
}

impl std::fmt::Display for PrayerName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PrayerName {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fajr" => Ok(PrayerName::Fajr),
            "dhuhr" | "zuhr" | "dhuhur" => Ok(PrayerName::Dhuhr),
            "asr" => Ok(PrayerName::Asr),
            "maghrib" => Ok(PrayerName::Maghrib),
            "isha" => Ok(PrayerName::Isha),
            _ => Err(anyhow::anyhow!("Unknown prayer: {}", s)),
        }
    }
}

/// How a prayer was (or was not) performed. An unset prayer has no status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PrayerStatus {
    /// Prayed in congregation.
    Jamaat,
    /// Prayed individually.
    Alone,
    Missed,
}

impl PrayerStatus {
    pub const ALL: [PrayerStatus; 3] = [
        PrayerStatus::Jamaat,
        PrayerStatus::Alone,
        PrayerStatus::Missed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PrayerStatus::Jamaat => "Jamaat",
            PrayerStatus::Alone => "Alone",
            PrayerStatus::Missed => "Missed",
        }
    }

    pub fn is_offered(&self) -> bool {
        matches!(self, PrayerStatus::Jamaat | PrayerStatus::Alone)
    }
}

impl std::fmt::Display for PrayerStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PrayerStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "jamaat" | "jamaah" | "congregation" => Ok(PrayerStatus::Jamaat),
            "alone" | "individual" => Ok(PrayerStatus::Alone),
            "missed" => Ok(PrayerStatus::Missed),
            _ => Err(anyhow::anyhow!("Unknown prayer status: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prayer_names_parse_with_aliases() {
        assert_eq!("FAJR".parse::<PrayerName>().unwrap(), PrayerName::Fajr);
        assert_eq!("zuhr".parse::<PrayerName>().unwrap(), PrayerName::Dhuhr);
        assert!("sunrise".parse::<PrayerName>().is_err());
    }

    #[test]
    fn only_jamaat_and_alone_count_as_offered() {
        assert!(PrayerStatus::Jamaat.is_offered());
        assert!(PrayerStatus::Alone.is_offered());
        assert!(!PrayerStatus::Missed.is_offered());
    }

    #[test]
    fn statuses_serialize_with_capitalized_names() {
        let json = serde_json::to_string(&PrayerStatus::Jamaat).unwrap();
        assert_eq!(json, "\"Jamaat\"");
        let name: PrayerName = serde_json::from_str("\"Maghrib\"").unwrap();
        assert_eq!(name, PrayerName::Maghrib);
    }
}
