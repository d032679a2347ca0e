use chrono::{Datelike, Duration, NaiveDate};
use hijri_date::HijriDate;

const HIJRI_MONTHS: [&str; 12] = [
    "Muharram",
    "Safar",
    "Rabi' al-Awwal",
    "Rabi' al-Thani",
    "Jumada al-Awwal",
    "Jumada al-Thani",
    "Rajab",
    "Sha'ban",
    "Ramadan",
    "Shawwal",
    "Dhu al-Qi'dah",
    "Dhu al-Hijjah",
];

/// Hijri rendering of `date`, shifted by `offset_days` for local moon
/// sighting. `None` when the date is outside the convertible range.
pub fn hijri_string(date: NaiveDate, offset_days: i32) -> Option<String> {
    let adjusted = date + Duration::days(offset_days as i64);
    let hd = HijriDate::from_gr(
        adjusted.year() as usize,
        adjusted.month() as usize,
        adjusted.day() as usize,
    )
    .ok()?;
    let month = HIJRI_MONTHS.get(hd.month().checked_sub(1)?)?;
    Some(format!("{} {} {}", hd.day(), month, hd.year()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_moves_the_hijri_day() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
        let base = hijri_string(date, 0).unwrap();
        let shifted = hijri_string(date, 1).unwrap();
        assert_ne!(base, shifted);
        assert!(base.contains("1447"));
    }
}
