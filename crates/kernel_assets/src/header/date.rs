use std::fmt;
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::AssetError;

const SECONDS_PER_DAY: u64 = 86_400;

/// Calendar day in UTC, printed as `YYYY-MM-DD`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarDate {
    pub year: i32,
    pub month: u8,
    pub day: u8,
}

impl CalendarDate {
    pub const fn new(year: i32, month: u8, day: u8) -> Self {
        Self { year, month, day }
    }

    pub fn today() -> Self {
        Self::from_system_time(SystemTime::now())
    }

    /// Times before the UNIX epoch clamp to 1970-01-01.
    pub fn from_system_time(time: SystemTime) -> Self {
        let seconds = time.duration_since(UNIX_EPOCH).map(|d| d.as_secs()).unwrap_or(0);
        Self::from_days_since_epoch((seconds / SECONDS_PER_DAY) as i64)
    }

    // Proleptic Gregorian conversion over 400-year eras.
    fn from_days_since_epoch(days: i64) -> Self {
        let z = days + 719_468;
        let era = z.div_euclid(146_097);
        let doe = z.rem_euclid(146_097);
        let yoe = (doe - doe / 1_460 + doe / 36_524 - doe / 146_096) / 365;
        let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
        let mp = (5 * doy + 2) / 153;
        let day = (doy - (153 * mp + 2) / 5 + 1) as u8;
        let month = (if mp < 10 { mp + 3 } else { mp - 9 }) as u8;
        let year = yoe + era * 400 + i64::from(month <= 2);
        Self { year: year as i32, month, day }
    }

    fn days_in_month(year: i32, month: u8) -> u8 {
        match month {
            1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
            4 | 6 | 9 | 11 => 30,
            2 if (year % 4 == 0 && year % 100 != 0) || year % 400 == 0 => 29,
            2 => 28,
            _ => 0,
        }
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

impl FromStr for CalendarDate {
    type Err = AssetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || AssetError::InvalidDate(s.to_owned());
        let mut parts = s.splitn(3, '-');
        let mut next = || parts.next().ok_or_else(invalid);
        let year: i32 = next()?.parse().map_err(|_| invalid())?;
        let month: u8 = next()?.parse().map_err(|_| invalid())?;
        let day: u8 = next()?.parse().map_err(|_| invalid())?;

        if day == 0 || day > Self::days_in_month(year, month) {
            return Err(invalid());
        }
        Ok(Self { year, month, day })
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn epoch_is_first_of_january_1970() {
        assert_eq!(CalendarDate::from_system_time(UNIX_EPOCH).to_string(), "1970-01-01");
    }

    #[test]
    fn leap_day_is_resolved() {
        let time = UNIX_EPOCH + Duration::from_secs(951_782_400);
        assert_eq!(CalendarDate::from_system_time(time), CalendarDate::new(2000, 2, 29));
    }

    #[test]
    fn time_of_day_is_dropped() {
        let time = UNIX_EPOCH + Duration::from_secs(1_647_215_999);
        assert_eq!(CalendarDate::from_system_time(time), CalendarDate::new(2022, 3, 13));
    }

    #[test]
    fn parses_iso_dates() {
        assert_eq!("2022-03-14".parse::<CalendarDate>().unwrap(), CalendarDate::new(2022, 3, 14));
        assert!("2023-02-29".parse::<CalendarDate>().is_err());
        assert!("2022-13-01".parse::<CalendarDate>().is_err());
        assert!("2022-03".parse::<CalendarDate>().is_err());
        assert!("yesterday".parse::<CalendarDate>().is_err());
    }
}
