use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::WorkError;

/// Calendar month identifier, serialized as `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MonthKey {
    year: i32,
    month: u32,
}

/// Calendar day identifier, serialized as `YYYY-MM-DD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DayKey(NaiveDate);

impl MonthKey {
    pub fn new(year: i32, month: u32) -> Result<Self, WorkError> {
        // Anything chrono can build a first day for is a real month.
        NaiveDate::from_ymd_opt(year, month, 1)
            .map(|_| Self { year, month })
            .ok_or_else(|| WorkError::InvalidMonthKey(format!("{:04}-{:02}", year, month)))
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn first_day(&self) -> DayKey {
        DayKey(NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or_default())
    }

    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self { year: self.year + 1, month: 1 }
        } else {
            Self { year: self.year, month: self.month + 1 }
        }
    }

    pub fn previous(&self) -> Self {
        if self.month == 1 {
            Self { year: self.year - 1, month: 12 }
        } else {
            Self { year: self.year, month: self.month - 1 }
        }
    }

    /// Every day of the month in calendar order.
    pub fn days(&self) -> Vec<DayKey> {
        let first = self.first_day().date();
        first
            .iter_days()
            .take_while(|d| d.month() == self.month)
            .map(DayKey)
            .collect()
    }

    /// The twelve months of `year`, January first.
    pub fn months_of_year(year: i32) -> Result<Vec<MonthKey>, WorkError> {
        (1..=12).map(|m| MonthKey::new(year, m)).collect()
    }
}

impl DayKey {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self, WorkError> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Self)
            .ok_or_else(|| {
                WorkError::InvalidDayKey(format!("{:04}-{:02}-{:02}", year, month, day))
            })
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    pub fn month_key(&self) -> MonthKey {
        MonthKey {
            year: self.0.year(),
            month: self.0.month(),
        }
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }
}

impl From<NaiveDate> for DayKey {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl fmt::Display for DayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl FromStr for MonthKey {
    type Err = WorkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || WorkError::InvalidMonthKey(s.to_string());
        let (year, month) = s.trim().split_once('-').ok_or_else(invalid)?;
        if year.len() != 4 || month.len() != 2 {
            return Err(invalid());
        }
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        MonthKey::new(year, month).map_err(|_| invalid())
    }
}

impl FromStr for DayKey {
    type Err = WorkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.len() != 10 {
            return Err(WorkError::InvalidDayKey(s.to_string()));
        }
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Self)
            .map_err(|_| WorkError::InvalidDayKey(s.to_string()))
    }
}

impl TryFrom<String> for MonthKey {
    type Error = WorkError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl TryFrom<String> for DayKey {
    type Error = WorkError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<MonthKey> for String {
    fn from(key: MonthKey) -> Self {
        key.to_string()
    }
}

impl From<DayKey> for String {
    fn from(key: DayKey) -> Self {
        key.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_key_parse_and_display() {
        let key: MonthKey = "2026-03".parse().unwrap();
        assert_eq!(key.year(), 2026);
        assert_eq!(key.month(), 3);
        assert_eq!(key.to_string(), "2026-03");

        assert!("2026-13".parse::<MonthKey>().is_err());
        assert!("2026-3".parse::<MonthKey>().is_err());
        assert!("march".parse::<MonthKey>().is_err());
    }

    #[test]
    fn test_day_key_owning_month() {
        let day: DayKey = "2026-02-28".parse().unwrap();
        assert_eq!(day.month_key().to_string(), "2026-02");
        assert_eq!(day.day(), 28);
        assert!("2026-02-30".parse::<DayKey>().is_err());
    }

    #[test]
    fn test_month_navigation_wraps_year() {
        let dec: MonthKey = "2025-12".parse().unwrap();
        assert_eq!(dec.next().to_string(), "2026-01");
        assert_eq!(dec.next().previous(), dec);
    }

    #[test]
    fn test_days_of_month() {
        let feb: MonthKey = "2028-02".parse().unwrap();
        let days = feb.days();
        assert_eq!(days.len(), 29);
        assert_eq!(days[0].to_string(), "2028-02-01");
        assert_eq!(days[28].to_string(), "2028-02-29");
    }

    #[test]
    fn test_keys_as_json_map_keys() {
        let mut map = std::collections::BTreeMap::new();
        map.insert("2026-01".parse::<MonthKey>().unwrap(), 0.15);
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"2026-01":0.15}"#);

        let back: std::collections::BTreeMap<MonthKey, f64> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, map);
        assert!(serde_json::from_str::<std::collections::BTreeMap<MonthKey, f64>>(r#"{"oops":1}"#).is_err());
    }
}
