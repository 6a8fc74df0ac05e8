use chrono::{Duration, NaiveDate};
use anyhow::{anyhow, Result};

use crate::model::keys::{DayKey, MonthKey};

/// Parses a day argument relative to `today`.
///
/// Accepts `today`/`tod`, `yesterday`/`yes`, `-Nd` and `YYYY-MM-DD`.
pub fn parse_human_day(input: &str, today: NaiveDate) -> Result<DayKey> {
    let input = input.trim();
    match input.to_lowercase().as_str() {
        "today" | "tod" => return Ok(DayKey::new(today)),
        "yesterday" | "yes" => return Ok(DayKey::new(today - Duration::days(1))),
        _ => {}
    }

    if let Some(days) = input.strip_prefix('-').and_then(|s| s.strip_suffix('d')) {
        let count: i64 = days.parse().map_err(|_| anyhow!("Invalid relative day: {}", input))?;
        return Duration::try_days(count)
            .and_then(|offset| today.checked_sub_signed(offset))
            .map(DayKey::new)
            .ok_or_else(|| anyhow!("Invalid relative day: {}", input));
    }

    input
        .parse::<DayKey>()
        .map_err(|_| anyhow!("Could not parse date: {}", input))
}

/// Parses a month argument relative to `today`: `this`, `last`, `next` or
/// `YYYY-MM`.
pub fn parse_human_month(input: &str, today: NaiveDate) -> Result<MonthKey> {
    let current = DayKey::new(today).month_key();
    match input.trim().to_lowercase().as_str() {
        "this" | "current" => Ok(current),
        "last" | "prev" => Ok(current.previous()),
        "next" => Ok(current.next()),
        other => other
            .parse::<MonthKey>()
            .map_err(|_| anyhow!("Could not parse month: {}", input)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn anchor() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 1).unwrap()
    }

    #[test]
    fn test_parse_human_day() {
        assert_eq!(parse_human_day("today", anchor()).unwrap().to_string(), "2026-03-01");
        assert_eq!(parse_human_day("yesterday", anchor()).unwrap().to_string(), "2026-02-28");
        assert_eq!(parse_human_day("-3d", anchor()).unwrap().to_string(), "2026-02-26");
        assert_eq!(parse_human_day("2026-01-15", anchor()).unwrap().to_string(), "2026-01-15");
        assert!(parse_human_day("someday", anchor()).is_err());
        assert!(parse_human_day("-999999999d", anchor()).is_err());
        assert!(parse_human_day("-9223372036854775807d", anchor()).is_err());
    }

    #[test]
    fn test_parse_human_month() {
        assert_eq!(parse_human_month("this", anchor()).unwrap().to_string(), "2026-03");
        assert_eq!(parse_human_month("last", anchor()).unwrap().to_string(), "2026-02");
        assert_eq!(parse_human_month("next", anchor()).unwrap().to_string(), "2026-04");
        assert_eq!(parse_human_month("2025-12", anchor()).unwrap().to_string(), "2025-12");
        assert!(parse_human_month("2025-13", anchor()).is_err());
    }
}
