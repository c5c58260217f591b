//! Parsing of date arguments: ISO dates first, natural language second.

use anyhow::Result;
use calrem_core::grid::first_of_month;
use chrono::{Local, NaiveDate};

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// `2026-10-18`, `today`, `tomorrow`, `next friday`, `sat`, `dec 24`…
pub fn parse_date_arg(input: &str) -> Result<NaiveDate> {
    let input = input.trim();
    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return Ok(date);
    }

    let expanded = expand_abbreviations(input);
    fuzzydate::parse(&expanded)
        .map(|dt| dt.date())
        .map_err(|_| anyhow::anyhow!("Could not parse date: \"{}\". Expected YYYY-MM-DD", input))
}

/// `2026-10` → first day of that month.
pub fn parse_month_arg(input: &str) -> Result<NaiveDate> {
    let (year, month) = input
        .trim()
        .split_once('-')
        .ok_or_else(|| anyhow::anyhow!("Invalid month \"{}\". Expected YYYY-MM", input))?;
    let year: i32 = year
        .parse()
        .map_err(|_| anyhow::anyhow!("Invalid year in \"{}\"", input))?;
    let month: u32 = month
        .parse()
        .map_err(|_| anyhow::anyhow!("Invalid month in \"{}\"", input))?;
    Ok(first_of_month(year, month)?)
}

/// Expand common abbreviations that fuzzydate doesn't handle.
fn expand_abbreviations(input: &str) -> String {
    let abbrevs = [
        ("mon", "monday"),
        ("tue", "tuesday"),
        ("tues", "tuesday"),
        ("wed", "wednesday"),
        ("thu", "thursday"),
        ("thur", "thursday"),
        ("thurs", "thursday"),
        ("fri", "friday"),
        ("sat", "saturday"),
        ("sun", "sunday"),
        ("jan", "january"),
        ("feb", "february"),
        ("mar", "march"),
        ("apr", "april"),
        ("jun", "june"),
        ("jul", "july"),
        ("aug", "august"),
        ("sep", "september"),
        ("sept", "september"),
        ("oct", "october"),
        ("nov", "november"),
        ("dec", "december"),
    ];

    input
        .to_lowercase()
        .split_whitespace()
        .map(|word| {
            abbrevs
                .iter()
                .find(|(abbr, _)| *abbr == word)
                .map(|(_, full)| *full)
                .unwrap_or(word)
                .to_string()
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Duration};

    #[test]
    fn iso_dates() {
        assert_eq!(
            parse_date_arg(" 2026-10-18 ").unwrap(),
            NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
        );
    }

    #[test]
    fn relative_dates() {
        assert_eq!(parse_date_arg("tomorrow").unwrap(), today() + Duration::days(1));
    }

    #[test]
    fn absolute_month_day() {
        let date = parse_date_arg("dec 24").unwrap();
        assert_eq!((date.month(), date.day()), (12, 24));
    }

    #[test]
    fn rejects_nonsense() {
        assert!(parse_date_arg("not a date at all xyz").is_err());
    }

    #[test]
    fn months() {
        assert_eq!(
            parse_month_arg("2025-12").unwrap(),
            NaiveDate::from_ymd_opt(2025, 12, 1).unwrap()
        );
        assert!(parse_month_arg("2025-13").is_err());
        assert!(parse_month_arg("december").is_err());
    }

    #[test]
    fn expands_day_and_month_abbreviations() {
        assert_eq!(expand_abbreviations("sat"), "saturday");
        assert_eq!(expand_abbreviations("Sept 5"), "september 5");
        assert_eq!(expand_abbreviations("next fri"), "next friday");
        assert_eq!(expand_abbreviations("tomorrow"), "tomorrow");
    }
}
