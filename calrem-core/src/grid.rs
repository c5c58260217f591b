//! Calendar grid layout.
//!
//! Weeks start on Monday. A month grid has one row per calendar week the
//! month touches; cells outside the month are empty.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{CalRemError, CalRemResult};

pub const WEEKDAY_HEADERS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    Year,
    #[default]
    Month,
    Week,
    Day,
}

impl ViewMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViewMode::Year => "year",
            ViewMode::Month => "month",
            ViewMode::Week => "week",
            ViewMode::Day => "day",
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ViewMode {
    type Err = CalRemError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "year" => Ok(ViewMode::Year),
            "month" => Ok(ViewMode::Month),
            "week" => Ok(ViewMode::Week),
            "day" => Ok(ViewMode::Day),
            other => Err(CalRemError::Config(format!(
                "Unknown view '{}'. Expected year, month, week or day",
                other
            ))),
        }
    }
}

/// Column of `date` in a Monday-first week (0 = Monday, 6 = Sunday).
pub fn first_column(date: NaiveDate) -> usize {
    date.weekday().num_days_from_monday() as usize
}

pub fn days_in_month(year: i32, month: u32) -> CalRemResult<u32> {
    Ok(last_of_month(year, month)?.day())
}

pub fn first_of_month(year: i32, month: u32) -> CalRemResult<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| CalRemError::InvalidDate(format!("{:04}-{:02}", year, month)))
}

pub fn last_of_month(year: i32, month: u32) -> CalRemResult<NaiveDate> {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    // validates year/month before computing the successor
    first_of_month(year, month)?;
    first_of_month(next_year, next_month)?
        .pred_opt()
        .ok_or_else(|| CalRemError::InvalidDate(format!("{:04}-{:02}", year, month)))
}

/// Monday of the week containing `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(first_column(date) as i64)
}

/// Monday..Sunday of the week containing `date`.
pub fn week_of(date: NaiveDate) -> [NaiveDate; 7] {
    let start = week_start(date);
    std::array::from_fn(|i| start + Duration::days(i as i64))
}

pub type WeekRow = [Option<NaiveDate>; 7];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    year: i32,
    month: u32,
    rows: Vec<WeekRow>,
}

impl MonthGrid {
    pub fn new(year: i32, month: u32) -> CalRemResult<Self> {
        let first = first_of_month(year, month)?;
        let length = days_in_month(year, month)?;
        let first_col = first_column(first);

        let mut rows: Vec<WeekRow> = Vec::new();
        for day in 1..=length {
            let slot = first_col + day as usize - 1;
            let (row, col) = (slot / 7, slot % 7);
            if row == rows.len() {
                rows.push([None; 7]);
            }
            rows[row][col] = first.with_day(day);
        }

        Ok(MonthGrid { year, month, rows })
    }

    pub fn containing(date: NaiveDate) -> Self {
        // year/month of a valid date are always valid
        Self::new(date.year(), date.month()).unwrap_or_else(|_| MonthGrid {
            year: date.year(),
            month: date.month(),
            rows: Vec::new(),
        })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn rows(&self) -> &[WeekRow] {
        &self.rows
    }

    /// Every date of the month, in order.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.rows.iter().flatten().filter_map(|cell| *cell)
    }

    /// Row and column of `date`, if it belongs to this month.
    pub fn position(&self, date: NaiveDate) -> Option<(usize, usize)> {
        self.rows.iter().enumerate().find_map(|(r, row)| {
            row.iter()
                .position(|cell| *cell == Some(date))
                .map(|c| (r, c))
        })
    }

    pub fn first_day(&self) -> Option<NaiveDate> {
        self.dates().next()
    }

    pub fn last_day(&self) -> Option<NaiveDate> {
        self.dates().last()
    }

    /// Full month name, e.g. `October`.
    pub fn name(&self) -> String {
        self.first_day()
            .map(|d| d.format("%B").to_string())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearGrid {
    year: i32,
    months: Vec<MonthGrid>,
}

impl YearGrid {
    pub fn new(year: i32) -> CalRemResult<Self> {
        let months = (1..=12)
            .map(|month| MonthGrid::new(year, month))
            .collect::<CalRemResult<Vec<_>>>()?;
        Ok(YearGrid { year, months })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn months(&self) -> &[MonthGrid] {
        &self.months
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn first_column_is_monday_based() {
        // 2026-10-12 is a Monday, 2026-10-18 a Sunday
        assert_eq!(first_column(date(2026, 10, 12)), 0);
        assert_eq!(first_column(date(2026, 10, 15)), 3);
        assert_eq!(first_column(date(2026, 10, 18)), 6);
    }

    #[test]
    fn month_lengths() {
        assert_eq!(days_in_month(2024, 2).unwrap(), 29);
        assert_eq!(days_in_month(2025, 2).unwrap(), 28);
        assert_eq!(days_in_month(2025, 12).unwrap(), 31);
        assert_eq!(days_in_month(2025, 4).unwrap(), 30);
        assert!(days_in_month(2025, 13).is_err());
    }

    #[test]
    fn month_grid_offsets_first_day() {
        // October 2026 starts on a Thursday
        let grid = MonthGrid::new(2026, 10).unwrap();
        let first_row = grid.rows()[0];
        assert_eq!(first_row[..3], [None, None, None]);
        assert_eq!(first_row[3], Some(date(2026, 10, 1)));
        assert_eq!(grid.position(date(2026, 10, 18)), Some((2, 6)));
        assert_eq!(grid.position(date(2026, 10, 31)), Some((4, 5)));
        assert_eq!(grid.rows().len(), 5);
        assert_eq!(grid.rows()[4][6], None);
        assert_eq!(grid.name(), "October");
    }

    #[test]
    fn month_grid_row_counts() {
        // February 2021: starts Monday, 28 days -> exactly four rows
        assert_eq!(MonthGrid::new(2021, 2).unwrap().rows().len(), 4);
        // August 2026: starts Saturday, 31 days -> six rows
        let aug = MonthGrid::new(2026, 8).unwrap();
        assert_eq!(aug.rows().len(), 6);
        assert_eq!(aug.position(date(2026, 8, 1)), Some((0, 5)));
        assert_eq!(aug.position(date(2026, 8, 31)), Some((5, 0)));
    }

    #[test]
    fn month_grid_contains_every_day_once() {
        let grid = MonthGrid::new(2024, 2).unwrap();
        let dates: Vec<NaiveDate> = grid.dates().collect();
        assert_eq!(dates.len(), 29);
        assert_eq!(grid.first_day(), Some(date(2024, 2, 1)));
        assert_eq!(grid.last_day(), Some(date(2024, 2, 29)));
        assert!(grid.position(date(2024, 3, 1)).is_none());
    }

    #[test]
    fn week_of_spans_monday_to_sunday() {
        let week = week_of(date(2026, 10, 18));
        assert_eq!(week[0], date(2026, 10, 12));
        assert_eq!(week[6], date(2026, 10, 18));

        // crosses a month and year boundary
        let week = week_of(date(2026, 1, 1));
        assert_eq!(week[0], date(2025, 12, 29));
        assert_eq!(week[6], date(2026, 1, 4));
    }

    #[test]
    fn year_grid_has_twelve_months() {
        let grid = YearGrid::new(2026).unwrap();
        assert_eq!(grid.months().len(), 12);
        assert_eq!(grid.months()[0].month(), 1);
        assert_eq!(grid.months()[11].name(), "December");
        let days: usize = grid.months().iter().map(|m| m.dates().count()).sum();
        assert_eq!(days, 365);
    }

    #[test]
    fn view_mode_parsing() {
        assert_eq!("Week".parse::<ViewMode>().unwrap(), ViewMode::Week);
        assert_eq!(" year ".parse::<ViewMode>().unwrap(), ViewMode::Year);
        assert!("fortnight".parse::<ViewMode>().is_err());
        assert_eq!(ViewMode::default(), ViewMode::Month);
    }
}
