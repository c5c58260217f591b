//! Calendar navigation state: which view is shown and which day is selected.

use chrono::{Datelike, Duration, Months, NaiveDate};

use crate::grid::{MonthGrid, ViewMode, week_of, week_start};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarView {
    pub mode: ViewMode,
    pub selected: NaiveDate,
}

impl CalendarView {
    pub fn new(mode: ViewMode, selected: NaiveDate) -> Self {
        CalendarView { mode, selected }
    }

    pub fn select(&mut self, date: NaiveDate) {
        self.selected = date;
    }

    pub fn set_mode(&mut self, mode: ViewMode) {
        self.mode = mode;
    }

    /// Step forward by one unit of the current view.
    pub fn next(&mut self) {
        self.selected = match self.mode {
            ViewMode::Year => shift_months(self.selected, 12),
            ViewMode::Month => shift_months(self.selected, 1),
            ViewMode::Week => self.selected + Duration::weeks(1),
            ViewMode::Day => self.selected + Duration::days(1),
        };
    }

    /// Step back by one unit of the current view.
    pub fn prev(&mut self) {
        self.selected = match self.mode {
            ViewMode::Year => shift_months(self.selected, -12),
            ViewMode::Month => shift_months(self.selected, -1),
            ViewMode::Week => self.selected - Duration::weeks(1),
            ViewMode::Day => self.selected - Duration::days(1),
        };
    }

    /// Move `steps` units; negative goes back.
    pub fn step(&mut self, steps: i32) {
        for _ in 0..steps.unsigned_abs() {
            if steps > 0 {
                self.next();
            } else {
                self.prev();
            }
        }
    }

    /// Heading shown above the grid.
    pub fn title(&self) -> String {
        match self.mode {
            ViewMode::Year => self.selected.year().to_string(),
            ViewMode::Month => self.selected.format("%B %Y").to_string(),
            ViewMode::Week => {
                let days = week_of(self.selected);
                format!(
                    "Week of {} – {}",
                    days[0].format("%b %-d, %Y"),
                    days[6].format("%b %-d, %Y")
                )
            }
            ViewMode::Day => self.selected.format("%a, %b %-d, %Y").to_string(),
        }
    }

    /// First and last date drawn by the current view, inclusive.
    pub fn visible_range(&self) -> (NaiveDate, NaiveDate) {
        match self.mode {
            ViewMode::Year => {
                let year = self.selected.year();
                (
                    self.selected.with_ordinal(1).unwrap_or(self.selected),
                    NaiveDate::from_ymd_opt(year, 12, 31).unwrap_or(self.selected),
                )
            }
            ViewMode::Month => {
                let grid = MonthGrid::containing(self.selected);
                (
                    grid.first_day().unwrap_or(self.selected),
                    grid.last_day().unwrap_or(self.selected),
                )
            }
            ViewMode::Week => {
                let start = week_start(self.selected);
                (start, start + Duration::days(6))
            }
            ViewMode::Day => (self.selected, self.selected),
        }
    }
}

/// Shift by whole months, clamping the day to the target month's length.
fn shift_months(date: NaiveDate, months: i32) -> NaiveDate {
    let shifted = if months >= 0 {
        date.checked_add_months(Months::new(months.unsigned_abs()))
    } else {
        date.checked_sub_months(Months::new(months.unsigned_abs()))
    };
    shifted.unwrap_or(date)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn month_navigation_clamps_day() {
        let mut view = CalendarView::new(ViewMode::Month, date(2025, 1, 31));
        view.next();
        assert_eq!(view.selected, date(2025, 2, 28));
        view.next();
        assert_eq!(view.selected, date(2025, 3, 28));

        let mut view = CalendarView::new(ViewMode::Month, date(2025, 3, 31));
        view.prev();
        assert_eq!(view.selected, date(2025, 2, 28));
    }

    #[test]
    fn month_navigation_crosses_years() {
        let mut view = CalendarView::new(ViewMode::Month, date(2025, 12, 15));
        view.next();
        assert_eq!(view.selected, date(2026, 1, 15));
        view.step(-2);
        assert_eq!(view.selected, date(2025, 11, 15));
    }

    #[test]
    fn week_and_day_navigation() {
        let mut view = CalendarView::new(ViewMode::Week, date(2026, 10, 18));
        view.next();
        assert_eq!(view.selected, date(2026, 10, 25));
        view.prev();
        view.prev();
        assert_eq!(view.selected, date(2026, 10, 11));

        let mut view = CalendarView::new(ViewMode::Day, date(2026, 12, 31));
        view.next();
        assert_eq!(view.selected, date(2027, 1, 1));
    }

    #[test]
    fn year_navigation_clamps_leap_day() {
        let mut view = CalendarView::new(ViewMode::Year, date(2024, 2, 29));
        view.next();
        assert_eq!(view.selected, date(2025, 2, 28));
        view.step(-3);
        assert_eq!(view.selected, date(2022, 2, 28));
    }

    #[test]
    fn titles() {
        let mut view = CalendarView::new(ViewMode::Month, date(2026, 10, 18));
        assert_eq!(view.title(), "October 2026");

        view.set_mode(ViewMode::Week);
        assert_eq!(view.title(), "Week of Oct 12, 2026 – Oct 18, 2026");

        view.set_mode(ViewMode::Day);
        assert_eq!(view.title(), "Sun, Oct 18, 2026");

        view.set_mode(ViewMode::Year);
        assert_eq!(view.title(), "2026");
    }

    #[test]
    fn visible_ranges() {
        let mut view = CalendarView::new(ViewMode::Month, date(2024, 2, 10));
        assert_eq!(view.visible_range(), (date(2024, 2, 1), date(2024, 2, 29)));

        view.set_mode(ViewMode::Week);
        assert_eq!(view.visible_range(), (date(2024, 2, 5), date(2024, 2, 11)));

        view.set_mode(ViewMode::Day);
        assert_eq!(view.visible_range(), (date(2024, 2, 10), date(2024, 2, 10)));

        view.set_mode(ViewMode::Year);
        assert_eq!(view.visible_range(), (date(2024, 1, 1), date(2024, 12, 31)));
    }

    #[test]
    fn select_keeps_mode() {
        let mut view = CalendarView::new(ViewMode::Week, date(2026, 10, 18));
        view.select(date(2026, 11, 2));
        assert_eq!(view.mode, ViewMode::Week);
        assert_eq!(view.selected, date(2026, 11, 2));
    }
}
