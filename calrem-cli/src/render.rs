//! Terminal rendering of calendar grids and reminder lists.
//!
//! Cells are padded before they are colored so ANSI codes never shift the
//! columns.

use std::collections::HashMap;

use calrem_core::grid::{MonthGrid, ViewMode, WEEKDAY_HEADERS, YearGrid, week_of};
use calrem_core::reminder::Reminder;
use calrem_core::view::CalendarView;
use chrono::{Datelike, NaiveDate};
use owo_colors::OwoColorize;

/// Reminders of the visible range, grouped by day.
pub type DayIndex = HashMap<NaiveDate, Vec<Reminder>>;

pub fn index_by_day(reminders: Vec<Reminder>) -> DayIndex {
    let mut index: DayIndex = HashMap::new();
    for reminder in reminders {
        index.entry(reminder.date).or_default().push(reminder);
    }
    index
}

/// Width of a month-view cell.
const CELL: usize = 6;
/// Width of a year-view mini month (7 cells of 3).
const MINI_WIDTH: usize = 21;
const YEAR_COLUMNS: usize = 3;

pub struct Frame<'a> {
    pub view: &'a CalendarView,
    pub reminders: &'a DayIndex,
    pub today: NaiveDate,
}

impl Frame<'_> {
    fn count(&self, date: NaiveDate) -> usize {
        self.reminders.get(&date).map_or(0, Vec::len)
    }

    fn reminders_on(&self, date: NaiveDate) -> &[Reminder] {
        self.reminders
            .get(&date)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Title, grid and the selected day's reminders.
    pub fn render(&self) -> String {
        let grid = match self.view.mode {
            ViewMode::Year => self.year(),
            ViewMode::Month => self.month(),
            ViewMode::Week => self.week(),
            ViewMode::Day => self.day(),
        };

        let selected = self.view.selected;
        let mut lines = vec![self.view.title().bold().to_string(), String::new(), grid];
        lines.push(String::new());
        lines.push(format!("Selected: {}", selected).dimmed().to_string());
        lines.push(reminder_list(self.reminders_on(selected)));
        lines.join("\n")
    }

    fn style_day(&self, date: NaiveDate, text: String) -> String {
        if date == self.view.selected {
            text.reversed().to_string()
        } else if date == self.today {
            text.bold().underline().to_string()
        } else if self.count(date) > 0 {
            text.yellow().to_string()
        } else {
            text
        }
    }

    fn month(&self) -> String {
        let grid = MonthGrid::containing(self.view.selected);
        let mut lines = vec![
            WEEKDAY_HEADERS
                .iter()
                .map(|h| format!("{:^width$}", h, width = CELL))
                .collect::<String>()
                .dimmed()
                .to_string(),
        ];

        for row in grid.rows() {
            let line: String = row
                .iter()
                .map(|cell| match cell {
                    Some(date) => self.style_day(*date, month_cell(date.day(), self.count(*date))),
                    None => " ".repeat(CELL),
                })
                .collect();
            lines.push(line.trim_end().to_string());
        }

        lines.join("\n")
    }

    fn week(&self) -> String {
        week_of(self.view.selected)
            .iter()
            .map(|date| {
                let heading = self.style_day(*date, date.format("%a %-d").to_string());
                let mut block = vec![format!("{}  {}", heading, count_label(self.count(*date)).dimmed())];
                block.extend(
                    self.reminders_on(*date)
                        .iter()
                        .map(|r| format!("    {} — {}", r.time, r.title)),
                );
                block.join("\n")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn day(&self) -> String {
        let date = self.view.selected;
        let heading = date.format("%A").to_string();
        let number = self.style_day(date, date.day().to_string());
        format!(
            "{}\n{}  {}",
            heading.bold(),
            number,
            count_label(self.count(date)).dimmed()
        )
    }

    fn year(&self) -> String {
        let year = YearGrid::new(self.view.selected.year());
        let Ok(year) = year else {
            return String::new();
        };

        year.months()
            .chunks(YEAR_COLUMNS)
            .map(|months| {
                let blocks: Vec<Vec<String>> = months.iter().map(|m| self.mini_month(m)).collect();
                let height = blocks.iter().map(Vec::len).max().unwrap_or(0);
                (0..height)
                    .map(|i| {
                        blocks
                            .iter()
                            .map(|b| b.get(i).cloned().unwrap_or_else(|| " ".repeat(MINI_WIDTH)))
                            .collect::<Vec<_>>()
                            .join("   ")
                            .trim_end()
                            .to_string()
                    })
                    .collect::<Vec<_>>()
                    .join("\n")
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Lines of one month in the year view, each `MINI_WIDTH` columns wide.
    fn mini_month(&self, grid: &MonthGrid) -> Vec<String> {
        let mut lines = vec![
            format!("{:^width$}", grid.name(), width = MINI_WIDTH).bold().to_string(),
            WEEKDAY_HEADERS
                .iter()
                .map(|h| format!("{:>3}", &h[..2]))
                .collect::<String>()
                .dimmed()
                .to_string(),
        ];
        for row in grid.rows() {
            lines.push(
                row.iter()
                    .map(|cell| match cell {
                        Some(date) => self.style_day(*date, format!("{:>3}", date.day())),
                        None => "   ".to_string(),
                    })
                    .collect(),
            );
        }
        lines
    }
}

/// Day number plus a reminder marker, `CELL` columns wide: ` 18•2 `.
pub fn month_cell(day: u32, count: usize) -> String {
    let marker = match count {
        0 => String::new(),
        1..=9 => format!("•{}", count),
        _ => "•9+".to_string(),
    };
    format!("{:>3}{:<3}", day, marker)
}

pub fn count_label(count: usize) -> String {
    if count == 0 {
        String::new()
    } else {
        format!("• {} reminder(s)", count)
    }
}

/// One reminder per entry, description indented below.
pub fn reminder_list(reminders: &[Reminder]) -> String {
    if reminders.is_empty() {
        return "  No reminders".dimmed().to_string();
    }
    reminders
        .iter()
        .map(|r| {
            let mut entry = format!("  {} {} {}", r.time.to_string().cyan(), "—".dimmed(), r.title);
            if !r.description.trim().is_empty() {
                entry.push_str(&format!("\n      {}", r.description.dimmed()));
            }
            entry
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Group reminders under a date heading ("Today", "Tomorrow", "Wed Feb 25").
/// Expects reminders sorted by date.
pub fn grouped_by_date(reminders: &[Reminder], today: NaiveDate) -> String {
    if reminders.is_empty() {
        return "No reminders found".dimmed().to_string();
    }

    let mut lines = Vec::new();
    let mut current: Option<NaiveDate> = None;

    for reminder in reminders {
        if current != Some(reminder.date) {
            if current.is_some() {
                lines.push(String::new());
            }
            lines.push(date_label(reminder.date, today).bold().to_string());
            current = Some(reminder.date);
        }
        lines.push(reminder_list(std::slice::from_ref(reminder)));
    }

    lines.join("\n")
}

pub fn date_label(date: NaiveDate, today: NaiveDate) -> String {
    match (date - today).num_days() {
        0 => "Today".to_string(),
        1 => "Tomorrow".to_string(),
        -1 => "Yesterday".to_string(),
        _ if date.year() == today.year() => date.format("%a %b %-d").to_string(),
        _ => date.format("%a %b %-d, %Y").to_string(),
    }
}
