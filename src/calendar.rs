use chrono::{Datelike, Months, NaiveDate};

use crate::locale::Locale;

/// The month the calendar view is showing. Always normalised to day 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarState {
    reference: NaiveDate,
}

impl CalendarState {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            reference: first_of_month(date),
        }
    }

    pub fn reference(&self) -> NaiveDate {
        self.reference
    }

    pub fn year(&self) -> i32 {
        self.reference.year()
    }

    pub fn month(&self) -> u32 {
        self.reference.month()
    }

    pub fn reset(&mut self, today: NaiveDate) {
        self.reference = first_of_month(today);
    }

    pub fn prev_month(&mut self) {
        if let Some(date) = self.reference.checked_sub_months(Months::new(1)) {
            self.reference = date;
        }
    }

    pub fn next_month(&mut self) {
        if let Some(date) = self.reference.checked_add_months(Months::new(1)) {
            self.reference = date;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    Header(&'static str),
    Blank,
    Day { day: u32, today: bool },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    pub title: String,
    pub first_weekday: u32,
    pub days_in_month: u32,
    /// Seven headers, then blanks, then days, in row-major order.
    pub cells: Vec<Cell>,
}

impl MonthGrid {
    /// Cells after the weekday headers.
    pub fn body(&self) -> &[Cell] {
        &self.cells[7..]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(7)
    }
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Day of week of the 1st, 0 = Sunday.
pub fn first_weekday(year: i32, month: u32) -> u32 {
    NaiveDate::from_ymd_opt(year, month, 1)
        .map(|d| d.weekday().num_days_from_sunday())
        .unwrap_or(0)
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return 0;
    };
    first
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .map(|last| last.day())
        .unwrap_or(31)
}

pub fn month_grid(reference: NaiveDate, today: NaiveDate, locale: Locale) -> MonthGrid {
    let year = reference.year();
    let month = reference.month();
    let first_weekday = first_weekday(year, month);
    let days = days_in_month(year, month);

    let mut cells = Vec::with_capacity(7 + (first_weekday + days) as usize);
    cells.extend(locale.weekday_labels().into_iter().map(Cell::Header));
    cells.extend((0..first_weekday).map(|_| Cell::Blank));
    let current_month = today.year() == year && today.month() == month;
    cells.extend((1..=days).map(|day| Cell::Day {
        day,
        today: current_month && today.day() == day,
    }));

    MonthGrid {
        title: format!("{} {}", locale.month_name(month), year),
        first_weekday,
        days_in_month: days,
        cells,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn today_count(grid: &MonthGrid) -> usize {
        grid.body()
            .iter()
            .filter(|c| matches!(c, Cell::Day { today: true, .. }))
            .count()
    }

    #[test]
    fn january_2024_has_one_leading_blank() {
        let grid = month_grid(date(2024, 1, 15), date(2026, 10, 19), Locale::En);
        assert_eq!(grid.title, "January 2024");
        assert_eq!(grid.first_weekday, 1);
        assert_eq!(grid.days_in_month, 31);
        assert_eq!(grid.body()[0], Cell::Blank);
        assert_eq!(grid.body()[1], Cell::Day { day: 1, today: false });
        assert_eq!(grid.body().last(), Some(&Cell::Day { day: 31, today: false }));
        assert_eq!(grid.body().len(), 32);
    }

    #[test]
    fn headers_are_sunday_first_and_localized() {
        let grid = month_grid(date(2024, 1, 1), date(2024, 1, 1), Locale::Id);
        assert_eq!(grid.cells[0], Cell::Header("Min"));
        assert_eq!(grid.cells[6], Cell::Header("Sab"));
        assert_eq!(grid.title, "Januari 2024");
    }

    #[test]
    fn body_length_and_today_marker_hold_for_every_month() {
        let today = date(2024, 2, 29);
        for year in [1999, 2000, 2023, 2024, 2100] {
            for month in 1..=12 {
                let grid = month_grid(date(year, month, 1), today, Locale::En);
                assert_eq!(
                    grid.body().len() as u32,
                    grid.first_weekday + grid.days_in_month
                );
                let expected = usize::from(year == 2024 && month == 2);
                assert_eq!(today_count(&grid), expected, "{}-{}", year, month);
            }
        }
    }

    #[test]
    fn month_lengths_follow_leap_rules() {
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2023, 2), 28);
        assert_eq!(days_in_month(1900, 2), 28);
        assert_eq!(days_in_month(2000, 2), 29);
        assert_eq!(days_in_month(2024, 4), 30);
        assert_eq!(days_in_month(2024, 12), 31);
    }

    #[test]
    fn today_cell_is_the_matching_day() {
        let grid = month_grid(date(2026, 10, 1), date(2026, 10, 19), Locale::En);
        let marked: Vec<u32> = grid
            .body()
            .iter()
            .filter_map(|c| match c {
                Cell::Day { day, today: true } => Some(*day),
                _ => None,
            })
            .collect();
        assert_eq!(marked, vec![19]);
    }

    #[test]
    fn navigation_rolls_over_year_boundaries() {
        let mut state = CalendarState::new(date(2023, 12, 31));
        state.next_month();
        assert_eq!((state.year(), state.month()), (2024, 1));
        state.prev_month();
        state.prev_month();
        assert_eq!((state.year(), state.month()), (2023, 11));

        let mut state = CalendarState::new(date(2024, 1, 31));
        state.prev_month();
        assert_eq!((state.year(), state.month()), (2023, 12));
        state.reset(date(2026, 10, 19));
        assert_eq!(state.reference(), date(2026, 10, 1));
    }

    #[test]
    fn rows_are_seven_wide() {
        let grid = month_grid(date(2024, 6, 1), date(2024, 6, 1), Locale::En);
        let rows: Vec<&[Cell]> = grid.rows().collect();
        assert!(rows[..rows.len() - 1].iter().all(|r| r.len() == 7));
        assert_eq!(rows[0][0], Cell::Header("Sun"));
    }
}
