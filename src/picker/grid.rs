use std::fmt;
use time::{Date, Month};

/// Number of cells in a month view: six weeks of seven days
pub(crate) const GRID_CELLS: usize = 42;

const DAYS_IN_WEEK: usize = 7;

/// A year and month with no day component.  This is what the calendar is
/// "looking at", independent of which day is selected.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub(crate) struct YearMonth {
    pub(crate) year: i32,
    pub(crate) month: Month,
}

impl YearMonth {
    pub(crate) fn new(year: i32, month: Month) -> YearMonth {
        YearMonth { year, month }
    }

    pub(crate) fn of(date: Date) -> YearMonth {
        YearMonth::new(date.year(), date.month())
    }

    pub(crate) fn previous(self) -> YearMonth {
        if self.month == Month::January {
            YearMonth::new(self.year - 1, Month::December)
        } else {
            YearMonth::new(self.year, self.month.previous())
        }
    }

    pub(crate) fn next(self) -> YearMonth {
        if self.month == Month::December {
            YearMonth::new(self.year + 1, Month::January)
        } else {
            YearMonth::new(self.year, self.month.next())
        }
    }

    /// Whether every day of the month can be expressed as a [`Date`]
    pub(crate) fn is_representable(self) -> bool {
        (Date::MIN.year()..=Date::MAX.year()).contains(&self.year)
    }

    /// Number of days in the month
    pub(crate) fn length(self) -> u8 {
        self.month.length(self.year)
    }

    pub(crate) fn day(self, day: u8) -> Option<Date> {
        Date::from_calendar_date(self.year, self.month, day).ok()
    }

    /// Index of the weekday of the first of the month, counting from Sunday
    /// as 0
    ///
    /// # Panics
    ///
    /// Panics if the month is not representable
    pub(crate) fn first_weekday(self) -> u8 {
        self.day(1)
            .expect("first day of a representable month should be a valid date")
            .weekday()
            .number_days_from_sunday()
    }

    pub(crate) fn contains(self, date: Date) -> bool {
        YearMonth::of(date) == self
    }
}

/// Source of the month names used in headers and cell labels
pub(crate) trait MonthNames {
    fn month_name(&self, month: Month) -> &str;
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct English;

impl MonthNames for English {
    fn month_name(&self, month: Month) -> &str {
        match month {
            Month::January => "January",
            Month::February => "February",
            Month::March => "March",
            Month::April => "April",
            Month::May => "May",
            Month::June => "June",
            Month::July => "July",
            Month::August => "August",
            Month::September => "September",
            Month::October => "October",
            Month::November => "November",
            Month::December => "December",
        }
    }
}

/// Header text for a month, e.g., "July 2024"
pub(crate) fn month_title<N: MonthNames>(names: &N, ym: YearMonth) -> String {
    format!("{} {}", names.month_name(ym.month), ym.year)
}

/// Which month a cell of the grid belongs to, relative to the viewed month
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) enum CellMonth {
    Previous,
    Current,
    Next,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Cell {
    pub(crate) day: u8,
    pub(crate) month: CellMonth,
    pub(crate) selected: bool,
    pub(crate) label: String,
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.selected {
            write!(f, "[{:2}]", self.day)
        } else {
            write!(f, " {:2} ", self.day)
        }
    }
}

/// The 42 cells of a month view, in reading order starting from the Sunday on
/// or before the first of the month
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Grid(Vec<Cell>);

impl Grid {
    /// Lay out `viewed` as six weeks.  Leading cells come from the end of the
    /// previous month and trailing cells from the start of the next month.
    /// A current-month cell is marked selected iff it is `selected`.
    pub(crate) fn generate<N: MonthNames>(viewed: YearMonth, selected: Date, names: &N) -> Grid {
        let leading = viewed.first_weekday();
        let length = viewed.length();
        let prev = viewed.previous();
        let next = viewed.next();
        let mut cells = Vec::with_capacity(GRID_CELLS);
        let prev_length = prev.length();
        for day in (prev_length - leading + 1)..=prev_length {
            cells.push(Cell {
                day,
                month: CellMonth::Previous,
                selected: false,
                label: label(names, prev, day, false),
            });
        }
        let selected_day = viewed.contains(selected).then_some(selected.day());
        for day in 1..=length {
            let is_selected = selected_day == Some(day);
            cells.push(Cell {
                day,
                month: CellMonth::Current,
                selected: is_selected,
                label: label(names, viewed, day, is_selected),
            });
        }
        let mut day = 1;
        while cells.len() < GRID_CELLS {
            cells.push(Cell {
                day,
                month: CellMonth::Next,
                selected: false,
                label: label(names, next, day, false),
            });
            day += 1;
        }
        debug_assert_eq!(cells.len(), GRID_CELLS, "grid should have exactly 42 cells");
        Grid(cells)
    }

    pub(crate) fn cells(&self) -> &[Cell] {
        &self.0
    }

    pub(crate) fn get(&self, pos: usize) -> Option<&Cell> {
        self.0.get(pos)
    }

    pub(crate) fn weeks(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells().chunks(DAYS_IN_WEEK)
    }

    pub(crate) fn leading(&self) -> usize {
        self.0
            .iter()
            .take_while(|c| c.month == CellMonth::Previous)
            .count()
    }

    pub(crate) fn position_of_selected(&self) -> Option<usize> {
        self.0.iter().position(|c| c.selected)
    }
}

fn label<N: MonthNames>(names: &N, ym: YearMonth, day: u8, selected: bool) -> String {
    let mut s = format!("{} {} {}", names.month_name(ym.month), day, ym.year);
    if selected {
        s.push_str(" (selected)");
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use time::macros::date;

    fn all_months() -> impl Iterator<Item = YearMonth> {
        (1999..=2030).flat_map(|year| {
            std::iter::successors(Some(Month::January), |&m| {
                (m != Month::December).then_some(m.next())
            })
            .map(move |month| YearMonth::new(year, month))
        })
    }

    #[test]
    fn test_july_2024() {
        let grid = Grid::generate(
            YearMonth::new(2024, Month::July),
            date!(2024 - 07 - 01),
            &English,
        );
        let cells = grid.cells();
        assert_eq!(cells.len(), 42);
        assert_eq!(grid.leading(), 1);
        assert_eq!(cells[0].day, 30);
        assert_eq!(cells[0].month, CellMonth::Previous);
        assert_eq!(cells[0].label, "June 30 2024");
        assert!(!cells[0].selected);
        assert_eq!(cells[1].day, 1);
        assert_eq!(cells[1].month, CellMonth::Current);
        assert!(cells[1].selected);
        assert_eq!(cells[1].label, "July 1 2024 (selected)");
        assert_eq!(cells[2].label, "July 2 2024");
        assert_eq!(cells[31].label, "July 31 2024");
        assert_eq!(cells[32].month, CellMonth::Next);
        assert_eq!(cells[32].label, "August 1 2024");
        assert_eq!(cells[33].label, "August 2 2024");
        assert_eq!(cells[41].label, "August 10 2024");
        assert_eq!(grid.position_of_selected(), Some(1));
    }

    #[test]
    fn test_selection_outside_viewed_month() {
        let grid = Grid::generate(
            YearMonth::new(2024, Month::August),
            date!(2024 - 07 - 01),
            &English,
        );
        assert_eq!(grid.position_of_selected(), None);
        assert!(grid.cells().iter().all(|c| !c.label.contains("selected")));
    }

    #[test]
    fn test_trailing_cells_never_selected() {
        // August 1 appears as a trailing cell of July's grid
        let grid = Grid::generate(
            YearMonth::new(2024, Month::July),
            date!(2024 - 08 - 01),
            &English,
        );
        assert_eq!(grid.position_of_selected(), None);
        assert_eq!(grid.cells()[32].label, "August 1 2024");
    }

    #[test]
    fn test_sunday_start_has_no_leading_cells() {
        // September 1, 2024 is a Sunday
        let grid = Grid::generate(
            YearMonth::new(2024, Month::September),
            date!(2024 - 09 - 15),
            &English,
        );
        assert_eq!(grid.leading(), 0);
        assert_eq!(grid.cells()[0].label, "September 1 2024");
        assert_eq!(grid.cells()[14].label, "September 15 2024 (selected)");
        assert_eq!(grid.cells()[30].label, "October 1 2024");
        assert_eq!(grid.cells()[41].label, "October 12 2024");
    }

    #[test]
    fn test_year_rollover_labels() {
        // January 1, 2025 is a Wednesday
        let grid = Grid::generate(
            YearMonth::new(2025, Month::January),
            date!(2025 - 01 - 22),
            &English,
        );
        let labels = grid
            .cells()
            .iter()
            .take(4)
            .map(|c| c.label.as_str())
            .collect::<Vec<_>>();
        assert_eq!(
            labels,
            [
                "December 29 2024",
                "December 30 2024",
                "December 31 2024",
                "January 1 2025"
            ]
        );
        let grid = Grid::generate(
            YearMonth::new(2024, Month::December),
            date!(2025 - 01 - 22),
            &English,
        );
        assert_eq!(grid.cells().last().unwrap().label, "January 11 2025");
    }

    #[test]
    fn test_always_42_cells() {
        for ym in all_months() {
            let grid = Grid::generate(ym, date!(2024 - 07 - 01), &English);
            assert_eq!(grid.cells().len(), GRID_CELLS, "{ym:?}");
            assert_eq!(grid.weeks().count(), 6, "{ym:?}");
        }
    }

    #[test]
    fn test_leading_count_is_first_weekday() {
        for ym in all_months() {
            let grid = Grid::generate(ym, date!(2024 - 07 - 01), &English);
            let first = ym.day(1).unwrap();
            assert_eq!(
                grid.leading(),
                usize::from(first.weekday().number_days_from_sunday()),
                "{ym:?}"
            );
        }
    }

    #[test]
    fn test_cells_are_consecutive_days() {
        for ym in all_months() {
            let grid = Grid::generate(ym, date!(2024 - 07 - 01), &English);
            let leading = i64::try_from(grid.leading()).unwrap();
            let mut expected = ym.day(1).unwrap() - time::Duration::days(leading);
            for cell in grid.cells() {
                assert_eq!(cell.day, expected.day(), "{ym:?}");
                expected = expected.next_day().unwrap();
            }
        }
    }

    #[rstest]
    #[case(2023, Month::February, 28)]
    #[case(2024, Month::February, 29)]
    #[case(1900, Month::February, 28)]
    #[case(2000, Month::February, 29)]
    #[case(2024, Month::April, 30)]
    #[case(2024, Month::December, 31)]
    #[case(-1, Month::February, 28)]
    #[case(-4, Month::February, 29)]
    #[case(10000, Month::February, 29)]
    #[case(-10000, Month::January, 31)]
    fn test_length(#[case] year: i32, #[case] month: Month, #[case] length: u8) {
        assert_eq!(YearMonth::new(year, month).length(), length);
    }

    #[rstest]
    #[case(YearMonth::new(2024, Month::January), YearMonth::new(2023, Month::December))]
    #[case(YearMonth::new(2024, Month::March), YearMonth::new(2024, Month::February))]
    fn test_previous_next(#[case] ym: YearMonth, #[case] prev: YearMonth) {
        assert_eq!(ym.previous(), prev);
        assert_eq!(prev.next(), ym);
    }

    #[test]
    fn test_representable() {
        assert!(YearMonth::of(Date::MAX).is_representable());
        assert!(!YearMonth::of(Date::MAX).next().is_representable());
        assert!(!YearMonth::of(Date::MIN).previous().is_representable());
    }

    #[test]
    fn test_title() {
        assert_eq!(
            month_title(&English, YearMonth::new(2024, Month::July)),
            "July 2024"
        );
    }

    #[test]
    fn test_cell_display() {
        let grid = Grid::generate(
            YearMonth::new(2024, Month::July),
            date!(2024 - 07 - 18),
            &English,
        );
        assert_eq!(grid.cells()[0].to_string(), " 30 ");
        assert_eq!(grid.cells()[18].to_string(), "[18]");
        assert_eq!(grid.cells()[9].to_string(), "  9 ");
    }
}
