mod grid;
mod widget;
pub(crate) use self::grid::{
    month_title, CellMonth, English, Grid, MonthNames, YearMonth, GRID_CELLS,
};
pub(crate) use self::widget::Calendar;
use std::fmt;
use thiserror::Error;
use time::{Date, Month};

/// Receives the date whenever it is set on a [`Picker`] through
/// [`DateTarget::set_date`]
pub(crate) trait DateSink {
    fn date_selected(&mut self, date: Date);
}

impl<F: FnMut(Date)> DateSink for F {
    fn date_selected(&mut self, date: Date) {
        self(date);
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct NoopSink;

impl DateSink for NoopSink {
    fn date_selected(&mut self, _date: Date) {}
}

/// Something that a date can be pushed into from outside
pub(crate) trait DateTarget {
    fn set_date(&mut self, date: Date);
}

/// Month-view date picker state: the month being looked at and the day that
/// has been chosen.  The two are independent; navigating between months does
/// not change the selection, which only shows up in the grid while its month
/// is being viewed.
pub(crate) struct Picker<S = NoopSink> {
    viewed: YearMonth,
    selected: Date,
    on_date_selected: S,
}

impl Picker {
    pub(crate) fn new(initial: Date) -> Picker {
        Picker {
            viewed: YearMonth::of(initial),
            selected: initial,
            on_date_selected: NoopSink,
        }
    }
}

impl<S: DateSink> Picker<S> {
    pub(crate) fn on_date_selected<S2: DateSink>(self, sink: S2) -> Picker<S2> {
        Picker {
            viewed: self.viewed,
            selected: self.selected,
            on_date_selected: sink,
        }
    }

    pub(crate) fn viewed(&self) -> YearMonth {
        self.viewed
    }

    pub(crate) fn selected(&self) -> Date {
        self.selected
    }

    pub(crate) fn previous_month(&mut self) -> Result<(), OutOfTimeError> {
        self.viewed = checked(self.viewed.previous())?;
        log::debug!("Viewing {} {}", self.viewed.month, self.viewed.year);
        Ok(())
    }

    pub(crate) fn next_month(&mut self) -> Result<(), OutOfTimeError> {
        self.viewed = checked(self.viewed.next())?;
        log::debug!("Viewing {} {}", self.viewed.month, self.viewed.year);
        Ok(())
    }

    /// Select `day` of the month that a clicked cell belongs to.  Cells from
    /// the previous or next month move the view to that month first.
    pub(crate) fn select_day(&mut self, day: u8, month: CellMonth) -> Result<(), PickerError> {
        let target = match month {
            CellMonth::Previous => checked(self.viewed.previous())?,
            CellMonth::Current => self.viewed,
            CellMonth::Next => checked(self.viewed.next())?,
        };
        let Some(date) = target.day(day) else {
            return Err(PickerError::NoSuchDay {
                year: target.year,
                month: target.month,
                day,
            });
        };
        self.viewed = target;
        self.selected = date;
        log::debug!("Selected {date}");
        Ok(())
    }

    pub(crate) fn grid<N: MonthNames>(&self, names: &N) -> Grid {
        Grid::generate(self.viewed, self.selected, names)
    }

    pub(crate) fn title<N: MonthNames>(&self, names: &N) -> String {
        month_title(names, self.viewed())
    }
}

impl<S: DateSink> DateTarget for Picker<S> {
    fn set_date(&mut self, date: Date) {
        self.viewed = YearMonth::of(date);
        self.selected = date;
        log::info!("Date set to {date}");
        self.on_date_selected.date_selected(date);
    }
}

impl<S> fmt::Debug for Picker<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Picker")
            .field("viewed", &self.viewed)
            .field("selected", &self.selected)
            .finish_non_exhaustive()
    }
}

fn checked(ym: YearMonth) -> Result<YearMonth, OutOfTimeError> {
    if ym.is_representable() {
        Ok(ym)
    } else {
        Err(OutOfTimeError)
    }
}

#[derive(Copy, Clone, Debug, Eq, Error, PartialEq)]
#[error("reached the end of time")]
pub(crate) struct OutOfTimeError;

#[derive(Copy, Clone, Debug, Eq, Error, PartialEq)]
pub(crate) enum PickerError {
    #[error(transparent)]
    OutOfTime(#[from] OutOfTimeError),
    #[error("{month} {year} has no day {day}")]
    NoSuchDay { year: i32, month: Month, day: u8 },
}
