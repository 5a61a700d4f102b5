use super::grid::{Cell, CellMonth, MonthNames};
use super::{DateSink, Picker};
use crate::theme::{
    CURSOR_MODIFIER, DAY_STYLE, OTHER_MONTH_STYLE, SELECTED_STYLE, TITLE_STYLE, WEEKDAY_STYLE,
};
use ratatui::{
    buffer::Buffer,
    layout::{Flex, Layout, Rect},
    style::Style,
    text::Text,
    widgets::{Paragraph, StatefulWidget, Widget},
};
use std::marker::PhantomData;

static HEADER: &str = "  S   M   T   W  Th   F  Sa ";

/// Number of columns per day of week
const DAY_WIDTH: u16 = 4;

/// Width of the calendar in columns
pub(crate) const MAIN_WIDTH: u16 = DAY_WIDTH * 7;

/// Number of lines above the first week: the month title, a rule, and the
/// weekday names
const HEADER_LINES: u16 = 3;

const WEEKS: u16 = 6;

/// Header, weeks, and the line describing the focused day
pub(crate) const TOTAL_HEIGHT: u16 = HEADER_LINES + WEEKS + 1;

const ACS_HLINE: char = '─';

/// Renders the month grid of a [`Picker`] with the day at position `cursor`
/// highlighted and its label shown underneath
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Calendar<N, S> {
    names: N,
    cursor: usize,
    _data: PhantomData<S>,
}

impl<N: MonthNames, S> Calendar<N, S> {
    pub(crate) fn new(names: N, cursor: usize) -> Calendar<N, S> {
        Calendar {
            names,
            cursor,
            _data: PhantomData,
        }
    }
}

impl<N: MonthNames, S: DateSink> StatefulWidget for Calendar<N, S> {
    type State = Picker<S>;

    /*
     * <        July 2024         >
     * ────────────────────────────
     *   S   M   T   W  Th   F  Sa
     *  30 [ 1]  2   3   4   5   6
     *   ⋮
     * July 1 2024 (selected)
     */

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let [area] = Layout::horizontal([MAIN_WIDTH])
            .flex(Flex::Center)
            .areas(area);
        let [area] = Layout::vertical([TOTAL_HEIGHT])
            .flex(Flex::Center)
            .areas(area);
        let grid = state.grid(&self.names);
        let mut canvas = BufferCanvas::new(area, buf);
        canvas.draw_title(&state.title(&self.names));
        canvas.draw_weekdays();
        for (i, week) in std::iter::zip(0u16.., grid.weeks()) {
            for (wd, cell) in std::iter::zip(0u16.., week) {
                let pos = usize::from(i * 7 + wd);
                canvas.draw_day(i, wd, cell, pos == self.cursor);
            }
        }
        if let Some(cell) = grid.get(self.cursor) {
            canvas.draw_label(&cell.label);
        }
    }
}

#[derive(Debug, Eq, PartialEq)]
struct BufferCanvas<'a> {
    area: Rect,
    buf: &'a mut Buffer,
}

impl<'a> BufferCanvas<'a> {
    fn new(area: Rect, buf: &'a mut Buffer) -> Self {
        Self { area, buf }
    }

    fn draw_title(&mut self, title: &str) {
        let inner = usize::from(MAIN_WIDTH - 2);
        self.mvprint(0, 0, format!("<{title:^inner$}>"), Some(TITLE_STYLE));
        self.hline(1, 0, ACS_HLINE, MAIN_WIDTH);
    }

    fn draw_weekdays(&mut self) {
        self.mvprint(2, 0, HEADER, Some(WEEKDAY_STYLE));
    }

    fn draw_day(&mut self, week_no: u16, wd: u16, cell: &Cell, focused: bool) {
        let mut style = match (cell.month, cell.selected) {
            (CellMonth::Current, true) => SELECTED_STYLE,
            (CellMonth::Current, false) => DAY_STYLE,
            (CellMonth::Previous | CellMonth::Next, _) => OTHER_MONTH_STYLE,
        };
        if focused {
            style = style.add_modifier(CURSOR_MODIFIER);
        }
        self.mvprint(
            HEADER_LINES + week_no,
            DAY_WIDTH * wd,
            cell.to_string(),
            Some(style),
        );
    }

    fn draw_label(&mut self, label: &str) {
        self.mvprint(HEADER_LINES + WEEKS, 0, label, None);
    }

    fn mvprint<S: AsRef<str>>(&mut self, y: u16, x: u16, s: S, style: Option<Style>) {
        if y < self.area.height && x < self.area.width {
            let text = Text::styled(s.as_ref(), style.unwrap_or_default());
            let width = u16::try_from(text.width()).unwrap_or(u16::MAX);
            // The Paragraph truncates text running past the calendar's area,
            // but the Rect given to it must lie entirely within the buffer.
            Paragraph::new(text).render(
                Rect {
                    x: x + self.area.x,
                    y: y + self.area.y,
                    width: (self.area.width - x).min(width),
                    height: 1,
                },
                self.buf,
            );
        }
    }

    fn hline(&mut self, y: u16, x: u16, ch: char, length: u16) {
        self.mvprint(y, x, String::from(ch).repeat(length.into()), None);
    }
}
