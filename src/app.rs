use crate::entry::{Entry, EntryField, EntryInput, EntryOutput};
use crate::help::Help;
use crate::picker::{Calendar, DateSink, DateTarget, English, Grid, Picker, GRID_CELLS};
use crate::theme::BASE_STYLE;
use crossterm::event::{read, KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    backend::Backend,
    buffer::Buffer,
    layout::Rect,
    widgets::{StatefulWidget, Widget},
    Terminal,
};
use std::io::{self, Write};
use time::Date;

const DAYS_IN_WEEK: isize = 7;

#[derive(Debug)]
pub(crate) struct App<S> {
    picker: Picker<S>,
    today: Date,
    // Position of the focused cell within the 42-cell grid
    cursor: usize,
    state: AppState,
}

impl<S: DateSink> App<S> {
    pub(crate) fn new(picker: Picker<S>, today: Date) -> App<S> {
        let mut app = App {
            picker,
            today,
            cursor: 0,
            state: AppState::Calendar,
        };
        app.focus_selected();
        app
    }

    /// Run the UI until the user quits.  Returns the selected date, or `None`
    /// if the user aborted with Ctrl-C.
    pub(crate) fn run<B: Backend>(
        mut self,
        mut terminal: Terminal<B>,
    ) -> io::Result<Option<Date>>
    where
        io::Error: From<B::Error>,
    {
        loop {
            match self.state {
                AppState::Quitting => return Ok(Some(self.picker.selected())),
                AppState::Aborted => return Ok(None),
                _ => (),
            }
            self.draw(&mut terminal)?;
            self.handle_input()?;
        }
    }

    fn draw<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()>
    where
        io::Error: From<B::Error>,
    {
        terminal.draw(|frame| frame.render_widget(self, frame.area()))?;
        Ok(())
    }

    fn handle_input(&mut self) -> io::Result<()> {
        let normal_modifiers = KeyModifiers::NONE | KeyModifiers::SHIFT;
        if let Some(KeyEvent {
            code, modifiers, ..
        }) = read()?.as_key_press_event()
        {
            if modifiers == KeyModifiers::CONTROL && code == KeyCode::Char('c') {
                self.state = AppState::Aborted;
            } else if !normal_modifiers.contains(modifiers) || !self.handle_key(code) {
                self.beep()?;
            }
        }
        // else: Redraw on resize, and we might as well redraw on other stuff
        // too
        Ok(())
    }

    // Returns `false` if the key did nothing
    fn handle_key(&mut self, key: KeyCode) -> bool {
        match &mut self.state {
            AppState::Calendar => match key {
                KeyCode::Char('h') | KeyCode::Left => self.move_cursor(-1),
                KeyCode::Char('l') | KeyCode::Right => self.move_cursor(1),
                KeyCode::Char('k') | KeyCode::Up => self.move_cursor(-DAYS_IN_WEEK),
                KeyCode::Char('j') | KeyCode::Down => self.move_cursor(DAYS_IN_WEEK),
                KeyCode::Enter | KeyCode::Char(' ') => self.select_focused(),
                KeyCode::Char('p' | '<') | KeyCode::PageUp => self.previous_month(),
                KeyCode::Char('n' | '>') | KeyCode::PageDown => self.next_month(),
                KeyCode::Char('t') | KeyCode::Home => {
                    self.jump_to(self.today);
                    true
                }
                KeyCode::Char('e' | '/') => {
                    self.state = AppState::Entering(EntryField::new());
                    true
                }
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.state = AppState::Quitting;
                    true
                }
                KeyCode::Char('?') => {
                    self.state = AppState::Helping;
                    true
                }
                _ => false,
            },
            AppState::Helping => {
                self.state = AppState::Calendar;
                true
            }
            AppState::Entering(field) => {
                let output = match key {
                    KeyCode::Esc => {
                        self.state = AppState::Calendar;
                        return true;
                    }
                    KeyCode::Char(c) => field.handle_input(EntryInput::Char(c)),
                    KeyCode::Backspace => field.handle_input(EntryInput::Backspace),
                    KeyCode::Delete => field.handle_input(EntryInput::Clear),
                    KeyCode::Enter => field.handle_input(EntryInput::Enter),
                    _ => EntryOutput::Invalid,
                };
                match output {
                    EntryOutput::Ok => true,
                    EntryOutput::Invalid => false,
                    EntryOutput::Confirm => {
                        let confirmed = field.confirm(&mut self.picker);
                        if confirmed {
                            self.state = AppState::Calendar;
                            self.focus_selected();
                        }
                        confirmed
                    }
                }
            }
            AppState::Quitting | AppState::Aborted => false,
        }
    }

    fn beep(&self) -> io::Result<()> {
        let mut stdout = io::stdout();
        stdout.write_all(b"\x07")?;
        stdout.flush()
    }

    fn grid(&self) -> Grid {
        self.picker.grid(&English)
    }

    /// Put the cursor on the selected day if it is in view, otherwise on the
    /// first of the month
    fn focus_selected(&mut self) {
        let grid = self.grid();
        self.cursor = grid
            .position_of_selected()
            .unwrap_or_else(|| grid.leading());
    }

    fn move_cursor(&mut self, delta: isize) -> bool {
        if let Some(pos) = self
            .cursor
            .checked_add_signed(delta)
            .filter(|&pos| pos < GRID_CELLS)
        {
            self.cursor = pos;
            true
        } else {
            false
        }
    }

    fn select_focused(&mut self) -> bool {
        let Some(cell) = self.grid().get(self.cursor).cloned() else {
            return false;
        };
        match self.picker.select_day(cell.day, cell.month) {
            Ok(()) => {
                self.focus_selected();
                true
            }
            Err(e) => {
                log::debug!("Could not select {}: {e}", cell.label);
                false
            }
        }
    }

    fn previous_month(&mut self) -> bool {
        let r = self.picker.previous_month().is_ok();
        self.focus_selected();
        r
    }

    fn next_month(&mut self) -> bool {
        let r = self.picker.next_month().is_ok();
        self.focus_selected();
        r
    }

    fn jump_to(&mut self, date: Date) {
        self.picker.set_date(date);
        self.focus_selected();
    }
}

impl<S: DateSink> Widget for &mut App<S> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, BASE_STYLE);
        Calendar::new(English, self.cursor).render(area, buf, &mut self.picker);
        match self.state {
            AppState::Helping => Help.render(area, buf),
            AppState::Entering(ref mut field) => Entry.render(area, buf, field),
            _ => (),
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
enum AppState {
    Calendar,
    Helping,
    Entering(EntryField),
    Quitting,
    Aborted,
}
