use crate::picker::DateTarget;
use crate::theme::{
    entry::{DISABLED_SET_STYLE, PLACEHOLDER_STYLE, READY_SET_STYLE},
    BASE_STYLE,
};
use ratatui::{
    buffer::Buffer,
    layout::{Flex, HorizontalAlignment, Layout, Margin, Rect},
    text::{Line, Span, Text},
    widgets::{Block, Clear, StatefulWidget, Widget},
};
use time::{format_description::BorrowedFormatItem, macros::format_description, Date};

pub(crate) static MDY_FMT: &[BorrowedFormatItem<'_>] =
    format_description!("[month]/[day]/[year]");

const PLACEHOLDER: &str = "MM/DD/YYYY";

/// Longest text the field will hold
const MAX_INPUT: usize = 20;

const OUTER_WIDTH: u16 = 26;
const OUTER_HEIGHT: u16 = 8;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Entry;

impl StatefulWidget for Entry {
    type State = EntryField;

    /*
     * ..........................
     * .┌────── Set Date ──────┐.
     * .│                      │.
     * .│      MM/DD/YYYY      │.
     * .│                      │.
     * .│        [Set]         │.
     * .└──────────────────────┘.
     * ..........................
     */

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let [outer_area] = Layout::horizontal([OUTER_WIDTH])
            .flex(Flex::Center)
            .areas(area);
        let [outer_area] = Layout::vertical([OUTER_HEIGHT])
            .flex(Flex::Center)
            .areas(outer_area);
        Clear.render(outer_area, buf);
        Block::new().style(BASE_STYLE).render(outer_area, buf);
        let block_area = outer_area.inner(Margin::new(1, 1));
        Block::bordered()
            .title(" Set Date ")
            .title_alignment(HorizontalAlignment::Center)
            .render(block_area, buf);
        let text_area = block_area.inner(Margin::new(1, 1));
        state.to_text().render(text_area, buf);
    }
}

/// Free-text date input.  The text is only ever interpreted as `MM/DD/YYYY`,
/// and only once it has exactly that shape.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct EntryField {
    buffer: String,
}

impl EntryField {
    pub(crate) fn new() -> EntryField {
        EntryField::default()
    }

    pub(crate) fn text(&self) -> &str {
        &self.buffer
    }

    /// Whether the "Set" button is enabled
    pub(crate) fn is_confirmable(&self) -> bool {
        matches_date_pattern(&self.buffer)
    }

    pub(crate) fn parse(&self) -> Option<Date> {
        if self.is_confirmable() {
            Date::parse(&self.buffer, &MDY_FMT).ok()
        } else {
            None
        }
    }

    /// Push the entered date into `target`.  Returns `false` without touching
    /// `target` if the text is not a valid date.
    pub(crate) fn confirm(&self, target: &mut dyn DateTarget) -> bool {
        if let Some(date) = self.parse() {
            log::debug!("Entered {:?}, setting {date}", self.buffer);
            target.set_date(date);
            true
        } else {
            log::debug!("Ignoring unparseable date {:?}", self.buffer);
            false
        }
    }

    pub(crate) fn handle_input(&mut self, input: EntryInput) -> EntryOutput {
        match input {
            EntryInput::Char(c) if self.buffer.chars().count() < MAX_INPUT && !c.is_control() => {
                self.buffer.push(c);
                EntryOutput::Ok
            }
            EntryInput::Backspace => {
                if self.buffer.pop().is_some() {
                    EntryOutput::Ok
                } else {
                    EntryOutput::Invalid
                }
            }
            EntryInput::Clear => {
                self.buffer.clear();
                EntryOutput::Ok
            }
            EntryInput::Enter if self.is_confirmable() => EntryOutput::Confirm,
            _ => EntryOutput::Invalid,
        }
    }

    fn to_text(&self) -> Text<'_> {
        let input = if self.text().is_empty() {
            Span::styled(PLACEHOLDER, PLACEHOLDER_STYLE)
        } else {
            Span::styled(self.text(), BASE_STYLE)
        };
        Text::from_iter([
            Line::styled("", BASE_STYLE),
            Line::from(input),
            Line::styled("", BASE_STYLE),
            // A bare span, so that only "[Set]" and not its centering padding
            // gets underlined
            Line::from(Span::styled(
                "[Set]",
                if self.is_confirmable() {
                    READY_SET_STYLE
                } else {
                    DISABLED_SET_STYLE
                },
            )),
        ])
        .centered()
    }
}

/// `\d{2}/\d{2}/\d{4}` over ASCII digits, anchored at both ends
fn matches_date_pattern(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, &b)| match i {
            2 | 5 => b == b'/',
            _ => b.is_ascii_digit(),
        })
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum EntryInput {
    Char(char),
    Backspace,
    Clear,
    Enter,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum EntryOutput {
    Ok,
    Invalid,
    Confirm,
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::{Color, Modifier};
    use rstest::rstest;
    use time::macros::date;

    #[derive(Debug, Default)]
    struct RecordingTarget(Vec<Date>);

    impl DateTarget for RecordingTarget {
        fn set_date(&mut self, date: Date) {
            self.0.push(date);
        }
    }

    fn field(s: &str) -> EntryField {
        let mut field = EntryField::new();
        for c in s.chars() {
            assert_eq!(field.handle_input(EntryInput::Char(c)), EntryOutput::Ok);
        }
        field
    }

    #[rstest]
    #[case("10/18/2022", true)]
    #[case("13/40/2024", true)]
    #[case("00/00/0000", true)]
    #[case("invalid date", false)]
    #[case("", false)]
    #[case("1/18/2022", false)]
    #[case("10/18/22", false)]
    #[case("10-18-2022", false)]
    #[case("10/18/2022 ", false)]
    #[case(" 10/18/2022", false)]
    #[case("10/18/20222", false)]
    #[case("１0/18/2022", false)]
    fn test_pattern(#[case] s: &str, #[case] ok: bool) {
        assert_eq!(field(s).is_confirmable(), ok);
    }

    #[test]
    fn test_confirm_sets_date_once() {
        let field = field("10/18/2022");
        let mut target = RecordingTarget::default();
        assert!(field.confirm(&mut target));
        assert_eq!(target.0, [date!(2022 - 10 - 18)]);
    }

    #[rstest]
    #[case("13/40/2024")]
    #[case("02/30/2024")]
    #[case("00/10/2024")]
    #[case("invalid date")]
    fn test_confirm_invalid_is_noop(#[case] s: &str) {
        let field = field(s);
        let mut target = RecordingTarget::default();
        assert!(!field.confirm(&mut target));
        assert!(target.0.is_empty());
    }

    #[test]
    fn test_leap_day() {
        assert_eq!(field("02/29/2024").parse(), Some(date!(2024 - 02 - 29)));
        assert_eq!(field("02/29/2023").parse(), None);
    }

    #[test]
    fn test_enter_gated_on_pattern() {
        let mut field = field("10/18/202");
        assert_eq!(field.handle_input(EntryInput::Enter), EntryOutput::Invalid);
        assert_eq!(field.handle_input(EntryInput::Char('2')), EntryOutput::Ok);
        assert_eq!(field.handle_input(EntryInput::Enter), EntryOutput::Confirm);
    }

    #[test]
    fn test_editing() {
        let mut field = field("10/18/2O22");
        assert!(!field.is_confirmable());
        for _ in 0..3 {
            assert_eq!(field.handle_input(EntryInput::Backspace), EntryOutput::Ok);
        }
        for c in "022".chars() {
            field.handle_input(EntryInput::Char(c));
        }
        assert_eq!(field.text(), "10/18/2022");
        assert!(field.is_confirmable());
        assert_eq!(field.handle_input(EntryInput::Clear), EntryOutput::Ok);
        assert_eq!(field.text(), "");
        assert_eq!(
            field.handle_input(EntryInput::Backspace),
            EntryOutput::Invalid
        );
    }

    #[test]
    fn test_max_input() {
        let mut field = field("01234567890123456789");
        assert_eq!(field.handle_input(EntryInput::Char('0')), EntryOutput::Invalid);
        assert_eq!(field.text().len(), MAX_INPUT);
    }

    #[test]
    fn test_control_chars_rejected() {
        let mut field = EntryField::new();
        assert_eq!(field.handle_input(EntryInput::Char('\t')), EntryOutput::Invalid);
        assert_eq!(field.text(), "");
    }

    #[test]
    fn test_render_placeholder() {
        let area = Rect::new(0, 0, OUTER_WIDTH, OUTER_HEIGHT);
        let mut buffer = Buffer::empty(area);
        Entry.render(area, &mut buffer, &mut EntryField::new());
        let line = |y: u16| {
            (0..OUTER_WIDTH)
                .map(|x| buffer[(x, y)].symbol())
                .collect::<String>()
        };
        assert!(line(1).contains(" Set Date "));
        assert_eq!(line(3), " │      MM/DD/YYYY      │ ");
        assert_eq!(line(5), " │        [Set]         │ ");
        assert_eq!(buffer[(8, 3)].fg, Color::DarkGray);
        assert_eq!(buffer[(10, 5)].fg, Color::DarkGray);
        assert!(!buffer[(10, 5)].modifier.contains(Modifier::UNDERLINED));
    }

    #[test]
    fn test_render_ready() {
        let area = Rect::new(0, 0, OUTER_WIDTH, OUTER_HEIGHT);
        let mut buffer = Buffer::empty(area);
        Entry.render(area, &mut buffer, &mut field("10/18/2022"));
        let line = |y: u16| {
            (0..OUTER_WIDTH)
                .map(|x| buffer[(x, y)].symbol())
                .collect::<String>()
        };
        assert_eq!(line(3), " │      10/18/2022      │ ");
        assert!(buffer[(10, 5)].modifier.contains(Modifier::UNDERLINED));
    }
}
