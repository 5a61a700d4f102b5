use ratatui::style::{Color, Modifier, Style};

pub(crate) const BASE_STYLE: Style = Style::new().fg(Color::White).bg(Color::Black);

pub(crate) const TITLE_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

pub(crate) const WEEKDAY_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

pub(crate) const DAY_STYLE: Style = BASE_STYLE;

/// Days of the previous and next month that fill out the first and last weeks
pub(crate) const OTHER_MONTH_STYLE: Style = BASE_STYLE.fg(Color::DarkGray);

pub(crate) const SELECTED_STYLE: Style = Style::new()
    .fg(Color::LightYellow)
    .bg(Color::Black)
    .add_modifier(Modifier::BOLD);

pub(crate) const CURSOR_MODIFIER: Modifier = Modifier::REVERSED;

pub(crate) mod entry {
    use super::*;

    pub(crate) const PLACEHOLDER_STYLE: Style = BASE_STYLE.fg(Color::DarkGray);

    pub(crate) const READY_SET_STYLE: Style = BASE_STYLE.add_modifier(Modifier::UNDERLINED);

    pub(crate) const DISABLED_SET_STYLE: Style = BASE_STYLE.fg(Color::DarkGray);
}
