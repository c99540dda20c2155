//! Keyboard and mouse input handling for the TUI.
//!
//! Input is translated into an [`Action`] first, then applied to the
//! [`App`]. Applying an action may produce a [`Command`] for the worker.
//!
//! # Key Bindings
//!
//! | Key                 | Action                 |
//! |---------------------|------------------------|
//! | `1`-`7`             | Select time range      |
//! | `t h a m w i r`     | Chart a field          |
//! | `Esc` / `0`         | Clear the chart        |
//! | `←` / `→`           | Previous/next field    |
//! | `R`                 | Reload from station    |
//! | `T`                 | Toggle theme           |
//! | `?`                 | Toggle help            |
//! | `q`                 | Quit                   |

use crossterm::event::{KeyCode, MouseButton, MouseEvent, MouseEventKind};

use weatherdash_core::{Command, Field, Msg, TimeRange};

use super::app::App;
use super::ui::{Hit, hit_test};

/// User actions that can be triggered by input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    /// Re-fetch the reading history.
    Reload,
    SelectRange(TimeRange),
    SelectField(Field),
    ClearField,
    NextField,
    PreviousField,
    ToggleHelp,
    ToggleTheme,
    /// Mouse click at coordinates.
    MouseClick { x: u16, y: u16 },
    /// No action (unrecognized input).
    None,
}

/// Key used to chart each field.
pub fn field_key(field: Field) -> char {
    match field {
        Field::Temperature => 't',
        Field::Humidity => 'h',
        Field::Aqi => 'a',
        Field::Time => 'm',
        Field::WifiStrength => 'w',
        Field::HeatIndex => 'i',
        Field::Raining => 'r',
    }
}

/// Map a key code to an action.
///
/// While the help overlay is open, any key other than `q` closes it.
pub fn handle_key(key: KeyCode, help_open: bool) -> Action {
    if help_open {
        return match key {
            KeyCode::Char('q') => Action::Quit,
            _ => Action::ToggleHelp,
        };
    }

    match key {
        KeyCode::Char('q') => Action::Quit,
        KeyCode::Char('R') => Action::Reload,
        KeyCode::Char('T') => Action::ToggleTheme,
        KeyCode::Char('?') => Action::ToggleHelp,
        KeyCode::Esc | KeyCode::Char('0') => Action::ClearField,
        KeyCode::Right => Action::NextField,
        KeyCode::Left => Action::PreviousField,
        KeyCode::Char(c @ '1'..='7') => {
            let index = (c as usize) - ('1' as usize);
            Action::SelectRange(TimeRange::ALL[index])
        }
        KeyCode::Char(c) => Field::ALL
            .iter()
            .copied()
            .find(|f| field_key(*f) == c)
            .map(Action::SelectField)
            .unwrap_or(Action::None),
        _ => Action::None,
    }
}

/// Map a mouse event to an action.
pub fn handle_mouse(event: MouseEvent) -> Action {
    match event.kind {
        MouseEventKind::Down(MouseButton::Left) => Action::MouseClick {
            x: event.column,
            y: event.row,
        },
        _ => Action::None,
    }
}

/// Apply an action to the application state.
///
/// Returns a command for the worker when the action needs one.
pub fn apply_action(app: &mut App, action: Action) -> Option<Command> {
    match action {
        Action::Quit => {
            app.quit();
            None
        }
        Action::Reload => {
            if app.fetching.is_some() {
                app.push_status_message("Already loading".to_string());
                return None;
            }
            app.dispatch(Msg::Reload);
            Some(Command::Fetch)
        }
        Action::SelectRange(range) => {
            app.dispatch(Msg::SelectRange(range));
            None
        }
        Action::SelectField(field) => {
            app.dispatch(Msg::SelectField(field));
            None
        }
        Action::ClearField => {
            app.dispatch(Msg::ClearField);
            None
        }
        Action::NextField => {
            let next = app
                .state
                .selection
                .field
                .map(Field::next)
                .unwrap_or(Field::ALL[0]);
            app.dispatch(Msg::SelectField(next));
            None
        }
        Action::PreviousField => {
            let previous = app
                .state
                .selection
                .field
                .map(Field::previous)
                .unwrap_or(Field::ALL[Field::ALL.len() - 1]);
            app.dispatch(Msg::SelectField(previous));
            None
        }
        Action::ToggleHelp => {
            app.toggle_help();
            None
        }
        Action::ToggleTheme => {
            app.theme = app.theme.toggle();
            None
        }
        Action::MouseClick { x, y } => {
            match hit_test(app.frame_area, x, y) {
                Some(Hit::Tile(field)) => app.dispatch(Msg::SelectField(field)),
                Some(Hit::Range(range)) => app.dispatch(Msg::SelectRange(range)),
                None => {}
            }
            None
        }
        Action::None => None,
    }
}
