use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Position, Rect};
use skipper_core::model::Skip;

use crate::app::{App, View};
use crate::ui;

#[derive(Debug, Clone)]
pub(crate) enum Action {
    None,
    Quit,
    /// Throw the view away and fetch the skips again
    Reload,
    /// Hand the confirmed skip to the checkout collaborator
    Checkout(Skip),
}

pub(crate) fn handle_key_event(key: KeyEvent, app: &mut App, screen: Rect) -> Action {
    use KeyCode::{Char, Down, Enter, Esc, Left, Right, Up};

    // Global quit shortcuts
    if key.code == Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Action::Quit;
    }
    if key.code == Char('q') && key.modifiers.is_empty() {
        return Action::Quit;
    }

    let mut action = Action::None;

    match app.view() {
        View::Loading => {}

        View::Failed => {
            if matches!(key.code, Enter | Char('r')) {
                action = Action::Reload;
            }
        }

        View::Ready if app.modal_is_open() => match key.code {
            Enter | Char('p') => {
                if let Some(skip) = app.proceed_to_checkout() {
                    action = Action::Checkout(skip);
                }
            }
            Esc | Char('b') => {
                app.close_modal();
            }
            _ => {}
        },

        View::Ready => {
            let [_, content_area, _] = ui::screen_layout(screen);
            let row_stride = isize::try_from(ui::grid_columns(content_area.width)).unwrap_or(1);

            match key.code {
                Left | Char('h') => app.move_focus(-1),
                Right | Char('l') => app.move_focus(1),
                Up | Char('k') => app.move_focus(-row_stride),
                Down | Char('j') => app.move_focus(row_stride),
                Enter | Char(' ') => app.toggle_focused(),
                Char('c') => {
                    app.continue_to_checkout();
                }
                Char('x') => app.change_selection(),
                _ => {}
            }
        }
    }
    action
}

/// A left click anywhere on a card toggles that card.
pub(crate) fn handle_mouse_event(mouse: MouseEvent, app: &mut App, screen: Rect) -> Action {
    if mouse.kind != MouseEventKind::Down(MouseButton::Left)
        || app.view() != View::Ready
        || app.modal_is_open()
    {
        return Action::None;
    }

    let position = Position::new(mouse.column, mouse.row);
    let clicked = ui::card_areas(screen, app)
        .into_iter()
        .find(|(_, area)| area.contains(position))
        .map(|(index, _)| index);

    if let Some(index) = clicked {
        app.focus(index);
        app.toggle_focused();
    }
    Action::None
}
