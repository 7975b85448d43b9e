use chrono::Local;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::{App, ComposerField, Intent, View};
use crate::model::NoteColor;

/// Where a key press goes.
#[derive(Debug, Clone, PartialEq)]
pub enum Route {
    Intent(Intent),
    /// Typed into the focused text field.
    Text(KeyEvent),
    Ignore,
}

pub fn route(app: &App<'_>, key: KeyEvent) -> Route {
    if key.kind == KeyEventKind::Release {
        return Route::Ignore;
    }

    if app.notice.is_some() {
        return match key.code {
            KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ') => {
                Route::Intent(Intent::DismissNotice)
            }
            _ => Route::Ignore,
        };
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    if ctrl && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('q')) {
        return Route::Intent(Intent::Quit);
    }

    if app.composer.open {
        return route_composer(app, key, ctrl);
    }

    match key.code {
        KeyCode::F(1) => return Route::Intent(Intent::SwitchView(View::Wall)),
        KeyCode::F(2) => return Route::Intent(Intent::SwitchView(View::Calendar)),
        KeyCode::F(3) => return Route::Intent(Intent::SwitchView(View::Profile)),
        _ => {}
    }

    match app.views.active() {
        View::Wall => route_wall(app, key),
        View::Calendar => route_calendar(key),
        View::Profile => route_profile(key, ctrl),
    }
}

fn view_hotkey(code: KeyCode) -> Option<Intent> {
    match code {
        KeyCode::Char('1') => Some(Intent::SwitchView(View::Wall)),
        KeyCode::Char('2') => Some(Intent::SwitchView(View::Calendar)),
        KeyCode::Char('3') => Some(Intent::SwitchView(View::Profile)),
        KeyCode::Char('q') => Some(Intent::Quit),
        _ => None,
    }
}

fn route_wall(app: &App<'_>, key: KeyEvent) -> Route {
    if let Some(intent) = view_hotkey(key.code) {
        return Route::Intent(intent);
    }
    let intent = match key.code {
        KeyCode::Left | KeyCode::Char('h') => Intent::MoveCard(-1),
        KeyCode::Right | KeyCode::Char('l') => Intent::MoveCard(1),
        KeyCode::Up | KeyCode::Char('k') => Intent::MoveTask(-1),
        KeyCode::Down | KeyCode::Char('j') => Intent::MoveTask(1),
        KeyCode::Char('n') | KeyCode::Char('a') | KeyCode::Char('+') => Intent::OpenComposer,
        KeyCode::Char('r') => Intent::RefreshNotes,
        KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Char('x') => {
            if app.wall.add_card_selected() {
                Intent::OpenComposer
            } else if let Some(id) = app.wall.selected_task_id() {
                Intent::ToggleTask(id.clone())
            } else {
                return Route::Ignore;
            }
        }
        KeyCode::Char('d') | KeyCode::Delete => match app.wall.selected_note() {
            Some(note) => Intent::DeleteNote(note.id.clone()),
            None => return Route::Ignore,
        },
        _ => return Route::Ignore,
    };
    Route::Intent(intent)
}

fn route_calendar(key: KeyEvent) -> Route {
    if let Some(intent) = view_hotkey(key.code) {
        return Route::Intent(intent);
    }
    match key.code {
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('p') => {
            Route::Intent(Intent::PrevMonth)
        }
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('n') => {
            Route::Intent(Intent::NextMonth)
        }
        KeyCode::Char('t') => Route::Intent(Intent::CurrentMonth(Local::now().date_naive())),
        _ => Route::Ignore,
    }
}

fn route_profile(key: KeyEvent, ctrl: bool) -> Route {
    match key.code {
        KeyCode::Tab | KeyCode::Down => Route::Intent(Intent::FocusNext),
        KeyCode::BackTab | KeyCode::Up => Route::Intent(Intent::FocusPrev),
        KeyCode::Enter => Route::Intent(Intent::SaveProfile),
        KeyCode::Char('s') if ctrl => Route::Intent(Intent::SaveProfile),
        _ => Route::Text(key),
    }
}

fn route_composer(app: &App<'_>, key: KeyEvent, ctrl: bool) -> Route {
    match key.code {
        KeyCode::Esc => return Route::Intent(Intent::CancelComposer),
        KeyCode::Char('s') if ctrl => return Route::Intent(Intent::SubmitComposer),
        KeyCode::Tab => return Route::Intent(Intent::FocusNext),
        KeyCode::BackTab => return Route::Intent(Intent::FocusPrev),
        _ => {}
    }

    match app.composer.focus {
        ComposerField::Title => match key.code {
            KeyCode::Enter => Route::Intent(Intent::FocusNext),
            _ => Route::Text(key),
        },
        ComposerField::Tasks => Route::Text(key),
        ComposerField::Color => {
            let current = app.composer.color();
            let intent = match key.code {
                KeyCode::Left | KeyCode::Char('h') => Intent::SelectColor(current.prev()),
                KeyCode::Right | KeyCode::Char('l') => Intent::SelectColor(current.next()),
                KeyCode::Char('y') => Intent::SelectColor(NoteColor::Yellow),
                KeyCode::Char('p') => Intent::SelectColor(NoteColor::Pink),
                KeyCode::Char('o') => Intent::SelectColor(NoteColor::Orange),
                KeyCode::Char('b') => Intent::SelectColor(NoteColor::Blue),
                KeyCode::Enter => Intent::SubmitComposer,
                _ => return Route::Ignore,
            };
            Route::Intent(intent)
        }
    }
}
