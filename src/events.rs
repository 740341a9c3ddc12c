use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, MouseEvent, MouseEventKind};

use crate::app::{App, View};

/// Poll for events with a timeout
pub fn poll_event(timeout: Duration) -> Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// Handle a key event
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    // If help is shown, any key closes it
    if app.show_help {
        app.show_help = false;
        return;
    }

    // Compose input captures everything while active
    if app.compose_active {
        handle_compose_input(app, key);
        return;
    }

    match key.code {
        // Quit
        KeyCode::Char('q') => app.quit(),

        // Switch between the patient list and the monitor
        KeyCode::Tab => match app.current_view {
            View::Patients => {
                if app.current_patient().is_some() {
                    app.current_view = View::Monitor;
                }
            }
            View::Monitor => app.current_view = View::Patients,
        },

        // Patient list navigation
        KeyCode::Up | KeyCode::Char('k') => {
            if app.current_view == View::Patients {
                app.select_prev();
            }
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if app.current_view == View::Patients {
                app.select_next();
            }
        }

        // Open the monitor for the selected patient
        KeyCode::Enter => {
            if app.current_view == View::Patients {
                app.open_selected_patient();
            }
        }

        // Go back (Esc and Backspace)
        KeyCode::Esc | KeyCode::Backspace => app.go_back(),

        // Compose an update for the monitored patient
        KeyCode::Char('m') => app.start_compose(),

        // Force a vitals refresh
        KeyCode::Char('r') => app.tick(),

        // Help
        KeyCode::Char('?') => app.show_help = true,

        _ => {}
    }
}

/// Handle key input while the compose box is active
fn handle_compose_input(app: &mut App, key: KeyEvent) {
    match key.code {
        // Submit the update
        KeyCode::Enter => app.send_update(),

        // Abandon it
        KeyCode::Esc => app.cancel_compose(),

        // Backspace
        KeyCode::Backspace => app.compose_pop(),

        // Type characters
        KeyCode::Char(c) => app.compose_push(c),

        _ => {}
    }
}

/// Handle mouse events
pub fn handle_mouse_event(app: &mut App, mouse: MouseEvent) {
    if app.current_view != View::Patients {
        return;
    }
    match mouse.kind {
        MouseEventKind::ScrollUp => app.select_prev(),
        MouseEventKind::ScrollDown => app.select_next(),
        _ => {}
    }
}
