use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::App;

/// Dispatches one key press against the widget state. Returns the text to
/// hand to the send pipeline, if the key completed a send.
pub fn handle_chat_input(key: KeyEvent, app: &mut App) -> Option<String> {
    match key.code {
        KeyCode::Esc => {
            app.should_quit = true;
            None
        }
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.should_quit = true;
            None
        }
        KeyCode::Enter => {
            if app.busy {
                return None;
            }
            if !app.input.trim().is_empty() {
                return Some(app.input.drain(..).collect());
            }
            // Enter on the prompt panel sends the highlighted prompt
            if app.showing_prompts() {
                return Some(app.selected_prompt().to_string());
            }
            None
        }
        KeyCode::Up => {
            if app.showing_prompts() {
                app.prev_prompt();
            } else {
                app.scroll_up();
            }
            None
        }
        KeyCode::Down => {
            if app.showing_prompts() {
                app.next_prompt();
            } else {
                app.scroll_down();
            }
            None
        }
        KeyCode::PageUp => {
            app.scroll_up();
            None
        }
        KeyCode::PageDown => {
            app.scroll_down();
            None
        }
        KeyCode::Backspace => {
            if !app.busy {
                app.input.pop();
            }
            None
        }
        // input field is disabled while a send is in flight
        KeyCode::Char(c) if !app.busy => {
            app.input.push(c);
            None
        }
        _ => None,
    }
}
