use crate::application::{App, AppMode, FormField, Screen};
use crate::infrastructure::SystemClipboard;
use crossterm::event::{KeyCode, KeyModifiers};

/// Translates key presses into [`App`] operations.
pub struct InputHandler;

impl InputHandler {
    /// Handles one key press.
    ///
    /// Ctrl+C and Ctrl+Q quit from anywhere and F1 toggles help. Other keys go
    /// to the help popup when it is open, otherwise to the mounted screen.
    /// On the form, printable keys edit the focused text field, so a plain
    /// `q` only quits while a select or the submit button has focus.
    pub fn handle_key_event(app: &mut App, key: KeyCode, modifiers: KeyModifiers) {
        if modifiers.contains(KeyModifiers::CONTROL) {
            if matches!(key, KeyCode::Char('c') | KeyCode::Char('q')) {
                app.should_quit = true;
            }
            return;
        }

        if key == KeyCode::F(1) {
            app.toggle_help();
            return;
        }

        match app.mode {
            AppMode::Help => Self::handle_help_mode(app, key),
            AppMode::Normal => {
                if matches!(app.screen, Screen::Creation(_)) {
                    Self::handle_form(app, key);
                } else {
                    Self::handle_detail(app, key);
                }
            }
        }
    }

    fn handle_form(app: &mut App, key: KeyCode) {
        let Screen::Creation(form) = &mut app.screen else {
            return;
        };
        let focus = form.focus;

        match key {
            KeyCode::Tab => form.focus = focus.next(),
            KeyCode::BackTab => form.focus = focus.previous(),
            KeyCode::Enter => app.submit_form(),
            _ if focus.is_text() => {
                let field = if focus == FormField::Name {
                    &mut form.name
                } else {
                    &mut form.email
                };
                match key {
                    KeyCode::Char(c) => field.insert(c),
                    KeyCode::Backspace => field.backspace(),
                    KeyCode::Delete => field.delete(),
                    KeyCode::Left => field.move_left(),
                    KeyCode::Right => field.move_right(),
                    KeyCode::Home => field.move_home(),
                    KeyCode::End => field.move_end(),
                    KeyCode::Down => form.focus = focus.next(),
                    KeyCode::Up => form.focus = focus.previous(),
                    _ => {}
                }
            }
            KeyCode::Char('q') => app.should_quit = true,
            KeyCode::Up | KeyCode::Left | KeyCode::Char('k') | KeyCode::Char('h') => match focus {
                FormField::State => app.cycle_state(false),
                FormField::City => app.cycle_city(false),
                _ => form.focus = focus.previous(),
            },
            KeyCode::Down | KeyCode::Right | KeyCode::Char('j') | KeyCode::Char('l') => match focus {
                FormField::State => app.cycle_state(true),
                FormField::City => app.cycle_city(true),
                _ => form.focus = focus.next(),
            },
            _ => {}
        }
    }

    fn handle_detail(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('b') => app.back(),
            KeyCode::Char('r') => app.reload(),
            KeyCode::Char('y') => {
                if let Some(text) = app.clipboard_text() {
                    let result = SystemClipboard::copy_text(&text);
                    app.set_clipboard_result(result);
                }
            }
            KeyCode::Char('q') => app.should_quit = true,
            _ => {}
        }
    }

    fn handle_help_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') => {
                app.mode = AppMode::Normal;
            }
            KeyCode::Up | KeyCode::Char('k') => {
                app.help_scroll = app.help_scroll.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                app.help_scroll += 1;
            }
            KeyCode::PageUp => {
                app.help_scroll = app.help_scroll.saturating_sub(5);
            }
            KeyCode::PageDown => {
                app.help_scroll += 5;
            }
            KeyCode::Home => {
                app.help_scroll = 0;
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::testing::state;
    use crate::application::{CreationScreen, Job};
    use crate::domain::{MAX_NAME_CHARS, Route};

    fn press(app: &mut App, key: KeyCode) {
        InputHandler::handle_key_event(app, key, KeyModifiers::NONE);
    }

    fn form(app: &mut App) -> &mut CreationScreen {
        match &mut app.screen {
            Screen::Creation(form) => form,
            Screen::Detail(_) => panic!("detail screen mounted"),
        }
    }

    #[test]
    fn test_typing_into_name_field() {
        let mut app = App::default();
        for c in "Ana q".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        press(&mut app, KeyCode::Backspace);
        press(&mut app, KeyCode::Backspace);

        assert_eq!(form(&mut app).name.value, "Ana");
        assert!(!app.should_quit);
    }

    #[test]
    fn test_name_field_stops_at_max_length() {
        let mut app = App::default();
        for _ in 0..MAX_NAME_CHARS + 5 {
            press(&mut app, KeyCode::Char('a'));
        }

        let form = form(&mut app);
        assert_eq!(form.name.len(), MAX_NAME_CHARS);
        assert_eq!(form.name.cursor, MAX_NAME_CHARS);
    }

    #[test]
    fn test_tab_moves_focus_to_email() {
        let mut app = App::default();
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Char('a'));

        let form = form(&mut app);
        assert_eq!(form.focus, FormField::Email);
        assert_eq!(form.email.value, "a");
        assert!(form.name.is_empty());
    }

    #[test]
    fn test_arrow_on_state_field_requests_cities() {
        let mut app = App::default();
        app.take_jobs();
        {
            let form = form(&mut app);
            form.states = vec![state(4, "Pará")];
            form.focus = FormField::State;
        }

        press(&mut app, KeyCode::Down);

        assert_eq!(form(&mut app).selected_state, Some(4));
        let jobs = app.take_jobs();
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].1, Job::LoadCities { state_id: 4 });
    }

    #[test]
    fn test_enter_with_empty_form_only_notifies() {
        let mut app = App::default();
        app.take_jobs();

        press(&mut app, KeyCode::Enter);

        assert!(app.take_jobs().is_empty());
        assert_eq!(app.notifications.len(), 1);
    }

    #[test]
    fn test_ctrl_q_quits_from_text_field() {
        let mut app = App::default();
        InputHandler::handle_key_event(&mut app, KeyCode::Char('q'), KeyModifiers::CONTROL);
        assert!(app.should_quit);
        assert!(form(&mut app).name.is_empty());
    }

    #[test]
    fn test_q_quits_outside_text_fields() {
        let mut app = App::default();
        form(&mut app).focus = FormField::Submit;
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }

    #[test]
    fn test_detail_back_key() {
        let mut app = App::default();
        app.navigate(Route::PersonDetail("abc123".into()));

        press(&mut app, KeyCode::Char('b'));

        assert_eq!(app.route, Route::NewPerson);
        assert!(app.history.is_empty());
    }

    #[test]
    fn test_help_toggle_and_scroll() {
        let mut app = App::default();
        press(&mut app, KeyCode::F(1));
        assert_eq!(app.mode, AppMode::Help);

        press(&mut app, KeyCode::PageDown);
        press(&mut app, KeyCode::Up);
        assert_eq!(app.help_scroll, 4);

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.mode, AppMode::Normal);
    }
}
