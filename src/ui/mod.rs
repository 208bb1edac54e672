pub mod input_handler;
pub mod layout;
pub mod theme;
pub mod widgets;

use crate::app::AppState;
use crate::error::Result;
use crossterm::event::KeyEvent;
use input_handler::InputHandler;

pub fn handle_key_event(app: &mut AppState, key: KeyEvent) -> Result<()> {
    InputHandler.handle_key(app, key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::{AudioController, ProcessBackend};
    use crate::bookmarks::BookmarkStore;
    use crate::persistence::MemoryStore;
    use crate::quran::AudioCatalog;
    use crate::types::{Config, UiMode};
    use crossterm::event::{KeyCode, KeyModifiers};
    use std::sync::Arc;
    use std::time::Duration;

    fn app(start: u16) -> AppState {
        let config = Config {
            jump_delay_ms: 0,
            ..Config::default()
        };
        let audio = AudioController::new(
            Box::new(ProcessBackend::new("mpv {file}")),
            AudioCatalog::default(),
            Duration::from_secs(600),
        );
        let store = BookmarkStore::new(Arc::new(MemoryStore::new()));
        let mut app = AppState::new(config, store, audio, Some(start));
        app.update_viewport_size(80, 24);
        app
    }

    fn press(app: &mut AppState, code: KeyCode) {
        handle_key_event(app, KeyEvent::new(code, KeyModifiers::NONE)).unwrap();
    }

    #[test]
    fn test_page_input_flow() {
        let mut app = app(10);
        press(&mut app, KeyCode::Char('p'));
        assert_eq!(app.ui_mode, UiMode::PageInput);
        for c in "3005".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        assert_eq!(app.input_buffer, "300");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.ui_mode, UiMode::Normal);
        assert_eq!(app.current_page(), 300);
    }

    #[test]
    fn test_quit_keys() {
        let mut app = app(10);
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);

        let mut app = self::app(10);
        handle_key_event(
            &mut app,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        )
        .unwrap();
        assert!(app.should_quit);
    }

    #[test]
    fn test_page_input_ignores_letters() {
        let mut app = app(10);
        press(&mut app, KeyCode::Char('p'));
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.should_quit);
        assert_eq!(app.input_buffer, "");
        press(&mut app, KeyCode::Enter);
        assert!(matches!(app.ui_mode, UiMode::Notice(_)));
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.ui_mode, UiMode::Normal);
        assert_eq!(app.current_page(), 10);
    }

    #[test]
    fn test_menu_and_help_toggle() {
        let mut app = app(10);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.ui_mode, UiMode::Menu);
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.ui_mode, UiMode::Normal);

        press(&mut app, KeyCode::Char('?'));
        assert_eq!(app.ui_mode, UiMode::Help);
        press(&mut app, KeyCode::Char('?'));
        assert_eq!(app.ui_mode, UiMode::Normal);
    }

    #[test]
    fn test_first_and_last_keys() {
        let mut app = app(10);
        press(&mut app, KeyCode::Char('G'));
        assert_eq!(app.current_page(), 604);
        press(&mut app, KeyCode::Char('g'));
        assert_eq!(app.current_page(), 2);
    }
}
