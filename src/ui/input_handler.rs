use crate::app::AppState;
use crate::constants::MAX_PAGE_INPUT_LENGTH;
use crate::error::Result;
use crate::types::UiMode;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

const SURAH_PAGE_STEP: usize = 10;

pub struct InputHandler;

impl InputHandler {
    /// Handle quit and bar toggles
    /// Returns true if the key was handled, false otherwise
    fn handle_common_controls(app: &mut AppState, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('q') => {
                app.should_quit = true;
                true
            }
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                app.should_quit = true;
                true
            }
            KeyCode::Char('t') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                app.toggle_titlebar();
                true
            }
            KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                app.toggle_statusbar();
                true
            }
            KeyCode::Char('?') | KeyCode::F(1) => {
                app.ui_mode = UiMode::Help;
                true
            }
            _ => false,
        }
    }

    pub fn handle_key(&mut self, app: &mut AppState, key: KeyEvent) -> Result<()> {
        match &app.ui_mode {
            UiMode::Normal => Self::handle_reader(app, key),
            UiMode::Menu => Self::handle_menu(app, key),
            UiMode::SurahList => Self::handle_surah_list(app, key),
            UiMode::PageInput => Self::handle_page_input(app, key),
            UiMode::Help => Self::handle_help(app, key),
            UiMode::Notice(_) => Self::handle_notice(app, key),
        }
    }

    fn handle_reader(app: &mut AppState, key: KeyEvent) -> Result<()> {
        if Self::handle_common_controls(app, key) {
            return Ok(());
        }

        match key.code {
            // Paging
            KeyCode::Left | KeyCode::Char('h') => app.step_left(),
            KeyCode::Right | KeyCode::Char('l') => app.step_right(),
            KeyCode::Char('g') | KeyCode::Home => app.first_page(),
            KeyCode::Char('G') | KeyCode::End => app.last_page(),

            // Jumps
            KeyCode::Char('p') => app.open_page_input(),
            KeyCode::Char('s') => app.open_surah_list(),
            KeyCode::Char('d') => app.toggle_direction(),

            // Marks
            KeyCode::Char('r') => app.save_reading_mark(),
            KeyCode::Char('R') => app.go_to_reading_mark(),
            KeyCode::Char('f') => app.save_hifdh_mark(),
            KeyCode::Char('F') => app.go_to_hifdh_mark(),
            KeyCode::Char('x') => app.toggle_memorized(),
            KeyCode::Char('b') => app.toggle_bookmark(),
            KeyCode::Char('B') => app.go_to_bookmark(),

            // Audio
            KeyCode::Char('a') => app.toggle_audio(),
            KeyCode::Char('A') => app.stop_audio(),
            KeyCode::Char(',') => app.seek_backward(),
            KeyCode::Char('.') => app.seek_forward(),

            KeyCode::Tab | KeyCode::Char('m') => app.toggle_menu(),
            _ => {}
        }
        Ok(())
    }

    fn handle_menu(app: &mut AppState, key: KeyEvent) -> Result<()> {
        if Self::handle_common_controls(app, key) {
            return Ok(());
        }

        match key.code {
            KeyCode::Esc | KeyCode::Tab | KeyCode::Char('m') => app.toggle_menu(),
            KeyCode::Char('j') | KeyCode::Down => app.menu_next(),
            KeyCode::Char('k') | KeyCode::Up => app.menu_previous(),
            KeyCode::Enter => app.menu_select(),
            _ => {}
        }
        Ok(())
    }

    fn handle_surah_list(app: &mut AppState, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Esc | KeyCode::Char('s') => {
                app.ui_mode = UiMode::Normal;
            }
            KeyCode::Char('q') => {
                app.should_quit = true;
            }
            KeyCode::Char('j') | KeyCode::Down => app.surah_next(1),
            KeyCode::Char('k') | KeyCode::Up => app.surah_previous(1),
            KeyCode::PageDown => app.surah_next(SURAH_PAGE_STEP),
            KeyCode::PageUp => app.surah_previous(SURAH_PAGE_STEP),
            KeyCode::Char('g') | KeyCode::Home => app.surah_selected_idx = 0,
            KeyCode::Char('G') | KeyCode::End => app.surah_next(usize::MAX / 2),
            KeyCode::Enter => app.surah_select(),
            _ => {}
        }
        Ok(())
    }

    fn handle_page_input(app: &mut AppState, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Esc => {
                tracing::debug!("Page input cancelled");
                app.input_buffer.clear();
                app.ui_mode = UiMode::Normal;
            }
            KeyCode::Enter => app.submit_page_input(),
            KeyCode::Backspace => {
                app.input_buffer.pop();
            }
            KeyCode::Char(c) if c.is_ascii_digit() => {
                if app.input_buffer.len() < MAX_PAGE_INPUT_LENGTH {
                    app.input_buffer.push(c);
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn handle_help(app: &mut AppState, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Esc | KeyCode::Char('?') | KeyCode::F(1) => {
                app.ui_mode = UiMode::Normal;
            }
            KeyCode::Char('q') => {
                app.should_quit = true;
            }
            _ => {}
        }
        Ok(())
    }

    fn handle_notice(app: &mut AppState, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char(' ') => {
                app.ui_mode = UiMode::Normal;
            }
            KeyCode::Char('q') => {
                app.should_quit = true;
            }
            _ => {}
        }
        Ok(())
    }
}
