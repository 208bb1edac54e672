use crate::async_tasks::MarkKind;
use crate::audio::{AudioController, AudioState};
use crate::bookmarks::BookmarkStore;
use crate::constants::{LAST_PAGE, PAGE_COUNT, SEEK_STEP_SECS};
use crate::error::{AudioError, NavError};
use crate::navigator::{JumpRequest, Navigator};
use crate::quran::SectionIndex;
use crate::types::{Config, Marks, MenuItem, Notice, QuranPage, Surah, UiMode};
use crate::ui::theme::PagePalette;
use crate::ui::widgets::page_view::PageViewState;
use std::time::{Duration, Instant};

/// Side effects requested by the UI, executed by the task runner
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppCommand {
    Scroll {
        generation: u64,
        display_index: usize,
        delay: Duration,
    },
    SaveMark { kind: MarkKind, page: u16 },
    ToggleHifdhPage(u16),
    SetAutoSave(bool),
    SaveBookmark(Option<u16>),
}

pub struct AppState {
    pub index: &'static SectionIndex,
    pub navigator: Navigator,
    pub view: PageViewState,
    pub config: Config,
    pub palette: PagePalette,
    pub should_quit: bool,

    // UI Mode
    pub ui_mode: UiMode,
    pub menu_selected_idx: usize,
    pub surah_selected_idx: usize,
    pub input_buffer: String,
    pub titlebar_visible: bool,
    pub statusbar_visible: bool,
    pub viewport: (u16, u16),

    // Marks
    pub marks: Marks,
    pub bookmark_store: BookmarkStore,

    // Audio
    pub audio: AudioController,
    pub spinner_epoch: Instant,

    /// Set when the reader was opened on an explicit page or surah
    explicit_start: bool,
    direction_toggled: bool,
    scroll_generation: u64,
    pending_commands: Vec<AppCommand>,
    marks_loaded: bool,
    edits: MarkEdits,
    /// Set once the reader moves; the resume jump is skipped afterwards
    navigated: bool,
}

/// Marks the reader changed before the stored ones arrived
#[derive(Debug, Default)]
struct MarkEdits {
    reading: bool,
    hifdh: bool,
    bookmark: bool,
    auto_save: bool,
    /// Last memorized state chosen per page; written once the stored list is known
    memorized: Vec<(u16, bool)>,
}

fn toggle_page(pages: &mut Vec<u16>, page: u16) {
    match pages.binary_search(&page) {
        Ok(idx) => {
            pages.remove(idx);
        }
        Err(idx) => pages.insert(idx, page),
    }
}

impl AppState {
    pub fn new(
        config: Config,
        bookmark_store: BookmarkStore,
        audio: AudioController,
        start_page: Option<u16>,
    ) -> Self {
        let navigator = Navigator::new(
            start_page.unwrap_or(crate::constants::FIRST_PAGE),
            config.direction,
            Duration::from_millis(config.jump_delay_ms),
        );
        let mut view = PageViewState::new(PAGE_COUNT);
        view.scroll_to_offset(navigator.current_display_index());

        AppState {
            index: SectionIndex::global(),
            navigator,
            view,
            config,
            palette: PagePalette::default(),
            should_quit: false,
            ui_mode: UiMode::Normal,
            menu_selected_idx: 0,
            surah_selected_idx: 0,
            input_buffer: String::new(),
            titlebar_visible: true,
            statusbar_visible: true,
            viewport: (80, 24),
            marks: Marks {
                auto_save: true,
                ..Marks::default()
            },
            bookmark_store,
            audio,
            spinner_epoch: Instant::now(),
            explicit_start: start_page.is_some(),
            direction_toggled: false,
            scroll_generation: 0,
            pending_commands: Vec::new(),
            marks_loaded: false,
            edits: MarkEdits::default(),
            navigated: false,
        }
    }

    pub fn current_page(&self) -> u16 {
        self.navigator.current_page()
    }

    pub fn current_page_record(&self) -> Option<&QuranPage> {
        self.index.page(self.current_page())
    }

    pub fn current_surah(&self) -> Option<&Surah> {
        self.index.current_surah(self.current_page())
    }

    /// Commands queued since the last call
    pub fn take_commands(&mut self) -> Vec<AppCommand> {
        std::mem::take(&mut self.pending_commands)
    }

    fn notify(&mut self, notice: Notice) {
        tracing::debug!("Notice: {} - {}", notice.title, notice.message);
        self.ui_mode = UiMode::Notice(notice);
    }

    fn report_nav_error(&mut self, error: NavError) {
        tracing::info!("Navigation rejected: {}", error);
        if error.is_informational() {
            self.notify(Notice::info("Info", error.to_string()));
        } else {
            self.notify(Notice::error(error.to_string()));
        }
    }

    // Navigation

    fn schedule_scroll(&mut self, request: JumpRequest) {
        self.navigated = true;
        self.scroll_generation += 1;
        self.pending_commands.push(AppCommand::Scroll {
            generation: self.scroll_generation,
            display_index: request.display_index,
            delay: request.delay,
        });
    }

    pub fn jump_to_page(&mut self, page: u16) {
        match self.navigator.jump_to_page(page) {
            Ok(request) => self.schedule_scroll(request),
            Err(e) => self.report_nav_error(e),
        }
    }

    pub fn jump_to_surah(&mut self, surah_id: u16) {
        let request = self.navigator.jump_to_surah(surah_id);
        self.schedule_scroll(request);
    }

    pub fn go_to_reading_mark(&mut self) {
        match self.navigator.jump_to_mark(self.marks.reading) {
            Ok(request) => self.schedule_scroll(request),
            Err(e) => self.report_nav_error(e),
        }
    }

    pub fn go_to_hifdh_mark(&mut self) {
        match self.navigator.jump_to_mark(self.marks.hifdh) {
            Ok(request) => self.schedule_scroll(request),
            Err(e) => self.report_nav_error(e),
        }
    }

    pub fn first_page(&mut self) {
        let request = self.navigator.first_page();
        self.schedule_scroll(request);
    }

    pub fn last_page(&mut self) {
        let request = self.navigator.last_page();
        self.schedule_scroll(request);
    }

    /// Apply a due scroll command unless a newer jump superseded it
    pub fn apply_scroll(&mut self, generation: u64, display_index: usize) {
        if generation != self.scroll_generation {
            tracing::debug!(
                "Dropping stale scroll (generation {} < {})",
                generation,
                self.scroll_generation
            );
            return;
        }

        if let Err(e) = self.view.scroll_to_index(display_index) {
            tracing::debug!("Scroll to index failed ({}), using offset", e);
            self.view.scroll_to_offset(display_index);
        }
        self.sync_visible();
    }

    /// Visible-item callback: the page view decides the current page
    fn sync_visible(&mut self) {
        if !self.view.is_laid_out() {
            return;
        }
        if let Some(page) = self.navigator.set_visible(self.view.offset()) {
            tracing::debug!("Visible page is now {}", page);
        }
    }

    /// Move one step (or one spread) towards the left of the screen
    pub fn step_left(&mut self) {
        self.step_display(false);
    }

    pub fn step_right(&mut self) {
        self.step_display(true);
    }

    fn step_display(&mut self, rightwards: bool) {
        let forward = match self.navigator.direction() {
            crate::types::DisplayDirection::LeftToRight => rightwards,
            crate::types::DisplayDirection::RightToLeft => !rightwards,
        };

        let step = if self.view.is_two_page() { 2 } else { 1 };
        let position = self.navigator.position();
        let base = position - position % step;
        let target = if forward {
            (base + step).min(PAGE_COUNT - 1)
        } else {
            base.saturating_sub(step)
        };

        // Swipes supersede any pending jump
        self.navigated = true;
        self.scroll_generation += 1;
        let display_index = self.navigator.display_index(target);
        if self.view.scroll_to_index(display_index).is_err() {
            self.view.scroll_to_offset(display_index);
        }
        self.sync_visible();
    }

    /// Pages on screen, left to right
    pub fn visible_pages(&self) -> Vec<&QuranPage> {
        let position = self.navigator.position();
        let mut positions = vec![position];
        if self.view.is_two_page() {
            let partner = position ^ 1;
            if partner < PAGE_COUNT {
                positions.push(partner);
            }
        }

        let mut displayed: Vec<(usize, &QuranPage)> = positions
            .into_iter()
            .filter_map(|p| {
                let page = SectionIndex::page_at(p).and_then(|n| self.index.page(n))?;
                Some((self.navigator.display_index(p), page))
            })
            .collect();
        displayed.sort_by_key(|(display, _)| *display);
        displayed.into_iter().map(|(_, page)| page).collect()
    }

    pub fn toggle_direction(&mut self) {
        let direction = self.navigator.direction().toggled();
        tracing::info!("Display direction: {:?}", direction);
        self.navigator.set_direction(direction);
        self.config.direction = direction;
        self.direction_toggled = true;

        // Same page, new on-screen index
        self.scroll_generation += 1;
        let display_index = self.navigator.current_display_index();
        if self.view.scroll_to_index(display_index).is_err() {
            self.view.scroll_to_offset(display_index);
        }
    }

    /// Whether the reader changed direction this session
    pub fn direction_toggled(&self) -> bool {
        self.direction_toggled
    }

    pub fn update_viewport_size(&mut self, width: u16, height: u16) {
        self.viewport = (width, height);
        self.view.layout(width);
        self.sync_visible();
    }

    pub fn toggle_titlebar(&mut self) {
        self.titlebar_visible = !self.titlebar_visible;
    }

    pub fn toggle_statusbar(&mut self) {
        self.statusbar_visible = !self.statusbar_visible;
    }

    // Page input

    pub fn open_page_input(&mut self) {
        self.input_buffer.clear();
        self.ui_mode = UiMode::PageInput;
    }

    pub fn submit_page_input(&mut self) {
        match Navigator::parse_page_input(&self.input_buffer) {
            Ok(page) => {
                self.input_buffer.clear();
                self.ui_mode = UiMode::Normal;
                self.jump_to_page(page);
            }
            Err(e) => {
                self.input_buffer.clear();
                self.report_nav_error(e);
            }
        }
    }

    // Marks

    /// Merge stored marks; values the reader already changed win
    pub fn handle_marks_loaded(&mut self, loaded: Marks) {
        if self.marks_loaded {
            tracing::debug!("Ignoring repeated marks load");
            return;
        }
        self.marks_loaded = true;

        let edits = std::mem::take(&mut self.edits);
        if !edits.reading {
            self.marks.reading = loaded.reading;
        }
        if !edits.hifdh {
            self.marks.hifdh = loaded.hifdh;
        }
        if !edits.bookmark {
            self.marks.bookmark = loaded.bookmark;
        }
        if !edits.auto_save {
            self.marks.auto_save = loaded.auto_save;
        }

        let mut pages = loaded.hifdh_pages;
        for (page, memorized) in edits.memorized {
            if pages.binary_search(&page).is_ok() != memorized {
                toggle_page(&mut pages, page);
                self.pending_commands.push(AppCommand::ToggleHifdhPage(page));
            }
        }
        self.marks.hifdh_pages = pages;

        // Without an explicit target, reopen where the reader left off
        if !self.explicit_start
            && !self.navigated
            && let Some(page) = self.marks.reading
        {
            tracing::info!("Resuming at last read page {}", page);
            self.jump_to_page(page);
        }
    }

    pub fn save_reading_mark(&mut self) {
        let page = self.current_page();
        self.marks.reading = Some(page);
        self.edits.reading = true;
        self.pending_commands.push(AppCommand::SaveMark {
            kind: MarkKind::Reading,
            page,
        });
    }

    pub fn save_hifdh_mark(&mut self) {
        let page = self.current_page();
        self.marks.hifdh = Some(page);
        self.edits.hifdh = true;
        self.pending_commands.push(AppCommand::SaveMark {
            kind: MarkKind::Hifdh,
            page,
        });
    }

    pub fn handle_mark_saved(&mut self, kind: MarkKind, page: u16, saved: bool) {
        if !saved {
            // Failure was logged by the store; the mark stays for this session
            return;
        }
        let notice = match kind {
            MarkKind::Reading => Notice::info("Reading", format!("Reading mark set at page {}.", page)),
            MarkKind::Hifdh => Notice::info("Hifdh", format!("Page {} saved for hifdh.", page)),
        };
        self.notify(notice);
    }

    /// Bookmark the current page, or remove the bookmark if it is already here
    pub fn toggle_bookmark(&mut self) {
        let page = self.current_page();
        let (bookmark, message) = if self.marks.bookmark == Some(page) {
            (None, format!("Bookmark removed from page {}.", page))
        } else {
            (Some(page), format!("Page {} bookmarked.", page))
        };
        self.marks.bookmark = bookmark;
        self.edits.bookmark = true;
        self.pending_commands.push(AppCommand::SaveBookmark(bookmark));
        self.notify(Notice::info("Bookmark", message));
    }

    pub fn go_to_bookmark(&mut self) {
        match self.navigator.jump_to_mark(self.marks.bookmark) {
            Ok(request) => self.schedule_scroll(request),
            Err(e) => self.report_nav_error(e),
        }
    }

    pub fn toggle_memorized(&mut self) {
        let page = self.current_page();
        toggle_page(&mut self.marks.hifdh_pages, page);
        if self.marks_loaded {
            self.pending_commands.push(AppCommand::ToggleHifdhPage(page));
            return;
        }

        // The stored list is not known yet; remember the outcome instead
        let memorized = self.is_memorized(page);
        match self.edits.memorized.iter_mut().find(|(p, _)| *p == page) {
            Some(entry) => entry.1 = memorized,
            None => self.edits.memorized.push((page, memorized)),
        }
    }

    pub fn is_memorized(&self, page: u16) -> bool {
        self.marks.hifdh_pages.binary_search(&page).is_ok()
    }

    pub fn toggle_auto_save(&mut self) {
        self.marks.auto_save = !self.marks.auto_save;
        self.edits.auto_save = true;
        self.pending_commands
            .push(AppCommand::SetAutoSave(self.marks.auto_save));
        let state = if self.marks.auto_save { "enabled" } else { "disabled" };
        self.notify(Notice::info("Auto-save", format!("Auto-save {}.", state)));
    }

    /// Page to write as the reading mark on quit, if auto-save is on
    pub fn quit_save_target(&self) -> Option<u16> {
        self.marks.auto_save.then(|| self.current_page())
    }

    // Audio

    pub fn toggle_audio(&mut self) {
        let page = self.current_page();
        match self.audio.toggle(page) {
            Ok(()) => {}
            Err(AudioError::NoAudioForPage(page)) => {
                self.notify(Notice::info(
                    "Audio",
                    format!("No audio available for page {}.", page),
                ));
            }
            Err(AudioError::Backend(_)) => {
                // Shown by the audio bar; pressing play again retries
            }
        }
    }

    pub fn stop_audio(&mut self) {
        self.audio.stop();
    }

    pub fn seek_forward(&mut self) {
        self.audio.seek_by(SEEK_STEP_SECS);
    }

    pub fn seek_backward(&mut self) {
        self.audio.seek_by(-SEEK_STEP_SECS);
    }

    pub fn audio_tick(&mut self) {
        self.audio.tick();
    }

    pub fn audio_error(&self) -> Option<&str> {
        match self.audio.state() {
            AudioState::Error(message) => Some(message),
            _ => None,
        }
    }

    // Menu

    pub fn toggle_menu(&mut self) {
        self.ui_mode = match self.ui_mode {
            UiMode::Menu => UiMode::Normal,
            _ => UiMode::Menu,
        };
    }

    pub fn menu_next(&mut self) {
        self.menu_selected_idx = (self.menu_selected_idx + 1) % MenuItem::ALL.len();
    }

    pub fn menu_previous(&mut self) {
        self.menu_selected_idx = self
            .menu_selected_idx
            .checked_sub(1)
            .unwrap_or(MenuItem::ALL.len() - 1);
    }

    pub fn menu_select(&mut self) {
        let item = MenuItem::ALL[self.menu_selected_idx.min(MenuItem::ALL.len() - 1)];
        tracing::debug!("Menu item selected: {:?}", item);
        // Close the menu first; actions may open their own popup
        self.ui_mode = UiMode::Normal;
        match item {
            MenuItem::SaveReading => self.save_reading_mark(),
            MenuItem::GoToReading => self.go_to_reading_mark(),
            MenuItem::SaveHifdh => self.save_hifdh_mark(),
            MenuItem::GoToHifdh => self.go_to_hifdh_mark(),
            MenuItem::GoToPage => self.open_page_input(),
            MenuItem::SurahList => self.open_surah_list(),
            MenuItem::ToggleMemorized => self.toggle_memorized(),
            MenuItem::ToggleAutoSave => self.toggle_auto_save(),
            MenuItem::PlayAudio => self.toggle_audio(),
            MenuItem::StopAudio => self.stop_audio(),
        }
    }

    // Surah list

    pub fn open_surah_list(&mut self) {
        self.surah_selected_idx = self
            .current_surah()
            .map(|s| (s.id as usize).saturating_sub(1))
            .unwrap_or(0);
        self.ui_mode = UiMode::SurahList;
    }

    pub fn surah_next(&mut self, count: usize) {
        let last = self.index.surahs().len().saturating_sub(1);
        self.surah_selected_idx = (self.surah_selected_idx + count).min(last);
    }

    pub fn surah_previous(&mut self, count: usize) {
        self.surah_selected_idx = self.surah_selected_idx.saturating_sub(count);
    }

    pub fn surah_select(&mut self) {
        let Some(surah) = self.index.surahs().get(self.surah_selected_idx) else {
            return;
        };
        let id = surah.id;
        self.ui_mode = UiMode::Normal;
        self.jump_to_surah(id);
    }

    pub fn is_last_page(&self) -> bool {
        self.current_page() == LAST_PAGE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::{AudioBackend, BackendStatus};
    use crate::persistence::MemoryStore;
    use crate::quran::AudioCatalog;
    use crate::types::{DisplayDirection, NoticeKind};
    use std::path::{Path, PathBuf};
    use std::sync::Arc;

    struct SilentBackend;

    impl AudioBackend for SilentBackend {
        fn start(&mut self, _path: &Path, _offset: Duration) -> Result<(), AudioError> {
            Ok(())
        }
        fn pause(&mut self) -> Result<(), AudioError> {
            Ok(())
        }
        fn resume(&mut self) -> Result<(), AudioError> {
            Ok(())
        }
        fn stop(&mut self) {}
        fn seek(&mut self, _position: Duration) -> Result<(), AudioError> {
            Ok(())
        }
        fn position(&self) -> Duration {
            Duration::ZERO
        }
        fn duration(&self) -> Option<Duration> {
            None
        }
        fn poll(&mut self) -> BackendStatus {
            BackendStatus::Running
        }
    }

    fn app(start: Option<u16>) -> AppState {
        let config = Config {
            jump_delay_ms: 0,
            ..Config::default()
        };
        let audio = AudioController::new(
            Box::new(SilentBackend),
            AudioCatalog::from_entries([(2, PathBuf::from("002.mp3"))]),
            Duration::from_secs(600),
        );
        let store = BookmarkStore::new(Arc::new(MemoryStore::new()));
        let mut app = AppState::new(config, store, audio, start);
        app.update_viewport_size(80, 24);
        app
    }

    /// Execute queued scrolls immediately, as the task runner would
    fn flush(app: &mut AppState) {
        for command in app.take_commands() {
            if let AppCommand::Scroll {
                generation,
                display_index,
                ..
            } = command
            {
                app.apply_scroll(generation, display_index);
            }
        }
    }

    #[test]
    fn test_start_page_from_cli() {
        let app = app(Some(300));
        assert_eq!(app.current_page(), 300);
    }

    #[test]
    fn test_jump_to_page_lands_and_scrolls() {
        let mut app = app(None);
        app.jump_to_page(604);
        flush(&mut app);
        assert_eq!(app.current_page(), 604);
        assert!(app.is_last_page());
        assert_eq!(app.view.offset(), app.navigator.current_display_index());
    }

    #[test]
    fn test_invalid_page_shows_error_and_stays() {
        let mut app = app(Some(10));
        app.jump_to_page(605);
        assert_eq!(app.current_page(), 10);
        assert!(app.take_commands().is_empty());
        assert!(matches!(&app.ui_mode, UiMode::Notice(n) if n.kind == NoticeKind::Error));
    }

    #[test]
    fn test_page_input_rejects_text() {
        let mut app = app(Some(10));
        app.open_page_input();
        app.input_buffer.push_str("1a");
        app.submit_page_input();
        assert_eq!(app.current_page(), 10);
        assert!(matches!(app.ui_mode, UiMode::Notice(_)));

        app.open_page_input();
        app.input_buffer.push_str("150");
        app.submit_page_input();
        flush(&mut app);
        assert_eq!(app.current_page(), 150);
        assert_eq!(app.ui_mode, UiMode::Normal);
    }

    #[test]
    fn test_missing_mark_is_informational() {
        let mut app = app(Some(10));
        app.go_to_reading_mark();
        assert_eq!(app.current_page(), 10);
        assert!(matches!(&app.ui_mode, UiMode::Notice(n) if n.kind == NoticeKind::Info));
    }

    #[test]
    fn test_marks_loaded_resumes_reading() {
        let mut app = app(None);
        app.handle_marks_loaded(Marks {
            reading: Some(150),
            ..Marks::default()
        });
        flush(&mut app);
        assert_eq!(app.current_page(), 150);
    }

    #[test]
    fn test_explicit_start_is_kept_after_marks_load() {
        let mut app = app(Some(20));
        app.handle_marks_loaded(Marks {
            reading: Some(150),
            ..Marks::default()
        });
        flush(&mut app);
        assert_eq!(app.current_page(), 20);
    }

    #[test]
    fn test_marks_changed_before_load_are_kept() {
        let mut app = app(Some(42));
        app.save_reading_mark();
        app.toggle_bookmark();
        app.toggle_auto_save();
        app.take_commands();

        app.handle_marks_loaded(Marks {
            reading: Some(7),
            hifdh: Some(8),
            bookmark: Some(9),
            auto_save: true,
            ..Marks::default()
        });
        assert_eq!(app.marks.reading, Some(42));
        assert_eq!(app.marks.bookmark, Some(42));
        assert!(!app.marks.auto_save);
        assert_eq!(app.marks.hifdh, Some(8));
    }

    #[test]
    fn test_memorized_toggles_wait_for_load() {
        let mut app = app(Some(9));
        app.toggle_memorized();
        assert!(app.is_memorized(9));
        assert!(app.take_commands().is_empty());

        app.jump_to_page(12);
        flush(&mut app);
        app.toggle_memorized();
        app.toggle_memorized();
        assert!(!app.is_memorized(12));

        app.handle_marks_loaded(Marks {
            hifdh_pages: vec![5, 12],
            auto_save: true,
            ..Marks::default()
        });
        assert_eq!(app.marks.hifdh_pages, vec![5, 9]);
        assert_eq!(
            app.take_commands(),
            vec![AppCommand::ToggleHifdhPage(9), AppCommand::ToggleHifdhPage(12)]
        );

        app.toggle_memorized();
        assert_eq!(app.marks.hifdh_pages, vec![5, 9, 12]);
        assert_eq!(app.take_commands(), vec![AppCommand::ToggleHifdhPage(12)]);
    }

    #[test]
    fn test_no_resume_after_reader_moved() {
        let mut app = app(None);
        app.jump_to_page(30);
        flush(&mut app);

        app.handle_marks_loaded(Marks {
            reading: Some(150),
            auto_save: true,
            ..Marks::default()
        });
        flush(&mut app);
        assert_eq!(app.current_page(), 30);
        assert_eq!(app.marks.reading, Some(150));
    }

    #[test]
    fn test_save_reading_mark_queues_write() {
        let mut app = app(Some(42));
        app.save_reading_mark();
        assert_eq!(app.marks.reading, Some(42));
        assert_eq!(
            app.take_commands(),
            vec![AppCommand::SaveMark {
                kind: MarkKind::Reading,
                page: 42
            }]
        );
        app.handle_mark_saved(MarkKind::Reading, 42, true);
        assert!(matches!(app.ui_mode, UiMode::Notice(_)));
    }

    #[test]
    fn test_failed_save_is_silent() {
        let mut app = app(Some(42));
        app.handle_mark_saved(MarkKind::Hifdh, 42, false);
        assert_eq!(app.ui_mode, UiMode::Normal);
    }

    #[test]
    fn test_stale_scroll_is_dropped() {
        let mut app = app(Some(10));
        app.jump_to_page(100);
        app.jump_to_page(200);
        let commands = app.take_commands();
        for command in commands.into_iter().rev() {
            if let AppCommand::Scroll {
                generation,
                display_index,
                ..
            } = command
            {
                app.apply_scroll(generation, display_index);
            }
        }
        assert_eq!(app.current_page(), 200);
    }

    #[test]
    fn test_scroll_before_layout_falls_back_to_offset() {
        let config = Config {
            jump_delay_ms: 0,
            ..Config::default()
        };
        let audio = AudioController::new(
            Box::new(SilentBackend),
            AudioCatalog::default(),
            Duration::from_secs(600),
        );
        let store = BookmarkStore::new(Arc::new(MemoryStore::new()));
        let mut app = AppState::new(config, store, audio, None);

        app.jump_to_page(50);
        flush(&mut app);
        assert_eq!(app.view.offset(), app.navigator.current_display_index());

        app.update_viewport_size(80, 24);
        assert_eq!(app.current_page(), 50);
    }

    #[test]
    fn test_step_follows_display_direction() {
        let mut app = app(Some(10));
        assert_eq!(app.navigator.direction(), DisplayDirection::RightToLeft);
        app.step_left();
        assert_eq!(app.current_page(), 11);
        app.step_right();
        assert_eq!(app.current_page(), 10);

        app.toggle_direction();
        app.step_right();
        assert_eq!(app.current_page(), 11);
    }

    #[test]
    fn test_two_page_spreads() {
        let mut app = app(Some(2));
        app.update_viewport_size(160, 40);
        let numbers: Vec<u16> = app.visible_pages().iter().map(|p| p.number).collect();
        assert_eq!(numbers, vec![3, 2]);

        app.step_left();
        assert_eq!(app.current_page(), 4);
        let numbers: Vec<u16> = app.visible_pages().iter().map(|p| p.number).collect();
        assert_eq!(numbers, vec![5, 4]);
    }

    #[test]
    fn test_audio_for_page_without_track() {
        let mut app = app(Some(3));
        app.toggle_audio();
        assert_eq!(app.audio.state(), &AudioState::Idle);
        assert!(matches!(&app.ui_mode, UiMode::Notice(n) if n.message.contains("No audio")));
    }

    #[test]
    fn test_audio_plays_on_narrated_page() {
        let mut app = app(Some(2));
        app.toggle_audio();
        assert_eq!(app.audio.state(), &AudioState::Loading);
        app.audio_tick();
        assert_eq!(app.audio.state(), &AudioState::Playing);
        app.stop_audio();
        assert_eq!(app.audio.state(), &AudioState::Idle);
    }

    #[test]
    fn test_surah_list_jump() {
        let mut app = app(Some(2));
        app.open_surah_list();
        assert_eq!(app.surah_selected_idx, 1);
        app.surah_next(16);
        app.surah_select();
        flush(&mut app);
        assert_eq!(app.current_page(), 293);
    }

    #[test]
    fn test_menu_wraps_and_dispatches() {
        let mut app = app(Some(2));
        app.toggle_menu();
        app.menu_previous();
        assert_eq!(app.menu_selected_idx, MenuItem::ALL.len() - 1);
        app.menu_next();
        assert_eq!(app.menu_selected_idx, 0);
        app.menu_select();
        assert_eq!(app.marks.reading, Some(2));
    }

    #[test]
    fn test_bookmark_toggle_and_jump() {
        let mut app = app(Some(77));
        app.toggle_bookmark();
        assert_eq!(app.marks.bookmark, Some(77));
        assert_eq!(
            app.take_commands(),
            vec![AppCommand::SaveBookmark(Some(77))]
        );

        app.jump_to_page(300);
        app.go_to_bookmark();
        flush(&mut app);
        assert_eq!(app.current_page(), 77);

        app.toggle_bookmark();
        assert_eq!(app.marks.bookmark, None);
        assert_eq!(app.take_commands(), vec![AppCommand::SaveBookmark(None)]);
    }

    #[test]
    fn test_direction_toggle_is_tracked() {
        let mut app = app(Some(10));
        assert!(!app.direction_toggled());
        app.toggle_direction();
        assert!(app.direction_toggled());
        assert_eq!(app.config.direction, DisplayDirection::LeftToRight);
        assert_eq!(app.current_page(), 10);
    }

    #[test]
    fn test_memorized_toggle_and_auto_save() {
        let mut app = app(Some(9));
        app.toggle_memorized();
        assert!(app.is_memorized(9));
        app.toggle_memorized();
        assert!(!app.is_memorized(9));

        assert_eq!(app.quit_save_target(), Some(9));
        app.toggle_auto_save();
        assert_eq!(app.quit_save_target(), None);
    }
}
