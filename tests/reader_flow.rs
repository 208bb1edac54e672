use mushaf::app::{AppCommand, AppState};
use mushaf::audio::{AudioController, AudioState, ProcessBackend};
use mushaf::bookmarks::BookmarkStore;
use mushaf::persistence::{JsonFileStore, MemoryStore};
use mushaf::quran::AudioCatalog;
use mushaf::types::{Config, NoticeKind, UiMode};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

fn reader(store: BookmarkStore, start: Option<u16>) -> AppState {
    let config = Config {
        jump_delay_ms: 0,
        ..Config::default()
    };
    let audio = AudioController::new(
        Box::new(ProcessBackend::new("mpv {file}")),
        AudioCatalog::default(),
        Duration::from_secs(600),
    );
    let mut app = AppState::new(config, store, audio, start);
    app.update_viewport_size(100, 30);
    app
}

fn run_scrolls(app: &mut AppState) {
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
fn surah_and_page_jumps() {
    let mut app = reader(BookmarkStore::new(Arc::new(MemoryStore::new())), None);

    app.jump_to_surah(2);
    run_scrolls(&mut app);
    assert_eq!(app.current_page(), 2);

    app.jump_to_page(604);
    run_scrolls(&mut app);
    assert_eq!(app.current_page(), 604);
    assert!(app.is_last_page());

    for page in [1, 605] {
        app.ui_mode = UiMode::Normal;
        app.jump_to_page(page);
        assert_eq!(app.current_page(), 604);
        assert!(matches!(&app.ui_mode, UiMode::Notice(n) if n.kind == NoticeKind::Error));
    }
}

#[tokio::test]
async fn reading_mark_survives_restart() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("marks.json");

    {
        let store = BookmarkStore::new(Arc::new(JsonFileStore::new(&path)));
        assert!(store.save_reading_mark(150).await);
    }

    let store = BookmarkStore::new(Arc::new(JsonFileStore::new(&path)));
    let marks = store.load().await;
    assert_eq!(marks.reading, Some(150));
    assert_eq!(marks.hifdh, None);

    let mut app = reader(store, Some(2));
    app.handle_marks_loaded(marks);
    app.go_to_reading_mark();
    run_scrolls(&mut app);
    assert_eq!(app.current_page(), 150);
}

#[tokio::test]
async fn go_to_unset_mark_is_a_no_op() {
    let dir = TempDir::new().unwrap();
    let store = BookmarkStore::new(Arc::new(JsonFileStore::new(dir.path().join("marks.json"))));
    let marks = store.load().await;
    assert_eq!(marks.reading, None);

    let mut app = reader(store, Some(33));
    app.handle_marks_loaded(marks);
    app.go_to_hifdh_mark();
    assert_eq!(app.current_page(), 33);
    assert!(matches!(&app.ui_mode, UiMode::Notice(n) if n.message == "No page saved"));
}

#[test]
fn audio_without_asset_stays_idle() {
    let mut app = reader(BookmarkStore::new(Arc::new(MemoryStore::new())), Some(100));
    app.toggle_audio();
    assert_eq!(app.audio.state(), &AudioState::Idle);
    assert!(matches!(
        &app.ui_mode,
        UiMode::Notice(n) if n.message == "No audio available for page 100."
    ));
}
