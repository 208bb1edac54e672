//! Application-wide constants

/// First page of the reading sequence (page 1 is not part of it)
pub const FIRST_PAGE: u16 = 2;

/// Last page of the mushaf
pub const LAST_PAGE: u16 = 604;

/// Number of page records in the reading sequence
pub const PAGE_COUNT: usize = (LAST_PAGE - FIRST_PAGE + 1) as usize;

/// Highest surah id
pub const MAX_SURAH_ID: u16 = 114;

/// Storage key for the last-read page
pub const LAST_READ_KEY: &str = "LAST_READ_PAGE";

/// Storage key for the memorization (hifdh) page
pub const HIFDH_KEY: &str = "HIFDH_PAGE";

/// Storage key for the standalone bookmark page
pub const BOOKMARK_KEY: &str = "bookmarkPage";

/// Storage key for the list of memorized pages
pub const HIFDH_PAGES_KEY: &str = "hifdhPages";

/// Storage key for the auto-save preference
pub const AUTO_SAVE_KEY: &str = "autoSaveEnabled";

/// Minimum terminal width required to run the application
pub const MIN_TERMINAL_WIDTH: u16 = 60;

/// Minimum terminal height required to run the application
pub const MIN_TERMINAL_HEIGHT: u16 = 20;

/// Terminal width from which two facing pages are shown
pub const TWO_PAGE_MIN_WIDTH: u16 = 120;

/// Maximum digits accepted by the page input popup
pub const MAX_PAGE_INPUT_LENGTH: usize = 3;

/// Default delay between a jump and its scroll command, in milliseconds
pub const DEFAULT_JUMP_DELAY_MS: u64 = 300;

/// Upper bound for the configurable jump delay, in milliseconds
pub const MAX_JUMP_DELAY_MS: u64 = 2000;

/// Interval of the audio progress ticker, in milliseconds
pub const AUDIO_TICK_MS: u64 = 500;

/// Default ceiling after which playback is forcibly stopped, in seconds
pub const DEFAULT_PLAYBACK_CEILING_SECS: u64 = 600;

/// Seek step for the audio bar, in seconds
pub const SEEK_STEP_SECS: f64 = 5.0;

/// Default external player command; `{file}` and `{offset}` are substituted
pub const DEFAULT_PLAYER_COMMAND: &str = "mpv --no-video --really-quiet --start={offset} {file}";

/// Pages that ship with a narration track when no audio directory scan is done
pub const DEFAULT_AUDIO_PAGES: [u16; 10] = [2, 458, 459, 460, 461, 462, 463, 464, 465, 466];

/// Frame duration in milliseconds for the UI render loop (targeting 60 FPS)
pub const FRAME_DURATION_MS: u64 = 16;

/// Debounce timeout for terminal resize events in milliseconds
pub const RESIZE_DEBOUNCE_MS: u64 = 200;
