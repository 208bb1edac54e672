use crate::constants::{
    DEFAULT_JUMP_DELAY_MS, DEFAULT_PLAYBACK_CEILING_SECS, DEFAULT_PLAYER_COMMAND, LAST_PAGE,
};
use std::path::PathBuf;

/// A named section of the mushaf spanning a contiguous range of pages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Surah {
    pub id: u16,
    pub name_ar: &'static str,
    pub name_en: &'static str,
    pub start_page: u16,
    pub pages: u16,
}

impl Surah {
    /// Last page covered by this surah, capped at the final page
    pub fn end_page(&self) -> u16 {
        (self.start_page + self.pages.saturating_sub(1)).min(LAST_PAGE)
    }

    pub fn contains_page(&self, page: u16) -> bool {
        self.start_page <= page && page <= self.end_page()
    }
}

/// One displayed page: the unit of navigation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuranPage {
    pub number: u16,
    pub image: String,
    pub surahs: Vec<u16>,
}

/// Order in which the page sequence is laid out on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum DisplayDirection {
    /// Mushaf order: the following page appears to the left
    RightToLeft,
    LeftToRight,
}

impl DisplayDirection {
    pub fn toggled(self) -> Self {
        match self {
            DisplayDirection::RightToLeft => DisplayDirection::LeftToRight,
            DisplayDirection::LeftToRight => DisplayDirection::RightToLeft,
        }
    }
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Config {
    pub direction: DisplayDirection,
    pub jump_delay_ms: u64,
    pub pages_dir: Option<PathBuf>,
    pub audio_dir: Option<PathBuf>,
    pub player_command: String,
    pub playback_ceiling_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            direction: DisplayDirection::RightToLeft,
            jump_delay_ms: DEFAULT_JUMP_DELAY_MS,
            pages_dir: None,
            audio_dir: None,
            player_command: DEFAULT_PLAYER_COMMAND.to_string(),
            playback_ceiling_secs: DEFAULT_PLAYBACK_CEILING_SECS,
        }
    }
}

/// The two marks plus the supplementary bookmark keys, as loaded at startup
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Marks {
    pub reading: Option<u16>,
    pub hifdh: Option<u16>,
    pub bookmark: Option<u16>,
    pub hifdh_pages: Vec<u16>,
    pub auto_save: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
}

/// A user-facing message shown in a popup until dismissed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Notice {
            kind: NoticeKind::Info,
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Notice {
            kind: NoticeKind::Error,
            title: "Error".to_string(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    SaveReading,
    GoToReading,
    SaveHifdh,
    GoToHifdh,
    GoToPage,
    SurahList,
    ToggleMemorized,
    ToggleAutoSave,
    PlayAudio,
    StopAudio,
}

impl MenuItem {
    pub const ALL: [MenuItem; 10] = [
        MenuItem::SaveReading,
        MenuItem::GoToReading,
        MenuItem::SaveHifdh,
        MenuItem::GoToHifdh,
        MenuItem::GoToPage,
        MenuItem::SurahList,
        MenuItem::ToggleMemorized,
        MenuItem::ToggleAutoSave,
        MenuItem::PlayAudio,
        MenuItem::StopAudio,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            MenuItem::SaveReading => "Save reading mark",
            MenuItem::GoToReading => "Go to last read",
            MenuItem::SaveHifdh => "Save hifdh mark",
            MenuItem::GoToHifdh => "Go to hifdh",
            MenuItem::GoToPage => "Go to page...",
            MenuItem::SurahList => "Surah list",
            MenuItem::ToggleMemorized => "Toggle memorized",
            MenuItem::ToggleAutoSave => "Toggle auto-save",
            MenuItem::PlayAudio => "Play / pause audio",
            MenuItem::StopAudio => "Stop audio",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum UiMode {
    Normal,
    Menu,
    SurahList,
    PageInput,
    Help,
    Notice(Notice),
}
