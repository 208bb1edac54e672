use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Terminal too small (minimum 60x20)")]
    TerminalTooSmall,

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, AppError>;

/// Navigation requests that cannot be honoured
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NavError {
    #[error("Page {0} does not exist. Enter a page number between 2 and 604")]
    InvalidPage(u16),

    #[error("Enter a page number between 2 and 604")]
    NotANumber,

    #[error("No page saved")]
    NoMarkSaved,
}

impl NavError {
    /// Informational conditions are shown as notices rather than errors
    pub fn is_informational(&self) -> bool {
        matches!(self, NavError::NoMarkSaved)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AudioError {
    #[error("No audio available for page {0}")]
    NoAudioForPage(u16),

    #[error("Audio playback failed: {0}")]
    Backend(String),
}
