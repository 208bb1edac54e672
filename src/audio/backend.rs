use crate::error::AudioError;
use std::path::Path;
use std::time::Duration;

/// What the backend reports when polled
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendStatus {
    Running,
    Finished,
    Failed(String),
}

/// Platform audio output
///
/// One backend provides everything playback needs, seeking included.
pub trait AudioBackend: Send {
    /// Start playing `path` from `offset`, replacing anything already playing
    fn start(&mut self, path: &Path, offset: Duration) -> Result<(), AudioError>;

    /// Pause, keeping the current position
    fn pause(&mut self) -> Result<(), AudioError>;

    fn resume(&mut self) -> Result<(), AudioError>;

    fn stop(&mut self);

    fn seek(&mut self, position: Duration) -> Result<(), AudioError>;

    fn position(&self) -> Duration;

    /// Track length, when the backend could determine it
    fn duration(&self) -> Option<Duration>;

    fn poll(&mut self) -> BackendStatus;
}
