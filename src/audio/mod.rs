//! Page narration playback
//!
//! `AudioController` is the only writer of playback state. Transitions:
//!
//! - `Idle | Error` --play--> `Loading` --backend running--> `Playing`
//! - `Playing` --pause--> `Paused` --play same page--> `Playing`
//! - `Playing | Paused | Loading | Error` --stop--> `Idle`
//! - `Playing` --finish or ceiling--> `Idle`
//! - `Paused` --seek--> `Paused` at the new position
//! - `Loading | Playing` --backend failure--> `Error`

pub mod backend;
pub mod process;

pub use backend::{AudioBackend, BackendStatus};
pub use process::ProcessBackend;

use crate::error::AudioError;
use crate::quran::AudioCatalog;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AudioState {
    Idle,
    Loading,
    Playing,
    Paused,
    Error(String),
}

impl AudioState {
    pub fn label(&self) -> &str {
        match self {
            AudioState::Idle => "Stopped",
            AudioState::Loading => "Loading",
            AudioState::Playing => "Playing",
            AudioState::Paused => "Paused",
            AudioState::Error(_) => "Error",
        }
    }
}

pub struct AudioController {
    backend: Box<dyn AudioBackend>,
    catalog: AudioCatalog,
    state: AudioState,
    current_page: Option<u16>,
    current_time: Duration,
    duration: Option<Duration>,
    playing_since: Option<Instant>,
    ceiling: Duration,
}

impl AudioController {
    pub fn new(backend: Box<dyn AudioBackend>, catalog: AudioCatalog, ceiling: Duration) -> Self {
        AudioController {
            backend,
            catalog,
            state: AudioState::Idle,
            current_page: None,
            current_time: Duration::ZERO,
            duration: None,
            playing_since: None,
            ceiling,
        }
    }

    pub fn state(&self) -> &AudioState {
        &self.state
    }

    pub fn current_page(&self) -> Option<u16> {
        self.current_page
    }

    pub fn current_time(&self) -> Duration {
        self.current_time
    }

    pub fn duration(&self) -> Option<Duration> {
        self.duration
    }

    pub fn has_audio(&self, page: u16) -> bool {
        self.catalog.has(page)
    }

    pub fn is_active(&self) -> bool {
        !matches!(self.state, AudioState::Idle)
    }

    /// Fraction of the track played, 0.0 when the length is unknown
    pub fn progress(&self) -> f64 {
        match self.duration {
            Some(duration) if !duration.is_zero() => {
                (self.current_time.as_secs_f64() / duration.as_secs_f64()).clamp(0.0, 1.0)
            }
            _ => 0.0,
        }
    }

    /// Start or resume narration for a page
    ///
    /// A page without a track is rejected before any state changes.
    pub fn play(&mut self, page: u16) -> Result<(), AudioError> {
        let path = self
            .catalog
            .get(page)
            .ok_or(AudioError::NoAudioForPage(page))?
            .to_path_buf();

        let same_page = self.current_page == Some(page);
        match self.state {
            AudioState::Paused if same_page => {
                tracing::info!("Resuming audio for page {}", page);
                return match self.backend.resume() {
                    Ok(()) => {
                        self.state = AudioState::Playing;
                        self.playing_since = Some(Instant::now());
                        Ok(())
                    }
                    Err(e) => Err(self.fail(e)),
                };
            }
            AudioState::Playing | AudioState::Loading if same_page => {
                tracing::debug!("Audio already playing for page {}", page);
                return Ok(());
            }
            AudioState::Playing | AudioState::Paused | AudioState::Loading => {
                tracing::debug!("Stopping audio for page {:?}", self.current_page);
                self.backend.stop();
            }
            AudioState::Idle | AudioState::Error(_) => {}
        }

        tracing::info!("Loading audio for page {}: {}", page, path.display());
        self.state = AudioState::Loading;
        self.current_page = Some(page);
        self.current_time = Duration::ZERO;
        self.duration = None;
        self.playing_since = None;

        match self.backend.start(&path, Duration::ZERO) {
            Ok(()) => {
                self.duration = self.backend.duration();
                Ok(())
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    pub fn pause(&mut self) {
        if self.state != AudioState::Playing {
            return;
        }
        match self.backend.pause() {
            Ok(()) => {
                self.current_time = self.backend.position();
                self.state = AudioState::Paused;
                self.playing_since = None;
                tracing::info!("Audio paused at {:?}", self.current_time);
            }
            Err(e) => {
                self.fail(e);
            }
        }
    }

    /// Pause when this page is playing, otherwise play it
    pub fn toggle(&mut self, page: u16) -> Result<(), AudioError> {
        if self.state == AudioState::Playing && self.current_page == Some(page) {
            self.pause();
            Ok(())
        } else {
            self.play(page)
        }
    }

    pub fn stop(&mut self) {
        if self.state != AudioState::Idle {
            tracing::info!("Audio stopped");
        }
        self.backend.stop();
        self.reset();
    }

    pub fn seek(&mut self, position: Duration) {
        if !matches!(self.state, AudioState::Playing | AudioState::Paused) {
            return;
        }
        let position = match self.duration {
            Some(duration) => position.min(duration),
            None => position,
        };
        match self.backend.seek(position) {
            Ok(()) => self.current_time = position,
            Err(e) => {
                self.fail(e);
            }
        }
    }

    /// Seek relative to the current position, clamped at zero
    pub fn seek_by(&mut self, delta_secs: f64) {
        let target = (self.current_time.as_secs_f64() + delta_secs).max(0.0);
        self.seek(Duration::from_secs_f64(target));
    }

    /// Refresh progress and pick up completion or failure from the backend
    pub fn tick(&mut self) {
        match self.state {
            AudioState::Loading | AudioState::Playing => {}
            AudioState::Paused => {
                self.current_time = self.backend.position();
                return;
            }
            AudioState::Idle | AudioState::Error(_) => return,
        }

        match self.backend.poll() {
            BackendStatus::Running => {
                if self.state == AudioState::Loading {
                    tracing::debug!("Audio started for page {:?}", self.current_page);
                    self.state = AudioState::Playing;
                    self.playing_since = Some(Instant::now());
                }
                self.current_time = self.backend.position();
                if self.duration.is_none() {
                    self.duration = self.backend.duration();
                }

                let over_ceiling = self
                    .playing_since
                    .is_some_and(|since| since.elapsed() >= self.ceiling);
                if over_ceiling {
                    tracing::warn!("Playback exceeded {:?}, stopping", self.ceiling);
                    self.stop();
                }
            }
            BackendStatus::Finished => {
                tracing::info!("Audio finished for page {:?}", self.current_page);
                self.backend.stop();
                self.reset();
            }
            BackendStatus::Failed(message) => {
                self.backend.stop();
                self.fail(AudioError::Backend(message));
            }
        }
    }

    fn reset(&mut self) {
        self.state = AudioState::Idle;
        self.current_page = None;
        self.current_time = Duration::ZERO;
        self.duration = None;
        self.playing_since = None;
    }

    fn fail(&mut self, error: AudioError) -> AudioError {
        tracing::error!("Audio error: {}", error);
        self.state = AudioState::Error(error.to_string());
        self.playing_since = None;
        error
    }
}

impl Drop for AudioController {
    fn drop(&mut self) {
        self.backend.stop();
    }
}
