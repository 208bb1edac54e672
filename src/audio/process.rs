//! Audio backend driving an external command-line player
//!
//! The player process is restarted at an offset to resume or seek, and its
//! exit status is the completion signal. Position is tracked with a
//! monotonic clock from the last start. The track length comes from
//! `ffprobe` on a helper thread and shows up on a later poll.

use crate::audio::backend::{AudioBackend, BackendStatus};
use crate::error::AudioError;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};

pub struct ProcessBackend {
    template: Vec<String>,
    child: Option<Child>,
    path: Option<PathBuf>,
    offset: Duration,
    started_at: Option<Instant>,
    paused_at: Option<Duration>,
    duration: Option<Duration>,
    pending_duration: Option<Receiver<Option<Duration>>>,
}

impl ProcessBackend {
    /// `command` is split on whitespace; `{file}` and `{offset}` are substituted
    pub fn new(command: &str) -> Self {
        ProcessBackend {
            template: command.split_whitespace().map(str::to_string).collect(),
            child: None,
            path: None,
            offset: Duration::ZERO,
            started_at: None,
            paused_at: None,
            duration: None,
            pending_duration: None,
        }
    }

    /// Expand the command template for a file and start offset
    pub fn build_args(template: &[String], path: &Path, offset: Duration) -> Vec<String> {
        let file = path.to_string_lossy();
        let offset = format!("{:.3}", offset.as_secs_f64());

        let mut args: Vec<String> = template
            .iter()
            .map(|token| token.replace("{file}", &file).replace("{offset}", &offset))
            .collect();

        if !template.iter().any(|token| token.contains("{file}")) {
            args.push(file.into_owned());
        }
        args
    }

    fn spawn(&mut self, offset: Duration) -> Result<(), AudioError> {
        let path = self
            .path
            .clone()
            .ok_or_else(|| AudioError::Backend("no track loaded".to_string()))?;

        let args = Self::build_args(&self.template, &path, offset);
        let (program, rest) = args
            .split_first()
            .ok_or_else(|| AudioError::Backend("empty player command".to_string()))?;

        tracing::debug!("Starting player: {} {:?}", program, rest);
        let child = Command::new(program)
            .args(rest)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| AudioError::Backend(format!("failed to start {}: {}", program, e)))?;

        self.child = Some(child);
        self.offset = offset;
        self.started_at = Some(Instant::now());
        self.paused_at = None;
        Ok(())
    }

    fn kill(&mut self) {
        if let Some(mut child) = self.child.take() {
            if let Err(e) = child.kill() {
                tracing::debug!("Player already exited: {}", e);
            }
            let _ = child.wait();
        }
        self.started_at = None;
    }

    fn probe_duration(path: &Path) -> Option<Duration> {
        let output = Command::new("ffprobe")
            .args([
                "-v",
                "error",
                "-show_entries",
                "format=duration",
                "-of",
                "default=noprint_wrappers=1:nokey=1",
            ])
            .arg(path)
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .output();

        match output {
            Ok(output) if output.status.success() => {
                let text = String::from_utf8_lossy(&output.stdout);
                let secs: f64 = text.trim().parse().ok()?;
                (secs.is_finite() && secs > 0.0).then(|| Duration::from_secs_f64(secs))
            }
            Ok(_) => None,
            Err(e) => {
                tracing::debug!("ffprobe unavailable: {}", e);
                None
            }
        }
    }

    /// Probe the track length without blocking the caller
    fn spawn_duration_lookup(path: PathBuf) -> Receiver<Option<Duration>> {
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let _ = tx.send(Self::probe_duration(&path));
        });
        rx
    }

    fn collect_duration(&mut self) {
        let Some(rx) = &self.pending_duration else {
            return;
        };
        match rx.try_recv() {
            Ok(duration) => {
                tracing::debug!("Track length: {:?}", duration);
                self.duration = duration;
                self.pending_duration = None;
            }
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Disconnected) => self.pending_duration = None,
        }
    }

    fn clamp(&self, position: Duration) -> Duration {
        match self.duration {
            Some(duration) => position.min(duration),
            None => position,
        }
    }
}

impl AudioBackend for ProcessBackend {
    fn start(&mut self, path: &Path, offset: Duration) -> Result<(), AudioError> {
        self.kill();
        if !path.exists() {
            return Err(AudioError::Backend(format!(
                "audio file not found: {}",
                path.display()
            )));
        }
        self.path = Some(path.to_path_buf());
        self.duration = None;
        self.pending_duration = Some(Self::spawn_duration_lookup(path.to_path_buf()));
        self.spawn(offset)
    }

    fn pause(&mut self) -> Result<(), AudioError> {
        let position = self.position();
        self.kill();
        self.paused_at = Some(position);
        Ok(())
    }

    fn resume(&mut self) -> Result<(), AudioError> {
        let position = self.paused_at.unwrap_or(self.offset);
        self.spawn(position)
    }

    fn stop(&mut self) {
        self.kill();
        self.path = None;
        self.offset = Duration::ZERO;
        self.paused_at = None;
        self.duration = None;
        self.pending_duration = None;
    }

    fn seek(&mut self, position: Duration) -> Result<(), AudioError> {
        let position = self.clamp(position);
        if self.paused_at.is_some() {
            self.paused_at = Some(position);
            return Ok(());
        }
        self.kill();
        self.spawn(position)
    }

    fn position(&self) -> Duration {
        if let Some(paused) = self.paused_at {
            return paused;
        }
        match self.started_at {
            Some(started) => self.clamp(self.offset + started.elapsed()),
            None => self.offset,
        }
    }

    fn duration(&self) -> Option<Duration> {
        self.duration
    }

    fn poll(&mut self) -> BackendStatus {
        self.collect_duration();
        let Some(child) = self.child.as_mut() else {
            return BackendStatus::Finished;
        };

        match child.try_wait() {
            Ok(None) => BackendStatus::Running,
            Ok(Some(status)) => {
                self.child = None;
                self.started_at = None;
                if status.success() {
                    BackendStatus::Finished
                } else {
                    BackendStatus::Failed(format!("player exited with {}", status))
                }
            }
            Err(e) => BackendStatus::Failed(format!("failed to query player: {}", e)),
        }
    }
}

impl Drop for ProcessBackend {
    fn drop(&mut self) {
        self.kill();
    }
}
