//! Audio status shown in the statusbar

use crate::audio::{AudioController, AudioState};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};
use std::time::{Duration, Instant};

const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
const BAR_WIDTH: usize = 16;

fn spinner_frame(epoch: Instant) -> &'static str {
    let idx = (epoch.elapsed().as_millis() / 80) as usize % SPINNER_FRAMES.len();
    SPINNER_FRAMES[idx]
}

/// `mm:ss`
pub fn format_time(time: Duration) -> String {
    let secs = time.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

pub fn progress_bar(fraction: f64, width: usize) -> String {
    let filled = ((fraction.clamp(0.0, 1.0) * width as f64).round() as usize).min(width);
    format!("[{}{}]", "█".repeat(filled), "░".repeat(width - filled))
}

pub struct AudioBar<'a> {
    audio: &'a AudioController,
    page: u16,
    spinner_epoch: Instant,
}

impl<'a> AudioBar<'a> {
    pub fn new(audio: &'a AudioController, page: u16, spinner_epoch: Instant) -> Self {
        Self {
            audio,
            page,
            spinner_epoch,
        }
    }

    pub fn line(&self) -> Line<'static> {
        let accent = Style::default().fg(Color::Cyan);
        match self.audio.state() {
            AudioState::Idle => {
                if self.audio.has_audio(self.page) {
                    Line::from(Span::styled("♪ a: listen", Style::default().fg(Color::Gray)))
                } else {
                    Line::from("")
                }
            }
            AudioState::Loading => Line::from(vec![
                Span::styled(
                    spinner_frame(self.spinner_epoch),
                    accent.add_modifier(Modifier::BOLD),
                ),
                Span::raw(format!(" Loading page {}", self.page_label())),
            ]),
            AudioState::Playing | AudioState::Paused => {
                let icon = if self.audio.state() == &AudioState::Playing {
                    "▶"
                } else {
                    "⏸"
                };
                let total = self
                    .audio
                    .duration()
                    .map(format_time)
                    .unwrap_or_else(|| "--:--".to_string());
                Line::from(vec![
                    Span::styled(icon, accent.add_modifier(Modifier::BOLD)),
                    Span::raw(format!(
                        " p{} {} / {} ",
                        self.page_label(),
                        format_time(self.audio.current_time()),
                        total
                    )),
                    Span::styled(progress_bar(self.audio.progress(), BAR_WIDTH), accent),
                ])
            }
            AudioState::Error(message) => Line::from(Span::styled(
                format!("✖ {}", message),
                Style::default().fg(Color::Red),
            )),
        }
    }

    fn page_label(&self) -> String {
        self.audio
            .current_page()
            .unwrap_or(self.page)
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::ProcessBackend;
    use crate::quran::AudioCatalog;
    use std::path::PathBuf;

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(Duration::ZERO), "00:00");
        assert_eq!(format_time(Duration::from_secs(75)), "01:15");
        assert_eq!(format_time(Duration::from_millis(599_900)), "09:59");
    }

    #[test]
    fn test_progress_bar_is_clamped() {
        assert_eq!(progress_bar(0.0, 4), "[░░░░]");
        assert_eq!(progress_bar(0.5, 4), "[██░░]");
        assert_eq!(progress_bar(3.0, 4), "[████]");
    }

    #[test]
    fn test_idle_hint_only_for_narrated_pages() {
        let audio = AudioController::new(
            Box::new(ProcessBackend::new("mpv {file}")),
            AudioCatalog::from_entries([(2, PathBuf::from("002.mp3"))]),
            Duration::from_secs(600),
        );
        let epoch = Instant::now();
        assert!(line_text(&AudioBar::new(&audio, 2, epoch).line()).contains("listen"));
        assert_eq!(line_text(&AudioBar::new(&audio, 3, epoch).line()), "");
    }
}
