//! Page strip state and page card rendering

use crate::constants::{LAST_PAGE, TWO_PAGE_MIN_WIDTH};
use crate::quran::SectionIndex;
use crate::quran::assets::page_image_path;
use crate::types::QuranPage;
use crate::ui::theme::PagePalette;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScrollError {
    #[error("page view has not been laid out yet")]
    NotLaidOut,

    #[error("index {0} is outside the page strip")]
    OutOfRange(usize),
}

/// Scroll position of the horizontal page strip
#[derive(Debug, Clone)]
pub struct PageViewState {
    offset: usize,
    item_count: usize,
    laid_out: bool,
    two_page: bool,
}

impl PageViewState {
    pub fn new(item_count: usize) -> Self {
        PageViewState {
            offset: 0,
            item_count,
            laid_out: false,
            two_page: false,
        }
    }

    /// Display index of the page the reader is on
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn is_laid_out(&self) -> bool {
        self.laid_out
    }

    /// Facing pages are shown on wide terminals
    pub fn is_two_page(&self) -> bool {
        self.two_page
    }

    /// Layout pass: fix the page count per screen and clamp the offset
    pub fn layout(&mut self, width: u16) {
        self.laid_out = true;
        self.two_page = width >= TWO_PAGE_MIN_WIDTH;
        self.offset = self.offset.min(self.item_count.saturating_sub(1));
    }

    pub fn scroll_to_index(&mut self, index: usize) -> Result<(), ScrollError> {
        if !self.laid_out {
            return Err(ScrollError::NotLaidOut);
        }
        if index >= self.item_count {
            return Err(ScrollError::OutOfRange(index));
        }
        self.offset = index;
        Ok(())
    }

    /// Raw offset scroll; an out-of-range value is clamped by the next layout pass
    pub fn scroll_to_offset(&mut self, offset: usize) {
        self.offset = offset;
    }
}

/// Page cards for the visible pages, left to right
pub struct PageView<'a> {
    pages: Vec<&'a QuranPage>,
    current: u16,
    reading_mark: Option<u16>,
    hifdh_mark: Option<u16>,
    memorized: &'a [u16],
    pages_dir: Option<&'a Path>,
    palette: PagePalette,
}

impl<'a> PageView<'a> {
    pub fn new(pages: Vec<&'a QuranPage>, current: u16, palette: PagePalette) -> Self {
        Self {
            pages,
            current,
            reading_mark: None,
            hifdh_mark: None,
            memorized: &[],
            pages_dir: None,
            palette,
        }
    }

    pub fn marks(mut self, reading: Option<u16>, hifdh: Option<u16>, memorized: &'a [u16]) -> Self {
        self.reading_mark = reading;
        self.hifdh_mark = hifdh;
        self.memorized = memorized;
        self
    }

    pub fn pages_dir(mut self, pages_dir: Option<&'a Path>) -> Self {
        self.pages_dir = pages_dir;
        self
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        if self.pages.is_empty() {
            return;
        }

        let constraints = vec![Constraint::Ratio(1, self.pages.len() as u32); self.pages.len()];
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(constraints)
            .split(area);

        for (page, column) in self.pages.iter().zip(columns.iter()) {
            self.render_card(frame, page, *column);
        }
    }

    fn render_card(&self, frame: &mut Frame, page: &QuranPage, area: Rect) {
        let index = SectionIndex::global();
        let is_current = page.number == self.current;

        let border_style = if is_current {
            Style::default()
                .fg(self.palette.border)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.palette.border)
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Double)
            .border_style(border_style)
            .title(format!(" {} ", page.number))
            .title_alignment(Alignment::Center)
            .style(
                Style::default()
                    .bg(self.palette.page_bg)
                    .fg(self.palette.page_fg),
            );

        let mut lines = vec![Line::from("")];

        for id in &page.surahs {
            let Some(surah) = index.surah(*id) else {
                continue;
            };
            let starts_here = surah.start_page == page.number;
            let mut spans = vec![Span::styled(
                surah.name_ar,
                Style::default().add_modifier(Modifier::BOLD),
            )];
            spans.push(Span::raw(format!("  {}. {}", surah.id, surah.name_en)));
            if starts_here {
                spans.push(Span::styled(
                    "  (begins)",
                    Style::default().fg(self.palette.accent),
                ));
            }
            lines.push(Line::from(spans));
        }

        lines.push(Line::from(""));
        let image = page_image_path(self.pages_dir, page.number)
            .map(|path| path.display().to_string())
            .unwrap_or_else(|| page.image.clone());
        lines.push(Line::from(Span::styled(
            image,
            Style::default().add_modifier(Modifier::DIM),
        )));

        let mut badges = Vec::new();
        if self.reading_mark == Some(page.number) {
            badges.push(Span::styled(
                "[Last read]",
                Style::default().fg(self.palette.accent),
            ));
        }
        if self.hifdh_mark == Some(page.number) {
            badges.push(Span::raw(" "));
            badges.push(Span::styled(
                "[Hifdh]",
                Style::default().fg(self.palette.accent),
            ));
        }
        if self.memorized.binary_search(&page.number).is_ok() {
            badges.push(Span::raw(" "));
            badges.push(Span::styled(
                "[Memorized]",
                Style::default().fg(self.palette.accent),
            ));
        }
        if !badges.is_empty() {
            lines.push(Line::from(""));
            lines.push(Line::from(badges));
        }

        if page.number == LAST_PAGE {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                "End of the mushaf",
                Style::default().add_modifier(Modifier::ITALIC),
            )));
        }

        let paragraph = Paragraph::new(lines)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scroll_before_layout_fails() {
        let mut view = PageViewState::new(603);
        assert_eq!(view.scroll_to_index(10), Err(ScrollError::NotLaidOut));
        view.scroll_to_offset(10);
        view.layout(80);
        assert_eq!(view.offset(), 10);
    }

    #[test]
    fn test_offset_clamped_on_layout() {
        let mut view = PageViewState::new(603);
        view.scroll_to_offset(5000);
        view.layout(80);
        assert_eq!(view.offset(), 602);
    }

    #[test]
    fn test_scroll_out_of_range() {
        let mut view = PageViewState::new(603);
        view.layout(80);
        assert_eq!(view.scroll_to_index(603), Err(ScrollError::OutOfRange(603)));
        assert_eq!(view.scroll_to_index(602), Ok(()));
    }

    #[test]
    fn test_two_page_mode_follows_width() {
        let mut view = PageViewState::new(603);
        view.layout(119);
        assert!(!view.is_two_page());
        view.layout(160);
        assert!(view.is_two_page());
    }
}
