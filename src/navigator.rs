//! Page navigation over the canonical page sequence
//!
//! The sequence is always stored in page order. Display direction is a flag
//! applied when translating between canonical positions and on-screen
//! indices; nothing is ever renumbered.

use crate::constants::{FIRST_PAGE, LAST_PAGE, PAGE_COUNT};
use crate::error::NavError;
use crate::quran::SectionIndex;
use crate::types::DisplayDirection;
use std::time::Duration;

/// A resolved jump: the page is current immediately, the scroll follows after `delay`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JumpRequest {
    pub page: u16,
    pub display_index: usize,
    pub delay: Duration,
}

#[derive(Debug, Clone)]
pub struct Navigator {
    position: usize,
    direction: DisplayDirection,
    jump_delay: Duration,
}

impl Navigator {
    pub fn new(start_page: u16, direction: DisplayDirection, jump_delay: Duration) -> Self {
        let position = SectionIndex::position_of(start_page).unwrap_or(0);
        Navigator {
            position,
            direction,
            jump_delay,
        }
    }

    pub fn current_page(&self) -> u16 {
        FIRST_PAGE + self.position as u16
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn direction(&self) -> DisplayDirection {
        self.direction
    }

    pub fn set_direction(&mut self, direction: DisplayDirection) {
        self.direction = direction;
    }

    pub fn is_last_page(&self) -> bool {
        self.current_page() == LAST_PAGE
    }

    /// On-screen index of a canonical position
    pub fn display_index(&self, position: usize) -> usize {
        match self.direction {
            DisplayDirection::LeftToRight => position,
            DisplayDirection::RightToLeft => PAGE_COUNT - 1 - position.min(PAGE_COUNT - 1),
        }
    }

    /// Canonical position of an on-screen index
    pub fn position_from_display(&self, display_index: usize) -> Option<usize> {
        if display_index >= PAGE_COUNT {
            return None;
        }
        Some(match self.direction {
            DisplayDirection::LeftToRight => display_index,
            DisplayDirection::RightToLeft => PAGE_COUNT - 1 - display_index,
        })
    }

    pub fn current_display_index(&self) -> usize {
        self.display_index(self.position)
    }

    /// Parse free-form page input, rejecting non-numeric and out-of-range values
    pub fn parse_page_input(input: &str) -> Result<u16, NavError> {
        let page: u16 = input.trim().parse().map_err(|_| NavError::NotANumber)?;
        Self::validate_page(page)
    }

    fn validate_page(page: u16) -> Result<u16, NavError> {
        if (FIRST_PAGE..=LAST_PAGE).contains(&page) {
            Ok(page)
        } else {
            Err(NavError::InvalidPage(page))
        }
    }

    pub fn jump_to_page(&mut self, page: u16) -> Result<JumpRequest, NavError> {
        let page = Self::validate_page(page)?;
        Ok(self.go_to(page))
    }

    /// Jump to the start of a surah, landing on the first page when it cannot be resolved
    pub fn jump_to_surah(&mut self, surah_id: u16) -> JumpRequest {
        let target = SectionIndex::global()
            .start_page(surah_id)
            .filter(|page| (FIRST_PAGE..=LAST_PAGE).contains(page))
            .unwrap_or_else(|| {
                tracing::debug!("Surah {} has no readable start page, using page {}", surah_id, FIRST_PAGE);
                FIRST_PAGE
            });
        self.go_to(target)
    }

    pub fn jump_to_mark(&mut self, mark: Option<u16>) -> Result<JumpRequest, NavError> {
        let page = mark.ok_or(NavError::NoMarkSaved)?;
        self.jump_to_page(page)
    }

    fn go_to(&mut self, page: u16) -> JumpRequest {
        self.position = (page - FIRST_PAGE) as usize;
        tracing::debug!("Jump to page {} (position {})", page, self.position);
        JumpRequest {
            page,
            display_index: self.current_display_index(),
            delay: self.jump_delay,
        }
    }

    /// Track the page reported visible by the page view
    ///
    /// Returns the new page when it changed.
    pub fn set_visible(&mut self, display_index: usize) -> Option<u16> {
        let position = self.position_from_display(display_index)?;
        if position == self.position {
            return None;
        }
        self.position = position;
        Some(self.current_page())
    }

    pub fn next_page(&mut self) -> u16 {
        self.position = (self.position + 1).min(PAGE_COUNT - 1);
        self.current_page()
    }

    pub fn previous_page(&mut self) -> u16 {
        self.position = self.position.saturating_sub(1);
        self.current_page()
    }

    pub fn first_page(&mut self) -> JumpRequest {
        self.go_to(FIRST_PAGE)
    }

    pub fn last_page(&mut self) -> JumpRequest {
        self.go_to(LAST_PAGE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::MAX_SURAH_ID;

    fn navigator() -> Navigator {
        Navigator::new(FIRST_PAGE, DisplayDirection::RightToLeft, Duration::ZERO)
    }

    #[test]
    fn test_jump_to_every_valid_page() {
        let mut nav = navigator();
        for page in FIRST_PAGE..=LAST_PAGE {
            let request = nav.jump_to_page(page).unwrap();
            assert_eq!(request.page, page);
            assert_eq!(nav.current_page(), page);
        }
    }

    #[test]
    fn test_out_of_range_jump_is_rejected() {
        let mut nav = navigator();
        nav.jump_to_page(300).unwrap();
        for page in [0, 1, 605, 1000] {
            assert_eq!(nav.jump_to_page(page), Err(NavError::InvalidPage(page)));
            assert_eq!(nav.current_page(), 300);
        }
    }

    #[test]
    fn test_jump_to_every_surah() {
        let index = SectionIndex::global();
        let mut nav = navigator();
        for id in 1..=MAX_SURAH_ID {
            let request = nav.jump_to_surah(id);
            assert_eq!(Some(request.page), index.start_page(id));
        }
    }

    #[test]
    fn test_unknown_surah_lands_on_first_page() {
        let mut nav = navigator();
        nav.jump_to_page(50).unwrap();
        assert_eq!(nav.jump_to_surah(0).page, FIRST_PAGE);
        nav.jump_to_page(50).unwrap();
        assert_eq!(nav.jump_to_surah(200).page, FIRST_PAGE);
    }

    #[test]
    fn test_surah_two_and_last_page() {
        let mut nav = navigator();
        assert_eq!(nav.jump_to_surah(2).page, 2);
        nav.jump_to_page(604).unwrap();
        assert!(nav.is_last_page());
    }

    #[test]
    fn test_parse_page_input() {
        assert_eq!(Navigator::parse_page_input(" 150 "), Ok(150));
        assert_eq!(Navigator::parse_page_input("abc"), Err(NavError::NotANumber));
        assert_eq!(Navigator::parse_page_input(""), Err(NavError::NotANumber));
        assert_eq!(Navigator::parse_page_input("-3"), Err(NavError::NotANumber));
        assert_eq!(Navigator::parse_page_input("1"), Err(NavError::InvalidPage(1)));
        assert_eq!(Navigator::parse_page_input("605"), Err(NavError::InvalidPage(605)));
    }

    #[test]
    fn test_jump_to_missing_mark() {
        let mut nav = navigator();
        nav.jump_to_page(10).unwrap();
        assert_eq!(nav.jump_to_mark(None), Err(NavError::NoMarkSaved));
        assert_eq!(nav.current_page(), 10);
        assert_eq!(nav.jump_to_mark(Some(150)).unwrap().page, 150);
    }

    #[test]
    fn test_display_index_reverses_for_right_to_left() {
        let mut nav = navigator();
        assert_eq!(nav.display_index(0), PAGE_COUNT - 1);
        assert_eq!(nav.position_from_display(PAGE_COUNT - 1), Some(0));

        nav.set_direction(DisplayDirection::LeftToRight);
        assert_eq!(nav.display_index(0), 0);
        assert_eq!(nav.position_from_display(PAGE_COUNT), None);
    }

    #[test]
    fn test_direction_does_not_renumber() {
        let mut nav = navigator();
        nav.jump_to_page(77).unwrap();
        let rtl_index = nav.current_display_index();
        nav.set_direction(DisplayDirection::LeftToRight);
        assert_eq!(nav.current_page(), 77);
        assert_ne!(nav.current_display_index(), rtl_index);
    }

    #[test]
    fn test_set_visible_tracks_view() {
        let mut nav = navigator();
        let display = nav.display_index(SectionIndex::position_of(20).unwrap());
        assert_eq!(nav.set_visible(display), Some(20));
        assert_eq!(nav.set_visible(display), None);
        assert_eq!(nav.set_visible(PAGE_COUNT + 5), None);
        assert_eq!(nav.current_page(), 20);
    }

    #[test]
    fn test_stepping_is_clamped() {
        let mut nav = navigator();
        assert_eq!(nav.previous_page(), FIRST_PAGE);
        assert_eq!(nav.next_page(), 3);
        nav.last_page();
        assert_eq!(nav.next_page(), LAST_PAGE);
    }

    #[test]
    fn test_jump_carries_delay() {
        let mut nav = Navigator::new(2, DisplayDirection::LeftToRight, Duration::from_millis(300));
        let request = nav.jump_to_page(5).unwrap();
        assert_eq!(request.delay, Duration::from_millis(300));
        assert_eq!(request.display_index, 3);
    }
}
