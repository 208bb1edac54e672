//! Modal popup components
//!
//! This module contains the popup/dialog widgets: the help screen,
//! the page number prompt, and notices.

pub mod help;
pub mod notice;
pub mod page_input;

use ratatui::layout::Rect;

/// Rect of `width` x `height` centered in `area`, clamped to fit
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
