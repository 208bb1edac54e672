//! UI widget components
//!
//! This module contains reusable UI components including popups,
//! the page strip, the side menu, and the audio status bar.

pub mod audio_bar;
pub mod page_view;
pub mod popups;
pub mod sidebar;
