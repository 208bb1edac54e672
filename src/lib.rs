// Library exports for the binary and testing
pub mod app;
pub mod async_tasks;
pub mod audio;
pub mod bookmarks;
pub mod cli;
pub mod constants;
pub mod error;
pub mod navigator;
pub mod persistence;
pub mod quran;
pub mod types;
pub mod ui;
