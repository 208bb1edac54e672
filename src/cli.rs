//! Command-line interface parsing and validation
//!
//! This module handles CLI argument parsing using clap and validates
//! user inputs for correctness.

use crate::constants::{FIRST_PAGE, LAST_PAGE, MAX_SURAH_ID};
use crate::types::DisplayDirection;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "mushaf")]
#[command(version = "0.0.1")]
#[command(about = "Read the mushaf page by page from your terminal", long_about = None)]
pub struct Cli {
    /// Open at the first page of this surah (1-114)
    #[arg(short = 's', long, value_name = "ID")]
    pub surah: Option<u16>,

    /// Open at this page (2-604); takes precedence over --surah
    #[arg(short = 'p', long, value_name = "N")]
    pub page: Option<u16>,

    /// Lay pages out right to left, following page order (default)
    #[arg(long, conflicts_with = "ltr")]
    pub reverse: bool,

    /// Lay pages out left to right
    #[arg(long)]
    pub ltr: bool,

    /// Directory holding page_NNN.jpg scans
    #[arg(long, value_name = "DIR")]
    pub pages_dir: Option<PathBuf>,

    /// Directory holding NNN.mp3 page narrations
    #[arg(long, value_name = "DIR")]
    pub audio_dir: Option<PathBuf>,

    /// Player command template, e.g. "mpv --no-video --start={offset} {file}"
    #[arg(long, value_name = "CMD")]
    pub player: Option<String>,

    /// Enable logging to specified file
    #[arg(short = 'l', long, value_name = "PATH")]
    pub log_file: Option<String>,
}

impl Cli {
    /// Validate CLI arguments
    /// Returns error if the page or surah is out of bounds
    pub fn validate(&self) -> Result<(), String> {
        if let Some(page) = self.page
            && !(FIRST_PAGE..=LAST_PAGE).contains(&page)
        {
            return Err(format!(
                "Page {} out of range ({}-{})",
                page, FIRST_PAGE, LAST_PAGE
            ));
        }
        if let Some(surah) = self.surah
            && !(1..=MAX_SURAH_ID).contains(&surah)
        {
            return Err(format!(
                "Surah {} out of range (1-{})",
                surah, MAX_SURAH_ID
            ));
        }
        if let Some(player) = &self.player
            && player.trim().is_empty()
        {
            return Err("Player command is empty".to_string());
        }
        Ok(())
    }

    /// Direction requested on the command line, if any
    pub fn direction(&self) -> Option<DisplayDirection> {
        if self.ltr {
            Some(DisplayDirection::LeftToRight)
        } else if self.reverse {
            Some(DisplayDirection::RightToLeft)
        } else {
            None
        }
    }

    /// Explicit start target; `--page` wins over `--surah`
    pub fn start_page(&self, surah_start: impl Fn(u16) -> Option<u16>) -> Option<u16> {
        self.page.or_else(|| self.surah.and_then(surah_start))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quran::SectionIndex;

    fn parse(args: &[&str]) -> Cli {
        let mut argv = vec!["mushaf"];
        argv.extend_from_slice(args);
        Cli::parse_from(argv)
    }

    #[test]
    fn test_validate_bounds() {
        assert!(parse(&["--page", "2"]).validate().is_ok());
        assert!(parse(&["--page", "604"]).validate().is_ok());
        assert!(parse(&["--page", "1"]).validate().is_err());
        assert!(parse(&["--page", "605"]).validate().is_err());
        assert!(parse(&["--surah", "0"]).validate().is_err());
        assert!(parse(&["--surah", "115"]).validate().is_err());
        assert!(parse(&["--player", "  "]).validate().is_err());
    }

    #[test]
    fn test_page_wins_over_surah() {
        let index = SectionIndex::global();
        let cli = parse(&["--surah", "18", "--page", "100"]);
        assert_eq!(cli.start_page(|id| index.start_page(id)), Some(100));

        let cli = parse(&["--surah", "18"]);
        assert_eq!(cli.start_page(|id| index.start_page(id)), Some(293));

        let cli = parse(&[]);
        assert_eq!(cli.start_page(|id| index.start_page(id)), None);
    }

    #[test]
    fn test_direction_flags() {
        assert_eq!(parse(&[]).direction(), None);
        assert_eq!(
            parse(&["--ltr"]).direction(),
            Some(DisplayDirection::LeftToRight)
        );
        assert_eq!(
            parse(&["--reverse"]).direction(),
            Some(DisplayDirection::RightToLeft)
        );
        assert!(Cli::try_parse_from(["mushaf", "--ltr", "--reverse"]).is_err());
    }
}
