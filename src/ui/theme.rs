use ratatui::style::Color;

/// Colors used for page cards
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagePalette {
    pub page_bg: Color,
    pub page_fg: Color,
    pub border: Color,
    pub accent: Color,
}

impl PagePalette {
    pub fn light() -> Self {
        PagePalette {
            page_bg: Color::Rgb(250, 246, 236),
            page_fg: Color::Rgb(40, 40, 40),
            border: Color::Rgb(160, 130, 80),
            accent: Color::Rgb(30, 110, 70),
        }
    }

    pub fn dark() -> Self {
        PagePalette {
            page_bg: Color::Rgb(28, 28, 34),
            page_fg: Color::Rgb(225, 220, 205),
            border: Color::Rgb(190, 160, 100),
            accent: Color::Rgb(110, 200, 150),
        }
    }

    /// Pick a palette from the terminal background
    ///
    /// Must run before raw mode is enabled; detection failure means dark.
    pub fn detect() -> Self {
        use termbg::Theme;

        match termbg::theme(std::time::Duration::from_millis(100)) {
            Ok(Theme::Light) => {
                tracing::debug!("Light terminal background detected");
                Self::light()
            }
            Ok(Theme::Dark) => Self::dark(),
            Err(e) => {
                tracing::debug!("Terminal background detection failed: {:?}", e);
                Self::dark()
            }
        }
    }
}

impl Default for PagePalette {
    fn default() -> Self {
        Self::dark()
    }
}
