use super::centered_rect;
use crate::constants::{FIRST_PAGE, LAST_PAGE};
use ratatui::{
    Frame,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Clear, Paragraph},
};

/// Render the go-to-page prompt
pub fn render_page_input_popup(frame: &mut Frame, input: &str) {
    let area = centered_rect(36, 3, frame.area());

    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Go to page ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    // Ghost text until the first digit
    let paragraph = if input.is_empty() {
        Paragraph::new(format!("Page number ({}-{})", FIRST_PAGE, LAST_PAGE))
            .style(Style::default().fg(Color::DarkGray))
    } else {
        Paragraph::new(format!("# {}", input)).style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
    };

    frame.render_widget(paragraph, inner);
}
