use super::centered_rect;
use crate::types::{Notice, NoticeKind};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

pub fn render_notice_popup(f: &mut Frame, notice: &Notice) {
    // 40% width, enough height for the message and the OK button
    let popup_width = ((f.area().width as f32 * 0.4) as u16).max(30);
    let popup_area = centered_rect(popup_width, 7, f.area());

    let color = match notice.kind {
        NoticeKind::Info => Color::Cyan,
        NoticeKind::Error => Color::Red,
    };

    f.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(format!(" {} ", notice.title))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color));

    let inner_area = block.inner(popup_area);
    f.render_widget(block, popup_area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Message
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Button
        ])
        .split(inner_area);

    let message = Paragraph::new(notice.message.as_str())
        .style(Style::default().fg(color))
        .wrap(Wrap { trim: true })
        .alignment(Alignment::Center);
    f.render_widget(message, chunks[0]);

    let button = Paragraph::new(Line::from(vec![Span::styled(
        "[OK]",
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD),
    )]))
    .alignment(Alignment::Center);
    f.render_widget(button, chunks[2]);
}
