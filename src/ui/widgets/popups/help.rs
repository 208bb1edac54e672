use super::centered_rect;
use ratatui::{
    Frame,
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

fn heading(text: &'static str) -> Line<'static> {
    Line::from(vec![Span::styled(
        text,
        Style::default()
            .add_modifier(Modifier::BOLD)
            .fg(Color::Yellow),
    )])
}

pub fn render_help_popup(f: &mut Frame) {
    // 70% width, 80% height
    let popup_width = (f.area().width as f32 * 0.7) as u16;
    let popup_height = (f.area().height as f32 * 0.8) as u16;
    let popup_area = centered_rect(popup_width, popup_height, f.area());

    let help_text = vec![
        heading("NAVIGATION"),
        Line::from(""),
        Line::from("  ← / h              Page (or spread) to the left"),
        Line::from("  → / l              Page (or spread) to the right"),
        Line::from("  g / Home           First page"),
        Line::from("  G / End            Last page"),
        Line::from("  p                  Go to page number"),
        Line::from("  s                  Surah list"),
        Line::from("  d                  Toggle display direction"),
        Line::from(""),
        heading("MARKS"),
        Line::from(""),
        Line::from("  r / R              Save / go to reading mark"),
        Line::from("  f / F              Save / go to hifdh mark"),
        Line::from("  x                  Toggle page memorized"),
        Line::from("  b / B              Toggle bookmark / go to bookmark"),
        Line::from(""),
        heading("AUDIO"),
        Line::from(""),
        Line::from("  a                  Play / pause page narration"),
        Line::from("  A                  Stop"),
        Line::from("  , / .              Seek back / forward 5s"),
        Line::from(""),
        heading("APPLICATION"),
        Line::from(""),
        Line::from("  Tab / m            Menu"),
        Line::from("  Ctrl-t / Ctrl-s    Toggle titlebar / statusbar"),
        Line::from("  ? / F1             Toggle this help"),
        Line::from("  q / Ctrl-c         Quit"),
        Line::from("  Esc                Close popup/menu"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press Esc or ? to close",
            Style::default().fg(Color::Gray),
        )]),
    ];

    let paragraph = Paragraph::new(help_text)
        .block(
            Block::default()
                .title(" Help ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .alignment(Alignment::Left)
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, popup_area);
    f.render_widget(paragraph, popup_area);
}
