use crate::types::{MenuItem, Surah};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState},
};

/// Side menu listing reader actions
pub struct MenuPanel {
    selected_idx: usize,
    auto_save: bool,
}

impl MenuPanel {
    pub fn new(selected_idx: usize, auto_save: bool) -> Self {
        Self {
            selected_idx,
            auto_save,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(" Menu ")
            .borders(Borders::ALL)
            .border_style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            );

        let items: Vec<ListItem> = MenuItem::ALL
            .iter()
            .map(|item| {
                let mut spans = vec![Span::raw(item.label())];
                if *item == MenuItem::ToggleAutoSave {
                    let state = if self.auto_save { " (on)" } else { " (off)" };
                    spans.push(Span::styled(state, Style::default().fg(Color::DarkGray)));
                }
                ListItem::new(Line::from(spans))
            })
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_style(
                Style::default()
                    .bg(Color::DarkGray)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol(">> ");

        let mut list_state = ListState::default();
        list_state.select(Some(self.selected_idx));

        frame.render_widget(Clear, area);
        frame.render_stateful_widget(list, area, &mut list_state);
    }
}

/// Scrollable list of every surah with its start page
pub struct SurahListPanel<'a> {
    surahs: &'a [Surah],
    selected_idx: usize,
    current_surah: Option<u16>,
}

impl<'a> SurahListPanel<'a> {
    pub fn new(surahs: &'a [Surah], selected_idx: usize, current_surah: Option<u16>) -> Self {
        Self {
            surahs,
            selected_idx,
            current_surah,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(" Surahs ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));

        let items: Vec<ListItem> = self
            .surahs
            .iter()
            .map(|surah| {
                let style = if Some(surah.id) == self.current_surah {
                    Style::default().fg(Color::Yellow)
                } else {
                    Style::default()
                };
                ListItem::new(Line::from(vec![
                    Span::styled(format!("{:>3}. {}", surah.id, surah.name_en), style),
                    Span::raw("  "),
                    Span::raw(surah.name_ar),
                    Span::styled(
                        format!("  p{}", surah.start_page),
                        Style::default().fg(Color::DarkGray),
                    ),
                ]))
            })
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_style(
                Style::default()
                    .bg(Color::DarkGray)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol(">> ");

        let mut list_state = ListState::default();
        list_state.select(Some(self.selected_idx));

        frame.render_widget(Clear, area);
        frame.render_stateful_widget(list, area, &mut list_state);
    }
}
