use crate::app::AppState;
use crate::constants::{FIRST_PAGE, LAST_PAGE};
use crate::types::{DisplayDirection, UiMode};
use crate::ui::widgets::audio_bar::AudioBar;
use crate::ui::widgets::page_view::PageView;
use crate::ui::widgets::popups::{self, help, notice, page_input};
use crate::ui::widgets::sidebar::{MenuPanel, SurahListPanel};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

const MENU_WIDTH: u16 = 30;

pub fn render(f: &mut Frame, app: &AppState) {
    let mut constraints = Vec::with_capacity(3);
    if app.titlebar_visible {
        constraints.push(Constraint::Length(1));
    }
    constraints.push(Constraint::Min(0));
    if app.statusbar_visible {
        constraints.push(Constraint::Length(1));
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(f.area());

    let mut idx = 0;
    if app.titlebar_visible {
        render_titlebar(f, app, chunks[idx]);
        idx += 1;
    }
    let content = chunks[idx];
    render_content(f, app, content);
    if app.statusbar_visible {
        render_statusbar(f, app, chunks[idx + 1]);
    }

    render_overlay(f, app, content);
}

fn render_titlebar(f: &mut Frame, app: &AppState, area: Rect) {
    let page = app.current_page();
    let surahs = app
        .current_page_record()
        .map(|record| {
            record
                .surahs
                .iter()
                .filter_map(|id| app.index.surah(*id))
                .map(|s| format!("{} {}", s.name_ar, s.name_en))
                .collect::<Vec<_>>()
                .join(" · ")
        })
        .unwrap_or_default();

    let mut spans = vec![Span::raw(format!("Page {}  {}", page, surahs))];
    let badge = Style::default().fg(Color::Yellow).bg(Color::DarkGray);
    if app.marks.reading == Some(page) {
        spans.push(Span::styled("  [Last read]", badge));
    }
    if app.marks.hifdh == Some(page) {
        spans.push(Span::styled("  [Hifdh]", badge));
    }
    if app.marks.bookmark == Some(page) {
        spans.push(Span::styled("  [Bookmark]", badge));
    }
    if app.is_memorized(page) {
        spans.push(Span::styled("  [Memorized]", badge));
    }

    let title = Paragraph::new(Line::from(spans))
        .style(Style::default().fg(Color::White).bg(Color::DarkGray))
        .alignment(Alignment::Center);

    f.render_widget(title, area);
}

fn render_content(f: &mut Frame, app: &AppState, area: Rect) {
    let view = PageView::new(app.visible_pages(), app.current_page(), app.palette)
        .marks(app.marks.reading, app.marks.hifdh, &app.marks.hifdh_pages)
        .pages_dir(app.config.pages_dir.as_deref());
    view.render(f, area);
}

fn render_statusbar(f: &mut Frame, app: &AppState, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let page = app.current_page();
    let percentage = (page - FIRST_PAGE) as usize * 100 / (LAST_PAGE - FIRST_PAGE) as usize;
    let direction = match app.navigator.direction() {
        DisplayDirection::RightToLeft => "RTL",
        DisplayDirection::LeftToRight => "LTR",
    };
    let status_text = format!(
        "Page {}/{} ({}%) | {} | ?: help",
        page, LAST_PAGE, percentage, direction
    );

    let style = Style::default().fg(Color::White).bg(Color::DarkGray);
    f.render_widget(Paragraph::new(status_text).style(style), chunks[0]);

    let audio = AudioBar::new(&app.audio, page, app.spinner_epoch).line();
    f.render_widget(
        Paragraph::new(audio)
            .style(style)
            .alignment(Alignment::Right),
        chunks[1],
    );
}

fn render_overlay(f: &mut Frame, app: &AppState, content: Rect) {
    match &app.ui_mode {
        UiMode::Normal => {}
        UiMode::Menu => {
            let area = Rect {
                width: MENU_WIDTH.min(content.width),
                ..content
            };
            MenuPanel::new(app.menu_selected_idx, app.marks.auto_save).render(f, area);
        }
        UiMode::SurahList => {
            let width = (content.width as f32 * 0.6) as u16;
            let area = popups::centered_rect(width.max(40), content.height, content);
            SurahListPanel::new(
                app.index.surahs(),
                app.surah_selected_idx,
                app.current_surah().map(|s| s.id),
            )
            .render(f, area);
        }
        UiMode::PageInput => page_input::render_page_input_popup(f, &app.input_buffer),
        UiMode::Help => help::render_help_popup(f),
        UiMode::Notice(n) => notice::render_notice_popup(f, n),
    }
}
