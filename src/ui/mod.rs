pub mod detail;
pub mod header;
pub mod status_bar;
pub mod tag_panel;
pub mod todo_list;

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block as WidgetBlock, BorderType, Borders, Clear};
use ratatui::Frame;

use crate::app::{AppState, Focus};
use crate::error::ErrorPopup;
use crate::view::Context;

use detail::DetailPane;
use header::Header;
use status_bar::StatusBar;
use tag_panel::TagPanel;
use todo_list::TodoList;

pub fn render(frame: &mut Frame, state: &AppState) {
    let rows = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(1),
        Constraint::Length(1),
    ])
    .split(frame.area());

    let view = &state.view;
    let label = view.context().label();

    frame.render_widget(
        Header {
            label: &label,
            shown: view.todos().len(),
            total: view.all_count(),
            done: view.checked().len(),
            loading: state.loading(),
        },
        rows[0],
    );

    let tag_width = state.tag_panel_width_percent;
    let columns = Layout::horizontal([
        Constraint::Percentage(tag_width),
        Constraint::Min(20),
        Constraint::Percentage(30),
    ])
    .split(rows[1]);

    frame.render_widget(
        TagPanel {
            tags: view.visible_tags().collect(),
            active_tag: view.context().tag_id(),
            all_active: *view.context() == Context::All,
            cursor: state.tag_cursor,
            focused: state.focus == Focus::Tags,
            tag_error: view.tag_error(),
        },
        columns[0],
    );

    let detail = view.detail();
    frame.render_widget(
        TodoList {
            title: &label,
            todos: view.todos(),
            cursor: state.cursor,
            focused: state.focus == Focus::Todos,
            open_id: (!detail.is_placeholder()).then_some(detail.id),
            loading: state.loading(),
        },
        columns[1],
    );
    frame.render_widget(DetailPane { detail }, columns[2]);

    if state.show_help {
        render_help_popup(frame, &state.help_lines, rows[1]);
    }

    if let Some(err) = &state.error_popup {
        render_error_popup(frame, err, rows[1]);
    }

    frame.render_widget(
        StatusBar {
            hints: &state.hints,
            message: state.status_message.as_deref(),
            prompt: state.prompt.as_ref(),
        },
        rows[2],
    );
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width, height)
}

fn render_help_popup(frame: &mut Frame, lines: &[(String, &str)], area: Rect) {
    let popup_height = (lines.len() + 3).min(area.height as usize) as u16; // +2 borders +1 footer
    let popup_width = (area.width * 60 / 100).max(30).min(area.width);
    let popup_area = centered(area, popup_width, popup_height);
    frame.render_widget(Clear, popup_area);

    let block = WidgetBlock::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" Keys ");
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let rows = inner.height.saturating_sub(1);
    for (i, (key, action)) in lines.iter().take(rows as usize).enumerate() {
        let line = Line::from(vec![
            Span::styled(format!("{:>10}", key), Style::default().fg(Color::Yellow)),
            Span::raw("  "),
            Span::styled(*action, Style::default().fg(Color::White)),
        ]);
        frame.render_widget(line, Rect::new(inner.x, inner.y + i as u16, inner.width, 1));
    }

    if inner.height > 0 {
        let footer = Line::styled(
            "Press any key to close",
            Style::default().fg(Color::DarkGray),
        );
        frame.render_widget(
            footer,
            Rect::new(inner.x, inner.y + inner.height - 1, inner.width, 1),
        );
    }
}

fn render_error_popup(frame: &mut Frame, popup: &ErrorPopup, area: Rect) {
    let popup_width = (area.width * 50 / 100).max(30).min(area.width);
    let msg_lines = wrap_text(&popup.message, popup_width.saturating_sub(2) as usize);
    // blank, message, blank, hint, blank, footer
    let content_height = msg_lines.len() + 5;
    let popup_height = (content_height + 2).min(area.height as usize) as u16;
    let popup_area = centered(area, popup_width, popup_height);
    frame.render_widget(Clear, popup_area);

    let block = WidgetBlock::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Red))
        .title(format!(" ! {} ", popup.title));
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let mut body: Vec<Line> = vec![Line::default()];
    body.extend(
        msg_lines
            .into_iter()
            .map(|text| Line::styled(text, Style::default().fg(Color::White))),
    );
    body.push(Line::default());
    body.push(Line::styled(
        popup.hint.clone(),
        Style::default().fg(Color::DarkGray),
    ));

    // the footer always gets the last row
    let room = inner.height.saturating_sub(1) as usize;
    for (row, line) in body.into_iter().take(room).enumerate() {
        frame.render_widget(line, Rect::new(inner.x, inner.y + row as u16, inner.width, 1));
    }
    if inner.height > 0 {
        let footer = Line::styled(
            "Press any key to close",
            Style::default().fg(Color::DarkGray),
        );
        frame.render_widget(
            footer,
            Rect::new(inner.x, inner.y + inner.height - 1, inner.width, 1),
        );
    }
}

fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    if max_width == 0 {
        return vec![text.to_string()];
    }
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current = word.to_string();
        } else if current.chars().count() + 1 + word.chars().count() <= max_width {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current = word.to_string();
        }
    }
    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}
