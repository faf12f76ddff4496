use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block as WidgetBlock, BorderType, Borders, Widget};

use crate::api::types::Todo;

pub struct TodoList<'a> {
    pub title: &'a str,
    pub todos: &'a [Todo],
    pub cursor: usize,
    pub focused: bool,
    /// Todo currently in the detail pane.
    pub open_id: Option<i64>,
    pub loading: bool,
}

fn render_centered_message(msg: &str, area: Rect, buf: &mut Buffer) {
    if area.height > 0 {
        let y = area.y + area.height / 2;
        Line::styled(msg, Style::default().fg(Color::DarkGray))
            .render(Rect::new(area.x, y, area.width, 1), buf);
    }
}

fn todo_row(todo: &Todo, width: usize, style: Style) -> Line<'static> {
    let checkbox = if todo.done { "[x] " } else { "[ ] " };
    let due = todo
        .due_date
        .map(|d| format!(" {}", d.format("%Y-%m-%d")))
        .unwrap_or_default();
    let room = width.saturating_sub(checkbox.len() + due.chars().count());
    let mut title: String = todo.title.chars().take(room).collect();
    let pad = room.saturating_sub(title.chars().count());
    title.push_str(&" ".repeat(pad));

    let title_style = if todo.done {
        style.add_modifier(Modifier::CROSSED_OUT | Modifier::DIM)
    } else {
        style
    };
    Line::from(vec![
        Span::styled(checkbox, style.fg(Color::Green)),
        Span::styled(title, title_style),
        Span::styled(due, style.fg(Color::Magenta)),
    ])
}

impl<'a> Widget for TodoList<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_color = if self.focused {
            Color::Cyan
        } else {
            Color::DarkGray
        };
        let block = WidgetBlock::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border_color))
            .title(format!(" {} ", self.title));
        let inner = block.inner(area);
        block.render(area, buf);

        if self.todos.is_empty() {
            let msg = if self.loading {
                "Loading todos..."
            } else {
                "Nothing to do"
            };
            render_centered_message(msg, inner, buf);
            return;
        }

        let height = inner.height as usize;
        // keep the cursor row on screen
        let offset = (self.cursor + 1).saturating_sub(height);

        for (i, todo) in self.todos.iter().enumerate().skip(offset).take(height) {
            let mut style = Style::default().fg(Color::White);
            if self.open_id == Some(todo.id) {
                style = style.add_modifier(Modifier::BOLD);
            }
            if self.focused && i == self.cursor {
                style = style.bg(Color::DarkGray);
            }
            let y = inner.y + (i - offset) as u16;
            todo_row(todo, inner.width as usize, style)
                .render(Rect::new(inner.x, y, inner.width, 1), buf);
        }
    }
}
