use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block as WidgetBlock, BorderType, Borders, Widget};

use crate::view::DetailEditor;

pub struct DetailPane<'a> {
    pub detail: &'a DetailEditor,
}

fn field<'a>(name: &'a str, value: String, empty: bool) -> Line<'a> {
    let value_style = if empty {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(Color::White)
    };
    Line::from(vec![
        Span::styled(
            format!("{:<6}", name),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(value, value_style),
    ])
}

impl<'a> Widget for DetailPane<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = WidgetBlock::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Detail ");
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 {
            return;
        }

        if self.detail.is_placeholder() {
            Line::styled("Select an item.", Style::default().fg(Color::DarkGray))
                .render(Rect::new(inner.x, inner.y, inner.width, 1), buf);
            return;
        }

        let tags = self.detail.tag_list.join(", ");
        let due = self
            .detail
            .due_date
            .map(|d| d.format("%Y-%m-%d").to_string());
        let lines = [
            field("Title", self.detail.title.clone(), false),
            field(
                "Tags",
                if tags.is_empty() { "none".into() } else { tags.clone() },
                tags.is_empty(),
            ),
            field("Due", due.clone().unwrap_or_else(|| "none".into()), due.is_none()),
        ];

        for (i, line) in lines.into_iter().enumerate() {
            // one blank row between fields
            let y = inner.y + (i as u16) * 2;
            if y >= inner.y + inner.height {
                break;
            }
            line.render(Rect::new(inner.x, y, inner.width, 1), buf);
        }
    }
}
