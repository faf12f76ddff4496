use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block as WidgetBlock, BorderType, Borders, Widget};

use crate::api::types::Tag;

pub struct TagPanel<'a> {
    pub tags: Vec<&'a Tag>,
    /// Id of the tag whose todos are shown; `None` when not filtering by tag.
    pub active_tag: Option<i64>,
    pub all_active: bool,
    pub cursor: usize,
    pub focused: bool,
    pub tag_error: bool,
}

impl<'a> Widget for TagPanel<'a> {
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
            .title(" Tags ");
        let inner = block.inner(area);
        block.render(area, buf);

        let mut rows: Vec<(String, bool)> = vec![("All Tasks".to_string(), self.all_active)];
        rows.extend(self.tags.iter().map(|tag| {
            (
                format!("{} ({})", tag.name, tag.taggings_count),
                self.active_tag == Some(tag.id),
            )
        }));

        let reserved = if self.tag_error { 1 } else { 0 };
        let height = inner.height.saturating_sub(reserved) as usize;
        let offset = (self.cursor + 1).saturating_sub(height);

        for (i, (text, active)) in rows.iter().enumerate().skip(offset).take(height) {
            let mut style = Style::default().fg(Color::Gray);
            if *active {
                style = style.fg(Color::Yellow).add_modifier(Modifier::BOLD);
            }
            if self.focused && i == self.cursor {
                style = style.bg(Color::DarkGray);
            }
            let marker = if *active { "▸ " } else { "  " };
            let display: String = format!("{}{}", marker, text)
                .chars()
                .take(inner.width as usize)
                .collect();
            let y = inner.y + (i - offset) as u16;
            Line::styled(display, style).render(Rect::new(inner.x, y, inner.width, 1), buf);
        }

        if self.tag_error && inner.height > 0 {
            let y = inner.y + inner.height - 1;
            Line::styled(
                "Tag name already exists",
                Style::default().fg(Color::Red),
            )
            .render(Rect::new(inner.x, y, inner.width, 1), buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read_line(buf: &Buffer, y: u16, width: u16) -> String {
        (0..width)
            .map(|x| {
                buf.cell((x, y))
                    .unwrap()
                    .symbol()
                    .chars()
                    .next()
                    .unwrap_or(' ')
            })
            .collect()
    }

    fn tags() -> Vec<Tag> {
        vec![
            Tag {
                id: 1,
                name: "home".into(),
                taggings_count: 2,
            },
            Tag {
                id: 2,
                name: "work".into(),
                taggings_count: 0,
            },
        ]
    }

    #[test]
    fn lists_all_tasks_then_tags_with_counts() {
        let tags = tags();
        let area = Rect::new(0, 0, 24, 8);
        let mut buf = Buffer::empty(area);
        TagPanel {
            tags: tags.iter().collect(),
            active_tag: None,
            all_active: true,
            cursor: 0,
            focused: false,
            tag_error: false,
        }
        .render(area, &mut buf);

        assert!(read_line(&buf, 1, 24).contains("▸ All Tasks"));
        assert!(read_line(&buf, 2, 24).contains("home (2)"));
        assert!(read_line(&buf, 3, 24).contains("work (0)"));
    }

    #[test]
    fn marks_active_tag() {
        let tags = tags();
        let area = Rect::new(0, 0, 24, 8);
        let mut buf = Buffer::empty(area);
        TagPanel {
            tags: tags.iter().collect(),
            active_tag: Some(2),
            all_active: false,
            cursor: 2,
            focused: true,
            tag_error: false,
        }
        .render(area, &mut buf);

        assert!(!read_line(&buf, 1, 24).contains('▸'));
        assert!(read_line(&buf, 3, 24).contains("▸ work"));
    }

    #[test]
    fn shows_duplicate_name_error() {
        let tags = tags();
        let area = Rect::new(0, 0, 30, 8);
        let mut buf = Buffer::empty(area);
        TagPanel {
            tags: tags.iter().collect(),
            active_tag: Some(1),
            all_active: false,
            cursor: 0,
            focused: false,
            tag_error: true,
        }
        .render(area, &mut buf);

        assert!(read_line(&buf, 6, 30).contains("Tag name already exists"));
    }
}
