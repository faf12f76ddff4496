use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Widget;

pub struct Header<'a> {
    /// Active context, e.g. "All Tasks" or a tag name.
    pub label: &'a str,
    pub shown: usize,
    pub total: usize,
    pub done: usize,
    pub loading: bool,
}

impl<'a> Widget for Header<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let bg = Style::default().bg(Color::DarkGray);
        let title = Span::styled(
            " tagdo ",
            bg.fg(Color::White).add_modifier(Modifier::BOLD),
        );
        let label = Span::styled(format!(" [{}] ", self.label), bg.fg(Color::Cyan));

        let counts = if self.loading {
            "loading... ".to_string()
        } else {
            format!("{} of {} · {} done ", self.shown, self.total, self.done)
        };

        let used = title.width() + label.width() + counts.chars().count();
        let spacer = Span::styled(
            " ".repeat((area.width as usize).saturating_sub(used)),
            bg,
        );
        let counts = Span::styled(counts, bg.fg(Color::Gray));

        Line::from(vec![title, label, spacer, counts]).render(area, buf);
    }
}
