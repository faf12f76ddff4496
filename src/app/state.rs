use crossterm::event::KeyEvent;

use crate::api::types::{Tag, Todo, MAX_NAME_LEN};
use crate::edit_buffer::EditBuffer;
use crate::error::{ErrorInfo, ErrorPopup};
use crate::view::{Call, Policy, Reply, Ticket, TodoView};

/// Room for a comma-separated list of several full-length tag names.
pub const TAG_LIST_PROMPT_LEN: usize = 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Todos,
    Tags,
}

/// What a submitted prompt will do with its text.
#[derive(Debug, Clone, PartialEq)]
pub enum PromptKind {
    NewTodo,
    Search,
    RenameTag,
    EditTitle { id: i64 },
    EditTags { id: i64 },
    EditDue { id: i64 },
}

impl PromptKind {
    pub fn label(&self) -> &'static str {
        match self {
            PromptKind::NewTodo => "New todo",
            PromptKind::Search => "Search",
            PromptKind::RenameTag => "Rename tag",
            PromptKind::EditTitle { .. } => "Title",
            PromptKind::EditTags { .. } => "Tags (comma separated)",
            PromptKind::EditDue { .. } => "Due date (YYYY-MM-DD, empty clears)",
        }
    }

    /// Most characters the prompt accepts. Tag names are capped one by one on submit.
    pub fn limit(&self) -> usize {
        match self {
            PromptKind::EditTags { .. } => TAG_LIST_PROMPT_LEN,
            _ => MAX_NAME_LEN,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Prompt {
    pub kind: PromptKind,
    pub buffer: EditBuffer,
}

impl Prompt {
    pub fn new(kind: PromptKind, initial: &str) -> Self {
        let buffer = EditBuffer::new(initial, kind.limit());
        Self { kind, buffer }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AppMessage {
    Key(KeyEvent),
    Replied(Ticket, Reply),
    Failed(Call, ErrorInfo),
}

pub struct AppState {
    pub view: TodoView,
    pub focus: Focus,
    /// Highlighted row in the todo list.
    pub cursor: usize,
    /// Highlighted row in the tag panel; 0 is "All Tasks".
    pub tag_cursor: usize,
    pub prompt: Option<Prompt>,
    /// Calls sent but not yet answered.
    pub in_flight: usize,
    pub status_message: Option<String>,
    pub error_popup: Option<ErrorPopup>,
    pub hints: Vec<(String, &'static str)>,
    pub help_lines: Vec<(String, &'static str)>,
    pub show_help: bool,
    pub tag_panel_width_percent: u16,
    pub should_quit: bool,
}

impl AppState {
    pub fn new(policy: Policy, hints: Vec<(String, &'static str)>) -> Self {
        Self {
            view: TodoView::new(policy),
            focus: Focus::Todos,
            cursor: 0,
            tag_cursor: 0,
            prompt: None,
            in_flight: 0,
            status_message: Some("Loading todos...".into()),
            hints,
            help_lines: Vec::new(),
            error_popup: None,
            show_help: false,
            tag_panel_width_percent: 25,
            should_quit: false,
        }
    }

    /// Installs a new snapshot and keeps both cursors on existing rows.
    pub fn replace_view(&mut self, view: TodoView) {
        self.view = view;
        self.cursor = self
            .cursor
            .min(self.view.todos().len().saturating_sub(1));
        self.tag_cursor = self.tag_cursor.min(self.visible_tag_count());
    }

    pub fn visible_tag_count(&self) -> usize {
        self.view.visible_tags().count()
    }

    pub fn todo_at_cursor(&self) -> Option<&Todo> {
        self.view.todos().get(self.cursor)
    }

    /// Tag under the tag cursor; `None` for the "All Tasks" row.
    pub fn tag_at_cursor(&self) -> Option<&Tag> {
        self.tag_cursor
            .checked_sub(1)
            .and_then(|i| self.view.visible_tags().nth(i))
    }

    pub fn loading(&self) -> bool {
        self.in_flight > 0
    }
}
