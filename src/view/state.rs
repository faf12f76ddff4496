use chrono::NaiveDate;
use thiserror::Error;

use crate::api::types::{self, NewTodo, Tag, Todo, TodoPatch, MAX_NAME_LEN, PLACEHOLDER_ID};

use super::collection::CheckedSet;
use super::search;

/// Which todos the collection currently holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Context {
    All,
    Tag { id: i64, name: String },
    Search { query: String },
}

impl Context {
    /// Tag a new todo receives when created in this context.
    pub fn implied_tag(&self) -> &str {
        match self {
            Context::Tag { name, .. } => name,
            Context::All | Context::Search { .. } => "",
        }
    }

    pub fn tag_id(&self) -> Option<i64> {
        match self {
            Context::Tag { id, .. } => Some(*id),
            _ => None,
        }
    }

    /// Whether a todo arriving from elsewhere belongs in this context's collection.
    pub fn admits(&self, todo: &Todo) -> bool {
        match self {
            Context::All => true,
            Context::Tag { name, .. } => todo.has_tag(name),
            Context::Search { query } => search::title_matches(&todo.title, query),
        }
    }

    pub fn label(&self) -> String {
        match self {
            Context::All => "All Tasks".into(),
            Context::Tag { name, .. } => name.clone(),
            Context::Search { query } => format!("Search Query: {}", query),
        }
    }
}

/// Editable copy of the todo open in the detail pane.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailEditor {
    pub id: i64,
    pub title: String,
    pub tag_list: Vec<String>,
    pub due_date: Option<NaiveDate>,
}

impl DetailEditor {
    pub fn placeholder() -> Self {
        Self {
            id: PLACEHOLDER_ID,
            title: String::new(),
            tag_list: Vec::new(),
            due_date: None,
        }
    }

    pub fn from_todo(todo: &Todo) -> Self {
        Self {
            id: todo.id,
            title: todo.title.clone(),
            tag_list: todo.tag_list.clone(),
            due_date: todo.due_date,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.id == PLACEHOLDER_ID
    }

    /// The editor's current fields as a full edit.
    pub fn to_edit(&self) -> TodoEdit {
        TodoEdit {
            title: self.title.clone(),
            tag_list: self.tag_list.clone(),
            due_date: self.due_date,
        }
    }
}

impl Default for DetailEditor {
    fn default() -> Self {
        Self::placeholder()
    }
}

/// Behaviours that differ between deployments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Policy {
    /// Leave tags nobody uses out of the filter list.
    pub hide_unused_tags: bool,
    /// Close the detail editor when a search is submitted.
    pub reset_detail_on_search: bool,
}

/// Snapshot of the context a request was issued under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    pub generation: u64,
    pub context: Context,
    /// Tag list revision; bumped whenever a tag rename or delete is applied.
    pub tag_revision: u64,
}

/// A remote call the caller must perform.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    ListTodos,
    ListTodosForTag(i64),
    SearchTodos { query: String },
    CreateTodo(NewTodo),
    ToggleDone { id: i64, done: bool },
    EditTodo { id: i64, patch: TodoPatch },
    DeleteTodo(i64),
    ListTags,
    RenameTag { id: i64, name: String },
    DeleteTag(i64),
}

impl Call {
    pub fn describe(&self) -> String {
        match self {
            Call::ListTodos => "load todos".into(),
            Call::ListTodosForTag(id) => format!("load todos for tag #{}", id),
            Call::SearchTodos { query } => format!("search \"{}\"", query),
            Call::CreateTodo(new) => format!("create \"{}\"", new.title),
            Call::ToggleDone { id, .. } => format!("toggle todo #{}", id),
            Call::EditTodo { id, .. } => format!("edit todo #{}", id),
            Call::DeleteTodo(id) => format!("delete todo #{}", id),
            Call::ListTags => "load tags".into(),
            Call::RenameTag { id, .. } => format!("rename tag #{}", id),
            Call::DeleteTag(id) => format!("delete tag #{}", id),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Command {
    pub ticket: Ticket,
    pub call: Call,
}

/// Successful outcome of a [`Call`].
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Todos(Vec<Todo>),
    /// Unfiltered list; the query is applied on arrival.
    SearchResults(Vec<Todo>),
    Created(types::Reply<Todo>),
    Toggled(Todo),
    Edited(Todo),
    Deleted(i64),
    Tags(Vec<Tag>),
    TagRenamed(types::Reply<Tag>),
    TagDeleted(i64),
}

/// New field values for one todo.
#[derive(Debug, Clone, PartialEq)]
pub struct TodoEdit {
    pub title: String,
    pub tag_list: Vec<String>,
    pub due_date: Option<NaiveDate>,
}

/// Next snapshot plus the calls it still needs.
#[derive(Debug, Clone, PartialEq)]
pub struct Effect {
    pub view: TodoView,
    pub commands: Vec<Command>,
}

impl Effect {
    pub(crate) fn idle(view: TodoView) -> Self {
        Self {
            view,
            commands: Vec::new(),
        }
    }
}

/// Why an intent was refused before reaching the server.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejected {
    #[error("title cannot be empty")]
    EmptyTitle,
    #[error("title is longer than {max} characters", max = MAX_NAME_LEN)]
    TitleTooLong,
    #[error("tag name cannot be empty")]
    EmptyTagName,
    #[error("tag name is longer than {max} characters", max = MAX_NAME_LEN)]
    TagNameTooLong,
    #[error("no tag is selected")]
    NoActiveTag,
    #[error("no todos are checked")]
    NothingChecked,
    #[error("no todo is open in the editor")]
    NothingOpen,
    #[error("todo #{0} is not in the list")]
    UnknownTodo(i64),
}

#[derive(Debug, Clone, PartialEq)]
pub struct TodoView {
    pub(super) todos: Vec<Todo>,
    pub(super) checked: CheckedSet,
    pub(super) context: Context,
    pub(super) detail: DetailEditor,
    pub(super) tags: Vec<Tag>,
    pub(super) tag_error: bool,
    pub(super) all_count: usize,
    pub(super) generation: u64,
    pub(super) tag_revision: u64,
    pub(super) policy: Policy,
}

impl TodoView {
    pub fn new(policy: Policy) -> Self {
        Self {
            todos: Vec::new(),
            checked: CheckedSet::default(),
            context: Context::All,
            detail: DetailEditor::placeholder(),
            tags: Vec::new(),
            tag_error: false,
            all_count: 0,
            generation: 0,
            tag_revision: 0,
            policy,
        }
    }

    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    pub fn checked(&self) -> &CheckedSet {
        &self.checked
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    pub fn detail(&self) -> &DetailEditor {
        &self.detail
    }

    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    /// Tags for the filter list, honouring `hide_unused_tags`.
    pub fn visible_tags(&self) -> impl Iterator<Item = &Tag> {
        let hide = self.policy.hide_unused_tags;
        self.tags
            .iter()
            .filter(move |t| !hide || t.taggings_count > 0)
    }

    pub fn tag_error(&self) -> bool {
        self.tag_error
    }

    pub fn all_count(&self) -> usize {
        self.all_count
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn policy(&self) -> Policy {
        self.policy
    }

    pub fn ticket(&self) -> Ticket {
        Ticket {
            generation: self.generation,
            context: self.context.clone(),
            tag_revision: self.tag_revision,
        }
    }

    pub(super) fn command(&self, call: Call) -> Command {
        Command {
            ticket: self.ticket(),
            call,
        }
    }

    pub(super) fn is_current(&self, ticket: &Ticket) -> bool {
        ticket.generation == self.generation
    }
}
