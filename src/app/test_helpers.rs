use chrono::NaiveDate;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::api::types::{Tag, Todo};
use crate::view::{Call, Command, Policy, Reply, TodoView};

use super::AppState;

pub fn todo(id: i64, title: &str, done: bool, tags: &[&str]) -> Todo {
    Todo {
        id,
        title: title.into(),
        done,
        tag_list: tags.iter().map(|t| t.to_string()).collect(),
        due_date: None,
    }
}

pub fn due(mut todo: Todo, y: i32, m: u32, d: u32) -> Todo {
    todo.due_date = NaiveDate::from_ymd_opt(y, m, d);
    todo
}

pub fn tag(id: i64, name: &str, count: u32) -> Tag {
    Tag {
        id,
        name: name.into(),
        taggings_count: count,
    }
}

pub fn test_tags() -> Vec<Tag> {
    vec![tag(1, "home", 2), tag(2, "work", 1)]
}

/// A snapshot in the "All" context holding `todos` and the standard tag list.
pub fn loaded_view(todos: Vec<Todo>) -> TodoView {
    let view = TodoView::new(Policy::default());
    let ticket = view.ticket();
    let view = view.apply(&ticket, Reply::Todos(todos)).view;
    view.apply(&ticket, Reply::Tags(test_tags())).view
}

pub fn test_todos() -> Vec<Todo> {
    vec![
        todo(1, "Buy milk", false, &["home"]),
        todo(2, "Write report", true, &["work"]),
        todo(3, "Walk dog", false, &["home"]),
    ]
}

pub fn test_state() -> AppState {
    let mut state = AppState::new(Policy::default(), vec![]);
    state.status_message = None;
    state.replace_view(loaded_view(test_todos()));
    state
}

/// Answers every command with the reply `respond` picks for its call.
pub fn settle(
    state: &mut AppState,
    commands: Vec<Command>,
    mut respond: impl FnMut(&Call) -> Reply,
) -> Vec<Command> {
    let mut follow_ups = Vec::new();
    for command in commands {
        let reply = respond(&command.call);
        follow_ups.extend(super::handle_reply(state, &command.ticket, reply));
    }
    follow_ups
}

pub fn key_event(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

pub fn ctrl_key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::CONTROL)
}

pub fn type_text(state: &mut AppState, text: &str) {
    for ch in text.chars() {
        super::input::handle_prompt_key(state, &key_event(KeyCode::Char(ch)));
    }
}
