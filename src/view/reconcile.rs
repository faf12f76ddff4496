use std::collections::BTreeSet;

use crate::api::types::{self, join_tag_list, normalize_tag_names, NewTodo, TodoPatch, MAX_NAME_LEN};

use super::collection::{order_by_due_date, position_of, remove_ids, CheckedSet};
use super::search::filter_by_title;
use super::state::{
    Call, Context, DetailEditor, Effect, Rejected, Reply, Ticket, TodoEdit, TodoView,
};

fn validate_title(title: &str) -> Result<String, Rejected> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(Rejected::EmptyTitle);
    }
    if trimmed.chars().count() > MAX_NAME_LEN {
        return Err(Rejected::TitleTooLong);
    }
    Ok(trimmed.to_string())
}

fn validate_tag_name(name: &str) -> Result<String, Rejected> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(Rejected::EmptyTagName);
    }
    if trimmed.chars().count() > MAX_NAME_LEN {
        return Err(Rejected::TagNameTooLong);
    }
    Ok(trimmed.to_string())
}

impl TodoView {
    /// First load: every todo plus the tag list.
    pub fn start(&self) -> Effect {
        Effect {
            view: self.clone(),
            commands: vec![self.command(Call::ListTodos), self.command(Call::ListTags)],
        }
    }

    /// Enters `target`, discarding the current collection and requesting its replacement.
    pub fn select_context(&self, target: Context) -> Effect {
        let mut next = self.clone();
        next.generation += 1;
        next.tag_error = false;
        let reset_detail = match &target {
            Context::All | Context::Tag { .. } => true,
            Context::Search { .. } => self.policy.reset_detail_on_search,
        };
        if reset_detail {
            next.detail = DetailEditor::placeholder();
        }
        let call = match &target {
            Context::All => Call::ListTodos,
            Context::Tag { id, .. } => Call::ListTodosForTag(*id),
            Context::Search { query } => Call::SearchTodos {
                query: query.clone(),
            },
        };
        next.context = target;
        tracing::debug!(
            generation = next.generation,
            context = %next.context.label(),
            "context entered"
        );
        let command = next.command(call);
        Effect {
            view: next,
            commands: vec![command],
        }
    }

    pub fn search(&self, query: &str) -> Effect {
        self.select_context(Context::Search {
            query: query.to_string(),
        })
    }

    /// Reloads the current context and the tag list without leaving the context.
    pub fn refresh(&self) -> Effect {
        let mut next = self.clone();
        next.generation += 1;
        let call = match &next.context {
            Context::All => Call::ListTodos,
            Context::Tag { id, .. } => Call::ListTodosForTag(*id),
            Context::Search { query } => Call::SearchTodos {
                query: query.clone(),
            },
        };
        let commands = vec![next.command(call), next.command(Call::ListTags)];
        Effect {
            view: next,
            commands,
        }
    }

    pub fn refresh_tags(&self) -> Effect {
        Effect {
            view: self.clone(),
            commands: vec![self.command(Call::ListTags)],
        }
    }

    /// Opens a todo from the collection in the detail editor.
    pub fn select_todo(&self, id: i64) -> Result<TodoView, Rejected> {
        let pos = position_of(&self.todos, id).ok_or(Rejected::UnknownTodo(id))?;
        let mut next = self.clone();
        next.detail = DetailEditor::from_todo(&self.todos[pos]);
        Ok(next)
    }

    pub fn create(&self, title: &str) -> Result<Effect, Rejected> {
        let title = validate_title(title)?;
        let call = Call::CreateTodo(NewTodo {
            title,
            done: false,
            tag_list: self.context.implied_tag().to_string(),
        });
        Ok(Effect {
            view: self.clone(),
            commands: vec![self.command(call)],
        })
    }

    pub fn toggle_done(&self, id: i64, done: bool) -> Result<Effect, Rejected> {
        if position_of(&self.todos, id).is_none() {
            return Err(Rejected::UnknownTodo(id));
        }
        Ok(Effect {
            view: self.clone(),
            commands: vec![self.command(Call::ToggleDone { id, done })],
        })
    }

    pub fn edit(&self, id: i64, edit: TodoEdit) -> Result<Effect, Rejected> {
        if id < 0 {
            return Err(Rejected::NothingOpen);
        }
        let title = validate_title(&edit.title)?;
        let tags = normalize_tag_names(&edit.tag_list);
        // the limit is per tag name; the joined list may be longer
        if tags.iter().any(|t| t.chars().count() > MAX_NAME_LEN) {
            return Err(Rejected::TagNameTooLong);
        }
        let patch = TodoPatch {
            title: Some(title),
            done: None,
            tag_list: Some(join_tag_list(&tags)),
            due_date: Some(edit.due_date),
        };
        Ok(Effect {
            view: self.clone(),
            commands: vec![self.command(Call::EditTodo { id, patch })],
        })
    }

    /// Removes every checked todo locally and issues one delete per id.
    ///
    /// The local removal is not rolled back if an individual delete fails.
    pub fn delete_selected(&self) -> Result<Effect, Rejected> {
        if self.checked.is_empty() {
            return Err(Rejected::NothingChecked);
        }
        let ids: BTreeSet<i64> = self.checked.to_set();
        let mut next = self.clone();
        let removed = remove_ids(&mut next.todos, &ids);
        next.checked.clear();
        next.all_count = next.all_count.saturating_sub(removed);
        if ids.contains(&next.detail.id) {
            next.detail = DetailEditor::placeholder();
        }
        tracing::info!(count = ids.len(), "deleting checked todos");
        let commands = self
            .checked
            .ids()
            .iter()
            .map(|&id| next.command(Call::DeleteTodo(id)))
            .collect();
        Ok(Effect {
            view: next,
            commands,
        })
    }

    pub fn rename_tag(&self, name: &str) -> Result<Effect, Rejected> {
        let id = self.context.tag_id().ok_or(Rejected::NoActiveTag)?;
        let name = validate_tag_name(name)?;
        Ok(Effect {
            view: self.clone(),
            commands: vec![self.command(Call::RenameTag { id, name })],
        })
    }

    pub fn delete_tag(&self, id: i64) -> Effect {
        Effect {
            view: self.clone(),
            commands: vec![self.command(Call::DeleteTag(id))],
        }
    }

    /// Folds a successful reply into a new snapshot.
    pub fn apply(&self, ticket: &Ticket, reply: Reply) -> Effect {
        match reply {
            Reply::Todos(todos) => {
                if !self.is_current(ticket) {
                    tracing::debug!(
                        issued = ticket.generation,
                        current = self.generation,
                        "discarding stale todo list"
                    );
                    return Effect::idle(self.clone());
                }
                let mut next = self.clone();
                if next.context == Context::All {
                    next.all_count = todos.len();
                }
                next.replace_collection(todos);
                Effect::idle(next)
            }
            Reply::SearchResults(todos) => {
                if !self.is_current(ticket) {
                    tracing::debug!(
                        issued = ticket.generation,
                        current = self.generation,
                        "discarding stale search results"
                    );
                    return Effect::idle(self.clone());
                }
                let mut next = self.clone();
                next.all_count = todos.len();
                let filtered = match &next.context {
                    Context::Search { query } => filter_by_title(todos, query),
                    _ => todos,
                };
                next.replace_collection(filtered);
                Effect::idle(next)
            }
            Reply::Created(types::Reply::Rejected(rejection)) => {
                tracing::warn!(
                    message = rejection.message.as_deref().unwrap_or(""),
                    "server rejected new todo"
                );
                Effect::idle(self.clone())
            }
            Reply::Created(types::Reply::Accepted(todo)) => {
                tracing::info!(id = todo.id, "todo created");
                let mut next = self.clone();
                next.all_count += 1;
                let fresh = self.is_current(ticket);
                let belongs = fresh || next.context.admits(&todo);
                if belongs && position_of(&next.todos, todo.id).is_none() {
                    next.checked.sync(&todo);
                    next.todos.insert(0, todo);
                }
                if fresh {
                    next.detail = DetailEditor::placeholder();
                }
                Effect::idle(next)
            }
            Reply::Toggled(todo) => {
                let mut next = self.clone();
                match position_of(&next.todos, todo.id) {
                    Some(pos) => {
                        next.checked.sync(&todo);
                        next.todos[pos] = todo;
                    }
                    None => {
                        tracing::debug!(id = todo.id, "toggled todo is not in the current list");
                    }
                }
                Effect::idle(next)
            }
            Reply::Edited(todo) => {
                tracing::info!(id = todo.id, "todo updated");
                let mut next = self.clone();
                if next.detail.id == todo.id {
                    next.detail = DetailEditor::from_todo(&todo);
                }
                if let Some(pos) = position_of(&next.todos, todo.id) {
                    let falls_out = match &next.context {
                        Context::Tag { name, .. } => !todo.has_tag(name),
                        _ => false,
                    };
                    if falls_out {
                        next.checked.unmark(todo.id);
                        next.todos.remove(pos);
                    } else {
                        next.checked.sync(&todo);
                        next.todos[pos] = todo;
                    }
                }
                let command = next.command(Call::ListTags);
                Effect {
                    view: next,
                    commands: vec![command],
                }
            }
            Reply::Deleted(id) => {
                tracing::debug!(id, "todo deleted on server");
                Effect::idle(self.clone())
            }
            Reply::Tags(tags) => {
                if ticket.tag_revision < self.tag_revision {
                    tracing::debug!(
                        issued = ticket.tag_revision,
                        current = self.tag_revision,
                        "discarding tag list older than the last rename or delete"
                    );
                    return Effect::idle(self.clone());
                }
                let mut next = self.clone();
                if let Context::Tag { id, name } = &mut next.context {
                    if let Some(tag) = tags.iter().find(|t| t.id == *id) {
                        *name = tag.name.clone();
                    }
                }
                next.tags = tags;
                Effect::idle(next)
            }
            Reply::TagRenamed(types::Reply::Rejected(_)) => {
                tracing::warn!("tag rename rejected: name already exists");
                let mut next = self.clone();
                if ticket.context == self.context {
                    next.tag_error = true;
                }
                Effect::idle(next)
            }
            Reply::TagRenamed(types::Reply::Accepted(tag)) => {
                tracing::info!(id = tag.id, name = %tag.name, "tag renamed");
                let mut next = self.clone();
                next.tag_revision += 1;
                if let Some(existing) = next.tags.iter_mut().find(|t| t.id == tag.id) {
                    *existing = tag.clone();
                }
                if let Context::Tag { id, name } = &mut next.context {
                    if *id == tag.id {
                        *name = tag.name.clone();
                    }
                }
                if ticket.context.tag_id() == next.context.tag_id() {
                    next.tag_error = false;
                }
                Effect::idle(next)
            }
            Reply::TagDeleted(id) => {
                tracing::info!(id, "tag deleted, back to all todos");
                let mut next = self.clone();
                next.tags.retain(|t| t.id != id);
                next.generation += 1;
                next.tag_revision += 1;
                next.context = Context::All;
                next.detail = DetailEditor::placeholder();
                next.tag_error = false;
                let command = next.command(Call::ListTodos);
                Effect {
                    view: next,
                    commands: vec![command],
                }
            }
        }
    }

    fn replace_collection(&mut self, todos: Vec<types::Todo>) {
        self.todos = order_by_due_date(todos);
        self.checked = CheckedSet::from_todos(&self.todos);
    }
}
