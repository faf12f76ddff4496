use crate::keys::preset::Action;
use crate::view::{Command, Context, Effect, Rejected};

use super::state::{AppState, Focus, Prompt, PromptKind};

/// Installs the effect's snapshot and hands back the calls it needs.
pub(super) fn adopt(state: &mut AppState, effect: Effect) -> Vec<Command> {
    state.replace_view(effect.view);
    effect.commands
}

/// Shows a local rejection in the status bar.
pub(super) fn refuse(state: &mut AppState, reason: Rejected) -> Vec<Command> {
    tracing::debug!(%reason, "intent rejected locally");
    state.status_message = Some(reason.to_string());
    Vec::new()
}

pub(super) fn settle_intent(
    state: &mut AppState,
    outcome: Result<Effect, Rejected>,
) -> Vec<Command> {
    match outcome {
        Ok(effect) => adopt(state, effect),
        Err(reason) => refuse(state, reason),
    }
}

pub fn handle_action(state: &mut AppState, action: Action) -> Vec<Command> {
    state.status_message = None;
    match action {
        Action::Quit => {
            state.should_quit = true;
            Vec::new()
        }
        Action::Help => {
            state.show_help = true;
            Vec::new()
        }
        Action::MoveUp => {
            match state.focus {
                Focus::Todos => state.cursor = state.cursor.saturating_sub(1),
                Focus::Tags => state.tag_cursor = state.tag_cursor.saturating_sub(1),
            }
            Vec::new()
        }
        Action::MoveDown => {
            match state.focus {
                Focus::Todos => {
                    let last = state.view.todos().len().saturating_sub(1);
                    state.cursor = (state.cursor + 1).min(last);
                }
                Focus::Tags => {
                    state.tag_cursor = (state.tag_cursor + 1).min(state.visible_tag_count());
                }
            }
            Vec::new()
        }
        Action::SwitchFocus => {
            state.focus = match state.focus {
                Focus::Todos => Focus::Tags,
                Focus::Tags => Focus::Todos,
            };
            Vec::new()
        }
        Action::Open => match state.focus {
            Focus::Todos => {
                let Some(id) = state.todo_at_cursor().map(|t| t.id) else {
                    return Vec::new();
                };
                match state.view.select_todo(id) {
                    Ok(view) => {
                        state.replace_view(view);
                        Vec::new()
                    }
                    Err(reason) => refuse(state, reason),
                }
            }
            Focus::Tags => {
                let target = match state.tag_at_cursor() {
                    Some(tag) => Context::Tag {
                        id: tag.id,
                        name: tag.name.clone(),
                    },
                    None => Context::All,
                };
                state.cursor = 0;
                state.focus = Focus::Todos;
                let effect = state.view.select_context(target);
                adopt(state, effect)
            }
        },
        Action::ShowAll => {
            state.cursor = 0;
            state.tag_cursor = 0;
            let effect = state.view.select_context(Context::All);
            adopt(state, effect)
        }
        Action::ToggleDone => {
            let Some((id, done)) = state.todo_at_cursor().map(|t| (t.id, t.done)) else {
                return Vec::new();
            };
            let outcome = state.view.toggle_done(id, !done);
            settle_intent(state, outcome)
        }
        Action::DeleteSelected => {
            let outcome = state.view.delete_selected();
            settle_intent(state, outcome)
        }
        Action::Refresh => {
            let effect = state.view.refresh();
            adopt(state, effect)
        }
        Action::NewTodo => {
            state.prompt = Some(Prompt::new(PromptKind::NewTodo, ""));
            Vec::new()
        }
        Action::Search => {
            let current = match state.view.context() {
                Context::Search { query } => query.clone(),
                _ => String::new(),
            };
            state.prompt = Some(Prompt::new(PromptKind::Search, &current));
            Vec::new()
        }
        Action::EditTitle | Action::EditTags | Action::EditDue => {
            let detail = state.view.detail();
            if detail.is_placeholder() {
                return refuse(state, Rejected::NothingOpen);
            }
            let id = detail.id;
            let (kind, initial) = match action {
                Action::EditTitle => (PromptKind::EditTitle { id }, detail.title.clone()),
                Action::EditTags => (PromptKind::EditTags { id }, detail.tag_list.join(", ")),
                _ => (
                    PromptKind::EditDue { id },
                    detail
                        .due_date
                        .map(|d| d.format("%Y-%m-%d").to_string())
                        .unwrap_or_default(),
                ),
            };
            state.prompt = Some(Prompt::new(kind, &initial));
            Vec::new()
        }
        Action::RenameTag => match state.view.context() {
            Context::Tag { name, .. } => {
                let name = name.clone();
                state.prompt = Some(Prompt::new(PromptKind::RenameTag, &name));
                Vec::new()
            }
            _ => refuse(state, Rejected::NoActiveTag),
        },
        Action::DeleteTag => {
            let target = match state.focus {
                Focus::Tags => state.tag_at_cursor().map(|t| t.id),
                Focus::Todos => None,
            }
            .or_else(|| state.view.context().tag_id());
            match target {
                Some(id) => {
                    state.tag_cursor = 0;
                    let effect = state.view.delete_tag(id);
                    adopt(state, effect)
                }
                None => refuse(state, Rejected::NoActiveTag),
            }
        }
    }
}
