use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::api::types::parse_due_date;
use crate::view::Command;

use super::actions::settle_intent;
use super::state::{AppState, Prompt, PromptKind};

pub fn handle_prompt_key(state: &mut AppState, key: &KeyEvent) -> Vec<Command> {
    let Some(prompt) = state.prompt.as_mut() else {
        return Vec::new();
    };
    let buffer = &mut prompt.buffer;

    match (key.modifiers, key.code) {
        (KeyModifiers::NONE, KeyCode::Esc) => {
            state.prompt = None;
            return Vec::new();
        }
        (KeyModifiers::NONE, KeyCode::Enter) => {
            if let Some(prompt) = state.prompt.take() {
                return submit(state, prompt);
            }
            return Vec::new();
        }
        (KeyModifiers::NONE, KeyCode::Backspace) => buffer.delete_back(),
        (KeyModifiers::NONE, KeyCode::Delete) => buffer.delete_forward(),
        (KeyModifiers::NONE, KeyCode::Left) => buffer.move_left(),
        (KeyModifiers::NONE, KeyCode::Right) => buffer.move_right(),
        (KeyModifiers::NONE, KeyCode::Home) | (KeyModifiers::CONTROL, KeyCode::Char('a')) => {
            buffer.move_home()
        }
        (KeyModifiers::NONE, KeyCode::End) | (KeyModifiers::CONTROL, KeyCode::Char('e')) => {
            buffer.move_end()
        }
        (KeyModifiers::ALT, KeyCode::Left) => buffer.move_word_left(),
        (KeyModifiers::ALT, KeyCode::Right) => buffer.move_word_right(),
        (KeyModifiers::CONTROL, KeyCode::Char('w')) => buffer.delete_word_back(),
        (KeyModifiers::CONTROL, KeyCode::Char('u')) => buffer.clear(),
        (KeyModifiers::NONE, KeyCode::Char(c)) | (KeyModifiers::SHIFT, KeyCode::Char(c)) => {
            if !buffer.insert_char(c) {
                state.status_message = Some(format!("At most {} characters", buffer.limit()));
            }
        }
        _ => {}
    }
    Vec::new()
}

fn submit(state: &mut AppState, prompt: Prompt) -> Vec<Command> {
    let text = prompt.buffer.text();
    let kind = prompt.kind.clone();
    let view = &state.view;
    let outcome = match kind {
        PromptKind::NewTodo => view.create(&text),
        PromptKind::Search => {
            state.cursor = 0;
            Ok(view.search(text.trim()))
        }
        PromptKind::RenameTag => view.rename_tag(&text),
        PromptKind::EditTitle { id } => {
            let mut edit = view.detail().to_edit();
            edit.title = text;
            view.edit(id, edit)
        }
        PromptKind::EditTags { id } => {
            let mut edit = view.detail().to_edit();
            edit.tag_list = text.split(',').map(str::to_string).collect();
            view.edit(id, edit)
        }
        PromptKind::EditDue { id } => {
            let trimmed = text.trim();
            let due_date = if trimmed.is_empty() {
                None
            } else {
                match parse_due_date(trimmed) {
                    Some(date) => Some(date),
                    None => {
                        // keep the prompt open so the typo can be fixed
                        state.status_message = Some(format!("\"{}\" is not YYYY-MM-DD", trimmed));
                        state.prompt = Some(prompt);
                        return Vec::new();
                    }
                }
            };
            let mut edit = view.detail().to_edit();
            edit.due_date = due_date;
            view.edit(id, edit)
        }
    };
    settle_intent(state, outcome)
}

#[cfg(test)]
mod tests {
    use super::super::actions::handle_action;
    use super::super::test_helpers::*;
    use super::*;
    use crate::api::types::{TodoPatch, MAX_NAME_LEN};
    use crate::keys::preset::Action;
    use crate::view::{Call, Context, Reply};
    use chrono::NaiveDate;

    fn enter(state: &mut AppState) -> Vec<Command> {
        handle_prompt_key(state, &key_event(KeyCode::Enter))
    }

    #[test]
    fn typing_and_submitting_new_todo() {
        let mut state = test_state();
        handle_action(&mut state, Action::NewTodo);
        type_text(&mut state, "Call mom");
        let cmds = enter(&mut state);
        assert!(state.prompt.is_none());
        match &cmds[0].call {
            Call::CreateTodo(new) => assert_eq!(new.title, "Call mom"),
            other => panic!("expected create, got {:?}", other),
        }
    }

    #[test]
    fn blank_new_todo_is_refused_with_message() {
        let mut state = test_state();
        handle_action(&mut state, Action::NewTodo);
        type_text(&mut state, "   ");
        let cmds = enter(&mut state);
        assert!(cmds.is_empty());
        assert_eq!(state.status_message.as_deref(), Some("title cannot be empty"));
    }

    #[test]
    fn escape_cancels_prompt() {
        let mut state = test_state();
        handle_action(&mut state, Action::NewTodo);
        type_text(&mut state, "abc");
        let cmds = handle_prompt_key(&mut state, &key_event(KeyCode::Esc));
        assert!(cmds.is_empty());
        assert!(state.prompt.is_none());
    }

    #[test]
    fn typing_past_limit_warns() {
        let mut state = test_state();
        handle_action(&mut state, Action::NewTodo);
        type_text(&mut state, &"a".repeat(MAX_NAME_LEN + 1));
        assert_eq!(state.prompt.as_ref().unwrap().buffer.len(), MAX_NAME_LEN);
        assert!(state.status_message.is_some());
    }

    #[test]
    fn ctrl_w_deletes_word() {
        let mut state = test_state();
        handle_action(&mut state, Action::NewTodo);
        type_text(&mut state, "buy oat milk");
        handle_prompt_key(&mut state, &ctrl_key(KeyCode::Char('w')));
        assert_eq!(state.prompt.as_ref().unwrap().buffer.text(), "buy oat ");
    }

    #[test]
    fn search_submission_enters_search_context() {
        let mut state = test_state();
        handle_action(&mut state, Action::Search);
        type_text(&mut state, "milk");
        let cmds = enter(&mut state);
        assert_eq!(
            cmds[0].call,
            Call::SearchTodos {
                query: "milk".into()
            }
        );
        assert_eq!(
            state.view.context(),
            &Context::Search {
                query: "milk".into()
            }
        );
    }

    #[test]
    fn edit_tags_splits_on_commas() {
        let mut state = test_state();
        handle_action(&mut state, Action::Open);
        handle_action(&mut state, Action::EditTags);
        type_text(&mut state, ", errands , home");
        let cmds = enter(&mut state);
        match &cmds[0].call {
            Call::EditTodo { id, patch } => {
                assert_eq!(*id, 1);
                assert_eq!(patch.tag_list.as_deref(), Some("home,errands"));
                assert_eq!(patch.title.as_deref(), Some("Buy milk"));
            }
            other => panic!("expected edit, got {:?}", other),
        }
    }

    #[test]
    fn edit_due_accepts_dates_and_clears_on_empty() {
        let mut state = test_state();
        handle_action(&mut state, Action::Open);
        handle_action(&mut state, Action::EditDue);
        type_text(&mut state, "2021-01-05");
        let cmds = enter(&mut state);
        match &cmds[0].call {
            Call::EditTodo { patch, .. } => {
                assert_eq!(patch.due_date, Some(NaiveDate::from_ymd_opt(2021, 1, 5)))
            }
            other => panic!("expected edit, got {:?}", other),
        }

        handle_action(&mut state, Action::EditDue);
        let cmds = enter(&mut state);
        match &cmds[0].call {
            Call::EditTodo { patch, .. } => assert_eq!(patch.due_date, Some(None)),
            other => panic!("expected edit, got {:?}", other),
        }
    }

    #[test]
    fn edit_prompts_submitted_unchanged_send_current_fields() {
        let tags = ["groceries-weekly", "household-errands", "weekend-planning"];
        let mut state = test_state();
        state.replace_view(loaded_view(vec![due(
            todo(7, "Plan the week", false, &tags),
            2021,
            1,
            5,
        )]));
        handle_action(&mut state, Action::Open);
        let detail = state.view.detail().clone();
        assert!(detail.tag_list.join(", ").chars().count() > MAX_NAME_LEN);

        let expected = TodoPatch {
            title: Some(detail.title.clone()),
            done: None,
            tag_list: Some(detail.tag_list.join(",")),
            due_date: Some(detail.due_date),
        };
        for action in [Action::EditTitle, Action::EditTags, Action::EditDue] {
            handle_action(&mut state, action);
            let cmds = enter(&mut state);
            assert_eq!(
                cmds[0].call,
                Call::EditTodo {
                    id: 7,
                    patch: expected.clone()
                },
                "{:?} changed the todo",
                action
            );
        }
    }

    #[test]
    fn bad_due_date_keeps_prompt_open() {
        let mut state = test_state();
        handle_action(&mut state, Action::Open);
        handle_action(&mut state, Action::EditDue);
        type_text(&mut state, "tomorrow");
        let cmds = enter(&mut state);
        assert!(cmds.is_empty());
        assert!(state.prompt.is_some());
        assert!(state.status_message.unwrap().contains("YYYY-MM-DD"));
    }

    #[test]
    fn rename_tag_prompt_round_trip() {
        let mut state = test_state();
        let effect = state.view.select_context(Context::Tag {
            id: 1,
            name: "home".into(),
        });
        let cmds = super::super::actions::adopt(&mut state, effect);
        settle(&mut state, cmds, |_| Reply::Todos(vec![]));

        handle_action(&mut state, Action::RenameTag);
        handle_prompt_key(&mut state, &ctrl_key(KeyCode::Char('u')));
        type_text(&mut state, "house");
        let cmds = enter(&mut state);
        assert_eq!(
            cmds[0].call,
            Call::RenameTag {
                id: 1,
                name: "house".into()
            }
        );
    }
}
