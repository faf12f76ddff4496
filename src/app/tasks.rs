use tokio::sync::mpsc;

use crate::api::client::TodoClient;
use crate::api::types::TodoPatch;
use crate::error::{ErrorInfo, Result, TodoError};
use crate::view::{Call, Command, Reply};

use super::state::AppMessage;

/// Runs one call against the server and wraps its outcome as a reply.
pub(super) async fn perform(client: &TodoClient, call: &Call) -> Result<Reply> {
    let reply = match call {
        Call::ListTodos => Reply::Todos(client.list_todos().await?),
        Call::ListTodosForTag(id) => Reply::Todos(client.list_todos_for_tag(*id).await?),
        Call::SearchTodos { .. } => Reply::SearchResults(client.search_todos().await?),
        Call::CreateTodo(new) => Reply::Created(client.create_todo(new).await?),
        Call::ToggleDone { id, done } => {
            let patch = TodoPatch {
                done: Some(*done),
                ..Default::default()
            };
            Reply::Toggled(client.update_todo(*id, &patch).await?)
        }
        Call::EditTodo { id, patch } => Reply::Edited(client.update_todo(*id, patch).await?),
        Call::DeleteTodo(id) => {
            client.delete_todo(*id).await?;
            Reply::Deleted(*id)
        }
        Call::ListTags => Reply::Tags(client.list_tags().await?),
        Call::RenameTag { id, name } => Reply::TagRenamed(client.update_tag(*id, name).await?),
        Call::DeleteTag(id) => {
            client.delete_tag(*id).await?;
            Reply::TagDeleted(*id)
        }
    };
    Ok(reply)
}

fn failure_info(call: &Call, error: &TodoError) -> ErrorInfo {
    match call {
        Call::DeleteTodo(id) => ErrorInfo::Delete {
            id: *id,
            reason: error.to_string(),
        },
        _ => ErrorInfo::from_todo_error(error),
    }
}

pub(super) fn spawn_command(
    client: &TodoClient,
    command: Command,
    tx: &mpsc::UnboundedSender<AppMessage>,
) {
    let client = client.clone();
    let tx = tx.clone();
    tokio::spawn(async move {
        let Command { ticket, call } = command;
        let message = match perform(&client, &call).await {
            Ok(reply) => AppMessage::Replied(ticket, reply),
            Err(e) => {
                tracing::warn!(call = %call.describe(), error = %e, "call failed");
                let info = failure_info(&call, &e);
                AppMessage::Failed(call, info)
            }
        };
        let _ = tx.send(message);
    });
}
