mod actions;
mod input;
mod state;
mod tasks;
pub use state::*;

pub use actions::handle_action;
use actions::adopt;
use input::handle_prompt_key;
use tasks::spawn_command;

#[cfg(test)]
pub(crate) mod test_helpers;

use crossterm::event::{Event, EventStream, KeyEvent, KeyEventKind};
use futures::StreamExt;
use ratatui::DefaultTerminal;
use tokio::sync::mpsc;

use crate::api::client::TodoClient;
use crate::api::types;
use crate::config::AppConfig;
use crate::error::{ErrorInfo, ErrorPopup, Result};
use crate::keys::KeybindingMap;
use crate::view::{Call, Command, Reply, Ticket};

const LOADING_MESSAGE: &str = "Loading todos...";

/// Routes a key to whichever layer currently owns the keyboard.
pub fn handle_key(
    state: &mut AppState,
    key: &KeyEvent,
    keybindings: &KeybindingMap,
) -> Vec<Command> {
    if state.error_popup.is_some() {
        state.error_popup = None;
        return Vec::new();
    }
    if state.show_help {
        // any key closes help
        state.show_help = false;
        return Vec::new();
    }
    if state.prompt.is_some() {
        return handle_prompt_key(state, key);
    }
    match keybindings.resolve(key) {
        Some(action) => handle_action(state, action),
        None => Vec::new(),
    }
}

pub fn handle_reply(state: &mut AppState, ticket: &Ticket, reply: Reply) -> Vec<Command> {
    state.in_flight = state.in_flight.saturating_sub(1);
    if let Reply::Created(types::Reply::Rejected(rejection)) = &reply {
        state.status_message = Some(
            rejection
                .message
                .clone()
                .unwrap_or_else(|| "The server refused the new todo".into()),
        );
    }
    if !state.loading() && state.status_message.as_deref() == Some(LOADING_MESSAGE) {
        state.status_message = None;
    }
    let effect = state.view.apply(ticket, reply);
    adopt(state, effect)
}

pub fn handle_failure(state: &mut AppState, call: &Call, error: ErrorInfo) {
    state.in_flight = state.in_flight.saturating_sub(1);
    if state.status_message.as_deref() == Some(LOADING_MESSAGE) {
        state.status_message = None;
    }
    tracing::debug!(call = %call.describe(), "showing failure");
    state.error_popup = Some(ErrorPopup::from_error_info(&error));
}

fn dispatch(
    state: &mut AppState,
    client: &TodoClient,
    commands: Vec<Command>,
    tx: &mpsc::UnboundedSender<AppMessage>,
) {
    for command in commands {
        tracing::debug!(
            call = %command.call.describe(),
            generation = command.ticket.generation,
            "dispatching"
        );
        state.in_flight += 1;
        spawn_command(client, command, tx);
    }
}

pub async fn run(config: &AppConfig, terminal: &mut DefaultTerminal) -> Result<()> {
    let keybindings =
        KeybindingMap::from_preset(&config.keybindings.preset, &config.keybindings.bindings)?;

    let mut state = AppState::new(config.ui.policy(), keybindings.hints());
    state.help_lines = keybindings.help_lines();
    state.tag_panel_width_percent = u16::from(config.ui.tag_panel_width_percent);

    let (tx, mut rx) = mpsc::unbounded_channel::<AppMessage>();

    let client = TodoClient::new(&config.server.base_url);
    tracing::info!(base_url = client.base_url(), "starting");

    let start = state.view.start();
    let commands = adopt(&mut state, start);
    dispatch(&mut state, &client, commands, &tx);

    // Spawn event reader task
    let event_tx = tx.clone();
    tokio::spawn(async move {
        let mut reader = EventStream::new();
        while let Some(event) = reader.next().await {
            match event {
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                    if event_tx.send(AppMessage::Key(key)).is_err() {
                        break;
                    }
                }
                Ok(_) => {}
                Err(e) => {
                    tracing::warn!(error = %e, "terminal event stream failed");
                    break;
                }
            }
        }
    });

    // Main loop
    loop {
        terminal.draw(|frame| crate::ui::render(frame, &state))?;

        let Some(msg) = rx.recv().await else {
            break;
        };
        let commands = match msg {
            AppMessage::Key(key) => handle_key(&mut state, &key, &keybindings),
            AppMessage::Replied(ticket, reply) => handle_reply(&mut state, &ticket, reply),
            AppMessage::Failed(call, error) => {
                handle_failure(&mut state, &call, error);
                Vec::new()
            }
        };
        dispatch(&mut state, &client, commands, &tx);

        if state.should_quit {
            break;
        }
    }

    Ok(())
}
