use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    MoveUp,
    MoveDown,
    ToggleDone,
    Open,
    NewTodo,
    EditTitle,
    EditTags,
    EditDue,
    DeleteSelected,
    Search,
    SwitchFocus,
    ShowAll,
    RenameTag,
    DeleteTag,
    Refresh,
    Help,
    Quit,
}

impl Action {
    pub const ALL: [Action; 17] = [
        Action::MoveUp,
        Action::MoveDown,
        Action::ToggleDone,
        Action::Open,
        Action::NewTodo,
        Action::EditTitle,
        Action::EditTags,
        Action::EditDue,
        Action::DeleteSelected,
        Action::Search,
        Action::SwitchFocus,
        Action::ShowAll,
        Action::RenameTag,
        Action::DeleteTag,
        Action::Refresh,
        Action::Help,
        Action::Quit,
    ];

    /// Name used in `[keybindings.bindings]`.
    pub fn name(&self) -> &'static str {
        match self {
            Self::MoveUp => "move_up",
            Self::MoveDown => "move_down",
            Self::ToggleDone => "toggle_done",
            Self::Open => "open",
            Self::NewTodo => "new_todo",
            Self::EditTitle => "edit_title",
            Self::EditTags => "edit_tags",
            Self::EditDue => "edit_due",
            Self::DeleteSelected => "delete_selected",
            Self::Search => "search",
            Self::SwitchFocus => "switch_focus",
            Self::ShowAll => "show_all",
            Self::RenameTag => "rename_tag",
            Self::DeleteTag => "delete_tag",
            Self::Refresh => "refresh",
            Self::Help => "help",
            Self::Quit => "quit",
        }
    }

    pub fn from_name(s: &str) -> Option<Self> {
        let wanted = s.trim().to_lowercase();
        Self::ALL.into_iter().find(|a| a.name() == wanted)
    }

    pub fn hint_text(&self) -> &'static str {
        match self {
            Self::MoveUp => "up",
            Self::MoveDown => "down",
            Self::ToggleDone => "done",
            Self::Open => "open",
            Self::NewTodo => "new",
            Self::EditTitle => "title",
            Self::EditTags => "tags",
            Self::EditDue => "due",
            Self::DeleteSelected => "delete done",
            Self::Search => "search",
            Self::SwitchFocus => "focus",
            Self::ShowAll => "all",
            Self::RenameTag => "rename tag",
            Self::DeleteTag => "delete tag",
            Self::Refresh => "refresh",
            Self::Help => "help",
            Self::Quit => "quit",
        }
    }
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn ctrl(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::CONTROL)
}

fn alt(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::ALT)
}

fn shift(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::SHIFT)
}

pub fn vim_preset() -> HashMap<KeyEvent, Action> {
    HashMap::from([
        (key(KeyCode::Char('k')), Action::MoveUp),
        (key(KeyCode::Up), Action::MoveUp),
        (key(KeyCode::Char('j')), Action::MoveDown),
        (key(KeyCode::Down), Action::MoveDown),
        (key(KeyCode::Char(' ')), Action::ToggleDone),
        (key(KeyCode::Enter), Action::Open),
        (key(KeyCode::Char('o')), Action::NewTodo),
        (key(KeyCode::Char('e')), Action::EditTitle),
        (key(KeyCode::Char('t')), Action::EditTags),
        (key(KeyCode::Char('d')), Action::EditDue),
        (key(KeyCode::Char('x')), Action::DeleteSelected),
        (key(KeyCode::Char('/')), Action::Search),
        (key(KeyCode::Tab), Action::SwitchFocus),
        (key(KeyCode::Char('a')), Action::ShowAll),
        (shift('R'), Action::RenameTag),
        (shift('X'), Action::DeleteTag),
        (key(KeyCode::Char('r')), Action::Refresh),
        (key(KeyCode::Char('?')), Action::Help),
        (key(KeyCode::Char('q')), Action::Quit),
    ])
}

pub fn emacs_preset() -> HashMap<KeyEvent, Action> {
    HashMap::from([
        (ctrl(KeyCode::Char('p')), Action::MoveUp),
        (key(KeyCode::Up), Action::MoveUp),
        (ctrl(KeyCode::Char('n')), Action::MoveDown),
        (key(KeyCode::Down), Action::MoveDown),
        (ctrl(KeyCode::Char('t')), Action::ToggleDone),
        (key(KeyCode::Enter), Action::Open),
        (ctrl(KeyCode::Char('o')), Action::NewTodo),
        (alt(KeyCode::Char('e')), Action::EditTitle),
        (alt(KeyCode::Char('t')), Action::EditTags),
        (alt(KeyCode::Char('d')), Action::EditDue),
        (ctrl(KeyCode::Char('k')), Action::DeleteSelected),
        (ctrl(KeyCode::Char('s')), Action::Search),
        (key(KeyCode::Tab), Action::SwitchFocus),
        (alt(KeyCode::Char('a')), Action::ShowAll),
        (alt(KeyCode::Char('r')), Action::RenameTag),
        (alt(KeyCode::Char('k')), Action::DeleteTag),
        (ctrl(KeyCode::Char('l')), Action::Refresh),
        (ctrl(KeyCode::Char('h')), Action::Help),
        (ctrl(KeyCode::Char('q')), Action::Quit),
    ])
}

pub fn get_preset(name: &str) -> Option<HashMap<KeyEvent, Action>> {
    match name.to_lowercase().as_str() {
        "vim" => Some(vim_preset()),
        "emacs" => Some(emacs_preset()),
        _ => None,
    }
}
