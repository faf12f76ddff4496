use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::error::{Result, TodoError};

/// Parses bindings such as `q`, `Ctrl+d` or `Alt+Shift+Enter`.
pub fn parse_key(input: &str) -> Result<KeyEvent> {
    let (prefix, last) = match input.rsplit_once('+') {
        // a bare "+" or a trailing "Ctrl++" binds the plus key itself
        Some((head, "")) => (head.strip_suffix('+').unwrap_or(head), "+"),
        Some((head, tail)) => (head, tail),
        None => ("", input),
    };

    let mut modifiers = KeyModifiers::NONE;
    for part in prefix.split('+').map(str::trim).filter(|p| !p.is_empty()) {
        modifiers |= match part.to_lowercase().as_str() {
            "ctrl" | "control" => KeyModifiers::CONTROL,
            "shift" => KeyModifiers::SHIFT,
            "alt" | "meta" => KeyModifiers::ALT,
            _ => {
                return Err(TodoError::Config(format!(
                    "Unknown modifier '{}' in key '{}'",
                    part, input
                )))
            }
        };
    }

    let code = parse_key_code(last.trim(), input)?;
    Ok(KeyEvent::new(code, modifiers))
}

fn parse_key_code(s: &str, input: &str) -> Result<KeyCode> {
    let mut chars = s.chars();
    if let (Some(ch), None) = (chars.next(), chars.next()) {
        return Ok(KeyCode::Char(ch));
    }

    let lower = s.to_lowercase();
    let code = match lower.as_str() {
        "" => return Err(TodoError::Config(format!("No key code found in '{}'", input))),
        "enter" | "return" => KeyCode::Enter,
        "esc" | "escape" => KeyCode::Esc,
        "tab" => KeyCode::Tab,
        "backtab" => KeyCode::BackTab,
        "backspace" | "bs" => KeyCode::Backspace,
        "delete" | "del" => KeyCode::Delete,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "pageup" | "pgup" => KeyCode::PageUp,
        "pagedown" | "pgdn" => KeyCode::PageDown,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "space" => KeyCode::Char(' '),
        f if f.starts_with('f') => {
            let num: u8 = f[1..]
                .parse()
                .map_err(|_| TodoError::Config(format!("Unknown key: {}", s)))?;
            if !(1..=12).contains(&num) {
                return Err(TodoError::Config(format!(
                    "Function key out of range: F{}",
                    num
                )));
            }
            KeyCode::F(num)
        }
        _ => return Err(TodoError::Config(format!("Unknown key: {}", s))),
    };
    Ok(code)
}
