//! Hotkey configuration management.
//!
//! This module defines the hotkey system for the application, including action
//! types, hotkey bindings, and default configurations per input mode.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Represents all possible actions that can be bound to hotkeys.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HotkeyAction {
    // Pane actions
    NavigateNext,
    NavigatePrev,
    NavigateLeft,
    NavigateRight,
    SwitchColumn,
    Toggle,
    EnterSearch,
    CycleFilter,
    LoadMore,
    DismissNotice,
    ToggleReadOnly,
    CycleTheme,
    FocusLog,
    Quit,

    // Search mode actions
    SearchModeExit,

    // Log panel actions
    LogNavigateNext,
    LogNavigatePrev,
    LogCopyEntry,
    LogExit,
}

/// A key combination, written in the config file as e.g. `ctrl+c`.
///
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Hotkey {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl Hotkey {
    fn plain(code: KeyCode) -> Self {
        Hotkey {
            code,
            modifiers: KeyModifiers::empty(),
        }
    }

    fn char(c: char) -> Self {
        Hotkey::plain(KeyCode::Char(c))
    }
}

/// Parse a binding such as `j`, `space`, `ctrl+c` or `shift+tab`. Key names
/// and modifiers are case-insensitive, single characters are kept as typed.
///
impl FromStr for Hotkey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (prefix, key) = if s == "+" {
            ("", "+")
        } else if let Some(prefix) = s.strip_suffix("++") {
            (prefix, "+")
        } else {
            match s.rsplit_once('+') {
                Some((prefix, key)) => (prefix, key),
                None => ("", s),
            }
        };

        let mut modifiers = KeyModifiers::empty();
        for part in prefix.split('+').filter(|part| !part.is_empty()) {
            modifiers |= match part.to_ascii_lowercase().as_str() {
                "ctrl" | "control" => KeyModifiers::CONTROL,
                "shift" => KeyModifiers::SHIFT,
                "alt" => KeyModifiers::ALT,
                other => return Err(format!("unknown modifier '{}' in hotkey '{}'", other, s)),
            };
        }

        let mut chars = key.chars();
        let code = match (chars.next(), chars.next()) {
            (Some(c), None) => KeyCode::Char(c),
            (None, _) => return Err("empty hotkey".to_string()),
            _ => match key.to_ascii_lowercase().as_str() {
                "space" => KeyCode::Char(' '),
                "esc" | "escape" => KeyCode::Esc,
                "enter" | "return" => KeyCode::Enter,
                "tab" => KeyCode::Tab,
                "backspace" => KeyCode::Backspace,
                "up" => KeyCode::Up,
                "down" => KeyCode::Down,
                "left" => KeyCode::Left,
                "right" => KeyCode::Right,
                _ => return Err(format!("unknown key '{}' in hotkey '{}'", key, s)),
            },
        };
        Ok(Hotkey { code, modifiers })
    }
}

impl TryFrom<String> for Hotkey {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Hotkey> for String {
    fn from(hotkey: Hotkey) -> Self {
        hotkey.to_string()
    }
}

impl fmt::Display for Hotkey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (modifier, name) in [
            (KeyModifiers::CONTROL, "Ctrl"),
            (KeyModifiers::SHIFT, "Shift"),
            (KeyModifiers::ALT, "Alt"),
        ] {
            if self.modifiers.contains(modifier) {
                write!(f, "{}+", name)?;
            }
        }
        match self.code {
            KeyCode::Char(' ') => write!(f, "Space"),
            KeyCode::Char(c) => write!(f, "{}", c),
            KeyCode::Esc => write!(f, "Esc"),
            KeyCode::Enter => write!(f, "Enter"),
            KeyCode::Tab => write!(f, "Tab"),
            KeyCode::Backspace => write!(f, "Backspace"),
            KeyCode::Up => write!(f, "Up"),
            KeyCode::Down => write!(f, "Down"),
            KeyCode::Left => write!(f, "Left"),
            KeyCode::Right => write!(f, "Right"),
            other => write!(f, "{:?}", other),
        }
    }
}

/// Input modes, each with its own bindings.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Pane,
    Search,
    Log,
}

/// Maps hotkey actions to their key bindings for each input mode. Missing
/// modes in the config file fall back to the defaults.
///
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewHotkeys {
    pub pane: HashMap<HotkeyAction, Hotkey>,
    pub search_mode: HashMap<HotkeyAction, Hotkey>,
    pub log: HashMap<HotkeyAction, Hotkey>,
}

impl Default for ViewHotkeys {
    fn default() -> Self {
        default_hotkeys()
    }
}

/// Returns default hotkey mappings for all input modes.
///
pub fn default_hotkeys() -> ViewHotkeys {
    let pane = HashMap::from([
        (HotkeyAction::NavigateNext, Hotkey::char('j')),
        (HotkeyAction::NavigatePrev, Hotkey::char('k')),
        (HotkeyAction::NavigateLeft, Hotkey::char('h')),
        (HotkeyAction::NavigateRight, Hotkey::char('l')),
        (HotkeyAction::SwitchColumn, Hotkey::plain(KeyCode::Tab)),
        (HotkeyAction::Toggle, Hotkey::char(' ')),
        (HotkeyAction::EnterSearch, Hotkey::char('/')),
        (HotkeyAction::CycleFilter, Hotkey::char('f')),
        (HotkeyAction::LoadMore, Hotkey::char('m')),
        (HotkeyAction::DismissNotice, Hotkey::char('x')),
        (HotkeyAction::ToggleReadOnly, Hotkey::char('r')),
        (HotkeyAction::CycleTheme, Hotkey::char('t')),
        (HotkeyAction::FocusLog, Hotkey::char('d')),
        (HotkeyAction::Quit, Hotkey::char('q')),
    ]);

    let search_mode = HashMap::from([(HotkeyAction::SearchModeExit, Hotkey::plain(KeyCode::Esc))]);

    let log = HashMap::from([
        (HotkeyAction::LogNavigateNext, Hotkey::char('j')),
        (HotkeyAction::LogNavigatePrev, Hotkey::char('k')),
        (HotkeyAction::LogCopyEntry, Hotkey::char('y')),
        (HotkeyAction::LogExit, Hotkey::plain(KeyCode::Esc)),
    ]);

    ViewHotkeys {
        pane,
        search_mode,
        log,
    }
}

/// Checks if a KeyEvent matches a Hotkey.
///
pub fn matches_hotkey(event: &KeyEvent, hotkey: &Hotkey) -> bool {
    event.code == hotkey.code && event.modifiers == hotkey.modifiers
}

/// Gets the action for a KeyEvent in an input mode.
///
pub fn get_action_for_event(
    event: &KeyEvent,
    mode: InputMode,
    hotkeys: &ViewHotkeys,
) -> Option<HotkeyAction> {
    let mode_hotkeys = match mode {
        InputMode::Pane => &hotkeys.pane,
        InputMode::Search => &hotkeys.search_mode,
        InputMode::Log => &hotkeys.log,
    };

    mode_hotkeys
        .iter()
        .find(|(_, hotkey)| matches_hotkey(event, hotkey))
        .map(|(action, _)| *action)
}

/// Builds a footer text string from hotkey configurations.
/// Takes a list of tuples: (action, description, optional_second_action_for_paired_keys)
///
pub fn build_footer_text(
    hotkeys: &HashMap<HotkeyAction, Hotkey>,
    actions: &[(HotkeyAction, &str, Option<HotkeyAction>)],
) -> String {
    let parts: Vec<String> = actions
        .iter()
        .filter_map(|(action, description, paired_action)| {
            let hotkey = hotkeys.get(action)?;
            let paired = paired_action.and_then(|paired| hotkeys.get(&paired));
            Some(match paired {
                Some(paired_hotkey) => format!(
                    " {}/{}: {}",
                    format_hotkey_display(hotkey),
                    format_hotkey_display(paired_hotkey),
                    description
                ),
                None => format!(" {}: {}", format_hotkey_display(hotkey), description),
            })
        })
        .collect();
    parts.join(",")
}

/// Formats a hotkey for display in the footer.
///
pub fn format_hotkey_display(hotkey: &Hotkey) -> String {
    hotkey.to_string()
}
