use crate::config::hotkeys::{get_action_for_event, HotkeyAction, InputMode};
use crate::select_list::Column;
use crate::state::State;
use anyhow::Result;
use clipboard::{ClipboardContext, ClipboardProvider};
use crossterm::{
    event,
    event::{Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
};
use log::*;
use std::{sync::mpsc, thread, time::Duration};

/// Specify terminal event poll rate in milliseconds.
///
const TICK_RATE_IN_MS: u64 = 60;

/// Specify different terminal event types.
///
#[derive(Debug)]
pub enum Event<I> {
    Input(I),
    Tick,
}

/// Specify struct for managing terminal events channel.
///
pub struct Handler {
    rx: mpsc::Receiver<Event<KeyEvent>>,
    _tx: mpsc::Sender<Event<KeyEvent>>,
}

impl Handler {
    /// Return new instance after spawning new input polling thread.
    ///
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        let tx_clone = tx.clone();
        thread::spawn(move || {
            let tick_rate = Duration::from_millis(TICK_RATE_IN_MS);
            loop {
                match event::poll(tick_rate) {
                    Ok(true) => match event::read() {
                        Ok(CrosstermEvent::Key(key)) if key.kind == KeyEventKind::Press => {
                            if tx_clone.send(Event::Input(key)).is_err() {
                                break;
                            }
                        }
                        Ok(_) => (),
                        Err(e) => error!("Failed to read terminal event: {}", e),
                    },
                    Ok(false) => (),
                    Err(e) => error!("Failed to poll terminal events: {}", e),
                }
                if tx_clone.send(Event::Tick).is_err() {
                    break;
                }
            }
        });
        Handler { rx, _tx: tx }
    }

    /// Block until the next terminal event arrives.
    ///
    pub fn next(&self) -> Result<Event<KeyEvent>> {
        Ok(self.rx.recv()?)
    }

    /// Apply a terminal event to state. Returns true if should continue or
    /// false if exit was requested.
    ///
    pub fn handle(&self, event: Event<KeyEvent>, state: &mut State) -> bool {
        match event {
            Event::Input(key) => handle_key(key, state),
            Event::Tick => {
                state.advance_spinner_index();
                true
            }
        }
    }
}

/// Route a key press by the focused input mode.
///
fn handle_key(key: KeyEvent, state: &mut State) -> bool {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        debug!("Processing exit terminal event '{:?}'...", key);
        return false;
    }

    let mode = state.current_focus().input_mode();
    let action = get_action_for_event(&key, mode, state.get_hotkeys());
    match mode {
        InputMode::Search => match action {
            Some(HotkeyAction::SearchModeExit) => state.exit_search_mode(),
            _ if key.code == KeyCode::Enter => state.exit_search_mode(),
            _ => state.search_input(key),
        },
        InputMode::Log => match action {
            Some(HotkeyAction::LogNavigateNext) => state.next_debug_entry(),
            Some(HotkeyAction::LogNavigatePrev) => state.prev_debug_entry(),
            Some(HotkeyAction::LogCopyEntry) => copy_debug_entry(state),
            Some(HotkeyAction::LogExit) => state.exit_log(),
            _ => (),
        },
        InputMode::Pane => match action {
            Some(HotkeyAction::Quit) => {
                debug!("Processing exit terminal event '{:?}'...", key);
                return false;
            }
            Some(HotkeyAction::NavigateNext) => state.next_item(),
            Some(HotkeyAction::NavigatePrev) => state.prev_item(),
            Some(HotkeyAction::NavigateLeft) => state.focus_column(Column::Selected),
            Some(HotkeyAction::NavigateRight) => state.focus_column(Column::Available),
            Some(HotkeyAction::SwitchColumn) => state.switch_column(),
            Some(HotkeyAction::Toggle) => toggle_current(state),
            Some(HotkeyAction::EnterSearch) => state.enter_search_mode(),
            Some(HotkeyAction::CycleFilter) => state.cycle_filter(),
            Some(HotkeyAction::LoadMore) => state.load_more(),
            Some(HotkeyAction::DismissNotice) => state.dismiss_notice(),
            Some(HotkeyAction::ToggleReadOnly) => state.toggle_read_only(),
            Some(HotkeyAction::CycleTheme) => state.cycle_theme(),
            Some(HotkeyAction::FocusLog) => state.focus_log(),
            _ if key.code == KeyCode::Enter => toggle_current(state),
            _ => (),
        },
    }
    true
}

fn toggle_current(state: &mut State) {
    if let Err(e) = state.toggle_current() {
        debug!("Nothing to toggle: {}", e);
    }
}

fn copy_debug_entry(state: &State) {
    let entry = match state.current_debug_entry() {
        Some(entry) => entry.to_string(),
        None => return,
    };
    match ClipboardContext::new() {
        Ok(mut ctx) => match ctx.set_contents(entry) {
            Ok(_) => info!("Log entry copied to clipboard"),
            Err(e) => warn!("Failed to copy to clipboard: {}", e),
        },
        Err(e) => warn!("Failed to initialize clipboard: {}", e),
    }
}
