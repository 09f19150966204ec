use crate::app::{ConfigSaveSender, NetworkEventSender};
use crate::config::ViewHotkeys;
use crate::events::network::Event as NetworkEvent;
use crate::select_list::{
    Column, SearchRequest, SelectList, SelectListError, ToggleRequest,
};
use crate::sonar::{Item, QualityGate, SearchPage};
use crate::ui::{PaneContext, Theme, SPINNER_FRAME_COUNT};
use crossterm::event::KeyEvent;
use log::*;
use ratatui::layout::Rect;
use ratatui::widgets::ListState;
use tui_textarea::TextArea;

use super::error::StateError;
use super::gate::{GateProjects, PaneSettings};
use super::navigation::Focus;

const MAX_DEBUG_ENTRIES: usize = 500;

/// Houses data representative of application state.
///
pub struct State {
    net_sender: Option<NetworkEventSender>,
    config_save_sender: Option<ConfigSaveSender>,
    settings: Option<PaneSettings>,
    terminal_size: Rect,
    spinner_index: usize,
    focus: Focus,
    last_column: Column,
    pane: Option<GateProjects>,
    pane_error: Option<String>,
    selected_list_state: ListState,
    available_list_state: ListState,
    search_input: TextArea<'static>,
    debug_index: usize,
    debug_entries: Vec<String>,
    theme: Theme,
    hotkeys: ViewHotkeys,
}

/// Defines default application state.
///
impl Default for State {
    fn default() -> State {
        State {
            net_sender: None,
            config_save_sender: None,
            settings: None,
            terminal_size: Rect::default(),
            spinner_index: 0,
            focus: Focus::default(),
            last_column: Column::Available,
            pane: None,
            pane_error: None,
            selected_list_state: ListState::default(),
            available_list_state: ListState::default(),
            search_input: TextArea::default(),
            debug_index: 0,
            debug_entries: vec![],
            theme: Theme::default(),
            hotkeys: ViewHotkeys::default(),
        }
    }
}

impl State {
    pub fn new(
        net_sender: NetworkEventSender,
        config_save_sender: ConfigSaveSender,
        settings: PaneSettings,
        theme: Theme,
        hotkeys: ViewHotkeys,
    ) -> Self {
        State {
            net_sender: Some(net_sender),
            config_save_sender: Some(config_save_sender),
            settings: Some(settings),
            theme,
            hotkeys,
            ..State::default()
        }
    }

    /// Get the current theme.
    ///
    pub fn get_theme(&self) -> &Theme {
        &self.theme
    }

    /// Switch to the next theme and request the configuration be saved.
    ///
    pub fn cycle_theme(&mut self) {
        let themes = Theme::available_themes();
        let next = themes
            .iter()
            .position(|name| *name == self.theme.name)
            .map(|index| (index + 1) % themes.len())
            .unwrap_or(0);
        if let Some(theme) = themes.get(next).and_then(|name| Theme::from_name(name)) {
            info!("Switched to theme '{}'", theme.name);
            self.theme = theme;
            if let Some(sender) = &self.config_save_sender {
                if let Err(err) = sender.send(()) {
                    error!("Failed to request config save: {}", err);
                }
            }
        }
    }

    pub fn get_hotkeys(&self) -> &ViewHotkeys {
        &self.hotkeys
    }

    /// Sets the terminal size.
    ///
    pub fn set_terminal_size(&mut self, size: Rect) -> &mut Self {
        self.terminal_size = size;
        self
    }

    /// Advance the spinner index.
    ///
    pub fn advance_spinner_index(&mut self) -> &mut Self {
        self.spinner_index += 1;
        if self.spinner_index >= SPINNER_FRAME_COUNT {
            self.spinner_index = 0;
        }
        self
    }

    /// Returns the current spinner index.
    ///
    pub fn get_spinner_index(&self) -> &usize {
        &self.spinner_index
    }

    pub fn current_focus(&self) -> Focus {
        self.focus
    }

    /// Column the cursor is in, or was last in while searching or reading
    /// the log.
    ///
    pub fn current_column(&self) -> Column {
        self.last_column
    }

    /// Mount the projects pane for a loaded gate. Returns the initial search
    /// to run, if the gate has a project list.
    ///
    pub fn mount_gate(&mut self, gate: QualityGate, can_edit: bool) -> Option<SearchRequest> {
        let settings = match &self.settings {
            Some(settings) => settings,
            None => {
                error!("Cannot mount quality gate pane without settings");
                return None;
            }
        };
        match GateProjects::mount(gate, can_edit, settings) {
            Ok((pane, request)) => {
                self.pane = Some(pane);
                self.pane_error = None;
                self.selected_list_state = ListState::default();
                self.available_list_state = ListState::default();
                request
            }
            Err(e) => {
                error!("Failed to mount quality gate pane: {}", e);
                self.pane_error = Some(e.to_string());
                None
            }
        }
    }

    /// Record that the gate could not be loaded.
    ///
    pub fn set_pane_error(&mut self, message: String) -> &mut Self {
        self.pane_error = Some(message);
        self
    }

    pub fn get_pane_error(&self) -> Option<&str> {
        self.pane_error.as_deref()
    }

    pub fn get_pane(&self) -> Option<&GateProjects> {
        self.pane.as_ref()
    }

    pub fn get_select_list(&self) -> Option<&SelectList> {
        self.pane.as_ref().and_then(|pane| pane.list())
    }

    fn select_list_mut(&mut self) -> Result<&mut SelectList, StateError> {
        self.pane
            .as_mut()
            .ok_or(StateError::PaneNotMounted)?
            .list_mut()
            .ok_or(StateError::NoSelectList)
    }

    /// Split the state into the mounted pane and the context it renders
    /// with.
    ///
    pub fn pane_context(&mut self) -> (Option<&GateProjects>, PaneContext<'_>) {
        (
            self.pane.as_ref(),
            PaneContext {
                theme: &self.theme,
                focus: self.focus,
                spinner_index: self.spinner_index,
                search_input: &mut self.search_input,
                selected_list_state: &mut self.selected_list_state,
                available_list_state: &mut self.available_list_state,
            },
        )
    }

    /// Returns the list state of a column for rendering.
    ///
    pub fn column_list_state(&mut self, column: Column) -> &mut ListState {
        match column {
            Column::Selected => &mut self.selected_list_state,
            Column::Available => &mut self.available_list_state,
        }
    }

    /// Returns the item under the cursor of a column.
    ///
    pub fn current_item(&self, column: Column) -> Option<&Item> {
        let index = match column {
            Column::Selected => self.selected_list_state.selected(),
            Column::Available => self.available_list_state.selected(),
        }?;
        self.get_select_list()?.view().column(column).get(index)
    }

    /// Move the cursor to a column, if the column is shown.
    ///
    pub fn focus_column(&mut self, column: Column) {
        let visible = self
            .get_select_list()
            .map(|list| list.visible_columns().contains(&column))
            .unwrap_or(true);
        if visible {
            self.focus = Focus::Column(column);
            self.last_column = column;
            self.clamp_cursors();
        }
    }

    /// Move the cursor to the other column.
    ///
    pub fn switch_column(&mut self) {
        self.focus_column(self.last_column.other());
    }

    pub fn next_item(&mut self) {
        self.move_cursor(1);
    }

    pub fn prev_item(&mut self) {
        self.move_cursor(-1);
    }

    fn move_cursor(&mut self, delta: isize) {
        let column = self.last_column;
        let len = self
            .get_select_list()
            .map(|list| list.view().column(column).len())
            .unwrap_or(0);
        if len == 0 {
            return;
        }
        let list_state = self.column_list_state(column);
        let current = list_state.selected().unwrap_or(0) as isize;
        let next = (current + delta).rem_euclid(len as isize) as usize;
        list_state.select(Some(next));
    }

    /// Keep both cursors on an existing item after the columns changed.
    ///
    fn clamp_cursors(&mut self) {
        let (selected_len, available_len) = match self.get_select_list() {
            Some(list) => (list.view().selected.len(), list.view().available.len()),
            None => (0, 0),
        };
        for (list_state, len) in [
            (&mut self.selected_list_state, selected_len),
            (&mut self.available_list_state, available_len),
        ] {
            let clamped = match (list_state.selected(), len) {
                (_, 0) => None,
                (Some(index), len) => Some(index.min(len - 1)),
                (None, _) => Some(0),
            };
            list_state.select(clamped);
        }
    }

    /// Select the focused item if it is available, deselect it if it is
    /// selected. Rejected actions are logged and leave the lists unchanged.
    ///
    pub fn toggle_current(&mut self) -> Result<(), StateError> {
        let column = self.last_column;
        let id = self
            .current_item(column)
            .map(|item| item.id.clone())
            .ok_or(StateError::NoItemSelected)?;
        let list = self.select_list_mut()?;
        let result = match column {
            Column::Available => list.select(&id),
            Column::Selected => list.deselect(&id),
        };
        match result {
            Ok(request) => {
                self.clamp_cursors();
                self.dispatch(NetworkEvent::Toggle(request));
            }
            Err(e) => warn!("Ignoring action on item {}: {}", id, e),
        }
        Ok(())
    }

    /// Apply a finished select/deselect.
    ///
    pub fn complete_toggle(&mut self, request: &ToggleRequest, result: Result<(), SelectListError>) {
        match self.select_list_mut() {
            Ok(list) => list.complete_toggle(request, result),
            Err(e) => warn!("Dropping completion for item {}: {}", request.id, e),
        }
        self.clamp_cursors();
    }

    /// Apply a finished search.
    ///
    pub fn complete_search(
        &mut self,
        request: &SearchRequest,
        result: Result<SearchPage, SelectListError>,
    ) {
        match self.select_list_mut() {
            Ok(list) => {
                list.complete_search(request, result);
            }
            Err(e) => warn!("Dropping search results: {}", e),
        }
        self.clamp_cursors();
    }

    pub fn is_search_mode(&self) -> bool {
        self.focus == Focus::Search
    }

    /// Focus the search box.
    ///
    pub fn enter_search_mode(&mut self) {
        if self.get_select_list().is_some() {
            self.focus = Focus::Search;
        }
    }

    /// Return focus from the search box to the last column.
    ///
    pub fn exit_search_mode(&mut self) {
        self.focus = Focus::Column(self.last_column);
    }

    pub fn get_search_input(&self) -> &TextArea<'static> {
        &self.search_input
    }

    /// Feed a key to the search box and search again if the text changed.
    ///
    pub fn search_input(&mut self, key: KeyEvent) {
        if self.search_input.input(key) {
            let query = self.search_input.lines().concat();
            self.search(&query);
        }
    }

    /// Search for the query from the first page.
    ///
    pub fn search(&mut self, query: &str) {
        match self.select_list_mut() {
            Ok(list) => {
                let request = list.search(query);
                self.dispatch(NetworkEvent::Search(request));
            }
            Err(e) => warn!("Cannot search: {}", e),
        }
    }

    /// Switch to the next filter tab and search again.
    ///
    pub fn cycle_filter(&mut self) {
        let request = match self.select_list_mut() {
            Ok(list) => list.cycle_filter(),
            Err(e) => {
                warn!("Cannot change filter: {}", e);
                return;
            }
        };
        self.dispatch(NetworkEvent::Search(request));
        let visible = self
            .get_select_list()
            .map(|list| list.visible_columns())
            .unwrap_or_default();
        if !visible.contains(&self.last_column) {
            if let Some(column) = visible.first() {
                self.focus_column(*column);
            }
        }
    }

    /// Request the next page of results, if there is one.
    ///
    pub fn load_more(&mut self) {
        let request = match self.select_list_mut() {
            Ok(list) => list.load_more(),
            Err(e) => {
                warn!("Cannot load more: {}", e);
                return;
            }
        };
        match request {
            Some(request) => self.dispatch(NetworkEvent::Search(request)),
            None => debug!("No further results to load"),
        }
    }

    pub fn dismiss_notice(&mut self) {
        if let Ok(list) = self.select_list_mut() {
            list.dismiss_notice();
        }
    }

    /// Lock or unlock select/deselect. Unlocking needs edit permission on
    /// the server.
    ///
    pub fn toggle_read_only(&mut self) {
        let can_edit = self.pane.as_ref().map(|pane| pane.can_edit()).unwrap_or(false);
        let list = match self.select_list_mut() {
            Ok(list) => list,
            Err(e) => {
                warn!("Cannot change read-only mode: {}", e);
                return;
            }
        };
        let read_only = list.mode() == crate::select_list::Mode::Editable;
        if !read_only && !can_edit {
            warn!("Editing quality gates is not permitted for this user");
            return;
        }
        list.set_read_only(read_only);
        info!(
            "Project selection is now {}",
            if read_only { "read-only" } else { "editable" }
        );
    }

    pub fn is_log_focused(&self) -> bool {
        self.focus == Focus::Log
    }

    pub fn focus_log(&mut self) {
        self.focus = Focus::Log;
        if !self.debug_entries.is_empty() {
            self.debug_index = self.debug_entries.len() - 1;
        }
    }

    pub fn exit_log(&mut self) {
        self.focus = Focus::Column(self.last_column);
    }

    /// Append a formatted log entry, dropping the oldest past the limit.
    ///
    pub fn add_debug_entry(&mut self, entry: String) {
        self.debug_entries.push(entry);
        if self.debug_entries.len() > MAX_DEBUG_ENTRIES {
            self.debug_entries.remove(0);
            self.debug_index = self.debug_index.saturating_sub(1);
        }
    }

    pub fn get_debug_entries(&self) -> &[String] {
        &self.debug_entries
    }

    pub fn get_debug_index(&self) -> usize {
        self.debug_index
    }

    pub fn next_debug_entry(&mut self) {
        if self.debug_index + 1 < self.debug_entries.len() {
            self.debug_index += 1;
        }
    }

    pub fn prev_debug_entry(&mut self) {
        self.debug_index = self.debug_index.saturating_sub(1);
    }

    pub fn current_debug_entry(&self) -> Option<&String> {
        self.debug_entries.get(self.debug_index)
    }

    /// Dispatches an asynchronous network event.
    ///
    pub fn dispatch(&self, event: NetworkEvent) {
        if let Some(net_sender) = &self.net_sender {
            if let Err(err) = net_sender.send(event) {
                error!("Received error from network dispatch: {}", err);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::select_list::{Filter, Mode};
    use crate::sonar::ItemId;
    use crate::state::gate::test_settings;
    use fake::{Fake, Faker};
    use std::sync::mpsc;

    fn item(id: u64, name: &str) -> Item {
        Item {
            id: ItemId::from(id),
            name: name.to_string(),
        }
    }

    fn gate(default: bool) -> QualityGate {
        QualityGate {
            id: ItemId::from(42u64),
            name: Faker.fake(),
            default,
        }
    }

    /// State with a mounted, loaded pane and the receiving end of its
    /// network channel.
    fn loaded_state(can_edit: bool) -> (State, mpsc::Receiver<NetworkEvent>) {
        let (tx, rx) = mpsc::channel();
        let (config_tx, _config_rx) = mpsc::channel();
        let mut state = State::new(
            tx,
            config_tx,
            test_settings(),
            Theme::default(),
            ViewHotkeys::default(),
        );
        let request = state.mount_gate(gate(false), can_edit).unwrap();
        state.complete_search(
            &request,
            Ok(SearchPage {
                selected: vec![item(1, "Alpha")],
                available: vec![item(2, "Beta"), item(3, "Gamma")],
                more: false,
            }),
        );
        (state, rx)
    }

    #[test]
    fn advance_spinner_index() {
        let mut state = State::default();
        state.advance_spinner_index();
        assert_eq!(*state.get_spinner_index(), 1);
        for _ in 0..SPINNER_FRAME_COUNT {
            state.advance_spinner_index();
        }
        assert_eq!(*state.get_spinner_index(), 1);
    }

    #[test]
    fn set_terminal_size() {
        let mut state = State::default();
        let size = Rect::new(0, 0, Faker.fake(), Faker.fake());
        state.set_terminal_size(size);
        assert_eq!(size, state.terminal_size);
    }

    #[test]
    fn default_gate_mounts_without_list() {
        let mut state = State {
            settings: Some(test_settings()),
            ..State::default()
        };
        assert!(state.mount_gate(gate(true), true).is_none());
        assert!(state.get_pane().is_some());
        assert!(state.get_select_list().is_none());
        assert!(matches!(state.toggle_current(), Err(StateError::NoItemSelected)));
    }

    #[test]
    fn cursors_land_on_first_items_after_load() {
        let (state, _rx) = loaded_state(true);
        assert_eq!(state.current_item(Column::Available).unwrap().name, "Beta");
        assert_eq!(state.current_item(Column::Selected).unwrap().name, "Alpha");
    }

    #[test]
    fn navigation_wraps() {
        let (mut state, _rx) = loaded_state(true);
        state.next_item();
        assert_eq!(state.current_item(Column::Available).unwrap().name, "Gamma");
        state.next_item();
        assert_eq!(state.current_item(Column::Available).unwrap().name, "Beta");
        state.prev_item();
        assert_eq!(state.current_item(Column::Available).unwrap().name, "Gamma");
    }

    #[test]
    fn toggle_current_selects_and_dispatches() {
        let (mut state, rx) = loaded_state(true);
        state.toggle_current().unwrap();
        match rx.try_recv().unwrap() {
            NetworkEvent::Toggle(request) => {
                assert_eq!(request.id, ItemId::from(2u64));
                assert!(request
                    .params
                    .contains(&("projectId".to_string(), "2".to_string())));
            }
            other => panic!("unexpected event: {:?}", other),
        }
        let list = state.get_select_list().unwrap();
        assert!(list.view().is_selected(&ItemId::from(2u64)));
        assert_eq!(state.current_item(Column::Available).unwrap().name, "Gamma");
    }

    #[test]
    fn toggle_in_selected_column_deselects() {
        let (mut state, rx) = loaded_state(true);
        state.switch_column();
        assert_eq!(state.current_column(), Column::Selected);
        state.toggle_current().unwrap();
        match rx.try_recv().unwrap() {
            NetworkEvent::Toggle(request) => {
                assert_eq!(request.toggle, crate::select_list::Toggle::Deselect)
            }
            other => panic!("unexpected event: {:?}", other),
        }
        assert!(state.current_item(Column::Selected).is_none());
    }

    #[test]
    fn read_only_toggle_sends_nothing() {
        let (mut state, rx) = loaded_state(false);
        let before = state.get_select_list().unwrap().view().clone();
        state.toggle_current().unwrap();
        assert!(rx.try_recv().is_err());
        assert_eq!(*state.get_select_list().unwrap().view(), before);
    }

    #[test]
    fn read_only_lock_requires_permission() {
        let (mut state, _rx) = loaded_state(false);
        state.toggle_read_only();
        assert_eq!(state.get_select_list().unwrap().mode(), Mode::ReadOnly);

        let (mut state, _rx) = loaded_state(true);
        state.toggle_read_only();
        assert_eq!(state.get_select_list().unwrap().mode(), Mode::ReadOnly);
        state.toggle_read_only();
        assert_eq!(state.get_select_list().unwrap().mode(), Mode::Editable);
    }

    #[test]
    fn failed_toggle_rolls_back_through_state() {
        let (mut state, rx) = loaded_state(true);
        state.toggle_current().unwrap();
        let request = match rx.try_recv().unwrap() {
            NetworkEvent::Toggle(request) => request,
            other => panic!("unexpected event: {:?}", other),
        };
        state.complete_toggle(&request, Err(SelectListError::Network("reset".to_string())));
        let list = state.get_select_list().unwrap();
        assert!(!list.view().is_selected(&ItemId::from(2u64)));
        assert!(list.notice().is_some());
    }

    #[test]
    fn search_dispatches_latest_query() {
        let (mut state, rx) = loaded_state(true);
        state.search("ga");
        match rx.try_recv().unwrap() {
            NetworkEvent::Search(request) => {
                assert!(request.params.contains(&("query".to_string(), "ga".to_string())))
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[test]
    fn search_mode_round_trip() {
        let (mut state, _rx) = loaded_state(true);
        state.enter_search_mode();
        assert!(state.is_search_mode());
        state.exit_search_mode();
        assert_eq!(state.current_focus(), Focus::Column(Column::Available));
    }

    #[test]
    fn cycle_filter_moves_focus_to_visible_column() {
        let (mut state, rx) = loaded_state(true);
        state.cycle_filter();
        assert!(matches!(rx.try_recv().unwrap(), NetworkEvent::Search(_)));
        assert_eq!(state.get_select_list().unwrap().filter(), Filter::Selected);
        assert_eq!(state.current_column(), Column::Selected);
        state.focus_column(Column::Available);
        assert_eq!(state.current_column(), Column::Selected);
    }

    #[test]
    fn debug_entries_navigation() {
        let mut state = State::default();
        state.add_debug_entry("first".to_string());
        state.add_debug_entry("second".to_string());
        state.focus_log();
        assert_eq!(state.current_debug_entry().unwrap(), "second");
        state.prev_debug_entry();
        assert_eq!(state.current_debug_entry().unwrap(), "first");
        state.prev_debug_entry();
        assert_eq!(state.get_debug_index(), 0);
        state.next_debug_entry();
        state.next_debug_entry();
        assert_eq!(state.get_debug_index(), 1);
    }

    #[test]
    fn debug_entries_are_bounded() {
        let mut state = State::default();
        for i in 0..MAX_DEBUG_ENTRIES + 10 {
            state.add_debug_entry(i.to_string());
        }
        assert_eq!(state.get_debug_entries().len(), MAX_DEBUG_ENTRIES);
        assert_eq!(state.get_debug_entries()[0], "10");
    }

    #[test]
    fn cycle_theme_requests_save() {
        let (tx, _rx) = mpsc::channel();
        let (config_tx, config_rx) = mpsc::channel();
        let mut state = State::new(
            tx,
            config_tx,
            test_settings(),
            Theme::default(),
            ViewHotkeys::default(),
        );
        let before = state.get_theme().name.clone();
        state.cycle_theme();
        assert_ne!(state.get_theme().name, before);
        assert!(config_rx.try_recv().is_ok());
    }
}
