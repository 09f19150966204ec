//! Dual-list selection widget.
//!
//! `SelectList` keeps a searchable universe of items split into a selected
//! and an available column for one fixed context (a quality gate). It never
//! performs IO: every operation that needs the server returns a request
//! value, and the caller hands the outcome back through the matching
//! `complete_*` method. Select/deselect are applied optimistically and rolled
//! back when their request fails; searches are tagged with a generation so
//! that only the latest one is ever applied.

mod error;
mod options;

pub use error::SelectListError;
pub use options::{Formatter, Labels, SelectListOptions, Tooltips, DEFAULT_PAGE_SIZE};

#[cfg(test)]
pub(crate) use options::test_options;

use crate::sonar::{Item, ItemId, SearchPage};
use log::*;
use std::collections::{HashMap, HashSet};

/// Whether select/deselect are allowed.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Editable,
    ReadOnly,
}

/// Which part of the universe a search asks for.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Filter {
    Selected,
    Deselected,
    All,
}

impl Filter {
    /// Value of the `selected` search parameter.
    ///
    pub fn as_param(&self) -> &'static str {
        match self {
            Filter::Selected => "selected",
            Filter::Deselected => "deselected",
            Filter::All => "all",
        }
    }

    /// Next filter in tab order.
    ///
    pub fn next(&self) -> Filter {
        match self {
            Filter::Selected => Filter::Deselected,
            Filter::Deselected => Filter::All,
            Filter::All => Filter::Selected,
        }
    }

    /// Display label of the filter tab.
    ///
    pub fn label<'a>(&self, labels: &'a Labels) -> &'a str {
        match self {
            Filter::Selected => &labels.selected,
            Filter::Deselected => &labels.deselected,
            Filter::All => &labels.all,
        }
    }
}

/// Direction of a membership change.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    Select,
    Deselect,
}

/// The two columns of the list.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Selected,
    Available,
}

impl Column {
    pub fn name(&self) -> &'static str {
        match self {
            Column::Selected => "selected",
            Column::Available => "available",
        }
    }

    pub fn other(&self) -> Column {
        match self {
            Column::Selected => Column::Available,
            Column::Available => Column::Selected,
        }
    }
}

impl Toggle {
    /// Column the item leaves.
    fn source(&self) -> Column {
        match self {
            Toggle::Select => Column::Available,
            Toggle::Deselect => Column::Selected,
        }
    }
}

/// What the user currently sees. `query` is the query of the last applied
/// search, not the one in flight.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub query: String,
    pub selected: Vec<Item>,
    pub available: Vec<Item>,
    pub mode: Mode,
}

impl ViewState {
    pub fn column(&self, column: Column) -> &Vec<Item> {
        match column {
            Column::Selected => &self.selected,
            Column::Available => &self.available,
        }
    }

    fn column_mut(&mut self, column: Column) -> &mut Vec<Item> {
        match column {
            Column::Selected => &mut self.selected,
            Column::Available => &mut self.available,
        }
    }

    /// Returns true if the id is in the selected column.
    ///
    pub fn is_selected(&self, id: &ItemId) -> bool {
        self.selected.iter().any(|item| &item.id == id)
    }

    fn position(&self, column: Column, id: &ItemId) -> Option<usize> {
        self.column(column).iter().position(|item| &item.id == id)
    }

    /// Move an item between columns, inserting at `index` (clamped) or at
    /// the end. Returns the index it was removed from.
    ///
    fn move_item(
        &mut self,
        id: &ItemId,
        from: Column,
        to: Column,
        index: Option<usize>,
    ) -> Option<usize> {
        let origin = self.position(from, id)?;
        let item = self.column_mut(from).remove(origin);
        let target = self.column_mut(to);
        let index = index.unwrap_or(target.len()).min(target.len());
        target.insert(index, item);
        Some(origin)
    }
}

/// A search to run against the search endpoint.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub generation: u64,
    pub url: String,
    pub query: String,
    pub page: usize,
    pub params: Vec<(String, String)>,
}

/// A select or deselect to post.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleRequest {
    pub id: ItemId,
    pub toggle: Toggle,
    pub url: String,
    pub params: Vec<(String, String)>,
}

#[derive(Debug, Clone)]
struct PendingToggle {
    toggle: Toggle,
    origin: usize,
    item: Item,
}

/// Searchable dual list bound to one fixed context.
///
pub struct SelectList {
    options: SelectListOptions,
    view: ViewState,
    query: String,
    filter: Filter,
    generation: u64,
    page: usize,
    more: bool,
    searching: bool,
    loaded: bool,
    pending: HashMap<ItemId, PendingToggle>,
    notice: Option<String>,
}

impl SelectList {
    /// Build a list from validated options. Nothing is loaded until the
    /// first `search`.
    ///
    pub fn new(options: SelectListOptions) -> Result<Self, SelectListError> {
        options.validate()?;
        let mode = if options.read_only {
            Mode::ReadOnly
        } else {
            Mode::Editable
        };
        Ok(SelectList {
            options,
            view: ViewState {
                query: String::new(),
                selected: vec![],
                available: vec![],
                mode,
            },
            query: String::new(),
            filter: Filter::All,
            generation: 0,
            page: 1,
            more: false,
            searching: false,
            loaded: false,
            pending: HashMap::new(),
            notice: None,
        })
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn options(&self) -> &SelectListOptions {
        &self.options
    }

    pub fn labels(&self) -> &Labels {
        &self.options.labels
    }

    pub fn tooltips(&self) -> &Tooltips {
        &self.options.tooltips
    }

    pub fn filter(&self) -> Filter {
        self.filter
    }

    pub fn mode(&self) -> Mode {
        self.view.mode
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn has_more(&self) -> bool {
        self.more
    }

    pub fn is_searching(&self) -> bool {
        self.searching
    }

    /// Returns true once a search has been applied.
    ///
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn is_pending(&self, id: &ItemId) -> bool {
        self.pending.contains_key(id)
    }

    /// Display label of an item.
    ///
    pub fn format(&self, item: &Item) -> String {
        (self.options.format)(item)
    }

    /// Columns shown for the current filter.
    ///
    pub fn visible_columns(&self) -> Vec<Column> {
        match self.filter {
            Filter::Selected => vec![Column::Selected],
            Filter::Deselected => vec![Column::Available],
            Filter::All => vec![Column::Selected, Column::Available],
        }
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    /// Toggle whether select/deselect are allowed. Searching is unaffected.
    ///
    pub fn set_read_only(&mut self, read_only: bool) {
        self.view.mode = if read_only {
            Mode::ReadOnly
        } else {
            Mode::Editable
        };
    }

    /// Start a search for the query from the first page. Any search still in
    /// flight becomes stale.
    ///
    pub fn search(&mut self, query: &str) -> SearchRequest {
        self.query = query.to_owned();
        self.next_search(query.to_owned(), 1)
    }

    /// Change the filter and re-run the latest query.
    ///
    pub fn set_filter(&mut self, filter: Filter) -> SearchRequest {
        self.filter = filter;
        let query = self.query.clone();
        self.search(&query)
    }

    pub fn cycle_filter(&mut self) -> SearchRequest {
        self.set_filter(self.filter.next())
    }

    /// Request the next page of the shown query, if the server reported
    /// more results and no search is running.
    ///
    pub fn load_more(&mut self) -> Option<SearchRequest> {
        if !self.more || self.searching {
            return None;
        }
        let query = self.view.query.clone();
        Some(self.next_search(query, self.page + 1))
    }

    fn next_search(&mut self, query: String, page: usize) -> SearchRequest {
        self.generation += 1;
        self.searching = true;
        let mut params = vec![
            ("query".to_string(), query.clone()),
            ("selected".to_string(), self.filter.as_param().to_string()),
            ("page".to_string(), page.to_string()),
            ("pageSize".to_string(), self.options.page_size.to_string()),
        ];
        params.extend(self.options.extra.iter().cloned());
        SearchRequest {
            generation: self.generation,
            url: self.options.search_url.clone(),
            query,
            page,
            params,
        }
    }

    /// Apply the outcome of a search. Returns false if the request was
    /// superseded and its outcome discarded.
    ///
    pub fn complete_search(
        &mut self,
        request: &SearchRequest,
        result: Result<SearchPage, SelectListError>,
    ) -> bool {
        if request.generation != self.generation {
            debug!(
                "Discarding stale search results (generation {}, latest {})",
                request.generation, self.generation
            );
            return false;
        }
        self.searching = false;

        let page = match result.and_then(|page| Self::check_partition(page, request.page)) {
            Ok(page) => page,
            Err(e) => {
                error!("Search for '{}' failed: {}", request.query, e);
                if request.page == 1 {
                    // the shown pages belong to an earlier query
                    self.more = false;
                }
                self.notice = Some(e.to_string());
                return true;
            }
        };

        if request.page > 1 {
            self.append_page(page.selected, page.available);
        } else {
            self.view.query = request.query.clone();
            self.view.selected = page.selected;
            self.view.available = page.available;
        }
        self.page = request.page;
        self.more = page.more;
        self.loaded = true;
        self.notice = None;
        self.overlay_pending();
        debug!(
            "Applied search page {}: {} selected, {} available",
            request.page,
            self.view.selected.len(),
            self.view.available.len()
        );
        true
    }

    fn check_partition(page: SearchPage, page_number: usize) -> Result<SearchPage, SelectListError> {
        let mut seen = HashSet::new();
        for item in page.selected.iter().chain(page.available.iter()) {
            if !seen.insert(&item.id) {
                return Err(SelectListError::MalformedResponse(format!(
                    "item {} appears more than once in page {}",
                    item.id, page_number
                )));
            }
        }
        Ok(page)
    }

    /// Append a later page, skipping ids already shown in either column.
    fn append_page(&mut self, selected: Vec<Item>, available: Vec<Item>) {
        let mut known: HashSet<ItemId> = self
            .view
            .selected
            .iter()
            .chain(self.view.available.iter())
            .map(|item| item.id.clone())
            .collect();
        for item in selected {
            if known.insert(item.id.clone()) {
                self.view.selected.push(item);
            }
        }
        for item in available {
            if known.insert(item.id.clone()) {
                self.view.available.push(item);
            }
        }
    }

    /// Keep in-flight toggles visible on top of fresh search results. An item
    /// missing from both columns is put back into its target column when
    /// that column is shown.
    fn overlay_pending(&mut self) {
        let visible = self.visible_columns();
        for (id, pending) in &self.pending {
            let from = pending.toggle.source();
            let to = from.other();
            if self.view.move_item(id, from, to, None).is_some()
                || self.view.position(to, id).is_some()
            {
                continue;
            }
            if visible.contains(&to) {
                self.view.column_mut(to).push(pending.item.clone());
            }
        }
    }

    /// Optimistically move an item to the selected column and return the
    /// request that confirms it.
    ///
    pub fn select(&mut self, id: &ItemId) -> Result<ToggleRequest, SelectListError> {
        self.begin_toggle(id, Toggle::Select)
    }

    /// Optimistically move an item to the available column and return the
    /// request that confirms it.
    ///
    pub fn deselect(&mut self, id: &ItemId) -> Result<ToggleRequest, SelectListError> {
        self.begin_toggle(id, Toggle::Deselect)
    }

    fn begin_toggle(&mut self, id: &ItemId, toggle: Toggle) -> Result<ToggleRequest, SelectListError> {
        if self.view.mode == Mode::ReadOnly {
            return Err(SelectListError::ReadOnly);
        }
        if self.pending.contains_key(id) {
            return Err(SelectListError::TogglePending { id: id.clone() });
        }

        let from = toggle.source();
        let item = self
            .view
            .column(from)
            .iter()
            .find(|item| &item.id == id)
            .cloned()
            .ok_or_else(|| SelectListError::ItemNotFound {
                id: id.clone(),
                column: from.name(),
            })?;
        let value = item
            .field(&self.options.select_parameter_value)
            .map(str::to_owned)
            .ok_or_else(|| SelectListError::ItemNotFound {
                id: id.clone(),
                column: from.name(),
            })?;

        let origin = self
            .view
            .move_item(id, from, from.other(), None)
            .ok_or_else(|| SelectListError::ItemNotFound {
                id: id.clone(),
                column: from.name(),
            })?;
        self.pending.insert(
            id.clone(),
            PendingToggle {
                toggle,
                origin,
                item,
            },
        );

        let mut params = self.options.extra.clone();
        params.push((self.options.select_parameter.clone(), value));
        let url = match toggle {
            Toggle::Select => self.options.select_url.clone(),
            Toggle::Deselect => self.options.deselect_url.clone(),
        };
        debug!("Applied {:?} of item {} optimistically", toggle, id);
        Ok(ToggleRequest {
            id: id.clone(),
            toggle,
            url,
            params,
        })
    }

    /// Confirm or roll back an optimistic select/deselect.
    ///
    pub fn complete_toggle(&mut self, request: &ToggleRequest, result: Result<(), SelectListError>) {
        let pending = match self.pending.remove(&request.id) {
            Some(pending) if pending.toggle == request.toggle => pending,
            Some(pending) => {
                warn!(
                    "Completion of {:?} for item {} does not match pending {:?}",
                    request.toggle, request.id, pending.toggle
                );
                self.pending.insert(request.id.clone(), pending);
                return;
            }
            None => {
                warn!("Ignoring completion for item {} with nothing pending", request.id);
                return;
            }
        };

        match result {
            Ok(()) => {
                info!("{:?} of item {} confirmed", request.toggle, request.id);
            }
            Err(e) => {
                error!("{:?} of item {} failed: {}", request.toggle, request.id, e);
                self.roll_back(&request.id, pending);
                self.notice = Some(e.to_string());
            }
        }
    }

    /// Return a failed toggle's item to the column it came from, if that
    /// column is shown.
    fn roll_back(&mut self, id: &ItemId, pending: PendingToggle) {
        let source = pending.toggle.source();
        let target = source.other();
        let removed = self
            .view
            .position(target, id)
            .map(|index| self.view.column_mut(target).remove(index));
        if self.view.position(source, id).is_some() {
            return;
        }
        if !self.visible_columns().contains(&source) {
            debug!(
                "Rollback of {:?} for item {} leaves it hidden by the {:?} filter",
                pending.toggle, id, self.filter
            );
            return;
        }
        if removed.is_none() {
            debug!(
                "Rollback of {:?} for item {} found it in neither column, restoring it",
                pending.toggle, id
            );
        }
        let item = removed.unwrap_or(pending.item);
        let column = self.view.column_mut(source);
        let index = pending.origin.min(column.len());
        column.insert(index, item);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fake::{Fake, Faker};

    fn item(id: u64, name: &str) -> Item {
        Item {
            id: ItemId::from(id),
            name: name.to_string(),
        }
    }

    fn page(selected: Vec<Item>, available: Vec<Item>) -> SearchPage {
        SearchPage {
            selected,
            available,
            more: false,
        }
    }

    fn ids(items: &[Item]) -> Vec<String> {
        items.iter().map(|i| i.id.to_string()).collect()
    }

    fn param<'a>(params: &'a [(String, String)], key: &str) -> Option<&'a str> {
        params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// List loaded with Alpha selected and Beta, Gamma available.
    fn loaded_list() -> SelectList {
        let mut list = SelectList::new(test_options()).unwrap();
        let request = list.search("");
        assert!(list.complete_search(
            &request,
            Ok(page(
                vec![item(1, "Alpha")],
                vec![item(2, "Beta"), item(3, "Gamma")]
            ))
        ));
        list
    }

    #[test]
    fn new_rejects_invalid_options() {
        let options = SelectListOptions {
            page_size: 0,
            ..test_options()
        };
        assert!(SelectList::new(options).is_err());
    }

    #[test]
    fn read_only_option_sets_mode() {
        let options = SelectListOptions {
            read_only: true,
            ..test_options()
        };
        let list = SelectList::new(options).unwrap();
        assert_eq!(list.mode(), Mode::ReadOnly);
    }

    #[test]
    fn search_request_carries_query_paging_and_context() {
        let mut list = SelectList::new(test_options()).unwrap();
        let request = list.search("sonar");
        assert_eq!(request.url, "http://localhost/api/qualitygates/search");
        assert_eq!(request.page, 1);
        assert_eq!(param(&request.params, "query"), Some("sonar"));
        assert_eq!(param(&request.params, "selected"), Some("all"));
        assert_eq!(param(&request.params, "page"), Some("1"));
        assert_eq!(param(&request.params, "pageSize"), Some("100"));
        assert_eq!(param(&request.params, "gateId"), Some("42"));
        assert_eq!(request.query, "sonar");
        assert!(list.is_searching());
        assert_eq!(list.view().query, "");
    }

    #[test]
    fn search_result_is_partitioned() {
        let list = loaded_list();
        assert_eq!(ids(&list.view().selected), vec!["1"]);
        assert_eq!(ids(&list.view().available), vec!["2", "3"]);
        assert!(list.is_loaded());
        assert!(!list.is_searching());
    }

    #[test]
    fn overlapping_partition_is_malformed() {
        let mut list = loaded_list();
        let before = list.view().clone();
        let request = list.search("a");
        list.complete_search(
            &request,
            Ok(page(vec![item(5, "Epsilon")], vec![item(5, "Epsilon")])),
        );
        assert_eq!(list.view().selected, before.selected);
        assert_eq!(list.view().available, before.available);
        assert!(list.notice().unwrap().contains("more than once"));
    }

    #[test]
    fn repeated_search_is_idempotent() {
        let mut list = loaded_list();
        let results = page(vec![item(1, "Alpha")], vec![item(2, "Beta")]);
        let first = list.search("a");
        list.complete_search(&first, Ok(results.clone()));
        let after_first = list.view().clone();
        let second = list.search("a");
        list.complete_search(&second, Ok(results));
        assert_eq!(*list.view(), after_first);
    }

    #[test]
    fn stale_search_results_are_discarded() {
        let mut list = SelectList::new(test_options()).unwrap();
        let search_a = list.search("a");
        let search_b = list.search("b");
        assert!(list.complete_search(&search_b, Ok(page(vec![], vec![item(2, "Beta")]))));
        assert!(!list.complete_search(&search_a, Ok(page(vec![], vec![item(1, "Alpha")]))));
        assert_eq!(ids(&list.view().available), vec!["2"]);
        assert_eq!(list.view().query, "b");
    }

    #[test]
    fn stale_search_failure_is_discarded() {
        let mut list = loaded_list();
        let stale = list.search("a");
        let latest = list.search("ab");
        list.complete_search(&latest, Ok(page(vec![], vec![item(2, "Beta")])));
        list.complete_search(&stale, Err(SelectListError::Network("reset".to_string())));
        assert!(list.notice().is_none());
    }

    #[test]
    fn search_failure_keeps_previous_state() {
        let mut list = loaded_list();
        let before = list.view().clone();
        let request = list.search("x");
        list.complete_search(
            &request,
            Err(SelectListError::Server {
                status: 500,
                message: "boom".to_string(),
            }),
        );
        assert_eq!(list.view().selected, before.selected);
        assert_eq!(list.view().available, before.available);
        assert!(list.notice().unwrap().contains("500"));
        assert!(!list.is_searching());
    }

    #[test]
    fn failed_search_does_not_page_into_other_query() {
        let mut list = SelectList::new(test_options()).unwrap();
        let alpha = list.search("alpha");
        list.complete_search(
            &alpha,
            Ok(SearchPage {
                selected: vec![],
                available: vec![item(1, "Alpha one")],
                more: true,
            }),
        );
        let zeta = list.search("zeta");
        list.complete_search(&zeta, Err(SelectListError::Network("down".to_string())));

        assert_eq!(list.view().query, "alpha");
        assert!(!list.has_more());
        assert!(list.load_more().is_none());

        // a successful retry starts the new query from the first page
        let retry = list.search("zeta");
        assert_eq!(retry.page, 1);
        list.complete_search(
            &retry,
            Ok(SearchPage {
                selected: vec![],
                available: vec![item(9, "Zeta nine")],
                more: true,
            }),
        );
        let next = list.load_more().unwrap();
        assert_eq!(param(&next.params, "query"), Some("zeta"));
        assert_eq!(next.page, 2);
    }

    #[test]
    fn failed_later_page_can_be_retried() {
        let mut list = SelectList::new(test_options()).unwrap();
        let first = list.search("");
        list.complete_search(
            &first,
            Ok(SearchPage {
                selected: vec![],
                available: vec![item(1, "Alpha")],
                more: true,
            }),
        );
        let second = list.load_more().unwrap();
        list.complete_search(&second, Err(SelectListError::Network("reset".to_string())));
        assert_eq!(ids(&list.view().available), vec!["1"]);
        let retry = list.load_more().unwrap();
        assert_eq!(retry.page, 2);
    }

    #[test]
    fn successful_search_clears_notice() {
        let mut list = loaded_list();
        let failing = list.search("x");
        list.complete_search(&failing, Err(SelectListError::Network("down".to_string())));
        assert!(list.notice().is_some());
        let retry = list.search("x");
        list.complete_search(&retry, Ok(page(vec![], vec![])));
        assert!(list.notice().is_none());
    }

    #[test]
    fn select_moves_item_and_builds_request() {
        let mut list = loaded_list();
        let request = list.select(&ItemId::from(2u64)).unwrap();
        assert_eq!(request.toggle, Toggle::Select);
        assert_eq!(request.url, "http://localhost/api/qualitygates/select");
        assert_eq!(param(&request.params, "gateId"), Some("42"));
        assert_eq!(param(&request.params, "projectId"), Some("2"));
        assert_eq!(ids(&list.view().selected), vec!["1", "2"]);
        assert_eq!(ids(&list.view().available), vec!["3"]);
        assert!(list.is_pending(&ItemId::from(2u64)));

        list.complete_toggle(&request, Ok(()));
        assert!(!list.is_pending(&ItemId::from(2u64)));
        assert_eq!(ids(&list.view().selected), vec!["1", "2"]);
    }

    #[test]
    fn select_uses_configured_value_field() {
        let options = SelectListOptions {
            select_parameter: "projectName".to_string(),
            select_parameter_value: "name".to_string(),
            ..test_options()
        };
        let mut list = SelectList::new(options).unwrap();
        let search = list.search("");
        list.complete_search(&search, Ok(page(vec![], vec![item(2, "Beta")])));
        let request = list.select(&ItemId::from(2u64)).unwrap();
        assert_eq!(param(&request.params, "projectName"), Some("Beta"));
    }

    #[test]
    fn select_then_deselect_restores_membership() {
        let mut list = loaded_list();
        let id = ItemId::from(2u64);
        let was_selected = list.view().is_selected(&id);
        let select = list.select(&id).unwrap();
        list.complete_toggle(&select, Ok(()));
        let deselect = list.deselect(&id).unwrap();
        assert_eq!(deselect.url, "http://localhost/api/qualitygates/deselect");
        list.complete_toggle(&deselect, Ok(()));
        assert_eq!(list.view().is_selected(&id), was_selected);
        assert!(list.view().available.iter().any(|i| i.id == id));
    }

    #[test]
    fn failed_select_rolls_back_to_origin() {
        let mut list = loaded_list();
        let id = ItemId::from(2u64);
        let request = list.select(&id).unwrap();
        list.complete_toggle(&request, Err(SelectListError::Network("timeout".to_string())));
        assert!(!list.view().is_selected(&id));
        assert_eq!(ids(&list.view().available), vec!["2", "3"]);
        assert!(list.notice().unwrap().contains("timeout"));
        assert!(!list.is_pending(&id));
    }

    #[test]
    fn failed_deselect_rolls_back() {
        let mut list = loaded_list();
        let id = ItemId::from(1u64);
        let request = list.deselect(&id).unwrap();
        assert!(!list.view().is_selected(&id));
        list.complete_toggle(
            &request,
            Err(SelectListError::Server {
                status: 403,
                message: "forbidden".to_string(),
            }),
        );
        assert!(list.view().is_selected(&id));
        assert!(list.notice().is_some());
    }

    #[test]
    fn read_only_rejects_toggles_without_change() {
        let mut list = loaded_list();
        list.set_read_only(true);
        let before = list.view().clone();
        assert_eq!(
            list.select(&ItemId::from(2u64)),
            Err(SelectListError::ReadOnly)
        );
        assert_eq!(
            list.deselect(&ItemId::from(1u64)),
            Err(SelectListError::ReadOnly)
        );
        assert_eq!(*list.view(), before);
        assert!(list.notice().is_none());
    }

    #[test]
    fn read_only_still_searches() {
        let mut list = loaded_list();
        list.set_read_only(true);
        let request = list.search("g");
        assert!(list.complete_search(&request, Ok(page(vec![], vec![item(3, "Gamma")]))));
        assert_eq!(ids(&list.view().available), vec!["3"]);
    }

    #[test]
    fn second_toggle_on_pending_item_is_rejected() {
        let mut list = loaded_list();
        let id = ItemId::from(2u64);
        list.select(&id).unwrap();
        let before = list.view().clone();
        assert_eq!(
            list.deselect(&id),
            Err(SelectListError::TogglePending { id: id.clone() })
        );
        assert_eq!(*list.view(), before);
        assert!(list.view().is_selected(&id));
    }

    #[test]
    fn toggles_on_different_items_complete_independently() {
        let mut list = loaded_list();
        let beta = list.select(&ItemId::from(2u64)).unwrap();
        let gamma = list.select(&ItemId::from(3u64)).unwrap();
        list.complete_toggle(&gamma, Ok(()));
        list.complete_toggle(&beta, Err(SelectListError::Network("reset".to_string())));
        assert_eq!(ids(&list.view().selected), vec!["1", "3"]);
        assert_eq!(ids(&list.view().available), vec!["2"]);
    }

    #[test]
    fn toggle_of_unknown_item_is_rejected() {
        let mut list = loaded_list();
        let result = list.select(&ItemId::from(1u64));
        assert!(matches!(result, Err(SelectListError::ItemNotFound { .. })));
        let result = list.deselect(&ItemId::from(99u64));
        assert!(matches!(result, Err(SelectListError::ItemNotFound { .. })));
    }

    #[test]
    fn search_keeps_pending_toggle_visible() {
        let mut list = loaded_list();
        let id = ItemId::from(2u64);
        let select = list.select(&id).unwrap();
        // Server has not processed the select yet
        let search = list.search("");
        list.complete_search(
            &search,
            Ok(page(vec![item(1, "Alpha")], vec![item(2, "Beta"), item(3, "Gamma")])),
        );
        assert!(list.view().is_selected(&id));
        list.complete_toggle(&select, Err(SelectListError::Network("reset".to_string())));
        assert!(!list.view().is_selected(&id));
        assert!(list.view().available.iter().any(|i| i.id == id));
    }

    #[test]
    fn pending_select_survives_filtered_search() {
        let mut list = SelectList::new(test_options()).unwrap();
        let mount = list.search("");
        list.complete_search(&mount, Ok(page(vec![item(1, "Alpha")], vec![item(2, "Beta")])));
        let id = ItemId::from(2u64);
        let select = list.select(&id).unwrap();

        // server has not applied the select, so Beta is in neither column
        let filtered = list.set_filter(Filter::Selected);
        list.complete_search(&filtered, Ok(page(vec![item(1, "Alpha")], vec![])));
        assert!(list.is_pending(&id));
        assert_eq!(ids(&list.view().selected), vec!["1", "2"]);

        list.complete_toggle(&select, Ok(()));
        assert_eq!(ids(&list.view().selected), vec!["1", "2"]);
    }

    #[test]
    fn pending_select_hidden_by_filter_is_not_shown() {
        let mut list = loaded_list();
        let id = ItemId::from(2u64);
        let select = list.select(&id).unwrap();
        let filtered = list.set_filter(Filter::Deselected);
        list.complete_search(&filtered, Ok(page(vec![], vec![item(3, "Gamma")])));
        assert!(list.view().selected.is_empty());
        assert_eq!(ids(&list.view().available), vec!["3"]);

        // rollback puts the item back where it came from
        list.complete_toggle(&select, Err(SelectListError::Network("reset".to_string())));
        assert_eq!(ids(&list.view().available), vec!["2", "3"]);
        assert!(!list.is_pending(&id));
    }

    #[test]
    fn rollback_with_source_column_hidden_is_dropped() {
        let mut list = loaded_list();
        let id = ItemId::from(2u64);
        let select = list.select(&id).unwrap();
        let filtered = list.set_filter(Filter::Selected);
        list.complete_search(&filtered, Ok(page(vec![item(1, "Alpha")], vec![])));
        assert_eq!(ids(&list.view().selected), vec!["1", "2"]);

        list.complete_toggle(&select, Err(SelectListError::Network("reset".to_string())));
        assert_eq!(ids(&list.view().selected), vec!["1"]);
        assert!(list.view().available.is_empty());
        assert!(list.notice().unwrap().contains("reset"));
    }

    #[test]
    fn load_more_appends_next_page() {
        let mut list = SelectList::new(test_options()).unwrap();
        assert!(list.load_more().is_none());
        let first = list.search("");
        list.complete_search(
            &first,
            Ok(SearchPage {
                selected: vec![item(1, "Alpha")],
                available: vec![item(2, "Beta")],
                more: true,
            }),
        );
        assert!(list.has_more());
        let second = list.load_more().unwrap();
        assert_eq!(second.page, 2);
        assert_eq!(param(&second.params, "page"), Some("2"));
        assert!(list.load_more().is_none());
        list.complete_search(
            &second,
            Ok(page(vec![], vec![item(2, "Beta"), item(3, "Gamma")])),
        );
        assert_eq!(ids(&list.view().available), vec!["2", "3"]);
        assert!(!list.has_more());
    }

    #[test]
    fn cycle_filter_reruns_query() {
        let mut list = loaded_list();
        list.search("be");
        let request = list.cycle_filter();
        assert_eq!(list.filter(), Filter::Selected);
        assert_eq!(param(&request.params, "selected"), Some("selected"));
        assert_eq!(param(&request.params, "query"), Some("be"));
        assert_eq!(list.visible_columns(), vec![Column::Selected]);
    }

    #[test]
    fn formatter_controls_labels() {
        let options = SelectListOptions {
            format: std::sync::Arc::new(|item: &Item| format!("[{}] {}", item.id, item.name)),
            ..test_options()
        };
        let list = SelectList::new(options).unwrap();
        let name: String = Faker.fake();
        let label = list.format(&Item {
            id: ItemId::from(9u64),
            name: name.clone(),
        });
        assert_eq!(label, format!("[9] {}", name));
    }

    #[test]
    fn gate_42_scenario() {
        let mut list = SelectList::new(test_options()).unwrap();
        let mount = list.search("");
        assert_eq!(param(&mount.params, "gateId"), Some("42"));
        list.complete_search(
            &mount,
            Ok(page(vec![item(1, "Alpha")], vec![item(2, "Beta")])),
        );
        assert_eq!(list.view().selected[0].name, "Alpha");
        assert_eq!(list.view().available[0].name, "Beta");

        let request = list.select(&ItemId::from(2u64)).unwrap();
        assert_eq!(
            request.params,
            vec![
                ("gateId".to_string(), "42".to_string()),
                ("projectId".to_string(), "2".to_string()),
            ]
        );
        list.complete_toggle(&request, Ok(()));
        let names: Vec<&str> = list.view().selected.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Alpha", "Beta"]);
        assert!(list.view().available.is_empty());
    }
}
