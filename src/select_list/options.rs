//! Construction options of the select list.

use super::error::SelectListError;
use crate::sonar::Item;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

pub const DEFAULT_PAGE_SIZE: usize = 100;

/// Produces the display label of an item.
pub type Formatter = Arc<dyn Fn(&Item) -> String + Send + Sync>;

/// Display strings for the list states.
///
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Labels {
    pub selected: String,
    pub deselected: String,
    pub all: String,
    pub no_results: String,
}

impl Default for Labels {
    fn default() -> Self {
        Labels {
            selected: "With".to_string(),
            deselected: "Without".to_string(),
            all: "All".to_string(),
            no_results: "No results".to_string(),
        }
    }
}

/// Hints for the select/deselect affordances.
///
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tooltips {
    pub select: String,
    pub deselect: String,
}

impl Default for Tooltips {
    fn default() -> Self {
        Tooltips {
            select: "Associate the project with this quality gate".to_string(),
            deselect: "Dissociate the project from this quality gate".to_string(),
        }
    }
}

/// Everything a select list is built from. The endpoints, `extra` and the
/// selection parameter are fixed for the lifetime of the list.
///
#[derive(Clone)]
pub struct SelectListOptions {
    pub read_only: bool,
    pub format: Formatter,
    pub search_url: String,
    pub select_url: String,
    pub deselect_url: String,
    pub extra: Vec<(String, String)>,
    pub select_parameter: String,
    pub select_parameter_value: String,
    pub labels: Labels,
    pub tooltips: Tooltips,
    pub page_size: usize,
}

impl SelectListOptions {
    /// Check the options before a list is built from them.
    ///
    pub fn validate(&self) -> Result<(), SelectListError> {
        let probe = Item {
            id: "".into(),
            name: String::new(),
        };
        if probe.field(&self.select_parameter_value).is_none() {
            return Err(SelectListError::InvalidOptions(format!(
                "unknown item field '{}'",
                self.select_parameter_value
            )));
        }
        if self.select_parameter.is_empty() {
            return Err(SelectListError::InvalidOptions(
                "selection parameter name is empty".to_string(),
            ));
        }
        if self.page_size == 0 {
            return Err(SelectListError::InvalidOptions(
                "page size must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

impl fmt::Debug for SelectListOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectListOptions")
            .field("read_only", &self.read_only)
            .field("search_url", &self.search_url)
            .field("select_url", &self.select_url)
            .field("deselect_url", &self.deselect_url)
            .field("extra", &self.extra)
            .field("select_parameter", &self.select_parameter)
            .field("select_parameter_value", &self.select_parameter_value)
            .field("page_size", &self.page_size)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
pub(crate) fn test_options() -> SelectListOptions {
    SelectListOptions {
        read_only: false,
        format: Arc::new(|item: &Item| item.name.clone()),
        search_url: "http://localhost/api/qualitygates/search".to_string(),
        select_url: "http://localhost/api/qualitygates/select".to_string(),
        deselect_url: "http://localhost/api/qualitygates/deselect".to_string(),
        extra: vec![("gateId".to_string(), "42".to_string())],
        select_parameter: "projectId".to_string(),
        select_parameter_value: "id".to_string(),
        labels: Labels::default(),
        tooltips: Tooltips::default(),
        page_size: DEFAULT_PAGE_SIZE,
    }
}
