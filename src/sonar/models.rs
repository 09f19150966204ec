//! Wire formats of the SonarQube endpoints used by the application.

use super::resource::{Item, ItemId, SearchPage};
use serde::Deserialize;

/// Body of a search response. Older servers return one flagged collection,
/// newer ones return the two partitions directly.
///
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum SearchResponse {
    Partitioned {
        selected: Vec<Item>,
        available: Vec<Item>,
        #[serde(default)]
        more: bool,
    },
    Flagged {
        results: Vec<FlaggedItem>,
        #[serde(default)]
        more: bool,
    },
}

#[derive(Debug, Deserialize)]
pub(crate) struct FlaggedItem {
    id: ItemId,
    name: String,
    selected: bool,
}

impl From<SearchResponse> for SearchPage {
    fn from(response: SearchResponse) -> Self {
        match response {
            SearchResponse::Partitioned {
                selected,
                available,
                more,
            } => SearchPage {
                selected,
                available,
                more,
            },
            SearchResponse::Flagged { results, more } => {
                let mut page = SearchPage {
                    more,
                    ..SearchPage::default()
                };
                for flagged in results {
                    let item = Item {
                        id: flagged.id,
                        name: flagged.name,
                    };
                    if flagged.selected {
                        page.selected.push(item);
                    } else {
                        page.available.push(item);
                    }
                }
                page
            }
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct GateModel {
    pub id: ItemId,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GateListResponse {
    pub qualitygates: Vec<GateModel>,
    #[serde(default)]
    pub default: Option<ItemId>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AppResponse {
    #[serde(default)]
    pub edit: bool,
}

/// Error body returned by SonarQube web services.
///
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorResponse {
    pub errors: Vec<ErrorMessage>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorMessage {
    pub msg: String,
}
