//! Quality gate projects pane.

use crate::select_list::{
    Labels, SearchRequest, SelectList, SelectListError, SelectListOptions, Tooltips,
};
use crate::sonar::{Item, QualityGate};
use log::*;
use std::sync::Arc;

const SEARCH_PATH: &str = "api/qualitygates/search";
const SELECT_PATH: &str = "api/qualitygates/select";
const DESELECT_PATH: &str = "api/qualitygates/deselect";

/// Settings injected into the pane when it mounts.
///
#[derive(Clone, Debug)]
pub struct PaneSettings {
    pub base_url: String,
    pub read_only: bool,
    pub page_size: usize,
    pub labels: Labels,
    pub tooltips: Tooltips,
}

/// The projects pane of one quality gate. The default gate applies to every
/// project not associated with another gate, so it gets no select list.
///
pub struct GateProjects {
    gate: QualityGate,
    can_edit: bool,
    list: Option<SelectList>,
}

impl GateProjects {
    /// Mount the pane for a loaded gate. Returns the pane and, when a select
    /// list was created, the initial empty-query search.
    ///
    pub fn mount(
        gate: QualityGate,
        can_edit: bool,
        settings: &PaneSettings,
    ) -> Result<(GateProjects, Option<SearchRequest>), SelectListError> {
        if gate.default {
            info!("Quality gate '{}' is the default gate, no project selection", gate.name);
            return Ok((
                GateProjects {
                    gate,
                    can_edit,
                    list: None,
                },
                None,
            ));
        }

        let base_url = settings.base_url.trim_end_matches('/');
        let options = SelectListOptions {
            read_only: !can_edit || settings.read_only,
            format: Arc::new(|item: &Item| item.name.clone()),
            search_url: format!("{}/{}", base_url, SEARCH_PATH),
            select_url: format!("{}/{}", base_url, SELECT_PATH),
            deselect_url: format!("{}/{}", base_url, DESELECT_PATH),
            extra: vec![("gateId".to_string(), gate.id.to_string())],
            select_parameter: "projectId".to_string(),
            select_parameter_value: "id".to_string(),
            labels: settings.labels.clone(),
            tooltips: settings.tooltips.clone(),
            page_size: settings.page_size,
        };
        let mut list = SelectList::new(options)?;
        let request = list.search("");
        debug!("Mounted project selection for quality gate '{}'", gate.name);
        Ok((
            GateProjects {
                gate,
                can_edit,
                list: Some(list),
            },
            Some(request),
        ))
    }

    pub fn gate(&self) -> &QualityGate {
        &self.gate
    }

    /// Whether the server allows the current user to edit gates.
    ///
    pub fn can_edit(&self) -> bool {
        self.can_edit
    }

    pub fn list(&self) -> Option<&SelectList> {
        self.list.as_ref()
    }

    pub fn list_mut(&mut self) -> Option<&mut SelectList> {
        self.list.as_mut()
    }
}

#[cfg(test)]
pub(crate) fn test_settings() -> PaneSettings {
    PaneSettings {
        base_url: "https://sonar.example.com/".to_string(),
        read_only: false,
        page_size: 50,
        labels: Labels::default(),
        tooltips: Tooltips::default(),
    }
}
