use crate::select_list::{SearchRequest, SelectListError, ToggleRequest};
use crate::sonar::Sonar;
use crate::state::State;
use anyhow::Result;
use log::*;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Specify different network event types.
///
#[derive(Debug, Clone)]
pub enum Event {
    LoadGate { gate_id: String },
    Search(SearchRequest),
    Toggle(ToggleRequest),
}

/// Specify struct for managing state with network events. Cheap to clone so
/// every event can run on its own task.
///
#[derive(Clone)]
pub struct Handler {
    state: Arc<Mutex<State>>,
    sonar: Sonar,
}

impl Handler {
    /// Return new instance with reference to state.
    ///
    pub fn new(state: Arc<Mutex<State>>, sonar: Sonar) -> Self {
        Handler { state, sonar }
    }

    /// Handle network events by type.
    ///
    pub async fn handle(&self, event: Event) -> Result<()> {
        debug!("Processing network event '{:?}'...", event);
        match event {
            Event::LoadGate { gate_id } => self.load_gate(gate_id).await?,
            Event::Search(request) => self.search(request).await?,
            Event::Toggle(request) => self.toggle(request).await?,
        }
        Ok(())
    }

    /// Fetch permissions and the gate, mount the projects pane, then run
    /// its first search.
    ///
    async fn load_gate(&self, gate_id: String) -> Result<()> {
        info!("Loading quality gate {}...", gate_id);
        let loaded = tokio::try_join!(self.sonar.app(), self.sonar.gate(&gate_id));
        let (permissions, gate) = match loaded {
            Ok(loaded) => loaded,
            Err(e) => {
                let mut state = self.state.lock().await;
                state.set_pane_error(format!("Failed to load quality gate {}: {}", gate_id, e));
                return Err(e.into());
            }
        };
        info!(
            "Loaded quality gate '{}' (edit permission: {})",
            gate.name, permissions.edit
        );

        let request = {
            let mut state = self.state.lock().await;
            state.mount_gate(gate, permissions.edit)
        };
        if let Some(request) = request {
            self.search(request).await?;
        }
        Ok(())
    }

    /// Run a search and hand the outcome back to the select list.
    ///
    async fn search(&self, request: SearchRequest) -> Result<()> {
        let result = self
            .sonar
            .search(&request)
            .await
            .map_err(SelectListError::from);
        let mut state = self.state.lock().await;
        state.complete_search(&request, result);
        Ok(())
    }

    /// Post a select/deselect and confirm or roll back the optimistic move.
    ///
    async fn toggle(&self, request: ToggleRequest) -> Result<()> {
        let result = self
            .sonar
            .toggle(&request)
            .await
            .map_err(SelectListError::from);
        let mut state = self.state.lock().await;
        state.complete_toggle(&request, result);
        Ok(())
    }
}
