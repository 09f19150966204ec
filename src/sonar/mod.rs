mod client;
mod error;
mod models;
mod resource;

pub use error::SonarError;
pub use resource::*;

use crate::select_list::{SearchRequest, ToggleRequest};
use client::Client;
use log::*;
use models::{AppResponse, GateListResponse, SearchResponse};

/// Responsible for asynchronous interaction with the SonarQube quality gate
/// web services, including transformation of response data into
/// explicitly-defined types.
///
#[derive(Clone)]
pub struct Sonar {
    client: Client,
}

impl Sonar {
    /// Returns a new instance for the given server and optional user token.
    ///
    pub fn new(base_url: &str, token: Option<&str>) -> Sonar {
        debug!("Initializing SonarQube client for {}...", base_url);
        Sonar {
            client: Client::new(base_url, token),
        }
    }

    /// Returns the absolute URL of a web service path on this server.
    ///
    pub fn url(&self, path: &str) -> String {
        self.client.url(path)
    }

    /// Returns the quality gate permissions of the current user.
    ///
    pub async fn app(&self) -> Result<Permissions, SonarError> {
        debug!("Requesting quality gate permissions...");
        let data: AppResponse = self
            .client
            .get_json(&self.client.url("api/qualitygates/app"), &[])
            .await?;
        Ok(Permissions { edit: data.edit })
    }

    /// Returns the quality gate with the given id, flagged if it is the
    /// server's default gate.
    ///
    pub async fn gate(&self, gate_id: &str) -> Result<QualityGate, SonarError> {
        debug!("Requesting quality gate {}...", gate_id);
        let data: GateListResponse = self
            .client
            .get_json(&self.client.url("api/qualitygates/list"), &[])
            .await?;

        let default = data.default;
        data.qualitygates
            .into_iter()
            .find(|gate| gate.id.as_str() == gate_id)
            .map(|gate| QualityGate {
                default: default.as_ref() == Some(&gate.id),
                id: gate.id,
                name: gate.name,
            })
            .ok_or_else(|| SonarError::GateNotFound {
                id: gate_id.to_owned(),
            })
    }

    /// Run a select list search and return its page of results.
    ///
    pub async fn search(&self, request: &SearchRequest) -> Result<SearchPage, SonarError> {
        debug!(
            "Searching {} (generation {}, page {})...",
            request.url, request.generation, request.page
        );
        let data: SearchResponse = self.client.get_json(&request.url, &request.params).await?;
        Ok(data.into())
    }

    /// Post a select or deselect.
    ///
    pub async fn toggle(&self, request: &ToggleRequest) -> Result<(), SonarError> {
        debug!("Posting {:?} of item {} to {}...", request.toggle, request.id, request.url);
        self.client.post_form(&request.url, &request.params).await
    }
}
