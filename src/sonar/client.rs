//! HTTP client for SonarQube API requests.
//!
//! This module provides a low-level HTTP client wrapper for making requests
//! to SonarQube web services, handling authentication, status checks, and
//! response parsing.

use super::error::SonarError;
use super::models::ErrorResponse;
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;

/// Makes requests to SonarQube and tries to conform response data to the
/// requested type.
///
#[derive(Clone)]
pub struct Client {
    pub(crate) token: Option<String>,
    pub(crate) base_url: String,
    pub(crate) http_client: reqwest::Client,
}

impl Client {
    /// Returns a new instance for the given base URL and optional user token.
    ///
    pub fn new(base_url: &str, token: Option<&str>) -> Self {
        Client {
            token: token.map(str::to_owned),
            base_url: base_url.trim_end_matches('/').to_owned(),
            http_client: reqwest::Client::new(),
        }
    }

    /// Returns the absolute URL for a web service path.
    ///
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Send a GET request and deserialize the JSON body.
    ///
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        params: &[(String, String)],
    ) -> Result<T, SonarError> {
        let response = self.request(Method::GET, url).query(params).send().await?;
        let response = Self::check_status(response).await?;

        let response_bytes = response.bytes().await?;
        serde_json::from_slice::<T>(&response_bytes).map_err(|e| {
            let response_text = String::from_utf8_lossy(&response_bytes);
            log::error!(
                "Failed to deserialize API response: {}. Response body: {}",
                e,
                response_text
            );
            SonarError::MalformedResponse(format!("{}: {}", e, response_text))
        })
    }

    /// Send a form-encoded POST request. Only the status is meaningful.
    ///
    pub async fn post_form(&self, url: &str, params: &[(String, String)]) -> Result<(), SonarError> {
        let response = self.request(Method::POST, url).form(params).send().await?;
        Self::check_status(response).await?;
        Ok(())
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        let request = self.http_client.request(method, url);
        match &self.token {
            // User tokens are sent as the login with an empty password
            Some(token) => request.basic_auth(token, Some("")),
            None => request,
        }
    }

    /// Turn non-success responses into `SonarError::Server`, keeping the
    /// first message of SonarQube's `{"errors": [...]}` body when present.
    ///
    async fn check_status(response: Response) -> Result<Response, SonarError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let response_text = response
            .text()
            .await
            .unwrap_or_else(|_| String::from("Unable to read response"));
        let message = serde_json::from_str::<ErrorResponse>(&response_text)
            .ok()
            .and_then(|body| body.errors.into_iter().next())
            .map(|error| error.msg)
            .unwrap_or(response_text);
        log::error!("API request failed with status {}: {}", status, message);
        Err(SonarError::Server {
            status: status.as_u16(),
            message,
        })
    }
}
