//! Provider implementation for the We Want Waste skip hire API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;

use skipper_core::{
    model::{Location, Skip},
    ports::{PortError, SkipPort},
};

/// Production base URL of the skip service.
pub const BASE_URL: &str = "https://app.wewantwaste.co.uk/api";

/// Request timeout applied by [`build_client`] unless configured otherwise.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

const USER_AGENT: &str = concat!("skipper/", env!("CARGO_PKG_VERSION"));

/// Build an HTTP client with JSON content negotiation and the given request timeout.
///
/// # Errors
///
/// Returns [`PortError::Request`] when the TLS backend or client cannot be initialised.
pub fn build_client(timeout: Duration) -> Result<Client, PortError> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

    Client::builder()
        .user_agent(USER_AGENT)
        .default_headers(headers)
        .timeout(timeout)
        .build()
        .map_err(|err| PortError::Request(err.to_string()))
}

/// Skip listing backed by `GET {base_url}/skips/by-location`.
pub struct WeWantWasteSkipPort {
    client: Client,
    base_url: String,
}

impl WeWantWasteSkipPort {
    /// Create a new port talking to the production API.
    #[must_use]
    pub fn new(client: Client) -> Self {
        Self::with_base_url(client, BASE_URL)
    }

    /// Create a new port talking to a different deployment of the API.
    #[must_use]
    pub fn with_base_url<S: Into<String>>(client: Client, base_url: S) -> Self {
        let base_url: String = base_url.into();
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }

    /// Base URL requests are sent to, without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl SkipPort for WeWantWasteSkipPort {
    fn name(&self) -> &str {
        "wewantwaste"
    }

    async fn skips_by_location(&self, location: &Location) -> Result<Vec<Skip>, PortError> {
        let req = self
            .client
            .get(format!("{}/skips/by-location", self.base_url))
            .query(&[
                ("postcode", location.postcode.as_str()),
                ("area", location.area.as_str()),
            ]);

        tracing::debug!(base_url = %self.base_url, %location, "requesting skips");

        fetch_json::<Vec<Skip>>(req).await.inspect_err(|err| {
            tracing::error!(error = ?err, %location, "error fetching skip data");
        })
    }
}

// Small helper to fetch and decode JSON with status handling.
// The body is read in full before parsing so transfer failures stay network errors.
async fn fetch_json<T: DeserializeOwned>(req: RequestBuilder) -> Result<T, PortError> {
    let body = req
        .send()
        .await
        .map_err(PortError::from)?
        .error_for_status()
        .map_err(PortError::from)?
        .bytes()
        .await
        .map_err(PortError::from)?;

    serde_json::from_slice(&body).map_err(|err| PortError::Decode(err.to_string()))
}
