use std::fmt;
use std::time::Duration;

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;
use url::Url;

use crate::error::{Error, Result};

/// Base URL of the hosted service. Every [`Client`] points here unless
/// [`ClientBuilder::endpoint`] says otherwise.
pub const DEFAULT_ENDPOINT: &str = "https://api.auditable.io";

/// A service-issued link permitting a given actor/team to view audit data.
///
/// Decoded from the viewer-link response body. Fields the service returns
/// beyond the known ones are kept verbatim in [`extra`](Self::extra).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewerLink {
    /// The signed URL the embedding application redirects its user to.
    pub url: String,
    /// Output format the link was issued for, when the service reports one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// Further fields from the response body.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Synchronous client for the auditable.io REST API.
///
/// Holds the project identifier, the API token, and the base endpoint; all
/// three are fixed at construction. A `Client` is a cheap cloneable handle
/// over a shared HTTP transport and is safe to use from multiple threads.
/// Each operation is one independent request/response exchange with no
/// state carried between calls.
#[derive(Clone)]
pub struct Client {
    project_id: String,
    token: String,
    endpoint: String,
    http: reqwest::blocking::Client,
}

impl Client {
    /// Create a client for `project_id` authenticated by `token`, pointing
    /// at the production endpoint.
    ///
    /// Credentials are not validated locally; malformed or empty values are
    /// rejected by the service at call time.
    pub fn new(project_id: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            token: token.into(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            http: reqwest::blocking::Client::new(),
        }
    }

    /// Start building a client with a non-default endpoint, request
    /// timeout, or transport. See [`ClientBuilder`].
    pub fn builder(project_id: impl Into<String>, token: impl Into<String>) -> ClientBuilder {
        ClientBuilder::new(project_id, token)
    }

    /// The base endpoint this client talks to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// The project identifier requests are scoped to.
    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    /// Submit an audit event.
    ///
    /// `event` may be this crate's [`Event`](crate::Event) or any other
    /// [`Serialize`] type; it is encoded to JSON before the request is
    /// built, so a payload that fails to serialize never reaches the
    /// network. Exactly one
    /// `POST {endpoint}/v1/project/{project_id}/event` is issued, with no
    /// retries and no queueing of unsent events. The only success status is
    /// `201 Created`; anything else yields [`Error::UnexpectedStatus`]
    /// carrying the observed code.
    pub fn report_event<E: Serialize>(&self, event: &E) -> Result<()> {
        let body = serde_json::to_vec(event).map_err(Error::Serialize)?;
        let url = self.event_url()?;

        debug!(url = %url, bytes = body.len(), "reporting audit event");
        let response = self
            .http
            .post(url)
            .header("Content-Type", "application/json")
            .header("Authorization", self.authorization())
            .body(body)
            .send()
            .map_err(Error::Transport)?;

        let status = response.status();
        if status != StatusCode::CREATED {
            return Err(Error::UnexpectedStatus { status });
        }
        Ok(())
    }

    /// Fetch a signed viewer link scoping `foreign_actor_id` /
    /// `foreign_team_id` to this client's project.
    ///
    /// Both identifiers come from the embedding application's own domain
    /// model and are passed through verbatim (form-urlencoded) as the
    /// `actor_id` and `team_id` query parameters. `format` selects the
    /// service-side output format via the `output` parameter; `None` or an
    /// empty string leaves it unset.
    ///
    /// The only success status is `200 OK`. The body is buffered in full
    /// before decoding; a read failure aborts the call with
    /// [`Error::BodyRead`], and a partial body is never handed to the
    /// decoder.
    pub fn get_viewer_link(
        &self,
        foreign_actor_id: &str,
        foreign_team_id: &str,
        format: Option<&str>,
    ) -> Result<ViewerLink> {
        let url = self.viewer_link_url(foreign_actor_id, foreign_team_id, format)?;

        debug!(url = %url, "requesting viewer link");
        let response = self
            .http
            .get(url)
            .header("Content-Type", "application/json")
            .header("Authorization", self.authorization())
            .send()
            .map_err(Error::Transport)?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(Error::UnexpectedStatus { status });
        }

        let body = response.bytes().map_err(Error::BodyRead)?;
        let link = serde_json::from_slice(&body).map_err(Error::Decode)?;
        Ok(link)
    }

    fn authorization(&self) -> String {
        format!("Token token={}", self.token)
    }

    fn event_url(&self) -> Result<Url> {
        let raw = format!("{}/v1/project/{}/event", self.endpoint, self.project_id);
        Ok(Url::parse(&raw)?)
    }

    fn viewer_link_url(
        &self,
        foreign_actor_id: &str,
        foreign_team_id: &str,
        format: Option<&str>,
    ) -> Result<Url> {
        let raw = format!("{}/v1/project/{}/viewerlink", self.endpoint, self.project_id);
        let mut url = Url::parse(&raw)?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("actor_id", foreign_actor_id);
            pairs.append_pair("team_id", foreign_team_id);
            if let Some(format) = format.filter(|f| !f.is_empty()) {
                pairs.append_pair("output", format);
            }
        }
        Ok(url)
    }
}

// The token must not leak into logs, so `Debug` masks it.
impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("project_id", &self.project_id)
            .field("token", &"***")
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

/// Builder for non-default [`Client`] configuration.
///
/// Covers the three knobs the wire contract leaves to the caller: an
/// alternate base endpoint, a request deadline propagated to the transport,
/// and an injected [`reqwest::blocking::Client`] shared with the rest of
/// the application.
pub struct ClientBuilder {
    project_id: String,
    token: String,
    endpoint: String,
    timeout: Option<Duration>,
    http: Option<reqwest::blocking::Client>,
}

impl ClientBuilder {
    fn new(project_id: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            token: token.into(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: None,
            http: None,
        }
    }

    /// Point the client at an alternate base URL, e.g. a staging
    /// deployment or an in-process test server.
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Deadline the transport applies to each request, connect phase
    /// included. No timeout is set unless given here.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Use an existing transport instead of constructing one. A value given
    /// to [`timeout`](Self::timeout) is ignored in that case; configure the
    /// injected client instead.
    pub fn http_client(mut self, http: reqwest::blocking::Client) -> Self {
        self.http = Some(http);
        self
    }

    /// Finish building. Fails only when the underlying transport cannot be
    /// constructed.
    pub fn build(self) -> Result<Client> {
        let http = match self.http {
            Some(http) => http,
            None => {
                let mut builder = reqwest::blocking::Client::builder();
                if let Some(timeout) = self.timeout {
                    builder = builder.timeout(timeout);
                }
                builder.build().map_err(Error::Builder)?
            }
        };

        Ok(Client {
            project_id: self.project_id,
            token: self.token,
            endpoint: self.endpoint,
            http,
        })
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────
