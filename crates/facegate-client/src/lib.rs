//! facegate-client — HTTP client for the recognition server.
//!
//! Thin client: the server owns the camera and runs recognition. This crate
//! only turns the kiosk's [`Backend`] calls into requests against
//! `/recognize`, `/register`, `/stop_camera` and builds `/video_feed` URLs.
//!
//! Any non-2xx status is reported as [`BackendError::Status`]; a body that
//! is not the expected JSON is [`BackendError::Decode`].

use facegate_core::types::RegisterRequest;
use facegate_core::{Backend, BackendError, Recognition, Registration};
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;

const RECOGNIZE_PATH: &str = "recognize";
const REGISTER_PATH: &str = "register";
const STOP_CAMERA_PATH: &str = "stop_camera";
const VIDEO_FEED_PATH: &str = "video_feed";

/// [`Backend`] over HTTP. Cheap to clone; clones share one connection pool.
#[derive(Clone, Debug)]
pub struct HttpBackend {
    client: Client,
    base: Url,
}

impl HttpBackend {
    /// Build a client for the server at `server_url` (e.g. `http://127.0.0.1:5000`).
    ///
    /// `timeout` bounds every request except the video stream, which the
    /// display fetches on its own.
    pub fn new(server_url: &str, timeout: Duration) -> Result<Self, BackendError> {
        let base = parse_base(server_url)?;
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| BackendError::Transport(e.to_string()))?;
        tracing::debug!(base = %base, ?timeout, "http backend configured");
        Ok(Self { client, base })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    fn endpoint(&self, path: &str) -> Result<Url, BackendError> {
        self.base
            .join(path)
            .map_err(|e| BackendError::InvalidUrl(format!("{}{path}: {e}", self.base)))
    }

    async fn receive<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, BackendError> {
        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| BackendError::Transport(e.to_string()))?;
        parse_body(status, &body)
    }
}

impl Backend for HttpBackend {
    async fn recognize(&self) -> Result<Recognition, BackendError> {
        let url = self.endpoint(RECOGNIZE_PATH)?;
        tracing::debug!(url = %url, "GET recognize");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| BackendError::Transport(e.to_string()))?;
        Self::receive(response).await
    }

    async fn register(&self, name: &str) -> Result<Registration, BackendError> {
        let url = self.endpoint(REGISTER_PATH)?;
        tracing::debug!(url = %url, user = name, "POST register");
        let response = self
            .client
            .post(url)
            .json(&RegisterRequest { name })
            .send()
            .await
            .map_err(|e| BackendError::Transport(e.to_string()))?;
        Self::receive(response).await
    }

    async fn stop_camera(&self) -> Result<(), BackendError> {
        let url = self.endpoint(STOP_CAMERA_PATH)?;
        tracing::trace!(url = %url, "GET stop_camera");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| BackendError::Transport(e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(BackendError::Status(status.as_u16()));
        }
        Ok(())
    }

    fn feed_url(&self, token: i64) -> String {
        match self.endpoint(VIDEO_FEED_PATH) {
            Ok(mut url) => {
                url.query_pairs_mut().append_pair("t", &token.to_string());
                url.into()
            }
            Err(_) => format!("{}{VIDEO_FEED_PATH}?t={token}", self.base),
        }
    }
}

/// Parse the server URL, making sure its path ends in `/` so endpoint
/// names join underneath it instead of replacing its last segment.
fn parse_base(server_url: &str) -> Result<Url, BackendError> {
    let mut base =
        Url::parse(server_url).map_err(|e| BackendError::InvalidUrl(format!("{server_url}: {e}")))?;
    if !matches!(base.scheme(), "http" | "https") {
        return Err(BackendError::InvalidUrl(format!(
            "{server_url}: scheme must be http or https"
        )));
    }
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.set_query(None);
    Ok(base)
}

fn parse_body<T: DeserializeOwned>(status: u16, body: &[u8]) -> Result<T, BackendError> {
    if !(200..300).contains(&status) {
        return Err(BackendError::Status(status));
    }
    serde_json::from_slice(body).map_err(|e| BackendError::Decode(e.to_string()))
}
