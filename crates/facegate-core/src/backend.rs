//! Recognition server capability.

use crate::types::{Recognition, Registration};
use std::future::Future;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    #[error("invalid server url: {0}")]
    InvalidUrl(String),
    #[error("request failed: {0}")]
    Transport(String),
    #[error("server returned HTTP {0}")]
    Status(u16),
    #[error("malformed response: {0}")]
    Decode(String),
}

/// The recognition server as seen by the kiosk.
///
/// Implementations are cheap to clone; the kiosk hands a clone to every
/// spawned request.
pub trait Backend: Clone + Send + Sync + 'static {
    /// Capture a frame server-side and try to match it against registered faces.
    fn recognize(&self) -> impl Future<Output = Result<Recognition, BackendError>> + Send;

    /// Capture a frame server-side and register it under `name`.
    fn register(&self, name: &str)
        -> impl Future<Output = Result<Registration, BackendError>> + Send;

    /// Ask the server to release the camera.
    fn stop_camera(&self) -> impl Future<Output = Result<(), BackendError>> + Send;

    /// URL of the live camera stream. `token` only defeats caching.
    fn feed_url(&self, token: i64) -> String;
}
