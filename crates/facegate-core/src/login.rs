//! Face login flow.
//!
//! ```text
//! Idle ──attempt──▶ Scanning ──match──────────▶ Success
//!   ▲                  │ ──miss, n < max──────▶ Retry ──attempt──▶ Scanning
//!   │                  └─miss, n == max───────▶ Exhausted
//!   └──────────── close_error_modal / enter ◀──────┘
//! ```
//!
//! Every attempt counts, including ones that fail in transport.

use crate::backend::BackendError;
use crate::status::{update_status, Status};
use crate::surface::Surface;
use crate::types::{Recognition, StatusTarget};

pub const DEFAULT_MAX_ATTEMPTS: u32 = 6;

pub const PROMPT: &str = "Position your face in the frame";
pub const SCANNING: &str = "Scanning face...";
pub const EXHAUSTED: &str = "Maximum attempts reached";
pub const CONNECTION_ERROR: &str = "Connection error. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginState {
    Idle,
    /// A recognition request is in flight.
    Scanning,
    /// Matched; waiting for the hand-off to home.
    Success,
    Retry,
    /// Attempts used up. Only an explicit reset leaves this state.
    Exhausted,
}

/// What the kiosk should do after a recognition result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    Recognized { name: String },
    Retry,
    Exhausted,
    ConnectionError,
}

pub struct LoginFlow {
    attempts: u32,
    max_attempts: u32,
    state: LoginState,
}

impl LoginFlow {
    pub fn new(max_attempts: u32) -> Self {
        Self {
            attempts: 0,
            max_attempts: max_attempts.max(1),
            state: LoginState::Idle,
        }
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn state(&self) -> LoginState {
        self.state
    }

    /// Zero the counter and return to `Idle` without touching the status.
    pub fn reset<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        self.attempts = 0;
        self.state = LoginState::Idle;
        surface.set_attempt_counter(0);
    }

    /// Screen entry hook.
    pub fn enter<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        self.reset(surface);
        update_status(surface, StatusTarget::Login, Status::info(PROMPT));
    }

    /// Count a new attempt and show the scanning status.
    ///
    /// Returns `false` (and changes nothing) when the attempts are used up, a
    /// request is still in flight, or a match is being handed off. The caller
    /// issues the recognition request only on `true`.
    pub fn begin_attempt<S: Surface + ?Sized>(&mut self, surface: &mut S) -> bool {
        if self.attempts >= self.max_attempts {
            tracing::debug!(attempts = self.attempts, "login attempts exhausted; ignoring");
            return false;
        }
        if matches!(self.state, LoginState::Scanning | LoginState::Success) {
            tracing::debug!(state = ?self.state, "login attempt ignored");
            return false;
        }

        self.attempts += 1;
        self.state = LoginState::Scanning;
        surface.set_attempt_counter(self.attempts);
        update_status(surface, StatusTarget::Login, Status::info(SCANNING));
        tracing::info!(attempt = self.attempts, max = self.max_attempts, "login attempt");
        true
    }

    /// Interpret the result of the request started by [`begin_attempt`](Self::begin_attempt).
    pub fn resolve<S: Surface + ?Sized>(
        &mut self,
        surface: &mut S,
        result: Result<Recognition, BackendError>,
    ) -> LoginOutcome {
        match result {
            Ok(r) if r.success => {
                let name = r.name.unwrap_or_default();
                tracing::info!(user = %name, confidence = ?r.confidence, "face recognized");
                self.state = LoginState::Success;
                update_status(
                    surface,
                    StatusTarget::Login,
                    Status::success(format!("Welcome back, {name}!")),
                );
                LoginOutcome::Recognized { name }
            }
            Ok(r) => {
                tracing::info!(
                    attempt = self.attempts,
                    reason = r.message.as_deref().unwrap_or("no match"),
                    "face not recognized"
                );
                if self.attempts >= self.max_attempts {
                    self.state = LoginState::Exhausted;
                    update_status(surface, StatusTarget::Login, Status::error(EXHAUSTED));
                    LoginOutcome::Exhausted
                } else {
                    self.state = LoginState::Retry;
                    update_status(
                        surface,
                        StatusTarget::Login,
                        Status::error(format!(
                            "Face not recognized. Try again. ({}/{})",
                            self.attempts, self.max_attempts
                        )),
                    );
                    LoginOutcome::Retry
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "recognition request failed");
                self.state = if self.attempts >= self.max_attempts {
                    LoginState::Exhausted
                } else {
                    LoginState::Retry
                };
                update_status(surface, StatusTarget::Login, Status::error(CONNECTION_ERROR));
                LoginOutcome::ConnectionError
            }
        }
    }

    /// Reset after the error modal is dismissed with its close button.
    /// The caller hides the modal.
    pub fn close_error_modal<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        self.enter(surface);
    }
}

impl Default for LoginFlow {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ATTEMPTS)
    }
}
