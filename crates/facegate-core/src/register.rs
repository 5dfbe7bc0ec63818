//! Face registration flow.
//!
//! The server decides why a registration fails (duplicate name, no face in
//! frame, ...); its message is shown verbatim.

use crate::backend::BackendError;
use crate::status::{update_status, Status};
use crate::surface::Surface;
use crate::types::{Registration, StatusTarget};

pub const NAME_REQUIRED: &str = "Please enter your name";
pub const CAPTURING: &str = "Capturing face...";
pub const REGISTERED: &str = "Registration successful!";
pub const SUCCESS_TITLE: &str = "Registration Successful!";
pub const CONNECTION_ERROR: &str = "Connection error. Please try again.";
const FALLBACK_FAILURE: &str = "Registration failed";

/// Body text of the success modal.
pub fn success_message(name: &str) -> String {
    format!("Welcome, {name}! Your face has been registered.")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegisterOutcome {
    Registered,
    Rejected,
    ConnectionError,
}

#[derive(Debug, Default)]
pub struct RegisterFlow {
    in_flight: bool,
}

impl RegisterFlow {
    /// Screen entry hook.
    pub fn enter(&mut self) {
        self.in_flight = false;
    }

    pub fn in_flight(&self) -> bool {
        self.in_flight
    }

    /// Validate the raw name input.
    ///
    /// Returns the trimmed name when a registration request should be sent.
    /// An empty name shows an inline error and focuses the input instead.
    pub fn submit<S: Surface + ?Sized>(&mut self, surface: &mut S, raw: &str) -> Option<String> {
        if self.in_flight {
            tracing::debug!("registration already in flight; ignoring");
            return None;
        }

        let name = raw.trim();
        if name.is_empty() {
            update_status(surface, StatusTarget::Register, Status::error(NAME_REQUIRED));
            surface.focus_name_input();
            return None;
        }

        self.in_flight = true;
        update_status(surface, StatusTarget::Register, Status::info(CAPTURING));
        tracing::info!(user = name, "registration requested");
        Some(name.to_string())
    }

    pub fn resolve<S: Surface + ?Sized>(
        &mut self,
        surface: &mut S,
        name: &str,
        result: Result<Registration, BackendError>,
    ) -> RegisterOutcome {
        self.in_flight = false;
        match result {
            Ok(r) if r.success => {
                tracing::info!(user = name, "face registered");
                update_status(surface, StatusTarget::Register, Status::success(REGISTERED));
                RegisterOutcome::Registered
            }
            Ok(r) => {
                let message = r.message.unwrap_or_else(|| FALLBACK_FAILURE.to_string());
                tracing::info!(user = name, reason = %message, "registration rejected");
                update_status(surface, StatusTarget::Register, Status::error(message));
                RegisterOutcome::Rejected
            }
            Err(e) => {
                tracing::warn!(error = %e, "registration request failed");
                update_status(surface, StatusTarget::Register, Status::error(CONNECTION_ERROR));
                RegisterOutcome::ConnectionError
            }
        }
    }
}
