//! Status banner presentation.
//!
//! A status is a message plus a kind; each kind maps to one fixed palette
//! (background, border, text colour) that every front end renders the same way.

use crate::surface::Surface;
use crate::types::StatusTarget;

/// Visual state of a status banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusKind {
    #[default]
    Info,
    Success,
    Error,
}

/// CSS colour triple for a status banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: &'static str,
    pub border: &'static str,
    pub text: &'static str,
}

const INFO_PALETTE: Palette = Palette {
    background: "rgba(10, 14, 39, 0.9)",
    border: "rgba(255, 255, 255, 0.1)",
    text: "#a0aec0",
};

const SUCCESS_PALETTE: Palette = Palette {
    background: "rgba(16, 185, 129, 0.2)",
    border: "#10b981",
    text: "#10b981",
};

const ERROR_PALETTE: Palette = Palette {
    background: "rgba(239, 68, 68, 0.2)",
    border: "#ef4444",
    text: "#ef4444",
};

impl StatusKind {
    pub fn palette(self) -> Palette {
        match self {
            StatusKind::Info => INFO_PALETTE,
            StatusKind::Success => SUCCESS_PALETTE,
            StatusKind::Error => ERROR_PALETTE,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StatusKind::Info => "info",
            StatusKind::Success => "success",
            StatusKind::Error => "error",
        }
    }
}

/// A message shown in a status banner.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Status {
    pub message: String,
    pub kind: StatusKind,
}

impl Status {
    pub fn new(message: impl Into<String>, kind: StatusKind) -> Self {
        Self {
            message: message.into(),
            kind,
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message, StatusKind::Info)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, StatusKind::Success)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, StatusKind::Error)
    }

    pub fn palette(&self) -> Palette {
        self.kind.palette()
    }
}

/// Render `status` into the banner identified by `target`.
pub fn update_status<S: Surface + ?Sized>(surface: &mut S, target: StatusTarget, status: Status) {
    tracing::debug!(
        region = %target,
        kind = status.kind.as_str(),
        message = %status.message,
        "status updated"
    );
    surface.render_status(target, &status);
}
