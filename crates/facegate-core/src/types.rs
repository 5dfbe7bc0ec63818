use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the kiosk's screens. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Screen {
    Welcome,
    Login,
    Register,
    Home,
}

impl Screen {
    pub const ALL: [Screen; 4] = [Screen::Welcome, Screen::Login, Screen::Register, Screen::Home];

    /// Element id of the screen container (e.g. `loginScreen`).
    pub fn element_id(self) -> &'static str {
        match self {
            Screen::Welcome => "welcomeScreen",
            Screen::Login => "loginScreen",
            Screen::Register => "registerScreen",
            Screen::Home => "homeScreen",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Screen::Welcome => "welcome",
            Screen::Login => "login",
            Screen::Register => "register",
            Screen::Home => "home",
        }
    }

    /// The camera feed bound to this screen, if any.
    pub fn feed(self) -> Option<FeedId> {
        match self {
            Screen::Login => Some(FeedId::Login),
            Screen::Register => Some(FeedId::Register),
            Screen::Welcome | Screen::Home => None,
        }
    }

    /// Parse a screen from its element id or short name.
    ///
    /// Returns `None` for anything that is not one of the four screens.
    pub fn parse(id: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|s| s.element_id() == id || s.name() == id)
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A video element that can show the server's camera stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FeedId {
    Login,
    Register,
}

impl FeedId {
    pub const ALL: [FeedId; 2] = [FeedId::Login, FeedId::Register];

    pub fn element_id(self) -> &'static str {
        match self {
            FeedId::Login => "videoFeed",
            FeedId::Register => "registerVideoFeed",
        }
    }
}

impl fmt::Display for FeedId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.element_id())
    }
}

/// A status banner region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusTarget {
    Login,
    Register,
}

impl StatusTarget {
    pub fn element_id(self) -> &'static str {
        match self {
            StatusTarget::Login => "statusMessage",
            StatusTarget::Register => "registerStatus",
        }
    }
}

impl fmt::Display for StatusTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.element_id())
    }
}

/// A named overlay panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModalId {
    Error,
    Success,
}

impl ModalId {
    pub fn element_id(self) -> &'static str {
        match self {
            ModalId::Error => "errorModal",
            ModalId::Success => "successModal",
        }
    }

    pub fn parse(id: &str) -> Option<Self> {
        match id {
            "error" | "errorModal" => Some(ModalId::Error),
            "success" | "successModal" => Some(ModalId::Success),
            _ => None,
        }
    }
}

impl fmt::Display for ModalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.element_id())
    }
}

/// Response body of `GET /recognize`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recognition {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Match confidence reported by the server on success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    /// Server-side reason on failure (e.g. "No face detected").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Recognition {
    pub fn matched(name: impl Into<String>) -> Self {
        Self {
            success: true,
            name: Some(name.into()),
            confidence: None,
            message: None,
        }
    }

    pub fn unknown() -> Self {
        Self {
            success: false,
            name: None,
            confidence: None,
            message: None,
        }
    }
}

/// Request body of `POST /register`.
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest<'a> {
    pub name: &'a str,
}

/// Response body of `POST /register`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Registration {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Registration {
    pub fn accepted() -> Self {
        Self {
            success: true,
            message: None,
        }
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
        }
    }
}
