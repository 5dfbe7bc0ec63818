use crate::backend::BackendError;
use crate::modal::ClickTarget;
use crate::types::{FeedId, ModalId, Recognition, Registration};

/// Something the user asked for.
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    StartLogin,
    StartRegister,
    BackToWelcome,
    /// Show a screen by element id or name. Unknown ids are ignored.
    ShowScreen(String),
    AttemptLogin,
    /// Replace the contents of the name input.
    SetName(String),
    RegisterFace,
    CloseErrorModal,
    CloseSuccessModal,
    RegisterFromError,
    Click { modal: ModalId, target: ClickTarget },
    DashboardAction(String),
    Logout,
    Quit,
}

/// A timed transition, posted back by the scheduler.
#[derive(Debug, Clone, PartialEq)]
pub enum Deferred {
    StartFeed(FeedId),
    /// Leave login for home after a successful match.
    LoginHandOff { name: String },
    /// Stop the login feed and open the error modal.
    LoginExhausted,
    /// Leave register for welcome after a successful registration.
    RegisterHandOff,
}

/// Everything the kiosk loop reacts to.
#[derive(Debug)]
pub enum Event {
    Intent(Intent),
    Deferred {
        epoch: u64,
        action: Deferred,
    },
    Recognized {
        epoch: u64,
        result: Result<Recognition, BackendError>,
    },
    Registered {
        epoch: u64,
        name: String,
        result: Result<Registration, BackendError>,
    },
}

impl From<Intent> for Event {
    fn from(intent: Intent) -> Self {
        Event::Intent(intent)
    }
}
