//! facegate-core — Kiosk controller for face login and registration.
//!
//! Decides which screen is shown, which camera feed is live, and what the
//! status banners and modals say. Recognition itself happens on the server,
//! reached through the [`Backend`] capability; the display is reached through
//! the [`Surface`] capability.

pub mod backend;
pub mod event;
pub mod feed;
pub mod home;
pub mod kiosk;
pub mod login;
pub mod modal;
pub mod register;
pub mod router;
pub mod scheduler;
pub mod status;
pub mod surface;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;

pub use backend::{Backend, BackendError};
pub use event::{Event, Intent};
pub use kiosk::{Kiosk, KioskError, KioskHandle, KioskSettings};
pub use modal::ClickTarget;
pub use status::{Status, StatusKind};
pub use surface::{MemorySurface, Surface};
pub use types::{FeedId, ModalId, Recognition, Registration, Screen, StatusTarget};
