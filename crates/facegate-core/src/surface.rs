//! Display capability.
//!
//! Controllers never touch a concrete display. They mutate a [`Surface`],
//! which a front end implements (terminal, web view, ...). [`MemorySurface`]
//! keeps everything in memory and is what headless runs and tests use.

use crate::status::Status;
use crate::types::{FeedId, ModalId, Screen, StatusTarget};
use std::collections::{HashMap, HashSet};

/// Everything the kiosk controllers can do to the display.
pub trait Surface {
    /// Whether the screen's container exists on this display.
    fn has_screen(&self, _screen: Screen) -> bool {
        true
    }

    /// Add or remove the active marker on a screen.
    fn set_screen_active(&mut self, screen: Screen, active: bool);

    /// Point a video element at `source`, or clear it with `None`.
    ///
    /// Returns `false` when the element does not exist.
    fn set_video_source(&mut self, feed: FeedId, source: Option<&str>) -> bool;

    fn render_status(&mut self, target: StatusTarget, status: &Status);

    fn set_modal_visible(&mut self, modal: ModalId, visible: bool);

    /// Title and body text of the success modal.
    fn set_success_content(&mut self, title: &str, message: &str);

    fn set_attempt_counter(&mut self, count: u32);

    fn set_user_name(&mut self, name: &str);

    /// Current raw contents of the name input.
    fn name_input(&self) -> String;

    fn set_name_input(&mut self, value: &str);

    fn focus_name_input(&mut self);
}

/// In-memory surface. Records the current display state plus a log of feed
/// source changes so ordering can be inspected.
#[derive(Debug, Default)]
pub struct MemorySurface {
    pub active_screens: HashSet<Screen>,
    /// Screens whose container is absent.
    pub missing_screens: HashSet<Screen>,
    /// Video elements that are absent.
    pub missing_feeds: HashSet<FeedId>,
    pub video_sources: HashMap<FeedId, String>,
    pub feed_log: Vec<(FeedId, Option<String>)>,
    pub statuses: HashMap<StatusTarget, Status>,
    pub status_log: Vec<(StatusTarget, Status)>,
    pub visible_modals: HashSet<ModalId>,
    pub success_title: String,
    pub success_message: String,
    pub attempt_counter: u32,
    pub user_name: String,
    pub name_input: String,
    pub focus_count: u32,
}

impl MemorySurface {
    pub fn status(&self, target: StatusTarget) -> Option<&Status> {
        self.statuses.get(&target)
    }

    pub fn video_source(&self, feed: FeedId) -> Option<&str> {
        self.video_sources.get(&feed).map(String::as_str)
    }

    pub fn is_modal_visible(&self, modal: ModalId) -> bool {
        self.visible_modals.contains(&modal)
    }

    /// The single active screen, or `None` when zero or several are active.
    pub fn active_screen(&self) -> Option<Screen> {
        match self.active_screens.len() {
            1 => self.active_screens.iter().next().copied(),
            _ => None,
        }
    }
}

impl Surface for MemorySurface {
    fn has_screen(&self, screen: Screen) -> bool {
        !self.missing_screens.contains(&screen)
    }

    fn set_screen_active(&mut self, screen: Screen, active: bool) {
        if active {
            self.active_screens.insert(screen);
        } else {
            self.active_screens.remove(&screen);
        }
    }

    fn set_video_source(&mut self, feed: FeedId, source: Option<&str>) -> bool {
        if self.missing_feeds.contains(&feed) {
            return false;
        }
        match source {
            Some(src) => {
                self.video_sources.insert(feed, src.to_string());
            }
            None => {
                self.video_sources.remove(&feed);
            }
        }
        self.feed_log.push((feed, source.map(str::to_string)));
        true
    }

    fn render_status(&mut self, target: StatusTarget, status: &Status) {
        self.statuses.insert(target, status.clone());
        self.status_log.push((target, status.clone()));
    }

    fn set_modal_visible(&mut self, modal: ModalId, visible: bool) {
        if visible {
            self.visible_modals.insert(modal);
        } else {
            self.visible_modals.remove(&modal);
        }
    }

    fn set_success_content(&mut self, title: &str, message: &str) {
        self.success_title = title.to_string();
        self.success_message = message.to_string();
    }

    fn set_attempt_counter(&mut self, count: u32) {
        self.attempt_counter = count;
    }

    fn set_user_name(&mut self, name: &str) {
        self.user_name = name.to_string();
    }

    fn name_input(&self) -> String {
        self.name_input.clone()
    }

    fn set_name_input(&mut self, value: &str) {
        self.name_input = value.to_string();
    }

    fn focus_name_input(&mut self) {
        self.focus_count += 1;
    }
}
