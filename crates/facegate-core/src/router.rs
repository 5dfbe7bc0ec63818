//! Screen routing.
//!
//! Showing a screen always tears down both camera feeds first, cancels
//! whatever the previous screen had scheduled, and then starts the feed
//! bound to the new screen after a short delay so the stream does not race
//! the show/hide transition. A screen the surface cannot display is not
//! shown at all: screens, feeds and pending work stay as they were.

use crate::backend::Backend;
use crate::event::{Deferred, Event};
use crate::feed::VideoFeeds;
use crate::scheduler::Scheduler;
use crate::surface::Surface;
use crate::types::Screen;
use std::time::Duration;

pub struct ScreenRouter {
    active: Option<Screen>,
    feed_start_delay: Duration,
}

impl ScreenRouter {
    pub fn new(feed_start_delay: Duration) -> Self {
        Self {
            active: None,
            feed_start_delay,
        }
    }

    /// The screen currently carrying the active marker.
    pub fn active(&self) -> Option<Screen> {
        self.active
    }

    /// Make `screen` the only active screen and rewire the camera feeds.
    /// Returns `false`, having changed nothing, when the surface has no
    /// element for `screen`.
    pub fn show<B: Backend, S: Surface + ?Sized>(
        &mut self,
        screen: Screen,
        surface: &mut S,
        feeds: &mut VideoFeeds<B>,
        scheduler: &mut Scheduler<Event>,
    ) -> bool {
        if !surface.has_screen(screen) {
            tracing::warn!(screen = %screen, "screen element missing; nothing changed");
            return false;
        }

        feeds.stop_all(surface);
        scheduler.cancel_all();

        for other in Screen::ALL.into_iter().filter(|s| *s != screen) {
            surface.set_screen_active(other, false);
        }
        surface.set_screen_active(screen, true);
        self.active = Some(screen);
        tracing::info!(screen = %screen, "screen shown");

        if let Some(feed) = screen.feed() {
            let epoch = scheduler.epoch();
            scheduler.schedule(
                self.feed_start_delay,
                Event::Deferred {
                    epoch,
                    action: Deferred::StartFeed(feed),
                },
            );
        }
        true
    }

    /// Like [`show`](Self::show), from an element id or screen name.
    /// Unknown ids change nothing, feeds included. Returns the screen shown.
    pub fn show_by_id<B: Backend, S: Surface + ?Sized>(
        &mut self,
        id: &str,
        surface: &mut S,
        feeds: &mut VideoFeeds<B>,
        scheduler: &mut Scheduler<Event>,
    ) -> Option<Screen> {
        let Some(screen) = Screen::parse(id) else {
            tracing::debug!(id, "unknown screen id ignored");
            return None;
        };
        self.show(screen, surface, feeds, scheduler)
            .then_some(screen)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::MemorySurface;
    use crate::testing::FakeBackend;
    use crate::types::FeedId;
    use tokio::sync::mpsc;

    const DELAY: Duration = Duration::from_millis(100);

    struct Rig {
        backend: FakeBackend,
        surface: MemorySurface,
        feeds: VideoFeeds<FakeBackend>,
        scheduler: Scheduler<Event>,
        rx: mpsc::UnboundedReceiver<Event>,
        router: ScreenRouter,
    }

    impl Rig {
        fn new() -> Self {
            let backend = FakeBackend::default();
            let (tx, rx) = mpsc::unbounded_channel();
            Self {
                feeds: VideoFeeds::new(backend.clone()),
                backend,
                surface: MemorySurface::default(),
                scheduler: Scheduler::new(tx),
                rx,
                router: ScreenRouter::new(DELAY),
            }
        }

        fn show(&mut self, screen: Screen) -> bool {
            self.router
                .show(screen, &mut self.surface, &mut self.feeds, &mut self.scheduler)
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_show_activates_exactly_one_screen() {
        let mut rig = Rig::new();
        rig.show(Screen::Welcome);
        rig.show(Screen::Home);

        assert_eq!(rig.surface.active_screen(), Some(Screen::Home));
        assert_eq!(rig.router.active(), Some(Screen::Home));
    }

    #[tokio::test(start_paused = true)]
    async fn test_login_schedules_feed_start_after_delay() {
        let mut rig = Rig::new();
        rig.show(Screen::Login);

        tokio::time::sleep(DELAY / 2).await;
        assert!(rig.rx.try_recv().is_err());

        tokio::time::sleep(DELAY).await;
        match rig.rx.try_recv().unwrap() {
            Event::Deferred { epoch, action } => {
                assert!(rig.scheduler.is_current(epoch));
                assert_eq!(action, Deferred::StartFeed(FeedId::Login));
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_quick_succession_cancels_first_feed() {
        let mut rig = Rig::new();
        rig.show(Screen::Login);
        rig.show(Screen::Register);

        tokio::time::sleep(DELAY * 3).await;
        match rig.rx.try_recv().unwrap() {
            Event::Deferred { action, .. } => {
                assert_eq!(action, Deferred::StartFeed(FeedId::Register))
            }
            other => panic!("unexpected event: {other:?}"),
        }
        assert!(rig.rx.try_recv().is_err());
        assert_eq!(rig.surface.active_screen(), Some(Screen::Register));
        // Both feeds were stopped by each show, nothing started yet.
        assert!(rig.surface.feed_log.iter().all(|(_, src)| src.is_none()));
        assert_eq!(rig.surface.feed_log.len(), 4);
        assert_eq!(rig.backend.stop_calls(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_welcome_and_home_start_no_feed() {
        let mut rig = Rig::new();
        rig.show(Screen::Welcome);
        rig.show(Screen::Home);

        tokio::time::sleep(DELAY * 3).await;
        assert!(rig.rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_unknown_id_is_noop() {
        let mut rig = Rig::new();
        rig.show(Screen::Welcome);
        let log_len = rig.surface.feed_log.len();

        let shown = rig.router.show_by_id(
            "settingsScreen",
            &mut rig.surface,
            &mut rig.feeds,
            &mut rig.scheduler,
        );

        assert_eq!(shown, None);
        assert_eq!(rig.surface.feed_log.len(), log_len);
        assert_eq!(rig.surface.active_screen(), Some(Screen::Welcome));
    }

    #[tokio::test(start_paused = true)]
    async fn test_missing_screen_element_keeps_current_screen() {
        let mut rig = Rig::new();
        rig.show(Screen::Welcome);
        rig.surface.missing_screens.insert(Screen::Home);
        assert!(!rig.show(Screen::Home));

        assert_eq!(rig.surface.active_screen(), Some(Screen::Welcome));
        assert_eq!(rig.router.active(), Some(Screen::Welcome));
    }

    #[tokio::test(start_paused = true)]
    async fn test_missing_screen_element_leaves_feeds_alone() {
        let mut rig = Rig::new();
        assert!(rig.show(Screen::Register));
        let epoch = rig.scheduler.epoch();
        let log_len = rig.surface.feed_log.len();

        rig.surface.missing_screens.insert(Screen::Login);
        assert!(!rig.show(Screen::Login));
        assert_eq!(
            rig.router.show_by_id(
                "loginScreen",
                &mut rig.surface,
                &mut rig.feeds,
                &mut rig.scheduler,
            ),
            None
        );

        // The register feed start scheduled before is still pending.
        assert_eq!(rig.scheduler.epoch(), epoch);
        tokio::time::sleep(DELAY * 2).await;
        match rig.rx.try_recv().unwrap() {
            Event::Deferred { action, .. } => {
                assert_eq!(action, Deferred::StartFeed(FeedId::Register))
            }
            other => panic!("unexpected event: {other:?}"),
        }
        assert!(rig.rx.try_recv().is_err());
        assert_eq!(rig.surface.feed_log.len(), log_len);
        // Only the two releases from showing register.
        assert_eq!(rig.backend.stop_calls(), 2);
        assert_eq!(rig.surface.active_screen(), Some(Screen::Register));
    }
}
