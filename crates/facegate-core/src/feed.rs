//! Camera feed lifecycle.
//!
//! Each video element either shows the server's live stream or nothing.
//! Stopping a feed always asks the server to release the camera; that
//! request is advisory and its failure is only logged.

use crate::backend::Backend;
use crate::surface::Surface;
use crate::types::FeedId;
use std::collections::HashMap;

/// Per-element feed state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VideoFeedState {
    pub active: bool,
    /// Stream URL currently assigned, `None` when stopped.
    pub source: Option<String>,
}

/// Starts and stops the kiosk's video feeds.
pub struct VideoFeeds<B> {
    backend: B,
    feeds: HashMap<FeedId, VideoFeedState>,
}

impl<B: Backend> VideoFeeds<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            feeds: HashMap::new(),
        }
    }

    /// Point `feed` at a fresh stream URL. Returns `false` (and changes
    /// nothing) when the video element does not exist.
    pub fn start<S: Surface + ?Sized>(&mut self, surface: &mut S, feed: FeedId) -> bool {
        let token = chrono::Utc::now().timestamp_millis();
        let url = self.backend.feed_url(token);
        if !surface.set_video_source(feed, Some(&url)) {
            tracing::debug!(feed = %feed, "video element missing; feed not started");
            return false;
        }
        tracing::info!(feed = %feed, url = %url, "video feed started");
        self.feeds.insert(
            feed,
            VideoFeedState {
                active: true,
                source: Some(url),
            },
        );
        true
    }

    /// Clear `feed` and ask the server to release the camera.
    ///
    /// Safe to call on a stopped feed. The release request is sent even
    /// when the video element does not exist.
    pub fn stop<S: Surface + ?Sized>(&mut self, surface: &mut S, feed: FeedId) {
        if surface.set_video_source(feed, None) {
            let was_active = self
                .feeds
                .insert(feed, VideoFeedState::default())
                .is_some_and(|s| s.active);
            if was_active {
                tracing::info!(feed = %feed, "video feed stopped");
            }
        }
        self.release_camera();
    }

    /// Stop every known feed.
    pub fn stop_all<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        for feed in FeedId::ALL {
            self.stop(surface, feed);
        }
    }

    /// Whether any feed is currently showing the stream.
    pub fn is_active(&self) -> bool {
        self.feeds.values().any(|s| s.active)
    }

    pub fn is_feed_active(&self, feed: FeedId) -> bool {
        self.feeds.get(&feed).is_some_and(|s| s.active)
    }

    pub fn state(&self, feed: FeedId) -> VideoFeedState {
        self.feeds.get(&feed).cloned().unwrap_or_default()
    }

    /// Clear every feed and wait for the camera release. Used on exit,
    /// when a spawned release might not get to run.
    pub async fn shutdown<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        for feed in FeedId::ALL {
            if surface.set_video_source(feed, None) {
                self.feeds.insert(feed, VideoFeedState::default());
            }
        }
        if let Err(e) = self.backend.stop_camera().await {
            tracing::debug!(error = %e, "camera release failed; ignoring");
        }
    }

    fn release_camera(&self) {
        let backend = self.backend.clone();
        tokio::spawn(async move {
            if let Err(e) = backend.stop_camera().await {
                tracing::debug!(error = %e, "camera release failed; ignoring");
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::MemorySurface;
    use crate::testing::FakeBackend;

    async fn drain() {
        for _ in 0..8 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test]
    async fn test_start_sets_timestamped_source() {
        let mut surface = MemorySurface::default();
        let mut feeds = VideoFeeds::new(FakeBackend::default());

        assert!(feeds.start(&mut surface, FeedId::Login));
        assert!(feeds.is_active());
        assert!(feeds.is_feed_active(FeedId::Login));
        assert!(!feeds.is_feed_active(FeedId::Register));

        let src = surface.video_source(FeedId::Login).unwrap();
        assert!(src.starts_with("http://kiosk.test/video_feed?t="));
        assert_eq!(feeds.state(FeedId::Login).source.as_deref(), Some(src));
    }

    #[tokio::test]
    async fn test_start_missing_element_is_noop() {
        let mut surface = MemorySurface::default();
        surface.missing_feeds.insert(FeedId::Register);
        let mut feeds = VideoFeeds::new(FakeBackend::default());

        assert!(!feeds.start(&mut surface, FeedId::Register));
        assert!(!feeds.is_active());
        assert!(surface.feed_log.is_empty());
    }

    #[tokio::test]
    async fn test_stop_clears_source_and_releases_camera() {
        let backend = FakeBackend::default();
        let mut surface = MemorySurface::default();
        let mut feeds = VideoFeeds::new(backend.clone());

        feeds.start(&mut surface, FeedId::Login);
        feeds.stop(&mut surface, FeedId::Login);
        drain().await;

        assert!(!feeds.is_active());
        assert_eq!(surface.video_source(FeedId::Login), None);
        assert_eq!(feeds.state(FeedId::Login), VideoFeedState::default());
        assert_eq!(backend.stop_calls(), 1);
    }

    #[tokio::test]
    async fn test_stop_is_idempotent_and_always_releases() {
        let backend = FakeBackend::default();
        let mut surface = MemorySurface::default();
        surface.missing_feeds.insert(FeedId::Register);
        let mut feeds = VideoFeeds::new(backend.clone());

        feeds.stop(&mut surface, FeedId::Login);
        feeds.stop(&mut surface, FeedId::Login);
        feeds.stop(&mut surface, FeedId::Register);
        drain().await;

        assert!(!feeds.is_active());
        assert_eq!(backend.stop_calls(), 3);
    }

    #[tokio::test]
    async fn test_release_failure_is_swallowed() {
        let backend = FakeBackend::default();
        backend.fail_stop_camera();
        let mut surface = MemorySurface::default();
        let mut feeds = VideoFeeds::new(backend.clone());

        feeds.start(&mut surface, FeedId::Register);
        feeds.stop_all(&mut surface);
        drain().await;

        assert_eq!(backend.stop_calls(), 2);
        assert!(!feeds.is_active());
    }
}
