//! Scripted backend for unit tests.

use crate::backend::{Backend, BackendError};
use crate::types::{Recognition, Registration};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct Script {
    recognitions: VecDeque<Result<Recognition, BackendError>>,
    registrations: VecDeque<Result<Registration, BackendError>>,
    recognize_calls: usize,
    register_calls: Vec<String>,
    stop_calls: usize,
    fail_stop: bool,
}

/// Backend that replays queued responses and counts calls.
///
/// An empty queue answers with a transport error.
#[derive(Clone, Default)]
pub struct FakeBackend {
    script: Arc<Mutex<Script>>,
}

impl FakeBackend {
    pub fn push_recognition(&self, r: Result<Recognition, BackendError>) {
        self.script.lock().unwrap().recognitions.push_back(r);
    }

    pub fn push_registration(&self, r: Result<Registration, BackendError>) {
        self.script.lock().unwrap().registrations.push_back(r);
    }

    pub fn fail_stop_camera(&self) {
        self.script.lock().unwrap().fail_stop = true;
    }

    pub fn recognize_calls(&self) -> usize {
        self.script.lock().unwrap().recognize_calls
    }

    pub fn register_calls(&self) -> Vec<String> {
        self.script.lock().unwrap().register_calls.clone()
    }

    pub fn stop_calls(&self) -> usize {
        self.script.lock().unwrap().stop_calls
    }
}

impl Backend for FakeBackend {
    async fn recognize(&self) -> Result<Recognition, BackendError> {
        let mut s = self.script.lock().unwrap();
        s.recognize_calls += 1;
        s.recognitions
            .pop_front()
            .unwrap_or_else(|| Err(BackendError::Transport("no scripted response".into())))
    }

    async fn register(&self, name: &str) -> Result<Registration, BackendError> {
        let mut s = self.script.lock().unwrap();
        s.register_calls.push(name.to_string());
        s.registrations
            .pop_front()
            .unwrap_or_else(|| Err(BackendError::Transport("no scripted response".into())))
    }

    async fn stop_camera(&self) -> Result<(), BackendError> {
        let mut s = self.script.lock().unwrap();
        s.stop_calls += 1;
        if s.fail_stop {
            Err(BackendError::Status(500))
        } else {
            Ok(())
        }
    }

    fn feed_url(&self, token: i64) -> String {
        format!("http://kiosk.test/video_feed?t={token}")
    }
}
