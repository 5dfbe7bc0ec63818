//! The kiosk event loop.
//!
//! A [`Kiosk`] owns every controller and processes one [`Event`] at a time.
//! Server requests run as spawned tasks and report back through the same
//! channel, so the loop never blocks on the network. Request completions and
//! deferred actions carry the screen epoch they were issued in and are
//! dropped once the user has navigated elsewhere.

use crate::backend::{Backend, BackendError};
use crate::event::{Deferred, Event, Intent};
use crate::feed::VideoFeeds;
use crate::home::HomeFlow;
use crate::login::{LoginFlow, LoginOutcome, DEFAULT_MAX_ATTEMPTS};
use crate::modal::ModalController;
use crate::register::{self, RegisterFlow, RegisterOutcome};
use crate::router::ScreenRouter;
use crate::scheduler::Scheduler;
use crate::surface::Surface;
use crate::types::{FeedId, ModalId, Recognition, Registration, Screen};
use std::time::Duration;
use thiserror::Error;
use tokio::sync::mpsc;

#[derive(Error, Debug)]
pub enum KioskError {
    #[error("kiosk loop exited")]
    Closed,
}

/// Attempt limit and the fixed delays of the timed transitions.
#[derive(Debug, Clone)]
pub struct KioskSettings {
    pub max_attempts: u32,
    /// Between showing a screen and starting its camera feed.
    pub feed_start_delay: Duration,
    /// Between a successful match and the move to home.
    pub login_success_delay: Duration,
    /// Between the last failed attempt and the error modal.
    pub exhausted_delay: Duration,
    /// Between a successful registration and the return to welcome.
    pub register_success_delay: Duration,
}

impl Default for KioskSettings {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            feed_start_delay: Duration::from_millis(100),
            login_success_delay: Duration::from_millis(1500),
            exhausted_delay: Duration::from_millis(1000),
            register_success_delay: Duration::from_millis(2500),
        }
    }
}

/// Clone-safe handle for feeding intents into a running kiosk.
#[derive(Clone)]
pub struct KioskHandle {
    tx: mpsc::UnboundedSender<Event>,
}

impl KioskHandle {
    pub fn send(&self, intent: Intent) -> Result<(), KioskError> {
        self.tx
            .send(Event::Intent(intent))
            .map_err(|_| KioskError::Closed)
    }
}

pub struct Kiosk<B: Backend, S: Surface> {
    backend: B,
    surface: S,
    settings: KioskSettings,
    router: ScreenRouter,
    feeds: VideoFeeds<B>,
    modals: ModalController,
    scheduler: Scheduler<Event>,
    login: LoginFlow,
    register: RegisterFlow,
    home: HomeFlow,
    tx: mpsc::UnboundedSender<Event>,
    rx: mpsc::UnboundedReceiver<Event>,
}

impl<B: Backend, S: Surface> Kiosk<B, S> {
    pub fn new(backend: B, surface: S, settings: KioskSettings) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            feeds: VideoFeeds::new(backend.clone()),
            backend,
            surface,
            router: ScreenRouter::new(settings.feed_start_delay),
            modals: ModalController::default(),
            scheduler: Scheduler::new(tx.clone()),
            login: LoginFlow::new(settings.max_attempts),
            register: RegisterFlow::default(),
            home: HomeFlow::default(),
            settings,
            tx,
            rx,
        }
    }

    pub fn handle(&self) -> KioskHandle {
        KioskHandle {
            tx: self.tx.clone(),
        }
    }

    /// Show the welcome screen. Must run inside a tokio runtime.
    pub fn boot(&mut self) {
        tracing::info!(max_attempts = self.login.max_attempts(), "kiosk starting");
        self.navigate(Screen::Welcome);
    }

    /// Boot, then process events until [`Intent::Quit`]. Returns the surface.
    pub async fn run(mut self) -> S {
        self.boot();
        while let Some(event) = self.rx.recv().await {
            if !self.dispatch(event) {
                break;
            }
        }
        self.scheduler.cancel_all();
        self.feeds.shutdown(&mut self.surface).await;
        tracing::info!("kiosk stopped");
        self.surface
    }

    /// Process a single event. Returns `false` when the kiosk should stop.
    pub fn dispatch(&mut self, event: Event) -> bool {
        match event {
            Event::Intent(intent) => return self.on_intent(intent),
            Event::Deferred { epoch, action } => {
                if self.scheduler.is_current(epoch) {
                    self.on_deferred(action);
                } else {
                    tracing::debug!(?action, "stale deferred action dropped");
                }
            }
            Event::Recognized { epoch, result } => {
                if self.scheduler.is_current(epoch) {
                    self.on_recognized(result);
                } else {
                    tracing::debug!("recognition result for a previous screen dropped");
                }
            }
            Event::Registered {
                epoch,
                name,
                result,
            } => {
                if self.scheduler.is_current(epoch) {
                    self.on_registered(&name, result);
                } else {
                    tracing::debug!(user = %name, "registration result for a previous screen dropped");
                }
            }
        }
        true
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn screen(&self) -> Option<Screen> {
        self.router.active()
    }

    pub fn login(&self) -> &LoginFlow {
        &self.login
    }

    pub fn home(&self) -> &HomeFlow {
        &self.home
    }

    pub fn feeds(&self) -> &VideoFeeds<B> {
        &self.feeds
    }

    pub fn modals(&self) -> &ModalController {
        &self.modals
    }

    fn on_intent(&mut self, intent: Intent) -> bool {
        tracing::debug!(?intent, "intent");
        match intent {
            Intent::StartLogin => {
                self.navigate(Screen::Login);
            }
            Intent::StartRegister => {
                self.navigate(Screen::Register);
            }
            Intent::BackToWelcome => {
                self.navigate(Screen::Welcome);
            }
            Intent::ShowScreen(id) => {
                if let Some(screen) = self.router.show_by_id(
                    &id,
                    &mut self.surface,
                    &mut self.feeds,
                    &mut self.scheduler,
                ) {
                    self.enter(screen);
                }
            }
            Intent::AttemptLogin => {
                if self.router.active() != Some(Screen::Login) {
                    tracing::debug!("login attempt outside the login screen ignored");
                } else if self.login.begin_attempt(&mut self.surface) {
                    self.request_recognition();
                }
            }
            Intent::SetName(value) => self.surface.set_name_input(&value),
            Intent::RegisterFace => {
                if self.router.active() != Some(Screen::Register) {
                    tracing::debug!("registration outside the register screen ignored");
                } else {
                    let raw = self.surface.name_input();
                    if let Some(name) = self.register.submit(&mut self.surface, &raw) {
                        self.request_registration(name);
                    }
                }
            }
            Intent::CloseErrorModal => {
                self.close_error_modal();
            }
            Intent::CloseSuccessModal => self.modals.hide(&mut self.surface, ModalId::Success),
            Intent::RegisterFromError => {
                if self.close_error_modal() {
                    self.navigate(Screen::Register);
                }
            }
            Intent::Click { modal, target } => {
                self.modals.click(&mut self.surface, modal, target);
            }
            Intent::DashboardAction(label) => self.home.action(&label),
            Intent::Logout => {
                self.home.logout();
                self.navigate(Screen::Welcome);
            }
            Intent::Quit => return false,
        }
        true
    }

    fn on_deferred(&mut self, action: Deferred) {
        match action {
            Deferred::StartFeed(feed) => {
                self.feeds.start(&mut self.surface, feed);
            }
            Deferred::LoginHandOff { name } => {
                self.feeds.stop(&mut self.surface, FeedId::Login);
                if self.navigate(Screen::Home) {
                    self.home.enter(&mut self.surface, &name);
                }
            }
            Deferred::LoginExhausted => {
                self.feeds.stop(&mut self.surface, FeedId::Login);
                self.modals.show(&mut self.surface, ModalId::Error);
            }
            Deferred::RegisterHandOff => {
                self.surface.set_name_input("");
                self.modals.hide(&mut self.surface, ModalId::Success);
                self.feeds.stop(&mut self.surface, FeedId::Register);
                self.navigate(Screen::Welcome);
            }
        }
    }

    fn on_recognized(&mut self, result: Result<Recognition, BackendError>) {
        match self.login.resolve(&mut self.surface, result) {
            LoginOutcome::Recognized { name } => {
                self.home.sign_in(&name);
                self.defer(
                    self.settings.login_success_delay,
                    Deferred::LoginHandOff { name },
                );
            }
            LoginOutcome::Exhausted => {
                self.defer(self.settings.exhausted_delay, Deferred::LoginExhausted);
            }
            LoginOutcome::Retry | LoginOutcome::ConnectionError => {}
        }
    }

    fn on_registered(&mut self, name: &str, result: Result<Registration, BackendError>) {
        if self.register.resolve(&mut self.surface, name, result) == RegisterOutcome::Registered {
            self.modals.show_success(
                &mut self.surface,
                register::SUCCESS_TITLE,
                &register::success_message(name),
            );
            self.defer(
                self.settings.register_success_delay,
                Deferred::RegisterHandOff,
            );
        }
    }

    /// Show `screen` and run its entry hook. Returns `false` when the
    /// surface cannot show it, in which case nothing ran.
    fn navigate(&mut self, screen: Screen) -> bool {
        let shown = self.router.show(
            screen,
            &mut self.surface,
            &mut self.feeds,
            &mut self.scheduler,
        );
        if shown {
            self.enter(screen);
        }
        shown
    }

    /// Per-screen entry hooks. Home is entered by the login hand-off, which
    /// knows the name to display.
    fn enter(&mut self, screen: Screen) {
        match screen {
            Screen::Login => self.login.enter(&mut self.surface),
            Screen::Register => self.register.enter(),
            Screen::Welcome => self.login.reset(&mut self.surface),
            Screen::Home => {}
        }
    }

    /// Buttons of the error modal. Does nothing unless the modal is
    /// showing, so a match being handed off cannot be reset.
    fn close_error_modal(&mut self) -> bool {
        if !self.modals.is_visible(ModalId::Error) {
            tracing::debug!("error modal not shown; close ignored");
            return false;
        }
        self.modals.hide(&mut self.surface, ModalId::Error);
        self.login.close_error_modal(&mut self.surface);
        true
    }

    fn defer(&mut self, delay: Duration, action: Deferred) {
        let epoch = self.scheduler.epoch();
        self.scheduler
            .schedule(delay, Event::Deferred { epoch, action });
    }

    fn request_recognition(&self) {
        let backend = self.backend.clone();
        let tx = self.tx.clone();
        let epoch = self.scheduler.epoch();
        tokio::spawn(async move {
            let result = backend.recognize().await;
            let _ = tx.send(Event::Recognized { epoch, result });
        });
    }

    fn request_registration(&self, name: String) {
        let backend = self.backend.clone();
        let tx = self.tx.clone();
        let epoch = self.scheduler.epoch();
        tokio::spawn(async move {
            let result = backend.register(&name).await;
            let _ = tx.send(Event::Registered {
                epoch,
                name,
                result,
            });
        });
    }
}
