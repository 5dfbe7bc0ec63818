//! Line-oriented terminal front end.
//!
//! Display changes are printed to stdout as they happen; each line typed on
//! stdin becomes one or more kiosk intents.

use facegate_core::{
    Backend, ClickTarget, FeedId, Intent, Kiosk, KioskHandle, KioskSettings, ModalId, Screen,
    Status, StatusTarget, Surface,
};
use std::collections::HashSet;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};

const HELP: &str = "\
commands:
  login                 go to the login screen
  register              go to the register screen
  welcome               back to the welcome screen
  show <screen>         show a screen by id (welcomeScreen, loginScreen, ...)
  scan                  attempt a face login
  name <text>           type into the name field
  submit                register the face under the typed name
  enroll <text>         type a name and submit it
  close                 close the error modal and reset attempts
  register-from-error   close the error modal and go to register
  dismiss               close the success modal
  click <modal> [content]  click a modal backdrop (or its content)
  action <label>        press a dashboard button
  logout                log out
  help                  show this help
  quit                  exit";

/// [`Surface`] that prints to a writer.
pub struct TerminalSurface<W: Write> {
    out: W,
    streaming: HashSet<FeedId>,
    name_input: String,
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            streaming: HashSet::new(),
            name_input: String::new(),
        }
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, text: &str) {
        // Nothing useful to do if the terminal is gone.
        let _ = writeln!(self.out, "{text}");
        let _ = self.out.flush();
    }
}

impl<W: Write> Surface for TerminalSurface<W> {
    fn set_screen_active(&mut self, screen: Screen, active: bool) {
        if active {
            self.line(&format!("=== {} ===", screen.name()));
        }
    }

    fn set_video_source(&mut self, feed: FeedId, source: Option<&str>) -> bool {
        match source {
            Some(url) => {
                self.streaming.insert(feed);
                self.line(&format!("[camera] {feed}: {url}"));
            }
            None => {
                if self.streaming.remove(&feed) {
                    self.line(&format!("[camera] {feed}: off"));
                }
            }
        }
        true
    }

    fn render_status(&mut self, _target: StatusTarget, status: &Status) {
        self.line(&format!("[{}] {}", status.kind.as_str(), status.message));
    }

    fn set_modal_visible(&mut self, modal: ModalId, visible: bool) {
        if !visible {
            return;
        }
        match modal {
            ModalId::Error => self.line(
                "[!] Face not recognized. `close` to try again or `register-from-error` to register.",
            ),
            ModalId::Success => self.line("[modal] success"),
        }
    }

    fn set_success_content(&mut self, title: &str, message: &str) {
        self.line(&format!("*** {title} {message}"));
    }

    fn set_attempt_counter(&mut self, count: u32) {
        if count > 0 {
            self.line(&format!("attempt {count}"));
        }
    }

    fn set_user_name(&mut self, name: &str) {
        self.line(&format!("signed in as {name}"));
    }

    fn name_input(&self) -> String {
        self.name_input.clone()
    }

    fn set_name_input(&mut self, value: &str) {
        self.name_input = value.to_string();
    }

    fn focus_name_input(&mut self) {
        self.line("(type `name <your name>` then `submit`)");
    }
}

/// Translate one input line into intents. Blank lines yield nothing.
pub fn parse_command(line: &str) -> Result<Vec<Intent>, String> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((w, r)) => (w, r.trim()),
        None => (line, ""),
    };

    let intents = match word {
        "" => vec![],
        "login" => vec![Intent::StartLogin],
        "register" => vec![Intent::StartRegister],
        "welcome" | "back" => vec![Intent::BackToWelcome],
        "show" if !rest.is_empty() => vec![Intent::ShowScreen(rest.to_string())],
        "scan" => vec![Intent::AttemptLogin],
        "name" => vec![Intent::SetName(rest.to_string())],
        "submit" => vec![Intent::RegisterFace],
        "enroll" => vec![Intent::SetName(rest.to_string()), Intent::RegisterFace],
        "close" => vec![Intent::CloseErrorModal],
        "dismiss" => vec![Intent::CloseSuccessModal],
        "register-from-error" => vec![Intent::RegisterFromError],
        "click" => {
            let mut parts = rest.split_whitespace();
            let modal = parts
                .next()
                .and_then(ModalId::parse)
                .ok_or_else(|| "usage: click <error|success> [content]".to_string())?;
            let target = match parts.next() {
                Some("content") => ClickTarget::Content,
                _ => ClickTarget::Backdrop,
            };
            vec![Intent::Click { modal, target }]
        }
        "action" if !rest.is_empty() => vec![Intent::DashboardAction(rest.to_string())],
        "logout" => vec![Intent::Logout],
        "quit" | "exit" => vec![Intent::Quit],
        _ => return Err(format!("unknown command `{line}`; type `help`")),
    };
    Ok(intents)
}

/// Run an interactive kiosk on stdin/stdout until `quit` or end of input.
pub async fn run<B: Backend>(backend: B, settings: KioskSettings) -> anyhow::Result<()> {
    let kiosk = Kiosk::new(backend, TerminalSurface::new(std::io::stdout()), settings);
    let input = tokio::spawn(read_commands(kiosk.handle()));
    kiosk.run().await;
    input.abort();
    Ok(())
}

async fn read_commands(handle: KioskHandle) {
    println!("{HELP}");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                tracing::warn!(error = %e, "failed to read stdin");
                break;
            }
        };
        if line.trim() == "help" {
            println!("{HELP}");
            continue;
        }
        match parse_command(&line) {
            Ok(intents) => {
                for intent in intents {
                    if handle.send(intent).is_err() {
                        return;
                    }
                }
            }
            Err(msg) => println!("{msg}"),
        }
    }
    let _ = handle.send(Intent::Quit);
}
