//! Fake terminal
//!
//! A line-oriented shell with a fixed command table, input history and a
//! clock-paced speed test. `invaders` hands the terminal over to the wave
//! game until the game exits.

pub mod commands;
pub mod speedtest;

pub use commands::{Builtin, UnknownCommand, lookup};
pub use speedtest::SpeedTest;

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LineKind {
    /// Echo of what the user typed
    Command,
    Response,
    Error,
    System,
}

/// A colored run of text (logo art)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Segment {
    pub text: String,
    /// Theme color name
    pub color: &'static str,
}

impl Segment {
    pub fn new(text: impl Into<String>, color: &'static str) -> Self {
        Self {
            text: text.into(),
            color,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputLine {
    pub kind: LineKind,
    pub content: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub segments: Vec<Segment>,
}

impl OutputLine {
    fn with_kind(kind: LineKind, content: impl Into<String>) -> Self {
        Self {
            kind,
            content: content.into(),
            segments: Vec::new(),
        }
    }

    pub fn command(content: impl Into<String>) -> Self {
        Self::with_kind(LineKind::Command, content)
    }

    pub fn response(content: impl Into<String>) -> Self {
        Self::with_kind(LineKind::Response, content)
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self::with_kind(LineKind::Error, content)
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::with_kind(LineKind::System, content)
    }

    pub fn colored(segments: Vec<Segment>) -> Self {
        Self {
            kind: LineKind::Response,
            content: String::new(),
            segments,
        }
    }
}

/// Wall clock as seen by the shell
pub trait Clock {
    /// Milliseconds on the host's monotonic-ish clock
    fn now_ms(&self) -> f64;
    /// Current date and time formatted for display (`18.10.2026, 14:03:00`)
    fn local_string(&self) -> String;
}

/// A clock that always reads the same (tests, headless runs)
#[derive(Debug, Clone, Default)]
pub struct FixedClock {
    pub now_ms: f64,
    pub local: String,
}

impl Clock for FixedClock {
    fn now_ms(&self) -> f64 {
        self.now_ms
    }

    fn local_string(&self) -> String {
        self.local.clone()
    }
}

/// What the host should do after a submit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellAction {
    /// Nothing beyond re-rendering the output
    None,
    /// Swap the terminal view for the wave game
    LaunchInvaders,
}

#[derive(Debug, Clone)]
pub struct Shell {
    output: Vec<OutputLine>,
    input: String,
    history: Vec<String>,
    /// Steps back from the newest history entry; `None` while editing fresh input
    history_index: Option<usize>,
    speedtest: Option<SpeedTest>,
    in_game: bool,
    rng: Pcg32,
}

impl Shell {
    pub fn new(seed: u64) -> Self {
        Self {
            output: vec![
                OutputLine::system("MatthiasOS Terminal v2.0"),
                OutputLine::system("Tippe 'hilfe' für verfügbare Befehle."),
                OutputLine::system(""),
            ],
            input: String::new(),
            history: Vec::new(),
            history_index: None,
            speedtest: None,
            in_game: false,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn output(&self) -> &[OutputLine] {
        &self.output
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, input: impl Into<String>) {
        self.input = input.into();
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }

    pub fn in_game(&self) -> bool {
        self.in_game
    }

    pub fn is_speedtest_running(&self) -> bool {
        self.speedtest.is_some()
    }

    /// Enter pressed: run whatever is in the input line
    pub fn submit(&mut self, clock: &dyn Clock) -> ShellAction {
        let raw = std::mem::take(&mut self.input);
        self.execute(&raw, clock)
    }

    /// Run a command line. Blank input is ignored.
    pub fn execute(&mut self, raw: &str, clock: &dyn Clock) -> ShellAction {
        let line = raw.trim().to_lowercase();
        if line.is_empty() {
            return ShellAction::None;
        }
        self.history.push(line.clone());
        self.history_index = None;

        let builtin = match lookup(&line) {
            Ok(builtin) => builtin,
            Err(err) => {
                log::debug!("shell: {err}");
                self.output.push(OutputLine::command(raw));
                self.output.push(OutputLine::error(format!("  {err}")));
                return ShellAction::None;
            }
        };

        match builtin {
            Builtin::Clear => {
                self.output.clear();
                ShellAction::None
            }
            Builtin::Invaders => {
                self.in_game = true;
                log::info!("shell: launching invaders");
                ShellAction::LaunchInvaders
            }
            Builtin::Speedtest => {
                self.output.push(OutputLine::command(raw));
                if self.speedtest.is_some() {
                    self.output
                        .push(OutputLine::response("  Speedtest läuft bereits..."));
                } else {
                    let (test, banner) = SpeedTest::start(clock.now_ms());
                    self.output.extend(banner);
                    self.speedtest = Some(test);
                }
                ShellAction::None
            }
            table => {
                self.output.push(OutputLine::command(raw));
                self.output.extend(table.output(clock));
                ShellAction::None
            }
        }
    }

    /// Feed the clock to a running speed test. Returns true if output changed.
    pub fn advance(&mut self, now_ms: f64) -> bool {
        let Some(test) = self.speedtest.as_mut() else {
            return false;
        };
        let lines = test.advance(now_ms, &mut self.rng);
        let changed = !lines.is_empty();
        self.output.extend(lines);
        if test.is_done() {
            self.speedtest = None;
        }
        changed
    }

    /// The wave game exited; back to the prompt
    pub fn exit_game(&mut self) {
        self.in_game = false;
    }

    /// ArrowUp: step back through history into the input line
    pub fn history_up(&mut self) {
        let len = self.history.len();
        let next = self.history_index.map_or(0, |i| i + 1);
        if next < len {
            self.history_index = Some(next);
            self.input = self.history[len - 1 - next].clone();
        }
    }

    /// ArrowDown: step forward; past the newest entry the input clears
    pub fn history_down(&mut self) {
        match self.history_index {
            Some(i) if i > 0 => {
                self.history_index = Some(i - 1);
                self.input = self.history[self.history.len() - i].clone();
            }
            _ => {
                self.history_index = None;
                self.input.clear();
            }
        }
    }

    /// Route a terminal key press (`KeyboardEvent.key`). Returns the action for Enter.
    pub fn key(&mut self, key: &str, clock: &dyn Clock) -> ShellAction {
        match key {
            "Enter" => return self.submit(clock),
            "ArrowUp" => self.history_up(),
            "ArrowDown" => self.history_down(),
            _ => {}
        }
        ShellAction::None
    }
}
