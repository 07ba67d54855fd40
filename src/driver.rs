//! Game loop driver
//!
//! Owns one game session and connects it to a [`Scheduler`]: one simulation
//! step and one redraw per animation frame, spawner intervals alongside, and
//! teardown exactly once when the session ends. The simulation itself stays a
//! pure `tick`; everything time- or host-related lives here.

use std::fmt::Debug;

use glam::Vec2;

use crate::platform::{FrameToken, Scheduler, TimerToken};
use crate::renderer::{Canvas, Draw};
use crate::sim::{InputSampler, Key, Outcome, SpawnKind, Spawner};

/// A game the driver can run
pub trait Game {
    /// Overlay values, published only when they change
    type Hud: Clone + PartialEq + Debug;

    fn name(&self) -> &'static str;
    /// Interval spawners to run while the session is active
    fn spawners(&self) -> Vec<Spawner>;
    fn spawn(&mut self, kind: SpawnKind);
    /// Sample input and advance one tick. Returns the outcome once the
    /// session has ended.
    fn step(&mut self, input: &mut InputSampler, now_ms: f64) -> Option<Outcome>;
    fn restart(&mut self);
    fn resize(&mut self, width: f32, height: f32);
    /// Fixed playfield size in pixels; `None` follows the container
    fn fixed_surface(&self) -> Option<(u32, u32)> {
        None
    }
    fn hud(&self) -> Self::Hud;
    fn outcome(&self) -> Option<Outcome>;
    /// Game-specific key bindings that map to a menu command
    fn shortcut(&self, key: Key) -> Option<Command>;
    /// Text for the controls dialog
    fn controls(&self) -> &'static str;
}

/// Menu actions routed into a running game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Restart,
    /// Toggle pause
    Pause,
    ShowControls,
    Exit,
}

/// Something the host has to act on
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Show a modal message
    Alert(String),
    /// Leave the game (back to the shell)
    Exit,
    /// The session just ended
    SessionEnded(Outcome),
}

pub struct Driver<G: Game, S: Scheduler> {
    game: G,
    scheduler: S,
    input: InputSampler,
    frame: Option<FrameToken>,
    timers: Vec<(TimerToken, SpawnKind)>,
    /// Bumped on every session start
    generation: u64,
    running: bool,
    paused: bool,
    last_hud: Option<G::Hud>,
    pending_hud: Option<G::Hud>,
}

impl<G: Game, S: Scheduler> Driver<G, S> {
    pub fn new(game: G, scheduler: S) -> Self {
        Self {
            game,
            scheduler,
            input: InputSampler::new(),
            frame: None,
            timers: Vec::new(),
            generation: 0,
            running: false,
            paused: false,
            last_hud: None,
            pending_hud: None,
        }
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    pub fn game_mut(&mut self) -> &mut G {
        &mut self.game
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.running
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Begin a session: first frame plus spawner intervals
    pub fn start(&mut self) {
        if self.running || self.game.outcome().is_some() {
            return;
        }
        self.generation += 1;
        self.running = true;
        self.paused = false;
        self.schedule();
        self.publish_hud();
        log::info!(
            "{}: session {} started",
            self.game.name(),
            self.generation
        );
    }

    fn schedule(&mut self) {
        self.frame = Some(self.scheduler.request_frame());
        self.timers = self
            .game
            .spawners()
            .into_iter()
            .map(|s| (self.scheduler.start_interval(s.period_ms), s.kind))
            .collect();
    }

    /// Cancel the pending frame and every spawner interval
    fn unschedule(&mut self) {
        if let Some(frame) = self.frame.take() {
            self.scheduler.cancel_frame(frame);
        }
        for (token, _) in self.timers.drain(..) {
            self.scheduler.cancel_interval(token);
        }
    }

    fn teardown(&mut self) {
        self.unschedule();
        self.running = false;
        self.paused = false;
    }

    fn publish_hud(&mut self) {
        let hud = self.game.hud();
        if self.last_hud.as_ref() != Some(&hud) {
            self.last_hud = Some(hud.clone());
            self.pending_hud = Some(hud);
        }
    }

    /// HUD values changed since the last call, if any
    pub fn take_hud(&mut self) -> Option<G::Hud> {
        self.pending_hud.take()
    }

    /// Spawner interval fired
    pub fn on_timer(&mut self, token: TimerToken) {
        let Some(kind) = self
            .timers
            .iter()
            .find(|(t, _)| *t == token)
            .map(|(_, kind)| *kind)
        else {
            log::trace!("{}: stale timer {:?} ignored", self.game.name(), token);
            return;
        };
        if !self.running || self.game.outcome().is_some() {
            return;
        }
        log::debug!("{}: spawn {:?}", self.game.name(), kind);
        self.game.spawn(kind);
    }

    pub fn dispatch(&mut self, command: Command) -> Option<Effect> {
        log::debug!("{}: {:?}", self.game.name(), command);
        match command {
            Command::Restart => {
                self.teardown();
                self.game.restart();
                self.input.clear();
                self.last_hud = None;
                self.start();
                None
            }
            Command::Pause => {
                if !self.running {
                    return None;
                }
                if self.paused {
                    self.paused = false;
                    self.input.clear();
                    self.schedule();
                } else {
                    self.paused = true;
                    self.unschedule();
                    self.input.clear();
                }
                None
            }
            Command::ShowControls => Some(Effect::Alert(self.game.controls().to_string())),
            Command::Exit => {
                self.teardown();
                log::info!("{}: exit", self.game.name());
                Some(Effect::Exit)
            }
        }
    }

    /// Forward a key-down. Game shortcuts are dispatched immediately; while
    /// paused nothing else is recorded.
    pub fn key_down(&mut self, code: &str) -> Option<Effect> {
        let key = if self.paused {
            Key::from_code(code)?
        } else {
            self.input.key_down(code)?
        };
        let command = self.game.shortcut(key)?;
        self.dispatch(command)
    }

    pub fn key_up(&mut self, code: &str) {
        self.input.key_up(code);
    }

    pub fn pointer_move(&mut self, pos: Vec2) {
        self.input.pointer_move(pos);
    }

    pub fn click(&mut self, pos: Vec2) {
        if self.running && !self.paused {
            self.input.click(pos);
        }
    }

    /// Container size changed
    pub fn resize(&mut self, width: f32, height: f32) {
        self.game.resize(width, height);
    }

    /// Canvas size for a container of `width` x `height`. Games with a fixed
    /// playfield keep it; an unsized container yields `None`.
    pub fn surface_size(&self, width: u32, height: u32) -> Option<(u32, u32)> {
        if let Some(fixed) = self.game.fixed_surface() {
            return Some(fixed);
        }
        (width > 0 && height > 0).then_some((width, height))
    }
}

impl<G: Game + Draw, S: Scheduler> Driver<G, S> {
    /// Animation frame fired: step, publish, draw, then reschedule or tear down
    pub fn on_frame(
        &mut self,
        token: FrameToken,
        now_ms: f64,
        canvas: &mut dyn Canvas,
    ) -> Option<Effect> {
        if self.frame != Some(token) {
            log::trace!("{}: stale frame {:?} ignored", self.game.name(), token);
            return None;
        }
        self.frame = None;

        let outcome = self.game.step(&mut self.input, now_ms);
        self.publish_hud();
        self.game.draw(canvas, now_ms);

        match outcome {
            Some(outcome) => {
                self.teardown();
                log::info!(
                    "{}: session {} ended ({:?})",
                    self.game.name(),
                    self.generation,
                    outcome
                );
                Some(Effect::SessionEnded(outcome))
            }
            None => {
                self.frame = Some(self.scheduler.request_frame());
                None
            }
        }
    }

    /// Paint the current state without stepping
    pub fn redraw(&self, canvas: &mut dyn Canvas, now_ms: f64) {
        self.game.draw(canvas, now_ms);
    }

    /// Size the canvas for a container and repaint it
    pub fn fit(&mut self, width: u32, height: u32, canvas: &mut dyn Canvas, now_ms: f64) -> bool {
        let Some((w, h)) = self.surface_size(width, height) else {
            return false;
        };
        canvas.set_size(w, h);
        self.resize(w as f32, h as f32);
        self.redraw(canvas, now_ms);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::ManualScheduler;
    use crate::renderer::DisplayList;
    use crate::sim::{ArenaHud, ArenaState, WaveState};

    fn arena() -> Driver<ArenaState, ManualScheduler> {
        let mut driver = Driver::new(ArenaState::new(42, 600.0, 400.0), ManualScheduler::new());
        driver.start();
        driver
    }

    fn run_frame<G: Game + Draw>(
        driver: &mut Driver<G, ManualScheduler>,
        now_ms: f64,
    ) -> Option<Effect> {
        let token = driver.scheduler_mut().fire_frame()?;
        let mut canvas = DisplayList::new(600.0, 400.0);
        driver.on_frame(token, now_ms, &mut canvas)
    }

    #[test]
    fn start_schedules_frame_and_spawners() {
        let driver = arena();
        assert!(driver.is_running());
        assert_eq!(driver.generation(), 1);
        assert!(driver.scheduler().pending_frame().is_some());
        assert_eq!(driver.scheduler().interval_count(), 2);
    }

    #[test]
    fn one_step_per_frame() {
        let mut driver = arena();
        for i in 0..10 {
            assert_eq!(run_frame(&mut driver, i as f64 * 16.0), None);
        }
        assert_eq!(driver.game().time_ticks, 10);
    }

    #[test]
    fn stale_frame_is_ignored() {
        let mut driver = arena();
        let old = driver.scheduler().pending_frame().unwrap();
        run_frame(&mut driver, 0.0);
        let mut canvas = DisplayList::new(600.0, 400.0);
        driver.on_frame(old, 16.0, &mut canvas);
        assert_eq!(driver.game().time_ticks, 1);
        assert!(canvas.commands.is_empty());
    }

    #[test]
    fn hud_published_only_on_change() {
        let mut driver = arena();
        let first = driver.take_hud();
        assert_eq!(
            first,
            Some(ArenaHud {
                score: 0,
                health: 100,
                charge: 0,
                active: true,
            })
        );
        run_frame(&mut driver, 0.0);
        run_frame(&mut driver, 16.0);
        assert_eq!(driver.take_hud(), None);

        driver.game_mut().player.charge = 10;
        run_frame(&mut driver, 32.0);
        assert_eq!(driver.take_hud().map(|h| h.charge), Some(10));
        assert_eq!(driver.take_hud(), None);
    }

    #[test]
    fn timers_spawn_while_active() {
        let mut driver = arena();
        let due = driver.scheduler_mut().advance_to(2500.0);
        // Enemy at 1200 and 2400, gem at 2500
        assert_eq!(due.len(), 3);
        for token in due {
            driver.on_timer(token);
        }
        assert_eq!(driver.game().enemies.len(), 2);
        assert_eq!(driver.game().gems.len(), 1);
    }

    #[test]
    fn game_over_tears_down_once() {
        let mut driver = arena();
        driver.game_mut().player.health = 2;
        let pos = driver.game().player.pos;
        driver.game_mut().push_enemy(pos, 0.0);

        let effect = run_frame(&mut driver, 0.0);
        assert_eq!(effect, Some(Effect::SessionEnded(Outcome::GameOver)));
        assert!(!driver.is_running());
        assert_eq!(driver.scheduler().pending_frame(), None);
        assert_eq!(driver.scheduler().interval_count(), 0);
        assert_eq!(driver.take_hud().map(|h| h.active), Some(false));

        // Late spawner callback after teardown
        driver.on_timer(TimerToken(2));
        assert_eq!(driver.game().enemies.len(), 1);
        // Starting again is refused until restart
        driver.start();
        assert!(!driver.is_running());
    }

    #[test]
    fn restart_begins_new_generation() {
        let mut driver = arena();
        let old = driver.scheduler().pending_frame().unwrap();
        run_frame(&mut driver, 0.0);
        driver.game_mut().score = 5;

        assert_eq!(driver.dispatch(Command::Restart), None);
        assert_eq!(driver.generation(), 2);
        assert_eq!(driver.game().score, 0);
        assert_eq!(driver.game().time_ticks, 0);
        assert_eq!(driver.scheduler().interval_count(), 2);

        let mut canvas = DisplayList::new(600.0, 400.0);
        driver.on_frame(old, 16.0, &mut canvas);
        assert_eq!(driver.game().time_ticks, 0);
    }

    #[test]
    fn pause_toggles_scheduling() {
        let mut driver = arena();
        driver.dispatch(Command::Pause);
        assert!(driver.is_paused());
        assert_eq!(driver.scheduler().pending_frame(), None);
        assert_eq!(driver.scheduler().interval_count(), 0);

        driver.dispatch(Command::Pause);
        assert!(!driver.is_paused());
        assert!(driver.scheduler().pending_frame().is_some());
        assert_eq!(driver.scheduler().interval_count(), 2);
    }

    #[test]
    fn keys_pressed_while_paused_are_dropped() {
        let mut driver = arena();
        driver.game_mut().player.charge = 100;
        driver.dispatch(Command::Pause);
        driver.key_down("Space");
        driver.key_up("Space");
        driver.key_down("KeyD");
        driver.dispatch(Command::Pause);

        run_frame(&mut driver, 0.0);
        assert!(driver.game().projectiles.is_empty());
        assert_eq!(driver.game().player.charge, 100);
        assert_eq!(driver.game().player.pos.x, 300.0);
    }

    #[test]
    fn quit_key_works_while_paused() {
        let mut driver = Driver::new(WaveState::new(), ManualScheduler::new());
        driver.start();
        driver.dispatch(Command::Pause);
        assert_eq!(driver.key_down("Escape"), Some(Effect::Exit));
        assert!(!driver.is_running());
    }

    #[test]
    fn fit_repaints_finished_session() {
        let mut driver = arena();
        driver.game_mut().player.health = 2;
        let pos = driver.game().player.pos;
        driver.game_mut().push_enemy(pos, 0.0);
        run_frame(&mut driver, 0.0);
        assert!(!driver.is_running());

        let mut canvas = DisplayList::new(600.0, 400.0);
        assert!(driver.fit(1000, 700, &mut canvas, 16.0));
        assert_eq!(canvas.size(), (1000.0, 700.0));
        assert_eq!(driver.game().width, 1000.0);
        assert!(canvas.texts().any(|t| t == "GAME OVER"));
    }

    #[test]
    fn fit_skips_unsized_container() {
        let mut driver = arena();
        let mut canvas = DisplayList::new(600.0, 400.0);
        assert!(!driver.fit(0, 300, &mut canvas, 0.0));
        assert_eq!(canvas.size(), (600.0, 400.0));
        assert_eq!(driver.game().width, 600.0);
    }

    #[test]
    fn wave_surface_ignores_container() {
        let mut driver = Driver::new(WaveState::new(), ManualScheduler::new());
        assert_eq!(driver.surface_size(300, 200), Some((600, 400)));
        assert_eq!(driver.surface_size(0, 0), Some((600, 400)));

        let mut canvas = DisplayList::new(300.0, 200.0);
        assert!(driver.fit(1200, 900, &mut canvas, 0.0));
        assert_eq!(canvas.size(), (600.0, 400.0));
        assert!(!canvas.commands.is_empty());
    }

    #[test]
    fn controls_alert() {
        let mut driver = arena();
        match driver.dispatch(Command::ShowControls) {
            Some(Effect::Alert(text)) => assert!(text.contains("WASD - Move")),
            other => panic!("unexpected {other:?}"),
        }
        // Alerts don't disturb the session
        assert!(driver.is_running());
    }

    #[test]
    fn quit_key_exits_wave_game() {
        let mut driver = Driver::new(WaveState::new(), ManualScheduler::new());
        driver.start();
        assert_eq!(driver.scheduler().interval_count(), 0);
        assert_eq!(driver.key_down("ArrowLeft"), None);
        assert_eq!(driver.key_down("KeyQ"), Some(Effect::Exit));
        assert!(!driver.is_running());
        assert_eq!(driver.scheduler().pending_frame(), None);
    }

    #[test]
    fn clicks_shoot_through_driver() {
        let mut driver = arena();
        driver.click(Vec2::new(500.0, 200.0));
        run_frame(&mut driver, 0.0);
        assert_eq!(driver.game().projectiles.len(), 1);
    }
}
