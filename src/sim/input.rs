//! Input sampling
//!
//! The host pushes raw key/pointer events as they arrive; the tick reads the
//! held-key set and drains the queued edge-triggered actions once per frame.

use std::collections::HashSet;

use glam::Vec2;

/// Physical keys the games care about, identified by `KeyboardEvent.code`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    W,
    A,
    S,
    D,
    Q,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Space,
    Enter,
    Escape,
}

impl Key {
    /// Map a physical key code (`"KeyW"`, `"ArrowLeft"`, `"Space"`, ...) to a key
    pub fn from_code(code: &str) -> Option<Self> {
        let key = match code {
            "KeyW" => Key::W,
            "KeyA" => Key::A,
            "KeyS" => Key::S,
            "KeyD" => Key::D,
            "KeyQ" => Key::Q,
            "ArrowUp" => Key::ArrowUp,
            "ArrowDown" => Key::ArrowDown,
            "ArrowLeft" => Key::ArrowLeft,
            "ArrowRight" => Key::ArrowRight,
            "Space" => Key::Space,
            "Enter" | "NumpadEnter" => Key::Enter,
            "Escape" => Key::Escape,
            _ => return None,
        };
        Some(key)
    }
}

/// Held keys, latest pointer position and queued one-shot actions
#[derive(Debug, Clone, Default)]
pub struct InputSampler {
    held: HashSet<Key>,
    pointer: Vec2,
    clicks: Vec<Vec2>,
    presses: Vec<Key>,
}

impl InputSampler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key-down. Auto-repeat events for an already held key do not
    /// queue another press. Returns the mapped key, if any.
    pub fn key_down(&mut self, code: &str) -> Option<Key> {
        let key = Key::from_code(code)?;
        if self.held.insert(key) {
            self.presses.push(key);
        }
        Some(key)
    }

    pub fn key_up(&mut self, code: &str) -> Option<Key> {
        let key = Key::from_code(code)?;
        self.held.remove(&key);
        Some(key)
    }

    pub fn pointer_move(&mut self, pos: Vec2) {
        self.pointer = pos;
    }

    /// A click both moves the pointer and queues a shot
    pub fn click(&mut self, pos: Vec2) {
        self.pointer = pos;
        self.clicks.push(pos);
    }

    #[inline]
    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    /// -1, 0 or +1 depending on which of two opposing keys are held
    pub fn axis(&self, negative: Key, positive: Key) -> f32 {
        let mut v = 0.0;
        if self.is_held(negative) {
            v -= 1.0;
        }
        if self.is_held(positive) {
            v += 1.0;
        }
        v
    }

    #[inline]
    pub fn pointer(&self) -> Vec2 {
        self.pointer
    }

    /// Drain queued click positions (oldest first)
    pub fn take_clicks(&mut self) -> Vec<Vec2> {
        std::mem::take(&mut self.clicks)
    }

    /// Drain queued key presses (oldest first)
    pub fn take_presses(&mut self) -> Vec<Key> {
        std::mem::take(&mut self.presses)
    }

    /// Forget everything (restart, focus loss)
    pub fn clear(&mut self) {
        self.held.clear();
        self.clicks.clear();
        self.presses.clear();
    }
}

/// Gate for actions that may repeat at most once per `period_ms`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cooldown {
    pub period_ms: f64,
    last_fired: Option<f64>,
}

impl Cooldown {
    pub fn new(period_ms: f64) -> Self {
        Self {
            period_ms,
            last_fired: None,
        }
    }

    pub fn ready(&self, now_ms: f64) -> bool {
        match self.last_fired {
            None => true,
            Some(last) => now_ms - last > self.period_ms,
        }
    }

    /// Fire if ready, stamping `now_ms` as the last activation
    pub fn try_fire(&mut self, now_ms: f64) -> bool {
        if self.ready(now_ms) {
            self.last_fired = Some(now_ms);
            true
        } else {
            false
        }
    }

    pub fn reset(&mut self) {
        self.last_fired = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_codes_map() {
        assert_eq!(Key::from_code("KeyW"), Some(Key::W));
        assert_eq!(Key::from_code("Space"), Some(Key::Space));
        assert_eq!(Key::from_code("KeyZ"), None);
    }

    #[test]
    fn repeat_keydown_queues_one_press() {
        let mut input = InputSampler::new();
        input.key_down("Space");
        input.key_down("Space");
        input.key_down("Space");
        assert_eq!(input.take_presses(), vec![Key::Space]);
        assert!(input.is_held(Key::Space));

        input.key_up("Space");
        assert!(!input.is_held(Key::Space));
        input.key_down("Space");
        assert_eq!(input.take_presses(), vec![Key::Space]);
    }

    #[test]
    fn axis_cancels_opposing_keys() {
        let mut input = InputSampler::new();
        input.key_down("KeyA");
        assert_eq!(input.axis(Key::A, Key::D), -1.0);
        input.key_down("KeyD");
        assert_eq!(input.axis(Key::A, Key::D), 0.0);
        input.key_up("KeyA");
        assert_eq!(input.axis(Key::A, Key::D), 1.0);
    }

    #[test]
    fn clicks_drain_in_order() {
        let mut input = InputSampler::new();
        input.click(Vec2::new(1.0, 2.0));
        input.click(Vec2::new(3.0, 4.0));
        assert_eq!(input.pointer(), Vec2::new(3.0, 4.0));
        assert_eq!(
            input.take_clicks(),
            vec![Vec2::new(1.0, 2.0), Vec2::new(3.0, 4.0)]
        );
        assert!(input.take_clicks().is_empty());
    }

    #[test]
    fn cooldown_gates_repeats() {
        let mut cd = Cooldown::new(300.0);
        assert!(cd.try_fire(1000.0));
        assert!(!cd.try_fire(1200.0));
        // Must be strictly longer than the period
        assert!(!cd.try_fire(1300.0));
        assert!(cd.try_fire(1300.5));
        cd.reset();
        assert!(cd.try_fire(1301.0));
    }
}
