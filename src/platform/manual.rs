use super::{FrameToken, Scheduler, TimerToken};

#[derive(Debug, Clone, Copy, PartialEq)]
struct Interval {
    token: TimerToken,
    period_ms: u32,
    next_due_ms: f64,
}

/// A scheduler driven by hand: frames and timers fire only when the owner
/// asks for them. Deterministic, so tests and headless runs can replay a
/// session exactly.
#[derive(Debug, Clone, Default)]
pub struct ManualScheduler {
    next_token: u64,
    now_ms: f64,
    frames: Vec<FrameToken>,
    intervals: Vec<Interval>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    fn mint(&mut self) -> u64 {
        self.next_token += 1;
        self.next_token
    }

    /// Most recently requested frame still pending
    pub fn pending_frame(&self) -> Option<FrameToken> {
        self.frames.last().copied()
    }

    /// Fire the most recent frame request: it is removed and returned
    pub fn fire_frame(&mut self) -> Option<FrameToken> {
        self.frames.pop()
    }

    /// Remove and return every pending frame request
    pub fn take_frames(&mut self) -> Vec<FrameToken> {
        std::mem::take(&mut self.frames)
    }

    pub fn interval_count(&self) -> usize {
        self.intervals.len()
    }

    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }

    /// Move the clock forward and collect every interval firing up to
    /// `now_ms`, in firing order. An interval overdue by several periods
    /// fires once per period.
    pub fn advance_to(&mut self, now_ms: f64) -> Vec<TimerToken> {
        let mut due = Vec::new();
        if now_ms > self.now_ms {
            self.now_ms = now_ms;
        }
        let now = self.now_ms;
        loop {
            let next = self
                .intervals
                .iter_mut()
                .filter(|i| i.next_due_ms <= now)
                .min_by(|a, b| a.next_due_ms.total_cmp(&b.next_due_ms));
            match next {
                Some(interval) if interval.period_ms > 0 => {
                    interval.next_due_ms += interval.period_ms as f64;
                    due.push(interval.token);
                }
                _ => break,
            }
        }
        due
    }
}

impl Scheduler for ManualScheduler {
    fn request_frame(&mut self) -> FrameToken {
        let token = FrameToken(self.mint());
        self.frames.push(token);
        token
    }

    fn cancel_frame(&mut self, token: FrameToken) {
        self.frames.retain(|t| *t != token);
    }

    fn start_interval(&mut self, period_ms: u32) -> TimerToken {
        let token = TimerToken(self.mint());
        self.intervals.push(Interval {
            token,
            period_ms,
            next_due_ms: self.now_ms + period_ms as f64,
        });
        token
    }

    fn cancel_interval(&mut self, token: TimerToken) {
        self.intervals.retain(|i| i.token != token);
    }
}
