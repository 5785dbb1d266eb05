use embassy_time::{Duration, Instant};

use crate::color::{Rgb, blend8, blend_colors, progress8};
use crate::scheduler::elapsed_between;

/// Interpolates between two values of `T` given a 0-255 progress
pub type Blend<T> = fn(T, T, u8) -> T;

/// Time based interpolation between two values
#[derive(Debug, Clone)]
pub struct ValueTransition<T: Copy> {
    blend: Blend<T>,
    current: T,
    source: T,
    /// `None` when settled
    target: Option<T>,
    duration: Duration,
    started_at: Instant,
}

impl<T: Copy> ValueTransition<T> {
    pub const fn new(initial: T, blend: Blend<T>) -> Self {
        Self {
            blend,
            current: initial,
            source: initial,
            target: None,
            duration: Duration::from_millis(0),
            started_at: Instant::from_millis(0),
        }
    }

    pub const fn current(&self) -> T {
        self.current
    }

    /// Value the transition is heading to
    pub fn target(&self) -> T {
        self.target.unwrap_or(self.current)
    }

    pub const fn is_transitioning(&self) -> bool {
        self.target.is_some()
    }

    /// Move from the current value to `value` over `duration`
    pub fn set(&mut self, value: T, duration: Duration, now: Instant) {
        self.set_from(self.current, value, duration, now);
    }

    /// Move from an explicit `source` to `value` over `duration`.
    ///
    /// A zero duration jumps straight to `value`.
    pub fn set_from(&mut self, source: T, value: T, duration: Duration, now: Instant) {
        self.started_at = now;
        if duration.as_millis() == 0 {
            self.snap(value);
            return;
        }
        self.current = source;
        self.source = source;
        self.target = Some(value);
        self.duration = duration;
    }

    /// Jump to `value`, cancelling any transition in progress
    pub fn snap(&mut self, value: T) {
        self.current = value;
        self.source = value;
        self.target = None;
        self.duration = Duration::from_millis(0);
    }

    /// Advance the interpolation to `now`
    pub fn tick(&mut self, now: Instant) {
        let Some(target) = self.target else {
            return;
        };

        let elapsed = elapsed_between(self.started_at, now);
        if elapsed >= self.duration {
            self.snap(target);
            return;
        }

        let progress = progress8(elapsed, self.duration);
        self.current = (self.blend)(self.source, target, progress);
    }
}

impl ValueTransition<u8> {
    pub const fn new_u8(initial: u8) -> Self {
        Self::new(initial, blend8)
    }
}

impl ValueTransition<Rgb> {
    pub const fn new_rgb(initial: Rgb) -> Self {
        Self::new(initial, blend_colors)
    }
}
