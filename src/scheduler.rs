//! Tick pacing for the sensor and render loops.
//!
//! The controller is driven by a single `tick(now)` call. Each loop keeps its own
//! deadline and reports when it is due; the caller sleeps for the returned duration.

use embassy_time::{Duration, Instant};

/// Default sensor sampling period (50 Hz)
pub const DEFAULT_SENSOR_PERIOD: Duration = Duration::from_millis(20);

/// Default LED refresh period (20 Hz)
pub const DEFAULT_RENDER_PERIOD: Duration = Duration::from_millis(50);

/// Time from `since` to `now`, zero if `now` is earlier
#[inline]
pub fn elapsed_between(since: Instant, now: Instant) -> Duration {
    Duration::from_millis(now.as_millis().saturating_sub(since.as_millis()))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedulerConfig {
    pub sensor_period: Duration,
    pub render_period: Duration,
}

impl SchedulerConfig {
    pub const DEFAULT: Self = Self {
        sensor_period: DEFAULT_SENSOR_PERIOD,
        render_period: DEFAULT_RENDER_PERIOD,
    };
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Outcome of one controller tick
#[derive(Debug, Clone, Copy)]
pub struct TickResult {
    /// A sensor sample was taken this tick
    pub sampled: bool,
    /// The LEDs were refreshed this tick
    pub rendered: bool,
    /// Earliest instant at which either loop is due again
    pub next_deadline: Instant,
    /// How long the caller may sleep (zero if behind schedule)
    pub sleep_duration: Duration,
}

/// Fixed period deadline with drift correction.
///
/// Falling behind by more than two periods drops the backlog instead of
/// firing a burst of catch-up ticks.
#[derive(Debug, Clone, Copy)]
pub struct Interval {
    period: Duration,
    next: Option<Instant>,
}

impl Interval {
    pub const fn new(period: Duration) -> Self {
        Self { period, next: None }
    }

    pub const fn period(&self) -> Duration {
        self.period
    }

    /// Returns `true` when the interval is due at `now` and schedules the next deadline
    pub fn poll(&mut self, now: Instant) -> bool {
        let Some(next) = self.next else {
            self.next = Some(now + self.period);
            return true;
        };
        if now.as_millis() < next.as_millis() {
            return false;
        }

        let max_drift = self.period.as_millis() * 2;
        let base = if now.as_millis() > next.as_millis() + max_drift {
            now
        } else {
            next
        };
        self.next = Some(base + self.period);
        true
    }

    /// Next deadline, or `now` if the interval has never fired
    pub fn deadline(&self, now: Instant) -> Instant {
        self.next.unwrap_or(now)
    }

    /// Forget the schedule so the next poll fires immediately
    pub fn reset(&mut self) {
        self.next = None;
    }
}

/// Build the timing part of a [`TickResult`] from both loops
pub(crate) fn tick_result(
    now: Instant,
    sensor: &Interval,
    render: &Interval,
    sampled: bool,
    rendered: bool,
) -> TickResult {
    let sensor_deadline = sensor.deadline(now);
    let render_deadline = render.deadline(now);
    let next_deadline = if sensor_deadline.as_millis() <= render_deadline.as_millis() {
        sensor_deadline
    } else {
        render_deadline
    };

    TickResult {
        sampled,
        rendered,
        next_deadline,
        sleep_duration: elapsed_between(now, next_deadline),
    }
}
