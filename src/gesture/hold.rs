use embassy_time::{Duration, Instant};

use crate::classifier::Pose;
use crate::scheduler::elapsed_between;

/// What a single [`HoldGesture::update`] changed
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HoldEvent {
    None,
    /// Target pose entered
    Entered,
    /// Warning duration reached
    Warning,
    /// Completion duration reached
    Completed,
    /// Target pose left before completion was consumed
    Released,
}

/// Continuous occupancy of one pose.
///
/// Completion latches until the owner calls [`HoldGesture::reset`]; holding on
/// afterwards never fires it a second time.
#[derive(Clone, Copy, Debug)]
pub struct HoldGesture {
    pose: Pose,
    warning: Duration,
    completion: Duration,
    active_since: Option<Instant>,
    elapsed: Duration,
    past_warning: bool,
    completed: bool,
}

impl HoldGesture {
    pub const fn new(pose: Pose, warning: Duration, completion: Duration) -> Self {
        Self {
            pose,
            warning,
            completion,
            active_since: None,
            elapsed: Duration::from_millis(0),
            past_warning: false,
            completed: false,
        }
    }

    pub fn update(&mut self, pose: Pose, now: Instant) -> HoldEvent {
        if pose != self.pose {
            let was_active = self.active_since.is_some();
            self.release();
            return if was_active {
                HoldEvent::Released
            } else {
                HoldEvent::None
            };
        }

        let Some(since) = self.active_since else {
            self.active_since = Some(now);
            self.elapsed = Duration::from_millis(0);
            return HoldEvent::Entered;
        };

        self.elapsed = elapsed_between(since, now);
        if !self.completed && self.elapsed >= self.completion {
            self.completed = true;
            self.past_warning = true;
            return HoldEvent::Completed;
        }
        if !self.past_warning && self.elapsed >= self.warning {
            self.past_warning = true;
            return HoldEvent::Warning;
        }
        HoldEvent::None
    }

    /// Position between warning (0.0) and completion (1.0)
    #[allow(clippy::cast_precision_loss)]
    pub fn progress(&self) -> f32 {
        if self.active_since.is_none() || self.elapsed < self.warning {
            return 0.0;
        }
        if self.elapsed >= self.completion {
            return 1.0;
        }

        let span = self.completion.as_millis() - self.warning.as_millis();
        if span == 0 {
            return 1.0;
        }
        (self.elapsed.as_millis() - self.warning.as_millis()) as f32 / span as f32
    }

    pub const fn pose(&self) -> Pose {
        self.pose
    }

    pub const fn is_active(&self) -> bool {
        self.active_since.is_some()
    }

    pub const fn is_past_warning(&self) -> bool {
        self.past_warning
    }

    pub const fn is_completed(&self) -> bool {
        self.completed
    }

    /// Hold time as of the last update
    pub const fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Forget the current hold entirely; the pose must be re-entered
    pub fn reset(&mut self) {
        self.release();
    }

    fn release(&mut self) {
        self.active_since = None;
        self.elapsed = Duration::from_millis(0);
        self.past_warning = false;
        self.completed = false;
    }
}
