use embassy_time::{Duration, Instant};

use crate::classifier::Pose;
use crate::scheduler::elapsed_between;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SequenceState {
    Idle,
    /// Start pose seen at `since`
    Armed { since: Instant },
    /// Latched until [`SequenceGesture::reset`]
    Completed,
}

/// What a single [`SequenceGesture::update`] changed
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SequenceEvent {
    None,
    Armed,
    /// Start pose held past the window
    TimedOut,
    /// End pose reached after the window
    TooLate,
    Completed,
}

/// Two-pose gesture: `start` followed by `end` within `window`.
///
/// Poses other than `start` and `end` do not disarm the gesture, so a
/// transient `Unknown` between the two still completes.
#[derive(Clone, Copy, Debug)]
pub struct SequenceGesture {
    start: Pose,
    end: Pose,
    window: Duration,
    state: SequenceState,
}

impl SequenceGesture {
    pub const fn new(start: Pose, end: Pose, window: Duration) -> Self {
        Self {
            start,
            end,
            window,
            state: SequenceState::Idle,
        }
    }

    pub fn update(&mut self, pose: Pose, now: Instant) -> SequenceEvent {
        match self.state {
            SequenceState::Completed => SequenceEvent::None,
            SequenceState::Idle => {
                if pose == self.start {
                    self.state = SequenceState::Armed { since: now };
                    SequenceEvent::Armed
                } else {
                    SequenceEvent::None
                }
            }
            SequenceState::Armed { since } => {
                let elapsed = elapsed_between(since, now);
                if pose == self.end {
                    if elapsed <= self.window {
                        self.state = SequenceState::Completed;
                        SequenceEvent::Completed
                    } else {
                        self.state = SequenceState::Idle;
                        SequenceEvent::TooLate
                    }
                } else if pose == self.start && elapsed > self.window {
                    self.state = SequenceState::Idle;
                    SequenceEvent::TimedOut
                } else {
                    SequenceEvent::None
                }
            }
        }
    }

    pub const fn is_complete(&self) -> bool {
        matches!(self.state, SequenceState::Completed)
    }

    pub const fn is_armed(&self) -> bool {
        matches!(self.state, SequenceState::Armed { .. })
    }

    pub const fn state(&self) -> SequenceState {
        self.state
    }

    pub const fn start(&self) -> Pose {
        self.start
    }

    pub const fn end(&self) -> Pose {
        self.end
    }

    pub const fn window(&self) -> Duration {
        self.window
    }

    pub fn reset(&mut self) {
        self.state = SequenceState::Idle;
    }
}
