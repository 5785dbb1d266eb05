//! Gesture tracking over the stream of classified poses.
//!
//! Two families are tracked: ordered two-pose sequences completed within a
//! time window, and long holds of a single pose with a warning stage.

mod history;
mod hold;
mod sequence;

use embassy_time::Duration;

pub use history::{POSE_HISTORY_LEN, PoseHistory};
pub use hold::{HoldEvent, HoldGesture};
pub use sequence::{SequenceEvent, SequenceGesture, SequenceState};

use crate::classifier::Pose;
use crate::mode::SpellType;

/// Default time allowed between the two poses of a sequence
pub const DEFAULT_SEQUENCE_WINDOW: Duration = Duration::from_millis(1000);

/// Default hold warning stage
pub const DEFAULT_HOLD_WARNING: Duration = Duration::from_millis(3000);

/// Default hold completion
pub const DEFAULT_HOLD_COMPLETION: Duration = Duration::from_millis(5000);

/// Number of spell sequences watched while idle
pub const SPELL_GESTURES: usize = 3;

/// Two-pose sequence that casts a spell
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpellGesture {
    pub start: Pose,
    pub end: Pose,
    pub window: Duration,
    pub spell: SpellType,
}

impl SpellGesture {
    pub const fn new(start: Pose, end: Pose, spell: SpellType) -> Self {
        Self {
            start,
            end,
            window: DEFAULT_SEQUENCE_WINDOW,
            spell,
        }
    }

    pub const fn tracker(&self) -> SequenceGesture {
        SequenceGesture::new(self.start, self.end, self.window)
    }
}

/// Long hold that switches modes
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HoldConfig {
    pub pose: Pose,
    pub warning: Duration,
    pub completion: Duration,
}

impl HoldConfig {
    pub const DEFAULT: Self = Self {
        pose: Pose::Shield,
        warning: DEFAULT_HOLD_WARNING,
        completion: DEFAULT_HOLD_COMPLETION,
    };

    pub const fn tracker(&self) -> HoldGesture {
        HoldGesture::new(self.pose, self.warning, self.completion)
    }
}

impl Default for HoldConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GestureConfig {
    /// Sequences watched in idle, in priority order
    pub spells: [SpellGesture; SPELL_GESTURES],
    /// Idle to freecast
    pub enter_freecast: HoldConfig,
    /// Freecast back to idle
    pub exit_freecast: HoldConfig,
}

impl GestureConfig {
    pub const DEFAULT: Self = Self {
        spells: [
            SpellGesture::new(Pose::Calm, Pose::Offer, SpellType::Rainbow),
            SpellGesture::new(Pose::Oath, Pose::Dig, SpellType::Lightning),
            SpellGesture::new(Pose::Offer, Pose::Oath, SpellType::Lumina),
        ],
        enter_freecast: HoldConfig::DEFAULT,
        exit_freecast: HoldConfig::DEFAULT,
    };
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
