//! Operating modes.
//!
//! Exactly one mode is active. Each tick the controller calls `update`, which
//! returns a [`Transition`] request; the controller applies it after the call
//! returns and builds the next mode from scratch, so no state survives a mode
//! change.

mod freecast;
mod idle;
mod motion;
mod quick_cast;

use embassy_time::{Duration, Instant};
pub use freecast::{FreecastMode, FreecastPhase, FreecastTimings, MOTION_BUFFER_LEN};
pub use idle::{COLOR_TRANSITION, IdleMode, SpellTracker};
pub use motion::{
    FULL_SCALE_MOTION, MIN_ANALYSIS_SAMPLES, MotionProfile, PALETTE_LEN, Pattern, PatternKind,
    VARIANCE_SCALE,
};
pub use quick_cast::QuickCastMode;

use crate::classifier::PoseReading;
use crate::diagnostics::DiagnosticSink;
use crate::render::Frame;
use crate::sample::PhysicalSample;

const SPELL_NAME_RAINBOW: &str = "rainbow";
const SPELL_NAME_LIGHTNING: &str = "lightning";
const SPELL_NAME_LUMINA: &str = "lumina";

const MODE_NAME_IDLE: &str = "idle";
const MODE_NAME_QUICK_CAST: &str = "quick_cast";
const MODE_NAME_FREECAST: &str = "freecast";

/// Spells cast by sequence gestures
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SpellType {
    Rainbow,
    Lightning,
    Lumina,
}

impl SpellType {
    /// How long the spell plays
    pub const fn duration(self) -> Duration {
        match self {
            Self::Rainbow => Duration::from_millis(7000),
            Self::Lightning => Duration::from_millis(5000),
            Self::Lumina => Duration::from_millis(15000),
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            SPELL_NAME_RAINBOW => Self::Rainbow,
            SPELL_NAME_LIGHTNING => Self::Lightning,
            SPELL_NAME_LUMINA => Self::Lumina,
            _ => return None,
        })
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Rainbow => SPELL_NAME_RAINBOW,
            Self::Lightning => SPELL_NAME_LIGHTNING,
            Self::Lumina => SPELL_NAME_LUMINA,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ModeId {
    Idle,
    QuickCast,
    Freecast,
}

impl ModeId {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => MODE_NAME_IDLE,
            Self::QuickCast => MODE_NAME_QUICK_CAST,
            Self::Freecast => MODE_NAME_FREECAST,
        }
    }
}

/// Mode change requested by an update
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Transition {
    None,
    ToIdle,
    ToFreecast,
    ToQuickCast(SpellType),
}

/// Inputs of one mode update
#[derive(Clone, Copy, Debug)]
pub struct TickContext {
    pub now: Instant,
    /// Latest classifier output, retained across failed reads
    pub reading: PoseReading,
    /// Smoothed sample taken this tick, if the sensor was polled and answered
    pub sample: Option<PhysicalSample>,
}

pub trait Mode {
    /// Advance the mode by one tick
    fn update<const N: usize, D: DiagnosticSink>(
        &mut self,
        ctx: &TickContext,
        frame: &mut Frame<N>,
        diagnostics: &mut D,
    ) -> Transition;

    /// Paint the current state
    fn render<const N: usize>(&self, now: Instant, frame: &mut Frame<N>);
}

/// Mode slot - enum holding the active mode
pub enum ModeSlot {
    Idle(IdleMode),
    QuickCast(QuickCastMode),
    Freecast(FreecastMode),
}

impl ModeSlot {
    pub const fn id(&self) -> ModeId {
        match self {
            Self::Idle(_) => ModeId::Idle,
            Self::QuickCast(_) => ModeId::QuickCast,
            Self::Freecast(_) => ModeId::Freecast,
        }
    }

    pub fn update<const N: usize, D: DiagnosticSink>(
        &mut self,
        ctx: &TickContext,
        frame: &mut Frame<N>,
        diagnostics: &mut D,
    ) -> Transition {
        match self {
            Self::Idle(mode) => mode.update(ctx, frame, diagnostics),
            Self::QuickCast(mode) => mode.update(ctx, frame, diagnostics),
            Self::Freecast(mode) => mode.update(ctx, frame, diagnostics),
        }
    }

    pub fn render<const N: usize>(&self, now: Instant, frame: &mut Frame<N>) {
        match self {
            Self::Idle(mode) => mode.render(now, frame),
            Self::QuickCast(mode) => mode.render(now, frame),
            Self::Freecast(mode) => mode.render(now, frame),
        }
    }
}
