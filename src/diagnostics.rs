//! Structured diagnostic events.
//!
//! The controller and the modes report what they decide through a
//! [`DiagnosticSink`]. Behaviour never depends on the sink; [`NoopDiagnostics`]
//! drops everything.

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::classifier::{CalibrationError, Pose, ThresholdError};
use crate::gesture::HoldEvent;
use crate::mode::{FreecastPhase, ModeId, PatternKind, SpellType};
use crate::sample::Axis;
use crate::storage::StoreError;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DiagnosticEvent {
    PoseChanged {
        from: Pose,
        to: Pose,
        confidence: u8,
    },
    SpellArmed(SpellType),
    SpellTimedOut(SpellType),
    SpellTooLate(SpellType),
    SpellCast(SpellType),
    /// Hold warning or completion on `pose`
    Hold {
        pose: Pose,
        event: HoldEvent,
    },
    ModeEntered(ModeId),
    PhaseChanged(FreecastPhase),
    PatternSelected {
        pattern: PatternKind,
        intensity: f32,
        directionality: f32,
        axis: Axis,
    },
    SensorReadFailed {
        consecutive: u32,
    },
    Calibrated {
        pose: Pose,
        axis: Axis,
        threshold: f32,
    },
    CalibrationFailed {
        pose: Pose,
        error: CalibrationError,
    },
    ThresholdsLoaded {
        from_store: bool,
    },
    ThresholdsSaved(Result<(), StoreError>),
    /// Control queue was full
    ControlRejected,
    /// Runtime threshold control refused; the previous threshold stays
    ThresholdRejected {
        pose: Pose,
        error: ThresholdError,
    },
}

pub trait DiagnosticSink {
    fn record(&mut self, event: DiagnosticEvent) {
        let _ = event;
    }
}

impl<D: DiagnosticSink + ?Sized> DiagnosticSink for &mut D {
    fn record(&mut self, event: DiagnosticEvent) {
        (**self).record(event);
    }
}

/// Sink that discards every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopDiagnostics;

impl DiagnosticSink for NoopDiagnostics {}

/// Prints events to the ESP32 console
#[cfg(feature = "esp32-log")]
#[derive(Debug, Clone, Copy, Default)]
pub struct EspPrintlnDiagnostics;

#[cfg(feature = "esp32-log")]
impl DiagnosticSink for EspPrintlnDiagnostics {
    fn record(&mut self, event: DiagnosticEvent) {
        println!("[gauntlet] {:?}", event);
    }
}
