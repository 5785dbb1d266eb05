use embassy_time::{Duration, Instant};
use heapless::HistoryBuffer;

use super::{Mode, MotionProfile, Pattern, TickContext, Transition};
use crate::diagnostics::{DiagnosticEvent, DiagnosticSink};
use crate::gesture::{HoldConfig, HoldEvent, HoldGesture};
use crate::render::{self, Frame, patterns};
use crate::sample::PhysicalSample;
use crate::scheduler::elapsed_between;

/// Samples kept while recording: 2 s at 50 Hz
pub const MOTION_BUFFER_LEN: usize = 100;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FreecastPhase {
    Recording,
    Displaying,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FreecastTimings {
    pub recording: Duration,
    pub display: Duration,
}

impl FreecastTimings {
    pub const DEFAULT: Self = Self {
        recording: Duration::from_millis(2000),
        display: Duration::from_millis(2000),
    };
}

impl Default for FreecastTimings {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Record motion, then show a pattern derived from it, repeatedly
pub struct FreecastMode {
    timings: FreecastTimings,
    phase: FreecastPhase,
    phase_started_at: Instant,
    motion: HistoryBuffer<PhysicalSample, MOTION_BUFFER_LEN>,
    profile: MotionProfile,
    pattern: Pattern,
    exit: HoldGesture,
}

impl FreecastMode {
    pub fn new(exit: &HoldConfig, timings: FreecastTimings, now: Instant) -> Self {
        Self {
            timings,
            phase: FreecastPhase::Recording,
            phase_started_at: now,
            motion: HistoryBuffer::new(),
            profile: MotionProfile::QUIET,
            pattern: Pattern::default(),
            exit: exit.tracker(),
        }
    }

    pub const fn phase(&self) -> FreecastPhase {
        self.phase
    }

    pub const fn phase_started_at(&self) -> Instant {
        self.phase_started_at
    }

    /// Samples recorded in the current recording phase
    pub fn recorded(&self) -> &[PhysicalSample] {
        self.motion.as_slice()
    }

    pub const fn profile(&self) -> &MotionProfile {
        &self.profile
    }

    pub const fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    pub const fn exit(&self) -> &HoldGesture {
        &self.exit
    }

    fn enter_phase<D: DiagnosticSink>(
        &mut self,
        phase: FreecastPhase,
        now: Instant,
        diagnostics: &mut D,
    ) {
        self.phase = phase;
        self.phase_started_at = now;
        diagnostics.record(DiagnosticEvent::PhaseChanged(phase));
    }

    fn analyze<D: DiagnosticSink>(&mut self, diagnostics: &mut D) {
        self.profile = MotionProfile::analyze(self.motion.as_slice());
        self.pattern = self.profile.pattern();
        diagnostics.record(DiagnosticEvent::PatternSelected {
            pattern: self.pattern.kind,
            intensity: self.profile.intensity,
            directionality: self.profile.directionality,
            axis: self.profile.dominant_axis,
        });
    }

    fn reset(&mut self, now: Instant) {
        self.motion.clear();
        self.phase = FreecastPhase::Recording;
        self.phase_started_at = now;
        self.profile = MotionProfile::QUIET;
        self.pattern = Pattern::default();
        self.exit.reset();
    }
}

impl Mode for FreecastMode {
    fn update<const N: usize, D: DiagnosticSink>(
        &mut self,
        ctx: &TickContext,
        _frame: &mut Frame<N>,
        diagnostics: &mut D,
    ) -> Transition {
        let event = self.exit.update(ctx.reading.pose, ctx.now);
        if matches!(event, HoldEvent::Warning | HoldEvent::Completed) {
            diagnostics.record(DiagnosticEvent::Hold {
                pose: self.exit.pose(),
                event,
            });
        }
        if self.exit.is_completed() {
            self.reset(ctx.now);
            return Transition::ToIdle;
        }

        let elapsed = elapsed_between(self.phase_started_at, ctx.now);
        match self.phase {
            FreecastPhase::Recording => {
                if let Some(sample) = ctx.sample {
                    self.motion.write(sample);
                }
                if elapsed >= self.timings.recording {
                    self.analyze(diagnostics);
                    self.enter_phase(FreecastPhase::Displaying, ctx.now, diagnostics);
                }
            }
            FreecastPhase::Displaying => {
                if elapsed >= self.timings.display {
                    self.motion.clear();
                    self.enter_phase(FreecastPhase::Recording, ctx.now, diagnostics);
                }
            }
        }

        Transition::None
    }

    fn render<const N: usize>(&self, now: Instant, frame: &mut Frame<N>) {
        let elapsed = elapsed_between(self.phase_started_at, now);
        match self.phase {
            FreecastPhase::Recording => patterns::recording_shimmer(elapsed, frame),
            FreecastPhase::Displaying => patterns::render(&self.pattern, elapsed, frame),
        }
        if self.exit.is_past_warning() {
            let held = self.exit.elapsed();
            render::warning_flash(frame, held.as_millis());
        }
    }
}
