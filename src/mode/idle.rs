use embassy_time::{Duration, Instant};

use super::{Mode, SpellType, TickContext, Transition};
use crate::classifier::Pose;
use crate::color::{self, Rgb};
use crate::diagnostics::{DiagnosticEvent, DiagnosticSink};
use crate::gesture::{
    GestureConfig, HoldEvent, HoldGesture, SPELL_GESTURES, SequenceEvent, SequenceGesture,
};
use crate::render::{self, Frame};
use crate::scheduler::elapsed_between;
use crate::transition::ValueTransition;

/// Fade between pose indicator colours
pub const COLOR_TRANSITION: Duration = Duration::from_millis(300);

/// Sequence tracker bound to the spell it casts
#[derive(Clone, Copy, Debug)]
pub struct SpellTracker {
    pub gesture: SequenceGesture,
    pub spell: SpellType,
}

/// Pose indicator, spell sequences and the freecast hold
#[derive(Debug, Clone)]
pub struct IdleMode {
    spells: [SpellTracker; SPELL_GESTURES],
    hold: HoldGesture,
    pose: Pose,
    pose_changed_at: Instant,
    color: ValueTransition<Rgb>,
    interpolation: bool,
}

impl IdleMode {
    pub fn new(gestures: &GestureConfig, interpolation: bool, now: Instant) -> Self {
        let mut color = ValueTransition::new_rgb(color::BLACK);
        let fade = if interpolation {
            COLOR_TRANSITION
        } else {
            Duration::from_millis(0)
        };
        color.set(Pose::Unknown.color(), fade, now);

        Self {
            spells: gestures.spells.map(|spell| SpellTracker {
                gesture: spell.tracker(),
                spell: spell.spell,
            }),
            hold: gestures.enter_freecast.tracker(),
            pose: Pose::Unknown,
            pose_changed_at: now,
            color,
            interpolation,
        }
    }

    pub const fn spells(&self) -> &[SpellTracker; SPELL_GESTURES] {
        &self.spells
    }

    pub const fn hold(&self) -> &HoldGesture {
        &self.hold
    }

    pub const fn pose(&self) -> Pose {
        self.pose
    }

    pub const fn pose_changed_at(&self) -> Instant {
        self.pose_changed_at
    }

    /// Colour currently shown on the indicators
    pub const fn color(&self) -> Rgb {
        self.color.current()
    }

    pub const fn interpolation(&self) -> bool {
        self.interpolation
    }

    /// Toggle colour fades. Disabling snaps to the pending colour.
    pub fn set_interpolation(&mut self, enabled: bool) {
        self.interpolation = enabled;
        if !enabled {
            self.color.snap(self.color.target());
        }
    }

    fn track_pose(&mut self, pose: Pose, now: Instant) {
        if pose == self.pose {
            return;
        }
        let previous = self.color.target();
        self.pose = pose;
        self.pose_changed_at = now;
        if self.interpolation {
            self.color
                .set_from(previous, pose.color(), COLOR_TRANSITION, now);
        } else {
            self.color.snap(pose.color());
        }
    }

    /// First completed spell in priority order
    fn track_spells<D: DiagnosticSink>(
        &mut self,
        pose: Pose,
        now: Instant,
        diagnostics: &mut D,
    ) -> Option<SpellType> {
        let mut cast = None;
        for tracker in &mut self.spells {
            let spell = tracker.spell;
            match tracker.gesture.update(pose, now) {
                SequenceEvent::None => {}
                SequenceEvent::Armed => diagnostics.record(DiagnosticEvent::SpellArmed(spell)),
                SequenceEvent::TimedOut => {
                    diagnostics.record(DiagnosticEvent::SpellTimedOut(spell));
                }
                SequenceEvent::TooLate => diagnostics.record(DiagnosticEvent::SpellTooLate(spell)),
                SequenceEvent::Completed => {
                    if cast.is_none() {
                        cast = Some(spell);
                    }
                }
            }
        }
        cast
    }
}

impl Mode for IdleMode {
    fn update<const N: usize, D: DiagnosticSink>(
        &mut self,
        ctx: &TickContext,
        _frame: &mut Frame<N>,
        diagnostics: &mut D,
    ) -> Transition {
        let pose = ctx.reading.pose;
        self.track_pose(pose, ctx.now);
        self.color.tick(ctx.now);

        if let Some(spell) = self.track_spells(pose, ctx.now, diagnostics) {
            for tracker in &mut self.spells {
                tracker.gesture.reset();
            }
            diagnostics.record(DiagnosticEvent::SpellCast(spell));
            return Transition::ToQuickCast(spell);
        }

        let event = self.hold.update(pose, ctx.now);
        if matches!(event, HoldEvent::Warning | HoldEvent::Completed) {
            diagnostics.record(DiagnosticEvent::Hold {
                pose: self.hold.pose(),
                event,
            });
        }
        if self.hold.is_completed() {
            self.hold.reset();
            return Transition::ToFreecast;
        }

        Transition::None
    }

    fn render<const N: usize>(&self, now: Instant, frame: &mut Frame<N>) {
        render::indicators(frame, self.color.current());
        if self.hold.is_past_warning() && !self.hold.is_completed() {
            let elapsed = elapsed_between(self.pose_changed_at, now);
            render::warning_flash(frame, elapsed.as_millis());
        }
    }
}
