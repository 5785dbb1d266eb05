use embassy_time::{Duration, Instant};

use super::{Mode, SpellType, TickContext, Transition};
use crate::diagnostics::DiagnosticSink;
use crate::render::{Frame, spells};
use crate::scheduler::elapsed_between;

/// Plays one spell for its fixed duration, ignoring pose input
#[derive(Debug, Clone, Copy)]
pub struct QuickCastMode {
    spell: SpellType,
    started_at: Instant,
    finished: bool,
}

impl QuickCastMode {
    pub const fn new(spell: SpellType, now: Instant) -> Self {
        Self {
            spell,
            started_at: now,
            finished: false,
        }
    }

    pub const fn spell(&self) -> SpellType {
        self.spell
    }

    pub const fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn elapsed(&self, now: Instant) -> Duration {
        elapsed_between(self.started_at, now)
    }

    /// Stop the spell early and clean up the strip
    pub fn abort<const N: usize>(&mut self, frame: &mut Frame<N>) {
        self.finish(frame);
    }

    fn finish<const N: usize>(&mut self, frame: &mut Frame<N>) {
        frame.clear();
        frame.restore_brightness();
        self.finished = true;
    }
}

impl Mode for QuickCastMode {
    fn update<const N: usize, D: DiagnosticSink>(
        &mut self,
        ctx: &TickContext,
        frame: &mut Frame<N>,
        _diagnostics: &mut D,
    ) -> Transition {
        if self.finished {
            return Transition::ToIdle;
        }
        if self.elapsed(ctx.now) >= self.spell.duration() {
            self.finish(frame);
            return Transition::ToIdle;
        }
        Transition::None
    }

    fn render<const N: usize>(&self, now: Instant, frame: &mut Frame<N>) {
        if self.finished {
            return;
        }
        spells::render(self.spell, self.elapsed(now), frame);
    }
}
