//! Freecast pattern painters.

use core::f32::consts::TAU;

use embassy_time::Duration;

use super::{Frame, hash};
use crate::color::{self, blend_colors, ease_in_out_quad, scale_color, unit8};
use crate::mode::{PALETTE_LEN, Pattern, PatternKind};

const TAIL_LEN: usize = 4;
const SPARKLE_SLOT_MS: u64 = 80;
const SHIMMER_PERIOD_MS: f32 = 1200.0;

/// Paint `pattern` at `elapsed` into the display phase
pub fn render<const N: usize>(pattern: &Pattern, elapsed: Duration, frame: &mut Frame<N>) {
    let ms = elapsed.as_millis();
    match pattern.kind {
        PatternKind::ShootingStars => shooting_stars(pattern, ms, frame),
        PatternKind::Waves => waves(pattern, ms, frame),
        PatternKind::Sparkles => sparkles(pattern, ms, frame),
        PatternKind::ColorTrails => color_trails(pattern, ms, frame),
        PatternKind::Pulses => pulses(pattern, ms, frame),
    }
}

/// LEDs per second travelled by moving patterns
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn speed(intensity: f32) -> u64 {
    (4.0 + 16.0 * intensity.clamp(0.0, 1.0)) as u64
}

fn shooting_stars<const N: usize>(pattern: &Pattern, ms: u64, frame: &mut Frame<N>) {
    frame.clear();
    if N == 0 {
        return;
    }
    let travelled = ms * speed(pattern.intensity) / 1000;
    let head = usize::try_from(travelled % N as u64).unwrap_or(0);
    let lap = usize::try_from(travelled / N as u64).unwrap_or(0);
    let star = pattern.palette[lap % PALETTE_LEN];

    for step in 0..TAIL_LEN.min(N) {
        let index = (head + N - step) % N;
        frame.set_pixel(index, scale_color(star, 255_u8 >> step));
    }
}

#[allow(clippy::cast_precision_loss)]
fn waves<const N: usize>(pattern: &Pattern, ms: u64, frame: &mut Frame<N>) {
    let time = ms as f32 / 1000.0;
    let frequency = 0.5 + pattern.intensity;
    for index in 0..N {
        let position = index as f32 / N as f32;
        let phase = (position + time * frequency) * TAU;
        let level = (libm::sinf(phase) + 1.0) * 0.5;
        let base = pattern.palette[index * PALETTE_LEN / N];
        frame.set_pixel(index, scale_color(base, unit8(level)));
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn sparkles<const N: usize>(pattern: &Pattern, ms: u64, frame: &mut Frame<N>) {
    let slot = ms / SPARKLE_SLOT_MS;
    let density = (20.0 + 40.0 * pattern.intensity) as u32;
    for index in 0..N {
        let noise = hash((slot << 8) | index as u64);
        if noise % 100 < density {
            let base = pattern.palette[((noise >> 8) as usize) % PALETTE_LEN];
            let level = ((noise >> 16) as u8) | 0x40;
            frame.set_pixel(index, scale_color(base, level));
        } else {
            frame.set_pixel(index, color::BLACK);
        }
    }
}

#[allow(clippy::cast_possible_truncation)]
fn color_trails<const N: usize>(pattern: &Pattern, ms: u64, frame: &mut Frame<N>) {
    let span = (PALETTE_LEN * 256) as u64;
    let drift = ms * speed(pattern.intensity) * 256 / 1000 / 4;
    for index in 0..N {
        let offset = (index * PALETTE_LEN * 256 / N) as u64;
        let position = (offset + drift) % span;
        let segment = (position / 256) as usize;
        let fraction = (position % 256) as u8;
        let from = pattern.palette[segment];
        let to = pattern.palette[(segment + 1) % PALETTE_LEN];
        frame.set_pixel(index, blend_colors(from, to, fraction));
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn pulses<const N: usize>(pattern: &Pattern, ms: u64, frame: &mut Frame<N>) {
    let period = (1000.0 - 600.0 * pattern.intensity.clamp(0.0, 1.0)) as u64;
    let period = period.max(1);
    let beat = ms / period;
    let phase = ((ms % period) * 255 / period) as u8;
    // Triangle wave so each beat swells and fades
    let triangle = if phase < 128 { phase << 1 } else { (255 - phase) << 1 };
    let level = ease_in_out_quad(triangle);
    let base = pattern.palette[(beat as usize) % PALETTE_LEN];
    frame.fill(scale_color(base, level));
}

/// Dim white breathing shown while motion is being recorded
#[allow(clippy::cast_precision_loss)]
pub fn recording_shimmer<const N: usize>(elapsed: Duration, frame: &mut Frame<N>) {
    let phase = elapsed.as_millis() as f32 / SHIMMER_PERIOD_MS * TAU;
    let level = 0.08 + 0.08 * (libm::sinf(phase) + 1.0);
    frame.fill(scale_color(color::WHITE, unit8(level)));
}
