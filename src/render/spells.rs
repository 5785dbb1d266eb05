//! Quick cast spell animations.

use embassy_time::Duration;

use super::{Frame, hash};
use crate::color::{self, Rgb, progress8, scale8};
use crate::mode::SpellType;

/// Initial white strike of the lightning spell
const LIGHTNING_FLASH_MS: u64 = 50;
/// Crackle pattern changes every slot
const LIGHTNING_SLOT_MS: u64 = 100;
const LIGHTNING_COLORS: [Rgb; 4] = [color::RED, color::BLUE, color::PURPLE, color::WHITE];

/// Starting brightness of the lumina glow
pub const LUMINA_BRIGHTNESS: u8 = 204;
/// LEDs lit by lumina
pub const LUMINA_LEDS: usize = 6;

/// Hue advance of the rainbow burst, in ms per hue step
const RAINBOW_MS_PER_STEP: u64 = 8;

/// Paint `spell` at `elapsed` into its run
pub fn render<const N: usize>(spell: SpellType, elapsed: Duration, frame: &mut Frame<N>) {
    match spell {
        SpellType::Rainbow => rainbow_burst(elapsed, frame),
        SpellType::Lightning => lightning(elapsed, frame),
        SpellType::Lumina => lumina(elapsed, spell.duration(), frame),
    }
}

/// Full ring rainbow spinning around the wrist
#[allow(clippy::cast_possible_truncation)]
pub fn rainbow_burst<const N: usize>(elapsed: Duration, frame: &mut Frame<N>) {
    let base = ((elapsed.as_millis() / RAINBOW_MS_PER_STEP) % 256) as u8;
    for index in 0..N {
        let offset = (index * 256 / N) as u8;
        frame.set_pixel(index, color::hue(base.wrapping_add(offset), 255));
    }
}

/// White strike followed by hashed crackle at full brightness
#[allow(clippy::cast_possible_truncation)]
pub fn lightning<const N: usize>(elapsed: Duration, frame: &mut Frame<N>) {
    frame.set_brightness(255);
    let ms = elapsed.as_millis();
    if ms < LIGHTNING_FLASH_MS {
        frame.fill(color::WHITE);
        return;
    }

    let slot = ms / LIGHTNING_SLOT_MS;
    frame.clear();
    // Every third slot stays dark between strikes
    if hash(slot) % 3 == 0 {
        return;
    }
    for index in 0..N {
        let noise = hash((slot << 8) | index as u64);
        if noise % 4 == 0 {
            let color = LIGHTNING_COLORS[((noise >> 8) % 4) as usize];
            frame.set_pixel(index, color);
        }
    }
}

/// Steady white glow fading out over the spell duration
pub fn lumina<const N: usize>(elapsed: Duration, duration: Duration, frame: &mut Frame<N>) {
    let remaining = 255 - progress8(elapsed, duration);
    frame.set_brightness(scale8(LUMINA_BRIGHTNESS, remaining));
    frame.clear();
    for index in 0..LUMINA_LEDS.min(N) {
        frame.set_pixel(index, color::WHITE);
    }
}
