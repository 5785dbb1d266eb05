//! LED frame buffer and the per-mode painters.
//!
//! Painters are pure functions of elapsed time and mode state. They only write
//! into a [`Frame`]; the controller presents the frame to the [`LedSink`].

pub mod patterns;
pub mod spells;

use crate::LedSink;
use crate::color::{self, Rgb};

/// Default global brightness
pub const DEFAULT_BRIGHTNESS: u8 = 100;

/// Level of the idle indicator LEDs
pub const INDICATOR_LEVEL: u8 = 204;

/// Half period of the hold warning flash (2 Hz)
pub const WARNING_FLASH_HALF_PERIOD_MS: u64 = 250;

/// Pixel buffer plus global brightness for a ring of `N` LEDs
#[derive(Debug, Clone)]
pub struct Frame<const N: usize> {
    pixels: [Rgb; N],
    brightness: u8,
    default_brightness: u8,
}

impl<const N: usize> Frame<N> {
    pub const fn new(default_brightness: u8) -> Self {
        Self {
            pixels: [color::BLACK; N],
            brightness: default_brightness,
            default_brightness,
        }
    }

    pub const fn pixels(&self) -> &[Rgb; N] {
        &self.pixels
    }

    pub fn pixel(&self, index: usize) -> Option<Rgb> {
        self.pixels.get(index).copied()
    }

    /// Out of range indices are ignored
    pub fn set_pixel(&mut self, index: usize, color: Rgb) {
        if let Some(pixel) = self.pixels.get_mut(index) {
            *pixel = color;
        }
    }

    pub fn fill(&mut self, color: Rgb) {
        self.pixels = [color; N];
    }

    pub fn clear(&mut self) {
        self.fill(color::BLACK);
    }

    pub const fn brightness(&self) -> u8 {
        self.brightness
    }

    pub fn set_brightness(&mut self, brightness: u8) {
        self.brightness = brightness;
    }

    pub const fn default_brightness(&self) -> u8 {
        self.default_brightness
    }

    /// Change the default and apply it immediately
    pub fn set_default_brightness(&mut self, brightness: u8) {
        self.default_brightness = brightness;
        self.brightness = brightness;
    }

    pub fn restore_brightness(&mut self) {
        self.brightness = self.default_brightness;
    }

    pub const fn len(&self) -> usize {
        N
    }

    pub const fn is_empty(&self) -> bool {
        N == 0
    }

    /// Push the frame to the strip and latch it
    pub fn present<L: LedSink>(&self, sink: &mut L) {
        sink.set_global_brightness(self.brightness);
        match self.pixels.split_first() {
            Some((first, rest)) if rest.iter().all(|pixel| pixel == first) => {
                sink.set_all_pixels(*first);
            }
            _ => {
                for (index, pixel) in self.pixels.iter().enumerate() {
                    sink.set_pixel(index, *pixel);
                }
            }
        }
        sink.flush();
    }
}

/// LEDs used as pose indicators: one per quarter of the ring
pub fn indicator_indices<const N: usize>() -> impl Iterator<Item = usize> {
    let step = (N / 4).max(1);
    (0..N).step_by(step).take(4)
}

/// Paint the idle indicators with `color`, everything else dark
pub fn indicators<const N: usize>(frame: &mut Frame<N>, color: Rgb) {
    frame.clear();
    let color = color::scale_color(color, INDICATOR_LEVEL);
    for index in indicator_indices::<N>() {
        frame.set_pixel(index, color);
    }
}

/// Whether a 2 Hz flash is in its lit half at `elapsed_ms`
pub fn flash_on(elapsed_ms: u64) -> bool {
    (elapsed_ms / WARNING_FLASH_HALF_PERIOD_MS).is_multiple_of(2)
}

/// Overlay the hold warning on the indicator LEDs
pub fn warning_flash<const N: usize>(frame: &mut Frame<N>, elapsed_ms: u64) {
    let color = if flash_on(elapsed_ms) {
        color::ORANGE
    } else {
        color::BLACK
    };
    for index in indicator_indices::<N>() {
        frame.set_pixel(index, color);
    }
}

/// Stateless 32-bit hash (SplitMix64 finaliser)
#[allow(clippy::cast_possible_truncation)]
pub(crate) const fn hash(x: u64) -> u32 {
    let mut z = x.wrapping_add(0x9e37_79b9_7f4a_7c15);
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    (z ^ (z >> 31)) as u32
}
