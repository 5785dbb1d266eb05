//! Colour primitives and 8-bit fixed point helpers.

use embassy_time::Duration;

pub use smart_leds::RGB8 as Rgb;
pub use smart_leds::hsv::{Hsv, hsv2rgb};

pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };
pub const WHITE: Rgb = Rgb { r: 255, g: 255, b: 255 };
pub const RED: Rgb = Rgb { r: 255, g: 0, b: 0 };
pub const GREEN: Rgb = Rgb { r: 0, g: 255, b: 0 };
pub const BLUE: Rgb = Rgb { r: 0, g: 0, b: 255 };
pub const YELLOW: Rgb = Rgb { r: 255, g: 255, b: 0 };
pub const PURPLE: Rgb = Rgb { r: 128, g: 0, b: 128 };
pub const MAGENTA: Rgb = Rgb { r: 255, g: 0, b: 255 };
pub const ORANGE: Rgb = Rgb { r: 255, g: 165, b: 0 };

/// Scale an 8-bit value by `scale / 255`, rounding so that 255 is identity.
#[inline]
#[allow(clippy::cast_possible_truncation)]
pub const fn scale8(value: u8, scale: u8) -> u8 {
    ((value as u16 * scale as u16 + 255) >> 8) as u8
}

/// Linear blend from `a` to `b`, `amount` 0 yields `a`, 255 yields `b`.
#[inline]
#[allow(clippy::cast_possible_truncation)]
pub const fn blend8(a: u8, b: u8, amount: u8) -> u8 {
    let inverse = 255 - amount as u32;
    ((a as u32 * inverse + b as u32 * amount as u32 + 127) / 255) as u8
}

/// Progress of `elapsed` through `duration` on a 0-255 scale.
///
/// Zero duration counts as complete.
#[inline]
#[allow(clippy::cast_possible_truncation)]
pub const fn progress8(elapsed: Duration, duration: Duration) -> u8 {
    let total = duration.as_millis();
    let done = elapsed.as_millis();
    if total == 0 || done >= total {
        return 255;
    }
    ((done * 255) / total) as u8
}

/// Quadratic ease in/out over a 0-255 phase
#[inline]
pub const fn ease_in_out_quad(phase: u8) -> u8 {
    let half = if phase < 128 { phase } else { 255 - phase };
    let eased = scale8(half, half) << 1;
    if phase < 128 { eased } else { 255 - eased }
}

/// Convert a 0.0-1.0 factor to a 0-255 scale, clamping out of range input
#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn unit8(factor: f32) -> u8 {
    if factor.is_nan() {
        return 0;
    }
    (factor.clamp(0.0, 1.0) * 255.0 + 0.5) as u8
}

#[inline]
pub fn blend_colors(a: Rgb, b: Rgb, amount: u8) -> Rgb {
    Rgb::new(
        blend8(a.r, b.r, amount),
        blend8(a.g, b.g, amount),
        blend8(a.b, b.b, amount),
    )
}

#[inline]
pub const fn scale_color(color: Rgb, scale: u8) -> Rgb {
    Rgb {
        r: scale8(color.r, scale),
        g: scale8(color.g, scale),
        b: scale8(color.b, scale),
    }
}

/// Fully saturated colour at the given hue
#[inline]
pub fn hue(hue: u8, val: u8) -> Rgb {
    hsv2rgb(Hsv { hue, sat: 255, val })
}
