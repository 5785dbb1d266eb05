//! Motion features and pattern selection for freecast.

use crate::color::{self, Rgb, scale_color, unit8};
use crate::sample::{Axis, GRAVITY, PhysicalSample, dominant_of};

/// Fewer samples than this are analysed as quiet motion
pub const MIN_ANALYSIS_SAMPLES: usize = 10;

/// Dynamic acceleration treated as full intensity, in m/s²
pub const FULL_SCALE_MOTION: f32 = 15.0;

/// Variance at which directionality reaches its floor, in (m/s²)²
pub const VARIANCE_SCALE: f32 = 50.0;

const INTENSITY_RANGE: (f32, f32) = (0.1, 1.0);
const DIRECTIONALITY_RANGE: (f32, f32) = (0.1, 0.9);

const BASE_PALETTE: [Rgb; PALETTE_LEN] = [
    color::RED,
    color::GREEN,
    color::BLUE,
    color::MAGENTA,
    color::YELLOW,
];

pub const PALETTE_LEN: usize = 5;

const PATTERN_NAME_SHOOTING_STARS: &str = "shooting_stars";
const PATTERN_NAME_WAVES: &str = "waves";
const PATTERN_NAME_SPARKLES: &str = "sparkles";
const PATTERN_NAME_COLOR_TRAILS: &str = "color_trails";
const PATTERN_NAME_PULSES: &str = "pulses";

/// Generative pattern archetypes shown while displaying
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PatternKind {
    ShootingStars,
    Waves,
    Sparkles,
    ColorTrails,
    Pulses,
}

impl PatternKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ShootingStars => PATTERN_NAME_SHOOTING_STARS,
            Self::Waves => PATTERN_NAME_WAVES,
            Self::Sparkles => PATTERN_NAME_SPARKLES,
            Self::ColorTrails => PATTERN_NAME_COLOR_TRAILS,
            Self::Pulses => PATTERN_NAME_PULSES,
        }
    }
}

/// Features of one recorded motion window
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MotionProfile {
    /// Peak dynamic acceleration with a square root response, 0.1-1.0
    pub intensity: f32,
    /// Inverse spread around the mean direction, 0.1-0.9
    pub directionality: f32,
    /// Axis with the largest mean absolute acceleration
    pub dominant_axis: Axis,
    /// Samples the profile was computed from
    pub samples: usize,
}

impl MotionProfile {
    /// Profile used when there is too little data
    pub const QUIET: Self = Self {
        intensity: INTENSITY_RANGE.0,
        directionality: 0.5,
        dominant_axis: Axis::X,
        samples: 0,
    };

    /// Extract motion features from a recording
    #[allow(clippy::cast_precision_loss)]
    pub fn analyze(samples: &[PhysicalSample]) -> Self {
        if samples.len() < MIN_ANALYSIS_SAMPLES {
            return Self {
                samples: samples.len(),
                ..Self::QUIET
            };
        }
        let count = samples.len() as f32;

        let mut mean = [0.0_f32; 3];
        let mut mean_abs = [0.0_f32; 3];
        let mut peak = 0.0_f32;
        for sample in samples {
            for (axis, value) in sample.accel.iter().enumerate() {
                mean[axis] += value;
                mean_abs[axis] += libm::fabsf(*value);
            }
            peak = peak.max(libm::fabsf(sample.magnitude() - GRAVITY));
        }
        let mean = mean.map(|sum| sum / count);
        let mean_abs = mean_abs.map(|sum| sum / count);

        let mut variance = 0.0_f32;
        for sample in samples {
            for (value, centre) in sample.accel.iter().zip(mean) {
                let delta = value - centre;
                variance += delta * delta;
            }
        }
        let variance = variance / count;

        let linear = (peak / FULL_SCALE_MOTION).clamp(0.0, 1.0);
        Self {
            intensity: libm::sqrtf(linear).clamp(INTENSITY_RANGE.0, INTENSITY_RANGE.1),
            directionality: (1.0 - variance / VARIANCE_SCALE)
                .clamp(DIRECTIONALITY_RANGE.0, DIRECTIONALITY_RANGE.1),
            dominant_axis: dominant_of(mean_abs),
            samples: samples.len(),
        }
    }

    /// Pick the pattern archetype. Rules are checked in order.
    pub fn pattern_kind(&self) -> PatternKind {
        let i = self.intensity;
        let d = self.directionality;

        if self.samples < MIN_ANALYSIS_SAMPLES {
            return PatternKind::Sparkles;
        }
        if i > 0.7 && d > 0.6 {
            return PatternKind::ShootingStars;
        }
        if i > 0.3 && i < 0.7 && d > 0.4 && d < 0.7 {
            // Vertical swings pulse instead of rolling around the ring
            return if self.dominant_axis == Axis::Z {
                PatternKind::Pulses
            } else {
                PatternKind::Waves
            };
        }
        if i > 0.6 && d < 0.4 {
            return PatternKind::Sparkles;
        }
        if i > 0.3 && i < 0.8 && d > 0.7 {
            return PatternKind::ColorTrails;
        }
        if d > 0.3 && d < 0.6 {
            return PatternKind::Pulses;
        }
        PatternKind::Sparkles
    }

    /// Base palette rotated by the dominant axis, dimmed for gentle motion
    pub fn palette(&self) -> [Rgb; PALETTE_LEN] {
        let level = unit8(0.5 + 0.5 * self.intensity);
        let mut palette = BASE_PALETTE;
        palette.rotate_left(self.dominant_axis.index());
        palette.map(|color| scale_color(color, level))
    }

    pub fn pattern(&self) -> Pattern {
        Pattern {
            kind: self.pattern_kind(),
            palette: self.palette(),
            intensity: self.intensity,
        }
    }
}

impl Default for MotionProfile {
    fn default() -> Self {
        Self::QUIET
    }
}

/// Pattern chosen for the display phase
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pattern {
    pub kind: PatternKind,
    pub palette: [Rgb; PALETTE_LEN],
    pub intensity: f32,
}

impl Default for Pattern {
    fn default() -> Self {
        MotionProfile::QUIET.pattern()
    }
}
