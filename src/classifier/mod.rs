//! Dominant-axis pose classification.
//!
//! Raw samples are smoothed over a short moving average window, scaled to m/s²
//! with a mounting correction, and matched against one signed threshold per pose.
//! A pose is active when its axis crosses the threshold and dominates the other
//! two axes; the most confident active pose wins.

mod calibration;
mod thresholds;

use embassy_time::Instant;
use heapless::HistoryBuffer;

pub use calibration::{CalibrationError, DEFAULT_CALIBRATION_SAMPLES};
pub use thresholds::{
    DEFAULT_THRESHOLD, MAX_THRESHOLD, PoseThreshold, ThresholdError, ThresholdTable,
};

use crate::color::{self, Rgb};
use crate::sample::{Axis, GYRO_DPS_PER_LSB, PhysicalSample, RawSample};
use crate::storage::{StoreError, ThresholdStore};

/// Moving average window of the default classifier
pub const DEFAULT_WINDOW: usize = 3;

/// Default raw-to-m/s² factor
pub const DEFAULT_SCALE: f32 = 0.0012;

/// Readings below this confidence are reported as `Unknown`
pub const DEFAULT_MIN_CONFIDENCE: f32 = 30.0;

/// Fraction of the calibrated mean used as the new threshold
pub const DEFAULT_THRESHOLD_SCALE: f32 = 0.8;

/// Reads discarded before calibration starts averaging
pub const DEFAULT_WARMUP_SAMPLES: usize = 10;

/// Confidence is 100 at this multiple of the threshold
const FULL_CONFIDENCE_RATIO: f32 = 1.5;

const POSE_NAME_OFFER: &str = "offer";
const POSE_NAME_CALM: &str = "calm";
const POSE_NAME_OATH: &str = "oath";
const POSE_NAME_DIG: &str = "dig";
const POSE_NAME_SHIELD: &str = "shield";
const POSE_NAME_NULL: &str = "null";
const POSE_NAME_UNKNOWN: &str = "unknown";

/// Static hand pose
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Pose {
    /// Palm up, +Z
    Offer = 0,
    /// Palm down, -Z
    Calm = 1,
    /// Fingers up, -Y
    Oath = 2,
    /// Fingers down, +Y
    Dig = 3,
    /// Palm facing out, -X
    Shield = 4,
    /// Palm facing in, +X
    Null = 5,
    Unknown = 6,
}

impl Pose {
    /// Number of named poses
    pub const COUNT: usize = 6;

    /// Named poses in table order
    pub const NAMED: [Pose; Pose::COUNT] = [
        Pose::Offer,
        Pose::Calm,
        Pose::Oath,
        Pose::Dig,
        Pose::Shield,
        Pose::Null,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn from_index(index: usize) -> Option<Self> {
        if index < Self::COUNT {
            Some(Self::NAMED[index])
        } else {
            None
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            POSE_NAME_OFFER => Self::Offer,
            POSE_NAME_CALM => Self::Calm,
            POSE_NAME_OATH => Self::Oath,
            POSE_NAME_DIG => Self::Dig,
            POSE_NAME_SHIELD => Self::Shield,
            POSE_NAME_NULL => Self::Null,
            POSE_NAME_UNKNOWN => Self::Unknown,
            _ => return None,
        })
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Offer => POSE_NAME_OFFER,
            Self::Calm => POSE_NAME_CALM,
            Self::Oath => POSE_NAME_OATH,
            Self::Dig => POSE_NAME_DIG,
            Self::Shield => POSE_NAME_SHIELD,
            Self::Null => POSE_NAME_NULL,
            Self::Unknown => POSE_NAME_UNKNOWN,
        }
    }

    /// Indicator colour shown while idle
    pub const fn color(self) -> Rgb {
        match self {
            Self::Offer => color::PURPLE,
            Self::Calm => color::YELLOW,
            Self::Oath => color::RED,
            Self::Dig => color::GREEN,
            Self::Shield => color::BLUE,
            Self::Null => color::ORANGE,
            Self::Unknown => color::WHITE,
        }
    }
}

/// Result of one classifier evaluation
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PoseReading {
    pub pose: Pose,
    /// 0-100
    pub confidence: u8,
    pub timestamp: Instant,
}

impl PoseReading {
    pub const fn unknown(timestamp: Instant) -> Self {
        Self {
            pose: Pose::Unknown,
            confidence: 0,
            timestamp,
        }
    }
}

/// Accelerometer scale factors for the supported IMU variants
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ScalePreset {
    /// Empirical factor of the reference build
    Default,
    /// MPU-9250 at ±4 g
    Mpu9250Range4G,
    /// MPU-6050 at ±2 g
    Mpu6050Range2G,
}

impl ScalePreset {
    pub const fn scale(self) -> f32 {
        match self {
            Self::Default => DEFAULT_SCALE,
            Self::Mpu9250Range4G => 4.0 * crate::sample::GRAVITY / 32768.0,
            Self::Mpu6050Range2G => 2.0 * crate::sample::GRAVITY / 32768.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClassifierConfig {
    /// Raw LSB to m/s²
    pub scale: f32,
    /// Axis whose sign is flipped to correct for mounting
    pub inverted_axis: Option<Axis>,
    /// Confidence floor, 0-100
    pub min_confidence: f32,
    /// Calibrated threshold as a fraction of the measured mean
    pub threshold_scale: f32,
    /// Reads discarded at the start of calibration
    pub warmup_samples: usize,
}

impl ClassifierConfig {
    pub const DEFAULT: Self = Self {
        scale: DEFAULT_SCALE,
        inverted_axis: Some(Axis::X),
        min_confidence: DEFAULT_MIN_CONFIDENCE,
        threshold_scale: DEFAULT_THRESHOLD_SCALE,
        warmup_samples: DEFAULT_WARMUP_SAMPLES,
    };
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Pose classifier with an `N` sample moving average window (`N` > 0)
pub struct PositionClassifier<const N: usize = DEFAULT_WINDOW> {
    config: ClassifierConfig,
    thresholds: ThresholdTable,
    window: HistoryBuffer<RawSample, N>,
    last_physical: PhysicalSample,
}

impl<const N: usize> PositionClassifier<N> {
    pub const fn new(config: ClassifierConfig) -> Self {
        Self::with_thresholds(config, ThresholdTable::DEFAULT)
    }

    pub const fn with_thresholds(config: ClassifierConfig, thresholds: ThresholdTable) -> Self {
        Self {
            config,
            thresholds,
            window: HistoryBuffer::new(),
            last_physical: PhysicalSample::ZERO,
        }
    }

    /// Push a raw sample into the window and classify the smoothed result.
    ///
    /// Never fails; ambiguous input resolves to `Unknown`.
    pub fn classify(&mut self, raw: RawSample) -> PoseReading {
        self.window.write(raw);
        let physical = self.smoothed();
        self.last_physical = physical;
        self.evaluate(&physical, raw.timestamp)
    }

    /// Classify an already converted sample
    pub fn evaluate(&self, sample: &PhysicalSample, timestamp: Instant) -> PoseReading {
        let mut best = Pose::Unknown;
        let mut best_confidence = 0.0_f32;

        for (pose, threshold) in self.thresholds.iter() {
            let Some(confidence) = pose_confidence(sample, threshold) else {
                continue;
            };
            if confidence > best_confidence {
                best = pose;
                best_confidence = confidence;
            }
        }

        if best == Pose::Unknown || best_confidence < self.config.min_confidence {
            return PoseReading::unknown(timestamp);
        }

        PoseReading {
            pose: best,
            confidence: confidence_u8(best_confidence),
            timestamp,
        }
    }

    /// Mean of the buffered raw samples in physical units
    pub fn smoothed(&self) -> PhysicalSample {
        let samples = self.window.as_slice();
        if samples.is_empty() {
            return PhysicalSample::ZERO;
        }

        let mut accel = [0.0_f32; 3];
        let mut gyro = [0.0_f32; 3];
        for sample in samples {
            accumulate(&mut accel, sample.accel);
            accumulate(&mut gyro, sample.gyro);
        }

        #[allow(clippy::cast_precision_loss)]
        let count = samples.len() as f32;
        self.to_physical(accel.map(|sum| sum / count), gyro.map(|sum| sum / count))
    }

    /// Scale averaged raw values and apply the mounting correction
    pub fn to_physical(&self, raw_accel: [f32; 3], raw_gyro: [f32; 3]) -> PhysicalSample {
        let mut sample = PhysicalSample::new(
            raw_accel.map(|value| value * self.config.scale),
            raw_gyro.map(|value| value * GYRO_DPS_PER_LSB),
        );
        if let Some(axis) = self.config.inverted_axis {
            sample.accel[axis.index()] = -sample.accel[axis.index()];
            sample.gyro[axis.index()] = -sample.gyro[axis.index()];
        }
        sample
    }

    /// Smoothed sample from the last `classify` call
    pub const fn last_physical(&self) -> PhysicalSample {
        self.last_physical
    }

    /// Drop buffered samples
    pub fn reset_window(&mut self) {
        self.window.clear();
    }

    pub const fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    pub const fn scale(&self) -> f32 {
        self.config.scale
    }

    pub fn set_scale(&mut self, scale: f32) {
        self.config.scale = scale;
    }

    pub fn set_scale_preset(&mut self, preset: ScalePreset) {
        self.config.scale = preset.scale();
    }

    pub const fn thresholds(&self) -> &ThresholdTable {
        &self.thresholds
    }

    pub fn threshold(&self, pose: Pose) -> Option<PoseThreshold> {
        self.thresholds.get(pose)
    }

    pub fn set_threshold(
        &mut self,
        pose: Pose,
        threshold: PoseThreshold,
    ) -> Result<(), ThresholdError> {
        self.thresholds.set(pose, threshold)
    }

    /// Replace the whole table. An invalid table is rejected and the current one kept.
    pub fn set_thresholds(&mut self, table: ThresholdTable) -> Result<(), Pose> {
        table.validate()?;
        self.thresholds = table;
        Ok(())
    }

    pub fn reset_thresholds(&mut self) {
        self.thresholds = ThresholdTable::DEFAULT;
    }

    /// Load thresholds from `store`, falling back to the defaults.
    ///
    /// Returns `true` when the stored table was applied.
    pub fn load_thresholds<S: ThresholdStore>(&mut self, store: &mut S) -> bool {
        let loaded = store
            .load()
            .ok()
            .and_then(|table| self.set_thresholds(table).ok());
        if loaded.is_none() {
            self.reset_thresholds();
            return false;
        }
        true
    }

    pub fn save_thresholds<S: ThresholdStore>(&self, store: &mut S) -> Result<(), StoreError> {
        store.save(&self.thresholds)
    }
}

impl Default for PositionClassifier {
    fn default() -> Self {
        Self::new(ClassifierConfig::DEFAULT)
    }
}

/// Confidence of `threshold` for `sample`, `None` when the pose is not active
fn pose_confidence(sample: &PhysicalSample, threshold: PoseThreshold) -> Option<f32> {
    let limit = threshold.threshold;
    let value = sample.axis(threshold.axis);

    let crosses = if limit > 0.0 {
        value > limit
    } else if limit < 0.0 {
        value < limit
    } else {
        false
    };
    if !crosses {
        return None;
    }

    let magnitude = libm::fabsf(value);
    let dominates = Axis::ALL
        .into_iter()
        .filter(|axis| *axis != threshold.axis)
        .all(|axis| magnitude > libm::fabsf(sample.axis(axis)));
    if !dominates {
        return None;
    }

    let confidence = value / (FULL_CONFIDENCE_RATIO * limit) * 100.0;
    Some(confidence.clamp(0.0, 100.0))
}

fn accumulate(sums: &mut [f32; 3], values: [i16; 3]) {
    for (sum, value) in sums.iter_mut().zip(values) {
        *sum += f32::from(value);
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn confidence_u8(confidence: f32) -> u8 {
    (confidence.clamp(0.0, 100.0) + 0.5) as u8
}
