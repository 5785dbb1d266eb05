use crate::classifier::Pose;
use crate::sample::Axis;

/// Largest threshold magnitude accepted, in m/s²
pub const MAX_THRESHOLD: f32 = 40.0;

/// Magnitude of the default thresholds, in m/s²
pub const DEFAULT_THRESHOLD: f32 = 5.0;

/// Dominant axis and signed trigger value of one pose
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PoseThreshold {
    pub axis: Axis,
    pub threshold: f32,
}

impl PoseThreshold {
    pub const fn new(axis: Axis, threshold: f32) -> Self {
        Self { axis, threshold }
    }

    /// Finite, non-zero and within ±[`MAX_THRESHOLD`]
    pub fn is_valid(&self) -> bool {
        self.threshold.is_finite()
            && self.threshold != 0.0
            && libm::fabsf(self.threshold) <= MAX_THRESHOLD
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ThresholdError {
    /// `Unknown` has no threshold
    UnknownPose,
    /// Threshold is zero, non-finite or out of range
    Invalid,
}

/// Thresholds of the six named poses, indexed by [`Pose::index`]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ThresholdTable {
    entries: [PoseThreshold; Pose::COUNT],
}

impl ThresholdTable {
    pub const DEFAULT: Self = Self {
        entries: [
            // Offer: palm up
            PoseThreshold::new(Axis::Z, DEFAULT_THRESHOLD),
            // Calm: palm down
            PoseThreshold::new(Axis::Z, -DEFAULT_THRESHOLD),
            // Oath: fingers up
            PoseThreshold::new(Axis::Y, -DEFAULT_THRESHOLD),
            // Dig: fingers down
            PoseThreshold::new(Axis::Y, DEFAULT_THRESHOLD),
            // Shield: palm out
            PoseThreshold::new(Axis::X, -DEFAULT_THRESHOLD),
            // Null: palm in
            PoseThreshold::new(Axis::X, DEFAULT_THRESHOLD),
        ],
    };

    pub const fn from_entries(entries: [PoseThreshold; Pose::COUNT]) -> Self {
        Self { entries }
    }

    pub const fn entries(&self) -> &[PoseThreshold; Pose::COUNT] {
        &self.entries
    }

    pub fn get(&self, pose: Pose) -> Option<PoseThreshold> {
        self.entries.get(pose.index()).copied()
    }

    pub fn set(&mut self, pose: Pose, threshold: PoseThreshold) -> Result<(), ThresholdError> {
        if !threshold.is_valid() {
            return Err(ThresholdError::Invalid);
        }
        let slot = self
            .entries
            .get_mut(pose.index())
            .ok_or(ThresholdError::UnknownPose)?;
        *slot = threshold;
        Ok(())
    }

    /// Returns the first pose whose threshold is invalid
    pub fn validate(&self) -> Result<(), Pose> {
        for pose in Pose::NAMED {
            if !self.entries[pose.index()].is_valid() {
                return Err(pose);
            }
        }
        Ok(())
    }

    /// Named poses with their thresholds, in table order
    pub fn iter(&self) -> impl Iterator<Item = (Pose, PoseThreshold)> + '_ {
        Pose::NAMED.into_iter().zip(self.entries.iter().copied())
    }
}

impl Default for ThresholdTable {
    fn default() -> Self {
        Self::DEFAULT
    }
}
