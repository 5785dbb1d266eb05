use crate::SensorSource;
use crate::classifier::{Pose, PoseThreshold, PositionClassifier, ThresholdError};
use crate::sample::dominant_of;

/// Samples averaged per pose by default
pub const DEFAULT_CALIBRATION_SAMPLES: usize = 50;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CalibrationError {
    /// `Unknown` cannot be calibrated
    UnknownPose,
    /// Every read failed
    NoSamples,
    /// The measured mean produced an unusable threshold
    InvalidThreshold,
}

impl From<ThresholdError> for CalibrationError {
    fn from(err: ThresholdError) -> Self {
        match err {
            ThresholdError::UnknownPose => Self::UnknownPose,
            ThresholdError::Invalid => Self::InvalidThreshold,
        }
    }
}

impl<const N: usize> PositionClassifier<N> {
    /// Measure `pose` while the wearer holds it and store its new threshold.
    ///
    /// After the warm-up reads, up to `samples` smoothed readings are averaged.
    /// Failed reads are skipped. The axis with the largest absolute mean
    /// becomes the pose axis and the threshold is the mean scaled by
    /// `threshold_scale`, keeping its sign. Other poses are left untouched.
    pub fn calibrate<S: SensorSource>(
        &mut self,
        pose: Pose,
        source: &mut S,
        samples: usize,
    ) -> Result<PoseThreshold, CalibrationError> {
        if pose == Pose::Unknown {
            return Err(CalibrationError::UnknownPose);
        }

        self.window.clear();
        for _ in 0..self.config.warmup_samples {
            if let Ok(raw) = source.read_sample() {
                self.window.write(raw);
            }
        }

        let mut sums = [0.0_f32; 3];
        let mut collected = 0_u32;
        for _ in 0..samples {
            let Ok(raw) = source.read_sample() else {
                continue;
            };
            self.window.write(raw);
            let physical = self.smoothed();
            for (sum, value) in sums.iter_mut().zip(physical.accel) {
                *sum += value;
            }
            collected += 1;
        }
        if collected == 0 {
            return Err(CalibrationError::NoSamples);
        }

        #[allow(clippy::cast_precision_loss)]
        let mean = sums.map(|sum| sum / collected as f32);
        let axis = dominant_of(mean);
        let threshold = PoseThreshold::new(axis, mean[axis.index()] * self.config.threshold_scale);
        self.thresholds.set(pose, threshold)?;
        Ok(threshold)
    }

    /// Calibrate every named pose in order.
    ///
    /// `prompt` is called before each pose so the caller can ask the wearer to
    /// move. Stops at the first failure; poses calibrated before it keep their
    /// new thresholds.
    pub fn calibrate_all<S, F>(
        &mut self,
        source: &mut S,
        samples: usize,
        mut prompt: F,
    ) -> Result<(), (Pose, CalibrationError)>
    where
        S: SensorSource,
        F: FnMut(Pose),
    {
        for pose in Pose::NAMED {
            prompt(pose);
            self.calibrate(pose, source, samples)
                .map_err(|err| (pose, err))?;
        }
        Ok(())
    }
}
