#![no_std]

pub mod classifier;
pub mod color;
pub mod control;
pub mod controller;
pub mod diagnostics;
pub mod gesture;
pub mod mode;
pub mod render;
pub mod sample;
pub mod scheduler;
pub mod storage;
pub mod transition;

pub use classifier::{
    CalibrationError, ClassifierConfig, Pose, PoseReading, PoseThreshold, PositionClassifier,
    ScalePreset, ThresholdTable,
};
pub use control::{Control, ControlChannel, ControlQueue, ControlSender};
pub use controller::{Gauntlet, GauntletConfig, SensorFailures};
pub use diagnostics::{DiagnosticEvent, DiagnosticSink, NoopDiagnostics};
pub use gesture::{GestureConfig, HoldGesture, PoseHistory, SequenceGesture};
pub use mode::{ModeId, ModeSlot, SpellType, Transition};
pub use render::Frame;
pub use sample::{Axis, PhysicalSample, RawSample};
pub use scheduler::{SchedulerConfig, TickResult};
pub use storage::{StoreError, ThresholdStore};

pub use color::{Hsv, Rgb};
pub use embassy_time::{Duration, Instant};

#[cfg(feature = "esp32-log")]
pub use diagnostics::EspPrintlnDiagnostics;

/// IMU read failure
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorError {
    /// Bus transaction failed
    Bus,
    /// No new data available yet
    NotReady,
}

/// 6-axis motion sensor
///
/// Implement this trait for the IMU driver of the target board.
pub trait SensorSource {
    /// Latest reading, timestamped by the driver
    fn read_sample(&mut self) -> Result<RawSample, SensorError>;

    /// Measure and store zero offsets while the sensor rests
    fn calibrate_zero_offsets(&mut self) -> Result<(), SensorError> {
        Ok(())
    }
}

/// Addressable LED strip
///
/// Pixels are staged and only shown on [`LedSink::flush`].
pub trait LedSink {
    fn set_pixel(&mut self, index: usize, color: Rgb);

    fn set_all_pixels(&mut self, color: Rgb);

    fn set_global_brightness(&mut self, brightness: u8);

    fn flush(&mut self);
}

impl<T: SensorSource + ?Sized> SensorSource for &mut T {
    fn read_sample(&mut self) -> Result<RawSample, SensorError> {
        (**self).read_sample()
    }

    fn calibrate_zero_offsets(&mut self) -> Result<(), SensorError> {
        (**self).calibrate_zero_offsets()
    }
}
