//! Motion samples as produced by the IMU and as consumed by the classifier.

use embassy_time::Instant;

/// Degrees per second per raw gyro LSB at the ±500 °/s range.
pub const GYRO_DPS_PER_LSB: f32 = 500.0 / 32768.0;

/// Standard gravity in m/s²
pub const GRAVITY: f32 = 9.81;

const AXIS_ID_X: u8 = 0;
const AXIS_ID_Y: u8 = 1;
const AXIS_ID_Z: u8 = 2;

/// Sensor axis
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Axis {
    X = AXIS_ID_X,
    Y = AXIS_ID_Y,
    Z = AXIS_ID_Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn from_raw(value: u8) -> Option<Self> {
        Some(match value {
            AXIS_ID_X => Self::X,
            AXIS_ID_Y => Self::Y,
            AXIS_ID_Z => Self::Z,
            _ => return None,
        })
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::X => "x",
            Self::Y => "y",
            Self::Z => "z",
        }
    }
}

/// Raw IMU reading, in sensor LSBs
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RawSample {
    pub accel: [i16; 3],
    pub gyro: [i16; 3],
    pub timestamp: Instant,
}

impl RawSample {
    pub const fn new(accel: [i16; 3], gyro: [i16; 3], timestamp: Instant) -> Self {
        Self {
            accel,
            gyro,
            timestamp,
        }
    }

    /// Sample with a still gyro
    pub const fn from_accel(accel: [i16; 3], timestamp: Instant) -> Self {
        Self::new(accel, [0; 3], timestamp)
    }
}

/// Reading converted to physical units.
///
/// Acceleration is in m/s², angular rate in °/s.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct PhysicalSample {
    pub accel: [f32; 3],
    pub gyro: [f32; 3],
}

impl PhysicalSample {
    pub const ZERO: Self = Self {
        accel: [0.0; 3],
        gyro: [0.0; 3],
    };

    pub const fn new(accel: [f32; 3], gyro: [f32; 3]) -> Self {
        Self { accel, gyro }
    }

    /// Acceleration along the given axis
    pub const fn axis(&self, axis: Axis) -> f32 {
        self.accel[axis.index()]
    }

    /// Euclidean norm of the acceleration vector
    pub fn magnitude(&self) -> f32 {
        let [x, y, z] = self.accel;
        libm::sqrtf(x * x + y * y + z * z)
    }

    /// Axis with the largest absolute acceleration. Ties resolve to the lower axis.
    pub fn dominant_axis(&self) -> Axis {
        dominant_of(self.accel)
    }
}

/// Index of the largest absolute component, ties resolving to the lower axis
pub(crate) fn dominant_of(values: [f32; 3]) -> Axis {
    let mut best = Axis::X;
    // Strict comparison: equal magnitudes keep X over Y and Y over Z
    for axis in [Axis::Y, Axis::Z] {
        if libm::fabsf(values[axis.index()]) > libm::fabsf(values[best.index()]) {
            best = axis;
        }
    }
    best
}
