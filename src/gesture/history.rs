use heapless::HistoryBuffer;

use crate::classifier::PoseReading;

/// Readings kept for lookback
pub const POSE_HISTORY_LEN: usize = 20;

/// Rolling window of recent classifier output
pub struct PoseHistory<const N: usize = POSE_HISTORY_LEN> {
    readings: HistoryBuffer<PoseReading, N>,
}

impl<const N: usize> PoseHistory<N> {
    pub const fn new() -> Self {
        Self {
            readings: HistoryBuffer::new(),
        }
    }

    /// Append a reading, overwriting the oldest once full
    pub fn push(&mut self, reading: PoseReading) {
        self.readings.write(reading);
    }

    pub fn latest(&self) -> Option<PoseReading> {
        self.readings.recent().copied()
    }

    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.len() == 0
    }

    pub const fn capacity(&self) -> usize {
        N
    }

    /// Readings from oldest to newest
    pub fn iter(&self) -> impl Iterator<Item = &PoseReading> + '_ {
        self.readings.oldest_ordered()
    }

    /// Most recent reading whose pose differs from the one before it
    pub fn last_change(&self) -> Option<PoseReading> {
        let mut previous = None;
        let mut change = None;
        for reading in self.iter() {
            if previous.is_some_and(|pose| pose != reading.pose) {
                change = Some(*reading);
            }
            previous = Some(reading.pose);
        }
        change
    }

    pub fn clear(&mut self) {
        self.readings.clear();
    }
}

impl<const N: usize> Default for PoseHistory<N> {
    fn default() -> Self {
        Self::new()
    }
}
