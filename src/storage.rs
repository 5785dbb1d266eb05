//! Persistent threshold record.
//!
//! The table is stored as one fixed size little-endian record:
//!
//! | offset | size | field                          |
//! |--------|------|--------------------------------|
//! | 0      | 4    | magic `"GTH1"`                 |
//! | 4      | 5×6  | per pose: axis `u8`, `f32` |
//!
//! Entries follow [`Pose::NAMED`] order.

use crate::classifier::{Pose, PoseThreshold, ThresholdTable};
use crate::sample::Axis;

/// `"GTH1"` read as a little-endian `u32`
pub const RECORD_MAGIC: u32 = 0x3148_5447;

const ENTRY_LEN: usize = 5;
const HEADER_LEN: usize = 4;

/// Encoded record size in bytes
pub const RECORD_LEN: usize = HEADER_LEN + ENTRY_LEN * Pose::COUNT;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StoreError {
    /// Backing storage could not be read or written
    Unavailable,
    /// Record shorter than [`RECORD_LEN`]
    Truncated,
    BadMagic,
    /// Entry of the given pose has a bad axis or threshold
    InvalidEntry(Pose),
}

/// Non-volatile home of the threshold table
pub trait ThresholdStore {
    fn load(&mut self) -> Result<ThresholdTable, StoreError>;

    fn save(&mut self, table: &ThresholdTable) -> Result<(), StoreError>;
}

pub fn encode(table: &ThresholdTable) -> [u8; RECORD_LEN] {
    let mut record = [0u8; RECORD_LEN];
    record[..HEADER_LEN].copy_from_slice(&RECORD_MAGIC.to_le_bytes());

    for (entry, chunk) in table
        .entries()
        .iter()
        .zip(record[HEADER_LEN..].chunks_exact_mut(ENTRY_LEN))
    {
        chunk[0] = entry.axis as u8;
        chunk[1..].copy_from_slice(&entry.threshold.to_le_bytes());
    }
    record
}

/// Decode and validate a record. Trailing bytes are ignored.
pub fn decode(bytes: &[u8]) -> Result<ThresholdTable, StoreError> {
    if bytes.len() < RECORD_LEN {
        return Err(StoreError::Truncated);
    }

    let mut magic = [0u8; HEADER_LEN];
    magic.copy_from_slice(&bytes[..HEADER_LEN]);
    if u32::from_le_bytes(magic) != RECORD_MAGIC {
        return Err(StoreError::BadMagic);
    }

    let mut entries = *ThresholdTable::DEFAULT.entries();
    let chunks = bytes[HEADER_LEN..RECORD_LEN].chunks_exact(ENTRY_LEN);
    for ((pose, entry), chunk) in Pose::NAMED.into_iter().zip(entries.iter_mut()).zip(chunks) {
        let axis = Axis::from_raw(chunk[0]).ok_or(StoreError::InvalidEntry(pose))?;
        let mut value = [0u8; 4];
        value.copy_from_slice(&chunk[1..]);
        let threshold = PoseThreshold::new(axis, f32::from_le_bytes(value));
        if !threshold.is_valid() {
            return Err(StoreError::InvalidEntry(pose));
        }
        *entry = threshold;
    }

    Ok(ThresholdTable::from_entries(entries))
}
