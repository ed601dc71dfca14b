//! Segment positions and ranges.
//!
//! A `SegmentPos` is the 1-based order of a travel segment within the main
//! itinerary. Side trips keep the positions of the main itinerary, so a
//! `SegmentRange` means the same thing wherever it appears.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::DomainError;

/// Position of a travel segment within the main itinerary (1-based).
///
/// # Examples
///
/// ```
/// use fare_path::domain::SegmentPos;
///
/// let pos = SegmentPos::new(2).unwrap();
/// assert_eq!(pos.get(), 2);
/// assert_eq!(pos.next().get(), 3);
///
/// // Positions start at 1
/// assert!(SegmentPos::new(0).is_err());
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(try_from = "u16", into = "u16")]
pub struct SegmentPos(u16);

impl SegmentPos {
    /// The first segment of any itinerary.
    pub const FIRST: SegmentPos = SegmentPos(1);

    /// Creates a position, rejecting zero.
    pub fn new(value: u16) -> Result<Self, DomainError> {
        if value == 0 {
            return Err(DomainError::ZeroPosition);
        }
        Ok(SegmentPos(value))
    }

    /// Returns the raw 1-based value.
    pub fn get(self) -> u16 {
        self.0
    }

    /// Returns the following position.
    pub fn next(self) -> Self {
        SegmentPos(self.0.saturating_add(1))
    }

    /// Zero-based index into a segment list.
    pub(crate) fn index(self) -> usize {
        usize::from(self.0) - 1
    }
}

impl fmt::Display for SegmentPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl TryFrom<u16> for SegmentPos {
    type Error = DomainError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        SegmentPos::new(value)
    }
}

impl From<SegmentPos> for u16 {
    fn from(value: SegmentPos) -> Self {
        value.0
    }
}

/// An inclusive range of segment positions.
///
/// # Invariants
///
/// - `start <= end`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct SegmentRange {
    start: SegmentPos,
    end: SegmentPos,
}

impl SegmentRange {
    /// Creates a range covering `start..=end`.
    ///
    /// # Examples
    ///
    /// ```
    /// use fare_path::domain::{SegmentPos, SegmentRange};
    ///
    /// let range = SegmentRange::from_raw(2, 4).unwrap();
    /// assert_eq!(range.len(), 3);
    /// assert!(range.contains(SegmentPos::new(3).unwrap()));
    ///
    /// assert!(SegmentRange::from_raw(4, 2).is_err());
    /// ```
    pub fn new(start: SegmentPos, end: SegmentPos) -> Result<Self, DomainError> {
        if start > end {
            return Err(DomainError::InvertedRange { start, end });
        }
        Ok(SegmentRange { start, end })
    }

    /// Creates a range from raw 1-based positions.
    pub fn from_raw(start: u16, end: u16) -> Result<Self, DomainError> {
        SegmentRange::new(SegmentPos::new(start)?, SegmentPos::new(end)?)
    }

    /// First position in the range.
    pub fn start(&self) -> SegmentPos {
        self.start
    }

    /// Last position in the range (inclusive).
    pub fn end(&self) -> SegmentPos {
        self.end
    }

    /// Number of segments covered.
    pub fn len(&self) -> usize {
        usize::from(self.end.0 - self.start.0) + 1
    }

    /// A range always covers at least one segment.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn contains(&self, pos: SegmentPos) -> bool {
        self.start <= pos && pos <= self.end
    }

    pub fn contains_range(&self, other: &SegmentRange) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// True when `other` sits inside this range without touching either end.
    pub fn strictly_contains(&self, other: &SegmentRange) -> bool {
        self.start < other.start && other.end < self.end
    }

    pub fn overlaps(&self, other: &SegmentRange) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    /// Iterates the positions in order.
    pub fn positions(&self) -> impl Iterator<Item = SegmentPos> + use<> {
        (self.start.0..=self.end.0).map(SegmentPos)
    }
}

impl fmt::Display for SegmentRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

#[derive(Deserialize)]
struct RawRange {
    start: SegmentPos,
    end: SegmentPos,
}

impl<'de> Deserialize<'de> for SegmentRange {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = RawRange::deserialize(deserializer)?;
        SegmentRange::new(raw.start, raw.end).map_err(serde::de::Error::custom)
    }
}
