//! Travel segment type.
//!
//! A `TravelSegment` is one atomic leg of an itinerary: either a flight or a
//! connector standing in for unticketed surface travel (ARUNK).

use serde::{Deserialize, Serialize};

use super::LocCode;

/// What kind of travel a segment represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentKind {
    /// A ticketed flight
    Air,
    /// Surface or void travel with no flight; relaxes adjacency by one position
    Connector,
}

/// One leg of travel between two locations.
///
/// # Examples
///
/// ```
/// use fare_path::domain::{LocCode, TravelSegment};
///
/// let nyc = LocCode::parse("NYC").unwrap();
/// let bos = LocCode::parse("BOS").unwrap();
///
/// let flight = TravelSegment::air(nyc, bos);
/// assert!(!flight.is_connector());
///
/// let surface = TravelSegment::connector(bos, nyc);
/// assert!(surface.is_connector());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TravelSegment {
    pub origin: LocCode,
    pub destination: LocCode,
    pub kind: SegmentKind,
}

impl TravelSegment {
    pub fn new(origin: LocCode, destination: LocCode, kind: SegmentKind) -> Self {
        Self {
            origin,
            destination,
            kind,
        }
    }

    /// Creates a flight segment.
    pub fn air(origin: LocCode, destination: LocCode) -> Self {
        Self::new(origin, destination, SegmentKind::Air)
    }

    /// Creates a surface/void connector segment.
    pub fn connector(origin: LocCode, destination: LocCode) -> Self {
        Self::new(origin, destination, SegmentKind::Connector)
    }

    pub fn is_connector(&self) -> bool {
        self.kind == SegmentKind::Connector
    }
}
