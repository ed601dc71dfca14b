//! Domain error types.
//!
//! These errors represent malformed itineraries and market pools. They are
//! raised when input is assembled or validated, never during path search.

use super::{MarketId, SegmentPos, SegmentRange};

/// Domain-level errors for validation and data consistency.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// Itinerary has no segments
    #[error("itinerary must have at least one segment")]
    EmptyItinerary,

    /// More segments than positions can address
    #[error("itinerary has too many segments")]
    TooManySegments,

    /// Positions are 1-based
    #[error("segment position must be at least 1")]
    ZeroPosition,

    /// Range end lies before its start
    #[error("invalid segment range: {start} > {end}")]
    InvertedRange { start: SegmentPos, end: SegmentPos },

    /// Range is not inside the itinerary
    #[error("segment range {0} is outside the itinerary")]
    RangeOutsideItinerary(SegmentRange),

    /// Handle does not belong to the pool
    #[error("unknown market handle {0}")]
    UnknownMarket(MarketId),

    /// Side trip does not sit strictly inside its owner
    #[error("side trip {side_trip} is not strictly inside market {owner} range {range}")]
    SideTripOutsideMarket {
        owner: MarketId,
        range: SegmentRange,
        side_trip: SegmentRange,
    },

    /// Two side trips of one market share a segment
    #[error("market {owner} has overlapping side trips {first} and {second}")]
    OverlappingSideTrips {
        owner: MarketId,
        first: SegmentRange,
        second: SegmentRange,
    },

    /// Side-trip candidate does not fit inside the side trip
    #[error("side trip {side_trip} candidate {candidate} lies outside the side trip")]
    CandidateOutsideSideTrip {
        side_trip: SegmentRange,
        candidate: MarketId,
    },
}
