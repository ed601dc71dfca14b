//! Candidate fare markets.
//!
//! Markets are produced upstream and handed to the planner in a
//! `MarketPool`. The pool is an arena: paths refer to markets through
//! `MarketId` handles, so one market can appear in many paths without ever
//! being copied.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{DomainError, Itinerary, SegmentRange};

/// Handle to a market inside a `MarketPool`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct MarketId(pub usize);

impl fmt::Display for MarketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A detour owned by a market: leaves and rejoins the market's route at the
/// same point and needs its own decomposition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SideTrip {
    /// Segments of the detour, in main itinerary positions.
    pub range: SegmentRange,

    /// Markets that may price the detour, in pool order.
    #[serde(default)]
    pub candidates: Vec<MarketId>,
}

impl SideTrip {
    pub fn new(range: SegmentRange, candidates: Vec<MarketId>) -> Self {
        Self { range, candidates }
    }
}

/// One possible grouping of segments that could be priced as a unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateMarket {
    /// Segments covered, inclusive.
    pub range: SegmentRange,

    /// Side trips owned by this market, in itinerary order.
    #[serde(default)]
    pub side_trips: Vec<SideTrip>,
}

impl CandidateMarket {
    /// A market with no side trips.
    pub fn new(range: SegmentRange) -> Self {
        Self {
            range,
            side_trips: Vec::new(),
        }
    }

    /// Adds an owned side trip.
    pub fn with_side_trip(mut self, side_trip: SideTrip) -> Self {
        self.side_trips.push(side_trip);
        self
    }

    pub fn owns_side_trips(&self) -> bool {
        !self.side_trips.is_empty()
    }
}

/// Ordered arena of candidate markets.
///
/// Insertion order is pool order, which drives the order of the output
/// matrix.
///
/// # Examples
///
/// ```
/// use fare_path::domain::{CandidateMarket, MarketPool, SegmentRange, SideTrip};
///
/// let mut pool = MarketPool::new();
/// let st = pool.push(CandidateMarket::new(SegmentRange::from_raw(2, 3).unwrap()));
/// let owner = pool.push(
///     CandidateMarket::new(SegmentRange::from_raw(1, 4).unwrap())
///         .with_side_trip(SideTrip::new(SegmentRange::from_raw(2, 3).unwrap(), vec![st])),
/// );
///
/// assert_eq!(pool.len(), 2);
/// assert!(pool.get(owner).unwrap().owns_side_trips());
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MarketPool {
    markets: Vec<CandidateMarket>,
}

impl MarketPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a market and returns its handle.
    pub fn push(&mut self, market: CandidateMarket) -> MarketId {
        self.markets.push(market);
        MarketId(self.markets.len() - 1)
    }

    pub fn get(&self, id: MarketId) -> Option<&CandidateMarket> {
        self.markets.get(id.0)
    }

    /// Returns the market or an `UnknownMarket` error.
    pub fn require(&self, id: MarketId) -> Result<&CandidateMarket, DomainError> {
        self.get(id).ok_or(DomainError::UnknownMarket(id))
    }

    pub fn len(&self) -> usize {
        self.markets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markets.is_empty()
    }

    /// All handles in pool order.
    pub fn ids(&self) -> Vec<MarketId> {
        (0..self.markets.len()).map(MarketId).collect()
    }

    /// Iterates `(handle, market)` pairs in pool order.
    pub fn iter(&self) -> impl Iterator<Item = (MarketId, &CandidateMarket)> {
        self.markets
            .iter()
            .enumerate()
            .map(|(i, market)| (MarketId(i), market))
    }

    /// Markets lying entirely inside `range` that own no side trips, in pool
    /// order. This is the usual sub-pool for a side trip over `range`.
    pub fn candidates_within(&self, range: SegmentRange) -> Vec<MarketId> {
        self.iter()
            .filter(|(_, m)| !m.owns_side_trips() && range.contains_range(&m.range))
            .map(|(id, _)| id)
            .collect()
    }

    /// Checks the pool against the itinerary it was generated for.
    ///
    /// # Errors
    ///
    /// Returns `Err` if any market or side trip lies outside its container,
    /// side trips of one market overlap, or a side-trip candidate handle is
    /// unknown or does not fit its side trip.
    pub fn validate(&self, itinerary: &Itinerary) -> Result<(), DomainError> {
        let full = itinerary.full_range();

        for (id, market) in self.iter() {
            if !full.contains_range(&market.range) {
                return Err(DomainError::RangeOutsideItinerary(market.range));
            }

            for (i, side_trip) in market.side_trips.iter().enumerate() {
                if !market.range.strictly_contains(&side_trip.range) {
                    return Err(DomainError::SideTripOutsideMarket {
                        owner: id,
                        range: market.range,
                        side_trip: side_trip.range,
                    });
                }

                if let Some(other) = market.side_trips[..i]
                    .iter()
                    .find(|other| other.range.overlaps(&side_trip.range))
                {
                    return Err(DomainError::OverlappingSideTrips {
                        owner: id,
                        first: other.range,
                        second: side_trip.range,
                    });
                }

                for &candidate in &side_trip.candidates {
                    let inner = self.require(candidate)?;
                    if !side_trip.range.contains_range(&inner.range) {
                        return Err(DomainError::CandidateOutsideSideTrip {
                            side_trip: side_trip.range,
                            candidate,
                        });
                    }
                }
            }
        }

        Ok(())
    }
}
