//! Fare market paths and the path matrix.
//!
//! A `FareMarketPath` is one complete tiling of a segment range by candidate
//! markets, plus the side-trip sub-paths chosen for the markets that own
//! side trips. Markets are held as `MarketId` handles; side-trip sub-paths
//! are shared through `Arc` because the same alternative is attached to
//! many output paths.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::domain::MarketId;

/// Chosen side-trip sub-paths, keyed by the owning market.
///
/// Each entry holds one sub-path per side trip owned by the market, in the
/// market's side-trip order.
pub type SideTripSelection = BTreeMap<MarketId, Vec<Arc<FareMarketPath>>>;

/// One complete sequence of markets covering a range.
///
/// # Invariants
///
/// - Markets are contiguous (allowing connector gaps) and span the range
///   they were built for
/// - Every key of `side_trips` is a market of this path
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FareMarketPath {
    markets: Vec<MarketId>,
    side_trips: SideTripSelection,
}

impl FareMarketPath {
    /// Creates a path with no side-trip selection.
    pub fn new(markets: Vec<MarketId>) -> Self {
        Self {
            markets,
            side_trips: BTreeMap::new(),
        }
    }

    /// Markets in travel order.
    pub fn markets(&self) -> &[MarketId] {
        &self.markets
    }

    /// Number of top-level markets.
    pub fn market_count(&self) -> usize {
        self.markets.len()
    }

    pub fn contains(&self, id: MarketId) -> bool {
        self.markets.contains(&id)
    }

    pub fn side_trips(&self) -> &SideTripSelection {
        &self.side_trips
    }

    /// Sub-paths chosen for the side trips of `id`, if it owns any.
    pub fn side_trip_paths(&self, id: MarketId) -> Option<&[Arc<FareMarketPath>]> {
        self.side_trips.get(&id).map(Vec::as_slice)
    }

    pub fn has_side_trips(&self) -> bool {
        !self.side_trips.is_empty()
    }

    /// Attaches a side-trip selection, replacing any existing entries for
    /// the same markets.
    pub(crate) fn attach(&mut self, selection: SideTripSelection) {
        self.side_trips.extend(selection);
    }

    /// Number of fare breaks: top-level markets plus every market of the
    /// chosen side-trip sub-paths.
    pub fn fare_break_count(&self) -> usize {
        self.markets.len()
            + self
                .side_trips
                .values()
                .flatten()
                .map(|sub| sub.fare_break_count())
                .sum::<usize>()
    }

    /// Every market handle reachable from this path, side trips included.
    ///
    /// Top-level markets come first; handles may repeat when a market is
    /// used in more than one place.
    pub fn all_markets(&self) -> Vec<MarketId> {
        let mut out = self.markets.clone();
        for sub in self.side_trips.values().flatten() {
            out.extend(sub.all_markets());
        }
        out
    }
}

/// All paths found for one itinerary, in discovery order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FareMarketPathMatrix {
    paths: Vec<FareMarketPath>,
}

impl FareMarketPathMatrix {
    pub fn new(paths: Vec<FareMarketPath>) -> Self {
        Self { paths }
    }

    pub fn paths(&self) -> &[FareMarketPath] {
        &self.paths
    }

    pub fn into_paths(self) -> Vec<FareMarketPath> {
        self.paths
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// An empty matrix means the itinerary has no priceable decomposition.
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FareMarketPath> {
        self.paths.iter()
    }
}

impl<'a> IntoIterator for &'a FareMarketPathMatrix {
    type Item = &'a FareMarketPath;
    type IntoIter = std::slice::Iter<'a, FareMarketPath>;

    fn into_iter(self) -> Self::IntoIter {
        self.paths.iter()
    }
}
