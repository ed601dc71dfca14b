//! Side-trip resolution.
//!
//! A market owning side trips is only usable if each of its side trips can
//! itself be decomposed. Each side trip is handed back to the path builder
//! over its own range and sub-pool, with side-trip owners excluded since
//! side trips do not nest.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, trace};

use crate::domain::{DomainError, Itinerary, MarketId, MarketPool};

use super::build::build_paths;
use super::path::FareMarketPath;

/// Alternative sub-paths for every side trip of one market.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnerAlternatives {
    /// The owning market.
    pub market: MarketId,

    /// One list of alternatives per owned side trip, in side-trip order.
    /// Never empty lists once resolved.
    pub side_trips: Vec<Vec<Arc<FareMarketPath>>>,
}

/// Resolves side trips for main paths, remembering each market's outcome
/// for the rest of the run.
pub struct SideTripResolver<'a> {
    itinerary: &'a Itinerary,
    pool: &'a MarketPool,
    /// `None` marks a market with a side trip that has no decomposition.
    resolved: HashMap<MarketId, Option<Arc<OwnerAlternatives>>>,
}

impl<'a> SideTripResolver<'a> {
    pub fn new(itinerary: &'a Itinerary, pool: &'a MarketPool) -> Self {
        Self {
            itinerary,
            pool,
            resolved: HashMap::new(),
        }
    }

    /// Resolves the side trips of one market.
    ///
    /// Returns `Ok(None)` if any owned side trip has no decomposition.
    /// A market without side trips resolves to an empty alternative list.
    pub fn resolve_market(
        &mut self,
        id: MarketId,
    ) -> Result<Option<Arc<OwnerAlternatives>>, DomainError> {
        if let Some(known) = self.resolved.get(&id) {
            return Ok(known.clone());
        }

        let pool = self.pool;
        let market = pool.require(id)?;
        let mut side_trips = Vec::with_capacity(market.side_trips.len());

        for side_trip in &market.side_trips {
            let paths = build_paths(
                self.itinerary,
                side_trip.range,
                &side_trip.candidates,
                pool,
                true,
            )?;

            if paths.is_empty() {
                debug!(
                    market = %id,
                    side_trip = %side_trip.range,
                    "side trip has no decomposition"
                );
                side_trips.clear();
                break;
            }

            trace!(
                market = %id,
                side_trip = %side_trip.range,
                alternatives = paths.len(),
                "side trip resolved"
            );
            side_trips.push(paths.into_iter().map(Arc::new).collect());
        }

        let outcome = (side_trips.len() == market.side_trips.len()).then(|| {
            Arc::new(OwnerAlternatives {
                market: id,
                side_trips,
            })
        });

        self.resolved.insert(id, outcome.clone());
        Ok(outcome)
    }

    /// Resolves every side-trip owner of `path`, in path order.
    ///
    /// Returns `Ok(None)` if some owner cannot be resolved, in which case the
    /// path must be dropped.
    pub fn resolve_path(
        &mut self,
        path: &FareMarketPath,
    ) -> Result<Option<Vec<Arc<OwnerAlternatives>>>, DomainError> {
        let mut owners = Vec::new();

        for &id in path.markets() {
            if !self.pool.require(id)?.owns_side_trips() {
                continue;
            }
            match self.resolve_market(id)? {
                Some(alternatives) => owners.push(alternatives),
                None => return Ok(None),
            }
        }

        Ok(Some(owners))
    }
}
