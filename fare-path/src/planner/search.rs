//! Path matrix construction.
//!
//! Runs the full pipeline for one itinerary: build main paths, drop paths
//! over the market budget, resolve and combine side trips, cap the matrix,
//! then mark which markets survived.

use tracing::debug;

use crate::diag::DiagnosticsSink;
use crate::domain::{DomainError, Itinerary, MarketId, MarketPool};

use super::build::build_paths;
use super::combine::expand;
use super::config::{ConfigError, PathConfig};
use super::filter::{filter_by_market_count, limit_by_fare_breaks};
use super::path::FareMarketPathMatrix;
use super::side_trip::SideTripResolver;
use super::usage::UsageMarks;

/// Error from path matrix construction.
///
/// Only caller misuse is an error. An itinerary without any decomposition
/// yields an empty matrix instead.
#[derive(Debug, thiserror::Error)]
pub enum PathError {
    /// Invalid path request
    #[error("invalid path request: {0}")]
    InvalidRequest(String),

    /// Itinerary and pool are inconsistent
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Configuration is unusable
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Request for building the path matrix of one itinerary.
#[derive(Debug, Clone)]
pub struct PathRequest<'a> {
    /// The itinerary to decompose.
    pub itinerary: &'a Itinerary,

    /// Every market referenced by the run, side-trip sub-pools included.
    pub pool: &'a MarketPool,

    /// Markets that may cover the main itinerary, in pool order.
    pub candidates: Vec<MarketId>,
}

impl<'a> PathRequest<'a> {
    /// Create a request using the whole pool as main candidates.
    pub fn new(itinerary: &'a Itinerary, pool: &'a MarketPool) -> Self {
        Self {
            itinerary,
            pool,
            candidates: pool.ids(),
        }
    }

    /// Create a request with an explicit main candidate list.
    pub fn with_candidates(
        itinerary: &'a Itinerary,
        pool: &'a MarketPool,
        candidates: Vec<MarketId>,
    ) -> Self {
        Self {
            itinerary,
            pool,
            candidates,
        }
    }

    /// Validate the request.
    pub fn validate(&self) -> Result<(), PathError> {
        self.pool.validate(self.itinerary)?;

        for (i, id) in self.candidates.iter().enumerate() {
            self.pool.require(*id)?;
            if self.candidates[..i].contains(id) {
                return Err(PathError::InvalidRequest(format!(
                    "market {id} listed twice as a candidate"
                )));
            }
        }

        Ok(())
    }
}

/// Counters describing one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PathStats {
    /// Main paths found before any filtering.
    pub main_paths: usize,

    /// Main paths removed for exceeding the market budget.
    pub over_budget: usize,

    /// Main paths dropped because a side trip had no decomposition.
    pub unresolved_side_trips: usize,

    /// Paths removed by the matrix size cap.
    pub limited: usize,
}

/// Result of a planner run.
#[derive(Debug, Clone)]
pub struct PathOutcome {
    /// Surviving paths, in deterministic order.
    pub matrix: FareMarketPathMatrix,

    /// Markets appearing in at least one surviving path.
    pub usage: UsageMarks,

    pub stats: PathStats,
}

/// Builds fare market path matrices.
pub struct PathPlanner<'a> {
    config: &'a PathConfig,
}

impl<'a> PathPlanner<'a> {
    /// Create a new planner.
    pub fn new(config: &'a PathConfig) -> Self {
        Self { config }
    }

    /// Builds the path matrix for `request`.
    ///
    /// When `diagnostics` is given it receives the final matrix; the result
    /// is identical with or without it.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the request or configuration is invalid.
    pub fn plan(
        &self,
        request: &PathRequest<'_>,
        diagnostics: Option<&mut dyn DiagnosticsSink>,
    ) -> Result<PathOutcome, PathError> {
        self.config.validate()?;
        request.validate()?;

        let itinerary = request.itinerary;
        let pool = request.pool;
        let mut stats = PathStats::default();

        let main = build_paths(
            itinerary,
            itinerary.full_range(),
            &request.candidates,
            pool,
            false,
        )?;
        stats.main_paths = main.len();

        let main = filter_by_market_count(main, self.config.max_markets_per_path);
        stats.over_budget = stats.main_paths - main.len();
        if stats.over_budget > 0 {
            debug!(
                removed = stats.over_budget,
                budget = self.config.max_markets_per_path,
                "complexity filter applied"
            );
        }

        let mut resolver = SideTripResolver::new(itinerary, pool);
        let mut paths = Vec::with_capacity(main.len());
        for path in main {
            match resolver.resolve_path(&path)? {
                Some(owners) => paths.extend(expand(path, &owners)),
                None => stats.unresolved_side_trips += 1,
            }
        }

        let expanded = paths.len();
        let paths = limit_by_fare_breaks(paths, self.config.max_paths);
        stats.limited = expanded - paths.len();

        let matrix = FareMarketPathMatrix::new(paths);
        let usage = UsageMarks::for_matrix(pool, &matrix);

        debug!(
            segments = itinerary.len(),
            candidates = request.candidates.len(),
            main_paths = stats.main_paths,
            dropped = stats.unresolved_side_trips,
            limited = stats.limited,
            paths = matrix.len(),
            used_markets = usage.count(),
            "fare market path matrix built"
        );

        if let Some(sink) = diagnostics {
            sink.matrix_built(itinerary, pool, &matrix);
        }

        Ok(PathOutcome {
            matrix,
            usage,
            stats,
        })
    }
}
