//! Diagnostics for built path matrices.
//!
//! The planner hands its final matrix to an optional `DiagnosticsSink`.
//! Nothing in the planner depends on a sink being attached.

mod report;

pub use report::TextReport;

use crate::domain::{Itinerary, MarketPool};
use crate::planner::FareMarketPathMatrix;

/// Receives the finished matrix of a planner run for reporting.
pub trait DiagnosticsSink {
    /// Called once per run, after filtering and usage marking.
    fn matrix_built(
        &mut self,
        itinerary: &Itinerary,
        pool: &MarketPool,
        matrix: &FareMarketPathMatrix,
    );
}
