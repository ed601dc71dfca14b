//! Plain-text matrix report.
//!
//! Renders one block per path. Each market line shows its board and off
//! points followed by the positions it prices itself (side-trip positions
//! excluded), and the chosen side-trip sub-paths are listed under their
//! owning market:
//!
//! ```text
//! PATH 1 - MARKETS: 2 FARE BREAKS: 4
//!  LON LAX : 1 4
//!    ST: NYC-BOS BOS-NYC
//!  NYC LON : 5
//! ```

use std::fmt::{self, Write};

use tracing::debug;

use crate::domain::{CandidateMarket, Itinerary, LocCode, MarketId, MarketPool, SegmentPos};
use crate::planner::{FareMarketPath, FareMarketPathMatrix};

use super::DiagnosticsSink;

/// Accumulates a text report for every matrix it receives.
#[derive(Debug, Clone, Default)]
pub struct TextReport {
    text: String,
}

impl TextReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// The report so far.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Renders one matrix.
    pub fn render(
        itinerary: &Itinerary,
        pool: &MarketPool,
        matrix: &FareMarketPathMatrix,
    ) -> Result<String, fmt::Error> {
        let mut out = String::new();

        writeln!(out, "FARE MARKET PATH MATRIX - {} PATHS", matrix.len())?;
        for (pos, segment) in itinerary.iter() {
            let marker = if segment.is_connector() { " ARUNK" } else { "" };
            writeln!(
                out,
                " {pos:>2} {}-{}{marker}",
                segment.origin, segment.destination
            )?;
        }

        for (n, path) in matrix.iter().enumerate() {
            writeln!(
                out,
                "PATH {} - MARKETS: {} FARE BREAKS: {}",
                n + 1,
                path.market_count(),
                path.fare_break_count()
            )?;
            write_markets(&mut out, itinerary, pool, path)?;
        }

        Ok(out)
    }
}

impl DiagnosticsSink for TextReport {
    fn matrix_built(
        &mut self,
        itinerary: &Itinerary,
        pool: &MarketPool,
        matrix: &FareMarketPathMatrix,
    ) {
        match Self::render(itinerary, pool, matrix) {
            Ok(text) => self.text.push_str(&text),
            Err(err) => debug!(error = %err, "failed to render matrix report"),
        }
    }
}

fn write_markets(
    out: &mut String,
    itinerary: &Itinerary,
    pool: &MarketPool,
    path: &FareMarketPath,
) -> fmt::Result {
    for &id in path.markets() {
        let Some(market) = pool.get(id) else {
            writeln!(out, " {id} UNKNOWN")?;
            continue;
        };

        write!(
            out,
            " {} {} :",
            loc_or_unknown(itinerary.board_point(market.range)),
            loc_or_unknown(itinerary.off_point(market.range))
        )?;
        for pos in own_positions(market) {
            write!(out, " {pos}")?;
        }
        writeln!(out)?;

        for sub in path.side_trip_paths(id).unwrap_or_default() {
            write!(out, "   ST:")?;
            write_sub_path(out, itinerary, pool, sub.markets())?;
            writeln!(out)?;
        }
    }
    Ok(())
}

fn write_sub_path(
    out: &mut String,
    itinerary: &Itinerary,
    pool: &MarketPool,
    markets: &[MarketId],
) -> fmt::Result {
    for &id in markets {
        match pool.get(id) {
            Some(market) => write!(
                out,
                " {}-{}",
                loc_or_unknown(itinerary.board_point(market.range)),
                loc_or_unknown(itinerary.off_point(market.range))
            )?,
            None => write!(out, " {id}")?,
        }
    }
    Ok(())
}

/// Positions priced by the market itself, skipping its side trips.
fn own_positions(market: &CandidateMarket) -> impl Iterator<Item = SegmentPos> + '_ {
    market
        .range
        .positions()
        .filter(|pos| !market.side_trips.iter().any(|st| st.range.contains(*pos)))
}

fn loc_or_unknown(loc: Option<LocCode>) -> String {
    loc.map_or_else(|| "???".to_string(), |l| l.to_string())
}
