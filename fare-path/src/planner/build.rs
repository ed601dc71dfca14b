//! Depth-first path builder.
//!
//! Tiles a segment range with candidate markets. A path is seeded with every
//! market starting at the range start and extended, one adjacent market at
//! a time, until it reaches the range end. Connector segments relax
//! adjacency by one position: a path may skip over a connector at the start,
//! at the end, or between two markets.

use tracing::trace;

use crate::domain::{DomainError, Itinerary, MarketId, MarketPool, SegmentPos, SegmentRange};

use super::path::FareMarketPath;

/// Builds every path of `candidates` covering `range` exactly.
///
/// Candidates are tried in the order given, both as seeds and at each
/// extension step, so the output order depends only on candidate order.
/// Candidates that do not lie inside `range` are ignored, as are candidates
/// owning side trips when `exclude_side_trip_owners` is set (side trips may
/// not nest).
///
/// An empty result is not an error: it means no decomposition exists.
///
/// # Errors
///
/// Returns `Err` if `range` is outside `itinerary` or a candidate handle is
/// not in `pool`.
pub fn build_paths(
    itinerary: &Itinerary,
    range: SegmentRange,
    candidates: &[MarketId],
    pool: &MarketPool,
    exclude_side_trip_owners: bool,
) -> Result<Vec<FareMarketPath>, DomainError> {
    let view = itinerary.slice(range)?;

    let mut eligible = Vec::with_capacity(candidates.len());
    for &id in candidates {
        let market = pool.require(id)?;
        if exclude_side_trip_owners && market.owns_side_trips() {
            continue;
        }
        if range.contains_range(&market.range) {
            eligible.push(Step {
                id,
                start: market.range.start(),
                end: market.range.end(),
            });
        }
    }

    let mut builder = PathBuilder {
        itinerary: &view,
        range,
        eligible: &eligible,
        partial: Vec::new(),
        found: Vec::new(),
    };
    builder.run();

    trace!(
        range = %range,
        candidates = eligible.len(),
        paths = builder.found.len(),
        "paths built"
    );

    Ok(builder.found)
}

/// A candidate reduced to what the search needs.
#[derive(Debug, Clone, Copy)]
struct Step {
    id: MarketId,
    start: SegmentPos,
    end: SegmentPos,
}

/// One level of the depth-first search: the position the next market must
/// start at, and how far the scan over eligible candidates has got.
#[derive(Debug, Clone, Copy)]
struct Frame {
    next: SegmentPos,
    skip_connector: bool,
    cursor: usize,
}

impl Frame {
    fn accepts(&self, step: &Step) -> bool {
        step.start == self.next || (self.skip_connector && step.start == self.next.next())
    }
}

struct PathBuilder<'a> {
    itinerary: &'a Itinerary,
    range: SegmentRange,
    eligible: &'a [Step],
    partial: Vec<MarketId>,
    found: Vec<FareMarketPath>,
}

impl PathBuilder<'_> {
    fn frame_at(&self, next: SegmentPos) -> Frame {
        Frame {
            next,
            skip_connector: self.itinerary.is_connector_at(next),
            cursor: 0,
        }
    }

    /// A path ending at `last_end` is complete once it reaches the range end,
    /// or stops just short of a trailing connector. In the latter case the
    /// path is recorded without trying a market over the connector itself.
    fn is_complete(&self, last_end: SegmentPos) -> bool {
        let end = self.range.end();
        last_end == end || (self.itinerary.is_connector_at(end) && last_end.next() == end)
    }

    /// Depth-first search over an explicit stack, so depth is bounded by the
    /// heap rather than the call stack. Frame `k` holds the scan for the
    /// market after `partial[k - 1]`; the seed frame has no market.
    fn run(&mut self) {
        let mut stack = vec![self.frame_at(self.range.start())];

        while let Some(frame) = stack.last_mut() {
            let found = self.eligible[frame.cursor..]
                .iter()
                .position(|step| frame.accepts(step));

            let Some(offset) = found else {
                stack.pop();
                self.partial.pop();
                continue;
            };

            let step = self.eligible[frame.cursor + offset];
            frame.cursor += offset + 1;
            self.partial.push(step.id);

            if self.is_complete(step.end) {
                self.found.push(FareMarketPath::new(self.partial.clone()));
                self.partial.pop();
            } else {
                // Eligible markets lie inside the range, so an incomplete
                // path always has a next position.
                stack.push(self.frame_at(step.end.next()));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CandidateMarket, LocCode, SideTrip, TravelSegment};

    fn range(a: u16, b: u16) -> SegmentRange {
        SegmentRange::from_raw(a, b).unwrap()
    }

    /// Itinerary of `n` segments; positions in `connectors` are surface.
    fn itin(n: u16, connectors: &[u16]) -> Itinerary {
        let loc = LocCode::parse("AAA").unwrap();
        let segments = (1..=n)
            .map(|p| {
                if connectors.contains(&p) {
                    TravelSegment::connector(loc, loc)
                } else {
                    TravelSegment::air(loc, loc)
                }
            })
            .collect();
        Itinerary::new(segments).unwrap()
    }

    fn pool(ranges: &[(u16, u16)]) -> MarketPool {
        let mut pool = MarketPool::new();
        for &(a, b) in ranges {
            pool.push(CandidateMarket::new(range(a, b)));
        }
        pool
    }

    fn as_raw(paths: &[FareMarketPath]) -> Vec<Vec<usize>> {
        paths
            .iter()
            .map(|p| p.markets().iter().map(|id| id.0).collect())
            .collect()
    }

    #[test]
    fn partition_of_three_segments() {
        // M1(1-1) M2(2-2) M3(3-3) M4(1-2) M5(2-3) M6(1-3)
        let pool = pool(&[(1, 1), (2, 2), (3, 3), (1, 2), (2, 3), (1, 3)]);
        let itin = itin(3, &[]);

        let paths = build_paths(&itin, range(1, 3), &pool.ids(), &pool, false).unwrap();

        assert_eq!(
            as_raw(&paths),
            vec![vec![0, 1, 2], vec![0, 4], vec![3, 2], vec![5]]
        );
    }

    #[test]
    fn single_market_covering_range() {
        let pool = pool(&[(1, 4)]);
        let paths = build_paths(&itin(4, &[]), range(1, 4), &pool.ids(), &pool, false).unwrap();

        assert_eq!(as_raw(&paths), vec![vec![0]]);
    }

    #[test]
    fn empty_pool_gives_no_paths() {
        let pool = MarketPool::new();
        let paths = build_paths(&itin(2, &[]), range(1, 2), &[], &pool, false).unwrap();
        assert!(paths.is_empty());
    }

    #[test]
    fn gap_without_connector_is_dead_end() {
        // Nothing covers segment 2
        let pool = pool(&[(1, 1), (3, 3)]);
        let paths = build_paths(&itin(3, &[]), range(1, 3), &pool.ids(), &pool, false).unwrap();
        assert!(paths.is_empty());
    }

    #[test]
    fn connector_between_markets_may_be_skipped() {
        let pool = pool(&[(1, 1), (3, 3), (2, 3)]);
        let paths = build_paths(&itin(3, &[2]), range(1, 3), &pool.ids(), &pool, false).unwrap();

        assert_eq!(as_raw(&paths), vec![vec![0, 1], vec![0, 2]]);
    }

    #[test]
    fn leading_and_trailing_connectors_may_be_skipped() {
        let pool = pool(&[(2, 3), (1, 3), (2, 4)]);
        let paths = build_paths(&itin(4, &[1, 4]), range(1, 4), &pool.ids(), &pool, false).unwrap();

        // (2-3) skips both ends, (1-3) skips the end, (2-4) skips the start
        assert_eq!(as_raw(&paths), vec![vec![0], vec![1], vec![2]]);
    }

    #[test]
    fn path_ends_at_trailing_connector() {
        // Reaching the connector completes [M0]; [M0, M1] is never tried
        let pool = pool(&[(1, 1), (2, 2)]);
        let paths = build_paths(&itin(2, &[2]), range(1, 2), &pool.ids(), &pool, false).unwrap();

        assert_eq!(as_raw(&paths), vec![vec![0]]);
    }

    #[test]
    fn market_over_trailing_connector_may_still_end_path() {
        let pool = pool(&[(1, 2), (1, 1)]);
        let paths = build_paths(&itin(2, &[2]), range(1, 2), &pool.ids(), &pool, false).unwrap();

        assert_eq!(as_raw(&paths), vec![vec![0], vec![1]]);
    }

    #[test]
    fn long_chain_of_single_segment_markets() {
        let n = 2000;
        let ranges: Vec<(u16, u16)> = (1..=n).map(|p| (p, p)).collect();
        let pool = pool(&ranges);

        let paths = build_paths(&itin(n, &[]), range(1, n), &pool.ids(), &pool, false).unwrap();

        assert_eq!(paths.len(), 1);
        assert_eq!(paths[0].market_count(), usize::from(n));
    }

    #[test]
    fn ignores_candidates_outside_range() {
        let pool = pool(&[(1, 2), (2, 3), (3, 3)]);
        let paths = build_paths(&itin(4, &[]), range(2, 3), &pool.ids(), &pool, false).unwrap();

        assert_eq!(as_raw(&paths), vec![vec![1]]);
    }

    #[test]
    fn excludes_side_trip_owners_when_nested() {
        let mut pool = pool(&[(2, 2)]);
        let owner = pool.push(
            CandidateMarket::new(range(1, 3)).with_side_trip(SideTrip::new(range(2, 2), vec![])),
        );

        let all = build_paths(&itin(3, &[]), range(1, 3), &[owner], &pool, false).unwrap();
        assert_eq!(all.len(), 1);

        let nested = build_paths(&itin(3, &[]), range(1, 3), &[owner], &pool, true).unwrap();
        assert!(nested.is_empty());
    }

    #[test]
    fn candidate_order_drives_output_order() {
        let pool = pool(&[(1, 1), (2, 2), (1, 2)]);
        let itin = itin(2, &[]);

        let forward = build_paths(&itin, range(1, 2), &pool.ids(), &pool, false).unwrap();
        let reversed: Vec<MarketId> = pool.ids().into_iter().rev().collect();
        let backward = build_paths(&itin, range(1, 2), &reversed, &pool, false).unwrap();

        assert_eq!(as_raw(&forward), vec![vec![0, 1], vec![2]]);
        assert_eq!(as_raw(&backward), vec![vec![2], vec![0, 1]]);
    }

    #[test]
    fn unknown_candidate_is_error() {
        let pool = pool(&[(1, 1)]);
        let result = build_paths(&itin(1, &[]), range(1, 1), &[MarketId(3)], &pool, false);
        assert_eq!(result.unwrap_err(), DomainError::UnknownMarket(MarketId(3)));
    }

    #[test]
    fn range_outside_itinerary_is_error() {
        let pool = pool(&[(1, 1)]);
        let result = build_paths(&itin(2, &[]), range(1, 3), &pool.ids(), &pool, false);
        assert!(matches!(result, Err(DomainError::RangeOutsideItinerary(_))));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::domain::{CandidateMarket, LocCode, TravelSegment};
    use proptest::prelude::*;

    /// Segment count, connector flags, and candidate ranges over them.
    fn scenario() -> impl Strategy<Value = (Vec<bool>, Vec<(u16, u16)>)> {
        (1u16..7).prop_flat_map(|n| {
            let connectors = prop::collection::vec(prop::bool::weighted(0.2), n as usize);
            let markets = prop::collection::vec(
                (1..=n).prop_flat_map(move |a| (Just(a), a..=n)),
                0..12,
            );
            (connectors, markets)
        })
    }

    fn build(connectors: &[bool], ranges: &[(u16, u16)]) -> (Itinerary, MarketPool) {
        let loc = LocCode::parse("AAA").unwrap();
        let segments = connectors
            .iter()
            .map(|&c| {
                if c {
                    TravelSegment::connector(loc, loc)
                } else {
                    TravelSegment::air(loc, loc)
                }
            })
            .collect();
        let mut pool = MarketPool::new();
        for &(a, b) in ranges {
            pool.push(CandidateMarket::new(SegmentRange::from_raw(a, b).unwrap()));
        }
        (Itinerary::new(segments).unwrap(), pool)
    }

    /// A path is valid when it starts, joins and ends per the connector rules.
    fn is_valid(itin: &Itinerary, pool: &MarketPool, markets: &[MarketId]) -> bool {
        let full = itin.full_range();
        let ranges: Vec<SegmentRange> = markets
            .iter()
            .map(|id| pool.get(*id).unwrap().range)
            .collect();
        let (Some(first), Some(last)) = (ranges.first(), ranges.last()) else {
            return false;
        };

        let start_ok = first.start() == full.start()
            || (itin.is_connector_at(full.start()) && first.start() == full.start().next());
        let end_ok = last.end() == full.end()
            || (itin.is_connector_at(full.end()) && last.end().next() == full.end());
        let joins_ok = ranges.windows(2).all(|w| {
            let gap = w[0].end().next();
            w[1].start() == gap || (itin.is_connector_at(gap) && w[1].start() == gap.next())
        });

        start_ok && end_ok && joins_ok
    }

    proptest! {
        #[test]
        fn every_built_path_is_valid((connectors, ranges) in scenario()) {
            let (itin, pool) = build(&connectors, &ranges);
            let paths = build_paths(&itin, itin.full_range(), &pool.ids(), &pool, false).unwrap();

            for path in &paths {
                prop_assert!(
                    is_valid(&itin, &pool, path.markets()),
                    "invalid path {:?}",
                    path.markets()
                );
            }
        }

        #[test]
        fn no_duplicate_paths((connectors, ranges) in scenario()) {
            let (itin, pool) = build(&connectors, &ranges);
            let paths = build_paths(&itin, itin.full_range(), &pool.ids(), &pool, false).unwrap();

            for (i, a) in paths.iter().enumerate() {
                for b in &paths[i + 1..] {
                    prop_assert_ne!(a.markets(), b.markets());
                }
            }
        }

        #[test]
        fn deterministic((connectors, ranges) in scenario()) {
            let (itin, pool) = build(&connectors, &ranges);
            let first = build_paths(&itin, itin.full_range(), &pool.ids(), &pool, false).unwrap();
            let second = build_paths(&itin, itin.full_range(), &pool.ids(), &pool, false).unwrap();
            prop_assert_eq!(first, second);
        }
    }
}
