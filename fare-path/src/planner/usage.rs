//! Usage marking for candidate markets.
//!
//! The "used" flag lives in a side table keyed by `MarketId` rather than on
//! the markets themselves, so the pool stays immutable and every run gets a
//! fresh table.

use crate::domain::{MarketId, MarketPool};

use super::path::{FareMarketPath, FareMarketPathMatrix};

/// Which markets of a pool appear in at least one surviving path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsageMarks {
    used: Vec<bool>,
}

impl UsageMarks {
    /// A table with every market of `pool` unused.
    pub fn new(pool: &MarketPool) -> Self {
        Self {
            used: vec![false; pool.len()],
        }
    }

    /// Builds the table for `matrix` in one pass.
    pub fn for_matrix(pool: &MarketPool, matrix: &FareMarketPathMatrix) -> Self {
        let mut marks = Self::new(pool);
        marks.mark(matrix);
        marks
    }

    /// Marks every market referenced by `matrix`, side trips included.
    ///
    /// Idempotent: marking the same matrix twice changes nothing.
    pub fn mark(&mut self, matrix: &FareMarketPathMatrix) {
        for id in matrix.iter().flat_map(FareMarketPath::all_markets) {
            if let Some(flag) = self.used.get_mut(id.0) {
                *flag = true;
            }
        }
    }

    /// True if `id` appears in a surviving path. Unknown handles are unused.
    pub fn is_used(&self, id: MarketId) -> bool {
        self.used.get(id.0).copied().unwrap_or(false)
    }

    /// Used handles in pool order.
    pub fn used_ids(&self) -> Vec<MarketId> {
        self.used
            .iter()
            .enumerate()
            .filter(|(_, used)| **used)
            .map(|(i, _)| MarketId(i))
            .collect()
    }

    /// Number of used markets.
    pub fn count(&self) -> usize {
        self.used.iter().filter(|used| **used).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CandidateMarket, SegmentRange};
    use std::collections::BTreeMap;
    use std::sync::Arc;

    fn pool(n: usize) -> MarketPool {
        let mut pool = MarketPool::new();
        for _ in 0..n {
            pool.push(CandidateMarket::new(SegmentRange::from_raw(1, 1).unwrap()));
        }
        pool
    }

    #[test]
    fn fresh_table_is_unused() {
        let marks = UsageMarks::new(&pool(3));
        assert_eq!(marks.count(), 0);
        assert!(marks.used_ids().is_empty());
    }

    #[test]
    fn marks_top_level_and_side_trip_markets() {
        let pool = pool(6);

        let mut with_side_trip = FareMarketPath::new(vec![MarketId(4)]);
        with_side_trip.attach(BTreeMap::from([(
            MarketId(4),
            vec![Arc::new(FareMarketPath::new(vec![MarketId(2)]))],
        )]));
        let matrix = FareMarketPathMatrix::new(vec![
            FareMarketPath::new(vec![MarketId(0), MarketId(1)]),
            with_side_trip,
        ]);

        let marks = UsageMarks::for_matrix(&pool, &matrix);

        assert_eq!(
            marks.used_ids(),
            vec![MarketId(0), MarketId(1), MarketId(2), MarketId(4)]
        );
        assert!(!marks.is_used(MarketId(3)));
        assert!(!marks.is_used(MarketId(5)));
        assert!(!marks.is_used(MarketId(99)));
    }

    #[test]
    fn marking_is_idempotent() {
        let pool = pool(2);
        let matrix = FareMarketPathMatrix::new(vec![FareMarketPath::new(vec![MarketId(1)])]);

        let mut marks = UsageMarks::new(&pool);
        marks.mark(&matrix);
        let once = marks.clone();
        marks.mark(&matrix);

        assert_eq!(marks, once);
        assert_eq!(marks.count(), 1);
    }
}
