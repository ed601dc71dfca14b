//! Post-filters bounding the size of a path matrix.
//!
//! Neither filter changes a retained path; they only decide which paths are
//! kept.

use std::collections::BTreeMap;

use super::path::FareMarketPath;

/// Removes paths with more than `max` top-level markets.
///
/// No-op when `max` is `None`.
pub fn filter_by_market_count(
    paths: Vec<FareMarketPath>,
    max: Option<usize>,
) -> Vec<FareMarketPath> {
    let Some(max) = max else {
        return paths;
    };

    paths
        .into_iter()
        .filter(|path| path.market_count() <= max)
        .collect()
}

/// Caps the number of paths at `max`, keeping a balanced sample across
/// fare-break counts.
///
/// Paths are grouped by `fare_break_count()`. Each group contributes at most
/// `max / groups` paths (at least one), taken in their original order, and
/// groups are emitted from fewest to most fare breaks. No-op when `max` is
/// `None` or the input is already within the cap.
pub fn limit_by_fare_breaks(
    paths: Vec<FareMarketPath>,
    max: Option<usize>,
) -> Vec<FareMarketPath> {
    let Some(max) = max else {
        return paths;
    };
    if paths.len() <= max {
        return paths;
    }

    let mut groups: BTreeMap<usize, Vec<FareMarketPath>> = BTreeMap::new();
    for path in paths {
        groups.entry(path.fare_break_count()).or_default().push(path);
    }

    let per_group = (max / groups.len()).max(1);

    groups
        .into_values()
        .flat_map(|group| group.into_iter().take(per_group))
        .collect()
}
