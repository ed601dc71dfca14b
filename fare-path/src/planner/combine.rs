//! Side-trip combination generation.
//!
//! Combinations are enumerated with a mixed-radix counter over the lengths
//! of the alternative lists rather than by copying partial selections, so a
//! combination is just a vector of indices until it is materialised.

use std::sync::Arc;

use super::path::{FareMarketPath, SideTripSelection};
use super::side_trip::OwnerAlternatives;

/// Mixed-radix counter yielding every index vector `d` with
/// `d[i] < radices[i]`, last digit fastest.
///
/// Yields nothing if any radix is zero, and a single empty vector when there
/// are no radices.
///
/// # Examples
///
/// ```
/// use fare_path::planner::MixedRadix;
///
/// let all: Vec<Vec<usize>> = MixedRadix::new(vec![2, 2]).collect();
/// assert_eq!(all, vec![vec![0, 0], vec![0, 1], vec![1, 0], vec![1, 1]]);
///
/// assert_eq!(MixedRadix::new(vec![3, 0]).count(), 0);
/// assert_eq!(MixedRadix::new(vec![]).count(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct MixedRadix {
    radices: Vec<usize>,
    digits: Vec<usize>,
    done: bool,
}

impl MixedRadix {
    pub fn new(radices: Vec<usize>) -> Self {
        let done = radices.contains(&0);
        let digits = vec![0; radices.len()];
        Self {
            radices,
            digits,
            done,
        }
    }
}

impl Iterator for MixedRadix {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let current = self.digits.clone();

        for i in (0..self.digits.len()).rev() {
            self.digits[i] += 1;
            if self.digits[i] < self.radices[i] {
                return Some(current);
            }
            self.digits[i] = 0;
        }
        self.done = true;

        Some(current)
    }
}

/// Number of combinations over lists of the given lengths (saturating).
pub fn combination_count(lengths: &[usize]) -> usize {
    lengths.iter().fold(1usize, |acc, &n| acc.saturating_mul(n))
}

/// Cross product of `lists`: every way to pick one element from each list,
/// in mixed-radix order.
///
/// # Examples
///
/// ```
/// use fare_path::planner::combine;
///
/// let picks = combine(&[vec!['a', 'b'], vec!['x']]);
/// assert_eq!(picks, vec![vec!['a', 'x'], vec!['b', 'x']]);
///
/// let none = combine(&[vec!['a'], Vec::<char>::new()]);
/// assert!(none.is_empty());
/// ```
pub fn combine<T: Clone>(lists: &[Vec<T>]) -> Vec<Vec<T>> {
    MixedRadix::new(lists.iter().map(Vec::len).collect())
        .map(|digits| {
            lists
                .iter()
                .zip(digits)
                .map(|(list, i)| list[i].clone())
                .collect()
        })
        .collect()
}

/// Expands a main path into one output path per side-trip combination.
///
/// For each owner, its side-trip alternatives are first combined into
/// bundles (one sub-path per side trip); bundles are then combined across
/// owners. The first C−1 combinations are attached to clones of `path`, the
/// last to `path` itself. Returns nothing if some owner has a side trip
/// without alternatives, and `path` unchanged if `owners` is empty.
pub fn expand(path: FareMarketPath, owners: &[Arc<OwnerAlternatives>]) -> Vec<FareMarketPath> {
    let lengths: Vec<usize> = owners
        .iter()
        .flat_map(|owner| owner.side_trips.iter().map(Vec::len))
        .collect();
    let total = combination_count(&lengths);
    if total == 0 {
        return Vec::new();
    }

    let bundles: Vec<Vec<Vec<Arc<FareMarketPath>>>> = owners
        .iter()
        .map(|owner| combine(&owner.side_trips))
        .collect();

    let mut selections: Vec<SideTripSelection> = combine(&bundles)
        .into_iter()
        .map(|choice| {
            owners
                .iter()
                .map(|owner| owner.market)
                .zip(choice)
                .collect()
        })
        .collect();

    let Some(last) = selections.pop() else {
        return Vec::new();
    };

    let mut out = Vec::with_capacity(selections.len() + 1);
    for selection in selections {
        let mut copy = path.clone();
        copy.attach(selection);
        out.push(copy);
    }

    let mut path = path;
    path.attach(last);
    out.push(path);

    out
}
