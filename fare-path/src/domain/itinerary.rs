//! Itinerary type.
//!
//! An `Itinerary` is an ordered view over travel segments. It uses an
//! `Arc` slice so that side-trip views can be spliced out of the main
//! itinerary cheaply while keeping the main itinerary's positions.

use std::sync::Arc;

use super::{DomainError, LocCode, SegmentPos, SegmentRange, TravelSegment};

/// An ordered, position-addressable sequence of travel segments.
///
/// # Invariants
///
/// - At least one segment
/// - `range` lies within the underlying segment list
#[derive(Debug, Clone)]
pub struct Itinerary {
    segments: Arc<[TravelSegment]>,
    range: SegmentRange,
}

impl Itinerary {
    /// Constructs an itinerary from segments in travel order.
    ///
    /// # Errors
    ///
    /// Returns `Err` if `segments` is empty or too long to address.
    ///
    /// # Examples
    ///
    /// ```
    /// use fare_path::domain::{Itinerary, LocCode, SegmentPos, TravelSegment};
    ///
    /// let lon = LocCode::parse("LON").unwrap();
    /// let nyc = LocCode::parse("NYC").unwrap();
    ///
    /// let itin = Itinerary::new(vec![
    ///     TravelSegment::air(lon, nyc),
    ///     TravelSegment::air(nyc, lon),
    /// ])
    /// .unwrap();
    ///
    /// assert_eq!(itin.len(), 2);
    /// assert_eq!(itin.full_range().to_string(), "1-2");
    /// assert_eq!(itin.segment_at(SegmentPos::FIRST).unwrap().origin, lon);
    /// ```
    pub fn new(segments: Vec<TravelSegment>) -> Result<Self, DomainError> {
        if segments.is_empty() {
            return Err(DomainError::EmptyItinerary);
        }
        let last = u16::try_from(segments.len()).map_err(|_| DomainError::TooManySegments)?;
        let range = SegmentRange::new(SegmentPos::FIRST, SegmentPos::new(last)?)?;

        Ok(Itinerary {
            segments: segments.into(),
            range,
        })
    }

    /// The positions covered by this itinerary.
    pub fn full_range(&self) -> SegmentRange {
        self.range
    }

    pub fn len(&self) -> usize {
        self.range.len()
    }

    /// Always false: empty itineraries are rejected at construction.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns the segment at `pos`, if it is inside this itinerary.
    pub fn segment_at(&self, pos: SegmentPos) -> Option<&TravelSegment> {
        if !self.range.contains(pos) {
            return None;
        }
        self.segments.get(pos.index())
    }

    /// Returns the position of `segment` within this itinerary.
    ///
    /// Matching is by identity: the reference must point into this
    /// itinerary (as returned by `segment_at` or `iter`). Equal segments held
    /// elsewhere are not found.
    pub fn position_of(&self, segment: &TravelSegment) -> Option<SegmentPos> {
        self.iter()
            .find(|(_, s)| std::ptr::eq(*s, segment))
            .map(|(pos, _)| pos)
    }

    /// True when the segment at `pos` is a connector.
    ///
    /// Positions outside the itinerary are never connectors.
    pub fn is_connector_at(&self, pos: SegmentPos) -> bool {
        self.segment_at(pos).is_some_and(TravelSegment::is_connector)
    }

    /// Iterates `(position, segment)` pairs in travel order.
    pub fn iter(&self) -> impl Iterator<Item = (SegmentPos, &TravelSegment)> {
        self.range
            .positions()
            .filter_map(|pos| self.segments.get(pos.index()).map(|seg| (pos, seg)))
    }

    /// Splices out the sub-itinerary covering `range`.
    ///
    /// The view shares the underlying segments and keeps main positions,
    /// which is how side trips are decomposed.
    ///
    /// # Errors
    ///
    /// Returns `Err` if `range` is not inside this itinerary.
    pub fn slice(&self, range: SegmentRange) -> Result<Itinerary, DomainError> {
        if !self.range.contains_range(&range) {
            return Err(DomainError::RangeOutsideItinerary(range));
        }
        Ok(Itinerary {
            segments: Arc::clone(&self.segments),
            range,
        })
    }

    /// Number of flown segments (connectors excluded).
    pub fn leg_count(&self) -> usize {
        self.iter().filter(|(_, seg)| !seg.is_connector()).count()
    }

    /// Board point of `range`, if it is inside this itinerary.
    pub fn board_point(&self, range: SegmentRange) -> Option<LocCode> {
        self.segment_at(range.start()).map(|seg| seg.origin)
    }

    /// Off point of `range`, if it is inside this itinerary.
    pub fn off_point(&self, range: SegmentRange) -> Option<LocCode> {
        self.segment_at(range.end()).map(|seg| seg.destination)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loc(s: &str) -> LocCode {
        LocCode::parse(s).unwrap()
    }

    fn pos(n: u16) -> SegmentPos {
        SegmentPos::new(n).unwrap()
    }

    fn range(a: u16, b: u16) -> SegmentRange {
        SegmentRange::from_raw(a, b).unwrap()
    }

    /// LON-NYC, NYC-BOS, BOS-NYC (surface), NYC-LON
    fn sample() -> Itinerary {
        Itinerary::new(vec![
            TravelSegment::air(loc("LON"), loc("NYC")),
            TravelSegment::air(loc("NYC"), loc("BOS")),
            TravelSegment::connector(loc("BOS"), loc("NYC")),
            TravelSegment::air(loc("NYC"), loc("LON")),
        ])
        .unwrap()
    }

    #[test]
    fn empty_itinerary_rejected() {
        assert_eq!(Itinerary::new(vec![]).unwrap_err(), DomainError::EmptyItinerary);
    }

    #[test]
    fn lookups() {
        let itin = sample();

        assert_eq!(itin.len(), 4);
        assert_eq!(itin.full_range(), range(1, 4));
        assert_eq!(itin.segment_at(pos(2)).unwrap().destination, loc("BOS"));
        assert!(itin.segment_at(pos(5)).is_none());

        assert!(itin.is_connector_at(pos(3)));
        assert!(!itin.is_connector_at(pos(2)));
        assert!(!itin.is_connector_at(pos(9)));

        assert_eq!(itin.leg_count(), 3);
        assert_eq!(itin.board_point(range(2, 3)), Some(loc("NYC")));
        assert_eq!(itin.off_point(range(2, 3)), Some(loc("NYC")));
    }

    #[test]
    fn position_of_is_by_identity() {
        let itin = sample();

        let seg = itin.segment_at(pos(4)).unwrap();
        assert_eq!(itin.position_of(seg), Some(pos(4)));

        let lookalike = TravelSegment::air(loc("NYC"), loc("LON"));
        assert_eq!(itin.position_of(&lookalike), None);
    }

    #[test]
    fn slice_keeps_main_positions() {
        let itin = sample();
        let side = itin.slice(range(2, 3)).unwrap();

        assert_eq!(side.len(), 2);
        assert_eq!(side.full_range(), range(2, 3));
        assert!(side.segment_at(pos(1)).is_none());
        assert!(side.is_connector_at(pos(3)));

        let positions: Vec<u16> = side.iter().map(|(p, _)| p.get()).collect();
        assert_eq!(positions, vec![2, 3]);

        // A segment found through the view resolves in the main itinerary too
        let seg = side.segment_at(pos(2)).unwrap();
        assert_eq!(itin.position_of(seg), Some(pos(2)));
    }

    #[test]
    fn slice_outside_rejected() {
        let itin = sample();
        assert_eq!(
            itin.slice(range(3, 5)).unwrap_err(),
            DomainError::RangeOutsideItinerary(range(3, 5))
        );

        let side = itin.slice(range(2, 3)).unwrap();
        assert!(side.slice(range(1, 2)).is_err());
    }
}
