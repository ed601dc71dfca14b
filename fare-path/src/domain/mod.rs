//! Domain types for fare market path enumeration.
//!
//! This module contains the itinerary and candidate-market model the
//! planner works on. Types enforce their invariants at construction time,
//! and `MarketPool::validate` checks a pool against its itinerary, so the
//! planner can trust positions and ranges it receives.

mod error;
mod itinerary;
mod loc;
mod market;
mod position;
mod segment;

pub use error::DomainError;
pub use itinerary::Itinerary;
pub use loc::{InvalidLocCode, LocCode};
pub use market::{CandidateMarket, MarketId, MarketPool, SideTrip};
pub use position::{SegmentPos, SegmentRange};
pub use segment::{SegmentKind, TravelSegment};
