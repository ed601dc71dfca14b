//! Fare market path enumeration.
//!
//! Decomposes a travel itinerary into every sequence of candidate fare
//! markets that prices it end to end, including markets whose side trips
//! must themselves be priced.

pub mod diag;
pub mod domain;
pub mod planner;
