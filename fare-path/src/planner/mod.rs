//! Fare market path enumeration.
//!
//! Given an itinerary and a pool of candidate fare markets, this module
//! answers: "in how many ways can these markets price the whole trip?"
//!
//! Paths are built by depth-first search over adjacent markets. Markets
//! owning side trips are expanded into one path per combination of side-trip
//! decompositions, and the resulting matrix is bounded by two post-filters.

mod build;
mod combine;
mod config;
mod filter;
mod path;
mod search;
mod side_trip;
mod usage;


pub use build::build_paths;
pub use combine::{MixedRadix, combination_count, combine, expand};
pub use config::{ConfigError, PathConfig, complexity_budget};
pub use filter::{filter_by_market_count, limit_by_fare_breaks};
pub use path::{FareMarketPath, FareMarketPathMatrix, SideTripSelection};
pub use search::{PathError, PathOutcome, PathPlanner, PathRequest, PathStats};
pub use side_trip::{OwnerAlternatives, SideTripResolver};
pub use usage::UsageMarks;
