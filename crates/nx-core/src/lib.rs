//! nx-core: stable foundation for netex.
//!
//! Contains:
//! - ids (compact node ids and pass identifiers)
//! - numeric (Real + float helpers)
//! - geom (2D coordinates and footprint predicates)
//! - error (shared error types)

pub mod error;
pub mod geom;
pub mod ids;
pub mod numeric;

// Re-exports: nice ergonomics for downstream crates
pub use error::{NxError, NxResult};
pub use geom::Coord;
pub use ids::*;
pub use numeric::*;
