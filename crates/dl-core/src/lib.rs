//! dl-core: stable foundation for drainlink.
//!
//! Contains:
//! - units (unit systems + gravity derived through uom)
//! - numeric (Real + tolerances + float helpers)
//! - ids (compact node IDs and caller-assigned opening IDs)
//! - error (the error-kind taxonomy shared by every crate)

pub mod error;
pub mod ids;
pub mod numeric;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::ErrorKind;
pub use ids::*;
pub use numeric::*;
pub use units::*;
