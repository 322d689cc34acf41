//! Surface/network coupling step for drainlink.
//!
//! Provides:
//! - Net inflow aggregation with a cap on draining the overland cell
//! - A per-timestep engine over all nodes (serial or rayon-parallel)
//! - Runtime options (unit system, gravity)
//! - An administrative session guarding configuration by lifecycle phase

pub mod aggregate;
pub mod engine;
pub mod error;
pub mod options;
pub mod session;

// Re-exports for public API
pub use aggregate::{InflowSummary, aggregate_and_clamp, max_inflow};
pub use engine::{CouplingEngine, StepReport, commit_step};
pub use error::{SimError, SimResult};
pub use options::CouplingOptions;
pub use session::{CouplingSession, SessionPhase};
