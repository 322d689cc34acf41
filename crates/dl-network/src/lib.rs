//! dl-network: node table and opening registry for drainlink.
//!
//! Provides:
//! - Node hydraulic snapshots read by the coupling step
//! - Per-node opening registry (create/update, close/open, remove, clear)
//! - A node table addressed by compact [`dl_core::NodeId`]s
//!
//! # Example
//!
//! ```
//! use dl_core::OpeningId;
//! use dl_coupling::{OpeningCoefficients, OpeningKind};
//! use dl_network::{Network, NodeHydraulics};
//!
//! let mut net = Network::new();
//! let j1 = net.add_node("J1", NodeHydraulics::default()).unwrap();
//! let coeffs = OpeningCoefficients { orifice: 0.167, free_weir: 0.54, submerged_weir: 0.056 };
//!
//! let openings = net.node_mut(j1).unwrap().openings_mut();
//! openings.upsert(OpeningId(0), OpeningKind::Grate, 25.0, 1.0, coeffs).unwrap();
//! assert_eq!(openings.len(), 1);
//! ```

pub mod error;
pub mod network;
pub mod node;
pub mod openings;

// Re-exports for ergonomics
pub use error::{NetworkError, NetworkResult};
pub use network::Network;
pub use node::{CouplingNode, NodeHydraulics};
pub use openings::{OpeningSet, Upsert};
