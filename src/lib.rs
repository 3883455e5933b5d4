//! Maximum flow and minimum cut over dense capacitated networks.
//!
//! Build a [`FlowNetwork`] by declaring a vertex count and capacitated arcs,
//! then run [`FlowSolver::max_flow`] (Edmonds-Karp) and, once the network is
//! saturated, [`FlowSolver::min_cut`]. The [`report`] module renders the
//! recorded paths, per-arc flows, and residual state for display.
//!
//! ```
//! use flow_cut::{FlowNetwork, FlowSolver};
//!
//! let mut network = FlowNetwork::new("demo", 2);
//! network.add_arc(0, 1, 5)?;
//!
//! let mut solver = FlowSolver::default();
//! assert_eq!(solver.max_flow(&mut network, 0, 1)?, 5);
//! assert_eq!(solver.min_cut(&network, 0)?.len(), 1);
//! # Ok::<(), flow_cut::FlowError>(())
//! ```

pub mod error;
pub mod network;
pub mod report;
pub mod solver;

pub use error::FlowError;
pub use network::{Arc, FlowNetwork};
pub use solver::{AugmentingPath, CutArc, FlowSolver};
