//! Topology inference module.
//!
//! Groups interfaces by computed subnet, classifies each group as a shared
//! link or a stub, and materializes a directed graph of devices and stub
//! networks.

pub mod inference;
pub mod subnet;
pub mod types;

// Re-export key types and functions for easier access
pub use inference::infer;
pub use subnet::{group_by_subnet, SubnetClass, SubnetGroup, SubnetMember};
pub use types::{LinkEdge, LinkKind, NodeKind, TopologyGraph, TopologyNode, TopologySummary};
