//! # config-topology - Network topology inference from router configurations
//!
//! This library infers which device interfaces are connected to each other
//! from a snapshot of per-device router configuration dumps, without any live
//! network access.
//!
//! ## Overview
//!
//! The pipeline is one-way:
//!
//! 1. **Extraction** turns one device's configuration text into a
//!    [`extract::DeviceRecord`]: hostname, interfaces with their addressing,
//!    static routes and OSPF processes.
//! 2. **Inference** groups every addressed interface by its computed network.
//!    A network seen on two or more devices is a shared link and every pair of
//!    devices on it gets a symmetric edge pair; a network seen on one device
//!    becomes a stub-network node.
//!
//! ## Architecture
//!
//! - `extract`: block segmentation and pattern extraction of device records
//! - `topology`: subnet grouping, classification and the topology graph
//! - `inventory`: hostname-keyed device collection with duplicate detection
//! - `dump_loader`: configuration directory discovery and parallel extraction
//! - `settings` / `config_loader`: YAML run settings and CLI overrides
//! - `report`: text, JSON and GraphViz DOT output
//! - `orchestrator`: end-to-end run used by the binary
//! - `utils`: IPv4 subnet helpers
//!
//! ## Example Usage
//!
//! ```rust
//! use config_topology::extract::extract;
//! use config_topology::topology::infer;
//!
//! let r1 = extract("hostname R1\ninterface Gi0/0\n ip address 10.0.0.1 255.255.255.252\n!", "R1");
//! let r2 = extract("hostname R2\ninterface Gi0/0\n ip address 10.0.0.2 255.255.255.252\n!", "R2");
//!
//! let graph = infer([&r1, &r2]);
//! assert_eq!(graph.summary().shared_link_count, 1);
//! assert_eq!(graph.edge_count(), 2);
//! ```
//!
//! ## Error Handling
//!
//! Extraction and inference never fail. Module seams that can fail (loading,
//! inventory assembly, settings) return `thiserror` enums; the orchestration
//! layer and the binary use `color_eyre` reports with context.

pub mod config_loader;
pub mod dump_loader;
pub mod extract;
pub mod inventory;
pub mod orchestrator;
pub mod report;
pub mod settings;
pub mod topology;
pub mod utils;
