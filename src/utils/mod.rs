//! Shared utilities: IPv4 address and subnet helpers.

pub mod ip_utils;

pub use ip_utils::{compute_network, stub_node_id};
