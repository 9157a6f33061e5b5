//! Topology graph type definitions.
//!
//! The graph is a directed petgraph graph whose nodes are either devices or
//! stub networks. It is only ever built by [`super::infer`]; consumers get
//! read-only access.

use std::collections::HashMap;

use ipnetwork::Ipv4Network;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use serde::{Deserialize, Serialize};

use crate::extract::DeviceRecord;

/// Discriminant for graph nodes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Device,
    StubNetwork,
}

/// A node in the topology graph
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TopologyNode {
    /// A configured device, keyed by hostname
    Device(DeviceRecord),
    /// A subnet that only one device touches
    StubNetwork { id: String, subnet: Ipv4Network },
}

impl TopologyNode {
    /// Unique node identifier: the hostname or the stub id
    pub fn id(&self) -> &str {
        match self {
            Self::Device(record) => record.hostname.as_str(),
            Self::StubNetwork { id, .. } => id.as_str(),
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            Self::Device(_) => NodeKind::Device,
            Self::StubNetwork { .. } => NodeKind::StubNetwork,
        }
    }

    /// Returns the device record if this is a device node
    pub fn as_device(&self) -> Option<&DeviceRecord> {
        match self {
            Self::Device(record) => Some(record),
            _ => None,
        }
    }
}

/// How an edge was inferred
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkKind {
    /// Both ends are devices on a shared subnet
    Shared,
    /// Device to stub network
    Stub,
}

/// Data attached to each directed edge
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkEdge {
    pub subnet: Ipv4Network,
    /// "<local interface> -> <remote interface or stub id>"
    pub label: String,
    pub local_interface: String,
    /// None for stub edges
    pub remote_interface: Option<String>,
    pub kind: LinkKind,
}

/// Counts recorded while the graph is built
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopologySummary {
    pub device_count: usize,
    pub node_count: usize,
    /// Undirected links: shared pairs plus stub attachments
    pub link_count: usize,
    /// Device-to-device pairs, each backed by two directed edges
    pub shared_link_count: usize,
    /// Device-to-stub attachments, each a single directed edge
    pub stub_link_count: usize,
    pub shared_subnet_count: usize,
    pub stub_subnet_count: usize,
}

/// Inferred device and stub-network connectivity.
///
/// Devices are keyed by hostname and stubs by subnet, so a hostname that
/// happens to look like a stub id never aliases a stub node.
#[derive(Debug, Clone, Default)]
pub struct TopologyGraph {
    graph: DiGraph<TopologyNode, LinkEdge>,
    device_index: HashMap<String, NodeIndex>,
    stub_index: HashMap<Ipv4Network, NodeIndex>,
    summary: TopologySummary,
}

impl TopologyGraph {
    /// Add a device node. Returns false if a node with that id already exists.
    pub(super) fn add_device(&mut self, record: DeviceRecord) -> bool {
        if self.device_index.contains_key(&record.hostname) {
            return false;
        }
        let id = record.hostname.clone();
        let index = self.graph.add_node(TopologyNode::Device(record));
        self.device_index.insert(id, index);
        self.summary.device_count += 1;
        true
    }

    /// Get or create the stub node for a subnet
    pub(super) fn add_stub(&mut self, id: &str, subnet: Ipv4Network) -> NodeIndex {
        if let Some(&index) = self.stub_index.get(&subnet) {
            return index;
        }
        let index = self.graph.add_node(TopologyNode::StubNetwork {
            id: id.to_string(),
            subnet,
        });
        self.stub_index.insert(subnet, index);
        index
    }

    /// Device node by hostname
    pub(super) fn index_of(&self, hostname: &str) -> Option<NodeIndex> {
        self.device_index.get(hostname).copied()
    }

    /// Any node by id; devices win over stubs with the same id
    fn lookup(&self, id: &str) -> Option<NodeIndex> {
        self.index_of(id).or_else(|| {
            self.stub_index
                .values()
                .copied()
                .find(|&index| self.graph[index].id() == id)
        })
    }

    pub(super) fn add_edge(&mut self, from: NodeIndex, to: NodeIndex, edge: LinkEdge) {
        self.graph.add_edge(from, to, edge);
    }

    pub(super) fn summary_mut(&mut self) -> &mut TopologySummary {
        &mut self.summary
    }

    /// Summary counts recorded during inference
    pub fn summary(&self) -> &TopologySummary {
        &self.summary
    }

    /// All nodes in insertion order: devices first, then stubs as discovered
    pub fn nodes(&self) -> impl Iterator<Item = &TopologyNode> + '_ {
        self.graph.node_indices().map(move |index| &self.graph[index])
    }

    /// All directed edges as (source id, target id, edge data)
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str, &LinkEdge)> + '_ {
        self.graph.edge_references().map(move |edge| {
            (
                self.graph[edge.source()].id(),
                self.graph[edge.target()].id(),
                edge.weight(),
            )
        })
    }

    pub fn node(&self, id: &str) -> Option<&TopologyNode> {
        self.lookup(id).map(|index| &self.graph[index])
    }

    /// The stub node for a subnet, if one was created
    pub fn stub(&self, subnet: &Ipv4Network) -> Option<&TopologyNode> {
        self.stub_index.get(subnet).map(|&index| &self.graph[index])
    }

    /// Look up a device record by hostname
    pub fn device(&self, hostname: &str) -> Option<&DeviceRecord> {
        self.index_of(hostname).and_then(|index| self.graph[index].as_device())
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Ids of nodes reachable over one outgoing edge, without duplicates
    pub fn neighbors(&self, id: &str) -> Vec<&str> {
        let Some(index) = self.lookup(id) else {
            return Vec::new();
        };

        let mut neighbors: Vec<&str> = self.graph
            .neighbors_directed(index, Direction::Outgoing)
            .map(|n| self.graph[n].id())
            .collect();
        neighbors.sort_unstable();
        neighbors.dedup();
        neighbors
    }

    /// Directed edges tagged with the given subnet
    pub fn edges_in_subnet(&self, subnet: &Ipv4Network) -> Vec<(&str, &str, &LinkEdge)> {
        self.edges().filter(|(_, _, edge)| edge.subnet == *subnet).collect()
    }

    /// Stub-network nodes only
    pub fn stub_networks(&self) -> impl Iterator<Item = &TopologyNode> + '_ {
        self.nodes().filter(|node| node.kind() == NodeKind::StubNetwork)
    }

    /// Read-only access to the underlying petgraph graph
    pub fn as_graph(&self) -> &DiGraph<TopologyNode, LinkEdge> {
        &self.graph
    }
}
