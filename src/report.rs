//! Report generation for inferred topologies.
//!
//! Generates a human-readable text summary, a JSON document and a GraphViz
//! DOT document. Rendering the DOT output is left to external tools.

use std::fs;
use std::path::Path;

use color_eyre::eyre::{Context, Result};
use ipnetwork::Ipv4Network;
use petgraph::visit::EdgeRef;
use serde::{Deserialize, Serialize};

use crate::extract::DeviceRecord;
use crate::inventory::DeviceInventory;
use crate::topology::{
    group_by_subnet, LinkKind, NodeKind, SubnetClass, SubnetGroup, TopologyGraph, TopologyNode,
    TopologySummary,
};

/// Full machine-readable report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopologyReport {
    pub generated_at: String,
    pub summary: TopologySummary,
    pub devices: Vec<DeviceRecord>,
    pub subnets: Vec<ReportSubnet>,
    pub nodes: Vec<ReportNode>,
    pub edges: Vec<ReportEdge>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportSubnet {
    #[serde(flatten)]
    pub group: SubnetGroup,
    pub class: SubnetClass,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportNode {
    pub id: String,
    pub kind: NodeKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subnet: Option<Ipv4Network>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportEdge {
    pub source: String,
    pub target: String,
    pub subnet: Ipv4Network,
    pub label: String,
    pub local_interface: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote_interface: Option<String>,
    pub kind: LinkKind,
}

/// Build the JSON report structure
pub fn build_report(inventory: &DeviceInventory, graph: &TopologyGraph) -> TopologyReport {
    let subnets = group_by_subnet(inventory)
        .into_iter()
        .map(|group| {
            let class = group.classify();
            ReportSubnet { group, class }
        })
        .collect();

    let nodes = graph
        .nodes()
        .map(|node| ReportNode {
            id: node.id().to_string(),
            kind: node.kind(),
            subnet: match node {
                TopologyNode::StubNetwork { subnet, .. } => Some(*subnet),
                TopologyNode::Device(_) => None,
            },
        })
        .collect();

    let edges = graph
        .edges()
        .map(|(source, target, edge)| ReportEdge {
            source: source.to_string(),
            target: target.to_string(),
            subnet: edge.subnet,
            label: edge.label.clone(),
            local_interface: edge.local_interface.clone(),
            remote_interface: edge.remote_interface.clone(),
            kind: edge.kind,
        })
        .collect();

    TopologyReport {
        generated_at: chrono::Utc::now().to_rfc3339(),
        summary: graph.summary().clone(),
        devices: inventory.iter().cloned().collect(),
        subnets,
        nodes,
        edges,
    }
}

/// Generate JSON report
pub fn write_json_report(report: &TopologyReport, output_path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(report)
        .context("Failed to serialize report to JSON")?;

    fs::write(output_path, json)
        .with_context(|| format!("Failed to write JSON report to {}", output_path.display()))?;

    log::info!("JSON report written to {}", output_path.display());
    Ok(())
}

fn member_list(group: &SubnetGroup) -> String {
    group
        .members
        .iter()
        .map(|m| format!("{} {}", m.hostname, m.interface))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Generate human-readable text summary
pub fn text_summary(inventory: &DeviceInventory, graph: &TopologyGraph) -> String {
    let summary = graph.summary();
    let mut lines: Vec<String> = Vec::new();

    lines.push("=".repeat(50));
    lines.push("TOPOLOGY SUMMARY".to_string());
    lines.push("=".repeat(50));
    lines.push(format!("Number of devices: {}", summary.device_count));
    lines.push(format!("Number of nodes in graph: {}", summary.node_count));
    lines.push(format!(
        "Number of links in graph: {} ({} shared, {} stub)",
        summary.link_count, summary.shared_link_count, summary.stub_link_count
    ));
    lines.push(String::new());

    lines.push("Devices and their interfaces:".to_string());
    for device in inventory {
        lines.push(format!("  {}:", device.hostname));
        for intf in device.interfaces.iter().filter(|i| i.has_address()) {
            let network = intf
                .network
                .map(|n| n.to_string())
                .unwrap_or_else(|| "N/A".to_string());
            lines.push(format!(
                "  - {}: {} ({})",
                intf.name,
                intf.ip_address.as_deref().unwrap_or_default(),
                network
            ));
        }
    }

    let groups = group_by_subnet(inventory);

    let shared: Vec<&SubnetGroup> = groups.iter().filter(|g| g.classify() == SubnetClass::Shared).collect();
    if !shared.is_empty() {
        lines.push(String::new());
        lines.push("Shared subnets:".to_string());
        for group in shared {
            lines.push(format!("  {}: {}", group.network, member_list(group)));
        }
    }

    let stubs: Vec<&SubnetGroup> = groups.iter().filter(|g| g.classify() == SubnetClass::Stub).collect();
    if !stubs.is_empty() {
        lines.push(String::new());
        lines.push("Stub networks:".to_string());
        for group in stubs {
            lines.push(format!("  {}: {}", group.network, member_list(group)));
        }
    }

    lines.push(String::new());
    lines.join("\n")
}

/// Write the text summary to a file
pub fn write_text_report(inventory: &DeviceInventory, graph: &TopologyGraph, output_path: &Path) -> Result<()> {
    fs::write(output_path, text_summary(inventory, graph))
        .with_context(|| format!("Failed to write text report to {}", output_path.display()))?;

    log::info!("Text report written to {}", output_path.display());
    Ok(())
}

fn escape(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Generate GraphViz DOT format for visualization.
///
/// Nodes are keyed by graph index and labelled with their id. Shared links
/// are drawn once per device pair as undirected edges; stub attachments point
/// from the device to the stub network.
pub fn generate_dot(graph: &TopologyGraph) -> String {
    let graph = graph.as_graph();

    let mut dot = String::new();
    dot.push_str("digraph Topology {\n");
    dot.push_str("    rankdir=LR;\n");
    dot.push_str("    label=\"Automatically Discovered Network Topology\";\n");
    dot.push_str("    labelloc=t;\n\n");

    for index in graph.node_indices() {
        let node = &graph[index];
        let (shape, color) = match node.kind() {
            NodeKind::Device => ("box", "lightblue"),
            NodeKind::StubNetwork => ("ellipse", "lightgreen"),
        };
        dot.push_str(&format!(
            "    n{} [label=\"{}\", shape={}, fillcolor={}, style=filled];\n",
            index.index(),
            escape(node.id()),
            shape,
            color
        ));
    }

    dot.push('\n');

    for edge_ref in graph.edge_references() {
        let (source, target) = (edge_ref.source().index(), edge_ref.target().index());
        let edge = edge_ref.weight();
        match edge.kind {
            LinkKind::Shared => {
                let remote = edge.remote_interface.as_deref().unwrap_or_default();
                // Each pair appears in both directions; keep one
                if (source, edge.local_interface.as_str()) > (target, remote) {
                    continue;
                }
                dot.push_str(&format!(
                    "    n{} -> n{} [dir=none, label=\"{}\\n{}\"];\n",
                    source,
                    target,
                    escape(&edge.label),
                    edge.subnet
                ));
            }
            LinkKind::Stub => {
                dot.push_str(&format!(
                    "    n{} -> n{} [label=\"{}\"];\n",
                    source,
                    target,
                    escape(&edge.local_interface)
                ));
            }
        }
    }

    dot.push_str("}\n");
    dot
}

/// Write the DOT document to a file
pub fn write_dot(graph: &TopologyGraph, output_path: &Path) -> Result<()> {
    fs::write(output_path, generate_dot(graph))
        .with_context(|| format!("Failed to write DOT file to {}", output_path.display()))?;

    log::info!("DOT graph written to {}", output_path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::extract;
    use crate::inventory::DuplicatePolicy;
    use crate::topology::infer;
    use tempfile::tempdir;

    fn sample() -> (DeviceInventory, TopologyGraph) {
        let r1 = extract(
            "hostname R1\ninterface Gi0/0\n ip address 10.0.0.1 255.255.255.252\n!\ninterface Gi0/1\n ip address 192.168.1.1 255.255.255.0\n!\ninterface Gi0/2\n ip address 10.9.9.1 999.999.999.999\n!",
            "R1",
        );
        let r2 = extract(
            "hostname R2\ninterface Gi0/0\n ip address 10.0.0.2 255.255.255.252\n!",
            "R2",
        );
        let inventory = DeviceInventory::from_records(vec![r1, r2], DuplicatePolicy::Reject).unwrap();
        let graph = infer(&inventory);
        (inventory, graph)
    }

    #[test]
    fn test_text_summary() {
        let (inventory, graph) = sample();
        let text = text_summary(&inventory, &graph);

        assert!(text.contains("Number of devices: 2"));
        assert!(text.contains("Number of nodes in graph: 3"));
        assert!(text.contains("Number of links in graph: 2 (1 shared, 1 stub)"));
        assert!(text.contains("  - Gi0/0: 10.0.0.1 (10.0.0.0/30)"));
        assert!(text.contains("  - Gi0/2: 10.9.9.1 (N/A)"));
        assert!(text.contains("  10.0.0.0/30: R1 Gi0/0, R2 Gi0/0"));
        assert!(text.contains("  192.168.1.0/24: R1 Gi0/1"));
    }

    #[test]
    fn test_build_report() {
        let (inventory, graph) = sample();
        let report = build_report(&inventory, &graph);

        assert_eq!(report.devices.len(), 2);
        assert_eq!(report.nodes.len(), 3);
        assert_eq!(report.edges.len(), 3);
        assert_eq!(report.subnets.len(), 2);

        let stub = report.nodes.iter().find(|n| n.kind == NodeKind::StubNetwork).unwrap();
        assert_eq!(stub.id, "STUB_192.168.1.0_24");
        assert_eq!(stub.subnet.unwrap().to_string(), "192.168.1.0/24");

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["summary"]["link_count"], 2);
        assert_eq!(json["subnets"][0]["network"], "10.0.0.0/30");
        assert_eq!(json["subnets"][0]["class"], "shared");
        assert_eq!(json["nodes"][2]["kind"], "stub_network");
    }

    #[test]
    fn test_generate_dot() {
        let (_, graph) = sample();
        let dot = generate_dot(&graph);

        assert!(dot.starts_with("digraph Topology {"));
        // Nodes in insertion order: R1, R2, then the stub
        assert!(dot.contains("n0 [label=\"R1\", shape=box"));
        assert!(dot.contains("n2 [label=\"STUB_192.168.1.0_24\", shape=ellipse"));
        // Shared pair drawn once
        assert_eq!(dot.matches("dir=none").count(), 1);
        assert!(dot.contains("n0 -> n1 [dir=none, label=\"Gi0/0 -> Gi0/0\\n10.0.0.0/30\"]"));
        assert!(dot.contains("n0 -> n2 [label=\"Gi0/1\"]"));
        assert!(dot.trim_end().ends_with('}'));
    }

    #[test]
    fn test_generate_dot_keeps_lookalike_hostname_apart() {
        let lookalike = extract(
            "hostname STUB_192.168.1.0_24\ninterface Gi0/0\n ip address 10.0.0.2 255.255.255.252\n!",
            "x",
        );
        let r1 = extract(
            "hostname R1\ninterface Gi0/0\n ip address 10.0.0.1 255.255.255.252\n!\ninterface Gi0/1\n ip address 192.168.1.1 255.255.255.0\n!",
            "R1",
        );
        let graph = infer([&r1, &lookalike]);
        let dot = generate_dot(&graph);

        assert_eq!(dot.matches("label=\"STUB_192.168.1.0_24\"").count(), 2);
        assert!(dot.contains("n1 [label=\"STUB_192.168.1.0_24\", shape=box"));
        assert!(dot.contains("n2 [label=\"STUB_192.168.1.0_24\", shape=ellipse"));
        assert!(dot.contains("n0 -> n2 [label=\"Gi0/1\"]"));
    }

    #[test]
    fn test_write_reports() {
        let (inventory, graph) = sample();
        let dir = tempdir().unwrap();

        let json_path = dir.path().join("topology.json");
        write_json_report(&build_report(&inventory, &graph), &json_path).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&fs::read_to_string(&json_path).unwrap()).unwrap();
        assert_eq!(parsed["devices"][0]["hostname"], "R1");

        let dot_path = dir.path().join("topology.dot");
        write_dot(&graph, &dot_path).unwrap();
        assert!(fs::read_to_string(&dot_path).unwrap().contains("digraph"));

        let text_path = dir.path().join("summary.txt");
        write_text_report(&inventory, &graph, &text_path).unwrap();
        assert!(fs::read_to_string(&text_path).unwrap().contains("TOPOLOGY SUMMARY"));
    }
}
