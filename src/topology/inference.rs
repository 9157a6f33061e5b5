//! Subnet-correlation inference of links between devices.

use log::{debug, info, warn};

use super::subnet::{group_by_subnet, SubnetClass, SubnetGroup};
use super::types::{LinkEdge, LinkKind, TopologyGraph};
use crate::extract::DeviceRecord;
use crate::utils::ip_utils::stub_node_id;

/// Infer the topology graph for a collection of device records.
///
/// Pure: every call builds a fresh graph. Every device becomes a node even if
/// no link is found for it. A record whose hostname was already seen is
/// ignored; use [`crate::inventory::DeviceInventory`] to reject those up front.
pub fn infer<'a, I>(devices: I) -> TopologyGraph
where
    I: IntoIterator<Item = &'a DeviceRecord>,
{
    let mut graph = TopologyGraph::default();
    let mut accepted: Vec<&DeviceRecord> = Vec::new();

    for record in devices {
        if graph.add_device(record.clone()) {
            accepted.push(record);
        } else {
            warn!("Ignoring second device record for hostname '{}'", record.hostname);
        }
    }

    let groups = group_by_subnet(accepted.iter().copied());
    debug!("Grouped interfaces into {} subnets", groups.len());

    for group in &groups {
        match group.classify() {
            SubnetClass::Shared => link_shared_subnet(&mut graph, group),
            SubnetClass::Stub => link_stub_subnet(&mut graph, group),
        }
    }

    let node_count = graph.node_count();
    let summary = graph.summary_mut();
    summary.node_count = node_count;
    summary.link_count = summary.shared_link_count + summary.stub_link_count;

    info!(
        "Topology inferred: {} devices, {} nodes, {} links ({} shared, {} stub)",
        summary.device_count,
        summary.node_count,
        summary.link_count,
        summary.shared_link_count,
        summary.stub_link_count
    );

    graph
}

/// Connect every pair of members on different devices with a symmetric edge pair
fn link_shared_subnet(graph: &mut TopologyGraph, group: &SubnetGroup) {
    info!("Found shared subnet: {}", group.network);

    for (i, a) in group.members.iter().enumerate() {
        for b in &group.members[i + 1..] {
            if a.hostname == b.hostname {
                warn!(
                    "{} has interfaces {} and {} on the same subnet {}",
                    a.hostname, a.interface, b.interface, group.network
                );
                continue;
            }

            let (Some(from), Some(to)) = (graph.index_of(&a.hostname), graph.index_of(&b.hostname)) else {
                continue;
            };

            graph.add_edge(from, to, LinkEdge {
                subnet: group.network,
                label: format!("{} -> {}", a.interface, b.interface),
                local_interface: a.interface.clone(),
                remote_interface: Some(b.interface.clone()),
                kind: LinkKind::Shared,
            });
            graph.add_edge(to, from, LinkEdge {
                subnet: group.network,
                label: format!("{} -> {}", b.interface, a.interface),
                local_interface: b.interface.clone(),
                remote_interface: Some(a.interface.clone()),
                kind: LinkKind::Shared,
            });
            graph.summary_mut().shared_link_count += 1;

            debug!("Created link: {} <-> {} on {}", a.hostname, b.hostname, group.network);
        }
    }

    graph.summary_mut().shared_subnet_count += 1;
}

/// Attach the single device on this subnet to a stub-network node
fn link_stub_subnet(graph: &mut TopologyGraph, group: &SubnetGroup) {
    let Some(first) = group.members.first() else {
        return;
    };
    let Some(device) = graph.index_of(&first.hostname) else {
        return;
    };

    for extra in &group.members[1..] {
        warn!(
            "{} has interfaces {} and {} on the same subnet {}",
            first.hostname, first.interface, extra.interface, group.network
        );
    }

    let stub_id = stub_node_id(&group.network);
    let stub = graph.add_stub(&stub_id, group.network);

    graph.add_edge(device, stub, LinkEdge {
        subnet: group.network,
        label: format!("{} -> {}", first.interface, stub_id),
        local_interface: first.interface.clone(),
        remote_interface: None,
        kind: LinkKind::Stub,
    });

    let summary = graph.summary_mut();
    summary.stub_link_count += 1;
    summary.stub_subnet_count += 1;

    info!("Found stub network: {} attached to {}", group.network, first.hostname);
}
