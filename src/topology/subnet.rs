//! Grouping of interfaces by computed subnet.

use std::collections::HashMap;

use ipnetwork::Ipv4Network;
use serde::{Deserialize, Serialize};

use crate::extract::DeviceRecord;

/// One interface attached to a subnet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubnetMember {
    pub hostname: String,
    pub interface: String,
}

/// How a subnet group is treated during inference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubnetClass {
    /// Two or more distinct devices
    Shared,
    /// A single device
    Stub,
}

/// All interfaces that share one network, in first-seen order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubnetGroup {
    pub network: Ipv4Network,
    pub members: Vec<SubnetMember>,
}

impl SubnetGroup {
    /// Number of distinct devices among the members
    pub fn device_count(&self) -> usize {
        let mut hostnames: Vec<&str> = self.members.iter().map(|m| m.hostname.as_str()).collect();
        hostnames.sort_unstable();
        hostnames.dedup();
        hostnames.len()
    }

    pub fn classify(&self) -> SubnetClass {
        if self.device_count() >= 2 {
            SubnetClass::Shared
        } else {
            SubnetClass::Stub
        }
    }
}

/// Group every interface with a computed network by that network.
///
/// Groups come back in the order their network was first seen; members keep
/// device order, then interface order. A group is only created on first
/// insertion, so none is empty.
pub fn group_by_subnet<'a, I>(devices: I) -> Vec<SubnetGroup>
where
    I: IntoIterator<Item = &'a DeviceRecord>,
{
    let mut groups: Vec<SubnetGroup> = Vec::new();
    let mut positions: HashMap<Ipv4Network, usize> = HashMap::new();

    for device in devices {
        for (intf, network) in device.addressed_interfaces() {
            let member = SubnetMember {
                hostname: device.hostname.clone(),
                interface: intf.name.clone(),
            };

            match positions.get(&network) {
                Some(&position) => groups[position].members.push(member),
                None => {
                    positions.insert(network, groups.len());
                    groups.push(SubnetGroup {
                        network,
                        members: vec![member],
                    });
                }
            }
        }
    }

    groups
}
