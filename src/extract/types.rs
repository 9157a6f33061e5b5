//! Structured facts extracted from one device's configuration text.

use ipnetwork::Ipv4Network;
use serde::{Deserialize, Serialize};

/// One configured interface on one device
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceFact {
    /// Interface designation as written after `interface`, e.g. `GigabitEthernet0/0`
    pub name: String,
    /// Raw address token, kept even when it does not parse
    pub ip_address: Option<String>,
    /// Raw mask token, kept even when it does not parse
    pub subnet_mask: Option<String>,
    /// Canonical network computed from the address and mask
    pub network: Option<Ipv4Network>,
    pub description: Option<String>,
    pub shutdown: bool,
    pub vlan_id: Option<u16>,
}

impl InterfaceFact {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ip_address: None,
            subnet_mask: None,
            network: None,
            description: None,
            shutdown: false,
            vlan_id: None,
        }
    }

    /// Returns true if an address/mask pair was configured, valid or not
    pub fn has_address(&self) -> bool {
        self.ip_address.is_some()
    }
}

/// A static route line; informational only
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaticRoute {
    pub destination: String,
    pub mask: String,
    /// Next-hop address or exit interface name
    pub next_hop: String,
    /// Administrative distance for floating routes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<u8>,
}

/// One `network ... area ...` statement inside an OSPF process
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OspfNetwork {
    pub network: String,
    pub wildcard: String,
    /// Area as written, either decimal (`0`) or dotted (`0.0.0.0`)
    pub area: String,
}

/// A `router ospf <id>` process and its network statements
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OspfProcess {
    pub process_id: u32,
    pub networks: Vec<OspfNetwork>,
}

/// The structured extraction result for one device
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceRecord {
    pub hostname: String,
    /// Where the text came from, used when reporting conflicts
    pub origin: String,
    /// Interfaces in document order
    pub interfaces: Vec<InterfaceFact>,
    pub static_routes: Vec<StaticRoute>,
    pub ospf_processes: Vec<OspfProcess>,
}

impl DeviceRecord {
    pub fn new(hostname: impl Into<String>) -> Self {
        Self {
            hostname: hostname.into(),
            origin: String::new(),
            interfaces: Vec::new(),
            static_routes: Vec::new(),
            ospf_processes: Vec::new(),
        }
    }

    /// Look up an interface by name
    pub fn interface(&self, name: &str) -> Option<&InterfaceFact> {
        self.interfaces.iter().find(|intf| intf.name == name)
    }

    /// Interfaces that carry a valid computed network, paired with it
    pub fn addressed_interfaces(&self) -> impl Iterator<Item = (&InterfaceFact, Ipv4Network)> {
        self.interfaces
            .iter()
            .filter_map(|intf| intf.network.map(|network| (intf, network)))
    }
}
