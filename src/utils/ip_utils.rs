use std::net::Ipv4Addr;

use ipnetwork::Ipv4Network;

/// IP utility functions for address/mask arithmetic

/// Compute the canonical network for an address and mask pair.
///
/// The mask is read as a netmask first (`255.255.255.252`). When that fails
/// but the value is a contiguous host mask (`0.0.0.3`), its inverse is used.
/// Returns `None` for unparseable addresses or non-contiguous masks.
pub fn compute_network(address: &str, mask: &str) -> Option<Ipv4Network> {
    let address = address.trim().parse::<Ipv4Addr>().ok()?;
    let mask = mask.trim().parse::<Ipv4Addr>().ok()?;

    let with_mask = Ipv4Network::with_netmask(address, mask).or_else(|_| {
        let inverted = Ipv4Addr::from(!u32::from(mask));
        Ipv4Network::with_netmask(address, inverted)
    });

    let network = with_mask.ok()?;
    Ipv4Network::new(network.network(), network.prefix()).ok()
}

/// Deterministic node identifier for a stub network, e.g. `STUB_10.0.0.0_30`
pub fn stub_node_id(network: &Ipv4Network) -> String {
    format!("STUB_{}_{}", network.network(), network.prefix())
}
