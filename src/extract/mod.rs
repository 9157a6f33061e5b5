//! Config extraction: one device's configuration text to a [`DeviceRecord`].
//!
//! Extraction is total over arbitrary text. A pattern that does not match
//! leaves its field unset; nothing here returns an error.

pub mod blocks;
pub mod patterns;
pub mod types;

pub use blocks::{segment_blocks, BlockHeader, ConfigBlock};
pub use types::{DeviceRecord, InterfaceFact, OspfNetwork, OspfProcess, StaticRoute};

use crate::utils::ip_utils::compute_network;
use patterns::PATTERNS;

/// Extract a device record from configuration text.
///
/// `fallback_hostname` is used when the text has no `hostname` directive.
pub fn extract(config_text: &str, fallback_hostname: &str) -> DeviceRecord {
    let hostname = parse_hostname(config_text).unwrap_or_else(|| {
        log::debug!("No hostname directive found, using fallback '{}'", fallback_hostname);
        fallback_hostname.to_string()
    });

    let mut record = DeviceRecord::new(hostname);
    let blocks = segment_blocks(config_text);

    for block in &blocks {
        if let Some(name) = block.interface_name() {
            record.interfaces.push(parse_interface(name, &block.body()));
        } else if let Some(process) = block.router_process("ospf") {
            if let Some(ospf) = parse_ospf_process(process, &block.body()) {
                record.ospf_processes.push(ospf);
            }
        }
    }

    record.static_routes = parse_static_routes(config_text);

    log::debug!(
        "Extracted {}: {} interfaces, {} static routes, {} OSPF processes",
        record.hostname,
        record.interfaces.len(),
        record.static_routes.len(),
        record.ospf_processes.len()
    );

    record
}

fn parse_hostname(text: &str) -> Option<String> {
    let caps = PATTERNS.hostname.captures(text)?;
    Some(caps.get(1)?.as_str().to_string())
}

/// Build an interface fact from its name and block body
fn parse_interface(name: &str, body: &str) -> InterfaceFact {
    let mut intf = InterfaceFact::new(name);

    intf.shutdown = PATTERNS.shutdown.is_match(body);

    if let Some(caps) = PATTERNS.ip_address.captures(body) {
        let address = caps.get(1).map(|m| m.as_str().to_string()).unwrap_or_default();
        let mask = caps.get(2).map(|m| m.as_str().to_string()).unwrap_or_default();

        intf.network = compute_network(&address, &mask);
        if intf.network.is_none() {
            log::debug!("Malformed address on {}: {} {}", name, address, mask);
        }
        intf.ip_address = Some(address);
        intf.subnet_mask = Some(mask);
    }

    intf.description = PATTERNS.description
        .captures(body)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|desc| !desc.is_empty());

    intf.vlan_id = parse_vlan(name, body);

    intf
}

/// 802.1Q encapsulation wins over a VLAN-style interface name
fn parse_vlan(name: &str, body: &str) -> Option<u16> {
    if let Some(caps) = PATTERNS.dot1q.captures(body) {
        return caps.get(1)?.as_str().parse().ok();
    }

    PATTERNS.vlan_name
        .captures(name)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

fn parse_static_routes(text: &str) -> Vec<StaticRoute> {
    PATTERNS.static_route
        .captures_iter(text)
        .map(|caps| {
            let field = |i: usize| caps.get(i).map(|m| m.as_str().to_string()).unwrap_or_default();
            let distance = caps.get(4)
                .and_then(|m| m.as_str().split_whitespace().next())
                .and_then(|token| token.parse::<u8>().ok());

            StaticRoute {
                destination: field(1),
                mask: field(2),
                next_hop: field(3),
                distance,
            }
        })
        .collect()
}

fn parse_ospf_process(process: &str, body: &str) -> Option<OspfProcess> {
    let process_id = match process.parse::<u32>() {
        Ok(id) => id,
        Err(_) => {
            log::debug!("Skipping OSPF process with non-numeric id '{}'", process);
            return None;
        }
    };

    let networks = PATTERNS.ospf_network
        .captures_iter(body)
        .map(|caps| {
            let field = |i: usize| caps.get(i).map(|m| m.as_str().to_string()).unwrap_or_default();
            OspfNetwork {
                network: field(1),
                wildcard: field(2),
                area: field(3),
            }
        })
        .collect();

    Some(OspfProcess { process_id, networks })
}

#[cfg(test)]
mod tests {
    use super::*;

    const R1_CONFIG: &str = "\
!
version 15.2
hostname R1
!
interface GigabitEthernet0/0
 description Link to R2
 ip address 10.0.0.1 255.255.255.252
 no shutdown
!
interface GigabitEthernet0/1
 ip address 192.168.1.1 255.255.255.0
 shutdown
!
interface GigabitEthernet0/2.20
 encapsulation dot1Q 20
 ip address 192.168.20.1 255.255.255.0
!
interface Vlan30
 ip address 192.168.30.1 255.255.255.0
!
interface Loopback0
 no ip address
!
router ospf 1
 router-id 1.1.1.1
 network 10.0.0.0 0.0.0.3 area 0
 network 192.168.1.0 0.0.0.255 area 0.0.0.1
!
router ospf 2
 network 172.16.0.0 0.0.255.255 area 5
!
ip route 0.0.0.0 0.0.0.0 10.0.0.2
ip route 0.0.0.0 0.0.0.0 10.0.0.2
ip route 172.31.0.0 255.255.0.0 Null0 250
!
end
";

    #[test]
    fn test_extract_full_config() {
        let record = extract(R1_CONFIG, "fallback");

        assert_eq!(record.hostname, "R1");
        assert_eq!(record.interfaces.len(), 5);

        let names: Vec<&str> = record.interfaces.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["GigabitEthernet0/0", "GigabitEthernet0/1", "GigabitEthernet0/2.20", "Vlan30", "Loopback0"]
        );
    }

    #[test]
    fn test_interface_fields() {
        let record = extract(R1_CONFIG, "fallback");

        let gi0 = record.interface("GigabitEthernet0/0").unwrap();
        assert_eq!(gi0.description.as_deref(), Some("Link to R2"));
        assert_eq!(gi0.ip_address.as_deref(), Some("10.0.0.1"));
        assert_eq!(gi0.subnet_mask.as_deref(), Some("255.255.255.252"));
        assert_eq!(gi0.network.unwrap().to_string(), "10.0.0.0/30");
        assert!(!gi0.shutdown);
        assert_eq!(gi0.vlan_id, None);

        let gi1 = record.interface("GigabitEthernet0/1").unwrap();
        assert!(gi1.shutdown);
        assert_eq!(gi1.network.unwrap().to_string(), "192.168.1.0/24");

        let lo0 = record.interface("Loopback0").unwrap();
        assert!(!lo0.has_address());
        assert_eq!(lo0.network, None);
    }

    #[test]
    fn test_vlan_detection() {
        let record = extract(R1_CONFIG, "fallback");
        assert_eq!(record.interface("GigabitEthernet0/2.20").unwrap().vlan_id, Some(20));
        assert_eq!(record.interface("Vlan30").unwrap().vlan_id, Some(30));
    }

    #[test]
    fn test_dot1q_wins_over_name() {
        let record = extract("interface Vlan5\n encapsulation dot1Q 7\n!", "SW1");
        assert_eq!(record.interfaces[0].vlan_id, Some(7));
    }

    #[test]
    fn test_static_routes_keep_duplicates() {
        let record = extract(R1_CONFIG, "fallback");
        assert_eq!(record.static_routes.len(), 3);
        assert_eq!(record.static_routes[0], record.static_routes[1]);
        assert_eq!(record.static_routes[0].next_hop, "10.0.0.2");
        assert_eq!(record.static_routes[0].distance, None);
        assert_eq!(record.static_routes[2].next_hop, "Null0");
        assert_eq!(record.static_routes[2].distance, Some(250));
    }

    #[test]
    fn test_ospf_processes() {
        let record = extract(R1_CONFIG, "fallback");
        assert_eq!(record.ospf_processes.len(), 2);

        let first = &record.ospf_processes[0];
        assert_eq!(first.process_id, 1);
        assert_eq!(first.networks.len(), 2);
        assert_eq!(first.networks[0].network, "10.0.0.0");
        assert_eq!(first.networks[0].wildcard, "0.0.0.3");
        assert_eq!(first.networks[0].area, "0");
        assert_eq!(first.networks[1].area, "0.0.0.1");

        assert_eq!(record.ospf_processes[1].process_id, 2);
        assert_eq!(record.ospf_processes[1].networks.len(), 1);
    }

    #[test]
    fn test_malformed_mask_keeps_raw_strings() {
        let config = "\
hostname R5
interface GigabitEthernet0/0
 description bad mask
 ip address 10.0.0.1 999.999.999.999
!
interface GigabitEthernet0/1
 ip address 10.9.9.1 255.255.255.0
!";
        let record = extract(config, "fallback");

        let bad = &record.interfaces[0];
        assert_eq!(bad.ip_address.as_deref(), Some("10.0.0.1"));
        assert_eq!(bad.subnet_mask.as_deref(), Some("999.999.999.999"));
        assert_eq!(bad.network, None);
        assert_eq!(bad.description.as_deref(), Some("bad mask"));

        assert_eq!(record.hostname, "R5");
        assert_eq!(record.interfaces[1].network.unwrap().to_string(), "10.9.9.0/24");

        let addressed: Vec<&str> = record.addressed_interfaces().map(|(intf, _)| intf.name.as_str()).collect();
        assert_eq!(addressed, vec!["GigabitEthernet0/1"]);
    }

    #[test]
    fn test_fallback_hostname() {
        let record = extract("interface Gi0/0\n ip address 10.0.0.1 255.0.0.0\n!", "R9");
        assert_eq!(record.hostname, "R9");
    }

    #[test]
    fn test_address_after_comment_line() {
        let record = extract("hostname R1\ninterface Gi0/0\n !note\n ip address 10.0.0.1 255.255.255.0\n!", "R1");

        let intf = record.interface("Gi0/0").unwrap();
        assert_eq!(intf.ip_address.as_deref(), Some("10.0.0.1"));
        assert_eq!(intf.network.unwrap().to_string(), "10.0.0.0/24");
    }

    #[test]
    fn test_no_interfaces() {
        let record = extract("hostname EMPTY\n!\nend\n", "x");
        assert!(record.interfaces.is_empty());
        assert!(record.static_routes.is_empty());
        assert!(record.ospf_processes.is_empty());
    }

    #[test]
    fn test_extraction_is_total() {
        let inputs = [
            "",
            "!",
            "interface",
            "interface \n",
            "ip route 1.2.3.4",
            "router ospf\n network",
            "router ospf 99999999999999999999\n network 1.1.1.1 0.0.0.0 area 0",
            "interface Vlan99999999\n encapsulation dot1Q 999999",
            "\u{feff}hostname ☃\ninterface é\n ip address 1.1.1.1 1.1.1.1\n",
        ];

        for input in inputs {
            let _ = extract(input, "fallback");
        }

        let record = extract(inputs[7], "fallback");
        assert_eq!(record.interfaces[0].vlan_id, None);
        let record = extract(inputs[6], "fallback");
        assert!(record.ospf_processes.is_empty());
    }

    #[test]
    fn test_indented_config() {
        let config = "
    hostname R1
    interface GigabitEthernet0/0
     ip address 192.168.1.1 255.255.255.0
    interface GigabitEthernet0/1
     ip address 10.0.0.1 255.255.255.252
    ";
        let record = extract(config, "Unknown");
        assert_eq!(record.hostname, "R1");
        assert_eq!(record.interfaces.len(), 2);
        assert_eq!(record.interfaces[0].network.unwrap().to_string(), "192.168.1.0/24");
        assert_eq!(record.interfaces[1].network.unwrap().to_string(), "10.0.0.0/30");
    }
}
