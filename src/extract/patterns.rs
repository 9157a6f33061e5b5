//! Compiled regex patterns for configuration extraction.

use std::sync::LazyLock;

use regex::Regex;

/// Compiled regex patterns for configuration parsing
pub struct ConfigPatterns {
    /// Match: "hostname R1" at the start of a line
    pub hostname: Regex,
    /// Match: "interface GigabitEthernet0/0" (applied to a trimmed line)
    pub interface_header: Regex,
    /// Match: "router ospf 1" / "router bgp 65000" (applied to a trimmed line)
    pub router_header: Regex,
    /// Match: a bare "shutdown" line, not "no shutdown"
    pub shutdown: Regex,
    /// Match: "ip address 10.0.0.1 255.255.255.252"
    pub ip_address: Regex,
    /// Match: "description Link to R2"
    pub description: Regex,
    /// Match: "encapsulation dot1Q 10"
    pub dot1q: Regex,
    /// Match: "Vlan10" as an interface name
    pub vlan_name: Regex,
    /// Match: "ip route 0.0.0.0 0.0.0.0 10.0.0.2 [distance]"
    pub static_route: Regex,
    /// Match: "network 10.0.0.0 0.0.0.3 area 0"
    pub ospf_network: Regex,
}

impl ConfigPatterns {
    pub fn new() -> Self {
        Self {
            hostname: Regex::new(
                r"(?m)^[ \t]*hostname[ \t]+(\S+)"
            ).expect("Invalid hostname regex"),
            interface_header: Regex::new(
                r"^interface[ \t]+(\S.*)$"
            ).expect("Invalid interface_header regex"),
            router_header: Regex::new(
                r"^router[ \t]+(\S+)(?:[ \t]+(\S+))?"
            ).expect("Invalid router_header regex"),
            shutdown: Regex::new(
                r"(?m)^[ \t]*shutdown\b"
            ).expect("Invalid shutdown regex"),
            ip_address: Regex::new(
                r"\bip address[ \t]+(\d+\.\d+\.\d+\.\d+)[ \t]+(\d+\.\d+\.\d+\.\d+)"
            ).expect("Invalid ip_address regex"),
            description: Regex::new(
                r"(?m)^[ \t]*description[ \t]+(.*)$"
            ).expect("Invalid description regex"),
            dot1q: Regex::new(
                r"(?i)encapsulation[ \t]+dot1q[ \t]+(\d+)"
            ).expect("Invalid dot1q regex"),
            vlan_name: Regex::new(
                r"(?i)^vlan[ \t]*(\d+)"
            ).expect("Invalid vlan_name regex"),
            static_route: Regex::new(
                r"(?m)^[ \t]*ip route[ \t]+(\d+\.\d+\.\d+\.\d+)[ \t]+(\d+\.\d+\.\d+\.\d+)[ \t]+(\S+)(.*)$"
            ).expect("Invalid static_route regex"),
            ospf_network: Regex::new(
                r"network[ \t]+(\d+\.\d+\.\d+\.\d+)[ \t]+(\d+\.\d+\.\d+\.\d+)[ \t]+area[ \t]+(\S+)"
            ).expect("Invalid ospf_network regex"),
        }
    }
}

impl Default for ConfigPatterns {
    fn default() -> Self {
        Self::new()
    }
}

/// Global patterns instance
pub static PATTERNS: LazyLock<ConfigPatterns> = LazyLock::new(ConfigPatterns::new);
