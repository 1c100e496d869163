// Network Interface Domain Model

use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Kernel device identifier (e.g. "eth0", "wlan0")
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeviceId(String);

impl DeviceId {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DeviceId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Interface type, declared in preference order
///
/// The derived `Ord` is the ranking used by `NetInterfaces::find_up`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterfaceType {
    Ethernet,
    Wifi,
    #[serde(rename = "wifi_p2p")]
    WifiP2P,
    Loopback,
    Tun,
}

impl fmt::Display for InterfaceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InterfaceType::Ethernet => write!(f, "ethernet"),
            InterfaceType::Wifi => write!(f, "wifi"),
            InterfaceType::WifiP2P => write!(f, "wifi-p2p"),
            InterfaceType::Loopback => write!(f, "loopback"),
            InterfaceType::Tun => write!(f, "tun"),
        }
    }
}

/// Operational state as reported by the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterfaceState {
    Up,
    Down,
    Unknown(String),
}

impl fmt::Display for InterfaceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InterfaceState::Up => write!(f, "up"),
            InterfaceState::Down => write!(f, "down"),
            InterfaceState::Unknown(raw) => write!(f, "unknown ({})", raw),
        }
    }
}

/// One network interface
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetInterface {
    pub device: DeviceId,
    pub interface_type: Option<InterfaceType>,
    pub state: InterfaceState,
    /// Connection or profile name, when the backend has one
    pub name: Option<String>,
    pub ipv4_addresses: Vec<Ipv4Addr>,
    pub ipv6_addresses: Vec<Ipv6Addr>,
}

impl NetInterface {
    /// Interface with no type, name or addresses
    pub fn new(device: impl Into<String>, state: InterfaceState) -> Self {
        Self {
            device: DeviceId::new(device),
            interface_type: None,
            state,
            name: None,
            ipv4_addresses: Vec::new(),
            ipv6_addresses: Vec::new(),
        }
    }

    pub fn is_up(&self) -> bool {
        self.state == InterfaceState::Up
    }

    /// Sort key for preference: known types by `InterfaceType` order, unknown last
    fn rank(&self) -> (bool, Option<InterfaceType>) {
        (self.interface_type.is_none(), self.interface_type)
    }
}

/// Interfaces in the order the backend reported them
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NetInterfaces(Vec<NetInterface>);

impl NetInterfaces {
    pub fn new(interfaces: Vec<NetInterface>) -> Self {
        Self(interfaces)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, NetInterface> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> Vec<NetInterface> {
        self.0
    }

    /// First interface whose device id matches exactly
    pub fn find_device(&self, device: &DeviceId) -> Option<&NetInterface> {
        self.0.iter().find(|iface| &iface.device == device)
    }

    /// Most preferred interface that is up
    ///
    /// Ranked Ethernet, Wifi, WifiP2P, Loopback, Tun, then untyped.
    /// Among equal ranks the earliest in reporting order wins.
    pub fn find_up(&self) -> Option<&NetInterface> {
        self.0
            .iter()
            .filter(|iface| iface.is_up())
            .min_by_key(|iface| iface.rank())
    }
}

impl IntoIterator for NetInterfaces {
    type Item = NetInterface;
    type IntoIter = std::vec::IntoIter<NetInterface>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a NetInterfaces {
    type Item = &'a NetInterface;
    type IntoIter = std::slice::Iter<'a, NetInterface>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<NetInterface> for NetInterfaces {
    fn from_iter<I: IntoIterator<Item = NetInterface>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Backends able to list network interfaces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NetBackend {
    /// NetworkManager CLI
    Nmcli,
    /// iproute2
    Ip,
}

impl NetBackend {
    pub fn executable(&self) -> &'static str {
        match self {
            NetBackend::Nmcli => "nmcli",
            NetBackend::Ip => "ip",
        }
    }

    pub fn args(&self) -> &'static [&'static str] {
        match self {
            NetBackend::Nmcli => &["device", "show"],
            NetBackend::Ip => &["address", "show"],
        }
    }
}

impl fmt::Display for NetBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.executable())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown network backend: {0} (expected one of: nmcli, ip)")]
pub struct UnknownBackendError(pub String);

impl FromStr for NetBackend {
    type Err = UnknownBackendError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "nmcli" => Ok(NetBackend::Nmcli),
            "ip" => Ok(NetBackend::Ip),
            other => Err(UnknownBackendError(other.to_string())),
        }
    }
}
