// nmcli grammar: `nmcli device show`
//
// Output is one block per device, blocks separated by blank lines:
//
//   GENERAL.DEVICE:                         wlp2s0
//   GENERAL.TYPE:                           wifi
//   GENERAL.STATE:                          100 (connected)
//   GENERAL.CONNECTION:                     Home
//   IP4.ADDRESS[1]:                         192.168.1.23/24
//   IP6.ADDRESS[1]:                         fe80::1c2b:9aff:fe01:2/64

use std::net::{Ipv4Addr, Ipv6Addr};

use super::LineCursor;
use crate::domain::error::ParseError;
use crate::domain::network::{InterfaceState, InterfaceType, NetInterface, NetInterfaces};

pub const SOURCE: &str = "nmcli device show";

const DEVICE_LABEL: &str = "GENERAL.DEVICE:";

/// NetworkManager device state codes (NM_DEVICE_STATE_*)
const STATE_ACTIVATED: u32 = 100;
const STATE_UNAVAILABLE: u32 = 20;
const STATE_DISCONNECTED: u32 = 30;

/// Parse the full output of `nmcli device show`
pub fn parse_device_show(output: &str) -> Result<NetInterfaces, ParseError> {
    let mut cursor = LineCursor::new(SOURCE, output);
    let mut interfaces = Vec::new();

    while let Some(line) = cursor.peek() {
        if line.trim().is_empty() {
            cursor.skip_line();
            continue;
        }
        if !line.starts_with(DEVICE_LABEL) {
            return Err(cursor.error(format!(
                "expected `{}` to start a device block",
                DEVICE_LABEL
            )));
        }
        interfaces.push(parse_block(&mut cursor)?);
    }

    Ok(NetInterfaces::new(interfaces))
}

fn parse_block(cursor: &mut LineCursor<'_>) -> Result<NetInterface, ParseError> {
    let device = cursor.labeled(DEVICE_LABEL)?.trim();
    let mut iface = NetInterface::new(device, InterfaceState::Unknown("unreported".to_string()));

    while let Some(line) = cursor.peek() {
        if line.trim().is_empty() || line.starts_with(DEVICE_LABEL) {
            break;
        }

        let at = cursor.clone();
        let (key, value) = cursor.key_value()?;

        match field_name(key) {
            "GENERAL.TYPE" => iface.interface_type = interface_type(value),
            "GENERAL.STATE" => iface.state = interface_state(value),
            "GENERAL.CONNECTION" => iface.name = connection_name(value),
            "IP4.ADDRESS" => iface.ipv4_addresses.push(
                strip_prefix_len(value)
                    .parse::<Ipv4Addr>()
                    .map_err(|e| at.error(format!("invalid IPv4 address `{}`: {}", value, e)))?,
            ),
            "IP6.ADDRESS" => iface.ipv6_addresses.push(
                strip_prefix_len(value)
                    .parse::<Ipv6Addr>()
                    .map_err(|e| at.error(format!("invalid IPv6 address `{}`: {}", value, e)))?,
            ),
            _ => {}
        }
    }

    Ok(iface)
}

/// "IP4.ADDRESS[2]" -> "IP4.ADDRESS"
fn field_name(key: &str) -> &str {
    key.split('[').next().unwrap_or(key)
}

/// "192.168.1.23/24" -> "192.168.1.23"
fn strip_prefix_len(value: &str) -> &str {
    value.split('/').next().unwrap_or(value).trim()
}

fn interface_type(value: &str) -> Option<InterfaceType> {
    match value {
        "ethernet" => Some(InterfaceType::Ethernet),
        "wifi" => Some(InterfaceType::Wifi),
        "wifi-p2p" => Some(InterfaceType::WifiP2P),
        "loopback" => Some(InterfaceType::Loopback),
        "tun" => Some(InterfaceType::Tun),
        _ => None,
    }
}

/// "100 (connected)" -> Up, "30 (disconnected)" -> Down
fn interface_state(value: &str) -> InterfaceState {
    let (code, description) = value.split_once(' ').unwrap_or((value, ""));
    let description = description.trim();
    let label = description
        .strip_prefix('(')
        .and_then(|d| d.strip_suffix(')'))
        .unwrap_or(description);

    match code.parse::<u32>() {
        Ok(STATE_ACTIVATED) => InterfaceState::Up,
        Ok(STATE_UNAVAILABLE) | Ok(STATE_DISCONNECTED) => InterfaceState::Down,
        _ if label.is_empty() => InterfaceState::Unknown(value.to_string()),
        _ => InterfaceState::Unknown(label.to_string()),
    }
}

fn connection_name(value: &str) -> Option<String> {
    match value {
        "" | "--" => None,
        name => Some(name.to_string()),
    }
}
