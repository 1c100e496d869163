// iproute2 grammar: `ip address show`
//
//   2: eth0: <BROADCAST,MULTICAST,UP,LOWER_UP> mtu 1500 qdisc fq_codel state UP group default qlen 1000
//       link/ether 52:54:00:12:34:56 brd ff:ff:ff:ff:ff:ff
//       inet 10.0.2.15/24 brd 10.0.2.255 scope global dynamic eth0
//          valid_lft 86391sec preferred_lft 86391sec
//       inet6 fe80::5054:ff:fe12:3456/64 scope link
//          valid_lft forever preferred_lft forever

use std::net::{Ipv4Addr, Ipv6Addr};

use super::LineCursor;
use crate::domain::error::ParseError;
use crate::domain::network::{InterfaceState, InterfaceType, NetInterface, NetInterfaces};

pub const SOURCE: &str = "ip address show";

/// Parse the full output of `ip address show`
pub fn parse_address_show(output: &str) -> Result<NetInterfaces, ParseError> {
    let mut cursor = LineCursor::new(SOURCE, output);
    let mut interfaces: Vec<NetInterface> = Vec::new();

    while let Some(line) = cursor.peek() {
        if line.trim().is_empty() {
            cursor.skip_line();
            continue;
        }

        if is_header(line) {
            let iface = parse_header(&cursor, line)?;
            cursor.skip_line();
            interfaces.push(iface);
            continue;
        }

        let Some(iface) = interfaces.last_mut() else {
            return Err(cursor.error("expected an interface header line"));
        };
        parse_detail(&cursor, line.trim_start(), iface)?;
        cursor.skip_line();
    }

    Ok(NetInterfaces::new(interfaces))
}

/// Header lines start with the interface index at column 0
fn is_header(line: &str) -> bool {
    line.starts_with(|c: char| c.is_ascii_digit())
}

/// "2: eth0@if5: <FLAGS> mtu 1500 ... state UP ..."
fn parse_header(cursor: &LineCursor<'_>, line: &str) -> Result<NetInterface, ParseError> {
    let mut parts = line.splitn(3, ": ");
    let _index = parts.next();
    let device = parts
        .next()
        .map(|d| d.split('@').next().unwrap_or(d).trim())
        .filter(|d| !d.is_empty())
        .ok_or_else(|| cursor.error(format!("missing device name in `{}`", line)))?;
    let attributes = parts.next().unwrap_or_default();

    let state = attributes
        .split_whitespace()
        .skip_while(|token| *token != "state")
        .nth(1)
        .map(|token| match token {
            "UP" => InterfaceState::Up,
            "DOWN" => InterfaceState::Down,
            other => InterfaceState::Unknown(other.to_string()),
        })
        .unwrap_or_else(|| InterfaceState::Unknown("unreported".to_string()));

    Ok(NetInterface::new(device, state))
}

fn parse_detail(
    cursor: &LineCursor<'_>,
    line: &str,
    iface: &mut NetInterface,
) -> Result<(), ParseError> {
    let mut tokens = line.split_whitespace();
    let (Some(keyword), value) = (tokens.next(), tokens.next()) else {
        return Ok(());
    };

    match keyword {
        "link/loopback" => iface.interface_type = Some(InterfaceType::Loopback),
        "link/none" => iface.interface_type = Some(InterfaceType::Tun),
        "link/ether" if iface.device.as_str().starts_with("wl") => {
            iface.interface_type = Some(InterfaceType::Wifi)
        }
        "link/ether" => iface.interface_type = Some(InterfaceType::Ethernet),
        "inet" => {
            let raw = value.ok_or_else(|| cursor.error("missing address after `inet`"))?;
            let addr = strip_prefix_len(raw)
                .parse::<Ipv4Addr>()
                .map_err(|e| cursor.error(format!("invalid IPv4 address `{}`: {}", raw, e)))?;
            iface.ipv4_addresses.push(addr);
        }
        "inet6" => {
            let raw = value.ok_or_else(|| cursor.error("missing address after `inet6`"))?;
            let addr = strip_prefix_len(raw)
                .parse::<Ipv6Addr>()
                .map_err(|e| cursor.error(format!("invalid IPv6 address `{}`: {}", raw, e)))?;
            iface.ipv6_addresses.push(addr);
        }
        _ => {}
    }

    Ok(())
}

fn strip_prefix_len(value: &str) -> &str {
    value.split('/').next().unwrap_or(value)
}
