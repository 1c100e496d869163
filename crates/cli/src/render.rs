//! Presentation of query results (table or JSON)

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use tabled::{Table, Tabled};

use hostq_core::domain::{NetInterface, NetInterfaces};

#[derive(Tabled)]
struct InterfaceRow {
    #[tabled(rename = "DEVICE")]
    device: String,
    #[tabled(rename = "TYPE")]
    kind: String,
    #[tabled(rename = "STATE")]
    state: String,
    #[tabled(rename = "CONNECTION")]
    name: String,
    #[tabled(rename = "IPV4")]
    ipv4: String,
    #[tabled(rename = "IPV6")]
    ipv6: String,
}

impl From<&NetInterface> for InterfaceRow {
    fn from(iface: &NetInterface) -> Self {
        Self {
            device: iface.device.to_string(),
            kind: iface
                .interface_type
                .map(|t| t.to_string())
                .unwrap_or_else(|| "-".to_string()),
            state: iface.state.to_string(),
            name: iface.name.clone().unwrap_or_else(|| "-".to_string()),
            ipv4: join_or_dash(&iface.ipv4_addresses),
            ipv6: join_or_dash(&iface.ipv6_addresses),
        }
    }
}

fn join_or_dash<T: ToString>(items: &[T]) -> String {
    if items.is_empty() {
        "-".to_string()
    } else {
        items
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Print interfaces as a table, or as a pretty JSON array when `json` is set
pub fn print_interfaces(interfaces: &NetInterfaces, json: bool) -> Result<()> {
    if json {
        return print_json(interfaces);
    }

    if interfaces.is_empty() {
        println!("{}", "No network interfaces reported".yellow());
    } else {
        print_table(interfaces.iter());
    }
    Ok(())
}

/// Print one interface as a table row, or as a JSON object
pub fn print_interface(iface: &NetInterface, json: bool) -> Result<()> {
    if json {
        return print_json(iface);
    }

    print_table(std::iter::once(iface));
    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_table<'a>(interfaces: impl Iterator<Item = &'a NetInterface>) {
    let rows: Vec<InterfaceRow> = interfaces.map(InterfaceRow::from).collect();
    println!("{}", Table::new(rows));
}
