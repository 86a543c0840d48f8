use crate::collectors::util::{file_name, read_attr, run_command};
use crate::snapshot::NetworkInterface;
use std::collections::HashMap;
use std::fs;
use std::net::Ipv4Addr;
use std::path::Path;
use sysinfo::{NetworksExt, System, SystemExt};

const NET_ROOT: &str = "/sys/class/net";
const ARPHRD_LOOPBACK: &str = "772";

pub fn collect_interfaces() -> Vec<NetworkInterface> {
    let mut system = System::new();
    system.refresh_networks_list();

    let mut names: Vec<String> = system
        .networks()
        .iter()
        .map(|(name, _)| name.clone())
        .collect();
    names.sort();

    let addresses = run_command("ip", &["-o", "-4", "addr", "show"])
        .map(|text| parse_ip_addr(&text))
        .unwrap_or_default();

    names
        .into_iter()
        .map(|name| describe_interface(Path::new(NET_ROOT), &name, addresses.get(&name)))
        .collect()
}

fn describe_interface(
    root: &Path,
    name: &str,
    address: Option<&(String, String)>,
) -> NetworkInterface {
    let dir = root.join(name);
    let has_device = dir.join("device").exists();
    let iface_type = if dir.join("wireless").is_dir() || dir.join("phy80211").exists() {
        "wireless"
    } else if read_attr(dir.join("type")).as_deref() == Some(ARPHRD_LOOPBACK) {
        "loopback"
    } else if has_device {
        "wired"
    } else {
        "virtual"
    };

    NetworkInterface {
        iface: Some(name.to_string()),
        iface_name: Some(name.to_string()),
        model: fs::read_link(dir.join("device/driver"))
            .ok()
            .and_then(|p| file_name(&p).map(str::to_string)),
        iface_type: Some(iface_type.to_string()),
        mac: read_attr(dir.join("address")).filter(|mac| mac != "00:00:00:00:00:00"),
        ip4: address.map(|(ip, _)| ip.clone()),
        ip4_subnet: address.map(|(_, mask)| mask.clone()),
        operstate: read_attr(dir.join("operstate")),
        speed: read_attr(dir.join("speed"))
            .and_then(|s| s.parse::<i64>().ok())
            .filter(|mbit| *mbit > 0)
            .map(|mbit| mbit as f64),
    }
}

/// First IPv4 address per interface from `ip -o -4 addr show`.
fn parse_ip_addr(text: &str) -> HashMap<String, (String, String)> {
    let mut out = HashMap::new();
    for line in text.lines() {
        let fields: Vec<&str> = line.split_whitespace().collect();
        let Some(pos) = fields.iter().position(|f| *f == "inet") else {
            continue;
        };
        let (Some(name), Some(cidr)) = (fields.get(1), fields.get(pos + 1)) else {
            continue;
        };
        let Some((ip, prefix)) = cidr.split_once('/') else {
            continue;
        };
        let Some(mask) = prefix.parse::<u8>().ok().and_then(prefix_to_mask) else {
            continue;
        };
        out.entry(name.trim_end_matches(':').to_string())
            .or_insert_with(|| (ip.to_string(), mask.to_string()));
    }
    out
}

fn prefix_to_mask(prefix: u8) -> Option<Ipv4Addr> {
    match prefix {
        0 => Some(Ipv4Addr::UNSPECIFIED),
        1..=32 => Some(Ipv4Addr::from(u32::MAX << (32 - u32::from(prefix)))),
        _ => None,
    }
}
