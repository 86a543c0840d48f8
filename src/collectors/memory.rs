use crate::collectors::util::{clean_vendor_string, parse_f64_loose, run_command};
use crate::snapshot::{MemoryModule, MemorySummary};
use sysinfo::{System, SystemExt};
use tracing::debug;

pub fn collect_memory() -> MemorySummary {
    let mut system = System::new();
    system.refresh_memory();

    MemorySummary {
        total: Some(system.total_memory()),
        available: Some(system.available_memory()),
        used: Some(system.used_memory()),
    }
}

/// DIMM details come from `dmidecode`, which needs root. Without it the list
/// is simply empty.
pub fn collect_memory_layout() -> Vec<MemoryModule> {
    let Some(text) = run_command("dmidecode", &["-t", "memory"]) else {
        debug!("dmidecode unavailable, skipping DIMM details");
        return Vec::new();
    };
    parse_dmidecode_memory(&text)
}

/// Installed `Memory Device` blocks of `dmidecode -t memory`, in table order.
fn parse_dmidecode_memory(text: &str) -> Vec<MemoryModule> {
    let mut out = Vec::new();
    let mut lines = text.lines().peekable();

    while let Some(line) = lines.next() {
        if line.trim() != "Memory Device" {
            continue;
        }

        let mut fields: Vec<(&str, &str)> = Vec::new();
        while let Some(&next) = lines.peek() {
            if next.trim().is_empty() {
                break;
            }
            if let Some((key, value)) = next.split_once(':') {
                fields.push((key.trim(), value.trim()));
            }
            lines.next();
        }

        let get = |name: &str| {
            fields
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| *value)
        };

        let Some(size) = get("Size").and_then(parse_dmi_size) else {
            continue;
        };
        let clock_speed = get("Configured Memory Speed")
            .or_else(|| get("Configured Clock Speed"))
            .and_then(parse_f64_loose)
            .or_else(|| get("Speed").and_then(parse_f64_loose))
            .filter(|v| *v > 0.0)
            .map(|v| v as u32);

        out.push(MemoryModule {
            size: Some(size),
            memory_type: get("Type")
                .map(str::to_string)
                .and_then(clean_vendor_string),
            clock_speed,
            manufacturer: get("Manufacturer")
                .map(str::to_string)
                .and_then(clean_vendor_string),
            part_num: get("Part Number")
                .map(str::to_string)
                .and_then(clean_vendor_string),
            voltage_configured: get("Configured Voltage")
                .and_then(parse_f64_loose)
                .filter(|v| *v > 0.0),
        });
    }

    out
}

/// `8 GB`, `16384 MB`, `No Module Installed`.
fn parse_dmi_size(raw: &str) -> Option<u64> {
    let mut parts = raw.split_whitespace();
    let value: u64 = parts.next()?.parse().ok()?;
    let multiplier: u64 = match parts.next()? {
        "kB" | "KB" => 1024,
        "MB" => 1024 * 1024,
        "GB" => 1024 * 1024 * 1024,
        "TB" => 1024 * 1024 * 1024 * 1024,
        _ => return None,
    };
    value.checked_mul(multiplier).filter(|v| *v > 0)
}
