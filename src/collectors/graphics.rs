use crate::collectors::util::{file_name, list_dir, read_attr, read_u64, round2, run_command};
use crate::collectors::ProviderError;
use crate::snapshot::{Display, GraphicsController, GraphicsInfo};
use std::fs;
use std::path::Path;
use tracing::debug;

const DRM_ROOT: &str = "/sys/class/drm";
const NVIDIA_VENDOR_ID: &str = "0x10de";
const EDID_HEADER: [u8; 8] = [0x00, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0x00];

pub fn collect_graphics() -> Result<GraphicsInfo, ProviderError> {
    let entries = list_dir(DRM_ROOT)?;
    let (cards, connectors): (Vec<_>, Vec<_>) = entries
        .into_iter()
        .filter(|p| file_name(p).is_some_and(|n| n.starts_with("card")))
        .partition(|p| file_name(p).is_some_and(|n| !n.contains('-')));

    let mut controllers = collect_nvidia_smi();
    let have_nvidia = !controllers.is_empty();
    for card in &cards {
        let vendor_id = read_attr(card.join("device/vendor"));
        if have_nvidia && vendor_id.as_deref() == Some(NVIDIA_VENDOR_ID) {
            continue;
        }
        if vendor_id.is_none() {
            continue;
        }
        controllers.push(drm_controller(card, vendor_id.as_deref()));
    }

    let mut displays: Vec<Display> = connectors
        .iter()
        .filter(|c| read_attr(c.join("status")).as_deref() == Some("connected"))
        .map(|c| drm_display(c))
        .collect();
    mark_primary(&mut displays);

    debug!(
        controllers = controllers.len(),
        displays = displays.len(),
        nvidia_smi = have_nvidia,
        "graphics probe finished"
    );

    Ok(GraphicsInfo {
        controllers,
        displays,
    })
}

fn collect_nvidia_smi() -> Vec<GraphicsController> {
    let Some(text) = run_nvidia_smi(&[
        "--query-gpu=name,memory.total,driver_version,pci.bus_id",
        "--format=csv,noheader,nounits",
    ]) else {
        return Vec::new();
    };
    parse_nvidia_smi(&text)
}

fn run_nvidia_smi(args: &[&str]) -> Option<String> {
    if let Some(output) = run_command("nvidia-smi", args) {
        return Some(output);
    }

    #[cfg(target_os = "windows")]
    {
        if let Some(output) = run_command(r"C:\Windows\System32\nvidia-smi.exe", args) {
            return Some(output);
        }
    }

    None
}

fn parse_nvidia_smi(text: &str) -> Vec<GraphicsController> {
    text.lines()
        .filter_map(|line| {
            let parts: Vec<&str> = line.split(',').map(|v| v.trim()).collect();
            if parts.len() < 4 || parts[0].is_empty() {
                return None;
            }
            Some(GraphicsController {
                model: Some(parts[0].to_string()),
                vendor: Some("NVIDIA".to_string()),
                vram: parts[1].parse::<u64>().ok(),
                bus: Some(parts[3].to_string()).filter(|b| !b.is_empty()),
                driver_version: Some(parts[2].to_string()).filter(|d| !d.is_empty()),
            })
        })
        .collect()
}

fn drm_controller(card: &Path, vendor_id: Option<&str>) -> GraphicsController {
    let device = card.join("device");
    let slot = fs::canonicalize(&device)
        .ok()
        .and_then(|p| file_name(&p).map(str::to_string));
    let lspci = slot
        .as_deref()
        .and_then(|s| run_command("lspci", &["-mm", "-s", s]))
        .map(|text| parse_lspci_mm(&text))
        .unwrap_or_default();
    let driver = fs::read_link(device.join("driver"))
        .ok()
        .and_then(|p| file_name(&p).map(str::to_string));

    GraphicsController {
        model: lspci.get(2).cloned(),
        vendor: lspci
            .get(1)
            .cloned()
            .or_else(|| vendor_id.and_then(pci_vendor_name).map(str::to_string)),
        vram: read_u64(device.join("mem_info_vram_total")).map(|bytes| bytes / 1024 / 1024),
        bus: slot.map(|_| "PCIe".to_string()),
        driver_version: driver,
    }
}

fn drm_display(connector: &Path) -> Display {
    let connection = file_name(connector)
        .and_then(|n| n.split_once('-'))
        .map(|(_, port)| port.to_string());
    let resolution = read_attr(connector.join("modes"))
        .and_then(|modes| modes.lines().next().and_then(parse_mode));
    let edid = fs::read(connector.join("edid")).unwrap_or_default();
    let internal = connection
        .as_deref()
        .is_some_and(|c| c.starts_with("eDP") || c.starts_with("LVDS") || c.starts_with("DSI"));

    Display {
        model: edid_monitor_name(&edid),
        resolution_x: resolution.map(|(x, _)| x),
        resolution_y: resolution.map(|(_, y)| y),
        current_refresh_rate: edid_preferred_refresh(&edid),
        connection,
        main: Some(internal),
    }
}

/// Built-in panels are primary. Without one (desktops), the first connected
/// output is.
fn mark_primary(displays: &mut [Display]) {
    if displays.iter().any(|d| d.main == Some(true)) {
        return;
    }
    if let Some(first) = displays.first_mut() {
        first.main = Some(true);
    }
}

fn pci_vendor_name(vendor_id: &str) -> Option<&'static str> {
    match vendor_id {
        "0x8086" => Some("Intel Corporation"),
        "0x1002" => Some("Advanced Micro Devices, Inc. [AMD/ATI]"),
        "0x10de" => Some("NVIDIA Corporation"),
        "0x1af4" => Some("Red Hat, Inc. (virtio)"),
        "0x15ad" => Some("VMware"),
        "0x1234" => Some("QEMU"),
        _ => None,
    }
}

/// Quoted fields of one `lspci -mm` line: class, vendor, device, ...
fn parse_lspci_mm(text: &str) -> Vec<String> {
    let Some(line) = text.lines().next() else {
        return Vec::new();
    };
    line.split('"')
        .skip(1)
        .step_by(2)
        .map(str::to_string)
        .collect()
}

/// `1920x1080` (some drivers append an `i` for interlaced modes).
fn parse_mode(mode: &str) -> Option<(u32, u32)> {
    let (x, y) = mode.trim().split_once('x')?;
    let y: String = y.chars().take_while(|c| c.is_ascii_digit()).collect();
    Some((x.parse().ok()?, y.parse().ok()?))
}

/// Monitor name descriptor of an EDID block, falling back to the PNP vendor
/// code and product id (`DEL 40A9`).
fn edid_monitor_name(edid: &[u8]) -> Option<String> {
    if !is_edid(edid) {
        return None;
    }

    for offset in [54, 72, 90, 108] {
        let desc = &edid[offset..offset + 18];
        if desc[..3] == [0, 0, 0] && desc[3] == 0xfc {
            let name: String = desc[5..]
                .iter()
                .take_while(|b| **b != 0x0a)
                .map(|b| *b as char)
                .collect();
            let name = name.trim();
            if !name.is_empty() {
                return Some(name.to_string());
            }
        }
    }

    let packed = u16::from_be_bytes([edid[8], edid[9]]);
    let letter = |shift: u16| match ((packed >> shift) & 0x1f) as u8 {
        code @ 1..=26 => (b'@' + code) as char,
        _ => '?',
    };
    let product = u16::from_le_bytes([edid[10], edid[11]]);
    Some(format!("{}{}{} {:04X}", letter(10), letter(5), letter(0), product))
}

/// Refresh rate of the preferred timing (first detailed descriptor):
/// pixel clock over horizontal total times vertical total.
fn edid_preferred_refresh(edid: &[u8]) -> Option<f64> {
    if !is_edid(edid) {
        return None;
    }
    let d = &edid[54..72];
    let clock_hz = u64::from(u16::from_le_bytes([d[0], d[1]])) * 10_000;
    if clock_hz == 0 {
        return None;
    }
    let h_total = (u64::from(d[2]) | (u64::from(d[4] & 0xf0) << 4))
        + (u64::from(d[3]) | (u64::from(d[4] & 0x0f) << 8));
    let v_total = (u64::from(d[5]) | (u64::from(d[7] & 0xf0) << 4))
        + (u64::from(d[6]) | (u64::from(d[7] & 0x0f) << 8));
    let pixels = h_total * v_total;
    (pixels > 0).then(|| round2(clock_hz as f64 / pixels as f64))
}

fn is_edid(edid: &[u8]) -> bool {
    edid.len() >= 128 && edid[..8] == EDID_HEADER
}
