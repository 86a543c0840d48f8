use crate::snapshot::{
    AudioDevice, BatteryInfo, BluetoothDevice, Display, DiskDevice, GraphicsController,
    MemoryModule, NetworkInterface, Snapshot, UsbDevice, Volume,
};
use std::fmt;
use std::fs;
use std::path::Path;
use std::time::{Duration, UNIX_EPOCH};
use thiserror::Error;

const NA: &str = "N/A";
const RULE_WIDTH: usize = 60;
const BYTE_UNITS: [&str; 6] = ["Bytes", "KB", "MB", "GB", "TB", "PB"];

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("не удалось записать отчёт в {path}: {source}")]
    Write {
        path: String,
        source: std::io::Error,
    },
}

/// Renders the whole report. Output depends only on `snapshot`.
pub fn render(snapshot: &Snapshot) -> String {
    [
        preamble(snapshot),
        system_section(snapshot),
        firmware_section(snapshot),
        baseboard_section(snapshot),
        chassis_section(snapshot),
        os_section(snapshot),
        cpu_section(snapshot),
        memory_section(snapshot),
        graphics_section(snapshot),
        disks_section(&snapshot.disks),
        volumes_section(&snapshot.volumes),
        network_section(&snapshot.network),
        audio_section(&snapshot.audio),
        usb_section(&snapshot.usb),
        bluetooth_section(&snapshot.bluetooth),
        battery_section(&snapshot.battery),
    ]
    .concat()
}

/// Writes the report, replacing any previous file at `path`.
pub fn write_report(path: impl AsRef<Path>, text: &str) -> Result<(), ReportError> {
    let path = path.as_ref();
    fs::write(path, text).map_err(|source| ReportError::Write {
        path: path.display().to_string(),
        source,
    })
}

/// Scales a byte count to the largest base-1024 unit that keeps the value at or
/// above 1, rounded to two decimals with trailing zeros dropped.
pub fn format_bytes(bytes: Option<u64>) -> String {
    let Some(bytes) = bytes else {
        return NA.to_string();
    };
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < BYTE_UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{} {}", round2(value), BYTE_UNITS[unit])
}

/// `N/A` for absent values and for values that print as an empty string.
pub fn print<T: fmt::Display>(value: Option<T>) -> String {
    match value {
        Some(v) => {
            let text = v.to_string();
            if text.is_empty() {
                NA.to_string()
            } else {
                text
            }
        }
        None => NA.to_string(),
    }
}

pub fn battery_wear(designed: Option<u64>, max: Option<u64>) -> String {
    match (designed, max) {
        (Some(designed), Some(max)) if designed > 0 => {
            let wear = (designed as f64 - max as f64) * 100.0 / designed as f64;
            format!("{:.2}% (approx)", round_half_up(wear))
        }
        _ => NA.to_string(),
    }
}

pub fn header(title: &str) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    format!("\n{rule}\n[ {title} ]\n{rule}\n")
}

fn sub_header(title: &str) -> String {
    format!("\n--- {title} ---\n")
}

fn field(label: &str, value: impl fmt::Display) -> String {
    format!("{label:<13}: {value}\n")
}

fn item(label: &str, value: impl fmt::Display) -> String {
    format!("  {label:<11}: {value}\n")
}

fn yes_no(flag: Option<bool>, yes: &str, no: &str) -> String {
    if flag.unwrap_or(false) {
        yes.to_string()
    } else {
        no.to_string()
    }
}

/// Two decimals, ties away from zero (`1.125` becomes `1.13`). `{:.2}` alone
/// rounds ties to even.
fn round_half_up(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Rounded and restringified: `2.00` becomes `2`, `1.50` becomes `1.5`.
fn round2(value: f64) -> String {
    round_half_up(value).to_string()
}

fn list<T>(items: &[T], fallback: &str, render_one: impl Fn(usize, &T) -> String) -> String {
    if items.is_empty() {
        return format!("{fallback}\n");
    }
    items
        .iter()
        .enumerate()
        .map(|(i, entry)| render_one(i + 1, entry))
        .collect()
}

fn format_timestamp(unix_ms: Option<i64>) -> String {
    match unix_ms.and_then(|ms| u64::try_from(ms).ok()) {
        Some(ms) => {
            let at = UNIX_EPOCH + Duration::from_millis(ms);
            humantime::format_rfc3339_seconds(at).to_string()
        }
        None => NA.to_string(),
    }
}

fn preamble(snapshot: &Snapshot) -> String {
    let uptime = snapshot
        .time
        .uptime_seconds
        .map(|secs| format!("{:.2} Hours", round_half_up(secs / 3600.0)))
        .unwrap_or_else(|| NA.to_string());
    format!(
        "FULL SYSTEM DIAGNOSTIC REPORT\nGenerated on: {}\nUptime      : {}\n",
        format_timestamp(snapshot.time.current),
        uptime
    )
}

fn system_section(snapshot: &Snapshot) -> String {
    let system = &snapshot.system;
    [
        header("SYSTEM HARDWARE"),
        field("Manufacturer", print(system.manufacturer.as_deref())),
        field("Model", print(system.model.as_deref())),
        field("Version", print(system.version.as_deref())),
        field("Serial Num", print(system.serial.as_deref())),
        field("UUID", print(snapshot.uuid.os.as_deref())),
        field("SKU", print(system.sku.as_deref())),
    ]
    .concat()
}

fn firmware_section(snapshot: &Snapshot) -> String {
    let bios = &snapshot.bios;
    [
        header("BIOS / FIRMWARE"),
        field("Vendor", print(bios.vendor.as_deref())),
        field("Version", print(bios.version.as_deref())),
        field("Release Date", print(bios.release_date.as_deref())),
        field("Revision", print(bios.revision.as_deref())),
    ]
    .concat()
}

fn baseboard_section(snapshot: &Snapshot) -> String {
    let board = &snapshot.baseboard;
    [
        header("MOTHERBOARD"),
        field("Manufacturer", print(board.manufacturer.as_deref())),
        field("Model", print(board.model.as_deref())),
        field("Version", print(board.version.as_deref())),
        field("Serial Num", print(board.serial.as_deref())),
        field("Asset Tag", print(board.asset_tag.as_deref())),
    ]
    .concat()
}

fn chassis_section(snapshot: &Snapshot) -> String {
    let chassis = &snapshot.chassis;
    [
        header("CHASSIS / CASE"),
        field("Type", print(chassis.chassis_type.as_deref())),
        field("Manufacturer", print(chassis.manufacturer.as_deref())),
        field("Model", print(chassis.model.as_deref())),
        field("Serial Num", print(chassis.serial.as_deref())),
    ]
    .concat()
}

fn os_section(snapshot: &Snapshot) -> String {
    let os = &snapshot.os;
    [
        header("OPERATING SYSTEM"),
        field("Platform", print(os.platform.as_deref())),
        field("Distro", print(os.distro.as_deref())),
        field("Release", print(os.release.as_deref())),
        field("Codename", print(os.codename.as_deref())),
        field("Kernel", print(os.kernel.as_deref())),
        field("Arch", print(os.arch.as_deref())),
        field("Hostname", print(os.hostname.as_deref())),
        field("UEFI", yes_no(os.uefi, "Yes", "No")),
    ]
    .concat()
}

fn cpu_section(snapshot: &Snapshot) -> String {
    let cpu = &snapshot.cpu;
    let cache = &snapshot.cpu_cache;
    [
        header("PROCESSOR (CPU)"),
        field("Manufacturer", print(cpu.manufacturer.as_deref())),
        field("Brand", print(cpu.brand.as_deref())),
        field("Socket", print(cpu.socket.as_deref())),
        field(
            "Speed",
            format!(
                "{} GHz (Base) / {} GHz (Max)",
                print(cpu.speed),
                print(cpu.speed_max)
            ),
        ),
        field(
            "Cores",
            format!(
                "{} Physical / {} Logical",
                print(cpu.physical_cores),
                print(cpu.cores)
            ),
        ),
        field("Governor", print(cpu.governor.as_deref())),
        field(
            "Family/Model",
            format!(
                "{} / {}",
                print(cpu.family.as_deref()),
                print(cpu.model.as_deref())
            ),
        ),
        field("Virtualiz.", yes_no(cpu.virtualization, "Supported", "No")),
        sub_header("CPU CACHE"),
        field("L1 Data", format_bytes(cache.l1d)),
        field("L1 Instruct", format_bytes(cache.l1i)),
        field("L2 Cache", format_bytes(cache.l2)),
        field("L3 Cache", format_bytes(cache.l3)),
    ]
    .concat()
}

fn memory_section(snapshot: &Snapshot) -> String {
    let mem = &snapshot.memory;
    [
        header("MEMORY (RAM) SUMMARY"),
        field("Total Size", format_bytes(mem.total)),
        field("Available", format_bytes(mem.available)),
        field("Used", format_bytes(mem.used)),
        sub_header("PHYSICAL MEMORY STICKS (DIMMS)"),
        list(
            &snapshot.memory_layout,
            "No DIMM details available.",
            memory_module,
        ),
    ]
    .concat()
}

fn memory_module(index: usize, stick: &MemoryModule) -> String {
    [
        format!("[Stick #{index}]\n"),
        item("Size", format_bytes(stick.size)),
        item("Type", print(stick.memory_type.as_deref())),
        item("Clock Speed", format!("{} MHz", print(stick.clock_speed))),
        item("Manuf", print(stick.manufacturer.as_deref())),
        item("Part Num", print(stick.part_num.as_deref())),
        item("Voltage", format!("{}v", print(stick.voltage_configured))),
    ]
    .concat()
}

fn graphics_section(snapshot: &Snapshot) -> String {
    let graphics = &snapshot.graphics;
    [
        header("GRAPHICS CONTROLLERS (GPU)"),
        list(
            &graphics.controllers,
            "No graphics controllers detected.",
            graphics_controller,
        ),
        sub_header("DISPLAYS (MONITORS)"),
        list(&graphics.displays, "No displays detected.", display),
    ]
    .concat()
}

fn graphics_controller(index: usize, gpu: &GraphicsController) -> String {
    let vram = match gpu.vram {
        Some(mb) if mb > 0 => format_bytes(Some(mb.saturating_mul(1024 * 1024))),
        _ => "Shared/Dynamic".to_string(),
    };
    [
        format!("[GPU #{index}]\n"),
        item("Model", print(gpu.model.as_deref())),
        item("Vendor", print(gpu.vendor.as_deref())),
        item("VRAM", vram),
        item("Bus", print(gpu.bus.as_deref())),
        item("Driver", print(gpu.driver_version.as_deref())),
    ]
    .concat()
}

fn display(index: usize, disp: &Display) -> String {
    [
        format!("[Display #{index}]\n"),
        item("Model", print(disp.model.as_deref())),
        item(
            "Resolution",
            format!(
                "{} x {}",
                print(disp.resolution_x),
                print(disp.resolution_y)
            ),
        ),
        item(
            "Refresh",
            format!("{} Hz", print(disp.current_refresh_rate)),
        ),
        item("Connection", print(disp.connection.as_deref())),
        item("Main", yes_no(disp.main, "Yes (Primary)", "No")),
    ]
    .concat()
}

fn disks_section(disks: &[DiskDevice]) -> String {
    [
        header("PHYSICAL STORAGE (DISKS)"),
        list(disks, "No physical disks detected.", |index, disk| {
            [
                format!("[Disk #{index}] -> {}\n", print(disk.name.as_deref())),
                item(
                    "Type",
                    format!(
                        "{} ({})",
                        print(disk.disk_type.as_deref()),
                        print(disk.interface_type.as_deref())
                    ),
                ),
                item("Size", format_bytes(disk.size)),
                item("Vendor", print(disk.vendor.as_deref())),
                item("Firmware", print(disk.firmware_revision.as_deref())),
                // Usually hidden unless running as root.
                item("Serial", print(disk.serial_num.as_deref())),
            ]
            .concat()
        }),
    ]
    .concat()
}

fn volumes_section(volumes: &[Volume]) -> String {
    [
        header("LOGICAL VOLUMES (DRIVES)"),
        list(volumes, "No mounted volumes detected.", |index, vol| {
            [
                format!("[Volume #{index}] -> {}\n", print(vol.fs.as_deref())),
                item("Mount Point", print(vol.mount.as_deref())),
                item("Type", print(vol.fs_type.as_deref())),
                item("Size", format_bytes(vol.size)),
                item(
                    "Used",
                    format!(
                        "{} ({}%)",
                        format_bytes(vol.used),
                        print(vol.use_percent)
                    ),
                ),
            ]
            .concat()
        }),
    ]
    .concat()
}

fn network_section(interfaces: &[NetworkInterface]) -> String {
    [
        header("NETWORK INTERFACES"),
        list(interfaces, "No network interfaces detected.", network_interface),
    ]
    .concat()
}

fn network_interface(index: usize, net: &NetworkInterface) -> String {
    let speed = match net.speed {
        Some(mbit) if mbit > 0.0 => format!("{mbit} Mbit/s"),
        _ => NA.to_string(),
    };
    [
        format!("[Interface #{index}] -> {}\n", print(net.iface.as_deref())),
        item("Name", print(net.iface_name.as_deref())),
        item("Model", print(net.model.as_deref())),
        item("Type", print(net.iface_type.as_deref())),
        item("MAC Addr", print(net.mac.as_deref())),
        item("IPv4", print(net.ip4.as_deref())),
        item("IPv4 Mask", print(net.ip4_subnet.as_deref())),
        item("State", print(net.operstate.as_deref())),
        item("Speed", speed),
        "-----------------\n".to_string(),
    ]
    .concat()
}

fn audio_section(devices: &[AudioDevice]) -> String {
    [
        header("AUDIO DEVICES"),
        list(devices, "No audio devices detected.", |index, audio| {
            [
                format!("[Device #{index}]\n"),
                item("Name", print(audio.name.as_deref())),
                item("Manuf", print(audio.manufacturer.as_deref())),
                item("Status", print(audio.status.as_deref())),
            ]
            .concat()
        }),
    ]
    .concat()
}

fn usb_section(devices: &[UsbDevice]) -> String {
    [
        header("USB DEVICES"),
        list(devices, "No USB devices detected.", |index, usb| {
            [
                format!("[USB #{index}]\n"),
                item("Name", print(usb.name.as_deref())),
                item("Type", print(usb.device_type.as_deref())),
                item("Manuf", print(usb.manufacturer.as_deref())),
                item("Vendor", print(usb.vendor.as_deref())),
            ]
            .concat()
        }),
    ]
    .concat()
}

fn bluetooth_section(devices: &[BluetoothDevice]) -> String {
    [
        header("BLUETOOTH"),
        list(
            devices,
            "No connected Bluetooth devices found.",
            |index, bt| {
                [
                    format!("[Device #{index}]\n"),
                    item("Name", print(bt.name.as_deref())),
                    item("MAC", print(bt.mac_device.as_deref())),
                    item("Connected", yes_no(bt.connected, "Yes", "No")),
                ]
                .concat()
            },
        ),
    ]
    .concat()
}

fn battery_section(battery: &BatteryInfo) -> String {
    if !battery.has_battery {
        return [
            header("BATTERY / POWER"),
            field("Battery", "Not present"),
            "No battery detected (Desktop PC mode).\n".to_string(),
            "Power is supplied directly by the PSU / AC adapter.\n".to_string(),
        ]
        .concat();
    }

    let unit = print(battery.capacity_unit.as_deref());
    [
        header("BATTERY / POWER"),
        field("Model", print(battery.model.as_deref())),
        field("Manufacturer", print(battery.manufacturer.as_deref())),
        field("Type", print(battery.battery_type.as_deref())),
        field(
            "Designed Cap",
            format!("{} {unit}", print(battery.designed_capacity)),
        ),
        field(
            "Max Capacity",
            format!("{} {unit}", print(battery.max_capacity)),
        ),
        field(
            "Wear Level",
            battery_wear(battery.designed_capacity, battery.max_capacity),
        ),
        field("Charge", format!("{}%", print(battery.percent))),
        field("Cycle Count", print(battery.cycle_count)),
        field("Charging", yes_no(battery.is_charging, "Yes", "No")),
    ]
    .concat()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::fixtures;

    const TITLES: [&str; 15] = [
        "SYSTEM HARDWARE",
        "BIOS / FIRMWARE",
        "MOTHERBOARD",
        "CHASSIS / CASE",
        "OPERATING SYSTEM",
        "PROCESSOR (CPU)",
        "MEMORY (RAM) SUMMARY",
        "GRAPHICS CONTROLLERS (GPU)",
        "PHYSICAL STORAGE (DISKS)",
        "LOGICAL VOLUMES (DRIVES)",
        "NETWORK INTERFACES",
        "AUDIO DEVICES",
        "USB DEVICES",
        "BLUETOOTH",
        "BATTERY / POWER",
    ];

    #[test]
    fn format_bytes_picks_unit_and_trims_zeros() {
        assert_eq!(format_bytes(Some(1024)), "1 KB");
        assert_eq!(format_bytes(Some(1536)), "1.5 KB");
        assert_eq!(format_bytes(Some(0)), "0 Bytes");
        assert_eq!(format_bytes(None), "N/A");
        assert_eq!(format_bytes(Some(512)), "512 Bytes");
        assert_eq!(format_bytes(Some(17_179_869_184)), "16 GB");
        assert_eq!(format_bytes(Some(1_310_720)), "1.25 MB");
        assert_eq!(format_bytes(Some(1024_u64.pow(5) * 3)), "3 PB");
    }

    #[test]
    fn format_bytes_keeps_magnitude_below_1024() {
        for bytes in [1_u64, 1023, 1025, 999_999, 123_456_789, 98_765_432_109_876] {
            let text = format_bytes(Some(bytes));
            let value: f64 = text
                .split(' ')
                .next()
                .and_then(|v| v.parse().ok())
                .expect("числовая часть");
            assert!((1.0..1024.0).contains(&value), "{bytes} -> {text}");
        }

        // The unit is picked before rounding, so values just under the next
        // unit round up to 1024 of the smaller one.
        assert_eq!(format_bytes(Some(1_048_575)), "1024 KB");
    }

    #[test]
    fn ties_round_away_from_zero() {
        assert_eq!(format_bytes(Some(1152)), "1.13 KB");
        assert_eq!(format_bytes(Some(9_797_894_144)), "9.13 GB");
        assert_eq!(battery_wear(Some(800), Some(799)), "0.13% (approx)");

        let snapshot = Snapshot {
            time: crate::snapshot::TimeInfo {
                current: None,
                uptime_seconds: Some(4_050.0),
            },
            ..Snapshot::default()
        };
        // 4050 s is exactly 1.125 h.
        assert!(render(&snapshot).contains("Uptime      : 1.13 Hours\n"));
    }

    #[test]
    fn print_defaults_only_missing_and_empty() {
        assert_eq!(print(None::<&str>), "N/A");
        assert_eq!(print(Some("")), "N/A");
        assert_eq!(print(Some(0)), "0");
        assert_eq!(print(Some(0.0_f64)), "0");
        assert_eq!(print(Some("ext4")), "ext4");
        assert_eq!(print(Some(2.6_f64)), "2.6");
    }

    #[test]
    fn battery_wear_needs_both_capacities() {
        assert_eq!(battery_wear(Some(5000), Some(4500)), "10.00% (approx)");
        assert_eq!(battery_wear(Some(5000), None), "N/A");
        assert_eq!(battery_wear(None, Some(4500)), "N/A");
        assert_eq!(battery_wear(Some(0), Some(4500)), "N/A");
    }

    #[test]
    fn header_is_framed_by_rules() {
        let rule = "=".repeat(60);
        assert_eq!(header("USB DEVICES"), format!("\n{rule}\n[ USB DEVICES ]\n{rule}\n"));
    }

    #[test]
    fn empty_lists_render_fallback_lines() {
        let text = render(&Snapshot::default());
        assert!(text.contains("No connected Bluetooth devices found.\n"));
        assert!(text.contains("No DIMM details available.\n"));
        assert!(text.contains("No graphics controllers detected.\n"));
        assert!(text.contains("No displays detected.\n"));
        assert!(text.contains("No physical disks detected.\n"));
        assert!(text.contains("No mounted volumes detected.\n"));
        assert!(text.contains("No network interfaces detected.\n"));
        assert!(text.contains("No audio devices detected.\n"));
        assert!(text.contains("No USB devices detected.\n"));
        assert_eq!(
            bluetooth_section(&[]),
            format!("{}No connected Bluetooth devices found.\n", header("BLUETOOTH"))
        );
    }

    #[test]
    fn empty_snapshot_renders_na_fields_and_desktop_block() {
        let text = render(&Snapshot::default());
        assert!(text.contains("Generated on: N/A\n"));
        assert!(text.contains("Manufacturer : N/A\n"));
        assert!(text.contains("UEFI         : No\n"));
        assert!(text.contains("Speed        : N/A GHz (Base) / N/A GHz (Max)\n"));
        assert!(text.contains("L1 Data      : N/A\n"));
        assert!(text.contains("No battery detected (Desktop PC mode).\n"));
        assert!(!text.contains("Wear Level"));
    }

    #[test]
    fn populated_snapshot_has_every_header_once_in_order() {
        let text = render(&fixtures::populated());
        let mut last = 0;
        for title in TITLES {
            let marker = format!("[ {title} ]");
            assert_eq!(text.matches(&marker).count(), 1, "{title}");
            let pos = text.find(&marker).expect("заголовок");
            assert!(pos > last, "{title} не на своём месте");
            last = pos;
        }
    }

    #[test]
    fn list_labels_are_one_indexed_and_contiguous() {
        let text = render(&fixtures::populated());
        assert!(text.contains("[Stick #1]\n"));
        assert!(text.contains("[Stick #2]\n"));
        assert!(!text.contains("[Stick #0]"));
        assert!(!text.contains("[Stick #3]"));
        assert!(text.contains("[Volume #1] -> /dev/nvme0n1p2\n"));
        assert!(text.contains("[Volume #2] -> /dev/nvme0n1p1\n"));
        assert!(text.find("[USB #1]") < text.find("[USB #2]"));
        assert!(text.contains("[Interface #1] -> wlp0s20f3\n"));
    }

    #[test]
    fn populated_snapshot_renders_derived_values() {
        let text = render(&fixtures::populated());
        assert!(text.starts_with("FULL SYSTEM DIAGNOSTIC REPORT\n"));
        assert!(text.contains("Generated on: 2023-11-14T22:13:20Z\n"));
        assert!(text.contains("Uptime      : 2.00 Hours\n"));
        assert!(text.contains("Speed        : 2.8 GHz (Base) / 4.7 GHz (Max)\n"));
        assert!(text.contains("Cores        : 4 Physical / 8 Logical\n"));
        assert!(text.contains("Virtualiz.   : Supported\n"));
        assert!(text.contains("L1 Data      : 48 KB\n"));
        assert!(text.contains("L2 Cache     : 1.25 MB\n"));
        assert!(text.contains("  Clock Speed: 4267 MHz\n"));
        assert!(text.contains("  Voltage    : 0.6v\n"));
        assert!(text.contains("  VRAM       : Shared/Dynamic\n"));
        assert!(text.contains("  Resolution : 1920 x 1200\n"));
        assert!(text.contains("  Main       : Yes (Primary)\n"));
        assert!(text.contains("  Type       : NVMe (PCIe)\n"));
        assert!(text.contains("  Used       : 112 GB (23.94%)\n"));
        assert!(text.contains("  Speed      : 866 Mbit/s\n"));
        assert!(text.contains("  Connected  : Yes\n"));
        assert!(text.contains("Wear Level   : 10.00% (approx)\n"));
        assert!(text.contains("Designed Cap : 57000 mWh\n"));
    }

    #[test]
    fn dedicated_vram_is_scaled_from_megabytes() {
        let gpu = GraphicsController {
            vram: Some(8192),
            ..Default::default()
        };
        assert!(graphics_controller(1, &gpu).contains("  VRAM       : 8 GB\n"));

        let shared = GraphicsController {
            vram: Some(0),
            ..Default::default()
        };
        assert!(graphics_controller(1, &shared).contains("  VRAM       : Shared/Dynamic\n"));
    }

    #[test]
    fn zero_link_speed_renders_na() {
        let net = NetworkInterface {
            speed: Some(0.0),
            ..Default::default()
        };
        assert!(network_interface(1, &net).contains("  Speed      : N/A\n"));
    }

    #[test]
    fn rendering_is_idempotent() {
        let snapshot = fixtures::populated();
        assert_eq!(render(&snapshot), render(&snapshot));
    }

    #[test]
    fn write_report_overwrites_existing_file() {
        let dir = tempfile::tempdir().expect("временный каталог");
        let path = dir.path().join("full_pc_report.txt");
        std::fs::write(&path, "old contents that are longer than the new ones").unwrap();

        write_report(&path, "new").expect("запись отчёта");
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "new");
    }

    #[test]
    fn write_report_reports_path_on_failure() {
        let dir = tempfile::tempdir().expect("временный каталог");
        let path = dir.path().join("missing").join("report.txt");
        let err = write_report(&path, "text").unwrap_err();
        assert!(err.to_string().contains("report.txt"));
    }
}
