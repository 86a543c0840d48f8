//! Records returned by an [`InfoProvider`](crate::collectors::InfoProvider).
//!
//! Every scalar is optional: providers fill in what the platform exposes and
//! leave the rest as `None`.

#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub time: TimeInfo,
    pub system: SystemIdentity,
    pub bios: FirmwareInfo,
    pub baseboard: BaseboardInfo,
    pub chassis: ChassisInfo,
    pub os: OsInfo,
    pub uuid: UuidInfo,
    pub cpu: CpuInfo,
    pub cpu_cache: CpuCache,
    pub memory: MemorySummary,
    pub memory_layout: Vec<MemoryModule>,
    pub graphics: GraphicsInfo,
    pub disks: Vec<DiskDevice>,
    pub volumes: Vec<Volume>,
    pub network: Vec<NetworkInterface>,
    pub audio: Vec<AudioDevice>,
    pub usb: Vec<UsbDevice>,
    pub bluetooth: Vec<BluetoothDevice>,
    pub battery: BatteryInfo,
}

#[derive(Debug, Clone, Default)]
pub struct TimeInfo {
    /// Unix time in milliseconds.
    pub current: Option<i64>,
    pub uptime_seconds: Option<f64>,
}

#[derive(Debug, Clone, Default)]
pub struct SystemIdentity {
    pub manufacturer: Option<String>,
    pub model: Option<String>,
    pub version: Option<String>,
    pub serial: Option<String>,
    pub sku: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct UuidInfo {
    pub os: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct FirmwareInfo {
    pub vendor: Option<String>,
    pub version: Option<String>,
    pub release_date: Option<String>,
    pub revision: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct BaseboardInfo {
    pub manufacturer: Option<String>,
    pub model: Option<String>,
    pub version: Option<String>,
    pub serial: Option<String>,
    pub asset_tag: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ChassisInfo {
    pub chassis_type: Option<String>,
    pub manufacturer: Option<String>,
    pub model: Option<String>,
    pub serial: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct OsInfo {
    pub platform: Option<String>,
    pub distro: Option<String>,
    pub release: Option<String>,
    pub codename: Option<String>,
    pub kernel: Option<String>,
    pub arch: Option<String>,
    pub hostname: Option<String>,
    pub uefi: Option<bool>,
}

#[derive(Debug, Clone, Default)]
pub struct CpuInfo {
    pub manufacturer: Option<String>,
    pub brand: Option<String>,
    pub socket: Option<String>,
    /// Base clock in GHz.
    pub speed: Option<f64>,
    /// Maximum clock in GHz.
    pub speed_max: Option<f64>,
    pub physical_cores: Option<u32>,
    pub cores: Option<u32>,
    pub governor: Option<String>,
    pub family: Option<String>,
    pub model: Option<String>,
    pub virtualization: Option<bool>,
}

/// Cache sizes in bytes.
#[derive(Debug, Clone, Default)]
pub struct CpuCache {
    pub l1d: Option<u64>,
    pub l1i: Option<u64>,
    pub l2: Option<u64>,
    pub l3: Option<u64>,
}

#[derive(Debug, Clone, Default)]
pub struct MemorySummary {
    pub total: Option<u64>,
    pub available: Option<u64>,
    pub used: Option<u64>,
}

#[derive(Debug, Clone, Default)]
pub struct MemoryModule {
    pub size: Option<u64>,
    pub memory_type: Option<String>,
    /// MHz (or MT/s, whichever the firmware reports).
    pub clock_speed: Option<u32>,
    pub manufacturer: Option<String>,
    pub part_num: Option<String>,
    pub voltage_configured: Option<f64>,
}

#[derive(Debug, Clone, Default)]
pub struct GraphicsInfo {
    pub controllers: Vec<GraphicsController>,
    pub displays: Vec<Display>,
}

#[derive(Debug, Clone, Default)]
pub struct GraphicsController {
    pub model: Option<String>,
    pub vendor: Option<String>,
    /// Dedicated memory in MB.
    pub vram: Option<u64>,
    pub bus: Option<String>,
    pub driver_version: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct Display {
    pub model: Option<String>,
    pub resolution_x: Option<u32>,
    pub resolution_y: Option<u32>,
    pub current_refresh_rate: Option<f64>,
    pub connection: Option<String>,
    pub main: Option<bool>,
}

#[derive(Debug, Clone, Default)]
pub struct DiskDevice {
    pub name: Option<String>,
    pub disk_type: Option<String>,
    pub interface_type: Option<String>,
    pub size: Option<u64>,
    pub vendor: Option<String>,
    pub firmware_revision: Option<String>,
    pub serial_num: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct Volume {
    pub fs: Option<String>,
    pub mount: Option<String>,
    pub fs_type: Option<String>,
    pub size: Option<u64>,
    pub used: Option<u64>,
    pub use_percent: Option<f64>,
}

#[derive(Debug, Clone, Default)]
pub struct NetworkInterface {
    pub iface: Option<String>,
    pub iface_name: Option<String>,
    pub model: Option<String>,
    pub iface_type: Option<String>,
    pub mac: Option<String>,
    pub ip4: Option<String>,
    pub ip4_subnet: Option<String>,
    pub operstate: Option<String>,
    /// Link speed in Mbit/s.
    pub speed: Option<f64>,
}

#[derive(Debug, Clone, Default)]
pub struct AudioDevice {
    pub name: Option<String>,
    pub manufacturer: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct UsbDevice {
    pub name: Option<String>,
    pub device_type: Option<String>,
    pub manufacturer: Option<String>,
    pub vendor: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct BluetoothDevice {
    pub name: Option<String>,
    pub mac_device: Option<String>,
    pub connected: Option<bool>,
}

#[derive(Debug, Clone, Default)]
pub struct BatteryInfo {
    pub has_battery: bool,
    pub model: Option<String>,
    pub manufacturer: Option<String>,
    pub battery_type: Option<String>,
    pub designed_capacity: Option<u64>,
    pub max_capacity: Option<u64>,
    /// `mWh` or `mAh`, depending on what the battery reports.
    pub capacity_unit: Option<String>,
    pub percent: Option<f64>,
    pub cycle_count: Option<u64>,
    pub is_charging: Option<bool>,
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    fn s(v: &str) -> Option<String> {
        Some(v.to_string())
    }

    /// A snapshot where every category carries data.
    pub fn populated() -> Snapshot {
        Snapshot {
            time: TimeInfo {
                current: Some(1_700_000_000_000),
                uptime_seconds: Some(7_200.0),
            },
            system: SystemIdentity {
                manufacturer: s("LENOVO"),
                model: s("20XW00K4GE"),
                version: s("ThinkPad X1 Carbon Gen 9"),
                serial: s("PF2ABCDE"),
                sku: s("LENOVO_MT_20XW"),
            },
            bios: FirmwareInfo {
                vendor: s("LENOVO"),
                version: s("N32ET86W (1.62 )"),
                release_date: s("2023-05-12"),
                revision: s("1.62"),
            },
            baseboard: BaseboardInfo {
                manufacturer: s("LENOVO"),
                model: s("20XW00K4GE"),
                version: s("SDK0J40697 WIN"),
                serial: s("L1HF1A2B3C4"),
                asset_tag: s("Not Available"),
            },
            chassis: ChassisInfo {
                chassis_type: s("Notebook"),
                manufacturer: s("LENOVO"),
                model: s("None"),
                serial: s("PF2ABCDE"),
            },
            os: OsInfo {
                platform: s("linux"),
                distro: s("Ubuntu"),
                release: s("22.04"),
                codename: s("jammy"),
                kernel: s("6.5.0-14-generic"),
                arch: s("x86_64"),
                hostname: s("workstation"),
                uefi: Some(true),
            },
            uuid: UuidInfo {
                os: s("3f2b6c1e9d8a4b7c8e5f1a2b3c4d5e6f"),
            },
            cpu: CpuInfo {
                manufacturer: s("Intel"),
                brand: s("11th Gen Intel(R) Core(TM) i7-1165G7 @ 2.80GHz"),
                socket: None,
                speed: Some(2.8),
                speed_max: Some(4.7),
                physical_cores: Some(4),
                cores: Some(8),
                governor: s("powersave"),
                family: s("6"),
                model: s("140"),
                virtualization: Some(true),
            },
            cpu_cache: CpuCache {
                l1d: Some(49_152),
                l1i: Some(32_768),
                l2: Some(1_310_720),
                l3: Some(12_582_912),
            },
            memory: MemorySummary {
                total: Some(17_179_869_184),
                available: Some(8_589_934_592),
                used: Some(8_589_934_592),
            },
            memory_layout: vec![
                MemoryModule {
                    size: Some(8_589_934_592),
                    memory_type: s("LPDDR4"),
                    clock_speed: Some(4267),
                    manufacturer: s("Samsung"),
                    part_num: s("K4UBE3D4AA-MGCL"),
                    voltage_configured: Some(0.6),
                },
                MemoryModule {
                    size: Some(8_589_934_592),
                    memory_type: s("LPDDR4"),
                    clock_speed: Some(4267),
                    manufacturer: s("Samsung"),
                    part_num: s("K4UBE3D4AA-MGCL"),
                    voltage_configured: Some(0.6),
                },
            ],
            graphics: GraphicsInfo {
                controllers: vec![GraphicsController {
                    model: s("TigerLake-LP GT2 [Iris Xe Graphics]"),
                    vendor: s("Intel Corporation"),
                    vram: None,
                    bus: s("Onboard"),
                    driver_version: s("i915"),
                }],
                displays: vec![Display {
                    model: s("LEN 40A9"),
                    resolution_x: Some(1920),
                    resolution_y: Some(1200),
                    current_refresh_rate: Some(60.0),
                    connection: s("eDP-1"),
                    main: Some(true),
                }],
            },
            disks: vec![DiskDevice {
                name: s("SAMSUNG MZVLB512HBJQ-000L7"),
                disk_type: s("NVMe"),
                interface_type: s("PCIe"),
                size: Some(512_110_190_592),
                vendor: s("Samsung"),
                firmware_revision: s("5M2QEXF7"),
                serial_num: s("S4ENNX0N123456"),
            }],
            volumes: vec![
                Volume {
                    fs: s("/dev/nvme0n1p2"),
                    mount: s("/"),
                    fs_type: s("ext4"),
                    size: Some(502_392_610_816),
                    used: Some(120_259_084_288),
                    use_percent: Some(23.94),
                },
                Volume {
                    fs: s("/dev/nvme0n1p1"),
                    mount: s("/boot/efi"),
                    fs_type: s("vfat"),
                    size: Some(535_805_952),
                    used: Some(6_291_456),
                    use_percent: Some(1.17),
                },
            ],
            network: vec![NetworkInterface {
                iface: s("wlp0s20f3"),
                iface_name: s("wlp0s20f3"),
                model: s("Intel Corporation"),
                iface_type: s("wireless"),
                mac: s("a4:c3:f0:12:34:56"),
                ip4: s("192.168.1.23"),
                ip4_subnet: s("255.255.255.0"),
                operstate: s("up"),
                speed: Some(866.0),
            }],
            audio: vec![AudioDevice {
                name: s("sof-hda-dsp"),
                manufacturer: s("sof-hda-dsp"),
                status: s("Online"),
            }],
            usb: vec![
                UsbDevice {
                    name: s("Integrated Camera"),
                    device_type: s("Video"),
                    manufacturer: s("Chicony Electronics Co.,Ltd."),
                    vendor: s("04f2"),
                },
                UsbDevice {
                    name: s("USB Receiver"),
                    device_type: s("HID"),
                    manufacturer: s("Logitech"),
                    vendor: s("046d"),
                },
            ],
            bluetooth: vec![BluetoothDevice {
                name: s("WH-1000XM4"),
                mac_device: s("38:18:4C:AA:BB:CC"),
                connected: Some(true),
            }],
            battery: BatteryInfo {
                has_battery: true,
                model: s("5B10W13975"),
                manufacturer: s("SMP"),
                battery_type: s("Li-poly"),
                designed_capacity: Some(57_000),
                max_capacity: Some(51_300),
                capacity_unit: s("mWh"),
                percent: Some(87.0),
                cycle_count: Some(142),
                is_charging: Some(false),
            },
        }
    }
}
