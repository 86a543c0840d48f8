//! SMBIOS/DMI tables as exported under `/sys/class/dmi/id`.
//!
//! Serial numbers and asset tags are usually root-only; they stay `None` when
//! the kernel refuses the read.

use crate::collectors::util::{clean_vendor_string, read_attr};
use crate::snapshot::{BaseboardInfo, ChassisInfo, FirmwareInfo, SystemIdentity, UuidInfo};
use std::path::Path;

const DMI_ROOT: &str = "/sys/class/dmi/id";
const MACHINE_ID_FILES: [&str; 2] = ["/etc/machine-id", "/var/lib/dbus/machine-id"];

fn dmi(attr: &str) -> Option<String> {
    read_attr(Path::new(DMI_ROOT).join(attr)).and_then(clean_vendor_string)
}

pub fn collect_system() -> SystemIdentity {
    SystemIdentity {
        manufacturer: dmi("sys_vendor"),
        model: dmi("product_name"),
        version: dmi("product_version"),
        serial: dmi("product_serial"),
        sku: dmi("product_sku"),
    }
}

pub fn collect_bios() -> FirmwareInfo {
    FirmwareInfo {
        vendor: dmi("bios_vendor"),
        version: dmi("bios_version"),
        release_date: dmi("bios_date").map(|d| normalize_bios_date(&d)),
        revision: dmi("bios_release"),
    }
}

pub fn collect_baseboard() -> BaseboardInfo {
    BaseboardInfo {
        manufacturer: dmi("board_vendor"),
        model: dmi("board_name"),
        version: dmi("board_version"),
        serial: dmi("board_serial"),
        asset_tag: dmi("board_asset_tag"),
    }
}

pub fn collect_chassis() -> ChassisInfo {
    ChassisInfo {
        chassis_type: read_attr(Path::new(DMI_ROOT).join("chassis_type"))
            .and_then(|code| code.parse::<u8>().ok())
            .and_then(chassis_type_name)
            .map(str::to_string),
        manufacturer: dmi("chassis_vendor"),
        model: dmi("chassis_version"),
        serial: dmi("chassis_serial"),
    }
}

pub fn collect_uuid() -> UuidInfo {
    UuidInfo {
        os: MACHINE_ID_FILES.iter().find_map(|path| read_attr(path)),
    }
}

/// DMI dates are `MM/DD/YYYY`; the report shows them as `YYYY-MM-DD`.
fn normalize_bios_date(raw: &str) -> String {
    let parts: Vec<&str> = raw.split('/').collect();
    match parts.as_slice() {
        [month, day, year] if year.len() == 4 => format!("{year}-{month}-{day}"),
        _ => raw.to_string(),
    }
}

/// SMBIOS 3.x system enclosure types.
pub fn chassis_type_name(code: u8) -> Option<&'static str> {
    let name = match code {
        1 => "Other",
        2 => "Unknown",
        3 => "Desktop",
        4 => "Low Profile Desktop",
        5 => "Pizza Box",
        6 => "Mini Tower",
        7 => "Tower",
        8 => "Portable",
        9 => "Laptop",
        10 => "Notebook",
        11 => "Hand Held",
        12 => "Docking Station",
        13 => "All in One",
        14 => "Sub Notebook",
        15 => "Space-Saving",
        16 => "Lunch Box",
        17 => "Main System Chassis",
        18 => "Expansion Chassis",
        19 => "SubChassis",
        20 => "Bus Expansion Chassis",
        21 => "Peripheral Chassis",
        22 => "RAID Chassis",
        23 => "Rack Mount Chassis",
        24 => "Sealed-case PC",
        25 => "Multi-system Chassis",
        26 => "Compact PCI",
        27 => "Advanced TCA",
        28 => "Blade",
        29 => "Blade Enclosure",
        30 => "Tablet",
        31 => "Convertible",
        32 => "Detachable",
        33 => "IoT Gateway",
        34 => "Embedded PC",
        35 => "Mini PC",
        36 => "Stick PC",
        _ => return None,
    };
    Some(name)
}
