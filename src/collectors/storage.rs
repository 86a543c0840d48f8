use crate::collectors::util::{clean_vendor_string, file_name, list_dir, read_attr, read_u64, round2};
use crate::collectors::ProviderError;
use crate::snapshot::{DiskDevice, Volume};
use std::fs;
use std::path::Path;
use sysinfo::{DiskExt, System, SystemExt};
use tracing::debug;

const BLOCK_ROOT: &str = "/sys/block";
const SECTOR_SIZE: u64 = 512;
const VIRTUAL_PREFIXES: [&str; 7] = ["loop", "ram", "zram", "dm-", "fd", "nbd", "sr"];

pub fn collect_disk_layout() -> Result<Vec<DiskDevice>, ProviderError> {
    disk_layout_from(Path::new(BLOCK_ROOT))
}

fn disk_layout_from(root: &Path) -> Result<Vec<DiskDevice>, ProviderError> {
    let mut disks = Vec::new();
    for dir in list_dir(root)? {
        let Some(name) = file_name(&dir) else {
            continue;
        };
        if VIRTUAL_PREFIXES.iter().any(|p| name.starts_with(p)) {
            continue;
        }
        let device = dir.join("device");
        if !device.is_dir() {
            continue;
        }

        let rotational = read_attr(dir.join("queue/rotational"));
        let via_usb = fs::canonicalize(&dir)
            .map(|p| p.to_string_lossy().contains("/usb"))
            .unwrap_or(false);

        disks.push(DiskDevice {
            name: read_attr(device.join("model")).and_then(clean_vendor_string),
            disk_type: Some(disk_type(name, rotational.as_deref()).to_string()),
            interface_type: interface_type(name, via_usb).map(str::to_string),
            size: read_u64(dir.join("size"))
                .and_then(|sectors| sectors.checked_mul(SECTOR_SIZE))
                .filter(|bytes| *bytes > 0),
            vendor: read_attr(device.join("vendor")).and_then(clean_vendor_string),
            firmware_revision: read_attr(device.join("firmware_rev"))
                .or_else(|| read_attr(device.join("rev"))),
            serial_num: read_attr(device.join("serial")).and_then(clean_vendor_string),
        });
    }
    debug!(disks = disks.len(), "block device probe finished");
    Ok(disks)
}

fn disk_type(name: &str, rotational: Option<&str>) -> &'static str {
    if name.starts_with("nvme") {
        return "NVMe";
    }
    match rotational {
        Some("1") => "HDD",
        _ => "SSD",
    }
}

fn interface_type(name: &str, via_usb: bool) -> Option<&'static str> {
    if via_usb {
        return Some("USB");
    }
    if name.starts_with("nvme") {
        Some("PCIe")
    } else if name.starts_with("sd") {
        Some("SATA")
    } else if name.starts_with("mmcblk") {
        Some("MMC")
    } else if name.starts_with("vd") {
        Some("Virtio")
    } else {
        None
    }
}

pub fn collect_volumes() -> Vec<Volume> {
    let mut system = System::new();
    system.refresh_disks_list();
    system.refresh_disks();

    system
        .disks()
        .iter()
        .map(|disk| {
            let total = disk.total_space();
            let used = total.saturating_sub(disk.available_space());
            Volume {
                fs: Some(disk.name().to_string_lossy().into_owned()).filter(|s| !s.is_empty()),
                mount: Some(disk.mount_point().display().to_string()),
                fs_type: Some(String::from_utf8_lossy(disk.file_system()).into_owned())
                    .filter(|s| !s.is_empty()),
                size: Some(total),
                used: Some(used),
                use_percent: use_percent(used, total),
            }
        })
        .collect()
}

fn use_percent(used: u64, total: u64) -> Option<f64> {
    (total > 0).then(|| round2(used as f64 / total as f64 * 100.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fake_disk(root: &Path, name: &str, files: &[(&str, &str)]) {
        let dir = root.join(name);
        fs::create_dir_all(dir.join("device")).unwrap();
        fs::create_dir_all(dir.join("queue")).unwrap();
        for (rel, value) in files {
            fs::write(dir.join(rel), value).unwrap();
        }
    }

    #[test]
    fn block_devices_are_described_from_sysfs() {
        let root = tempfile::tempdir().expect("временный каталог");
        fake_disk(
            root.path(),
            "nvme0n1",
            &[
                ("size", "1000215216\n"),
                ("queue/rotational", "0\n"),
                ("device/model", "Samsung SSD 980 PRO 1TB                 \n"),
                ("device/firmware_rev", "5B2QGXA7\n"),
                ("device/serial", "S5GXNF0R123456\n"),
            ],
        );
        fake_disk(
            root.path(),
            "sda",
            &[
                ("size", "3907029168\n"),
                ("queue/rotational", "1\n"),
                ("device/model", "ST2000DM008-2FR1\n"),
                ("device/vendor", "ATA     \n"),
                ("device/rev", "0001\n"),
            ],
        );
        fake_disk(root.path(), "loop0", &[("size", "100\n")]);
        fake_disk(root.path(), "vdz", &[("size", "18446744073709551615\n")]);
        fs::create_dir_all(root.path().join("md0")).unwrap();

        let disks = disk_layout_from(root.path()).expect("диски");
        assert_eq!(disks.len(), 3);

        let nvme = &disks[0];
        assert_eq!(nvme.name.as_deref(), Some("Samsung SSD 980 PRO 1TB"));
        assert_eq!(nvme.disk_type.as_deref(), Some("NVMe"));
        assert_eq!(nvme.interface_type.as_deref(), Some("PCIe"));
        assert_eq!(nvme.size, Some(1_000_215_216 * 512));
        assert_eq!(nvme.firmware_revision.as_deref(), Some("5B2QGXA7"));
        assert_eq!(nvme.serial_num.as_deref(), Some("S5GXNF0R123456"));

        let hdd = &disks[1];
        assert_eq!(hdd.disk_type.as_deref(), Some("HDD"));
        assert_eq!(hdd.interface_type.as_deref(), Some("SATA"));
        assert_eq!(hdd.vendor.as_deref(), Some("ATA"));
        assert_eq!(hdd.firmware_revision.as_deref(), Some("0001"));
        assert_eq!(hdd.serial_num, None);

        let bogus = &disks[2];
        assert_eq!(bogus.interface_type.as_deref(), Some("Virtio"));
        assert_eq!(bogus.size, None);
    }

    #[test]
    fn missing_block_root_is_an_empty_layout() {
        let disks = disk_layout_from(Path::new("/no/such/block/root")).expect("пусто");
        assert!(disks.is_empty());
    }

    #[test]
    fn interface_follows_device_name() {
        assert_eq!(interface_type("mmcblk0", false), Some("MMC"));
        assert_eq!(interface_type("vda", false), Some("Virtio"));
        assert_eq!(interface_type("sdb", true), Some("USB"));
        assert_eq!(interface_type("xvda", false), None);
    }

    #[test]
    fn usage_percent_is_rounded() {
        assert_eq!(use_percent(120_259_084_288, 502_384_312_320), Some(23.94));
        assert_eq!(use_percent(0, 0), None);
    }
}
