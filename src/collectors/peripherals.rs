use crate::collectors::util::{decode_cmd_stdout, file_name, list_dir, read_attr};
use crate::collectors::ProviderError;
use crate::snapshot::{AudioDevice, BluetoothDevice, UsbDevice};
use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, warn};

const ASOUND_CARDS: &str = "/proc/asound/cards";
const USB_ROOT: &str = "/sys/bus/usb/devices";
const BLUETOOTH_ROOT: &str = "/sys/class/bluetooth";

pub fn collect_audio() -> Vec<AudioDevice> {
    read_attr(ASOUND_CARDS)
        .map(|text| parse_asound_cards(&text))
        .unwrap_or_default()
}

/// `/proc/asound/cards` lists each card as
/// ` 0 [PCH            ]: HDA-Intel - HDA Intel PCH` plus a detail line.
fn parse_asound_cards(text: &str) -> Vec<AudioDevice> {
    text.lines()
        .filter_map(|line| {
            let (head, rest) = line.split_once("]:")?;
            head.split_whitespace().next()?.parse::<u32>().ok()?;
            let (driver, name) = rest.split_once(" - ")?;
            Some(AudioDevice {
                name: Some(name.trim().to_string()).filter(|n| !n.is_empty()),
                manufacturer: Some(driver.trim().to_string()).filter(|d| !d.is_empty()),
                status: Some("Online".to_string()),
            })
        })
        .collect()
}

pub fn collect_usb() -> Result<Vec<UsbDevice>, ProviderError> {
    usb_devices_from(Path::new(USB_ROOT))
}

fn usb_devices_from(root: &Path) -> Result<Vec<UsbDevice>, ProviderError> {
    let mut devices = Vec::new();
    for dir in list_dir(root)? {
        let Some(name) = file_name(&dir) else {
            continue;
        };
        // `1-2:1.0` style entries are interfaces of a device, not devices.
        if name.contains(':') {
            continue;
        }
        let Some(vendor_id) = read_attr(dir.join("idVendor")) else {
            continue;
        };

        let mut class = read_attr(dir.join("bDeviceClass"));
        if class.as_deref() == Some("00") {
            class = read_attr(dir.join(format!("{name}:1.0")).join("bInterfaceClass"));
        }

        devices.push(UsbDevice {
            name: read_attr(dir.join("product")),
            device_type: class.as_deref().and_then(usb_class_name).map(str::to_string),
            manufacturer: read_attr(dir.join("manufacturer")),
            vendor: Some(vendor_id),
        });
    }
    Ok(devices)
}

/// USB-IF base class codes.
fn usb_class_name(code: &str) -> Option<&'static str> {
    let name = match code.to_ascii_lowercase().as_str() {
        "01" => "Audio",
        "02" => "Communications",
        "03" => "HID",
        "05" => "Physical",
        "06" => "Image",
        "07" => "Printer",
        "08" => "Mass Storage",
        "09" => "Hub",
        "0a" => "CDC Data",
        "0b" => "Smart Card",
        "0d" => "Content Security",
        "0e" => "Video",
        "0f" => "Personal Healthcare",
        "10" => "Audio/Video",
        "11" => "Billboard",
        "12" => "USB Type-C Bridge",
        "dc" => "Diagnostic",
        "e0" => "Wireless Controller",
        "ef" => "Miscellaneous",
        "fe" => "Application Specific",
        "ff" => "Vendor Specific",
        _ => return None,
    };
    Some(name)
}

/// Paired devices known to BlueZ. `bluetoothctl` blocks while the daemon is
/// unreachable, so every call is bounded by `timeout` and killed past it.
pub async fn collect_bluetooth(timeout: Duration) -> Vec<BluetoothDevice> {
    let has_adapter = list_dir(BLUETOOTH_ROOT)
        .map(|entries| !entries.is_empty())
        .unwrap_or(false);
    if !has_adapter {
        debug!("no bluetooth adapter, skipping bluetoothctl");
        return Vec::new();
    }

    let Some(paired) = bluetoothctl(&["devices"], timeout).await else {
        return Vec::new();
    };
    let connected: HashSet<String> = bluetoothctl(&["devices", "Connected"], timeout)
        .await
        .map(|text| {
            parse_bluetoothctl_devices(&text)
                .into_iter()
                .map(|(mac, _)| mac)
                .collect()
        })
        .unwrap_or_default();

    parse_bluetoothctl_devices(&paired)
        .into_iter()
        .map(|(mac, name)| BluetoothDevice {
            connected: Some(connected.contains(&mac)),
            name,
            mac_device: Some(mac),
        })
        .collect()
}

async fn bluetoothctl(args: &[&str], timeout: Duration) -> Option<String> {
    let mut cmd = Command::new("bluetoothctl");
    cmd.args(args).kill_on_drop(true);
    match tokio::time::timeout(timeout, cmd.output()).await {
        Ok(Ok(output)) if output.status.success() => Some(decode_cmd_stdout(&output.stdout)),
        Ok(Ok(_)) | Ok(Err(_)) => None,
        Err(_) => {
            warn!(
                timeout = %humantime::format_duration(timeout),
                "bluetoothctl did not answer in time"
            );
            None
        }
    }
}

/// `Device AA:BB:CC:DD:EE:FF Some Name` lines.
fn parse_bluetoothctl_devices(text: &str) -> Vec<(String, Option<String>)> {
    text.lines()
        .filter_map(|line| {
            let rest = line.trim().strip_prefix("Device ")?;
            let (mac, name) = match rest.split_once(' ') {
                Some((mac, name)) => (mac, Some(name.trim().to_string())),
                None => (rest, None),
            };
            if mac.len() != 17 || mac.matches(':').count() != 5 {
                return None;
            }
            Some((mac.to_string(), name.filter(|n| !n.is_empty())))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn asound_cards_are_listed() {
        let text = " 0 [PCH            ]: HDA-Intel - HDA Intel PCH
                      HDA Intel PCH at 0x6001190000 irq 147
 1 [NVidia         ]: HDA-Intel - HDA NVidia
                      HDA NVidia at 0xa3080000 irq 17
";
        let cards = parse_asound_cards(text);
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].name.as_deref(), Some("HDA Intel PCH"));
        assert_eq!(cards[0].manufacturer.as_deref(), Some("HDA-Intel"));
        assert_eq!(cards[0].status.as_deref(), Some("Online"));
        assert_eq!(cards[1].name.as_deref(), Some("HDA NVidia"));
    }

    #[test]
    fn no_soundcards_means_no_devices() {
        assert!(parse_asound_cards("--- no soundcards ---\n").is_empty());
    }

    #[test]
    fn bluetoothctl_lines_are_parsed() {
        let text = "Device 00:1B:66:AA:BB:CC WH-1000XM4\n\
Device 11:22:33:44:55:66\n\
[CHG] Controller 00:00:00:00:00:00 Discovering: yes\n\
Device garbage\n";
        let devices = parse_bluetoothctl_devices(text);
        assert_eq!(
            devices,
            vec![
                ("00:1B:66:AA:BB:CC".to_string(), Some("WH-1000XM4".to_string())),
                ("11:22:33:44:55:66".to_string(), None),
            ]
        );
    }

    #[test]
    fn usb_devices_skip_interfaces_and_resolve_class() {
        let root = tempfile::tempdir().expect("временный каталог");
        let write = |rel: &str, value: &str| {
            let path = root.path().join(rel);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, value).unwrap();
        };
        write("1-1/idVendor", "046d\n");
        write("1-1/product", "USB Receiver\n");
        write("1-1/manufacturer", "Logitech\n");
        write("1-1/bDeviceClass", "00\n");
        write("1-1:1.0/bInterfaceClass", "03\n");
        write("usb1/idVendor", "1d6b\n");
        write("usb1/product", "xHCI Host Controller\n");
        write("usb1/bDeviceClass", "09\n");
        fs::create_dir_all(root.path().join("1-0:1.0")).unwrap();

        let devices = usb_devices_from(root.path()).expect("usb");
        assert_eq!(devices.len(), 2);
        assert_eq!(devices[0].name.as_deref(), Some("USB Receiver"));
        assert_eq!(devices[0].device_type.as_deref(), Some("HID"));
        assert_eq!(devices[0].manufacturer.as_deref(), Some("Logitech"));
        assert_eq!(devices[0].vendor.as_deref(), Some("046d"));
        assert_eq!(devices[1].device_type.as_deref(), Some("Hub"));
        assert_eq!(devices[1].manufacturer, None);
    }
}
