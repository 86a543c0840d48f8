use crate::collectors::util::{clean_vendor_string, list_dir, read_attr, read_u64};
use crate::collectors::ProviderError;
use crate::snapshot::BatteryInfo;
use std::path::Path;
use tracing::debug;

const POWER_SUPPLY_ROOT: &str = "/sys/class/power_supply";

pub fn collect_battery() -> Result<BatteryInfo, ProviderError> {
    battery_from(Path::new(POWER_SUPPLY_ROOT))
}

/// First system battery under `root`. Peripheral batteries (mice, headsets)
/// report `scope=Device` and are ignored.
fn battery_from(root: &Path) -> Result<BatteryInfo, ProviderError> {
    for dir in list_dir(root)? {
        if read_attr(dir.join("type")).as_deref() != Some("Battery") {
            continue;
        }
        if read_attr(dir.join("scope")).as_deref() == Some("Device") {
            continue;
        }
        if read_attr(dir.join("present")).as_deref() == Some("0") {
            continue;
        }
        debug!(supply = %dir.display(), "battery found");
        return Ok(read_battery(&dir));
    }
    Ok(BatteryInfo::default())
}

fn read_battery(dir: &Path) -> BatteryInfo {
    // energy_* is µWh, charge_* is µAh; drivers expose one family or the other.
    let (designed, max, unit) = match (
        read_u64(dir.join("energy_full_design")),
        read_u64(dir.join("energy_full")),
    ) {
        (None, None) => (
            read_u64(dir.join("charge_full_design")),
            read_u64(dir.join("charge_full")),
            "mAh",
        ),
        (designed, max) => (designed, max, "mWh"),
    };

    BatteryInfo {
        has_battery: true,
        model: read_attr(dir.join("model_name")).and_then(clean_vendor_string),
        manufacturer: read_attr(dir.join("manufacturer")).and_then(clean_vendor_string),
        battery_type: read_attr(dir.join("technology")).and_then(clean_vendor_string),
        designed_capacity: designed.map(|v| v / 1000),
        max_capacity: max.map(|v| v / 1000),
        capacity_unit: Some(unit.to_string()),
        percent: read_attr(dir.join("capacity")).and_then(|v| v.parse::<f64>().ok()),
        cycle_count: read_u64(dir.join("cycle_count")).filter(|c| *c > 0),
        is_charging: read_attr(dir.join("status")).map(|s| s == "Charging"),
    }
}
