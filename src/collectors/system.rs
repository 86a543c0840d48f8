use crate::collectors::util::{file_name, list_dir, read_attr, read_u64, round2};
use crate::collectors::ProviderError;
use crate::snapshot::{CpuCache, CpuInfo, OsInfo, TimeInfo};
use std::collections::HashMap;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};
use sysinfo::{CpuExt, CpuRefreshKind, RefreshKind, System, SystemExt};
use tracing::debug;

const CPUFREQ_ROOT: &str = "/sys/devices/system/cpu/cpu0/cpufreq";
const CACHE_ROOT: &str = "/sys/devices/system/cpu/cpu0/cache";

pub fn collect_time() -> TimeInfo {
    let system = System::new();
    let current = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .ok()
        .and_then(|d| i64::try_from(d.as_millis()).ok());

    TimeInfo {
        current,
        uptime_seconds: Some(system.uptime() as f64),
    }
}

pub fn collect_os() -> OsInfo {
    let system = System::new();
    let os_release = read_attr("/etc/os-release")
        .map(|text| parse_os_release(&text))
        .unwrap_or_default();

    OsInfo {
        platform: Some(std::env::consts::OS.to_string()),
        distro: system.name().or_else(|| os_release.get("NAME").cloned()),
        release: system
            .os_version()
            .or_else(|| os_release.get("VERSION_ID").cloned()),
        codename: os_release.get("VERSION_CODENAME").cloned(),
        kernel: system.kernel_version(),
        arch: Some(std::env::consts::ARCH.to_string()),
        hostname: system.host_name(),
        uefi: uefi_boot(),
    }
}

#[cfg(target_os = "linux")]
fn uefi_boot() -> Option<bool> {
    Some(Path::new("/sys/firmware/efi").exists())
}

#[cfg(not(target_os = "linux"))]
fn uefi_boot() -> Option<bool> {
    None
}

pub fn collect_cpu() -> CpuInfo {
    let system =
        System::new_with_specifics(RefreshKind::new().with_cpu(CpuRefreshKind::everything()));
    let cpuinfo = read_attr("/proc/cpuinfo")
        .map(|text| parse_cpuinfo(&text))
        .unwrap_or_default();

    let first = system.cpus().first();
    let brand = first
        .map(|c| c.brand().trim().to_string())
        .filter(|b| !b.is_empty());
    let manufacturer = first
        .map(|c| c.vendor_id().trim())
        .filter(|v| !v.is_empty())
        .map(cpu_manufacturer);
    let current_mhz = first.map(|c| c.frequency()).filter(|f| *f > 0);

    let speed = read_u64(Path::new(CPUFREQ_ROOT).join("base_frequency"))
        .map(khz_to_ghz)
        .or_else(|| current_mhz.map(|mhz| round2(mhz as f64 / 1000.0)));
    let speed_max = read_u64(Path::new(CPUFREQ_ROOT).join("cpuinfo_max_freq")).map(khz_to_ghz);
    let logical = system.cpus().len();

    debug!(
        logical_cpus = logical,
        cpuinfo_fields = cpuinfo.len(),
        "cpu probe finished"
    );

    CpuInfo {
        manufacturer,
        brand,
        socket: None,
        speed,
        speed_max,
        physical_cores: system.physical_core_count().map(|n| n as u32),
        cores: (logical > 0).then_some(logical as u32),
        governor: read_attr(Path::new(CPUFREQ_ROOT).join("scaling_governor")),
        family: cpuinfo.get("cpu family").cloned(),
        model: cpuinfo.get("model").cloned(),
        virtualization: cpuinfo.get("flags").map(|flags| {
            flags
                .split_whitespace()
                .any(|flag| flag == "vmx" || flag == "svm")
        }),
    }
}

pub fn collect_cpu_cache() -> Result<CpuCache, ProviderError> {
    let mut cache = CpuCache::default();
    for dir in list_dir(CACHE_ROOT)? {
        if !file_name(&dir).is_some_and(|n| n.starts_with("index")) {
            continue;
        }
        let level = read_attr(dir.join("level"));
        let kind = read_attr(dir.join("type"));
        let size = read_attr(dir.join("size")).and_then(|s| parse_cache_size(&s));

        match (level.as_deref(), kind.as_deref()) {
            (Some("1"), Some("Data")) => cache.l1d = size,
            (Some("1"), Some("Instruction")) => cache.l1i = size,
            (Some("2"), _) => cache.l2 = size,
            (Some("3"), _) => cache.l3 = size,
            _ => {}
        }
    }
    Ok(cache)
}

fn cpu_manufacturer(vendor_id: &str) -> String {
    match vendor_id {
        "GenuineIntel" => "Intel".to_string(),
        "AuthenticAMD" | "AMDisbetter!" => "AMD".to_string(),
        "CentaurHauls" => "VIA".to_string(),
        "HygonGenuine" => "Hygon".to_string(),
        other => other.to_string(),
    }
}

fn khz_to_ghz(khz: u64) -> f64 {
    round2(khz as f64 / 1_000_000.0)
}

/// Fields of the first processor block in `/proc/cpuinfo`.
fn parse_cpuinfo(text: &str) -> HashMap<String, String> {
    text.lines()
        .take_while(|line| !line.trim().is_empty())
        .filter_map(|line| {
            let (key, value) = line.split_once(':')?;
            Some((key.trim().to_string(), value.trim().to_string()))
        })
        .filter(|(_, value)| !value.is_empty())
        .collect()
}

fn parse_os_release(text: &str) -> HashMap<String, String> {
    text.lines()
        .filter(|line| !line.trim_start().starts_with('#'))
        .filter_map(|line| {
            let (key, value) = line.split_once('=')?;
            let value = value.trim().trim_matches('"').trim_matches('\'');
            Some((key.trim().to_string(), value.to_string()))
        })
        .filter(|(_, value)| !value.is_empty())
        .collect()
}

/// sysfs cache sizes look like `48K`, `1280K` or `12M`.
fn parse_cache_size(raw: &str) -> Option<u64> {
    let raw = raw.trim();
    let (digits, multiplier) = match raw.chars().last()? {
        'K' | 'k' => (&raw[..raw.len() - 1], 1024),
        'M' | 'm' => (&raw[..raw.len() - 1], 1024 * 1024),
        'G' | 'g' => (&raw[..raw.len() - 1], 1024 * 1024 * 1024),
        _ => (raw, 1),
    };
    digits.trim().parse::<u64>().ok().map(|v| v * multiplier)
}
