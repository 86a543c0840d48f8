pub mod firmware;
pub mod graphics;
pub mod memory;
pub mod network;
pub mod peripherals;
pub mod power;
pub mod storage;
pub mod system;
mod util;

use crate::snapshot::{
    AudioDevice, BaseboardInfo, BatteryInfo, BluetoothDevice, ChassisInfo, CpuCache, CpuInfo,
    DiskDevice, FirmwareInfo, GraphicsInfo, MemoryModule, MemorySummary, NetworkInterface, OsInfo,
    SystemIdentity, TimeInfo, UsbDevice, UuidInfo, Volume,
};
use async_trait::async_trait;
use std::fmt;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Time,
    System,
    Bios,
    Baseboard,
    Chassis,
    Os,
    Uuid,
    Cpu,
    CpuCache,
    Memory,
    MemoryLayout,
    Graphics,
    DiskLayout,
    Volumes,
    Network,
    Audio,
    Usb,
    Bluetooth,
    Battery,
}

impl Category {
    pub const ALL: [Category; 19] = [
        Category::Time,
        Category::System,
        Category::Bios,
        Category::Baseboard,
        Category::Chassis,
        Category::Os,
        Category::Uuid,
        Category::Cpu,
        Category::CpuCache,
        Category::Memory,
        Category::MemoryLayout,
        Category::Graphics,
        Category::DiskLayout,
        Category::Volumes,
        Category::Network,
        Category::Audio,
        Category::Usb,
        Category::Bluetooth,
        Category::Battery,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Time => "time",
            Category::System => "system",
            Category::Bios => "bios",
            Category::Baseboard => "baseboard",
            Category::Chassis => "chassis",
            Category::Os => "os",
            Category::Uuid => "uuid",
            Category::Cpu => "cpu",
            Category::CpuCache => "cpu_cache",
            Category::Memory => "memory",
            Category::MemoryLayout => "memory_layout",
            Category::Graphics => "graphics",
            Category::DiskLayout => "disk_layout",
            Category::Volumes => "volumes",
            Category::Network => "network",
            Category::Audio => "audio",
            Category::Usb => "usb",
            Category::Bluetooth => "bluetooth",
            Category::Battery => "battery",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure of a whole category query. Absent fields and empty lists are not
/// errors and never show up here.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("не удалось прочитать {path}: {source}")]
    Unreadable {
        path: String,
        source: std::io::Error,
    },
    #[error("опрос категории {category} аварийно завершился: {source}")]
    Task {
        category: Category,
        source: tokio::task::JoinError,
    },
    #[error("запрос категории {category} не завершился за {}", humantime::format_duration(*.after))]
    TimedOut { category: Category, after: Duration },
}

/// One asynchronous query per report category. Implementations return
/// whatever the platform exposes and leave the rest empty.
#[async_trait]
pub trait InfoProvider: Send + Sync {
    async fn time(&self) -> Result<TimeInfo, ProviderError>;
    async fn system(&self) -> Result<SystemIdentity, ProviderError>;
    async fn bios(&self) -> Result<FirmwareInfo, ProviderError>;
    async fn baseboard(&self) -> Result<BaseboardInfo, ProviderError>;
    async fn chassis(&self) -> Result<ChassisInfo, ProviderError>;
    async fn os_info(&self) -> Result<OsInfo, ProviderError>;
    async fn uuid(&self) -> Result<UuidInfo, ProviderError>;
    async fn cpu(&self) -> Result<CpuInfo, ProviderError>;
    async fn cpu_cache(&self) -> Result<CpuCache, ProviderError>;
    async fn mem(&self) -> Result<MemorySummary, ProviderError>;
    async fn mem_layout(&self) -> Result<Vec<MemoryModule>, ProviderError>;
    async fn graphics(&self) -> Result<GraphicsInfo, ProviderError>;
    async fn disk_layout(&self) -> Result<Vec<DiskDevice>, ProviderError>;
    async fn fs_size(&self) -> Result<Vec<Volume>, ProviderError>;
    async fn network_interfaces(&self) -> Result<Vec<NetworkInterface>, ProviderError>;
    async fn audio(&self) -> Result<Vec<AudioDevice>, ProviderError>;
    async fn usb(&self) -> Result<Vec<UsbDevice>, ProviderError>;
    async fn bluetooth_devices(&self) -> Result<Vec<BluetoothDevice>, ProviderError>;
    async fn battery(&self) -> Result<BatteryInfo, ProviderError>;
}

/// Probes the local machine through `sysinfo`, sysfs/procfs and a few
/// optional command-line tools.
#[derive(Debug, Clone)]
pub struct HostCollector {
    tool_timeout: Duration,
}

impl HostCollector {
    pub fn new() -> Self {
        Self {
            tool_timeout: Duration::from_secs(5),
        }
    }
}

impl Default for HostCollector {
    fn default() -> Self {
        Self::new()
    }
}

/// Runs a synchronous probe on the blocking pool so slow sysfs reads and
/// helper tools do not hold up the other categories.
async fn blocking<T, F>(category: Category, probe: F) -> Result<T, ProviderError>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, ProviderError> + Send + 'static,
{
    tokio::task::spawn_blocking(probe)
        .await
        .map_err(|source| ProviderError::Task { category, source })?
}

#[async_trait]
impl InfoProvider for HostCollector {
    async fn time(&self) -> Result<TimeInfo, ProviderError> {
        blocking(Category::Time, || Ok(system::collect_time())).await
    }

    async fn system(&self) -> Result<SystemIdentity, ProviderError> {
        blocking(Category::System, || Ok(firmware::collect_system())).await
    }

    async fn bios(&self) -> Result<FirmwareInfo, ProviderError> {
        blocking(Category::Bios, || Ok(firmware::collect_bios())).await
    }

    async fn baseboard(&self) -> Result<BaseboardInfo, ProviderError> {
        blocking(Category::Baseboard, || Ok(firmware::collect_baseboard())).await
    }

    async fn chassis(&self) -> Result<ChassisInfo, ProviderError> {
        blocking(Category::Chassis, || Ok(firmware::collect_chassis())).await
    }

    async fn os_info(&self) -> Result<OsInfo, ProviderError> {
        blocking(Category::Os, || Ok(system::collect_os())).await
    }

    async fn uuid(&self) -> Result<UuidInfo, ProviderError> {
        blocking(Category::Uuid, || Ok(firmware::collect_uuid())).await
    }

    async fn cpu(&self) -> Result<CpuInfo, ProviderError> {
        blocking(Category::Cpu, || Ok(system::collect_cpu())).await
    }

    async fn cpu_cache(&self) -> Result<CpuCache, ProviderError> {
        blocking(Category::CpuCache, system::collect_cpu_cache).await
    }

    async fn mem(&self) -> Result<MemorySummary, ProviderError> {
        blocking(Category::Memory, || Ok(memory::collect_memory())).await
    }

    async fn mem_layout(&self) -> Result<Vec<MemoryModule>, ProviderError> {
        blocking(Category::MemoryLayout, || Ok(memory::collect_memory_layout())).await
    }

    async fn graphics(&self) -> Result<GraphicsInfo, ProviderError> {
        blocking(Category::Graphics, graphics::collect_graphics).await
    }

    async fn disk_layout(&self) -> Result<Vec<DiskDevice>, ProviderError> {
        blocking(Category::DiskLayout, storage::collect_disk_layout).await
    }

    async fn fs_size(&self) -> Result<Vec<Volume>, ProviderError> {
        blocking(Category::Volumes, || Ok(storage::collect_volumes())).await
    }

    async fn network_interfaces(&self) -> Result<Vec<NetworkInterface>, ProviderError> {
        blocking(Category::Network, || Ok(network::collect_interfaces())).await
    }

    async fn audio(&self) -> Result<Vec<AudioDevice>, ProviderError> {
        blocking(Category::Audio, || Ok(peripherals::collect_audio())).await
    }

    async fn usb(&self) -> Result<Vec<UsbDevice>, ProviderError> {
        blocking(Category::Usb, peripherals::collect_usb).await
    }

    async fn bluetooth_devices(&self) -> Result<Vec<BluetoothDevice>, ProviderError> {
        Ok(peripherals::collect_bluetooth(self.tool_timeout).await)
    }

    async fn battery(&self) -> Result<BatteryInfo, ProviderError> {
        blocking(Category::Battery, power::collect_battery).await
    }
}
