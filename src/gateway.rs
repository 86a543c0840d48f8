use crate::collectors::{Category, InfoProvider, ProviderError};
use crate::snapshot::Snapshot;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, warn};

/// What a failed category does to the whole acquisition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// The first failure fails the report.
    #[default]
    Abort,
    /// A failed category is logged and rendered as empty.
    Degrade,
}

#[derive(Debug, Clone, Default)]
pub struct AcquireOptions {
    pub policy: FailurePolicy,
    pub query_timeout: Option<Duration>,
}

#[derive(Debug, Error)]
pub enum AcquireError {
    #[error("запрос категории {category} завершился ошибкой: {source}")]
    Query {
        category: Category,
        source: ProviderError,
    },
}

/// Issues every category query at once and assembles the results.
pub async fn acquire<P>(provider: &P, options: &AcquireOptions) -> Result<Snapshot, AcquireError>
where
    P: InfoProvider + ?Sized,
{
    let started = Instant::now();
    let (
        time,
        system,
        bios,
        baseboard,
        chassis,
        os,
        uuid,
        cpu,
        cpu_cache,
        memory,
        memory_layout,
        graphics,
        disks,
        volumes,
        network,
        audio,
        usb,
        bluetooth,
        battery,
    ) = tokio::try_join!(
        settle(Category::Time, provider.time(), options),
        settle(Category::System, provider.system(), options),
        settle(Category::Bios, provider.bios(), options),
        settle(Category::Baseboard, provider.baseboard(), options),
        settle(Category::Chassis, provider.chassis(), options),
        settle(Category::Os, provider.os_info(), options),
        settle(Category::Uuid, provider.uuid(), options),
        settle(Category::Cpu, provider.cpu(), options),
        settle(Category::CpuCache, provider.cpu_cache(), options),
        settle(Category::Memory, provider.mem(), options),
        settle(Category::MemoryLayout, provider.mem_layout(), options),
        settle(Category::Graphics, provider.graphics(), options),
        settle(Category::DiskLayout, provider.disk_layout(), options),
        settle(Category::Volumes, provider.fs_size(), options),
        settle(Category::Network, provider.network_interfaces(), options),
        settle(Category::Audio, provider.audio(), options),
        settle(Category::Usb, provider.usb(), options),
        settle(Category::Bluetooth, provider.bluetooth_devices(), options),
        settle(Category::Battery, provider.battery(), options),
    )?;

    debug!(
        elapsed_ms = started.elapsed().as_millis() as u64,
        categories = Category::ALL.len(),
        "all category queries settled"
    );

    Ok(Snapshot {
        time,
        system,
        bios,
        baseboard,
        chassis,
        os,
        uuid,
        cpu,
        cpu_cache,
        memory,
        memory_layout,
        graphics,
        disks,
        volumes,
        network,
        audio,
        usb,
        bluetooth,
        battery,
    })
}

async fn settle<T, F>(category: Category, query: F, options: &AcquireOptions) -> Result<T, AcquireError>
where
    T: Default,
    F: Future<Output = Result<T, ProviderError>>,
{
    let outcome = match options.query_timeout {
        Some(after) => match tokio::time::timeout(after, query).await {
            Ok(result) => result,
            Err(_) => Err(ProviderError::TimedOut { category, after }),
        },
        None => query.await,
    };

    match (outcome, options.policy) {
        (Ok(value), _) => Ok(value),
        (Err(source), FailurePolicy::Abort) => Err(AcquireError::Query { category, source }),
        (Err(source), FailurePolicy::Degrade) => {
            warn!(category = %category, error = %source, "категория пропущена, в отчёте будет N/A");
            Ok(T::default())
        }
    }
}
