//! Host introspection: OS identity, CPU, memory and disk partitions.
//!
//! Every collector takes a fresh snapshot through `sysinfo` and returns an
//! owned, serialisable value. Rendering into report lines is kept separate
//! from collection so the text layout can be checked without touching the
//! host.

use std::{fs, path::Path};

use serde::Serialize;
use sysinfo::{CpuRefreshKind, Disks, RefreshKind, System};

use crate::{
    report::section_title,
    utils::{percentage, scale_bytes},
};

/// Fallback text for values the host does not expose.
const UNKNOWN: &str = "Unknown";

/// Identity of the running host and operating system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HostInfo {
    /// Operating system name
    pub system: String,

    /// Network node (host) name
    pub node_name: String,

    /// Kernel release
    pub release: String,

    /// Operating system version string
    pub version: String,

    /// Machine architecture
    pub machine: String,

    /// Processor identifier
    pub processor: String,
}

/// Processor counts and current utilisation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CpuInfo {
    /// Physical cores, when the host reports them
    pub physical_cores: Option<usize>,

    /// Logical cores
    pub logical_cores: usize,

    /// Global utilisation in percent
    pub usage_percent: f32,
}

/// Virtual memory statistics, in bytes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MemoryInfo {
    /// Total physical memory
    pub total: u64,

    /// Memory available to new processes
    pub available: u64,

    /// Memory in use
    pub used: u64,

    /// `(total - available) / total`, in percent
    pub percent: f64,
}

/// Space usage of a mounted partition, in bytes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiskUsage {
    /// Partition capacity
    pub total: u64,

    /// Space in use
    pub used: u64,

    /// Space available to unprivileged users
    pub free: u64,

    /// `used / total`, in percent
    pub percent: f64,
}

/// A mounted partition and, when readable, its usage.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiskPartition {
    /// Device name
    pub device: String,

    /// Mount point
    pub mountpoint: String,

    /// Filesystem type
    pub fs_type: String,

    /// Usage, absent when the mount point cannot be accessed
    pub usage: Option<DiskUsage>,
}

/// Snapshot of every host section.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SystemReport {
    /// OS and host identity
    pub host: HostInfo,

    /// CPU counts and usage
    pub cpu: CpuInfo,

    /// Memory statistics
    pub memory: MemoryInfo,

    /// Mounted partitions
    pub disks: Vec<DiskPartition>,
}

/// Round a percentage to one decimal place.
fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

impl MemoryInfo {
    /// Build memory statistics from raw byte counts.
    #[must_use]
    pub fn from_bytes(total: u64, available: u64, used: u64) -> Self {
        Self {
            total,
            available,
            used,
            percent: round_tenth(percentage(total.saturating_sub(available), total)),
        }
    }
}

impl DiskUsage {
    /// Build partition usage from its capacity and available space.
    #[must_use]
    pub fn from_space(total: u64, available: u64) -> Self {
        let used = total.saturating_sub(available);

        Self {
            total,
            used,
            free: available,
            percent: round_tenth(percentage(used, total)),
        }
    }
}

impl DiskPartition {
    /// Describe a partition, reading its usage only if the mount point is accessible.
    ///
    /// A mount point whose metadata cannot be read (typically permission
    /// denied) yields a partition without usage.
    #[must_use]
    pub fn probe(
        device: String,
        mountpoint: &Path,
        fs_type: String,
        total: u64,
        available: u64,
    ) -> Self {
        let usage = fs::metadata(mountpoint)
            .ok()
            .map(|_| DiskUsage::from_space(total, available));

        Self {
            device,
            mountpoint: mountpoint.display().to_string(),
            fs_type,
            usage,
        }
    }
}

/// Collect the host identity.
#[must_use]
pub fn collect_host() -> HostInfo {
    let sys =
        System::new_with_specifics(RefreshKind::nothing().with_cpu(CpuRefreshKind::everything()));
    let processor = sys
        .cpus()
        .first()
        .map(|cpu| cpu.brand().trim().to_string())
        .filter(|brand| !brand.is_empty())
        .unwrap_or_else(|| UNKNOWN.to_string());

    HostInfo {
        system: System::name().unwrap_or_else(|| UNKNOWN.to_string()),
        node_name: System::host_name().unwrap_or_else(|| UNKNOWN.to_string()),
        release: System::kernel_version().unwrap_or_else(|| UNKNOWN.to_string()),
        version: System::long_os_version()
            .or_else(System::os_version)
            .unwrap_or_else(|| UNKNOWN.to_string()),
        machine: std::env::consts::ARCH.to_string(),
        processor,
    }
}

/// Collect CPU counts and utilisation.
///
/// Utilisation needs two samples, so this blocks for
/// [`sysinfo::MINIMUM_CPU_UPDATE_INTERVAL`].
#[must_use]
pub fn collect_cpu() -> CpuInfo {
    let mut sys = System::new_with_specifics(
        RefreshKind::nothing().with_cpu(CpuRefreshKind::nothing().with_cpu_usage()),
    );
    std::thread::sleep(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL);
    sys.refresh_cpu_usage();

    CpuInfo {
        physical_cores: System::physical_core_count(),
        logical_cores: sys.cpus().len(),
        usage_percent: sys.global_cpu_usage(),
    }
}

/// Collect memory statistics.
#[must_use]
pub fn collect_memory() -> MemoryInfo {
    let mut sys = System::new();
    sys.refresh_memory();

    MemoryInfo::from_bytes(sys.total_memory(), sys.available_memory(), sys.used_memory())
}

/// Collect every mounted partition.
#[must_use]
pub fn collect_disks() -> Vec<DiskPartition> {
    Disks::new_with_refreshed_list()
        .list()
        .iter()
        .map(|disk| {
            DiskPartition::probe(
                disk.name().to_string_lossy().into_owned(),
                disk.mount_point(),
                disk.file_system().to_string_lossy().into_owned(),
                disk.total_space(),
                disk.available_space(),
            )
        })
        .collect()
}

/// Collect all host sections.
#[must_use]
pub fn collect() -> SystemReport {
    SystemReport {
        host: collect_host(),
        cpu: collect_cpu(),
        memory: collect_memory(),
        disks: collect_disks(),
    }
}

/// Render the "System Information" section.
#[must_use]
pub fn render_host(host: &HostInfo) -> Vec<String> {
    vec![
        section_title("System Information"),
        format!("System: {}", host.system),
        format!("Node Name: {}", host.node_name),
        format!("Release: {}", host.release),
        format!("Version: {}", host.version),
        format!("Machine: {}", host.machine),
        format!("Processor: {}", host.processor),
    ]
}

/// Render the "CPU Info" section.
#[must_use]
pub fn render_cpu(cpu: &CpuInfo) -> Vec<String> {
    let physical = cpu
        .physical_cores
        .map_or_else(|| UNKNOWN.to_string(), |n| n.to_string());

    vec![
        section_title("CPU Info"),
        format!("Physical cores: {physical}"),
        format!("Total cores: {}", cpu.logical_cores),
        format!("CPU Usage: {:.1}%", cpu.usage_percent),
    ]
}

/// Render the "Memory Information" section.
#[must_use]
pub fn render_memory(memory: &MemoryInfo) -> Vec<String> {
    vec![
        section_title("Memory Information"),
        format!("Total: {}", scale_bytes(memory.total)),
        format!("Available: {}", scale_bytes(memory.available)),
        format!("Used: {}", scale_bytes(memory.used)),
        format!("Percentage: {:.1}%", memory.percent),
    ]
}

/// Render the "Disk Information" section.
///
/// Partitions without usage only show their identity lines.
#[must_use]
pub fn render_disks(disks: &[DiskPartition]) -> Vec<String> {
    let mut out = vec![section_title("Disk Information")];

    for disk in disks {
        out.push(format!("=== Device: {} ===", disk.device));
        out.push(format!("  Mountpoint: {}", disk.mountpoint));
        out.push(format!("  File system type: {}", disk.fs_type));

        if let Some(usage) = &disk.usage {
            out.push(format!("  Total Size: {}", scale_bytes(usage.total)));
            out.push(format!("  Used: {}", scale_bytes(usage.used)));
            out.push(format!("  Free: {}", scale_bytes(usage.free)));
            out.push(format!("  Percentage: {:.1}%", usage.percent));
        }
    }

    out
}

/// Render all host sections in report order.
#[must_use]
pub fn render(report: &SystemReport) -> Vec<String> {
    let mut out = render_host(&report.host);
    out.extend(render_cpu(&report.cpu));
    out.extend(render_memory(&report.memory));
    out.extend(render_disks(&report.disks));
    out
}
