//! 系统探针抽象。
//!
//! 平台版本与卷信息的查询都经过 `SystemProbe`，核心逻辑因此可以用
//! 伪造的探针测试，而不依赖真实主机。

use std::io;
use std::path::{Path, PathBuf};

use sysinfo::{Disks, System};

/// 已挂载、尚未确认就绪的卷。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountedVolume {
    /// 卷标识（盘符或挂载点）。
    pub identifier: String,
    /// 挂载点路径。
    pub mount_point: PathBuf,
    /// 枚举时报告的卷标。
    pub label: String,
    /// 枚举时报告的文件系统名称。
    pub file_system: String,
    /// 枚举时报告的总容量。
    pub total_bytes: u64,
    /// 枚举时报告的可用空间。
    pub available_bytes: u64,
}

/// 卷容量。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VolumeSpace {
    pub total_bytes: u64,
    pub free_bytes: u64,
    pub available_bytes: u64,
}

/// 卷的次要元数据。
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VolumeDetails {
    pub label: String,
    pub file_system: String,
    pub serial_number: u32,
    pub file_system_flags: u32,
}

/// 系统能力探针。
pub trait SystemProbe: Send + Sync {
    /// 操作系统名称。
    fn os_name(&self) -> Option<String>;

    /// 操作系统版本。
    fn os_version(&self) -> Option<String>;

    /// 枚举当前挂载的卷。
    fn mounted_volumes(&self) -> Vec<MountedVolume>;

    /// 查询卷容量，失败表示卷未就绪。
    fn volume_space(&self, volume: &MountedVolume) -> io::Result<VolumeSpace>;

    /// 查询卷标、文件系统、序列号与标志位。
    fn volume_details(&self, volume: &MountedVolume) -> io::Result<VolumeDetails>;
}

/// 基于 `sysinfo` 与平台调用的真实探针。
#[derive(Debug, Clone, Copy, Default)]
pub struct OsProbe;

impl OsProbe {
    pub fn new() -> Self {
        Self
    }
}

impl SystemProbe for OsProbe {
    fn os_name(&self) -> Option<String> {
        System::name().filter(|name| !name.is_empty())
    }

    fn os_version(&self) -> Option<String> {
        System::os_version().filter(|version| !version.is_empty())
    }

    fn mounted_volumes(&self) -> Vec<MountedVolume> {
        let disks = Disks::new_with_refreshed_list();

        disks
            .list()
            .iter()
            .map(|disk| MountedVolume {
                identifier: volume_identifier(disk.mount_point()),
                mount_point: disk.mount_point().to_path_buf(),
                label: disk.name().to_string_lossy().into_owned(),
                file_system: disk.file_system().to_string_lossy().into_owned(),
                total_bytes: disk.total_space(),
                available_bytes: disk.available_space(),
            })
            .collect()
    }

    #[cfg(unix)]
    fn volume_space(&self, volume: &MountedVolume) -> io::Result<VolumeSpace> {
        let stat = statvfs(&volume.mount_point)?;
        Ok(stat.space)
    }

    #[cfg(not(unix))]
    fn volume_space(&self, volume: &MountedVolume) -> io::Result<VolumeSpace> {
        if volume.total_bytes == 0 {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("volume {} reports no capacity", volume.identifier),
            ));
        }

        // 没有原始空闲空间接口时两者合一。
        Ok(VolumeSpace {
            total_bytes: volume.total_bytes,
            free_bytes: volume.available_bytes,
            available_bytes: volume.available_bytes,
        })
    }

    #[cfg(unix)]
    fn volume_details(&self, volume: &MountedVolume) -> io::Result<VolumeDetails> {
        let stat = statvfs(&volume.mount_point)?;
        Ok(VolumeDetails {
            label: volume.label.clone(),
            file_system: volume.file_system.clone(),
            serial_number: stat.fsid,
            file_system_flags: stat.flags,
        })
    }

    #[cfg(not(unix))]
    fn volume_details(&self, volume: &MountedVolume) -> io::Result<VolumeDetails> {
        Ok(VolumeDetails {
            label: volume.label.clone(),
            file_system: volume.file_system.clone(),
            serial_number: 0,
            file_system_flags: 0,
        })
    }
}

/// 由挂载点得到卷标识：去掉末尾分隔符，根目录保持不变。
pub fn volume_identifier(mount_point: &Path) -> String {
    let rendered = mount_point.to_string_lossy();
    let trimmed = rendered.trim_end_matches(['/', '\\']);
    if trimmed.is_empty() {
        rendered.chars().take(1).collect()
    } else {
        trimmed.to_string()
    }
}

#[cfg(unix)]
struct StatVfs {
    space: VolumeSpace,
    fsid: u32,
    flags: u32,
}

#[cfg(unix)]
#[allow(clippy::unnecessary_cast)]
fn statvfs(path: &Path) -> io::Result<StatVfs> {
    let stat = nix::sys::statvfs::statvfs(path)?;

    let block_size = stat.fragment_size() as u64;
    Ok(StatVfs {
        space: VolumeSpace {
            total_bytes: (stat.blocks() as u64).saturating_mul(block_size),
            free_bytes: (stat.blocks_free() as u64).saturating_mul(block_size),
            available_bytes: (stat.blocks_available() as u64).saturating_mul(block_size),
        },
        fsid: stat.filesystem_id() as u32,
        flags: stat.flags().bits() as u32,
    })
}
