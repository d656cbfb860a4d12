//! 卷枚举与平台版本。

use tracing::debug;

use crate::model::VolumeInfo;
use crate::probe::{SystemProbe, VolumeDetails};

/// 探针没有任何信息时的平台描述。
pub const UNKNOWN_PLATFORM: &str = "Unknown";

/// 生成可读的平台版本描述，永不失败。
pub fn platform_version(probe: &dyn SystemProbe) -> String {
    match (probe.os_name(), probe.os_version()) {
        (Some(name), Some(version)) => format!("{name} {version}"),
        (Some(name), None) => name,
        (None, Some(version)) => version,
        (None, None) => UNKNOWN_PLATFORM.to_string(),
    }
}

/// 按标识升序列出所有就绪卷。
///
/// 容量查询失败的卷视为未就绪并跳过；次要元数据缺失时字段取默认值。
pub fn list_volumes(probe: &dyn SystemProbe) -> Vec<VolumeInfo> {
    let mut candidates = probe.mounted_volumes();
    candidates.sort_by(|a, b| a.identifier.cmp(&b.identifier));
    candidates.dedup_by(|a, b| a.identifier == b.identifier);

    let mut volumes = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        let space = match probe.volume_space(&candidate) {
            Ok(space) => space,
            Err(err) => {
                debug!(volume = %candidate.identifier, error = %err, "skipping volume that is not ready");
                continue;
            }
        };

        let details = probe.volume_details(&candidate).unwrap_or_else(|err| {
            debug!(volume = %candidate.identifier, error = %err, "volume details unavailable");
            VolumeDetails::default()
        });

        volumes.push(VolumeInfo {
            name: candidate.identifier,
            total_bytes: space.total_bytes,
            free_bytes: space.free_bytes,
            available_bytes: space.available_bytes,
            volume_label: details.label,
            file_system: details.file_system,
            serial_number: details.serial_number,
            file_system_flags: details.file_system_flags,
        });
    }

    volumes
}
