#![allow(dead_code)]

use std::io;
use std::path::{Path, PathBuf};

use disk_inventory_api_types::{MethodCall, MethodReply};
use serde_json::Value;
use system_capabilities::{
    FailureMode, InventoryService, MountedVolume, SystemProbe, VolumeDetails, VolumeSpace,
};

/// 固定两块盘、其中一块未就绪的探针。
#[derive(Clone, Default)]
pub struct StaticProbe;

impl SystemProbe for StaticProbe {
    fn os_name(&self) -> Option<String> {
        Some("Windows".to_string())
    }

    fn os_version(&self) -> Option<String> {
        Some("10+".to_string())
    }

    fn mounted_volumes(&self) -> Vec<MountedVolume> {
        ["D:", "C:", "A:"]
            .into_iter()
            .map(|id| MountedVolume {
                identifier: id.to_string(),
                mount_point: PathBuf::from(format!("{id}\\")),
                label: format!("Disk {id}"),
                file_system: "NTFS".to_string(),
                total_bytes: 1_000,
                available_bytes: 400,
            })
            .collect()
    }

    fn volume_space(&self, volume: &MountedVolume) -> io::Result<VolumeSpace> {
        if volume.identifier == "A:" {
            return Err(io::Error::new(io::ErrorKind::NotFound, "no media"));
        }
        Ok(VolumeSpace {
            total_bytes: volume.total_bytes,
            free_bytes: 500,
            available_bytes: volume.available_bytes,
        })
    }

    fn volume_details(&self, volume: &MountedVolume) -> io::Result<VolumeDetails> {
        Ok(VolumeDetails {
            label: volume.label.clone(),
            file_system: volume.file_system.clone(),
            serial_number: 0x1234_5678,
            file_system_flags: 0x0000_0006,
        })
    }
}

pub fn compatible_service() -> InventoryService<StaticProbe> {
    InventoryService::with_probe(StaticProbe, FailureMode::Compatible)
}

pub fn strict_service() -> InventoryService<StaticProbe> {
    InventoryService::with_probe(StaticProbe, FailureMode::Strict)
}

pub fn path_call(method: &str, path: &Path) -> MethodCall {
    MethodCall::new(method).with_argument("path", path.to_string_lossy().into_owned())
}

pub fn success_value(reply: &MethodReply) -> &Value {
    reply
        .value()
        .unwrap_or_else(|| panic!("expected success, got {:?}", reply.result))
}

pub fn error_code(reply: &MethodReply) -> &str {
    &reply
        .error_response()
        .unwrap_or_else(|| panic!("expected error, got {:?}", reply.result))
        .code
}
