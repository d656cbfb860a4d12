//! 调用期间构造的值对象，序列化后即丢弃。

use serde::{Deserialize, Serialize};

/// 单个就绪卷的容量与元数据。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeInfo {
    /// 卷标识（盘符或挂载点）。
    pub name: String,
    /// 总容量（字节）。
    pub total_bytes: u64,
    /// 原始空闲空间（字节）。
    pub free_bytes: u64,
    /// 调用者可用空间（字节），受配额限制。
    pub available_bytes: u64,
    /// 卷标，可能为空。
    pub volume_label: String,
    /// 文件系统名称，例如 "NTFS"、"ext4"。
    pub file_system: String,
    /// 卷序列号。
    pub serial_number: u32,
    /// 文件系统能力标志位。
    pub file_system_flags: u32,
}

/// 目录扫描得到的文件或目录条目。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryInfo {
    /// 条目路径。
    pub path: String,
    /// 是否为目录。
    pub is_directory: bool,
    /// 文件大小（字节），仅对非目录条目有效。
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
}

impl EntryInfo {
    pub fn file(path: impl Into<String>, size: u64) -> Self {
        Self {
            path: path.into(),
            is_directory: false,
            size: Some(size),
        }
    }

    pub fn directory(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            is_directory: true,
            size: None,
        }
    }
}
