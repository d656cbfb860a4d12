//! 操作类型与参数校验。
//!
//! 操作名在边界处被解析为封闭的 `Operation` 枚举，参数随之反序列化为
//! 各自的参数结构体，缺失或类型错误的参数在分发前即被拒绝。

use std::fmt;
use std::str::FromStr;

use disk_inventory_api_types::Arguments;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{InventoryError, Result};

/// 全部受支持的操作。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    GetPlatformVersion,
    ListVolumes,
    ListDirectory,
    ListFilesOnly,
    CreateDirectory,
    DeleteDirectory,
    CreateFile,
    DeleteFile,
    ReadFile,
    WriteFile,
    GetFileMetadata,
    GetFolderMetadata,
}

impl OperationKind {
    pub const ALL: [OperationKind; 12] = [
        Self::GetPlatformVersion,
        Self::ListVolumes,
        Self::ListDirectory,
        Self::ListFilesOnly,
        Self::CreateDirectory,
        Self::DeleteDirectory,
        Self::CreateFile,
        Self::DeleteFile,
        Self::ReadFile,
        Self::WriteFile,
        Self::GetFileMetadata,
        Self::GetFolderMetadata,
    ];

    /// 规范的方法名。
    pub fn method_name(self) -> &'static str {
        match self {
            Self::GetPlatformVersion => "getPlatformVersion",
            Self::ListVolumes => "listVolumes",
            Self::ListDirectory => "listDirectory",
            Self::ListFilesOnly => "listFilesOnly",
            Self::CreateDirectory => "createDirectory",
            Self::DeleteDirectory => "deleteDirectory",
            Self::CreateFile => "createFile",
            Self::DeleteFile => "deleteFile",
            Self::ReadFile => "readFile",
            Self::WriteFile => "writeFile",
            Self::GetFileMetadata => "getFileMetadata",
            Self::GetFolderMetadata => "getFolderMetadata",
        }
    }

    /// 解析方法名，兼容旧版插件通道使用的名称。
    pub fn from_method_name(name: &str) -> Option<Self> {
        let legacy = match name {
            "getDisks" => Some(Self::ListVolumes),
            "listFolder" => Some(Self::ListDirectory),
            "listFiles" => Some(Self::ListFilesOnly),
            "createFolder" => Some(Self::CreateDirectory),
            "deleteFolder" => Some(Self::DeleteDirectory),
            _ => None,
        };

        legacy.or_else(|| {
            Self::ALL
                .into_iter()
                .find(|kind| kind.method_name() == name)
        })
    }

    /// 是否为目录列举操作；这类操作的失败总是上报给调用方。
    pub fn is_listing(self) -> bool {
        matches!(self, Self::ListDirectory | Self::ListFilesOnly)
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.method_name())
    }
}

impl FromStr for OperationKind {
    type Err = InventoryError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_method_name(s).ok_or_else(|| InventoryError::UnsupportedOperation(s.to_string()))
    }
}

/// 只需要路径的操作参数。
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PathParams {
    pub path: String,
}

/// `createFile` 参数，内容缺省或为 null 时创建空文件。
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateFileParams {
    pub path: String,
    #[serde(default)]
    pub content: Option<String>,
}

/// `writeFile` 参数，内容必填。
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WriteFileParams {
    pub path: String,
    pub content: String,
}

/// 已校验的操作请求。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    GetPlatformVersion,
    ListVolumes,
    ListDirectory(PathParams),
    ListFilesOnly(PathParams),
    CreateDirectory(PathParams),
    DeleteDirectory(PathParams),
    CreateFile(CreateFileParams),
    DeleteFile(PathParams),
    ReadFile(PathParams),
    WriteFile(WriteFileParams),
    GetFileMetadata(PathParams),
    GetFolderMetadata(PathParams),
}

impl Operation {
    /// 由方法名与参数映射构造操作。
    pub fn parse(method: &str, arguments: Option<&Arguments>) -> Result<Self> {
        let kind: OperationKind = method.parse()?;

        Ok(match kind {
            OperationKind::GetPlatformVersion => Self::GetPlatformVersion,
            OperationKind::ListVolumes => Self::ListVolumes,
            OperationKind::ListDirectory => Self::ListDirectory(params(kind, arguments)?),
            OperationKind::ListFilesOnly => Self::ListFilesOnly(params(kind, arguments)?),
            OperationKind::CreateDirectory => Self::CreateDirectory(params(kind, arguments)?),
            OperationKind::DeleteDirectory => Self::DeleteDirectory(params(kind, arguments)?),
            OperationKind::CreateFile => Self::CreateFile(params(kind, arguments)?),
            OperationKind::DeleteFile => Self::DeleteFile(params(kind, arguments)?),
            OperationKind::ReadFile => Self::ReadFile(params(kind, arguments)?),
            OperationKind::WriteFile => Self::WriteFile(params(kind, arguments)?),
            OperationKind::GetFileMetadata => Self::GetFileMetadata(params(kind, arguments)?),
            OperationKind::GetFolderMetadata => Self::GetFolderMetadata(params(kind, arguments)?),
        })
    }

    pub fn kind(&self) -> OperationKind {
        match self {
            Self::GetPlatformVersion => OperationKind::GetPlatformVersion,
            Self::ListVolumes => OperationKind::ListVolumes,
            Self::ListDirectory(_) => OperationKind::ListDirectory,
            Self::ListFilesOnly(_) => OperationKind::ListFilesOnly,
            Self::CreateDirectory(_) => OperationKind::CreateDirectory,
            Self::DeleteDirectory(_) => OperationKind::DeleteDirectory,
            Self::CreateFile(_) => OperationKind::CreateFile,
            Self::DeleteFile(_) => OperationKind::DeleteFile,
            Self::ReadFile(_) => OperationKind::ReadFile,
            Self::WriteFile(_) => OperationKind::WriteFile,
            Self::GetFileMetadata(_) => OperationKind::GetFileMetadata,
            Self::GetFolderMetadata(_) => OperationKind::GetFolderMetadata,
        }
    }
}

fn params<T: DeserializeOwned>(kind: OperationKind, arguments: Option<&Arguments>) -> Result<T> {
    let value = Value::Object(arguments.cloned().unwrap_or_default());

    serde_json::from_value(value).map_err(|err| InventoryError::InvalidArguments {
        operation: kind.method_name(),
        reason: err.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn arguments(value: Value) -> Arguments {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn every_method_name_round_trips() {
        for kind in OperationKind::ALL {
            assert_eq!(OperationKind::from_method_name(kind.method_name()), Some(kind));
        }
    }

    #[test]
    fn legacy_names_are_accepted() {
        assert_eq!(
            "getDisks".parse::<OperationKind>().expect("legacy name"),
            OperationKind::ListVolumes
        );
        assert_eq!(
            "listFolder".parse::<OperationKind>().expect("legacy name"),
            OperationKind::ListDirectory
        );
        assert_eq!(
            "deleteFolder".parse::<OperationKind>().expect("legacy name"),
            OperationKind::DeleteDirectory
        );
    }

    #[test]
    fn unknown_method_is_unsupported() {
        let err = Operation::parse("formatDrive", None).expect_err("unknown method");

        assert!(matches!(err, InventoryError::UnsupportedOperation(name) if name == "formatDrive"));
    }

    #[test]
    fn operations_without_parameters_ignore_arguments() {
        let args = arguments(json!({ "path": "C:\\" }));

        assert_eq!(
            Operation::parse("listVolumes", Some(&args)).expect("parse"),
            Operation::ListVolumes
        );
        assert_eq!(
            Operation::parse("getPlatformVersion", None).expect("parse"),
            Operation::GetPlatformVersion
        );
    }

    #[test]
    fn missing_path_is_rejected() {
        let err = Operation::parse("readFile", None).expect_err("path is required");

        assert_eq!(err.code(), "INVALID_ARGUMENTS");
    }

    #[test]
    fn non_string_path_is_rejected() {
        let args = arguments(json!({ "path": true }));

        let err = Operation::parse("deleteFile", Some(&args)).expect_err("path must be a string");

        assert_eq!(err.code(), "INVALID_ARGUMENTS");
    }

    #[test]
    fn create_file_content_is_optional() {
        let args = arguments(json!({ "path": "a.txt", "content": null }));

        let op = Operation::parse("createFile", Some(&args)).expect("parse");

        assert_eq!(
            op,
            Operation::CreateFile(CreateFileParams {
                path: "a.txt".to_string(),
                content: None,
            })
        );
    }

    #[test]
    fn write_file_requires_content() {
        let args = arguments(json!({ "path": "a.txt" }));

        let err = Operation::parse("writeFile", Some(&args)).expect_err("content is required");

        assert_eq!(err.code(), "INVALID_ARGUMENTS");
    }

    #[test]
    fn kind_matches_parsed_operation() {
        let args = arguments(json!({ "path": "/tmp" }));

        let op = Operation::parse("listFiles", Some(&args)).expect("parse");

        assert_eq!(op.kind(), OperationKind::ListFilesOnly);
        assert!(op.kind().is_listing());
    }
}
