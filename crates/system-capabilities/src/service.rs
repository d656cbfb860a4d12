//! 库存服务：操作分发与边界呈现。

use disk_inventory_api_types::{ErrorResponse, MethodCall, MethodReply};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::{FailureMode, ServiceConfig};
use crate::error::{InventoryError, Result};
use crate::filesystem::{FileSystemCapabilities, ListFilter};
use crate::model::{EntryInfo, VolumeInfo};
use crate::operation::{Operation, OperationKind};
use crate::probe::{OsProbe, SystemProbe};
use crate::volumes::{list_volumes, platform_version};

/// 单次操作的成功结果。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum OperationOutput {
    Text(String),
    Flag(bool),
    Volumes(Vec<VolumeInfo>),
    Entries(Vec<EntryInfo>),
    Entry(EntryInfo),
}

/// 磁盘与文件系统库存服务。
///
/// 每次调用都是独立的同步事务，服务本身不保存任何跨调用状态。
#[derive(Debug, Clone)]
pub struct InventoryService<P = OsProbe> {
    probe: P,
    filesystem: FileSystemCapabilities,
    failure_mode: FailureMode,
}

impl InventoryService<OsProbe> {
    /// 使用真实系统探针创建服务。
    pub fn new(config: &ServiceConfig) -> Self {
        Self::with_probe(OsProbe::new(), config.failure_mode)
    }
}

impl<P: SystemProbe> InventoryService<P> {
    pub fn with_probe(probe: P, failure_mode: FailureMode) -> Self {
        Self {
            probe,
            filesystem: FileSystemCapabilities::new(),
            failure_mode,
        }
    }

    pub fn failure_mode(&self) -> FailureMode {
        self.failure_mode
    }

    /// 处理一次已解码的调用，返回可直接编码的应答。
    #[tracing::instrument(skip(self, call), fields(method = %call.method, id = ?call.id))]
    pub fn handle(&self, call: MethodCall) -> MethodReply {
        let MethodCall {
            id,
            method,
            arguments,
        } = call;

        let operation = match Operation::parse(&method, arguments.as_ref()) {
            Ok(operation) => operation,
            Err(err) => {
                warn!(error = %err, "rejected method call");
                return MethodReply::error(id, err.to_response());
            }
        };

        let kind = operation.kind();
        match self.execute(operation) {
            Ok(output) => match serde_json::to_value(&output) {
                Ok(value) => MethodReply::success(id, value),
                Err(err) => MethodReply::error(
                    id,
                    ErrorResponse::new("SERIALIZATION_ERROR", err.to_string()),
                ),
            },
            Err(err) => self.present_failure(id, kind, err),
        }
    }

    /// 执行操作，失败以带类型的错误返回。
    pub fn execute(&self, operation: Operation) -> Result<OperationOutput> {
        debug!(operation = %operation.kind(), "executing operation");

        match operation {
            Operation::GetPlatformVersion => {
                Ok(OperationOutput::Text(platform_version(&self.probe)))
            }
            Operation::ListVolumes => Ok(OperationOutput::Volumes(list_volumes(&self.probe))),
            Operation::ListDirectory(params) => self.list(&params.path, ListFilter::All),
            Operation::ListFilesOnly(params) => self.list(&params.path, ListFilter::FilesOnly),
            Operation::CreateDirectory(params) => Ok(OperationOutput::Flag(
                self.filesystem.create_directory(&params.path)?,
            )),
            Operation::DeleteDirectory(params) => Ok(OperationOutput::Flag(
                self.filesystem.delete_directory(&params.path)?,
            )),
            Operation::CreateFile(params) => {
                let content = params.content.as_deref().unwrap_or_default();
                self.filesystem.write_file(&params.path, content)?;
                Ok(OperationOutput::Flag(true))
            }
            Operation::DeleteFile(params) => Ok(OperationOutput::Flag(
                self.filesystem.delete_file(&params.path)?,
            )),
            Operation::ReadFile(params) => {
                Ok(OperationOutput::Text(self.filesystem.read_file(&params.path)?))
            }
            Operation::WriteFile(params) => {
                self.filesystem.write_file(&params.path, &params.content)?;
                Ok(OperationOutput::Flag(true))
            }
            Operation::GetFileMetadata(params) => Ok(OperationOutput::Entry(
                self.filesystem.file_metadata(&params.path)?,
            )),
            Operation::GetFolderMetadata(params) => Ok(OperationOutput::Entry(
                self.filesystem.folder_metadata(&params.path)?,
            )),
        }
    }

    fn list(&self, path: &str, filter: ListFilter) -> Result<OperationOutput> {
        self.filesystem
            .list_directory(path, filter)
            .map(OperationOutput::Entries)
            .map_err(InventoryError::DirectoryList)
    }

    fn present_failure(&self, id: Option<u64>, kind: OperationKind, err: InventoryError) -> MethodReply {
        if self.failure_mode == FailureMode::Compatible
            && let Some(fallback) = compatible_fallback(kind)
        {
            warn!(operation = %kind, error = %err, "operation failed, answering with compatibility default");
            return MethodReply::success(id, fallback);
        }

        warn!(operation = %kind, code = err.code(), error = %err, "operation failed");
        MethodReply::error(id, err.to_response())
    }
}

/// 兼容模式下失败时返回的默认值；`None` 表示该操作的失败必须上报。
fn compatible_fallback(kind: OperationKind) -> Option<Value> {
    match kind {
        OperationKind::CreateDirectory
        | OperationKind::DeleteDirectory
        | OperationKind::CreateFile
        | OperationKind::DeleteFile
        | OperationKind::WriteFile => Some(Value::Bool(false)),
        OperationKind::ReadFile => Some(Value::String(String::new())),
        OperationKind::GetFileMetadata | OperationKind::GetFolderMetadata => Some(Value::Null),
        OperationKind::GetPlatformVersion
        | OperationKind::ListVolumes
        | OperationKind::ListDirectory
        | OperationKind::ListFilesOnly => None,
    }
}
