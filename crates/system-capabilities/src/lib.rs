//! System Capabilities - 磁盘与文件系统库存服务。
//!
//! 该 crate 提供驱动器枚举、容量与卷元数据、单层目录列举以及文件增删读写，
//! 以“操作名 + 参数映射”的形式对宿主暴露，返回结果或带类型的失败。

pub mod config;
pub mod error;
pub mod filesystem;
pub mod model;
pub mod operation;
pub mod probe;
pub mod service;
pub mod volumes;

pub use config::{FailureMode, ServiceConfig};
pub use error::{InventoryError, Result};
pub use filesystem::{FileSystemCapabilities, FileSystemError, ListFilter};
pub use model::{EntryInfo, VolumeInfo};
pub use operation::{CreateFileParams, Operation, OperationKind, PathParams, WriteFileParams};
pub use probe::{MountedVolume, OsProbe, SystemProbe, VolumeDetails, VolumeSpace};
pub use service::{InventoryService, OperationOutput};
