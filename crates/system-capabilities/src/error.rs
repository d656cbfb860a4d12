use disk_inventory_api_types::ErrorResponse;
use thiserror::Error;

use crate::filesystem::FileSystemError;

#[derive(Debug, Error)]
pub enum InventoryError {
    #[error("不支持的操作: {0}")]
    UnsupportedOperation(String),

    #[error("参数无效 ({operation}): {reason}")]
    InvalidArguments {
        operation: &'static str,
        reason: String,
    },

    #[error("目录列举失败: {0}")]
    DirectoryList(#[source] FileSystemError),

    #[error(transparent)]
    FileSystem(#[from] FileSystemError),
}

impl InventoryError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnsupportedOperation(_) => "UNSUPPORTED_OPERATION",
            Self::InvalidArguments { .. } => "INVALID_ARGUMENTS",
            Self::DirectoryList(_) => "DIRECTORY_LIST_ERROR",
            Self::FileSystem(err) => err.code(),
        }
    }

    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse::new(self.code(), self.to_string())
    }
}

pub type Result<T> = std::result::Result<T, InventoryError>;
