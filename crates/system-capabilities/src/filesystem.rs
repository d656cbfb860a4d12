//! 文件系统能力模块。
//!
//! 提供单层目录列举、文件与目录的增删读写以及元数据查询。
//! 所有操作都返回带类型的 `Result`，失败是否被吞掉由上层决定。

use std::fs;
use std::io::{self, ErrorKind, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

use crate::model::EntryInfo;

/// 文件系统错误类型。
#[derive(Debug, Error)]
pub enum FileSystemError {
    #[error("路径不存在: {0}")]
    PathNotFound(String),

    #[error("路径不是目录: {0}")]
    NotADirectory(String),

    #[error("路径不是文件: {0}")]
    NotAFile(String),

    #[error("路径已存在: {0}")]
    AlreadyExists(String),

    #[error("权限不足: {0}")]
    PermissionDenied(String),

    #[error("IO 错误 ({path}): {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
}

impl FileSystemError {
    /// 按 IO 错误种类归类，并附上出错路径。
    pub fn from_io(path: &Path, source: io::Error) -> Self {
        let display = path.display().to_string();
        match source.kind() {
            ErrorKind::NotFound => Self::PathNotFound(display),
            ErrorKind::PermissionDenied => Self::PermissionDenied(display),
            ErrorKind::AlreadyExists => Self::AlreadyExists(display),
            _ => Self::Io {
                path: display,
                source,
            },
        }
    }

    /// 机器可读的错误码。
    pub fn code(&self) -> &'static str {
        match self {
            Self::PathNotFound(_) => "PATH_NOT_FOUND",
            Self::NotADirectory(_) => "NOT_A_DIRECTORY",
            Self::NotAFile(_) => "NOT_A_FILE",
            Self::AlreadyExists(_) => "ALREADY_EXISTS",
            Self::PermissionDenied(_) => "PERMISSION_DENIED",
            Self::Io { .. } => "IO_ERROR",
        }
    }
}

pub type Result<T> = std::result::Result<T, FileSystemError>;

/// 目录列举范围。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListFilter {
    /// 文件与子目录。
    All,
    /// 仅非目录条目。
    FilesOnly,
}

/// 文件系统能力接口。
///
/// 不持有任何跨调用状态，也不加锁；并发语义完全交给操作系统。
#[derive(Debug, Clone, Copy, Default)]
pub struct FileSystemCapabilities;

impl FileSystemCapabilities {
    /// 创建新的文件系统能力实例。
    pub fn new() -> Self {
        Self
    }

    /// 列出目录的直接子条目（不递归）。
    ///
    /// 任一条目检查失败都会中止整个列举，不返回部分结果。
    pub fn list_directory(&self, path: &str, filter: ListFilter) -> Result<Vec<EntryInfo>> {
        let path = PathBuf::from(path);

        info!(path = %path.display(), ?filter, "Listing directory");

        let metadata = fs::metadata(&path).map_err(|e| FileSystemError::from_io(&path, e))?;
        if !metadata.is_dir() {
            return Err(FileSystemError::NotADirectory(path.display().to_string()));
        }

        let reader = fs::read_dir(&path).map_err(|e| FileSystemError::from_io(&path, e))?;

        let mut entries = Vec::new();
        for entry in reader {
            let entry = entry.map_err(|e| FileSystemError::from_io(&path, e))?;
            let entry_info = self.entry_to_info(&entry)?;
            if filter == ListFilter::FilesOnly && entry_info.is_directory {
                continue;
            }
            entries.push(entry_info);
        }

        debug!(path = %path.display(), count = entries.len(), "directory listed");
        Ok(entries)
    }

    /// 将目录条目转换为信息结构，符号链接按目标判断类型。
    fn entry_to_info(&self, entry: &fs::DirEntry) -> Result<EntryInfo> {
        let path = entry.path();
        let metadata = fs::metadata(&path).map_err(|e| FileSystemError::from_io(&path, e))?;
        let display = path.to_string_lossy().into_owned();

        Ok(if metadata.is_dir() {
            EntryInfo::directory(display)
        } else {
            EntryInfo::file(display, metadata.len())
        })
    }

    /// 创建目录及缺失的上级目录。
    ///
    /// 目录已存在时返回 `Ok(false)`。
    pub fn create_directory(&self, path: &str) -> Result<bool> {
        let path = Path::new(path);

        // `create_dir_all("")` 什么也不创建却返回成功。
        if path.as_os_str().is_empty() {
            return Err(FileSystemError::PathNotFound(String::new()));
        }

        match fs::metadata(path) {
            Ok(metadata) if metadata.is_dir() => return Ok(false),
            Ok(_) => return Err(FileSystemError::NotADirectory(path.display().to_string())),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(FileSystemError::from_io(path, e)),
        }

        info!(path = %path.display(), "Creating directory");
        fs::create_dir_all(path).map_err(|e| FileSystemError::from_io(path, e))?;
        Ok(true)
    }

    /// 递归删除目录及其全部内容。
    pub fn delete_directory(&self, path: &str) -> Result<bool> {
        let path = Path::new(path);

        let metadata = fs::symlink_metadata(path).map_err(|e| FileSystemError::from_io(path, e))?;
        if !metadata.is_dir() {
            return Err(FileSystemError::NotADirectory(path.display().to_string()));
        }

        info!(path = %path.display(), "Deleting directory");
        fs::remove_dir_all(path).map_err(|e| FileSystemError::from_io(path, e))?;
        Ok(true)
    }

    /// 创建或截断文件并写入内容，不会创建上级目录。
    pub fn write_file(&self, path: &str, content: &str) -> Result<()> {
        let path = Path::new(path);

        info!(path = %path.display(), bytes = content.len(), "Writing file");
        let mut file = fs::File::create(path).map_err(|e| FileSystemError::from_io(path, e))?;
        file.write_all(content.as_bytes())
            .and_then(|()| file.flush())
            .map_err(|e| FileSystemError::from_io(path, e))
    }

    /// 删除单个文件。
    pub fn delete_file(&self, path: &str) -> Result<bool> {
        let path = Path::new(path);

        let metadata = fs::symlink_metadata(path).map_err(|e| FileSystemError::from_io(path, e))?;
        if metadata.is_dir() {
            return Err(FileSystemError::NotAFile(path.display().to_string()));
        }

        info!(path = %path.display(), "Deleting file");
        fs::remove_file(path).map_err(|e| FileSystemError::from_io(path, e))?;
        Ok(true)
    }

    /// 读取完整文件内容，非 UTF-8 字节按替换字符处理。
    pub fn read_file(&self, path: &str) -> Result<String> {
        let path = Path::new(path);

        debug!(path = %path.display(), "Reading file");
        let bytes = fs::read(path).map_err(|e| FileSystemError::from_io(path, e))?;
        Ok(match String::from_utf8(bytes) {
            Ok(text) => text,
            Err(err) => String::from_utf8_lossy(err.as_bytes()).into_owned(),
        })
    }

    /// 获取文件元数据。
    pub fn file_metadata(&self, path: &str) -> Result<EntryInfo> {
        let path = Path::new(path);

        let metadata = fs::metadata(path).map_err(|e| FileSystemError::from_io(path, e))?;
        if metadata.is_dir() {
            return Err(FileSystemError::NotAFile(path.display().to_string()));
        }

        Ok(EntryInfo::file(path.to_string_lossy(), metadata.len()))
    }

    /// 获取目录元数据，不包含大小。
    pub fn folder_metadata(&self, path: &str) -> Result<EntryInfo> {
        let path = Path::new(path);

        let metadata = fs::metadata(path).map_err(|e| FileSystemError::from_io(path, e))?;
        if !metadata.is_dir() {
            return Err(FileSystemError::NotADirectory(path.display().to_string()));
        }

        Ok(EntryInfo::directory(path.to_string_lossy()))
    }
}
