// src/driver/storage/file.rs
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::common::error::{AppError, Result};
use crate::driver::storage::FrameStorage;

/// 文件帧存储：写入先落到同目录临时文件，再原子重命名覆盖目标
pub struct FileFrameStorage {
    path: PathBuf,
}

impl FileFrameStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn temp_path(&self) -> PathBuf {
        let name = self
            .path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "frame".to_string());
        self.path
            .with_file_name(format!(".{}.{}.tmp", name, std::process::id()))
    }

    /// 目标所在目录，裸文件名视为当前目录
    fn parent_dir(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }

    fn write_temp(temp: &Path, data: &[u8]) -> io::Result<()> {
        let mut file = File::create(temp)?;
        file.write_all(data)?;
        file.flush()?;
        file.sync_all()
    }

    /// 重命名后同步目录项，掉电后替换依然有效
    #[cfg(unix)]
    fn sync_dir(dir: &Path) -> io::Result<()> {
        File::open(dir)?.sync_all()
    }

    #[cfg(not(unix))]
    fn sync_dir(_dir: &Path) -> io::Result<()> {
        Ok(())
    }
}

impl FrameStorage for FileFrameStorage {
    fn read_frame(&mut self) -> Result<Option<Vec<u8>>> {
        match fs::read(&self.path) {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(AppError::Read {
                path: self.path.clone(),
                source,
            }),
        }
    }

    fn write_frame(&mut self, data: &[u8]) -> Result<()> {
        let temp = self.temp_path();

        let result = Self::write_temp(&temp, data)
            .and_then(|()| fs::rename(&temp, &self.path))
            .and_then(|()| Self::sync_dir(self.parent_dir()));
        if let Err(source) = result {
            // 临时文件可能根本没有创建成功
            if let Err(e) = fs::remove_file(&temp) {
                if e.kind() != io::ErrorKind::NotFound {
                    log::warn!("Failed to remove {}: {}", temp.display(), e);
                }
            }
            return Err(AppError::Write {
                path: self.path.clone(),
                source,
            });
        }

        log::debug!("Wrote {} bytes to {}", data.len(), self.path.display());
        Ok(())
    }
}
