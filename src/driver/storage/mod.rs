// src/driver/storage/mod.rs

use crate::common::error::Result;

/// 帧缓冲存储驱动 trait，按整块读写
pub trait FrameStorage {
    /// 读取已保存的帧；尚未保存过时返回 `None`
    fn read_frame(&mut self) -> Result<Option<Vec<u8>>>;

    /// 整体替换已保存的帧
    fn write_frame(&mut self, data: &[u8]) -> Result<()>;
}

mod file;
pub use file::FileFrameStorage;
