// src/service/frame_service.rs
use std::fmt;
use std::path::Path;

use log::{debug, info};
use sha2::{Digest, Sha256};

use crate::common::error::Result;
use crate::driver::storage::{FileFrameStorage, FrameStorage};

/// 内容指纹（SHA-256）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint([u8; 32]);

impl Fingerprint {
    pub fn of(data: &[u8]) -> Self {
        Self(Sha256::digest(data).into())
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

/// 提交结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    /// 内容有变化（或此前没有保存过），已写入
    Written,
    /// 与已保存内容相同，未触碰存储
    Unchanged,
}

/// 帧提交服务：只有内容变化时才写入存储
pub struct FrameService<S: FrameStorage> {
    storage: S,
}

impl<S: FrameStorage> FrameService<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn commit(&mut self, packed: &[u8]) -> Result<CommitOutcome> {
        let fingerprint = Fingerprint::of(packed);

        match self.storage.read_frame()? {
            Some(previous) if Fingerprint::of(&previous) == fingerprint => {
                info!("Framebuffer unchanged ({}), skipping write", fingerprint);
                return Ok(CommitOutcome::Unchanged);
            }
            Some(_) => debug!("Framebuffer changed, new fingerprint {}", fingerprint),
            None => debug!("No previous framebuffer stored"),
        }

        self.storage.write_frame(packed)?;
        info!(
            "Framebuffer written ({} bytes, {})",
            packed.len(),
            fingerprint
        );
        Ok(CommitOutcome::Written)
    }
}

/// 把打包好的帧提交到 `path`
pub fn commit(packed: &[u8], path: impl AsRef<Path>) -> Result<CommitOutcome> {
    FrameService::new(FileFrameStorage::new(path.as_ref())).commit(packed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::error::AppError;
    use std::fs;
    use std::io;

    /// 记录写入次数的内存存储
    #[derive(Default)]
    struct MemoryStorage {
        frame: Option<Vec<u8>>,
        writes: usize,
    }

    impl FrameStorage for MemoryStorage {
        fn read_frame(&mut self) -> Result<Option<Vec<u8>>> {
            Ok(self.frame.clone())
        }

        fn write_frame(&mut self, data: &[u8]) -> Result<()> {
            self.frame = Some(data.to_vec());
            self.writes += 1;
            Ok(())
        }
    }

    struct BrokenStorage;

    impl FrameStorage for BrokenStorage {
        fn read_frame(&mut self) -> Result<Option<Vec<u8>>> {
            Err(AppError::Read {
                path: "frame".into(),
                source: io::Error::from(io::ErrorKind::PermissionDenied),
            })
        }

        fn write_frame(&mut self, _data: &[u8]) -> Result<()> {
            panic!("must not write after a failed read");
        }
    }

    #[test]
    fn fingerprint_is_sha256_hex() {
        assert_eq!(
            Fingerprint::of(b"").to_string(),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
        assert_ne!(Fingerprint::of(&[0x00]), Fingerprint::of(&[0x01]));
    }

    #[test]
    fn identical_frames_are_written_once() {
        let mut service = FrameService::new(MemoryStorage::default());
        let frame = vec![0x5A; 64];
        assert_eq!(service.commit(&frame).unwrap(), CommitOutcome::Written);
        assert_eq!(service.commit(&frame).unwrap(), CommitOutcome::Unchanged);
        assert_eq!(service.storage().writes, 1);
    }

    #[test]
    fn single_bit_flip_is_written_again() {
        let mut service = FrameService::new(MemoryStorage::default());
        let mut frame = vec![0x00; 64];
        service.commit(&frame).unwrap();
        frame[17] ^= 0x04;
        assert_eq!(service.commit(&frame).unwrap(), CommitOutcome::Written);
        assert_eq!(service.storage().writes, 2);
        assert_eq!(service.storage().frame.as_deref(), Some(&frame[..]));
    }

    #[test]
    fn read_failure_aborts_without_writing() {
        let mut service = FrameService::new(BrokenStorage);
        let err = service.commit(&[0x00]).unwrap_err();
        assert!(matches!(err, AppError::Read { .. }));
    }

    #[test]
    fn unchanged_file_keeps_its_mtime() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("output.bin");
        let frame = vec![0xC3; 30720];

        assert_eq!(commit(&frame, &path).unwrap(), CommitOutcome::Written);
        let before = fs::metadata(&path).unwrap();

        assert_eq!(commit(&frame, &path).unwrap(), CommitOutcome::Unchanged);
        let after = fs::metadata(&path).unwrap();
        assert_eq!(before.modified().unwrap(), after.modified().unwrap());
        assert_eq!(after.len(), 30720);
    }

    #[test]
    fn changed_frame_replaces_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("output.bin");
        let mut frame = vec![0x00; 128];
        commit(&frame, &path).unwrap();

        frame[0] = 0x80;
        assert_eq!(commit(&frame, &path).unwrap(), CommitOutcome::Written);
        assert_eq!(fs::read(&path).unwrap(), frame);
    }

    #[test]
    fn directory_in_place_of_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = commit(&[0x00], dir.path()).unwrap_err();
        assert!(matches!(err, AppError::Read { .. }));
    }
}
