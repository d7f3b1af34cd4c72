//! 天气图标：图标目录下的 PNG，文件名（不含扩展名）即图标代码

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use log::{debug, info};

use crate::common::error::{AppError, Result};
use crate::graphics::icon::Bitmap;

#[derive(Debug, Clone, Default)]
pub struct IconSet {
    icons: HashMap<String, Bitmap>,
}

impl IconSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// 加载目录中全部 `*.png`
    pub fn load_dir(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        let read_err = |source| AppError::Read {
            path: dir.to_path_buf(),
            source,
        };

        let mut set = Self::new();
        for entry in fs::read_dir(dir).map_err(read_err)? {
            let path = entry.map_err(read_err)?.path();
            let is_png = path
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("png"));
            if !is_png {
                continue;
            }
            let Some(code) = path.file_stem().and_then(|stem| stem.to_str()) else {
                continue;
            };

            let image = image::open(&path).map_err(|source| AppError::Image {
                path: path.clone(),
                source,
            })?;
            let bitmap = Bitmap::from_image(&image);
            debug!(
                "Loaded icon '{}' ({}x{})",
                code,
                bitmap.width(),
                bitmap.height()
            );
            set.insert(code, bitmap);
        }

        info!("Loaded {} icons from {}", set.len(), dir.display());
        Ok(set)
    }

    pub fn insert(&mut self, code: impl Into<String>, bitmap: Bitmap) {
        self.icons.insert(code.into(), bitmap);
    }

    /// 查找图标，缺失即报错
    pub fn get(&self, code: &str) -> Result<&Bitmap> {
        self.icons
            .get(code)
            .ok_or_else(|| AppError::icon_missing(code))
    }

    pub fn len(&self) -> usize {
        self.icons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.icons.is_empty()
    }
}
