// src/tasks/render_task.rs
use std::path::{Path, PathBuf};

use jiff::civil::{Date, Weekday};
use log::{info, warn};

use crate::assets::Resources;
use crate::common::LayoutConfig;
use crate::common::config::Config;
use crate::common::error::{AppError, Result};
use crate::driver::storage::{FileFrameStorage, FrameStorage};
use crate::graphics::{Canvas, pack};
use crate::render::RenderEngine;
use crate::service::{CommitOutcome, ForecastSource, FrameService, JsonForecastSource};

/// 一次完整渲染：获取快照 → 排版绘制 → 预览图 → 打包 → 变化检测写入
pub struct RenderTask<F: ForecastSource, S: FrameStorage> {
    source: F,
    resources: Resources,
    frames: FrameService<S>,
    first_weekday: Weekday,
    preview_path: Option<PathBuf>,
}

impl<F: ForecastSource, S: FrameStorage> RenderTask<F, S> {
    pub fn new(source: F, resources: Resources, storage: S) -> Self {
        Self {
            source,
            resources,
            frames: FrameService::new(storage),
            first_weekday: Weekday::Sunday,
            preview_path: None,
        }
    }

    pub fn with_first_weekday(mut self, first_weekday: Weekday) -> Self {
        self.first_weekday = first_weekday;
        self
    }

    pub fn with_preview(mut self, path: impl Into<PathBuf>) -> Self {
        self.preview_path = Some(path.into());
        self
    }

    pub fn frames(&self) -> &FrameService<S> {
        &self.frames
    }

    pub fn run(&mut self, today: Date) -> Result<CommitOutcome> {
        let snapshot = self.source.fetch()?;
        snapshot.validate(LayoutConfig::FORECAST_DAYS)?;
        let snapshot = snapshot.truncated(LayoutConfig::FORECAST_DAYS);

        let canvas =
            RenderEngine::new(&self.resources, self.first_weekday).render(&snapshot, today)?;

        if let Some(path) = &self.preview_path {
            // 预览图仅用于调试，失败不影响帧缓冲
            if let Err(e) = save_preview(&canvas, path) {
                warn!("Preview not saved: {}", e);
            }
        }

        let packed = pack(&canvas);
        self.frames.commit(&packed)
    }
}

/// 保存灰度预览图（格式由扩展名决定）
pub fn save_preview(canvas: &Canvas, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    canvas
        .to_gray_image()
        .save(path)
        .map_err(|source| AppError::Image {
            path: path.to_path_buf(),
            source,
        })?;
    info!("Preview saved to {}", path.display());
    Ok(())
}

/// 按配置执行一次渲染
pub fn run_once(config: &Config, today: Date) -> Result<CommitOutcome> {
    let resources = Resources::load(&config.fonts_dir, &config.icons_dir)?;
    let mut task = RenderTask::new(
        JsonForecastSource::new(&config.snapshot_path),
        resources,
        FileFrameStorage::new(&config.framebuffer_path),
    )
    .with_first_weekday(config.first_weekday.into())
    .with_preview(&config.preview_path);

    let outcome = task.run(today)?;
    info!(
        "Render finished: {:?} ({})",
        outcome,
        config.framebuffer_path.display()
    );
    Ok(outcome)
}
