// src/service/weather_service.rs
use std::fs;
use std::path::PathBuf;

use log::{debug, info};

use crate::common::error::{AppError, Result};
use crate::common::weather::ForecastSnapshot;

/// 天气数据源：返回固定结构的快照
pub trait ForecastSource {
    fn fetch(&mut self) -> Result<ForecastSnapshot>;
}

/// 从本地 JSON 文件读取快照
pub struct JsonForecastSource {
    path: PathBuf,
}

impl JsonForecastSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ForecastSource for JsonForecastSource {
    fn fetch(&mut self) -> Result<ForecastSnapshot> {
        debug!("Reading forecast snapshot from {}", self.path.display());
        let content = fs::read_to_string(&self.path).map_err(|source| AppError::Read {
            path: self.path.clone(),
            source,
        })?;
        let snapshot = ForecastSnapshot::from_json(&content)?;
        info!(
            "Forecast snapshot loaded: {} daily entries, current '{}'",
            snapshot.daily.len(),
            snapshot.current.icon
        );
        Ok(snapshot)
    }
}

/// 总是返回同一份快照，供测试或离线渲染使用
pub struct StaticForecastSource {
    snapshot: ForecastSnapshot,
}

impl StaticForecastSource {
    pub fn new(snapshot: ForecastSnapshot) -> Self {
        Self { snapshot }
    }
}

impl ForecastSource for StaticForecastSource {
    fn fetch(&mut self) -> Result<ForecastSnapshot> {
        Ok(self.snapshot.clone())
    }
}
