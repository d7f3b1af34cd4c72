use jiff::civil::Date;
use serde::Deserialize;

use crate::common::error::{AppError, Result};

/// 当前天气
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CurrentConditions {
    /// 图标代码（与图标资源文件名一致）
    pub icon: String,
    pub temperature: f64,
    /// 简短描述，如 "Clear"
    pub summary: String,
}

/// 单日预报
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DailyForecast {
    pub date: Date,
    pub icon: String,
    pub temperature_high: f64,
    pub temperature_low: f64,
}

/// 天气快照，获取后只读
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ForecastSnapshot {
    pub current: CurrentConditions,
    /// 长文本概要
    pub daily_summary: String,
    pub daily: Vec<DailyForecast>,
}

impl ForecastSnapshot {
    pub fn from_json(content: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(|e| AppError::DataShape(e.to_string()))
    }

    /// 检查至少有 `min_days` 条日预报
    pub fn validate(&self, min_days: usize) -> Result<()> {
        if self.daily.len() < min_days {
            return Err(AppError::DataShape(format!(
                "expected at least {} daily entries, got {}",
                min_days,
                self.daily.len()
            )));
        }
        Ok(())
    }

    /// 只保留前 `days` 条日预报
    pub fn truncated(mut self, days: usize) -> Self {
        self.daily.truncate(days);
        self
    }
}

/// 温度取整（四舍五入，远离零）
pub fn round_temperature(value: f64) -> i64 {
    value.round() as i64
}
