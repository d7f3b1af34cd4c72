// src/common/mod.rs

/// 公共模块定义
///
/// 配置、错误处理、月历与天气快照等公共组件
pub mod calendar;
pub mod config;
pub mod error;
pub mod weather;

pub use config::{Config, LayoutConfig};
pub use error::{AppError, Result};
pub use weather::{CurrentConditions, DailyForecast, ForecastSnapshot};
