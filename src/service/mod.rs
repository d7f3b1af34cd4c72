// src/service/mod.rs

//! 服务模块 - 提供应用核心业务逻辑服务
//!
//! 天气快照来源与帧缓冲的变化检测提交。

pub mod frame_service;
pub mod weather_service;

pub use frame_service::{CommitOutcome, Fingerprint, FrameService, commit};
pub use weather_service::{ForecastSource, JsonForecastSource, StaticForecastSource};
