// src/common/config.rs
use std::fs;
use std::path::{Path, PathBuf};

use embedded_graphics::geometry::{Point, Size};
use embedded_graphics::primitives::Rectangle;
use serde::Deserialize;

use crate::common::error::{AppError, Result};

/// 屏幕布局常量（640x384 单色墨水屏）
pub struct LayoutConfig;

impl LayoutConfig {
    pub const DISPLAY_WIDTH: u32 = 640;
    pub const DISPLAY_HEIGHT: u32 = 384;

    // 左栏（反色）与右栏
    pub const LEFT_COLUMN_WIDTH: u32 = 200;
    pub const COLUMN_GUTTER: u32 = 20;
    pub const RIGHT_COLUMN_X: i32 = (Self::LEFT_COLUMN_WIDTH + Self::COLUMN_GUTTER) as i32;
    pub const RIGHT_COLUMN_WIDTH: u32 =
        Self::DISPLAY_WIDTH - Self::LEFT_COLUMN_WIDTH - Self::COLUMN_GUTTER;

    // 区域定义
    pub const TODAY_REGION: Rectangle =
        Rectangle::new(Point::new(0, 20), Size::new(Self::LEFT_COLUMN_WIDTH, 200));

    pub const CALENDAR_REGION: Rectangle =
        Rectangle::new(Point::new(0, 240), Size::new(Self::LEFT_COLUMN_WIDTH, 140));

    pub const CURRENT_REGION: Rectangle = Rectangle::new(
        Point::new(Self::RIGHT_COLUMN_X + 10, 16),
        Size::new(Self::RIGHT_COLUMN_WIDTH - 20, 176),
    );

    pub const FORECAST_ORIGIN: Point = Point::new(Self::RIGHT_COLUMN_X, 200);

    // 今日信息各行相对区域顶部的偏移
    pub const TODAY_WEEKDAY_OFFSET: i32 = 0;
    pub const TODAY_DAY_OFFSET: i32 = 40;
    pub const TODAY_MONTH_OFFSET: i32 = 120;

    pub const CALENDAR_ROW_HEIGHT: u32 = 20;

    // 预报卡片
    pub const FORECAST_DAYS: usize = 3;
    pub const FORECAST_CARD_WIDTH: u32 = 140;
    pub const FORECAST_CARD_PITCH: u32 = Self::FORECAST_CARD_WIDTH;
    pub const FORECAST_ICON_OFFSET: i32 = 24;
    pub const FORECAST_TEMP_GAP: i32 = 8;

    // 当前天气面板
    pub const CURRENT_ICON_SCALE: u32 = 2;
    pub const CURRENT_TEXT_GAP: i32 = 12;
    pub const DIVIDER_GAP: i32 = 8;
    pub const DIVIDER_WIDTH: u32 = 2;
    pub const SUMMARY_LINE_SPACING: u32 = 2;
}

/// 一周的第一天
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FirstWeekday {
    #[default]
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl From<FirstWeekday> for jiff::civil::Weekday {
    fn from(day: FirstWeekday) -> Self {
        use jiff::civil::Weekday;
        match day {
            FirstWeekday::Sunday => Weekday::Sunday,
            FirstWeekday::Monday => Weekday::Monday,
            FirstWeekday::Tuesday => Weekday::Tuesday,
            FirstWeekday::Wednesday => Weekday::Wednesday,
            FirstWeekday::Thursday => Weekday::Thursday,
            FirstWeekday::Friday => Weekday::Friday,
            FirstWeekday::Saturday => Weekday::Saturday,
        }
    }
}

/// 日志级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// 运行配置（config.json），所有字段均有默认值
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// 天气快照文件
    pub snapshot_path: PathBuf,
    /// 字体目录
    pub fonts_dir: PathBuf,
    /// 天气图标目录（文件名即图标代码）
    pub icons_dir: PathBuf,
    /// 调试用预览图
    pub preview_path: PathBuf,
    /// 墨水屏帧缓冲输出
    pub framebuffer_path: PathBuf,
    pub first_weekday: FirstWeekday,
    pub log_level: LogLevel,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            snapshot_path: PathBuf::from("forecast.json"),
            fonts_dir: PathBuf::from("fonts"),
            icons_dir: PathBuf::from("img"),
            preview_path: PathBuf::from("../output.png"),
            framebuffer_path: PathBuf::from("../output.bin"),
            first_weekday: FirstWeekday::default(),
            log_level: LogLevel::default(),
        }
    }
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| AppError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(|e| AppError::Config(e.to_string()))
    }
}
