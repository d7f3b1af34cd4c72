//! 墨水屏天气日历看板渲染
//!
//! 把天气快照与当天日期排版到 640x384 单色画布，打包为墨水屏原生 1bit 帧缓冲，
//! 仅在内容变化时写入存储。

pub mod assets;
pub mod common;
pub mod driver;
pub mod graphics;
pub mod render;
pub mod service;
pub mod tasks;

pub use common::error::{AppError, Result};
