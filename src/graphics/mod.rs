// src/graphics/mod.rs

//! 画布、位图、字体与帧缓冲打包

pub mod buffer;
pub mod canvas;
pub mod icon;
pub mod text;

pub use buffer::{PackedFrame, pack};
pub use canvas::{Canvas, Color};
pub use icon::Bitmap;
pub use text::{Font, MonoFont, TrueTypeFont};
