//! 文字光栅化
//!
//! 渲染部分只依赖 [`Font`]：测量文本、把文本光栅化为 1bit 蒙版。
//! TrueType 字体基于 fontdue，点阵字体基于 embedded-graphics 的 mono_font。

use std::fs;
use std::path::Path;

use embedded_graphics::{
    mono_font::{MonoFont as EgMonoFont, MonoTextStyle},
    prelude::*,
    text::{Baseline, Text, renderer::TextRenderer},
};
use fontdue::FontSettings;

use super::canvas::Color;
use super::icon::{Bitmap, LUMA_THRESHOLD};
use crate::common::error::{AppError, Result};

/// 字体能力
pub trait Font {
    /// 文本的像素尺寸（宽度为排版宽度，高度为行高）
    fn measure(&self, text: &str) -> Size;

    /// 行高
    fn line_height(&self) -> u32;

    /// 把文本光栅化为与 `measure` 同尺寸的蒙版，左上角为原点
    fn rasterize(&self, text: &str) -> Bitmap;
}

/// TrueType 字体（固定像素大小）
pub struct TrueTypeFont {
    font: fontdue::Font,
    px: f32,
    ascent: i32,
    line_height: u32,
}

impl TrueTypeFont {
    pub fn load(path: impl AsRef<Path>, px: f32) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read(path).map_err(|source| AppError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_bytes(&data, px).map_err(|e| match e {
            AppError::FontLoad { reason, .. } => AppError::FontLoad {
                path: path.to_path_buf(),
                reason,
            },
            other => other,
        })
    }

    pub fn from_bytes(data: &[u8], px: f32) -> Result<Self> {
        let settings = FontSettings {
            scale: px,
            ..FontSettings::default()
        };
        let font = fontdue::Font::from_bytes(data, settings).map_err(|reason| {
            AppError::FontLoad {
                path: Default::default(),
                reason: reason.to_string(),
            }
        })?;

        let (ascent, line_height) = match font.horizontal_line_metrics(px) {
            Some(metrics) => (
                metrics.ascent.round() as i32,
                (metrics.ascent - metrics.descent).ceil() as u32,
            ),
            None => (px.round() as i32, px.ceil() as u32),
        };

        Ok(Self {
            font,
            px,
            ascent,
            line_height,
        })
    }

    /// 每个字符的起始 x（已取整）及总宽度
    fn pen_positions(&self, text: &str) -> (Vec<i32>, u32) {
        let mut pen = 0.0f32;
        let mut positions = Vec::with_capacity(text.len());
        for c in text.chars() {
            positions.push(pen.round() as i32);
            pen += self.font.metrics(c, self.px).advance_width;
        }
        (positions, pen.round().max(0.0) as u32)
    }
}

impl Font for TrueTypeFont {
    fn measure(&self, text: &str) -> Size {
        let (_, width) = self.pen_positions(text);
        Size::new(width, self.line_height)
    }

    fn line_height(&self) -> u32 {
        self.line_height
    }

    fn rasterize(&self, text: &str) -> Bitmap {
        let (positions, width) = self.pen_positions(text);
        let mut line = Bitmap::new(Size::new(width, self.line_height));

        for (c, pen_x) in text.chars().zip(positions) {
            let (metrics, coverage) = self.font.rasterize(c, self.px);
            if metrics.width == 0 || metrics.height == 0 {
                continue;
            }

            let mut glyph = Bitmap::new(Size::new(metrics.width as u32, metrics.height as u32));
            for (row, values) in coverage.chunks(metrics.width).enumerate() {
                for (col, &value) in values.iter().enumerate() {
                    if value >= LUMA_THRESHOLD {
                        glyph.set(col as u32, row as u32, true);
                    }
                }
            }

            // fontdue 的 ymin 是字形底边相对基线的偏移（向上为正）
            let x = pen_x + metrics.xmin;
            let y = self.ascent - (metrics.ymin + metrics.height as i32);
            line.merge(&glyph, x, y);
        }

        line
    }
}

/// embedded-graphics 点阵字体
pub struct MonoFont {
    font: &'static EgMonoFont<'static>,
}

impl MonoFont {
    pub const fn new(font: &'static EgMonoFont<'static>) -> Self {
        Self { font }
    }

    fn style(&self) -> MonoTextStyle<'static, Color> {
        MonoTextStyle::new(self.font, Color::Ink)
    }
}

impl Font for MonoFont {
    fn measure(&self, text: &str) -> Size {
        let metrics = self
            .style()
            .measure_string(text, Point::zero(), Baseline::Top);
        Size::new(metrics.bounding_box.size.width, self.line_height())
    }

    fn line_height(&self) -> u32 {
        self.font.character_size.height
    }

    fn rasterize(&self, text: &str) -> Bitmap {
        let mut mask = Bitmap::new(self.measure(text));
        let Ok(_) = Text::with_baseline(text, Point::zero(), self.style(), Baseline::Top)
            .draw(&mut mask);
        mask
    }
}
