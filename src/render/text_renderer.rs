//! 文本渲染器：单行、居中与按单词贪心换行

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use crate::graphics::canvas::Color;
use crate::graphics::text::Font;

/// 居中文本的左边缘，向下取整
pub fn centered_left(center_x: f32, width: u32) -> i32 {
    (center_x - width as f32 / 2.0).floor() as i32
}

// 文本渲染器
#[derive(Clone, Copy)]
pub struct TextRenderer<'a> {
    font: &'a dyn Font,
    color: Color,
}

impl<'a> TextRenderer<'a> {
    pub fn new(font: &'a dyn Font, color: Color) -> Self {
        Self { font, color }
    }

    pub fn font(&self) -> &'a dyn Font {
        self.font
    }

    pub fn line_height(&self) -> u32 {
        self.font.line_height()
    }

    pub fn measure(&self, text: &str) -> Size {
        self.font.measure(text)
    }

    /// 以左上角为锚点绘制单行文本，返回占用区域
    pub fn draw_text<D>(
        &self,
        target: &mut D,
        text: &str,
        position: Point,
    ) -> Result<Rectangle, D::Error>
    where
        D: DrawTarget<Color = Color>,
    {
        let mask = self.font.rasterize(text);
        mask.draw_mask(target, position, self.color)?;
        Ok(Rectangle::new(position, mask.size()))
    }

    /// 以 `center_x` 为中心绘制单行文本
    pub fn draw_text_centered<D>(
        &self,
        target: &mut D,
        text: &str,
        center_x: f32,
        y: i32,
    ) -> Result<Rectangle, D::Error>
    where
        D: DrawTarget<Color = Color>,
    {
        let width = self.font.measure(text).width;
        self.draw_text(target, text, Point::new(centered_left(center_x, width), y))
    }

    /// 按单词贪心换行
    ///
    /// 每个单词连同一个尾随空格计宽；累计宽度达到或超过 `max_width` 时，
    /// 在该单词之前断行，并以该单词的宽度重新开始累计。不拆分单词，不产生空行。
    pub fn wrap_words(&self, text: &str, max_width: u32) -> Vec<String> {
        let mut lines = Vec::new();
        let mut line = String::new();
        let mut line_width = 0u32;

        for word in text.split_whitespace() {
            let word_width = self.font.measure(&format!("{word} ")).width;
            if !line.is_empty() && line_width + word_width >= max_width {
                lines.push(std::mem::take(&mut line));
                line_width = 0;
            }
            if !line.is_empty() {
                line.push(' ');
            }
            line.push_str(word);
            line_width += word_width;
        }

        if !line.is_empty() {
            lines.push(line);
        }
        lines
    }
}
