//! 单色画布
//!
//! 所有绘制操作都在这里完成，越界部分静默裁剪。

use core::convert::Infallible;

use embedded_graphics::{
    prelude::*,
    primitives::{Line, PrimitiveStyle, Rectangle},
};
use image::{GrayImage, Luma};

use super::icon::Bitmap;
use super::text::Font;

/// 像素颜色，Ink 为前景（墨），Background 为底色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Ink,
    Background,
}

impl Color {
    pub fn is_ink(self) -> bool {
        self == Color::Ink
    }

    /// 预览图灰度值
    pub fn luma(self) -> u8 {
        match self {
            Color::Ink => 0x00,
            Color::Background => 0xFF,
        }
    }
}

impl PixelColor for Color {
    type Raw = ();
}

/// 画布
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    size: Size,
    pixels: Vec<Color>,
}

impl Canvas {
    /// 创建新画布，全部填充为背景色
    pub fn new(width: u32, height: u32, background: Color) -> Self {
        let len = width as usize * height as usize;
        Self {
            size: Size::new(width, height),
            pixels: vec![background; len],
        }
    }

    pub fn width(&self) -> u32 {
        self.size.width
    }

    pub fn height(&self) -> u32 {
        self.size.height
    }

    /// 填充矩形 [x0, x1) x [y0, y1)
    pub fn fill_rect(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Color) {
        if x1 <= x0 || y1 <= y0 {
            return;
        }
        let area = Rectangle::with_corners(Point::new(x0, y0), Point::new(x1 - 1, y1 - 1));
        let Ok(()) = self.fill_solid(&area, color);
    }

    /// 画线，`width` 为线宽
    pub fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Color, width: u32) {
        let Ok(()) = Line::new(Point::new(x0, y0), Point::new(x1, y1))
            .into_styled(PrimitiveStyle::with_stroke(color, width.max(1)))
            .draw(self);
    }

    /// 以左上角为锚点绘制文本
    pub fn draw_text(&mut self, x: i32, y: i32, text: &str, color: Color, font: &dyn Font) {
        let mask = font.rasterize(text);
        let Ok(()) = mask.draw_mask(self, Point::new(x, y), color);
    }

    /// 测量文本尺寸，不修改画布
    pub fn measure_text(&self, text: &str, font: &dyn Font) -> Size {
        font.measure(text)
    }

    /// 贴图：前景和背景像素都覆盖目标
    pub fn blit_image(&mut self, x: i32, y: i32, image: &Bitmap) {
        let Ok(()) = image.draw_opaque(self, Point::new(x, y));
    }

    pub fn get_pixel(&self, x: i32, y: i32) -> Option<Color> {
        self.index(x, y).map(|index| self.pixels[index])
    }

    /// 墨点数量
    pub fn ink_count(&self) -> usize {
        self.pixels.iter().filter(|color| color.is_ink()).count()
    }

    /// 按行遍历所有像素
    pub fn rows(&self) -> impl Iterator<Item = &[Color]> {
        self.pixels.chunks(self.size.width.max(1) as usize)
    }

    /// 转为灰度预览图
    pub fn to_gray_image(&self) -> GrayImage {
        GrayImage::from_fn(self.size.width, self.size.height, |x, y| {
            let color = self.pixels[(y * self.size.width + x) as usize];
            Luma([color.luma()])
        })
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 {
            return None;
        }
        let (x, y) = (x as u32, y as u32);
        if x >= self.size.width || y >= self.size.height {
            return None;
        }
        Some(y as usize * self.size.width as usize + x as usize)
    }
}

impl OriginDimensions for Canvas {
    fn size(&self) -> Size {
        self.size
    }
}

impl DrawTarget for Canvas {
    type Color = Color;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if let Some(index) = self.index(point.x, point.y) {
                self.pixels[index] = color;
            }
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.pixels.fill(color);
        Ok(())
    }
}
