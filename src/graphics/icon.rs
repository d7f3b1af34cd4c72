//! 1bit 位图（天气图标、文字光栅）
//!
//! 行优先存储，每行按字节对齐，字节内高位在前，置位表示墨点。

use embedded_graphics::prelude::*;
use image::DynamicImage;

use super::canvas::Color;

/// 亮度低于此值视为墨点
pub const LUMA_THRESHOLD: u8 = 128;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    size: Size,
    bytes_per_row: usize,
    data: Vec<u8>,
}

impl Bitmap {
    /// 全空白位图
    pub fn new(size: Size) -> Self {
        let bytes_per_row = (size.width as usize).div_ceil(8);
        Self {
            size,
            bytes_per_row,
            data: vec![0; bytes_per_row * size.height as usize],
        }
    }

    /// 按亮度阈值二值化，完全透明的像素视为背景
    pub fn from_image(image: &DynamicImage) -> Self {
        let gray = image.to_luma_alpha8();
        let mut bitmap = Self::new(Size::new(gray.width(), gray.height()));
        for (x, y, pixel) in gray.enumerate_pixels() {
            let [luma, alpha] = pixel.0;
            if alpha > 0 && luma < LUMA_THRESHOLD {
                bitmap.set(x, y, true);
            }
        }
        bitmap
    }

    pub fn width(&self) -> u32 {
        self.size.width
    }

    pub fn height(&self) -> u32 {
        self.size.height
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn set(&mut self, x: u32, y: u32, ink: bool) {
        if x >= self.size.width || y >= self.size.height {
            return;
        }
        let index = y as usize * self.bytes_per_row + x as usize / 8;
        let mask = 0x80 >> (x % 8);
        if ink {
            self.data[index] |= mask;
        } else {
            self.data[index] &= !mask;
        }
    }

    pub fn is_ink(&self, x: u32, y: u32) -> bool {
        if x >= self.size.width || y >= self.size.height {
            return false;
        }
        let index = y as usize * self.bytes_per_row + x as usize / 8;
        self.data[index] & (0x80 >> (x % 8)) != 0
    }

    pub fn color_at(&self, x: u32, y: u32) -> Color {
        if self.is_ink(x, y) {
            Color::Ink
        } else {
            Color::Background
        }
    }

    /// 把 `other` 的墨点合并到 (x, y) 处
    pub fn merge(&mut self, other: &Bitmap, x: i32, y: i32) {
        for (point, _) in other.ink_points() {
            let target = point + Point::new(x, y);
            if target.x >= 0 && target.y >= 0 {
                self.set(target.x as u32, target.y as u32, true);
            }
        }
    }

    /// 最近邻缩小，`factor` 为缩小倍数
    pub fn downscale(&self, factor: u32) -> Bitmap {
        let factor = factor.max(1);
        let size = Size::new(
            (self.size.width / factor).max(1),
            (self.size.height / factor).max(1),
        );
        let mut scaled = Bitmap::new(size);
        for y in 0..size.height {
            for x in 0..size.width {
                if self.is_ink(x * factor, y * factor) {
                    scaled.set(x, y, true);
                }
            }
        }
        scaled
    }

    /// 所有墨点（相对左上角）
    pub fn ink_points(&self) -> impl Iterator<Item = (Point, Color)> + '_ {
        self.pixels().filter(|(_, color)| color.is_ink())
    }

    /// 所有像素（相对左上角）
    pub fn pixels(&self) -> impl Iterator<Item = (Point, Color)> + '_ {
        let Size { width, height } = self.size;
        (0..height).flat_map(move |y| {
            (0..width).map(move |x| (Point::new(x as i32, y as i32), self.color_at(x, y)))
        })
    }

    /// 不透明绘制：墨点和背景都写入
    pub fn draw_opaque<D>(&self, target: &mut D, position: Point) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Color>,
    {
        target.draw_iter(
            self.pixels()
                .map(|(point, color)| Pixel(point + position, color)),
        )
    }

    /// 蒙版绘制：只把墨点以 `color` 写入
    pub fn draw_mask<D>(&self, target: &mut D, position: Point, color: Color) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Color>,
    {
        target.draw_iter(
            self.ink_points()
                .map(|(point, _)| Pixel(point + position, color)),
        )
    }
}

impl OriginDimensions for Bitmap {
    fn size(&self) -> Size {
        self.size
    }
}

// 文字光栅化时直接作为绘制目标
impl DrawTarget for Bitmap {
    type Color = Color;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if point.x >= 0 && point.y >= 0 {
                self.set(point.x as u32, point.y as u32, color.is_ink());
            }
        }
        Ok(())
    }
}
