//! 帧缓冲区打包（1bit/像素，墨水屏原生格式）
//!
//! 像素按行优先排成连续位流：第 n = x + y * W 个像素位于字节 n / 8，
//! 掩码为 `0x80 >> (n % 8)`。W 为 8 的倍数时等价于 `0x80 >> (x % 8)`。
//! 置位表示墨点，末尾不足一字节的填充位保持为 0。

use std::ops::Deref;

use super::canvas::Canvas;

/// 参考分辨率下的缓冲区大小（640*384 / 8 = 30720字节）
pub const REFERENCE_BUFFER_SIZE: usize = 640 * 384 / 8;

/// 打包后的帧缓冲区
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackedFrame {
    width: u32,
    height: u32,
    buffer: Vec<u8>,
}

/// 缓冲区长度：ceil(W*H/8)
pub fn packed_len(width: u32, height: u32) -> usize {
    (width as usize * height as usize).div_ceil(8)
}

/// 像素所在字节及掩码
pub fn bit_position(width: u32, x: u32, y: u32) -> (usize, u8) {
    let n = x as usize + y as usize * width as usize;
    (n / 8, 0x80 >> (n % 8))
}

/// 把画布打包为墨水屏帧缓冲
pub fn pack(canvas: &Canvas) -> PackedFrame {
    let width = canvas.width();
    let height = canvas.height();
    let mut buffer = vec![0x00; packed_len(width, height)];

    for (y, row) in canvas.rows().enumerate() {
        for (x, color) in row.iter().enumerate() {
            if color.is_ink() {
                let (index, mask) = bit_position(width, x as u32, y as u32);
                buffer[index] |= mask;
            }
        }
    }

    PackedFrame {
        width,
        height,
        buffer,
    }
}

impl PackedFrame {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// 读取像素是否为墨点
    pub fn is_ink(&self, x: u32, y: u32) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        let (index, mask) = bit_position(self.width, x, y);
        self.buffer[index] & mask != 0
    }
}

impl Deref for PackedFrame {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        &self.buffer
    }
}

impl AsRef<[u8]> for PackedFrame {
    fn as_ref(&self) -> &[u8] {
        &self.buffer
    }
}
