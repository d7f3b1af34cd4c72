//! 资源模块
//! 统一管理运行时加载的字体与天气图标，缺失资源直接报错

pub mod fonts;
pub mod icons;

use std::path::Path;

use log::info;

pub use fonts::{FontRole, FontSet};
pub use icons::IconSet;

use crate::common::error::Result;
use crate::graphics::icon::Bitmap;
use crate::graphics::text::Font;

/// 渲染所需的全部资源，加载后只读
pub struct Resources {
    fonts: FontSet,
    icons: IconSet,
}

impl Resources {
    pub fn new(fonts: FontSet, icons: IconSet) -> Self {
        Self { fonts, icons }
    }

    /// 从字体目录与图标目录加载
    pub fn load(fonts_dir: impl AsRef<Path>, icons_dir: impl AsRef<Path>) -> Result<Self> {
        let fonts = FontSet::load(fonts_dir.as_ref())?;
        let icons = IconSet::load_dir(icons_dir.as_ref())?;
        info!(
            "Resources ready: {} font roles, {} icons",
            FontRole::ALL.len(),
            icons.len()
        );
        Ok(Self::new(fonts, icons))
    }

    pub fn font(&self, role: FontRole) -> &dyn Font {
        self.fonts.get(role)
    }

    pub fn icon(&self, code: &str) -> Result<&Bitmap> {
        self.icons.get(code)
    }
}
