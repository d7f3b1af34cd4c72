//! 字体资源：按用途分为六种固定角色

use std::io;
use std::path::Path;

use log::debug;

use crate::common::error::{AppError, Result};
use crate::graphics::text::{Font, TrueTypeFont};

/// 字体角色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontRole {
    Small,
    SmallBold,
    Medium,
    MediumLight,
    Large,
    LargeBold,
}

impl FontRole {
    pub const ALL: [FontRole; 6] = [
        FontRole::Small,
        FontRole::SmallBold,
        FontRole::Medium,
        FontRole::MediumLight,
        FontRole::Large,
        FontRole::LargeBold,
    ];

    /// 字体目录中的文件名
    pub fn file_name(self) -> &'static str {
        match self {
            FontRole::Small | FontRole::Medium | FontRole::Large => "helvetica.ttf",
            FontRole::SmallBold | FontRole::LargeBold => "helveticabold.ttf",
            FontRole::MediumLight => "helveticalight.ttf",
        }
    }

    /// 像素大小
    pub fn pixel_size(self) -> f32 {
        match self {
            FontRole::Small | FontRole::SmallBold => 12.0,
            FontRole::Medium | FontRole::MediumLight => 32.0,
            FontRole::Large | FontRole::LargeBold => 72.0,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            FontRole::Small => "small",
            FontRole::SmallBold => "small-bold",
            FontRole::Medium => "medium",
            FontRole::MediumLight => "medium-light",
            FontRole::Large => "large",
            FontRole::LargeBold => "large-bold",
        }
    }
}

/// 完整字体集，每个角色必有一个字体
pub struct FontSet {
    small: Box<dyn Font>,
    small_bold: Box<dyn Font>,
    medium: Box<dyn Font>,
    medium_light: Box<dyn Font>,
    large: Box<dyn Font>,
    large_bold: Box<dyn Font>,
}

impl FontSet {
    /// 按角色逐个构造字体
    pub fn try_from_fn<F>(mut load: F) -> Result<Self>
    where
        F: FnMut(FontRole) -> Result<Box<dyn Font>>,
    {
        Ok(Self {
            small: load(FontRole::Small)?,
            small_bold: load(FontRole::SmallBold)?,
            medium: load(FontRole::Medium)?,
            medium_light: load(FontRole::MediumLight)?,
            large: load(FontRole::Large)?,
            large_bold: load(FontRole::LargeBold)?,
        })
    }

    pub fn from_fn<F>(mut make: F) -> Self
    where
        F: FnMut(FontRole) -> Box<dyn Font>,
    {
        Self {
            small: make(FontRole::Small),
            small_bold: make(FontRole::SmallBold),
            medium: make(FontRole::Medium),
            medium_light: make(FontRole::MediumLight),
            large: make(FontRole::Large),
            large_bold: make(FontRole::LargeBold),
        }
    }

    /// 从字体目录加载 TrueType 字体
    pub fn load(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        Self::try_from_fn(|role| {
            let path = dir.join(role.file_name());
            debug!("Loading {} font from {}", role.name(), path.display());
            match TrueTypeFont::load(&path, role.pixel_size()) {
                Ok(font) => Ok(Box::new(font) as Box<dyn Font>),
                Err(AppError::Read { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
                    Err(AppError::font_missing(format!(
                        "{} ({})",
                        role.file_name(),
                        role.name()
                    )))
                }
                Err(e) => Err(e),
            }
        })
    }

    pub fn get(&self, role: FontRole) -> &dyn Font {
        match role {
            FontRole::Small => self.small.as_ref(),
            FontRole::SmallBold => self.small_bold.as_ref(),
            FontRole::Medium => self.medium.as_ref(),
            FontRole::MediumLight => self.medium_light.as_ref(),
            FontRole::Large => self.large.as_ref(),
            FontRole::LargeBold => self.large_bold.as_ref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphics::text::MonoFont;
    use embedded_graphics::mono_font::iso_8859_1::{FONT_6X10, FONT_10X20};

    #[test]
    fn roles_map_to_font_files() {
        assert_eq!(FontRole::LargeBold.file_name(), "helveticabold.ttf");
        assert_eq!(FontRole::LargeBold.pixel_size(), 72.0);
        assert_eq!(FontRole::MediumLight.file_name(), "helveticalight.ttf");
        assert_eq!(FontRole::Small.pixel_size(), 12.0);
    }

    #[test]
    fn get_returns_font_for_each_role() {
        let fonts = FontSet::from_fn(|role| -> Box<dyn Font> {
            match role {
                FontRole::Small | FontRole::SmallBold => Box::new(MonoFont::new(&FONT_6X10)),
                _ => Box::new(MonoFont::new(&FONT_10X20)),
            }
        });
        assert_eq!(fonts.get(FontRole::Small).line_height(), 10);
        assert_eq!(fonts.get(FontRole::LargeBold).line_height(), 20);
    }

    #[test]
    fn missing_font_file_names_the_role() {
        let dir = tempfile::tempdir().unwrap();
        let err = FontSet::load(dir.path()).err().unwrap();
        match err {
            AppError::ResourceMissing { key, .. } => {
                assert_eq!(key, "helvetica.ttf (small)");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
