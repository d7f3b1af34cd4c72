use embedded_graphics::{
    Drawable,
    prelude::{DrawTarget, Point},
    primitives::Rectangle,
};
use jiff::civil::Date;

use crate::{
    assets::{FontRole, Resources},
    common::{
        LayoutConfig,
        calendar::{month_name, weekday_name},
    },
    graphics::Color,
    render::TextRenderer,
};

/// 今日信息：星期、日期（大号粗体）、月份，水平居中
pub struct TodayHeader<'a> {
    date: Date,
    region: Rectangle,
    name_text: TextRenderer<'a>,
    day_text: TextRenderer<'a>,
}

impl<'a> TodayHeader<'a> {
    pub fn new(resources: &'a Resources, date: Date, region: Rectangle, color: Color) -> Self {
        Self {
            date,
            region,
            name_text: TextRenderer::new(resources.font(FontRole::MediumLight), color),
            day_text: TextRenderer::new(resources.font(FontRole::LargeBold), color),
        }
    }

    fn center_x(&self) -> f32 {
        self.region.top_left.x as f32 + self.region.size.width as f32 / 2.0
    }
}

impl Drawable for TodayHeader<'_> {
    type Color = Color;

    type Output = ();

    fn draw<D>(&self, target: &mut D) -> Result<Self::Output, D::Error>
    where
        D: DrawTarget<Color = Self::Color>,
    {
        let Point { y, .. } = self.region.top_left;
        let center_x = self.center_x();

        self.name_text.draw_text_centered(
            target,
            weekday_name(self.date.weekday()),
            center_x,
            y + LayoutConfig::TODAY_WEEKDAY_OFFSET,
        )?;
        self.day_text.draw_text_centered(
            target,
            &self.date.day().to_string(),
            center_x,
            y + LayoutConfig::TODAY_DAY_OFFSET,
        )?;
        self.name_text.draw_text_centered(
            target,
            month_name(self.date),
            center_x,
            y + LayoutConfig::TODAY_MONTH_OFFSET,
        )?;

        Ok(())
    }
}
