use std::borrow::Cow;

use embedded_graphics::{
    Drawable,
    prelude::{DrawTarget, Point, Size},
    primitives::Rectangle,
};

use crate::{
    assets::{FontRole, Resources},
    common::{
        AppError, LayoutConfig, Result,
        calendar::weekday_name,
        weather::{DailyForecast, round_temperature},
    },
    graphics::{Bitmap, Color},
    render::{TextRenderer, text_renderer::centered_left},
};

/// 单日预报卡片：星期、图标、最高温、最低温，自上而下居中排列
pub struct ForecastCard<'a> {
    origin: Point,
    weekday: &'static str,
    icon: Cow<'a, Bitmap>,
    high: String,
    low: String,
    weekday_text: TextRenderer<'a>,
    high_text: TextRenderer<'a>,
    low_text: TextRenderer<'a>,
}

impl<'a> ForecastCard<'a> {
    /// 解析图标；图标缺失时报错。图标过高时缩小到卡片能放下的高度
    pub fn new(resources: &'a Resources, day: &DailyForecast, origin: Point) -> Result<Self> {
        let high_text = TextRenderer::new(resources.font(FontRole::Medium), Color::Ink);
        let low_text = TextRenderer::new(resources.font(FontRole::MediumLight), Color::Ink);

        let icon = resources.icon(&day.icon)?;
        let budget = icon_budget(
            origin,
            high_text.line_height() + low_text.line_height(),
        )
        .ok_or_else(|| {
            AppError::Layout(format!(
                "forecast card at ({}, {}) has no room for its icon",
                origin.x, origin.y
            ))
        })?;

        let icon = if icon.height() > budget {
            let factor = icon.height().div_ceil(budget);
            log::debug!(
                "Icon '{}' is {} px tall, shrinking by {} to fit {} px",
                day.icon,
                icon.height(),
                factor,
                budget
            );
            Cow::Owned(icon.downscale(factor))
        } else {
            Cow::Borrowed(icon)
        };

        Ok(Self {
            origin,
            weekday: weekday_name(day.date.weekday()),
            icon,
            high: format!("{}°", round_temperature(day.temperature_high)),
            low: format!("{}°", round_temperature(day.temperature_low)),
            weekday_text: TextRenderer::new(resources.font(FontRole::SmallBold), Color::Ink),
            high_text,
            low_text,
        })
    }

    pub fn icon_size(&self) -> Size {
        self.icon.size()
    }

    fn center_x(&self) -> f32 {
        self.origin.x as f32 + LayoutConfig::FORECAST_CARD_WIDTH as f32 / 2.0
    }

    fn icon_top(&self) -> i32 {
        self.origin.y + LayoutConfig::FORECAST_ICON_OFFSET
    }

    fn high_top(&self) -> i32 {
        self.icon_top() + self.icon.height() as i32 + LayoutConfig::FORECAST_TEMP_GAP
    }

    fn low_top(&self) -> i32 {
        self.high_top() + self.high_text.line_height() as i32
    }

    /// 卡片占用的区域
    pub fn bounding_box(&self) -> Rectangle {
        let bottom = self.low_top() + self.low_text.line_height() as i32;
        Rectangle::new(
            self.origin,
            Size::new(
                LayoutConfig::FORECAST_CARD_WIDTH,
                (bottom - self.origin.y) as u32,
            ),
        )
    }
}

/// 卡片图标可用的最大高度：卡片底边不能超出屏幕
fn icon_budget(origin: Point, text_height: u32) -> Option<u32> {
    let used = origin.y
        + LayoutConfig::FORECAST_ICON_OFFSET
        + LayoutConfig::FORECAST_TEMP_GAP
        + text_height as i32;
    let budget = LayoutConfig::DISPLAY_HEIGHT as i32 - used;
    (budget > 0).then_some(budget as u32)
}

impl Drawable for ForecastCard<'_> {
    type Color = Color;

    type Output = ();

    fn draw<D>(&self, target: &mut D) -> core::result::Result<Self::Output, D::Error>
    where
        D: DrawTarget<Color = Self::Color>,
    {
        let center_x = self.center_x();

        self.weekday_text
            .draw_text_centered(target, self.weekday, center_x, self.origin.y)?;

        let icon_x = centered_left(center_x, self.icon.width());
        self.icon
            .draw_opaque(target, Point::new(icon_x, self.icon_top()))?;

        self.high_text
            .draw_text_centered(target, &self.high, center_x, self.high_top())?;
        self.low_text
            .draw_text_centered(target, &self.low, center_x, self.low_top())?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn icon_budget_stops_at_screen_bottom() {
        // 200 + 24 + 8 + 40 = 272，剩余 112
        assert_eq!(icon_budget(Point::new(220, 200), 40), Some(112));
        assert_eq!(icon_budget(Point::new(220, 340), 40), None);
    }
}
