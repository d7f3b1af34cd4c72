use embedded_graphics::{
    Drawable,
    prelude::{DrawTarget, Point, Primitive},
    primitives::{Line, PrimitiveStyle, Rectangle},
};

use crate::{
    assets::{FontRole, Resources},
    common::{LayoutConfig, Result, weather::CurrentConditions, weather::round_temperature},
    graphics::{Bitmap, Color},
    render::TextRenderer,
};

/// 当前天气面板：缩小的图标、"温度° 描述"、分隔线、自动换行的概要
pub struct CurrentPanel<'a> {
    region: Rectangle,
    icon: Bitmap,
    headline: String,
    headline_text: TextRenderer<'a>,
    summary_text: TextRenderer<'a>,
    summary_lines: Vec<String>,
}

impl<'a> CurrentPanel<'a> {
    /// 解析图标并完成排版；图标缺失时报错
    pub fn new(
        resources: &'a Resources,
        current: &CurrentConditions,
        daily_summary: &str,
        region: Rectangle,
    ) -> Result<Self> {
        let icon = resources
            .icon(&current.icon)?
            .downscale(LayoutConfig::CURRENT_ICON_SCALE);
        let headline = format!(
            "{}° {}",
            round_temperature(current.temperature),
            current.summary
        );

        let mut panel = Self {
            region,
            icon,
            headline,
            headline_text: TextRenderer::new(resources.font(FontRole::Medium), Color::Ink),
            summary_text: TextRenderer::new(resources.font(FontRole::Small), Color::Ink),
            summary_lines: Vec::new(),
        };

        let lines = panel
            .summary_text
            .wrap_words(daily_summary, region.size.width);
        let fitting = (0..lines.len())
            .take_while(|&index| {
                let bottom = panel.summary_line_top(index) + panel.summary_text.line_height() as i32;
                bottom <= panel.summary_limit()
            })
            .count();
        if fitting < lines.len() {
            log::debug!(
                "Summary wrapped to {} lines, dropping {} that overlap the forecast",
                lines.len(),
                lines.len() - fitting
            );
        }
        panel.summary_lines = lines.into_iter().take(fitting).collect();

        Ok(panel)
    }

    pub fn summary_lines(&self) -> &[String] {
        &self.summary_lines
    }

    fn header_height(&self) -> u32 {
        self.icon.height().max(self.headline_text.line_height())
    }

    fn divider_y(&self) -> i32 {
        self.region.top_left.y + self.header_height() as i32 + LayoutConfig::DIVIDER_GAP
    }

    fn summary_line_top(&self, index: usize) -> i32 {
        let pitch = self.summary_text.line_height() + LayoutConfig::SUMMARY_LINE_SPACING;
        self.divider_y()
            + LayoutConfig::DIVIDER_WIDTH as i32
            + LayoutConfig::DIVIDER_GAP
            + (index as u32 * pitch) as i32
    }

    /// 概要文字不能进入预报卡片区域
    fn summary_limit(&self) -> i32 {
        LayoutConfig::FORECAST_ORIGIN.y - LayoutConfig::DIVIDER_GAP
    }
}

impl Drawable for CurrentPanel<'_> {
    type Color = Color;

    type Output = ();

    fn draw<D>(&self, target: &mut D) -> core::result::Result<Self::Output, D::Error>
    where
        D: DrawTarget<Color = Self::Color>,
    {
        let Point { x, y } = self.region.top_left;

        self.icon.draw_opaque(target, Point::new(x, y))?;

        // 标题与图标垂直居中对齐
        let line_height = self.headline_text.line_height();
        let headline_y = y + (self.header_height() - line_height) as i32 / 2;
        let headline_x = x + self.icon.width() as i32 + LayoutConfig::CURRENT_TEXT_GAP;
        self.headline_text
            .draw_text(target, &self.headline, Point::new(headline_x, headline_y))?;

        let divider_y = self.divider_y();
        let right = x + self.region.size.width as i32 - 1;
        Line::new(Point::new(x, divider_y), Point::new(right, divider_y))
            .into_styled(PrimitiveStyle::with_stroke(
                Color::Ink,
                LayoutConfig::DIVIDER_WIDTH,
            ))
            .draw(target)?;

        for (index, line) in self.summary_lines.iter().enumerate() {
            self.summary_text
                .draw_text(target, line, Point::new(x, self.summary_line_top(index)))?;
        }

        Ok(())
    }
}
