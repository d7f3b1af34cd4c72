use embedded_graphics::{
    Drawable,
    prelude::{DrawTarget, Point},
    primitives::Rectangle,
};
use jiff::civil::{Date, Weekday};

use crate::{
    assets::{FontRole, Resources},
    common::{LayoutConfig, calendar::MonthGrid},
    graphics::Color,
    render::TextRenderer,
};

/// 月历：首行为星期首字母，其后每周一行，相邻月份的格子留空
pub struct CalendarGrid<'a> {
    grid: MonthGrid,
    region: Rectangle,
    header_text: TextRenderer<'a>,
    day_text: TextRenderer<'a>,
}

impl<'a> CalendarGrid<'a> {
    pub fn new(
        resources: &'a Resources,
        today: Date,
        first_weekday: Weekday,
        region: Rectangle,
        color: Color,
    ) -> Self {
        Self {
            grid: MonthGrid::new(today, first_weekday),
            region,
            header_text: TextRenderer::new(resources.font(FontRole::SmallBold), color),
            day_text: TextRenderer::new(resources.font(FontRole::Small), color),
        }
    }

    /// 第 `column` 列的中心（列宽为容器宽度的七分之一）
    pub fn column_center(&self, column: usize) -> f32 {
        let column_width = self.region.size.width as f32 / 7.0;
        self.region.top_left.x as f32 + column_width * (column as f32 + 0.5)
    }

    /// 第 `row` 行的顶部，第 0 行为表头
    pub fn row_top(&self, row: usize) -> i32 {
        self.region.top_left.y + (row as u32 * LayoutConfig::CALENDAR_ROW_HEIGHT) as i32
    }
}

impl Drawable for CalendarGrid<'_> {
    type Color = Color;

    type Output = ();

    fn draw<D>(&self, target: &mut D) -> Result<Self::Output, D::Error>
    where
        D: DrawTarget<Color = Self::Color>,
    {
        let Point { y, .. } = self.region.top_left;
        for (column, letter) in self.grid.header().into_iter().enumerate() {
            self.header_text
                .draw_text_centered(target, letter, self.column_center(column), y)?;
        }

        for (row, week) in self.grid.weeks().iter().enumerate() {
            let top = self.row_top(row + 1);
            for (column, day) in week.iter().enumerate() {
                let Some(day) = day else {
                    continue;
                };
                self.day_text.draw_text_centered(
                    target,
                    &day.to_string(),
                    self.column_center(column),
                    top,
                )?;
            }
        }

        Ok(())
    }
}
