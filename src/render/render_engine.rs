use embedded_graphics::Drawable;
use embedded_graphics::prelude::{DrawTarget, Point, Size};
use embedded_graphics::primitives::Rectangle;
use jiff::civil::{Date, Weekday};
use log::{debug, info};

use crate::assets::Resources;
use crate::common::LayoutConfig;
use crate::common::error::Result;
use crate::common::weather::ForecastSnapshot;
use crate::graphics::{Canvas, Color};
use crate::render::components::{CalendarGrid, CurrentPanel, ForecastCard, TodayHeader};

/// 第 `index` 张预报卡片的左上角
pub fn forecast_card_origin(index: usize) -> Point {
    let pitch = (LayoutConfig::FORECAST_CARD_PITCH * index as u32) as i32;
    LayoutConfig::FORECAST_ORIGIN + Point::new(pitch, 0)
}

/// 渲染引擎 - 把天气快照与日期排版到画布上
pub struct RenderEngine<'a> {
    resources: &'a Resources,
    first_weekday: Weekday,
}

/// 排版完成、图标均已解析的整屏内容
pub struct Dashboard<'a> {
    today: TodayHeader<'a>,
    calendar: CalendarGrid<'a>,
    current: CurrentPanel<'a>,
    forecast: Vec<ForecastCard<'a>>,
}

impl<'a> RenderEngine<'a> {
    pub fn new(resources: &'a Resources, first_weekday: Weekday) -> Self {
        Self {
            resources,
            first_weekday,
        }
    }

    /// 排版：校验数据并解析全部图标，不进行任何绘制
    pub fn layout(&self, snapshot: &ForecastSnapshot, today: Date) -> Result<Dashboard<'a>> {
        snapshot.validate(LayoutConfig::FORECAST_DAYS)?;
        if snapshot.daily.len() > LayoutConfig::FORECAST_DAYS {
            debug!(
                "Snapshot carries {} daily entries, laying out the first {}",
                snapshot.daily.len(),
                LayoutConfig::FORECAST_DAYS
            );
        }

        let current = CurrentPanel::new(
            self.resources,
            &snapshot.current,
            &snapshot.daily_summary,
            LayoutConfig::CURRENT_REGION,
        )?;

        let forecast = snapshot.daily[..LayoutConfig::FORECAST_DAYS]
            .iter()
            .enumerate()
            .map(|(index, day)| ForecastCard::new(self.resources, day, forecast_card_origin(index)))
            .collect::<Result<Vec<_>>>()?;

        Ok(Dashboard {
            today: TodayHeader::new(
                self.resources,
                today,
                LayoutConfig::TODAY_REGION,
                Color::Background,
            ),
            calendar: CalendarGrid::new(
                self.resources,
                today,
                self.first_weekday,
                LayoutConfig::CALENDAR_REGION,
                Color::Background,
            ),
            current,
            forecast,
        })
    }

    /// 渲染整屏
    pub fn render(&self, snapshot: &ForecastSnapshot, today: Date) -> Result<Canvas> {
        let dashboard = self.layout(snapshot, today)?;

        let mut canvas = Canvas::new(
            LayoutConfig::DISPLAY_WIDTH,
            LayoutConfig::DISPLAY_HEIGHT,
            Color::Background,
        );
        let Ok(()) = dashboard.draw(&mut canvas);

        info!(
            "Rendered dashboard for {} ({} ink pixels)",
            today,
            canvas.ink_count()
        );
        Ok(canvas)
    }
}

impl<'a> Dashboard<'a> {
    pub fn current(&self) -> &CurrentPanel<'a> {
        &self.current
    }

    pub fn forecast(&self) -> &[ForecastCard<'a>] {
        &self.forecast
    }
}

impl Drawable for Dashboard<'_> {
    type Color = Color;

    type Output = ();

    fn draw<D>(&self, target: &mut D) -> core::result::Result<Self::Output, D::Error>
    where
        D: DrawTarget<Color = Self::Color>,
    {
        // 左栏反色
        let left_column = Rectangle::new(
            Point::zero(),
            Size::new(LayoutConfig::LEFT_COLUMN_WIDTH, LayoutConfig::DISPLAY_HEIGHT),
        );
        target.fill_solid(&left_column, Color::Ink)?;

        self.today.draw(target)?;
        self.calendar.draw(target)?;
        self.current.draw(target)?;
        for card in &self.forecast {
            card.draw(target)?;
        }

        Ok(())
    }
}
