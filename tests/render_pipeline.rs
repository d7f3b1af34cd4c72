use std::fs;

use embedded_graphics::mono_font::iso_8859_1::{FONT_6X10, FONT_10X20};
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use jiff::civil::{Weekday, date};

use epd_dashboard::AppError;
use epd_dashboard::assets::{FontRole, FontSet, IconSet, Resources};
use epd_dashboard::common::LayoutConfig;
use epd_dashboard::common::error::ResourceKind;
use epd_dashboard::common::weather::{CurrentConditions, DailyForecast, ForecastSnapshot};
use epd_dashboard::driver::storage::{FileFrameStorage, FrameStorage};
use epd_dashboard::graphics::{Bitmap, Color, Font, MonoFont, pack};
use epd_dashboard::render::RenderEngine;
use epd_dashboard::service::{CommitOutcome, StaticForecastSource};
use epd_dashboard::tasks::RenderTask;

const ICON_SIZE: u32 = 64;
const ICON_CODES: [&str; 4] = ["clear-day", "rain", "cloudy", "partly-cloudy-day"];

fn solid_icon(size: u32) -> Bitmap {
    let mut icon = Bitmap::new(Size::new(size, size));
    for y in 0..size {
        for x in 0..size {
            icon.set(x, y, true);
        }
    }
    icon
}

fn resources() -> Resources {
    resources_with_icons(ICON_SIZE)
}

fn resources_with_icons(icon_size: u32) -> Resources {
    let fonts = FontSet::from_fn(|role| -> Box<dyn Font> {
        match role {
            FontRole::Small | FontRole::SmallBold => Box::new(MonoFont::new(&FONT_6X10)),
            _ => Box::new(MonoFont::new(&FONT_10X20)),
        }
    });
    let mut icons = IconSet::new();
    for code in ICON_CODES {
        icons.insert(code, solid_icon(icon_size));
    }
    Resources::new(fonts, icons)
}

fn day(d: i8, icon: &str, high: f64, low: f64) -> DailyForecast {
    DailyForecast {
        date: date(2026, 10, d),
        icon: icon.to_string(),
        temperature_high: high,
        temperature_low: low,
    }
}

fn snapshot(daily: Vec<DailyForecast>) -> ForecastSnapshot {
    ForecastSnapshot {
        current: CurrentConditions {
            icon: "partly-cloudy-day".to_string(),
            temperature: 17.6,
            summary: "Partly Cloudy".to_string(),
        },
        daily_summary: "Light rain on Wednesday, with high temperatures falling to 12°C \
                        on Friday."
            .to_string(),
        daily,
    }
}

fn three_days() -> ForecastSnapshot {
    snapshot(vec![
        day(19, "clear-day", 18.4, 9.5),
        day(20, "rain", 14.0, 8.2),
        day(21, "cloudy", 12.6, 6.0),
    ])
}

/// 记录写入次数的内存存储
#[derive(Default)]
struct CountingStorage {
    frame: Option<Vec<u8>>,
    writes: usize,
}

impl FrameStorage for CountingStorage {
    fn read_frame(&mut self) -> epd_dashboard::Result<Option<Vec<u8>>> {
        Ok(self.frame.clone())
    }

    fn write_frame(&mut self, data: &[u8]) -> epd_dashboard::Result<()> {
        self.frame = Some(data.to_vec());
        self.writes += 1;
        Ok(())
    }
}

#[test]
fn forecast_cards_are_laid_out_left_to_right() {
    let resources = resources();
    let engine = RenderEngine::new(&resources, Weekday::Sunday);
    let dashboard = engine.layout(&three_days(), date(2026, 10, 19)).unwrap();

    let screen = Rectangle::new(
        Point::zero(),
        Size::new(LayoutConfig::DISPLAY_WIDTH, LayoutConfig::DISPLAY_HEIGHT),
    );
    let cards = dashboard.forecast();
    assert_eq!(cards.len(), 3);
    for (index, card) in cards.iter().enumerate() {
        let bounds = card.bounding_box();
        assert_eq!(bounds.top_left, Point::new(220 + 140 * index as i32, 200));
        assert_eq!(bounds.size.width, 140);
        let bottom_right = bounds.bottom_right().unwrap();
        assert!(screen.contains(bounds.top_left));
        assert!(screen.contains(bottom_right));
    }
}

#[test]
fn oversized_icons_are_shrunk_to_fit_the_screen() {
    let resources = resources_with_icons(128);
    let engine = RenderEngine::new(&resources, Weekday::Sunday);
    let dashboard = engine.layout(&three_days(), date(2026, 10, 19)).unwrap();

    for card in dashboard.forecast() {
        // 剩余高度 384 - (200 + 24 + 8 + 20 + 20) = 112，128 缩小一半
        assert_eq!(card.icon_size(), Size::new(64, 64));
        let bounds = card.bounding_box();
        assert_eq!(bounds.size.height, 24 + 64 + 8 + 40);
        let bottom = bounds.bottom_right().unwrap().y;
        assert!(bottom < LayoutConfig::DISPLAY_HEIGHT as i32, "bottom = {bottom}");
    }

    // 最低温一行完整落在屏幕内
    let canvas = engine.render(&three_days(), date(2026, 10, 19)).unwrap();
    let low_row_ink = (220..640)
        .flat_map(|x| (316..336).map(move |y| (x, y)))
        .filter(|&(x, y)| canvas.get_pixel(x, y) == Some(Color::Ink))
        .count();
    assert!(low_row_ink > 0);
}

#[test]
fn icons_that_fit_are_drawn_at_full_size() {
    let resources = resources();
    let engine = RenderEngine::new(&resources, Weekday::Sunday);
    let dashboard = engine.layout(&three_days(), date(2026, 10, 19)).unwrap();
    for card in dashboard.forecast() {
        assert_eq!(card.icon_size(), Size::new(ICON_SIZE, ICON_SIZE));
    }
}

#[test]
fn rendered_dashboard_has_frame_and_cards() {
    let resources = resources();
    let engine = RenderEngine::new(&resources, Weekday::Sunday);
    let canvas = engine.render(&three_days(), date(2026, 10, 19)).unwrap();

    assert_eq!(canvas.width(), 640);
    assert_eq!(canvas.height(), 384);
    // 左栏反色，间隔与右栏为背景
    assert_eq!(canvas.get_pixel(1, 1), Some(Color::Ink));
    assert_eq!(canvas.get_pixel(199, 383), Some(Color::Ink));
    assert_eq!(canvas.get_pixel(210, 10), Some(Color::Background));
    assert_eq!(canvas.get_pixel(639, 0), Some(Color::Background));

    // 每张卡片的图标居中于卡片
    for index in 0..3 {
        let center_x = 290 + 140 * index;
        assert_eq!(canvas.get_pixel(center_x, 256), Some(Color::Ink));
        assert_eq!(canvas.get_pixel(center_x - 33, 256), Some(Color::Background));
    }

    // 左栏上有以背景色绘制的文字
    let left_column_background = (0..200)
        .flat_map(|x| (0..384).map(move |y| (x, y)))
        .filter(|&(x, y)| canvas.get_pixel(x, y) == Some(Color::Background))
        .count();
    assert!(left_column_background > 0);
}

#[test]
fn extra_daily_entries_are_not_rendered() {
    let resources = resources();
    let engine = RenderEngine::new(&resources, Weekday::Monday);
    let mut data = three_days();
    data.daily.push(day(22, "rain", 11.0, 5.0));
    data.daily.push(day(23, "rain", 10.0, 4.0));

    let dashboard = engine.layout(&data, date(2026, 10, 19)).unwrap();
    assert_eq!(dashboard.forecast().len(), 3);
}

#[test]
fn unknown_icon_fails_before_drawing() {
    let resources = resources();
    let engine = RenderEngine::new(&resources, Weekday::Sunday);
    let mut data = three_days();
    data.daily[2].icon = "tornado".to_string();

    match engine.render(&data, date(2026, 10, 19)) {
        Err(AppError::ResourceMissing { kind, key }) => {
            assert_eq!(kind, ResourceKind::Icon);
            assert_eq!(key, "tornado");
        }
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("rendering must fail on an unknown icon"),
    }
}

#[test]
fn too_few_daily_entries_is_a_data_shape_error() {
    let resources = resources();
    let engine = RenderEngine::new(&resources, Weekday::Sunday);
    let data = snapshot(vec![day(19, "rain", 14.0, 8.0), day(20, "rain", 13.0, 7.0)]);

    let err = engine.render(&data, date(2026, 10, 19)).err().unwrap();
    assert!(matches!(err, AppError::DataShape(_)));
}

#[test]
fn long_summary_stops_above_the_forecast() {
    let resources = resources();
    let engine = RenderEngine::new(&resources, Weekday::Sunday);
    let mut data = three_days();
    data.daily_summary = "Rain and drizzle all week long. ".repeat(40);

    let dashboard = engine.layout(&data, date(2026, 10, 19)).unwrap();
    let lines = dashboard.current().summary_lines();
    assert!(!lines.is_empty());

    let small = resources.font(FontRole::Small);
    let all_lines = epd_dashboard::render::TextRenderer::new(small, Color::Ink)
        .wrap_words(&data.daily_summary, LayoutConfig::CURRENT_REGION.size.width);
    assert!(lines.len() < all_lines.len());
    assert_eq!(lines, &all_lines[..lines.len()]);

    // 概要区不得与预报卡片重叠
    let canvas = engine.render(&data, date(2026, 10, 19)).unwrap();
    let limit = LayoutConfig::FORECAST_ORIGIN.y - LayoutConfig::DIVIDER_GAP;
    for y in limit..LayoutConfig::FORECAST_ORIGIN.y {
        for x in 220..640 {
            assert_eq!(canvas.get_pixel(x, y), Some(Color::Background), "({x}, {y})");
        }
    }
}

#[test]
fn rendering_is_deterministic() {
    let resources = resources();
    let engine = RenderEngine::new(&resources, Weekday::Sunday);
    let first = pack(&engine.render(&three_days(), date(2026, 10, 19)).unwrap());
    let second = pack(&engine.render(&three_days(), date(2026, 10, 19)).unwrap());
    assert_eq!(first, second);
    assert_eq!(first.len(), 640 * 384 / 8);
}

#[test]
fn pipeline_writes_once_for_unchanged_input() {
    let mut task = RenderTask::new(
        StaticForecastSource::new(three_days()),
        resources(),
        CountingStorage::default(),
    );

    assert_eq!(task.run(date(2026, 10, 19)).unwrap(), CommitOutcome::Written);
    assert_eq!(task.run(date(2026, 10, 19)).unwrap(), CommitOutcome::Unchanged);
    assert_eq!(task.frames().storage().writes, 1);

    // 日期变化导致画面变化
    assert_eq!(task.run(date(2026, 10, 20)).unwrap(), CommitOutcome::Written);
    assert_eq!(task.frames().storage().writes, 2);
}

#[test]
fn pipeline_writes_framebuffer_and_preview_files() {
    let dir = tempfile::tempdir().unwrap();
    let frame_path = dir.path().join("output.bin");
    let preview_path = dir.path().join("output.png");

    let mut task = RenderTask::new(
        StaticForecastSource::new(three_days()),
        resources(),
        FileFrameStorage::new(&frame_path),
    )
    .with_preview(&preview_path);

    assert_eq!(task.run(date(2026, 10, 19)).unwrap(), CommitOutcome::Written);
    let written = fs::read(&frame_path).unwrap();
    assert_eq!(written.len(), 30720);
    // 左上角属于反色左栏
    assert_eq!(written[0] & 0x80, 0x80);

    let preview = image::open(&preview_path).unwrap().to_luma8();
    assert_eq!(preview.dimensions(), (640, 384));
    assert_eq!(preview.get_pixel(1, 1).0, [0]);
    assert_eq!(preview.get_pixel(639, 0).0, [255]);

    let modified = fs::metadata(&frame_path).unwrap().modified().unwrap();
    assert_eq!(task.run(date(2026, 10, 19)).unwrap(), CommitOutcome::Unchanged);
    assert_eq!(
        fs::metadata(&frame_path).unwrap().modified().unwrap(),
        modified
    );
}
