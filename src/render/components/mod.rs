// src/render/components/mod.rs

pub mod calendar_component;
pub mod date_component;
pub mod forecast_component;
pub mod weather_component;

pub use calendar_component::CalendarGrid;
pub use date_component::TodayHeader;
pub use forecast_component::ForecastCard;
pub use weather_component::CurrentPanel;
