// src/render/mod.rs
pub mod components;

mod render_engine;
pub use render_engine::{Dashboard, RenderEngine, forecast_card_origin};

pub mod text_renderer;
pub use text_renderer::TextRenderer;
