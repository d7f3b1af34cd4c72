// src/tasks/mod.rs
pub mod render_task;

pub use render_task::{RenderTask, run_once, save_preview};
