//! 墨水屏看板渲染程序主入口

use std::io;

use log::{info, warn};

use epd_dashboard::AppError;
use epd_dashboard::common::Config;
use epd_dashboard::tasks::run_once;

const DEFAULT_CONFIG_PATH: &str = "config.json";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());

    // 配置文件不存在时使用默认配置，其他错误直接退出
    let (config, fallback) = match Config::load(&config_path) {
        Ok(config) => (config, false),
        Err(AppError::Read { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
            (Config::default(), true)
        }
        Err(e) => return Err(e.into()),
    };

    // 初始化日志，RUST_LOG 优先于配置
    env_logger::Builder::new()
        .filter_level(config.log_level.into())
        .parse_default_env()
        .init();

    info!("EPD dashboard renderer starting");
    if fallback {
        warn!("{} not found, using default configuration", config_path);
    }

    let today = jiff::Zoned::now().date();
    let outcome = run_once(&config, today)?;
    info!("Done: {:?}", outcome);

    Ok(())
}
