// src/common/error.rs
use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// 缺失资源的类别
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Font,
    Icon,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceKind::Font => f.write_str("font"),
            ResourceKind::Icon => f.write_str("icon"),
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Missing {kind} resource: {key}")]
    ResourceMissing { kind: ResourceKind, key: String },

    #[error("Malformed forecast data: {0}")]
    DataShape(String),

    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to load font {}: {reason}", path.display())]
    FontLoad { path: PathBuf, reason: String },

    #[error("Image error for {}: {source}", path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Layout error: {0}")]
    Layout(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    pub fn icon_missing(code: &str) -> Self {
        AppError::ResourceMissing {
            kind: ResourceKind::Icon,
            key: code.to_string(),
        }
    }

    pub fn font_missing(key: impl Into<String>) -> Self {
        AppError::ResourceMissing {
            kind: ResourceKind::Font,
            key: key.into(),
        }
    }
}

pub type Result<T> = core::result::Result<T, AppError>;
