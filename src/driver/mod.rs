// src/driver/mod.rs
pub mod storage;
