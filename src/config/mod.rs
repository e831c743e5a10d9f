//! 配置管理
//!
//! 配置来源优先级（从低到高）：内置默认值 → `config.toml` → `config.<APP_ENV>.toml` →
//! `PORTAL_<SECTION>__<KEY>` 环境变量 → 少量常用的短环境变量（如 `API_BASE_URL`、`SESSION_SECRET`）。

mod r#impl;
mod structs;

pub use structs::*;
