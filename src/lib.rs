//! Assignment Portal - 作业门户前端服务
//!
//! 基于 Actix Web 构建，面向教师与学生的作业门户。门户本身不保存业务数据，
//! 全部读写经由上游作业 REST API 完成。
//!
//! # 架构
//! - `client`: 上游 REST API 客户端
//! - `config`: 配置管理
//! - `errors`: 统一错误处理
//! - `middlewares`: 基于角色的页面访问控制
//! - `models`: 数据模型与页面视图模型
//! - `routes`: 页面路由层
//! - `runtime`: 运行时生命周期管理
//! - `services`: 页面与操作的处理逻辑
//! - `session`: 进程内会话存储
//! - `utils`: 工具函数

pub mod client;
pub mod config;
pub mod errors;
pub mod middlewares;
pub mod models;
pub mod routes;
pub mod runtime;
pub mod services;
pub mod session;
pub mod utils;
