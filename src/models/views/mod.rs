//! 页面视图模型
//!
//! 每个页面渲染为一个 JSON 文档，由前端渲染层负责绘制。

pub mod layout;
pub mod notice;
pub mod student;
pub mod teacher;
pub mod text;

pub use layout::{LoginView, NavItem, Page, Shell, View};
pub use notice::{Notice, Severity};
