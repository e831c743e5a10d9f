//! 会话上下文
//!
//! 登录时创建，注销时销毁，以 `web::Data<SessionStore>` 的形式显式传给
//! 访问控制中间件与各页面。

pub mod entry;
pub mod store;

pub use entry::{SessionEntry, ViewTicket};
pub use store::{SessionSettings, SessionStore};
