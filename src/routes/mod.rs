pub mod auth;

pub mod teacher;

pub mod student;


pub use auth::configure_auth_routes;
pub use student::configure_student_routes;
pub use teacher::configure_teacher_routes;

use actix_web::{HttpResponse, web};

use crate::utils::see_other;

// 未知路径回到根路径，由根路径按登录状态跳转
async fn fallback() -> HttpResponse {
    see_other("/")
}

/// 注册门户的全部路由（未知路径作为最后的 fallback）
pub fn configure_portal_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(configure_auth_routes)
        .configure(configure_teacher_routes)
        .configure(configure_student_routes)
        .default_service(web::to(fallback));
}
