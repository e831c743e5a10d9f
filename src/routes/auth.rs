use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::AccessGate;
use crate::models::session::requests::LoginRequest;
use crate::services::AuthService;

// 懒加载的全局 AuthService 实例
static AUTH_SERVICE: Lazy<AuthService> = Lazy::new(AuthService::new_lazy);

// 根路径
pub async fn home(req: HttpRequest) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.home(&req).await
}

// 登录页
pub async fn login_page(req: HttpRequest) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.login_page(&req).await
}

// 登录
pub async fn login(req: HttpRequest, form: web::Form<LoginRequest>) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.login(&req, form.into_inner()).await
}

// 注销
pub async fn logout(req: HttpRequest) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.logout(&req).await
}

// 配置路由
pub fn configure_auth_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(home))
        .service(
            web::resource("/login")
                .route(web::get().to(login_page))
                .route(web::post().to(login)),
        )
        .service(
            web::resource("/logout")
                // 注销 - 任意已登录用户
                .wrap(AccessGate::any())
                .route(web::post().to(logout)),
        );
}
