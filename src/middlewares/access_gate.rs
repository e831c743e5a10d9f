/*!
 * 基于角色的页面访问控制中间件
 *
 * 每次请求都从会话存储中读取当前会话，自身不保存任何状态。
 * 被拒绝的请求直接重定向，内层处理函数不会被调用，也就不会请求上游。
 *
 * ## 使用方法
 *
 * ```rust,ignore
 * use actix_web::{web, App};
 * use crate::middlewares::AccessGate;
 * use crate::models::views::View;
 *
 * App::new()
 *     .app_data(web::Data::new(session_store))
 *     .service(
 *         web::scope("/teacher")
 *             .wrap(AccessGate::for_view(View::TeacherDashboard))
 *             .route("/dashboard", web::get().to(dashboard)),
 *     )
 * ```
 *
 * 处理函数中通过 `AccessGate::current(&req)` 取得会话。
 */

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage, HttpRequest,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    web,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::{rc::Rc, sync::Arc};
use tracing::{info, warn};

use crate::models::session::entities::{Role, Session};
use crate::models::views::View;
use crate::session::{SessionEntry, SessionStore};
use crate::utils::{see_other, see_other_with_cookie};

pub const LOGIN_PATH: &str = "/login";

/// 访问控制的判定结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    Render,
    RedirectToLogin,
    RedirectToDefault(Role),
}

impl AccessDecision {
    /// 重定向目标，`Render` 时为 `None`
    pub fn location(&self) -> Option<&'static str> {
        match self {
            AccessDecision::Render => None,
            AccessDecision::RedirectToLogin => Some(LOGIN_PATH),
            AccessDecision::RedirectToDefault(role) => Some(role.default_view()),
        }
    }
}

/// 判定当前会话能否访问要求 `required` 角色的页面
///
/// `required` 为空表示任意已登录用户。
pub fn evaluate(session: Option<&Session>, required: &[Role]) -> AccessDecision {
    match session {
        None => AccessDecision::RedirectToLogin,
        Some(session) if !required.is_empty() && !required.contains(&session.role) => {
            AccessDecision::RedirectToDefault(session.role)
        }
        Some(_) => AccessDecision::Render,
    }
}

#[derive(Clone)]
pub struct AccessGate {
    required_roles: &'static [Role],
}

impl AccessGate {
    /// 创建需要任一指定角色的中间件
    pub fn new(roles: &'static [Role]) -> Self {
        Self {
            required_roles: roles,
        }
    }

    /// 按页面所需的角色创建中间件
    pub fn for_view(view: View) -> Self {
        Self::new(view.required_roles())
    }

    /// 任意已登录用户
    pub fn any() -> Self {
        Self { required_roles: &[] }
    }

    /// 取得通过访问控制的会话
    pub fn current(req: &HttpRequest) -> Option<Arc<SessionEntry>> {
        req.extensions().get::<Arc<SessionEntry>>().cloned()
    }

    /// 从 Cookie 中找回会话，同时返回请求是否带了会话 Cookie
    pub async fn lookup(req: &ServiceRequest) -> (Option<Arc<SessionEntry>>, bool) {
        let Some(store) = req.app_data::<web::Data<SessionStore>>() else {
            warn!("SessionStore not found in app data, treating request as anonymous");
            return (None, false);
        };
        match req.cookie(store.cookie_name()) {
            Some(cookie) => (store.resolve(cookie.value()).await, true),
            None => (None, false),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AccessGate
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = AccessGateMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AccessGateMiddleware {
            service: Rc::new(service),
            required_roles: self.required_roles,
        }))
    }
}

pub struct AccessGateMiddleware<S> {
    service: Rc<S>,
    required_roles: &'static [Role],
}

impl<S, B> Service<ServiceRequest> for AccessGateMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        let required_roles = self.required_roles;

        Box::pin(async move {
            let (entry, had_cookie) = AccessGate::lookup(&req).await;
            let decision = evaluate(entry.as_ref().map(|e| e.session()), required_roles);

            if let (AccessDecision::Render, Some(entry)) = (decision, &entry) {
                req.extensions_mut().insert(entry.clone());
                let res = srv.call(req).await?.map_into_left_body();
                return Ok(res);
            }

            let location = decision.location().unwrap_or(LOGIN_PATH);
            let response = match entry {
                Some(entry) => {
                    info!(
                        "Access denied for {} (role: {}) on {}. Required roles: {:?}",
                        entry.session().email,
                        entry.session().role,
                        req.path(),
                        required_roles
                    );
                    see_other(location)
                }
                None => {
                    info!("No session for {}, redirecting to login", req.path());
                    // Cookie 已失效时顺带清除
                    match req.app_data::<web::Data<SessionStore>>() {
                        Some(store) if had_cookie => {
                            see_other_with_cookie(location, store.removal_cookie())
                        }
                        _ => see_other(location),
                    }
                }
            };
            Ok(req.into_response(response).map_into_right_body())
        })
    }
}
