pub mod auth;
pub mod student;
pub mod teacher;

pub use auth::AuthService;
pub use student::StudentService;
pub use teacher::TeacherService;

use actix_web::{HttpRequest, HttpResponse, web};
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

use crate::client::PortalApi;
use crate::errors::{PortalError, Result};
use crate::middlewares::{AccessGate, LOGIN_PATH};
use crate::models::assignments::entities::Assignment;
use crate::models::views::{Notice, Page, Shell, View};
use crate::models::{ApiResponse, ErrorCode};
use crate::session::{SessionEntry, SessionStore, ViewTicket};
use crate::utils::{see_other, see_other_with_cookie};

/// 从 app data 中取得上游客户端
pub(crate) fn portal_api(
    preset: &Option<Arc<dyn PortalApi>>,
    request: &HttpRequest,
) -> Result<Arc<dyn PortalApi>> {
    if let Some(api) = preset {
        return Ok(api.clone());
    }
    request
        .app_data::<web::Data<Arc<dyn PortalApi>>>()
        .map(|api| api.get_ref().clone())
        .ok_or_else(|| PortalError::configuration("PortalApi not found in app data"))
}

pub(crate) fn session_store(request: &HttpRequest) -> Result<web::Data<SessionStore>> {
    request
        .app_data::<web::Data<SessionStore>>()
        .cloned()
        .ok_or_else(|| PortalError::configuration("SessionStore not found in app data"))
}

/// 通过访问控制后的会话
pub(crate) fn current_session(request: &HttpRequest) -> Result<Arc<SessionEntry>> {
    AccessGate::current(request)
        .ok_or_else(|| PortalError::unauthenticated("Authentication required"))
}

/// 渲染页面，同时取走待展示的提示
pub(crate) fn render<T: Serialize>(entry: &SessionEntry, view: View, body: T) -> HttpResponse {
    let (_, notice) = entry.enter_view();
    let page = Page::new(view, Some(Shell::for_session(entry.session())), notice, body);
    HttpResponse::Ok().json(ApiResponse::success(page, view.title()))
}

/// 以错误状态渲染页面，错误文本作为本页的提示
pub(crate) fn render_failure<T: Serialize>(
    entry: &SessionEntry,
    view: View,
    body: T,
    err: &PortalError,
    message: String,
) -> HttpResponse {
    entry.enter_view();
    let page = Page::new(
        view,
        Some(Shell::for_session(entry.session())),
        Some(Notice::error(message.clone())),
        body,
    );
    HttpResponse::build(err.status_code()).json(ApiResponse::error(
        ErrorCode::from(err),
        page,
        message,
    ))
}

/// 上游报告令牌失效：注销会话并回到登录页
pub(crate) async fn expire_session(request: &HttpRequest, entry: &SessionEntry) -> HttpResponse {
    info!(
        "Upstream rejected the token of {}, closing session",
        entry.session().email
    );
    match session_store(request) {
        Ok(store) => {
            store.close(entry.id()).await;
            see_other_with_cookie(LOGIN_PATH, store.removal_cookie())
        }
        Err(e) => {
            warn!("{}", e);
            see_other(LOGIN_PATH)
        }
    }
}

/// 操作完成后写入提示并重定向回页面
///
/// 若操作期间用户已打开其他页面，提示被丢弃。
pub(crate) fn redirect_with_notice(
    entry: &SessionEntry,
    ticket: ViewTicket,
    notice: Notice,
    location: &str,
) -> HttpResponse {
    if !entry.post_notice(ticket, notice) {
        info!(
            "Discarded notice for {}: a newer view was rendered",
            entry.session().email
        );
    }
    see_other(location)
}

/// 上游拒绝访问：带着提示回到调用者自己的首页，不渲染被拒绝的页面
///
/// 首页本身拉取失败时不走这里，否则会重定向回自身。
pub(crate) fn redirect_home(
    entry: &SessionEntry,
    ticket: ViewTicket,
    err: &PortalError,
    fallback: &str,
) -> HttpResponse {
    let session = entry.session();
    info!("Upstream denied {} (role: {}): {}", session.email, session.role, err);
    redirect_with_notice(
        entry,
        ticket,
        Notice::error(err.surface(fallback)),
        session.role.default_view(),
    )
}

/// 上游返回的时间戳与状态不一致时记录警告，门户不做修正
pub(crate) fn audit_timestamps<'a>(assignments: impl IntoIterator<Item = &'a Assignment>) {
    for assignment in assignments {
        if !assignment.timestamps_consistent() {
            warn!(
                "Assignment {} has timestamps inconsistent with status {}",
                assignment.id, assignment.status
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::session::entities::{Role, Session};
    use actix_web::http::StatusCode;

    fn entry() -> SessionEntry {
        SessionEntry::new(
            Session {
                id: "s1".into(),
                name: "Sam Lee".into(),
                email: "sam@school.test".into(),
                role: Role::Student,
            },
            "student-token".into(),
        )
    }

    #[test]
    fn test_notice_reaches_next_view() {
        let entry = entry();
        let ticket = entry.current_ticket();
        let resp = redirect_with_notice(
            &entry,
            ticket,
            Notice::success("Answer submitted successfully!"),
            "/student/dashboard",
        );
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);

        let (_, notice) = entry.enter_view();
        assert_eq!(
            notice.map(|n| n.message),
            Some("Answer submitted successfully!".to_string())
        );
        assert!(entry.enter_view().1.is_none());
    }

    #[test]
    fn test_stale_ticket_discards_notice() {
        let entry = entry();
        let ticket = entry.current_ticket();
        // 操作完成前用户打开了另一个页面
        entry.enter_view();
        redirect_with_notice(
            &entry,
            ticket,
            Notice::error("Failed to submit answer"),
            "/student/dashboard",
        );
        assert!(entry.enter_view().1.is_none());
    }

    #[test]
    fn test_denied_view_goes_home() {
        let entry = entry();
        let ticket = entry.current_ticket();
        let err = PortalError::forbidden("Not authorized to access this assignment");
        let resp = redirect_home(&entry, ticket, &err, "Failed to load assignment");
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            resp.headers().get(actix_web::http::header::LOCATION).unwrap(),
            "/student/dashboard"
        );
        assert_eq!(
            entry.enter_view().1.map(|n| n.message),
            Some("Not authorized to access this assignment".to_string())
        );
    }

    #[test]
    fn test_render_consumes_notice() {
        let entry = entry();
        entry.post_notice(entry.current_ticket(), Notice::success("Done"));
        let resp = render(&entry, View::MySubmissions, ());
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(entry.enter_view().1.is_none());
    }
}
