use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;
use tracing::{info, warn};

use super::AuthService;
use crate::errors::PortalError;
use crate::middlewares::LOGIN_PATH;
use crate::models::session::requests::LoginRequest;
use crate::models::views::{LoginView, Page, View};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::session_store;
use crate::session::SessionEntry;
use crate::utils::{see_other, see_other_with_cookie};

/// 浏览器已持有的有效会话
async fn signed_in(request: &HttpRequest) -> ActixResult<Option<Arc<SessionEntry>>> {
    let store = session_store(request)?;
    let Some(cookie) = request.cookie(store.cookie_name()) else {
        return Ok(None);
    };
    Ok(store.resolve(cookie.value()).await)
}

fn login_failure(email: String, err: &PortalError, message: String) -> HttpResponse {
    let body = LoginView {
        email,
        error: Some(message.clone()),
    };
    HttpResponse::build(err.status_code()).json(ApiResponse::error(
        ErrorCode::from(err),
        Page::new(View::Login, None, None, body),
        message,
    ))
}

pub async fn login_page(request: &HttpRequest) -> ActixResult<HttpResponse> {
    // 已登录用户直接进入自己的首页
    if let Some(entry) = signed_in(request).await? {
        return Ok(see_other(entry.session().role.default_view()));
    }

    let page = Page::new(View::Login, None, None, LoginView::default());
    Ok(HttpResponse::Ok().json(ApiResponse::success(page, View::Login.title())))
}

pub async fn handle_login(
    service: &AuthService,
    request: &HttpRequest,
    form: LoginRequest,
) -> ActixResult<HttpResponse> {
    let LoginRequest { email, password } = form;
    let email = email.trim().to_string();

    if email.is_empty() || password.is_empty() {
        let err = PortalError::validation_failed("Email and password are required");
        let message = err.message().to_string();
        return Ok(login_failure(email, &err, message));
    }

    let api = service.get_api(request)?;
    let credentials = LoginRequest {
        email: email.clone(),
        password,
    };

    match api.login(&credentials).await {
        Ok(grant) => {
            let store = session_store(request)?;
            let role = grant.user.role;
            let (entry, cookie) = store.open(grant).await?;
            info!("User {} logged in as {}", entry.session().email, role);
            Ok(see_other_with_cookie(role.default_view(), cookie))
        }
        Err(e) => {
            warn!("Login failed for {}: {}", email, e);
            let message = e.surface("Login failed");
            Ok(login_failure(email, &e, message))
        }
    }
}

pub async fn home(request: &HttpRequest) -> ActixResult<HttpResponse> {
    match signed_in(request).await? {
        Some(entry) => Ok(see_other(entry.session().role.default_view())),
        None => Ok(see_other(LOGIN_PATH)),
    }
}
