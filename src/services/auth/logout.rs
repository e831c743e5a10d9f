use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::middlewares::LOGIN_PATH;
use crate::services::{current_session, session_store};
use crate::utils::see_other_with_cookie;

/// 处理用户登出
/// 销毁会话并通过空 Cookie 清除浏览器的登录状态
pub async fn handle_logout(request: &HttpRequest) -> ActixResult<HttpResponse> {
    let entry = current_session(request)?;
    let store = session_store(request)?;

    store.close(entry.id()).await;

    Ok(see_other_with_cookie(LOGIN_PATH, store.removal_cookie()))
}
