pub mod login;
pub mod logout;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::client::PortalApi;
use crate::errors::Result;
use crate::models::session::requests::LoginRequest;

pub struct AuthService {
    api: Option<Arc<dyn PortalApi>>,
}

impl AuthService {
    pub fn new_lazy() -> Self {
        Self { api: None }
    }

    pub(crate) fn get_api(&self, request: &HttpRequest) -> Result<Arc<dyn PortalApi>> {
        super::portal_api(&self.api, request)
    }

    // 登录页
    pub async fn login_page(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        login::login_page(request).await
    }

    // 登录
    pub async fn login(
        &self,
        request: &HttpRequest,
        form: LoginRequest,
    ) -> ActixResult<HttpResponse> {
        login::handle_login(self, request, form).await
    }

    // 注销
    pub async fn logout(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        logout::handle_logout(request).await
    }

    // 根路径：按登录状态跳转
    pub async fn home(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        login::home(request).await
    }
}
