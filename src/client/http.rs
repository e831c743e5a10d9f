use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};

use super::PortalApi;
use crate::config::ApiConfig;
use crate::errors::{PortalError, Result};
use crate::models::{
    assignments::{
        entities::{Assignment, StudentAssignment},
        requests::{CreateAssignmentPayload, StatusChangePayload, UpdateAssignmentPayload},
        status::AssignmentStatus,
    },
    common::envelope::{UpstreamEnvelope, UpstreamFailure},
    session::requests::{LoginGrant, LoginRequest},
    submissions::{
        entities::Submission,
        requests::{NewSubmissionPayload, ReviewRequest},
    },
};

/// 决定失败状态码如何归类
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Endpoint {
    General,
    StatusChange,
}

/// 将上游的失败响应归类为 `PortalError`，`message` 原样保留
fn classify_failure(status: StatusCode, message: &str, endpoint: Endpoint) -> PortalError {
    match status {
        StatusCode::UNAUTHORIZED => PortalError::unauthenticated(message),
        StatusCode::FORBIDDEN => PortalError::forbidden(message),
        StatusCode::NOT_FOUND => PortalError::not_found(message),
        StatusCode::BAD_REQUEST | StatusCode::CONFLICT | StatusCode::UNPROCESSABLE_ENTITY
            if endpoint == Endpoint::StatusChange =>
        {
            PortalError::invalid_transition(message)
        }
        _ => PortalError::upstream(message),
    }
}

/// 基于 reqwest 的上游客户端
pub struct HttpPortalApi {
    client: Client,
    base_url: String,
}

impl HttpPortalApi {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_millis(config.connect_timeout))
            .timeout(Duration::from_millis(config.request_timeout))
            .build()
            .map_err(|e| PortalError::configuration(format!("Failed to build HTTP client: {e}")))?;

        debug!("Upstream API client initialized for {}", config.base_url);
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn request(&self, method: Method, path: &str, token: Option<&str>) -> RequestBuilder {
        let builder = self
            .client
            .request(method, format!("{}{}", self.base_url, path));
        match token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// 发出请求，成功时返回原始响应体
    async fn execute(&self, builder: RequestBuilder, endpoint: Endpoint) -> Result<String> {
        let response = builder.send().await?;
        let status = response.status();
        let url = response.url().path().to_string();
        let body = response.text().await?;

        if status.is_success() {
            debug!("Upstream {} -> {}", url, status);
            return Ok(body);
        }

        let failure = UpstreamFailure::parse(&body);
        let err = classify_failure(status, failure.message(), endpoint);
        warn!("Upstream {} failed with {}: {}", url, status, err);
        Err(err)
    }

    /// 发出请求并取出 `data`
    async fn fetch<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
        endpoint: Endpoint,
    ) -> Result<T> {
        let body = self.execute(builder, endpoint).await?;
        let envelope: UpstreamEnvelope<T> = serde_json::from_str(&body)?;
        envelope
            .data
            .ok_or_else(|| PortalError::serialization("Upstream response is missing data"))
    }
}

#[async_trait::async_trait]
impl PortalApi for HttpPortalApi {
    async fn login(&self, credentials: &LoginRequest) -> Result<LoginGrant> {
        let builder = self
            .request(Method::POST, "/auth/login", None)
            .json(credentials);
        self.fetch(builder, Endpoint::General).await
    }

    async fn list_teacher_assignments(
        &self,
        token: &str,
        status: Option<AssignmentStatus>,
    ) -> Result<Vec<Assignment>> {
        let mut builder = self.request(Method::GET, "/assignments/teacher", Some(token));
        if let Some(status) = status {
            builder = builder.query(&[("status", status.as_str())]);
        }
        self.fetch(builder, Endpoint::General).await
    }

    async fn list_student_assignments(&self, token: &str) -> Result<Vec<StudentAssignment>> {
        let builder = self.request(Method::GET, "/assignments/student", Some(token));
        self.fetch(builder, Endpoint::General).await
    }

    async fn get_assignment(&self, token: &str, id: &str) -> Result<Assignment> {
        let builder = self.request(Method::GET, &format!("/assignments/{id}"), Some(token));
        self.fetch(builder, Endpoint::General).await
    }

    async fn create_assignment(
        &self,
        token: &str,
        payload: &CreateAssignmentPayload,
    ) -> Result<Assignment> {
        let builder = self
            .request(Method::POST, "/assignments", Some(token))
            .json(payload);
        self.fetch(builder, Endpoint::General).await
    }

    async fn update_assignment(
        &self,
        token: &str,
        id: &str,
        payload: &UpdateAssignmentPayload,
    ) -> Result<Assignment> {
        let builder = self
            .request(Method::PUT, &format!("/assignments/{id}"), Some(token))
            .json(payload);
        self.fetch(builder, Endpoint::General).await
    }

    async fn update_assignment_status(
        &self,
        token: &str,
        id: &str,
        status: AssignmentStatus,
    ) -> Result<Assignment> {
        let builder = self
            .request(Method::PUT, &format!("/assignments/{id}/status"), Some(token))
            .json(&StatusChangePayload { status });
        self.fetch(builder, Endpoint::StatusChange).await
    }

    async fn delete_assignment(&self, token: &str, id: &str) -> Result<()> {
        let builder = self.request(Method::DELETE, &format!("/assignments/{id}"), Some(token));
        self.execute(builder, Endpoint::General).await.map(|_| ())
    }

    async fn list_assignment_submissions(
        &self,
        token: &str,
        assignment_id: &str,
    ) -> Result<Vec<Submission>> {
        let builder = self.request(
            Method::GET,
            &format!("/assignments/{assignment_id}/submissions"),
            Some(token),
        );
        self.fetch(builder, Endpoint::General).await
    }

    async fn create_submission(
        &self,
        token: &str,
        payload: &NewSubmissionPayload,
    ) -> Result<Submission> {
        let builder = self
            .request(Method::POST, "/submissions", Some(token))
            .json(payload);
        self.fetch(builder, Endpoint::General).await
    }

    async fn list_my_submissions(&self, token: &str) -> Result<Vec<Submission>> {
        let builder = self.request(Method::GET, "/submissions/my", Some(token));
        self.fetch(builder, Endpoint::General).await
    }

    async fn review_submission(
        &self,
        token: &str,
        submission_id: &str,
        review: &ReviewRequest,
    ) -> Result<Submission> {
        let builder = self
            .request(Method::PUT, &format!("/submissions/{submission_id}"), Some(token))
            .json(review);
        self.fetch(builder, Endpoint::General).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_endpoint_rejections_are_transitions() {
        for status in [
            StatusCode::BAD_REQUEST,
            StatusCode::CONFLICT,
            StatusCode::UNPROCESSABLE_ENTITY,
        ] {
            let err = classify_failure(
                status,
                "Cannot complete a draft assignment",
                Endpoint::StatusChange,
            );
            assert_eq!(
                err,
                PortalError::invalid_transition("Cannot complete a draft assignment")
            );
        }
    }

    #[test]
    fn test_general_rejections_keep_server_message() {
        let err = classify_failure(
            StatusCode::BAD_REQUEST,
            "Only draft assignments can be deleted",
            Endpoint::General,
        );
        assert_eq!(
            err,
            PortalError::upstream("Only draft assignments can be deleted")
        );
        assert_eq!(
            classify_failure(StatusCode::NOT_FOUND, "", Endpoint::StatusChange),
            PortalError::not_found("")
        );
    }

    #[test]
    fn test_auth_failures() {
        assert_eq!(
            classify_failure(StatusCode::UNAUTHORIZED, "Token expired", Endpoint::General),
            PortalError::unauthenticated("Token expired")
        );
        assert_eq!(
            classify_failure(StatusCode::FORBIDDEN, "Not your assignment", Endpoint::General),
            PortalError::forbidden("Not your assignment")
        );
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let api = HttpPortalApi::new(&ApiConfig {
            base_url: "http://127.0.0.1:5000/api/".into(),
            request_timeout: 1000,
            connect_timeout: 1000,
        })
        .unwrap();
        assert_eq!(api.base_url, "http://127.0.0.1:5000/api");
    }
}
