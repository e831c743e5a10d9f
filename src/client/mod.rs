//! 上游作业 REST API 客户端
//!
//! 门户的全部数据读写都经由 `PortalApi`，每个调用都携带会话中的上游令牌。

use std::sync::Arc;

use crate::config::ApiConfig;
use crate::errors::Result;
use crate::models::{
    assignments::{
        entities::{Assignment, StudentAssignment},
        requests::{CreateAssignmentPayload, UpdateAssignmentPayload},
        status::AssignmentStatus,
    },
    session::requests::{LoginGrant, LoginRequest},
    submissions::{
        entities::Submission,
        requests::{NewSubmissionPayload, ReviewRequest},
    },
};

#[cfg(test)]
pub mod fake;
pub mod http;

pub use http::HttpPortalApi;

#[async_trait::async_trait]
pub trait PortalApi: Send + Sync {
    /// 认证
    // 将登录凭据转交外部认证服务
    async fn login(&self, credentials: &LoginRequest) -> Result<LoginGrant>;

    /// 作业
    // 当前教师的作业，可按状态过滤
    async fn list_teacher_assignments(
        &self,
        token: &str,
        status: Option<AssignmentStatus>,
    ) -> Result<Vec<Assignment>>;
    // 学生可见的作业（附带是否已提交）
    async fn list_student_assignments(&self, token: &str) -> Result<Vec<StudentAssignment>>;
    // 作业详情
    async fn get_assignment(&self, token: &str, id: &str) -> Result<Assignment>;
    // 新建作业
    async fn create_assignment(
        &self,
        token: &str,
        payload: &CreateAssignmentPayload,
    ) -> Result<Assignment>;
    // 修改标题、描述与截止时间
    async fn update_assignment(
        &self,
        token: &str,
        id: &str,
        payload: &UpdateAssignmentPayload,
    ) -> Result<Assignment>;
    // 状态变更
    async fn update_assignment_status(
        &self,
        token: &str,
        id: &str,
        status: AssignmentStatus,
    ) -> Result<Assignment>;
    // 删除作业（仅草稿）
    async fn delete_assignment(&self, token: &str, id: &str) -> Result<()>;

    /// 提交
    // 某个作业的全部提交
    async fn list_assignment_submissions(
        &self,
        token: &str,
        assignment_id: &str,
    ) -> Result<Vec<Submission>>;
    // 学生提交答案
    async fn create_submission(
        &self,
        token: &str,
        payload: &NewSubmissionPayload,
    ) -> Result<Submission>;
    // 当前学生的全部提交
    async fn list_my_submissions(&self, token: &str) -> Result<Vec<Submission>>;
    // 批阅提交
    async fn review_submission(
        &self,
        token: &str,
        submission_id: &str,
        review: &ReviewRequest,
    ) -> Result<Submission>;
}

/// 根据配置创建上游客户端
pub fn create_portal_api(config: &ApiConfig) -> Result<Arc<dyn PortalApi>> {
    Ok(Arc::new(HttpPortalApi::new(config)?))
}
