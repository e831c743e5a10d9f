use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::status::AssignmentStatus;

/// 作业表单输入（新建与编辑共用）
///
/// `due_date` 保留原始文本，接受 RFC 3339 或 `datetime-local` 格式，
/// 由表单校验负责解析。
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentFormInput {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub due_date: Option<String>,
}

/// `POST /assignments` 请求体
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAssignmentPayload {
    pub title: String,
    pub description: String,
    pub due_date: DateTime<Utc>,
    pub status: AssignmentStatus,
}

/// `PUT /assignments/:id` 请求体，不包含状态
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAssignmentPayload {
    pub title: String,
    pub description: String,
    pub due_date: DateTime<Utc>,
}

/// `PUT /assignments/:id/status` 请求体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusChangePayload {
    pub status: AssignmentStatus,
}

/// 状态变更完成后返回的页面
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReturnTo {
    Dashboard,
    #[default]
    Details,
}

/// 门户的状态变更操作
///
/// `current` 为调用方最后一次拉取到的状态，`status` 为目标状态。
#[derive(Debug, Clone, Deserialize)]
pub struct TransitionRequest {
    pub current: AssignmentStatus,
    pub status: AssignmentStatus,
    #[serde(default)]
    pub return_to: ReturnTo,
}

/// 删除操作
///
/// `current` 同样是调用方最后一次拉取到的状态。
#[derive(Debug, Clone, Deserialize)]
pub struct DeleteRequest {
    pub current: AssignmentStatus,
    #[serde(default)]
    pub return_to: ReturnTo,
}

/// 教师首页查询参数
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TeacherDashboardQuery {
    pub status: Option<AssignmentStatus>,
}

/// 学生首页的分栏
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StudentTab {
    #[default]
    Available,
    Submitted,
    All,
}

impl StudentTab {
    pub const ALL: [StudentTab; 3] = [StudentTab::Available, StudentTab::Submitted, StudentTab::All];

    pub fn label(&self) -> &'static str {
        match self {
            StudentTab::Available => "Available",
            StudentTab::Submitted => "Submitted",
            StudentTab::All => "All",
        }
    }

    pub fn includes(&self, has_submitted: bool) -> bool {
        match self {
            StudentTab::Available => !has_submitted,
            StudentTab::Submitted => has_submitted,
            StudentTab::All => true,
        }
    }

    pub fn empty_text(&self) -> &'static str {
        match self {
            StudentTab::Available => "No available assignments at the moment.",
            StudentTab::Submitted => "You haven't submitted any assignments yet.",
            StudentTab::All => "No assignments found.",
        }
    }
}

/// 学生首页查询参数
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StudentDashboardQuery {
    pub tab: Option<StudentTab>,
}
