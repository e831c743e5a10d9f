use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 提交中引用的作业：上游可能只给 ID，也可能嵌入摘要
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum AssignmentRef {
    Summary(AssignmentSummary),
    Id(String),
}

impl AssignmentRef {
    pub fn id(&self) -> &str {
        match self {
            AssignmentRef::Summary(summary) => &summary.id,
            AssignmentRef::Id(id) => id,
        }
    }

    pub fn summary(&self) -> Option<&AssignmentSummary> {
        match self {
            AssignmentRef::Summary(summary) => Some(summary),
            AssignmentRef::Id(_) => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentSummary {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StudentSummary {
    #[serde(rename = "_id", alias = "id", default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    // 唯一 ID
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    // 所属作业
    pub assignment: AssignmentRef,
    // 提交学生（教师视角下由上游嵌入）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub student: Option<StudentSummary>,
    // 作答内容，提交后不可修改
    pub answer: String,
    pub submitted_at: DateTime<Utc>,
    #[serde(default)]
    pub reviewed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
}
