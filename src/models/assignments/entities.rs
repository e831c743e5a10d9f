use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::status::AssignmentStatus;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    // 唯一 ID
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    // 作业标题
    pub title: String,
    // 作业描述
    #[serde(default)]
    pub description: String,
    // 截止时间
    pub due_date: DateTime<Utc>,
    // 当前状态
    pub status: AssignmentStatus,
    // 创建时间
    pub created_at: DateTime<Utc>,
    // 发布时间，仅 published / completed 时存在
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,
    // 完成时间，仅 completed 时存在
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    // 提交数量，仅 published / completed 时有意义
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submission_count: Option<u32>,
}

impl Assignment {
    /// 时间戳是否与状态一致
    ///
    /// `publishedAt` 当且仅当状态为 published / completed 时存在，
    /// `completedAt` 当且仅当状态为 completed 时存在。
    pub fn timestamps_consistent(&self) -> bool {
        let expects_published = matches!(
            self.status,
            AssignmentStatus::Published | AssignmentStatus::Completed
        );
        let expects_completed = self.status == AssignmentStatus::Completed;

        self.published_at.is_some() == expects_published
            && self.completed_at.is_some() == expects_completed
    }

    pub fn is_past_due(&self, now: DateTime<Utc>) -> bool {
        now >= self.due_date
    }

    /// 是否接受提交：已发布且尚未到截止时间
    pub fn accepts_submissions(&self, now: DateTime<Utc>) -> bool {
        self.status == AssignmentStatus::Published && !self.is_past_due(now)
    }

    /// 按状态机执行一次转换并写入对应时间戳
    ///
    /// 这是上游服务端的行为约定，门户自身从不在本地推测转换结果。
    /// 失败时作业保持不变。进程内的上游替身按它执行转换。
    #[cfg(test)]
    pub fn apply_transition(
        &mut self,
        target: AssignmentStatus,
        at: DateTime<Utc>,
    ) -> crate::errors::Result<()> {
        self.status.check_transition(target)?;

        self.status = target;
        match target {
            AssignmentStatus::Published => self.published_at = Some(at),
            AssignmentStatus::Completed => self.completed_at = Some(at),
            AssignmentStatus::Draft => {}
        }
        Ok(())
    }
}

/// 学生视角的作业，附带是否已提交
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StudentAssignment {
    #[serde(flatten)]
    pub assignment: Assignment,
    #[serde(default)]
    pub has_submitted: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submission_id: Option<String>,
}
