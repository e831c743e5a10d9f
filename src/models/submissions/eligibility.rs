//! 提交资格校验
//!
//! 作答内容的校验在发出任何请求之前完成；作业状态、截止时间与重复提交
//! 的校验基于最新拉取到的数据，上游会再次独立校验。

use chrono::{DateTime, Utc};

use crate::errors::PortalError;
use crate::models::assignments::{entities::Assignment, status::AssignmentStatus};

/// 作答内容（去除首尾空白后）的最少字符数
pub const MIN_ANSWER_CHARS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionRejection {
    BlankAnswer,
    AnswerTooShort,
    NotPublished,
    PastDue,
    AlreadySubmitted,
}

impl SubmissionRejection {
    pub fn message(&self) -> &'static str {
        match self {
            SubmissionRejection::BlankAnswer => "Please write your answer",
            SubmissionRejection::AnswerTooShort => "Answer should be at least 10 characters",
            SubmissionRejection::NotPublished => "This assignment is not accepting submissions",
            SubmissionRejection::PastDue => "The due date for this assignment has passed",
            SubmissionRejection::AlreadySubmitted => "You have already submitted this assignment",
        }
    }

    /// 是否属于无需请求即可判定的输入错误
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            SubmissionRejection::BlankAnswer | SubmissionRejection::AnswerTooShort
        )
    }
}

impl std::fmt::Display for SubmissionRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

impl From<SubmissionRejection> for PortalError {
    fn from(rejection: SubmissionRejection) -> Self {
        if rejection.is_input_error() {
            PortalError::validation_failed(rejection.message())
        } else {
            PortalError::submission_rejected(rejection.message())
        }
    }
}

/// 校验作答内容，返回去除首尾空白后的文本
pub fn check_answer(answer: &str) -> Result<&str, SubmissionRejection> {
    let trimmed = answer.trim();
    if trimmed.is_empty() {
        return Err(SubmissionRejection::BlankAnswer);
    }
    if trimmed.chars().count() < MIN_ANSWER_CHARS {
        return Err(SubmissionRejection::AnswerTooShort);
    }
    Ok(trimmed)
}

/// 校验作业当前是否允许该学生提交
pub fn check_eligibility(
    assignment: &Assignment,
    already_submitted: bool,
    now: DateTime<Utc>,
) -> Result<(), SubmissionRejection> {
    if assignment.status != AssignmentStatus::Published {
        return Err(SubmissionRejection::NotPublished);
    }
    if assignment.is_past_due(now) {
        return Err(SubmissionRejection::PastDue);
    }
    if already_submitted {
        return Err(SubmissionRejection::AlreadySubmitted);
    }
    Ok(())
}

/// 完整的提交校验：先校验作答内容，再校验资格
pub fn check_submission<'a>(
    assignment: &Assignment,
    already_submitted: bool,
    answer: &'a str,
    now: DateTime<Utc>,
) -> Result<&'a str, SubmissionRejection> {
    let answer = check_answer(answer)?;
    check_eligibility(assignment, already_submitted, now)?;
    Ok(answer)
}
