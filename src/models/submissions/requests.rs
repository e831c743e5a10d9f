use serde::{Deserialize, Serialize};

/// 学生提交表单
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubmitAnswerInput {
    #[serde(default)]
    pub answer: String,
}

/// `POST /submissions` 请求体
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSubmissionPayload {
    pub assignment_id: String,
    pub answer: String,
}

/// 教师批阅操作
///
/// `feedback` 缺省时沿用已有评语，只有显式给出才会覆盖。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewRequest {
    pub reviewed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
}
