use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use super::text::excerpt;
use crate::models::assignments::{
    entities::Assignment,
    requests::AssignmentFormInput,
    status::{AssignmentActions, AssignmentStatus},
};
use crate::models::submissions::entities::Submission;
use crate::utils::validate::parse_due_date;

const CARD_EXCERPT_CHARS: usize = 100;
const ANSWER_EXCERPT_CHARS: usize = 100;
const DEFAULT_DUE_DAYS: i64 = 7;

#[derive(Debug, Clone, Serialize)]
pub struct StatusTab {
    pub status: AssignmentStatus,
    pub label: String,
    pub count: usize,
    pub selected: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct AssignmentCard {
    pub id: String,
    pub title: String,
    pub status: AssignmentStatus,
    pub status_label: &'static str,
    pub excerpt: String,
    pub due_date: DateTime<Utc>,
    pub submission_count: Option<u32>,
    pub actions: AssignmentActions,
}

impl AssignmentCard {
    pub fn from_assignment(assignment: &Assignment) -> Self {
        // 只有已发布的作业展示提交数
        let submission_count = (assignment.status == AssignmentStatus::Published)
            .then(|| assignment.submission_count.unwrap_or(0));

        Self {
            id: assignment.id.clone(),
            title: assignment.title.clone(),
            status: assignment.status,
            status_label: assignment.status.label(),
            excerpt: excerpt(&assignment.description, CARD_EXCERPT_CHARS),
            due_date: assignment.due_date,
            submission_count,
            actions: AssignmentActions::for_status(assignment.status),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TeacherDashboardView {
    pub selected: AssignmentStatus,
    pub tabs: Vec<StatusTab>,
    pub cards: Vec<AssignmentCard>,
    pub empty_text: Option<String>,
}

impl TeacherDashboardView {
    /// 由三个状态的列表构建首页，`lists` 与 `AssignmentStatus::ALL` 顺序一致
    pub fn build(selected: AssignmentStatus, lists: [Vec<Assignment>; 3]) -> Self {
        let tabs = AssignmentStatus::ALL
            .iter()
            .zip(lists.iter())
            .map(|(status, list)| StatusTab {
                status: *status,
                label: format!("{} ({})", status.label(), list.len()),
                count: list.len(),
                selected: *status == selected,
            })
            .collect();

        let cards: Vec<AssignmentCard> = AssignmentStatus::ALL
            .iter()
            .zip(lists.iter())
            .filter(|(status, _)| **status == selected)
            .flat_map(|(_, list)| list.iter().map(AssignmentCard::from_assignment))
            .collect();

        let empty_text = cards
            .is_empty()
            .then(|| format!("No {selected} assignments found."));

        Self {
            selected,
            tabs,
            cards,
            empty_text,
        }
    }

    /// 加载失败时的空页面
    pub fn empty(selected: AssignmentStatus) -> Self {
        Self::build(selected, [Vec::new(), Vec::new(), Vec::new()])
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FormMode {
    Create,
    Edit,
}

#[derive(Debug, Clone, Serialize)]
pub struct AssignmentFormView {
    pub mode: FormMode,
    pub assignment_id: Option<String>,
    pub heading: &'static str,
    pub submit_label: &'static str,
    pub title: String,
    pub description: String,
    pub due_date: Option<DateTime<Utc>>,
    /// 编辑页加载失败时未知
    pub status: Option<AssignmentStatus>,
    pub error: Option<String>,
}

impl AssignmentFormView {
    /// 新建表单：截止时间默认一周后，状态为草稿
    pub fn create_defaults(now: DateTime<Utc>) -> Self {
        Self {
            mode: FormMode::Create,
            assignment_id: None,
            heading: "Create New Assignment",
            submit_label: "Create",
            title: String::new(),
            description: String::new(),
            due_date: Some(now + Duration::days(DEFAULT_DUE_DAYS)),
            status: Some(AssignmentStatus::Draft),
            error: None,
        }
    }

    pub fn edit(assignment: &Assignment) -> Self {
        Self {
            mode: FormMode::Edit,
            assignment_id: Some(assignment.id.clone()),
            heading: "Edit Assignment",
            submit_label: "Update",
            title: assignment.title.clone(),
            description: assignment.description.clone(),
            due_date: Some(assignment.due_date),
            status: Some(assignment.status),
            error: None,
        }
    }

    /// 校验未通过：回显输入并附上错误
    pub fn rejected(mut self, input: &AssignmentFormInput, error: &str) -> Self {
        self.title = input.title.clone();
        self.description = input.description.clone();
        if let Some(due) = input.due_date.as_deref().and_then(parse_due_date) {
            self.due_date = Some(due);
        }
        self.error = Some(error.to_string());
        self
    }

    pub fn edit_failed(assignment_id: &str, error: String) -> Self {
        Self {
            mode: FormMode::Edit,
            assignment_id: Some(assignment_id.to_string()),
            heading: "Edit Assignment",
            submit_label: "Update",
            title: String::new(),
            description: String::new(),
            due_date: None,
            status: None,
            error: Some(error),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TimelineEntry {
    pub label: &'static str,
    pub at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AssignmentDetailsView {
    pub assignment: Option<Assignment>,
    pub status_label: Option<&'static str>,
    pub actions: Option<AssignmentActions>,
    pub timeline: Vec<TimelineEntry>,
    pub error: Option<String>,
}

impl AssignmentDetailsView {
    pub fn loaded(assignment: Assignment) -> Self {
        let mut timeline = vec![TimelineEntry {
            label: "Created",
            at: assignment.created_at,
        }];
        if let Some(at) = assignment.published_at {
            timeline.push(TimelineEntry {
                label: "Published",
                at,
            });
        }
        if let Some(at) = assignment.completed_at {
            timeline.push(TimelineEntry {
                label: "Completed",
                at,
            });
        }

        Self {
            status_label: Some(assignment.status.label()),
            actions: Some(AssignmentActions::for_status(assignment.status)),
            assignment: Some(assignment),
            timeline,
            error: None,
        }
    }

    pub fn failed(error: String) -> Self {
        Self {
            assignment: None,
            status_label: None,
            actions: None,
            timeline: Vec::new(),
            error: Some(error),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SubmissionRow {
    pub id: String,
    pub student_name: String,
    pub student_email: String,
    pub submitted_at: DateTime<Utc>,
    pub answer: String,
    pub answer_excerpt: String,
    pub reviewed: bool,
    pub review_label: &'static str,
    pub toggle_label: &'static str,
    pub dialog_action_label: &'static str,
    pub feedback: String,
}

impl SubmissionRow {
    pub fn from_submission(submission: &Submission) -> Self {
        let (student_name, student_email) = submission
            .student
            .as_ref()
            .map(|s| (s.name.clone(), s.email.clone()))
            .unwrap_or_default();

        Self {
            id: submission.id.clone(),
            student_name,
            student_email,
            submitted_at: submission.submitted_at,
            answer: submission.answer.clone(),
            answer_excerpt: excerpt(&submission.answer, ANSWER_EXCERPT_CHARS),
            reviewed: submission.reviewed,
            review_label: if submission.reviewed { "Reviewed" } else { "Pending" },
            toggle_label: if submission.reviewed {
                "Unmark"
            } else {
                "Mark Reviewed"
            },
            dialog_action_label: if submission.reviewed {
                "Mark as Pending"
            } else {
                "Mark as Reviewed"
            },
            feedback: submission.feedback.clone().unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SubmissionListView {
    pub assignment: Option<Assignment>,
    pub heading: Option<String>,
    pub rows: Vec<SubmissionRow>,
    pub empty_text: Option<&'static str>,
    pub error: Option<String>,
}

impl SubmissionListView {
    pub fn loaded(assignment: Assignment, submissions: &[Submission]) -> Self {
        let rows: Vec<SubmissionRow> = submissions.iter().map(SubmissionRow::from_submission).collect();
        Self {
            heading: Some(format!("{} - Submissions ({})", assignment.title, rows.len())),
            assignment: Some(assignment),
            empty_text: rows.is_empty().then_some("No submissions yet"),
            rows,
            error: None,
        }
    }

    pub fn failed(error: String) -> Self {
        Self {
            assignment: None,
            heading: None,
            rows: Vec::new(),
            empty_text: Some("No submissions yet"),
            error: Some(error),
        }
    }
}
