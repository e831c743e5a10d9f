use chrono::{DateTime, Utc};
use serde::Serialize;

use super::text::{excerpt, time_remaining};
use crate::models::assignments::{
    entities::{Assignment, StudentAssignment},
    requests::StudentTab,
    status::AssignmentStatus,
};
use crate::models::submissions::entities::Submission;

const CARD_EXCERPT_CHARS: usize = 100;
const HISTORY_EXCERPT_CHARS: usize = 50;

#[derive(Debug, Clone, Serialize)]
pub struct StudentTabInfo {
    pub tab: StudentTab,
    pub label: &'static str,
    pub selected: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct StudentAssignmentCard {
    pub id: String,
    pub title: String,
    pub excerpt: String,
    pub due_date: DateTime<Utc>,
    pub time_remaining: String,
    pub has_submitted: bool,
    pub submission_id: Option<String>,
    pub can_submit: bool,
    pub action_label: &'static str,
}

impl StudentAssignmentCard {
    pub fn from_item(item: &StudentAssignment, now: DateTime<Utc>) -> Self {
        let assignment = &item.assignment;
        let past_due = assignment.is_past_due(now);
        let action_label = if item.has_submitted {
            "View Submission"
        } else if past_due {
            "Submission Closed"
        } else {
            "Submit Answer"
        };

        Self {
            id: assignment.id.clone(),
            title: assignment.title.clone(),
            excerpt: excerpt(&assignment.description, CARD_EXCERPT_CHARS),
            due_date: assignment.due_date,
            time_remaining: time_remaining(assignment.due_date, now),
            has_submitted: item.has_submitted,
            submission_id: item.submission_id.clone(),
            can_submit: !item.has_submitted && assignment.accepts_submissions(now),
            action_label,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StudentDashboardView {
    pub tab: StudentTab,
    pub tabs: Vec<StudentTabInfo>,
    pub cards: Vec<StudentAssignmentCard>,
    pub empty_text: Option<&'static str>,
    pub error: Option<String>,
}

impl StudentDashboardView {
    /// 草稿与已完成的作业不会出现在学生列表中
    pub fn build(tab: StudentTab, items: &[StudentAssignment], now: DateTime<Utc>) -> Self {
        let cards: Vec<StudentAssignmentCard> = items
            .iter()
            .filter(|item| item.assignment.status.is_listed_to_students())
            .filter(|item| tab.includes(item.has_submitted))
            .map(|item| StudentAssignmentCard::from_item(item, now))
            .collect();

        Self {
            tab,
            tabs: StudentTab::ALL
                .iter()
                .map(|t| StudentTabInfo {
                    tab: *t,
                    label: t.label(),
                    selected: *t == tab,
                })
                .collect(),
            empty_text: cards.is_empty().then(|| tab.empty_text()),
            cards,
            error: None,
        }
    }

    pub fn failed(tab: StudentTab, error: String) -> Self {
        let mut view = Self::build(tab, &[], Utc::now());
        view.error = Some(error);
        view
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SubmissionFormView {
    pub assignment: Option<Assignment>,
    pub answer: String,
    pub has_submitted: bool,
    pub is_past_due: bool,
    pub can_submit: bool,
    pub closed_reason: Option<&'static str>,
    pub error: Option<String>,
}

impl SubmissionFormView {
    pub fn build(
        assignment: Assignment,
        existing: Option<&Submission>,
        now: DateTime<Utc>,
    ) -> Self {
        let has_submitted = existing.is_some();
        let is_past_due = assignment.is_past_due(now);

        let closed_reason = if has_submitted {
            Some("You have already submitted this assignment")
        } else if assignment.status != AssignmentStatus::Published {
            Some("This assignment is not accepting submissions")
        } else if is_past_due {
            Some("Submission Closed (Past due date)")
        } else {
            None
        };

        Self {
            answer: existing.map(|s| s.answer.clone()).unwrap_or_default(),
            can_submit: closed_reason.is_none(),
            assignment: Some(assignment),
            has_submitted,
            is_past_due,
            closed_reason,
            error: None,
        }
    }

    /// 提交被拒绝：回显作答内容并附上原因
    pub fn rejected(mut self, answer: &str, error: &str) -> Self {
        self.answer = answer.to_string();
        self.error = Some(error.to_string());
        self
    }

    /// 作答内容未通过校验，此时尚未拉取作业
    pub fn answer_rejected(answer: &str, error: &str) -> Self {
        Self {
            assignment: None,
            answer: answer.to_string(),
            has_submitted: false,
            is_past_due: false,
            can_submit: true,
            closed_reason: None,
            error: Some(error.to_string()),
        }
    }

    pub fn failed(error: String) -> Self {
        Self {
            assignment: None,
            answer: String::new(),
            has_submitted: false,
            is_past_due: false,
            can_submit: false,
            closed_reason: None,
            error: Some(error),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MySubmissionRow {
    pub id: String,
    pub assignment_id: String,
    pub assignment_title: String,
    pub assignment_excerpt: String,
    pub submitted_at: DateTime<Utc>,
    pub answer: String,
    pub reviewed: bool,
    pub review_label: &'static str,
    pub feedback_text: String,
}

impl MySubmissionRow {
    pub fn from_submission(submission: &Submission) -> Self {
        let (title, description) = submission
            .assignment
            .summary()
            .map(|s| (s.title.clone(), s.description.clone()))
            .unwrap_or_default();

        Self {
            id: submission.id.clone(),
            assignment_id: submission.assignment.id().to_string(),
            assignment_title: title,
            assignment_excerpt: excerpt(&description, HISTORY_EXCERPT_CHARS),
            submitted_at: submission.submitted_at,
            answer: submission.answer.clone(),
            reviewed: submission.reviewed,
            review_label: if submission.reviewed {
                "Reviewed"
            } else {
                "Pending Review"
            },
            feedback_text: submission
                .feedback
                .clone()
                .filter(|f| !f.trim().is_empty())
                .unwrap_or_else(|| "No feedback yet".to_string()),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MySubmissionsView {
    pub rows: Vec<MySubmissionRow>,
    pub empty_text: Option<&'static str>,
    pub error: Option<String>,
}

impl MySubmissionsView {
    pub fn build(submissions: &[Submission]) -> Self {
        let rows: Vec<MySubmissionRow> = submissions
            .iter()
            .map(MySubmissionRow::from_submission)
            .collect();
        Self {
            empty_text: rows
                .is_empty()
                .then_some("You haven't submitted any assignments yet."),
            rows,
            error: None,
        }
    }

    pub fn failed(error: String) -> Self {
        let mut view = Self::build(&[]);
        view.error = Some(error);
        view
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn item(
        id: &str,
        status: AssignmentStatus,
        has_submitted: bool,
        due_in: Duration,
        now: DateTime<Utc>,
    ) -> StudentAssignment {
        StudentAssignment {
            assignment: Assignment {
                id: id.into(),
                title: id.into(),
                description: "Describe the water cycle.".into(),
                due_date: now + due_in,
                status,
                created_at: now - Duration::days(1),
                published_at: (status != AssignmentStatus::Draft).then_some(now),
                completed_at: (status == AssignmentStatus::Completed).then_some(now),
                submission_count: None,
            },
            has_submitted,
            submission_id: has_submitted.then(|| format!("sub-{id}")),
        }
    }

    #[test]
    fn test_drafts_are_never_listed() {
        let now = Utc::now();
        let items = [
            item("draft", AssignmentStatus::Draft, false, Duration::days(2), now),
            item("open", AssignmentStatus::Published, false, Duration::days(2), now),
            item("done", AssignmentStatus::Completed, false, Duration::days(2), now),
        ];
        let view = StudentDashboardView::build(StudentTab::All, &items, now);
        let ids: Vec<&str> = view.cards.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["open"]);
    }

    #[test]
    fn test_tabs_split_by_submission() {
        let now = Utc::now();
        let items = [
            item("a", AssignmentStatus::Published, false, Duration::days(2), now),
            item("b", AssignmentStatus::Published, true, Duration::days(2), now),
        ];

        let available = StudentDashboardView::build(StudentTab::Available, &items, now);
        assert_eq!(available.cards.len(), 1);
        assert_eq!(available.cards[0].action_label, "Submit Answer");
        assert!(available.cards[0].can_submit);

        let submitted = StudentDashboardView::build(StudentTab::Submitted, &items, now);
        assert_eq!(submitted.cards[0].action_label, "View Submission");
        assert_eq!(submitted.cards[0].submission_id.as_deref(), Some("sub-b"));
    }

    #[test]
    fn test_past_due_card_is_closed() {
        let now = Utc::now();
        let items = [item(
            "late",
            AssignmentStatus::Published,
            false,
            Duration::hours(-2),
            now,
        )];
        let view = StudentDashboardView::build(StudentTab::Available, &items, now);
        assert_eq!(view.cards[0].action_label, "Submission Closed");
        assert_eq!(view.cards[0].time_remaining, "Overdue");
        assert!(!view.cards[0].can_submit);
    }

    #[test]
    fn test_empty_texts() {
        let view = StudentDashboardView::build(StudentTab::Submitted, &[], Utc::now());
        assert_eq!(
            view.empty_text,
            Some("You haven't submitted any assignments yet.")
        );
        assert_eq!(
            MySubmissionsView::build(&[]).empty_text,
            Some("You haven't submitted any assignments yet.")
        );
    }

    #[test]
    fn test_form_closed_reasons() {
        let now = Utc::now();
        let open = item("a", AssignmentStatus::Published, false, Duration::days(1), now);
        let form = SubmissionFormView::build(open.assignment.clone(), None, now);
        assert!(form.can_submit);
        assert!(form.closed_reason.is_none());

        let late = item("b", AssignmentStatus::Published, false, Duration::days(-1), now);
        let form = SubmissionFormView::build(late.assignment, None, now);
        assert_eq!(form.closed_reason, Some("Submission Closed (Past due date)"));
        assert!(form.is_past_due);
    }
}
