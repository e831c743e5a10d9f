//! 进程内的上游 API 替身
//!
//! 按上游服务端的规则（归属校验、状态机、学生可见性、提交限制）在内存中
//! 执行，并记录调用次数，便于测试“没有发出请求”之类的断言。

use chrono::{DateTime, Utc};
use std::collections::HashSet;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::PortalApi;
use crate::errors::{PortalError, Result};
use crate::models::{
    assignments::{
        entities::{Assignment, StudentAssignment},
        requests::{CreateAssignmentPayload, UpdateAssignmentPayload},
        status::AssignmentStatus,
    },
    session::{
        entities::{Role, Session},
        requests::{LoginGrant, LoginRequest},
    },
    submissions::{
        eligibility::MIN_ANSWER_CHARS,
        entities::{AssignmentRef, AssignmentSummary, StudentSummary, Submission},
        requests::{NewSubmissionPayload, ReviewRequest},
    },
};

pub const TEACHER_TOKEN: &str = "teacher-token";
pub const OTHER_TEACHER_TOKEN: &str = "other-teacher-token";
pub const STUDENT_TOKEN: &str = "student-token";

pub const TEACHER_EMAIL: &str = "rivera@school.test";
pub const STUDENT_EMAIL: &str = "sam@school.test";
pub const PASSWORD: &str = "correct horse";

struct Account {
    password: &'static str,
    token: &'static str,
    user: Session,
}

struct StoredAssignment {
    owner_id: String,
    assignment: Assignment,
}

struct StoredSubmission {
    student: StudentSummary,
    submission: Submission,
}

#[derive(Default)]
struct FakeState {
    accounts: Vec<Account>,
    revoked: HashSet<String>,
    assignments: Vec<StoredAssignment>,
    submissions: Vec<StoredSubmission>,
    next_id: u64,
}

impl FakeState {
    fn caller(&self, token: &str) -> Result<Session> {
        if self.revoked.contains(token) {
            return Err(PortalError::unauthenticated("Token has expired"));
        }
        self.accounts
            .iter()
            .find(|account| account.token == token)
            .map(|account| account.user.clone())
            .ok_or_else(|| PortalError::unauthenticated("Not authorized, token failed"))
    }

    fn teacher(&self, token: &str) -> Result<Session> {
        let caller = self.caller(token)?;
        if caller.role != Role::Teacher {
            return Err(PortalError::forbidden("Access denied. Teachers only."));
        }
        Ok(caller)
    }

    fn student(&self, token: &str) -> Result<Session> {
        let caller = self.caller(token)?;
        if caller.role != Role::Student {
            return Err(PortalError::forbidden("Access denied. Students only."));
        }
        Ok(caller)
    }

    fn next_id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{prefix}{:04}", self.next_id)
    }

    fn stored(&self, id: &str) -> Result<&StoredAssignment> {
        self.assignments
            .iter()
            .find(|stored| stored.assignment.id == id)
            .ok_or_else(|| PortalError::not_found("Assignment not found"))
    }

    /// 只有作业的创建者可以访问
    fn owned_mut(&mut self, owner: &Session, id: &str) -> Result<&mut Assignment> {
        let stored = self
            .assignments
            .iter_mut()
            .find(|stored| stored.assignment.id == id)
            .ok_or_else(|| PortalError::not_found("Assignment not found"))?;
        if stored.owner_id != owner.id {
            return Err(PortalError::forbidden(
                "Not authorized to access this assignment",
            ));
        }
        Ok(&mut stored.assignment)
    }

    fn submission_count(&self, assignment_id: &str) -> u32 {
        self.submissions
            .iter()
            .filter(|stored| stored.submission.assignment.id() == assignment_id)
            .count() as u32
    }

    fn with_count(&self, assignment: &Assignment) -> Assignment {
        let mut assignment = assignment.clone();
        if assignment.status != AssignmentStatus::Draft {
            assignment.submission_count = Some(self.submission_count(&assignment.id));
        }
        assignment
    }

    fn find_submission(&self, assignment_id: &str, student_id: &str) -> Option<&Submission> {
        self.submissions
            .iter()
            .find(|stored| {
                stored.submission.assignment.id() == assignment_id && stored.student.id == student_id
            })
            .map(|stored| &stored.submission)
    }
}

pub struct FakePortalApi {
    state: Mutex<FakeState>,
    calls: AtomicUsize,
}

impl Default for FakePortalApi {
    fn default() -> Self {
        Self::new()
    }
}

impl FakePortalApi {
    pub fn new() -> Self {
        let account = |email: &str, token: &'static str, id: &str, name: &str, role| Account {
            password: PASSWORD,
            token,
            user: Session {
                id: id.into(),
                name: name.into(),
                email: email.into(),
                role,
            },
        };

        let state = FakeState {
            accounts: vec![
                account(TEACHER_EMAIL, TEACHER_TOKEN, "t1", "Ms. Rivera", Role::Teacher),
                account(
                    "okafor@school.test",
                    OTHER_TEACHER_TOKEN,
                    "t2",
                    "Mr. Okafor",
                    Role::Teacher,
                ),
                account(STUDENT_EMAIL, STUDENT_TOKEN, "s1", "Sam Lee", Role::Student),
            ],
            ..FakeState::default()
        };

        Self {
            state: Mutex::new(state),
            calls: AtomicUsize::new(0),
        }
    }

    fn state(&self) -> std::sync::MutexGuard<'_, FakeState> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.state.lock().unwrap()
    }

    /// 目前为止收到的请求数
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// 让某个令牌失效，模拟上游会话过期
    pub fn revoke(&self, token: &str) {
        self.state.lock().unwrap().revoked.insert(token.to_string());
    }

    /// 直接写入一份作业（不计入调用次数）
    pub fn seed_assignment(&self, owner_token: &str, assignment: Assignment) {
        let mut state = self.state.lock().unwrap();
        let owner_id = state.caller(owner_token).unwrap().id;
        state.assignments.push(StoredAssignment {
            owner_id,
            assignment,
        });
    }

    /// 读取作业的当前状态（不计入调用次数）
    pub fn assignment(&self, id: &str) -> Option<Assignment> {
        let state = self.state.lock().unwrap();
        state
            .assignments
            .iter()
            .find(|stored| stored.assignment.id == id)
            .map(|stored| state.with_count(&stored.assignment))
    }

    /// 某个作业的全部提交（不计入调用次数）
    pub fn submissions_for(&self, assignment_id: &str) -> Vec<Submission> {
        self.state
            .lock()
            .unwrap()
            .submissions
            .iter()
            .filter(|stored| stored.submission.assignment.id() == assignment_id)
            .map(|stored| stored.submission.clone())
            .collect()
    }

    /// 构造一份作业，时间戳与状态保持一致
    pub fn assignment_fixture(
        id: &str,
        status: AssignmentStatus,
        due_date: DateTime<Utc>,
    ) -> Assignment {
        let now = Utc::now();
        Assignment {
            id: id.into(),
            title: format!("Assignment {id}"),
            description: "Explain the causes of the French Revolution.".into(),
            due_date,
            status,
            created_at: now,
            published_at: (status != AssignmentStatus::Draft).then_some(now),
            completed_at: (status == AssignmentStatus::Completed).then_some(now),
            submission_count: None,
        }
    }
}

#[async_trait::async_trait]
impl PortalApi for FakePortalApi {
    async fn login(&self, credentials: &LoginRequest) -> Result<LoginGrant> {
        let state = self.state();
        state
            .accounts
            .iter()
            .find(|account| {
                account.user.email == credentials.email && account.password == credentials.password
            })
            .map(|account| LoginGrant {
                token: account.token.to_string(),
                user: account.user.clone(),
            })
            .ok_or_else(|| PortalError::unauthenticated("Invalid email or password"))
    }

    async fn list_teacher_assignments(
        &self,
        token: &str,
        status: Option<AssignmentStatus>,
    ) -> Result<Vec<Assignment>> {
        let state = self.state();
        let teacher = state.teacher(token)?;
        Ok(state
            .assignments
            .iter()
            .filter(|stored| stored.owner_id == teacher.id)
            .filter(|stored| status.is_none_or(|s| stored.assignment.status == s))
            .map(|stored| state.with_count(&stored.assignment))
            .collect())
    }

    async fn list_student_assignments(&self, token: &str) -> Result<Vec<StudentAssignment>> {
        let state = self.state();
        let student = state.student(token)?;
        Ok(state
            .assignments
            .iter()
            .filter(|stored| stored.assignment.status.is_listed_to_students())
            .map(|stored| {
                let submission = state.find_submission(&stored.assignment.id, &student.id);
                StudentAssignment {
                    assignment: stored.assignment.clone(),
                    has_submitted: submission.is_some(),
                    submission_id: submission.map(|s| s.id.clone()),
                }
            })
            .collect())
    }

    async fn get_assignment(&self, token: &str, id: &str) -> Result<Assignment> {
        let state = self.state();
        let caller = state.caller(token)?;
        let stored = state.stored(id)?;
        match caller.role {
            Role::Teacher if stored.owner_id != caller.id => Err(PortalError::forbidden(
                "Not authorized to access this assignment",
            )),
            Role::Student if stored.assignment.status == AssignmentStatus::Draft => {
                Err(PortalError::not_found("Assignment not found"))
            }
            _ => Ok(state.with_count(&stored.assignment)),
        }
    }

    async fn create_assignment(
        &self,
        token: &str,
        payload: &CreateAssignmentPayload,
    ) -> Result<Assignment> {
        let mut state = self.state();
        let teacher = state.teacher(token)?;
        if payload.status != AssignmentStatus::Draft {
            return Err(PortalError::upstream("New assignments must start as draft"));
        }
        let assignment = Assignment {
            id: state.next_id("a"),
            title: payload.title.clone(),
            description: payload.description.clone(),
            due_date: payload.due_date,
            status: AssignmentStatus::Draft,
            created_at: Utc::now(),
            published_at: None,
            completed_at: None,
            submission_count: None,
        };
        state.assignments.push(StoredAssignment {
            owner_id: teacher.id,
            assignment: assignment.clone(),
        });
        Ok(assignment)
    }

    async fn update_assignment(
        &self,
        token: &str,
        id: &str,
        payload: &UpdateAssignmentPayload,
    ) -> Result<Assignment> {
        let mut state = self.state();
        let teacher = state.teacher(token)?;
        let assignment = state.owned_mut(&teacher, id)?;
        if assignment.status != AssignmentStatus::Draft {
            return Err(PortalError::upstream("Only draft assignments can be edited"));
        }
        assignment.title = payload.title.clone();
        assignment.description = payload.description.clone();
        assignment.due_date = payload.due_date;
        Ok(assignment.clone())
    }

    async fn update_assignment_status(
        &self,
        token: &str,
        id: &str,
        status: AssignmentStatus,
    ) -> Result<Assignment> {
        let mut state = self.state();
        let teacher = state.teacher(token)?;
        let assignment = state.owned_mut(&teacher, id)?;
        assignment.apply_transition(status, Utc::now())?;
        Ok(assignment.clone())
    }

    async fn delete_assignment(&self, token: &str, id: &str) -> Result<()> {
        let mut state = self.state();
        let teacher = state.teacher(token)?;
        let assignment = state.owned_mut(&teacher, id)?;
        if assignment.status != AssignmentStatus::Draft {
            return Err(PortalError::upstream(
                "Only draft assignments can be deleted",
            ));
        }
        state.assignments.retain(|stored| stored.assignment.id != id);
        Ok(())
    }

    async fn list_assignment_submissions(
        &self,
        token: &str,
        assignment_id: &str,
    ) -> Result<Vec<Submission>> {
        let mut state = self.state();
        let teacher = state.teacher(token)?;
        state.owned_mut(&teacher, assignment_id)?;
        Ok(state
            .submissions
            .iter()
            .filter(|stored| stored.submission.assignment.id() == assignment_id)
            .map(|stored| Submission {
                student: Some(stored.student.clone()),
                ..stored.submission.clone()
            })
            .collect())
    }

    async fn create_submission(
        &self,
        token: &str,
        payload: &NewSubmissionPayload,
    ) -> Result<Submission> {
        let mut state = self.state();
        let student = state.student(token)?;
        let assignment = state.stored(&payload.assignment_id)?.assignment.clone();

        if assignment.status != AssignmentStatus::Published {
            return Err(PortalError::upstream(
                "This assignment is not accepting submissions",
            ));
        }
        if assignment.is_past_due(Utc::now()) {
            return Err(PortalError::upstream("Submission deadline has passed"));
        }
        if state.find_submission(&assignment.id, &student.id).is_some() {
            return Err(PortalError::upstream(
                "You have already submitted this assignment",
            ));
        }
        let answer = payload.answer.trim();
        if answer.chars().count() < MIN_ANSWER_CHARS {
            return Err(PortalError::upstream("Answer is too short"));
        }

        let submission = Submission {
            id: state.next_id("s"),
            assignment: AssignmentRef::Id(assignment.id.clone()),
            student: None,
            answer: answer.to_string(),
            submitted_at: Utc::now(),
            reviewed: false,
            feedback: None,
        };
        state.submissions.push(StoredSubmission {
            student: StudentSummary {
                id: student.id,
                name: student.name,
                email: student.email,
            },
            submission: submission.clone(),
        });
        Ok(submission)
    }

    async fn list_my_submissions(&self, token: &str) -> Result<Vec<Submission>> {
        let state = self.state();
        let student = state.student(token)?;
        Ok(state
            .submissions
            .iter()
            .filter(|stored| stored.student.id == student.id)
            .map(|stored| {
                let mut submission = stored.submission.clone();
                if let Ok(owner) = state.stored(submission.assignment.id()) {
                    submission.assignment = AssignmentRef::Summary(AssignmentSummary {
                        id: owner.assignment.id.clone(),
                        title: owner.assignment.title.clone(),
                        description: owner.assignment.description.clone(),
                        due_date: Some(owner.assignment.due_date),
                    });
                }
                submission
            })
            .collect())
    }

    async fn review_submission(
        &self,
        token: &str,
        submission_id: &str,
        review: &ReviewRequest,
    ) -> Result<Submission> {
        let mut state = self.state();
        let teacher = state.teacher(token)?;
        let assignment_id = state
            .submissions
            .iter()
            .find(|stored| stored.submission.id == submission_id)
            .map(|stored| stored.submission.assignment.id().to_string())
            .ok_or_else(|| PortalError::not_found("Submission not found"))?;
        state.owned_mut(&teacher, &assignment_id)?;

        let stored = state
            .submissions
            .iter_mut()
            .find(|stored| stored.submission.id == submission_id)
            .ok_or_else(|| PortalError::not_found("Submission not found"))?;
        stored.submission.reviewed = review.reviewed;
        if let Some(feedback) = &review.feedback {
            stored.submission.feedback = Some(feedback.clone());
        }
        Ok(stored.submission.clone())
    }
}
