use serde::Serialize;

use super::notice::Notice;
use crate::models::session::entities::{Role, Session};

const PORTAL_NAME: &str = "Assignment Portal";
const PORTAL_VERSION: &str = "1.0";

/// 门户中的全部页面
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum View {
    Login,
    TeacherDashboard,
    NewAssignment,
    AssignmentDetails,
    EditAssignment,
    SubmissionList,
    StudentDashboard,
    SubmitAssignment,
    MySubmissions,
}

impl View {
    /// 访问该页面所需的角色，空表示无需登录
    pub fn required_roles(&self) -> &'static [Role] {
        match self {
            View::Login => &[],
            View::TeacherDashboard
            | View::NewAssignment
            | View::AssignmentDetails
            | View::EditAssignment
            | View::SubmissionList => Role::teacher_roles(),
            View::StudentDashboard | View::SubmitAssignment | View::MySubmissions => {
                Role::student_roles()
            }
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            View::Login => "Login",
            View::TeacherDashboard => "Teacher Dashboard",
            View::NewAssignment => "Create New Assignment",
            View::AssignmentDetails => "Assignment Details",
            View::EditAssignment => "Edit Assignment",
            View::SubmissionList => "Submissions",
            View::StudentDashboard => "Student Dashboard",
            View::SubmitAssignment => "Submit Answer",
            View::MySubmissions => "My Submissions",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavItem {
    pub label: &'static str,
    pub path: &'static str,
}

fn nav_items(role: Role) -> Vec<NavItem> {
    match role {
        Role::Teacher => vec![
            NavItem {
                label: "Dashboard",
                path: "/teacher/dashboard",
            },
            NavItem {
                label: "New Assignment",
                path: "/teacher/assignments/new",
            },
        ],
        Role::Student => vec![
            NavItem {
                label: "Dashboard",
                path: "/student/dashboard",
            },
            NavItem {
                label: "My Submissions",
                path: "/student/submissions",
            },
        ],
    }
}

/// 页面外框：顶栏用户信息、导航与页脚
#[derive(Debug, Clone, Serialize)]
pub struct Shell {
    pub portal_name: &'static str,
    pub user_name: String,
    pub user_email: String,
    pub user_initial: String,
    pub role: Role,
    pub role_chip: String,
    pub dashboard_title: String,
    pub nav: Vec<NavItem>,
    pub footer: String,
}

impl Shell {
    pub fn for_session(session: &Session) -> Self {
        let role = session.role;
        Self {
            portal_name: PORTAL_NAME,
            user_name: session.name.clone(),
            user_email: session.email.clone(),
            user_initial: session.initial(),
            role,
            role_chip: role.to_string().to_uppercase(),
            dashboard_title: format!("{} Dashboard", role.label()),
            nav: nav_items(role),
            footer: format!(
                "{PORTAL_NAME} v{PORTAL_VERSION} • {} Dashboard",
                role.label()
            ),
        }
    }
}

/// 渲染的完整页面
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub view: View,
    pub title: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shell: Option<Shell>,
    pub notice: Option<Notice>,
    pub body: T,
}

impl<T> Page<T> {
    pub fn new(view: View, shell: Option<Shell>, notice: Option<Notice>, body: T) -> Self {
        Self {
            view,
            title: view.title(),
            shell,
            notice,
            body,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct LoginView {
    pub email: String,
    pub error: Option<String>,
}
