use serde::{Deserialize, Serialize};

// 用户角色
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Teacher, // 教师
    Student, // 学生
}

impl Role {
    pub const TEACHER: &'static str = "teacher";
    pub const STUDENT: &'static str = "student";

    pub fn teacher_roles() -> &'static [Role] {
        &[Role::Teacher]
    }
    pub fn student_roles() -> &'static [Role] {
        &[Role::Student]
    }

    /// 角色的默认页面
    pub fn default_view(&self) -> &'static str {
        match self {
            Role::Teacher => "/teacher/dashboard",
            Role::Student => "/student/dashboard",
        }
    }

    /// 首字母大写的展示名
    pub fn label(&self) -> &'static str {
        match self {
            Role::Teacher => "Teacher",
            Role::Student => "Student",
        }
    }
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Teacher => write!(f, "{}", Role::TEACHER),
            Role::Student => write!(f, "{}", Role::STUDENT),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            Role::TEACHER => Ok(Role::Teacher),
            Role::STUDENT => Ok(Role::Student),
            _ => Err(format!(
                "Invalid role: '{s}'. Supported roles: teacher, student"
            )),
        }
    }
}

/// 已登录用户的身份
///
/// 由外部认证服务在登录成功后给出，会话期间不会被修改。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Session {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
}

impl Session {
    /// 头像上显示的首字母
    pub fn initial(&self) -> String {
        self.name
            .chars()
            .next()
            .map(|c| c.to_uppercase().collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_wire_format() {
        assert_eq!(serde_json::to_string(&Role::Teacher).unwrap(), "\"teacher\"");
        let role: Role = serde_json::from_str("\"student\"").unwrap();
        assert_eq!(role, Role::Student);
    }

    #[test]
    fn test_role_rejects_unknown() {
        assert!(serde_json::from_str::<Role>("\"admin\"").is_err());
        assert!(serde_json::from_str::<Role>("\"Teacher\"").is_err());
    }

    #[test]
    fn test_default_views() {
        assert_eq!(Role::Teacher.default_view(), "/teacher/dashboard");
        assert_eq!(Role::Student.default_view(), "/student/dashboard");
    }

    #[test]
    fn test_session_accepts_mongo_id() {
        let session: Session = serde_json::from_str(
            r#"{"_id":"u1","name":"ada","email":"ada@school.test","role":"teacher"}"#,
        )
        .unwrap();
        assert_eq!(session.id, "u1");
        assert_eq!(session.initial(), "A");
    }
}
