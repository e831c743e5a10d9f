//! 作业状态机
//!
//! 状态只能单向前进：`draft → published → completed`。
//! `completed` 为终态，不允许回退、跳跃或原地"转换"。

use serde::{Deserialize, Serialize};

use crate::errors::{PortalError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssignmentStatus {
    Draft,
    Published,
    Completed,
}

impl AssignmentStatus {
    pub const ALL: [AssignmentStatus; 3] = [
        AssignmentStatus::Draft,
        AssignmentStatus::Published,
        AssignmentStatus::Completed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AssignmentStatus::Draft => "draft",
            AssignmentStatus::Published => "published",
            AssignmentStatus::Completed => "completed",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AssignmentStatus::Draft => "Draft",
            AssignmentStatus::Published => "Published",
            AssignmentStatus::Completed => "Completed",
        }
    }

    /// 进入该状态的动作名，用于提示文案
    pub fn action_verb(&self) -> &'static str {
        match self {
            AssignmentStatus::Draft => "revert",
            AssignmentStatus::Published => "publish",
            AssignmentStatus::Completed => "complete",
        }
    }

    /// 唯一合法的后继状态
    pub fn successor(&self) -> Option<AssignmentStatus> {
        match self {
            AssignmentStatus::Draft => Some(AssignmentStatus::Published),
            AssignmentStatus::Published => Some(AssignmentStatus::Completed),
            AssignmentStatus::Completed => None,
        }
    }

    pub fn can_transition_to(&self, target: AssignmentStatus) -> bool {
        self.successor() == Some(target)
    }

    /// 校验状态转换，非法时返回 `InvalidTransition`
    pub fn check_transition(&self, target: AssignmentStatus) -> Result<()> {
        if self.can_transition_to(target) {
            return Ok(());
        }

        let reason = match self.successor() {
            Some(next) => format!(
                "Cannot change assignment status from {self} to {target}; the only allowed next status is {next}"
            ),
            None => format!("Cannot change assignment status: {self} assignments are final"),
        };
        Err(PortalError::invalid_transition(reason))
    }

    /// 只有草稿可以删除
    pub fn check_deletable(&self) -> Result<()> {
        if *self == AssignmentStatus::Draft {
            return Ok(());
        }
        Err(PortalError::invalid_transition(format!(
            "Cannot delete a {self} assignment; only drafts can be deleted"
        )))
    }

    /// 学生列表只展示已发布的作业
    pub fn is_listed_to_students(&self) -> bool {
        matches!(self, AssignmentStatus::Published)
    }
}

impl std::fmt::Display for AssignmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for AssignmentStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "draft" => Ok(AssignmentStatus::Draft),
            "published" => Ok(AssignmentStatus::Published),
            "completed" => Ok(AssignmentStatus::Completed),
            _ => Err(format!("Invalid assignment status: {s}")),
        }
    }
}

/// 某状态下界面允许的操作
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AssignmentActions {
    pub can_edit: bool,
    pub can_publish: bool,
    pub can_complete: bool,
    pub can_delete: bool,
    pub can_view_submissions: bool,
}

impl AssignmentActions {
    pub fn for_status(status: AssignmentStatus) -> Self {
        let is_draft = status == AssignmentStatus::Draft;
        Self {
            can_edit: is_draft,
            can_publish: status.can_transition_to(AssignmentStatus::Published),
            can_complete: status.can_transition_to(AssignmentStatus::Completed),
            can_delete: status.check_deletable().is_ok(),
            can_view_submissions: status == AssignmentStatus::Published,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use super::AssignmentStatus::{Completed, Draft, Published};

    #[test]
    fn test_only_forward_transitions_are_legal() {
        for from in AssignmentStatus::ALL {
            for to in AssignmentStatus::ALL {
                let legal = matches!((from, to), (Draft, Published) | (Published, Completed));
                assert_eq!(from.can_transition_to(to), legal, "{from} -> {to}");

                let checked = from.check_transition(to);
                if legal {
                    assert!(checked.is_ok());
                } else {
                    let err = checked.unwrap_err();
                    assert_eq!(err.code(), "E003", "{from} -> {to}");
                }
            }
        }
    }

    #[test]
    fn test_draft_cannot_skip_to_completed() {
        let err = Draft.check_transition(Completed).unwrap_err();
        assert!(err.message().contains("only allowed next status is published"));
    }

    #[test]
    fn test_completed_is_terminal() {
        assert_eq!(Completed.successor(), None);
        let err = Completed.check_transition(Draft).unwrap_err();
        assert!(err.message().contains("final"));
    }

    #[test]
    fn test_only_drafts_are_deletable() {
        assert!(Draft.check_deletable().is_ok());
        for status in [Published, Completed] {
            let err = status.check_deletable().unwrap_err();
            assert_eq!(err.code(), "E003");
            assert!(err.message().contains("only drafts can be deleted"));
        }
    }

    #[test]
    fn test_student_visibility() {
        assert!(!Draft.is_listed_to_students());
        assert!(Published.is_listed_to_students());
        assert!(!Completed.is_listed_to_students());
    }

    #[test]
    fn test_actions_per_status() {
        let draft = AssignmentActions::for_status(Draft);
        assert!(draft.can_edit && draft.can_publish && draft.can_delete);
        assert!(!draft.can_complete && !draft.can_view_submissions);

        let published = AssignmentActions::for_status(Published);
        assert!(published.can_complete && published.can_view_submissions);
        assert!(!published.can_edit && !published.can_publish && !published.can_delete);

        let completed = AssignmentActions::for_status(Completed);
        assert_eq!(
            completed,
            AssignmentActions {
                can_edit: false,
                can_publish: false,
                can_complete: false,
                can_delete: false,
                can_view_submissions: false,
            }
        );
    }

    #[test]
    fn test_wire_format() {
        assert_eq!(serde_json::to_string(&Published).unwrap(), "\"published\"");
        assert_eq!("completed".parse::<AssignmentStatus>(), Ok(Completed));
        assert!("archived".parse::<AssignmentStatus>().is_err());
    }
}
