use chrono::{DateTime, NaiveDateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::assignments::requests::AssignmentFormInput;
use crate::models::views::teacher::FormMode;

static RESOURCE_ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-]{1,64}$").expect("Invalid resource id regex"));

/// `<input type="datetime-local">` 提交的格式，按 UTC 解释
const LOCAL_DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S"];

/// 通过校验的作业表单
#[derive(Debug, Clone, PartialEq)]
pub struct ValidAssignmentForm {
    pub title: String,
    pub description: String,
    pub due_date: DateTime<Utc>,
}

pub fn validate_resource_id(id: &str) -> Result<(), &'static str> {
    // 上游 ID 只包含字母、数字、下划线或连字符
    if !RESOURCE_ID_RE.is_match(id) {
        return Err("Invalid resource id");
    }
    Ok(())
}

/// 解析截止时间，空白或格式无法识别时返回 `None`
pub fn parse_due_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    LOCAL_DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(|naive| naive.and_utc())
}

/// 作业表单校验，在发出任何请求之前完成
///
/// 新建时截止时间必须晚于当前时间；编辑时只要求存在。
pub fn validate_assignment_form(
    input: &AssignmentFormInput,
    mode: FormMode,
    now: DateTime<Utc>,
) -> Result<ValidAssignmentForm, &'static str> {
    let title = input.title.trim();
    if title.is_empty() {
        return Err("Title is required");
    }
    let description = input.description.trim();
    if description.is_empty() {
        return Err("Description is required");
    }

    let due_date = input.due_date.as_deref().and_then(parse_due_date);
    let due_date = match (mode, due_date) {
        (FormMode::Create, Some(due)) if due > now => due,
        (FormMode::Create, _) => return Err("Due date must be in the future"),
        (FormMode::Edit, Some(due)) => due,
        (FormMode::Edit, None) => return Err("Due date is required"),
    };

    Ok(ValidAssignmentForm {
        title: title.to_string(),
        description: description.to_string(),
        due_date,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn input(title: &str, description: &str, due_date: Option<String>) -> AssignmentFormInput {
        AssignmentFormInput {
            title: title.into(),
            description: description.into(),
            due_date,
        }
    }

    #[test]
    fn test_resource_ids() {
        assert!(validate_resource_id("64b7f0c2e4a1").is_ok());
        assert!(validate_resource_id("a_b-c").is_ok());
        assert!(validate_resource_id("").is_err());
        assert!(validate_resource_id("../etc").is_err());
        assert!(validate_resource_id(&"x".repeat(65)).is_err());
    }

    #[test]
    fn test_parse_due_date_formats() {
        let rfc = parse_due_date("2026-03-01T09:30:00Z").unwrap();
        let local = parse_due_date("2026-03-01T09:30").unwrap();
        assert_eq!(rfc, local);
        assert!(parse_due_date("  ").is_none());
        assert!(parse_due_date("next tuesday").is_none());
    }

    #[test]
    fn test_required_fields_in_order() {
        let now = Utc::now();
        let due = Some((now + Duration::days(7)).to_rfc3339());

        assert_eq!(
            validate_assignment_form(&input("  ", "", None), FormMode::Create, now),
            Err("Title is required")
        );
        assert_eq!(
            validate_assignment_form(&input("Essay", " ", due.clone()), FormMode::Create, now),
            Err("Description is required")
        );

        let valid =
            validate_assignment_form(&input(" Essay ", "Write one page", due), FormMode::Create, now)
                .unwrap();
        assert_eq!(valid.title, "Essay");
    }

    #[test]
    fn test_due_date_rules_differ_by_mode() {
        let now = Utc::now();
        let past = Some((now - Duration::days(1)).to_rfc3339());

        assert_eq!(
            validate_assignment_form(&input("Essay", "Body", past.clone()), FormMode::Create, now),
            Err("Due date must be in the future")
        );
        assert!(validate_assignment_form(&input("Essay", "Body", past), FormMode::Edit, now).is_ok());
        assert_eq!(
            validate_assignment_form(&input("Essay", "Body", Some(String::new())), FormMode::Edit, now),
            Err("Due date is required")
        );
    }
}
