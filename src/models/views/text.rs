use chrono::{DateTime, Utc};

/// 截取前 `max_chars` 个字符，超出时追加省略号
pub fn excerpt(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

/// 距离截止时间的描述
pub fn time_remaining(due: DateTime<Utc>, now: DateTime<Utc>) -> String {
    if due <= now {
        return "Overdue".to_string();
    }

    match (due - now).num_days() {
        0 => "Due today".to_string(),
        1 => "Due tomorrow".to_string(),
        days @ 2..=6 => format!("Due in {days} days"),
        _ => format!("Due {}", due.format("%b %d")),
    }
}
