use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use futures_util::future::try_join3;
use tracing::warn;

use super::TeacherService;
use crate::models::assignments::{requests::TeacherDashboardQuery, status::AssignmentStatus};
use crate::models::views::{View, teacher::TeacherDashboardView};
use crate::services::{audit_timestamps, current_session, expire_session, render, render_failure};

pub async fn teacher_dashboard(
    service: &TeacherService,
    request: &HttpRequest,
    query: TeacherDashboardQuery,
) -> ActixResult<HttpResponse> {
    let entry = current_session(request)?;
    let api = service.get_api(request)?;
    let selected = query.status.unwrap_or(AssignmentStatus::Draft);
    let token = entry.api_token();

    // 三个状态分别拉取，保证每个标签的计数准确
    let lists = try_join3(
        api.list_teacher_assignments(token, Some(AssignmentStatus::Draft)),
        api.list_teacher_assignments(token, Some(AssignmentStatus::Published)),
        api.list_teacher_assignments(token, Some(AssignmentStatus::Completed)),
    )
    .await;

    match lists {
        Ok((drafts, published, completed)) => {
            audit_timestamps(drafts.iter().chain(&published).chain(&completed));
            let view = TeacherDashboardView::build(selected, [drafts, published, completed]);
            Ok(render(&entry, View::TeacherDashboard, view))
        }
        Err(e) if e.ends_session() => Ok(expire_session(request, &entry).await),
        Err(e) => {
            warn!("Failed to load assignments for {}: {}", entry.session().email, e);
            let message = e.surface("Failed to load assignments");
            Ok(render_failure(
                &entry,
                View::TeacherDashboard,
                TeacherDashboardView::empty(selected),
                &e,
                message,
            ))
        }
    }
}
