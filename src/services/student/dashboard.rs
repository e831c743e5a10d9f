use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::Utc;
use tracing::warn;

use super::StudentService;
use crate::models::assignments::requests::StudentDashboardQuery;
use crate::models::views::{View, student::StudentDashboardView};
use crate::services::{audit_timestamps, current_session, expire_session, render, render_failure};

pub async fn student_dashboard(
    service: &StudentService,
    request: &HttpRequest,
    query: StudentDashboardQuery,
) -> ActixResult<HttpResponse> {
    let entry = current_session(request)?;
    let api = service.get_api(request)?;
    let tab = query.tab.unwrap_or_default();

    match api.list_student_assignments(entry.api_token()).await {
        Ok(items) => {
            audit_timestamps(items.iter().map(|item| &item.assignment));
            Ok(render(
                &entry,
                View::StudentDashboard,
                StudentDashboardView::build(tab, &items, Utc::now()),
            ))
        }
        Err(e) if e.ends_session() => Ok(expire_session(request, &entry).await),
        Err(e) => {
            warn!("Failed to load assignments for {}: {}", entry.session().email, e);
            let message = e.surface("Failed to load assignments");
            Ok(render_failure(
                &entry,
                View::StudentDashboard,
                StudentDashboardView::failed(tab, message.clone()),
                &e,
                message,
            ))
        }
    }
}
