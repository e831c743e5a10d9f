use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::warn;

use super::TeacherService;
use crate::models::views::{View, teacher::AssignmentDetailsView};
use crate::services::{
    audit_timestamps, current_session, expire_session, redirect_home, render, render_failure,
};

pub async fn assignment_details(
    service: &TeacherService,
    request: &HttpRequest,
    assignment_id: String,
) -> ActixResult<HttpResponse> {
    let entry = current_session(request)?;
    let ticket = entry.current_ticket();
    let api = service.get_api(request)?;

    match api.get_assignment(entry.api_token(), &assignment_id).await {
        Ok(assignment) => {
            audit_timestamps([&assignment]);
            Ok(render(
                &entry,
                View::AssignmentDetails,
                AssignmentDetailsView::loaded(assignment),
            ))
        }
        Err(e) if e.ends_session() => Ok(expire_session(request, &entry).await),
        Err(e) if e.is_forbidden() => {
            Ok(redirect_home(&entry, ticket, &e, "Failed to load assignment"))
        }
        Err(e) => {
            warn!("Failed to load assignment {}: {}", assignment_id, e);
            let message = e.surface("Failed to load assignment");
            Ok(render_failure(
                &entry,
                View::AssignmentDetails,
                AssignmentDetailsView::failed(message.clone()),
                &e,
                message,
            ))
        }
    }
}
