use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::warn;

use super::StudentService;
use crate::models::views::{View, student::MySubmissionsView};
use crate::services::{current_session, expire_session, redirect_home, render, render_failure};

pub async fn my_submissions(
    service: &StudentService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let entry = current_session(request)?;
    let ticket = entry.current_ticket();
    let api = service.get_api(request)?;

    match api.list_my_submissions(entry.api_token()).await {
        Ok(submissions) => Ok(render(
            &entry,
            View::MySubmissions,
            MySubmissionsView::build(&submissions),
        )),
        Err(e) if e.ends_session() => Ok(expire_session(request, &entry).await),
        Err(e) if e.is_forbidden() => {
            Ok(redirect_home(&entry, ticket, &e, "Failed to load submissions"))
        }
        Err(e) => {
            warn!("Failed to load submissions for {}: {}", entry.session().email, e);
            let message = e.surface("Failed to load submissions");
            Ok(render_failure(
                &entry,
                View::MySubmissions,
                MySubmissionsView::failed(message.clone()),
                &e,
                message,
            ))
        }
    }
}
