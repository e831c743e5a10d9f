use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use futures_util::future::try_join;
use tracing::{info, warn};

use super::TeacherService;
use crate::models::submissions::requests::ReviewRequest;
use crate::models::views::{Notice, View, teacher::SubmissionListView};
use crate::services::{
    audit_timestamps, current_session, expire_session, redirect_home, redirect_with_notice,
    render, render_failure,
};
use crate::utils::see_other;

/// 提交列表页地址
pub(crate) fn submissions_path(assignment_id: &str) -> String {
    format!("/teacher/assignments/{assignment_id}/submissions")
}

pub async fn list_submissions(
    service: &TeacherService,
    request: &HttpRequest,
    assignment_id: String,
) -> ActixResult<HttpResponse> {
    let entry = current_session(request)?;
    let ticket = entry.current_ticket();
    let api = service.get_api(request)?;
    let token = entry.api_token();

    let loaded = try_join(
        api.get_assignment(token, &assignment_id),
        api.list_assignment_submissions(token, &assignment_id),
    )
    .await;

    match loaded {
        Ok((assignment, submissions)) => {
            audit_timestamps([&assignment]);
            Ok(render(
                &entry,
                View::SubmissionList,
                SubmissionListView::loaded(assignment, &submissions),
            ))
        }
        Err(e) if e.ends_session() => Ok(expire_session(request, &entry).await),
        Err(e) if e.is_forbidden() => {
            Ok(redirect_home(&entry, ticket, &e, "Failed to load submissions"))
        }
        Err(e) => {
            warn!(
                "Failed to load submissions of assignment {}: {}",
                assignment_id, e
            );
            let message = e.surface("Failed to load submissions");
            Ok(render_failure(
                &entry,
                View::SubmissionList,
                SubmissionListView::failed(message.clone()),
                &e,
                message,
            ))
        }
    }
}

/// 标记或取消标记已批阅
///
/// 成功后不单独提示，重定向回列表即可看到新的状态。
pub async fn review_submission(
    service: &TeacherService,
    request: &HttpRequest,
    assignment_id: String,
    submission_id: String,
    review: ReviewRequest,
) -> ActixResult<HttpResponse> {
    let entry = current_session(request)?;
    let ticket = entry.current_ticket();
    let api = service.get_api(request)?;
    let back = submissions_path(&assignment_id);

    match api
        .review_submission(entry.api_token(), &submission_id, &review)
        .await
    {
        Ok(updated) => {
            info!(
                "Submission {} marked reviewed={} by {}",
                updated.id,
                updated.reviewed,
                entry.session().email
            );
            Ok(see_other(&back))
        }
        Err(e) if e.ends_session() => Ok(expire_session(request, &entry).await),
        Err(e) if e.is_forbidden() => {
            Ok(redirect_home(&entry, ticket, &e, "Failed to update review"))
        }
        Err(e) => {
            warn!("Failed to review submission {}: {}", submission_id, e);
            Ok(redirect_with_notice(
                &entry,
                ticket,
                Notice::error(e.surface("Failed to update review")),
                &back,
            ))
        }
    }
}
