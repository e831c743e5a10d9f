//! 学生提交答案
//!
//! 作答内容在发出请求前校验；资格基于同一次请求中拉取的作业与提交记录判定，
//! 上游仍会独立校验。

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::Utc;
use futures_util::future::try_join;
use tracing::{info, warn};

use super::StudentService;
use crate::client::PortalApi;
use crate::errors::{PortalError, Result};
use crate::models::assignments::entities::Assignment;
use crate::models::submissions::{
    eligibility::{check_answer, check_submission},
    entities::Submission,
    requests::{NewSubmissionPayload, SubmitAnswerInput},
};
use crate::models::views::{Notice, View, student::SubmissionFormView};
use crate::services::{
    audit_timestamps, current_session, expire_session, redirect_home, redirect_with_notice,
    render, render_failure,
};

/// 同时拉取作业与本人的提交记录，返回作业及已有的提交
async fn load_with_existing(
    api: &dyn PortalApi,
    token: &str,
    assignment_id: &str,
) -> Result<(Assignment, Option<Submission>)> {
    let (assignment, mine) = try_join(
        api.get_assignment(token, assignment_id),
        api.list_my_submissions(token),
    )
    .await?;
    audit_timestamps([&assignment]);
    let existing = mine
        .into_iter()
        .find(|submission| submission.assignment.id() == assignment_id);
    Ok((assignment, existing))
}

pub async fn submit_page(
    service: &StudentService,
    request: &HttpRequest,
    assignment_id: String,
) -> ActixResult<HttpResponse> {
    let entry = current_session(request)?;
    let ticket = entry.current_ticket();
    let api = service.get_api(request)?;

    match load_with_existing(&*api, entry.api_token(), &assignment_id).await {
        Ok((assignment, existing)) => Ok(render(
            &entry,
            View::SubmitAssignment,
            SubmissionFormView::build(assignment, existing.as_ref(), Utc::now()),
        )),
        Err(e) if e.ends_session() => Ok(expire_session(request, &entry).await),
        Err(e) if e.is_forbidden() => {
            Ok(redirect_home(&entry, ticket, &e, "Failed to load assignment"))
        }
        Err(e) => {
            warn!("Failed to load assignment {}: {}", assignment_id, e);
            let message = e.surface("Failed to load assignment");
            Ok(render_failure(
                &entry,
                View::SubmitAssignment,
                SubmissionFormView::failed(message.clone()),
                &e,
                message,
            ))
        }
    }
}

pub async fn submit_answer(
    service: &StudentService,
    request: &HttpRequest,
    assignment_id: String,
    input: SubmitAnswerInput,
) -> ActixResult<HttpResponse> {
    let entry = current_session(request)?;
    let ticket = entry.current_ticket();

    // 作答内容不合格时不发出任何请求
    if let Err(rejection) = check_answer(&input.answer) {
        return Ok(render_failure(
            &entry,
            View::SubmitAssignment,
            SubmissionFormView::answer_rejected(&input.answer, rejection.message()),
            &PortalError::from(rejection),
            rejection.message().to_string(),
        ));
    }

    let api = service.get_api(request)?;
    let token = entry.api_token();
    let now = Utc::now();

    let (assignment, existing) = match load_with_existing(&*api, token, &assignment_id).await
    {
        Ok(loaded) => loaded,
        Err(e) if e.ends_session() => return Ok(expire_session(request, &entry).await),
        Err(e) if e.is_forbidden() => {
            return Ok(redirect_home(&entry, ticket, &e, "Failed to submit answer"));
        }
        Err(e) => {
            warn!("Failed to load assignment {} before submitting: {}", assignment_id, e);
            let message = e.surface("Failed to submit answer");
            return Ok(render_failure(
                &entry,
                View::SubmitAssignment,
                SubmissionFormView::answer_rejected(&input.answer, &message),
                &e,
                message,
            ));
        }
    };

    let answer = match check_submission(&assignment, existing.is_some(), &input.answer, now) {
        Ok(answer) => answer,
        Err(rejection) => {
            info!(
                "Submission by {} to assignment {} rejected: {}",
                entry.session().email,
                assignment_id,
                rejection
            );
            let view = SubmissionFormView::build(assignment, existing.as_ref(), now)
                .rejected(&input.answer, rejection.message());
            return Ok(render_failure(
                &entry,
                View::SubmitAssignment,
                view,
                &PortalError::from(rejection),
                rejection.message().to_string(),
            ));
        }
    };

    let payload = NewSubmissionPayload {
        assignment_id: assignment_id.clone(),
        answer: answer.to_string(),
    };

    match api.create_submission(token, &payload).await {
        Ok(submission) => {
            info!(
                "Submission {} created by {} for assignment {}",
                submission.id,
                entry.session().email,
                assignment_id
            );
            Ok(redirect_with_notice(
                &entry,
                ticket,
                Notice::success("Answer submitted successfully!"),
                "/student/dashboard",
            ))
        }
        Err(e) if e.ends_session() => Ok(expire_session(request, &entry).await),
        Err(e) if e.is_forbidden() => {
            Ok(redirect_home(&entry, ticket, &e, "Failed to submit answer"))
        }
        Err(e) => {
            warn!("Failed to submit answer to assignment {}: {}", assignment_id, e);
            let message = e.surface("Failed to submit answer");
            let view = SubmissionFormView::build(assignment, existing.as_ref(), now)
                .rejected(&input.answer, &message);
            Ok(render_failure(&entry, View::SubmitAssignment, view, &e, message))
        }
    }
}
