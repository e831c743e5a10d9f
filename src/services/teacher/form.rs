use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::Utc;
use tracing::{info, warn};

use super::{TeacherService, details_path};
use crate::errors::PortalError;
use crate::models::assignments::{
    requests::{AssignmentFormInput, CreateAssignmentPayload, UpdateAssignmentPayload},
    status::AssignmentStatus,
};
use crate::models::views::{
    Notice, View,
    teacher::{AssignmentFormView, FormMode},
};
use crate::services::{
    audit_timestamps, current_session, expire_session, redirect_home, redirect_with_notice,
    render, render_failure,
};
use crate::utils::validate::validate_assignment_form;

pub async fn new_assignment_page(request: &HttpRequest) -> ActixResult<HttpResponse> {
    let entry = current_session(request)?;
    Ok(render(
        &entry,
        View::NewAssignment,
        AssignmentFormView::create_defaults(Utc::now()),
    ))
}

pub async fn create_assignment(
    service: &TeacherService,
    request: &HttpRequest,
    input: AssignmentFormInput,
) -> ActixResult<HttpResponse> {
    let entry = current_session(request)?;
    let ticket = entry.current_ticket();
    let now = Utc::now();

    // 校验失败时不发出请求
    let form = match validate_assignment_form(&input, FormMode::Create, now) {
        Ok(form) => form,
        Err(message) => {
            let err = PortalError::validation_failed(message);
            let view = AssignmentFormView::create_defaults(now).rejected(&input, message);
            return Ok(render_failure(
                &entry,
                View::NewAssignment,
                view,
                &err,
                message.to_string(),
            ));
        }
    };

    let api = service.get_api(request)?;
    let payload = CreateAssignmentPayload {
        title: form.title,
        description: form.description,
        due_date: form.due_date,
        status: AssignmentStatus::Draft,
    };

    match api.create_assignment(entry.api_token(), &payload).await {
        Ok(created) => {
            info!(
                "Assignment {} created by {}",
                created.id,
                entry.session().email
            );
            Ok(redirect_with_notice(
                &entry,
                ticket,
                Notice::success("Assignment created successfully!"),
                "/teacher/dashboard",
            ))
        }
        Err(e) if e.ends_session() => Ok(expire_session(request, &entry).await),
        Err(e) if e.is_forbidden() => {
            Ok(redirect_home(&entry, ticket, &e, "Failed to save assignment"))
        }
        Err(e) => {
            warn!("Failed to create assignment: {}", e);
            let message = e.surface("Failed to save assignment");
            let view = AssignmentFormView::create_defaults(now).rejected(&input, &message);
            Ok(render_failure(&entry, View::NewAssignment, view, &e, message))
        }
    }
}

pub async fn edit_assignment_page(
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
                View::EditAssignment,
                AssignmentFormView::edit(&assignment),
            ))
        }
        Err(e) if e.ends_session() => Ok(expire_session(request, &entry).await),
        Err(e) if e.is_forbidden() => {
            Ok(redirect_home(&entry, ticket, &e, "Failed to load assignment"))
        }
        Err(e) => {
            warn!("Failed to load assignment {}: {}", assignment_id, e);
            let message = e.surface("Failed to load assignment");
            let view = AssignmentFormView::edit_failed(&assignment_id, message.clone());
            Ok(render_failure(&entry, View::EditAssignment, view, &e, message))
        }
    }
}

/// 编辑只修改标题、描述与截止时间，状态保持不变
pub async fn update_assignment(
    service: &TeacherService,
    request: &HttpRequest,
    assignment_id: String,
    input: AssignmentFormInput,
) -> ActixResult<HttpResponse> {
    let entry = current_session(request)?;
    let ticket = entry.current_ticket();

    let form = match validate_assignment_form(&input, FormMode::Edit, Utc::now()) {
        Ok(form) => form,
        Err(message) => {
            let err = PortalError::validation_failed(message);
            let view = AssignmentFormView::edit_failed(&assignment_id, String::new())
                .rejected(&input, message);
            return Ok(render_failure(
                &entry,
                View::EditAssignment,
                view,
                &err,
                message.to_string(),
            ));
        }
    };

    let api = service.get_api(request)?;
    let payload = UpdateAssignmentPayload {
        title: form.title,
        description: form.description,
        due_date: form.due_date,
    };

    match api
        .update_assignment(entry.api_token(), &assignment_id, &payload)
        .await
    {
        Ok(_) => Ok(redirect_with_notice(
            &entry,
            ticket,
            Notice::success("Assignment updated successfully!"),
            &details_path(&assignment_id),
        )),
        Err(e) if e.ends_session() => Ok(expire_session(request, &entry).await),
        Err(e) if e.is_forbidden() => {
            Ok(redirect_home(&entry, ticket, &e, "Failed to update assignment"))
        }
        Err(e) => {
            warn!("Failed to update assignment {}: {}", assignment_id, e);
            let message = e.surface("Failed to update assignment");
            let view = AssignmentFormView::edit_failed(&assignment_id, String::new())
                .rejected(&input, &message);
            Ok(render_failure(&entry, View::EditAssignment, view, &e, message))
        }
    }
}
