pub mod dashboard;
pub mod delete;
pub mod detail;
pub mod form;
pub mod submissions;
pub mod transition;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::client::PortalApi;
use crate::errors::Result;
use crate::models::assignments::requests::{
    AssignmentFormInput, DeleteRequest, TeacherDashboardQuery, TransitionRequest,
};
use crate::models::submissions::requests::ReviewRequest;

pub struct TeacherService {
    api: Option<Arc<dyn PortalApi>>,
}

impl TeacherService {
    pub fn new_lazy() -> Self {
        Self { api: None }
    }

    pub(crate) fn get_api(&self, request: &HttpRequest) -> Result<Arc<dyn PortalApi>> {
        super::portal_api(&self.api, request)
    }

    pub async fn dashboard(
        &self,
        request: &HttpRequest,
        query: TeacherDashboardQuery,
    ) -> ActixResult<HttpResponse> {
        dashboard::teacher_dashboard(self, request, query).await
    }

    pub async fn new_assignment_page(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        form::new_assignment_page(request).await
    }

    pub async fn create_assignment(
        &self,
        request: &HttpRequest,
        input: AssignmentFormInput,
    ) -> ActixResult<HttpResponse> {
        form::create_assignment(self, request, input).await
    }

    pub async fn edit_assignment_page(
        &self,
        request: &HttpRequest,
        assignment_id: String,
    ) -> ActixResult<HttpResponse> {
        form::edit_assignment_page(self, request, assignment_id).await
    }

    pub async fn update_assignment(
        &self,
        request: &HttpRequest,
        assignment_id: String,
        input: AssignmentFormInput,
    ) -> ActixResult<HttpResponse> {
        form::update_assignment(self, request, assignment_id, input).await
    }

    pub async fn assignment_details(
        &self,
        request: &HttpRequest,
        assignment_id: String,
    ) -> ActixResult<HttpResponse> {
        detail::assignment_details(self, request, assignment_id).await
    }

    pub async fn change_status(
        &self,
        request: &HttpRequest,
        assignment_id: String,
        req: TransitionRequest,
    ) -> ActixResult<HttpResponse> {
        transition::change_status(self, request, assignment_id, req).await
    }

    pub async fn delete_assignment(
        &self,
        request: &HttpRequest,
        assignment_id: String,
        req: DeleteRequest,
    ) -> ActixResult<HttpResponse> {
        delete::delete_assignment(self, request, assignment_id, req).await
    }

    pub async fn submissions(
        &self,
        request: &HttpRequest,
        assignment_id: String,
    ) -> ActixResult<HttpResponse> {
        submissions::list_submissions(self, request, assignment_id).await
    }

    pub async fn review_submission(
        &self,
        request: &HttpRequest,
        assignment_id: String,
        submission_id: String,
        review: ReviewRequest,
    ) -> ActixResult<HttpResponse> {
        submissions::review_submission(self, request, assignment_id, submission_id, review).await
    }
}

/// 作业详情页地址
pub(crate) fn details_path(assignment_id: &str) -> String {
    format!("/teacher/assignments/{assignment_id}")
}
