pub mod dashboard;
pub mod submissions;
pub mod submit;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::client::PortalApi;
use crate::errors::Result;
use crate::models::assignments::requests::StudentDashboardQuery;
use crate::models::submissions::requests::SubmitAnswerInput;

pub struct StudentService {
    api: Option<Arc<dyn PortalApi>>,
}

impl StudentService {
    pub fn new_lazy() -> Self {
        Self { api: None }
    }

    pub(crate) fn get_api(&self, request: &HttpRequest) -> Result<Arc<dyn PortalApi>> {
        super::portal_api(&self.api, request)
    }

    pub async fn dashboard(
        &self,
        request: &HttpRequest,
        query: StudentDashboardQuery,
    ) -> ActixResult<HttpResponse> {
        dashboard::student_dashboard(self, request, query).await
    }

    pub async fn submit_page(
        &self,
        request: &HttpRequest,
        assignment_id: String,
    ) -> ActixResult<HttpResponse> {
        submit::submit_page(self, request, assignment_id).await
    }

    pub async fn submit(
        &self,
        request: &HttpRequest,
        assignment_id: String,
        input: SubmitAnswerInput,
    ) -> ActixResult<HttpResponse> {
        submit::submit_answer(self, request, assignment_id, input).await
    }

    pub async fn my_submissions(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        submissions::my_submissions(self, request).await
    }
}
