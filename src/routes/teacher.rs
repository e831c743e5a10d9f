use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::AccessGate;
use crate::models::assignments::requests::{
    AssignmentFormInput, DeleteRequest, TeacherDashboardQuery, TransitionRequest,
};
use crate::models::submissions::requests::ReviewRequest;
use crate::models::views::View;
use crate::services::TeacherService;
use crate::utils::{SafeAssignmentId, SafeSubmissionId};

// 懒加载的全局 TeacherService 实例
static TEACHER_SERVICE: Lazy<TeacherService> = Lazy::new(TeacherService::new_lazy);

// 教师首页
pub async fn dashboard(
    req: HttpRequest,
    query: web::Query<TeacherDashboardQuery>,
) -> ActixResult<HttpResponse> {
    TEACHER_SERVICE.dashboard(&req, query.into_inner()).await
}

// 新建作业表单
pub async fn new_assignment_page(req: HttpRequest) -> ActixResult<HttpResponse> {
    TEACHER_SERVICE.new_assignment_page(&req).await
}

// 新建作业
pub async fn create_assignment(
    req: HttpRequest,
    form: web::Form<AssignmentFormInput>,
) -> ActixResult<HttpResponse> {
    TEACHER_SERVICE
        .create_assignment(&req, form.into_inner())
        .await
}

// 作业详情
pub async fn assignment_details(
    req: HttpRequest,
    path: SafeAssignmentId,
) -> ActixResult<HttpResponse> {
    TEACHER_SERVICE.assignment_details(&req, path.0).await
}

// 编辑作业表单
pub async fn edit_assignment_page(
    req: HttpRequest,
    path: SafeAssignmentId,
) -> ActixResult<HttpResponse> {
    TEACHER_SERVICE.edit_assignment_page(&req, path.0).await
}

// 更新作业
pub async fn update_assignment(
    req: HttpRequest,
    path: SafeAssignmentId,
    form: web::Form<AssignmentFormInput>,
) -> ActixResult<HttpResponse> {
    TEACHER_SERVICE
        .update_assignment(&req, path.0, form.into_inner())
        .await
}

// 状态变更
pub async fn change_status(
    req: HttpRequest,
    path: SafeAssignmentId,
    form: web::Form<TransitionRequest>,
) -> ActixResult<HttpResponse> {
    TEACHER_SERVICE
        .change_status(&req, path.0, form.into_inner())
        .await
}

// 删除作业
pub async fn delete_assignment(
    req: HttpRequest,
    path: SafeAssignmentId,
    form: web::Form<DeleteRequest>,
) -> ActixResult<HttpResponse> {
    TEACHER_SERVICE
        .delete_assignment(&req, path.0, form.into_inner())
        .await
}

// 提交列表
pub async fn submissions(req: HttpRequest, path: SafeAssignmentId) -> ActixResult<HttpResponse> {
    TEACHER_SERVICE.submissions(&req, path.0).await
}

// 批阅提交
pub async fn review_submission(
    req: HttpRequest,
    assignment: SafeAssignmentId,
    submission: SafeSubmissionId,
    form: web::Form<ReviewRequest>,
) -> ActixResult<HttpResponse> {
    TEACHER_SERVICE
        .review_submission(&req, assignment.0, submission.0, form.into_inner())
        .await
}

// 配置路由
pub fn configure_teacher_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/teacher")
            .wrap(AccessGate::for_view(View::TeacherDashboard))
            .route("/dashboard", web::get().to(dashboard))
            .route("/assignments", web::post().to(create_assignment))
            // 需在 {id} 之前注册
            .route("/assignments/new", web::get().to(new_assignment_page))
            .route("/assignments/{id}", web::get().to(assignment_details))
            .service(
                web::resource("/assignments/{id}/edit")
                    .route(web::get().to(edit_assignment_page))
                    .route(web::post().to(update_assignment)),
            )
            .route("/assignments/{id}/status", web::post().to(change_status))
            .route("/assignments/{id}/delete", web::post().to(delete_assignment))
            .route("/assignments/{id}/submissions", web::get().to(submissions))
            .route(
                "/assignments/{id}/submissions/{submission_id}/review",
                web::post().to(review_submission),
            ),
    );
}
