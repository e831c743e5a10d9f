use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::AccessGate;
use crate::models::assignments::requests::StudentDashboardQuery;
use crate::models::submissions::requests::SubmitAnswerInput;
use crate::models::views::View;
use crate::services::StudentService;
use crate::utils::SafeAssignmentId;

// 懒加载的全局 StudentService 实例
static STUDENT_SERVICE: Lazy<StudentService> = Lazy::new(StudentService::new_lazy);

// 学生首页
pub async fn dashboard(
    req: HttpRequest,
    query: web::Query<StudentDashboardQuery>,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.dashboard(&req, query.into_inner()).await
}

// 提交页
pub async fn submit_page(req: HttpRequest, path: SafeAssignmentId) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.submit_page(&req, path.0).await
}

// 提交答案
pub async fn submit(
    req: HttpRequest,
    path: SafeAssignmentId,
    form: web::Form<SubmitAnswerInput>,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE
        .submit(&req, path.0, form.into_inner())
        .await
}

// 我的提交
pub async fn my_submissions(req: HttpRequest) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.my_submissions(&req).await
}

// 配置路由
pub fn configure_student_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/student")
            .wrap(AccessGate::for_view(View::StudentDashboard))
            .route("/dashboard", web::get().to(dashboard))
            .service(
                web::resource("/assignments/{id}/submit")
                    .route(web::get().to(submit_page))
                    .route(web::post().to(submit)),
            )
            .route("/submissions", web::get().to(my_submissions)),
    );
}
