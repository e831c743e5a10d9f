use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{info, warn};

use super::{TeacherService, details_path};
use crate::models::assignments::requests::{ReturnTo, TransitionRequest};
use crate::models::views::Notice;
use crate::services::{current_session, expire_session, redirect_home, redirect_with_notice};

/// 状态变更
///
/// 先按调用方最后看到的状态在本地检查，非法的转换不会发出请求。
/// 无论成功与否都重定向回原页面重新拉取，时间戳只以上游为准。
pub async fn change_status(
    service: &TeacherService,
    request: &HttpRequest,
    assignment_id: String,
    req: TransitionRequest,
) -> ActixResult<HttpResponse> {
    let entry = current_session(request)?;
    let ticket = entry.current_ticket();
    let target = req.status;
    let back = match req.return_to {
        ReturnTo::Dashboard => format!("/teacher/dashboard?status={}", req.current),
        ReturnTo::Details => details_path(&assignment_id),
    };

    if let Err(e) = req.current.check_transition(target) {
        info!(
            "Rejected {} -> {} for assignment {} before calling upstream",
            req.current, target, assignment_id
        );
        let notice = Notice::error(e.message());
        return Ok(redirect_with_notice(&entry, ticket, notice, &back));
    }

    let api = service.get_api(request)?;
    let notice = match api
        .update_assignment_status(entry.api_token(), &assignment_id, target)
        .await
    {
        Ok(updated) => {
            info!("Assignment {} is now {}", updated.id, updated.status);
            Notice::success(format!("Assignment {target} successfully!"))
        }
        Err(e) if e.ends_session() => return Ok(expire_session(request, &entry).await),
        Err(e) if e.is_forbidden() => {
            let fallback = format!("Failed to {} assignment", target.action_verb());
            return Ok(redirect_home(&entry, ticket, &e, &fallback));
        }
        Err(e) => {
            warn!(
                "Failed to change status of assignment {} to {}: {}",
                assignment_id, target, e
            );
            Notice::error(e.surface(&format!("Failed to {} assignment", target.action_verb())))
        }
    };

    Ok(redirect_with_notice(&entry, ticket, notice, &back))
}
