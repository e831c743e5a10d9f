use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{info, warn};

use super::{TeacherService, details_path};
use crate::models::assignments::requests::{DeleteRequest, ReturnTo};
use crate::models::views::Notice;
use crate::services::{current_session, expire_session, redirect_home, redirect_with_notice};

/// 删除作业，只有草稿可以删除
///
/// 与状态变更一样先按调用方最后看到的状态在本地检查，上游仍会再次校验。
pub async fn delete_assignment(
    service: &TeacherService,
    request: &HttpRequest,
    assignment_id: String,
    req: DeleteRequest,
) -> ActixResult<HttpResponse> {
    let entry = current_session(request)?;
    let ticket = entry.current_ticket();
    let back = match req.return_to {
        ReturnTo::Dashboard => "/teacher/dashboard".to_string(),
        ReturnTo::Details => details_path(&assignment_id),
    };

    if let Err(e) = req.current.check_deletable() {
        info!(
            "Rejected deleting {} assignment {} before calling upstream",
            req.current, assignment_id
        );
        return Ok(redirect_with_notice(&entry, ticket, Notice::error(e.message()), &back));
    }

    let api = service.get_api(request)?;
    match api.delete_assignment(entry.api_token(), &assignment_id).await {
        Ok(()) => {
            info!(
                "Assignment {} deleted by {}",
                assignment_id,
                entry.session().email
            );
            Ok(redirect_with_notice(
                &entry,
                ticket,
                Notice::success("Assignment deleted successfully!"),
                "/teacher/dashboard",
            ))
        }
        Err(e) if e.ends_session() => Ok(expire_session(request, &entry).await),
        Err(e) if e.is_forbidden() => {
            Ok(redirect_home(&entry, ticket, &e, "Failed to delete assignment"))
        }
        Err(e) => {
            warn!("Failed to delete assignment {}: {}", assignment_id, e);
            Ok(redirect_with_notice(
                &entry,
                ticket,
                Notice::error(e.surface("Failed to delete assignment")),
                &back,
            ))
        }
    }
}
