use tokio::signal;
use tracing::warn;

use crate::session::SessionStore;

/// 等待 Ctrl+C，返回后服务器开始关闭
///
/// 会话只保存在进程内，关闭后全部失效。
pub async fn listen_for_shutdown(sessions: SessionStore) {
    if let Err(e) = signal::ctrl_c().await {
        warn!("Failed to listen for Ctrl+C: {}", e);
        // 无法监听信号时交由服务器自身结束
        std::future::pending::<()>().await;
    }
    warn!(
        "Shutdown signal received, dropping {} active session(s)...",
        sessions.active_count()
    );
}
