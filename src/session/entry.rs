use std::sync::{Mutex, MutexGuard};

use crate::models::session::entities::Session;
use crate::models::views::Notice;

/// 请求开始时捕获的导航代数
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewTicket(u64);

#[derive(Debug, Default)]
struct ViewState {
    generation: u64,
    notice: Option<Notice>,
}

/// 会话存储中的一项
///
/// 身份与上游令牌在登录时确定，之后只读；导航代数与待展示的提示
/// 由 `ViewState` 保存。
#[derive(Debug)]
pub struct SessionEntry {
    id: String,
    session: Session,
    api_token: String,
    state: Mutex<ViewState>,
}

impl SessionEntry {
    pub fn new(session: Session, api_token: String) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            session,
            api_token,
            state: Mutex::new(ViewState::default()),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// 调用上游 API 使用的 Bearer 令牌
    pub fn api_token(&self) -> &str {
        &self.api_token
    }

    fn state(&self) -> MutexGuard<'_, ViewState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// 渲染页面：推进导航代数并取走待展示的提示
    pub fn enter_view(&self) -> (ViewTicket, Option<Notice>) {
        let mut state = self.state();
        state.generation += 1;
        (ViewTicket(state.generation), state.notice.take())
    }

    /// 执行操作：只捕获当前代数，不推进
    pub fn current_ticket(&self) -> ViewTicket {
        ViewTicket(self.state().generation)
    }

    /// 操作完成后写入提示
    ///
    /// 操作期间若已渲染过新页面，票据过期，提示被丢弃并返回 `false`。
    pub fn post_notice(&self, ticket: ViewTicket, notice: Notice) -> bool {
        let mut state = self.state();
        if state.generation != ticket.0 {
            return false;
        }
        state.notice = Some(notice);
        true
    }
}
