//! 审校应用 - 编排层
//!
//! ## 职责
//!
//! 组合队列控制器和编辑会话，是展示层唯一调用的入口。
//!
//! 1. **会话同步**：当前对话变化时重建编辑会话，必要时自动翻译
//! 2. **保存后前进**：先持久化，成功后才让队列前进
//! 3. **错误收口**：所有网络错误都在这里转换为提示或阻塞错误状态
//! 4. **统计**：记录保存、跳过、保存失败的数量

use std::fmt;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::clients::{DialogStore, HttpStore};
use crate::config::Config;
use crate::error::{AppResult, ErrorCategory, SessionError};
use crate::models::{DialogItem, DialogStatus};
use crate::services::{ProgressReport, StatisticsService};
use crate::workflow::{AdvanceOutcome, EditSession, LoadOutcome, QueueController};

/// 提示类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    /// 保存失败，停留在当前对话
    SaveFailed,
    /// 自动翻译失败，草稿未改变
    TranslateFailed,
    /// 所有对话都已处理完
    Finished,
}

/// 可关闭的提示
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

/// 审校统计
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ReviewStats {
    pub saved: usize,
    pub skipped: usize,
    pub failed_saves: usize,
}

impl fmt::Display for ReviewStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "已保存 {} 条, 跳过 {} 条, 保存失败 {} 次",
            self.saved, self.skipped, self.failed_saves
        )
    }
}

/// 展示层看到的整体状态
#[derive(Debug)]
pub enum ReviewView<'a> {
    /// 尚未加载
    Idle,
    /// 正在加载批次
    Loading,
    /// 加载失败，需要重试
    Failed(&'a str),
    /// 没有更多待处理的对话
    Exhausted,
    /// 正在审校当前对话
    Reviewing {
        item: &'a DialogItem,
        session: &'a EditSession,
        remaining: usize,
    },
}

/// 审校应用
pub struct ReviewApp {
    store: Arc<dyn DialogStore>,
    controller: QueueController,
    session: Option<EditSession>,
    statistics: StatisticsService,
    translation_provider: String,
    notices: Vec<Notice>,
    stats: ReviewStats,
}

impl ReviewApp {
    pub fn new(store: Arc<dyn DialogStore>, translation_provider: impl Into<String>) -> Self {
        Self {
            controller: QueueController::new(store.clone()),
            statistics: StatisticsService::new(store.clone()),
            store,
            session: None,
            translation_provider: translation_provider.into(),
            notices: Vec::new(),
            stats: ReviewStats::default(),
        }
    }

    /// 按配置创建基于 HTTP 存储的应用
    pub fn from_config(config: &Config) -> AppResult<Self> {
        let store = HttpStore::new(config)?;
        info!("🔗 对话存储: {}", store.base_url());
        Ok(Self::new(Arc::new(store), config.translation_provider.clone()))
    }

    // ========== 状态查询 ==========

    pub fn view(&self) -> ReviewView<'_> {
        if self.controller.is_loading() {
            return ReviewView::Loading;
        }
        if let Some(message) = self.controller.last_error() {
            return ReviewView::Failed(message);
        }
        match (self.controller.current(), self.session.as_ref()) {
            (Some(item), Some(session)) => ReviewView::Reviewing {
                item,
                session,
                remaining: self.controller.queue().len(),
            },
            _ if self.controller.is_exhausted() => ReviewView::Exhausted,
            _ => ReviewView::Idle,
        }
    }

    pub fn controller(&self) -> &QueueController {
        &self.controller
    }

    pub fn session(&self) -> Option<&EditSession> {
        self.session.as_ref()
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn stats(&self) -> &ReviewStats {
        &self.stats
    }

    /// 关闭一条提示
    pub fn dismiss_notice(&mut self, index: usize) -> Option<Notice> {
        (index < self.notices.len()).then(|| self.notices.remove(index))
    }

    pub fn dismiss_all(&mut self) {
        self.notices.clear();
    }

    fn push_notice(&mut self, kind: NoticeKind, message: impl Into<String>) {
        self.notices.push(Notice {
            kind,
            message: message.into(),
        });
    }

    fn active_session(&mut self) -> AppResult<&mut EditSession> {
        Ok(self.session.as_mut().ok_or(SessionError::NoActiveItem)?)
    }

    // ========== 队列操作 ==========

    /// 获取一批待处理对话（首次加载、重试、手动刷新都走这里）
    pub async fn load_batch(&mut self) -> AppResult<LoadOutcome> {
        let result = self.controller.load_batch().await;
        if let Ok(LoadOutcome::Exhausted) = result {
            self.push_notice(NoticeKind::Finished, "没有更多待翻译的对话，辛苦了！");
        }
        self.sync_session().await;
        result
    }

    /// 保存当前草稿，成功后前进到下一条
    ///
    /// 保存失败时不会前进，会话保留在当前对话上以便重试
    pub async fn save(&mut self) -> AppResult<AdvanceOutcome> {
        let store = self.store.clone();
        let session = self.active_session()?;

        let saved = match session.save(store.as_ref()).await {
            Ok(saved) => saved,
            Err(e) => {
                if e.category() == ErrorCategory::Save {
                    self.stats.failed_saves += 1;
                    self.push_notice(NoticeKind::SaveFailed, format!("保存译文失败: {}", e));
                }
                return Err(e);
            }
        };

        info!("[对话 {}] ✓ 保存成功 (状态: {})", saved.id, saved.status);
        self.stats.saved += 1;
        self.advance(&saved.id).await
    }

    /// 展示层的保存回调：用给定的译文和状态覆盖草稿后保存
    pub async fn save_item(
        &mut self,
        id: &str,
        target_text: &str,
        status: DialogStatus,
    ) -> AppResult<AdvanceOutcome> {
        let session = self.active_session()?;
        if session.item_id() != id {
            return Err(SessionError::StaleItem {
                requested: id.to_string(),
                current: session.item_id().to_string(),
            }
            .into());
        }

        session.edit_text(target_text);
        session.set_status(status);
        self.save().await
    }

    /// 跳过指定对话，不保存
    pub async fn skip(&mut self, id: &str) -> AppResult<AdvanceOutcome> {
        let result = self.controller.skip(id).await;
        if !matches!(result, Ok(AdvanceOutcome::Unchanged)) {
            self.stats.skipped += 1;
        }
        self.after_advance(&result).await;
        result
    }

    /// 离开指定对话并前进到下一条（不保存）
    pub async fn advance(&mut self, id: &str) -> AppResult<AdvanceOutcome> {
        let result = self.controller.advance(id).await;
        self.after_advance(&result).await;
        result
    }

    async fn after_advance(&mut self, result: &AppResult<AdvanceOutcome>) {
        if let Ok(AdvanceOutcome::Refilled(LoadOutcome::Exhausted)) = result {
            self.push_notice(NoticeKind::Finished, "没有更多待翻译的对话，辛苦了！");
        }
        self.sync_session().await;
    }

    /// 当前对话变化时重建编辑会话
    async fn sync_session(&mut self) {
        let needs_translate = match self.controller.current() {
            None => {
                self.session = None;
                false
            }
            Some(item) => {
                if self.session.as_ref().map(EditSession::item_id) == Some(item.id.as_str()) {
                    return;
                }
                debug!("[对话 {}] 📝 开始编辑: {}", item.id, item);
                let session = EditSession::activate(item);
                let needs = session.needs_auto_translate();
                self.session = Some(session);
                needs
            }
        };

        if needs_translate {
            if let Err(e) = self.auto_translate().await {
                debug!("激活时自动翻译未完成: {}", e);
            }
        }
    }

    // ========== 编辑操作 ==========

    /// 为当前对话请求机器翻译
    pub async fn auto_translate(&mut self) -> AppResult<()> {
        let store = self.store.clone();
        let provider = self.translation_provider.clone();
        let session = self.active_session()?;

        match session.auto_translate(store.as_ref(), &provider).await {
            Ok(()) => Ok(()),
            Err(e) => {
                if e.category() == ErrorCategory::Translate {
                    warn!("⚠️ 自动翻译失败: {}", e);
                    self.push_notice(NoticeKind::TranslateFailed, format!("自动翻译失败: {}", e));
                }
                Err(e)
            }
        }
    }

    pub fn edit_text(&mut self, text: impl Into<String>) -> AppResult<()> {
        self.active_session()?.edit_text(text);
        Ok(())
    }

    pub fn set_status(&mut self, status: DialogStatus) -> AppResult<()> {
        self.active_session()?.set_status(status);
        Ok(())
    }

    // ========== 统计 ==========

    pub async fn fetch_statistics(&self) -> AppResult<ProgressReport> {
        self.statistics.fetch().await
    }
}
