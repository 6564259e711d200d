//! 单条对话的编辑会话 - 流程层
//!
//! 对话成为当前对话时创建，离开时丢弃。只持有草稿，不直接修改队列。
//!
//! 每个网络请求都分为 `begin_*` / `finish_*` 两步：开始时置位状态标志并
//! 生成带有对话 ID 的票据，完成时用票据核对目标，与当前会话不符的结果直接丢弃。

use tracing::{info, warn};

use crate::clients::DialogStore;
use crate::error::{ApiError, AppResult, SessionError};
use crate::models::{DialogItem, DialogStatus, TranslateResponse};

/// 一次自动翻译请求
#[derive(Debug)]
pub struct TranslateTicket {
    item_id: String,
    source_text: String,
}

impl TranslateTicket {
    pub fn item_id(&self) -> &str {
        &self.item_id
    }

    pub fn source_text(&self) -> &str {
        &self.source_text
    }
}

/// 一次保存请求
#[derive(Debug)]
pub struct SaveTicket {
    item_id: String,
    target_text: String,
    status: DialogStatus,
}

impl SaveTicket {
    pub fn item_id(&self) -> &str {
        &self.item_id
    }

    pub fn target_text(&self) -> &str {
        &self.target_text
    }

    pub fn status(&self) -> DialogStatus {
        self.status
    }
}

/// 已成功保存的草稿，作为"保存 → 前进"两步之间的中间结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedDraft {
    pub id: String,
    pub target_text: String,
    pub status: DialogStatus,
}

/// 编辑会话
#[derive(Debug, Clone)]
pub struct EditSession {
    item_id: String,
    source_text: String,
    draft_text: String,
    draft_status: DialogStatus,
    translating: bool,
    saving: bool,
}

impl EditSession {
    /// 为当前对话创建会话，草稿取自对话的译文和状态
    pub fn activate(item: &DialogItem) -> Self {
        Self {
            item_id: item.id.clone(),
            source_text: item.source_text.clone(),
            draft_text: item.target_text.clone().unwrap_or_default(),
            draft_status: item.status,
            translating: false,
            saving: false,
        }
    }

    pub fn item_id(&self) -> &str {
        &self.item_id
    }

    pub fn source_text(&self) -> &str {
        &self.source_text
    }

    pub fn draft_text(&self) -> &str {
        &self.draft_text
    }

    pub fn draft_status(&self) -> DialogStatus {
        self.draft_status
    }

    pub fn is_translating(&self) -> bool {
        self.translating
    }

    pub fn is_saving(&self) -> bool {
        self.saving
    }

    /// 译文为空而原文不为空时，激活后应立即自动翻译
    pub fn needs_auto_translate(&self) -> bool {
        self.draft_text.is_empty() && !self.source_text.is_empty()
    }

    /// 手动修改译文
    pub fn edit_text(&mut self, text: impl Into<String>) {
        self.set_draft_text(text.into());
    }

    /// 手动设置状态，可以向任意方向切换
    pub fn set_status(&mut self, status: DialogStatus) {
        self.draft_status = status;
    }

    /// 所有草稿修改都经过这里：有改动即视为已开始处理
    fn set_draft_text(&mut self, text: String) {
        self.draft_text = text;
        if self.draft_status == DialogStatus::Pending {
            self.draft_status = DialogStatus::InProgress;
        }
    }

    fn check_ticket(&self, ticket_id: &str) -> AppResult<()> {
        if ticket_id != self.item_id {
            warn!(
                "[对话 {}] ⚠️ 收到对话 {} 的过期响应，已丢弃",
                self.item_id, ticket_id
            );
            return Err(SessionError::StaleItem {
                requested: ticket_id.to_string(),
                current: self.item_id.clone(),
            }
            .into());
        }
        Ok(())
    }

    // ========== 自动翻译 ==========

    /// 开始自动翻译；已有请求在进行时直接拒绝
    pub fn begin_translate(&mut self) -> AppResult<TranslateTicket> {
        if self.translating {
            return Err(SessionError::TranslateInFlight.into());
        }
        self.translating = true;
        Ok(TranslateTicket {
            item_id: self.item_id.clone(),
            source_text: self.source_text.clone(),
        })
    }

    /// 应用翻译结果；无论成功与否都会清除翻译标志
    pub fn finish_translate(
        &mut self,
        ticket: TranslateTicket,
        result: AppResult<String>,
    ) -> AppResult<()> {
        self.check_ticket(&ticket.item_id)?;
        self.translating = false;

        let candidate = result?;
        self.set_draft_text(candidate);
        Ok(())
    }

    /// 请求机器翻译并写入草稿
    pub async fn auto_translate(&mut self, store: &dyn DialogStore, provider: &str) -> AppResult<()> {
        let ticket = self.begin_translate()?;
        info!("[对话 {}] 🌐 正在自动翻译...", ticket.item_id);

        let result = store
            .translate(ticket.source_text())
            .await
            .and_then(|resp| pick_candidate(resp, provider));

        self.finish_translate(ticket, result)?;
        info!("[对话 {}] ✓ 自动翻译完成", self.item_id);
        Ok(())
    }

    // ========== 保存 ==========

    /// 开始保存当前草稿；已有保存请求在进行时直接拒绝
    pub fn begin_save(&mut self) -> AppResult<SaveTicket> {
        if self.saving {
            return Err(SessionError::SaveInFlight.into());
        }
        self.saving = true;
        Ok(SaveTicket {
            item_id: self.item_id.clone(),
            target_text: self.draft_text.clone(),
            status: self.draft_status,
        })
    }

    /// 处理保存结果；失败时会话保持不变，可以重试
    pub fn finish_save(&mut self, ticket: SaveTicket, result: AppResult<()>) -> AppResult<SavedDraft> {
        self.check_ticket(&ticket.item_id)?;
        self.saving = false;

        result?;
        Ok(SavedDraft {
            id: ticket.item_id,
            target_text: ticket.target_text,
            status: ticket.status,
        })
    }

    /// 持久化草稿
    pub async fn save(&mut self, store: &dyn DialogStore) -> AppResult<SavedDraft> {
        let ticket = self.begin_save()?;
        info!(
            "[对话 {}] 💾 正在保存 (状态: {})...",
            ticket.item_id, ticket.status
        );

        let result = store
            .update_dialog(&ticket.item_id, &ticket.target_text, ticket.status)
            .await;

        self.finish_save(ticket, result)
    }
}

/// 从翻译结果中取出指定服务的候选译文
fn pick_candidate(mut resp: TranslateResponse, provider: &str) -> AppResult<String> {
    resp.translations.remove(provider).ok_or_else(|| {
        ApiError::MissingCandidate {
            provider: provider.to_string(),
        }
        .into()
    })
}
