//! 队列控制器 - 流程层
//!
//! 核心职责：维护待处理对话的工作队列，决定"当前是哪一条"
//!
//! - 批量获取待处理对话，整体替换队列
//! - 保存或跳过后移除当前对话，选出下一条
//! - 队列清空时自动重新获取；获取到空批次即为全部完成

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{error, info, warn};

use crate::clients::DialogStore;
use crate::error::AppResult;
use crate::models::DialogItem;

/// 工作队列
///
/// 顺序即批次到达顺序，只用于确定"下一条"
#[derive(Debug, Default, Clone)]
pub struct WorkingQueue {
    items: Vec<DialogItem>,
    current_id: Option<String>,
}

impl WorkingQueue {
    pub fn items(&self) -> &[DialogItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn current_id(&self) -> Option<&str> {
        self.current_id.as_deref()
    }

    pub fn current(&self) -> Option<&DialogItem> {
        let id = self.current_id.as_deref()?;
        self.items.iter().find(|item| item.id == id)
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }

    /// 整体替换队列，当前对话指向第一条
    fn replace(&mut self, items: Vec<DialogItem>) {
        self.current_id = items.first().map(|item| item.id.clone());
        self.items = items;
    }

    fn clear(&mut self) {
        self.items.clear();
        self.current_id = None;
    }

    /// 移除指定对话并选出下一条，返回被移除的位置
    ///
    /// 下一条是滑入空位的那一条；移除的是最后一条时回到队首
    fn remove(&mut self, id: &str) -> Option<usize> {
        let pos = self.position(id)?;
        self.items.remove(pos);

        self.current_id = if self.items.is_empty() {
            None
        } else {
            let next = if pos < self.items.len() { pos } else { 0 };
            Some(self.items[next].id.clone())
        };

        Some(pos)
    }
}

/// 批次获取结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// 获取到若干条待处理对话
    Loaded(usize),
    /// 没有更多待处理的对话
    Exhausted,
}

/// 前进结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdvanceOutcome {
    /// 队列中还有对话，当前对话切换为该 ID
    Next(String),
    /// 队列已清空，重新获取的结果
    Refilled(LoadOutcome),
    /// 目标对话不在队列中，队列未变化
    Unchanged,
}

/// 队列控制器
pub struct QueueController {
    store: Arc<dyn DialogStore>,
    queue: WorkingQueue,
    /// 请求期间置位，供展示层渲染加载状态；`&mut self` 保证不会并发加载
    loading: bool,
    exhausted: bool,
    last_error: Option<String>,
}

impl QueueController {
    pub fn new(store: Arc<dyn DialogStore>) -> Self {
        Self {
            store,
            queue: WorkingQueue::default(),
            loading: false,
            exhausted: false,
            last_error: None,
        }
    }

    pub fn queue(&self) -> &WorkingQueue {
        &self.queue
    }

    pub fn current(&self) -> Option<&DialogItem> {
        self.queue.current()
    }

    pub fn current_id(&self) -> Option<&str> {
        self.queue.current_id()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// 最近一次获取失败的信息，成功获取后清除
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// 获取一批待处理对话
    ///
    /// 失败时队列保持原样，错误信息保留在 `last_error` 中供展示
    pub async fn load_batch(&mut self) -> AppResult<LoadOutcome> {
        self.loading = true;
        info!("📥 正在获取待翻译的对话...");
        let result = self.store.fetch_pending().await;
        self.loading = false;

        match result {
            Ok(batch) => Ok(self.apply_batch(batch)),
            Err(e) => {
                error!("❌ 加载对话失败: {}", e);
                self.last_error = Some(format!("加载对话失败: {}", e));
                Err(e)
            }
        }
    }

    fn apply_batch(&mut self, batch: Vec<DialogItem>) -> LoadOutcome {
        self.last_error = None;

        if batch.is_empty() {
            info!("🎉 没有更多待翻译的对话");
            self.queue.clear();
            self.exhausted = true;
            return LoadOutcome::Exhausted;
        }

        let mut seen = HashSet::new();
        let mut items = Vec::with_capacity(batch.len());
        for item in batch {
            if seen.insert(item.id.clone()) {
                items.push(item);
            } else {
                warn!("[对话 {}] ⚠️ 批次中出现重复 ID，已忽略", item.id);
            }
        }

        let count = items.len();
        self.queue.replace(items);
        self.exhausted = false;
        info!("✓ 获取到 {} 条待翻译的对话", count);

        LoadOutcome::Loaded(count)
    }

    /// 离开指定对话并前进到下一条
    ///
    /// 只能在保存完成或跳过时调用。队列被清空时自动重新获取；
    /// 已处于全部完成状态时不再自动获取，需要显式 `load_batch`
    pub async fn advance(&mut self, item_id: &str) -> AppResult<AdvanceOutcome> {
        match self.queue.remove(item_id) {
            Some(_) => {
                if let Some(next) = self.queue.current_id() {
                    info!("[对话 {}] ➡️ 下一条: {} (剩余 {})", item_id, next, self.queue.len());
                    return Ok(AdvanceOutcome::Next(next.to_string()));
                }
            }
            None => {
                warn!("[对话 {}] ⚠️ 不在当前队列中，忽略", item_id);
                if !self.queue.is_empty() || self.exhausted {
                    return Ok(AdvanceOutcome::Unchanged);
                }
            }
        }

        info!("📭 当前批次已处理完，重新获取...");
        let outcome = self.load_batch().await?;
        Ok(AdvanceOutcome::Refilled(outcome))
    }

    /// 跳过指定对话，不保存
    pub async fn skip(&mut self, item_id: &str) -> AppResult<AdvanceOutcome> {
        info!("[对话 {}] ⏭️ 跳过", item_id);
        self.advance(item_id).await
    }
}
