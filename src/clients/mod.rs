//! 客户端层
//!
//! 负责与对话存储服务的所有交互。核心逻辑只依赖 [`DialogStore`] trait，
//! 不关心请求如何发送。

pub mod store_client;

use async_trait::async_trait;

use crate::error::AppResult;
use crate::models::{DialogItem, DialogStatus, Statistics, TranslateResponse};

pub use store_client::HttpStore;

/// 对话存储接口
#[async_trait]
pub trait DialogStore: Send + Sync {
    /// 获取一批待处理的对话，空列表表示已经没有待处理的工作
    async fn fetch_pending(&self) -> AppResult<Vec<DialogItem>>;

    /// 保存一条对话的译文和状态
    async fn update_dialog(&self, id: &str, target_text: &str, status: DialogStatus) -> AppResult<()>;

    /// 请求机器翻译，返回所有翻译服务的候选结果
    async fn translate(&self, text: &str) -> AppResult<TranslateResponse>;

    /// 获取全局统计
    async fn fetch_statistics(&self) -> AppResult<Statistics>;
}

#[cfg(test)]
pub(crate) mod scripted_store;
