//! 单元测试用的内存存储，按预设脚本返回结果并记录调用次数

use crate::clients::DialogStore;
use crate::error::{AppError, AppResult};
use crate::models::{DialogItem, DialogStatus, Statistics, TranslateResponse};
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

#[derive(Default)]
pub struct ScriptedStore {
    /// 每次 fetch_pending 依次弹出一项；脚本耗尽后返回空批次
    batches: Mutex<VecDeque<Result<Vec<DialogItem>, u16>>>,
    /// None 表示翻译接口返回 502
    translation: Mutex<Option<String>>,
    /// 依次弹出；为 true 时本次保存返回 500
    update_failures: Mutex<VecDeque<bool>>,
    pub updates: Mutex<Vec<(String, String, DialogStatus)>>,
    pub pending_calls: AtomicUsize,
    pub update_calls: AtomicUsize,
    pub translate_calls: AtomicUsize,
}

impl ScriptedStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_batch(self, items: Vec<DialogItem>) -> Self {
        self.batches.lock().unwrap().push_back(Ok(items));
        self
    }

    pub fn with_failed_fetch(self, status: u16) -> Self {
        self.batches.lock().unwrap().push_back(Err(status));
        self
    }

    pub fn with_translation(self, text: &str) -> Self {
        *self.translation.lock().unwrap() = Some(text.to_string());
        self
    }

    pub fn with_failed_update(self) -> Self {
        self.update_failures.lock().unwrap().push_back(true);
        self
    }

    pub fn pending_calls(&self) -> usize {
        self.pending_calls.load(Ordering::SeqCst)
    }

    pub fn update_calls(&self) -> usize {
        self.update_calls.load(Ordering::SeqCst)
    }

    pub fn translate_calls(&self) -> usize {
        self.translate_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DialogStore for ScriptedStore {
    async fn fetch_pending(&self) -> AppResult<Vec<DialogItem>> {
        self.pending_calls.fetch_add(1, Ordering::SeqCst);
        match self.batches.lock().unwrap().pop_front() {
            Some(Ok(items)) => Ok(items),
            Some(Err(status)) => Err(AppError::bad_response("/api/pending", status)),
            None => Ok(Vec::new()),
        }
    }

    async fn update_dialog(&self, id: &str, target_text: &str, status: DialogStatus) -> AppResult<()> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);
        if self.update_failures.lock().unwrap().pop_front().unwrap_or(false) {
            return Err(AppError::bad_response(format!("/api/{}", id), 500));
        }
        self.updates
            .lock()
            .unwrap()
            .push((id.to_string(), target_text.to_string(), status));
        Ok(())
    }

    async fn translate(&self, _text: &str) -> AppResult<TranslateResponse> {
        self.translate_calls.fetch_add(1, Ordering::SeqCst);
        match self.translation.lock().unwrap().clone() {
            Some(text) => Ok(TranslateResponse {
                translations: HashMap::from([("google".to_string(), text)]),
            }),
            None => Err(AppError::bad_response("/api/translate", 502)),
        }
    }

    async fn fetch_statistics(&self) -> AppResult<Statistics> {
        Ok(Statistics::default())
    }
}
