//! 集成测试公共工具：按脚本返回结果、记录调用的内存存储

#![allow(dead_code)]

use async_trait::async_trait;
use dialog_review::error::{AppError, AppResult};
use dialog_review::models::{
    DialogItem, DialogStatus, Statistics, StatusCounts, TranslateResponse,
};
use dialog_review::DialogStore;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Default)]
pub struct FakeStore {
    batches: Mutex<VecDeque<Result<Vec<DialogItem>, u16>>>,
    translations: Mutex<HashMap<String, String>>,
    failing_updates: Mutex<usize>,
    statistics: Mutex<Option<Statistics>>,
    pub saved: Mutex<Vec<(String, String, DialogStatus)>>,
    pending_calls: AtomicUsize,
    update_calls: AtomicUsize,
    translate_calls: AtomicUsize,
}

impl FakeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn batch(self, items: Vec<DialogItem>) -> Self {
        self.batches.lock().unwrap().push_back(Ok(items));
        self
    }

    pub fn failing_fetch(self, status: u16) -> Self {
        self.batches.lock().unwrap().push_back(Err(status));
        self
    }

    /// 原文 → google 译文
    pub fn translation(self, source: &str, target: &str) -> Self {
        self.translations
            .lock()
            .unwrap()
            .insert(source.to_string(), target.to_string());
        self
    }

    /// 接下来 n 次保存失败
    pub fn failing_updates(self, n: usize) -> Self {
        *self.failing_updates.lock().unwrap() = n;
        self
    }

    pub fn statistics(self, pending: u64, in_progress: u64, translated: u64) -> Self {
        *self.statistics.lock().unwrap() = Some(Statistics {
            total_documents: pending + in_progress + translated,
            status_counts: StatusCounts {
                pendiente: pending,
                en_progreso: in_progress,
                traducido: translated,
            },
        });
        self
    }

    pub fn into_arc(self) -> Arc<Self> {
        Arc::new(self)
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
impl DialogStore for FakeStore {
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
        {
            let mut failing = self.failing_updates.lock().unwrap();
            if *failing > 0 {
                *failing -= 1;
                return Err(AppError::bad_response(format!("/api/{}", id), 500));
            }
        }
        self.saved
            .lock()
            .unwrap()
            .push((id.to_string(), target_text.to_string(), status));
        Ok(())
    }

    async fn translate(&self, text: &str) -> AppResult<TranslateResponse> {
        self.translate_calls.fetch_add(1, Ordering::SeqCst);
        match self.translations.lock().unwrap().get(text) {
            Some(target) => Ok(TranslateResponse {
                translations: HashMap::from([("google".to_string(), target.clone())]),
            }),
            None => Err(AppError::bad_response("/api/translate", 502)),
        }
    }

    async fn fetch_statistics(&self) -> AppResult<Statistics> {
        self.statistics
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| AppError::bad_response("/api/statistics", 503))
    }
}

pub fn pending(id: &str, source: &str) -> DialogItem {
    DialogItem::new(id, source)
}

/// 已有译文的对话，激活时不会触发自动翻译
pub fn drafted(id: &str, source: &str, target: &str) -> DialogItem {
    DialogItem::new(id, source).with_target(target)
}
