//! 翻译进度统计 - 业务能力层
//!
//! 只读：拉取全局统计并计算各状态占比，与队列状态无关

use std::fmt;
use std::sync::Arc;

use tracing::{debug, error};

use crate::clients::DialogStore;
use crate::error::AppResult;
use crate::models::{DialogStatus, Statistics};

const BAR_WIDTH: usize = 40;

/// 统计服务
pub struct StatisticsService {
    store: Arc<dyn DialogStore>,
}

impl StatisticsService {
    pub fn new(store: Arc<dyn DialogStore>) -> Self {
        Self { store }
    }

    /// 拉取最新统计
    pub async fn fetch(&self) -> AppResult<ProgressReport> {
        match self.store.fetch_statistics().await {
            Ok(stats) => {
                debug!("统计: {:?}", stats);
                Ok(ProgressReport::from(stats))
            }
            Err(e) => {
                error!("❌ 加载统计失败: {}", e);
                Err(e)
            }
        }
    }
}

/// 翻译进度报告
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressReport {
    pub total: u64,
    pub translated: u64,
    pub in_progress: u64,
    pub pending: u64,
}

impl From<Statistics> for ProgressReport {
    fn from(stats: Statistics) -> Self {
        Self {
            total: stats.total_documents,
            translated: stats.status_counts.traducido,
            in_progress: stats.status_counts.en_progreso,
            pending: stats.status_counts.pendiente,
        }
    }
}

impl ProgressReport {
    pub fn count(&self, status: DialogStatus) -> u64 {
        match status {
            DialogStatus::Pending => self.pending,
            DialogStatus::InProgress => self.in_progress,
            DialogStatus::Translated => self.translated,
        }
    }

    /// 某状态占总数的百分比，总数为 0 时返回 0
    pub fn percentage(&self, status: DialogStatus) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.count(status) as f64 / self.total as f64 * 100.0
    }

    /// 进度条中每个状态占的格数，按 已翻译 / 进行中 / 待处理 排列
    fn bar_segments(&self) -> [usize; 3] {
        let cells = |status: DialogStatus| {
            ((self.percentage(status) / 100.0 * BAR_WIDTH as f64).round() as usize).min(BAR_WIDTH)
        };
        let translated = cells(DialogStatus::Translated);
        let in_progress = cells(DialogStatus::InProgress).min(BAR_WIDTH - translated);
        let pending = cells(DialogStatus::Pending).min(BAR_WIDTH - translated - in_progress);
        [translated, in_progress, pending]
    }
}

impl fmt::Display for ProgressReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [translated, in_progress, pending] = self.bar_segments();
        let rest = BAR_WIDTH - translated - in_progress - pending;

        writeln!(f, "翻译进度 - 对话总数: {}", self.total)?;
        writeln!(
            f,
            "[{}{}{}{}]",
            "█".repeat(translated),
            "▓".repeat(in_progress),
            "░".repeat(pending),
            " ".repeat(rest)
        )?;
        writeln!(
            f,
            "█ 已翻译: {} ({:.1}%)",
            self.translated,
            self.percentage(DialogStatus::Translated)
        )?;
        writeln!(
            f,
            "▓ 进行中: {} ({:.1}%)",
            self.in_progress,
            self.percentage(DialogStatus::InProgress)
        )?;
        write!(
            f,
            "░ 待处理: {} ({:.1}%)",
            self.pending,
            self.percentage(DialogStatus::Pending)
        )
    }
}
