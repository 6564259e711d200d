//! # Dialog Review
//!
//! 游戏对话翻译审校工具：逐条展示待翻译的对话，审校者接受或修改机器翻译，
//! 记录状态后进入下一条，直到远端没有待处理的对话。
//!
//! ## 架构设计
//!
//! ### ① 客户端层（Clients）
//! - `clients/` - `DialogStore` 存储接口，`HttpStore` 基于 reqwest 的实现
//!
//! ### ② 业务能力层（Services）
//! - `StatisticsService` - 只读的翻译进度统计
//!
//! ### ③ 流程层（Workflow）
//! - `QueueController` - 工作队列状态机（加载 → 前进 → 重新加载 / 完成）
//! - `EditSession` - 单条对话的草稿、自动翻译和保存
//!
//! ### ④ 编排层（Orchestration）
//! - `ReviewApp` - 组合队列和会话，保存成功后才前进，统一处理错误
//!
//! ### ⑤ 展示层（UI）
//! - `ui/terminal` - 命令解析与文本渲染
//!
//! ## 模块结构

pub mod clients;
pub mod config;
pub mod error;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod ui;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use clients::{DialogStore, HttpStore};
pub use config::Config;
pub use error::{AppError, AppResult, ErrorCategory};
pub use models::{DialogItem, DialogStatus};
pub use orchestrator::{ReviewApp, ReviewView};
pub use workflow::{EditSession, QueueController};
