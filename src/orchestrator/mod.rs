//! 编排层（Orchestration Layer）
//!
//! ## 层次关系
//!
//! ```text
//! ui::terminal (展示层，解析命令、渲染状态)
//!     ↓
//! orchestrator::ReviewApp (组合队列与会话，错误收口)
//!     ↓
//! workflow::{QueueController, EditSession} (队列状态机 / 单条草稿)
//!     ↓
//! clients::DialogStore (存储接口：pending / update / translate / statistics)
//! ```
//!
//! 编排层之外的模块都不直接修改队列；会话只通过编排层报告"已保存"。

pub mod review_app;

pub use review_app::{Notice, NoticeKind, ReviewApp, ReviewStats, ReviewView};
