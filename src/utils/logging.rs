/// 日志工具模块
///
/// 提供日志初始化、格式化和输出的辅助函数
use std::fs::{self, File, OpenOptions};
use std::sync::Mutex;

use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::error::{AppError, AppResult};

/// 初始化 tracing
///
/// `RUST_LOG` 优先；否则默认 info，详细模式下为 debug。
/// 提供日志文件时写入文件，避免与终端交互内容混在一起。
pub fn init(verbose: bool, log_file: Option<File>) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    let result = match log_file {
        Some(file) => builder.with_ansi(false).with_writer(Mutex::new(file)).try_init(),
        None => builder.with_writer(std::io::stderr).try_init(),
    };

    if let Err(e) = result {
        eprintln!("日志初始化失败: {}", e);
    }
}

/// 初始化日志文件，写入文件头后以追加模式打开
///
/// # 参数
/// - `log_file_path`: 日志文件路径
pub fn init_log_file(log_file_path: &str) -> AppResult<File> {
    let log_header = format!(
        "{}\n对话审校日志 - {}\n{}\n\n",
        "=".repeat(60),
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        "=".repeat(60)
    );
    fs::write(log_file_path, log_header).map_err(|e| AppError::file(log_file_path, e))?;

    OpenOptions::new()
        .append(true)
        .open(log_file_path)
        .map_err(|e| AppError::file(log_file_path, e))
}

/// 记录程序启动信息
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 对话审校模式");
    info!("🔗 API 地址: {}", config.api_base_url);
    info!("🌐 翻译候选: {}", config.translation_provider);
    info!("{}", "=".repeat(60));
}

/// 打印最终统计信息
///
/// # 参数
/// - `saved`: 保存数量
/// - `skipped`: 跳过数量
/// - `failed_saves`: 保存失败次数
/// - `log_file_path`: 日志文件路径
pub fn print_final_stats(saved: usize, skipped: usize, failed_saves: usize, log_file_path: &str) {
    info!("\n{}", "=".repeat(60));
    info!("📊 审校统计");
    info!(
        "结束时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 保存: {}", saved);
    info!("⏭️ 跳过: {}", skipped);
    info!("❌ 保存失败: {}", failed_saves);
    info!("{}", "=".repeat(60));
    info!("\n日志已保存至: {}", log_file_path);
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
