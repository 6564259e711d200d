use anyhow::{Context, Result};
use dialog_review::utils::logging;
use dialog_review::{ui, Config, ReviewApp};
use std::path::Path;

#[tokio::main]
async fn main() -> Result<()> {
    // 加载配置：指定了 TOML 文件时优先使用文件，否则读取环境变量
    let config = match std::env::args().nth(1) {
        Some(path) => Config::from_toml_file(Path::new(&path))?,
        None => Config::from_env(),
    };

    // 初始化日志
    let log_file = match logging::init_log_file(&config.output_log_file) {
        Ok(file) => Some(file),
        Err(e) => {
            eprintln!("无法创建日志文件，日志输出到 stderr: {}", e);
            None
        }
    };
    logging::init(config.verbose_logging, log_file);
    logging::log_startup(&config);

    // 初始化并运行应用
    let mut app = ReviewApp::from_config(&config).context("初始化审校应用失败")?;
    ui::terminal::run(&mut app).await?;

    let stats = app.stats();
    println!("\n{}", stats);
    logging::print_final_stats(
        stats.saved,
        stats.skipped,
        stats.failed_saves,
        &config.output_log_file,
    );

    Ok(())
}
