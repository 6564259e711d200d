//! 终端展示层
//!
//! 逐行读取命令，调用 [`ReviewApp`]，再把状态渲染成文本。
//! 以 `:` 开头的行是命令，其余输入整行替换当前译文；
//! 以 `::` 开头的行去掉一个冒号后作为译文。

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

use crate::error::{AppError, AppResult, ErrorCategory, SessionError};
use crate::models::DialogStatus;
use crate::orchestrator::{Notice, NoticeKind, ReviewApp, ReviewView};
use crate::utils::truncate_text;

pub const HELP: &str = "\
命令:
  :save                 保存当前译文并进入下一条
  :skip                 跳过当前对话（不保存）
  :next                 进入下一条（不保存）
  :translate            重新自动翻译
  :status <状态>        设置状态: pendiente | en_progreso | traducido
  :stats                查看翻译进度
  :retry                重新加载待处理对话
  :dismiss              关闭所有提示
  :help                 显示帮助
  :quit                 退出
  其他输入              替换当前译文";

/// 终端命令
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Save,
    Skip,
    Next,
    Translate,
    Status(DialogStatus),
    Stats,
    Retry,
    Dismiss,
    Help,
    Quit,
    /// 重新显示当前状态
    Show,
    /// 替换译文
    Edit(String),
}

/// 解析一行输入
pub fn parse_command(line: &str) -> Result<Command, String> {
    let line = line.trim_end_matches(['\r', '\n']);

    if line.trim().is_empty() {
        return Ok(Command::Show);
    }
    if let Some(literal) = line.strip_prefix("::") {
        return Ok(Command::Edit(format!(":{}", literal)));
    }
    let Some(rest) = line.trim().strip_prefix(':') else {
        return Ok(Command::Edit(line.to_string()));
    };

    let mut parts = rest.split_whitespace();
    let name = parts.next().unwrap_or_default();
    let command = match name {
        "save" | "s" => Command::Save,
        "skip" => Command::Skip,
        "next" | "n" => Command::Next,
        "translate" | "t" => Command::Translate,
        "stats" => Command::Stats,
        "retry" | "r" => Command::Retry,
        "dismiss" | "d" => Command::Dismiss,
        "help" | "h" => Command::Help,
        "quit" | "q" => Command::Quit,
        "status" => {
            let value = parts.next().ok_or("用法: :status <pendiente|en_progreso|traducido>")?;
            Command::Status(value.parse::<DialogStatus>()?)
        }
        other => return Err(format!("未知命令: :{} (输入 :help 查看帮助)", other)),
    };
    Ok(command)
}

/// 渲染当前状态
pub fn render(view: &ReviewView<'_>) -> String {
    match view {
        ReviewView::Idle => "尚未加载对话，输入 :retry 加载".to_string(),
        ReviewView::Loading => "⏳ 正在加载对话...".to_string(),
        ReviewView::Failed(message) => format!("❌ {}\n输入 :retry 重试", message),
        ReviewView::Exhausted => {
            "🎉 没有待翻译的对话了，恭喜！输入 :retry 重新检查".to_string()
        }
        ReviewView::Reviewing {
            item,
            session,
            remaining,
        } => {
            let source = if item.source_text.is_empty() {
                "N/A"
            } else {
                item.source_text.as_str()
            };
            let translating = if session.is_translating() {
                " (翻译中...)"
            } else {
                ""
            };
            format!(
                "{}\n对话 ID: {}    (本批剩余 {})\n当前状态: {}\n原文 (en-US):\n  {}\n译文 (es-ES){}:\n  {}",
                "─".repeat(60),
                item.id,
                remaining,
                session.draft_status(),
                source,
                translating,
                session.draft_text()
            )
        }
    }
}

/// 渲染提示列表
pub fn render_notices(notices: &[Notice]) -> String {
    notices
        .iter()
        .map(|notice| {
            let icon = match notice.kind {
                NoticeKind::SaveFailed | NoticeKind::TranslateFailed => "⚠️",
                NoticeKind::Finished => "🎉",
            };
            format!("{} {}", icon, truncate_text(&notice.message, 160))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn print_screen(app: &ReviewApp) {
    println!("{}", render(&app.view()));
    if !app.notices().is_empty() {
        println!("{}", render_notices(app.notices()));
    }
}

fn current_id(app: &ReviewApp) -> AppResult<String> {
    app.session()
        .map(|session| session.item_id().to_string())
        .ok_or_else(|| SessionError::NoActiveItem.into())
}

/// 执行一条命令
///
/// 获取、保存、翻译失败已由 [`ReviewApp`] 转换为错误视图或提示，这里只需返回
async fn execute(app: &mut ReviewApp, command: Command) -> AppResult<()> {
    match command {
        Command::Save => {
            app.save().await?;
        }
        Command::Skip => {
            let id = current_id(app)?;
            app.skip(&id).await?;
        }
        Command::Next => {
            let id = current_id(app)?;
            app.advance(&id).await?;
        }
        Command::Translate => app.auto_translate().await?,
        Command::Status(status) => app.set_status(status)?,
        Command::Edit(text) => app.edit_text(text)?,
        Command::Retry => {
            app.load_batch().await?;
        }
        Command::Dismiss => app.dismiss_all(),
        Command::Stats => match app.fetch_statistics().await {
            Ok(report) => println!("{}", report),
            Err(e) => println!("❌ 加载统计失败: {}", e),
        },
        Command::Help => println!("{}", HELP),
        Command::Show | Command::Quit => {}
    }
    Ok(())
}

/// 运行终端审校循环，直到输入 `:quit` 或标准输入结束
pub async fn run(app: &mut ReviewApp) -> AppResult<()> {
    println!("{}\n", HELP);

    if let Err(e) = app.load_batch().await {
        debug!("首次加载失败: {}", e);
    }
    print_screen(app);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines
        .next_line()
        .await
        .map_err(|e| AppError::file("<stdin>", e))?
    {
        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(message) => {
                println!("{}", message);
                continue;
            }
        };

        if command == Command::Quit {
            break;
        }

        if let Err(e) = execute(app, command).await {
            if e.category() == ErrorCategory::Usage {
                println!("⚠️ {}", e);
            }
        }
        print_screen(app);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DialogItem;
    use crate::workflow::EditSession;

    #[test]
    fn test_parse_commands() {
        assert_eq!(parse_command(":save"), Ok(Command::Save));
        assert_eq!(parse_command(" :q "), Ok(Command::Quit));
        assert_eq!(
            parse_command(":status traducido"),
            Ok(Command::Status(DialogStatus::Translated))
        );
        assert_eq!(parse_command(""), Ok(Command::Show));
    }

    #[test]
    fn test_parse_edit_text() {
        assert_eq!(
            parse_command("¿Dónde está el herrero?\n"),
            Ok(Command::Edit("¿Dónde está el herrero?".to_string()))
        );
        assert_eq!(
            parse_command("::3 monedas"),
            Ok(Command::Edit(":3 monedas".to_string()))
        );
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse_command(":status").is_err());
        assert!(parse_command(":status done").is_err());
        assert!(parse_command(":frobnicate").is_err());
    }

    #[test]
    fn test_render_reviewing() {
        let item = DialogItem::new("A", "Hello");
        let mut session = EditSession::activate(&item);
        session.edit_text("Hola");

        let text = render(&ReviewView::Reviewing {
            item: &item,
            session: &session,
            remaining: 2,
        });

        assert!(text.contains("对话 ID: A"));
        assert!(text.contains("en_progreso"));
        assert!(text.contains("  Hola"));
    }

    #[test]
    fn test_render_missing_source() {
        let item = DialogItem::new("A", "");
        let session = EditSession::activate(&item);
        let text = render(&ReviewView::Reviewing {
            item: &item,
            session: &session,
            remaining: 1,
        });
        assert!(text.contains("N/A"));
    }

    #[test]
    fn test_render_notices() {
        let notices = vec![Notice {
            kind: NoticeKind::SaveFailed,
            message: "保存译文失败".to_string(),
        }];
        assert_eq!(render_notices(&notices), "⚠️ 保存译文失败");
    }
}
