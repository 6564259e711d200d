use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// 显式的 `null` 与缺省字段同样处理
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// 对话审校状态
///
/// 三个取值之间可以任意切换，没有终态
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DialogStatus {
    #[default]
    #[serde(rename = "pendiente")]
    Pending,
    #[serde(rename = "en_progreso")]
    InProgress,
    #[serde(rename = "traducido")]
    Translated,
}

impl DialogStatus {
    pub const ALL: [DialogStatus; 3] = [
        DialogStatus::Pending,
        DialogStatus::InProgress,
        DialogStatus::Translated,
    ];

    /// 接口中使用的状态值
    pub fn as_str(&self) -> &'static str {
        match self {
            DialogStatus::Pending => "pendiente",
            DialogStatus::InProgress => "en_progreso",
            DialogStatus::Translated => "traducido",
        }
    }
}

impl FromStr for DialogStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s.trim())
            .ok_or_else(|| format!("未知状态: {}", s.trim()))
    }
}

impl fmt::Display for DialogStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 一条待翻译的游戏对话
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DialogItem {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,

    /// 原文 (en-US)
    #[serde(rename = "en-US", default, deserialize_with = "null_as_default")]
    pub source_text: String,

    /// 译文 (es-ES)，可能为空
    #[serde(rename = "es-ES", default, skip_serializing_if = "Option::is_none")]
    pub target_text: Option<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub status: DialogStatus,
}

impl DialogItem {
    pub fn new(id: impl Into<String>, source_text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            source_text: source_text.into(),
            target_text: None,
            status: DialogStatus::Pending,
        }
    }

    pub fn with_target(mut self, target_text: impl Into<String>) -> Self {
        self.target_text = Some(target_text.into());
        self
    }

    pub fn with_status(mut self, status: DialogStatus) -> Self {
        self.status = status;
        self
    }
}

impl fmt::Display for DialogItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let preview = if self.source_text.chars().count() > 60 {
            self.source_text.chars().take(60).collect::<String>() + "..."
        } else {
            self.source_text.clone()
        };
        write!(f, "[对话 {}] {} ({})", self.id, preview, self.status)
    }
}

/// `GET /api/pending` 的返回结构
#[derive(Debug, Clone, Deserialize)]
pub struct PendingResponse {
    pub dialogos: Vec<DialogItem>,
}

/// `PUT /api/{id}` 的请求体
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpdateRequest {
    #[serde(rename = "es-ES")]
    pub target_text: String,
    pub status: DialogStatus,
}

/// `POST /api/translate` 的请求体
#[derive(Debug, Clone, Serialize)]
pub struct TranslateRequest {
    pub text: String,
}

/// `POST /api/translate` 的返回结构
///
/// `translations` 按翻译服务名称索引，例如 `google`
#[derive(Debug, Clone, Deserialize)]
pub struct TranslateResponse {
    #[serde(default)]
    pub translations: std::collections::HashMap<String, String>,
}
