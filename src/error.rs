use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 远端存储 API 调用错误
    #[error("API错误: {0}")]
    Api(#[from] ApiError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
    /// 会话状态错误（前置条件不满足）
    #[error("会话错误: {0}")]
    Session(#[from] SessionError),
    /// 文件读写错误
    #[error("文件错误 ({path}): {source}")]
    File {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// API 调用错误
#[derive(Debug, Error)]
pub enum ApiError {
    /// 网络请求失败
    #[error("API请求失败 ({endpoint}): {source}")]
    RequestFailed {
        endpoint: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// API 返回非成功状态码
    #[error("API返回错误响应 ({endpoint}): status={status}")]
    BadResponse { endpoint: String, status: u16 },
    /// JSON 解析失败（返回数据格式不正确）
    #[error("JSON解析失败 ({endpoint}): {source}")]
    JsonParseFailed {
        endpoint: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 翻译结果中缺少指定的候选项
    #[error("翻译结果中没有 {provider} 的候选译文")]
    MissingCandidate { provider: String },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 存储地址不合法
    #[error("无效的 API 地址: '{0}'")]
    InvalidBaseUrl(String),
    /// TOML 解析失败
    #[error("TOML解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

/// 会话状态错误
///
/// 这类错误不涉及网络，只表示调用时机不对
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    /// 已有自动翻译请求在进行中
    #[error("正在翻译中，请勿重复请求")]
    TranslateInFlight,
    /// 已有保存请求在进行中
    #[error("正在保存中，请勿重复提交")]
    SaveInFlight,
    /// 当前没有正在编辑的对话
    #[error("当前没有正在编辑的对话")]
    NoActiveItem,
    /// 请求的目标对话已不是当前对话
    #[error("对话 {requested} 已不是当前对话 (当前: {current})")]
    StaleItem { requested: String, current: String },
}

/// 错误分类
///
/// 决定错误如何呈现：获取失败进入阻塞错误视图，保存和翻译失败
/// 变成可关闭的提示，使用错误只在终端回显
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// 获取批次或统计失败
    Fetch,
    /// 保存译文失败
    Save,
    /// 自动翻译失败
    Translate,
    /// 调用时机或输入不对，与网络无关
    Usage,
}

impl ApiError {
    fn endpoint(&self) -> Option<&str> {
        match self {
            ApiError::RequestFailed { endpoint, .. }
            | ApiError::BadResponse { endpoint, .. }
            | ApiError::JsonParseFailed { endpoint, .. } => Some(endpoint.as_str()),
            ApiError::MissingCandidate { .. } => None,
        }
    }

    /// 按接口路径的最后一段归类：`pending`/`statistics` 为获取，
    /// `translate` 为翻译，`/api/{id}` 为保存
    pub fn category(&self) -> ErrorCategory {
        let Some(endpoint) = self.endpoint() else {
            return ErrorCategory::Translate;
        };
        if !endpoint.contains("/api/") {
            return ErrorCategory::Fetch;
        }
        match endpoint.trim_end_matches('/').rsplit('/').next() {
            Some("pending") | Some("statistics") => ErrorCategory::Fetch,
            Some("translate") => ErrorCategory::Translate,
            _ => ErrorCategory::Save,
        }
    }
}

impl AppError {
    /// 创建API请求失败错误
    pub fn api_request_failed(
        endpoint: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::Api(ApiError::RequestFailed {
            endpoint: endpoint.into(),
            source: Box::new(source),
        })
    }

    /// 创建非成功状态码错误
    pub fn bad_response(endpoint: impl Into<String>, status: u16) -> Self {
        AppError::Api(ApiError::BadResponse {
            endpoint: endpoint.into(),
            status,
        })
    }

    /// 创建 JSON 解析失败错误
    pub fn json_parse_failed(
        endpoint: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::Api(ApiError::JsonParseFailed {
            endpoint: endpoint.into(),
            source: Box::new(source),
        })
    }

    /// 创建文件读写错误
    pub fn file(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::File {
            path: path.into(),
            source,
        }
    }

    /// 错误分类，决定展示层如何呈现
    pub fn category(&self) -> ErrorCategory {
        match self {
            AppError::Api(api) => api.category(),
            AppError::Config(_) | AppError::Session(_) | AppError::File { .. } => {
                ErrorCategory::Usage
            }
        }
    }
}

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_errors_are_usage() {
        let err = AppError::from(SessionError::TranslateInFlight);
        assert_eq!(err.category(), ErrorCategory::Usage);
        assert!(err.to_string().contains("正在翻译中"));
    }

    #[test]
    fn test_bad_response_message() {
        let err = AppError::bad_response("/api/pending", 503);
        assert_eq!(err.category(), ErrorCategory::Fetch);
        assert!(err.to_string().contains("503"));
    }

    #[test]
    fn test_category_by_endpoint() {
        let cases = [
            ("http://localhost:8000/api/pending", ErrorCategory::Fetch),
            ("http://localhost:8000/api/statistics", ErrorCategory::Fetch),
            ("http://localhost:8000/api/translate", ErrorCategory::Translate),
            ("http://localhost:8000/api/65f0c2a1", ErrorCategory::Save),
            ("/api/pending", ErrorCategory::Fetch),
        ];
        for (endpoint, expected) in cases {
            assert_eq!(AppError::bad_response(endpoint, 500).category(), expected, "{}", endpoint);
        }

        let io = std::io::Error::new(std::io::ErrorKind::Other, "eof");
        assert_eq!(
            AppError::json_parse_failed("/api/statistics", io).category(),
            ErrorCategory::Fetch
        );
    }

    #[test]
    fn test_category_of_local_errors() {
        let missing = AppError::from(ApiError::MissingCandidate {
            provider: "google".to_string(),
        });
        assert_eq!(missing.category(), ErrorCategory::Translate);
        assert_eq!(
            AppError::from(SessionError::NoActiveItem).category(),
            ErrorCategory::Usage
        );
        assert_eq!(
            AppError::from(ConfigError::InvalidBaseUrl("ftp://x".to_string())).category(),
            ErrorCategory::Usage
        );
        assert_eq!(
            AppError::file("review_log.txt", std::io::Error::from(std::io::ErrorKind::NotFound))
                .category(),
            ErrorCategory::Usage
        );
    }
}
