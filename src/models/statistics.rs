use serde::Deserialize;

/// 各状态的对话数量
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct StatusCounts {
    #[serde(default)]
    pub pendiente: u64,
    #[serde(default)]
    pub en_progreso: u64,
    #[serde(default)]
    pub traducido: u64,
}

/// `GET /api/statistics` 的返回结构
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Statistics {
    pub total_documents: u64,
    pub status_counts: StatusCounts,
}
