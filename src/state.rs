use axum::extract::FromRef;

use crate::{embed::EmbeddingClient, storage::Db};

/// 应用程序上下文
///
/// [`AppState`] 封装了数据库连接池和向量服务客户端，提供统一访问入口。
#[derive(Clone, FromRef)]
pub struct AppState {
    pool: Db,
    embedder: EmbeddingClient,
}

impl AppState {
    /// 创建一个新的 [`AppState`] 实例
    pub fn new(pool: Db, embedder: EmbeddingClient) -> Self {
        Self { pool, embedder }
    }
}
