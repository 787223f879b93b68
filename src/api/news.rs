use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::{
    embed::EmbeddingClient,
    error::{ApiError, Result},
    state::AppState,
    storage::{Db, NewsDraft, NewsRecord, Querier, Store},
};

/// 配置新闻相关路由。
///
/// 路由包括：
/// - `GET /news`：新闻列表
/// - `POST /news`：创建新闻
/// - `GET /news/{id}`：获取单条新闻
/// - `PUT /news/{id}`：更新新闻
/// - `DELETE /news/{id}`：删除新闻
pub fn setup_route() -> Router<AppState> {
    Router::new()
        .route("/news", get(news_list).post(news_create))
        .route(
            "/news/{id}",
            get(news_get).put(news_update).delete(news_delete),
        )
}

/// 新闻条目，序列化为与前端约定的 camelCase 字段。
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsItem {
    pub id: i32,
    pub title: String,
    pub body: String,
    pub author: String,
    pub image_url: Option<String>,
    pub embedding: Option<Vec<f32>>,
    pub date: DateTime<Local>,
    pub created_at: DateTime<Local>,
    pub updated_at: DateTime<Local>,
}

impl From<NewsRecord> for NewsItem {
    fn from(record: NewsRecord) -> Self {
        Self {
            id: record.id,
            title: record.title,
            body: record.body,
            author: record.author,
            image_url: record.image_url,
            embedding: record.embedding,
            date: record.date,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

/// 创建和更新共用的请求体。
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsPayload {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub author: String,
    pub image_url: Option<String>,
    pub date: Option<DateTime<Local>>,
}

impl NewsPayload {
    /// 校验必填字段，通过后转换为 [`NewsDraft`]。
    ///
    /// `title`、`body`、`author` 任一缺失或为空白时返回
    /// [`ApiError::MissingFields`]。
    fn into_draft(self) -> Result<NewsDraft> {
        if self.title.trim().is_empty()
            || self.body.trim().is_empty()
            || self.author.trim().is_empty()
        {
            return Err(ApiError::MissingFields.into());
        }

        Ok(NewsDraft {
            title: self.title,
            body: self.body,
            author: self.author,
            image_url: self.image_url,
            date: self.date,
        })
    }
}

/// 解析路径中的 id，非数字返回 [`ApiError::InvalidId`]。
fn parse_id(raw: &str) -> Result<i32> {
    raw.parse().map_err(|_| ApiError::InvalidId.into())
}

/// 尝试为标题和正文生成向量。
///
/// 失败时记录日志并返回 `None`，写入流程不会因此中断。
async fn try_embed(embedder: &EmbeddingClient, title: &str, body: &str) -> Option<Vec<f32>> {
    match embedder.embed(format!("{}\n{}", title, body)).await {
        Ok(vector) => Some(vector),
        Err(e) => {
            tracing::warn!(%e, "embedding failed, writing without vector");
            None
        }
    }
}

/// 获取全部新闻，按创建时间倒序。
async fn news_list(State(pool): State<Db>) -> Result<Json<Vec<NewsItem>>> {
    let items = pool.list_all().await?;
    Ok(Json(items.into_iter().map(NewsItem::from).collect()))
}

/// 创建新闻。
///
/// 先尽力生成向量，再写库，成功返回 201 和完整记录。
async fn news_create(
    State(pool): State<Db>,
    State(embedder): State<EmbeddingClient>,
    Json(payload): Json<NewsPayload>,
) -> Result<(StatusCode, Json<NewsItem>)> {
    let draft = payload.into_draft()?;
    let embedding = try_embed(&embedder, &draft.title, &draft.body).await;

    let created = pool.create(&draft, embedding).await?;
    Ok((StatusCode::CREATED, Json(created.into())))
}

/// 按 id 获取单条新闻，不存在返回 [`ApiError::NotFound`]。
async fn news_get(State(pool): State<Db>, Path(id): Path<String>) -> Result<Json<NewsItem>> {
    let id = parse_id(&id)?;
    let record = pool.get_one(id).await?.ok_or(ApiError::NotFound)?;
    Ok(Json(record.into()))
}

/// 按 id 更新新闻。
///
/// 重新生成向量失败时保留旧向量，记录照常更新。
async fn news_update(
    State(pool): State<Db>,
    State(embedder): State<EmbeddingClient>,
    Path(id): Path<String>,
    Json(payload): Json<NewsPayload>,
) -> Result<Json<NewsItem>> {
    let id = parse_id(&id)?;
    let draft = payload.into_draft()?;
    let embedding = try_embed(&embedder, &draft.title, &draft.body).await;

    let updated = pool
        .update(id, &draft, embedding)
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(Json(updated.into()))
}

/// 按 id 删除新闻，成功返回 204 空响应。
async fn news_delete(State(pool): State<Db>, Path(id): Path<String>) -> Result<StatusCode> {
    let id = parse_id(&id)?;
    if !pool.remove(id).await? {
        return Err(ApiError::NotFound.into());
    }
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use crate::error::Error;

    use super::*;

    fn payload(title: &str, body: &str, author: &str) -> NewsPayload {
        NewsPayload {
            title: title.to_string(),
            body: body.to_string(),
            author: author.to_string(),
            image_url: None,
            date: None,
        }
    }

    #[test]
    fn test_into_draft() {
        let draft = payload("T", "B", "A").into_draft().unwrap();
        assert_eq!(draft.title, "T");
        assert_eq!(draft.body, "B");
        assert_eq!(draft.author, "A");
    }

    #[test]
    fn test_into_draft_missing_fields() {
        // 缺失和纯空白都算缺字段
        for p in [
            payload("", "B", "A"),
            payload("T", "", "A"),
            payload("T", "B", ""),
            payload("T", "B", "   "),
        ] {
            assert!(matches!(
                p.into_draft(),
                Err(Error::Api(ApiError::MissingFields))
            ));
        }
    }

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("42").unwrap(), 42);
        assert!(matches!(
            parse_id("abc"),
            Err(Error::Api(ApiError::InvalidId))
        ));
        assert!(matches!(
            parse_id("1.5"),
            Err(Error::Api(ApiError::InvalidId))
        ));
    }
}
