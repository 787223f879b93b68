use super::{Db, NewsRecord};

/// 用于查询新闻数据
///
/// 提供按 id 获取单条新闻和获取全部新闻的接口。
pub trait Querier: Send + Sync {
    type Error;

    /// 按 id 查询单条新闻
    ///
    /// 返回 [`NewsRecord`]，如果记录不存在则返回 `None`。
    fn get_one(
        &self,
        id: i32,
    ) -> impl std::future::Future<Output = Result<Option<NewsRecord>, Self::Error>>;

    /// 查询全部新闻
    ///
    /// 按创建时间倒序返回，不分页，搜索在客户端进行。
    fn list_all(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<NewsRecord>, Self::Error>>;
}

impl Querier for Db {
    type Error = sqlx::Error;

    async fn get_one(&self, id: i32) -> Result<Option<NewsRecord>, Self::Error> {
        let result = sqlx::query_as::<_, NewsRecord>(
            r#"
            SELECT id, title, body, author, image_url, embedding, date, created_at, updated_at
            FROM news
            WHERE id = $1
            LIMIT 1
            "#,
        )
        .bind(id)
        .fetch_optional(self)
        .await?;
        Ok(result)
    }

    async fn list_all(&self) -> Result<Vec<NewsRecord>, Self::Error> {
        sqlx::query_as::<_, NewsRecord>(
            r#"
            SELECT id, title, body, author, image_url, embedding, date, created_at, updated_at
            FROM news
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(self)
        .await
    }
}
