use super::{Db, NewsDraft, NewsRecord};

/// 提供新闻的写入接口
///
/// 创建、更新、删除各自独立执行，不开启事务。
pub trait Store: Send + Sync {
    type Error;

    /// 插入新闻
    ///
    /// `embedding` 为本次写入前生成的向量，生成失败时传 `None`，
    /// 记录照常写入。返回数据库生成的完整记录。
    fn create(
        &self,
        draft: &NewsDraft,
        embedding: Option<Vec<f32>>,
    ) -> impl std::future::Future<Output = Result<NewsRecord, Self::Error>>;

    /// 按 id 更新新闻
    ///
    /// `embedding` 为 `None` 时保留旧向量（重新生成失败允许向量过期）。
    /// 记录不存在返回 `None`。
    fn update(
        &self,
        id: i32,
        draft: &NewsDraft,
        embedding: Option<Vec<f32>>,
    ) -> impl std::future::Future<Output = Result<Option<NewsRecord>, Self::Error>>;

    /// 按 id 删除新闻
    ///
    /// 返回是否真的删除了一条记录。
    fn remove(&self, id: i32) -> impl std::future::Future<Output = Result<bool, Self::Error>>;
}

impl Store for Db {
    type Error = sqlx::Error;

    async fn create(
        &self,
        draft: &NewsDraft,
        embedding: Option<Vec<f32>>,
    ) -> Result<NewsRecord, Self::Error> {
        sqlx::query_as::<_, NewsRecord>(
            r#"
            INSERT INTO news (title, body, author, image_url, embedding, date)
            VALUES ($1, $2, $3, $4, $5, COALESCE($6, now()))
            RETURNING id, title, body, author, image_url, embedding, date, created_at, updated_at
            "#,
        )
        .bind(draft.title.to_owned())
        .bind(draft.body.to_owned())
        .bind(draft.author.to_owned())
        .bind(draft.image_url.to_owned())
        .bind(embedding)
        .bind(draft.date)
        .fetch_one(self)
        .await
    }

    async fn update(
        &self,
        id: i32,
        draft: &NewsDraft,
        embedding: Option<Vec<f32>>,
    ) -> Result<Option<NewsRecord>, Self::Error> {
        sqlx::query_as::<_, NewsRecord>(
            r#"
            UPDATE news
            SET title = $2,
                body = $3,
                author = $4,
                image_url = $5,
                embedding = COALESCE($6, embedding),
                date = COALESCE($7, date),
                updated_at = now()
            WHERE id = $1
            RETURNING id, title, body, author, image_url, embedding, date, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(draft.title.to_owned())
        .bind(draft.body.to_owned())
        .bind(draft.author.to_owned())
        .bind(draft.image_url.to_owned())
        .bind(embedding)
        .bind(draft.date)
        .fetch_optional(self)
        .await
    }

    async fn remove(&self, id: i32) -> Result<bool, Self::Error> {
        let result = sqlx::query("DELETE FROM news WHERE id = $1")
            .bind(id)
            .execute(self)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
