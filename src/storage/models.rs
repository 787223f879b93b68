use chrono::{DateTime, Local};

/// 新闻记录
///
/// 对应 `news` 表的一行。`embedding` 保存最近一次成功生成的向量，
/// 从未生成或生成失败时为 `None`。
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct NewsRecord {
    /// 由数据库分配的自增主键
    pub id: i32,
    /// 标题
    pub title: String,
    /// 正文
    pub body: String,
    /// 作者
    pub author: String,
    /// 可选配图地址
    pub image_url: Option<String>,
    /// 最近一次成功生成的文本向量
    pub embedding: Option<Vec<f32>>,
    /// 展示时间，创建时未指定则取当前时间
    pub date: DateTime<Local>,
    /// 创建时间
    pub created_at: DateTime<Local>,
    /// 更新时间，每次成功更新后刷新
    pub updated_at: DateTime<Local>,
}

/// 待写入的新闻字段
///
/// 来自请求体，必填字段已通过校验。
#[derive(Debug, Clone)]
pub struct NewsDraft {
    pub title: String,
    pub body: String,
    pub author: String,
    pub image_url: Option<String>,
    pub date: Option<DateTime<Local>>,
}
