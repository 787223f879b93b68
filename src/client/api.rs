use chrono::{DateTime, Local};
use reqwest::blocking::Response;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// 客户端侧的新闻条目
///
/// 与服务端 JSON 对应。向量字段对页面无用，解析时直接忽略。
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct News {
    pub id: i32,
    pub title: String,
    pub body: String,
    pub author: String,
    pub image_url: Option<String>,
    pub date: DateTime<Local>,
    pub created_at: DateTime<Local>,
    pub updated_at: DateTime<Local>,
}

/// 创建和编辑表单提交的数据。
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsInput {
    pub title: String,
    pub body: String,
    pub author: String,
    pub image_url: Option<String>,
}

/// 新闻接口的 HTTP 客户端
///
/// 所有变更都等服务端确认后才由视图落到本地状态。
pub struct PortalApi {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl PortalApi {
    pub fn new<T: AsRef<str>>(base_url: T) -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
            base_url: base_url.as_ref().trim_end_matches('/').to_string(),
        }
    }

    /// 获取全部新闻，服务端按创建时间倒序返回。
    pub fn list(&self) -> Result<Vec<News>> {
        let resp = self
            .client
            .get(format!("{}/api/news", self.base_url))
            .send()?;
        Ok(Self::expect_success(resp)?.json()?)
    }

    /// 创建新闻，成功返回带 id 的完整记录。
    pub fn create(&self, input: &NewsInput) -> Result<News> {
        let resp = self
            .client
            .post(format!("{}/api/news", self.base_url))
            .json(input)
            .send()?;
        Ok(Self::expect_success(resp)?.json()?)
    }

    /// 按 id 更新新闻，成功返回更新后的记录。
    pub fn update(&self, id: i32, input: &NewsInput) -> Result<News> {
        let resp = self
            .client
            .put(format!("{}/api/news/{}", self.base_url, id))
            .json(input)
            .send()?;
        Ok(Self::expect_success(resp)?.json()?)
    }

    /// 按 id 删除新闻，服务端成功时返回 204 空响应。
    pub fn remove(&self, id: i32) -> Result<()> {
        let resp = self
            .client
            .delete(format!("{}/api/news/{}", self.base_url, id))
            .send()?;
        Self::expect_success(resp)?;
        Ok(())
    }

    /// 非成功响应转换为带响应体的错误，响应体为空时退回状态码文本。
    fn expect_success(resp: Response) -> Result<Response> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }

        let body = resp.text().unwrap_or_default();
        let msg = if body.trim().is_empty() {
            status.to_string()
        } else {
            body
        };
        Err(Error::Unexpected(msg))
    }
}
