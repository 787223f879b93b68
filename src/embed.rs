use std::env;

use reqwest::StatusCode;
use serde::Serialize;
use serde_json::Value;

/// 向量服务调用错误
///
/// 写入流程中这些错误只记录日志，不会中断请求。
#[derive(Debug, thiserror::Error)]
pub enum EmbedError {
    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    #[error("embedding service error: {status} {body}")]
    Service { status: StatusCode, body: String },

    #[error("unrecognized embedding response shape")]
    Format,
}

/// EmbeddingClient 调用外部向量服务，将文本转换为浮点向量。
///
/// 服务地址来自环境变量 `AI_SERVICE_URL`，未设置时使用
/// `http://ai-model:8000`。不重试，不做超时控制。
#[derive(Clone)]
pub struct EmbeddingClient {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Serialize)]
struct RequestBody<'a> {
    input: &'a str,
}

impl EmbeddingClient {
    const DEFAULT_SERVICE_URL: &'static str = "http://ai-model:8000";

    /// 从环境变量 `AI_SERVICE_URL` 创建客户端，未设置时回退到默认地址
    pub fn from_env() -> Self {
        Self::new(
            env::var("AI_SERVICE_URL").unwrap_or_else(|_| Self::DEFAULT_SERVICE_URL.to_string()),
        )
    }

    /// 使用指定的服务地址创建客户端
    ///
    /// ```ignore
    /// let embedder = EmbeddingClient::new("http://localhost:8000");
    /// // 使用环境变量
    /// let embedder = EmbeddingClient::from_env();
    /// ```
    pub fn new<T: AsRef<str>>(base_url: T) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()
            .expect("Failed to build reqwest client");

        Self {
            client,
            base_url: base_url.as_ref().trim_end_matches('/').to_string(),
        }
    }

    /// 将文本转换为向量
    ///
    /// 空文本直接返回空向量，不发起网络请求。
    /// 非成功状态码返回 [`EmbedError::Service`]。
    pub async fn embed<T: AsRef<str>>(&self, text: T) -> Result<Vec<f32>, EmbedError> {
        let text = text.as_ref();
        if text.is_empty() {
            return Ok(Vec::new());
        }

        let resp = self
            .client
            .post(format!("{}/embeddings", self.base_url))
            .json(&RequestBody { input: text })
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(EmbedError::Service { status, body });
        }

        parse_embedding(&resp.json::<Value>().await?)
    }
}

/// 解析向量服务的响应
///
/// 依次尝试三种结构：顶层 `embedding` 字段、`data.embedding`、
/// `data[0].embedding`，都不匹配返回 [`EmbedError::Format`]。
fn parse_embedding(json: &Value) -> Result<Vec<f32>, EmbedError> {
    [
        &json["embedding"],
        &json["data"]["embedding"],
        &json["data"][0]["embedding"],
    ]
    .into_iter()
    .find_map(as_vector)
    .ok_or(EmbedError::Format)
}

/// 字段值可以是向量，也可以是矩阵
///
/// 模型服务对单条输入也返回矩阵，此时取第一行。
fn as_vector(value: &Value) -> Option<Vec<f32>> {
    let items = value.as_array()?;
    let row = if items.iter().all(Value::is_number) {
        items
    } else {
        items.first()?.as_array()?
    };

    row.iter()
        .map(|v| v.as_f64().map(|f| f as f32))
        .collect::<Option<Vec<_>>>()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_parse_flat_embedding() {
        let json = json!({ "embedding": [0.1, 0.2, 0.3] });
        assert_eq!(parse_embedding(&json).unwrap(), vec![0.1, 0.2, 0.3]);
    }

    #[test]
    fn test_parse_matrix_embedding() {
        // 模型服务对单条输入返回 list-of-lists
        let json = json!({ "embedding": [[1.0, 2.0], [3.0, 4.0]], "input_count": 1 });
        assert_eq!(parse_embedding(&json).unwrap(), vec![1.0, 2.0]);
    }

    #[test]
    fn test_parse_nested_data_embedding() {
        let json = json!({ "data": { "embedding": [0.5, 0.6] } });
        assert_eq!(parse_embedding(&json).unwrap(), vec![0.5, 0.6]);
    }

    #[test]
    fn test_parse_data_array_embedding() {
        let json = json!({ "data": [{ "embedding": [7.0, 8.0] }] });
        assert_eq!(parse_embedding(&json).unwrap(), vec![7.0, 8.0]);
    }

    #[test]
    fn test_parse_unknown_shape() {
        let json = json!({ "vectors": [0.1] });
        assert!(matches!(parse_embedding(&json), Err(EmbedError::Format)));

        let json = json!({ "embedding": "not an array" });
        assert!(matches!(parse_embedding(&json), Err(EmbedError::Format)));
    }

    #[tokio::test]
    async fn test_embed_empty_input() {
        // 空文本不发请求，地址不可达也应返回空向量
        let embedder = EmbeddingClient::new("http://127.0.0.1:1");
        assert_eq!(embedder.embed("").await.unwrap(), Vec::<f32>::new());
    }

    /// 访问真实向量服务的测试，需要服务在本地运行
    #[tokio::test]
    #[ignore = "需要访问向量服务"]
    async fn test_embed() {
        let embedder = EmbeddingClient::new("http://localhost:8000");
        println!("{:?}", embedder.embed("hello world").await);
    }
}
