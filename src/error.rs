use axum::response::IntoResponse;
use reqwest::StatusCode;

pub type Result<T> = core::result::Result<T, Error>;

/// 请求层错误
///
/// 由各 handler 按结构匹配构造，而不是检查错误消息文本。
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Missing fields (title, body, author)")]
    MissingFields,

    #[error("Invalid id param")]
    InvalidId,

    #[error("Not found")]
    NotFound,
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),

    #[error(transparent)]
    Reqwest(#[from] reqwest::Error),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("{0}")]
    Unexpected(String),
}

impl IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        match self {
            Error::Sqlx(e) => {
                tracing::error!(%e, "sqlx error");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
            }
            .into_response(),
            Error::Reqwest(_) => (StatusCode::BAD_GATEWAY, "Bad Gateway").into_response(),
            Error::Api(api_error) => match api_error {
                ApiError::NotFound => (StatusCode::NOT_FOUND, "Not found").into_response(),
                e @ (ApiError::MissingFields | ApiError::InvalidId) => {
                    (StatusCode::BAD_REQUEST, e.to_string()).into_response()
                }
            },
            Error::Unexpected(msg) => {
                tracing::error!(%msg, "unexpected error");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
            }
            .into_response(),
        }
    }
}
