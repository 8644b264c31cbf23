use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;

/// Outcome of a request that did not produce any rows.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The query ran and matched nothing.
    #[error("{0}")]
    NotFound(String),
    /// The query string could not be read into the search parameters.
    #[error("{0}")]
    InvalidQuery(String),
    #[error(transparent)]
    Storage(#[from] sqlx::Error),
}

#[derive(Serialize)]
struct MessageJsonResp<'a> {
    message: &'a str,
}

#[derive(Serialize)]
struct ErrJsonResp {
    error: String,
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::InvalidQuery(_) => StatusCode::BAD_REQUEST,
            Self::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let mut resp = HttpResponse::build(self.status_code());
        match self {
            Self::NotFound(message) => resp.json(MessageJsonResp { message }),
            Self::InvalidQuery(reason) => resp.json(ErrJsonResp {
                error: reason.clone(),
            }),
            Self::Storage(err) => {
                tracing::error!("query failed: {err}");
                resp.json(ErrJsonResp {
                    error: err.to_string(),
                })
            }
        }
    }
}
