use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use anthropic_client::ClientError;
use serde::Serialize;
use thiserror::Error;

pub type Result<T, E = AppError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Upstream(#[from] ClientError),
}

#[derive(Serialize)]
struct JsonError {
    error: String,
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(JsonError {
            error: self.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    #[test]
    fn validation_maps_to_bad_request() {
        let err = AppError::Validation("Please provide a putter name".into());
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn every_client_failure_maps_to_server_error() {
        let errors = [
            ClientError::NotInitialized("Anthropic API key is not configured".into()),
            ClientError::Api {
                status: 401,
                message: "authentication_error: invalid x-api-key".into(),
            },
            ClientError::Api {
                status: 400,
                message: "invalid_request_error: max_tokens too large".into(),
            },
        ];
        for err in errors {
            assert_eq!(
                AppError::from(err).status_code(),
                StatusCode::INTERNAL_SERVER_ERROR
            );
        }
    }

    #[actix_web::test]
    async fn error_body_is_a_single_error_field() {
        let resp = AppError::Upstream(ClientError::Api {
            status: 529,
            message: "overloaded_error: Overloaded".into(),
        })
        .error_response();

        let body = to_bytes(resp.into_body()).await.unwrap();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(
            value,
            serde_json::json!({ "error": "Anthropic API error: HTTP 529: overloaded_error: Overloaded" })
        );
    }
}
