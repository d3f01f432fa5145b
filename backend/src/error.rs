use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use shared::ErrorEnvelope;

/// The full failure taxonomy a request can surface. Internal codec and
/// classifier errors are logged where they occur and mapped here before
/// serialization; none of them leak verbatim.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Missing image field")]
    MissingField,
    #[error("Unsupported image format")]
    InvalidImage,
    #[error("Internal server error")]
    Classification,
    #[error("Unsupported method")]
    UnsupportedMethod,
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MissingField | ApiError::InvalidImage => StatusCode::BAD_REQUEST,
            ApiError::Classification => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::UnsupportedMethod => StatusCode::METHOD_NOT_ALLOWED,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .json(ErrorEnvelope::new(self.status_code().as_u16(), self.to_string()))
    }
}
