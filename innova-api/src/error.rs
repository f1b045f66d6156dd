use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use innova_booking::{CalendarError, CancelError, CreationError, LifecycleError, TimeRangeError};
use innova_catalog::CatalogError;
use innova_core::CollaboratorError;
use serde_json::json;

#[derive(Debug)]
pub enum AppError {
    AuthenticationError(String),
    AuthorizationError(String),
    ValidationError(String),
    NotFoundError(String),
    ConflictError(String),
    /// The backend declined; its message reaches the user verbatim.
    RejectedError(String),
    UpstreamError(String),
    /// The backend did the work but its answer is unusable; retrying is wrong.
    UnreadableResultError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::AuthenticationError(msg) => (StatusCode::UNAUTHORIZED, msg),
            AppError::AuthorizationError(msg) => (StatusCode::FORBIDDEN, msg),
            AppError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFoundError(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::ConflictError(msg) => (StatusCode::CONFLICT, msg),
            AppError::RejectedError(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            AppError::UpstreamError(msg) => {
                tracing::error!("Backend unavailable: {}", msg);
                (StatusCode::BAD_GATEWAY, "Backend unavailable, please retry".to_string())
            }
            AppError::UnreadableResultError(msg) => {
                tracing::error!("Unreadable backend result: {}", msg);
                (StatusCode::BAD_GATEWAY, msg)
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

impl From<CollaboratorError> for AppError {
    fn from(err: CollaboratorError) -> Self {
        match err {
            CollaboratorError::Rejected(msg) => AppError::RejectedError(msg),
            other => AppError::UpstreamError(other.to_string()),
        }
    }
}

impl From<CreationError> for AppError {
    fn from(err: CreationError) -> Self {
        match err {
            CreationError::Validation(e) => AppError::ValidationError(e.to_string()),
            e @ CreationError::PaymentNotConfirmed => AppError::ValidationError(e.to_string()),
            e @ CreationError::Conflict { .. } => AppError::ConflictError(e.to_string()),
            CreationError::Rejected(msg) => AppError::RejectedError(msg),
            CreationError::Transport(msg) => AppError::UpstreamError(msg),
            e @ CreationError::StoredUnreadable { .. } => AppError::UnreadableResultError(e.to_string()),
            CreationError::Lifecycle(e) => AppError::from(e),
        }
    }
}

impl From<CancelError> for AppError {
    fn from(err: CancelError) -> Self {
        match err {
            e @ CancelError::NotFound(_) => AppError::NotFoundError(e.to_string()),
            e @ CancelError::NotPermitted(_) => AppError::AuthorizationError(e.to_string()),
            CancelError::Lifecycle(e) => AppError::from(e),
            CancelError::Rejected(msg) => AppError::RejectedError(msg),
            CancelError::Transport(msg) => AppError::UpstreamError(msg),
        }
    }
}

impl From<LifecycleError> for AppError {
    fn from(err: LifecycleError) -> Self {
        match err {
            e @ LifecycleError::InvalidTransition { .. } => AppError::ConflictError(e.to_string()),
            e => AppError::ValidationError(e.to_string()),
        }
    }
}

impl From<CalendarError> for AppError {
    fn from(err: CalendarError) -> Self {
        AppError::ValidationError(err.to_string())
    }
}

impl From<TimeRangeError> for AppError {
    fn from(err: TimeRangeError) -> Self {
        AppError::ValidationError(err.to_string())
    }
}

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        match err {
            e @ CatalogError::NotFound(_) => AppError::NotFoundError(e.to_string()),
            e => AppError::UpstreamError(e.to_string()),
        }
    }
}
