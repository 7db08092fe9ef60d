//! Error handling - RFC 7807 problem responses.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use blog_core::error::{DomainError, FieldViolation, RepoError};
use blog_core::ports::AuthError;
use blog_shared::ErrorResponse;
use blog_shared::response::FieldError;

/// Application-level error type that converts to RFC 7807 responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Bad request: {0}")]
    BadRequest(String),
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
    #[error("Forbidden: {0}")]
    Forbidden(String),
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Internal error: {0}")]
    Internal(String),
    #[error("Validation errors: {0:?}")]
    Validation(Vec<FieldViolation>),
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let error = match self {
            AppError::NotFound(detail) => ErrorResponse::not_found(detail),
            AppError::BadRequest(detail) => ErrorResponse::bad_request(detail),
            AppError::Unauthorized(detail) => ErrorResponse::unauthorized().with_detail(detail),
            AppError::Forbidden(detail) => ErrorResponse::forbidden().with_detail(detail),
            AppError::Conflict(detail) => ErrorResponse::new(409, "Conflict").with_detail(detail),
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                ErrorResponse::internal_error()
            }
            AppError::Validation(violations) => {
                let detail = violations
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(", ");
                let errors = violations
                    .iter()
                    .map(|v| FieldError {
                        field: v.field.clone(),
                        rule: v.rule.clone(),
                        message: v.message.clone(),
                    })
                    .collect();
                ErrorResponse::new(422, "Validation Failed")
                    .with_detail(detail)
                    .with_errors(errors)
            }
        };

        HttpResponse::build(self.status_code()).json(error)
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::NotFound { entity_type, key } => {
                AppError::NotFound(format!("{} '{}' not found", entity_type, key))
            }
            DomainError::Validation(violations) => AppError::Validation(violations),
            e @ DomainError::Unauthorized(_) => AppError::Unauthorized(e.to_string()),
            e @ DomainError::Forbidden(_) => AppError::Forbidden(e.to_string()),
            DomainError::Repository(e) => e.into(),
            DomainError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound => AppError::NotFound("Resource not found".to_string()),
            RepoError::Duplicate(msg) => {
                tracing::warn!("Duplicate key: {}", msg);
                AppError::Conflict("Resource already exists".to_string())
            }
            RepoError::Constraint(msg) => {
                tracing::error!("Database constraint violation: {}", msg);
                AppError::Internal("Database error".to_string())
            }
            RepoError::Connection(msg) => {
                tracing::error!("Database connection error: {}", msg);
                AppError::Internal("Database error".to_string())
            }
            RepoError::Query(msg) => {
                tracing::error!("Database query error: {}", msg);
                AppError::Internal("Database error".to_string())
            }
        }
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials | AuthError::MissingAuth => {
                AppError::Unauthorized(err.to_string())
            }
            AuthError::TokenExpired | AuthError::InvalidToken(_) => {
                AppError::Unauthorized(err.to_string())
            }
            AuthError::HashingError(msg) => AppError::Internal(msg),
        }
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use blog_core::error::Mutation;

    #[test]
    fn test_policy_denials_map_to_auth_statuses() {
        let anonymous: AppError = DomainError::Unauthorized(Mutation::Insert).into();
        let stranger: AppError = DomainError::Forbidden(Mutation::Delete).into();

        assert_eq!(anonymous.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(stranger.status_code(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_validation_maps_to_422() {
        let err: AppError = DomainError::Validation(vec![FieldViolation {
            field: "title".to_string(),
            rule: "max".to_string(),
            message: "Title cannot exceed 60 characters".to_string(),
        }])
        .into();

        assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_duplicate_maps_to_conflict_without_db_text() {
        let err: AppError =
            RepoError::Duplicate("duplicate key value violates \"posts_short_id_key\"".to_string())
                .into();
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
        assert!(!err.to_string().contains("posts_short_id_key"));
    }

    #[test]
    fn test_constraint_maps_to_opaque_internal_error() {
        let err: AppError =
            RepoError::Constraint("violates foreign key \"fk_posts_user\"".to_string()).into();
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!err.to_string().contains("fk_posts_user"));
    }
}
