//! Domain-level error types.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// A single schema violation: which field, which rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub field: String,
    pub rule: String,
    pub message: String,
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.rule)
    }
}

/// Collection mutations gated by the access policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    Insert,
    Update,
    Delete,
}

impl fmt::Display for Mutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mutation::Insert => write!(f, "insert"),
            Mutation::Update => write!(f, "update"),
            Mutation::Delete => write!(f, "delete"),
        }
    }
}

/// Domain errors - business logic failures.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Entity not found: {entity_type} with key {key}")]
    NotFound { entity_type: &'static str, key: String },

    #[error("Validation failed: {}", join_violations(.0))]
    Validation(Vec<FieldViolation>),

    /// Anonymous caller attempted a gated mutation.
    #[error("Authentication required to {0} posts")]
    Unauthorized(Mutation),

    /// Identified caller denied by the access policy.
    #[error("Not allowed to {0} this post")]
    Forbidden(Mutation),

    #[error(transparent)]
    Repository(#[from] RepoError),

    #[error("Internal error: {0}")]
    Internal(String),
}

fn join_violations(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Repository-level errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    #[error("Entity not found")]
    NotFound,

    /// A unique key is already taken.
    #[error("Duplicate key: {0}")]
    Duplicate(String),

    /// Any other integrity rule, e.g. a missing referenced row.
    #[error("Constraint violation: {0}")]
    Constraint(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_message_lists_fields() {
        let err = DomainError::Validation(vec![
            FieldViolation {
                field: "body".to_string(),
                rule: "required".to_string(),
                message: "Body is required".to_string(),
            },
            FieldViolation {
                field: "title".to_string(),
                rule: "max".to_string(),
                message: "Title cannot exceed 60 characters".to_string(),
            },
        ]);

        assert_eq!(
            err.to_string(),
            "Validation failed: body: required, title: max"
        );
    }
}
