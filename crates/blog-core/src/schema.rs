//! Field rules a post must satisfy before it is written.
//!
//! Strings are trimmed before they are checked. `title`, `keywords` and `body`
//! are required; `title` is capped at [`TITLE_MAX_CHARS`] characters.
//! `shortId` and `date` are never taken from input, they come from
//! [`PostDefaults`](crate::ports::PostDefaults) when a post is inserted.

use serde::Deserialize;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::domain::Post;
use crate::error::{DomainError, FieldViolation};

pub const TITLE_MAX_CHARS: usize = 60;

// `validator` expects `length` bounds as `u64`.
const TITLE_MAX_CHARS_U64: u64 = TITLE_MAX_CHARS as u64;

/// User-editable fields of a new post, as submitted by the create form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Validate)]
pub struct PostDraft {
    #[serde(default)]
    #[validate(custom(function = "required"), length(max = TITLE_MAX_CHARS_U64, code = "max"))]
    pub title: String,

    #[serde(default)]
    #[validate(custom(function = "required"))]
    pub keywords: String,

    #[serde(default)]
    #[validate(custom(function = "required"))]
    pub body: String,
}

impl PostDraft {
    pub fn new(
        title: impl Into<String>,
        keywords: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            keywords: keywords.into(),
            body: body.into(),
        }
    }

    /// Trim and check every field, reporting all violations at once.
    pub fn validated(self) -> Result<Self, DomainError> {
        let draft = Self {
            title: self.title.trim().to_string(),
            keywords: self.keywords.trim().to_string(),
            body: self.body.trim().to_string(),
        };

        draft
            .validate()
            .map_err(|errors| DomainError::Validation(violations(&errors)))?;

        Ok(draft)
    }
}

/// Partial update: absent fields keep their stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PostPatch {
    pub title: Option<String>,
    pub keywords: Option<String>,
    pub body: Option<String>,
}

impl PostPatch {
    /// The draft obtained by applying this patch on top of `post`.
    pub fn merged_with(self, post: &Post) -> PostDraft {
        PostDraft {
            title: self.title.unwrap_or_else(|| post.title.clone()),
            keywords: self.keywords.unwrap_or_else(|| post.keywords.clone()),
            body: self.body.unwrap_or_else(|| post.body.clone()),
        }
    }
}

fn required(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::new("required"));
    }
    Ok(())
}

fn label(field: &str) -> &str {
    match field {
        "title" => "Title",
        "keywords" => "Keywords",
        "body" => "Body",
        other => other,
    }
}

fn violations(errors: &ValidationErrors) -> Vec<FieldViolation> {
    let mut out: Vec<FieldViolation> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            let field = field.to_string();
            errs.iter().map(move |e| {
                let rule = e.code.to_string();
                let message = match rule.as_str() {
                    "required" => format!("{} is required", label(&field)),
                    "max" => format!(
                        "{} cannot exceed {} characters",
                        label(&field),
                        TITLE_MAX_CHARS
                    ),
                    _ => format!("{} is invalid", label(&field)),
                };
                FieldViolation {
                    field: field.clone(),
                    rule,
                    message,
                }
            })
        })
        .collect();

    out.sort_by(|a, b| a.field.cmp(&b.field).then_with(|| a.rule.cmp(&b.rule)));
    out
}
