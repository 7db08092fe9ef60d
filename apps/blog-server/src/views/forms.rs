//! Create and login forms.

use blog_core::error::FieldViolation;
use blog_core::schema::{PostDraft, TITLE_MAX_CHARS};

use super::layout::escape;

fn field_errors(errors: &[FieldViolation], field: &str) -> String {
    errors
        .iter()
        .filter(|e| e.field == field)
        .map(|e| format!(r#"<span class="help-inline error">{}</span>"#, escape(&e.message)))
        .collect::<Vec<_>>()
        .join("")
}

/// Create form, echoing submitted values and per-field errors.
pub fn create_post(draft: &PostDraft, errors: &[FieldViolation]) -> String {
    format!(
        r#"<form class="create-post" action="/create" method="POST">
    <fieldset>
        <label for="title">Title</label>
        <input type="text" id="title" name="title" class="input-xxlarge" maxlength="{max}" value="{title}">
        {title_errors}
        <label for="keywords">Keywords</label>
        <input type="text" id="keywords" name="keywords" class="input-xxlarge" value="{keywords}">
        {keywords_errors}
        <label for="body">Body</label>
        <textarea id="body" name="body" rows="20">{body}</textarea>
        {body_errors}
        <button type="submit" class="btn btn-primary">Publish</button>
    </fieldset>
</form>"#,
        max = TITLE_MAX_CHARS,
        title = escape(&draft.title),
        keywords = escape(&draft.keywords),
        body = escape(&draft.body),
        title_errors = field_errors(errors, "title"),
        keywords_errors = field_errors(errors, "keywords"),
        body_errors = field_errors(errors, "body"),
    )
}

/// Email/password login form.
pub fn login(email: &str, message: Option<&str>) -> String {
    let alert = message
        .map(|m| format!(r#"<p class="alert alert-error">{}</p>"#, escape(m)))
        .unwrap_or_default();

    format!(
        r#"{alert}
<form class="login" action="/login" method="POST">
    <label for="email">Email</label>
    <input type="email" id="email" name="email" value="{email}">
    <label for="password">Password</label>
    <input type="password" id="password" name="password">
    <button type="submit" class="btn">Log in</button>
</form>"#,
        email = escape(email),
    )
}
