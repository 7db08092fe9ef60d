//! Post listings, the slider and the detail page.

use blog_core::domain::Post;
use blog_shared::format::{local_date, shorten};

use super::layout::escape;

/// Characters of the body shown in a summary card.
pub const SUMMARY_CHARS: usize = 200;

fn keyword_tags(post: &Post) -> String {
    post.keyword_list()
        .into_iter()
        .map(|k| format!(r#"<span class="keyword">{}</span>"#, escape(k)))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Summary card linking to the detail page.
pub fn summary(post: &Post) -> String {
    format!(
        r#"<article class="post-summary">
    <h2><a href="/posts/{short_id}">{title}</a></h2>
    <p class="date">{date}</p>
    <p>{excerpt}</p>
    <p class="keywords">{keywords}</p>
</article>"#,
        short_id = escape(&post.short_id),
        title = escape(&post.title),
        date = local_date(&post.date),
        excerpt = escape(&shorten(&post.body, SUMMARY_CHARS)),
        keywords = keyword_tags(post),
    )
}

fn list(posts: &[Post]) -> String {
    if posts.is_empty() {
        return r#"<p class="empty">No posts yet.</p>"#.to_string();
    }
    posts.iter().map(summary).collect::<Vec<_>>().join("\n")
}

fn slider(posts: &[Post]) -> String {
    let slides = posts
        .iter()
        .map(|post| {
            format!(
                r#"<li class="slide"><a href="/posts/{}">{}</a> <span class="date">{}</span></li>"#,
                escape(&post.short_id),
                escape(&post.title),
                local_date(&post.date),
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!("<section class=\"slider\">\n<ul>\n{slides}\n</ul>\n</section>")
}

/// Desktop index: slider over the newest posts, then the desktop window.
pub fn desktop_index(slides: &[Post], posts: &[Post]) -> String {
    format!(
        "{}\n<section class=\"posts\">\n{}\n</section>",
        slider(slides),
        list(posts)
    )
}

/// Mobile home list.
pub fn mobile_home(posts: &[Post]) -> String {
    format!("<section class=\"posts\">\n{}\n</section>", list(posts))
}

/// Detail page. The body is sanitized HTML; an unknown id renders an empty section.
pub fn detail(posts: &[Post]) -> String {
    let articles = posts
        .iter()
        .map(|post| {
            format!(
                r#"<article class="post">
    <h1>{title}</h1>
    <p class="date">{date}</p>
    <div class="post-body">{body}</div>
    <p class="keywords">{keywords}</p>
</article>"#,
                title = escape(&post.title),
                date = local_date(&post.date),
                body = ammonia::clean(&post.body),
                keywords = keyword_tags(post),
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!("<section class=\"post-detail\">\n{articles}\n</section>")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    fn post(short_id: &str, title: &str, body: &str) -> Post {
        Post::new(
            short_id.to_string(),
            Utc.with_ymd_and_hms(2024, 1, 5, 12, 0, 0).unwrap(),
            Uuid::new_v4(),
            title.to_string(),
            "rust, web".to_string(),
            body.to_string(),
        )
    }

    #[test]
    fn test_summary_links_and_shortens() {
        let body = "x".repeat(SUMMARY_CHARS + 20);
        let html = summary(&post("abc123", "Hello <World>", &body));

        assert!(html.contains(r#"href="/posts/abc123""#));
        assert!(html.contains("Hello &lt;World&gt;"));
        assert!(html.contains("January 05, 2024"));
        assert!(html.contains(&format!("{}...", "x".repeat(SUMMARY_CHARS))));
        assert!(html.contains(r#"<span class="keyword">rust</span>"#));
    }

    #[test]
    fn test_detail_sanitizes_body() {
        let html = detail(&[post("abc", "T", "<p>ok</p><script>alert(1)</script>")]);

        assert!(html.contains("<p>ok</p>"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_detail_without_match_is_empty_section() {
        let html = detail(&[]);
        assert!(html.contains("post-detail"));
        assert!(!html.contains("<article"));
    }

    #[test]
    fn test_desktop_index_has_slider_and_list() {
        let slides = vec![post("s1", "Slide", "b")];
        let posts = vec![post("p1", "Listed", "b")];
        let html = desktop_index(&slides, &posts);

        assert!(html.contains(r#"class="slider""#));
        assert!(html.contains("/posts/s1"));
        assert!(html.contains("/posts/p1"));
    }

    #[test]
    fn test_empty_list_message() {
        assert!(mobile_home(&[]).contains("No posts yet."));
    }
}
