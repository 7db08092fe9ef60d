//! The `main` layout shared by every HTML page.

use crate::middleware::auth::Identity;

use super::nav::{NavItem, RouteName, current_class};

/// Header variant rendered above the content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Header {
    /// Full-height intro header of the desktop index.
    Cold,
    /// Compact header of every other page.
    Warm,
}

/// Escape text for HTML element content and quoted attribute values.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

pub struct Layout<'a> {
    pub title: &'a str,
    pub route: Option<RouteName>,
    pub header: Header,
    pub identity: Option<&'a Identity>,
}

impl<'a> Layout<'a> {
    pub fn new(title: &'a str, route: Option<RouteName>, identity: Option<&'a Identity>) -> Self {
        Self {
            title,
            route,
            header: Header::Warm,
            identity,
        }
    }

    pub fn with_header(mut self, header: Header) -> Self {
        self.header = header;
        self
    }

    pub fn render(&self, content: &str) -> String {
        format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>{title}</title>
</head>
<body>
{header}
<main class="container">
{content}
</main>
</body>
</html>"#,
            title = escape(self.title),
            header = self.header(),
        )
    }

    fn header(&self) -> String {
        let class = match self.header {
            Header::Cold => "cold-header",
            Header::Warm => "warm-header",
        };

        format!(
            r#"<header class="{class}">
    <nav>
        <ul>
            <li class="{home}"><a href="/home">Home</a></li>
            <li class="{about}"><a href="/about">About</a></li>
            <li class="{contact}"><a href="/contact">Contact</a></li>
            {session}
        </ul>
    </nav>
</header>"#,
            home = current_class(self.route, NavItem::Home),
            about = current_class(self.route, NavItem::About),
            contact = current_class(self.route, NavItem::Contact),
            session = self.session_links(),
        )
    }

    fn session_links(&self) -> String {
        match self.identity {
            Some(identity) => format!(
                r#"<li><a href="/create">New post</a></li>
            <li><form class="logout" action="/logout" method="POST"><button type="submit">Log out {}</button></form></li>"#,
                escape(&identity.email)
            ),
            None => r#"<li><a href="/login">Log in</a></li>"#.to_string(),
        }
    }
}
