//! Server-rendered HTML.

pub mod forms;
pub mod layout;
pub mod nav;
pub mod posts;

pub use layout::{Header, Layout};
pub use nav::RouteName;

pub fn about() -> String {
    r#"<section class="about">
    <h1>About</h1>
    <p>A small blog about whatever we are working on this week.</p>
</section>"#
        .to_string()
}

pub fn contact() -> String {
    r#"<section class="contact">
    <h1>Contact</h1>
    <p>Questions or corrections are welcome by email.</p>
</section>"#
        .to_string()
}
