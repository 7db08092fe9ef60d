//! # Blog Shared
//!
//! Wire types and presentation helpers shared by the server and its clients.

pub mod dto;
pub mod format;
pub mod response;

pub use response::ErrorResponse;
