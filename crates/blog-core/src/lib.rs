//! # Blog Core
//!
//! The domain layer of the blog.
//! Posts, the access policy over the post collection, the schema rules a post
//! must satisfy, and the service that ties them to the storage ports.
//! This crate has no infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod policy;
pub mod ports;
pub mod schema;
pub mod service;

pub use error::DomainError;
pub use service::PostService;
