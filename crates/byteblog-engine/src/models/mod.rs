//! Typed payloads exchanged with the ByteAndBlog REST API.
//!
//! Field names follow the API's camelCase JSON. Everything the API may omit is
//! optional or defaulted so partial payloads still decode.

pub mod auth;
pub mod comment;
pub mod listing;
pub mod news;
pub mod portfolio;
pub mod post;
pub mod stats;
pub mod upload;
pub mod user;

pub use auth::*;
pub use comment::*;
pub use listing::*;
pub use news::*;
pub use portfolio::*;
pub use post::*;
pub use stats::*;
pub use upload::*;
pub use user::*;
