//! Client side of the ByteAndBlog API.
//!
//! [`ApiClient`] wraps every REST endpoint, [`SessionManager`] owns the
//! bearer token and the signed-in [`User`], and [`images`] rewrites backend
//! image URLs so they are served through the image proxy.

pub mod client;
pub mod error;
pub mod images;
pub mod session;
pub mod store;

pub use client::{ApiClient, FileUpload};
pub use error::{ClientError, Result};
pub use images::{PROXY_ROUTE, profile_image_url, proxied_image_url};
pub use session::{Claims, Session, SessionError, SessionManager, User, decode_claims};
pub use store::{FileTokenStore, MemoryTokenStore, StoreError, TokenStore};
