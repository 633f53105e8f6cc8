//! Axum extractors for request handling
//!
//! Custom extractors for the session, the client address, path ids and
//! validated input.

mod auth;
mod client_ip;
mod path;
mod validated;

pub use auth::{AuthUser, OptionalAuthUser};
pub use client_ip::{client_address, ClientIp};
pub use path::MemberIdPath;
pub use validated::{ValidatedJson, ValidatedQuery};
