//! Session storage module.
//!
//! Provides Redis-backed storage for OAuth login state between the redirect
//! to the identity provider and its callback.

mod oauth_state;

pub use oauth_state::{OAuthStateStore, PendingLogin};
