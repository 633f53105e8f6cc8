//! Route handlers
//!
//! All HTTP request handlers organized by area.

pub mod admin;
pub mod attendance;
pub mod auth;
pub mod health;
pub mod records;
