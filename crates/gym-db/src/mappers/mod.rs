//! Entity to model mappers
//!
//! This module provides conversions between domain entities (gym-core) and database models.
//! - `From<Model> for Entity`: Convert database rows to domain objects
//! - `*Insert`/`*Update` structs: Prepare entity data for database operations

mod attendance;
mod member;

pub use attendance::records_from_models;
pub use member::{MemberInsert, MemberUpdate};
