//! Session authentication

mod session;

pub use session::{SessionClaims, SessionService};
