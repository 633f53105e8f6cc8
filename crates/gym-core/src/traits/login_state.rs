//! One-time OAuth login state

use async_trait::async_trait;

use super::RepoResult;

/// Store for the `state` values handed out when an OAuth login starts
///
/// A state is valid for a single callback: `consume` removes it atomically,
/// so a replayed callback finds nothing.
#[async_trait]
pub trait LoginStateStore: Send + Sync {
    /// Remember a freshly generated state
    async fn save(&self, state: &str) -> RepoResult<()>;

    /// Remove the state; returns false when it was unknown, expired or already used
    async fn consume(&self, state: &str) -> RepoResult<bool>;
}
