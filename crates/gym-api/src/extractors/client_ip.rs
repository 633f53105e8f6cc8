//! Client address extractor
//!
//! The first entry of `X-Forwarded-For` wins; without it the raw peer
//! address from `ConnectInfo` is used.

use std::convert::Infallible;
use std::net::SocketAddr;

use axum::{
    async_trait,
    extract::{ConnectInfo, FromRequestParts},
    http::{request::Parts, HeaderMap},
};

/// Header set by the reverse proxy in front of the server
pub const FORWARDED_FOR_HEADER: &str = "x-forwarded-for";

/// Reported when neither the header nor the peer address is available
const UNKNOWN_ADDRESS: &str = "unknown";

/// Client address as seen by the location policy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientIp(pub String);

/// Derive the client address from the forwarded header or the peer
pub fn client_address(headers: &HeaderMap, peer: Option<SocketAddr>) -> String {
    let forwarded = headers
        .get(FORWARDED_FOR_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty());

    match (forwarded, peer) {
        (Some(addr), _) => addr.to_string(),
        (None, Some(peer)) => peer.ip().to_canonical().to_string(),
        (None, None) => UNKNOWN_ADDRESS.to_string(),
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for ClientIp
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let peer = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| *addr);

        Ok(ClientIp(client_address(&parts.headers, peer)))
    }
}
