use axum::extract::{ConnectInfo, FromRequestParts};
use axum::http::request::Parts;
use std::convert::Infallible;
use std::fmt;
use std::net::SocketAddr;

/// Axum extractor for the remote address of the caller
///
/// Reads the `ConnectInfo<SocketAddr>` the server attaches when it is
/// started with `into_make_service_with_connect_info`. Without it the
/// address is simply unknown; the request is never rejected.
///
/// # Example
/// ```
/// use product_api::extract::ClientAddr;
///
/// async fn handler(client: ClientAddr) -> String {
///     format!("hello {}", client)
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientAddr(pub Option<SocketAddr>);

impl<S> FromRequestParts<S> for ClientAddr
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let addr = ConnectInfo::<SocketAddr>::from_request_parts(parts, state)
            .await
            .ok()
            .map(|ConnectInfo(addr)| addr);
        Ok(ClientAddr(addr))
    }
}

impl fmt::Display for ClientAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(addr) => write!(f, "{}", addr),
            None => f.write_str("unknown"),
        }
    }
}
