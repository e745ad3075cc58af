//! HTTP/1.1 upgrade handshake (RFC 6455 §4.1/§4.2).
//!
//! Grounded on the teacher's `request.rs` `construct_http_request` for the
//! header set, and `utils.rs` for the key/accept-nonce recipe.

use crate::error::Error;
use crate::extensions::DeflateParams;
use crate::handshake::{HandshakeContext, HeaderMap};
use crate::utils::{compute_accept, generate_websocket_key};

pub(super) fn build(
    path: &str,
    mut extra_headers: HeaderMap,
    offer_deflate: Option<DeflateParams>,
) -> (HeaderMap, HandshakeContext) {
    let key = generate_websocket_key();

    extra_headers.insert(":path".to_string(), path.to_string());
    extra_headers.insert("upgrade".to_string(), "websocket".to_string());
    extra_headers.insert("connection".to_string(), "upgrade".to_string());
    extra_headers.insert("sec-websocket-version".to_string(), "13".to_string());
    extra_headers.insert("sec-websocket-key".to_string(), key.clone());
    if let Some(params) = offer_deflate {
        extra_headers.insert(
            "sec-websocket-extensions".to_string(),
            params.to_offer_string(),
        );
    }

    let ctx = HandshakeContext {
        key: Some(key),
        offered_deflate: offer_deflate,
    };
    (extra_headers, ctx)
}

pub(super) fn finalize(
    ctx: &HandshakeContext,
    status: u16,
    response_headers: &HeaderMap,
) -> Result<(), Error> {
    if status != 101 {
        return Err(Error::ConnectionNotUpgraded(status));
    }

    let key = ctx.key.as_deref().expect("http1 handshake always carries a key");
    let expected = compute_accept(key);
    let actual = response_headers
        .get("sec-websocket-accept")
        .ok_or(Error::InvalidNonce)?;
    if actual != &expected {
        return Err(Error::InvalidNonce);
    }
    Ok(())
}
