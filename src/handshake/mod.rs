//! Handshake (component E): builds the outbound upgrade request headers
//! and validates the server's response, for both HTTP/1.1 upgrade
//! (RFC 6455 §4) and HTTP/2 extended CONNECT (RFC 8441).
//!
//! Grounded on the teacher's `request.rs` (`construct_http_request`), with
//! the URL parsing and TCP-host plumbing stripped: this engine no longer
//! owns the transport, so `build_handshake` produces a header map instead
//! of a raw request string, and the caller is responsible for the HTTP
//! client that actually sends it (see [`crate::transport`]).

pub mod http1;
pub mod http2;

use std::collections::HashMap;

use crate::config::ExtensionConfig;
use crate::error::Error;
use crate::extensions::deflate::PermessageDeflate;
use crate::extensions::{parse_deflate_params, Extension, DeflateParams, PERMESSAGE_DEFLATE};
use crate::fragment::FragmentAssembler;
use crate::state::ConnectionState;

/// A lower-cased header name to value map. The engine never needs
/// multi-valued headers, so this is a plain map rather than a full HTTP
/// header type.
pub type HeaderMap = HashMap<String, String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpProtocol {
    Http1,
    Http2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheme {
    Ws,
    Wss,
}

/// Server settings the engine needs to read before it may proceed
/// (currently only the RFC 8441 pre-check).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingName {
    /// HTTP/2 SETTINGS id `0x8`.
    EnableConnectProtocol,
}

/// What the client remembers between sending the handshake request and
/// validating the response: the nonce (HTTP/1.1 only) and what it offered,
/// so the response can be checked against it rather than trusted blindly.
pub struct HandshakeContext {
    key: Option<String>,
    offered_deflate: Option<DeflateParams>,
}

/// Builds the outbound handshake headers for `protocol`/`scheme`/`path`,
/// merging in `extra_headers` the caller wants sent (e.g. `Host`,
/// `Origin`), and offering permessage-deflate per `extensions` if the
/// caller wants to request it.
pub fn build_handshake(
    protocol: HttpProtocol,
    scheme: Scheme,
    path: &str,
    extra_headers: HeaderMap,
    extensions: &ExtensionConfig,
) -> (HeaderMap, HandshakeContext) {
    let offer_deflate = extensions.offer_deflate;
    match protocol {
        HttpProtocol::Http1 => http1::build(path, extra_headers, offer_deflate),
        HttpProtocol::Http2 => http2::build(scheme, path, extra_headers, offer_deflate),
    }
}

/// Validates the server's response against `ctx` and produces a fresh
/// [`ConnectionState`] seeded with the negotiated extensions.
pub fn finalize_handshake(
    ctx: HandshakeContext,
    protocol: HttpProtocol,
    status: u16,
    response_headers: &HeaderMap,
) -> Result<ConnectionState, Error> {
    match protocol {
        HttpProtocol::Http1 => http1::finalize(&ctx, status, response_headers),
        HttpProtocol::Http2 => http2::finalize(&ctx, status, response_headers),
    }?;

    let extensions = negotiate_extensions(ctx.offered_deflate, response_headers)?;
    Ok(ConnectionState::new(extensions, FragmentAssembler::new()))
}

/// Parses `sec-websocket-extensions` from the response and instantiates
/// the accepted extensions in the order the server listed them. Fails with
/// [`Error::ExtensionsMismatch`] if the server echoes an extension the
/// client never offered.
fn negotiate_extensions(
    offered_deflate: Option<DeflateParams>,
    response_headers: &HeaderMap,
) -> Result<Vec<Box<dyn Extension>>, Error> {
    let Some(raw) = response_headers.get("sec-websocket-extensions") else {
        return Ok(Vec::new());
    };

    let mut accepted: Vec<Box<dyn Extension>> = Vec::new();
    for entry in raw.split(',') {
        let entry = entry.trim();
        if entry.is_empty() {
            continue;
        }
        match parse_deflate_params(entry)? {
            Some(params) => {
                if offered_deflate.is_none() {
                    return Err(Error::ExtensionsMismatch(PERMESSAGE_DEFLATE.to_string()));
                }
                accepted.push(Box::new(PermessageDeflate::new(params)));
            }
            None => {
                let name = entry.split(';').next().unwrap_or(entry).trim();
                return Err(Error::ExtensionsMismatch(name.to_string()));
            }
        }
    }
    Ok(accepted)
}
