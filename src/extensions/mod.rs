//! Extension pipeline (component D): an ordered list of capability sets
//! invoked on every encode and decode of a data frame.
//!
//! Grounded on the teacher's `extensions.rs` for the negotiation-parameter
//! parsing/serialization (`Extensions` struct, `parse_extensions`), adapted
//! from a raw request-string builder to a capability trait the handshake
//! module instantiates per accepted extension.

pub mod deflate;

use crate::error::Error;
use crate::frame::RawFrame;

/// One negotiated extension's encode/decode capability, plus its private
/// per-connection state (RFC 6455 §9 / RFC 7692).
pub trait Extension: Send + std::fmt::Debug {
    fn name(&self) -> &str;
    /// The RSV bit(s) this extension claims on frames it touches.
    fn rsv_bits(&self) -> u8;
    /// Transforms an outbound data frame before it reaches the codec. Only
    /// ever sees complete (`fin == true`) frames: this engine does not
    /// auto-fragment outbound messages.
    fn encode(&mut self, frame: RawFrame) -> Result<RawFrame, Error>;
    /// Transforms a reassembled inbound data frame before it is lifted to
    /// the public [`crate::frame::Frame`] type.
    fn decode(&mut self, frame: RawFrame) -> Result<RawFrame, Error>;
}

pub const PERMESSAGE_DEFLATE: &str = "permessage-deflate";
const CLIENT_NO_CONTEXT_TAKEOVER: &str = "client_no_context_takeover";
const SERVER_NO_CONTEXT_TAKEOVER: &str = "server_no_context_takeover";
const CLIENT_MAX_WINDOW_BITS: &str = "client_max_window_bits";
const SERVER_MAX_WINDOW_BITS: &str = "server_max_window_bits";

/// The four permessage-deflate negotiation parameters (RFC 7692 §7.1).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeflateParams {
    pub client_no_context_takeover: bool,
    pub server_no_context_takeover: bool,
    pub client_max_window_bits: Option<u8>,
    pub server_max_window_bits: Option<u8>,
}

impl DeflateParams {
    /// Renders this offer as one `sec-websocket-extensions` list entry
    /// (name plus `; key=value` parameters; a bare flag encodes as `key`).
    pub fn to_offer_string(self) -> String {
        let mut offer = String::from(PERMESSAGE_DEFLATE);
        if self.client_no_context_takeover {
            offer.push_str("; ");
            offer.push_str(CLIENT_NO_CONTEXT_TAKEOVER);
        }
        if self.server_no_context_takeover {
            offer.push_str("; ");
            offer.push_str(SERVER_NO_CONTEXT_TAKEOVER);
        }
        if let Some(bits) = self.client_max_window_bits {
            offer.push_str(&format!("; {CLIENT_MAX_WINDOW_BITS}={bits}"));
        }
        if let Some(bits) = self.server_max_window_bits {
            offer.push_str(&format!("; {SERVER_MAX_WINDOW_BITS}={bits}"));
        }
        offer
    }
}

/// Parses one `sec-websocket-extensions` list entry (already split on the
/// top-level comma by the caller) into its parameter set. Returns `None`
/// if the entry does not name `permessage-deflate`. Fails with
/// [`Error::InvalidMaxWindowBits`] if either `max_window_bits` parameter
/// carries a value outside RFC 7692's 8..=15 range.
pub fn parse_deflate_params(entry: &str) -> Result<Option<DeflateParams>, Error> {
    let mut parts = entry.split(';');
    let Some(name) = parts.next() else {
        return Ok(None);
    };
    if name.trim() != PERMESSAGE_DEFLATE {
        return Ok(None);
    }

    let mut params = DeflateParams::default();
    for part in parts {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        if part == CLIENT_NO_CONTEXT_TAKEOVER {
            params.client_no_context_takeover = true;
        } else if part == SERVER_NO_CONTEXT_TAKEOVER {
            params.server_no_context_takeover = true;
        } else if let Some(rest) = part.strip_prefix(CLIENT_MAX_WINDOW_BITS) {
            params.client_max_window_bits = parse_window_bits(rest)?;
        } else if let Some(rest) = part.strip_prefix(SERVER_MAX_WINDOW_BITS) {
            params.server_max_window_bits = parse_window_bits(rest)?;
        }
    }
    Ok(Some(params))
}

/// Parses one `max_window_bits` parameter's `=value` tail (or the bare flag,
/// which RFC 7692 §7.1.2.2 defaults to 15). A value outside 8..=15 fails the
/// negotiation outright rather than being silently clamped or ignored;
/// unparsable syntax is treated as the parameter not having been sent.
fn parse_window_bits(rest: &str) -> Result<Option<u8>, Error> {
    let rest = rest.trim();
    if rest.is_empty() {
        return Ok(Some(15));
    }
    let Some(value) = rest
        .strip_prefix('=')
        .and_then(|v| v.trim().trim_matches('"').parse::<u8>().ok())
    else {
        return Ok(None);
    };
    if !(8..=15).contains(&value) {
        return Err(Error::InvalidMaxWindowBits);
    }
    Ok(Some(value))
}
