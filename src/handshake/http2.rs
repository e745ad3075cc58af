//! HTTP/2 extended CONNECT handshake (RFC 8441).
//!
//! No nonce is exchanged over HTTP/2 — the pseudo-headers and the
//! `SETTINGS_ENABLE_CONNECT_PROTOCOL` pre-check replace the HTTP/1.1
//! upgrade dance. There is no teacher grounding for this module: the
//! teacher is HTTP/1.1-only, so the pseudo-header set and the settings
//! pre-check are built directly from RFC 8441 §4, kept in the same
//! `HeaderMap`-based shape `http1.rs` uses for symmetry.

use crate::error::Error;
use crate::extensions::DeflateParams;
use crate::handshake::{HandshakeContext, HeaderMap, Scheme, SettingName};

/// HTTP/2 SETTINGS id for `SETTINGS_ENABLE_CONNECT_PROTOCOL` (RFC 8441 §3).
const ENABLE_CONNECT_PROTOCOL_SETTING_ID: u32 = 0x8;

/// Must be checked against the server's SETTINGS frame before issuing the
/// CONNECT request at all; a caller violating this ordering is a bug in
/// the caller, not something this engine can detect after the fact.
pub fn check_extended_connect_enabled(setting_value: Option<u32>) -> Result<(), Error> {
    match setting_value {
        Some(1) => Ok(()),
        _ => Err(Error::ExtendedConnectDisabled),
    }
}

pub fn setting_id(name: SettingName) -> u32 {
    match name {
        SettingName::EnableConnectProtocol => ENABLE_CONNECT_PROTOCOL_SETTING_ID,
    }
}

pub(super) fn build(
    scheme: Scheme,
    path: &str,
    mut extra_headers: HeaderMap,
    offer_deflate: Option<DeflateParams>,
) -> (HeaderMap, HandshakeContext) {
    let scheme_str = match scheme {
        Scheme::Ws => "http",
        Scheme::Wss => "https",
    };
    extra_headers.insert(":method".to_string(), "CONNECT".to_string());
    extra_headers.insert(":scheme".to_string(), scheme_str.to_string());
    extra_headers.insert(":path".to_string(), path.to_string());
    extra_headers.insert(":protocol".to_string(), "websocket".to_string());
    extra_headers.insert("sec-websocket-version".to_string(), "13".to_string());
    if let Some(params) = offer_deflate {
        extra_headers.insert(
            "sec-websocket-extensions".to_string(),
            params.to_offer_string(),
        );
    }

    let ctx = HandshakeContext {
        key: None,
        offered_deflate: offer_deflate,
    };
    (extra_headers, ctx)
}

pub(super) fn finalize(
    _ctx: &HandshakeContext,
    status: u16,
    _response_headers: &HeaderMap,
) -> Result<(), Error> {
    if !(200..=299).contains(&status) {
        return Err(Error::ConnectionNotUpgraded(status));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pre_check_rejects_when_setting_absent() {
        assert!(matches!(
            check_extended_connect_enabled(None),
            Err(Error::ExtendedConnectDisabled)
        ));
    }

    #[test]
    fn pre_check_rejects_when_setting_is_zero() {
        assert!(matches!(
            check_extended_connect_enabled(Some(0)),
            Err(Error::ExtendedConnectDisabled)
        ));
    }

    #[test]
    fn pre_check_accepts_when_enabled() {
        assert!(check_extended_connect_enabled(Some(1)).is_ok());
    }

    #[test]
    fn build_sets_pseudo_headers_and_no_key() {
        let (headers, ctx) = build(Scheme::Wss, "/chat", HeaderMap::new(), None);
        assert_eq!(headers.get(":scheme").unwrap(), "https");
        assert_eq!(headers.get(":protocol").unwrap(), "websocket");
        assert!(ctx.key.is_none());
    }

    #[test]
    fn finalize_accepts_2xx_status() {
        let (_, ctx) = build(Scheme::Ws, "/", HeaderMap::new(), None);
        assert!(finalize(&ctx, 200, &HeaderMap::new()).is_ok());
    }

    #[test]
    fn finalize_rejects_non_2xx_status() {
        let (_, ctx) = build(Scheme::Ws, "/", HeaderMap::new(), None);
        assert!(matches!(
            finalize(&ctx, 404, &HeaderMap::new()),
            Err(Error::ConnectionNotUpgraded(404))
        ));
    }
}
