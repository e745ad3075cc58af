//! The handshake's key/nonce recipe (RFC 6455 §1.3), grounded verbatim on
//! the teacher's `utils.rs`.

use base64::prelude::BASE64_STANDARD;
use base64::Engine;
use rand::TryRngCore;
use sha1::{Digest, Sha1};

const WEBSOCKET_GUID: &str = "258EAFA5-E914-47DA-95CA-C5AB0DC85B11";

/// `base64(sha1(key ++ GUID))`.
pub fn compute_accept(key: &str) -> String {
    let mut hasher = Sha1::new();
    hasher.update(key.as_bytes());
    hasher.update(WEBSOCKET_GUID.as_bytes());
    BASE64_STANDARD.encode(hasher.finalize())
}

/// Sixteen cryptographically random bytes, base64-encoded, per
/// `sec-websocket-key`.
pub fn generate_websocket_key() -> String {
    let mut bytes = [0u8; 16];
    rand::rngs::OsRng.try_fill_bytes(&mut bytes).unwrap();
    BASE64_STANDARD.encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_rfc6455_example() {
        assert_eq!(
            compute_accept("dGhlIHNhbXBsZSBub25jZQ=="),
            "s3pPLMBiTxaQ9kYGzzhZRbK+xOo="
        );
    }

    #[test]
    fn generated_keys_are_sixteen_bytes_base64() {
        let key = generate_websocket_key();
        let decoded = BASE64_STANDARD.decode(key).unwrap();
        assert_eq!(decoded.len(), 16);
    }
}
