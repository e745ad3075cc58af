//! Caller-facing knobs: frame/message size ceilings and whether to offer
//! permessage-deflate. Grounded on the teacher's `config.rs`
//! `WebSocketConfig`, stripped of the `rustls`/TLS fields (transport
//! ownership is out of scope for this engine) and extended with
//! `ExtensionConfig`, grounded on `extensions.rs`'s `Extensions` struct
//! fields.

use crate::extensions::DeflateParams;

/// Size ceilings the caller enforces around this engine's pure `encode`/
/// `decode` calls. The engine itself does not reject oversized input
/// directly (a closed error taxonomy, per the framing spec, leaves DoS
/// guards to the transport layer); these defaults mirror the teacher's so
/// callers inherit the same sane starting point.
#[derive(Debug, Clone, Copy)]
pub struct WebSocketConfig {
    pub max_frame_size: Option<usize>,
    pub max_message_size: Option<usize>,
}

impl Default for WebSocketConfig {
    fn default() -> Self {
        WebSocketConfig {
            max_frame_size: Some(16 << 20),
            max_message_size: Some(64 << 20),
        }
    }
}

/// Whether to offer `permessage-deflate` during the handshake, and with
/// which parameters.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExtensionConfig {
    pub offer_deflate: Option<DeflateParams>,
}
