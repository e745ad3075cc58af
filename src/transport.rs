//! The external HTTP client contract this engine consumes but never
//! implements or calls directly. Out of scope per the engine's framing:
//! I/O scheduling and transport ownership belong to the caller.
//!
//! There is no teacher grounding for a trait shaped like this — the
//! teacher owns its `TcpStream` directly — so this is written fresh
//! against the contract the engine's design actually needs: enough for
//! the handshake to branch on protocol and read the one HTTP/2 setting it
//! cares about.

use crate::handshake::SettingName;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpVersion {
    Http1,
    Http2,
}

/// Implemented by the caller's HTTP client. The engine only ever reads
/// from it during the handshake; `send_request`, `stream_request_body`,
/// `receive`, and `get_socket` are the caller's own responsibility for
/// driving the underlying connection and are deliberately not modeled
/// here — the engine never calls them, it only produces and consumes the
/// bytes they carry.
pub trait HttpClient {
    fn protocol(&self) -> HttpVersion;
    fn get_server_setting(&self, name: SettingName) -> Option<u32>;
}
