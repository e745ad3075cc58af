//! A process-less, I/O-agnostic WebSocket protocol engine.
//!
//! Implements the client-side pieces of [RFC 6455](https://datatracker.ietf.org/doc/html/rfc6455)
//! (handshake, frame codec, masking, fragmentation), [RFC 7692](https://datatracker.ietf.org/doc/html/rfc7692)
//! (permessage-deflate), and [RFC 8441](https://datatracker.ietf.org/doc/html/rfc8441)
//! (HTTP/2 extended CONNECT) as pure, value-in/value-out functions: there
//! is no socket, no thread, and no timer anywhere in this crate. Every
//! operation is `frame(s)/bytes + state -> frame(s)/bytes + state`; the
//! caller owns the transport and drives `encode`/`decode` from whatever
//! I/O loop it already runs.

pub mod codec;
pub mod config;
pub mod error;
pub mod extensions;
pub mod fragment;
pub mod frame;
pub mod handshake;
pub mod mask;
pub mod state;
pub mod transport;
mod utils;

pub use error::Error;
pub use frame::Frame;
pub use state::ConnectionState;
