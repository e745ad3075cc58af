use std::string::FromUtf8Error;
use thiserror::Error;

/// The closed error taxonomy for the engine.
///
/// Each variant maps to one row of the error table in the protocol
/// specification this crate implements: a kind is either fatal to the
/// connection (the caller should close the underlying transport with close
/// code `1002`, see [`Error::is_stream_fatal`]) or recoverable on a
/// per-frame / per-encode basis.
#[derive(Error, Debug)]
pub enum Error {
    // Handshake errors
    #[error("server did not upgrade the connection (status {0})")]
    ConnectionNotUpgraded(u16),

    #[error("Sec-WebSocket-Accept did not match the expected nonce")]
    InvalidNonce,

    #[error("server does not advertise SETTINGS_ENABLE_CONNECT_PROTOCOL")]
    ExtendedConnectDisabled,

    #[error("server echoed an extension `{0}` the client never offered")]
    ExtensionsMismatch(String),

    // Framing errors
    #[error("encoded payload exceeds the maximum representable frame size")]
    PayloadTooLarge,

    #[error("unsupported opcode `{0:#x}`")]
    UnsupportedOpcode(u8),

    #[error("length-prefix 127 carried a high bit set on the 64-bit length")]
    MalformedPayloadLength,

    #[error("reserved bit set that no accepted extension claims")]
    MalformedReserved,

    #[error("server-sent frame was masked")]
    UnexpectedMask,

    #[error("{source}")]
    InvalidUtf8 {
        #[from]
        source: FromUtf8Error,
    },

    #[error("invalid close frame payload: {0}")]
    InvalidClosePayload(&'static str),

    // Fragmentation errors
    #[error("continuation frame with no fragment sequence in progress")]
    UninitiatedContinuation,

    #[error("new data frame opcode while a fragment sequence is in progress")]
    OutOfOrderFragments,

    // Extension errors
    #[error("permessage-deflate max_window_bits must be between 8 and 15")]
    InvalidMaxWindowBits,

    #[error("permessage-deflate (de)compression failure: {0}")]
    CompressionError(String),
}

impl Error {
    /// Whether this error means the decode buffer's position inside the
    /// byte stream is no longer trustworthy. Only a malformed 64-bit length
    /// prefix loses the frame boundary entirely (there is no way to know
    /// how many payload bytes to skip); every other decode error is raised
    /// after the offending frame's exact byte length is already known, so
    /// [`crate::codec::Decoder::push`] can report it inline and keep
    /// parsing the rest of the buffer.
    pub fn is_stream_fatal(&self) -> bool {
        matches!(self, Error::MalformedPayloadLength)
    }
}
