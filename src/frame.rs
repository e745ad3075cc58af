//! The public [`Frame`] sum type and the internal [`RawFrame`] wire
//! representation, plus the `lift`/`lower` translation between them
//! (RFC 6455 §5.2, §5.5, §5.6, §7.4).

use crate::error::Error;

/// RSV1, the only reserved bit this engine's built-in extension claims.
pub const RSV1: u8 = 0b100;
/// RSV2, reserved for future extensions; always rejected when unclaimed.
pub const RSV2: u8 = 0b010;
/// RSV3, reserved for future extensions; always rejected when unclaimed.
pub const RSV3: u8 = 0b001;

/// Close codes the protocol forbids a well-formed Close frame from ever
/// carrying on the wire (RFC 6455 §7.4.1/§7.4.2): codes reserved for
/// local use by an implementation, or never meant to appear on the wire.
const FORBIDDEN_CLOSE_CODES: [u16; 7] = [1004, 1005, 1006, 1016, 1100, 2000, 2999];

/// A 4-bit opcode, exhaustively covering every value RFC 6455 defines plus
/// the reserved ranges, named rather than folded into a single catch-all
/// "unsupported" bucket so decode errors can report the offending value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawOpcode {
    Continuation,
    Text,
    Binary,
    Close,
    Ping,
    Pong,
    /// 0x3-0x7 and 0xB-0xF: reserved for future non-control/control
    /// extensions. Always a decode error today (`UnsupportedOpcode`).
    Reserved(u8),
}

impl RawOpcode {
    pub fn from_u8(byte: u8) -> Self {
        match byte {
            0x0 => RawOpcode::Continuation,
            0x1 => RawOpcode::Text,
            0x2 => RawOpcode::Binary,
            0x8 => RawOpcode::Close,
            0x9 => RawOpcode::Ping,
            0xA => RawOpcode::Pong,
            other => RawOpcode::Reserved(other),
        }
    }

    pub fn as_u8(self) -> u8 {
        match self {
            RawOpcode::Continuation => 0x0,
            RawOpcode::Text => 0x1,
            RawOpcode::Binary => 0x2,
            RawOpcode::Close => 0x8,
            RawOpcode::Ping => 0x9,
            RawOpcode::Pong => 0xA,
            RawOpcode::Reserved(byte) => byte,
        }
    }

    pub fn is_control(self) -> bool {
        matches!(self, RawOpcode::Close | RawOpcode::Ping | RawOpcode::Pong)
    }
}

/// The on-wire frame shape: everything a decoded or to-be-encoded frame
/// needs before translation to/from the public [`Frame`] type.
#[derive(Debug, Clone)]
pub struct RawFrame {
    pub fin: bool,
    /// Three reserved bits, packed as `RSV1 | RSV2 | RSV3` in the low
    /// three bits (see [`RSV1`]/[`RSV2`]/[`RSV3`]).
    pub rsv: u8,
    pub opcode: RawOpcode,
    /// `Some` on decode (before unmasking is applied) is never produced by
    /// this client-role engine; present for symmetry with the wire format
    /// and to let the codec reject it per invariant I2.
    pub mask: Option<[u8; 4]>,
    pub payload: Vec<u8>,
}

/// The frame kinds a caller sends and receives.
#[derive(Debug, Clone, PartialEq)]
pub enum Frame {
    Text(String),
    Binary(Vec<u8>),
    Ping(Vec<u8>),
    Pong(Vec<u8>),
    Close(Option<u16>, Option<String>),
}

impl Frame {
    pub fn opcode(&self) -> RawOpcode {
        match self {
            Frame::Text(_) => RawOpcode::Text,
            Frame::Binary(_) => RawOpcode::Binary,
            Frame::Ping(_) => RawOpcode::Ping,
            Frame::Pong(_) => RawOpcode::Pong,
            Frame::Close(_, _) => RawOpcode::Close,
        }
    }
}

fn validate_close_code(code: u16) -> Result<(), Error> {
    if !(1000..=4999).contains(&code) || FORBIDDEN_CLOSE_CODES.contains(&code) {
        return Err(Error::InvalidClosePayload("close code out of range"));
    }
    Ok(())
}

/// Translates a fully reassembled, extension-processed [`RawFrame`] into
/// the public [`Frame`] type.
///
/// `raw` is assumed complete (`fin == true`): the fragment assembler and
/// extension pipeline have already run, so this only performs per-variant
/// payload validation.
pub fn lift(raw: RawFrame) -> Result<Frame, Error> {
    match raw.opcode {
        RawOpcode::Text => Ok(Frame::Text(String::from_utf8(raw.payload)?)),
        RawOpcode::Binary => Ok(Frame::Binary(raw.payload)),
        RawOpcode::Ping => Ok(Frame::Ping(raw.payload)),
        RawOpcode::Pong => Ok(Frame::Pong(raw.payload)),
        RawOpcode::Close => lift_close(raw.payload),
        RawOpcode::Continuation => Err(Error::UninitiatedContinuation),
        RawOpcode::Reserved(byte) => Err(Error::UnsupportedOpcode(byte)),
    }
}

fn lift_close(payload: Vec<u8>) -> Result<Frame, Error> {
    match payload.len() {
        0 => Ok(Frame::Close(Some(1000), Some(String::new()))),
        1 => Err(Error::InvalidClosePayload(
            "a 1-byte close payload is never valid",
        )),
        2 => {
            let code = u16::from_be_bytes([payload[0], payload[1]]);
            validate_close_code(code)?;
            Ok(Frame::Close(Some(code), Some(String::new())))
        }
        len => {
            if len - 2 > 123 {
                return Err(Error::InvalidClosePayload("reason exceeds 123 bytes"));
            }
            let code = u16::from_be_bytes([payload[0], payload[1]]);
            validate_close_code(code)?;
            let reason = String::from_utf8(payload[2..].to_vec())
                .map_err(|_| Error::InvalidClosePayload("reason is not valid UTF-8"))?;
            Ok(Frame::Close(Some(code), Some(reason)))
        }
    }
}

/// Translates a caller [`Frame`] into a [`RawFrame`] ready for the
/// extension pipeline and the codec. Always total: there is no lowering
/// failure, validation (payload size, etc.) happens at encode time.
pub fn lower(frame: Frame) -> RawFrame {
    let opcode = frame.opcode();
    let payload = match frame {
        Frame::Text(text) => text.into_bytes(),
        Frame::Binary(bytes) => bytes,
        Frame::Ping(bytes) => bytes,
        Frame::Pong(bytes) => bytes,
        Frame::Close(None, None) => Vec::new(),
        Frame::Close(code, reason) => {
            let mut payload = Vec::new();
            if let Some(code) = code {
                payload.extend_from_slice(&code.to_be_bytes());
                if let Some(reason) = reason {
                    payload.extend_from_slice(reason.as_bytes());
                }
            }
            payload
        }
    };
    RawFrame {
        fin: true,
        rsv: 0,
        opcode,
        mask: None,
        payload,
    }
}
