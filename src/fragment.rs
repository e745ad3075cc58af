//! Combines continuation fragments into a complete data frame and passes
//! control frames through unchanged (component C).
//!
//! Grounded on the teacher's `read.rs` `FragmentedMessage`/`poll_messages`
//! match arms, stripped of the `mpsc::Sender` and socket ownership: instead
//! of transmitting a completed message down a channel, `feed` simply
//! returns it.

use crate::error::Error;
use crate::frame::{RawFrame, RawOpcode};

struct Pending {
    opcode: RawOpcode,
    rsv: u8,
    payload: Vec<u8>,
}

/// Holds the pending-fragments state (invariant I5: non-empty only while a
/// Text/Binary frame with `fin=false` awaits its terminal continuation).
#[derive(Default)]
pub struct FragmentAssembler {
    pending: Option<Pending>,
}

impl FragmentAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_mid_sequence(&self) -> bool {
        self.pending.is_some()
    }

    /// Feeds one decoded [`RawFrame`] in. Returns `Some(frame)` when a
    /// complete frame is ready to move on to the extension pipeline
    /// (either a pass-through control frame or a fully reassembled data
    /// message); `None` while a fragment sequence is still in progress.
    pub fn feed(&mut self, raw: RawFrame) -> Result<Option<RawFrame>, Error> {
        // Control frames bypass the assembler entirely and may legally
        // interleave with an in-progress fragment sequence (invariant I6).
        if raw.opcode.is_control() {
            return Ok(Some(raw));
        }

        match (raw.opcode, raw.fin, self.pending.is_some()) {
            (RawOpcode::Continuation, _, false) => Err(Error::UninitiatedContinuation),
            (RawOpcode::Continuation, false, true) => {
                let pending = self.pending.as_mut().expect("checked above");
                pending.payload.extend_from_slice(&raw.payload);
                Ok(None)
            }
            (RawOpcode::Continuation, true, true) => {
                let mut pending = self.pending.take().expect("checked above");
                pending.payload.extend_from_slice(&raw.payload);
                log::trace!(
                    "fragment sequence complete, {} bytes reassembled",
                    pending.payload.len()
                );
                Ok(Some(RawFrame {
                    fin: true,
                    rsv: pending.rsv,
                    opcode: pending.opcode,
                    mask: None,
                    payload: pending.payload,
                }))
            }
            (RawOpcode::Text | RawOpcode::Binary, false, false) => {
                log::trace!("starting fragment sequence opcode={:?}", raw.opcode);
                self.pending = Some(Pending {
                    opcode: raw.opcode,
                    rsv: raw.rsv,
                    payload: raw.payload,
                });
                Ok(None)
            }
            (RawOpcode::Text | RawOpcode::Binary, true, false) => Ok(Some(raw)),
            // A new data opcode (fragment-starting or complete) while a
            // sequence is already in progress.
            (RawOpcode::Text | RawOpcode::Binary, _, true) => Err(Error::OutOfOrderFragments),
            (RawOpcode::Reserved(byte), _, _) => Err(Error::UnsupportedOpcode(byte)),
            (RawOpcode::Close | RawOpcode::Ping | RawOpcode::Pong, _, _) => {
                unreachable!("control opcodes handled above")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data(opcode: RawOpcode, fin: bool, payload: &[u8]) -> RawFrame {
        RawFrame {
            fin,
            rsv: 0,
            opcode,
            mask: None,
            payload: payload.to_vec(),
        }
    }

    #[test]
    fn complete_data_frame_passes_straight_through() {
        let mut assembler = FragmentAssembler::new();
        let frame = data(RawOpcode::Text, true, b"hi");
        let out = assembler.feed(frame).unwrap().unwrap();
        assert_eq!(out.payload, b"hi");
    }

    #[test]
    fn fragmented_hello_world_reassembles() {
        let mut assembler = FragmentAssembler::new();
        let first = data(RawOpcode::Text, false, b"hello");
        assert!(assembler.feed(first).unwrap().is_none());
        assert!(assembler.is_mid_sequence());

        let second = data(RawOpcode::Continuation, true, b" world");
        let out = assembler.feed(second).unwrap().unwrap();
        assert_eq!(out.payload, b"hello world");
        assert_eq!(out.opcode, RawOpcode::Text);
        assert!(!assembler.is_mid_sequence());
    }

    #[test]
    fn ping_interleaves_with_fragment_sequence() {
        let mut assembler = FragmentAssembler::new();
        assembler
            .feed(data(RawOpcode::Text, false, b"hello"))
            .unwrap();

        let ping = data(RawOpcode::Ping, true, b"ping");
        let out = assembler.feed(ping).unwrap().unwrap();
        assert_eq!(out.opcode, RawOpcode::Ping);
        assert!(assembler.is_mid_sequence());

        let out = assembler
            .feed(data(RawOpcode::Continuation, true, b" world"))
            .unwrap()
            .unwrap();
        assert_eq!(out.payload, b"hello world");
    }

    #[test]
    fn continuation_without_pending_is_an_error() {
        let mut assembler = FragmentAssembler::new();
        assert!(matches!(
            assembler.feed(data(RawOpcode::Continuation, true, b"x")),
            Err(Error::UninitiatedContinuation)
        ));
    }

    #[test]
    fn new_data_opcode_mid_sequence_is_an_error() {
        let mut assembler = FragmentAssembler::new();
        assembler
            .feed(data(RawOpcode::Text, false, b"hello"))
            .unwrap();
        assert!(matches!(
            assembler.feed(data(RawOpcode::Binary, true, b"oops")),
            Err(Error::OutOfOrderFragments)
        ));
    }
}
