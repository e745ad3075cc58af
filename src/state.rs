//! The connection's single-owner state (spec data model) and the two
//! top-level operations, `encode`/`decode`, that thread it through the
//! pipeline: caller frame → Extension Pipeline → Frame Codec (encode),
//! and bytes → Frame Codec → Fragment Assembler → Extension Pipeline →
//! caller frames (decode).

use crate::codec::{encode_raw_frame, Decoder};
use crate::error::Error;
use crate::extensions::Extension;
use crate::fragment::FragmentAssembler;
use crate::frame::{lift, lower, Frame};
use crate::mask::generate_mask;

/// Everything a connection needs carried between calls: the accepted
/// extensions (in server-accepted order, applied forward on both encode
/// and decode since permessage-deflate is self-symmetric), the pending
/// fragment sequence, and the decoder's unparsed tail bytes.
///
/// Every operation takes `&mut self` rather than consuming and returning a
/// new value: `ConnectionState` has no `Clone` and there is never a second
/// live handle to the same one, so in-place mutation is the zero-cost
/// rendering of "moved through the pipeline" and needlessly cloning the
/// extension list on every call would only add allocations.
pub struct ConnectionState {
    extensions: Vec<Box<dyn Extension>>,
    assembler: FragmentAssembler,
    decoder: Decoder,
}

impl ConnectionState {
    pub fn new(extensions: Vec<Box<dyn Extension>>, assembler: FragmentAssembler) -> Self {
        Self {
            extensions,
            assembler,
            decoder: Decoder::new(),
        }
    }

    /// Encodes one caller [`Frame`] to on-wire bytes: extension pipeline,
    /// then masking, then the codec. Always single-frame — this engine
    /// never auto-fragments outbound messages.
    pub fn encode(&mut self, frame: Frame) -> Result<Vec<u8>, Error> {
        let mut raw = lower(frame);
        for extension in self.extensions.iter_mut() {
            raw = extension.encode(raw)?;
        }
        raw.mask = Some(generate_mask());
        encode_raw_frame(&raw)
    }

    /// Feeds newly-received bytes in and returns every complete [`Frame`]
    /// (or per-frame error) the new bytes produced. An `Err` return means
    /// the decode buffer's stream position was lost; see
    /// [`Error::is_stream_fatal`].
    pub fn decode(&mut self, bytes: &[u8]) -> Result<Vec<Result<Frame, Error>>, Error> {
        let raw_frames = self.decoder.push(bytes)?;

        let mut out = Vec::with_capacity(raw_frames.len());
        for raw in raw_frames {
            let raw = match raw {
                Ok(raw) => raw,
                Err(error) => {
                    out.push(Err(error));
                    continue;
                }
            };
            let Some(mut complete) = (match self.assembler.feed(raw) {
                Ok(complete) => complete,
                Err(error) => {
                    out.push(Err(error));
                    continue;
                }
            }) else {
                continue;
            };
            let mut failed = false;
            for extension in self.extensions.iter_mut() {
                match extension.decode(complete.clone()) {
                    Ok(next) => complete = next,
                    Err(error) => {
                        out.push(Err(error));
                        failed = true;
                        break;
                    }
                }
            }
            if failed {
                continue;
            }
            // Every accepted extension clears its own RSV bit(s) as it
            // consumes them (invariant I4); whatever is still set here was
            // never claimed by anything in the pipeline.
            let claimed = self
                .extensions
                .iter()
                .fold(0u8, |acc, extension| acc | extension.rsv_bits());
            if complete.rsv & !claimed != 0 {
                out.push(Err(Error::MalformedReserved));
                continue;
            }
            out.push(lift(complete));
        }
        Ok(out)
    }
}
