#![no_main]

use libfuzzer_sys::fuzz_target;
use ws_engine::codec::Decoder;

// No TCP listener, no runtime: a pure parser over arbitrary bytes is a
// strictly better fuzz target than driving a live handshake over a socket.
fuzz_target!(|data: &[u8]| {
    let mut decoder = Decoder::new();
    let _ = decoder.push(data);
});
