#![no_main]

use std::fmt::{self, Write};

use libfuzzer_sys::fuzz_target;

use cbor_stream::Stream;

/// A sink that measures without storing; the fuzzer only cares about panics.
struct Discard(usize);

impl Write for Discard {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.0 += s.len();
        Ok(())
    }
}

fuzz_target!(|data: &[u8]| {
    let stream = Stream::from_slice(data);

    let mut out = Discard(0);
    let _ = write!(out, "{}", stream.pretty());
    let _ = write!(out, "{}", stream.hex());

    for offset in 0..data.len().min(64) {
        let _ = stream.read_uint(offset);
        let _ = stream.read_int(offset);
        let _ = stream.read_bytes(offset);
        let _ = stream.read_text(offset);
        let _ = stream.read_array(offset);
        let _ = stream.read_map(offset);
        let _ = stream.read_tag(offset);
        let _ = stream.read_bool(offset);
        let _ = stream.read_half(offset);
        let _ = stream.read_float(offset);
        let _ = stream.read_double(offset);
        let _ = stream.read_date_time(offset);
        let _ = stream.read_epoch(offset);
    }
});
