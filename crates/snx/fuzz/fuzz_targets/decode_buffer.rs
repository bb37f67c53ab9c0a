#![no_main]

use libfuzzer_sys::fuzz_target;

// decoding arbitrary bytes must never panic
fuzz_target!(|data: &[u8]| {
    let mut decoder = snx::SnDecoder::new(data);
    let _ = decoder.decode();
});
