#![no_main]

use libfuzzer_sys::fuzz_target;
use snx::snx_core::colorspace::ColorSpace;
use snx::snx_core::options::EncoderOptions;
use snx::{SnDecoder, SnEncoder};

// the first encode may quantize, after that the image has to be
// stable under an encode/decode cycle
fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }
    let width = usize::from(data[0] % 32) + 1;
    let height = usize::from(data[1] % 32) + 1;
    let needed = width * height * 4;

    let Some(pixels) = data.get(2..2 + needed) else {
        return;
    };

    let options = EncoderOptions::new(width, height, ColorSpace::RGBA);
    let sn = SnEncoder::new(pixels, options).encode().unwrap();
    let quantized = SnDecoder::new(&sn).decode().unwrap();

    let sn_again = SnEncoder::new(&quantized, options).encode().unwrap();
    let stable = SnDecoder::new(&sn_again).decode().unwrap();

    assert_eq!(quantized, stable);
});
