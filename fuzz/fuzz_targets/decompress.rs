#![no_main]

use bzdrive::decompress;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Arbitrary input must fail cleanly, and never hang.
    let _ = decompress(data, 7);
});
