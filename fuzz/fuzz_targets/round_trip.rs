#![no_main]

use bzdrive::{compress, decompress};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Use the first bytes to pick the parameters.
    if data.len() < 3 {
        return;
    }
    let block_size = 1 + (data[0] % 9) as i64;
    let work_factor = data[1] as i64 % 251;
    let buffer_size = 1 + data[2] as i64;
    let input = &data[3..];

    let compressed = compress(input, block_size, work_factor, buffer_size).unwrap();
    let decompressed = decompress(&compressed, buffer_size).unwrap();
    assert_eq!(decompressed, input);
});
