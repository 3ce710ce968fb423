#![no_main]

use std::io::Cursor;

use libfuzzer_sys::fuzz_target;
use xlsm_strip::StripOptions;

const MAX_INPUT_BYTES: usize = 256 * 1024;

fuzz_target!(|data: &[u8]| {
    if data.len() > MAX_INPUT_BYTES {
        return;
    }

    // Keep decompression bombs from dominating the run.
    let options = StripOptions {
        max_part_bytes: 1024 * 1024,
    };
    let mut output = Cursor::new(Vec::new());
    let _ = xlsm_strip::rewrite_package(Cursor::new(data), &mut output, &options);
});
