#![no_main]

use libfuzzer_sys::fuzz_target;

/// Metadata parts are tiny in real packages; larger inputs only slow the fuzzer down.
const MAX_INPUT_BYTES: usize = 64 * 1024;

fuzz_target!(|data: &[u8]| {
    if data.len() > MAX_INPUT_BYTES {
        return;
    }

    // Whatever comes out must itself be accepted, and patching it again must be a no-op.
    if let Ok(Some(patched)) = xlsm_strip::patch_content_types(data) {
        let again = xlsm_strip::patch_content_types(&patched).expect("patched output re-parses");
        assert!(again.is_none(), "content types patch is not idempotent");
    }

    if let Ok(Some(patched)) = xlsm_strip::remove_vba_relationships(data) {
        let again = xlsm_strip::remove_vba_relationships(&patched).expect("patched output re-parses");
        assert!(again.is_none(), "relationship patch is not idempotent");
    }
});
