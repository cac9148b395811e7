#![no_main]

use libfuzzer_sys::fuzz_target;
use paper_relay::batcher::Batcher;
use paper_relay::models::RawResults;

fuzz_target!(|data: &[u8]| {
    // Whole poll responses: decode, then batch. Should never panic.
    if let Ok(raw) = serde_json::from_slice::<RawResults>(data) {
        let _ = Batcher::default().batch(&raw);
    }
});
