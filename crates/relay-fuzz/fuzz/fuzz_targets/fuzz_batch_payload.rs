#![no_main]

use libfuzzer_sys::fuzz_target;
use paper_relay::batcher::Batcher;
use paper_relay::models::RawResults;

fuzz_target!(|data: &[u8]| {
    // Treat arbitrary bytes as the agent's encoded papers string
    let Ok(encoded) = std::str::from_utf8(data) else {
        return;
    };

    for finish in [false, true] {
        let raw = RawResults { papers: serde_json::Value::String(encoded.to_string()), finish: Some(finish) };
        if let Ok(page) = Batcher::new(3).batch(&raw) {
            assert!(page.positions().all(|i| i < page.len()));
            assert!(!finish || page.len() <= 3);
        }
    }
});
