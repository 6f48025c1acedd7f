#![no_main]

use libfuzzer_sys::fuzz_target;

use progression::TableExtractor;

fuzz_target!(|data: &[u8]| {
    let html = String::from_utf8_lossy(data);

    // Every returned record must have passed the validity filter
    for record in TableExtractor::default().extract(&html) {
        assert!(record.observed_value > 0.0);
        assert!(!record.actor.is_empty());
        assert!(!record.observed_at.is_empty());
        assert!(!record.location.is_empty());
    }
});
