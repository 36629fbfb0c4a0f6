//! Fuzz target for JSON criteria documents.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_criteria_json
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;
use yocoma_query::{ContactCriteria, PredicateBuilder, TeamContactCriteria, criteria_from_json};

fuzz_target!(|data: &[u8]| {
    let Ok(json) = std::str::from_utf8(data) else {
        return;
    };

    if let Ok(criteria) = criteria_from_json::<ContactCriteria>(json) {
        let spec = PredicateBuilder::default().build(Some(&criteria));
        let _ = spec.to_string();

        // Anything accepted must survive re-serialization unchanged.
        let encoded = serde_json::to_string(&criteria).expect("criteria serialize");
        let decoded: ContactCriteria = criteria_from_json(&encoded).expect("re-parse serialized criteria");
        assert_eq!(decoded, criteria);
    }

    if let Ok(criteria) = criteria_from_json::<TeamContactCriteria>(json) {
        let _ = PredicateBuilder::default().build(Some(&criteria));
    }
});
