// Shared proptest configuration for domain unit tests.
//
// PROPTEST_CASES overrides the case count (default 64 here; domain
// properties are cheap).

use proptest::prelude::ProptestConfig;

pub fn proptest_config() -> ProptestConfig {
    let base = ProptestConfig::default();
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|s| s.parse::<u32>().ok())
        .unwrap_or(64)
        .max(1);
    ProptestConfig {
        failure_persistence: None,
        cases,
        ..base
    }
}
