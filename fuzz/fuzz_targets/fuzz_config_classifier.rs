//! Fuzz target for classifier configuration parsing.
//!
//! Arbitrary bytes must produce a config or an error, never a panic.

#![no_main]

use libfuzzer_sys::fuzz_target;
use nb_config::{validate_config, ClassifierConfig};

fuzz_target!(|data: &[u8]| {
    if let Ok(config) = serde_json::from_slice::<ClassifierConfig>(data) {
        let _ = validate_config(&config);
    }
    if let Ok(text) = std::str::from_utf8(data) {
        let _ = ClassifierConfig::from_toml_str(text);
    }
});
