//! Fuzz target for detector.json configuration parsing.
//!
//! Tests that JSON detector configuration parsing and validation handle
//! arbitrary input without panicking.

#![no_main]

use burst_core::config::parse_detector_config;
use burst_core::config::validate::validate_detector_config;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    if let Ok(config) = parse_detector_config(text) {
        let _ = validate_detector_config(&config);
        // Accepted configs must round-trip through serde_json.
        let json = serde_json::to_string(&config).expect("config serializes");
        let _ = parse_detector_config(&json);
    }
});
