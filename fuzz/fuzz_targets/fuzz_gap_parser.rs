//! Fuzz target for gap file parsing.
//!
//! Parsing arbitrary text must never panic; accepted sequences must satisfy
//! the gap invariants and build a report without panicking.

#![no_main]

use burst_core::decode::{Algorithm, DecodeParams, NoTrace};
use burst_core::{detect_bursts, parse_gaps};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(gaps) = parse_gaps(text) else {
        return;
    };

    assert!(!gaps.is_empty());
    assert!(gaps.iter().all(|g| g.is_finite() && *g >= 0.0));

    // Keep decode cost bounded.
    if gaps.len() > 64 {
        return;
    }
    for algorithm in [Algorithm::Viterbi, Algorithm::Trellis] {
        if let Ok(report) = detect_bursts(&gaps, &DecodeParams::new(algorithm), &mut NoTrace) {
            assert_eq!(report.states.len(), gaps.len());
        }
    }
});
