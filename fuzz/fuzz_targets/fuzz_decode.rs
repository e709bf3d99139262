//! Fuzz target for the decoders with structured input.
//!
//! Any parameter combination either fails with an error or yields a path of
//! the right length whose segments cover the whole sequence.

#![no_main]

use arbitrary::Arbitrary;
use burst_core::decode::{Algorithm, DecodeParams, NoTrace, StartPrior, MAX_STATES};
use burst_core::{detect_bursts, GapSequence};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct DecodeInput {
    gaps: Vec<f64>,
    scale: f64,
    penalty: f64,
    trellis_states: u64,
    trellis: bool,
    uniform_start: bool,
}

fuzz_target!(|input: DecodeInput| {
    // Ladder height is bounded by the decoders; keep the sequence short.
    if input.gaps.len() > 64 {
        return;
    }
    let Ok(gaps) = GapSequence::new(input.gaps) else {
        return;
    };

    let algorithm = if input.trellis {
        Algorithm::Trellis
    } else {
        Algorithm::Viterbi
    };
    let params = DecodeParams {
        algorithm,
        scale: input.scale,
        penalty: input.penalty,
        trellis_states: input.trellis_states as usize,
        start: input.uniform_start.then_some(StartPrior::Uniform),
    };

    if let Ok(report) = detect_bursts(&gaps, &params, &mut NoTrace) {
        assert_eq!(report.states.len(), gaps.len());
        assert!(report.state_count <= MAX_STATES);
        assert!(report.states.iter().all(|&s| s < report.state_count));
        let first = report.segments.first().expect("at least one segment");
        assert_eq!(first.start, 0.0);
    }
});
