//! End-to-end detection: decoder selection, decoding and reporting.

use crate::decode::{decoder_for, DecodeParams, TraceSink};
use crate::error::Result;
use crate::gaps::GapSequence;
use crate::report::BurstReport;
use tracing::{info, instrument};

/// Decode `gaps` with the decoder described by `params` and report segments.
#[instrument(skip_all, fields(algorithm = %params.algorithm, gaps = gaps.len()))]
pub fn detect_bursts(
    gaps: &GapSequence,
    params: &DecodeParams,
    sink: &mut dyn TraceSink,
) -> Result<BurstReport> {
    let decoder = decoder_for(params)?;
    let decoding = decoder.decode(gaps, sink)?;
    let report = BurstReport::build(decoding, gaps, params.penalty)?;
    info!(
        states = report.state_count,
        segments = report.segments.len(),
        bursts = report.bursts.len(),
        score = report.score,
        "detection complete"
    );
    Ok(report)
}
