//! Segment reporting.
//!
//! A decoded state path is compressed into maximal runs of one state, each
//! rendered as a half-open time interval on the clock obtained by summing
//! gaps front to back. Runs in a faster state than the baseline (the state
//! holding the most time) are reported as bursts.

use crate::decode::{Algorithm, Decoding, StartPrior};
use crate::error::{BurstError, Result};
use crate::gaps::GapSequence;
use burst_math::Objective;
use serde::Serialize;
use std::fmt;

/// A maximal run of one state over `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Segment {
    pub state: usize,
    pub start: f64,
    pub end: f64,
}

impl Segment {
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{:.1} {:.1})", self.state, self.start, self.end)
    }
}

/// A change of state between consecutive steps.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StateSwitch {
    /// Index of the first step in the new state.
    pub index: usize,
    /// Clock time at which the new state starts.
    pub time: f64,
    pub from: usize,
    pub to: usize,
}

fn check_lengths(states: &[usize], gaps: &[f64]) -> Result<()> {
    if states.len() != gaps.len() {
        return Err(BurstError::invalid(format!(
            "state sequence has {} entries but gap sequence has {}",
            states.len(),
            gaps.len()
        )));
    }
    Ok(())
}

/// Visit every state change with the clock time at which it happens.
fn scan_changes(states: &[usize], gaps: &[f64], mut on_change: impl FnMut(StateSwitch)) -> f64 {
    let mut clock = 0.0;
    for (i, &gap) in gaps.iter().enumerate() {
        if i > 0 && states[i] != states[i - 1] {
            on_change(StateSwitch {
                index: i,
                time: clock,
                from: states[i - 1],
                to: states[i],
            });
        }
        clock += gap;
    }
    clock
}

/// Compress `states` into time-ordered segments covering `[0, total)`.
///
/// `states[t]` is the state during `gaps[t]`. The last segment ends at the
/// front-to-back sum of all gaps.
pub fn segments(states: &[usize], gaps: &[f64]) -> Result<Vec<Segment>> {
    check_lengths(states, gaps)?;
    let Some(&first) = states.first() else {
        return Ok(Vec::new());
    };

    let mut out = Vec::new();
    let mut current = first;
    let mut start = 0.0;
    let total = scan_changes(states, gaps, |switch| {
        out.push(Segment {
            state: current,
            start,
            end: switch.time,
        });
        current = switch.to;
        start = switch.time;
    });
    out.push(Segment {
        state: current,
        start,
        end: total,
    });
    Ok(out)
}

/// Every state change along the path.
pub fn switches(states: &[usize], gaps: &[f64]) -> Result<Vec<StateSwitch>> {
    check_lengths(states, gaps)?;
    let mut out = Vec::new();
    scan_changes(states, gaps, |switch| out.push(switch));
    Ok(out)
}

/// State holding the most total time; ties go to the lower index.
pub fn baseline_state(segments: &[Segment]) -> Option<usize> {
    let states = segments.iter().map(|s| s.state).max()? + 1;
    let mut time = vec![0.0; states];
    for seg in segments {
        time[seg.state] += seg.duration();
    }
    Objective::Maximize.select(&time).map(|(i, _)| i)
}

/// Segments in a faster state than `baseline`.
pub fn bursts(segments: &[Segment], baseline: usize) -> Vec<Segment> {
    segments.iter().filter(|s| s.state < baseline).copied().collect()
}

/// Full result of one detection run.
#[derive(Debug, Clone, Serialize)]
pub struct BurstReport {
    pub algorithm: Algorithm,
    pub objective: Objective,
    pub scale: f64,
    pub penalty: f64,
    pub state_count: usize,
    pub rates: Vec<f64>,
    pub start: StartPrior,
    pub score: f64,
    pub total_duration: f64,
    pub states: Vec<usize>,
    pub segments: Vec<Segment>,
    pub switches: Vec<StateSwitch>,
    pub baseline_state: Option<usize>,
    pub bursts: Vec<Segment>,
}

impl BurstReport {
    /// Assemble the report for a decoding of `gaps`.
    pub fn build(decoding: Decoding, gaps: &GapSequence, penalty: f64) -> Result<Self> {
        let segments = segments(&decoding.states, gaps.as_slice())?;
        let switches = switches(&decoding.states, gaps.as_slice())?;
        let baseline_state = baseline_state(&segments);
        let bursts = baseline_state
            .map(|b| bursts(&segments, b))
            .unwrap_or_default();
        let total_duration = segments.last().map(|s| s.end).unwrap_or(0.0);

        Ok(Self {
            algorithm: decoding.algorithm,
            objective: decoding.objective,
            scale: decoding.state_space.scale(),
            penalty,
            state_count: decoding.state_space.len(),
            rates: decoding.state_space.rates().to_vec(),
            start: decoding.start,
            score: decoding.score,
            total_duration,
            states: decoding.states,
            segments,
            switches,
            baseline_state,
            bursts,
        })
    }

    /// Text rendering: the state list, then one line per segment.
    pub fn render_text(&self) -> String {
        let mut out = format!("{:?}\n", self.states);
        for seg in &self.segments {
            out.push_str(&seg.to_string());
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::{BurstDecoder, MinCostDecoder, NoTrace};
    use crate::test_utils::{gaps, OUTLIER_GAPS, QUIET_BURST_GAPS, SHORT_BURST_GAPS};

    fn seg(state: usize, start: f64, end: f64) -> Segment {
        Segment { state, start, end }
    }

    #[test]
    fn constant_path_single_segment() {
        let segs = segments(&[0; 5], &[1.0; 5]).unwrap();
        assert_eq!(segs, vec![seg(0, 0.0, 5.0)]);
    }

    #[test]
    fn outlier_fixtures() {
        let shift = segments(&[0, 0, 0, 0, 1, 1, 1, 1, 1], OUTLIER_GAPS).unwrap();
        assert_eq!(shift, vec![seg(0, 0.0, 4.0), seg(1, 4.0, 18.0)]);

        let spike = segments(&[0, 0, 0, 0, 3, 0, 0, 0, 0], OUTLIER_GAPS).unwrap();
        assert_eq!(
            spike,
            vec![seg(0, 0.0, 4.0), seg(3, 4.0, 14.0), seg(0, 14.0, 18.0)]
        );
    }

    #[test]
    fn quiet_burst_segments() {
        let states = [3, 3, 3, 3, 0, 0, 0, 0, 0, 3, 3, 3, 3];
        let segs = segments(&states, QUIET_BURST_GAPS).unwrap();
        assert_eq!(
            segs,
            vec![seg(3, 0.0, 40.0), seg(0, 40.0, 42.5), seg(3, 42.5, 82.5)]
        );
        assert_eq!(baseline_state(&segs), Some(3));
        assert_eq!(bursts(&segs, 3), vec![seg(0, 40.0, 42.5)]);
    }

    #[test]
    fn boundary_uses_sequential_sum() {
        let states = [0, 0, 0, 0, 0, 1, 1];
        let segs = segments(&states, SHORT_BURST_GAPS).unwrap();
        assert_eq!(segs.len(), 2);
        let boundary = 2.0 + 2.0 + 0.1 + 0.1 + 0.1;
        assert_eq!(segs[0].end, boundary);
        assert_eq!(segs[1].start, boundary);
        assert_eq!(segs[0].to_string(), "0 [0.0 4.3)");
    }

    #[test]
    fn segments_chain_and_cover() {
        let states = [2, 2, 1, 1, 1, 3, 0, 0];
        let xs = [0.3, 1.7, 0.0, 2.2, 5.0, 0.1, 9.9, 4.4];
        let segs = segments(&states, &xs).unwrap();
        assert_eq!(segs[0].start, 0.0);
        for pair in segs.windows(2) {
            assert_eq!(pair[0].end, pair[1].start);
            assert_ne!(pair[0].state, pair[1].state);
        }
        let total: f64 = xs.iter().sum();
        assert_eq!(segs.last().unwrap().end, total);
    }

    #[test]
    fn length_mismatch_is_invalid() {
        let err = segments(&[0, 1], &[1.0]).unwrap_err();
        assert!(matches!(err, BurstError::InvalidInput(_)));
        assert!(switches(&[0], &[1.0, 2.0]).is_err());
    }

    #[test]
    fn empty_path_has_no_segments() {
        assert!(segments(&[], &[]).unwrap().is_empty());
        assert_eq!(baseline_state(&[]), None);
    }

    #[test]
    fn switches_record_changes() {
        let sw = switches(&[0, 0, 0, 0, 3, 0, 0, 0, 0], OUTLIER_GAPS).unwrap();
        assert_eq!(
            sw,
            vec![
                StateSwitch { index: 4, time: 4.0, from: 0, to: 3 },
                StateSwitch { index: 5, time: 14.0, from: 3, to: 0 },
            ]
        );
    }

    #[test]
    fn baseline_ties_go_to_lower_state() {
        let segs = vec![seg(1, 0.0, 5.0), seg(0, 5.0, 10.0)];
        assert_eq!(baseline_state(&segs), Some(0));
        assert!(bursts(&segs, 0).is_empty());
    }

    #[test]
    fn segment_display_one_decimal() {
        assert_eq!(seg(1, 4.0, 18.0).to_string(), "1 [4.0 18.0)");
        assert_eq!(seg(0, 40.0, 42.5).to_string(), "0 [40.0 42.5)");
    }

    #[test]
    fn report_from_decoding() {
        let seq = gaps(OUTLIER_GAPS);
        let decoding = MinCostDecoder::new(2.0, 1.0)
            .unwrap()
            .decode(&seq, &mut NoTrace)
            .unwrap();
        let report = BurstReport::build(decoding, &seq, 1.0).unwrap();
        assert_eq!(report.state_count, 5);
        assert_eq!(report.total_duration, 18.0);
        assert_eq!(report.baseline_state, Some(1));
        assert_eq!(report.bursts, vec![seg(0, 0.0, 4.0)]);
        assert_eq!(
            report.render_text(),
            "[0, 0, 0, 0, 1, 1, 1, 1, 1]\n0 [0.0 4.0)\n1 [4.0 18.0)\n"
        );

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["algorithm"], "viterbi");
        assert_eq!(json["objective"], "minimize");
        assert_eq!(json["segments"][1]["state"], 1);
        assert_eq!(json["start"]["point_mass"], 0);
    }
}
