//! Output formats for detection reports.

use crate::report::BurstReport;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Supported output formats for detection results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// State list followed by one line per segment
    #[default]
    Text,

    /// Pretty-printed JSON document with the full report
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Render a report in the requested format, newline-terminated.
pub fn render(report: &BurstReport, format: OutputFormat) -> serde_json::Result<String> {
    match format {
        OutputFormat::Text => Ok(report.render_text()),
        OutputFormat::Json => {
            let mut out = serde_json::to_string_pretty(report)?;
            out.push('\n');
            Ok(out)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::{Algorithm, DecodeParams, NoTrace};
    use crate::detect::detect_bursts;
    use crate::test_utils::{gaps, QUIET_BURST_GAPS};

    fn report() -> BurstReport {
        let mut params = DecodeParams::new(Algorithm::Viterbi);
        params.penalty = 0.1;
        detect_bursts(&gaps(QUIET_BURST_GAPS), &params, &mut NoTrace).unwrap()
    }

    #[test]
    fn default_is_text() {
        assert_eq!(OutputFormat::default(), OutputFormat::Text);
        assert_eq!(OutputFormat::Json.to_string(), "json");
    }

    #[test]
    fn text_rendering() {
        let text = render(&report(), OutputFormat::Text).unwrap();
        assert_eq!(
            text,
            "[3, 3, 3, 3, 0, 0, 0, 0, 0, 3, 3, 3, 3]\n\
             3 [0.0 40.0)\n\
             0 [40.0 42.5)\n\
             3 [42.5 82.5)\n"
        );
    }

    #[test]
    fn json_rendering() {
        let json = render(&report(), OutputFormat::Json).unwrap();
        assert!(json.ends_with('\n'));
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["state_count"], 8);
        assert_eq!(value["baseline_state"], 3);
        assert_eq!(value["bursts"].as_array().unwrap().len(), 1);
        assert_eq!(value["bursts"][0]["start"], 40.0);
        assert_eq!(value["switches"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn serde_lowercase() {
        assert_eq!(serde_json::to_string(&OutputFormat::Json).unwrap(), "\"json\"");
        let parsed: OutputFormat = serde_json::from_str("\"text\"").unwrap();
        assert_eq!(parsed, OutputFormat::Text);
    }
}
