//! burst-detect - decode bursty intervals from an inter-event gap file.

use burst_core::config::{load_config, ConfigOptions, ConfigOverrides};
use burst_core::decode::{Algorithm, NoTrace, StartPrior, TableWriter, TraceSink};
use burst_core::detect::detect_bursts;
use burst_core::exit_codes::ExitCode;
use burst_core::gaps::read_gaps;
use burst_core::logging::{init_logging, LogConfig, LogFormat, LogLevel};
use burst_core::output::{render, OutputFormat};
use clap::{Parser, ValueEnum};
use std::io::Write;
use std::path::PathBuf;
use tracing::debug;

/// Detect bursts in message traffic from inter-event gaps.
#[derive(Parser, Debug)]
#[command(name = "burst-detect")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Decoder to run
    #[arg(value_enum)]
    algorithm: Algorithm,

    /// File whose first line holds whitespace-separated gaps
    gaps_file: PathBuf,

    /// Geometric scale base of the rate ladder (> 1)
    #[arg(short = 's', long, allow_negative_numbers = true)]
    scale: Option<f64>,

    /// Transition penalty (>= 0)
    #[arg(short = 'g', long, allow_negative_numbers = true)]
    penalty: Option<f64>,

    /// Print the score table before the result
    #[arg(short = 'd', long)]
    debug: bool,

    /// Number of rate states for the trellis decoder
    #[arg(long)]
    states: Option<usize>,

    /// Start-state prior (defaults: point for viterbi, uniform for trellis)
    #[arg(long, value_enum)]
    start_prior: Option<StartPriorArg>,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Detector config file (JSON)
    #[arg(long, env = "BURST_DETECT_CONFIG")]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Silence all logging
    #[arg(short, long)]
    quiet: bool,

    /// Log output format on stderr
    #[arg(long, value_enum)]
    log_format: Option<LogFormat>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum StartPriorArg {
    /// All mass on the fastest state
    Point,
    /// Every state may start the path
    Uniform,
}

impl From<StartPriorArg> for StartPrior {
    fn from(arg: StartPriorArg) -> Self {
        match arg {
            StartPriorArg::Point => StartPrior::PointMass(0),
            StartPriorArg::Uniform => StartPrior::Uniform,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let log_config = LogConfig::from_env(
        LogLevel::from_verbosity(cli.verbose, cli.quiet),
        cli.log_format,
    );
    init_logging(&log_config);

    let exit_code = run(&cli);
    std::process::exit(exit_code.as_i32());
}

fn fail(code: ExitCode, message: impl std::fmt::Display) -> ExitCode {
    debug!(code = %code, "run failed");
    eprintln!("error: {}", message);
    code
}

fn run(cli: &Cli) -> ExitCode {
    let options = ConfigOptions {
        config_path: cli.config.clone(),
        config_dir: None,
    };
    let resolved = match load_config(&options) {
        Ok(resolved) => resolved,
        Err(e) => return fail(ExitCode::ConfigError, e),
    };

    let overrides = ConfigOverrides {
        scale: cli.scale,
        penalty: cli.penalty,
        trellis_states: cli.states,
        start_prior: cli.start_prior.map(StartPrior::from),
    };
    let params = resolved
        .detector
        .with_overrides(&overrides)
        .decode_params(cli.algorithm);
    debug!(?params, config = ?resolved.path, "decoder parameters");

    let gaps = match read_gaps(&cli.gaps_file) {
        Ok(gaps) => gaps,
        Err(e) => return fail(e.exit_code(), e),
    };

    // The table is held back until the decode succeeds.
    let mut table = cli.debug.then(|| TableWriter::new(Vec::new()));
    let mut no_trace = NoTrace;
    let sink: &mut dyn TraceSink = match table.as_mut() {
        Some(writer) => writer,
        None => &mut no_trace,
    };

    let report = match detect_bursts(&gaps, &params, sink) {
        Ok(report) => report,
        Err(e) => return fail(e.exit_code(), e),
    };

    let rendered = match render(&report, cli.format) {
        Ok(rendered) => rendered,
        Err(e) => return fail(ExitCode::InternalError, e),
    };

    let mut out = Vec::new();
    if let Some(writer) = table {
        match writer.finish() {
            Ok(buf) => out = buf,
            Err(e) => return fail(ExitCode::IoError, e),
        }
    }
    out.extend_from_slice(rendered.as_bytes());

    let mut stdout = std::io::stdout().lock();
    if let Err(e) = stdout.write_all(&out).and_then(|_| stdout.flush()) {
        return fail(ExitCode::IoError, e);
    }

    ExitCode::Clean
}
