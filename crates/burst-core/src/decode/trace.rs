//! Score-table tracing for forward passes.
//!
//! A decoder reports every completed score column to a [`TraceSink`]. The
//! forward pass itself performs no I/O; the CLI's debug mode plugs in a
//! [`TableWriter`] and tests use closures.

use std::io::{self, Write};

/// One completed column of a score table.
#[derive(Debug, Clone, Copy)]
pub struct TraceColumn<'a> {
    /// Time index of the column (0 is the start column).
    pub step: usize,
    /// Accumulated score per state.
    pub scores: &'a [f64],
    /// Chosen predecessor per state; None for the start column.
    pub backpointers: Option<&'a [usize]>,
}

/// Receiver for score columns produced during a forward pass.
pub trait TraceSink {
    fn column(&mut self, column: &TraceColumn<'_>);
}

/// Discards every column.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoTrace;

impl TraceSink for NoTrace {
    fn column(&mut self, _column: &TraceColumn<'_>) {}
}

impl<F> TraceSink for F
where
    F: FnMut(&TraceColumn<'_>),
{
    fn column(&mut self, column: &TraceColumn<'_>) {
        self(column)
    }
}

/// Renders columns as text lines: `t=<step> [<scores>] <- [<backpointers>]`.
///
/// Scores are printed with two decimals; unreachable cells print as `inf`.
/// The first write error is kept and returned by [`TableWriter::finish`];
/// later columns are dropped.
#[derive(Debug)]
pub struct TableWriter<W: Write> {
    out: W,
    error: Option<io::Error>,
}

impl<W: Write> TableWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out, error: None }
    }

    /// Flush and hand back the writer, or the first write error.
    pub fn finish(mut self) -> io::Result<W> {
        if let Some(err) = self.error.take() {
            return Err(err);
        }
        self.out.flush()?;
        Ok(self.out)
    }
}

/// Format one trace column as a table line (no trailing newline).
pub fn format_column(column: &TraceColumn<'_>) -> String {
    let scores = column
        .scores
        .iter()
        .map(|s| format!("{:.2}", s))
        .collect::<Vec<_>>()
        .join(", ");
    match column.backpointers {
        Some(bp) => {
            let bp = bp
                .iter()
                .map(|i| i.to_string())
                .collect::<Vec<_>>()
                .join(", ");
            format!("t={} [{}] <- [{}]", column.step, scores, bp)
        }
        None => format!("t={} [{}]", column.step, scores),
    }
}

impl<W: Write> TraceSink for TableWriter<W> {
    fn column(&mut self, column: &TraceColumn<'_>) {
        if self.error.is_some() {
            return;
        }
        if let Err(err) = writeln!(self.out, "{}", format_column(column)) {
            self.error = Some(err);
        }
    }
}
