//! Located failure reporting and the per-run failure counter.
//!
//! Every failed assertion or comparison goes through a [`Reporter`], which
//! writes a `"<file>:<line>: <message>"` line to its diagnostic sink, flushes
//! it immediately, and bumps its [`FailureCounter`]. The runner reads
//! [`Reporter::exit_code`] once all cases have run.

mod location;

use std::io::Write;

use tracing::debug;

pub use self::location::Location;

/// Number of failed assertions in a run. Only ever incremented.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FailureCounter(usize);

impl FailureCounter {
    fn increment(&mut self) {
        self.0 += 1;
    }

    pub fn get(self) -> usize {
        self.0
    }
}

pub struct Reporter {
    sink: Box<dyn Write + Send>,
    failures: FailureCounter,
}

impl Default for Reporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Reporter {
    /// Reporter writing to stderr.
    pub fn new() -> Self {
        Self::with_sink(std::io::stderr())
    }

    pub fn with_sink(sink: impl Write + Send + 'static) -> Self {
        Self {
            sink: Box::new(sink),
            failures: FailureCounter::default(),
        }
    }

    /// `true` passes silently. `false` reports `Assert failed in <loc>`.
    pub fn assert_that(&mut self, loc: &Location, condition: bool) -> bool {
        if condition {
            return true;
        }
        self.error(loc, &format!("Assert failed in <{loc}>"))
    }

    /// Like [`assert_that`](Self::assert_that) with a caller message.
    /// `message` is only called when `condition` is false.
    pub fn assert_with<F, S>(&mut self, loc: &Location, condition: bool, message: F) -> bool
    where
        F: FnOnce() -> S,
        S: AsRef<str>,
    {
        if condition {
            return true;
        }
        self.error(loc, message().as_ref())
    }

    /// Unconditionally report `message` at `loc` and count one failure.
    /// Always `false`, so callers can report and fail in one expression.
    pub fn error(&mut self, loc: &Location, message: &str) -> bool {
        let message = message.trim_end_matches('\n');
        // A broken sink must not lose the failure count.
        let _ = writeln!(self.sink, "{loc}: {message}").and_then(|()| self.sink.flush());
        self.failures.increment();
        debug!(location = %loc, failures = self.failures.get(), "failure reported");
        false
    }

    pub fn failures(&self) -> usize {
        self.failures.get()
    }

    pub fn counter(&self) -> FailureCounter {
        self.failures
    }

    pub fn is_success(&self) -> bool {
        self.failures.get() == 0
    }

    /// Process exit status for the run: 0 = all pass, 1 = any failure.
    pub fn exit_code(&self) -> i32 {
        if self.is_success() { 0 } else { 1 }
    }
}
