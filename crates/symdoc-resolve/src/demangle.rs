//! External demangling capability and its subprocess-backed implementation.

use std::io::Read;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use tracing::warn;

/// Resolves a batch of mangled references to display names.
///
/// Implementations return exactly one outcome per reference, in reference
/// order; `None` marks a reference that could not be demangled. A batch is
/// the unit of external cost, so callers collect references and demangle
/// them in one call rather than one at a time.
pub trait BatchDemangle: Send + Sync {
    fn batch_demangle(&self, references: &[&str]) -> Vec<Option<String>>;
}

/// Demangles references by spawning `swift demangle`.
///
/// One subprocess is spawned per batch with every reference as an argument.
/// The call is bounded by a timeout; on timeout, spawn failure, or output in
/// an unexpected shape the whole batch degrades to failures and generation
/// carries on with raw references.
#[derive(Debug, Clone)]
pub struct SwiftDemangler {
    program: PathBuf,
    timeout: Duration,
}

impl SwiftDemangler {
    /// Default bound on one demangler invocation.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Creates a demangler running `program` (normally `swift`) with the
    /// default timeout.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self::with_timeout(program, Self::DEFAULT_TIMEOUT)
    }

    /// Creates a demangler with an explicit timeout.
    pub fn with_timeout(
        program: impl Into<PathBuf>,
        timeout: Duration,
    ) -> Self {
        Self {
            program: program.into(),
            timeout,
        }
    }
}

/// Adjusts a symbol-graph reference into the spelling the demangler expects:
/// the document scheme prefixes Swift manglings with `s:`, the toolchain
/// wants `$s`.
fn demangler_argument(reference: &str) -> String {
    match reference.strip_prefix("s:") {
        Some(rest) => format!("$s{rest}"),
        None => reference.to_owned(),
    }
}

/// Cleans one demangled line for display. The ubiquitous `Swift.` module
/// qualifier is dropped; other module qualifiers are kept.
fn display_name(line: &str) -> String {
    let trimmed = line.trim();
    trimmed.strip_prefix("Swift.").unwrap_or(trimmed).to_owned()
}

/// Maps demangler stdout back onto the argument list.
///
/// The tool prints one line per argument and echoes an argument back
/// verbatim when it cannot demangle it; echoes, blank lines, and missing
/// lines are all failures.
fn parse_outcomes(stdout: &str, arguments: &[String]) -> Vec<Option<String>> {
    let mut lines = stdout.lines();
    arguments
        .iter()
        .map(|argument| match lines.next() {
            Some(line) if line.trim() == argument => None,
            Some(line) if line.trim().is_empty() => None,
            Some(line) => Some(display_name(line)),
            None => None,
        })
        .collect()
}

impl BatchDemangle for SwiftDemangler {
    fn batch_demangle(&self, references: &[&str]) -> Vec<Option<String>> {
        if references.is_empty() {
            return Vec::new();
        }
        let arguments: Vec<String> = references
            .iter()
            .map(|reference| demangler_argument(reference))
            .collect();

        let spawned = Command::new(&self.program)
            .arg("demangle")
            .arg("-compact")
            .args(&arguments)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn();
        let mut child = match spawned {
            Ok(child) => child,
            Err(error) => {
                warn!(
                    program = %self.program.display(),
                    %error,
                    "failed to spawn demangler"
                );
                return vec![None; references.len()];
            }
        };
        let Some(mut stdout) = child.stdout.take() else {
            child.kill().ok();
            child.wait().ok();
            return vec![None; references.len()];
        };

        // Read on a separate thread so the timeout also covers a demangler
        // that produces no output.
        let (sender, receiver) = mpsc::channel();
        let reader = thread::spawn(move || {
            let mut buffer = String::new();
            let outcome = stdout.read_to_string(&mut buffer).map(|_| buffer);
            sender.send(outcome).ok();
        });

        let output = match receiver.recv_timeout(self.timeout) {
            Ok(Ok(output)) => {
                child.wait().ok();
                reader.join().ok();
                output
            }
            Ok(Err(error)) => {
                warn!(%error, "failed to read demangler output");
                child.wait().ok();
                reader.join().ok();
                return vec![None; references.len()];
            }
            Err(_) => {
                warn!(timeout = ?self.timeout, "demangler timed out");
                child.kill().ok();
                child.wait().ok();
                reader.join().ok();
                return vec![None; references.len()];
            }
        };

        parse_outcomes(&output, &arguments)
    }
}
