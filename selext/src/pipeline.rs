//! The pipeline executor.
//!
//! A script is a newline-separated list of command invocations.  The
//! executor trims each script line, skips blank and `#` comment lines,
//! and dispatches the rest in order, threading each command's output into
//! the next command's input.  The first error halts the run; no further
//! lines execute.
//!
//! ```
//! use selext::{Eol, Pipeline};
//!
//! let p = Pipeline::new(Eol::new("\n"));
//! assert_eq!(p.run("10\n20\n12", "sum").unwrap(), "42.000000");
//! ```

use crate::command::{CommandError, Invocation};
use crate::eol::Eol;
use crate::transform;

// ── Errors ────────────────────────────────────────────────────────────────────

/// A halted run: which script line failed, how, and what had been
/// computed up to (but not including) the failing step.
#[derive(Debug)]
pub struct PipelineError {
    /// 1-based line number within the script.
    pub line: usize,
    /// Keyword of the failing invocation (the unknown keyword itself if
    /// the line did not resolve).
    pub command: String,
    /// Output accumulated before the failing step.
    pub partial: String,
    /// What went wrong.
    pub kind: CommandError,
}

impl std::fmt::Display for PipelineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            CommandError::Unknown(_) => write!(f, "script line {}: {}", self.line, self.kind),
            CommandError::Transform(e) => {
                write!(f, "script line {}: {}: {}", self.line, self.command, e)
            }
        }
    }
}

impl std::error::Error for PipelineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.kind)
    }
}

// ── Pipeline ──────────────────────────────────────────────────────────────────

/// The interpreter: holds the run's line separator and executes scripts.
///
/// No state persists between runs; each [`Pipeline::run`] rebuilds the
/// output from scratch.
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    eol: Eol,
}

impl Pipeline {
    /// An interpreter using `eol` for every split and join.
    pub fn new(eol: Eol) -> Self {
        Self { eol }
    }

    /// The separator this interpreter uses.
    pub fn eol(&self) -> &Eol {
        &self.eol
    }

    /// Apply `script` to `input` and return the final buffer, or the
    /// first error together with the partial output.
    pub fn run(&self, input: &str, script: &str) -> Result<String, PipelineError> {
        // The script itself gets one round of per-line space-trimming
        // before interpretation, so indented commands work.
        let script = transform::trim(script, &self.eol);

        let mut output = input.to_owned();
        for (i, line) in self.eol.split(&script).enumerate() {
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let inv = match Invocation::parse(line) {
                Ok(inv) => inv,
                Err(kind) => {
                    let command = match &kind {
                        CommandError::Unknown(k) => k.clone(),
                        CommandError::Transform(_) => String::new(),
                    };
                    return Err(PipelineError { line: i + 1, command, partial: output, kind });
                }
            };
            match inv.invoke(&output, &self.eol) {
                Ok(next) => output = next,
                Err(e) => {
                    return Err(PipelineError {
                        line: i + 1,
                        command: inv.keyword().to_owned(),
                        partial: output,
                        kind: CommandError::Transform(e),
                    })
                }
            }
        }
        Ok(output)
    }
}

/// Run `script` against `input` with the platform separator.
pub fn run(input: &str, script: &str) -> Result<String, PipelineError> {
    Pipeline::default().run(input, script)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn pipeline() -> Pipeline {
        Pipeline::new(Eol::new("\n"))
    }

    #[test]
    fn empty_script_returns_input_unchanged() {
        assert_eq!(pipeline().run("a\nb", "").unwrap(), "a\nb");
    }

    #[test]
    fn commands_thread_output_to_input() {
        assert_eq!(pipeline().run("b\na\nb", "uniq\nasc").unwrap(), "a\nb");
    }

    #[test]
    fn script_lines_are_trimmed_before_dispatch() {
        assert_eq!(pipeline().run("a\nb\nc", "   count   ").unwrap(), "3");
    }

    #[test]
    fn comment_lines_are_skipped_regardless_of_content() {
        assert_eq!(pipeline().run("a\nb", "# re,(\ncount").unwrap(), "2");
    }

    #[test]
    fn blank_lines_are_skipped() {
        assert_eq!(pipeline().run("a\nb", "\n\ncount\n\n").unwrap(), "2");
    }

    #[test]
    fn first_error_halts_the_run() {
        // upper applies, sum fails on "X", lower never runs.
        let err = pipeline().run("x", "upper\nsum\nlower").unwrap_err();
        assert_eq!(err.line, 2);
        assert_eq!(err.command, "sum");
        assert_eq!(err.partial, "X");
    }

    #[test]
    fn unknown_command_halts_with_context() {
        let err = pipeline().run("x", "upper\nfrobnicate\nlower").unwrap_err();
        assert_eq!(err.line, 2);
        assert_eq!(err.command, "frobnicate");
        assert_eq!(err.partial, "X");
        assert!(matches!(err.kind, CommandError::Unknown(_)));
        assert!(err.to_string().contains("frobnicate"));
    }

    #[test]
    fn invalid_regex_error_is_shown_verbatim() {
        let err = pipeline().run("x", "re,(").unwrap_err();
        assert_eq!(err.to_string(), "script line 1: re: invalid regexp");
    }

    #[test]
    fn error_line_numbers_count_comments_and_blanks() {
        let err = pipeline().run("x", "# header\n\nsum").unwrap_err();
        assert_eq!(err.line, 3);
    }

    #[test]
    fn custom_separator_is_used_throughout() {
        let p = Pipeline::new(Eol::new("\r\n"));
        assert_eq!(p.run("b\r\na\r\nb", "uniq\r\nasc").unwrap(), "a\r\nb");
        assert_eq!(p.run("a\r\nb", "count").unwrap(), "2");
    }

    #[test]
    fn run_uses_platform_separator() {
        let sep = Eol::platform();
        let input = format!("b{0}a{0}b", sep.as_str());
        assert_eq!(run(&input, "uniq").unwrap(), format!("b{0}a", sep.as_str()));
    }
}
