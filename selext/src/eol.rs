//! Per-run line-separator configuration.
//!
//! Every split and join in the interpreter goes through one [`Eol`] value,
//! chosen when the [`Pipeline`](crate::Pipeline) is constructed and fixed
//! for the lifetime of that run.  The separator is internal plumbing for
//! treating a buffer as a sequence of lines; it is not a file format and
//! does not have to match anything persisted outside the process.
//!
//! Round-trip law: for any buffer `b`, `eol.join(eol.split(b)) == b`.

// ── Public types ──────────────────────────────────────────────────────────────

/// The line separator used for all split/join operations in a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Eol(String);

impl Eol {
    /// A custom separator.  Any non-empty string works; the usual choices
    /// are `"\n"` and `"\r\n"`.
    pub fn new(sep: impl Into<String>) -> Self {
        Self(sep.into())
    }

    /// The host platform's conventional separator.
    pub fn platform() -> Self {
        if cfg!(windows) {
            Self("\r\n".to_owned())
        } else {
            Self("\n".to_owned())
        }
    }

    /// The separator string itself.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Split `text` into lines on this separator.
    ///
    /// An empty buffer is one empty line; a buffer ending in the separator
    /// has a trailing empty line.  This mirrors plain `str::split`, which
    /// is what makes the round-trip law hold.
    pub fn split<'a>(&'a self, text: &'a str) -> std::str::Split<'a, &'a str> {
        text.split(self.0.as_str())
    }

    /// Join lines back into a buffer with this separator.
    pub fn join<I>(&self, lines: I) -> String
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut out = String::new();
        let mut first = true;
        for line in lines {
            if !first {
                out.push_str(&self.0);
            }
            out.push_str(line.as_ref());
            first = false;
        }
        out
    }
}

impl Default for Eol {
    fn default() -> Self {
        Self::platform()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
