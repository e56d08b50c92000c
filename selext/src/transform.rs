//! The transform library — pure text-to-text functions.
//!
//! Each transform takes the current buffer (plus an optional string
//! argument) and produces a new buffer or a [`TransformError`].  Line-wise
//! transforms split and rejoin with the run's [`Eol`]; the scan transforms
//! (`re`, `email`, `ipv4`) instead search the whole buffer and collect the
//! matches.
//!
//! | Keyword   | Argument | Behavior |
//! |-----------|----------|----------|
//! | `count`   | —        | number of lines, as a decimal string |
//! | `trim`    | —        | strip leading/trailing spaces from each line |
//! | `uniq`    | —        | drop duplicate lines, keeping first occurrences |
//! | `re`      | pattern  | all non-overlapping matches, joined by the separator |
//! | `email`   | —        | `re` with a fixed email pattern |
//! | `ipv4`    | —        | `re` with a fixed dotted-quad pattern (octets 0–255) |
//! | `upper`   | —        | uppercase the whole buffer |
//! | `lower`   | —        | lowercase the whole buffer |
//! | `prefix`  | string   | prepend the argument to every line |
//! | `postfix` | string   | append the argument to every line |
//! | `sum`     | —        | sum of the lines as f64, printed with 6 decimals |
//! | `asc`     | —        | sort lines ascending (byte order) |
//! | `desc`    | —        | sort lines descending |

use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;

use crate::eol::Eol;

// ── Errors ────────────────────────────────────────────────────────────────────

/// Error produced by a transform.
#[derive(Debug)]
pub enum TransformError {
    /// The `re` command's pattern failed to compile.
    InvalidRegex(regex::Error),
    /// A line fed to `sum` is not a floating-point literal.
    InvalidFloat {
        /// 1-based position of the offending line within the buffer.
        line: usize,
        /// The offending line, verbatim.
        literal: String,
    },
}

impl std::fmt::Display for TransformError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransformError::InvalidRegex(_) => write!(f, "invalid regexp"),
            TransformError::InvalidFloat { line, literal } => {
                write!(f, "invalid float {literal:?} at input line {line}")
            }
        }
    }
}

impl std::error::Error for TransformError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TransformError::InvalidRegex(e) => Some(e),
            TransformError::InvalidFloat { .. } => None,
        }
    }
}

// ── Fixed patterns ────────────────────────────────────────────────────────────

/// `local@domain.tld`-shaped tokens: ASCII letters/digits/`._+-` in the
/// local part, letters/digits/`-` in domain labels, at least one dot
/// before the TLD.
const EMAIL_PATTERN: &str = r"[a-zA-Z0-9_.+-]+@[a-zA-Z0-9-]+\.[a-zA-Z0-9-.]+";

/// Dotted-quad IPv4 with each octet constrained to 0–255.  The word
/// boundaries keep a longer digit run (e.g. `999.1.1.1`) from yielding a
/// spurious suffix match like `99.1.1.1`.
const IPV4_PATTERN: &str =
    r"\b(?:(?:25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)\.){3}(?:25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)\b";

fn email_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(EMAIL_PATTERN).expect("fixed email pattern compiles"))
}

fn ipv4_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(IPV4_PATTERN).expect("fixed ipv4 pattern compiles"))
}

// ── Line-wise transforms ──────────────────────────────────────────────────────

/// Number of lines in the buffer, as a decimal string.
pub fn count(buffer: &str, eol: &Eol) -> String {
    eol.split(buffer).count().to_string()
}

/// Strip leading and trailing space characters (`' '` only) from each line.
pub fn trim(buffer: &str, eol: &Eol) -> String {
    eol.join(eol.split(buffer).map(|line| line.trim_matches(' ')))
}

/// Remove duplicate lines, keeping the first occurrence of each and
/// preserving order.
pub fn uniq(buffer: &str, eol: &Eol) -> String {
    let mut seen = HashSet::new();
    let lines: Vec<&str> = eol.split(buffer).filter(|line| seen.insert(*line)).collect();
    eol.join(lines)
}

/// Prepend `arg` to every line, blank lines included.
pub fn prefix(buffer: &str, arg: &str, eol: &Eol) -> String {
    eol.join(eol.split(buffer).map(|line| format!("{arg}{line}")))
}

/// Append `arg` to every line.
pub fn postfix(buffer: &str, arg: &str, eol: &Eol) -> String {
    eol.join(eol.split(buffer).map(|line| format!("{line}{arg}")))
}

/// Parse every line as an f64 and return the sum with exactly six digits
/// after the decimal point.
///
/// The first line that fails to parse aborts the transform; the error
/// names the offending literal and its 1-based line number.
pub fn sum(buffer: &str, eol: &Eol) -> Result<String, TransformError> {
    let mut total = 0.0f64;
    for (i, line) in eol.split(buffer).enumerate() {
        match line.parse::<f64>() {
            Ok(v) => total += v,
            Err(_) => {
                return Err(TransformError::InvalidFloat {
                    line: i + 1,
                    literal: line.to_owned(),
                })
            }
        }
    }
    Ok(format!("{total:.6}"))
}

/// Sort lines ascending in byte order.
pub fn asc(buffer: &str, eol: &Eol) -> String {
    let mut lines: Vec<&str> = eol.split(buffer).collect();
    lines.sort_unstable();
    eol.join(lines)
}

/// Sort lines descending in byte order.
pub fn desc(buffer: &str, eol: &Eol) -> String {
    let mut lines: Vec<&str> = eol.split(buffer).collect();
    lines.sort_unstable_by(|a, b| b.cmp(a));
    eol.join(lines)
}

// ── Whole-buffer transforms ───────────────────────────────────────────────────

/// Uppercase the entire buffer.
pub fn upper(buffer: &str) -> String {
    buffer.to_uppercase()
}

/// Lowercase the entire buffer.
pub fn lower(buffer: &str) -> String {
    buffer.to_lowercase()
}

// ── Scan transforms ───────────────────────────────────────────────────────────

fn collect_matches(re: &Regex, buffer: &str, eol: &Eol) -> String {
    let matches: Vec<&str> = re.find_iter(buffer).map(|m| m.as_str()).collect();
    eol.join(matches)
}

/// The `re` command: compile `pattern`, collect every non-overlapping
/// match in the buffer in order of appearance, and join them with the
/// separator.
///
/// ```
/// use selext::eol::Eol;
/// use selext::transform;
///
/// let eol = Eol::new("\n");
/// assert_eq!(transform::scan("a1b22c", "[0-9]+", &eol).unwrap(), "1\n22");
/// ```
pub fn scan(buffer: &str, pattern: &str, eol: &Eol) -> Result<String, TransformError> {
    let re = Regex::new(pattern).map_err(TransformError::InvalidRegex)?;
    Ok(collect_matches(&re, buffer, eol))
}

/// Collect everything in the buffer shaped like an email address.
pub fn email(buffer: &str, eol: &Eol) -> String {
    collect_matches(email_re(), buffer, eol)
}

/// Collect every valid dotted-quad IPv4 address in the buffer.
pub fn ipv4(buffer: &str, eol: &Eol) -> String {
    collect_matches(ipv4_re(), buffer, eol)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn eol() -> Eol {
        Eol::new("\n")
    }

    // -- count / trim / uniq ----------------------------------------------------

    #[test]
    fn count_lines() {
        assert_eq!(count("a\nb\nc", &eol()), "3");
        assert_eq!(count("", &eol()), "1");
        assert_eq!(count("a\n", &eol()), "2");
    }

    #[test]
    fn trim_strips_spaces_only() {
        assert_eq!(trim("  a  \n\tb ", &eol()), "a\n\tb");
    }

    #[test]
    fn trim_keeps_blank_lines() {
        assert_eq!(trim("a\n   \nb", &eol()), "a\n\nb");
    }

    #[test]
    fn uniq_keeps_first_occurrence() {
        assert_eq!(uniq("b\na\nb\na\nc", &eol()), "b\na\nc");
    }

    #[test]
    fn uniq_is_identity_on_distinct_lines() {
        assert_eq!(uniq("a\nb\nc", &eol()), "a\nb\nc");
    }

    // -- prefix / postfix ---------------------------------------------------------

    #[test]
    fn prefix_every_line_including_blanks() {
        assert_eq!(prefix("a\n\nb", "> ", &eol()), "> a\n> \n> b");
    }

    #[test]
    fn prefix_empty_arg_is_noop() {
        assert_eq!(prefix("a\nb", "", &eol()), "a\nb");
    }

    #[test]
    fn postfix_every_line() {
        assert_eq!(postfix("a\nb", ";", &eol()), "a;\nb;");
    }

    // -- sum ----------------------------------------------------------------------

    #[test]
    fn sum_integers() {
        assert_eq!(sum("1\n2\n3", &eol()).unwrap(), "6.000000");
    }

    #[test]
    fn sum_floats() {
        assert_eq!(sum("1.5\n-0.25", &eol()).unwrap(), "1.250000");
    }

    #[test]
    fn sum_reports_offending_literal_and_line() {
        let err = sum("1\nabc\n3", &eol()).unwrap_err();
        match &err {
            TransformError::InvalidFloat { line, literal } => {
                assert_eq!(*line, 2);
                assert_eq!(literal, "abc");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(err.to_string().contains("abc"));
    }

    // -- sorting ------------------------------------------------------------------

    #[test]
    fn asc_sorts_byte_order() {
        assert_eq!(asc("b\nA\na", &eol()), "A\na\nb");
    }

    #[test]
    fn desc_reverses_asc_on_distinct_lines() {
        let sorted = asc("c\na\nb", &eol());
        assert_eq!(desc(&sorted, &eol()), "c\nb\na");
    }

    // -- case ----------------------------------------------------------------------

    #[test]
    fn upper_and_lower_whole_buffer() {
        assert_eq!(upper("a\nB"), "A\nB");
        assert_eq!(lower("A\nb"), "a\nb");
    }

    #[test]
    fn case_transforms_leave_crlf_separator_intact() {
        assert_eq!(upper("a\r\nb"), "A\r\nB");
    }

    // -- scans ----------------------------------------------------------------------

    #[test]
    fn scan_collects_matches_in_order() {
        assert_eq!(scan("a1b22c", "[0-9]+", &eol()).unwrap(), "1\n22");
    }

    #[test]
    fn scan_invalid_pattern_errors() {
        let err = scan("x", "(", &eol()).unwrap_err();
        assert!(matches!(err, TransformError::InvalidRegex(_)));
        assert_eq!(err.to_string(), "invalid regexp");
    }

    #[test]
    fn scan_no_matches_yields_empty_buffer() {
        assert_eq!(scan("abc", "[0-9]+", &eol()).unwrap(), "");
    }

    #[test]
    fn email_extracts_addresses() {
        assert_eq!(
            email("contact me at a.b@test.com please", &eol()),
            "a.b@test.com"
        );
        assert_eq!(
            email("x@y.org and w_1+tag@mail-host.co.uk", &eol()),
            "x@y.org\nw_1+tag@mail-host.co.uk"
        );
    }

    #[test]
    fn ipv4_rejects_out_of_range_octets() {
        assert_eq!(ipv4("server 192.168.1.1 and 999.1.1.1", &eol()), "192.168.1.1");
    }

    #[test]
    fn ipv4_boundary_octets() {
        assert_eq!(ipv4("0.0.0.0 255.255.255.255 256.1.1.1", &eol()), "0.0.0.0\n255.255.255.255");
    }
}
