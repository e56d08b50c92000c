//! Command-line argument parsing.
//!
//! Usage:
//!   selext -c<script>      [-e<sep>] [<input-file>]
//!   selext -f<script-file> [-e<sep>] [<input-file>]
//!
//! Exactly one of `-c` (inline script) and `-f` (script file) is
//! required.  Input text comes from the positional file argument, or
//! stdin when it is absent or `-`.  `-e` overrides the line separator
//! (the value understands `\n`, `\r`, `\t` escapes).

use std::path::PathBuf;

// ── Public types ──────────────────────────────────────────────────────────────

/// Parsed command-line arguments.
#[derive(Debug)]
pub struct CliArgs {
    /// Where the script comes from.
    pub script: ScriptSource,
    /// Input file; `None` = read stdin.
    pub input: Option<PathBuf>,
    /// Line-separator override (`-e<sep>`, escapes already decoded).
    pub eol: Option<String>,
}

/// Where the script text comes from.
#[derive(Debug, PartialEq, Eq)]
pub enum ScriptSource {
    /// `-c<script>`: the script given inline.
    Inline(String),
    /// `-f<file>`: load the script from this file.
    File(PathBuf),
}

// ── Parsing ───────────────────────────────────────────────────────────────────

/// Parse `std::env::args()` and return [`CliArgs`] or an error message.
pub fn parse_args() -> Result<CliArgs, String> {
    let raw: Vec<String> = std::env::args().collect();
    parse_argv(&raw[1..])
}

/// Parse a slice of argument strings (exposed for testing).
pub fn parse_argv(argv: &[String]) -> Result<CliArgs, String> {
    let mut script: Option<ScriptSource> = None;
    let mut eol: Option<String> = None;
    let mut positional: Vec<String> = Vec::new();
    let mut i = 0;

    while i < argv.len() {
        let arg = argv[i].as_str();

        // `--` ends flag processing.
        if arg == "--" {
            i += 1;
            positional.extend(argv[i..].iter().cloned());
            break;
        }

        // Non-flag argument (`-` alone means stdin).
        if !arg.starts_with('-') || arg == "-" {
            positional.push(arg.to_owned());
            i += 1;
            continue;
        }

        let mut rest = arg[1..].chars();
        let flag = rest.next().unwrap_or('-');
        let attached = rest.as_str();
        // Value may be attached (`-ccount`) or the next argument (`-c count`).
        let value = if !attached.is_empty() {
            attached.to_owned()
        } else {
            i += 1;
            match argv.get(i) {
                Some(v) => v.clone(),
                None => return Err(format!("-{flag} requires an argument")),
            }
        };

        match flag {
            'c' => {
                if script.is_some() {
                    return Err("more than one script given".to_owned());
                }
                script = Some(ScriptSource::Inline(value));
            }
            'f' => {
                if script.is_some() {
                    return Err("more than one script given".to_owned());
                }
                script = Some(ScriptSource::File(PathBuf::from(value)));
            }
            'e' => eol = Some(decode_escapes(&value)),
            other => return Err(format!("unknown option -{other}")),
        }
        i += 1;
    }

    let script = script.ok_or_else(|| "no script given (use -c or -f)".to_owned())?;

    if positional.len() > 1 {
        return Err(format!("unexpected argument {:?}", positional[1]));
    }
    let input = positional
        .into_iter()
        .next()
        .filter(|p| p != "-")
        .map(PathBuf::from);

    Ok(CliArgs { script, input, eol })
}

/// Decode the separator escapes accepted by `-e`.
fn decode_escapes(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}

// ── Tests ─────────────────────────────────────────────────────────────────────
