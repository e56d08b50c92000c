//! Command registry and dispatcher.
//!
//! The catalog maps each keyword to its transform and an
//! expects-argument flag.  It is a fixed `const` table; there are no
//! user-defined commands.
//!
//! A script line is split on `,`: the first token (whitespace-trimmed) is
//! the keyword.  For commands that take a string argument, the remaining
//! tokens are rejoined with the empty string — so the argument itself may
//! contain commas — then trimmed of surrounding whitespace and of one
//! layer of surrounding `"`/`'` quote characters.  Commands that take no
//! argument ignore any trailing tokens.
//!
//! Unknown keywords are an error.  The interpreter is a strict pipeline:
//! a misspelled command halts the run instead of silently passing the
//! buffer through.

use crate::eol::Eol;
use crate::transform::{self, TransformError};

// ── Errors ────────────────────────────────────────────────────────────────────

/// Error from resolving or running one command invocation.
#[derive(Debug)]
pub enum CommandError {
    /// The keyword is not in the catalog.
    Unknown(String),
    /// The transform itself failed.
    Transform(TransformError),
}

impl std::fmt::Display for CommandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommandError::Unknown(name) => write!(f, "unknown command {name:?}"),
            CommandError::Transform(e) => e.fmt(f),
        }
    }
}

impl std::error::Error for CommandError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CommandError::Unknown(_) => None,
            CommandError::Transform(e) => Some(e),
        }
    }
}

// ── Catalog ───────────────────────────────────────────────────────────────────

type Apply = fn(&str, &str, &Eol) -> Result<String, TransformError>;

/// One entry in the fixed command catalog: keyword, expects-argument
/// flag, and the transform to run.
pub struct CommandDef {
    pub name: &'static str,
    pub takes_arg: bool,
    apply: Apply,
}

impl std::fmt::Debug for CommandDef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandDef")
            .field("name", &self.name)
            .field("takes_arg", &self.takes_arg)
            .finish()
    }
}

/// The full command catalog, immutable at run time.
pub const CATALOG: &[CommandDef] = &[
    CommandDef { name: "count", takes_arg: false, apply: |b, _, e| Ok(transform::count(b, e)) },
    CommandDef { name: "trim", takes_arg: false, apply: |b, _, e| Ok(transform::trim(b, e)) },
    CommandDef { name: "uniq", takes_arg: false, apply: |b, _, e| Ok(transform::uniq(b, e)) },
    CommandDef { name: "re", takes_arg: true, apply: transform::scan },
    CommandDef { name: "email", takes_arg: false, apply: |b, _, e| Ok(transform::email(b, e)) },
    CommandDef { name: "ipv4", takes_arg: false, apply: |b, _, e| Ok(transform::ipv4(b, e)) },
    CommandDef { name: "upper", takes_arg: false, apply: |b, _, _| Ok(transform::upper(b)) },
    CommandDef { name: "lower", takes_arg: false, apply: |b, _, _| Ok(transform::lower(b)) },
    CommandDef { name: "prefix", takes_arg: true, apply: |b, a, e| Ok(transform::prefix(b, a, e)) },
    CommandDef { name: "postfix", takes_arg: true, apply: |b, a, e| Ok(transform::postfix(b, a, e)) },
    CommandDef { name: "sum", takes_arg: false, apply: |b, _, e| transform::sum(b, e) },
    CommandDef { name: "asc", takes_arg: false, apply: |b, _, e| Ok(transform::asc(b, e)) },
    CommandDef { name: "desc", takes_arg: false, apply: |b, _, e| Ok(transform::desc(b, e)) },
];

/// Look up a keyword in the catalog.
pub fn lookup(keyword: &str) -> Option<&'static CommandDef> {
    CATALOG.iter().find(|def| def.name == keyword)
}

// ── Invocation ────────────────────────────────────────────────────────────────

/// One resolved script line: a catalog entry plus its assembled argument.
#[derive(Debug)]
pub struct Invocation {
    def: &'static CommandDef,
    arg: String,
}

impl Invocation {
    /// Resolve one already-trimmed, non-blank, non-comment script line.
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let mut tokens = line.split(',');
        let keyword = tokens.next().unwrap_or("").trim();
        let def =
            lookup(keyword).ok_or_else(|| CommandError::Unknown(keyword.to_owned()))?;
        let arg = if def.takes_arg { assemble_arg(tokens) } else { String::new() };
        Ok(Self { def, arg })
    }

    /// The resolved keyword.
    pub fn keyword(&self) -> &'static str {
        self.def.name
    }

    /// The assembled string argument (empty for no-argument commands).
    pub fn arg(&self) -> &str {
        &self.arg
    }

    /// Run the command against `buffer`.
    pub fn invoke(&self, buffer: &str, eol: &Eol) -> Result<String, TransformError> {
        (self.def.apply)(buffer, &self.arg, eol)
    }
}

/// Rejoin the raw tokens with the empty string, then trim whitespace and
/// one layer of surrounding quotes.
fn assemble_arg<'a>(tokens: impl Iterator<Item = &'a str>) -> String {
    let joined: String = tokens.collect();
    strip_quotes(joined.trim()).to_owned()
}

/// Strip at most one leading and one trailing `"` or `'`, each end
/// independently.
fn strip_quotes(mut s: &str) -> &str {
    if let Some(rest) = s.strip_prefix(['"', '\'']) {
        s = rest;
    }
    if let Some(rest) = s.strip_suffix(['"', '\'']) {
        s = rest;
    }
    s
}

// ── Tests ─────────────────────────────────────────────────────────────────────
