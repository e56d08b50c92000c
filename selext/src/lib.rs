//! selext — a tiny line-oriented text-transformation interpreter.
//!
//! Given a block of input text and a short script of newline-separated
//! commands, selext applies each command in order to a running output
//! buffer and returns the final result, or the first error.  Commands are
//! pure text transforms: counting, trimming, deduplicating and sorting
//! lines, regex extraction, case folding, per-line prefix/postfix, and
//! numeric summation.
//!
//! # Quick start
//!
//! ```rust
//! use selext::{Eol, Pipeline};
//!
//! let p = Pipeline::new(Eol::new("\n"));
//! let out = p.run("b\na\nb", "uniq\nasc").unwrap();
//! assert_eq!(out, "a\nb");
//! ```
//!
//! Script syntax: one command per line, `keyword[,argument…]`.  Lines
//! starting with `#` are comments; blank lines are skipped.  The first
//! failing command halts the run.

pub mod cli;
pub mod command;
pub mod eol;
pub mod pipeline;
pub mod transform;

// Re-exports for convenience.
pub use command::CommandError;
pub use eol::Eol;
pub use pipeline::{run, Pipeline, PipelineError};
pub use transform::TransformError;
