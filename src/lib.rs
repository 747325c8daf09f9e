//! A small, self-contained JSON toolkit built around a single streaming
//! tokenizer: path-tagged `walk`, `scanf`-style extraction, `printf`-style
//! emission, and `setf`-style path mutation, plus a handful of utilities
//! (`prettify`, neighbor iteration, file helpers) built on top of it.
//!
//! There is no DOM: every operation either streams tokens to a callback or
//! reads/writes byte spans of the caller's own input directly.

mod classify;
pub mod codec;
pub mod error;
pub mod escape;
pub mod fileops;
pub mod neighbor;
pub mod options;
mod path;
pub mod prettify;
pub mod printf;
pub mod scanf;
pub mod setf;
pub mod sink;
pub mod token;
pub mod walker;

pub mod cli;

#[cfg(feature = "c-api")]
pub mod ffi;

pub use error::{JRResult, JsonError, JsonErrorKind};
pub use neighbor::{next_elem, next_key, Neighbor};
pub use options::WalkOptions;
pub use printf::{fprintf, printf, printf_array, printf_to_string, vprintf, PrintfArg};
pub use scanf::{scanf, scanf_array_elem, vscanf, ScanfArg};
pub use setf::{setf, vsetf, vsetf_with_log, Mutation};
pub use sink::{BufSink, FileSink, Sink, VecSink};
pub use token::{Token, TokenType};
pub use walker::{walk, walk_with_log, WalkEvent, WalkLogEntry};

/// Convenience wrapper: walks `input` and returns the pretty-printed form.
/// Thin re-export of [`prettify::prettify_to_string`] at the crate root,
/// mirroring how `walk`/`scanf`/`printf`/`setf` are also re-exported flat.
pub fn prettify_to_string(input: &str) -> JRResult<String> {
    prettify::prettify_to_string(input)
}

#[cfg(test)]
mod tests;
