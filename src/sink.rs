//! Output sink: the polymorphic byte writer every emitting operation targets.
//!
//! §3 specifies two flavors — a bounded in-memory buffer with a
//! NUL-terminated tail, and a file handle — where the bounded variant
//! reports the *would-have-been* length even when truncated, so a caller
//! can size a buffer in one pass and fill it in a second. Expressed here as
//! a trait with two implementors rather than a tagged union; [`VecSink`] is
//! a third, purely-Rust convenience (an unbounded growable buffer) used by
//! the `_to_string` convenience wrappers.

use std::fs::File;
use std::io::{self, Write};

pub trait Sink {
    /// Appends `bytes`. Returns the number of bytes that would have been
    /// written were the sink unbounded — not necessarily how many bytes
    /// actually landed in storage (see [`BufSink`]).
    fn write(&mut self, bytes: &[u8]) -> usize;

    fn write_str(&mut self, s: &str) -> usize {
        self.write(s.as_bytes())
    }

    fn write_char(&mut self, c: char) -> usize {
        let mut buf = [0u8; 4];
        let s = c.encode_utf8(&mut buf);
        self.write_str(s)
    }
}

/// A bounded, caller-owned buffer. NUL-terminated after every append, even
/// when the write overruns capacity (the tail byte is always
/// `buf[min(len, capacity-1)] == 0`, per §3/§8 "Bounded output").
pub struct BufSink<'a> {
    buf: &'a mut [u8],
    /// Logical length if unbounded — may exceed `buf.len()`.
    len: usize,
}

impl<'a> BufSink<'a> {
    pub fn new(buf: &'a mut [u8]) -> Self {
        let mut s = Self { buf, len: 0 };
        s.terminate();
        s
    }

    /// Bytes actually written so far (bounded by capacity, excluding the NUL).
    pub fn written(&self) -> usize {
        if self.buf.is_empty() {
            0
        } else {
            self.len.min(self.buf.len() - 1)
        }
    }

    /// Bytes that would have been written had the buffer been unbounded.
    /// Two calls against the same target capacity with this value let a
    /// caller probe the required size before allocating it.
    pub fn would_write(&self) -> usize {
        self.len
    }

    fn terminate(&mut self) {
        if !self.buf.is_empty() {
            let at = self.written();
            self.buf[at] = 0;
        }
    }
}

impl Sink for BufSink<'_> {
    fn write(&mut self, bytes: &[u8]) -> usize {
        let cap = self.buf.len();
        if cap > 0 {
            let start = self.written();
            let room = cap - 1 - start; // leave room for NUL
            let n = bytes.len().min(room);
            self.buf[start..start + n].copy_from_slice(&bytes[..n]);
        }
        self.len += bytes.len();
        self.terminate();
        bytes.len()
    }
}

/// A growable, unbounded in-memory sink — a third, Rust-native variant
/// alongside the bounded buffer and file sinks; every `_to_string`
/// convenience wrapper in this crate targets one internally.
#[derive(Default)]
pub struct VecSink {
    buf: Vec<u8>,
}

impl VecSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(cap: usize) -> Self {
        Self {
            buf: Vec::with_capacity(cap),
        }
    }

    pub fn into_string(self) -> String {
        String::from_utf8(self.buf).expect("sink only ever receives valid UTF-8")
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }
}

impl Sink for VecSink {
    fn write(&mut self, bytes: &[u8]) -> usize {
        self.buf.extend_from_slice(bytes);
        bytes.len()
    }
}

/// Wraps any `io::Write` (typically a `File`). The first I/O error is
/// latched and returned by [`FileSink::finish`]; individual `write` calls
/// stay infallible to match the `Sink` trait's contract.
pub struct FileSink<W: Write> {
    w: W,
    err: Option<io::Error>,
}

impl<W: Write> FileSink<W> {
    pub fn new(w: W) -> Self {
        Self { w, err: None }
    }

    pub fn finish(mut self) -> io::Result<()> {
        self.w.flush().map_err(|e| {
            self.err.get_or_insert(io::Error::new(e.kind(), e.to_string()));
        }).ok();
        match self.err.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl FileSink<File> {
    pub fn create(path: impl AsRef<std::path::Path>) -> io::Result<Self> {
        Ok(Self::new(File::create(path)?))
    }
}

impl<W: Write> Sink for FileSink<W> {
    fn write(&mut self, bytes: &[u8]) -> usize {
        if self.err.is_none() {
            if let Err(e) = self.w.write_all(bytes) {
                self.err = Some(e);
            }
        }
        bytes.len()
    }
}
