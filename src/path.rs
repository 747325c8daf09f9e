//! The bounded, mutable path buffer the walker builds and every callback
//! reads (§3 "Path string", invariants I1/I2).
//!
//! Segments are pushed on entry to a container or member and popped on exit,
//! so the same buffer is reused for the whole walk (I1: "every tokenizer
//! entry point pushes a path segment and pops it on exit"). Capacity is
//! bounded (§3 "suggested 256 bytes, configurable"); an append that would
//! overrun it is silently truncated at the nearest `char` boundary rather
//! than failing the parse or corrupting the buffer (§4.1 "Path buffer
//! overflow").

#[derive(Debug)]
pub struct PathBuf {
    buf: String,
    capacity: usize,
    truncated: bool,
}

impl PathBuf {
    pub fn new(capacity: usize) -> Self {
        Self {
            buf: String::with_capacity(capacity.min(4096)),
            capacity,
            truncated: false,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.buf
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// True if any append so far has been clipped by capacity.
    pub fn overflowed(&self) -> bool {
        self.truncated
    }

    /// The checkmark to later pass to [`PathBuf::truncate_to`].
    pub fn checkpoint(&self) -> usize {
        self.buf.len()
    }

    pub fn truncate_to(&mut self, checkpoint: usize) {
        self.buf.truncate(checkpoint);
    }

    /// Append `s` verbatim, clipping at the nearest `char` boundary if it
    /// would overrun `capacity`. Keys are never escaped (§3: "Keys are
    /// inserted verbatim; no escaping").
    pub fn push_raw(&mut self, s: &str) {
        let room = self.capacity.saturating_sub(self.buf.len());
        if room == 0 {
            if !s.is_empty() {
                self.truncated = true;
            }
            return;
        }
        if s.len() <= room {
            self.buf.push_str(s);
            return;
        }
        self.truncated = true;
        let mut take = room;
        while take > 0 && !s.is_char_boundary(take) {
            take -= 1;
        }
        self.buf.push_str(&s[..take]);
    }

    /// Object entry `k` under the current path: `"." + k`.
    pub fn push_key(&mut self, key: &str) {
        self.push_raw(".");
        self.push_raw(key);
    }

    /// Array element `i` under the current path: `"[" + i + "]"`.
    pub fn push_index(&mut self, idx: usize) {
        self.push_raw("[");
        // usize fits comfortably on the stack; avoid a heap alloc per element.
        let mut digits = itoa_buf(idx);
        self.push_raw(digits.as_str());
        digits.clear();
        self.push_raw("]");
    }

    /// True when the buffer ends in a bare `.` — the guard rail that
    /// suppresses the phantom callback between pushing `.` and appending a
    /// key (§4.1 "Guard rail").
    pub fn ends_with_dot(&self) -> bool {
        self.buf.ends_with('.')
    }
}

/// Minimal stack-based `usize` formatter so `push_index` never allocates.
fn itoa_buf(mut n: usize) -> ArrayString {
    let mut tmp = [0u8; 20];
    let mut i = tmp.len();
    if n == 0 {
        i -= 1;
        tmp[i] = b'0';
    } else {
        while n > 0 {
            i -= 1;
            tmp[i] = b'0' + (n % 10) as u8;
            n /= 10;
        }
    }
    let mut out = ArrayString::new();
    out.data[..tmp.len() - i].copy_from_slice(&tmp[i..]);
    out.len = tmp.len() - i;
    out
}

struct ArrayString {
    data: [u8; 20],
    len: usize,
}

impl ArrayString {
    fn new() -> Self {
        Self {
            data: [0u8; 20],
            len: 0,
        }
    }
    fn as_str(&self) -> &str {
        std::str::from_utf8(&self.data[..self.len]).unwrap()
    }
    fn clear(&mut self) {
        self.len = 0;
    }
}
