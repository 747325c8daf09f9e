/// Knobs shared by every operation in this crate.
///
/// A flat, `Default`-derived, one-knob-per-concern struct threaded through
/// every entry point, rather than a builder: these are rarely-changed,
/// crate-wide settings, not per-call parameters.
#[derive(Clone, Debug)]
pub struct WalkOptions {
    /// Bound on the path buffer (§3: "suggested 256 bytes, configurable").
    /// Segments that would overflow this capacity are silently dropped; the
    /// path is never corrupted, only truncated (§4.1 "Path buffer overflow").
    pub path_capacity: usize,
    /// When true, string scalars emitted by `%Q`/printf/the pretty-printer
    /// escape every codepoint above U+007F as `\uXXXX` (surrogate pairs for
    /// codepoints above the BMP). When false, UTF-8 bytes pass through.
    pub ensure_ascii: bool,
    /// When true (default), the walker accepts unquoted identifier object
    /// keys per the lenient grammar in §4.1. When false, an unquoted key
    /// is reported as `JsonErrorKind::ObjectKeyExpected`.
    pub allow_unquoted_keys: bool,
    /// Emit uppercase hex digits from the `%H` printf placeholder. The `%H`
    /// scanf converter accepts either case regardless of this setting.
    pub hex_uppercase: bool,
    /// Characters of context captured on each side of the error/log position
    /// when building `WalkLogEntry::context` (only consulted when the
    /// `logging` feature is enabled).
    pub log_context_window: usize,
    /// When `logging` is enabled, additionally record the JSON path for each
    /// log entry. Disabled by default because path formatting has a cost
    /// proportional to nesting depth.
    pub log_json_path: bool,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self {
            path_capacity: 256,
            ensure_ascii: false,
            allow_unquoted_keys: true,
            hex_uppercase: false,
            log_context_window: 16,
            log_json_path: true,
        }
    }
}
