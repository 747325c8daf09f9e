//! File-centric helpers out of scope for the walker proper (§1 "file I/O
//! helpers... are external collaborators"): slurp and the atomic
//! pretty-print-in-place rewrite.

use std::fs;
use std::io;
use std::path::Path;

use crate::error::{JRResult, JsonError, JsonErrorKind};
use crate::prettify::prettify_to_string;

/// `fread`: reads `path` fully into a `String` (§6).
pub fn fread(path: impl AsRef<Path>) -> io::Result<String> {
    fs::read_to_string(path)
}

/// `prettify_file`: reads `path` in full, rewrites it pretty-printed, and
/// restores the original bytes if anything fails partway through (§6
/// "on error, restores the original bytes").
pub fn prettify_file(path: impl AsRef<Path>) -> JRResult<()> {
    let path = path.as_ref();
    let original = fs::read_to_string(path).map_err(io_err)?;
    let pretty = match prettify_to_string(&original) {
        Ok(p) => p,
        Err(e) => return Err(e),
    };
    if let Err(e) = fs::write(path, &pretty) {
        // Best effort restore; if this also fails the file is left in
        // whatever state the failed write produced.
        let _ = fs::write(path, &original);
        return Err(io_err(e));
    }
    Ok(())
}

fn io_err(e: io::Error) -> JsonError {
    JsonError::new(JsonErrorKind::Message(e.to_string()), 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn prettify_file_rewrites_in_place() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        write!(f, r#"{{"a":1}}"#).unwrap();
        let path = f.path().to_path_buf();
        prettify_file(&path).unwrap();
        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "{\n  \"a\": 1\n}");
    }

    #[test]
    fn prettify_file_restores_original_on_bad_input() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        write!(f, "{{not json").unwrap();
        let path = f.path().to_path_buf();
        let before = fs::read_to_string(&path).unwrap();
        assert!(prettify_file(&path).is_err());
        let after = fs::read_to_string(&path).unwrap();
        assert_eq!(before, after);
    }
}
