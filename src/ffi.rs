//! C FFI bindings for pathjson.
//!
//! Exposes a C-compatible surface over the core operations (§6). Enable
//! with the `c-api` feature.

use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::ptr;

use crate::error::{JsonError, JsonErrorKind};
use crate::printf::PrintfArg;
use crate::setf::{vsetf, Mutation};
use crate::sink::VecSink;
use crate::walker::walk;

// ============================================================================
// Error handling
// ============================================================================

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathjsonErrorCode {
    Ok = 0,
    Incomplete = 1,
    UnexpectedChar = 2,
    ObjectKeyExpected = 3,
    ColonExpected = 4,
    InvalidUnicode = 5,
    PathOverflow = 6,
    Other = 7,
}

#[repr(C)]
pub struct PathjsonError {
    pub code: PathjsonErrorCode,
    pub message: *mut c_char,
    pub position: usize,
}

impl PathjsonError {
    fn from_json_error(err: JsonError) -> Self {
        let code = match err.kind {
            JsonErrorKind::Incomplete => PathjsonErrorCode::Incomplete,
            JsonErrorKind::UnexpectedChar(_) => PathjsonErrorCode::UnexpectedChar,
            JsonErrorKind::ObjectKeyExpected => PathjsonErrorCode::ObjectKeyExpected,
            JsonErrorKind::ColonExpected => PathjsonErrorCode::ColonExpected,
            JsonErrorKind::InvalidUnicodeEscape => PathjsonErrorCode::InvalidUnicode,
            JsonErrorKind::PathOverflow => PathjsonErrorCode::PathOverflow,
            JsonErrorKind::Message(_) => PathjsonErrorCode::Other,
        };
        let message = CString::new(err.to_string())
            .unwrap_or_else(|_| CString::new("unknown error").unwrap())
            .into_raw();
        PathjsonError {
            code,
            message,
            position: err.position,
        }
    }

    fn ok() -> Self {
        PathjsonError {
            code: PathjsonErrorCode::Ok,
            message: ptr::null_mut(),
            position: 0,
        }
    }
}

/// Frees a string returned by any function in this module.
///
/// # Safety
/// `s` must be a pointer previously returned by this module, or NULL.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn pathjson_free(s: *mut c_char) {
    unsafe {
        if !s.is_null() {
            drop(CString::from_raw(s));
        }
    }
}

unsafe fn borrow_str<'a>(p: *const c_char) -> Option<&'a str> {
    if p.is_null() {
        return None;
    }
    unsafe { CStr::from_ptr(p).to_str().ok() }
}

fn to_c_string(s: String) -> *mut c_char {
    CString::new(s)
        .unwrap_or_else(|_| CString::new("").unwrap())
        .into_raw()
}

// ============================================================================
// Pretty-printer
// ============================================================================

/// Pretty-prints `input`. Returns NULL on error (see `pathjson_prettify_ex`
/// for details).
///
/// # Safety
/// `input` must be a valid NUL-terminated UTF-8 string. The return value, if
/// non-null, must be freed with [`pathjson_free`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn pathjson_prettify(input: *const c_char) -> *mut c_char {
    unsafe { pathjson_prettify_ex(input, ptr::null_mut()) }
}

/// Same as [`pathjson_prettify`], additionally reporting error details through
/// `error` (may be NULL to ignore).
///
/// # Safety
/// Same as [`pathjson_prettify`]; if `error` is non-null and an error occurs,
/// `error.message` must be freed with `pathjson_free` (or libc `free`).
#[unsafe(no_mangle)]
pub unsafe extern "C" fn pathjson_prettify_ex(
    input: *const c_char,
    error: *mut PathjsonError,
) -> *mut c_char {
    unsafe {
        let Some(s) = borrow_str(input) else {
            if !error.is_null() {
                *error = PathjsonError::from_json_error(JsonError::new(
                    JsonErrorKind::Message("input is NULL or not UTF-8".into()),
                    0,
                ));
            }
            return ptr::null_mut();
        };
        match crate::prettify::prettify_to_string(s) {
            Ok(out) => {
                if !error.is_null() {
                    *error = PathjsonError::ok();
                }
                to_c_string(out)
            }
            Err(e) => {
                if !error.is_null() {
                    *error = PathjsonError::from_json_error(e);
                }
                ptr::null_mut()
            }
        }
    }
}

// ============================================================================
// Extraction (raw text of a scalar at a path; the FFI surface stays untyped,
// unlike the in-process `scanf` converter table, so it never needs to guess
// a C target type for the caller)
// ============================================================================

/// Returns the raw source text of the value at `path` (quotes stripped for
/// strings), or NULL if `path` does not exist in `input`.
///
/// # Safety
/// `input`/`path` must be valid NUL-terminated UTF-8 strings. The return
/// value, if non-null, must be freed with [`pathjson_free`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn pathjson_get(
    input: *const c_char,
    path: *const c_char,
) -> *mut c_char {
    unsafe {
        let (Some(input), Some(path)) = (borrow_str(input), borrow_str(path)) else {
            return ptr::null_mut();
        };
        let mut found = None;
        let result = walk(input, &crate::options::WalkOptions::default(), |ev| {
            if found.is_none() && ev.path == path {
                if let Some((s, e)) = ev.token.span() {
                    found = Some(input[s..e].to_string());
                }
            }
        });
        if result.is_err() {
            return ptr::null_mut();
        }
        match found {
            Some(text) => to_c_string(text),
            None => ptr::null_mut(),
        }
    }
}

// ============================================================================
// Mutation
// ============================================================================

/// Inserts/replaces `path` in `input` with the literal (already-rendered)
/// JSON text `value`, synthesizing intermediate containers as needed.
///
/// # Safety
/// All string arguments must be valid NUL-terminated UTF-8. The return
/// value, if non-null, must be freed with [`pathjson_free`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn pathjson_set(
    input: *const c_char,
    path: *const c_char,
    value: *const c_char,
) -> *mut c_char {
    unsafe {
        let (Some(input), Some(path), Some(value)) =
            (borrow_str(input), borrow_str(path), borrow_str(value))
        else {
            return ptr::null_mut();
        };
        let mut sink = VecSink::new();
        let emit_raw = |s: &mut dyn crate::sink::Sink| {
            s.write_str(value);
        };
        let args = [PrintfArg::Func(&emit_raw)];
        let mutation = Mutation::Set {
            fmt: "%M",
            args: &args,
        };
        match vsetf(input, path, mutation, &mut sink) {
            Ok(_) => to_c_string(sink.into_string()),
            Err(_) => ptr::null_mut(),
        }
    }
}

/// Deletes `path` from `input`. Returns the unchanged document if `path`
/// does not exist.
///
/// # Safety
/// Same as [`pathjson_set`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn pathjson_delete(
    input: *const c_char,
    path: *const c_char,
) -> *mut c_char {
    unsafe {
        let (Some(input), Some(path)) = (borrow_str(input), borrow_str(path)) else {
            return ptr::null_mut();
        };
        let mut sink = VecSink::new();
        match vsetf(input, path, Mutation::Delete, &mut sink) {
            Ok(_) => to_c_string(sink.into_string()),
            Err(_) => ptr::null_mut(),
        }
    }
}

// ============================================================================
// Version info
// ============================================================================

/// Returns a static version string; do not free.
#[unsafe(no_mangle)]
pub extern "C" fn pathjson_version() -> *const c_char {
    concat!(env!("CARGO_PKG_VERSION"), "\0").as_ptr() as *const c_char
}
