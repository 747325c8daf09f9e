//! Neighbor-finder: `next_key`/`next_elem`, an iteration helper layered on
//! the walker (§4.5). Each call re-scans the whole document — simplicity
//! over speed is the documented tradeoff.

use crate::error::JRResult;
use crate::options::WalkOptions;
use crate::token::Token;
use crate::walker::walk;

/// One direct child of a container, returned by [`next_key`]/[`next_elem`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Neighbor {
    pub token: Token,
    /// The child's raw key (objects) or decimal index text (arrays).
    pub label: String,
}

/// Returns the first direct member of the object at `path` whose token
/// starts strictly after `after` (byte offset into `input`, or `None` to
/// start from the beginning).
pub fn next_key(input: &str, path: &str, after: Option<usize>) -> JRResult<Option<Neighbor>> {
    next_child(input, path, after, false)
}

/// Returns the first direct element of the array at `path` whose token
/// starts strictly after `after`.
pub fn next_elem(input: &str, path: &str, after: Option<usize>) -> JRResult<Option<Neighbor>> {
    next_child(input, path, after, true)
}

fn next_child(
    input: &str,
    path: &str,
    after: Option<usize>,
    want_array: bool,
) -> JRResult<Option<Neighbor>> {
    let opts = WalkOptions::default();
    let mut best: Option<(usize, Neighbor)> = None;
    walk(input, &opts, |ev| {
        let Some(rest) = ev.path.strip_prefix(path) else {
            return;
        };
        let label = if want_array {
            if !rest.starts_with('[') {
                return;
            }
            let Some(close) = rest.find(']') else { return };
            if rest[close + 1..].contains(['[', '.']) {
                return; // not a direct child, a grandchild
            }
            rest[1..close].to_string()
        } else {
            if !rest.starts_with('.') {
                return;
            }
            let key = &rest[1..];
            if key.contains(['.', '[']) {
                return; // not a direct child
            }
            key.to_string()
        };
        let Some((start, _)) = ev.token.span() else {
            return;
        };
        if let Some(cutoff) = after {
            if start <= cutoff {
                return;
            }
        }
        let better = best.as_ref().is_none_or(|(s, _)| start < *s);
        if better {
            best = Some((
                start,
                Neighbor {
                    token: ev.token,
                    label,
                },
            ));
        }
    })?;
    Ok(best.map(|(_, n)| n))
}
