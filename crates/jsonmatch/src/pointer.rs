//! Path segment escaping and path splitting.
//!
//! Paths are JSON-Pointer style: `/`-separated segments where a literal
//! `~` is written `~0` and a literal `/` is written `~1`.

use std::borrow::Cow;

use crate::error::Error;

/// Escapes a key for use as a path segment.
///
/// Returns the input unchanged (and unallocated) when it contains neither
/// `~` nor `/`.
pub fn encode_segment(segment: &str) -> Cow<'_, str> {
    if !segment.contains(['~', '/']) {
        return Cow::Borrowed(segment);
    }
    Cow::Owned(segment.replace('~', "~0").replace('/', "~1"))
}

/// Reverses [`encode_segment`]: `~1` becomes `/`, then `~0` becomes `~`.
///
/// Decoding is lenient: an escape other than `~0`/`~1`, or a trailing `~`,
/// passes through as literal text. `decode_segment(encode_segment(s))`
/// returns `s` for every `s`.
pub fn decode_segment(segment: &str) -> Cow<'_, str> {
    if !segment.contains('~') {
        return Cow::Borrowed(segment);
    }
    Cow::Owned(segment.replace("~1", "/").replace("~0", "~"))
}

/// Splits a path into raw, still-escaped segments.
///
/// A path is `/` followed by `/`-separated segments; `"/"` names the single
/// empty key at the root. The empty path and any path not beginning with
/// `/` fail before any navigation takes place.
pub fn split(path: &str) -> Result<Vec<&str>, Error> {
    match path.strip_prefix('/') {
        Some(rest) => Ok(rest.split('/').collect()),
        None => Err(Error::InvalidPath {
            src: path.to_string(),
            span: (0, usize::from(!path.is_empty())).into(),
        }),
    }
}
