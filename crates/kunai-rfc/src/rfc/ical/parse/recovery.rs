//! Repair of known-bad line wrapping and the one-retry parse attempt.

use std::borrow::Cow;

use super::error::{ParseError, ParseResult};

/// Stage of a recovering parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attempt {
    /// Parsing the input as given.
    First,
    /// Parsing the repaired input; no further repair is tried.
    Recovered,
}

/// Runs `parse` on `source`, retrying once on repaired input.
///
/// Only malformed-structure failures of the first attempt trigger the
/// repair. Failures of the second attempt, and every other failure, are
/// returned unchanged.
///
/// ## Errors
/// Whatever `parse` returns under the rules above.
pub fn with_recovery<'a, T, P, R>(source: &'a [u8], mut parse: P, repair: R) -> ParseResult<T>
where
    P: FnMut(&[u8]) -> ParseResult<T>,
    R: FnOnce(&'a [u8]) -> Vec<u8>,
{
    let mut attempt = Attempt::First;
    let mut input: Cow<'a, [u8]> = Cow::Borrowed(source);
    let mut repair = Some(repair);

    loop {
        let error: ParseError = match parse(&*input) {
            Ok(parsed) => {
                if attempt == Attempt::Recovered {
                    tracing::debug!("Parse succeeded after repairing line wrapping");
                }
                return Ok(parsed);
            }
            Err(error) => error,
        };

        match (attempt, repair.take()) {
            (Attempt::First, Some(repair)) if error.is_malformed_structure() => {
                tracing::warn!(%error, "Malformed content lines, retrying with repaired wrapping");
                input = Cow::Owned(repair(source));
                attempt = Attempt::Recovered;
            }
            _ => {
                tracing::debug!(?attempt, %error, "Parse failed");
                return Err(error);
            }
        }
    }
}

/// Repairs common line-wrapping mistakes in iCalendar text.
///
/// 1. Folds are removed at the byte level (`CRLF` or `LF` followed by SP or
///    HTAB), which rejoins multi-byte characters a producer split across a
///    fold.
/// 2. Lines without a colon are appended to the previous line, undoing
///    wraps that lack the continuation whitespace.
/// 3. Line endings become CRLF.
///
/// The result is a best effort and may still fail to parse.
#[must_use]
pub fn normalize_bad_wrapping(source: &[u8]) -> Vec<u8> {
    let unfolded = unfold_bytes(source);

    let mut out = Vec::with_capacity(unfolded.len() + 16);
    let mut has_line = false;
    for line in unfolded.split(|b| *b == b'\n') {
        let line = line.strip_suffix(b"\r").unwrap_or(line);
        if line.is_empty() {
            continue;
        }
        if has_line && !line.contains(&b':') {
            // Drop the CRLF that ended the previous line.
            out.truncate(out.len() - 2);
        }
        out.extend_from_slice(line);
        out.extend_from_slice(b"\r\n");
        has_line = true;
    }
    out
}

fn unfold_bytes(source: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(source.len());
    let mut i = 0;
    while i < source.len() {
        let fold_len = match &source[i..] {
            [b'\r', b'\n', b' ' | b'\t', ..] => 3,
            [b'\n', b' ' | b'\t', ..] => 2,
            _ => 0,
        };
        if fold_len > 0 {
            i += fold_len;
        } else {
            out.push(source[i]);
            i += 1;
        }
    }
    out
}
