//! Couplet splitting for stored lyrics.
//!
//! Lyrics are stored as a single text where couplets (stanzas) are separated
//! by a blank line. Couplets are addressed with 1-based indices.

use thiserror::Error;

/// Separator between two couplets: exactly two consecutive newlines.
pub const COUPLET_SEPARATOR: &str = "\n\n";

/// Requested couplet index is outside `1..=available`.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("There is no couplet {index} (song has {available})")]
pub struct CoupletOutOfRange {
    pub index: i64,
    pub available: usize,
}

/// Split lyrics into couplets, in order.
///
/// An empty text yields a single empty couplet.
pub fn split_couplets(text: &str) -> Vec<&str> {
    text.split(COUPLET_SEPARATOR).collect()
}

/// Select the couplet at the 1-based `index`. No clamping is applied.
pub fn select_couplet(text: &str, index: i64) -> Result<&str, CoupletOutOfRange> {
    let couplets = split_couplets(text);
    let available = couplets.len();

    usize::try_from(index)
        .ok()
        .and_then(|i| i.checked_sub(1))
        .and_then(|i| couplets.get(i).copied())
        .ok_or(CoupletOutOfRange { index, available })
}
