//! Statistical decompression bomb heuristic.
//!
//! Bombs are usually built from long runs of one or very few byte values,
//! because those compress best. This module flags buffers whose byte
//! histogram is dominated by a single value.
//!
//! This is a heuristic, not a guarantee. A large all-zero image or sparse
//! file is a false positive; a bomb padded with random noise is a false
//! negative. Callers should treat a hit as "do not trust", not "malicious".
//!
//! Small tar archives are a common false positive too: 512-byte headers,
//! block padding and the 1024-byte zero trailer leave the zero byte well
//! above the dominance threshold unless the members carry real payload.

/// Buffers of this size or smaller are never flagged.
pub const BOMB_MIN_LEN: usize = 1024;

/// Share (in percent) the most common byte must reach when the buffer uses
/// more than [`BOMB_FEW_SYMBOLS`] distinct values.
pub const BOMB_DOMINANT_PERCENT: u64 = 80;

/// Up to this many distinct values, a perfectly even spread already trips
/// the heuristic.
pub const BOMB_FEW_SYMBOLS: usize = 3;

/// Returns `true` if `buffer` looks like decompression bomb output.
///
/// Let `dominant` be the share of the most frequent byte value and
/// `distinct` the number of byte values present. The buffer is flagged when
/// it is longer than [`BOMB_MIN_LEN`] and
///
/// - `distinct <= 3` and `dominant >= 100 / distinct`, or
/// - `distinct > 3` and `dominant >= 80%`.
///
/// The function is pure: the same bytes always give the same answer.
///
/// # Examples
///
/// ```
/// use arcscan_core::is_bomb;
///
/// assert!(is_bomb(&vec![0u8; 4096]));
/// assert!(!is_bomb(&vec![0u8; 1024]));
/// assert!(!is_bomb(b""));
/// ```
#[must_use]
pub fn is_bomb(buffer: &[u8]) -> bool {
    if buffer.len() <= BOMB_MIN_LEN {
        return false;
    }

    let mut histogram = [0u64; 256];
    for &byte in buffer {
        histogram[usize::from(byte)] += 1;
    }

    let distinct = histogram.iter().filter(|&&count| count > 0).count();
    let dominant = histogram.iter().copied().max().unwrap_or(0);

    // Compare shares as integer ratios to stay exact on even spreads.
    let len = buffer.len() as u128;
    let dominant = u128::from(dominant);
    if distinct <= BOMB_FEW_SYMBOLS {
        dominant * distinct as u128 >= len
    } else {
        dominant * 100 >= len * u128::from(BOMB_DOMINANT_PERCENT)
    }
}
