//! Size-bounded reads for decoder output.
//!
//! Entry headers declare an uncompressed size, but nothing forces a decoder
//! to stop there. These helpers never read more than one byte past the
//! declared size, so a member lying about its size cannot grow a buffer
//! without bound.

use std::io;
use std::io::Read;

use crate::Result;
use crate::ScanError;

/// Reads exactly the declared number of bytes from `reader`.
///
/// # Errors
///
/// Returns `InvalidArchive` if the stream is shorter or longer than
/// `declared`, or the decoder error converted by [`decode_error`].
///
/// # Examples
///
/// ```
/// use arcscan_core::io::read_bounded;
///
/// let data = read_bounded(&mut &b"hello"[..], 5)?;
/// assert_eq!(data, b"hello");
/// assert!(read_bounded(&mut &b"hello world"[..], 5).is_err());
/// # Ok::<(), arcscan_core::ScanError>(())
/// ```
pub fn read_bounded<R: Read + ?Sized>(reader: &mut R, declared: u64) -> Result<Vec<u8>> {
    let capacity = usize::try_from(declared).map_err(|_| {
        ScanError::InvalidArchive(format!("entry size {declared} does not fit in memory"))
    })?;
    let mut buffer = Vec::with_capacity(capacity);
    let read = reader
        .take(declared.saturating_add(1))
        .read_to_end(&mut buffer)
        .map_err(decode_error)?;
    check_len(read as u64, declared)?;
    Ok(buffer)
}

/// Decodes `reader` to the end without keeping the data.
///
/// # Errors
///
/// Returns `InvalidArchive` on a size mismatch or decoder failure.
pub fn drain_bounded<R: Read + ?Sized>(reader: &mut R, declared: u64) -> Result<()> {
    let read = io::copy(&mut reader.take(declared.saturating_add(1)), &mut io::sink())
        .map_err(decode_error)?;
    check_len(read, declared)
}

/// Counts the bytes `reader` produces, keeping none of them.
///
/// # Errors
///
/// Returns `InvalidArchive` on decoder failure.
pub fn count_bytes<R: Read + ?Sized>(reader: &mut R) -> Result<u64> {
    io::copy(reader, &mut io::sink()).map_err(decode_error)
}

/// Converts a decoder I/O error into `InvalidArchive`.
///
/// Decoders report malformed input as `io::Error`; for in-memory data that
/// is a property of the bytes, not of the environment.
pub fn decode_error(err: io::Error) -> ScanError {
    ScanError::InvalidArchive(format!("decode failed: {err}"))
}

fn check_len(read: u64, declared: u64) -> Result<()> {
    match read.cmp(&declared) {
        std::cmp::Ordering::Equal => Ok(()),
        std::cmp::Ordering::Greater => Err(ScanError::InvalidArchive(format!(
            "entry is larger than its declared size of {declared} bytes"
        ))),
        std::cmp::Ordering::Less => Err(ScanError::InvalidArchive(format!(
            "entry is truncated: {read} of {declared} bytes"
        ))),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_read_exact_size() {
        let data = read_bounded(&mut &b"abc"[..], 3).unwrap();
        assert_eq!(data, b"abc");
    }

    #[test]
    fn test_read_oversized_rejected() {
        let err = read_bounded(&mut &b"abcdef"[..], 3).unwrap_err();
        assert!(matches!(err, ScanError::InvalidArchive(msg) if msg.contains("larger")));
    }

    #[test]
    fn test_read_truncated_rejected() {
        let err = read_bounded(&mut &b"ab"[..], 3).unwrap_err();
        assert!(matches!(err, ScanError::InvalidArchive(msg) if msg.contains("truncated")));
    }

    #[test]
    fn test_drain() {
        assert!(drain_bounded(&mut &b"abc"[..], 3).is_ok());
        assert!(drain_bounded(&mut &b"abcd"[..], 3).is_err());
    }

    #[test]
    fn test_count_bytes() {
        assert_eq!(count_bytes(&mut &b"12345"[..]).unwrap(), 5);
        assert_eq!(count_bytes(&mut &b""[..]).unwrap(), 0);
    }

    #[test]
    fn test_decode_error_is_soft() {
        let err = decode_error(io::Error::new(io::ErrorKind::InvalidData, "bad block"));
        assert!(!err.is_hard());
    }
}
