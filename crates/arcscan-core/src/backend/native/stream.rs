//! Single-stream compressors: gzip, bzip2, xz and zstd.
//!
//! These formats wrap exactly one unnamed payload (gzip may carry a file
//! name in its header). They are exposed as a container with one entry so
//! the scanner can treat `.tar.gz` as a gzip holding a tar.

use std::io;
use std::io::Read;
use std::io::Seek;

use bzip2::read::MultiBzDecoder;
use flate2::read::MultiGzDecoder;
use xz2::read::XzDecoder;

use crate::Result;
use crate::ScanError;
use crate::backend::Container;
use crate::backend::ItemInfo;
use crate::io::count_bytes;
use crate::io::decode_error;
use crate::io::drain_bounded;
use crate::io::read_bounded;
use crate::types::FormatId;

/// Entry name used when the stream carries none.
pub const DEFAULT_ENTRY_NAME: &str = "content";

/// A single-entry container over a compressed stream.
pub struct StreamContainer<R> {
    source: R,
    format: FormatId,
    items: Vec<ItemInfo>,
    pack_size: u64,
}

impl<R: Read + Seek> StreamContainer<R> {
    /// Decodes `source` once to learn the payload size.
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedFormat` for formats that are not single-stream
    /// compressors and `InvalidArchive` if the stream does not decode.
    pub fn open(mut source: R, format: FormatId) -> Result<Self> {
        let pack_size = source.seek(io::SeekFrom::End(0))?;
        source.rewind()?;

        let (name, size) = if format == FormatId::GZip {
            let mut decoder = MultiGzDecoder::new(&mut source);
            let size = count_bytes(&mut decoder)?;
            let name = decoder
                .header()
                .and_then(flate2::GzHeader::filename)
                .map(|raw| String::from_utf8_lossy(raw).into_owned());
            (name, size)
        } else {
            let mut decoder = decoder(&mut source, format)?;
            (None, count_bytes(&mut decoder)?)
        };

        let name = name
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| DEFAULT_ENTRY_NAME.to_string());
        tracing::trace!(?format, %name, size, "stream payload measured");

        Ok(Self {
            source,
            format,
            items: vec![ItemInfo::file(0, name, size)],
            pack_size,
        })
    }

    fn payload_size(&self, index: usize) -> Result<u64> {
        match self.items.get(index) {
            Some(item) => Ok(item.size),
            None => Err(ScanError::InvalidArchive(format!("no entry at index {index}"))),
        }
    }
}

impl<R: Read + Seek> Container for StreamContainer<R> {
    fn format(&self) -> FormatId {
        self.format
    }

    fn items(&self) -> &[ItemInfo] {
        &self.items
    }

    fn extract(&mut self, index: usize) -> Result<Vec<u8>> {
        let size = self.payload_size(index)?;
        self.source.rewind()?;
        let mut decoder = decoder(&mut self.source, self.format)?;
        read_bounded(&mut decoder, size)
    }

    fn validate(&mut self) -> Result<()> {
        let size = self.payload_size(0)?;
        self.source.rewind()?;
        let mut decoder = decoder(&mut self.source, self.format)?;
        drain_bounded(&mut decoder, size)
    }

    fn is_solid(&self) -> bool {
        false
    }

    fn pack_size(&self) -> u64 {
        self.pack_size
    }
}

fn decoder<'a, R: Read + 'a>(source: R, format: FormatId) -> Result<Box<dyn Read + 'a>> {
    Ok(match format {
        FormatId::GZip => Box::new(MultiGzDecoder::new(source)),
        FormatId::BZip2 => Box::new(MultiBzDecoder::new(source)),
        FormatId::Xz => Box::new(XzDecoder::new_multi_decoder(source)),
        FormatId::Zstd => Box::new(zstd::stream::read::Decoder::new(source).map_err(decode_error)?),
        _ => return Err(ScanError::UnsupportedFormat),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::test_utils;
    use std::io::Cursor;

    #[test]
    fn test_gzip_uses_header_name() {
        let data = test_utils::gzip("report.txt", b"gzip payload");
        let mut container =
            StreamContainer::open(Cursor::new(data.as_slice()), FormatId::GZip).unwrap();
        assert_eq!(container.items(), &[ItemInfo::file(0, "report.txt", 12)]);
        assert_eq!(container.extract(0).unwrap(), b"gzip payload");
        container.validate().unwrap();
        assert_eq!(container.pack_size(), data.len() as u64);
    }

    #[test]
    fn test_other_compressors_use_default_name() {
        let payload = test_utils::noise(5000);
        for (format, data) in [
            (FormatId::BZip2, test_utils::bzip2(&payload)),
            (FormatId::Xz, test_utils::xz(&payload)),
            (FormatId::Zstd, test_utils::zstd(&payload)),
        ] {
            let mut container = StreamContainer::open(Cursor::new(data.as_slice()), format).unwrap();
            assert_eq!(container.format(), format);
            assert_eq!(container.items()[0].path, DEFAULT_ENTRY_NAME);
            assert_eq!(container.items()[0].size, 5000);
            assert_eq!(container.extract(0).unwrap(), payload);
        }
    }

    #[test]
    fn test_corrupt_stream_rejected() {
        let mut data = test_utils::gzip("x", &test_utils::noise(4096));
        let middle = data.len() / 2;
        data.truncate(middle);
        let result = StreamContainer::open(Cursor::new(data.as_slice()), FormatId::GZip);
        assert!(matches!(result, Err(ScanError::InvalidArchive(_))));
    }

    #[test]
    fn test_non_stream_format_unsupported() {
        let result = StreamContainer::open(Cursor::new(&b"PK"[..]), FormatId::Zip);
        assert!(matches!(result, Err(ScanError::UnsupportedFormat)));
    }
}
