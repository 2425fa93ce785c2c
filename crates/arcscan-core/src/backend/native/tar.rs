//! Uncompressed TAR containers.
//!
//! Compressed tarballs (`.tar.gz` and friends) are handled as a single-stream
//! container whose only entry is the inner tar, which the scanner then opens
//! one level deeper.

use std::io;
use std::io::Read;
use std::io::Seek;
use std::io::SeekFrom;

use crate::Result;
use crate::ScanError;
use crate::backend::Container;
use crate::backend::ItemInfo;
use crate::io::read_bounded;
use crate::types::FormatId;

/// A TAR archive with entry data located by offset.
pub struct TarContainer<R> {
    source: R,
    items: Vec<ItemInfo>,
    offsets: Vec<u64>,
    pack_size: u64,
}

impl<R: Read + Seek> TarContainer<R> {
    /// Walks every header of `source` and records where each entry's data
    /// starts.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArchive` on a bad header checksum or truncated data.
    pub fn open(mut source: R) -> Result<Self> {
        let pack_size = source.seek(SeekFrom::End(0))?;
        source.rewind()?;

        let mut items = Vec::new();
        let mut offsets = Vec::new();
        {
            let mut archive = tar::Archive::new(&mut source);
            for (index, entry) in archive.entries_with_seek().map_err(tar_error)?.enumerate() {
                let entry = entry.map_err(tar_error)?;
                let path = entry.path().map_err(tar_error)?.to_string_lossy().into_owned();
                let size = entry.size();
                let end = entry.raw_file_position().saturating_add(size);
                if end > pack_size {
                    return Err(ScanError::InvalidArchive(format!(
                        "tar entry {path} runs past the end of the archive"
                    )));
                }
                offsets.push(entry.raw_file_position());
                items.push(if entry.header().entry_type().is_dir() {
                    ItemInfo::directory(index, path)
                } else {
                    ItemInfo::file(index, path, size)
                });
            }
        }

        if items.is_empty() && pack_size > 0 && !has_zero_block(&mut source)? {
            return Err(ScanError::InvalidArchive("tar has no readable headers".into()));
        }

        Ok(Self {
            source,
            items,
            offsets,
            pack_size,
        })
    }
}

impl<R: Read + Seek> Container for TarContainer<R> {
    fn format(&self) -> FormatId {
        FormatId::Tar
    }

    fn items(&self) -> &[ItemInfo] {
        &self.items
    }

    fn extract(&mut self, index: usize) -> Result<Vec<u8>> {
        let (Some(item), Some(&offset)) = (self.items.get(index), self.offsets.get(index)) else {
            return Err(ScanError::InvalidArchive(format!("no entry at index {index}")));
        };
        let size = item.size;
        self.source.seek(SeekFrom::Start(offset))?;
        read_bounded(&mut (&mut self.source).take(size), size)
    }

    fn validate(&mut self) -> Result<()> {
        // Headers were checksummed on open; data must be fully present.
        for (item, &offset) in self.items.iter().zip(&self.offsets) {
            if offset.saturating_add(item.size) > self.pack_size {
                return Err(ScanError::InvalidArchive(format!(
                    "tar entry {} is truncated",
                    item.path
                )));
            }
        }
        Ok(())
    }

    fn is_solid(&self) -> bool {
        false
    }

    fn pack_size(&self) -> u64 {
        self.pack_size
    }
}

fn has_zero_block<R: Read + Seek>(source: &mut R) -> Result<bool> {
    source.rewind()?;
    let mut block = [0u8; 512];
    match source.read_exact(&mut block) {
        Ok(()) => Ok(block.iter().all(|&b| b == 0)),
        Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => Ok(false),
        Err(e) => Err(e.into()),
    }
}

fn tar_error(err: io::Error) -> ScanError {
    ScanError::InvalidArchive(format!("tar: {err}"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::test_utils::TarTestBuilder;
    use std::io::Cursor;

    #[test]
    fn test_lists_and_extracts() {
        let data = TarTestBuilder::new()
            .add_file("one.txt", b"first")
            .add_directory("sub/")
            .add_file("sub/two.txt", b"second entry")
            .build();
        let mut container = TarContainer::open(Cursor::new(data.as_slice())).unwrap();

        let items = container.items().to_vec();
        assert_eq!(items.len(), 3);
        assert_eq!(items[0], ItemInfo::file(0, "one.txt", 5));
        assert!(items[1].is_directory);
        assert_eq!(items[2].size, 12);

        assert_eq!(container.extract(0).unwrap(), b"first");
        assert_eq!(container.extract(2).unwrap(), b"second entry");
        // Extraction order does not matter.
        assert_eq!(container.extract(0).unwrap(), b"first");
        container.validate().unwrap();
        assert_eq!(container.pack_size(), data.len() as u64);
    }

    #[test]
    fn test_truncated_tar_rejected() {
        let data = TarTestBuilder::new().add_file("big.bin", &[7u8; 4096]).build();
        let truncated = &data[..1024];
        assert!(TarContainer::open(Cursor::new(truncated)).is_err());
    }

    #[test]
    fn test_empty_tar_is_valid() {
        let data = TarTestBuilder::new().build();
        let container = TarContainer::open(Cursor::new(data.as_slice())).unwrap();
        assert!(container.items().is_empty());
    }
}
