//! 7z containers.
//!
//! Entry metadata is read once from the archive header. The decoder only
//! streams whole blocks, so extracting one entry from a solid archive means
//! decoding every entry stored before it in the same block; callers guard
//! against that cost with the solid-size ceiling.

use std::io;
use std::io::Read;
use std::io::Seek;

use sevenz_rust2::Archive;
use sevenz_rust2::ArchiveReader;
use sevenz_rust2::Password;

use crate::Result;
use crate::ScanError;
use crate::backend::Container;
use crate::backend::ItemInfo;
use crate::io::count_bytes;
use crate::io::drain_bounded;
use crate::io::read_bounded;
use crate::types::FormatId;

/// A 7z archive opened from a seekable source.
pub struct SevenZContainer<R> {
    source: R,
    items: Vec<ItemInfo>,
    is_solid: bool,
    pack_size: u64,
}

impl<R: Read + Seek> SevenZContainer<R> {
    /// Reads the archive header of `source`.
    ///
    /// # Errors
    ///
    /// Returns `Encrypted` for password-protected archives and
    /// `InvalidArchive` for malformed headers.
    pub fn open(mut source: R) -> Result<Self> {
        let archive = Archive::read(&mut source, &Password::empty()).map_err(map_sevenz_error)?;

        let items = archive
            .files
            .iter()
            .enumerate()
            .map(|(index, entry)| {
                if entry.is_directory() {
                    ItemInfo::directory(index, entry.name.as_str())
                } else {
                    ItemInfo::file(index, entry.name.as_str(), entry.size)
                }
            })
            .collect();
        let pack_size = source.seek(io::SeekFrom::End(0))?;

        Ok(Self {
            source,
            items,
            is_solid: archive.is_solid,
            pack_size,
        })
    }

    /// Streams entries in archive order, handing the wanted ones to `visit`.
    ///
    /// `visit` returns `false` to stop early.
    fn for_each<F>(&mut self, mut visit: F) -> Result<()>
    where
        F: FnMut(&str, u64, &mut dyn Read) -> Result<bool>,
    {
        self.source.rewind()?;
        let mut reader =
            ArchiveReader::new(&mut self.source, Password::empty()).map_err(map_sevenz_error)?;

        let mut failure = None;
        reader
            .for_each_entries(|entry, data| {
                if entry.is_directory() {
                    return Ok(true);
                }
                match visit(&entry.name, entry.size, data) {
                    Ok(more) => Ok(more),
                    Err(err) => {
                        failure = Some(err);
                        Ok(false)
                    }
                }
            })
            .map_err(map_sevenz_error)?;

        failure.map_or(Ok(()), Err)
    }
}

impl<R: Read + Seek> Container for SevenZContainer<R> {
    fn format(&self) -> FormatId {
        FormatId::SevenZip
    }

    fn items(&self) -> &[ItemInfo] {
        &self.items
    }

    fn extract(&mut self, index: usize) -> Result<Vec<u8>> {
        let Some(target) = self.items.get(index).cloned() else {
            return Err(ScanError::InvalidArchive(format!("no entry at index {index}")));
        };

        // Entry names are not unique; the n-th entry with this name is the
        // n-th one streamed.
        let mut skip = self.items[..index]
            .iter()
            .filter(|item| !item.is_directory && item.path == target.path)
            .count();
        let mut found = None;
        self.for_each(|name, size, data| {
            if name != target.path {
                count_bytes(data)?;
                return Ok(true);
            }
            if skip > 0 {
                skip -= 1;
                count_bytes(data)?;
                return Ok(true);
            }
            found = Some(read_bounded(data, size)?);
            Ok(false)
        })?;

        found.ok_or_else(|| {
            ScanError::InvalidArchive(format!("7z entry {} has no data stream", target.path))
        })
    }

    fn validate(&mut self) -> Result<()> {
        self.for_each(|_, size, data| {
            drain_bounded(data, size)?;
            Ok(true)
        })
    }

    fn is_solid(&self) -> bool {
        self.is_solid
    }

    fn pack_size(&self) -> u64 {
        self.pack_size
    }
}

fn map_sevenz_error(err: sevenz_rust2::Error) -> ScanError {
    let message = err.to_string();
    let lower = message.to_lowercase();
    if lower.contains("password") || lower.contains("encrypt") {
        return ScanError::Encrypted(message);
    }
    ScanError::InvalidArchive(format!("7z: {message}"))
}
