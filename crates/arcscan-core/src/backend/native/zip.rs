//! ZIP containers.

use std::io::Read;
use std::io::Seek;

use zip::ZipArchive;
use zip::result::ZipError;

use crate::Result;
use crate::ScanError;
use crate::backend::Container;
use crate::backend::ItemInfo;
use crate::io::drain_bounded;
use crate::io::read_bounded;
use crate::types::FormatId;

/// A ZIP archive opened from any seekable source.
///
/// Entries are read from the central directory once; member data is only
/// decompressed on [`Container::extract`] and [`Container::validate`].
pub struct ZipContainer<R> {
    archive: ZipArchive<R>,
    items: Vec<ItemInfo>,
    pack_size: u64,
}

impl<R: Read + Seek> ZipContainer<R> {
    /// Parses the central directory of `source`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArchive` if the directory is malformed.
    pub fn open(source: R) -> Result<Self> {
        let mut archive = ZipArchive::new(source).map_err(map_zip_error)?;

        let mut items = Vec::with_capacity(archive.len());
        let mut pack_size = 0u64;
        for index in 0..archive.len() {
            let entry = archive.by_index_raw(index).map_err(map_zip_error)?;
            pack_size = pack_size.saturating_add(entry.compressed_size());
            items.push(if entry.is_dir() {
                ItemInfo::directory(index, entry.name())
            } else {
                ItemInfo::file(index, entry.name(), entry.size())
            });
        }

        Ok(Self {
            archive,
            items,
            pack_size,
        })
    }

    fn declared_size(&self, index: usize) -> Result<u64> {
        self.items
            .get(index)
            .map(|item| item.size)
            .ok_or_else(|| ScanError::InvalidArchive(format!("no entry at index {index}")))
    }
}

impl<R: Read + Seek> Container for ZipContainer<R> {
    fn format(&self) -> FormatId {
        FormatId::Zip
    }

    fn items(&self) -> &[ItemInfo] {
        &self.items
    }

    fn extract(&mut self, index: usize) -> Result<Vec<u8>> {
        let declared = self.declared_size(index)?;
        let mut entry = self.archive.by_index(index).map_err(map_zip_error)?;
        read_bounded(&mut entry, declared)
    }

    fn validate(&mut self) -> Result<()> {
        for index in 0..self.items.len() {
            if self.items[index].is_directory {
                continue;
            }
            let declared = self.items[index].size;
            let mut entry = self.archive.by_index(index).map_err(map_zip_error)?;
            // Reading to the end makes the decoder verify the CRC.
            drain_bounded(&mut entry, declared)?;
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

fn map_zip_error(err: ZipError) -> ScanError {
    match err {
        ZipError::UnsupportedArchive(msg) if msg.to_lowercase().contains("password") => {
            ScanError::Encrypted(msg.to_string())
        }
        other => ScanError::InvalidArchive(format!("zip: {other}")),
    }
}
