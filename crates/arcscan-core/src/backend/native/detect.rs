//! Magic-byte format detection.

use crate::types::FormatId;

/// Bytes of header needed by [`sniff`]; covers the tar magic at offset 257.
pub const SNIFF_LEN: usize = 262;

const TAR_MAGIC_OFFSET: usize = 257;

/// Signatures matched at offset 0, most specific first.
const SIGNATURES: &[(&[u8], FormatId)] = &[
    (&[0x37, 0x7A, 0xBC, 0xAF, 0x27, 0x1C], FormatId::SevenZip),
    (b"Rar!\x1a\x07\x01\x00", FormatId::Rar5),
    (b"Rar!\x1a\x07\x00", FormatId::Rar),
    (&[0xFD, b'7', b'z', b'X', b'Z', 0x00], FormatId::Xz),
    (&[0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1], FormatId::Compound),
    (b"!<arch>\ndebian", FormatId::Deb),
    (b"MSWIM\0\0\0", FormatId::Wim),
    (b"vhdxfile", FormatId::Vhdx),
    (b"PK\x03\x04", FormatId::Zip),
    (b"PK\x05\x06", FormatId::Zip),
    (&[0x28, 0xB5, 0x2F, 0xFD], FormatId::Zstd),
    (b"\x7fELF", FormatId::Elf),
    (&[0xFE, 0xED, 0xFA, 0xCE], FormatId::MachO),
    (&[0xFE, 0xED, 0xFA, 0xCF], FormatId::MachO),
    (&[0xCE, 0xFA, 0xED, 0xFE], FormatId::MachO),
    (&[0xCF, 0xFA, 0xED, 0xFE], FormatId::MachO),
    (b"MSCF", FormatId::Cab),
    (b"xar!", FormatId::Xar),
    (&[0xED, 0xAB, 0xEE, 0xDB], FormatId::Rpm),
    (b"070701", FormatId::Cpio),
    (b"070707", FormatId::Cpio),
    (b"ITSF", FormatId::Chm),
    (b"FLV\x01", FormatId::Flv),
    (b"QFI\xFB", FormatId::QCow),
    (b"hsqs", FormatId::SquashFs),
    (&[0x45, 0x3D, 0xCD, 0x28], FormatId::CramFs),
    (b"BZh", FormatId::BZip2),
    (b"FWS", FormatId::Swf),
    (b"CWS", FormatId::Swfc),
    (&[0x1F, 0x8B], FormatId::GZip),
    (&[0x1F, 0x9D], FormatId::Z),
    (&[0x60, 0xEA], FormatId::Arj),
    (b"MZ", FormatId::Pe),
];

/// Identifies the container format from the first bytes of the data.
///
/// Returns `None` when no signature matches. `header` may be shorter than
/// [`SNIFF_LEN`]; signatures that do not fit are simply not matched.
///
/// # Examples
///
/// ```
/// use arcscan_core::backend::native::detect::sniff;
/// use arcscan_core::FormatId;
///
/// assert_eq!(sniff(b"PK\x03\x04rest"), Some(FormatId::Zip));
/// assert_eq!(sniff(b"plain text"), None);
/// ```
#[must_use]
pub fn sniff(header: &[u8]) -> Option<FormatId> {
    let found = SIGNATURES
        .iter()
        .find(|(magic, _)| header.starts_with(magic))
        .map(|&(_, format)| format)
        .or_else(|| is_ustar(header).then_some(FormatId::Tar));
    tracing::trace!(?found, header_len = header.len(), "format sniffed");
    found
}

/// Whether the native backend can open containers of this format.
#[must_use]
pub const fn is_openable(format: FormatId) -> bool {
    matches!(
        format,
        FormatId::Zip
            | FormatId::SevenZip
            | FormatId::Tar
            | FormatId::GZip
            | FormatId::BZip2
            | FormatId::Xz
            | FormatId::Zstd
    )
}

fn is_ustar(header: &[u8]) -> bool {
    header
        .get(TAR_MAGIC_OFFSET..TAR_MAGIC_OFFSET + 5)
        .is_some_and(|magic| magic == b"ustar")
}
