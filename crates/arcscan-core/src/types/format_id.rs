//! Container format identifiers.

/// Container format codes as reported by the archive backend.
///
/// The numeric values are stable and shared with backends that speak the
/// 7-Zip format-id convention. Formats the native backend can only detect
/// (not open) are still listed so metadata from other backends maps cleanly.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum FormatId {
    /// Detection failed.
    #[default]
    Unknown = 0x00,
    Zip = 0x01,
    BZip2 = 0x02,
    Rar = 0x03,
    Arj = 0x04,
    Z = 0x05,
    Lzh = 0x06,
    SevenZip = 0x07,
    Cab = 0x08,
    Nsis = 0x09,
    Lzma = 0x0A,
    Lzma86 = 0x0B,
    Xz = 0x0C,
    Ppmd = 0x0D,
    Zstd = 0x0E,
    Vhdx = 0xC4,
    Coff = 0xC6,
    Ext = 0xC7,
    Vmdk = 0xC8,
    Vdi = 0xC9,
    QCow = 0xCA,
    Gpt = 0xCB,
    Rar5 = 0xCC,
    IHex = 0xCD,
    Hxs = 0xCE,
    Te = 0xCF,
    UefiC = 0xD0,
    UefiS = 0xD1,
    SquashFs = 0xD2,
    CramFs = 0xD3,
    Apm = 0xD4,
    Mslz = 0xD5,
    Flv = 0xD6,
    Swf = 0xD7,
    Swfc = 0xD8,
    Ntfs = 0xD9,
    Fat = 0xDA,
    Mbr = 0xDB,
    Vhd = 0xDC,
    /// Portable executable, including self-extracting archives.
    Pe = 0xDD,
    Elf = 0xDE,
    MachO = 0xDF,
    Udf = 0xE0,
    Xar = 0xE1,
    Mub = 0xE2,
    Hfs = 0xE3,
    Dmg = 0xE4,
    /// OLE compound file (.msi, legacy .doc/.xls/.ppt).
    Compound = 0xE5,
    Wim = 0xE6,
    Iso = 0xE7,
    Chm = 0xE9,
    Split = 0xEA,
    Rpm = 0xEB,
    Deb = 0xEC,
    Cpio = 0xED,
    Tar = 0xEE,
    GZip = 0xEF,
}

const ALL: [FormatId; 57] = [
    FormatId::Unknown,
    FormatId::Zip,
    FormatId::BZip2,
    FormatId::Rar,
    FormatId::Arj,
    FormatId::Z,
    FormatId::Lzh,
    FormatId::SevenZip,
    FormatId::Cab,
    FormatId::Nsis,
    FormatId::Lzma,
    FormatId::Lzma86,
    FormatId::Xz,
    FormatId::Ppmd,
    FormatId::Zstd,
    FormatId::Vhdx,
    FormatId::Coff,
    FormatId::Ext,
    FormatId::Vmdk,
    FormatId::Vdi,
    FormatId::QCow,
    FormatId::Gpt,
    FormatId::Rar5,
    FormatId::IHex,
    FormatId::Hxs,
    FormatId::Te,
    FormatId::UefiC,
    FormatId::UefiS,
    FormatId::SquashFs,
    FormatId::CramFs,
    FormatId::Apm,
    FormatId::Mslz,
    FormatId::Flv,
    FormatId::Swf,
    FormatId::Swfc,
    FormatId::Ntfs,
    FormatId::Fat,
    FormatId::Mbr,
    FormatId::Vhd,
    FormatId::Pe,
    FormatId::Elf,
    FormatId::MachO,
    FormatId::Udf,
    FormatId::Xar,
    FormatId::Mub,
    FormatId::Hfs,
    FormatId::Dmg,
    FormatId::Compound,
    FormatId::Wim,
    FormatId::Iso,
    FormatId::Chm,
    FormatId::Split,
    FormatId::Rpm,
    FormatId::Deb,
    FormatId::Cpio,
    FormatId::Tar,
    FormatId::GZip,
];

impl FormatId {
    /// Returns the backend code of this format.
    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Maps a backend code to a format. Unmapped codes become `Unknown`.
    ///
    /// # Examples
    ///
    /// ```
    /// use arcscan_core::FormatId;
    ///
    /// assert_eq!(FormatId::from_code(0x07), FormatId::SevenZip);
    /// assert_eq!(FormatId::from_code(0xC5), FormatId::Unknown);
    /// ```
    #[must_use]
    pub fn from_code(code: u8) -> Self {
        ALL.iter()
            .copied()
            .find(|format| format.code() == code)
            .unwrap_or(Self::Unknown)
    }

    /// Short extension string for this format; empty for `Unknown`.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Unknown => "",
            Self::Zip => "zip",
            Self::BZip2 => "bz2",
            Self::Rar | Self::Rar5 => "rar",
            Self::Arj => "arj",
            Self::Z => "z",
            Self::Lzh => "lzh",
            Self::SevenZip => "7z",
            Self::Cab => "cab",
            Self::Nsis => "nsis",
            Self::Lzma => "lzma",
            Self::Lzma86 => "lzma86",
            Self::Xz => "xz",
            Self::Ppmd => "ppmd",
            Self::Zstd => "zst",
            Self::Vhdx => "vhdx",
            Self::Coff => "coff",
            Self::Ext => "ext",
            Self::Vmdk => "vmdk",
            Self::Vdi => "vdi",
            Self::QCow => "qcow",
            Self::Gpt => "gpt",
            Self::IHex => "hex",
            Self::Hxs => "hxs",
            Self::Te => "te",
            Self::UefiC => "uefic",
            Self::UefiS => "uefis",
            Self::SquashFs => "squashfs",
            Self::CramFs => "cramfs",
            Self::Apm => "apm",
            Self::Mslz => "mslz",
            Self::Flv => "flv",
            Self::Swf => "swf",
            Self::Swfc => "swfc",
            Self::Ntfs => "ntfs",
            Self::Fat => "fat",
            Self::Mbr => "mbr",
            Self::Vhd => "vhd",
            Self::Pe => "pe",
            Self::Elf => "elf",
            Self::MachO => "macho",
            Self::Udf => "udf",
            Self::Xar => "xar",
            Self::Mub => "mub",
            Self::Hfs => "hfs",
            Self::Dmg => "dmg",
            Self::Compound => "compound",
            Self::Wim => "wim",
            Self::Iso => "iso",
            Self::Chm => "chm",
            Self::Split => "split",
            Self::Rpm => "rpm",
            Self::Deb => "deb",
            Self::Cpio => "cpio",
            Self::Tar => "tar",
            Self::GZip => "gz",
        }
    }
}

/// Extension for a raw backend code; empty for unmapped codes.
#[must_use]
pub fn extension_for_code(code: u8) -> &'static str {
    FormatId::from_code(code).extension()
}
