use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// Magic code marking a DICOM file
pub const DICM_MAGIC: &[u8; 4] = b"DICM";

/// Length of the standard preamble preceding the magic code
pub const PREAMBLE_LEN: usize = 128;

/// Where the DICOM magic was found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DicomLayout {
    /// 128-byte preamble followed by "DICM"
    Preamble,
    /// "DICM" at offset 0
    NoPreamble,
}

/// Checks a file for a DICOM header
///
/// DICOM files typically have:
/// - 128-byte preamble
/// - 4-byte "DICM" magic string at offset 128
///
/// Some writers omit the preamble and start with the magic directly;
/// those are accepted too.
///
/// # Errors
///
/// Returns the I/O error if the file cannot be opened or read.
pub fn sniff_file(path: &Path) -> io::Result<Option<DicomLayout>> {
    let file = File::open(path)?;

    let mut buffer = Vec::with_capacity(PREAMBLE_LEN + DICM_MAGIC.len());
    file.take((PREAMBLE_LEN + DICM_MAGIC.len()) as u64)
        .read_to_end(&mut buffer)?;

    Ok(sniff_bytes(&buffer))
}

/// Same as [`sniff_file`] on an in-memory header
pub fn sniff_bytes(header: &[u8]) -> Option<DicomLayout> {
    let magic_end = PREAMBLE_LEN + DICM_MAGIC.len();
    if header.len() >= magic_end && &header[PREAMBLE_LEN..magic_end] == DICM_MAGIC {
        Some(DicomLayout::Preamble)
    } else if header.starts_with(DICM_MAGIC) {
        Some(DicomLayout::NoPreamble)
    } else {
        None
    }
}
