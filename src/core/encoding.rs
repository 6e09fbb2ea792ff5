//! Text encodings understood by the text read/write operations.

use std::fmt;
use std::path::Path;

use crate::core::error::{Error, Result};

const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];
const UTF16_LE_BOM: [u8; 2] = [0xFF, 0xFE];
const UTF16_BE_BOM: [u8; 2] = [0xFE, 0xFF];

/// Byte-level text encoding.
///
/// `Encoding::default()` is UTF-8 without a byte-order mark; it is what every text
/// operation uses when the caller does not name an encoding.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum Encoding {
    #[default]
    Utf8,
    Utf8Bom,
    Utf16Le,
    Utf16Be,
}

impl Encoding {
    pub fn name(&self) -> &'static str {
        match self {
            Encoding::Utf8 => "utf-8",
            Encoding::Utf8Bom => "utf-8 (bom)",
            Encoding::Utf16Le => "utf-16le",
            Encoding::Utf16Be => "utf-16be",
        }
    }

    fn bom(&self) -> &'static [u8] {
        match self {
            Encoding::Utf8 => &[],
            Encoding::Utf8Bom => &UTF8_BOM,
            Encoding::Utf16Le => &UTF16_LE_BOM,
            Encoding::Utf16Be => &UTF16_BE_BOM,
        }
    }

    /// Number of bytes `text` occupies in this encoding, preamble excluded.
    pub fn byte_count(&self, text: &str) -> usize {
        match self {
            Encoding::Utf8 | Encoding::Utf8Bom => text.len(),
            Encoding::Utf16Le | Encoding::Utf16Be => text.encode_utf16().count() * 2,
        }
    }

    /// Encodes `text`, preamble included.
    pub fn encode(&self, text: &str) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.bom().len() + self.byte_count(text));
        bytes.extend_from_slice(self.bom());
        match self {
            Encoding::Utf8 | Encoding::Utf8Bom => bytes.extend_from_slice(text.as_bytes()),
            Encoding::Utf16Le => text
                .encode_utf16()
                .for_each(|unit| bytes.extend_from_slice(&unit.to_le_bytes())),
            Encoding::Utf16Be => text
                .encode_utf16()
                .for_each(|unit| bytes.extend_from_slice(&unit.to_be_bytes())),
        }
        bytes
    }

    /// Decodes the content of the file at `path`.
    /// A leading preamble matching this encoding is skipped; plain UTF-8 also skips a
    /// UTF-8 preamble.
    pub fn decode(&self, path: &Path, bytes: &[u8]) -> Result<String> {
        let invalid = || Error::Decode {
            path: path.to_path_buf(),
            encoding: self.name(),
        };
        match self {
            Encoding::Utf8 | Encoding::Utf8Bom => {
                let body = bytes.strip_prefix(&UTF8_BOM[..]).unwrap_or(bytes);
                String::from_utf8(body.to_vec()).map_err(|_| invalid())
            }
            Encoding::Utf16Le | Encoding::Utf16Be => {
                let body = bytes.strip_prefix(self.bom()).unwrap_or(bytes);
                if body.len() % 2 != 0 {
                    return Err(invalid());
                }
                let units: Vec<u16> = body
                    .chunks_exact(2)
                    .map(|pair| match self {
                        Encoding::Utf16Le => u16::from_le_bytes([pair[0], pair[1]]),
                        _ => u16::from_be_bytes([pair[0], pair[1]]),
                    })
                    .collect();
                String::from_utf16(&units).map_err(|_| invalid())
            }
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
