// Copyright 2024 Logan Magee
//
// SPDX-License-Identifier: LicenseRef-Proprietary

use std::{fs, path::Path};

use anyhow::{Context, bail};
use byteorder::{ByteOrder, LittleEndian};
use clap::ValueEnum;
use log::info;

/// The number of bytes encoding each symbol of an input file
#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Width {
    /// One byte per symbol
    #[value(name = "1")]
    Byte,
    /// Two little-endian bytes per symbol
    #[value(name = "2")]
    Half,
    /// Four little-endian bytes per symbol
    #[value(name = "4")]
    Word,
}

impl Width {
    fn bytes(self) -> usize {
        match self {
            Width::Byte => 1,
            Width::Half => 2,
            Width::Word => 4,
        }
    }
}

/// Reads the symbols of `path`.
///
/// If `trim` is set, one trailing line ending is dropped first. This only makes sense for
/// byte-wide text files.
pub fn read_symbols(path: &Path, width: Width, trim: bool) -> anyhow::Result<Vec<u32>> {
    let mut data =
        fs::read(path).with_context(|| format!("Failed to read input file '{}'", path.display()))?;
    if trim {
        trim_line_ending(&mut data);
    }

    let symbols = decode(&data, width)
        .with_context(|| format!("Failed to decode input file '{}'", path.display()))?;
    info!("read {} symbols from '{}'", symbols.len(), path.display());

    Ok(symbols)
}

/// Reads one pattern per line from `path`, each byte being one symbol.
///
/// Empty lines are skipped.
pub fn read_patterns(path: &Path) -> anyhow::Result<Vec<Vec<u32>>> {
    let data = fs::read(path)
        .with_context(|| format!("Failed to read patterns file '{}'", path.display()))?;

    let patterns: Vec<Vec<u32>> = data
        .split(|&b| b == b'\n')
        .map(|line| line.strip_suffix(b"\r").unwrap_or(line))
        .filter(|line| !line.is_empty())
        .map(|line| line.iter().copied().map(u32::from).collect())
        .collect();
    info!("read {} patterns from '{}'", patterns.len(), path.display());

    Ok(patterns)
}

/// Decodes `data` into symbols of `width` bytes each.
pub fn decode(data: &[u8], width: Width) -> anyhow::Result<Vec<u32>> {
    if data.len() % width.bytes() != 0 {
        bail!(
            "length {} is not a multiple of the symbol width {}",
            data.len(),
            width.bytes(),
        );
    }

    let symbols = match width {
        Width::Byte => data.iter().copied().map(u32::from).collect(),
        Width::Half => {
            let mut symbols = vec![0; data.len() / 2];
            LittleEndian::read_u16_into(data, &mut symbols);
            symbols.into_iter().map(u32::from).collect()
        }
        Width::Word => {
            let mut symbols = vec![0; data.len() / 4];
            LittleEndian::read_u32_into(data, &mut symbols);
            symbols
        }
    };

    Ok(symbols)
}

fn trim_line_ending(data: &mut Vec<u8>) {
    if data.last() == Some(&b'\n') {
        data.pop();
        if data.last() == Some(&b'\r') {
            data.pop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_bytes() {
        assert_eq!(decode(b"ab", Width::Byte).unwrap(), [97, 98]);
    }

    #[test]
    fn decode_little_endian() {
        assert_eq!(decode(&[1, 2, 3, 4], Width::Half).unwrap(), [0x0201, 0x0403]);
        assert_eq!(decode(&[1, 2, 3, 4], Width::Word).unwrap(), [0x0403_0201]);
    }

    #[test]
    fn decode_truncated() {
        assert!(decode(&[1, 2, 3], Width::Half).is_err());
    }

    #[test]
    fn trim_crlf() {
        let mut data = b"abc\r\n".to_vec();
        trim_line_ending(&mut data);

        assert_eq!(data, b"abc");
    }
}
