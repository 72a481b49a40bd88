// Copyright 2025-2026, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! General purpose utilities.

pub mod color;
pub mod solc;
pub mod sys;

/// Decodes a hex string with an optional `0x` prefix.
pub fn decode0x(text: impl AsRef<str>) -> Result<Vec<u8>, hex::FromHexError> {
    let text = text.as_ref().trim();
    let text = text.strip_prefix("0x").unwrap_or(text);
    hex::decode(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_with_and_without_prefix() {
        assert_eq!(decode0x("0x6000").unwrap(), vec![0x60, 0x00]);
        assert_eq!(decode0x(" 6000\n").unwrap(), vec![0x60, 0x00]);
        assert!(decode0x("0xzz").is_err());
    }
}
