//! Conversion between a byte value and its text in one of four numeric bases,
//! plus the keystroke-level input predicates for each base.
//!
//! The predicates accept partial input (including the empty string) so that an
//! edit field can be cleared while typing.

use crate::error::{BinEditError, BinEditErrorKind};

/// Numeric base a byte can be displayed in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Base {
    Bin,
    Oct,
    Dec,
    Hex,
}

impl Base {
    #[must_use]
    pub const fn radix(self) -> u32 {
        match self {
            Self::Bin => 2,
            Self::Oct => 8,
            Self::Dec => 10,
            Self::Hex => 16,
        }
    }

    /// Input predicate matching the base
    #[must_use]
    pub fn validator(self) -> fn(&str) -> bool {
        match self {
            Self::Bin => is_bin,
            Self::Oct => is_oct,
            Self::Dec => is_dec,
            Self::Hex => is_hex,
        }
    }
}

impl TryFrom<u32> for Base {
    type Error = BinEditError;

    fn try_from(radix: u32) -> Result<Self, Self::Error> {
        match radix {
            2 => Ok(Self::Bin),
            8 => Ok(Self::Oct),
            10 => Ok(Self::Dec),
            16 => Ok(Self::Hex),
            other => Err(BinEditError::ConvertError(
                BinEditErrorKind::UnsupportedBase(other),
            )),
        }
    }
}

/// Up to 8 binary digits
#[must_use]
pub fn is_bin(text: &str) -> bool {
    text.len() <= 8 && text.bytes().all(|b| b == b'0' || b == b'1')
}

/// Empty, or 1-3 octal digits with value <= 255
#[must_use]
pub fn is_oct(text: &str) -> bool {
    fits_byte(text, 8)
}

/// Empty, or 1-3 decimal digits with value <= 255
#[must_use]
pub fn is_dec(text: &str) -> bool {
    fits_byte(text, 10)
}

/// Up to 2 hex digits, either case
#[must_use]
pub fn is_hex(text: &str) -> bool {
    text.len() <= 2 && text.bytes().all(|b| b.is_ascii_hexdigit())
}

fn fits_byte(text: &str, radix: u32) -> bool {
    if text.is_empty() {
        return true;
    }
    text.len() <= 3
        && text.chars().all(|c| c.is_digit(radix))
        && u32::from_str_radix(text, radix).is_ok_and(|v| v <= 255)
}

/// Byte <-> text converter for a selectable base.
///
/// The base is stored as given; an unsupported one only fails once the
/// converter is used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ByteNumStr {
    base: u32,
}

impl Default for ByteNumStr {
    fn default() -> Self {
        Self { base: 16 }
    }
}

impl ByteNumStr {
    #[must_use]
    pub const fn new(base: u32) -> Self {
        Self { base }
    }

    pub const fn set_base(&mut self, base: u32) {
        self.base = base;
    }

    #[must_use]
    pub const fn base(&self) -> u32 {
        self.base
    }

    /// Format the byte in the current base.
    ///
    /// Binary is padded to 8 digits, octal to 3, hex to 2 (lowercase).
    /// Decimal is not padded.
    ///
    /// # Errors
    /// Returns an error if the current base is unsupported.
    ///
    /// # Example
    /// ```
    /// use bineditlib::ByteNumStr;
    ///
    /// let conv = ByteNumStr::new(2);
    /// assert_eq!(conv.to_string(5).unwrap(), "00000101");
    /// ```
    pub fn to_string(&self, value: u8) -> Result<String, BinEditError> {
        Ok(match Base::try_from(self.base)? {
            Base::Bin => format!("{value:08b}"),
            Base::Oct => format!("{value:03o}"),
            Base::Dec => format!("{value}"),
            Base::Hex => format!("{value:02x}"),
        })
    }

    /// Parse text in the current base.
    ///
    /// # Errors
    /// Returns an error if the base is unsupported, the text is not a number
    /// in the base, or the number exceeds 255.
    pub fn to_int(&self, text: &str) -> Result<u8, BinEditError> {
        let base = Base::try_from(self.base)?;
        let value = u32::from_str_radix(text, base.radix()).map_err(|_| {
            BinEditError::ConvertError(BinEditErrorKind::InvalidDigits(
                text.to_string(),
                self.base,
            ))
        })?;
        u8::try_from(value).map_err(|_| {
            BinEditError::ConvertError(BinEditErrorKind::ValueOutOfRange(
                text.to_string(),
                self.base,
            ))
        })
    }

    /// Input predicate for the current base.
    ///
    /// # Errors
    /// Returns an error if the current base is unsupported.
    pub fn validator(&self) -> Result<fn(&str) -> bool, BinEditError> {
        Ok(Base::try_from(self.base)?.validator())
    }

    /// Check partial input against the current base.
    ///
    /// # Errors
    /// Returns an error if the current base is unsupported.
    pub fn is_valid(&self, text: &str) -> Result<bool, BinEditError> {
        Ok(self.validator()?(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASES: [u32; 4] = [2, 8, 10, 16];

    #[test]
    fn test_round_trip_all_bases_all_bytes() {
        for base in BASES {
            // Arrange
            let conv = ByteNumStr::new(base);

            for value in 0..=u8::MAX {
                // Act
                let text = conv.to_string(value).unwrap_or_default();
                let back = conv.to_int(&text);

                // Assert
                assert_eq!(back, Ok(value), "base {base}, text '{text}'");
                assert_eq!(conv.is_valid(&text), Ok(true), "base {base}, text '{text}'");
            }
        }
    }

    #[test]
    fn test_to_string_padding() {
        // Arrange
        let mut conv = ByteNumStr::default();

        // Act + Assert
        assert_eq!(conv.to_string(0xAB), Ok("ab".to_string()));
        assert_eq!(conv.to_string(0x05), Ok("05".to_string()));
        conv.set_base(8);
        assert_eq!(conv.to_string(8), Ok("010".to_string()));
        conv.set_base(10);
        assert_eq!(conv.to_string(7), Ok("7".to_string()));
        conv.set_base(2);
        assert_eq!(conv.to_string(255), Ok("11111111".to_string()));
    }

    #[test]
    fn test_unsupported_base() {
        // Arrange
        let conv = ByteNumStr::new(7);
        let expected = Err(BinEditError::ConvertError(
            BinEditErrorKind::UnsupportedBase(7),
        ));

        // Act + Assert
        assert_eq!(conv.to_string(1), expected);
        assert_eq!(
            conv.to_int("1"),
            Err(BinEditError::ConvertError(
                BinEditErrorKind::UnsupportedBase(7)
            ))
        );
        assert!(conv.validator().is_err());
        assert!(conv.is_valid("1").is_err());
    }

    #[test]
    fn test_to_int_errors() {
        // Arrange
        let conv = ByteNumStr::new(10);

        // Act + Assert
        assert_eq!(
            conv.to_int("1a"),
            Err(BinEditError::ConvertError(BinEditErrorKind::InvalidDigits(
                "1a".to_string(),
                10
            )))
        );
        assert_eq!(
            conv.to_int("256"),
            Err(BinEditError::ConvertError(
                BinEditErrorKind::ValueOutOfRange("256".to_string(), 10)
            ))
        );
        assert!(conv.to_int("").is_err());
    }

    #[test]
    fn test_hex_validator() {
        assert!(is_hex(""));
        assert!(is_hex("a"));
        assert!(is_hex("ff"));
        assert!(is_hex("Fe"));
        assert!(!is_hex("fff"));
        assert!(!is_hex("gg"));
    }

    #[test]
    fn test_dec_validator() {
        assert!(is_dec(""));
        assert!(is_dec("255"));
        assert!(is_dec("0"));
        assert!(!is_dec("256"));
        assert!(!is_dec("1a"));
        assert!(!is_dec("1000"));
    }

    #[test]
    fn test_oct_validator() {
        assert!(is_oct(""));
        assert!(is_oct("377"));
        assert!(!is_oct("400"));
        assert!(!is_oct("8"));
        assert!(!is_oct("0777"));
    }

    #[test]
    fn test_bin_validator() {
        assert!(is_bin(""));
        assert!(is_bin("1"));
        assert!(is_bin("10101010"));
        assert!(!is_bin("101010101"));
        assert!(!is_bin("2"));
    }

    #[test]
    fn test_base_try_from() {
        assert_eq!(Base::try_from(16), Ok(Base::Hex));
        assert_eq!(Base::Oct.radix(), 8);
        assert!(Base::try_from(3).is_err());
    }
}
