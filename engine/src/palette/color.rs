use crate::common::ColorError;
use std::fmt;

/// An opaque 24-bit color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

pub const WHITE: Rgb = Rgb::new(0xFF, 0xFF, 0xFF);
pub const BLACK: Rgb = Rgb::new(0x00, 0x00, 0x00);

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build from a packed `0xRRGGBB` literal.
    pub const fn from_u32(packed: u32) -> Self {
        Self::new((packed >> 16) as u8, (packed >> 8) as u8, packed as u8)
    }

    /// Parse `#RRGGBB` or `#RGB` (leading `#` optional).
    pub fn parse_hex(hex: &str) -> Result<Self, ColorError> {
        let trimmed = hex.trim();
        if trimmed.is_empty() {
            return Err(ColorError::Empty);
        }

        let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);
        let invalid = |reason: &str| ColorError::InvalidHex {
            value: hex.to_string(),
            reason: reason.to_string(),
        };

        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid("contains non-hex characters"));
        }

        match digits.len() {
            6 => {
                let channel = |range: std::ops::Range<usize>| {
                    u8::from_str_radix(&digits[range], 16).map_err(|_| invalid("bad channel"))
                };
                Ok(Self::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
            }
            3 => {
                let mut channels = [0u8; 3];
                for (slot, c) in channels.iter_mut().zip(digits.chars()) {
                    let nibble = c.to_digit(16).ok_or_else(|| invalid("bad channel"))? as u8;
                    *slot = nibble * 17;
                }
                Ok(Self::new(channels[0], channels[1], channels[2]))
            }
            _ => Err(invalid("expected 3 or 6 hex digits")),
        }
    }

    /// Uppercase `#RRGGBB`.
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Linear blend towards `other`; `amount` is clamped to `0.0..=1.0`.
    pub fn mix(self, other: Rgb, amount: f32) -> Rgb {
        let t = amount.clamp(0.0, 1.0);
        let blend = |a: u8, b: u8| -> u8 {
            let value = f32::from(a) + (f32::from(b) - f32::from(a)) * t;
            value.round().clamp(0.0, 255.0) as u8
        };
        Rgb::new(
            blend(self.r, other.r),
            blend(self.g, other.g),
            blend(self.b, other.b),
        )
    }

    pub fn lighten(self, amount: f32) -> Rgb {
        self.mix(WHITE, amount)
    }

    pub fn darken(self, amount: f32) -> Rgb {
        self.mix(BLACK, amount)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Whether `value` is a well-formed hex color accepted by palettes.
pub fn is_valid_hex(value: &str) -> bool {
    value.starts_with('#') && Rgb::parse_hex(value).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_long_and_short_forms() {
        assert_eq!(Rgb::parse_hex("#7C3AED").unwrap(), Rgb::new(0x7C, 0x3A, 0xED));
        assert_eq!(Rgb::parse_hex("7c3aed").unwrap(), Rgb::new(0x7C, 0x3A, 0xED));
        assert_eq!(Rgb::parse_hex("#FFF").unwrap(), WHITE);
    }

    #[test]
    fn rejects_malformed_values() {
        assert_eq!(Rgb::parse_hex(""), Err(ColorError::Empty));
        assert!(Rgb::parse_hex("#12345").is_err());
        assert!(Rgb::parse_hex("#GGGGGG").is_err());
        assert!(Rgb::parse_hex("purple").is_err());
    }

    #[test]
    fn packed_literals_unpack_per_channel() {
        assert_eq!(Rgb::from_u32(0x7C3AED), Rgb::new(0x7C, 0x3A, 0xED));
    }

    #[test]
    fn formats_uppercase_hex() {
        assert_eq!(Rgb::new(10, 11, 255).to_hex(), "#0A0BFF");
    }

    #[test]
    fn mixing_is_bounded_by_endpoints() {
        let c = Rgb::new(0x20, 0x40, 0x60);
        assert_eq!(c.mix(WHITE, 0.0), c);
        assert_eq!(c.mix(WHITE, 1.0), WHITE);
        assert_eq!(c.darken(2.0), BLACK);
        assert_eq!(BLACK.mix(WHITE, 0.5), Rgb::new(128, 128, 128));
    }

    #[test]
    fn palette_hex_requires_hash_prefix() {
        assert!(is_valid_hex("#0EA5E9"));
        assert!(is_valid_hex("#fff"));
        assert!(!is_valid_hex("0EA5E9"));
        assert!(!is_valid_hex(""));
    }
}
