//! Color types for terminal rendering.

use crate::error::{Error, Result};

/// A terminal color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Color {
    /// True color RGB.
    Rgb {
        /// Red component.
        r: u8,
        /// Green component.
        g: u8,
        /// Blue component.
        b: u8,
    },
    /// 256-color palette index.
    Indexed(u8),
    /// Named ANSI color (the 16 standard colors).
    Named(NamedColor),
}

/// The 16 standard ANSI colors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum NamedColor {
    /// Black (30/40).
    Black,
    /// Red (31/41).
    Red,
    /// Green (32/42).
    Green,
    /// Yellow (33/43).
    Yellow,
    /// Blue (34/44).
    Blue,
    /// Magenta (35/45).
    Magenta,
    /// Cyan (36/46).
    Cyan,
    /// White (37/47).
    White,
    /// Bright black / dark gray (90/100).
    BrightBlack,
    /// Bright red (91/101).
    BrightRed,
    /// Bright green (92/102).
    BrightGreen,
    /// Bright yellow (93/103).
    BrightYellow,
    /// Bright blue (94/104).
    BrightBlue,
    /// Bright magenta (95/105).
    BrightMagenta,
    /// Bright cyan (96/106).
    BrightCyan,
    /// Bright white (97/107).
    BrightWhite,
}

impl Color {
    /// Parse a hex color string like `"#rrggbb"` or `"#rgb"`.
    pub fn from_hex(hex: &str) -> Result<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        let expand = |c: char| -> Result<u8> {
            let s: String = [c, c].iter().collect();
            u8::from_str_radix(&s, 16).map_err(|e| Error::Render(format!("invalid hex color: {e}")))
        };
        match hex.len() {
            6 => {
                let byte = |i: usize| -> Result<u8> {
                    u8::from_str_radix(&hex[i..i + 2], 16)
                        .map_err(|e| Error::Render(format!("invalid hex color: {e}")))
                };
                Ok(Self::Rgb {
                    r: byte(0)?,
                    g: byte(2)?,
                    b: byte(4)?,
                })
            }
            3 => {
                let mut chars = hex.chars();
                let r = expand(chars.next().ok_or_else(|| Error::Render("empty hex color".into()))?)?;
                let g = expand(chars.next().ok_or_else(|| Error::Render("empty hex color".into()))?)?;
                let b = expand(chars.next().ok_or_else(|| Error::Render("empty hex color".into()))?)?;
                Ok(Self::Rgb { r, g, b })
            }
            _ => Err(Error::Render(format!("invalid hex color length: {hex}"))),
        }
    }

    /// SGR foreground parameter codes for this color (without the leading `ESC [` or trailing `m`).
    pub(crate) fn sgr_fg_params(self) -> Vec<u16> {
        match self {
            Color::Rgb { r, g, b } => vec![38, 2, r as u16, g as u16, b as u16],
            Color::Indexed(i) => vec![38, 5, i as u16],
            Color::Named(n) => vec![n.fg_code()],
        }
    }

    /// SGR background parameter codes for this color.
    pub(crate) fn sgr_bg_params(self) -> Vec<u16> {
        match self {
            Color::Rgb { r, g, b } => vec![48, 2, r as u16, g as u16, b as u16],
            Color::Indexed(i) => vec![48, 5, i as u16],
            Color::Named(n) => vec![n.bg_code()],
        }
    }
}

impl NamedColor {
    /// The SGR foreground code (e.g. 31 for red, 91 for bright red).
    pub const fn fg_code(self) -> u16 {
        match self {
            NamedColor::Black => 30,
            NamedColor::Red => 31,
            NamedColor::Green => 32,
            NamedColor::Yellow => 33,
            NamedColor::Blue => 34,
            NamedColor::Magenta => 35,
            NamedColor::Cyan => 36,
            NamedColor::White => 37,
            NamedColor::BrightBlack => 90,
            NamedColor::BrightRed => 91,
            NamedColor::BrightGreen => 92,
            NamedColor::BrightYellow => 93,
            NamedColor::BrightBlue => 94,
            NamedColor::BrightMagenta => 95,
            NamedColor::BrightCyan => 96,
            NamedColor::BrightWhite => 97,
        }
    }

    /// The SGR background code.
    pub const fn bg_code(self) -> u16 {
        self.fg_code() + 10
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_hex_six_digit() {
        let c = Color::from_hex("#ff00aa").expect("valid hex");
        assert_eq!(c, Color::Rgb { r: 0xff, g: 0x00, b: 0xaa });
    }

    #[test]
    fn from_hex_three_digit() {
        let c = Color::from_hex("f0a").expect("valid hex");
        assert_eq!(c, Color::Rgb { r: 0xff, g: 0x00, b: 0xaa });
    }

    #[test]
    fn from_hex_invalid_length() {
        assert!(Color::from_hex("#ffff").is_err());
    }

    #[test]
    fn named_fg_bg_codes() {
        assert_eq!(NamedColor::Red.fg_code(), 31);
        assert_eq!(NamedColor::Red.bg_code(), 41);
        assert_eq!(NamedColor::BrightCyan.fg_code(), 96);
    }
}
