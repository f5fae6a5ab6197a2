//! Drawable surface contract and colors

use crate::error::ConfigError;
use serde::Deserialize;

/// RGBA color, 8 bits per channel
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Parse `#RRGGBB` or `#RRGGBBAA`
    pub fn from_hex(hex: &str) -> Result<Self, ConfigError> {
        let invalid = || ConfigError::InvalidColor(hex.to_string());
        let digits = hex.strip_prefix('#').ok_or_else(invalid)?;
        if !(digits.len() == 6 || digits.len() == 8) || !digits.is_ascii() {
            return Err(invalid());
        }
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| invalid());
        Ok(Self {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
            a: if digits.len() == 8 { channel(6)? } else { 255 },
        })
    }

    /// CSS form accepted by canvas `strokeStyle` / `fillStyle`
    pub fn to_css(&self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }

    /// Normalized [r, g, b, a] for vertex colors
    pub fn to_f32_array(&self) -> [f32; 4] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            self.a as f32 / 255.0,
        ]
    }
}

impl TryFrom<String> for Color {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Color::from_hex(&value)
    }
}

/// Mutable 2D pixel surface the skeleton is drawn onto.
///
/// Coordinates are in pixels, origin top-left.
pub trait DrawSurface {
    /// Current (width, height) in pixels
    fn size(&self) -> (u32, u32);

    fn resize(&mut self, width: u32, height: u32);

    /// Erase the whole surface to transparent
    fn clear(&mut self);

    fn set_line_width(&mut self, width: f64);

    fn set_stroke_color(&mut self, color: Color);

    fn set_fill_color(&mut self, color: Color);

    fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64));

    fn fill_circle(&mut self, center: (f64, f64), radius: f64);

    /// Flush batched drawing. Immediate-mode surfaces need not override.
    fn present(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex() {
        assert_eq!(Color::from_hex("#00FF00").unwrap(), Color::rgb(0, 255, 0));
        assert_eq!(
            Color::from_hex("#ff000080").unwrap(),
            Color { r: 255, g: 0, b: 0, a: 128 }
        );
    }

    #[test]
    fn test_reject_malformed() {
        for bad in ["00ff00", "#0f0", "#gg0000", "#00ff00f", ""] {
            assert!(Color::from_hex(bad).is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn test_css_form() {
        assert_eq!(Color::rgb(0, 255, 0).to_css(), "#00ff00");
        assert_eq!(Color { r: 1, g: 2, b: 3, a: 4 }.to_css(), "#01020304");
    }

    #[test]
    fn test_deserialize_from_string() {
        let color: Color = serde_json::from_str("\"#112233\"").unwrap();
        assert_eq!(color, Color::rgb(0x11, 0x22, 0x33));
        assert!(serde_json::from_str::<Color>("\"red\"").is_err());
    }
}
