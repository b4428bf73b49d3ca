use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub fn from_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parse `#rrggbb` or `#rrggbbaa` (the `#` is optional).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
        match hex.len() {
            6 => Some(Self {
                r: channel(0)?,
                g: channel(2)?,
                b: channel(4)?,
                a: 255,
            }),
            8 => Some(Self {
                r: channel(0)?,
                g: channel(2)?,
                b: channel(4)?,
                a: channel(6)?,
            }),
            _ => None,
        }
    }

    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }

    /// Channels normalized to `0.0..=1.0`.
    pub fn to_unit_rgba(&self) -> [f32; 4] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            self.a as f32 / 255.0,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_six_digit_hex() {
        let c = Color::from_hex("#808080").unwrap();
        assert_eq!(c, Color::from_rgba(128, 128, 128, 255));
    }

    #[test]
    fn parse_eight_digit_hex_without_hash() {
        let c = Color::from_hex("d9d9d980").unwrap();
        assert_eq!(c, Color::from_rgba(217, 217, 217, 128));
    }

    #[test]
    fn reject_bad_hex() {
        assert!(Color::from_hex("#12345").is_none());
        assert!(Color::from_hex("#gg0000").is_none());
        assert!(Color::from_hex("").is_none());
    }

    #[test]
    fn reject_signed_channels() {
        assert!(Color::from_hex("#+1+1+1").is_none());
        assert!(Color::from_hex("+1+1+1+1").is_none());
        assert!(Color::from_hex("#-10000").is_none());
    }

    #[test]
    fn hex_round_trip() {
        assert_eq!(Color::from_hex("#d9d9d9").unwrap().to_hex(), "#d9d9d9");
        assert_eq!(Color::from_hex("#01020304").unwrap().to_hex(), "#01020304");
    }

    #[test]
    fn unit_rgba_scales_channels() {
        let [r, g, b, a] = Color::from_rgba(255, 0, 51, 255).to_unit_rgba();
        assert!((r - 1.0).abs() < f32::EPSILON);
        assert!(g.abs() < f32::EPSILON);
        assert!((b - 0.2).abs() < 1e-6);
        assert!((a - 1.0).abs() < f32::EPSILON);
    }
}
