use std::str::FromStr;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

/// Parse a `#rrggbb` (or `rrggbb`) string.
pub fn parse_hex(hex: &str) -> Option<Color32> {
    let rgb = Srgb::<u8>::from_str(hex.trim()).ok()?;
    Some(Color32::from_rgb(rgb.red, rgb.green, rgb.blue))
}

// ---------------------------------------------------------------------------
// Discrete colour sequence
// ---------------------------------------------------------------------------

/// Colours assigned to chart categories in order, cycling when there are
/// more categories than colours.
#[derive(Debug, Clone)]
pub struct ColorSequence {
    colors: Vec<Color32>,
}

impl ColorSequence {
    /// Build from hex strings. Unparseable entries are skipped; if nothing
    /// parses, six generated hues are used instead.
    pub fn from_hex(hex_colors: &[String]) -> Self {
        let mut colors = Vec::with_capacity(hex_colors.len());
        for hex in hex_colors {
            match parse_hex(hex) {
                Some(c) => colors.push(c),
                None => log::warn!("Ignoring invalid palette colour '{hex}'"),
            }
        }
        if colors.is_empty() {
            colors = generate_palette(6);
        }
        ColorSequence { colors }
    }

    /// Colour for the `index`-th category.
    pub fn color_at(&self, index: usize) -> Color32 {
        self.colors[index % self.colors.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_with_and_without_hash() {
        assert_eq!(parse_hex("#4d4d4d"), Some(Color32::from_rgb(0x4d, 0x4d, 0x4d)));
        assert_eq!(parse_hex("1f78b4"), Some(Color32::from_rgb(0x1f, 0x78, 0xb4)));
        assert_eq!(parse_hex("not a colour"), None);
    }

    #[test]
    fn sequence_cycles() {
        let seq = ColorSequence::from_hex(&["#000000".into(), "#ffffff".into()]);
        assert_eq!(seq.color_at(0), Color32::BLACK);
        assert_eq!(seq.color_at(1), Color32::WHITE);
        assert_eq!(seq.color_at(2), Color32::BLACK);
    }

    #[test]
    fn invalid_palette_falls_back_to_generated_hues() {
        let seq = ColorSequence::from_hex(&["bogus".into()]);
        assert_ne!(seq.color_at(0), seq.color_at(1));
        assert_ne!(seq.color_at(0), seq.color_at(5));
        assert_eq!(seq.color_at(0), seq.color_at(6));
    }
}
