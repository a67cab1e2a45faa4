use std::fmt;

const SATURATION: u8 = 70;
const LIGHTNESS: u8 = 50;

/// Display color of a cluster slot, in HSL space.
///
/// Formats as a CSS color string, e.g. `hsl(90, 70%, 50%)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Hsl {
    /// Hue in degrees, `0..360`
    pub hue: u16,
    /// Saturation in percent
    pub saturation: u8,
    /// Lightness in percent
    pub lightness: u8,
}
impl Hsl {
    /// Convert to 8-bit RGB components.
    pub fn to_rgb(&self) -> (u8, u8, u8) {
        let h = f64::from(self.hue % 360) / 60.0;
        let s = f64::from(self.saturation.min(100)) / 100.0;
        let l = f64::from(self.lightness.min(100)) / 100.0;

        let chroma = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let x = chroma * (1.0 - (h % 2.0 - 1.0).abs());
        let (r, g, b) = match h as u8 {
            0 => (chroma, x, 0.0),
            1 => (x, chroma, 0.0),
            2 => (0.0, chroma, x),
            3 => (0.0, x, chroma),
            4 => (x, 0.0, chroma),
            _ => (chroma, 0.0, x),
        };
        let m = l - chroma / 2.0;
        let to_byte = |v: f64| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
        (to_byte(r), to_byte(g), to_byte(b))
    }
}
impl fmt::Display for Hsl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "hsl({}, {}%, {}%)", self.hue, self.saturation, self.lightness)
    }
}

/// Generate **num_colors** visually distinct colors, evenly spaced by hue (hue is floored to whole degrees).
pub fn generate_distinct_colors(num_colors: usize) -> Vec<Hsl> {
    if num_colors == 0 {
        return Vec::new();
    }
    let step = 360.0 / num_colors as f64;
    (0..num_colors)
        .map(|i| Hsl {
            hue: (i as f64 * step).floor() as u16,
            saturation: SATURATION,
            lightness: LIGHTNESS,
        })
        .collect()
}
